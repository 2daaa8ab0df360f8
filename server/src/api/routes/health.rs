//! Health check endpoint

use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

use crate::core::constants::APP_NAME;

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

/// Liveness probe for the console API
#[utoipa::path(
    get,
    path = "/api/v1/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse)
    )
)]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: APP_NAME,
        version: env!("CARGO_PKG_VERSION"),
    })
}
