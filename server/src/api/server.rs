//! API server initialization

use std::net::SocketAddr;

use anyhow::{Context, Result};
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::response::Redirect;
use axum::routing::get;
use tokio::net::TcpListener;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use super::middleware::{self, AllowedOrigins};
use super::openapi::{openapi_json, swagger_ui_html};
use super::routes::{filters, health};
use crate::core::CoreApp;
use crate::core::config::AppConfig;
use crate::core::constants::DEFAULT_BODY_LIMIT;

pub struct ApiServer {
    app: CoreApp,
}

impl ApiServer {
    pub fn new(app: CoreApp) -> Self {
        Self { app }
    }

    /// Serve until shutdown is triggered; returns the app for teardown
    pub async fn start(self) -> Result<CoreApp> {
        let app = self.app;
        let shutdown = app.shutdown.clone();

        let host = &app.config.server.host;
        let port = app.config.server.port;
        let addr = SocketAddr::new(
            host.parse()
                .with_context(|| format!("Invalid bind address: {}", host))?,
            port,
        );

        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind {}", addr))?;
        tracing::debug!(%addr, "API listening");

        axum::serve(
            listener,
            router(&app.config).into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown.wait())
        .await?;

        Ok(app)
    }
}

/// Build the full API router for a configuration
pub fn router(config: &AppConfig) -> Router {
    let allowed_origins = AllowedOrigins::new(&config.server.host, config.server.port);

    Router::new()
        .route("/", get(|| async { Redirect::temporary("/api/docs") }))
        .route("/api/v1/health", get(health::health))
        .route("/api/openapi.json", get(openapi_json))
        .route("/api/docs", get(swagger_ui_html))
        .nest("/api/v1/filters", filters::routes(config.filters.clone()))
        .fallback(middleware::handle_404)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(middleware::cors(&allowed_origins))
        .layer(DefaultBodyLimit::max(DEFAULT_BODY_LIMIT))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{FiltersConfig, ServerConfig};
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use tower::ServiceExt;

    fn config() -> AppConfig {
        AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8089,
            },
            filters: FiltersConfig::default(),
            debug: false,
        }
    }

    async fn send(req: Request<Body>) -> axum::response::Response {
        router(&config()).oneshot(req).await.unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = send(
            Request::builder()
                .uri("/api/v1/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_filters_are_nested() {
        let response = send(
            Request::builder()
                .method("POST")
                .uri("/api/v1/filters/headers/encode")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"clauses":[{"key":"a","value":"b"}]}"#))
                .unwrap(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["expression"], "a=b");
    }

    #[tokio::test]
    async fn test_unknown_route_is_json_404() {
        let response = send(
            Request::builder()
                .uri("/api/v1/nope")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_openapi_document_served() {
        let response = send(
            Request::builder()
                .uri("/api/openapi.json")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await["info"]["title"],
            "Citrus Console API"
        );
    }

    #[tokio::test]
    async fn test_cors_allows_console_origin() {
        let response = send(
            Request::builder()
                .uri("/api/v1/health")
                .header(header::ORIGIN, "http://localhost:8089")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "http://localhost:8089"
        );
    }
}
