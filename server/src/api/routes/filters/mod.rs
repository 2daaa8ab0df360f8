//! Filter API endpoints
//!
//! Header filter codec operations and console query helpers.

pub mod types;

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};

use types::{
    DecodeResponse, EncodeRequest, EncodeResponse, ExpressionRequest, MergeQueryRequest,
    MergeQueryResponse, ValidateResponse,
};

use crate::api::extractors::{ConsoleQueryParams, ValidatedJson};
use crate::api::types::ApiError;
use crate::core::FiltersConfig;
use crate::domain::filters::{
    self, ConsoleQuery, FilterClause, HeaderFilterForm, merge_query_params, parse_query_string,
    to_query_string,
};

/// Shared state for Filter API endpoints
#[derive(Clone)]
pub struct FiltersApiState {
    pub limits: FiltersConfig,
}

impl FiltersApiState {
    pub(crate) fn check_length(&self, expression: &str) -> Result<(), ApiError> {
        if expression.len() > self.limits.max_expression_length {
            return Err(ApiError::bad_request(
                "EXPRESSION_TOO_LONG",
                format!(
                    "Header filter expression exceeds {} bytes",
                    self.limits.max_expression_length
                ),
            ));
        }
        Ok(())
    }

    pub(crate) fn check_clause_count(&self, count: usize) -> Result<(), ApiError> {
        if count > self.limits.max_clauses {
            return Err(ApiError::bad_request(
                "TOO_MANY_CLAUSES",
                format!(
                    "At most {} clauses per header filter",
                    self.limits.max_clauses
                ),
            ));
        }
        Ok(())
    }
}

/// Build Filter API routes
pub fn routes(limits: FiltersConfig) -> Router<()> {
    let state = FiltersApiState { limits };

    Router::new()
        .route("/headers/validate", post(validate_header_filter))
        .route("/headers/decode", post(decode_header_filter))
        .route("/headers/encode", post(encode_header_filter))
        .route("/query", get(parse_console_query))
        .route("/query/merge", post(merge_console_query))
        .with_state(state)
}

/// Check a header filter expression
#[utoipa::path(
    post,
    path = "/api/v1/filters/headers/validate",
    tag = "filters",
    request_body = ExpressionRequest,
    responses(
        (status = 200, description = "Validation outcome", body = ValidateResponse),
        (status = 400, description = "Malformed request or expression too long")
    )
)]
pub async fn validate_header_filter(
    State(state): State<FiltersApiState>,
    ValidatedJson(req): ValidatedJson<ExpressionRequest>,
) -> Result<Json<ValidateResponse>, ApiError> {
    state.check_length(&req.expression)?;

    let response = match filters::check(&req.expression) {
        Ok(()) => ValidateResponse {
            valid: true,
            error: None,
        },
        Err(e) => ValidateResponse {
            valid: false,
            error: Some(e.into()),
        },
    };
    Ok(Json(response))
}

/// Decode an expression into form rows; invalid clauses are dropped
#[utoipa::path(
    post,
    path = "/api/v1/filters/headers/decode",
    tag = "filters",
    request_body = ExpressionRequest,
    responses(
        (status = 200, description = "Decoded form rows", body = DecodeResponse),
        (status = 400, description = "Malformed request or expression too long")
    )
)]
pub async fn decode_header_filter(
    State(state): State<FiltersApiState>,
    ValidatedJson(req): ValidatedJson<ExpressionRequest>,
) -> Result<Json<DecodeResponse>, ApiError> {
    state.check_length(&req.expression)?;

    let clauses = filters::decode_expression(&req.expression)
        .into_iter()
        .map(HeaderFilterForm::from)
        .collect();
    Ok(Json(DecodeResponse { clauses }))
}

/// Encode form rows into an expression
#[utoipa::path(
    post,
    path = "/api/v1/filters/headers/encode",
    tag = "filters",
    request_body = EncodeRequest,
    responses(
        (status = 200, description = "Encoded expression", body = EncodeResponse),
        (status = 400, description = "Malformed request or too many clauses")
    )
)]
pub async fn encode_header_filter(
    State(state): State<FiltersApiState>,
    ValidatedJson(req): ValidatedJson<EncodeRequest>,
) -> Result<Json<EncodeResponse>, ApiError> {
    state.check_clause_count(req.clauses.len())?;

    let clauses: Vec<FilterClause> = req.clauses.into_iter().map(FilterClause::from).collect();
    Ok(Json(EncodeResponse {
        expression: filters::encode_expression(&clauses),
    }))
}

/// Parse console list navigation state
#[utoipa::path(
    get,
    path = "/api/v1/filters/query",
    tag = "filters",
    params(
        ("page" = Option<u32>, Query, description = "Zero-based page index"),
        ("size" = Option<u32>, Query, description = "Page size (1-500, default 20)"),
        ("sort" = Option<String>, Query, description = "Sort as field[,asc|desc], repeatable"),
        ("filter[headers]" = Option<String>, Query, description = "Header filter expression")
    ),
    responses(
        (status = 200, description = "Parsed query", body = ConsoleQuery),
        (status = 400, description = "Invalid paging, sort, filter or header filter")
    )
)]
pub async fn parse_console_query(
    ConsoleQueryParams(query): ConsoleQueryParams,
) -> Json<ConsoleQuery> {
    Json(query)
}

/// Apply parameter updates to a query string
#[utoipa::path(
    post,
    path = "/api/v1/filters/query/merge",
    tag = "filters",
    request_body = MergeQueryRequest,
    responses(
        (status = 200, description = "Merged query", body = MergeQueryResponse),
        (status = 400, description = "Malformed request")
    )
)]
pub async fn merge_console_query(
    ValidatedJson(req): ValidatedJson<MergeQueryRequest>,
) -> Json<MergeQueryResponse> {
    let current = parse_query_string(&req.query);
    let updates: Vec<(String, Option<String>)> = req
        .updates
        .into_iter()
        .map(|u| (u.name, u.value))
        .collect();

    let merged = merge_query_params(&current, &updates);
    tracing::trace!(before = %req.query, params = merged.len(), "Merged console query");

    Json(MergeQueryResponse {
        query: to_query_string(&merged),
    })
}
