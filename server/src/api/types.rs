//! Shared API types
//!
//! Common types used across all API endpoints including error handling.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use validator::ValidationError;

use crate::api::routes::filters::types::QueryParamUpdate;
use crate::domain::filters::{HeaderFilterError, QueryError};

/// Maximum number of query parameter updates per merge request
pub const MAX_QUERY_UPDATES: usize = 100;
/// Maximum query parameter name length
pub const MAX_PARAM_NAME_LENGTH: usize = 256;

/// Validator function for query parameter update lists
pub fn validate_query_updates<T>(updates: T) -> Result<(), ValidationError>
where
    T: AsRef<[QueryParamUpdate]>,
{
    let updates = updates.as_ref();
    if updates.len() > MAX_QUERY_UPDATES {
        return Err(ValidationError::new("updates_too_many").with_message(
            format!("Cannot apply more than {} updates at once", MAX_QUERY_UPDATES).into(),
        ));
    }
    for update in updates {
        if update.name.is_empty() {
            return Err(ValidationError::new("name_empty")
                .with_message("Parameter names cannot be empty".into()));
        }
        if update.name.len() > MAX_PARAM_NAME_LENGTH {
            return Err(ValidationError::new("name_too_long").with_message(
                format!(
                    "Parameter name too long (max {} chars)",
                    MAX_PARAM_NAME_LENGTH
                )
                .into(),
            ));
        }
    }
    Ok(())
}

/// Standard API error response
#[derive(Debug)]
pub enum ApiError {
    BadRequest { code: String, message: String },
    NotFound { code: String, message: String },
}

impl ApiError {
    pub fn bad_request(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::BadRequest {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn not_found(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::NotFound {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn from_header_filter(e: HeaderFilterError) -> Self {
        tracing::debug!(expression = %e.expression, reason = %e.reason, "Rejected header filter");
        Self::bad_request(HeaderFilterError::CODE, e.to_string())
    }
}

impl From<QueryError> for ApiError {
    fn from(e: QueryError) -> Self {
        let code = match e {
            QueryError::HeaderFilter(e) => return Self::from_header_filter(e),
            QueryError::InvalidPage { .. } => "INVALID_PAGE",
            QueryError::InvalidSize { .. } => "INVALID_SIZE",
            QueryError::InvalidSort { .. } => "INVALID_SORT",
            QueryError::Criteria(_) => "INVALID_FILTER_PARAM",
        };
        Self::bad_request(code, e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, code, message) = match self {
            Self::BadRequest { code, message } => {
                (StatusCode::BAD_REQUEST, "bad_request", code, message)
            }
            Self::NotFound { code, message } => (StatusCode::NOT_FOUND, "not_found", code, message),
        };
        (
            status,
            Json(serde_json::json!({
                "error": error_type,
                "code": code,
                "message": message
            })),
        )
            .into_response()
    }
}
