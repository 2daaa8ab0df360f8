//! Filter API request/response types

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::api::types::validate_query_updates;
use crate::domain::filters::{HeaderFilterError, HeaderFilterForm};

/// Body carrying a raw header filter expression
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ExpressionRequest {
    /// Expression as typed into the header filter box, e.g. `operation=sayHello; foo`
    #[validate(length(max = 65536, message = "expression must be at most 65536 characters"))]
    pub expression: String,
}

/// Rejection details in the shape the console form binds to
#[derive(Debug, Serialize, ToSchema)]
pub struct FieldErrorDto {
    pub code: String,
    pub value: String,
    pub reason: String,
}

impl From<HeaderFilterError> for FieldErrorDto {
    fn from(e: HeaderFilterError) -> Self {
        Self {
            code: HeaderFilterError::CODE.to_string(),
            value: e.expression,
            reason: e.reason.to_string(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ValidateResponse {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<FieldErrorDto>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DecodeResponse {
    pub clauses: Vec<HeaderFilterForm>,
}

/// Form rows to serialize back into an expression
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct EncodeRequest {
    #[validate(length(max = 1000, message = "at most 1000 clauses per request"))]
    pub clauses: Vec<HeaderFilterForm>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct EncodeResponse {
    pub expression: String,
}

/// One parameter change; a missing or empty value removes the parameter
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct QueryParamUpdate {
    pub name: String,
    #[serde(default)]
    pub value: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct MergeQueryRequest {
    /// Current query string, with or without the leading `?`
    #[serde(default)]
    #[validate(length(max = 16384, message = "query must be at most 16384 characters"))]
    pub query: String,
    #[validate(custom(function = "validate_query_updates"))]
    pub updates: Vec<QueryParamUpdate>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MergeQueryResponse {
    /// Merged query string without the leading `?`
    pub query: String,
}
