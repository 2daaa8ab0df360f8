//! Request extractors with validation for API routes

use std::ops::Deref;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, FromRequestParts, Request};
use axum::http::StatusCode;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Response};
use serde::de::DeserializeOwned;
use validator::Validate;

use super::routes::filters::FiltersApiState;
use super::types::ApiError;
use crate::domain::filters::{ConsoleQuery, HEADERS_PARAM, parse_query_string, split_segments};

/// Rejection returned by [`ValidatedJson`]
#[derive(Debug)]
pub enum ValidationRejection {
    /// Failed to parse JSON body
    Json(JsonRejection),
    /// Validation constraints not satisfied
    Validation(validator::ValidationErrors),
}

impl IntoResponse for ValidationRejection {
    fn into_response(self) -> Response {
        let (code, message) = match self {
            Self::Json(rejection) => ("JSON_PARSE_ERROR", rejection.body_text()),
            Self::Validation(errors) => ("VALIDATION_ERROR", format_validation_errors(&errors)),
        };
        (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({
                "error": "bad_request",
                "code": code,
                "message": message
            })),
        )
            .into_response()
    }
}

fn format_validation_errors(errors: &validator::ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(m) => m.to_string(),
                None => format!("{}: validation failed", field),
            })
        })
        .collect();
    messages.sort();
    messages.join("; ")
}

/// JSON body extractor with automatic validation.
///
/// Returns a `ValidationRejection` on parse or validation failure.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<T> Deref for ValidatedJson<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = ValidationRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(ValidationRejection::Json)?;
        value.validate().map_err(ValidationRejection::Validation)?;
        Ok(Self(value))
    }
}

/// Console navigation state read from the request URI.
///
/// Accepts the same parameters the console puts in its address bar
/// (`page`, `size`, `sort`, `filter[...]`). The header filter is held to the
/// configured length and clause limits before it is decoded. A bad header
/// filter surfaces as `invalidHeaderFilterPattern` with the whole expression.
#[derive(Debug)]
pub struct ConsoleQueryParams(pub ConsoleQuery);

impl Deref for ConsoleQueryParams {
    type Target = ConsoleQuery;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<FiltersApiState> for ConsoleQueryParams {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        limits: &FiltersApiState,
    ) -> Result<Self, Self::Rejection> {
        let pairs = parse_query_string(parts.uri.query().unwrap_or_default());

        for (_, expression) in pairs.iter().filter(|(name, _)| name == HEADERS_PARAM) {
            limits.check_length(expression)?;
            limits.check_clause_count(split_segments(expression).count())?;
        }

        let query = ConsoleQuery::from_pairs(pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())))?;
        Ok(Self(query))
    }
}
