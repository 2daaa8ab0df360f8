//! OpenAPI document and Swagger UI

use axum::http::header;
use axum::response::{Html, IntoResponse, Json};
use utoipa::OpenApi;

use crate::api::routes::filters::types as filter_types;
use crate::api::routes::{filters, health};
use crate::domain::filters::{
    Comparator, ConsoleQuery, Criterion, CriteriaOperator, FilterClause, FilterCriteria,
    FilterParam, HeaderFilterForm, SortDirection, SortOrder, ValueType,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Citrus Console API",
        version = env!("CARGO_PKG_VERSION"),
        description = "Header filter codec and list query helpers for the simulator console"
    ),
    tags(
        (name = "health", description = "Health check endpoint"),
        (name = "filters", description = "Header filter expressions and console list queries")
    ),
    paths(
        health::health,
        filters::validate_header_filter,
        filters::decode_header_filter,
        filters::encode_header_filter,
        filters::parse_console_query,
        filters::merge_console_query,
    ),
    components(schemas(
        health::HealthResponse,
        // Codec
        Comparator,
        ValueType,
        FilterClause,
        HeaderFilterForm,
        // Console query
        ConsoleQuery,
        SortOrder,
        SortDirection,
        FilterCriteria,
        Criterion,
        FilterParam,
        CriteriaOperator,
        // Request/response bodies
        filter_types::ExpressionRequest,
        filter_types::FieldErrorDto,
        filter_types::ValidateResponse,
        filter_types::DecodeResponse,
        filter_types::EncodeRequest,
        filter_types::EncodeResponse,
        filter_types::QueryParamUpdate,
        filter_types::MergeQueryRequest,
        filter_types::MergeQueryResponse,
    ))
)]
pub struct ApiDoc;

pub async fn openapi_json() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/json")],
        Json(ApiDoc::openapi()),
    )
}

/// Swagger UI page loading assets from unpkg
pub async fn swagger_ui_html() -> Html<&'static str> {
    Html(SWAGGER_UI_HTML)
}

const SWAGGER_UI_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Citrus Console API</title>
    <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css">
</head>
<body>
    <div id="swagger-ui"></div>
    <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
    <script>
        window.onload = () => {
            window.ui = SwaggerUIBundle({ url: "/api/openapi.json", dom_id: "#swagger-ui" });
        };
    </script>
</body>
</html>"##;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_filter_paths() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();
        for expected in [
            "/api/v1/health",
            "/api/v1/filters/headers/validate",
            "/api/v1/filters/headers/decode",
            "/api/v1/filters/headers/encode",
            "/api/v1/filters/query",
            "/api/v1/filters/query/merge",
        ] {
            assert!(
                paths.iter().any(|p| p.as_str() == expected),
                "missing {expected}"
            );
        }
    }

    #[test]
    fn test_swagger_page_mounts_ui_and_loads_document() {
        assert!(SWAGGER_UI_HTML.contains(r##"dom_id: "#swagger-ui""##));
        assert!(SWAGGER_UI_HTML.contains(r#"url: "/api/openapi.json""#));
        assert!(SWAGGER_UI_HTML.trim_end().ends_with("</html>"));
    }
}
