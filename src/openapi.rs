use axum::{http::StatusCode, response::IntoResponse};
use utoipa::OpenApi;

use crate::export::ResultRow;
use crate::models::{EmailSource, FilterForm, GenerateResponse, Lead, OutreachEmail};

#[derive(OpenApi)]
#[openapi(
    info(title = "LeadGen AI Flow API"),
    paths(
        crate::handlers::health,
        crate::handlers::export_csv,
        crate::handlers::generate,
        crate::handlers::seed_leads,
    ),
    components(schemas(
        Lead,
        FilterForm,
        OutreachEmail,
        EmailSource,
        ResultRow,
        GenerateResponse
    ))
)]
pub struct ApiDoc;

/// Serves the OpenAPI document generated from the handler annotations.
pub async fn serve_openapi_spec() -> impl IntoResponse {
    match ApiDoc::openapi().to_pretty_json() {
        Ok(content) => (
            StatusCode::OK,
            [(axum::http::header::CONTENT_TYPE, "application/json")],
            content,
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to render OpenAPI document: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "OpenAPI document unavailable",
            )
                .into_response()
        }
    }
}

/// Serves the Swagger UI HTML page pointing at `/api-docs/openapi.json`.
pub async fn serve_swagger_ui() -> impl IntoResponse {
    let html = r#"
<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>LeadGen AI Flow - Swagger UI</title>
    <link rel="stylesheet" type="text/css" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css">
    <style>
        body { margin: 0; padding: 0; }
    </style>
</head>
<body>
    <div id="swagger-ui"></div>
    <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
    <script>
        window.onload = function() {
            window.ui = SwaggerUIBundle({
                url: "/api-docs/openapi.json",
                dom_id: '#swagger-ui',
                deepLinking: true
            });
        };
    </script>
</body>
</html>
"#;
    (
        StatusCode::OK,
        [(axum::http::header::CONTENT_TYPE, "text/html; charset=utf-8")],
        html,
    )
}
