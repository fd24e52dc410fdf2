//! OpenAPI document for the lookup API, assembled from the `utoipa`
//! annotations on each handler.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json},
};
use utoipa::OpenApi;

use crate::models::*;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Compliance Lookup API",
        description = "Read-only directory of business compliance requirements by business type and location, with the service providers that help satisfy them."
    ),
    paths(
        crate::handlers::health,
        crate::handlers::list_business_types,
        crate::handlers::get_business_type,
        crate::handlers::list_locations,
        crate::handlers::get_location,
        crate::handlers::list_requirement_categories,
        crate::handlers::list_category_requirements,
        crate::handlers::list_requirements,
        crate::handlers::list_requirements_with_providers,
        crate::handlers::list_providers,
        crate::handlers::list_providers_with_details,
        crate::handlers::list_providers_by_requirement,
        crate::handlers::list_providers_by_category,
    ),
    components(schemas(
        BusinessType,
        Location,
        RequirementCategory,
        ComplianceRequirement,
        ServiceProvider,
        ProviderRequirement,
        RequirementGroup,
        RequirementWithProviders,
        RequirementGroupWithProviders,
        ProviderWithCategory,
        StoreCounts,
    )),
    tags(
        (name = "directory", description = "Business types, locations and categories"),
        (name = "requirements", description = "Compliance requirements"),
        (name = "providers", description = "Service providers"),
        (name = "system", description = "Health and metadata"),
    )
)]
pub struct ApiDoc;

/// Serves the generated OpenAPI document as JSON.
pub async fn serve_openapi_spec() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Serves the Swagger UI HTML page.
///
/// The page loads the document served by [`serve_openapi_spec`].
pub async fn serve_swagger_ui() -> impl IntoResponse {
    let html = r#"
<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Compliance Lookup API - Swagger UI</title>
    <link rel="stylesheet" type="text/css" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css">
    <style>
        body { margin: 0; padding: 0; }
    </style>
</head>
<body>
    <div id="swagger-ui"></div>
    <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
    <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-standalone-preset.js"></script>
    <script>
        window.onload = function() {
            window.ui = SwaggerUIBundle({
                url: "/api-docs/openapi.json",
                dom_id: '#swagger-ui',
                deepLinking: true,
                presets: [
                    SwaggerUIBundle.presets.apis,
                    SwaggerUIStandalonePreset
                ],
                layout: "StandaloneLayout"
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
