use axum::{routing::get, Router};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};

use crate::errors::panic_response;
use crate::handlers::{self, AppState};
use crate::openapi;

/// Lookup endpoints, mounted under `/api`.
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/business-types", get(handlers::list_business_types))
        .route("/business-types/:slug", get(handlers::get_business_type))
        .route("/locations/:state_code", get(handlers::list_locations))
        .route(
            "/locations/:state_code/:city_slug",
            get(handlers::get_location),
        )
        .route(
            "/requirement-categories",
            get(handlers::list_requirement_categories),
        )
        .route(
            "/requirement-categories/:category_id/requirements",
            get(handlers::list_category_requirements),
        )
        .route("/requirements", get(handlers::list_requirements))
        .route(
            "/requirements-with-providers",
            get(handlers::list_requirements_with_providers),
        )
        .route("/providers", get(handlers::list_providers))
        .route(
            "/providers-with-details",
            get(handlers::list_providers_with_details),
        )
        .route(
            "/providers/by-requirement/:requirement_id",
            get(handlers::list_providers_by_requirement),
        )
        .route(
            "/providers/by-category/:category_id",
            get(handlers::list_providers_by_category),
        )
}

/// Wraps a router in the request tracing, CORS and panic-catching stack.
pub fn with_middleware(router: Router) -> Router {
    router.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
            // Panics inside handlers become a generic 500
            .layer(CatchPanicLayer::custom(panic_response)),
    )
}

/// Builds the full application router with middleware attached.
pub fn build_router(state: Arc<AppState>) -> Router {
    let router = Router::new()
        .route("/health", get(handlers::health))
        // API Documentation
        .route("/docs", get(openapi::serve_swagger_ui))
        .route("/api-docs/openapi.json", get(openapi::serve_openapi_spec))
        .nest("/api", api_routes())
        .with_state(state);
    with_middleware(router)
}
