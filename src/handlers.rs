use crate::config::Config;
use crate::errors::AppError;
use crate::lookup::LookupService;
use crate::models::*;
use crate::storage::ComplianceStore;
use axum::{
    async_trait,
    extract::{FromRequestParts, Path, Query, State},
    http::{request::Parts, StatusCode},
    Json,
};
use chrono::{DateTime, Utc};
use moka::future::Cache;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

/// Shared application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Query façade over the seeded, immutable store.
    pub lookup: LookupService,
    /// Application configuration.
    pub config: Config,
    /// When this process finished seeding.
    pub started_at: DateTime<Utc>,
    /// Memoised `requirements-with-providers` results.
    /// Key: (businessTypeId, locationId).
    pub grouped_cache: Cache<(u32, u32), Vec<RequirementGroupWithProviders>>,
}

impl AppState {
    pub fn new(store: Arc<ComplianceStore>, config: Config) -> Self {
        let grouped_cache = Cache::builder()
            .time_to_live(Duration::from_secs(config.cache_ttl_secs))
            .max_capacity(config.cache_max_entries)
            .build();

        Self {
            lookup: LookupService::new(store),
            config,
            started_at: Utc::now(),
            grouped_cache,
        }
    }

    fn store(&self) -> &ComplianceStore {
        self.lookup.store()
    }
}

const MISSING_IDS: &str = "Both businessTypeId and locationId are required";

/// Reads the composite query from raw pairs so a repeated key still reaches
/// `required_ids` instead of failing deserialization.
#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for RequirementQueryParams {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Query(pairs) = Query::<Vec<(String, String)>>::try_from_uri(&parts.uri)
            .map_err(|e| AppError::BadRequest(e.body_text()))?;
        Ok(RequirementQueryParams::from_pairs(&pairs))
    }
}

/// Validates the composite query parameters.
///
/// Absent or empty values are a client error. Present values that are not
/// ids resolve to `Ok(None)`, which callers answer with an empty list.
fn required_ids(params: &RequirementQueryParams) -> Result<Option<(u32, u32)>, AppError> {
    let present = |v: &Option<String>| v.clone().filter(|s| !s.is_empty());

    match (present(&params.business_type_id), present(&params.location_id)) {
        (Some(bt), Some(loc)) => Ok(parse_id(&bt).zip(parse_id(&loc))),
        _ => Err(AppError::BadRequest(MISSING_IDS.to_string())),
    }
}

/// Health check endpoint.
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is up")),
    tag = "system"
)]
pub async fn health(State(state): State<Arc<AppState>>) -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION"),
            "startedAt": state.started_at,
            "records": state.store().counts(),
        })),
    )
}

/// GET /api/business-types
#[utoipa::path(
    get,
    path = "/api/business-types",
    responses((status = 200, description = "All business types", body = [BusinessType])),
    tag = "directory"
)]
pub async fn list_business_types(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<BusinessType>>, AppError> {
    tracing::info!("GET /business-types");
    Ok(Json(state.store().list_business_types()))
}

/// GET /api/business-types/:slug
#[utoipa::path(
    get,
    path = "/api/business-types/{slug}",
    params(("slug" = String, Path, description = "Business type slug")),
    responses(
        (status = 200, description = "Business type found", body = BusinessType),
        (status = 404, description = "No business type with this slug"),
    ),
    tag = "directory"
)]
pub async fn get_business_type(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<Json<BusinessType>, AppError> {
    tracing::info!("GET /business-types/{}", slug);

    state
        .store()
        .find_business_type_by_slug(&slug)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Business type '{}' not found", slug)))
}

/// GET /api/locations/:state_code
///
/// Unknown state codes return an empty list.
#[utoipa::path(
    get,
    path = "/api/locations/{stateCode}",
    params(("stateCode" = String, Path, description = "Lowercase state code, e.g. `ca`")),
    responses((status = 200, description = "Locations in the state", body = [Location])),
    tag = "directory"
)]
pub async fn list_locations(
    State(state): State<Arc<AppState>>,
    Path(state_code): Path<String>,
) -> Result<Json<Vec<Location>>, AppError> {
    tracing::info!("GET /locations/{}", state_code);
    Ok(Json(state.store().list_locations_by_state_code(&state_code)))
}

/// GET /api/locations/:state_code/:city_slug
#[utoipa::path(
    get,
    path = "/api/locations/{stateCode}/{citySlug}",
    params(
        ("stateCode" = String, Path, description = "Lowercase state code"),
        ("citySlug" = String, Path, description = "City slug"),
    ),
    responses(
        (status = 200, description = "Location found", body = Location),
        (status = 404, description = "No such city in this state"),
    ),
    tag = "directory"
)]
pub async fn get_location(
    State(state): State<Arc<AppState>>,
    Path((state_code, city_slug)): Path<(String, String)>,
) -> Result<Json<Location>, AppError> {
    tracing::info!("GET /locations/{}/{}", state_code, city_slug);

    state
        .store()
        .find_location(&state_code, &city_slug)
        .map(Json)
        .ok_or_else(|| {
            AppError::NotFound(format!("Location {}/{} not found", state_code, city_slug))
        })
}

/// GET /api/requirement-categories
#[utoipa::path(
    get,
    path = "/api/requirement-categories",
    responses((status = 200, description = "All requirement categories", body = [RequirementCategory])),
    tag = "directory"
)]
pub async fn list_requirement_categories(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<RequirementCategory>>, AppError> {
    tracing::info!("GET /requirement-categories");
    Ok(Json(state.store().list_requirement_categories()))
}

/// GET /api/requirement-categories/:category_id/requirements
#[utoipa::path(
    get,
    path = "/api/requirement-categories/{categoryId}/requirements",
    params(("categoryId" = String, Path, description = "Category id")),
    responses((status = 200, description = "Requirements in the category", body = [ComplianceRequirement])),
    tag = "requirements"
)]
pub async fn list_category_requirements(
    State(state): State<Arc<AppState>>,
    Path(category_id): Path<String>,
) -> Result<Json<Vec<ComplianceRequirement>>, AppError> {
    tracing::info!("GET /requirement-categories/{}/requirements", category_id);

    let requirements = parse_id(&category_id)
        .map(|id| state.store().list_requirements_by_category(id))
        .unwrap_or_default();
    Ok(Json(requirements))
}

/// GET /api/requirements
///
/// Requirements for a business type and location, grouped by category.
#[utoipa::path(
    get,
    path = "/api/requirements",
    params(RequirementQueryParams),
    responses(
        (status = 200, description = "Grouped requirements", body = [RequirementGroup]),
        (status = 400, description = "businessTypeId or locationId missing"),
    ),
    tag = "requirements"
)]
pub async fn list_requirements(
    State(state): State<Arc<AppState>>,
    params: RequirementQueryParams,
) -> Result<Json<Vec<RequirementGroup>>, AppError> {
    tracing::info!("GET /requirements - params: {:?}", params);

    let groups = match required_ids(&params)? {
        Some((business_type_id, location_id)) => state
            .lookup
            .requirements_grouped(business_type_id, location_id),
        None => Vec::new(),
    };
    Ok(Json(groups))
}

/// GET /api/requirements-with-providers
///
/// Same grouping as `/requirements`, each requirement carrying its providers.
#[utoipa::path(
    get,
    path = "/api/requirements-with-providers",
    params(RequirementQueryParams),
    responses(
        (status = 200, description = "Grouped requirements with providers", body = [RequirementGroupWithProviders]),
        (status = 400, description = "businessTypeId or locationId missing"),
    ),
    tag = "requirements"
)]
pub async fn list_requirements_with_providers(
    State(state): State<Arc<AppState>>,
    params: RequirementQueryParams,
) -> Result<Json<Vec<RequirementGroupWithProviders>>, AppError> {
    tracing::info!("GET /requirements-with-providers - params: {:?}", params);

    let Some(key) = required_ids(&params)? else {
        return Ok(Json(Vec::new()));
    };

    if let Some(cached) = state.grouped_cache.get(&key).await {
        tracing::debug!("Lookup cache HIT for {:?}", key);
        return Ok(Json(cached));
    }

    tracing::debug!("Lookup cache MISS for {:?}", key);
    let groups = state.lookup.requirements_grouped_with_providers(key.0, key.1);
    state.grouped_cache.insert(key, groups.clone()).await;

    Ok(Json(groups))
}

/// GET /api/providers
#[utoipa::path(
    get,
    path = "/api/providers",
    responses((status = 200, description = "All providers", body = [ServiceProvider])),
    tag = "providers"
)]
pub async fn list_providers(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ServiceProvider>>, AppError> {
    tracing::info!("GET /providers");
    Ok(Json(state.store().list_providers()))
}

/// GET /api/providers-with-details
#[utoipa::path(
    get,
    path = "/api/providers-with-details",
    responses((status = 200, description = "Providers with category names", body = [ProviderWithCategory])),
    tag = "providers"
)]
pub async fn list_providers_with_details(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ProviderWithCategory>>, AppError> {
    tracing::info!("GET /providers-with-details");
    Ok(Json(state.lookup.providers_with_category_name()))
}

/// GET /api/providers/by-requirement/:requirement_id
///
/// A non-numeric or unknown id yields an empty list.
#[utoipa::path(
    get,
    path = "/api/providers/by-requirement/{requirementId}",
    params(("requirementId" = String, Path, description = "Requirement id")),
    responses((status = 200, description = "Providers linked to the requirement", body = [ServiceProvider])),
    tag = "providers"
)]
pub async fn list_providers_by_requirement(
    State(state): State<Arc<AppState>>,
    Path(requirement_id): Path<String>,
) -> Result<Json<Vec<ServiceProvider>>, AppError> {
    tracing::info!("GET /providers/by-requirement/{}", requirement_id);

    let providers = parse_id(&requirement_id)
        .map(|id| state.store().list_providers_by_requirement(id))
        .unwrap_or_default();
    Ok(Json(providers))
}

/// GET /api/providers/by-category/:category_id
#[utoipa::path(
    get,
    path = "/api/providers/by-category/{categoryId}",
    params(("categoryId" = String, Path, description = "Category id")),
    responses((status = 200, description = "Providers homed in the category", body = [ServiceProvider])),
    tag = "providers"
)]
pub async fn list_providers_by_category(
    State(state): State<Arc<AppState>>,
    Path(category_id): Path<String>,
) -> Result<Json<Vec<ServiceProvider>>, AppError> {
    tracing::info!("GET /providers/by-category/{}", category_id);

    let providers = parse_id(&category_id)
        .map(|id| state.store().list_providers_by_category(id))
        .unwrap_or_default();
    Ok(Json(providers))
}
