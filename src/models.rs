use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ============ Reference Entities ============

/// A category of small business (restaurant, daycare, salon, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BusinessType {
    /// Sequential identifier, assigned in seed order.
    pub id: u32,
    /// Display name.
    pub name: String,
    /// Unique URL-safe key.
    pub slug: String,
}

/// A city/state pair that compliance rules are scoped to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    /// Sequential identifier, assigned in seed order.
    pub id: u32,
    /// Full state name (e.g., "California").
    pub state: String,
    /// Lowercase state code (e.g., "ca"). Not unique on its own.
    pub state_code: String,
    /// City display name.
    pub city: String,
    /// City key, unique within a state.
    pub city_slug: String,
}

/// Regulatory domain used to group requirements (city, state, fire, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RequirementCategory {
    pub id: u32,
    pub name: String,
    /// Unique URL-safe key.
    pub slug: String,
}

/// A single obligation scoped to one business type, one location and one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceRequirement {
    pub id: u32,
    pub title: String,
    pub description: String,
    /// Free-form severity label (seeded values: "Critical", "Medium").
    pub urgency: String,
    /// Human-readable deadline (e.g., "Annual requirement").
    pub timeframe: String,
    pub category_id: u32,
    pub business_type_id: u32,
    pub location_id: u32,
}

/// A third party offering help with requirements in its home category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServiceProvider {
    pub id: u32,
    pub name: String,
    pub description: String,
    /// Home category the provider specializes in.
    pub category_id: u32,
    /// Display address, not a foreign key.
    pub location_text: String,
    /// Average rating between 1 and 5, may be fractional.
    pub rating: f64,
    pub review_count: u32,
    /// Display price range (e.g., "$150-300").
    pub price: String,
    pub certification: String,
}

/// Join record: this provider can help satisfy this requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProviderRequirement {
    pub id: u32,
    pub provider_id: u32,
    pub requirement_id: u32,
}

// ============ Insert Records ============
//
// Same shape as the entities minus `id`; the store assigns ids on insert.

#[derive(Debug, Clone)]
pub struct NewBusinessType {
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Clone)]
pub struct NewLocation {
    pub state: String,
    pub state_code: String,
    pub city: String,
    pub city_slug: String,
}

#[derive(Debug, Clone)]
pub struct NewRequirementCategory {
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Clone)]
pub struct NewComplianceRequirement {
    pub title: String,
    pub description: String,
    pub urgency: String,
    pub timeframe: String,
    pub category_id: u32,
    pub business_type_id: u32,
    pub location_id: u32,
}

#[derive(Debug, Clone)]
pub struct NewServiceProvider {
    pub name: String,
    pub description: String,
    pub category_id: u32,
    pub location_text: String,
    pub rating: f64,
    pub review_count: u32,
    pub price: String,
    pub certification: String,
}

// ============ API Response Models ============

/// Requirements sharing one category, without provider details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RequirementGroup {
    pub category: RequirementCategory,
    pub requirements: Vec<ComplianceRequirement>,
}

/// A requirement annotated with the providers that can help satisfy it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RequirementWithProviders {
    #[serde(flatten)]
    pub requirement: ComplianceRequirement,
    pub providers: Vec<ServiceProvider>,
}

/// Requirements sharing one category, each with its providers attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RequirementGroupWithProviders {
    pub category: RequirementCategory,
    pub requirements: Vec<RequirementWithProviders>,
}

/// A provider annotated with the display name of its home category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProviderWithCategory {
    #[serde(flatten)]
    pub provider: ServiceProvider,
    pub category_name: String,
}

/// Record counts per collection, reported at startup and by `/health`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StoreCounts {
    pub business_types: usize,
    pub locations: usize,
    pub requirement_categories: usize,
    pub compliance_requirements: usize,
    pub service_providers: usize,
    pub provider_requirements: usize,
}

// ============ Request Models ============

/// Query parameters for the grouped requirement endpoints.
///
/// Both fields are kept as raw strings so that a missing value (400) can be
/// told apart from a non-numeric one (empty result). A repeated key is folded
/// into one comma-joined value, which never parses as an id.
#[derive(Debug, Clone, Default, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct RequirementQueryParams {
    /// Business type id (required).
    pub business_type_id: Option<String>,
    /// Location id (required).
    pub location_id: Option<String>,
}

impl RequirementQueryParams {
    /// Builds the params from raw `key=value` pairs in query-string order.
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "businessTypeId" => &mut params.business_type_id,
                "locationId" => &mut params.location_id,
                _ => continue,
            };
            *slot = Some(match slot.take() {
                Some(existing) => format!("{},{}", existing, value),
                None => value.clone(),
            });
        }
        params
    }
}

/// Parses a numeric id the lenient way: anything that is not a positive
/// integral number becomes `None`, which matches no entity.
///
/// Integral decimal forms such as `1.0` or `1e0` name the same id as `1`.
pub fn parse_id(raw: &str) -> Option<u32> {
    let raw = raw.trim();
    if let Ok(id) = raw.parse::<u32>() {
        return Some(id).filter(|id| *id > 0);
    }
    let value = raw.parse::<f64>().ok()?;
    let integral = value.is_finite() && value.fract() == 0.0;
    (integral && (1.0..=f64::from(u32::MAX)).contains(&value)).then(|| value as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_id_accepts_positive_integers() {
        assert_eq!(parse_id("1"), Some(1));
        assert_eq!(parse_id(" 42 "), Some(42));
    }

    #[test]
    fn parse_id_accepts_integral_decimals() {
        assert_eq!(parse_id("1.0"), Some(1));
        assert_eq!(parse_id("2.00"), Some(2));
        assert_eq!(parse_id("1e1"), Some(10));
    }

    #[test]
    fn parse_id_rejects_garbage() {
        assert_eq!(parse_id("abc"), None);
        assert_eq!(parse_id("-3"), None);
        assert_eq!(parse_id("0"), None);
        assert_eq!(parse_id("1.5"), None);
        assert_eq!(parse_id(""), None);
        assert_eq!(parse_id("0.0"), None);
        assert_eq!(parse_id("NaN"), None);
        assert_eq!(parse_id("inf"), None);
        assert_eq!(parse_id("1e20"), None);
        assert_eq!(parse_id("1,2"), None);
    }

    #[test]
    fn repeated_query_keys_fold_into_one_value() {
        let pairs: Vec<(String, String)> = [
            ("businessTypeId", "1"),
            ("businessTypeId", "2"),
            ("locationId", "1"),
            ("other", "x"),
        ]
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let params = RequirementQueryParams::from_pairs(&pairs);
        assert_eq!(params.business_type_id.as_deref(), Some("1,2"));
        assert_eq!(params.location_id.as_deref(), Some("1"));
        assert_eq!(parse_id(params.business_type_id.as_deref().unwrap()), None);
    }

    #[test]
    fn single_query_keys_are_kept_verbatim() {
        let pairs = vec![("locationId".to_string(), String::new())];
        let params = RequirementQueryParams::from_pairs(&pairs);
        assert_eq!(params.business_type_id, None);
        assert_eq!(params.location_id.as_deref(), Some(""));
    }

    #[test]
    fn requirement_serializes_camel_case() {
        let req = ComplianceRequirement {
            id: 7,
            title: "City Business License".to_string(),
            description: "d".to_string(),
            urgency: "Critical".to_string(),
            timeframe: "Before opening".to_string(),
            category_id: 1,
            business_type_id: 2,
            location_id: 3,
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["categoryId"], 1);
        assert_eq!(value["businessTypeId"], 2);
        assert_eq!(value["locationId"], 3);
    }

    #[test]
    fn flattened_shapes_keep_entity_fields_at_top_level() {
        let provider = ServiceProvider {
            id: 1,
            name: "Permit Pros".to_string(),
            description: "d".to_string(),
            category_id: 4,
            location_text: "Berkeley, CA".to_string(),
            rating: 4.8,
            review_count: 12,
            price: "$150-300".to_string(),
            certification: "c".to_string(),
        };
        let value = serde_json::to_value(ProviderWithCategory {
            provider,
            category_name: "City Requirements".to_string(),
        })
        .unwrap();
        assert_eq!(value["id"], 1);
        assert_eq!(value["locationText"], "Berkeley, CA");
        assert_eq!(value["reviewCount"], 12);
        assert_eq!(value["categoryName"], "City Requirements");
    }
}
