use crate::models::*;
use crate::storage::ComplianceStore;
use std::sync::Arc;

/// Display name used when a provider's category id does not resolve.
pub const UNKNOWN_CATEGORY: &str = "Unknown Category";

/// Read-only compositions over the store, shaped for the HTTP layer.
#[derive(Debug, Clone)]
pub struct LookupService {
    store: Arc<ComplianceStore>,
}

impl LookupService {
    pub fn new(store: Arc<ComplianceStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &ComplianceStore {
        &self.store
    }

    /// Requirements for a business type and location, grouped by category.
    ///
    /// Groups follow category order and empty groups are dropped.
    pub fn requirements_grouped(
        &self,
        business_type_id: u32,
        location_id: u32,
    ) -> Vec<RequirementGroup> {
        let requirements = self
            .store
            .list_requirements_by_business_and_location(business_type_id, location_id);

        group_by_category(
            self.store.list_requirement_categories(),
            requirements,
            |r| r.category_id,
        )
        .into_iter()
        .map(|(category, requirements)| RequirementGroup {
            category,
            requirements,
        })
        .collect()
    }

    /// Same grouping as [`Self::requirements_grouped`], with each
    /// requirement's providers attached.
    pub fn requirements_grouped_with_providers(
        &self,
        business_type_id: u32,
        location_id: u32,
    ) -> Vec<RequirementGroupWithProviders> {
        let requirements: Vec<RequirementWithProviders> = self
            .store
            .list_requirements_by_business_and_location(business_type_id, location_id)
            .into_iter()
            .map(|requirement| {
                let providers = self.store.list_providers_by_requirement(requirement.id);
                RequirementWithProviders {
                    requirement,
                    providers,
                }
            })
            .collect();

        group_by_category(
            self.store.list_requirement_categories(),
            requirements,
            |r| r.requirement.category_id,
        )
        .into_iter()
        .map(|(category, requirements)| RequirementGroupWithProviders {
            category,
            requirements,
        })
        .collect()
    }

    /// Every provider with the name of its home category.
    pub fn providers_with_category_name(&self) -> Vec<ProviderWithCategory> {
        let categories = self.store.list_requirement_categories();

        self.store
            .list_providers()
            .into_iter()
            .map(|provider| {
                let category_name = categories
                    .iter()
                    .find(|c| c.id == provider.category_id)
                    .map(|c| c.name.clone())
                    .unwrap_or_else(|| UNKNOWN_CATEGORY.to_string());
                ProviderWithCategory {
                    provider,
                    category_name,
                }
            })
            .collect()
    }
}

/// Partitions `items` into one bucket per category, in category order,
/// keeping item order inside each bucket. Categories without items are omitted.
fn group_by_category<T>(
    categories: Vec<RequirementCategory>,
    items: Vec<T>,
    category_of: impl Fn(&T) -> u32,
) -> Vec<(RequirementCategory, Vec<T>)> {
    let mut buckets: Vec<(RequirementCategory, Vec<T>)> =
        categories.into_iter().map(|c| (c, Vec::new())).collect();

    for item in items {
        let category_id = category_of(&item);
        if let Some((_, bucket)) = buckets.iter_mut().find(|(c, _)| c.id == category_id) {
            bucket.push(item);
        }
    }

    buckets.retain(|(_, bucket)| !bucket.is_empty());
    buckets
}
