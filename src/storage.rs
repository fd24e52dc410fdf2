use crate::models::*;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// In-memory compliance directory.
///
/// Each collection maps a sequential id to its owned record, so iteration
/// order is insertion order. A store is only produced by [`StoreBuilder::build`]
/// and exposes no mutation afterwards, which makes it safe to share behind an
/// `Arc` across every request.
#[derive(Debug, Clone)]
pub struct ComplianceStore {
    business_types: BTreeMap<u32, BusinessType>,
    locations: BTreeMap<u32, Location>,
    requirement_categories: BTreeMap<u32, RequirementCategory>,
    compliance_requirements: BTreeMap<u32, ComplianceRequirement>,
    service_providers: BTreeMap<u32, ServiceProvider>,
    provider_requirements: BTreeMap<u32, ProviderRequirement>,
    /// requirement id -> distinct provider ids, ordered like the provider collection.
    providers_by_requirement: HashMap<u32, BTreeSet<u32>>,
}

impl ComplianceStore {
    /// Builds the store from the fixed reference dataset.
    pub fn seeded() -> anyhow::Result<Self> {
        crate::seed::build_store()
    }

    // ---- Business types ----

    pub fn list_business_types(&self) -> Vec<BusinessType> {
        self.business_types.values().cloned().collect()
    }

    /// Exact, case-sensitive slug match.
    pub fn find_business_type_by_slug(&self, slug: &str) -> Option<BusinessType> {
        self.business_types
            .values()
            .find(|bt| bt.slug == slug)
            .cloned()
    }

    // ---- Locations ----

    pub fn list_locations(&self) -> Vec<Location> {
        self.locations.values().cloned().collect()
    }

    /// Case-sensitive equality filter; an unknown code yields an empty list.
    pub fn list_locations_by_state_code(&self, state_code: &str) -> Vec<Location> {
        self.locations
            .values()
            .filter(|l| l.state_code == state_code)
            .cloned()
            .collect()
    }

    pub fn find_location(&self, state_code: &str, city_slug: &str) -> Option<Location> {
        self.locations
            .values()
            .find(|l| l.state_code == state_code && l.city_slug == city_slug)
            .cloned()
    }

    // ---- Requirement categories ----

    pub fn list_requirement_categories(&self) -> Vec<RequirementCategory> {
        self.requirement_categories.values().cloned().collect()
    }

    pub fn find_category(&self, category_id: u32) -> Option<RequirementCategory> {
        self.requirement_categories.get(&category_id).cloned()
    }

    // ---- Compliance requirements ----

    pub fn list_requirements_by_business_and_location(
        &self,
        business_type_id: u32,
        location_id: u32,
    ) -> Vec<ComplianceRequirement> {
        self.compliance_requirements
            .values()
            .filter(|r| r.business_type_id == business_type_id && r.location_id == location_id)
            .cloned()
            .collect()
    }

    pub fn list_requirements_by_category(&self, category_id: u32) -> Vec<ComplianceRequirement> {
        self.compliance_requirements
            .values()
            .filter(|r| r.category_id == category_id)
            .cloned()
            .collect()
    }

    pub fn find_requirement(&self, requirement_id: u32) -> Option<ComplianceRequirement> {
        self.compliance_requirements.get(&requirement_id).cloned()
    }

    // ---- Service providers ----

    pub fn list_providers(&self) -> Vec<ServiceProvider> {
        self.service_providers.values().cloned().collect()
    }

    /// Providers linked to a requirement through the join table.
    ///
    /// Returned in provider-collection order, not join-insertion order, and
    /// each provider at most once.
    pub fn list_providers_by_requirement(&self, requirement_id: u32) -> Vec<ServiceProvider> {
        match self.providers_by_requirement.get(&requirement_id) {
            Some(provider_ids) => provider_ids
                .iter()
                .filter_map(|id| self.service_providers.get(id))
                .cloned()
                .collect(),
            None => Vec::new(),
        }
    }

    pub fn list_providers_by_category(&self, category_id: u32) -> Vec<ServiceProvider> {
        self.service_providers
            .values()
            .filter(|p| p.category_id == category_id)
            .cloned()
            .collect()
    }

    /// Join rows in insertion order.
    pub fn provider_requirements(&self) -> Vec<ProviderRequirement> {
        self.provider_requirements.values().copied().collect()
    }

    pub fn counts(&self) -> StoreCounts {
        StoreCounts {
            business_types: self.business_types.len(),
            locations: self.locations.len(),
            requirement_categories: self.requirement_categories.len(),
            compliance_requirements: self.compliance_requirements.len(),
            service_providers: self.service_providers.len(),
            provider_requirements: self.provider_requirements.len(),
        }
    }
}

/// Collects records before the store is frozen.
///
/// Every `insert_*` hands back the id it assigned, and ids are only ever
/// handed out for records that exist, so dependents inserted later always
/// reference real parents.
#[derive(Debug, Default)]
pub struct StoreBuilder {
    business_types: BTreeMap<u32, BusinessType>,
    locations: BTreeMap<u32, Location>,
    requirement_categories: BTreeMap<u32, RequirementCategory>,
    compliance_requirements: BTreeMap<u32, ComplianceRequirement>,
    service_providers: BTreeMap<u32, ServiceProvider>,
    explicit_links: Vec<(u32, u32)>,

    business_type_id_counter: u32,
    location_id_counter: u32,
    category_id_counter: u32,
    requirement_id_counter: u32,
    provider_id_counter: u32,
}

fn next_id(counter: &mut u32) -> u32 {
    *counter += 1;
    *counter
}

impl StoreBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_business_type(&mut self, new: NewBusinessType) -> u32 {
        let id = next_id(&mut self.business_type_id_counter);
        self.business_types.insert(
            id,
            BusinessType {
                id,
                name: new.name,
                slug: new.slug,
            },
        );
        id
    }

    pub fn insert_location(&mut self, new: NewLocation) -> u32 {
        let id = next_id(&mut self.location_id_counter);
        self.locations.insert(
            id,
            Location {
                id,
                state: new.state,
                state_code: new.state_code,
                city: new.city,
                city_slug: new.city_slug,
            },
        );
        id
    }

    pub fn insert_category(&mut self, new: NewRequirementCategory) -> u32 {
        let id = next_id(&mut self.category_id_counter);
        self.requirement_categories.insert(
            id,
            RequirementCategory {
                id,
                name: new.name,
                slug: new.slug,
            },
        );
        id
    }

    pub fn insert_requirement(&mut self, new: NewComplianceRequirement) -> u32 {
        let id = next_id(&mut self.requirement_id_counter);
        self.compliance_requirements.insert(
            id,
            ComplianceRequirement {
                id,
                title: new.title,
                description: new.description,
                urgency: new.urgency,
                timeframe: new.timeframe,
                category_id: new.category_id,
                business_type_id: new.business_type_id,
                location_id: new.location_id,
            },
        );
        id
    }

    pub fn insert_provider(&mut self, new: NewServiceProvider) -> u32 {
        let id = next_id(&mut self.provider_id_counter);
        self.service_providers.insert(
            id,
            ServiceProvider {
                id,
                name: new.name,
                description: new.description,
                category_id: new.category_id,
                location_text: new.location_text,
                rating: new.rating,
                review_count: new.review_count,
                price: new.price,
                certification: new.certification,
            },
        );
        id
    }

    /// Links a provider to a requirement regardless of category.
    ///
    /// Returns `false` (and records nothing) if either id is unknown.
    pub fn link(&mut self, provider_id: u32, requirement_id: u32) -> bool {
        if !self.service_providers.contains_key(&provider_id)
            || !self.compliance_requirements.contains_key(&requirement_id)
        {
            return false;
        }
        self.explicit_links.push((provider_id, requirement_id));
        true
    }

    // ---- Slug resolution for seed data ----

    pub fn business_type_id(&self, slug: &str) -> Option<u32> {
        self.business_types
            .values()
            .find(|bt| bt.slug == slug)
            .map(|bt| bt.id)
    }

    pub fn location_id(&self, state_code: &str, city_slug: &str) -> Option<u32> {
        self.locations
            .values()
            .find(|l| l.state_code == state_code && l.city_slug == city_slug)
            .map(|l| l.id)
    }

    pub fn category_id(&self, slug: &str) -> Option<u32> {
        self.requirement_categories
            .values()
            .find(|c| c.slug == slug)
            .map(|c| c.id)
    }

    /// Freezes the collections and derives the provider/requirement join.
    ///
    /// Explicit links come first, then one row per (requirement, provider)
    /// pair sharing a category, both walked in id order.
    pub fn build(self) -> ComplianceStore {
        let mut providers_in_category: HashMap<u32, Vec<u32>> = HashMap::new();
        for provider in self.service_providers.values() {
            providers_in_category
                .entry(provider.category_id)
                .or_default()
                .push(provider.id);
        }

        let mut pairs = self.explicit_links;
        for requirement in self.compliance_requirements.values() {
            if let Some(provider_ids) = providers_in_category.get(&requirement.category_id) {
                pairs.extend(provider_ids.iter().map(|pid| (*pid, requirement.id)));
            }
        }

        let mut provider_requirements = BTreeMap::new();
        let mut providers_by_requirement: HashMap<u32, BTreeSet<u32>> = HashMap::new();
        for (idx, (provider_id, requirement_id)) in pairs.into_iter().enumerate() {
            let id = idx as u32 + 1;
            provider_requirements.insert(
                id,
                ProviderRequirement {
                    id,
                    provider_id,
                    requirement_id,
                },
            );
            providers_by_requirement
                .entry(requirement_id)
                .or_default()
                .insert(provider_id);
        }

        let store = ComplianceStore {
            business_types: self.business_types,
            locations: self.locations,
            requirement_categories: self.requirement_categories,
            compliance_requirements: self.compliance_requirements,
            service_providers: self.service_providers,
            provider_requirements,
            providers_by_requirement,
        };
        tracing::debug!("Compliance store built: {:?}", store.counts());
        store
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(b: &mut StoreBuilder, slug: &str) -> u32 {
        b.insert_category(NewRequirementCategory {
            name: slug.to_uppercase(),
            slug: slug.to_string(),
        })
    }

    fn requirement(b: &mut StoreBuilder, title: &str, cat: u32, bt: u32, loc: u32) -> u32 {
        b.insert_requirement(NewComplianceRequirement {
            title: title.to_string(),
            description: String::new(),
            urgency: "Medium".to_string(),
            timeframe: "Annual".to_string(),
            category_id: cat,
            business_type_id: bt,
            location_id: loc,
        })
    }

    fn provider(b: &mut StoreBuilder, name: &str, cat: u32) -> u32 {
        b.insert_provider(NewServiceProvider {
            name: name.to_string(),
            description: String::new(),
            category_id: cat,
            location_text: "Berkeley, CA".to_string(),
            rating: 4.5,
            review_count: 10,
            price: "$100".to_string(),
            certification: String::new(),
        })
    }

    /// Two categories, one business type, one location.
    fn small_builder() -> (StoreBuilder, u32, u32, u32, u32) {
        let mut b = StoreBuilder::new();
        let bt = b.insert_business_type(NewBusinessType {
            name: "Restaurant".to_string(),
            slug: "restaurant".to_string(),
        });
        let loc = b.insert_location(NewLocation {
            state: "California".to_string(),
            state_code: "ca".to_string(),
            city: "Berkeley".to_string(),
            city_slug: "berkeley".to_string(),
        });
        let city = category(&mut b, "city");
        let fire = category(&mut b, "fire");
        (b, bt, loc, city, fire)
    }

    #[test]
    fn ids_are_sequential_per_collection() {
        let (mut b, bt, loc, city, fire) = small_builder();
        assert_eq!((bt, loc, city, fire), (1, 1, 1, 2));
        assert_eq!(requirement(&mut b, "a", city, bt, loc), 1);
        assert_eq!(requirement(&mut b, "b", fire, bt, loc), 2);
        assert_eq!(provider(&mut b, "p", city), 1);
    }

    #[test]
    fn join_rows_follow_category_equality() {
        let (mut b, bt, loc, city, fire) = small_builder();
        let license = requirement(&mut b, "license", city, bt, loc);
        let inspection = requirement(&mut b, "inspection", fire, bt, loc);
        let p1 = provider(&mut b, "permits", city);
        let p2 = provider(&mut b, "firesafe", fire);
        let p3 = provider(&mut b, "permits2", city);
        let store = b.build();

        let rows = store.provider_requirements();
        assert_eq!(rows.len(), 3);
        assert_eq!(
            rows.iter().map(|r| r.id).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );

        let ids: Vec<u32> = store
            .list_providers_by_requirement(license)
            .iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec![p1, p3]);

        let ids: Vec<u32> = store
            .list_providers_by_requirement(inspection)
            .iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec![p2]);
    }

    #[test]
    fn explicit_links_are_deduplicated_and_ordered_by_provider() {
        let (mut b, bt, loc, city, fire) = small_builder();
        let license = requirement(&mut b, "license", city, bt, loc);
        let p1 = provider(&mut b, "permits", city);
        let p2 = provider(&mut b, "firesafe", fire);
        assert!(b.link(p2, license));
        assert!(b.link(p1, license));
        assert!(!b.link(99, license));
        assert!(!b.link(p1, 99));
        let store = b.build();

        // two explicit rows plus one derived (p1 shares the category)
        assert_eq!(store.provider_requirements().len(), 3);
        let ids: Vec<u32> = store
            .list_providers_by_requirement(license)
            .iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec![p1, p2]);
    }

    #[test]
    fn requirement_without_category_providers_has_none() {
        let (mut b, bt, loc, city, fire) = small_builder();
        provider(&mut b, "permits", city);
        let inspection = requirement(&mut b, "inspection", fire, bt, loc);
        let store = b.build();
        assert!(store.list_providers_by_requirement(inspection).is_empty());
        assert!(store.list_providers_by_requirement(1234).is_empty());
    }

    #[test]
    fn filters_return_empty_for_unknown_keys() {
        let (mut b, bt, loc, city, _) = small_builder();
        requirement(&mut b, "license", city, bt, loc);
        let store = b.build();

        assert_eq!(store.list_requirements_by_business_and_location(bt, loc).len(), 1);
        assert!(store.list_requirements_by_business_and_location(bt, 99).is_empty());
        assert!(store.list_requirements_by_business_and_location(99, loc).is_empty());
        assert!(store.list_requirements_by_category(99).is_empty());
        assert!(store.list_providers_by_category(city).is_empty());
        assert!(store.list_locations_by_state_code("CA").is_empty());
        assert_eq!(store.list_locations_by_state_code("ca").len(), 1);
        assert!(store.find_location("ca", "oakland").is_none());
        assert!(store.find_business_type_by_slug("Restaurant").is_none());
    }

    #[test]
    fn slug_resolution_matches_inserted_ids() {
        let (b, bt, loc, city, fire) = small_builder();
        assert_eq!(b.business_type_id("restaurant"), Some(bt));
        assert_eq!(b.location_id("ca", "berkeley"), Some(loc));
        assert_eq!(b.category_id("city"), Some(city));
        assert_eq!(b.category_id("fire"), Some(fire));
        assert_eq!(b.category_id("federal"), None);
        assert_eq!(b.location_id("berkeley", "ca"), None);
    }

    #[test]
    fn counts_reflect_collections() {
        let (mut b, bt, loc, city, _) = small_builder();
        requirement(&mut b, "license", city, bt, loc);
        provider(&mut b, "permits", city);
        let counts = b.build().counts();
        assert_eq!(
            counts,
            StoreCounts {
                business_types: 1,
                locations: 1,
                requirement_categories: 2,
                compliance_requirements: 1,
                service_providers: 1,
                provider_requirements: 1,
            }
        );
    }
}
