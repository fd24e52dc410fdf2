//! Fixed reference dataset for the compliance directory.
//!
//! Rows reference each other by slug rather than numeric id. Slugs are
//! resolved against the records inserted earlier, so the order of the
//! tables below is the order ids are assigned in.

use crate::models::*;
use crate::storage::{ComplianceStore, StoreBuilder};
use anyhow::anyhow;

/// (name, slug)
const BUSINESS_TYPES: &[(&str, &str)] = &[
    ("Restaurant", "restaurant"),
    ("Childcare / Daycare", "daycare"),
    ("Salon / Spa", "salon"),
    ("Retail Store", "retail"),
    ("Fitness Center", "fitness"),
    ("Professional Services", "professional"),
];

/// (state, state code, city, city slug)
const LOCATIONS: &[(&str, &str, &str, &str)] = &[
    ("California", "ca", "Berkeley", "berkeley"),
    ("Rhode Island", "ri", "Providence", "providence"),
];

/// (name, slug)
const CATEGORIES: &[(&str, &str)] = &[
    ("City Requirements", "city"),
    ("State Requirements", "state"),
    ("Federal Requirements", "federal"),
    ("Health & Safety", "health-safety"),
    ("Fire Safety", "fire-safety"),
    ("Employment", "employment"),
    ("Environmental", "environmental"),
];

struct RequirementSeed {
    business_type: &'static str,
    state_code: &'static str,
    city_slug: &'static str,
    category: &'static str,
    title: &'static str,
    description: &'static str,
    urgency: &'static str,
    timeframe: &'static str,
}

struct ProviderSeed {
    category: &'static str,
    name: &'static str,
    description: &'static str,
    location_text: &'static str,
    rating: f64,
    review_count: u32,
    price: &'static str,
    certification: &'static str,
}

const REQUIREMENTS: &[RequirementSeed] = &[
    // Restaurant, Berkeley
    RequirementSeed {
        business_type: "restaurant",
        state_code: "ca",
        city_slug: "berkeley",
        category: "city",
        title: "City Business License",
        description: "Register with the City of Berkeley Finance Department and obtain a business license tax certificate before operating.",
        urgency: "Critical",
        timeframe: "Before opening; renewed annually",
    },
    RequirementSeed {
        business_type: "restaurant",
        state_code: "ca",
        city_slug: "berkeley",
        category: "city",
        title: "Zoning Certificate of Occupancy",
        description: "Confirm with Berkeley Planning & Development that the premises is zoned for food service and obtain a certificate of occupancy.",
        urgency: "Critical",
        timeframe: "Before signing a lease",
    },
    RequirementSeed {
        business_type: "restaurant",
        state_code: "ca",
        city_slug: "berkeley",
        category: "state",
        title: "California Seller's Permit",
        description: "Register with the California Department of Tax and Fee Administration to collect and remit sales tax.",
        urgency: "Critical",
        timeframe: "Before the first sale",
    },
    RequirementSeed {
        business_type: "restaurant",
        state_code: "ca",
        city_slug: "berkeley",
        category: "state",
        title: "Alcoholic Beverage License",
        description: "Apply to the Department of Alcoholic Beverage Control if beer, wine, or spirits will be served.",
        urgency: "Medium",
        timeframe: "45-90 days processing",
    },
    RequirementSeed {
        business_type: "restaurant",
        state_code: "ca",
        city_slug: "berkeley",
        category: "federal",
        title: "Employer Identification Number",
        description: "Obtain an EIN from the IRS for payroll and federal tax reporting.",
        urgency: "Critical",
        timeframe: "Before hiring employees",
    },
    RequirementSeed {
        business_type: "restaurant",
        state_code: "ca",
        city_slug: "berkeley",
        category: "health-safety",
        title: "Alameda County Health Permit",
        description: "Submit plans and obtain a retail food facility permit from Alameda County Environmental Health.",
        urgency: "Critical",
        timeframe: "Before opening; renewed annually",
    },
    RequirementSeed {
        business_type: "restaurant",
        state_code: "ca",
        city_slug: "berkeley",
        category: "health-safety",
        title: "Food Handler Certification",
        description: "Every food employee must hold a California Food Handler Card and at least one manager must be a certified Food Protection Manager.",
        urgency: "Critical",
        timeframe: "Within 30 days of hire",
    },
    RequirementSeed {
        business_type: "restaurant",
        state_code: "ca",
        city_slug: "berkeley",
        category: "fire-safety",
        title: "Fire Inspection & Hood Suppression Certification",
        description: "Pass the Berkeley Fire Department inspection and keep kitchen hood suppression systems serviced every six months.",
        urgency: "Critical",
        timeframe: "Annual inspection",
    },
    RequirementSeed {
        business_type: "restaurant",
        state_code: "ca",
        city_slug: "berkeley",
        category: "employment",
        title: "Workers' Compensation Insurance",
        description: "California requires workers' compensation coverage for every employee, including part-time staff.",
        urgency: "Critical",
        timeframe: "Before the first hire",
    },
    RequirementSeed {
        business_type: "restaurant",
        state_code: "ca",
        city_slug: "berkeley",
        category: "employment",
        title: "Labor Law Posters & Minimum Wage Notice",
        description: "Display current federal, state, and Berkeley minimum wage and paid sick leave notices where employees can see them.",
        urgency: "Medium",
        timeframe: "Before the first hire; updated annually",
    },
    RequirementSeed {
        business_type: "restaurant",
        state_code: "ca",
        city_slug: "berkeley",
        category: "environmental",
        title: "Grease Trap Maintenance",
        description: "Install and maintain a grease interceptor under the fats, oils, and grease control program.",
        urgency: "Medium",
        timeframe: "Quarterly maintenance",
    },
    // Daycare, Berkeley
    RequirementSeed {
        business_type: "daycare",
        state_code: "ca",
        city_slug: "berkeley",
        category: "city",
        title: "City Business License",
        description: "Register the child care business with the City of Berkeley Finance Department.",
        urgency: "Critical",
        timeframe: "Before opening; renewed annually",
    },
    RequirementSeed {
        business_type: "daycare",
        state_code: "ca",
        city_slug: "berkeley",
        category: "city",
        title: "Zoning Use Permit",
        description: "Child care centers need a use permit from the Berkeley Zoning Adjustments Board in most districts.",
        urgency: "Medium",
        timeframe: "2-4 months before opening",
    },
    RequirementSeed {
        business_type: "daycare",
        state_code: "ca",
        city_slug: "berkeley",
        category: "state",
        title: "Child Care Facility License",
        description: "Apply to the California Department of Social Services, Community Care Licensing Division, for a center or family child care home license.",
        urgency: "Critical",
        timeframe: "3-6 months before opening",
    },
    RequirementSeed {
        business_type: "daycare",
        state_code: "ca",
        city_slug: "berkeley",
        category: "federal",
        title: "Employer Identification Number",
        description: "Obtain an EIN from the IRS before hiring staff or applying for child care subsidies.",
        urgency: "Critical",
        timeframe: "Before hiring employees",
    },
    RequirementSeed {
        business_type: "daycare",
        state_code: "ca",
        city_slug: "berkeley",
        category: "health-safety",
        title: "Pediatric First Aid & CPR Training",
        description: "Director and teaching staff must complete pediatric first aid, CPR, and preventive health training.",
        urgency: "Critical",
        timeframe: "Before licensing; renewed every 2 years",
    },
    RequirementSeed {
        business_type: "daycare",
        state_code: "ca",
        city_slug: "berkeley",
        category: "fire-safety",
        title: "Fire Clearance",
        description: "Obtain a fire clearance from the State Fire Marshal or local fire authority before the license is issued.",
        urgency: "Critical",
        timeframe: "Before licensing",
    },
    RequirementSeed {
        business_type: "daycare",
        state_code: "ca",
        city_slug: "berkeley",
        category: "employment",
        title: "Staff Criminal Background Clearance",
        description: "All staff and volunteers must be fingerprinted and cleared through the Department of Justice and FBI.",
        urgency: "Critical",
        timeframe: "Before staff start",
    },
    // Salon, Berkeley
    RequirementSeed {
        business_type: "salon",
        state_code: "ca",
        city_slug: "berkeley",
        category: "city",
        title: "City Business License",
        description: "Register the salon with the City of Berkeley Finance Department.",
        urgency: "Critical",
        timeframe: "Before opening; renewed annually",
    },
    RequirementSeed {
        business_type: "salon",
        state_code: "ca",
        city_slug: "berkeley",
        category: "state",
        title: "Establishment License",
        description: "Obtain an establishment license from the California Board of Barbering and Cosmetology.",
        urgency: "Critical",
        timeframe: "Before opening",
    },
    RequirementSeed {
        business_type: "salon",
        state_code: "ca",
        city_slug: "berkeley",
        category: "state",
        title: "Individual Cosmetology Licenses",
        description: "Every stylist, barber, and esthetician must hold a current state license displayed at their station.",
        urgency: "Critical",
        timeframe: "Renewed every 2 years",
    },
    RequirementSeed {
        business_type: "salon",
        state_code: "ca",
        city_slug: "berkeley",
        category: "health-safety",
        title: "Sanitation & Disinfection Standards",
        description: "Follow Board disinfection rules for tools, foot spas, and workstations; inspections are unannounced.",
        urgency: "Medium",
        timeframe: "Ongoing; subject to inspection",
    },
    RequirementSeed {
        business_type: "salon",
        state_code: "ca",
        city_slug: "berkeley",
        category: "fire-safety",
        title: "Fire Inspection",
        description: "Pass the Berkeley Fire Department business inspection, including extinguisher and exit checks.",
        urgency: "Medium",
        timeframe: "Annual inspection",
    },
    RequirementSeed {
        business_type: "salon",
        state_code: "ca",
        city_slug: "berkeley",
        category: "employment",
        title: "Worker Classification Review",
        description: "Confirm booth renters and employees are classified correctly under California's ABC test.",
        urgency: "Medium",
        timeframe: "Before engaging stylists",
    },
    // Restaurant, Providence
    RequirementSeed {
        business_type: "restaurant",
        state_code: "ri",
        city_slug: "providence",
        category: "health-safety",
        title: "Food Handler Certification",
        description: "All staff handling food must complete a certified food safety program.",
        urgency: "Critical",
        timeframe: "Due within 30 days of employment",
    },
    RequirementSeed {
        business_type: "restaurant",
        state_code: "ri",
        city_slug: "providence",
        category: "fire-safety",
        title: "Fire Inspection Certification",
        description: "Business premises must pass fire safety inspection by the local fire department.",
        urgency: "Critical",
        timeframe: "Annual requirement",
    },
    RequirementSeed {
        business_type: "restaurant",
        state_code: "ri",
        city_slug: "providence",
        category: "city",
        title: "Victualing License",
        description: "Business license for food service establishments issued by the Providence Board of Licenses.",
        urgency: "Critical",
        timeframe: "Must be obtained before opening",
    },
];

const PROVIDERS: &[ProviderSeed] = &[
    ProviderSeed {
        category: "city",
        name: "Berkeley Permit Pros",
        description: "Prepares and files city business license applications, renewals, and certificates of occupancy.",
        location_text: "Berkeley, CA",
        rating: 4.8,
        review_count: 132,
        price: "$150-300",
        certification: "Registered Permit Expediters",
    },
    ProviderSeed {
        category: "city",
        name: "East Bay Zoning Consultants",
        description: "Zoning research and use permit representation before the Zoning Adjustments Board.",
        location_text: "Oakland, CA",
        rating: 4.6,
        review_count: 58,
        price: "$200-450",
        certification: "AICP Certified Planners",
    },
    ProviderSeed {
        category: "state",
        name: "Golden State Licensing Group",
        description: "State license applications for child care, cosmetology, and alcohol service.",
        location_text: "Sacramento, CA",
        rating: 4.7,
        review_count: 211,
        price: "$250-600",
        certification: "Former State Licensing Analysts",
    },
    ProviderSeed {
        category: "state",
        name: "CA Seller's Permit Services",
        description: "Seller's permit registration and sales tax filing setup.",
        location_text: "Berkeley, CA",
        rating: 4.3,
        review_count: 76,
        price: "$99-199",
        certification: "Enrolled Agents",
    },
    ProviderSeed {
        category: "federal",
        name: "FedFile Business Services",
        description: "EIN applications and federal employer registrations handled same day.",
        location_text: "Remote",
        rating: 4.5,
        review_count: 340,
        price: "$79-149",
        certification: "IRS Enrolled Agents",
    },
    ProviderSeed {
        category: "health-safety",
        name: "SafeServe Food Safety Training",
        description: "Online and in-person food handler cards and manager certification exams.",
        location_text: "Berkeley, CA",
        rating: 4.9,
        review_count: 412,
        price: "$15-180",
        certification: "ANSI-Accredited Food Handler Program",
    },
    ProviderSeed {
        category: "health-safety",
        name: "Alameda Health Permit Advisors",
        description: "Plan check preparation and pre-inspection walkthroughs for county health permits.",
        location_text: "Oakland, CA",
        rating: 4.4,
        review_count: 67,
        price: "$300-700",
        certification: "Former County Environmental Health Specialists",
    },
    ProviderSeed {
        category: "health-safety",
        name: "Bay Area CPR & First Aid",
        description: "Pediatric first aid and CPR classes that satisfy child care licensing rules.",
        location_text: "Berkeley, CA",
        rating: 4.8,
        review_count: 189,
        price: "$85-120",
        certification: "Licensed Training Provider",
    },
    ProviderSeed {
        category: "fire-safety",
        name: "East Bay Fire Protection",
        description: "Fire inspections, extinguisher service, and fire clearance preparation.",
        location_text: "Berkeley, CA",
        rating: 4.7,
        review_count: 145,
        price: "$175-400",
        certification: "Licensed by the State Fire Marshal",
    },
    ProviderSeed {
        category: "fire-safety",
        name: "Hood & Suppression Specialists",
        description: "Kitchen hood cleaning and suppression system certification.",
        location_text: "Emeryville, CA",
        rating: 4.5,
        review_count: 88,
        price: "$250-550",
        certification: "NFPA 96 Certified Technicians",
    },
    ProviderSeed {
        category: "employment",
        name: "Bay HR Compliance Partners",
        description: "Employee handbooks, posters, worker classification, and background check coordination.",
        location_text: "San Francisco, CA",
        rating: 4.6,
        review_count: 156,
        price: "$400-2500",
        certification: "SHRM Certified",
    },
    ProviderSeed {
        category: "employment",
        name: "Workers' Comp Direct",
        description: "Workers' compensation quotes for small employers in under a day.",
        location_text: "Berkeley, CA",
        rating: 4.2,
        review_count: 61,
        price: "$50-150/month",
        certification: "Licensed Insurance Brokers",
    },
    ProviderSeed {
        category: "environmental",
        name: "EcoCompliance Group",
        description: "Environmental compliance reviews and sustainability reporting.",
        location_text: "Sacramento, CA",
        rating: 4.5,
        review_count: 94,
        price: "$600-3000",
        certification: "EPA Certified",
    },
    ProviderSeed {
        category: "environmental",
        name: "Berkeley Grease Trap Service",
        description: "Grease interceptor pumping, maintenance logs, and inspection support.",
        location_text: "Berkeley, CA",
        rating: 4.1,
        review_count: 37,
        price: "$150-350",
        certification: "Registered FOG Hauler",
    },
];

/// Builds the store from the tables above.
///
/// Fails only if a row references a slug that was never inserted.
pub fn build_store() -> anyhow::Result<ComplianceStore> {
    let mut builder = StoreBuilder::new();

    for (name, slug) in BUSINESS_TYPES {
        builder.insert_business_type(NewBusinessType {
            name: name.to_string(),
            slug: slug.to_string(),
        });
    }

    for (state, state_code, city, city_slug) in LOCATIONS {
        builder.insert_location(NewLocation {
            state: state.to_string(),
            state_code: state_code.to_string(),
            city: city.to_string(),
            city_slug: city_slug.to_string(),
        });
    }

    for (name, slug) in CATEGORIES {
        builder.insert_category(NewRequirementCategory {
            name: name.to_string(),
            slug: slug.to_string(),
        });
    }

    for seed in REQUIREMENTS {
        let business_type_id = builder
            .business_type_id(seed.business_type)
            .ok_or_else(|| anyhow!("Unknown business type slug: {}", seed.business_type))?;
        let location_id = builder
            .location_id(seed.state_code, seed.city_slug)
            .ok_or_else(|| {
                anyhow!("Unknown location: {}/{}", seed.state_code, seed.city_slug)
            })?;
        let category_id = builder
            .category_id(seed.category)
            .ok_or_else(|| anyhow!("Unknown category slug: {}", seed.category))?;

        builder.insert_requirement(NewComplianceRequirement {
            title: seed.title.to_string(),
            description: seed.description.to_string(),
            urgency: seed.urgency.to_string(),
            timeframe: seed.timeframe.to_string(),
            category_id,
            business_type_id,
            location_id,
        });
    }

    for seed in PROVIDERS {
        let category_id = builder
            .category_id(seed.category)
            .ok_or_else(|| anyhow!("Unknown category slug: {}", seed.category))?;

        builder.insert_provider(NewServiceProvider {
            name: seed.name.to_string(),
            description: seed.description.to_string(),
            category_id,
            location_text: seed.location_text.to_string(),
            rating: seed.rating,
            review_count: seed.review_count,
            price: seed.price.to_string(),
            certification: seed.certification.to_string(),
        });
    }

    let store = builder.build();
    let counts = store.counts();
    tracing::info!(
        "Seeded compliance store: {} business types, {} locations, {} categories, {} requirements, {} providers, {} provider links",
        counts.business_types,
        counts.locations,
        counts.requirement_categories,
        counts.compliance_requirements,
        counts.service_providers,
        counts.provider_requirements
    );

    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> ComplianceStore {
        build_store().expect("seed data resolves")
    }

    #[test]
    fn seed_counts_match_tables() {
        let counts = store().counts();
        assert_eq!(counts.business_types, BUSINESS_TYPES.len());
        assert_eq!(counts.locations, LOCATIONS.len());
        assert_eq!(counts.requirement_categories, CATEGORIES.len());
        assert_eq!(counts.compliance_requirements, REQUIREMENTS.len());
        assert_eq!(counts.service_providers, PROVIDERS.len());
        assert!(counts.provider_requirements > 0);
    }

    #[test]
    fn ids_follow_table_order() {
        let store = store();
        let types = store.list_business_types();
        for (idx, bt) in types.iter().enumerate() {
            assert_eq!(bt.id as usize, idx + 1);
            assert_eq!(bt.slug, BUSINESS_TYPES[idx].1);
        }
        let restaurant = store.find_business_type_by_slug("restaurant").unwrap();
        assert_eq!(restaurant.id, 1);
        assert_eq!(restaurant.name, "Restaurant");
    }

    #[test]
    fn slugs_are_unique() {
        let store = store();
        let mut slugs: Vec<String> = store
            .list_business_types()
            .into_iter()
            .map(|b| b.slug)
            .collect();
        slugs.sort();
        slugs.dedup();
        assert_eq!(slugs.len(), BUSINESS_TYPES.len());

        let mut slugs: Vec<String> = store
            .list_requirement_categories()
            .into_iter()
            .map(|c| c.slug)
            .collect();
        slugs.sort();
        slugs.dedup();
        assert_eq!(slugs.len(), CATEGORIES.len());
    }

    #[test]
    fn only_berkeley_in_california() {
        let store = store();
        let ca = store.list_locations_by_state_code("ca");
        assert_eq!(ca.len(), 1);
        assert_eq!(ca[0].city, "Berkeley");
        assert_eq!(ca[0].city_slug, "berkeley");
        assert!(store.list_locations_by_state_code("zz").is_empty());
        assert_eq!(store.find_location("ca", "berkeley"), Some(ca[0].clone()));
    }

    #[test]
    fn requirements_reference_existing_parents() {
        let store = store();
        let type_ids: Vec<u32> = store.list_business_types().iter().map(|b| b.id).collect();
        let category_ids: Vec<u32> = store
            .list_requirement_categories()
            .iter()
            .map(|c| c.id)
            .collect();
        for bt in &type_ids {
            for loc in 1..=LOCATIONS.len() as u32 {
                for req in store.list_requirements_by_business_and_location(*bt, loc) {
                    assert!(category_ids.contains(&req.category_id));
                }
            }
        }
        for row in store.provider_requirements() {
            assert!(store.find_requirement(row.requirement_id).is_some());
            assert!(store.list_providers().iter().any(|p| p.id == row.provider_id));
        }
    }

    #[test]
    fn city_business_license_gets_city_providers_only() {
        let store = store();
        let restaurant = store.find_business_type_by_slug("restaurant").unwrap();
        let berkeley = store.find_location("ca", "berkeley").unwrap();
        let city = store.find_category(1).unwrap();
        assert_eq!(city.name, "City Requirements");

        let requirements =
            store.list_requirements_by_business_and_location(restaurant.id, berkeley.id);
        let license = requirements
            .iter()
            .find(|r| r.title == "City Business License")
            .expect("license seeded");
        assert_eq!(license.category_id, city.id);

        let providers = store.list_providers_by_requirement(license.id);
        assert!(!providers.is_empty());
        assert!(providers.iter().all(|p| p.category_id == city.id));
        assert!(providers.iter().all(|p| p.name != "East Bay Fire Protection"));
    }

    #[test]
    fn seeded_urgencies_and_ratings() {
        let store = store();
        for cat in store.list_requirement_categories() {
            for req in store.list_requirements_by_category(cat.id) {
                assert!(req.urgency == "Critical" || req.urgency == "Medium");
            }
        }
        for provider in store.list_providers() {
            assert!((1.0..=5.0).contains(&provider.rating));
        }
    }
}
