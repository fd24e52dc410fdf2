//! Utility to inspect the seeded dataset and print its structure.
//!
//! Pass `--json` to dump the grouped requirements of every business type and
//! location pair as JSON instead of the human-readable listing.

use compliance_lookup_api::lookup::LookupService;
use compliance_lookup_api::storage::ComplianceStore;
use std::sync::Arc;

fn main() -> anyhow::Result<()> {
    let as_json = std::env::args().any(|arg| arg == "--json");
    let lookup = LookupService::new(Arc::new(ComplianceStore::seeded()?));
    let store = lookup.store();

    let mut dump = Vec::new();
    let pairs: Vec<_> = store
        .list_business_types()
        .into_iter()
        .flat_map(|bt| {
            store
                .list_locations()
                .into_iter()
                .map(move |loc| (bt.clone(), loc))
        })
        .collect();

    for (bt, loc) in pairs {
        let groups = lookup.requirements_grouped_with_providers(bt.id, loc.id);
        if groups.is_empty() {
            continue;
        }

        if as_json {
            dump.push(serde_json::json!({
                "businessType": bt,
                "location": loc,
                "groups": groups,
            }));
            continue;
        }

        println!("{} in {}, {}:", bt.name, loc.city, loc.state);
        for group in &groups {
            println!("  - {}", group.category.name);
            for req in &group.requirements {
                println!(
                    "    - [{}] {} ({} providers)",
                    req.requirement.urgency,
                    req.requirement.title,
                    req.providers.len()
                );
            }
        }
        println!();
    }

    if as_json {
        println!("{}", serde_json::to_string_pretty(&dump)?);
    } else {
        println!("{:?}", store.counts());
    }

    Ok(())
}
