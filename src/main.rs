use std::sync::Arc;

use compliance_lookup_api::config::Config;
use compliance_lookup_api::handlers::AppState;
use compliance_lookup_api::obs;
use compliance_lookup_api::routes::build_router;
use compliance_lookup_api::storage::ComplianceStore;

/// Main entry point for the application.
///
/// Initializes tracing, loads configuration, seeds the in-memory store,
/// builds the router and serves it until the process exits.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    obs::init_tracing();

    // Load configuration
    let config = Config::from_env()?;

    // Seed the store once; it is immutable from here on
    let store = Arc::new(ComplianceStore::seeded()?);

    let app_state = Arc::new(AppState::new(store, config.clone()));
    tracing::info!(
        "Lookup cache initialized ({}s TTL, {} capacity)",
        config.cache_ttl_secs,
        config.cache_max_entries
    );

    let app = build_router(app_state);

    // Start server
    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
