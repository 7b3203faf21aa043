//! Open Research Library harvester binary
//!
//! Runs one full harvest: fetch the feed, publish every valid record, report
//! the counters.

use std::sync::Arc;

use sqlx::mysql::MySqlPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use onix_harvester::{
    config::AppConfig,
    oai::OaiClient,
    services::{HarvestService, HttpObjectStore, LanguageRepository},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load()?;

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("onix_harvester={}", config.logging.level).into());

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting ONIX harvester v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Feed endpoint: {}", config.feed.endpoint);

    // Language cross-referencing is optional; the harvester publishes fine
    // without a database
    let languages = match &config.database.url {
        Some(url) => {
            let pool = MySqlPoolOptions::new()
                .max_connections(config.database.max_connections)
                .connect(url)
                .await?;
            tracing::info!("Connected to metadata database");
            Some(LanguageRepository::new(pool))
        }
        None => None,
    };

    let oai = OaiClient::new(&config.feed);
    let store = Arc::new(HttpObjectStore::new(&config.storage));
    let harvester = HarvestService::new(&config, oai, store, languages);

    let summary = harvester.run().await?;
    tracing::info!(
        "Harvest complete: {} published, {} skipped, {} failed",
        summary.published,
        summary.skipped,
        summary.failed
    );

    Ok(())
}
