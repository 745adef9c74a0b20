use anyhow::Context;
use pollution_tracker::{TrackerConfig, VERSION, logging, web};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = TrackerConfig::load().context("Failed to load configuration")?;
    logging::init(&config.logging)?;

    tracing::info!("Starting pollution tracker {}", VERSION);
    web::run(config).await
}
