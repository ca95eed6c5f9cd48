use anyhow::Result;
use tokio::signal;
use tracing::info;

use namelist::config::Config;
use namelist::init::{init_registry, refresh_in_background, run_reloader, setup_logging};

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Load Config
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or("namelist.toml".to_string());
    let config_exists = std::path::Path::new(&config_path).exists();
    let config = if config_exists {
        Config::load(&config_path).await?
    } else {
        Config::default()
    };

    // 2. Setup Logging
    setup_logging(&config);
    info!("Starting namelist...");

    if !config_exists {
        info!("Config file not found, using defaults.");
    }

    // 3. Build Registry & Initial Parse
    let registry = init_registry(&config);
    refresh_in_background(registry.clone()).await;

    // 4. Spawn Periodic Reloader
    tokio::spawn(run_reloader(registry.clone()));

    // 5. Wait for Shutdown
    signal::ctrl_c().await?;
    info!("Shutdown signal received.");

    let snapshot = registry.snapshot();
    info!(
        "Serving {} names from {} lists at shutdown",
        snapshot.total_names(),
        snapshot.lists().len()
    );

    Ok(())
}
