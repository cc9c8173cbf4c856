//! # IkonGrind Server
//!
//! Entry point for the IkonGrind backend.

use anyhow::Context;
use ikon_config::ConfigLoader;
use ikon_server::startup::{init_logging, print_banner};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ConfigLoader::from_default_location()
        .context("failed to load configuration")?
        .get()
        .await;

    init_logging(&config.observability);
    print_banner();

    info!("Starting IkonGrind server...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));
    info!("Environment: {}", config.app.environment);

    ikon_server::run(config).await.context("server error")?;
    Ok(())
}
