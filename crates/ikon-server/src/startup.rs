//! Server startup utilities.

use ikon_config::{AppConfig, ObservabilityConfig};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Builds the log filter. `RUST_LOG` wins over the configured level.
#[must_use]
pub fn log_filter(config: &ObservabilityConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{},ikon=debug,tower_http=debug", config.log_level)))
}

/// Installs the global tracing subscriber (pretty or JSON).
pub fn init_logging(config: &ObservabilityConfig) {
    let registry = tracing_subscriber::registry().with(log_filter(config));

    if config.is_json() {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_target(true))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .init();
    }
}

/// Prints the startup banner.
pub fn print_banner() {
    info!(r#"
    ____ __               ______     _           __
   /  _// /__ ____  ___  / ____/____(_)___  ____/ /
   / / /  '_// __ \/ _ \/ / __/ ___/ / __ \/ __  /
 _/ / / /\ \/ /_/ / / / / /_/ / /  / / / / / /_/ /
/___//_/ /_/\____/_/ /_/\____/_/  /_/_/ /_/\__,_/
    "#);
}

/// Prints server endpoints and enabled subsystems.
pub fn print_startup_info(config: &AppConfig) {
    let separator = "=".repeat(60);
    let addr = config.server.addr();
    info!("{}", separator);
    info!("REST API:  http://{}/api", addr);
    info!("Health:    http://{}/health", addr);
    info!("API Docs:  http://{}/swagger-ui", addr);
    info!(
        "Storage:   {}",
        if config.database.is_memory() { "in-memory" } else { "mysql" }
    );
    info!("Scheduler: {}", if config.scheduler.enabled { "enabled" } else { "disabled" });
    info!(
        "Bot:       {}",
        if config.telegram.is_active() { "enabled" } else { "disabled" }
    );
    info!("{}", separator);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_print_banner_does_not_panic() {
        let _ = tracing_subscriber::fmt::try_init();
        print_banner();
    }

    #[test]
    fn test_print_startup_info_does_not_panic() {
        let _ = tracing_subscriber::fmt::try_init();
        print_startup_info(&AppConfig::default());
    }

    #[test]
    fn test_log_filter_uses_configured_level() {
        std::env::remove_var("RUST_LOG");
        let filter = log_filter(&ObservabilityConfig {
            log_level: "warn".to_string(),
            log_format: "json".to_string(),
        });
        assert!(filter.to_string().contains("warn"));
    }
}
