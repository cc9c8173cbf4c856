//! Configuration validation module.
//!
//! Checks every section up front and reports all problems at once instead
//! of failing on the first one at runtime.

use crate::{AppConfig, MEMORY_DATABASE_SCHEME};
use std::fmt;
use std::str::FromStr;
use url::Url;

/// Configuration validation error variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigValidationError {
    /// JWT secret is too short (minimum 32 characters).
    JwtSecretTooShort { actual: usize, minimum: usize },
    /// Port number is invalid (must be 1-65535).
    InvalidPort { name: String, value: u16 },
    /// Pool size configuration is invalid (min must be <= max).
    InvalidPoolSize { min: u32, max: u32 },
    /// Pool size exceeds maximum allowed.
    PoolSizeTooLarge { value: u32, maximum: u32 },
    /// URL format is invalid.
    InvalidUrl { url_type: String, message: String },
    /// Timeout value must be positive.
    NonPositiveTimeout { name: String, value: u64 },
    /// Cron expression does not parse.
    InvalidCron { name: String, expression: String, message: String },
    /// Log level is invalid.
    InvalidLogLevel { value: String },
    /// Bot enabled without a token.
    MissingBotToken,
}

impl fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::JwtSecretTooShort { actual, minimum } => {
                write!(f, "JWT secret too short: {} characters (minimum {})", actual, minimum)
            }
            Self::InvalidPort { name, value } => {
                write!(f, "Invalid port for {}: {} (must be 1-65535)", name, value)
            }
            Self::InvalidPoolSize { min, max } => {
                write!(f, "Invalid pool size: min ({}) cannot be greater than max ({})", min, max)
            }
            Self::PoolSizeTooLarge { value, maximum } => {
                write!(f, "Pool size {} exceeds maximum allowed ({})", value, maximum)
            }
            Self::InvalidUrl { url_type, message } => {
                write!(f, "Invalid {} URL: {}", url_type, message)
            }
            Self::NonPositiveTimeout { name, value } => {
                write!(f, "Timeout '{}' must be positive, got {}", name, value)
            }
            Self::InvalidCron { name, expression, message } => {
                write!(f, "Invalid cron expression for {}: '{}' ({})", name, expression, message)
            }
            Self::InvalidLogLevel { value } => {
                write!(f, "Invalid log level: '{}' (valid: trace, debug, info, warn, error)", value)
            }
            Self::MissingBotToken => write!(f, "telegram.bot_token is required when the bot is enabled"),
        }
    }
}

impl std::error::Error for ConfigValidationError {}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Minimum JWT secret length.
    const MIN_JWT_SECRET_LENGTH: usize = 32;
    /// Maximum connection pool size.
    const MAX_POOL_SIZE: u32 = 1000;
    /// Valid log levels.
    const VALID_LOG_LEVELS: &'static [&'static str] = &["trace", "debug", "info", "warn", "error"];

    /// Validates the entire application configuration.
    ///
    /// Returns Ok(()) if valid, or Err with all validation errors found.
    pub fn validate(config: &AppConfig) -> Result<(), Vec<ConfigValidationError>> {
        let mut errors = Vec::new();

        Self::validate_security(config, &mut errors);
        Self::validate_server(config, &mut errors);
        Self::validate_database(config, &mut errors);
        Self::validate_scheduler(config, &mut errors);
        Self::validate_telegram(config, &mut errors);
        Self::validate_observability(config, &mut errors);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_security(config: &AppConfig, errors: &mut Vec<ConfigValidationError>) {
        let security = &config.security;
        if security.jwt_secret.len() < Self::MIN_JWT_SECRET_LENGTH {
            errors.push(ConfigValidationError::JwtSecretTooShort {
                actual: security.jwt_secret.len(),
                minimum: Self::MIN_JWT_SECRET_LENGTH,
            });
        }
        if security.jwt_expiration_secs == 0 {
            errors.push(ConfigValidationError::NonPositiveTimeout {
                name: "security.jwt_expiration_secs".to_string(),
                value: 0,
            });
        }
    }

    fn validate_server(config: &AppConfig, errors: &mut Vec<ConfigValidationError>) {
        if config.server.port == 0 {
            errors.push(ConfigValidationError::InvalidPort {
                name: "server.port".to_string(),
                value: 0,
            });
        }
        if config.server.request_timeout_secs == 0 {
            errors.push(ConfigValidationError::NonPositiveTimeout {
                name: "server.request_timeout_secs".to_string(),
                value: 0,
            });
        }
    }

    fn validate_database(config: &AppConfig, errors: &mut Vec<ConfigValidationError>) {
        let database = &config.database;
        if database.is_memory() {
            return;
        }

        match Url::parse(&database.url) {
            Ok(url) if url.scheme() == "mysql" => {}
            Ok(url) => errors.push(ConfigValidationError::InvalidUrl {
                url_type: "database".to_string(),
                message: format!(
                    "unsupported scheme '{}' (expected mysql:// or {})",
                    url.scheme(),
                    MEMORY_DATABASE_SCHEME
                ),
            }),
            Err(e) => errors.push(ConfigValidationError::InvalidUrl {
                url_type: "database".to_string(),
                message: e.to_string(),
            }),
        }

        if database.min_connections > database.max_connections {
            errors.push(ConfigValidationError::InvalidPoolSize {
                min: database.min_connections,
                max: database.max_connections,
            });
        }
        if database.max_connections > Self::MAX_POOL_SIZE {
            errors.push(ConfigValidationError::PoolSizeTooLarge {
                value: database.max_connections,
                maximum: Self::MAX_POOL_SIZE,
            });
        }
        if database.connect_timeout_secs == 0 {
            errors.push(ConfigValidationError::NonPositiveTimeout {
                name: "database.connect_timeout_secs".to_string(),
                value: 0,
            });
        }
    }

    fn validate_scheduler(config: &AppConfig, errors: &mut Vec<ConfigValidationError>) {
        let scheduler = &config.scheduler;
        if !scheduler.enabled {
            return;
        }

        for (name, expression) in [
            ("scheduler.leaderboard_cron", &scheduler.leaderboard_cron),
            ("scheduler.daily_reminder_cron", &scheduler.daily_reminder_cron),
        ] {
            if let Err(e) = cron::Schedule::from_str(expression) {
                errors.push(ConfigValidationError::InvalidCron {
                    name: name.to_string(),
                    expression: expression.clone(),
                    message: e.to_string(),
                });
            }
        }
        if scheduler.poll_interval_secs == 0 {
            errors.push(ConfigValidationError::NonPositiveTimeout {
                name: "scheduler.poll_interval_secs".to_string(),
                value: 0,
            });
        }
    }

    fn validate_telegram(config: &AppConfig, errors: &mut Vec<ConfigValidationError>) {
        let telegram = &config.telegram;
        if !telegram.enabled {
            return;
        }

        if telegram.bot_token.is_empty() {
            errors.push(ConfigValidationError::MissingBotToken);
        }
        for (url_type, value) in [
            ("telegram.mini_app_url", &telegram.mini_app_url),
            ("telegram.api_base_url", &telegram.api_base_url),
        ] {
            if let Err(e) = Url::parse(value) {
                errors.push(ConfigValidationError::InvalidUrl {
                    url_type: url_type.to_string(),
                    message: e.to_string(),
                });
            }
        }
    }

    fn validate_observability(config: &AppConfig, errors: &mut Vec<ConfigValidationError>) {
        let level = config.observability.log_level.to_lowercase();
        if !Self::VALID_LOG_LEVELS.contains(&level.as_str()) {
            errors.push(ConfigValidationError::InvalidLogLevel {
                value: config.observability.log_level.clone(),
            });
        }
    }
}

/// Formats validation errors for display.
#[must_use]
pub fn format_validation_errors(errors: &[ConfigValidationError]) -> String {
    let mut output = String::from("Configuration validation failed:\n");
    for (i, error) in errors.iter().enumerate() {
        output.push_str(&format!("  {}. {}\n", i + 1, error));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_passes() {
        assert!(ConfigValidator::validate(&AppConfig::default()).is_ok());
    }

    #[test]
    fn test_jwt_secret_too_short() {
        let mut config = AppConfig::default();
        config.security.jwt_secret = "short".to_string();

        let errors = ConfigValidator::validate(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigValidationError::JwtSecretTooShort { actual: 5, .. })));
    }

    #[test]
    fn test_invalid_port() {
        let mut config = AppConfig::default();
        config.server.port = 0;

        let errors = ConfigValidator::validate(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigValidationError::InvalidPort { name, .. } if name == "server.port")));
    }

    #[test]
    fn test_invalid_pool_size() {
        let mut config = AppConfig::default();
        config.database.min_connections = 100;
        config.database.max_connections = 10;

        let errors = ConfigValidator::validate(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigValidationError::InvalidPoolSize { .. })));
    }

    #[test]
    fn test_unsupported_database_scheme() {
        let mut config = AppConfig::default();
        config.database.url = "postgres://localhost/ikon".to_string();

        let errors = ConfigValidator::validate(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigValidationError::InvalidUrl { url_type, .. } if url_type == "database")));
    }

    #[test]
    fn test_memory_database_skips_pool_checks() {
        let mut config = AppConfig::default();
        config.database.url = "memory://".to_string();
        config.database.min_connections = 50;
        config.database.max_connections = 1;
        assert!(ConfigValidator::validate(&config).is_ok());
    }

    #[test]
    fn test_invalid_cron() {
        let mut config = AppConfig::default();
        config.scheduler.leaderboard_cron = "every hour".to_string();

        let errors = ConfigValidator::validate(&config).unwrap_err();
        assert!(errors.iter().any(|e| matches!(
            e,
            ConfigValidationError::InvalidCron { name, .. } if name == "scheduler.leaderboard_cron"
        )));
    }

    #[test]
    fn test_enabled_bot_requires_token() {
        let mut config = AppConfig::default();
        config.telegram.enabled = true;

        let errors = ConfigValidator::validate(&config).unwrap_err();
        assert!(errors.contains(&ConfigValidationError::MissingBotToken));
    }

    #[test]
    fn test_invalid_log_level() {
        let mut config = AppConfig::default();
        config.observability.log_level = "verbose".to_string();

        let errors = ConfigValidator::validate(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(format_validation_errors(&errors).contains("verbose"));
    }
}
