//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `CURALOOP` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use curaloop::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {}", config.server.socket_addr().unwrap());
//! ```

mod checkin;
mod error;
mod intake;
mod server;

pub use checkin::{CheckinConfig, MAX_HISTORY_LIMIT};
pub use error::{ConfigError, ValidationError};
pub use intake::IntakeConfig;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a working
/// development setup. Load using [`AppConfig::load()`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment, logging)
    #[serde(default)]
    pub server: ServerConfig,

    /// Intake questionnaire configuration
    #[serde(default)]
    pub intake: IntakeConfig,

    /// Check-in configuration
    #[serde(default)]
    pub checkin: CheckinConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `CURALOOP` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `CURALOOP__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `CURALOOP__CHECKIN__CLASSIFIER__POSITIVE=yes,took it` -> a keyword list
    /// - `CURALOOP__INTAKE__QUESTION_BANK_PATH=...` -> `intake.question_bank_path = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("CURALOOP")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("checkin.classifier.positive")
                    .with_list_parse_key("checkin.classifier.negative"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.intake.validate()?;
        self.checkin.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: &[&str] = &[
        "CURALOOP__SERVER__PORT",
        "CURALOOP__SERVER__ENVIRONMENT",
        "CURALOOP__INTAKE__DEFAULT_TIMEZONE",
        "CURALOOP__CHECKIN__HISTORY_LIMIT",
        "CURALOOP__CHECKIN__CLASSIFIER__POSITIVE",
        "CURALOOP__CHECKIN__CLASSIFIER__HIGH_ENGAGEMENT_WORDS",
    ];

    /// Helper to clear environment variables after testing
    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_load_with_empty_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.intake.default_timezone, "America/Los_Angeles");
        assert_eq!(config.checkin.history_limit, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_nested_overrides() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("CURALOOP__SERVER__PORT", "3000");
        env::set_var("CURALOOP__INTAKE__DEFAULT_TIMEZONE", "Europe/Berlin");
        env::set_var("CURALOOP__CHECKIN__HISTORY_LIMIT", "25");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.intake.default_timezone, "Europe/Berlin");
        assert_eq!(config.checkin.history_limit, 25);
    }

    #[test]
    fn test_classifier_keywords_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("CURALOOP__CHECKIN__CLASSIFIER__POSITIVE", "yes,took it");
        env::set_var("CURALOOP__CHECKIN__CLASSIFIER__HIGH_ENGAGEMENT_WORDS", "8");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.checkin.classifier.positive, vec!["yes", "took it"]);
        assert_eq!(config.checkin.classifier.high_engagement_words, 8);
        assert!(config.checkin.classifier.negative.contains(&"cannot".to_string()));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_is_production() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("CURALOOP__SERVER__ENVIRONMENT", "production");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.is_production());
    }

    #[test]
    fn test_validate_reports_first_bad_section() {
        let mut config = AppConfig::default();
        config.checkin.history_limit = 0;

        assert_eq!(
            config.validate(),
            Err(ValidationError::InvalidHistoryLimit { max: MAX_HISTORY_LIMIT })
        );
    }
}
