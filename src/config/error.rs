//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid bind address: {0}")]
    InvalidBindAddress(String),

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Question bank override not found: {0}")]
    QuestionBankMissing(String),

    #[error("Default timezone must not be empty")]
    EmptyTimezone,

    #[error("History limit must be between 1 and {max}")]
    InvalidHistoryLimit { max: usize },

    #[error("Invalid classifier settings: {0}")]
    InvalidClassifier(&'static str),
}
