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
    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Request timeout of {request_secs}s does not fit the {generation_secs}s generation budget")]
    RequestTimeoutExceedsBudget { request_secs: u64, generation_secs: u64 },

    #[error("Invalid base URL for {0}")]
    InvalidBaseUrl(&'static str),

    #[error("Model name for {0} is empty")]
    EmptyModel(&'static str),

    #[error("Unknown log level: {0}")]
    InvalidLogLevel(String),
}
