//! Error types for the Inkpress core library.

use thiserror::Error;

/// Result type alias using `CoreError`.
pub type Result<T> = std::result::Result<T, CoreError>;

/// A build option that failed validation.
///
/// Carries the offending field name (e.g. `siteUrl` or
/// `markdown.includeDrafts`) and a human-readable description of the
/// constraint it violated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid value for `{field}`: {constraint}")]
pub struct ValidationError {
    field: String,
    constraint: String,
}

impl ValidationError {
    /// Create a new validation error for `field`.
    pub fn new(field: impl Into<String>, constraint: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            constraint: constraint.into(),
        }
    }

    /// Name of the offending field.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Description of the violated constraint.
    pub fn constraint(&self) -> &str {
        &self.constraint
    }
}

/// Core error types for Inkpress.
#[derive(Error, Debug)]
pub enum CoreError {
    /// A build option was rejected.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Configuration loading error.
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Error reported by the `config` crate while reading sources.
    #[error("Config crate error: {0}")]
    ConfigCrate(#[from] config::ConfigError),
}

impl CoreError {
    /// Create a new configuration error with a message.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            source: None,
        }
    }

    /// Create a new configuration error with source.
    pub fn config_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// The validation failure behind this error, if any.
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }
}
