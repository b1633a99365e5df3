//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

// Re-export library error type
pub use zonegen_provider::ProviderError;

/// Core layer error type
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// Single-zone mode named a zone the inventory does not have
    #[error("Zone '{name}' not found")]
    ZoneNotFound {
        name: String,
        /// Names of every zone the inventory listed
        available: Vec<String>,
    },

    /// Artifact read/write failure
    #[error("Storage error: {0}")]
    StorageError(String),

    /// Configuration file could not be read or parsed
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Configuration values are inconsistent
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Provider error (converting from library)
    #[error("{0}")]
    Provider(#[from] ProviderError),
}

impl CoreError {
    /// Whether it is expected behavior (user input, resource does not exist, etc.) is used for log classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error` when returning `false`.
    /// **Please update this method simultaneously when new variants are added.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::ZoneNotFound { .. } | Self::ConfigError(_) | Self::ValidationError(_) => true,
            Self::Provider(e) => e.is_expected(),
            Self::StorageError(_) => false,
        }
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;
