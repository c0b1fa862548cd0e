//! Error types for configuration loading.

use thiserror::Error;

use flashbox_core::FlashError;

/// Error type for configuration loading and validation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The configuration document could not be parsed.
    #[error("failed to parse configuration: {0}")]
    Parse(String),

    /// The parsed configuration describes an invalid policy.
    #[error(transparent)]
    Invalid(#[from] FlashError),
}
