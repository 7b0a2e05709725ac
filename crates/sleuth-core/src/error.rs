//! Core error types for the Sleuth toolkit.
//!
//! This module defines the umbrella error type used at crate boundaries.
//! Each subsystem keeps its own precise error enum; the variants here let an
//! orchestrator tell "cache unavailable" apart from "network unreachable".

use thiserror::Error;

/// Central error type for Sleuth operations.
#[derive(Error, Debug)]
pub enum SleuthError {
    /// Configuration errors (file loading, parsing, validation)
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Network errors (DNS, timeout, connection, TLS)
    #[error("fetch error: {0}")]
    Fetch(String),

    /// Cache persistence errors (unreadable or unwritable backing file)
    #[error("cache error: {0}")]
    Cache(String),

    /// Report building or saving errors
    #[error("report error: {0}")]
    Report(String),

    /// Validation errors (invalid input, constraints)
    #[error("validation error: {0}")]
    Validation(String),

}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to determine config directory path
    #[error("could not determine config directory (XDG base directories not available)")]
    NoConfigDir,

    /// Failed to parse TOML
    #[error("failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Failed to serialize config
    #[error("failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),

    /// I/O error reading/writing config
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration value
    #[error("invalid config value for {field}: {reason}")]
    InvalidValue {
        /// Field name
        field: String,
        /// Reason for invalidity
        reason: String,
    },
}

/// Result type alias using `SleuthError`.
pub type Result<T> = std::result::Result<T, SleuthError>;

/// Result type alias for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
