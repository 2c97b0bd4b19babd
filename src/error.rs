//! Centralized error types for release-keeper
//!
//! Uses thiserror for typed errors that can be matched on,
//! while still being compatible with anyhow for propagation.
//!
//! Unsuccessful HTTP responses are NOT errors here: they come back as
//! `Outcome::Failed`. These types cover faults where no well-defined
//! remote state can be reported.

use thiserror::Error;

/// Top-level error type for release-keeper operations
#[derive(Error, Debug)]
pub enum ReleaseError {
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Selector error: {0}")]
    Selector(#[from] SelectorError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to decode {what}: {source}")]
    Decode {
        what: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Release selector misuse
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SelectorError {
    #[error("Exactly one of release id and tag must be provided, got both")]
    Both,

    #[error("Exactly one of release id and tag must be provided, got neither")]
    Neither,
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("The auth token environment variable \"{name}\" is not defined")]
    MissingEnvVar { name: String },

    #[error("No auth token supplied. Use --auth-token, --auth-token-var or token_var in the config file")]
    NoToken,

    #[error("The auth token cannot be empty")]
    EmptyToken,

    #[error("Invalid configuration value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    #[error("Config file not found: {path}")]
    FileNotFound { path: String },

    #[error("Failed to parse config: {message}")]
    ParseError { message: String },
}
