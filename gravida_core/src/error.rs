//! Error types for the gravida_core library.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for gravida_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A reference date (LMP or due date) is missing or unparseable
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// Cloud read/write failed; local state stays authoritative
    #[error("Remote sync error: {0}")]
    RemoteSync(String),

    /// Interactive login failed; no state change
    #[error("Auth error: {0}")]
    Auth(String),

    /// State management error
    #[error("State error: {0}")]
    State(String),
}
