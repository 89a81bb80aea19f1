//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// History storage error
    #[error("History error: {0}")]
    Store(#[from] plantid_store::StoreError),

    /// Recognition service error
    #[error("Recognition failed: {0}")]
    Client(#[from] plantid_client::ClientError),

    /// Extractor configuration error
    #[error("Extractor error: {0}")]
    Extractor(#[from] plantid_extractor::ExtractorError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// No history entry with the given id
    #[error("No history entry with id {0}")]
    NotFound(String),
}
