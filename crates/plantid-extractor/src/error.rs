//! Error types for the Extractor
//!
//! `ResponseExtractor::extract` never returns these; they flow between the
//! parsing helpers and out of configuration loading only.

use thiserror::Error;

/// Errors that can occur while parsing a response or loading configuration
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// Payload does not have the expected shape
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// JSON parsing error
    #[error("JSON parse error: {0}")]
    JsonParse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for ExtractorError {
    fn from(e: serde_json::Error) -> Self {
        ExtractorError::JsonParse(e.to_string())
    }
}
