//! Configuration for the Extractor

use crate::error::ExtractorError;
use serde::{Deserialize, Serialize};

/// Localized "no matching data" summary used by the sentinel record
pub const NO_DATA_SUMMARY: &str = "Không có dữ liệu phù hợp";

/// Extraction strategy, tried in the configured order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// A text part that is (optionally ```-fenced) JSON
    FencedJson,
    /// `functionResponse.response.data` of a tool-call part
    FunctionResponse,
    /// A fenced block, else the first `{...}`, inside the first text part
    InlineJson,
    /// Vietnamese field labels scraped from free text
    LabeledText,
}

impl Strategy {
    /// Canonical order: exact JSON first, scraped text last
    pub const CANONICAL: [Strategy; 4] = [
        Strategy::FencedJson,
        Strategy::FunctionResponse,
        Strategy::InlineJson,
        Strategy::LabeledText,
    ];

    /// Short name used in logs and CLI output
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::FencedJson => "fenced_json",
            Strategy::FunctionResponse => "function_response",
            Strategy::InlineJson => "inline_json",
            Strategy::LabeledText => "labeled_text",
        }
    }
}

/// Configuration for the Extractor
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Summary placed in the sentinel record when nothing matches
    pub no_data_summary: String,

    /// Strategies to try, in order; the first one yielding data wins
    pub strategies: Vec<Strategy>,

    /// Use the whole text as summary when no summary label matched
    pub summary_falls_back_to_text: bool,

    /// Raw inputs longer than this (bytes) are not parsed at all
    pub max_input_length: usize,
}

impl ExtractorConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.strategies.is_empty() {
            return Err("strategies must not be empty".to_string());
        }
        for (idx, strategy) in self.strategies.iter().enumerate() {
            if self.strategies[..idx].contains(strategy) {
                return Err(format!("strategy '{}' listed more than once", strategy.name()));
            }
        }
        if self.max_input_length == 0 {
            return Err("max_input_length must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl Default for ExtractorConfig {
    /// Canonical strategy order with the localized sentinel
    fn default() -> Self {
        Self {
            no_data_summary: NO_DATA_SUMMARY.to_string(),
            strategies: Strategy::CANONICAL.to_vec(),
            summary_falls_back_to_text: true,
            max_input_length: 2_000_000,
        }
    }
}

impl ExtractorConfig {
    /// Strict preset: structured JSON only, never scrape free text
    pub fn strict() -> Self {
        Self {
            strategies: vec![
                Strategy::FencedJson,
                Strategy::FunctionResponse,
                Strategy::InlineJson,
            ],
            summary_falls_back_to_text: false,
            ..Self::default()
        }
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ExtractorError> {
        let config: Self = toml::from_str(toml_str)
            .map_err(|e| ExtractorError::Config(format!("Failed to parse TOML: {}", e)))?;
        config.validate().map_err(ExtractorError::Config)?;
        Ok(config)
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, ExtractorError> {
        toml::to_string_pretty(self)
            .map_err(|e| ExtractorError::Config(format!("Failed to serialize to TOML: {}", e)))
    }
}
