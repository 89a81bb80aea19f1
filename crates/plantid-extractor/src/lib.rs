//! plantid Extractor
//!
//! Converts a recognition-service response of unknown shape into a
//! normalized `RecognitionInfo`.
//!
//! # Overview
//!
//! The backend's response format changed over time: a bare JSON record, the
//! `content.parts` envelope with tool-call data, and finally an event stream
//! whose text part carries code-fenced JSON. Models also sometimes answer in
//! prose with Vietnamese field labels. All of these are still accepted.
//!
//! # Architecture
//!
//! ```text
//! raw → Payload::detect → content.parts → [FencedJson, FunctionResponse,
//!       InlineJson, LabeledText] → first Some → RecognitionInfo
//! ```
//!
//! Parse failures never escape: every strategy either yields data or yields
//! nothing, and when all of them yield nothing the sentinel record is
//! returned.
//!
//! # Example Usage
//!
//! ```
//! use plantid_extractor::{ExtractorConfig, ResponseExtractor};
//!
//! let extractor = ResponseExtractor::new(ExtractorConfig::default());
//!
//! let stream = "data: {\"content\":{\"parts\":[{\"text\":\"```json\\n{\\\"name\\\":\\\"Mai vàng\\\",\\\"scientificName\\\":\\\"Ochna integerrima\\\"}\\n```\"}]}}";
//! let info = extractor.extract(stream);
//!
//! assert_eq!(info.common_name, "Mai vàng");
//! assert_eq!(info.scientific_name, "Ochna integerrima");
//! assert_eq!(info.kind, "");
//! ```

#![warn(missing_docs)]

mod error;
mod config;
mod types;
mod parser;
mod strategies;
mod extractor;
pub mod labels;


pub use error::ExtractorError;
pub use config::{ExtractorConfig, Strategy, NO_DATA_SUMMARY};
pub use types::{Extraction, Payload, PayloadKind, RawResponse};
pub use extractor::ResponseExtractor;
