//! Core Extractor implementation

use crate::config::ExtractorConfig;
use crate::types::{Extraction, Payload, PayloadKind, RawResponse};
use plantid_domain::RecognitionInfo;
use tracing::{debug, info, warn};

/// Turns a recognition response of any known shape into a `RecognitionInfo`
#[derive(Debug, Clone, Default)]
pub struct ResponseExtractor {
    config: ExtractorConfig,
}

impl ResponseExtractor {
    /// Create a new ResponseExtractor
    pub fn new(config: ExtractorConfig) -> Self {
        Self { config }
    }

    /// Active configuration
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Extract a record from a raw response.
    ///
    /// Never fails: when no strategy finds data the sentinel record (only
    /// `summary` set to the configured "no matching data" text) is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use plantid_extractor::ResponseExtractor;
    ///
    /// let extractor = ResponseExtractor::default();
    /// let info = extractor.extract(
    ///     r#"{"content":{"parts":[{"text":"{\"name\":\"Mai vàng\"}"}]}}"#,
    /// );
    /// assert_eq!(info.common_name, "Mai vàng");
    /// ```
    pub fn extract(&self, raw: impl Into<RawResponse>) -> RecognitionInfo {
        self.extract_with_trace(raw).info
    }

    /// Same as [`extract`](Self::extract), also reporting the payload shape
    /// and the strategy that matched
    pub fn extract_with_trace(&self, raw: impl Into<RawResponse>) -> Extraction {
        let raw = raw.into();

        if let RawResponse::Text(text) = &raw {
            if text.len() > self.config.max_input_length {
                warn!(
                    "Response of {} bytes exceeds max_input_length {}, not parsing",
                    text.len(),
                    self.config.max_input_length
                );
                return self.sentinel(PayloadKind::PlainText);
            }
        }

        let payload = Payload::detect(raw);
        let kind = payload.kind();
        debug!("Detected payload shape {:?}", kind);

        let Some(parts) = payload.parts() else {
            warn!("Payload has no content.parts sequence, returning no-data record");
            return self.sentinel(kind);
        };

        for strategy in &self.config.strategies {
            match strategy.apply(&parts, &self.config) {
                Some(found) => {
                    info!(
                        "Extracted '{}' using {} strategy",
                        found.scientific_name,
                        strategy.name()
                    );
                    return Extraction {
                        info: found,
                        payload: kind,
                        strategy: Some(*strategy),
                    };
                }
                None => debug!("Strategy {} found nothing", strategy.name()),
            }
        }

        warn!("No strategy matched {} part(s), returning no-data record", parts.len());
        self.sentinel(kind)
    }

    fn sentinel(&self, payload: PayloadKind) -> Extraction {
        Extraction {
            info: RecognitionInfo::no_data(self.config.no_data_summary.clone()),
            payload,
            strategy: None,
        }
    }
}
