//! Input and output types for extraction

use crate::config::Strategy;
use crate::parser::{parse_json, parse_sse, strip_data_prefix};
use plantid_domain::RecognitionInfo;
use serde_json::{json, Value};
use std::borrow::Cow;

/// A recognition response as handed to the extractor
#[derive(Debug, Clone, PartialEq)]
pub enum RawResponse {
    /// Response body text of unknown shape
    Text(String),
    /// Already-parsed JSON
    Object(Value),
}

impl From<&str> for RawResponse {
    fn from(s: &str) -> Self {
        RawResponse::Text(s.to_string())
    }
}

impl From<String> for RawResponse {
    fn from(s: String) -> Self {
        RawResponse::Text(s)
    }
}

impl From<Value> for RawResponse {
    fn from(v: Value) -> Self {
        RawResponse::Object(v)
    }
}

/// Shape of the payload, detected once at the input boundary
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// A single JSON document (normally the `content.parts` envelope)
    EnvelopeJson(Value),
    /// Last parseable frame of a `data: <json>` event stream
    SseStream(Value),
    /// Text that is not JSON at all
    PlainText(String),
}

/// Payload shape without its contents, for logs and traces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadKind {
    /// See [`Payload::EnvelopeJson`]
    EnvelopeJson,
    /// See [`Payload::SseStream`]
    SseStream,
    /// See [`Payload::PlainText`]
    PlainText,
}

/// Field names that mark a bare record object
const RECORD_KEYS: [&str; 3] = ["name", "commonName", "scientificName"];

impl Payload {
    /// Normalize a raw response into one of the known shapes.
    ///
    /// Text is tried as an event stream first (last parseable frame wins),
    /// then as JSON with any leading `data:` stripped, and is otherwise kept
    /// verbatim for the text strategies.
    pub fn detect(raw: RawResponse) -> Self {
        let text = match raw {
            RawResponse::Object(value) => return Payload::EnvelopeJson(value),
            RawResponse::Text(text) => text,
        };

        if let Some(value) = parse_sse(&text) {
            return Payload::SseStream(value);
        }

        match parse_json(strip_data_prefix(&text)) {
            Ok(value) => Payload::EnvelopeJson(value),
            Err(_) => Payload::PlainText(text),
        }
    }

    /// Shape of this payload
    pub fn kind(&self) -> PayloadKind {
        match self {
            Payload::EnvelopeJson(_) => PayloadKind::EnvelopeJson,
            Payload::SseStream(_) => PayloadKind::SseStream,
            Payload::PlainText(_) => PayloadKind::PlainText,
        }
    }

    /// The `content.parts` sequence the strategies run over.
    ///
    /// Plain text becomes a single text part. A bare record object (the
    /// oldest backend revision, no envelope) becomes a single JSON text part.
    /// Returns `None` when there is nothing sequence-shaped to work on.
    pub fn parts(&self) -> Option<Cow<'_, [Value]>> {
        let value = match self {
            Payload::PlainText(text) => {
                return Some(Cow::Owned(vec![json!({ "text": text })]));
            }
            Payload::EnvelopeJson(value) | Payload::SseStream(value) => value,
        };

        let obj = value.as_object()?;
        match obj.get("content") {
            Some(content) => content
                .get("parts")
                .and_then(Value::as_array)
                .map(|parts| Cow::Borrowed(parts.as_slice())),
            None if RECORD_KEYS.iter().any(|k| obj.contains_key(*k)) => {
                Some(Cow::Owned(vec![json!({ "text": value.to_string() })]))
            }
            None => None,
        }
    }
}

/// Extraction result with the route it took, for diagnostics
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    /// Normalized record (the sentinel when `strategy` is `None`)
    pub info: RecognitionInfo,

    /// Detected payload shape
    pub payload: PayloadKind,

    /// Strategy that produced `info`, if any
    pub strategy: Option<Strategy>,
}

impl Extraction {
    /// True when no strategy matched and `info` is the sentinel
    pub fn is_sentinel(&self) -> bool {
        self.strategy.is_none()
    }
}
