//! Low-level parsing helpers shared by the payload detector and strategies
//!
//! Every helper here either returns `Result`/`Option` or a borrowed slice; none
//! of them panic on malformed input.

use crate::error::ExtractorError;
use once_cell::sync::Lazy;
use plantid_domain::RecognitionInfo;
use regex::Regex;
use serde_json::Value;

/// Start of an event-stream data field
static SSE_DATA: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^[ \t]*data:[ \t]?").unwrap());

/// A code-fenced block anywhere in a text, optional language tag
static FENCED_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"```[A-Za-z0-9_+\-]*[ \t]*\r?\n?([\s\S]*?)```").unwrap());

/// First brace pair, shortest match
static BRACE_OBJECT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{[\s\S]*?\}").unwrap());

/// Parse a JSON document
pub(crate) fn parse_json(text: &str) -> Result<Value, ExtractorError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ExtractorError::JsonParse("empty input".to_string()));
    }
    Ok(serde_json::from_str(trimmed)?)
}

/// Parse a `data: <json>` event stream, keeping the last frame that parses.
///
/// Earlier frames are incremental and superseded by later ones. Returns
/// `None` when the text has no data field or no frame is valid JSON.
pub(crate) fn parse_sse(text: &str) -> Option<Value> {
    if !SSE_DATA.is_match(text) {
        return None;
    }

    SSE_DATA
        .split(text)
        .skip(1)
        .map(frame_body)
        .filter(|body| !body.is_empty())
        .filter_map(|body| parse_json(body).ok())
        .last()
}

/// Cut a data segment at the end of its event: a blank line or another
/// event-stream field.
fn frame_body(segment: &str) -> &str {
    let mut offset = 0;
    for line in segment.split_inclusive('\n') {
        let t = line.trim();
        if offset > 0 && (t.is_empty() || is_sse_field(t)) {
            return segment[..offset].trim();
        }
        offset += line.len();
    }
    segment.trim()
}

fn is_sse_field(line: &str) -> bool {
    line.starts_with(':')
        || line.starts_with("event:")
        || line.starts_with("id:")
        || line.starts_with("retry:")
}

/// Strip a leading `data:` prefix (and the whitespace after it)
pub(crate) fn strip_data_prefix(text: &str) -> &str {
    let trimmed = text.trim();
    trimmed
        .strip_prefix("data:")
        .map(str::trim)
        .unwrap_or(trimmed)
}

/// Strip a leading fence marker (with optional language tag) and a trailing fence.
///
/// Text without a leading fence is returned trimmed and otherwise unchanged.
pub(crate) fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.trim_start_matches(|c: char| c.is_ascii_alphanumeric() || "_+-".contains(c));
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

/// Body of the first code-fenced block embedded in a text
pub(crate) fn find_fenced_block(text: &str) -> Option<&str> {
    FENCED_BLOCK
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
}

/// First `{...}` substring, shortest match
pub(crate) fn first_brace_object(text: &str) -> Option<&str> {
    BRACE_OBJECT.find(text).map(|m| m.as_str())
}

/// Map a JSON record onto `RecognitionInfo`.
///
/// Missing keys become empty strings. The common name is read from `name`,
/// falling back to `commonName`.
pub(crate) fn info_from_json(value: &Value) -> Result<RecognitionInfo, ExtractorError> {
    let obj = value
        .as_object()
        .ok_or_else(|| ExtractorError::InvalidFormat("Record is not a JSON object".to_string()))?;

    let field = |key: &str| obj.get(key).map(value_text).unwrap_or_default();

    let mut common_name = field("name");
    if common_name.trim().is_empty() {
        common_name = field("commonName");
    }

    Ok(RecognitionInfo {
        common_name,
        scientific_name: field("scientificName"),
        kind: field("type"),
        classification: field("classification"),
        summary: field("summary"),
        description: field("description"),
        biology: field("biology"),
        textbook: field("textbook"),
    }
    .normalized())
}

/// Render a JSON value as display text
fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(value_text)
            .filter(|s| !s.trim().is_empty())
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}
