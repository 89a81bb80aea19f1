//! Persisted JSON shape of the history blob
//!
//! A JSON array of `{ id, timestamp, image, info }`, newest first, with
//! camelCase field names. Reading is lenient: missing fields default to
//! empty, and entries from the first app revision (`createdAt`, flat
//! `common`/`scientific`) are still understood.

use crate::StoreError;
use plantid_domain::{EntryId, HistoryEntry, RecognitionInfo};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Number, Value};
use tracing::warn;

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct StoredInfo {
    #[serde(default, deserialize_with = "lenient_string")]
    common_name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    scientific_name: String,
    #[serde(rename = "type", default, deserialize_with = "lenient_string")]
    kind: String,
    #[serde(default, deserialize_with = "lenient_string")]
    classification: String,
    #[serde(default, deserialize_with = "lenient_string")]
    summary: String,
    #[serde(default, deserialize_with = "lenient_string")]
    description: String,
    #[serde(default, deserialize_with = "lenient_string")]
    biology: String,
    #[serde(default, deserialize_with = "lenient_string")]
    textbook: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct StoredEntry {
    #[serde(default, deserialize_with = "lenient_string")]
    id: String,
    #[serde(
        default,
        deserialize_with = "lenient_millis",
        skip_serializing_if = "Option::is_none"
    )]
    timestamp: Option<u64>,
    #[serde(default, deserialize_with = "lenient_string")]
    image: String,
    #[serde(default)]
    info: Option<StoredInfo>,

    // First-revision fields, read only
    #[serde(default, deserialize_with = "lenient_millis", skip_serializing)]
    created_at: Option<u64>,
    #[serde(default, skip_serializing)]
    common: Option<String>,
    #[serde(default, skip_serializing)]
    scientific: Option<String>,
}

/// Accept null, numbers and booleans where a string is expected
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s,
        Some(other) => other.to_string(),
    })
}

/// Epoch milliseconds from a number, a numeric string or an RFC 3339 string.
/// Anything else reads as absent.
fn lenient_millis<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => number_millis(&n),
        Some(Value::String(s)) => text_millis(&s),
        _ => None,
    })
}

impl From<StoredInfo> for RecognitionInfo {
    fn from(info: StoredInfo) -> Self {
        RecognitionInfo {
            common_name: info.common_name,
            scientific_name: info.scientific_name,
            kind: info.kind,
            classification: info.classification,
            summary: info.summary,
            description: info.description,
            biology: info.biology,
            textbook: info.textbook,
        }
    }
}

impl From<&RecognitionInfo> for StoredInfo {
    fn from(info: &RecognitionInfo) -> Self {
        StoredInfo {
            common_name: info.common_name.clone(),
            scientific_name: info.scientific_name.clone(),
            kind: info.kind.clone(),
            classification: info.classification.clone(),
            summary: info.summary.clone(),
            description: info.description.clone(),
            biology: info.biology.clone(),
            textbook: info.textbook.clone(),
        }
    }
}

impl From<&HistoryEntry> for StoredEntry {
    fn from(entry: &HistoryEntry) -> Self {
        StoredEntry {
            id: entry.id.to_string(),
            timestamp: Some(entry.timestamp_ms),
            image: entry.image.clone(),
            info: Some(StoredInfo::from(&entry.info)),
            created_at: None,
            common: None,
            scientific: None,
        }
    }
}

impl StoredEntry {
    fn into_entry(self) -> HistoryEntry {
        let timestamp_ms = self.timestamp.or(self.created_at).unwrap_or(0);

        let info = match self.info {
            Some(info) => RecognitionInfo::from(info),
            None => RecognitionInfo {
                common_name: self.common.unwrap_or_default(),
                scientific_name: self.scientific.unwrap_or_default(),
                ..Default::default()
            },
        }
        .normalized();

        let id = match EntryId::from_string(&self.id) {
            Ok(id) => id,
            Err(_) if self.id.trim().is_empty() => EntryId::from_legacy(&format!(
                "{}|{}|{}",
                self.image, info.scientific_name, timestamp_ms
            )),
            Err(_) => EntryId::from_legacy(&self.id),
        };

        HistoryEntry {
            id,
            timestamp_ms,
            image: self.image,
            info,
        }
    }
}

fn number_millis(n: &Number) -> Option<u64> {
    n.as_u64().or_else(|| n.as_f64().and_then(float_millis))
}

fn float_millis(f: f64) -> Option<u64> {
    (f.is_finite() && f >= 0.0).then_some(f as u64)
}

fn text_millis(s: &str) -> Option<u64> {
    let s = s.trim();
    s.parse::<u64>()
        .ok()
        .or_else(|| s.parse::<f64>().ok().and_then(float_millis))
        .or_else(|| iso_millis(s))
}

fn iso_millis(s: &str) -> Option<u64> {
    chrono::DateTime::parse_from_rfc3339(s.trim())
        .ok()
        .map(|dt| dt.timestamp_millis().max(0) as u64)
}

/// A decoded history blob.
///
/// Items that could not be read are kept verbatim so that writing the list
/// back never loses them.
#[derive(Debug, Default, PartialEq)]
pub(crate) struct DecodedHistory {
    /// Readable entries, in stored order
    pub entries: Vec<HistoryEntry>,
    /// Unreadable items, in stored order
    pub unreadable: Vec<Value>,
}

/// Decode the persisted blob.
pub(crate) fn decode_history(blob: &str) -> Result<DecodedHistory, StoreError> {
    if blob.trim().is_empty() {
        return Ok(DecodedHistory::default());
    }

    let items = match serde_json::from_str::<Value>(blob)? {
        Value::Array(items) => items,
        Value::Null => return Ok(DecodedHistory::default()),
        other => {
            return Err(StoreError::InvalidData(format!(
                "history blob must be a JSON array, found {}",
                json_kind(&other)
            )))
        }
    };

    let mut decoded = DecodedHistory::default();
    for (idx, item) in items.into_iter().enumerate() {
        match StoredEntry::deserialize(&item) {
            Ok(stored) => decoded.entries.push(stored.into_entry()),
            Err(e) => {
                warn!("Keeping unreadable history item {} as is: {}", idx, e);
                decoded.unreadable.push(item);
            }
        }
    }

    Ok(decoded)
}

/// Encode entries, in the given order, as the persisted blob. Unreadable
/// items are written unchanged after them.
pub(crate) fn encode_history(
    entries: &[HistoryEntry],
    unreadable: &[Value],
) -> Result<String, StoreError> {
    let mut items = entries
        .iter()
        .map(|entry| serde_json::to_value(StoredEntry::from(entry)))
        .collect::<Result<Vec<_>, _>>()?;
    items.extend(unreadable.iter().cloned());
    Ok(serde_json::to_string(&items)?)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
