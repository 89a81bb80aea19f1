//! History entries - persisted recognition observations

use crate::RecognitionInfo;
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// Unique identifier for a history entry based on UUIDv7
///
/// UUIDv7 keeps identifiers roughly sortable by creation time and needs no
/// coordination to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntryId(u128);

impl EntryId {
    /// Generate a new UUIDv7-based EntryId
    ///
    /// # Examples
    ///
    /// ```
    /// use plantid_domain::EntryId;
    ///
    /// let id = EntryId::new();
    /// assert!(id.value() > 0);
    /// ```
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7().as_u128())
    }

    /// Create an EntryId from a raw u128 value
    pub fn from_value(value: u128) -> Self {
        Self(value)
    }

    /// Parse an EntryId from its hyphenated string form
    ///
    /// Any valid UUID is accepted, so ids written by older clients (v4)
    /// still round-trip.
    ///
    /// # Examples
    ///
    /// ```
    /// use plantid_domain::EntryId;
    ///
    /// let id = EntryId::new();
    /// let parsed = EntryId::from_string(&id.to_string()).unwrap();
    /// assert_eq!(id, parsed);
    /// ```
    pub fn from_string(s: &str) -> Result<Self, String> {
        uuid::Uuid::parse_str(s.trim())
            .map(|u| Self(u.as_u128()))
            .map_err(|e| format!("Invalid entry id: {}", e))
    }

    /// Stable id for a stored entry whose id is not a UUID.
    ///
    /// The same legacy string always maps to the same id, so such entries can
    /// still be looked up and removed.
    pub fn from_legacy(s: &str) -> Self {
        Self(uuid::Uuid::new_v5(&uuid::Uuid::NAMESPACE_OID, s.as_bytes()).as_u128())
    }

    /// Get the raw u128 value
    pub fn value(&self) -> u128 {
        self.0
    }
}

impl Default for EntryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", uuid::Uuid::from_u128(self.0))
    }
}

/// Where a recognition result came from.
///
/// Only live results are recorded; replaying a stored entry for display must
/// never write it back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Fresh response from the recognition service
    Live,
    /// Re-display of an existing history entry
    Replay,
}

/// A persisted observation: the photo reference plus what was recognized.
///
/// Entries are immutable once created; the only other mutation of the
/// history is removal by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    /// Unique identifier
    pub id: EntryId,

    /// Creation instant, milliseconds since the Unix epoch
    pub timestamp_ms: u64,

    /// Opaque reference to the photo (URI string)
    pub image: String,

    /// Extracted record, owned by this entry
    pub info: RecognitionInfo,
}

impl HistoryEntry {
    /// Create a new entry stamped with a fresh id and the current time
    pub fn new(image: impl Into<String>, info: RecognitionInfo) -> Self {
        Self {
            id: EntryId::new(),
            timestamp_ms: now_millis(),
            image: image.into(),
            info,
        }
    }

    /// True when this entry records the same observation: same scientific
    /// name and same image reference.
    pub fn is_same_observation(&self, image: &str, scientific_name: &str) -> bool {
        self.image == image && self.info.scientific_name == scientific_name
    }
}

/// Current time in milliseconds since the Unix epoch
pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
