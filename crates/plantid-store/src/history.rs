//! Recognition history over a key-value blob

use crate::record::{decode_history, encode_history, DecodedHistory};
use crate::StoreError;
use plantid_domain::traits::BlobStore;
use plantid_domain::{EntryId, HistoryEntry, Origin, RecognitionInfo};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Key the history blob is stored under
pub const DEFAULT_HISTORY_KEY: &str = "recognitionHistory";

/// Maximum number of retained entries
pub const DEFAULT_CAPACITY: usize = 100;

/// History persistence settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Blob key inside the backend
    pub key: String,

    /// Retention cap; the oldest entries beyond it are dropped on append
    pub capacity: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            key: DEFAULT_HISTORY_KEY.to_string(),
            capacity: DEFAULT_CAPACITY,
        }
    }
}

impl HistoryConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), StoreError> {
        if self.key.trim().is_empty() {
            return Err(StoreError::Config("history key must not be empty".to_string()));
        }
        if self.capacity == 0 {
            return Err(StoreError::Config(
                "history capacity must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Newest-first, capped list of recognition observations
///
/// The store keeps no copy of the list. Every call reads the blob, and every
/// mutation writes the whole list back, so a failed write leaves the
/// previously persisted state as the only state.
///
/// Stored items that cannot be read are not listed, but are written back
/// unchanged after the readable entries and do not count toward the cap.
///
/// Concurrent writers on the same backend are not coordinated.
pub struct HistoryStore<B> {
    backend: B,
    config: HistoryConfig,
}

impl<B> HistoryStore<B>
where
    B: BlobStore,
    StoreError: From<B::Error>,
{
    /// Create a store after validating `config`
    pub fn new(backend: B, config: HistoryConfig) -> Result<Self, StoreError> {
        config.validate()?;
        Ok(Self { backend, config })
    }

    /// Create a store with the default key and capacity
    pub fn with_defaults(backend: B) -> Self {
        Self {
            backend,
            config: HistoryConfig::default(),
        }
    }

    /// Active configuration
    pub fn config(&self) -> &HistoryConfig {
        &self.config
    }

    /// All persisted entries, newest first
    pub fn list(&self) -> Result<Vec<HistoryEntry>, StoreError> {
        Ok(self.load()?.entries)
    }

    /// Record a new observation.
    ///
    /// Returns `None` without writing when the record has no scientific name
    /// or the same `(scientific name, image)` pair is already stored.
    pub fn append(
        &mut self,
        image: &str,
        info: RecognitionInfo,
    ) -> Result<Option<HistoryEntry>, StoreError> {
        let info = info.normalized();
        if !info.has_scientific_name() {
            debug!("Not recording result without a scientific name");
            return Ok(None);
        }

        let mut history = self.load()?;
        if history
            .entries
            .iter()
            .any(|e| e.is_same_observation(image, &info.scientific_name))
        {
            debug!(
                "Already recorded {} for {}",
                info.scientific_name, image
            );
            return Ok(None);
        }

        let entry = HistoryEntry::new(image, info);
        history.entries.insert(0, entry.clone());
        history.entries.truncate(self.config.capacity);
        self.write(&history)?;

        info!("Recorded {} ({} entries)", entry.id, history.entries.len());
        Ok(Some(entry))
    }

    /// Record a live result; replays are ignored
    pub fn observe(
        &mut self,
        image: &str,
        info: RecognitionInfo,
        origin: Origin,
    ) -> Result<Option<HistoryEntry>, StoreError> {
        match origin {
            Origin::Live => self.append(image, info),
            Origin::Replay => Ok(None),
        }
    }

    /// Remove the entry with `id`. Returns whether anything was removed;
    /// an absent id is not an error.
    pub fn remove(&mut self, id: EntryId) -> Result<bool, StoreError> {
        let mut history = self.load()?;
        let before = history.entries.len();
        history.entries.retain(|e| e.id != id);

        if history.entries.len() == before {
            debug!("No history entry {}", id);
            return Ok(false);
        }

        self.write(&history)?;
        info!("Removed {}", id);
        Ok(true)
    }

    /// Entries whose common or scientific name contains `query`,
    /// case-insensitively, in stored order
    pub fn search(&self, query: &str) -> Result<Vec<HistoryEntry>, StoreError> {
        let mut entries = self.list()?;
        entries.retain(|e| e.info.matches_query(query));
        Ok(entries)
    }

    /// Look up a single entry without modifying anything
    pub fn get(&self, id: EntryId) -> Result<Option<HistoryEntry>, StoreError> {
        Ok(self.list()?.into_iter().find(|e| e.id == id))
    }

    /// Delete the whole history
    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.backend.delete(&self.config.key)?;
        info!("Cleared history");
        Ok(())
    }

    /// Borrow the backend
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Mutably borrow the backend
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Consume the store, returning the backend
    pub fn into_inner(self) -> B {
        self.backend
    }

    fn load(&self) -> Result<DecodedHistory, StoreError> {
        match self.backend.get(&self.config.key)? {
            Some(blob) => decode_history(&blob),
            None => Ok(DecodedHistory::default()),
        }
    }

    fn write(&mut self, history: &DecodedHistory) -> Result<(), StoreError> {
        let blob = encode_history(&history.entries, &history.unreadable)?;
        self.backend.put(&self.config.key, &blob)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryBlobStore;

    fn plant(common: &str, scientific: &str) -> RecognitionInfo {
        RecognitionInfo {
            common_name: common.to_string(),
            scientific_name: scientific.to_string(),
            ..Default::default()
        }
    }

    fn store() -> HistoryStore<MemoryBlobStore> {
        HistoryStore::with_defaults(MemoryBlobStore::new())
    }

    #[test]
    fn test_empty_history() {
        assert!(store().list().unwrap().is_empty());
    }

    #[test]
    fn test_append_prepends() {
        let mut history = store();
        history
            .append("file:///a.jpg", plant("Mai vàng", "Ochna integerrima"))
            .unwrap();
        history
            .append("file:///b.jpg", plant("Hoa sen", "Nelumbo nucifera"))
            .unwrap();

        let entries = history.list().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].info.scientific_name, "Nelumbo nucifera");
        assert_eq!(entries[1].info.scientific_name, "Ochna integerrima");
    }

    #[test]
    fn test_append_rejects_missing_scientific_name() {
        let mut history = store();
        assert!(history
            .append("file:///a.jpg", plant("Mai vàng", "   "))
            .unwrap()
            .is_none());
        assert!(history.backend().get(DEFAULT_HISTORY_KEY).unwrap().is_none());
    }

    #[test]
    fn test_append_normalizes_before_duplicate_check() {
        let mut history = store();
        history
            .append("file:///a.jpg", plant("Mai vàng", "Ochna integerrima"))
            .unwrap();
        let again = history
            .append("file:///a.jpg", plant("Mai", "  Ochna integerrima\n"))
            .unwrap();

        assert!(again.is_none());
        assert_eq!(history.list().unwrap().len(), 1);
    }

    #[test]
    fn test_same_species_different_image_is_kept() {
        let mut history = store();
        history
            .append("file:///a.jpg", plant("Mai vàng", "Ochna integerrima"))
            .unwrap();
        history
            .append("file:///b.jpg", plant("Mai vàng", "Ochna integerrima"))
            .unwrap();
        assert_eq!(history.list().unwrap().len(), 2);
    }

    #[test]
    fn test_capacity_from_config() {
        let config = HistoryConfig {
            capacity: 2,
            ..Default::default()
        };
        let mut history = HistoryStore::new(MemoryBlobStore::new(), config).unwrap();
        for i in 0..3 {
            history
                .append(&format!("file:///{}.jpg", i), plant("", &format!("Species {}", i)))
                .unwrap();
        }

        let names: Vec<_> = history
            .list()
            .unwrap()
            .into_iter()
            .map(|e| e.info.scientific_name)
            .collect();
        assert_eq!(names, vec!["Species 2", "Species 1"]);
    }

    #[test]
    fn test_observe_replay_is_noop() {
        let mut history = store();
        let recorded = history
            .observe("file:///a.jpg", plant("Mai vàng", "Ochna integerrima"), Origin::Replay)
            .unwrap();
        assert!(recorded.is_none());
        assert!(history.list().unwrap().is_empty());

        let recorded = history
            .observe("file:///a.jpg", plant("Mai vàng", "Ochna integerrima"), Origin::Live)
            .unwrap();
        assert!(recorded.is_some());
    }

    #[test]
    fn test_remove_and_get() {
        let mut history = store();
        let entry = history
            .append("file:///a.jpg", plant("Mai vàng", "Ochna integerrima"))
            .unwrap()
            .unwrap();

        assert_eq!(history.get(entry.id).unwrap(), Some(entry.clone()));
        assert!(history.remove(entry.id).unwrap());
        assert!(!history.remove(entry.id).unwrap());
        assert_eq!(history.get(entry.id).unwrap(), None);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let mut history = store();
        history
            .append("file:///a.jpg", plant("Mai vàng", "Ochna integerrima"))
            .unwrap();
        history
            .append("file:///b.jpg", plant("Hoa sen", "Nelumbo nucifera"))
            .unwrap();

        let hits = history.search("OCHNA").unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].info.common_name, "Mai vàng");
        assert_eq!(history.search("sen").unwrap().len(), 1);
        assert_eq!(history.search("").unwrap().len(), 2);
        assert!(history.search("rosa").unwrap().is_empty());
    }

    #[test]
    fn test_clear() {
        let mut history = store();
        history
            .append("file:///a.jpg", plant("Mai vàng", "Ochna integerrima"))
            .unwrap();
        history.clear().unwrap();
        assert!(history.list().unwrap().is_empty());
    }

    #[test]
    fn test_config_validation() {
        assert!(HistoryConfig::default().validate().is_ok());
        let zero = HistoryConfig {
            capacity: 0,
            ..Default::default()
        };
        assert!(matches!(zero.validate(), Err(StoreError::Config(_))));
        let blank = HistoryConfig {
            key: " ".to_string(),
            ..Default::default()
        };
        assert!(HistoryStore::new(MemoryBlobStore::new(), blank).is_err());
    }
}
