//! In-memory blob store

use crate::StoreError;
use plantid_domain::traits::BlobStore;
use std::collections::HashMap;

/// HashMap-backed BlobStore
///
/// Writes can be switched to fail, which lets callers exercise their
/// persistence-error paths.
#[derive(Debug, Clone, Default)]
pub struct MemoryBlobStore {
    values: HashMap<String, String>,
    fail_writes: bool,
}

impl MemoryBlobStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `put`/`delete` fail (or succeed again)
    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    fn check_writable(&self) -> Result<(), StoreError> {
        if self.fail_writes {
            return Err(StoreError::Backend("write rejected".to_string()));
        }
        Ok(())
    }
}

impl BlobStore for MemoryBlobStore {
    type Error = StoreError;

    fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
        Ok(self.values.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: &str) -> Result<(), Self::Error> {
        self.check_writable()?;
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<(), Self::Error> {
        self.check_writable()?;
        self.values.remove(key);
        Ok(())
    }
}
