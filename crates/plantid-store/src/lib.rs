//! plantid Storage Layer
//!
//! Persists the recognition history as a single JSON blob behind the
//! `BlobStore` trait.
//!
//! # Architecture
//!
//! - `HistoryStore`: newest-first, capped, duplicate-suppressing history
//! - `SqliteBlobStore`: key-value table in SQLite
//! - `MemoryBlobStore`: in-process map for tests and ephemeral use
//!
//! Every mutation is a full read-modify-write of the blob. Nothing is cached
//! between calls, so a failed write never leaves a stale in-memory copy.
//!
//! # Examples
//!
//! ```
//! use plantid_domain::RecognitionInfo;
//! use plantid_store::{HistoryStore, SqliteBlobStore};
//!
//! let backend = SqliteBlobStore::new(":memory:").unwrap();
//! let mut history = HistoryStore::with_defaults(backend);
//!
//! let info = RecognitionInfo {
//!     scientific_name: "Ochna integerrima".to_string(),
//!     ..Default::default()
//! };
//! assert!(history.append("file:///mai.jpg", info.clone()).unwrap().is_some());
//! assert!(history.append("file:///mai.jpg", info).unwrap().is_none());
//! assert_eq!(history.list().unwrap().len(), 1);
//! ```

#![warn(missing_docs)]

mod history;
mod memory;
mod record;
mod sqlite;

use thiserror::Error;

pub use history::{HistoryConfig, HistoryStore, DEFAULT_CAPACITY, DEFAULT_HISTORY_KEY};
pub use memory::MemoryBlobStore;
pub use sqlite::SqliteBlobStore;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// History blob could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Backend rejected the operation
    #[error("Backend error: {0}")]
    Backend(String),

    /// Stored data has an unexpected shape
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Invalid history configuration
    #[error("Configuration error: {0}")]
    Config(String),
}
