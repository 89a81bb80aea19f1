//! plantid Domain Layer
//!
//! Core value types and trait interfaces shared by every other plantid crate.
//! Only depends on `uuid`; serialization formats, HTTP and storage live in
//! the infrastructure crates.
//!
//! ## Key Concepts
//!
//! - **RecognitionInfo**: the normalized biological record extracted from a
//!   recognition response. Every field is always present, possibly empty.
//! - **HistoryEntry**: one persisted observation (image reference + info).
//! - **Origin**: whether a result is a live recognition or a replay of history.
//!
//! ## Architecture
//!
//! - Pure data and rules only
//! - Trait definitions for persistence and the remote recognizer
//! - Implementations live in `plantid-store` and `plantid-client`

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod entry;
pub mod info;
pub mod traits;

// Re-exports for convenience
pub use entry::{now_millis, EntryId, HistoryEntry, Origin};
pub use info::RecognitionInfo;
