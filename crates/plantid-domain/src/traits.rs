//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Infrastructure implementations live in other crates.

/// Coarse-grained key-value persistence holding whole serialized blobs
///
/// Implemented by the infrastructure layer (plantid-store). Values are
/// replaced wholesale; there is no partial update.
pub trait BlobStore {
    /// Error type for store operations
    type Error;

    /// Read the blob stored under `key`, if any
    fn get(&self, key: &str) -> Result<Option<String>, Self::Error>;

    /// Replace the blob stored under `key`
    fn put(&mut self, key: &str, value: &str) -> Result<(), Self::Error>;

    /// Remove the blob stored under `key`; absent keys are not an error
    fn delete(&mut self, key: &str) -> Result<(), Self::Error>;
}

/// Trait for the remote recognition service
///
/// Implemented by the infrastructure layer (plantid-client)
pub trait RecognitionClient {
    /// Error type for recognition calls
    type Error;

    /// Submit a base64-encoded JPEG and return the raw response body
    fn recognize(&self, image_base64: &str) -> Result<String, Self::Error>;
}
