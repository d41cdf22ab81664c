//! Defines the external capabilities handlers depend on, as traits
//! injected at construction time. The production implementations live
//! in [`crate::client`]; tests substitute in-memory doubles.

use crate::error::HandlerError;

/// One label returned by the detection capability. Only the name is
/// retained downstream; the confidence is kept for logging.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectedLabel {
    pub name: String,
    pub confidence: f32,
}

/// Binary object storage. Both sources and derived artifacts live
/// here; derived writes are wholesale overwrites.
pub trait ObjectStore {
    /// Fetch the full contents of an object, or
    /// [`HandlerError::ObjectNotFound`] if the key doesn't exist.
    async fn fetch(&self, bucket: &str, key: &str) -> Result<Vec<u8>, HandlerError>;

    /// Write an object, replacing whatever is at the key.
    async fn store(
        &self,
        bucket: &str,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), HandlerError>;
}

/// Label detection over an object already in storage. Opaque; the
/// capability reads the object by reference, not by value.
pub trait LabelDetector {
    async fn detect_labels(
        &self,
        bucket: &str,
        key: &str,
        max_labels: i32,
    ) -> Result<Vec<DetectedLabel>, HandlerError>;
}

/// The metadata record store. One record per source key, replaced
/// unconditionally on every write.
pub trait MetadataStore {
    async fn put_labels(
        &self,
        table: &str,
        key: &str,
        labels: &[String],
    ) -> Result<(), HandlerError>;
}
