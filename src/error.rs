//! Defines the failure conditions a handler invocation can end in.
//! None of them are retried locally; the invoking substrate owns the
//! redelivery policy.

use thiserror::Error;

/// Terminal failure of a single handler invocation.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// The trigger payload doesn't carry the expected nested fields.
    /// Retrying the same payload cannot succeed.
    #[error("malformed notification: {0}")]
    MalformedNotification(String),

    /// The source object isn't in the bucket (anymore).
    #[error("object {key:?} not found in bucket {bucket:?}")]
    ObjectNotFound { bucket: String, key: String },

    /// The source bytes don't decode as a raster image. Retrying the
    /// same object cannot succeed.
    #[error("object {key:?} is not a decodable image")]
    UnsupportedImageFormat {
        key: String,
        #[source]
        source: image::ImageError,
    },

    /// An external capability call (storage read, label detection,
    /// codec) failed for an opaque upstream reason.
    #[error("capability call failed: {0}")]
    CapabilityError(String),

    /// Writing the derived artifact or metadata record failed.
    #[error("persistence failed: {0}")]
    PersistenceError(String),
}
