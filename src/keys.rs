//! Defines the derived-key namespaces. A derived key is a pure
//! function of the source key and the derivation kind, which is what
//! makes reprocessing an idempotent overwrite.

/// Namespace prefix for thumbnail derivatives.
pub const THUMBNAIL_PREFIX: &str = "thumbnails/";

/// Namespace prefix for compressed derivatives.
pub const COMPRESSED_PREFIX: &str = "compressed/";

/// Compute the derived key for a source key under a namespace prefix.
pub fn derived_key(prefix: &str, source_key: &str) -> String {
    format!("{}{}", prefix, source_key)
}

/// Whether a key already lives in a derived namespace. Derived writes
/// re-trigger the bucket notification, so handlers skip these keys
/// instead of deriving derivatives of derivatives.
pub fn is_derived(key: &str) -> bool {
    key.starts_with(THUMBNAIL_PREFIX) || key.starts_with(COMPRESSED_PREFIX)
}
