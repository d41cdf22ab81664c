//! Defines the compression handler: re-encode a newly created object
//! at reduced quality without touching its dimensions.

use crate::capability::ObjectStore;
use crate::error::HandlerError;
use crate::keys::{self, COMPRESSED_PREFIX};
use crate::raster;
use crate::response::Response;
use crate::trigger::ObjectRef;
use tracing::{debug, info, instrument};

/// Derives `compressed/<key>` from each source object: the same
/// raster re-encoded as JPEG at a reduced quality factor.
pub struct CompressHandler<S> {
    store: S,
    quality: u8,
}

impl<S: ObjectStore> CompressHandler<S> {
    pub fn new(store: S, quality: u8) -> Self {
        Self { store, quality }
    }

    /// Handle one invocation trigger.
    #[instrument(skip(self))]
    pub async fn handle(&self, object: &ObjectRef) -> Result<Response, HandlerError> {
        if keys::is_derived(&object.key) {
            info!("Skipping object in a derived namespace");
            return Ok(Response::ok(format!(
                "Skipped derived object {}",
                object.key
            )));
        }
        let bytes = self.store.fetch(&object.bucket, &object.key).await?;
        let image = raster::decode(&object.key, &bytes)?;
        let buffer = raster::encode_jpeg(&image, self.quality)?;
        debug!(
            original = bytes.len(),
            compressed = buffer.len(),
            "Re-encoded source image"
        );
        let target = keys::derived_key(COMPRESSED_PREFIX, &object.key);
        self.store
            .store(&object.bucket, &target, buffer, "image/jpeg")
            .await?;
        info!(key = %target, "Stored compressed image");
        Ok(Response::ok(format!("Compressed image saved to {}", target)))
    }
}
