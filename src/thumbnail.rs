//! Defines the thumbnail handler: produce a bounded-dimension JPEG
//! derivative of a newly created object.

use crate::capability::ObjectStore;
use crate::error::HandlerError;
use crate::keys::{self, THUMBNAIL_PREFIX};
use crate::raster;
use crate::response::Response;
use crate::trigger::ObjectRef;
use image::GenericImageView;
use tracing::{debug, info, instrument};

/// Quality factor for encoded thumbnails. The size reduction comes
/// from the resize, not the quality setting.
const THUMBNAIL_JPEG_QUALITY: u8 = 75;

/// Derives `thumbnails/<key>` from each source object: a JPEG scaled
/// to fit within a square bounding box, aspect ratio preserved,
/// never upscaled.
pub struct ThumbnailHandler<S> {
    store: S,
    bound: u32,
}

impl<S: ObjectStore> ThumbnailHandler<S> {
    pub fn new(store: S, bound: u32) -> Self {
        Self { store, bound }
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
        let thumbnail = raster::shrink_to_fit(&image, self.bound);
        debug!(
            source = ?image.dimensions(),
            thumbnail = ?thumbnail.dimensions(),
            "Scaled source image"
        );
        let buffer = raster::encode_jpeg(&thumbnail, THUMBNAIL_JPEG_QUALITY)?;
        let target = keys::derived_key(THUMBNAIL_PREFIX, &object.key);
        self.store
            .store(&object.bucket, &target, buffer, "image/jpeg")
            .await?;
        info!(key = %target, "Stored thumbnail");
        Ok(Response::ok(format!("Thumbnail saved to {}", target)))
    }
}
