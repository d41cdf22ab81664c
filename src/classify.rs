//! Defines the classification handler: detect labels for a newly
//! created object and persist them as a metadata record.

use crate::capability::{LabelDetector, MetadataStore, ObjectStore};
use crate::error::HandlerError;
use crate::keys;
use crate::response::Response;
use crate::trigger::ObjectRef;
use tracing::{debug, info, instrument};

/// Classifies source objects through an injected label-detection
/// capability and stores the resulting label set, one record per
/// source key, replaced wholesale on every run.
pub struct ClassifyHandler<S, D, M> {
    store: S,
    detector: D,
    metadata: M,
    table: String,
    max_labels: i32,
}

impl<S: ObjectStore, D: LabelDetector, M: MetadataStore> ClassifyHandler<S, D, M> {
    pub fn new(store: S, detector: D, metadata: M, table: String, max_labels: i32) -> Self {
        Self {
            store,
            detector,
            metadata,
            table,
            max_labels,
        }
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
        // Existence check; the detector reads the object by reference.
        let bytes = self.store.fetch(&object.bucket, &object.key).await?;
        debug!(size = bytes.len(), "Fetched source object");
        let labels = self
            .detector
            .detect_labels(&object.bucket, &object.key, self.max_labels)
            .await?;
        let names: Vec<String> = labels.into_iter().map(|label| label.name).collect();
        self.metadata
            .put_labels(&self.table, &object.key, &names)
            .await?;
        info!(labels = names.len(), "Stored label record");
        Ok(Response::ok(format!(
            "Image categorized with labels: {:?}",
            names
        )))
    }
}
