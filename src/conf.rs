//! Defines configuration as read from the environment.

use anyhow::{Context, Result};
use serde::Deserialize;

/// Default `metadata_table` value.
fn default_metadata_table() -> String {
    String::from("ImageMetadata")
}

/// Default `max_labels` value.
fn default_max_labels() -> i32 {
    10
}

/// Default `thumbnail_bound` value.
fn default_thumbnail_bound() -> u32 {
    128
}

/// Default `jpeg_quality` value.
fn default_jpeg_quality() -> u8 {
    70
}

/// Tunables shared by the derivation handlers. All of them have
/// defaults matching the production deployment, so an empty
/// environment is valid.
#[derive(Debug, Deserialize)]
pub struct Settings {
    /// Name of the table holding one label-set record per source key.
    #[serde(default = "default_metadata_table")]
    pub metadata_table: String,

    /// Upper bound passed to the label-detection capability.
    #[serde(default = "default_max_labels")]
    pub max_labels: i32,

    /// Side of the square bounding box thumbnails must fit within.
    #[serde(default = "default_thumbnail_bound")]
    pub thumbnail_bound: u32,

    /// JPEG quality factor (0-100) used by the compression handler.
    #[serde(default = "default_jpeg_quality")]
    pub jpeg_quality: u8,
}

/// Read settings from the environment.
pub fn load() -> Result<Settings> {
    envy::from_env().context("Failed to read settings from the environment")
}
