//! Event-driven image derivative pipeline. Each S3 object creation
//! triggers independent handlers that produce a label record, a
//! thumbnail, or a compressed rendition of the new object. Handlers
//! share no state; every persisted result is an idempotent
//! last-writer-wins overwrite keyed off the source key.

pub mod capability;
pub mod classify;
pub mod client;
pub mod compress;
pub mod conf;
pub mod error;
pub mod keys;
pub mod raster;
pub mod response;
pub mod thumbnail;
pub mod trigger;
