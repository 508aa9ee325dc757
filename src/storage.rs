//! Storage subsystem
//!
//! This module persists captured artifacts to an application-private
//! directory and reclaims them according to the configured retention policy.
//!
//! Components:
//! - `storage_trait`: the `ArtifactStorage` trait defining a uniform API.
//! - `types`: retention policy and the location sidecar record.
//! - `file_storage`: filesystem-backed implementation.

pub mod file_storage;
pub mod storage_trait;
pub mod types;

pub use file_storage::FileArtifactStore;
pub use storage_trait::ArtifactStorage;
pub use types::{LocationSidecar, RetentionPolicy};
