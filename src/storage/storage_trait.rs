//! Storage Trait
//!
//! This module defines the `ArtifactStorage` trait, the interface every
//! artifact backend implements.
//!
//! Implementors of this trait are responsible for:
//! - Writing a captured artifact under a name derived from its capture instant
//! - Reading an artifact back
//! - Removing artifacts the retention policy no longer wants
//!
//! All methods return a `Result` to handle potential storage errors.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::error_handling::types::StorageError;

/// The `ArtifactStorage` trait defines the interface for artifact storage backends.
pub trait ArtifactStorage: Send + Sync {
    /// Persists `data` captured at `captured_at` and returns where it landed.
    ///
    /// Two artifacts captured within the same millisecond share a name; the
    /// later one overwrites the earlier.
    fn save_artifact(&self, data: &[u8], captured_at: DateTime<Utc>)
        -> Result<PathBuf, StorageError>;

    /// Reads a previously saved artifact.
    fn load_artifact(&self, path: &Path) -> Result<Vec<u8>, StorageError>;

    /// Deletes a previously saved artifact.
    fn remove_artifact(&self, path: &Path) -> Result<(), StorageError>;

    /// Lists stored artifacts, oldest first.
    fn list_artifacts(&self) -> Result<Vec<PathBuf>, StorageError>;
}
