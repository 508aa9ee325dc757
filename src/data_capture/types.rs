//! Common data types used across the data_capture subsystem.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

/// A captured artifact, persisted locally and held in memory for the rest of
/// its pipeline run.
///
/// Read-only once created. Consumed by the run that produced it; dropping it
/// releases the in-memory copy while the stored file stays behind.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureResult {
    path: PathBuf,
    captured_at: DateTime<Utc>,
    artifact: Vec<u8>,
}

impl CaptureResult {
    pub(crate) fn new(path: PathBuf, captured_at: DateTime<Utc>, artifact: Vec<u8>) -> Self {
        Self {
            path,
            captured_at,
            artifact,
        }
    }

    /// Where the artifact was written.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn captured_at(&self) -> DateTime<Utc> {
        self.captured_at
    }

    /// Raw artifact bytes.
    pub fn artifact(&self) -> &[u8] {
        &self.artifact
    }
}
