//! Capture recording for a single pipeline run.
//!
//! `CaptureRecorder` ties a [`CaptureSource`] to an injected
//! [`ArtifactStorage`]: it takes one still, stamps it with the capture
//! instant, writes it to local storage and hands back a [`CaptureResult`].
//! The stored file outlives the run whatever happens to the upload.
//!
//! Minimal usage
//! ```no_run
//! use std::sync::Arc;
//! use geosnap::data_capture::{CaptureRecorder, FileCaptureSource};
//! use geosnap::storage::{ArtifactStorage, FileArtifactStore};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let storage: Arc<dyn ArtifactStorage> = Arc::new(FileArtifactStore::new("/tmp/geosnap")?);
//! let recorder = CaptureRecorder::new(FileCaptureSource::bound_to("/tmp/frame.jpg"), storage);
//! let capture = recorder.record().await?;
//! println!("stored {}", capture.path().display());
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use chrono::Utc;
use log::{debug, info};

use crate::error_handling::types::CaptureError;
use crate::storage::ArtifactStorage;

use super::capture_source::CaptureSource;
use super::types::CaptureResult;

pub struct CaptureRecorder<C> {
    source: C,
    storage: Arc<dyn ArtifactStorage>,
}

impl<C: CaptureSource> CaptureRecorder<C> {
    pub fn new(source: C, storage: Arc<dyn ArtifactStorage>) -> Self {
        Self { source, storage }
    }

    pub fn source(&self) -> &C {
        &self.source
    }

    pub fn storage(&self) -> &Arc<dyn ArtifactStorage> {
        &self.storage
    }

    /// Captures one artifact and persists it.
    ///
    /// Errors
    /// - Whatever the source reports ([`CaptureError::NotBound`],
    ///   [`CaptureError::DeviceError`], [`CaptureError::EmptyArtifact`]).
    /// - [`CaptureError::StorageError`] if the artifact cannot be written.
    pub async fn record(&self) -> Result<CaptureResult, CaptureError> {
        let artifact = self.source.capture().await?;
        let captured_at = Utc::now();
        let path = self.storage.save_artifact(&artifact, captured_at)?;
        info!(
            "Recorded capture: {} byte(s) at {} -> {}",
            artifact.len(),
            captured_at.to_rfc3339(),
            path.display()
        );
        debug!("Capture timestamp millis={}", captured_at.timestamp_millis());
        Ok(CaptureResult::new(path, captured_at, artifact))
    }
}
