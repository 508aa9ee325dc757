//! Capture sources.
//!
//! A [`CaptureSource`] is the device side of the pipeline: asked for a still,
//! it returns the raw encoded image bytes. The camera binding it depends on is
//! owned by whoever constructed the source; captures attempted while unbound
//! fail with [`CaptureError::NotBound`].

use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use log::{debug, info};

use crate::error_handling::types::CaptureError;

pub trait CaptureSource: Send + Sync {
    /// Takes one still and returns its bytes.
    fn capture(&self) -> impl Future<Output = Result<Vec<u8>, CaptureError>> + Send;
}

/// Capture source backed by an image file on disk.
///
/// Binding points the source at a file; each capture reads the file's
/// current content, so a camera daemon that keeps overwriting one frame file
/// can drive it directly.
#[derive(Debug, Default)]
pub struct FileCaptureSource {
    bound: Mutex<Option<PathBuf>>,
}

impl FileCaptureSource {
    /// Creates an unbound source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a source already bound to `frame`.
    pub fn bound_to<P: AsRef<Path>>(frame: P) -> Self {
        let source = Self::new();
        source.bind(frame);
        source
    }

    pub fn bind<P: AsRef<Path>>(&self, frame: P) {
        let frame = frame.as_ref().to_path_buf();
        info!("Capture source bound to {}", frame.display());
        *self.bound.lock().unwrap_or_else(|p| p.into_inner()) = Some(frame);
    }

    /// Drops the binding. Captures already reading keep going.
    pub fn unbind(&self) {
        if let Some(frame) = self.bound.lock().unwrap_or_else(|p| p.into_inner()).take() {
            info!("Capture source unbound from {}", frame.display());
        }
    }

    pub fn is_bound(&self) -> bool {
        self.bound.lock().unwrap_or_else(|p| p.into_inner()).is_some()
    }

    fn bound_frame(&self) -> Option<PathBuf> {
        self.bound.lock().unwrap_or_else(|p| p.into_inner()).clone()
    }
}

impl CaptureSource for FileCaptureSource {
    async fn capture(&self) -> Result<Vec<u8>, CaptureError> {
        let frame = self.bound_frame().ok_or(CaptureError::NotBound)?;
        let bytes = tokio::fs::read(&frame)
            .await
            .map_err(CaptureError::DeviceError)?;
        if bytes.is_empty() {
            return Err(CaptureError::EmptyArtifact);
        }
        debug!("Captured {} byte(s) from {}", bytes.len(), frame.display());
        Ok(bytes)
    }
}
