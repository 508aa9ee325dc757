use crate::configuration::Config;
use crate::data_capture::{CaptureRecorder, FileCaptureSource};
use crate::error_handling::types::*;
use crate::location::{LocationProvider, StaticLocationSource};
use crate::network::HttpUploadClient;
use crate::pipeline::{PipelineCoordinator, PipelineOptions, RunOutcome};
use crate::storage::{ArtifactStorage, FileArtifactStore};
use crate::web_interface::UploadReceiver;
use log::{error, info};
use std::path::Path;
use std::sync::Arc;

pub type FileCoordinator =
    PipelineCoordinator<FileCaptureSource, StaticLocationSource, HttpUploadClient>;

/// Wires a validated [`Config`] into running components.
pub struct Controller {
    pub config: Config,
}

impl Controller {
    pub fn new(config: Config) -> Result<Self, ControllerError> {
        info!("Creating controller");
        config.validate().map_err(|err| {
            error!("Invalid configuration: {}", err);
            ControllerError::ConfigurationError(err)
        })?;
        Ok(Self { config })
    }

    fn artifact_store(&self) -> Result<Arc<dyn ArtifactStorage>, ControllerError> {
        let store = match self.config.storage.artifact_dir {
            Some(ref dir) => FileArtifactStore::new(dir)?,
            None => FileArtifactStore::new_default()?,
        };
        Ok(Arc::new(store))
    }

    /// Builds a coordinator whose capture source is bound to `frame`.
    pub fn build_coordinator(&self, frame: &Path) -> Result<FileCoordinator, ControllerError> {
        let recorder =
            CaptureRecorder::new(FileCaptureSource::bound_to(frame), self.artifact_store()?);
        let locator = LocationProvider::new(
            StaticLocationSource::new(self.config.static_fix()),
            self.config.location_timeout(),
        );
        let uploader =
            HttpUploadClient::new(&self.config.upload.endpoint, self.config.request_timeout())?;
        let options = PipelineOptions {
            prefetch_location: self.config.pipeline.prefetch_location,
            retention: self.config.storage.retention,
        };
        Ok(PipelineCoordinator::new(recorder, locator, uploader, options))
    }

    /// Captures `frame`, tags it and uploads it; returns the run's outcome.
    ///
    /// The camera binding lives exactly as long as the run.
    pub async fn capture(&self, frame: &Path) -> Result<RunOutcome, ControllerError> {
        let coordinator = Arc::new(self.build_coordinator(frame)?);
        let outcome = coordinator.spawn_run().outcome().await;
        coordinator.recorder().source().unbind();
        outcome.ok_or(ControllerError::RunAbandoned)
    }

    /// Runs the local upload receiver until the process stops.
    pub async fn serve_receiver(&self) -> Result<(), ControllerError> {
        let receiver = UploadReceiver::from_config(&self.config.receiver)?;
        receiver.start().await?;
        Ok(())
    }
}
