use super::types::*;
use crate::error_handling::types::ConfigError;
use crate::location::Coordinates;
use crate::network::upload_client::parse_endpoint;
use clap::Args;
use log::debug;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Application configuration structure that defines all runtime parameters.
///
/// Loaded from a TOML file, then optionally adjusted from the command line
/// through [`ConfigOverrides`]. Only `upload.endpoint` is mandatory.
///
/// ```toml
/// [upload]
/// endpoint = "https://example.org/upload"
/// request_timeout_secs = 30
///
/// [location]
/// timeout_ms = 5000
/// latitude = 40.4433
/// longitude = -79.9436
///
/// [storage]
/// artifact_dir = "/var/lib/geosnap/artifacts"
/// retention = "keep"            # or "delete_on_success"
///
/// [pipeline]
/// prefetch_location = false
///
/// [receiver]
/// bind_address = "127.0.0.1"
/// port = 8080
/// received_dir = "/var/lib/geosnap/received"
/// max_body_bytes = 33554432
/// ```
///
/// # Fields Overview
///
/// - `upload`: where artifacts are posted and how long one attempt may take
/// - `location`: how long to wait for a fix, plus an optional fixed position
/// used when no platform location service exists
/// - `storage`: local artifact directory and retention policy
/// - `pipeline`: whether the location query starts alongside the capture
/// - `receiver`: settings for the local upload receiver
#[derive(Debug, PartialEq, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub upload: UploadConfig,
    #[serde(default)]
    pub location: LocationConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub pipeline: PipelineConfig,
    #[serde(default)]
    pub receiver: ReceiverConfig,
}

/// Command-line adjustments applied on top of the configuration file.
#[derive(Args, Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    /// Upload endpoint, replacing `upload.endpoint`
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Fixed latitude in decimal degrees, replacing `location.latitude`
    #[arg(long, requires = "longitude", allow_negative_numbers = true)]
    pub latitude: Option<f64>,

    /// Fixed longitude in decimal degrees, replacing `location.longitude`
    #[arg(long, requires = "latitude", allow_negative_numbers = true)]
    pub longitude: Option<f64>,

    /// Local artifact directory, replacing `storage.artifact_dir`
    #[arg(long)]
    pub artifact_dir: Option<PathBuf>,
}

impl Config {
    /// Reads, parses and validates the TOML file at `path`.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        debug!("Reading configuration from {}", path.display());
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Config =
            toml::from_str(text).map_err(|e| ConfigError::TomlError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Applies command-line overrides and validates the result. On error
    /// `self` is left untouched.
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) -> Result<(), ConfigError> {
        let mut updated = self.clone();
        if let Some(ref endpoint) = overrides.endpoint {
            updated.upload.endpoint = endpoint.clone();
        }
        if let (Some(lat), Some(lon)) = (overrides.latitude, overrides.longitude) {
            updated.location.latitude = Some(lat);
            updated.location.longitude = Some(lon);
        }
        if let Some(ref dir) = overrides.artifact_dir {
            updated.storage.artifact_dir = Some(dir.clone());
        }
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        parse_endpoint(&self.upload.endpoint)
            .map_err(|e| ConfigError::InvalidEndpoint(e.to_string()))?;

        if self.upload.request_timeout_secs == 0 {
            return Err(ConfigError::NotInRange(
                "upload.request_timeout_secs must be greater than 0".into(),
            ));
        }
        if self.location.timeout_ms == 0 {
            return Err(ConfigError::NotInRange(
                "location.timeout_ms must be greater than 0".into(),
            ));
        }

        match (self.location.latitude, self.location.longitude) {
            (Some(lat), Some(lon)) => {
                if !Coordinates::new(lat, lon).is_valid() {
                    return Err(ConfigError::NotInRange(format!(
                        "location ({}, {}) outside [-90, 90] x [-180, 180]",
                        lat, lon
                    )));
                }
            }
            (None, None) => {}
            _ => {
                return Err(ConfigError::IncompleteLocation(
                    "location.latitude and location.longitude must be set together".into(),
                ))
            }
        }

        if let Some(ref dir) = self.storage.artifact_dir {
            if dir.exists() && !dir.is_dir() {
                return Err(ConfigError::DirectoryDoesNotExist(format!(
                    "storage.artifact_dir {} is not a directory",
                    dir.display()
                )));
            }
        }

        if self.receiver.port == 0 {
            return Err(ConfigError::NotInRange(
                "receiver.port must be between 1 and 65535".into(),
            ));
        }
        if self.receiver.max_body_bytes == 0 {
            return Err(ConfigError::NotInRange(
                "receiver.max_body_bytes must be greater than 0".into(),
            ));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.upload.request_timeout_secs)
    }

    pub fn location_timeout(&self) -> Duration {
        Duration::from_millis(self.location.timeout_ms)
    }

    /// The configured fixed position, if any.
    pub fn static_fix(&self) -> Option<Coordinates> {
        match (self.location.latitude, self.location.longitude) {
            (Some(lat), Some(lon)) => Some(Coordinates::new(lat, lon)),
            _ => None,
        }
    }
}
