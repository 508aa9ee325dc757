use std::fs::{self, File};
use std::io::{ErrorKind, Read, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use log::{debug, error, info, warn};

use crate::error_handling::types::StorageError;
use crate::storage::storage_trait::ArtifactStorage;
use crate::storage::types::LocationSidecar;

pub const ARTIFACT_DIR_ENV: &str = "GEOSNAP_ARTIFACT_DIR";
const DEFAULT_DIR_NAME: &str = "geosnap-artifacts";
const ARTIFACT_EXTENSION: &str = "jpg";
const SIDECAR_EXTENSION: &str = "json";

/// Name of the file an artifact captured at `captured_at` is stored under.
pub fn artifact_file_name(captured_at: DateTime<Utc>) -> String {
    format!("{}.{}", captured_at.timestamp_millis(), ARTIFACT_EXTENSION)
}

pub struct FileArtifactStore {
    base_path: PathBuf,
}

impl FileArtifactStore {
    pub fn new<P: AsRef<Path>>(base_path: P) -> Result<Self, StorageError> {
        let base_path = base_path.as_ref().to_path_buf();
        fs::create_dir_all(&base_path).map_err(|e| {
            error!("Failed to create artifact dir {}: {}", base_path.display(), e);
            StorageError::WriteFailed(format!("{}: {}", base_path.display(), e))
        })?;
        info!("FileArtifactStore initialized at {}", base_path.display());
        Ok(Self { base_path })
    }

    /// Construct a store using env var GEOSNAP_ARTIFACT_DIR if set, otherwise
    /// a `geosnap-artifacts` directory under the current directory.
    pub fn new_default() -> Result<Self, StorageError> {
        if let Ok(dir) = std::env::var(ARTIFACT_DIR_ENV) {
            info!("Using FileArtifactStore from {}: {}", ARTIFACT_DIR_ENV, dir);
            return Self::new(PathBuf::from(dir));
        }
        let cwd = std::env::current_dir().map_err(|e| {
            error!("Failed to get current dir: {}", e);
            StorageError::ReadFailed(e.to_string())
        })?;
        Self::new(cwd.join(DEFAULT_DIR_NAME))
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Writes the location sidecar for an artifact previously saved in this store.
    pub fn save_location_sidecar(
        &self,
        artifact: &Path,
        sidecar: &LocationSidecar,
    ) -> Result<PathBuf, StorageError> {
        let path = artifact.with_extension(SIDECAR_EXTENSION);
        let body = serde_json::to_vec_pretty(sidecar).map_err(|e| {
            error!("Failed to serialize sidecar {}: {}", path.display(), e);
            StorageError::WriteFailed(e.to_string())
        })?;
        write_file(&path, &body)?;
        debug!("Saved location sidecar {}", path.display());
        Ok(path)
    }

    /// Reads back the sidecar written by [`save_location_sidecar`](Self::save_location_sidecar).
    pub fn load_location_sidecar(&self, artifact: &Path) -> Result<LocationSidecar, StorageError> {
        let path = artifact.with_extension(SIDECAR_EXTENSION);
        let body = read_file(&path)?;
        serde_json::from_slice(&body).map_err(|e| {
            error!("Invalid sidecar {}: {}", path.display(), e);
            StorageError::ReadFailed(format!("{}: {}", path.display(), e))
        })
    }
}

fn write_file(path: &Path, data: &[u8]) -> Result<(), StorageError> {
    let mut f = File::create(path).map_err(|e| {
        error!("Create failed: {}: {}", path.display(), e);
        StorageError::WriteFailed(format!("{}: {}", path.display(), e))
    })?;
    f.write_all(data).map_err(|e| {
        error!("Write failed: {}: {}", path.display(), e);
        StorageError::WriteFailed(format!("{}: {}", path.display(), e))
    })?;
    f.sync_all().map_err(|e| {
        error!("Sync failed: {}: {}", path.display(), e);
        StorageError::WriteFailed(format!("{}: {}", path.display(), e))
    })
}

fn read_file(path: &Path) -> Result<Vec<u8>, StorageError> {
    let mut buf = Vec::new();
    File::open(path)
        .and_then(|mut f| f.read_to_end(&mut buf))
        .map_err(|e| {
            error!("Read failed {}: {}", path.display(), e);
            StorageError::ReadFailed(format!("{}: {}", path.display(), e))
        })?;
    Ok(buf)
}

impl ArtifactStorage for FileArtifactStore {
    fn save_artifact(
        &self,
        data: &[u8],
        captured_at: DateTime<Utc>,
    ) -> Result<PathBuf, StorageError> {
        let path = self.base_path.join(artifact_file_name(captured_at));
        write_file(&path, data)?;
        debug!("Saved {} byte(s) to {}", data.len(), path.display());
        Ok(path)
    }

    fn load_artifact(&self, path: &Path) -> Result<Vec<u8>, StorageError> {
        let buf = read_file(path)?;
        debug!("Read {} byte(s) from {}", buf.len(), path.display());
        Ok(buf)
    }

    fn remove_artifact(&self, path: &Path) -> Result<(), StorageError> {
        fs::remove_file(path).map_err(|e| {
            error!("Remove failed {}: {}", path.display(), e);
            StorageError::RemoveFailed(format!("{}: {}", path.display(), e))
        })?;
        // the sidecar only exists for received artifacts
        let sidecar = path.with_extension(SIDECAR_EXTENSION);
        match fs::remove_file(&sidecar) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => warn!("Could not remove sidecar {}: {}", sidecar.display(), e),
        }
        debug!("Removed {}", path.display());
        Ok(())
    }

    fn list_artifacts(&self) -> Result<Vec<PathBuf>, StorageError> {
        let entries = fs::read_dir(&self.base_path).map_err(|e| {
            error!("Failed to read artifact dir {}: {}", self.base_path.display(), e);
            StorageError::ReadFailed(e.to_string())
        })?;
        let mut stamped = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| {
                error!("Dir entry error: {}", e);
                StorageError::ReadFailed(e.to_string())
            })?;
            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) != Some(ARTIFACT_EXTENSION) {
                continue;
            }
            let millis = path
                .file_stem()
                .and_then(|s| s.to_str())
                .and_then(|s| s.parse::<i64>().ok())
                .unwrap_or(i64::MAX);
            stamped.push((millis, path));
        }
        stamped.sort();
        Ok(stamped.into_iter().map(|(_, p)| p).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serial_test::serial;
    use tempfile::TempDir;

    fn instant(millis: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(millis).unwrap()
    }

    #[test]
    fn artifact_is_named_after_capture_millis() {
        let dir = TempDir::new().unwrap();
        let store = FileArtifactStore::new(dir.path()).unwrap();
        let path = store
            .save_artifact(b"\xFF\xD8jpeg", instant(1_700_000_000_123))
            .unwrap();
        assert_eq!(path, dir.path().join("1700000000123.jpg"));
        assert_eq!(store.load_artifact(&path).unwrap(), b"\xFF\xD8jpeg");
    }

    #[test]
    fn same_millisecond_captures_overwrite() {
        let dir = TempDir::new().unwrap();
        let store = FileArtifactStore::new(dir.path()).unwrap();
        let at = instant(1_700_000_000_000);
        let first = store.save_artifact(b"first", at).unwrap();
        let second = store.save_artifact(b"second", at).unwrap();
        assert_eq!(first, second);
        assert_eq!(store.load_artifact(&first).unwrap(), b"second");
        assert_eq!(store.list_artifacts().unwrap().len(), 1);
    }

    #[test]
    fn list_is_ordered_by_capture_time() {
        let dir = TempDir::new().unwrap();
        let store = FileArtifactStore::new(dir.path()).unwrap();
        store.save_artifact(b"b", instant(2_000)).unwrap();
        store.save_artifact(b"a", instant(1_000)).unwrap();
        store.save_artifact(b"c", instant(10_000)).unwrap();
        fs::write(dir.path().join("notes.txt"), b"ignored").unwrap();

        let names: Vec<_> = store
            .list_artifacts()
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["1000.jpg", "2000.jpg", "10000.jpg"]);
    }

    #[test]
    fn remove_deletes_artifact_and_sidecar() {
        let dir = TempDir::new().unwrap();
        let store = FileArtifactStore::new(dir.path()).unwrap();
        let path = store.save_artifact(b"img", instant(5)).unwrap();
        let sidecar = LocationSidecar {
            latitude: 40.4433,
            longitude: -79.9436,
            received_at: instant(6),
        };
        let sidecar_path = store.save_location_sidecar(&path, &sidecar).unwrap();
        assert_eq!(store.load_location_sidecar(&path).unwrap(), sidecar);

        store.remove_artifact(&path).unwrap();
        assert!(!path.exists());
        assert!(!sidecar_path.exists());
        assert!(matches!(
            store.remove_artifact(&path),
            Err(StorageError::RemoveFailed(_))
        ));
    }

    #[test]
    fn stuck_sidecar_does_not_fail_removal() {
        let dir = TempDir::new().unwrap();
        let store = FileArtifactStore::new(dir.path()).unwrap();
        let path = store.save_artifact(b"img", instant(7)).unwrap();
        // a directory in the sidecar's place cannot be removed as a file
        let sidecar = path.with_extension("json");
        fs::create_dir(&sidecar).unwrap();

        store.remove_artifact(&path).unwrap();
        assert!(!path.exists());
        assert!(sidecar.is_dir());
    }

    #[test]
    fn removal_without_sidecar_succeeds() {
        let dir = TempDir::new().unwrap();
        let store = FileArtifactStore::new(dir.path()).unwrap();
        let path = store.save_artifact(b"img", instant(8)).unwrap();
        store.remove_artifact(&path).unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn loading_missing_artifact_fails() {
        let dir = TempDir::new().unwrap();
        let store = FileArtifactStore::new(dir.path()).unwrap();
        let missing = dir.path().join("42.jpg");
        assert!(matches!(
            store.load_artifact(&missing),
            Err(StorageError::ReadFailed(_))
        ));
    }

    #[test]
    #[serial]
    fn default_store_honours_env_var() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("from-env");
        std::env::set_var(ARTIFACT_DIR_ENV, &target);
        let store = FileArtifactStore::new_default();
        std::env::remove_var(ARTIFACT_DIR_ENV);

        let store = store.unwrap();
        assert_eq!(store.base_path(), target.as_path());
        assert!(target.is_dir());
    }
}
