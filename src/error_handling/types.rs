use std::fmt;

#[derive(Debug)]
pub enum ConfigError {
    IoError(std::io::Error),
    TomlError(String),
    InvalidEndpoint(String),
    NotInRange(String),
    IncompleteLocation(String),
    DirectoryDoesNotExist(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {}", e),
            ConfigError::TomlError(e) => write!(f, "TOML parsing error: {}", e),
            ConfigError::InvalidEndpoint(e) => write!(f, "Upload endpoint error: {}", e),
            ConfigError::NotInRange(e) => write!(f, "Value out of range: {}", e),
            ConfigError::IncompleteLocation(e) => write!(f, "Location configuration error: {}", e),
            ConfigError::DirectoryDoesNotExist(e) => write!(f, "Directory error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::IoError(err)
    }
}

#[derive(Debug)]
pub enum StorageError {
    WriteFailed(String),
    ReadFailed(String),
    RemoveFailed(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::WriteFailed(e) => write!(f, "Storage write failed: {}", e),
            StorageError::ReadFailed(e) => write!(f, "Storage read failed: {}", e),
            StorageError::RemoveFailed(e) => write!(f, "Storage remove failed: {}", e),
        }
    }
}

impl std::error::Error for StorageError {}

#[derive(Debug)]
pub enum CaptureError {
    /// The capture source has no active camera binding.
    NotBound,
    DeviceError(std::io::Error),
    EmptyArtifact,
    StorageError(StorageError),
}

impl fmt::Display for CaptureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptureError::NotBound => write!(f, "Capture source is not bound to a camera"),
            CaptureError::DeviceError(e) => write!(f, "Capture device error: {}", e),
            CaptureError::EmptyArtifact => write!(f, "Capture produced no data"),
            CaptureError::StorageError(e) => write!(f, "Capture storage error: {}", e),
        }
    }
}

impl std::error::Error for CaptureError {}

impl From<StorageError> for CaptureError {
    fn from(err: StorageError) -> Self {
        CaptureError::StorageError(err)
    }
}

#[derive(Debug)]
pub enum LocationError {
    PermissionDenied,
    ProviderFailed(String),
}

impl fmt::Display for LocationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocationError::PermissionDenied => write!(f, "Location permission not granted"),
            LocationError::ProviderFailed(e) => write!(f, "Location provider failed: {}", e),
        }
    }
}

impl std::error::Error for LocationError {}

#[derive(Debug)]
pub enum UploadError {
    InvalidEndpoint(String),
    ClientBuildFailed(String),
}

impl fmt::Display for UploadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UploadError::InvalidEndpoint(e) => write!(f, "Invalid upload endpoint: {}", e),
            UploadError::ClientBuildFailed(e) => write!(f, "HTTP client build failed: {}", e),
        }
    }
}

impl std::error::Error for UploadError {}

#[derive(Debug)]
pub enum ReceiverError {
    InvalidBindAddress(String),
    BindFailed(String),
    StorageError(StorageError),
}

impl fmt::Display for ReceiverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReceiverError::InvalidBindAddress(e) => write!(f, "Invalid bind address: {}", e),
            ReceiverError::BindFailed(e) => write!(f, "Failed to bind receiver: {}", e),
            ReceiverError::StorageError(e) => write!(f, "Receiver storage error: {}", e),
        }
    }
}

impl std::error::Error for ReceiverError {}

impl From<StorageError> for ReceiverError {
    fn from(err: StorageError) -> Self {
        ReceiverError::StorageError(err)
    }
}

#[derive(Debug)]
pub enum ControllerError {
    ConfigurationError(ConfigError),
    StorageError(StorageError),
    UploadError(UploadError),
    ReceiverError(ReceiverError),
    RunAbandoned,
}

impl fmt::Display for ControllerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControllerError::ConfigurationError(e) => write!(f, "Configuration error: {}", e),
            ControllerError::StorageError(e) => write!(f, "Storage error: {}", e),
            ControllerError::UploadError(e) => write!(f, "Upload error: {}", e),
            ControllerError::ReceiverError(e) => write!(f, "Receiver error: {}", e),
            ControllerError::RunAbandoned => write!(f, "Pipeline run ended without an outcome"),
        }
    }
}

impl std::error::Error for ControllerError {}

impl From<ConfigError> for ControllerError {
    fn from(err: ConfigError) -> Self {
        ControllerError::ConfigurationError(err)
    }
}

impl From<StorageError> for ControllerError {
    fn from(err: StorageError) -> Self {
        ControllerError::StorageError(err)
    }
}

impl From<UploadError> for ControllerError {
    fn from(err: UploadError) -> Self {
        ControllerError::UploadError(err)
    }
}

impl From<ReceiverError> for ControllerError {
    fn from(err: ReceiverError) -> Self {
        ControllerError::ReceiverError(err)
    }
}
