pub mod config;
pub mod types;

pub use config::{Config, ConfigOverrides};
pub use types::{LocationConfig, PipelineConfig, ReceiverConfig, StorageConfig, UploadConfig};
