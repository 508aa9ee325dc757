pub mod capture_source;
pub mod recorder;
pub mod types;

pub use capture_source::{CaptureSource, FileCaptureSource};
pub use recorder::CaptureRecorder;
pub use types::CaptureResult;
