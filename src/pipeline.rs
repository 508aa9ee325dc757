//! Capture, tag, encode and upload.
//!
//! [`PipelineCoordinator`] drives one run at a time per call and can spawn
//! any number of independent runs; each run ends in exactly one
//! [`RunOutcome`].
//!
//! ```text
//! capture ──▶ store locally ──▶ location fix ──▶ encode ──▶ POST ──▶ RunOutcome
//!    │                              │                         │
//!    └── CaptureFailure             └── LocationUnavailable   └── NetworkFailure / ServerRejected
//! ```

pub mod coordinator;
pub mod types;

pub use coordinator::{PipelineCoordinator, PipelineOptions, RunHandle};
pub use types::RunOutcome;
