use std::fmt;

use crate::location::UnavailableReason;
use crate::network::UploadOutcome;

/// Terminal outcome of one pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    Success,
    CaptureFailure(String),
    LocationUnavailable(UnavailableReason),
    NetworkFailure(String),
    ServerRejected(u16),
}

impl RunOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, RunOutcome::Success)
    }

    /// Short message for whoever pressed the shutter.
    pub fn user_message(&self) -> &'static str {
        match self {
            RunOutcome::Success => "Photo and location uploaded successfully!",
            RunOutcome::CaptureFailure(_) => "Photo capture failed",
            RunOutcome::LocationUnavailable(_) => "Failed to get location",
            RunOutcome::NetworkFailure(_) | RunOutcome::ServerRejected(_) => "Upload failed.",
        }
    }
}

impl From<UploadOutcome> for RunOutcome {
    fn from(outcome: UploadOutcome) -> Self {
        match outcome {
            UploadOutcome::Success => RunOutcome::Success,
            UploadOutcome::NetworkFailure(e) => RunOutcome::NetworkFailure(e),
            UploadOutcome::ServerRejected(code) => RunOutcome::ServerRejected(code),
        }
    }
}

impl fmt::Display for RunOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunOutcome::Success => write!(f, "success"),
            RunOutcome::CaptureFailure(e) => write!(f, "capture failure: {}", e),
            RunOutcome::LocationUnavailable(r) => write!(f, "location unavailable: {}", r),
            RunOutcome::NetworkFailure(e) => write!(f, "network failure: {}", e),
            RunOutcome::ServerRejected(code) => write!(f, "server rejected: status {}", code),
        }
    }
}
