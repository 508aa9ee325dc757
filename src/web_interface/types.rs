use serde::{Deserialize, Serialize};

/// API error payload
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub message: String,
}

/// Reply to an accepted upload.
#[derive(Debug, Serialize, Deserialize)]
pub struct UploadReceipt {
    pub status: String,
    /// Stem of the stored artifact file.
    pub id: String,
}
