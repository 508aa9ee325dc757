use std::fmt;

use serde::{Deserialize, Serialize};

use crate::encoding;
use crate::location::Coordinates;

/// JSON body of one upload request.
///
/// ```json
/// {"image": "<url-safe base64>", "latitude": 40.4433, "longitude": -79.9436}
/// ```
///
/// Built right before sending and dropped with the attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadPayload {
    pub image: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl UploadPayload {
    pub fn new(artifact: &[u8], at: Coordinates) -> Self {
        Self {
            image: encoding::encode(artifact),
            latitude: at.latitude,
            longitude: at.longitude,
        }
    }

    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }
}

/// Classification of one delivery attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    /// The endpoint answered with a 2xx status.
    Success,
    /// No HTTP status was received (refused, DNS, timeout, reset).
    NetworkFailure(String),
    /// The endpoint answered with a non-2xx status.
    ServerRejected(u16),
}

impl UploadOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, UploadOutcome::Success)
    }
}

impl fmt::Display for UploadOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UploadOutcome::Success => write!(f, "upload accepted"),
            UploadOutcome::NetworkFailure(e) => write!(f, "network failure: {}", e),
            UploadOutcome::ServerRejected(code) => write!(f, "server rejected upload with status {}", code),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_serializes_to_three_fields() {
        let payload = UploadPayload::new(&[0xFF, 0xD8, 0xFF], Coordinates::new(40.4433, -79.9436));
        let json: serde_json::Value = serde_json::to_value(&payload).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 3);
        assert_eq!(obj["image"], "_9j_");
        assert_eq!(obj["latitude"], 40.4433);
        assert_eq!(obj["longitude"], -79.9436);
    }

    #[test]
    fn payload_image_decodes_to_artifact() {
        let artifact = b"\xFF\xD8 quotes \" and \\ backslashes".to_vec();
        let payload = UploadPayload::new(&artifact, Coordinates::new(0.0, 0.0));
        let text = serde_json::to_string(&payload).unwrap();
        let back: UploadPayload = serde_json::from_str(&text).unwrap();
        assert_eq!(encoding::decode(&back.image).unwrap(), artifact);
    }
}
