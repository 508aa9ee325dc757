use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What happens to the local copy of an artifact once its run concludes.
///
/// Failed runs always keep their artifact.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RetentionPolicy {
    #[default]
    Keep,
    DeleteOnSuccess,
}

/// Location record written next to an artifact accepted by the receiver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationSidecar {
    pub latitude: f64,
    pub longitude: f64,
    pub received_at: DateTime<Utc>,
}
