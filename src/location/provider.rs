use std::future::Future;
use std::time::Duration;

use log::{debug, warn};

use crate::error_handling::types::LocationError;

use super::types::{Coordinates, GeoFix, UnavailableReason};

/// A platform location service.
///
/// Answers with the best position it currently knows, `None` when it has
/// none, or an error (most commonly a missing permission). Implementations
/// carry no deadline of their own.
pub trait LocationSource: Send + Sync {
    fn last_location(
        &self,
    ) -> impl Future<Output = Result<Option<Coordinates>, LocationError>> + Send;
}

/// Single-shot, bounded location query over a [`LocationSource`].
pub struct LocationProvider<S> {
    source: S,
    timeout: Duration,
}

impl<S: LocationSource> LocationProvider<S> {
    pub fn new(source: S, timeout: Duration) -> Self {
        Self { source, timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Asks the source once and folds every way of not getting a usable
    /// position into [`GeoFix::Unavailable`]. Completes within `timeout`.
    pub async fn get_fix(&self) -> GeoFix {
        let answer = match tokio::time::timeout(self.timeout, self.source.last_location()).await {
            Ok(answer) => answer,
            Err(_) => {
                warn!("Location source gave no answer within {:?}", self.timeout);
                return GeoFix::Unavailable(UnavailableReason::TimedOut(self.timeout));
            }
        };

        let fix = match answer {
            Ok(Some(c)) if c.is_valid() => GeoFix::Valid(c),
            Ok(Some(c)) => GeoFix::Unavailable(UnavailableReason::OutOfRange(c)),
            Ok(None) => GeoFix::Unavailable(UnavailableReason::NoFix),
            Err(LocationError::PermissionDenied) => {
                GeoFix::Unavailable(UnavailableReason::PermissionDenied)
            }
            Err(LocationError::ProviderFailed(e)) => {
                GeoFix::Unavailable(UnavailableReason::ProviderFailed(e))
            }
        };
        debug!("Location query resolved to {:?}", fix);
        fix
    }
}
