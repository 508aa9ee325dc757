//! Common data types used across the location subsystem.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// A latitude/longitude pair in decimal degrees (WGS84).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Finite and inside [-90, 90] x [-180, 180].
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.latitude, self.longitude)
    }
}

/// Why no usable fix could be produced.
#[derive(Debug, Clone, PartialEq)]
pub enum UnavailableReason {
    PermissionDenied,
    /// The platform answered but knew no position.
    NoFix,
    TimedOut(Duration),
    OutOfRange(Coordinates),
    ProviderFailed(String),
}

impl fmt::Display for UnavailableReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnavailableReason::PermissionDenied => write!(f, "location permission not granted"),
            UnavailableReason::NoFix => write!(f, "no location fix available"),
            UnavailableReason::TimedOut(d) => {
                write!(f, "no location fix within {} ms", d.as_millis())
            }
            UnavailableReason::OutOfRange(c) => write!(f, "coordinates out of range: {}", c),
            UnavailableReason::ProviderFailed(e) => write!(f, "location provider failed: {}", e),
        }
    }
}

/// Outcome of a single location query.
#[derive(Debug, Clone, PartialEq)]
pub enum GeoFix {
    Valid(Coordinates),
    Unavailable(UnavailableReason),
}

impl GeoFix {
    pub fn is_valid(&self) -> bool {
        matches!(self, GeoFix::Valid(_))
    }

    pub fn coordinates(&self) -> Option<Coordinates> {
        match self {
            GeoFix::Valid(c) => Some(*c),
            GeoFix::Unavailable(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_checks_both_axes() {
        assert!(Coordinates::new(40.4433, -79.9436).is_valid());
        assert!(Coordinates::new(-90.0, 180.0).is_valid());
        assert!(!Coordinates::new(90.5, 0.0).is_valid());
        assert!(!Coordinates::new(0.0, -180.01).is_valid());
        assert!(!Coordinates::new(f64::NAN, 0.0).is_valid());
        assert!(!Coordinates::new(0.0, f64::INFINITY).is_valid());
    }

    #[test]
    fn unavailable_fix_has_no_coordinates() {
        let fix = GeoFix::Unavailable(UnavailableReason::NoFix);
        assert!(!fix.is_valid());
        assert_eq!(fix.coordinates(), None);

        let c = Coordinates::new(1.0, 2.0);
        assert_eq!(GeoFix::Valid(c).coordinates(), Some(c));
    }

    #[test]
    fn timeout_reason_reports_millis() {
        let reason = UnavailableReason::TimedOut(Duration::from_millis(1500));
        assert_eq!(reason.to_string(), "no location fix within 1500 ms");
    }
}
