//! Location subsystem.
//!
//! The platform location service is an external collaborator that may hang,
//! refuse for lack of permission, or simply have no fix. [`LocationProvider`]
//! wraps any [`LocationSource`] so the pipeline only ever sees a single
//! bounded query returning a [`GeoFix`].

pub mod provider;
pub mod static_source;
pub mod types;

pub use provider::{LocationProvider, LocationSource};
pub use static_source::StaticLocationSource;
pub use types::{Coordinates, GeoFix, UnavailableReason};
