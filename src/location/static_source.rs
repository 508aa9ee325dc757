use log::trace;

use crate::error_handling::types::LocationError;

use super::provider::LocationSource;
use super::types::Coordinates;

/// A location source pinned to a configured position, or to "no fix" when
/// none is configured. Used where no platform location service exists.
#[derive(Debug, Clone, Default)]
pub struct StaticLocationSource {
    fix: Option<Coordinates>,
}

impl StaticLocationSource {
    pub fn new(fix: Option<Coordinates>) -> Self {
        Self { fix }
    }
}

impl LocationSource for StaticLocationSource {
    async fn last_location(&self) -> Result<Option<Coordinates>, LocationError> {
        trace!("static location source answering {:?}", self.fix);
        Ok(self.fix)
    }
}
