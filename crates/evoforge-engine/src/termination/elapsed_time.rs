//! Time-based termination.

use std::fmt::Debug;
use std::time::Duration;

use super::Termination;
use crate::error::EngineError;
use crate::population::PopulationData;

/// Terminates after a time limit.
///
/// Checked only between generations, so a run may overshoot the limit by
/// up to one generation's duration.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use evoforge_engine::termination::ElapsedTimeTermination;
///
/// let term = ElapsedTimeTermination::new(Duration::from_secs(30)).unwrap();
///
/// // Or use convenience constructors
/// let term = ElapsedTimeTermination::seconds(30).unwrap();
/// let term = ElapsedTimeTermination::millis(500).unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct ElapsedTimeTermination {
    limit: Duration,
}

impl ElapsedTimeTermination {
    pub fn new(limit: Duration) -> Result<Self, EngineError> {
        if limit.is_zero() {
            return Err(EngineError::InvalidCondition(
                "elapsed time limit must be positive".to_string(),
            ));
        }
        Ok(Self { limit })
    }

    pub fn millis(ms: u64) -> Result<Self, EngineError> {
        Self::new(Duration::from_millis(ms))
    }

    pub fn seconds(secs: u64) -> Result<Self, EngineError> {
        Self::new(Duration::from_secs(secs))
    }

    pub fn limit(&self) -> Duration {
        self.limit
    }
}

impl<C> Termination<C> for ElapsedTimeTermination {
    fn should_terminate(&self, data: &PopulationData<C>) -> bool {
        data.elapsed >= self.limit
    }

    fn name(&self) -> &str {
        "ElapsedTime"
    }
}
