//! Generation count termination.

use std::fmt::Debug;

use super::Termination;
use crate::error::EngineError;
use crate::population::PopulationData;

/// Terminates once a fixed number of generations has been evaluated.
///
/// # Example
///
/// ```
/// use evoforge_engine::termination::GenerationCountTermination;
///
/// // Terminate after 1000 generations
/// let term = GenerationCountTermination::new(1000).unwrap();
/// assert!(GenerationCountTermination::new(0).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct GenerationCountTermination {
    limit: u64,
}

impl GenerationCountTermination {
    pub fn new(limit: u64) -> Result<Self, EngineError> {
        if limit == 0 {
            return Err(EngineError::InvalidCondition(
                "generation count must be positive".to_string(),
            ));
        }
        Ok(Self { limit })
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }
}

impl<C> Termination<C> for GenerationCountTermination {
    fn should_terminate(&self, data: &PopulationData<C>) -> bool {
        data.generation_number + 1 >= self.limit
    }

    fn name(&self) -> &str {
        "GenerationCount"
    }
}
