//! Fitness-based termination.

use std::fmt::Debug;

use super::Termination;
use crate::error::EngineError;
use crate::population::PopulationData;

/// Terminates when the best fitness reaches a target.
///
/// For natural fitness (higher is better) the target is reached when the
/// best fitness is at or above it; otherwise when it is at or below it.
///
/// # Example
///
/// ```
/// use evoforge_engine::termination::TargetFitnessTermination;
///
/// // Stop once an error measure drops to 0.01
/// let term = TargetFitnessTermination::new(0.01, false).unwrap();
///
/// // NaN can never be reached
/// assert!(TargetFitnessTermination::new(f64::NAN, true).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct TargetFitnessTermination {
    target: f64,
    natural: bool,
}

impl TargetFitnessTermination {
    pub fn new(target: f64, natural: bool) -> Result<Self, EngineError> {
        if target.is_nan() {
            return Err(EngineError::InvalidCondition(
                "target fitness must not be NaN".to_string(),
            ));
        }
        Ok(Self { target, natural })
    }

    pub fn target(&self) -> f64 {
        self.target
    }
}

impl<C> Termination<C> for TargetFitnessTermination {
    fn should_terminate(&self, data: &PopulationData<C>) -> bool {
        if self.natural {
            data.best_fitness >= self.target
        } else {
            data.best_fitness <= self.target
        }
    }

    fn name(&self) -> &str {
        "TargetFitness"
    }
}
