//! Termination based on lack of fitness improvement.

use std::fmt::Debug;
use std::sync::Mutex;

use super::Termination;
use crate::error::EngineError;
use crate::population::PopulationData;

/// Terminates if fitness has not improved for a number of generations.
///
/// Useful to stop a run that has converged and is unlikely to find fitter
/// candidates. By default the best fitness is tracked; with
/// [`using_population_average`](Self::using_population_average) the mean
/// fitness is tracked instead, which keeps the run going while the
/// population as a whole is still converging.
///
/// # Example
///
/// ```
/// use evoforge_engine::termination::StagnationTermination;
///
/// // Terminate after 50 generations without improvement
/// let term = StagnationTermination::new(50, true).unwrap();
/// ```
#[derive(Debug)]
pub struct StagnationTermination {
    generation_limit: u64,
    natural: bool,
    use_population_average: bool,
    state: Mutex<StagnationState>,
}

#[derive(Debug, Clone, Default)]
struct StagnationState {
    best_fitness: Option<f64>,
    fittest_generation: u64,
}

impl StagnationTermination {
    pub fn new(generation_limit: u64, natural: bool) -> Result<Self, EngineError> {
        if generation_limit == 0 {
            return Err(EngineError::InvalidCondition(
                "stagnation generation limit must be positive".to_string(),
            ));
        }
        Ok(Self {
            generation_limit,
            natural,
            use_population_average: false,
            state: Mutex::new(StagnationState::default()),
        })
    }

    /// Tracks mean fitness rather than best fitness.
    pub fn using_population_average(mut self) -> Self {
        self.use_population_average = true;
        self
    }

    fn improves(&self, candidate: f64, incumbent: f64) -> bool {
        if self.natural {
            candidate > incumbent
        } else {
            candidate < incumbent
        }
    }
}

impl<C> Termination<C> for StagnationTermination {
    fn should_terminate(&self, data: &PopulationData<C>) -> bool {
        let fitness = if self.use_population_average {
            data.mean_fitness
        } else {
            data.best_fitness
        };

        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        let improved = match state.best_fitness {
            None => true,
            Some(best) => self.improves(fitness, best),
        };
        if improved {
            state.best_fitness = Some(fitness);
            state.fittest_generation = data.generation_number;
        }

        data.generation_number.saturating_sub(state.fittest_generation) >= self.generation_limit
    }

    fn name(&self) -> &str {
        "Stagnation"
    }

    fn on_run_started(&self) {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        *state = StagnationState::default();
    }
}
