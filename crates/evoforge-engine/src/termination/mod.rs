//! Termination conditions for evolution runs.

mod abort;
mod composite;
mod elapsed_time;
mod generation_count;
mod set;
mod stagnation;
mod target_fitness;

use std::fmt::Debug;

use crate::population::PopulationData;

pub use abort::AbortSignal;
pub use composite::{AndTermination, OrTermination};
pub use elapsed_time::ElapsedTimeTermination;
pub use generation_count::GenerationCountTermination;
pub use set::{TerminationId, TerminationSet};
pub use stagnation::StagnationTermination;
pub use target_fitness::TargetFitnessTermination;

/// Trait for deciding when an evolution run should stop.
///
/// Queried once after each generation's fitness evaluation, on the thread
/// driving the loop. The answer for a given generation must be stable:
/// asking twice with the same [`PopulationData`] yields the same verdict.
///
/// # Type Parameters
/// * `C` - The candidate type carried in [`PopulationData`]
pub trait Termination<C>: Send + Debug {
    /// Returns true if the run should stop after this generation.
    fn should_terminate(&self, data: &PopulationData<C>) -> bool;

    /// Short human-readable name used in logs and run reports.
    fn name(&self) -> &str;

    /// Called by the engine before the first generation of a run.
    fn on_run_started(&self) {}

    /// Called by the engine once a run has stopped, including by panic.
    fn on_run_ended(&self) {}
}

impl<C, T: Termination<C> + ?Sized> Termination<C> for Box<T> {
    fn should_terminate(&self, data: &PopulationData<C>) -> bool {
        (**self).should_terminate(data)
    }

    fn name(&self) -> &str {
        (**self).name()
    }

    fn on_run_started(&self) {
        (**self).on_run_started()
    }

    fn on_run_ended(&self) {
        (**self).on_run_ended()
    }
}

#[cfg(test)]
mod tests;
