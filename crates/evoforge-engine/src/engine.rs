//! The evolution loop.

use std::fmt::Debug;
use std::sync::Arc;

use evoforge_config::EvolutionConfig;
use tracing::{debug, info};

use crate::builder::TerminationBuilder;
use crate::control::AbortControl;
use crate::error::EngineError;
use crate::event::{EvolutionObserver, ObserverSupport};
use crate::population::{GenerationStats, PopulationData};
use crate::scope::EvolutionScope;
use crate::termination::{Termination, TerminationId, TerminationSet};

/// Drives generations until a registered termination condition is satisfied.
///
/// The engine does not breed or evaluate candidates itself. Each generation
/// it calls the caller's step, which performs selection, variation and
/// evaluation and reports a [`GenerationStats`]. After every generation all
/// registered conditions are evaluated, and the ones that were satisfied are
/// retained for [`satisfied_terminations`](Self::satisfied_terminations).
///
/// # Example
///
/// ```
/// use evoforge_engine::control::AbortControl;
/// use evoforge_engine::engine::EvolutionEngine;
/// use evoforge_engine::population::GenerationStats;
/// use evoforge_engine::termination::GenerationCountTermination;
///
/// let control = AbortControl::new();
/// let mut engine = EvolutionEngine::<u32>::new(true);
/// let abort_id = engine.add_termination(control.termination_condition());
/// let limit_id = engine.add_termination(GenerationCountTermination::new(5).unwrap());
///
/// control.reset();
/// let last = engine
///     .evolve(|scope| GenerationStats::new(7, scope.generation_number() as f64, 10))
///     .unwrap();
///
/// assert_eq!(last.generation_number, 4);
/// assert!(engine.was_satisfied(limit_id).unwrap());
/// assert!(!engine.was_satisfied(abort_id).unwrap());
/// ```
pub struct EvolutionEngine<C> {
    terminations: TerminationSet<C>,
    observers: ObserverSupport<C>,
    natural_fitness: bool,
    elite_count: usize,
    random_seed: Option<u64>,
    satisfied: Option<Vec<TerminationId>>,
}

impl<C> EvolutionEngine<C> {
    /// Creates an engine with no conditions.
    ///
    /// `natural_fitness` is true when higher fitness is better.
    pub fn new(natural_fitness: bool) -> Self {
        Self {
            terminations: TerminationSet::new(),
            observers: ObserverSupport::new(),
            natural_fitness,
            elite_count: 0,
            random_seed: None,
            satisfied: None,
        }
    }

    /// Creates an engine whose conditions come from configuration.
    ///
    /// When the configuration is abortable and `abort` is given, the
    /// control's signal is registered alongside the configured limits.
    pub fn from_config(
        config: &EvolutionConfig,
        abort: Option<&AbortControl>,
    ) -> Result<Self, EngineError> {
        config.validate()?;
        let termination = config.termination.clone().unwrap_or_default();

        let mut engine =
            Self::new(termination.natural_fitness).with_elite_count(config.elite_count);
        if let Some(seed) = config.random_seed {
            engine = engine.with_seed(seed);
        }

        let mut builder = TerminationBuilder::from_config(&termination);
        if let Some(control) = abort {
            builder = builder.with_abort_control(control);
        }
        builder.register(&mut engine)?;
        Ok(engine)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    pub fn with_elite_count(mut self, elite_count: usize) -> Self {
        self.elite_count = elite_count;
        self
    }

    /// Registers a condition for subsequent runs.
    pub fn add_termination<T: Termination<C> + 'static>(&mut self, condition: T) -> TerminationId {
        self.terminations.add(condition)
    }

    pub fn add_termination_boxed(&mut self, condition: Box<dyn Termination<C>>) -> TerminationId {
        self.terminations.add_boxed(condition)
    }

    /// Unregisters a condition. Takes effect from the next run.
    pub fn remove_termination(&mut self, id: TerminationId) -> Option<Box<dyn Termination<C>>> {
        self.terminations.remove(id)
    }

    pub fn terminations(&self) -> &TerminationSet<C> {
        &self.terminations
    }

    pub fn add_observer(&mut self, observer: Arc<dyn EvolutionObserver<C>>) {
        self.observers.add_observer(observer);
    }

    pub fn remove_observer(&mut self, observer: &Arc<dyn EvolutionObserver<C>>) -> bool {
        self.observers.remove_observer(observer)
    }

    /// Runs generations until at least one condition is satisfied.
    ///
    /// `step` produces and evaluates one generation. It receives the run
    /// scope, which exposes the generation number and the run's RNG.
    /// Returns the statistics of the final generation.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NoTerminationConditions`] if nothing could
    /// ever stop the run.
    pub fn evolve<F>(&mut self, mut step: F) -> Result<PopulationData<C>, EngineError>
    where
        F: FnMut(&mut EvolutionScope) -> GenerationStats<C>,
    {
        if self.terminations.is_empty() {
            return Err(EngineError::NoTerminationConditions);
        }
        self.satisfied = None;

        let mut scope = match self.random_seed {
            Some(seed) => EvolutionScope::with_seed(seed),
            None => EvolutionScope::new(),
        };

        info!(
            event = "evolve_start",
            conditions = self.terminations.len() as u64,
            natural_fitness = self.natural_fitness,
        );

        let run = RunGuard::start(&self.terminations);
        scope.start_run();

        let (data, satisfied) = loop {
            let stats = step(&mut scope);
            let data = PopulationData::from_stats(
                stats,
                self.natural_fitness,
                self.elite_count,
                scope.generation_number(),
                scope.elapsed(),
            );

            debug!(
                event = "generation",
                generation = data.generation_number,
                best_fitness = data.best_fitness,
                mean_fitness = data.mean_fitness,
            );

            self.observers.fire_population_update(&data);

            let satisfied = run.terminations.evaluate(&data);
            if !satisfied.is_empty() {
                break (data, satisfied);
            }
            scope.advance_generation();
        };
        drop(run);

        let names: Vec<&str> = satisfied
            .iter()
            .filter_map(|id| self.terminations.get(*id).map(|t| t.name()))
            .collect();

        info!(
            event = "evolve_end",
            generations = data.generation_number + 1,
            best_fitness = data.best_fitness,
            duration_ms = data.elapsed.as_millis() as u64,
            satisfied = %names.join(", "),
        );
        self.observers.fire_run_ended(&data, &names);

        self.satisfied = Some(satisfied);
        Ok(data)
    }

    /// Conditions satisfied in the final generation of the last run, in
    /// registration order.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NotTerminated`] if no run has completed.
    pub fn satisfied_terminations(&self) -> Result<&[TerminationId], EngineError> {
        self.satisfied.as_deref().ok_or(EngineError::NotTerminated)
    }

    /// Returns whether a specific condition stopped the last run.
    pub fn was_satisfied(&self, id: TerminationId) -> Result<bool, EngineError> {
        Ok(self.satisfied_terminations()?.contains(&id))
    }

    /// Names of the conditions that stopped the last run.
    pub fn satisfied_names(&self) -> Result<Vec<&str>, EngineError> {
        Ok(self
            .satisfied_terminations()?
            .iter()
            .filter_map(|id| self.terminations.get(*id).map(|t| t.name()))
            .collect())
    }
}

impl<C> Debug for EvolutionEngine<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EvolutionEngine")
            .field("terminations", &self.terminations)
            .field("observers", &self.observers)
            .field("natural_fitness", &self.natural_fitness)
            .field("elite_count", &self.elite_count)
            .finish()
    }
}

// Brackets a run so conditions hear about its end even if the step panics.
struct RunGuard<'a, C> {
    terminations: &'a TerminationSet<C>,
}

impl<'a, C> RunGuard<'a, C> {
    fn start(terminations: &'a TerminationSet<C>) -> Self {
        terminations.notify_run_started();
        Self { terminations }
    }
}

impl<C> Drop for RunGuard<'_, C> {
    fn drop(&mut self) {
        self.terminations.notify_run_ended();
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
