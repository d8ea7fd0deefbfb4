//! Builds termination conditions from configuration.
//!
//! Bridges `evoforge_config::TerminationConfig` to the concrete conditions
//! registered with an [`EvolutionEngine`].

use evoforge_config::TerminationConfig;

use crate::control::AbortControl;
use crate::engine::EvolutionEngine;
use crate::error::EngineError;
use crate::termination::{
    AbortSignal, ElapsedTimeTermination, GenerationCountTermination, StagnationTermination,
    TargetFitnessTermination, Termination, TerminationId,
};

/// Collects the conditions described by a [`TerminationConfig`].
///
/// # Example
///
/// ```
/// use evoforge_config::TerminationConfig;
/// use evoforge_engine::builder::TerminationBuilder;
/// use evoforge_engine::control::AbortControl;
/// use evoforge_engine::engine::EvolutionEngine;
///
/// let config = TerminationConfig {
///     generation_count_limit: Some(100),
///     ..TerminationConfig::default()
/// };
/// let control = AbortControl::new();
/// let mut engine = EvolutionEngine::<Vec<bool>>::new(true);
///
/// let ids = TerminationBuilder::from_config(&config)
///     .with_abort_control(&control)
///     .register(&mut engine)
///     .unwrap();
/// assert_eq!(ids.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct TerminationBuilder {
    config: TerminationConfig,
    abort: Option<AbortSignal>,
}

impl TerminationBuilder {
    pub fn from_config(config: &TerminationConfig) -> Self {
        Self {
            config: config.clone(),
            abort: None,
        }
    }

    /// Registers the control's signal too, unless the configuration
    /// disables aborting.
    pub fn with_abort_control(mut self, control: &AbortControl) -> Self {
        if self.config.abortable {
            self.abort = Some(control.termination_condition());
        } else {
            tracing::warn!("abort control supplied but termination is not abortable; ignoring");
        }
        self
    }

    /// Builds every configured condition.
    ///
    /// Conditions come out in a fixed order: abort, generation count,
    /// target fitness, elapsed time, stagnation.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidCondition`] for zero-valued limits and
    /// [`EngineError::NoTerminationConditions`] if the configuration yields
    /// no condition at all.
    pub fn build<C>(self) -> Result<Vec<Box<dyn Termination<C>>>, EngineError> {
        let config = self.config;
        let mut conditions: Vec<Box<dyn Termination<C>>> = Vec::new();

        if let Some(abort) = self.abort {
            conditions.push(Box::new(abort));
        }
        if let Some(limit) = config.generation_count_limit {
            conditions.push(Box::new(GenerationCountTermination::new(limit)?));
        }
        if let Some(target) = config.target_fitness {
            conditions.push(Box::new(TargetFitnessTermination::new(
                target,
                config.natural_fitness,
            )?));
        }
        if let Some(limit) = config.time_limit() {
            conditions.push(Box::new(ElapsedTimeTermination::new(limit)?));
        }
        if let Some(limit) = config.stagnation_generation_limit {
            conditions.push(Box::new(StagnationTermination::new(
                limit,
                config.natural_fitness,
            )?));
        }

        if conditions.is_empty() {
            return Err(EngineError::NoTerminationConditions);
        }
        Ok(conditions)
    }

    /// Builds the configured conditions and registers them with `engine`.
    ///
    /// Nothing is registered if any condition fails to build.
    pub fn register<C>(
        self,
        engine: &mut EvolutionEngine<C>,
    ) -> Result<Vec<TerminationId>, EngineError> {
        let conditions = self.build::<C>()?;
        Ok(conditions
            .into_iter()
            .map(|condition| engine.add_termination_boxed(condition))
            .collect())
    }
}

#[cfg(test)]
#[path = "builder_tests.rs"]
mod tests;
