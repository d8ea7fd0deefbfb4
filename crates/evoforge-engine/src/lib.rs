//! EvoForge Engine
//!
//! This crate decides when an evolutionary run stops:
//! - Termination conditions (generation count, target fitness, elapsed
//!   time, stagnation, user abort) and AND/OR composites
//! - A thread-safe, resettable abort signal and the control that arms it
//! - The evolution loop that evaluates every condition after each
//!   generation and reports which ones were satisfied
//! - Observers for monitoring runs
//! - Configuration wiring (builder module)
//!
//! Selection, variation and fitness evaluation are supplied by the caller
//! as a per-generation step.

pub mod builder;
pub mod control;
pub mod engine;
pub mod error;
pub mod event;
pub mod population;
pub mod scope;
pub mod termination;

#[cfg(test)]
mod test_utils;

pub use builder::TerminationBuilder;
pub use control::{AbortControl, AbortTrigger, ControlState};
pub use engine::EvolutionEngine;
pub use error::EngineError;
pub use event::{CountingObserver, EvolutionObserver, LoggingObserver, ObserverSupport};
pub use population::{GenerationStats, PopulationData};
pub use scope::EvolutionScope;
pub use termination::{
    AbortSignal, AndTermination, ElapsedTimeTermination, GenerationCountTermination,
    OrTermination, StagnationTermination, TargetFitnessTermination, Termination, TerminationId,
    TerminationSet,
};
