//! EvoForge - evolutionary run control in Rust
//!
//! Register termination conditions, hand a user-facing abort control to
//! whatever should be able to stop the run, and drive generations with
//! your own selection and variation step.
//!
//! # Example
//!
//! ```rust
//! use evoforge::prelude::*;
//!
//! let control = AbortControl::new();
//! let mut engine = EvolutionEngine::<f64>::new(false);
//! let abort = engine.add_termination(control.termination_condition());
//! let target = TargetFitnessTermination::new(0.001, false).unwrap();
//! let target = engine.add_termination(target);
//!
//! // Reset before every run, including the first.
//! control.reset();
//! let mut x = 10.0_f64;
//! let last = engine
//!     .evolve(|_scope| {
//!         x *= 0.5;
//!         GenerationStats::new(x, x * x, 1)
//!     })
//!     .unwrap();
//!
//! assert!(last.best_fitness <= 0.001);
//! assert!(engine.was_satisfied(target).unwrap());
//! assert!(!engine.was_satisfied(abort).unwrap());
//! ```

pub use evoforge_config::{ConfigError, EvolutionConfig, TerminationConfig};
pub use evoforge_engine::{
    builder, control, engine, event, population, scope, termination, AbortControl, AbortSignal,
    AbortTrigger, AndTermination, ControlState, CountingObserver, ElapsedTimeTermination,
    EngineError, EvolutionEngine, EvolutionObserver, EvolutionScope, GenerationCountTermination,
    GenerationStats, LoggingObserver, OrTermination, PopulationData, StagnationTermination,
    TargetFitnessTermination, Termination, TerminationBuilder, TerminationId, TerminationSet,
};

/// Console output, available with the `console` feature.
#[cfg(feature = "console")]
pub use evoforge_console as console;

/// Commonly used types.
pub mod prelude {
    pub use evoforge_config::{EvolutionConfig, TerminationConfig};
    pub use evoforge_engine::{
        AbortControl, AbortSignal, ElapsedTimeTermination, EngineError, EvolutionEngine,
        EvolutionObserver, GenerationCountTermination, GenerationStats, PopulationData,
        StagnationTermination, TargetFitnessTermination, Termination,
    };
}
