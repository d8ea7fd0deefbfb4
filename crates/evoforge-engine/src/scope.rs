//! Run-level scope handed to the caller's generation step.

use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Mutable state for one evolution run.
///
/// Owns the run's random number generator so that seeded runs are
/// reproducible, and tracks the generation counter and start time the
/// engine uses to build [`PopulationData`](crate::population::PopulationData).
#[derive(Debug)]
pub struct EvolutionScope {
    rng: StdRng,
    start_time: Option<Instant>,
    generation_number: u64,
}

impl EvolutionScope {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
            start_time: None,
            generation_number: 0,
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            start_time: None,
            generation_number: 0,
        }
    }

    pub fn start_run(&mut self) {
        self.start_time = Some(Instant::now());
        self.generation_number = 0;
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.map(|t| t.elapsed()).unwrap_or_default()
    }

    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    /// Zero-based index of the generation currently being produced.
    pub fn generation_number(&self) -> u64 {
        self.generation_number
    }

    pub(crate) fn advance_generation(&mut self) -> u64 {
        self.generation_number += 1;
        self.generation_number
    }
}

impl Default for EvolutionScope {
    fn default() -> Self {
        Self::new()
    }
}
