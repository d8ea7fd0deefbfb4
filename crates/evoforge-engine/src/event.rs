//! Observers notified as an evolution run progresses.
//!
//! Observers are invoked synchronously on the thread driving the run, after
//! each generation's statistics are known and before termination conditions
//! are evaluated.
//!
//! # Usage
//!
//! ```
//! use std::sync::Arc;
//! use evoforge_engine::event::{CountingObserver, EvolutionObserver, ObserverSupport};
//!
//! let mut support = ObserverSupport::<String>::new();
//! let counter = Arc::new(CountingObserver::new());
//! support.add_observer(counter.clone());
//! assert_eq!(support.observer_count(), 1);
//! ```

use std::fmt::Debug;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::population::PopulationData;

/// Receives a snapshot of the population after every generation.
pub trait EvolutionObserver<C>: Send + Sync + Debug {
    /// Called once per generation with that generation's statistics.
    fn population_update(&self, data: &PopulationData<C>);

    /// Called when a run stops.
    ///
    /// # Arguments
    ///
    /// * `data` - Statistics of the final generation
    /// * `satisfied` - Names of the conditions that stopped the run
    fn run_ended(&self, _data: &PopulationData<C>, _satisfied: &[&str]) {}
}

/// Broadcasts run events to registered observers in registration order.
pub struct ObserverSupport<C> {
    observers: Vec<Arc<dyn EvolutionObserver<C>>>,
}

impl<C> ObserverSupport<C> {
    pub fn new() -> Self {
        Self {
            observers: Vec::new(),
        }
    }

    pub fn add_observer(&mut self, observer: Arc<dyn EvolutionObserver<C>>) {
        self.observers.push(observer);
    }

    /// Removes a previously added observer, compared by pointer identity.
    pub fn remove_observer(&mut self, observer: &Arc<dyn EvolutionObserver<C>>) -> bool {
        let before = self.observers.len();
        self.observers.retain(|o| !Arc::ptr_eq(o, observer));
        self.observers.len() != before
    }

    pub fn clear_observers(&mut self) {
        self.observers.clear();
    }

    pub fn fire_population_update(&self, data: &PopulationData<C>) {
        for observer in &self.observers {
            observer.population_update(data);
        }
    }

    pub fn fire_run_ended(&self, data: &PopulationData<C>, satisfied: &[&str]) {
        for observer in &self.observers {
            observer.run_ended(data, satisfied);
        }
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }
}

impl<C> Default for ObserverSupport<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> Debug for ObserverSupport<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObserverSupport")
            .field("observers", &self.observers.len())
            .finish()
    }
}

/// An observer that logs each generation through `tracing`.
#[derive(Debug, Clone, Default)]
pub struct LoggingObserver {
    /// Emit every n-th generation; 0 or 1 logs all of them.
    every: u64,
}

impl LoggingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Logs only every `every`-th generation.
    pub fn every(every: u64) -> Self {
        Self { every }
    }
}

impl<C: Debug> EvolutionObserver<C> for LoggingObserver {
    fn population_update(&self, data: &PopulationData<C>) {
        if self.every > 1 && data.generation_number % self.every != 0 {
            return;
        }
        tracing::info!(
            event = "progress",
            generation = data.generation_number,
            best_fitness = data.best_fitness,
            mean_fitness = data.mean_fitness,
            best_candidate = ?data.best_candidate,
        );
    }
}

/// An observer that counts events.
///
/// Useful for testing and statistics collection.
#[derive(Debug, Default)]
pub struct CountingObserver {
    updates: AtomicU64,
    runs_ended: AtomicU64,
}

impl CountingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update_count(&self) -> u64 {
        self.updates.load(Ordering::SeqCst)
    }

    pub fn runs_ended(&self) -> u64 {
        self.runs_ended.load(Ordering::SeqCst)
    }

    pub fn reset(&self) {
        self.updates.store(0, Ordering::SeqCst);
        self.runs_ended.store(0, Ordering::SeqCst);
    }
}

impl<C> EvolutionObserver<C> for CountingObserver {
    fn population_update(&self, _data: &PopulationData<C>) {
        self.updates.fetch_add(1, Ordering::SeqCst);
    }

    fn run_ended(&self, _data: &PopulationData<C>, _satisfied: &[&str]) {
        self.runs_ended.fetch_add(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
