//! Per-generation population statistics.
//!
//! [`GenerationStats`] is what a caller's generation step reports back to the
//! engine. The engine adds the generation number, elapsed time and run
//! settings to produce the [`PopulationData`] that termination conditions
//! and observers see.

use std::time::Duration;

/// Fitness summary of one evaluated generation, as reported by the caller.
#[derive(Debug, Clone)]
pub struct GenerationStats<C> {
    /// Fittest candidate of the generation.
    pub best_candidate: C,
    /// Fitness of `best_candidate`.
    pub best_fitness: f64,
    /// Arithmetic mean fitness over the population.
    pub mean_fitness: f64,
    /// Population standard deviation of the fitness values.
    pub fitness_std_dev: f64,
    /// Number of candidates evaluated in this generation.
    pub population_size: usize,
}

impl<C> GenerationStats<C> {
    /// Creates stats for a generation summarized only by its best candidate.
    ///
    /// Mean equals best and deviation is zero; use [`Self::from_fitness`]
    /// when the full fitness distribution is available.
    pub fn new(best_candidate: C, best_fitness: f64, population_size: usize) -> Self {
        Self {
            best_candidate,
            best_fitness,
            mean_fitness: best_fitness,
            fitness_std_dev: 0.0,
            population_size,
        }
    }

    /// Computes stats from every candidate's fitness.
    ///
    /// `best_fitness` is the maximum of `fitness` when `natural` is true and
    /// the minimum otherwise. An empty slice yields NaN summary values and a
    /// population size of zero.
    ///
    /// # Example
    ///
    /// ```
    /// use evoforge_engine::population::GenerationStats;
    ///
    /// let stats = GenerationStats::from_fitness("abc", &[1.0, 3.0, 2.0], true);
    /// assert_eq!(stats.best_fitness, 3.0);
    /// assert_eq!(stats.mean_fitness, 2.0);
    /// ```
    pub fn from_fitness(best_candidate: C, fitness: &[f64], natural: bool) -> Self {
        if fitness.is_empty() {
            return Self {
                best_candidate,
                best_fitness: f64::NAN,
                mean_fitness: f64::NAN,
                fitness_std_dev: f64::NAN,
                population_size: 0,
            };
        }

        let n = fitness.len() as f64;
        let best = if natural {
            fitness.iter().copied().fold(f64::NEG_INFINITY, f64::max)
        } else {
            fitness.iter().copied().fold(f64::INFINITY, f64::min)
        };
        let mean = fitness.iter().sum::<f64>() / n;
        let variance = fitness.iter().map(|f| (f - mean).powi(2)).sum::<f64>() / n;

        Self {
            best_candidate,
            best_fitness: best,
            mean_fitness: mean,
            fitness_std_dev: variance.sqrt(),
            population_size: fitness.len(),
        }
    }
}

/// Immutable snapshot of the population after a generation.
///
/// This is the evaluation context handed to every
/// [`Termination`](crate::termination::Termination) and
/// [`EvolutionObserver`](crate::event::EvolutionObserver).
#[derive(Debug, Clone)]
pub struct PopulationData<C> {
    /// Fittest candidate of the generation.
    pub best_candidate: C,
    /// Fitness of `best_candidate`.
    pub best_fitness: f64,
    /// Arithmetic mean fitness over the population.
    pub mean_fitness: f64,
    /// Population standard deviation of the fitness values.
    pub fitness_std_dev: f64,
    /// True if higher fitness is better.
    pub natural_fitness: bool,
    /// Number of candidates in the generation.
    pub population_size: usize,
    /// Number of candidates carried over unchanged.
    pub elite_count: usize,
    /// Zero-based index of the generation.
    pub generation_number: u64,
    /// Time since the run started.
    pub elapsed: Duration,
}

impl<C> PopulationData<C> {
    /// Combines caller stats with engine bookkeeping.
    pub fn from_stats(
        stats: GenerationStats<C>,
        natural_fitness: bool,
        elite_count: usize,
        generation_number: u64,
        elapsed: Duration,
    ) -> Self {
        Self {
            best_candidate: stats.best_candidate,
            best_fitness: stats.best_fitness,
            mean_fitness: stats.mean_fitness,
            fitness_std_dev: stats.fitness_std_dev,
            natural_fitness,
            population_size: stats.population_size,
            elite_count,
            generation_number,
            elapsed,
        }
    }
}
