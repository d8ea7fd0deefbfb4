//! Test utilities for evoforge-engine
//!
//! Provides common fixtures used across the crate's test modules.

use std::time::Duration;

use rand::Rng;

use crate::population::{GenerationStats, PopulationData};
use crate::scope::EvolutionScope;

/// Builds population data for a given generation and best fitness.
pub fn population_data(generation_number: u64, best_fitness: f64) -> PopulationData<u32> {
    PopulationData {
        best_candidate: 0,
        best_fitness,
        mean_fitness: best_fitness,
        fitness_std_dev: 0.0,
        natural_fitness: true,
        population_size: 10,
        elite_count: 0,
        generation_number,
        elapsed: Duration::ZERO,
    }
}

/// Same as [`population_data`] with an explicit elapsed time.
pub fn population_data_at(
    generation_number: u64,
    best_fitness: f64,
    elapsed: Duration,
) -> PopulationData<u32> {
    PopulationData {
        elapsed,
        ..population_data(generation_number, best_fitness)
    }
}

/// A step whose best fitness equals the generation number.
pub fn climbing_step(scope: &mut EvolutionScope) -> GenerationStats<u32> {
    let generation = scope.generation_number();
    GenerationStats::new(generation as u32, generation as f64, 10)
}

/// A step whose fitness never changes.
pub fn flat_step(_scope: &mut EvolutionScope) -> GenerationStats<u32> {
    GenerationStats::new(0, 1.0, 10)
}

/// OneMax: maximize the number of set bits with a (1+λ) mutation strategy.
///
/// Deterministic for a seeded scope, which makes it suitable for asserting
/// on run outcomes.
#[derive(Debug, Clone)]
pub struct OneMax {
    best: Vec<bool>,
    offspring: usize,
}

impl OneMax {
    pub fn new(bits: usize, offspring: usize) -> Self {
        Self {
            best: vec![false; bits],
            offspring,
        }
    }

    pub fn step(&mut self, scope: &mut EvolutionScope) -> GenerationStats<Vec<bool>> {
        let bits = self.best.len();
        let rate = 1.0 / bits.max(1) as f64;
        let mut fitness = Vec::with_capacity(self.offspring + 1);
        fitness.push(count_ones(&self.best));

        let mut best = self.best.clone();
        let mut best_fitness = fitness[0];
        for _ in 0..self.offspring {
            let child: Vec<bool> = self
                .best
                .iter()
                .map(|&bit| if scope.rng().random_bool(rate) { !bit } else { bit })
                .collect();
            let child_fitness = count_ones(&child);
            fitness.push(child_fitness);
            if child_fitness > best_fitness {
                best_fitness = child_fitness;
                best = child;
            }
        }

        self.best = best.clone();
        GenerationStats::from_fitness(best, &fitness, true)
    }
}

fn count_ones(bits: &[bool]) -> f64 {
    bits.iter().filter(|&&b| b).count() as f64
}
