//! Configuration system for EvoForge.
//!
//! Load evolution run configuration from TOML or YAML files to control
//! population sizing and termination without code changes.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use evoforge_config::EvolutionConfig;
//! use std::time::Duration;
//!
//! let config = EvolutionConfig::from_toml_str(r#"
//!     population_size = 200
//!     elite_count = 4
//!
//!     [termination]
//!     generation_count_limit = 500
//!     seconds_spent_limit = 30
//!     target_fitness = 0.0
//!     natural_fitness = false
//! "#).unwrap();
//!
//! assert_eq!(config.time_limit(), Some(Duration::from_secs(30)));
//! assert_eq!(config.population_size, 200);
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use evoforge_config::EvolutionConfig;
//!
//! let config = EvolutionConfig::load("evolution.toml").unwrap_or_default();
//! // Proceeds with defaults if file doesn't exist
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

fn default_population_size() -> usize {
    100
}

fn default_true() -> bool {
    true
}

/// Main evolution run configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct EvolutionConfig {
    /// Number of candidates per generation.
    #[serde(default = "default_population_size")]
    pub population_size: usize,

    /// Number of fittest candidates copied unchanged into the next generation.
    #[serde(default)]
    pub elite_count: usize,

    /// Random seed for reproducible runs.
    #[serde(default)]
    pub random_seed: Option<u64>,

    /// Termination configuration.
    #[serde(default)]
    pub termination: Option<TerminationConfig>,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: default_population_size(),
            elite_count: 0,
            random_seed: None,
            termination: None,
        }
    }
}

impl EvolutionConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist or contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Sets the population size.
    pub fn with_population_size(mut self, size: usize) -> Self {
        self.population_size = size;
        self
    }

    /// Sets the elite count.
    pub fn with_elite_count(mut self, count: usize) -> Self {
        self.elite_count = count;
        self
    }

    /// Sets the termination time limit.
    pub fn with_termination_seconds(mut self, seconds: u64) -> Self {
        self.termination = Some(TerminationConfig {
            seconds_spent_limit: Some(seconds),
            ..self.termination.unwrap_or_default()
        });
        self
    }

    /// Sets the generation count limit.
    pub fn with_generation_limit(mut self, generations: u64) -> Self {
        self.termination = Some(TerminationConfig {
            generation_count_limit: Some(generations),
            ..self.termination.unwrap_or_default()
        });
        self
    }

    /// Sets the random seed.
    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    /// Returns the termination time limit, if configured.
    ///
    /// Convenience method that delegates to `termination.time_limit()`.
    pub fn time_limit(&self) -> Option<Duration> {
        self.termination.as_ref().and_then(|t| t.time_limit())
    }

    /// Checks cross-field constraints serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for an empty population, an elite
    /// that fills the whole population, a zero-valued termination limit,
    /// a time limit that overflows, or a non-finite target fitness.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size == 0 {
            return Err(ConfigError::Invalid(
                "population_size must be greater than zero".to_string(),
            ));
        }
        if self.elite_count >= self.population_size {
            return Err(ConfigError::Invalid(format!(
                "elite_count ({}) must be less than population_size ({})",
                self.elite_count, self.population_size
            )));
        }
        if let Some(termination) = &self.termination {
            termination.validate()?;
        }
        Ok(())
    }
}

/// Termination configuration.
///
/// Every limit is optional; the run stops as soon as any configured
/// condition is satisfied.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TerminationConfig {
    /// Maximum number of generations.
    pub generation_count_limit: Option<u64>,

    /// Fitness value that ends the run once reached.
    pub target_fitness: Option<f64>,

    /// Whether higher fitness is better. Governs `target_fitness` and
    /// stagnation detection.
    #[serde(default = "default_true")]
    pub natural_fitness: bool,

    /// Maximum seconds to spend evolving.
    pub seconds_spent_limit: Option<u64>,

    /// Maximum minutes to spend evolving.
    pub minutes_spent_limit: Option<u64>,

    /// Maximum consecutive generations without best-fitness improvement.
    pub stagnation_generation_limit: Option<u64>,

    /// Whether an abort control may stop the run.
    #[serde(default = "default_true")]
    pub abortable: bool,
}

impl Default for TerminationConfig {
    fn default() -> Self {
        Self {
            generation_count_limit: None,
            target_fitness: None,
            natural_fitness: true,
            seconds_spent_limit: None,
            minutes_spent_limit: None,
            stagnation_generation_limit: None,
            abortable: true,
        }
    }
}

impl TerminationConfig {
    /// Returns the time limit as a Duration, if any.
    ///
    /// A limit too large to count in seconds saturates to the longest
    /// representable one; [`EvolutionConfig::validate`] rejects it.
    pub fn time_limit(&self) -> Option<Duration> {
        let seconds = self.time_limit_secs().unwrap_or(u64::MAX);
        if seconds > 0 {
            Some(Duration::from_secs(seconds))
        } else {
            None
        }
    }

    fn time_limit_secs(&self) -> Option<u64> {
        self.minutes_spent_limit
            .unwrap_or(0)
            .checked_mul(60)?
            .checked_add(self.seconds_spent_limit.unwrap_or(0))
    }

    /// Returns true if any limit is configured.
    ///
    /// An abortable run with no limits only ends when aborted.
    pub fn has_limits(&self) -> bool {
        self.generation_count_limit.is_some()
            || self.target_fitness.is_some()
            || self.time_limit().is_some()
            || self.stagnation_generation_limit.is_some()
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.generation_count_limit == Some(0) {
            return Err(ConfigError::Invalid(
                "generation_count_limit must be greater than zero".to_string(),
            ));
        }
        if self.stagnation_generation_limit == Some(0) {
            return Err(ConfigError::Invalid(
                "stagnation_generation_limit must be greater than zero".to_string(),
            ));
        }
        if self.time_limit_secs().is_none() {
            return Err(ConfigError::Invalid(
                "seconds_spent_limit and minutes_spent_limit overflow a time limit in seconds"
                    .to_string(),
            ));
        }
        if let Some(target) = self.target_fitness {
            if !target.is_finite() {
                return Err(ConfigError::Invalid(format!(
                    "target_fitness must be finite, got {target}"
                )));
            }
        }
        Ok(())
    }
}
