//! Engine error types.

use evoforge_config::ConfigError;
use thiserror::Error;

/// Errors raised while configuring or querying an evolution run.
///
/// Aborting never fails; these cover engine misuse and invalid settings.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("no termination conditions registered; the run could never stop")]
    NoTerminationConditions,

    #[error("no evolution run has terminated yet")]
    NotTerminated,

    #[error("invalid termination condition: {0}")]
    InvalidCondition(String),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}
