//! Unified error types surfaced by the runtime API.
//!
//! Wraps engine precondition failures and repository failures so clients can
//! bubble them up with consistent context.
use ballpark_core::{ErrorSeverity, GameError, GameId, SimulationError};
use thiserror::Error;

use crate::oracle::RuleSetId;
pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Simulation(#[from] SimulationError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("{game} is not stored")]
    GameNotFound { game: GameId },

    #[error("rule set '{rule_set}' is not registered")]
    RuleSetNotFound { rule_set: RuleSetId },

    #[error("simulator requires oracles to be configured before building")]
    MissingOracles,

    #[error("plate log lock was poisoned")]
    LogLockPoisoned,
}

impl GameError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Simulation(err) => err.severity(),
            Self::GameNotFound { .. } | Self::RuleSetNotFound { .. } => ErrorSeverity::Validation,
            Self::Repository(_) | Self::MissingOracles | Self::LogLockPoisoned => {
                ErrorSeverity::Internal
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Simulation(err) => err.error_code(),
            Self::Repository(_) => "RUNTIME_REPOSITORY",
            Self::GameNotFound { .. } => "RUNTIME_GAME_NOT_FOUND",
            Self::RuleSetNotFound { .. } => "RUNTIME_RULE_SET_NOT_FOUND",
            Self::MissingOracles => "RUNTIME_MISSING_ORACLES",
            Self::LogLockPoisoned => "RUNTIME_LOG_LOCK_POISONED",
        }
    }
}
