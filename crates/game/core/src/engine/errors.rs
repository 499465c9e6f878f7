//! Error types for the simulation drivers.

use crate::env::LineupError;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{GameId, TeamId};

/// Precondition failures of a simulation call.
///
/// Every variant is raised before the engine touches the game, so a failed call
/// leaves state, seed and status exactly as they were.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SimulationError {
    #[error("{team} cannot take the field: {reason}")]
    InvalidLineup { team: TeamId, reason: LineupError },

    #[error("no rule set supplied to the engine")]
    MissingRuleSet,

    #[error("{game} is already finished")]
    GameAlreadyFinished { game: GameId },
}

impl SimulationError {
    pub(crate) fn lineup(team: TeamId, reason: LineupError) -> Self {
        Self::InvalidLineup { team, reason }
    }
}

impl GameError for SimulationError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InvalidLineup { .. } | Self::MissingRuleSet => ErrorSeverity::Recoverable,
            Self::GameAlreadyFinished { .. } => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidLineup { .. } => "SIM_INVALID_LINEUP",
            Self::MissingRuleSet => "SIM_MISSING_RULE_SET",
            Self::GameAlreadyFinished { .. } => "SIM_GAME_ALREADY_FINISHED",
        }
    }
}
