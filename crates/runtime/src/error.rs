//! Errors surfaced by the turn orchestrator.
use arena_core::{ErrorSeverity, GameError, UnitId};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum RuntimeError {
    #[error("unit {0} does not exist")]
    UnknownUnit(UnitId),

    #[error("unit {0} is defeated and cannot act")]
    UnitDefeated(UnitId),

    #[error("unit {0} is not controlled by the AI")]
    NotAiControlled(UnitId),

    #[error("the player has been defeated")]
    PlayerDefeated,
}

impl GameError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnknownUnit(_) | Self::NotAiControlled(_) => ErrorSeverity::Validation,
            Self::UnitDefeated(_) | Self::PlayerDefeated => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownUnit(_) => "RUNTIME_UNKNOWN_UNIT",
            Self::UnitDefeated(_) => "RUNTIME_UNIT_DEFEATED",
            Self::NotAiControlled(_) => "RUNTIME_NOT_AI_CONTROLLED",
            Self::PlayerDefeated => "RUNTIME_PLAYER_DEFEATED",
        }
    }
}
