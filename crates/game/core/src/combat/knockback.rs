use crate::config::GameConfig;
use crate::error::{ErrorSeverity, GameError};
use crate::movement::{Pickup, update_unit_position};
use crate::state::{GameState, Position, UnitId};

/// Why a push was skipped. The triggering attack still applies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum KnockbackFailure {
    #[error("knockback destination is outside the map")]
    OutOfBounds,

    #[error("knockback destination is not walkable")]
    BlockedTerrain,

    #[error("knockback destination is occupied")]
    BlockedOccupied,

    #[error("attacker or target is missing")]
    InternalError,
}

impl GameError for KnockbackFailure {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InternalError => ErrorSeverity::Internal,
            _ => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::OutOfBounds => "KNOCKBACK_OUT_OF_BOUNDS",
            Self::BlockedTerrain => "KNOCKBACK_BLOCKED_TERRAIN",
            Self::BlockedOccupied => "KNOCKBACK_BLOCKED_OCCUPIED",
            Self::InternalError => "KNOCKBACK_INTERNAL_ERROR",
        }
    }
}

/// Outcome of a push attempt.
///
/// `reason` is `None` exactly when `success` is true. `destination` is the
/// computed cell whenever one could be computed, even on failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KnockbackResult {
    pub success: bool,
    pub destination: Option<Position>,
    pub reason: Option<KnockbackFailure>,
    /// Resource collected where the target landed.
    pub pickup: Option<Pickup>,
}

impl KnockbackResult {
    fn pushed(destination: Position, pickup: Option<Pickup>) -> Self {
        Self {
            success: true,
            destination: Some(destination),
            reason: None,
            pickup,
        }
    }

    fn failed(destination: Option<Position>, reason: KnockbackFailure) -> Self {
        Self {
            success: false,
            destination,
            reason: Some(reason),
            pickup: None,
        }
    }
}

/// `target + sign(target - attacker)` on each axis.
///
/// Diagonal attacks push diagonally. When both positions coincide the push
/// defaults to one row down.
pub fn calculate_knockback_destination(attacker: Position, target: Position) -> Position {
    let (d_row, d_col) = attacker.step_towards(target);
    if d_row == 0 && d_col == 0 {
        tracing::warn!(%attacker, %target, "attacker and target coincide, pushing down");
        return target.offset(1, 0);
    }
    target.offset(d_row, d_col)
}

/// Pushes `target` one tile away from `attacker`.
///
/// The target is only relocated on success; arriving on a pickup collects it.
pub fn apply_knockback(
    state: &mut GameState,
    config: &GameConfig,
    attacker: UnitId,
    target: UnitId,
) -> KnockbackResult {
    let (Some(from), Some(victim)) = (
        state.unit(attacker).map(|u| u.position),
        state.unit(target).map(|u| u.position),
    ) else {
        tracing::error!(%attacker, %target, "knockback between missing units");
        return KnockbackResult::failed(None, KnockbackFailure::InternalError);
    };

    let destination = calculate_knockback_destination(from, victim);
    let failure = match state.tile(destination) {
        None => Some(KnockbackFailure::OutOfBounds),
        Some(tile) if !tile.is_walkable() => Some(KnockbackFailure::BlockedTerrain),
        Some(_) if state.is_occupied_by_other(destination, target) => {
            Some(KnockbackFailure::BlockedOccupied)
        }
        Some(_) => None,
    };
    if let Some(reason) = failure {
        tracing::debug!(%target, %destination, %reason, "knockback skipped");
        return KnockbackResult::failed(Some(destination), reason);
    }

    let pickup = update_unit_position(state, config, target, destination);
    tracing::debug!(%attacker, %target, %destination, "knocked back");
    KnockbackResult::pushed(destination, pickup)
}
