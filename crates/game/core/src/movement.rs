//! One-step movement and destination safety.
//!
//! # Tie-breaks
//!
//! Callers must not rely on the order of [`valid_moves`]. Whenever several
//! moves are equally good, the injected [`RandomSource`] picks one uniformly:
//! - [`move_towards`]: uniform among the moves with the minimum resulting
//!   Manhattan distance, if that distance is an improvement; otherwise
//!   uniform among the moves that keep the distance unchanged
//! - [`move_randomly`]: uniform among all valid moves

use arrayvec::ArrayVec;

use crate::config::GameConfig;
use crate::env::{RandomSource, choose};
use crate::perception::has_clear_line_of_sight;
use crate::state::{CARDINAL_OFFSETS, GameState, Position, ResourceKind, TileKind, UnitId};

/// A committed single-tile move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveRecord {
    pub unit: UnitId,
    pub from: Position,
    pub to: Position,
    /// Resource collected on arrival, if the destination held one.
    pub pickup: Option<Pickup>,
}

/// A consumed resource tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pickup {
    pub unit: UnitId,
    pub position: Position,
    pub resource: ResourceKind,
    pub amount: u32,
}

/// Lists the cardinal neighbours `unit` may step onto.
///
/// A destination is valid when it lies inside the map and the safe zone, is
/// walkable, and is not occupied by another living unit.
pub fn valid_moves(state: &GameState, unit: UnitId) -> ArrayVec<Position, 4> {
    let mut moves = ArrayVec::new();
    let Some(origin) = state.living_unit(unit).map(|u| u.position) else {
        tracing::warn!(%unit, "valid moves requested for a missing or dead unit");
        return moves;
    };

    for (d_row, d_col) in CARDINAL_OFFSETS {
        let destination = origin.offset(d_row, d_col);
        let walkable = state
            .tile(destination)
            .is_some_and(TileKind::is_walkable);
        if walkable
            && state.safe_zone.contains(destination)
            && !state.is_occupied_by_other(destination, unit)
        {
            moves.push(destination);
        }
    }
    moves
}

/// Relocates `unit` and applies the pickup at the destination atomically.
///
/// The destination tile reverts to land and the configured amount is added
/// to the unit's resources. Returns the pickup, if any.
pub fn update_unit_position(
    state: &mut GameState,
    config: &GameConfig,
    unit: UnitId,
    destination: Position,
) -> Option<Pickup> {
    if !state.map.contains(destination) {
        tracing::error!(%unit, %destination, "refusing to move unit off the map");
        return None;
    }
    let resource = state.tile(destination).and_then(TileKind::resource);

    let Some(mover) = state.unit_mut(unit) else {
        tracing::error!(%unit, "position update for a missing unit");
        return None;
    };
    mover.position = destination;

    let resource = resource?;
    let amount = match resource {
        ResourceKind::Medkit => config.medkit_pickup_amount,
        ResourceKind::Ammo => config.ammo_pickup_amount,
    };
    mover.resources.add(resource, amount);
    state.map.set(destination, TileKind::Land);

    tracing::debug!(%unit, %destination, %resource, amount, "picked up resource");
    Some(Pickup {
        unit,
        position: destination,
        resource,
        amount,
    })
}

fn commit_move(
    state: &mut GameState,
    config: &GameConfig,
    unit: UnitId,
    destination: Position,
) -> Option<MoveRecord> {
    let from = state.unit(unit)?.position;
    let pickup = update_unit_position(state, config, unit, destination);
    Some(MoveRecord {
        unit,
        from,
        to: destination,
        pickup,
    })
}

/// Steps `unit` one tile towards `target`.
///
/// Strictly closer moves are preferred; when none exist a sideways move that
/// keeps the distance is taken. Returns `None` without moving otherwise.
///
/// Every cardinal step changes the Manhattan distance by exactly one, so the
/// sideways set is empty for the current move set and a unit with no closer
/// move stays put.
pub fn move_towards<R>(
    state: &mut GameState,
    config: &GameConfig,
    rng: &mut R,
    unit: UnitId,
    target: Position,
) -> Option<MoveRecord>
where
    R: RandomSource + ?Sized,
{
    let origin = state.living_unit(unit)?.position;
    let current = origin.manhattan(target);
    let moves = valid_moves(state, unit);

    let best = moves.iter().map(|m| m.manhattan(target)).min()?;
    let candidates: ArrayVec<Position, 4> = if best < current {
        moves
            .iter()
            .copied()
            .filter(|m| m.manhattan(target) == best)
            .collect()
    } else {
        moves
            .iter()
            .copied()
            .filter(|m| m.manhattan(target) == current)
            .collect()
    };

    let destination = *choose(rng, &candidates)?;
    commit_move(state, config, unit, destination)
}

/// Steps `unit` onto a uniformly random valid neighbour.
pub fn move_randomly<R>(
    state: &mut GameState,
    config: &GameConfig,
    rng: &mut R,
    unit: UnitId,
) -> Option<MoveRecord>
where
    R: RandomSource + ?Sized,
{
    let moves = valid_moves(state, unit);
    let destination = *choose(rng, &moves)?;
    commit_move(state, config, unit, destination)
}

/// Commits a move chosen by the caller, after re-checking it is still valid.
pub fn move_to(
    state: &mut GameState,
    config: &GameConfig,
    unit: UnitId,
    destination: Position,
) -> Option<MoveRecord> {
    if !valid_moves(state, unit).contains(&destination) {
        tracing::warn!(%unit, %destination, "chosen destination is no longer valid");
        return None;
    }
    commit_move(state, config, unit, destination)
}

/// Checks whether stepping onto `destination` keeps `unit` out of reach of
/// bystanders.
///
/// Unsafe iff some living unit other than `unit` and its primary target is
/// visible to `unit` within its detection range and Chebyshev-adjacent to
/// `destination`.
pub fn is_move_safe(state: &GameState, unit: UnitId, destination: Position) -> bool {
    let Some(mover) = state.living_unit(unit) else {
        tracing::warn!(%unit, "safety check for a missing or dead unit");
        return false;
    };

    !state.living_units().any(|threat| {
        threat.id != unit
            && Some(threat.id) != mover.target_enemy
            && threat.position.chebyshev(destination) <= 1
            && has_clear_line_of_sight(
                state,
                mover.position,
                threat.position,
                mover.detection_range,
            )
    })
}
