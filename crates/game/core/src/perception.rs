//! Visibility and search primitives.
//!
//! Line of sight is traced over the discrete Bresenham line between two
//! cells. Walls, trees and the map edge block it; the endpoints themselves
//! never do. Range checks are Euclidean for general sight and Manhattan for
//! the cardinal firing lines used by ranged attacks.

use crate::state::{GameState, Position, ResourceKind, UnitId};

/// Cells on the Bresenham line from `from` to `to`, both endpoints included.
pub fn line_cells(from: Position, to: Position) -> Vec<Position> {
    let d_row = to.row.abs_diff(from.row) as i32;
    let d_col = to.col.abs_diff(from.col) as i32;
    let step_row = (to.row - from.row).signum();
    let step_col = (to.col - from.col).signum();

    let mut cells = Vec::with_capacity(d_row.max(d_col) as usize + 1);
    let mut current = from;
    let mut err = d_col - d_row;

    loop {
        cells.push(current);
        if current == to {
            break;
        }
        let doubled = 2 * err;
        if doubled > -d_row {
            err -= d_row;
            current.col += step_col;
        }
        if doubled < d_col {
            err += d_col;
            current.row += step_row;
        }
    }
    cells
}

/// True when no intermediate cell is off-map or blocks sight.
fn is_path_clear(state: &GameState, cells: &[Position]) -> bool {
    if cells.len() <= 2 {
        return true;
    }
    cells[1..cells.len() - 1].iter().all(|cell| {
        state
            .tile(*cell)
            .map(|tile| !tile.blocks_sight())
            .unwrap_or(false)
    })
}

/// Checks whether `to` can be seen from `from` within `max_range` tiles.
///
/// The Euclidean distance must be greater than zero and at most `max_range`.
/// Both endpoints must lie on the map.
pub fn has_clear_line_of_sight(
    state: &GameState,
    from: Position,
    to: Position,
    max_range: u32,
) -> bool {
    if !state.map.contains(from) || !state.map.contains(to) {
        tracing::debug!(%from, %to, "line of sight requested for off-map cell");
        return false;
    }

    let distance_squared = from.distance_squared(to);
    let range = u64::from(max_range);
    if distance_squared == 0 || distance_squared > range * range {
        return false;
    }

    is_path_clear(state, &line_cells(from, to))
}

/// Checks a strictly horizontal or vertical firing line within `max_range`
/// (Manhattan) tiles. Any diagonal offset fails.
pub fn has_clear_cardinal_line_of_sight(
    state: &GameState,
    from: Position,
    to: Position,
    max_range: u32,
) -> bool {
    if !state.map.contains(from) || !state.map.contains(to) {
        return false;
    }
    if from.row != to.row && from.col != to.col {
        return false;
    }

    let distance = from.manhattan(to);
    if distance == 0 || distance > max_range {
        return false;
    }

    is_path_clear(state, &line_cells(from, to))
}

/// Finds the closest living hostile that `viewer` can see within its
/// detection range.
///
/// Candidates are the player (checked first) followed by the other living
/// enemies in turn order; the earliest candidate wins a distance tie.
pub fn find_nearest_visible_enemy(state: &GameState, viewer: UnitId) -> Option<UnitId> {
    let Some(unit) = state.living_unit(viewer) else {
        tracing::warn!(%viewer, "nearest-enemy search for a missing or dead unit");
        return None;
    };

    let mut best: Option<(u64, UnitId)> = None;
    for candidate in state.living_units().filter(|other| other.id != viewer) {
        let distance = unit.position.distance_squared(candidate.position);
        if best.is_some_and(|(best_distance, _)| distance >= best_distance) {
            continue;
        }
        let visible = has_clear_line_of_sight(
            state,
            unit.position,
            candidate.position,
            unit.detection_range,
        );
        if visible {
            best = Some((distance, candidate.id));
        }
    }
    best.map(|(_, id)| id)
}

/// Finds the nearest visible tile holding `kind` within a Chebyshev radius.
///
/// The scan is clipped to both the map and the safe zone, so resources
/// outside the zone or behind cover are never returned. Distance is
/// Manhattan; the first cell in row-major order wins a tie.
pub fn find_nearby_resource(
    state: &GameState,
    viewer: UnitId,
    range: u32,
    kind: ResourceKind,
) -> Option<Position> {
    let Some(unit) = state.living_unit(viewer) else {
        tracing::warn!(%viewer, "resource search for a missing or dead unit");
        return None;
    };

    let origin = unit.position;
    let radius = i32::try_from(range).unwrap_or(i32::MAX);
    let zone = state.safe_zone;
    let top = origin.row.saturating_sub(radius).max(0).max(zone.top);
    let bottom = origin
        .row
        .saturating_add(radius)
        .min(state.map.rows() as i32 - 1)
        .min(zone.bottom);
    let left = origin.col.saturating_sub(radius).max(0).max(zone.left);
    let right = origin
        .col
        .saturating_add(radius)
        .min(state.map.cols() as i32 - 1)
        .min(zone.right);

    let wanted = kind.tile();
    let mut best: Option<(u32, Position)> = None;
    for row in top..=bottom {
        for col in left..=right {
            let cell = Position::new(row, col);
            if state.tile(cell) != Some(wanted) {
                continue;
            }
            let distance = origin.manhattan(cell);
            if best.is_some_and(|(best_distance, _)| distance >= best_distance) {
                continue;
            }
            if has_clear_line_of_sight(state, origin, cell, range) {
                best = Some((distance, cell));
            }
        }
    }
    best.map(|(_, cell)| cell)
}
