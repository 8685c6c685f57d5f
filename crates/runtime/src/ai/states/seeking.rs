use arena_core::{AiState, Position, UnitId, WaitReason, find_nearest_visible_enemy};

use crate::ai::AiContext;

/// Walks towards the unit's `target_resource`.
///
/// Returns `false` without acting when the target is missing, outside the
/// map or zone, already consumed, or when a hostile comes into view.
/// Arriving on the tile collects the resource, clears the target and drops
/// back to exploring.
pub fn handle_seeking_resources(ctx: &mut AiContext<'_>, unit: UnitId) -> bool {
    let Some(me) = ctx.unit(unit) else {
        return true;
    };

    let Some(target) = me.target_resource.filter(|cell| still_available(ctx, *cell)) else {
        tracing::debug!(%unit, "resource target no longer valid");
        if let Some(me) = ctx.unit_mut(unit) {
            me.target_resource = None;
        }
        return false;
    };

    if let Some(hostile) = find_nearest_visible_enemy(ctx.state, unit) {
        tracing::debug!(%unit, %hostile, "hostile in view, abandoning pickup");
        return false;
    }

    let Some(record) = ctx.step_towards(unit, target) else {
        return ctx.wait(unit, WaitReason::Blocked);
    };

    if record.to == target {
        tracing::debug!(%unit, %target, pickup = ?record.pickup, "reached resource");
        if let Some(me) = ctx.unit_mut(unit) {
            me.target_resource = None;
            me.state = AiState::Exploring;
        }
    }
    true
}

fn still_available(ctx: &AiContext<'_>, cell: Position) -> bool {
    ctx.state.safe_zone.contains(cell)
        && ctx
            .state
            .tile(cell)
            .is_some_and(|tile| tile.resource().is_some())
}
