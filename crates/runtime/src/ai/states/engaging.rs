use arena_core::{
    AiState, Position, UnitId, WaitReason, choose, has_clear_cardinal_line_of_sight,
    has_clear_line_of_sight, is_move_safe, valid_moves,
};

use crate::ai::{AiContext, combat::try_attack};

/// Fights the unit's `target_enemy`.
///
/// Returns `false` when the target is gone, out of sight or defeated, or when
/// the unit is too hurt to keep fighting; every other path consumes the turn.
pub fn handle_engaging_enemy(ctx: &mut AiContext<'_>, unit: UnitId) -> bool {
    let Some(me) = ctx.unit(unit) else {
        return true;
    };
    let (origin, sight, health) = (me.position, me.detection_range, me.health_fraction());

    let target = me.target_enemy.and_then(|id| ctx.unit(id)).and_then(|them| {
        has_clear_line_of_sight(ctx.state, origin, them.position, sight)
            .then_some((them.id, them.position, them.resources.ammo))
    });
    let Some((target, target_pos, target_ammo)) = target else {
        tracing::debug!(%unit, "engagement target lost");
        if let Some(me) = ctx.unit_mut(unit) {
            me.target_enemy = None;
        }
        return false;
    };

    if health < ctx.config.flee_health_threshold {
        tracing::debug!(%unit, %target, health, "too hurt to fight");
        if let Some(me) = ctx.unit_mut(unit) {
            me.state = AiState::Fleeing;
        }
        return false;
    }

    if let Some(report) = try_attack(ctx, unit, target) {
        if report.defeated_unit(target) {
            if let Some(me) = ctx.unit_mut(unit) {
                me.target_enemy = None;
            }
            return false;
        }
        return true;
    }

    let Some(destination) = choose_approach(ctx, unit, origin, target_pos, sight) else {
        return ctx.wait(unit, WaitReason::NoSafeMove);
    };

    let range = ctx.config.ranged_range;
    let exposed = target_ammo > 0
        && has_clear_cardinal_line_of_sight(ctx.state, target_pos, destination, range);
    if exposed && ctx.rng.chance(ctx.config.risk_aversion_chance) {
        return ctx.wait(unit, WaitReason::RiskAverse);
    }

    if ctx.step_to(unit, destination).is_none() {
        return ctx.wait(unit, WaitReason::Blocked);
    }
    true
}

/// Valid, then safe, then sight-preserving (if any), then closer (if any).
fn choose_approach(
    ctx: &mut AiContext<'_>,
    unit: UnitId,
    origin: Position,
    target: Position,
    sight: u32,
) -> Option<Position> {
    let safe: Vec<Position> = valid_moves(ctx.state, unit)
        .into_iter()
        .filter(|dest| is_move_safe(ctx.state, unit, *dest))
        .collect();

    let in_sight: Vec<Position> = safe
        .iter()
        .copied()
        .filter(|dest| has_clear_line_of_sight(ctx.state, *dest, target, sight))
        .collect();
    let candidates = if in_sight.is_empty() { safe } else { in_sight };

    let current = origin.manhattan(target);
    let closer: Vec<Position> = candidates
        .iter()
        .copied()
        .filter(|dest| dest.manhattan(target) < current)
        .collect();
    let pool = if closer.is_empty() { candidates } else { closer };

    choose(&mut *ctx.rng, &pool).copied()
}
