//! Attack selection shared by the engaging and fleeing handlers.

use arena_core::{
    ActionOutcome, AttackReport, UnitId, has_clear_cardinal_line_of_sight, melee_attack, shoot,
};

use super::AiContext;

/// Attacks `target` if any attack is possible right now, recording it.
///
/// Ranged fire is preferred when the target is within `ranged_range`
/// (Manhattan), the unit has ammo, and a cardinal firing line is clear.
/// Otherwise an orthogonally adjacent target is struck in melee.
pub fn try_attack(ctx: &mut AiContext<'_>, unit: UnitId, target: UnitId) -> Option<AttackReport> {
    let me = ctx.unit(unit)?;
    let them = ctx.unit(target)?;
    let (from, to) = (me.position, them.position);
    let distance = from.manhattan(to);
    let range = ctx.config.ranged_range;

    let report = if distance > 0
        && distance <= range
        && me.resources.ammo > 0
        && has_clear_cardinal_line_of_sight(ctx.state, from, to, range)
    {
        shoot(ctx.state, ctx.config, unit, from.step_towards(to))
    } else if distance == 1 {
        melee_attack(ctx.state, ctx.config, unit, target)
    } else {
        None
    }?;

    ctx.record(ActionOutcome::Attack(report));
    Some(report)
}
