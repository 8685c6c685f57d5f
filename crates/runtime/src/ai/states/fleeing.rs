use arena_core::{
    Position, UnitId, WaitReason, choose, has_clear_line_of_sight, is_move_safe, valid_moves,
};

use crate::ai::{AiContext, combat::try_attack};

/// Runs from the unit's `target_enemy`.
///
/// Returns `false` once the threat is dead or out of sight (escaped), or when
/// a cornered unit's desperate attack defeats it.
pub fn handle_fleeing(ctx: &mut AiContext<'_>, unit: UnitId) -> bool {
    let Some(me) = ctx.unit(unit) else {
        return true;
    };
    let (origin, sight) = (me.position, me.detection_range);

    let Some(threat) = me.target_enemy.and_then(|id| ctx.unit(id)) else {
        tracing::debug!(%unit, "flee threat is gone");
        clear_target(ctx, unit);
        return false;
    };
    let (threat_id, threat_pos) = (threat.id, threat.position);
    let threat_sight = threat.detection_range;

    if !has_clear_line_of_sight(ctx.state, origin, threat_pos, sight) {
        tracing::debug!(%unit, threat = %threat_id, "escaped");
        clear_target(ctx, unit);
        return false;
    }

    let moves = valid_moves(ctx.state, unit);
    if moves.is_empty() {
        tracing::debug!(%unit, threat = %threat_id, "cornered");
        return match try_attack(ctx, unit, threat_id) {
            Some(report) if report.defeated_unit(threat_id) => {
                clear_target(ctx, unit);
                false
            }
            Some(_) => true,
            None => ctx.wait(unit, WaitReason::Cornered),
        };
    }

    let safe: Vec<Position> = moves
        .into_iter()
        .filter(|dest| is_move_safe(ctx.state, unit, *dest))
        .collect();
    let hidden: Vec<Position> = safe
        .iter()
        .copied()
        .filter(|dest| !has_clear_line_of_sight(ctx.state, threat_pos, *dest, threat_sight))
        .collect();

    let pool = if hidden.is_empty() { safe } else { hidden };
    let Some(destination) = farthest_from(ctx, &pool, threat_pos) else {
        return ctx.wait(unit, WaitReason::NoSafeMove);
    };

    if ctx.step_to(unit, destination).is_none() {
        return ctx.wait(unit, WaitReason::Blocked);
    }
    true
}

/// Uniformly picks among the cells farthest (Manhattan) from `threat`.
fn farthest_from(
    ctx: &mut AiContext<'_>,
    cells: &[Position],
    threat: Position,
) -> Option<Position> {
    let best = cells.iter().map(|cell| cell.manhattan(threat)).max()?;
    let farthest: Vec<Position> = cells
        .iter()
        .copied()
        .filter(|cell| cell.manhattan(threat) == best)
        .collect();
    choose(&mut *ctx.rng, &farthest).copied()
}

fn clear_target(ctx: &mut AiContext<'_>, unit: UnitId) {
    if let Some(me) = ctx.unit_mut(unit) {
        me.target_enemy = None;
    }
}

#[cfg(test)]
mod tests {
    use arena_core::{
        ActionOutcome, AiState, GameConfig, GameState, SafeZone, ScriptedRandom, TileMap, Unit,
    };

    use super::*;

    fn state_from(rows: &[&str], player: Unit, enemies: Vec<Unit>) -> GameState {
        let map = TileMap::from_rows(rows).unwrap();
        let zone = SafeZone::covering(&map);
        GameState::new(map, zone, player, enemies).unwrap()
    }

    fn runner(row: i32, col: i32) -> Unit {
        Unit::enemy(UnitId(1), Position::new(row, col), 15, 6)
            .with_hp(3)
            .with_state(AiState::Fleeing)
            .with_target_enemy(UnitId::PLAYER)
    }

    #[test]
    fn breaks_line_of_sight_when_possible() {
        // From (0,1) the wall at (0,2) hides the runner from the player.
        let rows = ["..#..", ".....", "....."];
        let player = Unit::player(Position::new(1, 4), 10, 6);
        let mut state = state_from(&rows, player, vec![runner(1, 1)]);
        let config = GameConfig::default();
        let mut rng = ScriptedRandom::new();
        let mut ctx = AiContext::new(&mut state, &config, &mut rng);

        assert!(handle_fleeing(&mut ctx, UnitId(1)));
        let destination = state.unit(UnitId(1)).unwrap().position;
        assert_eq!(destination, Position::new(0, 1));
        assert!(!has_clear_line_of_sight(&state, Position::new(1, 4), destination, 6));
    }

    #[test]
    fn maximizes_distance_when_sight_cannot_be_broken() {
        let player = Unit::player(Position::new(0, 4), 10, 6);
        let mut state = state_from(&["......"], player, vec![runner(0, 2)]);
        let config = GameConfig::default();
        let mut rng = ScriptedRandom::new();
        let mut ctx = AiContext::new(&mut state, &config, &mut rng);

        assert!(handle_fleeing(&mut ctx, UnitId(1)));
        assert_eq!(state.unit(UnitId(1)).unwrap().position, Position::new(0, 1));
    }

    #[test]
    fn escape_clears_the_threat() {
        let player = Unit::player(Position::new(0, 4), 10, 6);
        let mut state = state_from(&["..#.."], player, vec![runner(0, 0)]);
        let config = GameConfig::default();
        let mut rng = ScriptedRandom::new();
        let mut ctx = AiContext::new(&mut state, &config, &mut rng);

        assert!(!handle_fleeing(&mut ctx, UnitId(1)));
        assert_eq!(state.unit(UnitId(1)).unwrap().target_enemy, None);
    }

    #[test]
    fn cornered_without_an_attack_waits() {
        // Boundary tiles block movement but not sight.
        let rows = ["#.#", "#~#", "#.#"];
        let player = Unit::player(Position::new(2, 1), 10, 6);
        let mut state = state_from(&rows, player, vec![runner(0, 1)]);
        let config = GameConfig::default();
        let mut rng = ScriptedRandom::new();
        let mut ctx = AiContext::new(&mut state, &config, &mut rng);

        assert!(handle_fleeing(&mut ctx, UnitId(1)));
        assert_eq!(
            ctx.outcomes(),
            &[ActionOutcome::wait(UnitId(1), WaitReason::Cornered)]
        );
    }

    #[test]
    fn cornered_unit_strikes_an_adjacent_threat() {
        let rows = ["#.#", "#.#", "#.#"];
        let player = Unit::player(Position::new(2, 1), 10, 6);
        let blocker = Unit::enemy(UnitId(2), Position::new(1, 1), 10, 6);
        let me = runner(0, 1).with_target_enemy(UnitId(2));
        let mut state = state_from(&rows, player, vec![me, blocker]);
        let config = GameConfig::default();
        let mut rng = ScriptedRandom::new();
        let mut ctx = AiContext::new(&mut state, &config, &mut rng);

        assert!(handle_fleeing(&mut ctx, UnitId(1)));
        assert!(matches!(ctx.outcomes(), [ActionOutcome::Attack(_)]));
        assert_eq!(state.unit(UnitId(2)).unwrap().hp, 10 - config.melee_damage);
    }
}
