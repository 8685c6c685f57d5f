use arena_core::{AiState, UnitId, WaitReason};

use crate::ai::{AiContext, evaluate};

/// Wanders while nothing more pressing is in view.
///
/// Returns `false` when re-evaluation would pick a different state. Outside
/// the safe zone the unit heads for its centre, falling back to a random step
/// and then to waiting. Inside, one roll picks between heading for the
/// centre, a random step and waiting; a failed step waits rather than trying
/// the other strategy.
///
/// Valid moves always land inside the zone, so from outside it every valid
/// move is closer to the centre and the random fallback never fires with
/// cardinal steps.
pub fn handle_exploring(ctx: &mut AiContext<'_>, unit: UnitId) -> bool {
    let Some(position) = ctx.unit(unit).map(|me| me.position) else {
        return true;
    };

    let next = evaluate(ctx.state, ctx.config, unit).map(|e| e.state);
    if next.is_some_and(|state| state != AiState::Exploring) {
        tracing::debug!(%unit, ?next, "exploration interrupted");
        return false;
    }

    let center = ctx.state.safe_zone.center();
    if !ctx.state.safe_zone.contains(position) {
        if ctx.step_towards(unit, center).is_some() || ctx.step_randomly(unit).is_some() {
            return true;
        }
        return ctx.wait(unit, WaitReason::Idle);
    }

    let aggression = ctx.config.explore_aggression_chance;
    let wander = ctx.config.explore_random_move_chance;
    let roll = ctx.rng.next_f64();

    let moved = if roll < aggression {
        ctx.step_towards(unit, center).is_some()
    } else if roll < aggression + wander {
        ctx.step_randomly(unit).is_some()
    } else {
        false
    };

    if !moved {
        return ctx.wait(unit, WaitReason::Idle);
    }
    true
}

#[cfg(test)]
mod tests {
    use arena_core::{
        ActionOutcome, GameConfig, GameState, Position, SafeZone, ScriptedRandom, TileMap, Unit,
        valid_moves,
    };

    use super::*;

    fn walled_off(rows: &[&str], zone: SafeZone, explorer: Unit) -> GameState {
        let map = TileMap::from_rows(rows).unwrap();
        let player = Unit::player(Position::new(0, 0), 10, 6);
        GameState::new(map, zone, player, vec![explorer]).unwrap()
    }

    fn explorer(row: i32, col: i32) -> Unit {
        Unit::enemy(UnitId(1), Position::new(row, col), 15, 6).with_resources(5, 0)
    }

    // The player at (0,0) is walled in and never visible.
    const ROWS: [&str; 5] = [".#...", "##...", ".....", ".....", "....."];

    #[test]
    fn interrupted_when_a_hostile_is_visible() {
        let map = TileMap::from_rows(&["....."]).unwrap();
        let zone = SafeZone::covering(&map);
        let player = Unit::player(Position::new(0, 0), 10, 6);
        let mut state = GameState::new(map, zone, player, vec![explorer(0, 3)]).unwrap();
        let config = GameConfig::default();
        let mut rng = ScriptedRandom::new();
        let mut ctx = AiContext::new(&mut state, &config, &mut rng);

        assert!(!handle_exploring(&mut ctx, UnitId(1)));
        assert!(ctx.outcomes().is_empty());
    }

    #[test]
    fn outside_the_zone_heads_for_the_centre() {
        let zone = SafeZone::new(2, 2, 4, 4);
        let mut state = walled_off(&ROWS, zone, explorer(2, 1));
        let config = GameConfig::default();
        let mut rng = ScriptedRandom::new();
        let mut ctx = AiContext::new(&mut state, &config, &mut rng);

        assert!(handle_exploring(&mut ctx, UnitId(1)));
        assert_eq!(state.unit(UnitId(1)).unwrap().position, Position::new(2, 2));
    }

    #[test]
    fn every_step_from_outside_the_zone_leads_inward() {
        let zone = SafeZone::new(2, 2, 4, 4);
        let center = zone.center();
        for (row, col) in [(2, 1), (1, 2), (1, 4), (3, 1)] {
            let state = walled_off(&ROWS, zone, explorer(row, col));
            let origin = Position::new(row, col);
            let moves = valid_moves(&state, UnitId(1));
            assert!(!moves.is_empty(), "no way in from {origin}");
            assert!(
                moves
                    .iter()
                    .all(|to| to.manhattan(center) < origin.manhattan(center))
            );
        }
    }

    #[test]
    fn stranded_outside_the_zone_waits() {
        let zone = SafeZone::new(2, 2, 4, 4);
        let mut state = walled_off(&ROWS, zone, explorer(3, 0));
        let config = GameConfig::default();
        let mut rng = ScriptedRandom::new();
        let mut ctx = AiContext::new(&mut state, &config, &mut rng);

        assert!(handle_exploring(&mut ctx, UnitId(1)));
        assert_eq!(
            ctx.outcomes(),
            &[ActionOutcome::wait(UnitId(1), WaitReason::Idle)]
        );
    }

    #[test]
    fn aggressive_roll_moves_towards_the_centre() {
        let zone = SafeZone::new(2, 0, 4, 4);
        let mut state = walled_off(&ROWS, zone, explorer(2, 0));
        let config = GameConfig::default();
        let mut rng = ScriptedRandom::new().with_floats([0.0]);
        let mut ctx = AiContext::new(&mut state, &config, &mut rng);

        assert!(handle_exploring(&mut ctx, UnitId(1)));
        let to = state.unit(UnitId(1)).unwrap().position;
        assert_eq!(to.manhattan(zone.center()), 2);
    }

    #[test]
    fn wandering_roll_takes_a_random_step() {
        let zone = SafeZone::new(2, 0, 4, 4);
        let mut state = walled_off(&ROWS, zone, explorer(3, 3));
        let config = GameConfig::default();
        let mut rng = ScriptedRandom::new().with_floats([0.5]).with_indices([0]);
        let mut ctx = AiContext::new(&mut state, &config, &mut rng);

        assert!(handle_exploring(&mut ctx, UnitId(1)));
        assert_eq!(state.unit(UnitId(1)).unwrap().position, Position::new(2, 3));
    }

    #[test]
    fn idle_roll_waits() {
        let zone = SafeZone::new(2, 0, 4, 4);
        let mut state = walled_off(&ROWS, zone, explorer(3, 3));
        let config = GameConfig::default();
        let mut rng = ScriptedRandom::new().with_floats([0.99]);
        let mut ctx = AiContext::new(&mut state, &config, &mut rng);

        assert!(handle_exploring(&mut ctx, UnitId(1)));
        assert_eq!(
            ctx.outcomes(),
            &[ActionOutcome::wait(UnitId(1), WaitReason::Idle)]
        );
        assert_eq!(state.unit(UnitId(1)).unwrap().position, Position::new(3, 3));
    }
}
