use arena_core::{ActionOutcome, AiState, UnitId};

use crate::ai::AiContext;

/// Uses one medkit, restoring up to `heal_amount` hp without exceeding
/// `max_hp`. Returns `false` when the unit has no medkit.
pub fn handle_healing(ctx: &mut AiContext<'_>, unit: UnitId) -> bool {
    let heal_amount = ctx.config.heal_amount;
    let Some(me) = ctx.unit_mut(unit) else {
        return true;
    };
    if me.resources.medkits == 0 {
        tracing::debug!(%unit, "no medkit left to heal with");
        return false;
    }

    me.resources.medkits -= 1;
    let before = me.hp;
    me.hp = me.hp.saturating_add(heal_amount).min(me.max_hp);
    me.state = AiState::Exploring;
    let (amount, hp) = (me.hp - before, me.hp);

    tracing::debug!(%unit, amount, hp, "healed");
    ctx.record(ActionOutcome::Heal { unit, amount, hp });
    true
}

#[cfg(test)]
mod tests {
    use arena_core::{GameConfig, GameState, Position, SafeZone, ScriptedRandom, TileMap, Unit};

    use super::*;

    fn with_patient(patient: Unit) -> GameState {
        let map = TileMap::from_rows(&["....."]).unwrap();
        let zone = SafeZone::covering(&map);
        let player = Unit::player(Position::new(0, 4), 10, 1);
        GameState::new(map, zone, player, vec![patient]).unwrap()
    }

    fn patient(hp: u32, medkits: u32) -> Unit {
        Unit::enemy(UnitId(1), Position::new(0, 0), 15, 1)
            .with_hp(hp)
            .with_resources(0, medkits)
            .with_state(AiState::Healing)
    }

    #[test]
    fn heals_and_spends_a_medkit() {
        let mut state = with_patient(patient(4, 2));
        let config = GameConfig::default();
        let mut rng = ScriptedRandom::new();
        let mut ctx = AiContext::new(&mut state, &config, &mut rng);

        assert!(handle_healing(&mut ctx, UnitId(1)));
        let amount = config.heal_amount;
        assert_eq!(
            ctx.outcomes(),
            &[ActionOutcome::Heal {
                unit: UnitId(1),
                amount,
                hp: 4 + amount,
            }]
        );
        let me = state.unit(UnitId(1)).unwrap();
        assert_eq!(me.resources.medkits, 1);
        assert_eq!(me.state, AiState::Exploring);
    }

    #[test]
    fn healing_is_capped_at_max_hp() {
        let mut state = with_patient(patient(14, 1));
        let config = GameConfig::default();
        let mut rng = ScriptedRandom::new();
        let mut ctx = AiContext::new(&mut state, &config, &mut rng);

        assert!(handle_healing(&mut ctx, UnitId(1)));
        assert_eq!(
            ctx.outcomes(),
            &[ActionOutcome::Heal {
                unit: UnitId(1),
                amount: 1,
                hp: 15,
            }]
        );
    }

    #[test]
    fn without_medkits_needs_reevaluation() {
        let mut state = with_patient(patient(4, 0));
        let config = GameConfig::default();
        let mut rng = ScriptedRandom::new();
        let mut ctx = AiContext::new(&mut state, &config, &mut rng);

        assert!(!handle_healing(&mut ctx, UnitId(1)));
        assert!(ctx.outcomes().is_empty());
        assert_eq!(state.unit(UnitId(1)).unwrap().hp, 4);
    }
}
