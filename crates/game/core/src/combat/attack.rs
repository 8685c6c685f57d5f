use crate::config::GameConfig;
use crate::state::{CARDINAL_OFFSETS, GameState, Position, Unit, UnitId};

use super::knockback::{KnockbackResult, apply_knockback};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttackStyle {
    Melee,
    Ranged,
}

/// Where a ranged shot ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ShotOutcome {
    /// Struck the first living unit in its path.
    Hit { target: UnitId, at: Position },
    /// Stopped by a wall, tree or the map edge at `at`.
    Blocked { at: Position },
    /// Travelled the full range without meeting anything.
    Missed,
}

/// Everything an attack did to the game state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackReport {
    pub attacker: UnitId,
    pub style: AttackStyle,
    /// Set for ranged attacks only.
    pub shot: Option<ShotOutcome>,
    /// The unit that took damage, if any.
    pub target: Option<UnitId>,
    pub damage: u32,
    pub remaining_hp: u32,
    pub defeated: bool,
    pub knockback: Option<KnockbackResult>,
}

impl AttackReport {
    fn empty_shot(attacker: UnitId, shot: ShotOutcome) -> Self {
        Self {
            attacker,
            style: AttackStyle::Ranged,
            shot: Some(shot),
            target: None,
            damage: 0,
            remaining_hp: 0,
            defeated: false,
            knockback: None,
        }
    }

    /// True when this attack brought `unit` to zero hp.
    pub fn defeated_unit(&self, unit: UnitId) -> bool {
        self.defeated && self.target == Some(unit)
    }
}

/// Subtracts `amount` from the unit's hp, saturating at zero.
///
/// Returns the remaining hp.
pub fn apply_damage(unit: &mut Unit, amount: u32) -> u32 {
    unit.hp = unit.hp.saturating_sub(amount);
    unit.hp
}

/// Strikes an adjacent living unit with the fixed melee damage.
///
/// Returns `None` without side effects if either unit is missing or dead, or
/// the two are not orthogonally adjacent.
pub fn melee_attack(
    state: &mut GameState,
    config: &GameConfig,
    attacker: UnitId,
    target: UnitId,
) -> Option<AttackReport> {
    let from = state.living_unit(attacker)?.position;
    let Some(to) = state.living_unit(target).map(|u| u.position) else {
        tracing::warn!(%attacker, %target, "melee against a missing or dead unit");
        return None;
    };
    if from.manhattan(to) != 1 {
        tracing::warn!(%attacker, %target, %from, %to, "melee target is not adjacent");
        return None;
    }

    Some(strike(state, config, attacker, target, AttackStyle::Melee, None))
}

/// Fires one round along a cardinal `direction`.
///
/// One ammo is spent on every attempt, hit or not. The shot travels up to
/// `ranged_range` cells and stops at the first blocking tile, the map edge,
/// or the first living unit, which takes the ranged damage.
///
/// Returns `None` without spending ammo if the attacker is missing, dead or
/// out of ammo, or the direction is not a cardinal unit vector.
pub fn shoot(
    state: &mut GameState,
    config: &GameConfig,
    attacker: UnitId,
    direction: (i32, i32),
) -> Option<AttackReport> {
    if !CARDINAL_OFFSETS.contains(&direction) {
        tracing::warn!(%attacker, ?direction, "shot direction is not cardinal");
        return None;
    }
    let shooter = state.unit_mut(attacker).filter(|u| u.is_alive())?;
    if shooter.resources.ammo == 0 {
        tracing::debug!(%attacker, "cannot shoot without ammo");
        return None;
    }
    shooter.resources.ammo -= 1;
    let origin = shooter.position;

    let shot = trace_shot(state, config, attacker, origin, direction);
    tracing::debug!(%attacker, %origin, ?direction, ?shot, "shot fired");

    match shot {
        ShotOutcome::Hit { target, .. } => Some(strike(
            state,
            config,
            attacker,
            target,
            AttackStyle::Ranged,
            Some(shot),
        )),
        _ => Some(AttackReport::empty_shot(attacker, shot)),
    }
}

fn trace_shot(
    state: &GameState,
    config: &GameConfig,
    shooter: UnitId,
    origin: Position,
    (d_row, d_col): (i32, i32),
) -> ShotOutcome {
    let mut cell = origin;
    for _ in 0..config.ranged_range {
        cell = cell.offset(d_row, d_col);
        match state.tile(cell) {
            None => return ShotOutcome::Blocked { at: cell },
            Some(tile) if tile.blocks_sight() => return ShotOutcome::Blocked { at: cell },
            Some(_) => {}
        }
        if let Some(target) = state.occupant_at(cell).filter(|id| *id != shooter) {
            return ShotOutcome::Hit { target, at: cell };
        }
    }
    ShotOutcome::Missed
}

fn strike(
    state: &mut GameState,
    config: &GameConfig,
    attacker: UnitId,
    target: UnitId,
    style: AttackStyle,
    shot: Option<ShotOutcome>,
) -> AttackReport {
    let damage = match style {
        AttackStyle::Melee => config.melee_damage,
        AttackStyle::Ranged => config.ranged_damage,
    };

    let remaining_hp = match state.unit_mut(target) {
        Some(victim) => apply_damage(victim, damage),
        None => 0,
    };
    let defeated = remaining_hp == 0;
    tracing::debug!(%attacker, %target, ?style, damage, remaining_hp, "attack landed");

    // Corpses are not pushed.
    let knockback = (!defeated).then(|| apply_knockback(state, config, attacker, target));

    AttackReport {
        attacker,
        style,
        shot,
        target: Some(target),
        damage,
        remaining_hp,
        defeated,
        knockback,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::KnockbackFailure;
    use crate::state::{SafeZone, TileMap};

    fn state_from(rows: &[&str], player: Position, enemies: Vec<Unit>) -> GameState {
        let map = TileMap::from_rows(rows).unwrap();
        let zone = SafeZone::covering(&map);
        GameState::new(map, zone, Unit::player(player, 10, 6), enemies).unwrap()
    }

    #[test]
    fn damage_saturates_at_zero() {
        let mut unit = Unit::enemy(UnitId(1), Position::new(0, 0), 5, 4);
        assert_eq!(apply_damage(&mut unit, 3), 2);
        assert_eq!(apply_damage(&mut unit, 3), 0);
        assert!(!unit.is_alive());
    }

    #[test]
    fn melee_damages_and_pushes() {
        let attacker = Unit::enemy(UnitId(1), Position::new(0, 0), 10, 6);
        let mut state = state_from(&["...."], Position::new(0, 1), vec![attacker]);
        let config = GameConfig::default();

        let report = melee_attack(&mut state, &config, UnitId(1), UnitId::PLAYER).unwrap();
        assert_eq!(report.damage, config.melee_damage);
        assert_eq!(state.player.hp, 10 - config.melee_damage);
        assert!(!report.defeated);
        assert!(report.knockback.unwrap().success);
        assert_eq!(state.player.position, Position::new(0, 2));
    }

    #[test]
    fn melee_requires_adjacency() {
        let attacker = Unit::enemy(UnitId(1), Position::new(0, 0), 10, 6);
        let mut state = state_from(&["...", "..."], Position::new(1, 1), vec![attacker]);
        let config = GameConfig::default();
        assert!(melee_attack(&mut state, &config, UnitId(1), UnitId::PLAYER).is_none());
        assert_eq!(state.player.hp, 10);
    }

    #[test]
    fn killing_blow_skips_knockback() {
        let attacker = Unit::enemy(UnitId(1), Position::new(0, 0), 10, 6);
        let mut state = state_from(&["...."], Position::new(0, 1), vec![attacker]);
        state.player.hp = 3;
        let config = GameConfig::default();

        let report = melee_attack(&mut state, &config, UnitId(1), UnitId::PLAYER).unwrap();
        assert!(report.defeated);
        assert!(report.defeated_unit(UnitId::PLAYER));
        assert_eq!(report.knockback, None);
        assert_eq!(state.player.position, Position::new(0, 1));
    }

    #[test]
    fn shot_hits_the_nearest_unit_in_path() {
        let enemies = vec![
            Unit::enemy(UnitId(1), Position::new(0, 0), 10, 6).with_resources(2, 0),
            Unit::enemy(UnitId(2), Position::new(0, 2), 10, 6),
        ];
        let mut state = state_from(&["......"], Position::new(0, 4), enemies);
        let config = GameConfig::default();

        let report = shoot(&mut state, &config, UnitId(1), (0, 1)).unwrap();
        assert_eq!(
            report.shot,
            Some(ShotOutcome::Hit {
                target: UnitId(2),
                at: Position::new(0, 2)
            })
        );
        assert_eq!(state.unit(UnitId(2)).unwrap().hp, 10 - config.ranged_damage);
        assert_eq!(state.player.hp, 10);
        assert_eq!(state.unit(UnitId(1)).unwrap().resources.ammo, 1);
        // Pushed into (0, 3), next to the player.
        assert_eq!(state.unit(UnitId(2)).unwrap().position, Position::new(0, 3));
    }

    #[test]
    fn blocked_and_missed_shots_still_spend_ammo() {
        let shooter = Unit::enemy(UnitId(1), Position::new(0, 0), 10, 6).with_resources(2, 0);
        let mut state = state_from(&[".T....", "......"], Position::new(1, 5), vec![shooter]);
        let config = GameConfig::default();

        let report = shoot(&mut state, &config, UnitId(1), (0, 1)).unwrap();
        assert_eq!(report.shot, Some(ShotOutcome::Blocked { at: Position::new(0, 1) }));
        assert_eq!(report.target, None);

        let report = shoot(&mut state, &config, UnitId(1), (-1, 0)).unwrap();
        assert_eq!(report.shot, Some(ShotOutcome::Blocked { at: Position::new(-1, 0) }));

        assert_eq!(state.unit(UnitId(1)).unwrap().resources.ammo, 0);
        assert!(shoot(&mut state, &config, UnitId(1), (1, 0)).is_none());
    }

    #[test]
    fn shot_travels_full_range_then_misses() {
        let shooter = Unit::enemy(UnitId(1), Position::new(0, 0), 10, 6).with_resources(1, 0);
        let rows = ["..........", ".........."];
        let mut state = state_from(&rows, Position::new(1, 9), vec![shooter]);
        let config = GameConfig::default();
        let report = shoot(&mut state, &config, UnitId(1), (0, 1)).unwrap();
        assert_eq!(report.shot, Some(ShotOutcome::Missed));
    }

    #[test]
    fn ranged_knockback_failure_keeps_damage() {
        let shooter = Unit::enemy(UnitId(1), Position::new(0, 0), 10, 6).with_resources(1, 0);
        let mut state = state_from(&["..#"], Position::new(0, 1), vec![shooter]);
        let config = GameConfig::default();
        let report = shoot(&mut state, &config, UnitId(1), (0, 1)).unwrap();
        assert_eq!(state.player.hp, 10 - config.ranged_damage);
        assert_eq!(
            report.knockback.and_then(|k| k.reason),
            Some(KnockbackFailure::BlockedTerrain)
        );
    }

    #[test]
    fn diagonal_direction_is_rejected() {
        let shooter = Unit::enemy(UnitId(1), Position::new(0, 0), 10, 6).with_resources(1, 0);
        let mut state = state_from(&["..", ".."], Position::new(1, 1), vec![shooter]);
        assert!(shoot(&mut state, &GameConfig::default(), UnitId(1), (1, 1)).is_none());
        assert_eq!(state.unit(UnitId(1)).unwrap().resources.ammo, 1);
    }
}
