//! Authoritative game state representation.
//!
//! This module owns the map, the safe zone and every unit. Decision functions
//! receive a [`GameState`] explicitly; there is no ambient world.
mod common;
mod error;
mod map;
mod unit;

pub use common::{CARDINAL_OFFSETS, Position, UnitId};
pub use error::StateError;
pub use map::{ResourceKind, SafeZone, TileKind, TileMap};
pub use unit::{AiState, Resources, Unit, UnitKind};

/// Canonical snapshot of one round.
///
/// # Invariants
///
/// - `safe_zone` is non-degenerate and lies within the map
/// - every unit lies within the map bounds and has `max_hp > 0`
/// - unit ids are unique; the player always carries [`UnitId::PLAYER`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    pub map: TileMap,
    pub safe_zone: SafeZone,
    pub player: Unit,
    pub enemies: Vec<Unit>,

    /// Sequential unit id allocator (monotonically increasing, never reused).
    next_unit_id: u32,
}

impl GameState {
    /// Creates a state after checking the structural invariants.
    pub fn new(
        map: TileMap,
        safe_zone: SafeZone,
        player: Unit,
        enemies: Vec<Unit>,
    ) -> Result<Self, StateError> {
        if map.is_empty() {
            return Err(StateError::EmptyMap);
        }
        if safe_zone.is_degenerate() || !safe_zone.fits_within(&map) {
            return Err(StateError::InvalidSafeZone { zone: safe_zone });
        }

        let mut state = Self {
            map,
            safe_zone,
            player,
            enemies: Vec::with_capacity(enemies.len()),
            next_unit_id: 1,
        };
        state.player.id = UnitId::PLAYER;
        state.check_unit(&state.player)?;

        for enemy in enemies {
            state.add_enemy(enemy)?;
        }
        Ok(state)
    }

    fn check_unit(&self, unit: &Unit) -> Result<(), StateError> {
        if !self.map.contains(unit.position) {
            return Err(StateError::UnitOutOfBounds {
                unit: unit.id,
                position: unit.position,
            });
        }
        if unit.max_hp == 0 {
            return Err(StateError::ZeroMaxHp { unit: unit.id });
        }
        Ok(())
    }

    /// Adds an enemy, validating its placement and id uniqueness.
    pub fn add_enemy(&mut self, enemy: Unit) -> Result<UnitId, StateError> {
        self.check_unit(&enemy)?;
        if self.unit(enemy.id).is_some() {
            return Err(StateError::DuplicateUnitId { unit: enemy.id });
        }
        let id = enemy.id;
        self.next_unit_id = self.next_unit_id.max(id.0.saturating_add(1));
        self.enemies.push(enemy);
        Ok(id)
    }

    /// Allocates a new unique [`UnitId`].
    pub fn allocate_unit_id(&mut self) -> UnitId {
        let id = UnitId(self.next_unit_id);
        self.next_unit_id = self.next_unit_id.saturating_add(1);
        id
    }

    /// Returns a unit by id (player or enemy), alive or not.
    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        if self.player.id == id {
            return Some(&self.player);
        }
        self.enemies.iter().find(|unit| unit.id == id)
    }

    pub fn unit_mut(&mut self, id: UnitId) -> Option<&mut Unit> {
        if self.player.id == id {
            return Some(&mut self.player);
        }
        self.enemies.iter_mut().find(|unit| unit.id == id)
    }

    /// Returns a unit only if it exists and is alive.
    pub fn living_unit(&self, id: UnitId) -> Option<&Unit> {
        self.unit(id).filter(|unit| unit.is_alive())
    }

    /// Iterates the player followed by the enemies in order.
    pub fn units(&self) -> impl Iterator<Item = &Unit> {
        std::iter::once(&self.player).chain(self.enemies.iter())
    }

    pub fn living_units(&self) -> impl Iterator<Item = &Unit> {
        self.units().filter(|unit| unit.is_alive())
    }

    /// Ids of living enemies, in turn order.
    pub fn living_enemy_ids(&self) -> Vec<UnitId> {
        self.enemies
            .iter()
            .filter(|unit| unit.is_alive())
            .map(|unit| unit.id)
            .collect()
    }

    /// The living unit standing on `position`, if any.
    pub fn occupant_at(&self, position: Position) -> Option<UnitId> {
        self.living_units()
            .find(|unit| unit.position == position)
            .map(|unit| unit.id)
    }

    /// True when a living unit other than `unit` stands on `position`.
    pub fn is_occupied_by_other(&self, position: Position, unit: UnitId) -> bool {
        self.living_units()
            .any(|other| other.id != unit && other.position == position)
    }

    pub fn tile(&self, position: Position) -> Option<TileKind> {
        self.map.get(position)
    }

    /// Removes dead enemies and returns their ids. The player is never removed.
    pub fn remove_dead_enemies(&mut self) -> Vec<UnitId> {
        let removed: Vec<UnitId> = self
            .enemies
            .iter()
            .filter(|unit| !unit.is_alive())
            .map(|unit| unit.id)
            .collect();
        if !removed.is_empty() {
            self.enemies.retain(|unit| unit.is_alive());
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_map() -> TileMap {
        TileMap::filled(5, 5, TileKind::Land)
    }

    #[test]
    fn rejects_safe_zone_outside_map() {
        let map = open_map();
        let zone = SafeZone::new(0, 0, 5, 4);
        let player = Unit::player(Position::new(0, 0), 10, 5);
        assert_eq!(
            GameState::new(map, zone, player, vec![]),
            Err(StateError::InvalidSafeZone { zone })
        );
    }

    #[test]
    fn rejects_units_outside_map_and_duplicates() {
        let map = open_map();
        let zone = SafeZone::covering(&map);
        let player = Unit::player(Position::new(0, 0), 10, 5);
        let outside = Unit::enemy(UnitId(1), Position::new(7, 0), 10, 5);
        assert!(matches!(
            GameState::new(map.clone(), zone, player.clone(), vec![outside]),
            Err(StateError::UnitOutOfBounds { .. })
        ));

        let a = Unit::enemy(UnitId(1), Position::new(1, 1), 10, 5);
        let b = Unit::enemy(UnitId(1), Position::new(2, 2), 10, 5);
        assert_eq!(
            GameState::new(map, zone, player, vec![a, b]),
            Err(StateError::DuplicateUnitId { unit: UnitId(1) })
        );
    }

    #[test]
    fn allocates_ids_after_existing_enemies() {
        let map = open_map();
        let zone = SafeZone::covering(&map);
        let player = Unit::player(Position::new(0, 0), 10, 5);
        let enemy = Unit::enemy(UnitId(4), Position::new(1, 1), 10, 5);
        let mut state = GameState::new(map, zone, player, vec![enemy]).unwrap();
        assert_eq!(state.allocate_unit_id(), UnitId(5));
        assert_eq!(state.allocate_unit_id(), UnitId(6));
    }

    #[test]
    fn occupancy_ignores_dead_units_and_sweeps_them() {
        let map = open_map();
        let zone = SafeZone::covering(&map);
        let player = Unit::player(Position::new(0, 0), 10, 5);
        let dead = Unit::enemy(UnitId(1), Position::new(2, 2), 10, 5).with_hp(0);
        let alive = Unit::enemy(UnitId(2), Position::new(3, 3), 10, 5);
        let mut state = GameState::new(map, zone, player, vec![dead, alive]).unwrap();

        assert_eq!(state.occupant_at(Position::new(2, 2)), None);
        assert_eq!(state.occupant_at(Position::new(3, 3)), Some(UnitId(2)));
        assert!(state.is_occupied_by_other(Position::new(3, 3), UnitId(1)));
        assert!(!state.is_occupied_by_other(Position::new(3, 3), UnitId(2)));
        assert_eq!(state.living_enemy_ids(), vec![UnitId(2)]);

        assert_eq!(state.remove_dead_enemies(), vec![UnitId(1)]);
        assert_eq!(state.enemies.len(), 1);
    }
}
