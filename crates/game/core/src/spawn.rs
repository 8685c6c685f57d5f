//! Round-start enemy creation.

use crate::config::{GameConfig, SpawnConfig};
use crate::env::RandomSource;
use crate::state::{AiState, GameState, Position, StateError, TileKind, Unit, UnitId};

/// Creates an enemy at `position` with stats rolled from `spawn` bounds.
///
/// The returned unit is not yet part of any state.
pub fn spawn_enemy_at<R>(
    rng: &mut R,
    spawn: &SpawnConfig,
    id: UnitId,
    position: Position,
) -> Unit
where
    R: RandomSource + ?Sized,
{
    let max_hp = rng.range_inclusive(spawn.min_hp, spawn.max_hp).max(1);
    let detection_range =
        rng.range_inclusive(spawn.min_detection_range, spawn.max_detection_range);
    let ammo = rng.range_inclusive(spawn.min_ammo, spawn.max_ammo);

    Unit::enemy(id, position, max_hp, detection_range)
        .with_resources(ammo, 0)
        .with_state(AiState::Exploring)
}

/// Places `count` new enemies on random free land cells inside the safe zone.
///
/// Returns the ids in creation order. Fails with [`StateError::NoFreeCell`]
/// once the zone has no unoccupied land left; enemies created before that
/// point stay in the state.
pub fn spawn_enemies<R>(
    state: &mut GameState,
    config: &GameConfig,
    rng: &mut R,
    count: usize,
) -> Result<Vec<UnitId>, StateError>
where
    R: RandomSource + ?Sized,
{
    let mut free = free_land_cells(state);
    let mut spawned = Vec::with_capacity(count);

    for _ in 0..count {
        if free.is_empty() {
            tracing::warn!(requested = count, spawned = spawned.len(), "safe zone is full");
            return Err(StateError::NoFreeCell);
        }
        let position = free.swap_remove(rng.next_index(free.len()));
        let id = state.allocate_unit_id();
        let enemy = spawn_enemy_at(rng, &config.spawn, id, position);
        tracing::debug!(
            %id,
            %position,
            hp = enemy.max_hp,
            range = enemy.detection_range,
            "spawned enemy"
        );
        spawned.push(state.add_enemy(enemy)?);
    }
    Ok(spawned)
}

fn free_land_cells(state: &GameState) -> Vec<Position> {
    let zone = state.safe_zone;
    (zone.top..=zone.bottom)
        .flat_map(|row| (zone.left..=zone.right).map(move |col| Position::new(row, col)))
        .filter(|cell| state.tile(*cell) == Some(TileKind::Land))
        .filter(|cell| state.occupant_at(*cell).is_none())
        .collect()
}
