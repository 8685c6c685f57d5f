//! State re-evaluation.
//!
//! Computes the state a unit should be in from what it can currently see and
//! carry. Conditions are checked in priority order; the first match wins:
//!
//! 1. visible hostile and low health → `Fleeing` from it
//! 2. visible hostile → `EngagingEnemy` it
//! 3. wounded with a medkit → `Healing`
//! 4. critical need with a matching resource within the critical radius →
//!    `SeekingResources`
//! 5. no critical need and any resource within the proactive radius →
//!    `SeekingResources`
//! 6. `Exploring`

use arena_core::{
    AiState, GameConfig, GameState, Position, ResourceKind, UnitId, find_nearby_resource,
    find_nearest_visible_enemy,
};

/// The state chosen for a unit together with the targets it implies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Evaluation {
    pub state: AiState,
    pub target_enemy: Option<UnitId>,
    pub target_resource: Option<Position>,
}

impl Evaluation {
    fn enemy(state: AiState, target: UnitId) -> Self {
        Self {
            state,
            target_enemy: Some(target),
            target_resource: None,
        }
    }

    fn resource(target: Position) -> Self {
        Self {
            state: AiState::SeekingResources,
            target_enemy: None,
            target_resource: Some(target),
        }
    }

    fn plain(state: AiState) -> Self {
        Self {
            state,
            target_enemy: None,
            target_resource: None,
        }
    }
}

/// Computes the next state without touching the unit.
///
/// Returns `None` for missing or dead units.
pub fn evaluate(state: &GameState, config: &GameConfig, unit: UnitId) -> Option<Evaluation> {
    let me = state.living_unit(unit)?;
    let health = me.health_fraction();

    if let Some(hostile) = find_nearest_visible_enemy(state, unit) {
        let next = if health < config.flee_health_threshold {
            AiState::Fleeing
        } else {
            AiState::EngagingEnemy
        };
        return Some(Evaluation::enemy(next, hostile));
    }

    let wounded = health < config.heal_priority_threshold;
    if wounded && me.resources.medkits > 0 {
        return Some(Evaluation::plain(AiState::Healing));
    }

    let radius = config.critical_scan_radius;
    if wounded
        && let Some(cell) = find_nearby_resource(state, unit, radius, ResourceKind::Medkit)
    {
        return Some(Evaluation::resource(cell));
    }
    let low_on_ammo = me.resources.ammo < config.ammo_seek_threshold;
    if low_on_ammo
        && let Some(cell) = find_nearby_resource(state, unit, radius, ResourceKind::Ammo)
    {
        return Some(Evaluation::resource(cell));
    }

    // The proactive scan only runs without an unmet critical need.
    if !wounded
        && !low_on_ammo
        && let Some(cell) = nearest_resource(state, config, unit)
    {
        return Some(Evaluation::resource(cell));
    }

    Some(Evaluation::plain(AiState::Exploring))
}

/// Nearest medkit or ammo within the proactive radius; medkits win ties.
fn nearest_resource(state: &GameState, config: &GameConfig, unit: UnitId) -> Option<Position> {
    let origin = state.living_unit(unit)?.position;
    let radius = config.proactive_scan_radius;
    [ResourceKind::Medkit, ResourceKind::Ammo]
        .into_iter()
        .filter_map(|kind| find_nearby_resource(state, unit, radius, kind))
        .min_by_key(|cell| origin.manhattan(*cell))
}

/// Re-runs the state machine for `unit` and stores the result on it.
///
/// Targets not implied by the new state are cleared. Returns the new state,
/// or `None` for missing or dead units.
pub fn reevaluate(state: &mut GameState, config: &GameConfig, unit: UnitId) -> Option<AiState> {
    let evaluation = evaluate(state, config, unit)?;
    let me = state.unit_mut(unit)?;

    if me.state != evaluation.state {
        tracing::debug!(%unit, from = %me.state, to = %evaluation.state, "state transition");
    }
    me.state = evaluation.state;
    me.target_enemy = evaluation.target_enemy;
    me.target_resource = evaluation.target_resource;
    Some(evaluation.state)
}
