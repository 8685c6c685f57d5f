//! Deterministic arena rules shared by the AI runtime and content loaders.
//!
//! `arena-core` defines the canonical data model (map, safe zone, units) and
//! the synchronous primitives the enemy AI is built from: perception,
//! one-step movement, and combat with knockback. Every function receives the
//! [`GameState`] explicitly and draws randomness only from an injected
//! [`RandomSource`].
pub mod combat;
pub mod config;
pub mod env;
pub mod error;
pub mod movement;
pub mod outcome;
pub mod perception;
pub mod spawn;
pub mod state;

pub use combat::{
    AttackReport, AttackStyle, KnockbackFailure, KnockbackResult, ShotOutcome, apply_damage,
    apply_knockback, calculate_knockback_destination, melee_attack, shoot,
};
pub use config::{ConfigError, GameConfig, SpawnConfig};
pub use env::{RandomSource, ScriptedRandom, SeededRandom, choose};
pub use error::{ErrorSeverity, GameError};
pub use movement::{
    MoveRecord, Pickup, is_move_safe, move_randomly, move_towards, update_unit_position,
    valid_moves,
};
pub use outcome::{ActionOutcome, WaitReason};
pub use perception::{
    find_nearby_resource, find_nearest_visible_enemy, has_clear_cardinal_line_of_sight,
    has_clear_line_of_sight,
};
pub use spawn::{spawn_enemies, spawn_enemy_at};
pub use state::{
    AiState, GameState, Position, ResourceKind, Resources, SafeZone, StateError, TileKind,
    TileMap, Unit, UnitId, UnitKind,
};
