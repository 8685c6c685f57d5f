//! State construction errors.
//!
//! Raised when a map, safe zone or unit placement violates the invariants
//! every decision function relies on.

use crate::error::{ErrorSeverity, GameError};
use crate::state::{Position, SafeZone, UnitId};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StateError {
    #[error("map has no tiles")]
    EmptyMap,

    #[error("map row {row} has {found} columns, expected {expected}")]
    RaggedMap {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("unknown tile glyph {glyph:?} at ({row}, {col})")]
    UnknownGlyph { glyph: char, row: usize, col: usize },

    #[error("safe zone {zone:?} is degenerate or outside the map")]
    InvalidSafeZone { zone: SafeZone },

    #[error("unit {unit} at {position} is outside the map")]
    UnitOutOfBounds { unit: UnitId, position: Position },

    #[error("unit {unit} has max_hp of zero")]
    ZeroMaxHp { unit: UnitId },

    #[error("unit id {unit} is used more than once")]
    DuplicateUnitId { unit: UnitId },

    #[error("no free land cell left in the safe zone")]
    NoFreeCell,
}

impl GameError for StateError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NoFreeCell => ErrorSeverity::Recoverable,
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyMap => "STATE_EMPTY_MAP",
            Self::RaggedMap { .. } => "STATE_RAGGED_MAP",
            Self::UnknownGlyph { .. } => "STATE_UNKNOWN_GLYPH",
            Self::InvalidSafeZone { .. } => "STATE_INVALID_SAFE_ZONE",
            Self::UnitOutOfBounds { .. } => "STATE_UNIT_OUT_OF_BOUNDS",
            Self::ZeroMaxHp { .. } => "STATE_ZERO_MAX_HP",
            Self::DuplicateUnitId { .. } => "STATE_DUPLICATE_UNIT_ID",
            Self::NoFreeCell => "STATE_NO_FREE_CELL",
        }
    }
}
