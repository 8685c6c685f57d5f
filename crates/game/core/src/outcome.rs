//! Serializable records of what a unit did on its turn.
//!
//! The decision core appends one or more outcomes per unit turn; presentation
//! layers consume them after the fact and never feed back into decisions.

use strum::{Display, IntoStaticStr};

use crate::combat::AttackReport;
use crate::movement::{MoveRecord, Pickup};
use crate::state::UnitId;

/// Why a unit spent its turn standing still.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum WaitReason {
    /// Every candidate move was filtered out.
    NoSafeMove,
    /// The chosen move would enter the target's firing line.
    RiskAverse,
    /// Exploration rolled the idle branch or a move attempt failed.
    Idle,
    /// No valid moves and no attack was possible.
    Cornered,
    /// The approach to a resource was blocked this turn.
    Blocked,
    /// The re-evaluation budget ran out.
    Exhausted,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum ActionOutcome {
    Move(MoveRecord),
    Pickup(Pickup),
    Attack(AttackReport),
    Heal {
        unit: UnitId,
        amount: u32,
        hp: u32,
    },
    Wait {
        unit: UnitId,
        reason: WaitReason,
    },
}

impl ActionOutcome {
    /// The unit whose decision produced this outcome.
    pub fn actor(&self) -> UnitId {
        match self {
            Self::Move(record) => record.unit,
            Self::Pickup(pickup) => pickup.unit,
            Self::Attack(report) => report.attacker,
            Self::Heal { unit, .. } | Self::Wait { unit, .. } => *unit,
        }
    }

    pub fn wait(unit: UnitId, reason: WaitReason) -> Self {
        Self::Wait { unit, reason }
    }

    pub fn is_wait(&self) -> bool {
        matches!(self, Self::Wait { .. })
    }
}
