//! Event payloads for each topic.

use arena_core::{ActionOutcome, UnitId};
use serde::{Deserialize, Serialize};

/// One recorded outcome, stamped with where it happened in the round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionEvent {
    pub turn: u64,
    /// Position of the outcome within the turn, starting at 0.
    pub sequence: u32,
    pub outcome: ActionOutcome,
}

/// Turn boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum TurnEvent {
    Started {
        turn: u64,
        living_enemies: usize,
    },
    Completed {
        turn: u64,
        /// Enemies swept from the state during this turn.
        defeated: Vec<UnitId>,
        player_alive: bool,
    },
}

impl TurnEvent {
    pub fn turn(&self) -> u64 {
        match self {
            Self::Started { turn, .. } | Self::Completed { turn, .. } => *turn,
        }
    }
}
