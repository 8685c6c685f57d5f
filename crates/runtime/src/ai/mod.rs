//! Enemy decision making.
//!
//! A unit's turn runs the handler for its current [`arena_core::AiState`].
//! Handlers that return `false` hand control back to [`reevaluate`], which
//! picks a fresh state from what the unit can see and carry.

mod combat;
pub mod context;
pub mod evaluate;
pub mod states;

pub use context::AiContext;
pub use evaluate::{Evaluation, evaluate, reevaluate};
pub use states::{
    handle_engaging_enemy, handle_exploring, handle_fleeing, handle_healing,
    handle_seeking_resources, handle_state,
};
