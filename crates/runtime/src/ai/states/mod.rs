//! One handler per [`AiState`].
//!
//! Every handler returns whether the unit's turn was consumed. `false` means
//! the unit's situation changed and it should be re-evaluated before acting.

mod engaging;
mod exploring;
mod fleeing;
mod healing;
mod seeking;

use arena_core::{AiState, UnitId};

pub use engaging::handle_engaging_enemy;
pub use exploring::handle_exploring;
pub use fleeing::handle_fleeing;
pub use healing::handle_healing;
pub use seeking::handle_seeking_resources;

use super::AiContext;

/// Runs the handler for the unit's current state.
///
/// Missing or dead units consume the turn without acting.
pub fn handle_state(ctx: &mut AiContext<'_>, unit: UnitId) -> bool {
    let Some(state) = ctx.unit(unit).map(|me| me.state) else {
        tracing::debug!(%unit, "skipping missing or dead unit");
        return true;
    };

    let _span = tracing::trace_span!("ai_state", %unit, %state).entered();
    match state {
        AiState::Exploring => handle_exploring(ctx, unit),
        AiState::SeekingResources => handle_seeking_resources(ctx, unit),
        AiState::EngagingEnemy => handle_engaging_enemy(ctx, unit),
        AiState::Fleeing => handle_fleeing(ctx, unit),
        AiState::Healing => handle_healing(ctx, unit),
    }
}
