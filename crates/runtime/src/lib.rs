//! Enemy AI runtime for the arena simulation.
//!
//! This crate layers the decision state machine and turn orchestration on top
//! of the synchronous rules in `arena-core`. Decisions run to completion on
//! the caller's thread; presentation consumes published events asynchronously
//! and never feeds back into decisions.
//!
//! Modules are organized by responsibility:
//! - [`ai`] hosts the state machine: context, re-evaluation and handlers
//! - [`orchestrator`] drives one decision per living enemy per turn
//! - [`events`] provides the topic-based event bus
//! - [`presenter`] paces action events for display
pub mod ai;
pub mod error;
pub mod events;
pub mod orchestrator;
pub mod presenter;

pub use ai::{AiContext, Evaluation, evaluate, handle_state, reevaluate};
pub use error::{Result, RuntimeError};
pub use events::{ActionEvent, Event, EventBus, Topic, TurnEvent};
pub use orchestrator::{TurnOrchestrator, TurnSummary};
pub use presenter::Presenter;
