//! Topic-based event bus for runtime events.
//!
//! The orchestrator publishes every recorded outcome and turn boundary;
//! consumers subscribe only to the topics they render or log.

mod bus;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use types::{ActionEvent, TurnEvent};
