//! Async consumer that replays action events at a human-friendly pace.
//!
//! The presenter only reads from the bus; nothing it does feeds back into
//! decisions.

use std::time::Duration;

use tokio::sync::broadcast::{self, error::RecvError};

use crate::events::{ActionEvent, Event, EventBus, Topic};

pub struct Presenter {
    rx: broadcast::Receiver<Event>,
    delay: Option<Duration>,
}

impl Presenter {
    /// Subscribes to the action topic. Events published earlier are not seen.
    pub fn new(bus: &EventBus) -> Self {
        Self {
            rx: bus.subscribe(Topic::Action),
            delay: None,
        }
    }

    /// Pauses for `delay` after each event before handing it out.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = (!delay.is_zero()).then_some(delay);
        self
    }

    /// Waits for the next action event.
    ///
    /// Returns `None` once every bus handle has been dropped. Events lost to
    /// lag are skipped with a warning.
    pub async fn next(&mut self) -> Option<ActionEvent> {
        loop {
            match self.rx.recv().await {
                Ok(Event::Action(event)) => {
                    if let Some(delay) = self.delay {
                        tokio::time::sleep(delay).await;
                    }
                    return Some(event);
                }
                Ok(other) => tracing::trace!(topic = ?other.topic(), "ignoring event"),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "presenter fell behind, events dropped");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }

    /// Renders events until the bus closes and returns how many were shown.
    pub async fn run<F>(mut self, mut render: F) -> usize
    where
        F: FnMut(&ActionEvent),
    {
        let mut shown = 0;
        while let Some(event) = self.next().await {
            render(&event);
            shown += 1;
        }
        tracing::debug!(shown, "presenter finished");
        shown
    }
}
