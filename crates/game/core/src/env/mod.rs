//! Collaborators injected into the decision core.
//!
//! The core never reads ambient state: randomness is obtained from a
//! [`RandomSource`] handed in by the caller so tests can force deterministic
//! outcomes and the runtime can seed replays.
mod rng;

pub use rng::{RandomSource, ScriptedRandom, SeededRandom, choose};
