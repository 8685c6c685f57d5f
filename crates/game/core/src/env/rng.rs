//! Injectable random source for tie-breaks and probability rolls.
//!
//! Every random decision in the AI (move tie-breaks, risk aversion,
//! exploration rolls, spawn stats) goes through [`RandomSource`].
//!
//! # Determinism
//!
//! [`SeededRandom`] produces the same sequence for the same seed, which keeps
//! simulations replayable. [`ScriptedRandom`] replays fixed values so tests
//! can pin a specific branch.

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of randomness for the decision core.
pub trait RandomSource {
    /// Returns a value in `[0.0, 1.0)`.
    fn next_f64(&mut self) -> f64;

    /// Returns an index in `0..len`. `len` must be non-zero.
    fn next_index(&mut self, len: usize) -> usize;

    /// Returns `true` with probability `p`.
    ///
    /// `p <= 0.0` never succeeds and `p >= 1.0` always succeeds.
    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// Generate a random value in range [min, max] inclusive.
    fn range_inclusive(&mut self, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        let span = (max - min) as usize + 1;
        min + self.next_index(span) as u32
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_f64(&mut self) -> f64 {
        (**self).next_f64()
    }

    fn next_index(&mut self, len: usize) -> usize {
        (**self).next_index(len)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn next_f64(&mut self) -> f64 {
        (**self).next_f64()
    }

    fn next_index(&mut self, len: usize) -> usize {
        (**self).next_index(len)
    }
}

/// Picks a uniformly random element, or `None` for an empty slice.
pub fn choose<'a, T, R>(rng: &mut R, items: &'a [T]) -> Option<&'a T>
where
    R: RandomSource + ?Sized,
{
    if items.is_empty() {
        None
    } else {
        items.get(rng.next_index(items.len()))
    }
}

/// Seeded random source backed by [`StdRng`].
#[derive(Clone, Debug)]
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRandom {
    fn next_f64(&mut self) -> f64 {
        self.rng.gen_range(0.0..1.0)
    }

    fn next_index(&mut self, len: usize) -> usize {
        if len == 0 {
            tracing::error!("next_index called with an empty range");
            return 0;
        }
        self.rng.gen_range(0..len)
    }
}

/// Replays scripted values, falling back to `0.0` and index `0` once exhausted.
///
/// Indices are reduced modulo the requested length so a script never produces
/// an out-of-range choice.
#[derive(Clone, Debug, Default)]
pub struct ScriptedRandom {
    floats: VecDeque<f64>,
    indices: VecDeque<usize>,
}

impl ScriptedRandom {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_floats(mut self, values: impl IntoIterator<Item = f64>) -> Self {
        self.floats.extend(values);
        self
    }

    pub fn with_indices(mut self, values: impl IntoIterator<Item = usize>) -> Self {
        self.indices.extend(values);
        self
    }
}

impl RandomSource for ScriptedRandom {
    fn next_f64(&mut self) -> f64 {
        self.floats.pop_front().unwrap_or(0.0)
    }

    fn next_index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        self.indices.pop_front().unwrap_or(0) % len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_random_is_deterministic() {
        let mut a = SeededRandom::new(42);
        let mut b = SeededRandom::new(42);
        for _ in 0..16 {
            assert_eq!(a.next_index(10), b.next_index(10));
        }
        let value = a.next_f64();
        assert!((0.0..1.0).contains(&value));
    }

    #[test]
    fn scripted_random_replays_then_defaults() {
        let mut rng = ScriptedRandom::new()
            .with_floats([0.9])
            .with_indices([5]);
        assert_eq!(rng.next_f64(), 0.9);
        assert_eq!(rng.next_f64(), 0.0);
        assert_eq!(rng.next_index(4), 1);
        assert_eq!(rng.next_index(4), 0);
    }

    #[test]
    fn chance_respects_bounds() {
        let mut rng = ScriptedRandom::new().with_floats([0.0, 0.99]);
        assert!(!rng.chance(0.0));
        assert!(rng.chance(1.0));
    }

    #[test]
    fn range_inclusive_covers_both_ends() {
        let mut rng = ScriptedRandom::new().with_indices([0, 3]);
        assert_eq!(rng.range_inclusive(5, 8), 5);
        assert_eq!(rng.range_inclusive(5, 8), 8);
        assert_eq!(rng.range_inclusive(7, 7), 7);
    }

    #[test]
    fn choose_handles_empty_slices() {
        let mut rng = ScriptedRandom::new().with_indices([1]);
        let empty: [u8; 0] = [];
        assert_eq!(choose(&mut rng, &empty), None);
        assert_eq!(choose(&mut rng, &[1, 2, 3]), Some(&2));
    }
}
