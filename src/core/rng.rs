//! Seeded randomness for a battle.
//!
//! Every random decision in a battle draws from one `GameRng`: draw pile
//! shuffles, range values, weighted enemy moves and random targets. Given a
//! seed, a battle replays exactly.
//!
//! ## Branching
//!
//! Look-ahead search must not learn the real draw order. Branches take a
//! [`fork`](GameRng::fork) and reshuffle with it, so each branch sees a
//! plausible order while the real stream stays untouched.
//!
//! ```
//! use card_battler::core::GameRng;
//!
//! let mut rng = GameRng::new(42);
//! let mut branch = rng.fork();
//! assert_ne!(rng.seed(), branch.seed());
//! assert!((1..=6).contains(&branch.gen_inclusive(1, 6)));
//! ```

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Deterministic RNG owned by a battle, and by each search bot.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
    forks: u64,
}

impl GameRng {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            forks: 0,
        }
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// An independent stream derived from this seed and the number of
    /// earlier forks. Does not consume from this stream.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.forks += 1;
        Self::new(self.seed.wrapping_add(self.forks.wrapping_mul(0x9E37_79B9_7F4A_7C15)))
    }

    /// Uniform integer in `[low, high]`. Swapped bounds are accepted.
    pub fn gen_inclusive(&mut self, low: i32, high: i32) -> i32 {
        let (low, high) = if low <= high { (low, high) } else { (high, low) };
        self.inner.gen_range(low..=high)
    }

    /// Uniform index below `len`, or `None` when `len` is zero.
    pub fn index(&mut self, len: usize) -> Option<usize> {
        (len > 0).then(|| self.inner.gen_range(0..len))
    }

    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut self.inner);
    }

    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        slice.choose(&mut self.inner)
    }

    /// Index picked with probability proportional to its weight.
    ///
    /// `None` when there is no positive weight. Zero weights are never picked.
    pub fn choose_weighted(&mut self, weights: &[f32]) -> Option<usize> {
        let total: f32 = weights.iter().filter(|w| **w > 0.0).sum();
        if total <= 0.0 {
            return None;
        }

        let mut threshold = self.inner.gen::<f32>() * total;
        for (i, &weight) in weights.iter().enumerate().filter(|(_, w)| **w > 0.0) {
            threshold -= weight;
            if threshold <= 0.0 {
                return Some(i);
            }
        }
        // Rounding left a sliver past the last weight.
        weights.iter().rposition(|&w| w > 0.0)
    }
}
