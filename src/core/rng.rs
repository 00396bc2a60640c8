//! Seeded randomness.
//!
//! Every random choice in a game comes from a [`GameRng`]: the deck order of
//! each round, the phase order, the bots' coin flips. The same seed replays
//! the same game.
//!
//! ```
//! use phase_ten::core::GameRng;
//!
//! let mut left: Vec<u8> = (0..20).collect();
//! let mut right = left.clone();
//! GameRng::new(7).shuffle(&mut left);
//! GameRng::new(7).shuffle(&mut right);
//! assert_eq!(left, right);
//! ```

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// ChaCha8 stream seeded from a `u64`.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Named stream derived from this one's seed, e.g. `"deck"`.
    ///
    /// Draws from one context never shift another.
    #[must_use]
    pub fn for_context(&self, context: &str) -> Self {
        let mut hasher = DefaultHasher::new();
        self.seed.hash(&mut hasher);
        context.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// `true` with the given probability, clamped to `0.0..=1.0`.
    pub fn gen_bool(&mut self, probability: f64) -> bool {
        self.inner.gen_bool(probability.clamp(0.0, 1.0))
    }

    /// Uniform shuffle in place.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.inner);
    }
}
