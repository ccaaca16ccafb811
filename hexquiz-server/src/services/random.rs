//! Injectable randomness
//!
//! Production draws from an entropy-seeded RNG. Tests pass a fixed seed so
//! query randomization and quiz picks are reproducible.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::sync::{Mutex, PoisonError};

/// Shared random source; the lock is held only for a single draw
pub struct RandomSource {
    rng: Mutex<StdRng>,
}

impl RandomSource {
    pub fn from_entropy() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Uniformly chosen element, `None` for an empty slice
    pub fn choose<'a, T>(&self, items: &'a [T]) -> Option<&'a T> {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        items.choose(&mut *rng)
    }

    /// Uniform integer in `low..=high`
    pub fn between(&self, low: u32, high: u32) -> u32 {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        rng.gen_range(low..=high)
    }
}

impl Default for RandomSource {
    fn default() -> Self {
        Self::from_entropy()
    }
}
