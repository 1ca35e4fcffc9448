//! Uniform sampling without replacement.

use std::sync::{Mutex, PoisonError};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniform draws, shared by all requests.
pub trait RandomSource: Send + Sync {
    /// A value uniformly distributed over `[0, upper)`. `upper` is at least 1.
    fn below(&self, upper: usize) -> usize;
}

/// `StdRng` behind a mutex. The lock is held for a single draw.
pub struct SeededRandom {
    rng: Mutex<StdRng>,
}

impl SeededRandom {
    /// Seeded from the operating system, for production.
    pub fn from_entropy() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }

    /// Fixed seed: the same seed yields the same sequence of draws.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandomSource for SeededRandom {
    fn below(&self, upper: usize) -> usize {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        rng.random_range(0..upper)
    }
}

/// Picks `min(n, k)` distinct indices from `[0, n)`.
///
/// Partial Fisher–Yates over the identity permutation: position `i` is
/// swapped with a uniform position in `[i, n)` and the first `min(n, k)`
/// slots are returned. Every subset of that size is equally likely.
pub fn sample_indices(source: &dyn RandomSource, n: usize, k: usize) -> Vec<usize> {
    let take = n.min(k);
    let mut pool: Vec<usize> = (0..n).collect();
    for i in 0..take {
        let j = i + source.below(n - i);
        pool.swap(i, j);
    }
    pool.truncate(take);
    pool
}

/// A single uniform pick from `[0, n)`, or `None` when `n` is zero.
pub fn pick_one(source: &dyn RandomSource, n: usize) -> Option<usize> {
    sample_indices(source, n, 1).first().copied()
}
