//! Secure randomness for dealing, role assignment and join codes.
//!
//! Production games draw from the operating system's CSPRNG. Tests can
//! swap in a seeded generator to replay a deal exactly.

use rand::{
    Rng, RngCore, SeedableRng, TryRngCore,
    rngs::{OsRng, StdRng},
};
use std::fmt;

/// Source of uniform random integers owned by a game.
pub struct GameRng {
    inner: Box<dyn RngCore + Send>,
}

impl GameRng {
    /// Operating system randomness. A failing OS source panics on the next
    /// draw; a game can't be dealt fairly without it.
    #[must_use]
    pub fn os() -> Self {
        Self::from_rng(OsRng.unwrap_err())
    }

    /// Deterministic generator for tests and benchmarks.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    #[must_use]
    pub fn from_rng<R: RngCore + Send + 'static>(rng: R) -> Self {
        Self {
            inner: Box::new(rng),
        }
    }

    /// Uniform value in `[0, k)`. `k` must be non-zero.
    pub fn random_int(&mut self, k: usize) -> usize {
        self.inner.random_range(0..k)
    }

    /// In-place Fisher-Yates shuffle.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.random_int(i + 1);
            items.swap(i, j);
        }
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::os()
    }
}

impl fmt::Debug for GameRng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameRng").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_int_stays_in_range() {
        let mut rng = GameRng::os();
        for k in 1..20 {
            for _ in 0..50 {
                assert!(rng.random_int(k) < k);
            }
        }
    }

    #[test]
    fn test_random_int_of_one_is_zero() {
        let mut rng = GameRng::seeded(7);
        assert_eq!(rng.random_int(1), 0);
    }

    #[test]
    fn test_shuffle_is_a_permutation() {
        let mut rng = GameRng::os();
        let mut items: Vec<u32> = (0..40).collect();
        rng.shuffle(&mut items);

        let mut sorted = items.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..40).collect::<Vec<_>>());
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let mut a = GameRng::seeded(42);
        let mut b = GameRng::seeded(42);

        let mut left: Vec<u32> = (0..25).collect();
        let mut right = left.clone();
        a.shuffle(&mut left);
        b.shuffle(&mut right);

        assert_eq!(left, right);
    }

    #[test]
    fn test_shuffle_handles_tiny_slices() {
        let mut rng = GameRng::seeded(1);
        let mut empty: [u8; 0] = [];
        rng.shuffle(&mut empty);

        let mut single = [9u8];
        rng.shuffle(&mut single);
        assert_eq!(single, [9]);
    }

    #[test]
    fn test_shuffle_moves_items() {
        // 40 items staying put after a uniform shuffle has probability 1/40!
        let mut rng = GameRng::os();
        let original: Vec<u32> = (0..40).collect();
        let mut items = original.clone();
        rng.shuffle(&mut items);
        assert_ne!(items, original);
    }
}
