//! # RandomNumberGenerator
//!
//! Every randomized operation of the optimizer draws from an explicit
//! `RandomNumberGenerator` handed in by the caller. Seeding it with
//! [`RandomNumberGenerator::from_seed`] makes a whole run reproducible.
//!
//! ## Example
//!
//! ```rust
//! use tiered_tour::rng::RandomNumberGenerator;
//!
//! let mut a = RandomNumberGenerator::from_seed(7);
//! let mut b = RandomNumberGenerator::from_seed(7);
//!
//! assert_eq!(a.sample_distinct(10, 3), b.sample_distinct(10, 3));
//! ```

use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

/// A wrapper around the `rand` crate's `StdRng` that provides the draws
/// needed by the genetic operators.
#[derive(Clone, Debug)]
pub struct RandomNumberGenerator {
    pub rng: StdRng,
}

impl RandomNumberGenerator {
    /// Creates a new `RandomNumberGenerator` instance seeded from the system entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates a new `RandomNumberGenerator` instance with a specific seed.
    ///
    /// This is useful for reproducible runs, tests and benchmarks.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Returns a uniform draw from `[0, 1)`.
    pub fn probability(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    /// Returns a uniform index in `[0, len)`.
    ///
    /// # Panics
    ///
    /// Panics if `len` is zero.
    pub fn index(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }

    /// Draws `amount` distinct indices from `[0, len)` without replacement,
    /// in draw order.
    ///
    /// # Panics
    ///
    /// Panics if `amount > len`.
    pub fn sample_distinct(&mut self, len: usize, amount: usize) -> Vec<usize> {
        rand::seq::index::sample(&mut self.rng, len, amount).into_vec()
    }

    /// Draws two distinct positions of `[0, len)` and returns them ascending.
    ///
    /// # Panics
    ///
    /// Panics if `len < 2`.
    pub fn cut_points(&mut self, len: usize) -> (usize, usize) {
        let drawn = self.sample_distinct(len, 2);
        (drawn[0].min(drawn[1]), drawn[0].max(drawn[1]))
    }

    /// Shuffles `values` in place with a uniform random permutation.
    pub fn shuffle<T>(&mut self, values: &mut [T]) {
        values.shuffle(&mut self.rng);
    }
}

impl Default for RandomNumberGenerator {
    fn default() -> Self {
        Self::new()
    }
}
