//! Geometric level generator.

use rand::prelude::*;
use thiserror::Error;

use crate::level_generator::LevelGenerator;

/// Probability used by [`Geometric::default`]: a fair coin.
pub const DEFAULT_P: f64 = 0.5;

#[derive(Error, Debug, PartialEq, Eq)]
/// Errors that can occur when creating a [`Geometric`] level generator.
#[expect(
    clippy::module_name_repetitions,
    reason = "Using 'Error' would be too generic and may cause confusion."
)]
#[non_exhaustive]
pub enum GeometricError {
    /// The probability `$p$` must be in the range `$(0, 1)$`.
    #[error("p must be in (0, 1).")]
    InvalidProbability,
}

/// A level generator using a geometric distribution.
///
/// This distribution assumes that if a node is present at some level `$n$`,
/// then the probability that it is present at level `$n+1$` is some constant
/// `$p \in (0, 1)$`. Levels are drawn by flipping a biased coin until it
/// comes up tails, counting the heads, and truncating at the number of levels
/// available. With the default `$p = 1/2$` the expected tower height is about
/// 2 and `$P(\text{height} \geq k) \approx 2^{-(k-1)}$`.
#[derive(Debug, Clone)]
pub struct Geometric {
    /// The probability that a node is present in the next level.
    p: f64,
    /// The random number generator.
    rng: SmallRng,
}

impl Geometric {
    /// Create a new geometric level generator with `p` as the probability
    /// that a given node is present in the next level, seeded from the
    /// thread-local generator.
    ///
    /// # Errors
    ///
    /// `p` must be strictly between 0 and 1.
    #[inline]
    pub fn new(p: f64) -> Result<Self, GeometricError> {
        Self::with_rng(p, SmallRng::from_rng(&mut rand::rng()))
    }

    /// Create a new geometric level generator whose draws are fully
    /// determined by `seed`.
    ///
    /// # Errors
    ///
    /// `p` must be strictly between 0 and 1.
    #[inline]
    pub fn with_seed(p: f64, seed: u64) -> Result<Self, GeometricError> {
        Self::with_rng(p, SmallRng::seed_from_u64(seed))
    }

    /// Create a fair-coin generator (`$p = 1/2$`) whose draws are fully
    /// determined by `seed`.
    #[inline]
    #[must_use]
    pub fn fair_with_seed(seed: u64) -> Self {
        Geometric {
            p: DEFAULT_P,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Create a new geometric level generator drawing from `rng`.
    ///
    /// # Errors
    ///
    /// `p` must be strictly between 0 and 1.
    #[inline]
    pub fn with_rng(p: f64, rng: SmallRng) -> Result<Self, GeometricError> {
        if !(0.0 < p && p < 1.0) {
            return Err(GeometricError::InvalidProbability);
        }
        Ok(Geometric { p, rng })
    }

    /// The probability that a node is present in the next level.
    #[inline]
    #[must_use]
    pub fn p(&self) -> f64 {
        self.p
    }
}

impl Default for Geometric {
    /// A fair-coin generator seeded from the thread-local generator.
    #[inline]
    fn default() -> Self {
        Geometric {
            p: DEFAULT_P,
            rng: SmallRng::from_rng(&mut rand::rng()),
        }
    }
}

impl LevelGenerator for Geometric {
    /// Generate a level by counting successful Bernoulli trials, stopping at
    /// the first failure or once the level reaches `total - 1`.
    #[inline]
    fn level(&mut self, total: usize) -> usize {
        let mut level = 0;
        while level + 1 < total && self.rng.random_bool(self.p) {
            level += 1;
        }
        level
    }
}
