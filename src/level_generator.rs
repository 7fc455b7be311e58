//! Skiplists use a probabilistic distribution of nodes over the internal
//! levels, whereby the lowest level (level 0) contains all the nodes, and each
//! level $n > 0$ will contain a random subset of the nodes on level `n - 1`.
//!
//! Most commonly, a geometric distribution is used whereby the chance that a
//! node occupies level $n$ is $p$ times the chance of occupying level $n-1$
//! (with $0 < p < 1$).
//!
//! Unlike a fixed-height skiplist, the number of levels available to a
//! [`SkipSet`][crate::SkipSet] grows with the number of elements, so the
//! number of levels is supplied on every draw rather than fixed when the
//! generator is built.

pub mod geometric;

pub use geometric::{Geometric, GeometricError};

// ////////////////////////////////////////////////////////////////////////////
// Level Generator
// ////////////////////////////////////////////////////////////////////////////

/// Upon the insertion of a new node in the set, the node is replicated to
/// higher levels with a certain probability as determined by a
/// [`LevelGenerator`].
///
/// Implementations must be deterministic given their internal state so that a
/// seeded generator reproduces the same structure.
pub trait LevelGenerator {
    /// Generate a random level for a node in the range `[0, total)`.
    ///
    /// This function should _never_ return a level greater or equal to
    /// `total`. When `total` is 0 or 1, the only valid answer is 0.
    #[must_use]
    fn level(&mut self, total: usize) -> usize;
}

impl<G> LevelGenerator for &mut G
where
    G: LevelGenerator + ?Sized,
{
    #[inline]
    fn level(&mut self, total: usize) -> usize {
        (**self).level(total)
    }
}
