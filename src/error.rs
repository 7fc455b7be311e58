//! Errors reported by [`SkipSet`][crate::SkipSet].

use std::collections::TryReserveError;

use thiserror::Error;

/// Errors that can occur when operating on a [`SkipSet`][crate::SkipSet].
///
/// Looking up or removing an absent element is not an error; those operations
/// report `false` or `None` instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// The operation needs at least one element but the set is empty.
    #[error("the set is empty.")]
    EmptyCollection,
    /// The level arrays could not be grown to make room for a new element.
    #[error("failed to grow the skiplist: {0}")]
    CapacityGrowth(#[from] TryReserveError),
}

/// Shorthand for results returned by this crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;
