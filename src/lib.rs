//! A skiplist is a way of storing elements in such a way that elements can be
//! efficiently searched for, inserted and removed, all in `O(log(n))` on
//! average.
//!
//! Conceptually, a skiplist resembles something like:
//!
//! ```text
//! <head> ----------> [2] --------------------------------------------------> [9] ---------->
//! <head> ----------> [2] ------------------------------------[7] ----------> [9] ---------->
//! <head> ----------> [2] ----------> [4] ------------------> [7] ----------> [9] --> [10] ->
//! <head> --> [1] --> [2] --> [3] --> [4] --> [5] --> [6] --> [7] --> [8] --> [9] --> [10] ->
//! ```
//!
//! where each node `[x]` has references to nodes further down the list,
//! allowing the algorithm to effectively skip ahead. Level 0 links every
//! element in both directions; each higher level links a random subset of the
//! level below it.
//!
//! This crate provides [`SkipSet`], an ordered set of unique elements built on
//! such a structure. Node heights come from a seedable [`LevelGenerator`], so
//! the exact shape of a set can be reproduced. Over a long run of insertions
//! and removals the heights may drift from the ideal distribution;
//! [`SkipSet::rebalance`] redraws them without touching the contents.
//!
//! ```
//! use skipset::SkipSet;
//!
//! let mut set = SkipSet::with_seed(0x5eed);
//! set.extend([5, 1, 9, 3]);
//! assert!(set.remove(&3));
//! assert_eq!(set.to_vec(), vec![1, 5, 9]);
//!
//! set.rebalance();
//! assert_eq!(set.to_vec(), vec![1, 5, 9]);
//! ```
//!
//! The elements' [`Ord`] implementation **must** be a total order. Failure to
//! satisfy this can result in elements which cannot be found again, but never
//! in memory unsafety: nodes are stored in an arena and linked by index.
//!
//! The set is not synchronized; share it across threads behind a lock.
//! Diagnostic events are emitted through the [`log`] facade.

mod error;
mod iter;
pub mod level_generator;
mod skipset;
mod tower;

pub use error::{Error, Result};
pub use iter::{IntoIter, Iter};
pub use level_generator::{Geometric, GeometricError, LevelGenerator};
pub use skipset::{CursorMut, DEFAULT_HEIGHT, SkipSet};
