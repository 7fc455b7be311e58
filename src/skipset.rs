//! An always-ordered set of unique elements.

use std::{borrow::Borrow, cmp, fmt, hash, hash::Hash, iter};

use crate::{
    error::{Error, Result},
    iter::{IntoIter, Iter},
    level_generator::{Geometric, LevelGenerator},
    tower::{HEAD, Tower, TowerId, Towers},
};

/// Number of levels a new set starts with.
pub const DEFAULT_HEIGHT: usize = 8;

// ////////////////////////////////////////////////////////////////////////////
// SkipSet
// ////////////////////////////////////////////////////////////////////////////

/// An ordered set of unique elements backed by a skiplist.
///
/// Searching, insertion and removal all take `O(log(n))` time on average.
/// Each element lives in a tower whose height is drawn at random by a
/// [`LevelGenerator`] (by default [`Geometric`] with a fair coin). Taller
/// towers act as express lanes which searches descend from.
///
/// The number of levels grows with the set: whenever an insertion would
/// leave fewer levels than `len() + 1`, the number of levels doubles.
///
/// Elements are ordered by their [`Ord`] implementation, which **must** be
/// a total order consistent with [`Eq`]; otherwise the set will misbehave
/// (though it will never cause undefined behaviour). Inserting an element
/// equal to one already present leaves the set unchanged.
///
/// # Examples
///
/// ```
/// use skipset::SkipSet;
///
/// let mut set = SkipSet::new();
/// for x in [5, 1, 9, 3] {
///     set.insert(x);
/// }
/// assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec![1, 3, 5, 9]);
/// assert_eq!(set.first(), Ok(&1));
/// assert_eq!(set.last(), Ok(&9));
/// ```
#[derive(Clone)]
pub struct SkipSet<T, G = Geometric> {
    towers: Towers<T>,
    len: usize,
    // Highest level at which the head links to any tower.
    active_level: usize,
    level_generator: G,
}

// ///////////////////////////////////////////////
// Constructors
// ///////////////////////////////////////////////

impl<T> SkipSet<T> {
    /// Create a new, empty set with [`DEFAULT_HEIGHT`] levels and a fair-coin
    /// [`Geometric`] level generator.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipset::SkipSet;
    ///
    /// let set: SkipSet<i64> = SkipSet::new();
    /// assert!(set.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_generator(Geometric::default())
    }

    /// Create a new, empty set with enough levels for `capacity` elements
    /// before the levels need to grow.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipset::SkipSet;
    ///
    /// let mut set = SkipSet::with_capacity(100);
    /// assert_eq!(set.capacity(), 101);
    /// set.extend(0..100);
    /// assert_eq!(set.capacity(), 101);
    /// ```
    #[inline]
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_generator(capacity, Geometric::default())
    }

    /// Create a new, empty set whose tower heights are fully determined by
    /// `seed`.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipset::SkipSet;
    ///
    /// let mut a = SkipSet::with_seed(42);
    /// let mut b = SkipSet::with_seed(42);
    /// a.extend(0..100);
    /// b.extend(0..100);
    /// assert_eq!(a.structure(), b.structure());
    /// ```
    #[inline]
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::with_generator(Geometric::fair_with_seed(seed))
    }
}

impl<T, G> SkipSet<T, G>
where
    G: LevelGenerator,
{
    /// Create a new, empty set drawing tower heights from `level_generator`.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipset::{Geometric, SkipSet};
    ///
    /// let generator = Geometric::with_seed(0.25, 7).unwrap();
    /// let mut set = SkipSet::with_generator(generator);
    /// set.insert("a");
    /// assert!(set.contains("a"));
    /// ```
    #[inline]
    pub fn with_generator(level_generator: G) -> Self {
        Self::with_capacity_and_generator(DEFAULT_HEIGHT - 1, level_generator)
    }

    /// Create a new, empty set with enough levels for `capacity` elements,
    /// drawing tower heights from `level_generator`.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipset::{Geometric, SkipSet};
    ///
    /// let mut set = SkipSet::with_capacity_and_generator(15, Geometric::fair_with_seed(3));
    /// assert_eq!(set.capacity(), 16);
    /// set.extend(0..10);
    /// assert_eq!(set.capacity(), 16);
    /// ```
    #[inline]
    pub fn with_capacity_and_generator(capacity: usize, level_generator: G) -> Self {
        SkipSet {
            towers: Towers::new(capacity.saturating_add(1)),
            len: 0,
            active_level: 0,
            level_generator,
        }
    }
}

// ///////////////////////////////////////////////
// Inherent methods
// ///////////////////////////////////////////////

impl<T, G> SkipSet<T, G> {
    /// Clears the set, removing all elements. The number of levels is kept.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipset::SkipSet;
    ///
    /// let mut set: SkipSet<_> = (0..10).collect();
    /// set.clear();
    /// assert!(set.is_empty());
    /// ```
    #[inline]
    pub fn clear(&mut self) {
        self.towers.clear();
        self.len = 0;
        self.active_level = 0;
    }

    /// Returns the number of elements in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipset::SkipSet;
    ///
    /// let set: SkipSet<_> = (0..10).collect();
    /// assert_eq!(set.len(), 10);
    /// ```
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the set contains no elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipset::SkipSet;
    ///
    /// let mut set = SkipSet::new();
    /// assert!(set.is_empty());
    ///
    /// set.insert(1);
    /// assert!(!set.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The number of levels currently allocated, which bounds the height of
    /// every tower. It is always greater than [`len`][Self::len].
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.towers.head_height()
    }

    /// The highest level currently holding any element; searches start
    /// descending from here.
    #[inline]
    #[must_use]
    pub fn active_level(&self) -> usize {
        self.active_level
    }

    /// Returns the smallest element.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyCollection`] if the set is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipset::{Error, SkipSet};
    ///
    /// let mut set = SkipSet::new();
    /// assert_eq!(set.first(), Err(Error::EmptyCollection));
    ///
    /// set.insert(2);
    /// set.insert(1);
    /// assert_eq!(set.first(), Ok(&1));
    /// ```
    #[inline]
    pub fn first(&self) -> Result<&T> {
        self.towers
            .next(HEAD, 0)
            .map(|id| self.towers.value(id))
            .ok_or(Error::EmptyCollection)
    }

    /// Returns the largest element.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyCollection`] if the set is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipset::{Error, SkipSet};
    ///
    /// let mut set = SkipSet::new();
    /// assert_eq!(set.last(), Err(Error::EmptyCollection));
    ///
    /// set.insert(1);
    /// set.insert(2);
    /// assert_eq!(set.last(), Ok(&2));
    /// ```
    #[inline]
    pub fn last(&self) -> Result<&T> {
        self.last_tower()
            .map(|id| self.towers.value(id))
            .ok_or(Error::EmptyCollection)
    }

    /// Creates an iterator over the elements of the set in ascending order.
    ///
    /// Every call produces an independent iterator starting from the
    /// smallest element. The set cannot be modified while the iterator is
    /// alive; use [`cursor_mut`][Self::cursor_mut] to remove elements during
    /// a traversal.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipset::SkipSet;
    ///
    /// let set: SkipSet<_> = [3, 1, 2].into_iter().collect();
    /// assert_eq!(set.iter().collect::<Vec<_>>(), vec![&1, &2, &3]);
    /// assert_eq!(set.iter().rev().next(), Some(&3));
    /// ```
    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(
            &self.towers,
            self.towers.next(HEAD, 0),
            self.last_tower(),
            self.len,
        )
    }

    /// Creates a cursor positioned before the smallest element which can
    /// remove elements as it walks the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipset::SkipSet;
    ///
    /// let mut set: SkipSet<_> = (0..10).collect();
    /// let mut cursor = set.cursor_mut();
    /// while let Some(&x) = cursor.move_next() {
    ///     if x % 3 == 0 {
    ///         cursor.remove_current();
    ///     }
    /// }
    /// assert_eq!(set.to_vec(), vec![1, 2, 4, 5, 7, 8]);
    /// ```
    #[inline]
    pub fn cursor_mut(&mut self) -> CursorMut<'_, T, G> {
        CursorMut {
            set: self,
            current: HEAD,
        }
    }

    /// Returns a snapshot of the elements in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipset::SkipSet;
    ///
    /// let set: SkipSet<_> = [5, 1, 9, 3].into_iter().collect();
    /// assert_eq!(set.to_vec(), vec![1, 3, 5, 9]);
    /// ```
    #[inline]
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }

    /// Retains only the elements specified by the predicate.
    ///
    /// In other words, remove all elements `e` such that `f(&e)` returns false.
    /// This method operates in place, visiting each element exactly once in
    /// ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipset::SkipSet;
    ///
    /// let mut set: SkipSet<_> = (0..10).collect();
    /// set.retain(|&x| x % 2 == 0);
    /// assert_eq!(set.to_vec(), vec![0, 2, 4, 6, 8]);
    /// ```
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&T) -> bool,
    {
        let mut cursor = self.cursor_mut();
        while let Some(value) = cursor.move_next() {
            if !f(value) {
                drop(cursor.remove_current());
            }
        }
    }

    /// Reduces the number of levels to fit the current length, lowering any
    /// tower which is taller than the new number of levels.
    ///
    /// The number of levels is halved for as long as it is more than twice
    /// `len() + 1`.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipset::SkipSet;
    ///
    /// let mut set: SkipSet<_> = (0..100).collect();
    /// set.retain(|&x| x < 3);
    /// set.shrink_to_fit();
    /// assert_eq!(set.capacity(), 8);
    /// assert_eq!(set.to_vec(), vec![0, 1, 2]);
    /// ```
    pub fn shrink_to_fit(&mut self) {
        let old_height = self.towers.head_height();
        let floor = self.len.saturating_add(1);
        let mut height = old_height;
        while height > floor.saturating_mul(2) {
            height /= 2;
        }
        if height < old_height {
            self.towers.shrink_head(height);
            self.refresh_active_level();
            log::debug!("shrunk skiplist from {old_height} to {height} levels");
        }
    }
}

impl<T, G> SkipSet<T, G>
where
    T: Ord,
    G: LevelGenerator,
{
    /// Insert the element into the set.
    ///
    /// Returns whether the element was newly inserted; if an equal element is
    /// already present the set is left unchanged and `false` is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipset::SkipSet;
    ///
    /// let mut set = SkipSet::new();
    ///
    /// assert!(set.insert(0));
    /// assert!(set.insert(5));
    /// assert!(!set.insert(5));
    /// assert_eq!(set.len(), 2);
    /// ```
    pub fn insert(&mut self, value: T) -> bool {
        let Err(predecessor) = self.search(&value) else {
            return false;
        };
        if let Some(height) = self.required_capacity() {
            log::debug!(
                "growing skiplist from {} to {height} levels",
                self.towers.head_height()
            );
            self.towers.grow_head(height);
        }
        self.link_new(predecessor, value);
        true
    }

    /// Insert the element into the set, reporting allocation failure instead
    /// of aborting when the levels need to grow.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CapacityGrowth`] if the levels or the node storage
    /// could not be grown. The elements and the number of levels are left
    /// unchanged in that case; every allocation is made before the set is
    /// modified.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipset::SkipSet;
    ///
    /// let mut set = SkipSet::new();
    /// assert_eq!(set.try_insert(1), Ok(true));
    /// assert_eq!(set.try_insert(1), Ok(false));
    /// ```
    pub fn try_insert(&mut self, value: T) -> Result<bool> {
        let Err(predecessor) = self.search(&value) else {
            return Ok(false);
        };
        self.towers.try_reserve()?;
        let grow_to = self.required_capacity();
        if let Some(height) = grow_to {
            self.towers.try_reserve_head(height)?;
        }
        let levels = grow_to.unwrap_or_else(|| self.towers.head_height());
        let height = 1 + self.level_generator.level(levels);
        let tower = Tower::try_new(value, height)?;

        if let Some(height) = grow_to {
            log::debug!(
                "growing skiplist from {} to {height} levels",
                self.towers.head_height()
            );
            self.towers.grow_head(height);
        }
        let id = self.towers.link_after(predecessor, tower);
        self.count_linked(id);
        Ok(true)
    }

    /// Returns `true` if the set contains an element equal to `value`.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipset::SkipSet;
    ///
    /// let set: SkipSet<_> = [1, 5, 9].into_iter().collect();
    /// assert!(set.contains(&9));
    /// assert!(!set.contains(&100));
    /// ```
    #[inline]
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.search(value).is_ok()
    }

    /// Returns a reference to the element equal to `value`, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipset::SkipSet;
    ///
    /// let set: SkipSet<String> = ["a".to_owned()].into_iter().collect();
    /// assert_eq!(set.get("a").map(String::as_str), Some("a"));
    /// assert_eq!(set.get("b"), None);
    /// ```
    #[inline]
    pub fn get<Q>(&self, value: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.search(value).ok().map(|id| self.towers.value(id))
    }

    /// Removes the element equal to `value`. Returns whether such an element
    /// was present.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipset::SkipSet;
    ///
    /// let mut set: SkipSet<_> = [1, 3, 5, 9].into_iter().collect();
    /// assert!(set.remove(&3));
    /// assert!(!set.remove(&3));
    /// assert_eq!(set.to_vec(), vec![1, 5, 9]);
    /// ```
    #[inline]
    pub fn remove<Q>(&mut self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.take(value).is_some()
    }

    /// Removes and returns the element equal to `value`, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipset::SkipSet;
    ///
    /// let mut set: SkipSet<_> = (0..10).collect();
    /// assert_eq!(set.take(&4), Some(4));
    /// assert_eq!(set.take(&4), None);
    /// ```
    pub fn take<Q>(&mut self, value: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let id = self.search(value).ok()?;
        Some(self.unlink(id))
    }

    /// Inserts every element of `values`. Returns `true` if the set changed.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipset::SkipSet;
    ///
    /// let mut set = SkipSet::new();
    /// assert!(set.insert_all([1, 2, 3]));
    /// assert!(!set.insert_all([1, 2]));
    /// assert_eq!(set.len(), 3);
    /// ```
    pub fn insert_all<I>(&mut self, values: I) -> bool
    where
        I: IntoIterator<Item = T>,
    {
        values
            .into_iter()
            .fold(false, |changed, value| self.insert(value) || changed)
    }

    /// Returns `true` if every element of `values` is in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipset::SkipSet;
    ///
    /// let set: SkipSet<_> = (0..10).collect();
    /// assert!(set.contains_all(&[1, 5, 9]));
    /// assert!(!set.contains_all(&[1, 50]));
    /// ```
    pub fn contains_all<'a, Q, I>(&self, values: I) -> bool
    where
        I: IntoIterator<Item = &'a Q>,
        T: Borrow<Q>,
        Q: Ord + ?Sized + 'a,
    {
        values.into_iter().all(|value| self.contains(value))
    }

    /// Removes every element of `values` from the set. Elements which are not
    /// present are skipped. Returns `true` if the set changed.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipset::SkipSet;
    ///
    /// let mut set: SkipSet<_> = (0..10).collect();
    /// assert!(set.remove_all(&[1, 50, 9]));
    /// assert_eq!(set.len(), 8);
    /// ```
    pub fn remove_all<'a, Q, I>(&mut self, values: I) -> bool
    where
        I: IntoIterator<Item = &'a Q>,
        T: Borrow<Q>,
        Q: Ord + ?Sized + 'a,
    {
        values
            .into_iter()
            .fold(false, |changed, value| self.remove(value) || changed)
    }

    /// Removes every element which is not in `values`. Returns `true` if the
    /// set changed.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipset::SkipSet;
    ///
    /// let mut set: SkipSet<_> = (0..10).collect();
    /// assert!(set.retain_only(&[8, 2, 4, 42]));
    /// assert_eq!(set.to_vec(), vec![2, 4, 8]);
    /// ```
    pub fn retain_only<'a, I>(&mut self, values: I) -> bool
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        let mut keep: Vec<&T> = values.into_iter().collect();
        keep.sort_unstable();
        let before = self.len;
        self.retain(|value| keep.binary_search(&value).is_ok());
        self.len != before
    }
}

impl<T, G> SkipSet<T, G>
where
    G: LevelGenerator,
{
    /// Redraws the height of every tower from the level generator, relinking
    /// each one accordingly. The elements and their order are unchanged.
    ///
    /// This counteracts height skew accumulated over many insertions and
    /// removals, and takes `O(n)` expected time.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipset::SkipSet;
    ///
    /// let mut set: SkipSet<_> = (0..100).collect();
    /// set.rebalance();
    /// assert_eq!(set.to_vec(), (0..100).collect::<Vec<_>>());
    /// ```
    pub fn rebalance(&mut self) {
        let total = self.towers.head_height();
        let mut current = self.towers.next(HEAD, 0);
        while let Some(id) = current {
            let height = 1 + self.level_generator.level(total);
            log::trace!(
                "relevelling tower {id} from height {} to {height}",
                self.towers.height(id)
            );
            self.towers.change_height(id, height);
            current = self.towers.next(id, 0);
        }
        self.refresh_active_level();
        log::debug!(
            "rebalanced {} towers; active level is {}",
            self.len,
            self.active_level
        );
    }
}

// ///////////////////////////////////////////////
// Internal methods
// ///////////////////////////////////////////////

impl<T, G> SkipSet<T, G> {
    /// The last tower at level 0, found by always taking the rightmost link
    /// from the active level down.
    fn last_tower(&self) -> Option<TowerId> {
        let id = self.towers.descend(self.active_level, |_| true);
        (id != HEAD).then_some(id)
    }

    /// Unlink the tower `id` at every level and return its element.
    fn unlink(&mut self, id: TowerId) -> T {
        let value = self.towers.unlink(id);
        self.len -= 1;
        while self.active_level > 0 && self.towers.next(HEAD, self.active_level).is_none() {
            self.active_level -= 1;
        }
        value
    }

    /// Recompute the active level from scratch.
    fn refresh_active_level(&mut self) {
        self.active_level = (0..self.towers.head_height())
            .rev()
            .find(|&level| self.towers.next(HEAD, level).is_some())
            .unwrap_or(0);
    }

    /// The number of levels the head must grow to before inserting another
    /// element, if it must grow at all.
    fn required_capacity(&self) -> Option<usize> {
        let height = self.towers.head_height();
        // After the insertion there must still be more levels than elements.
        (self.len.saturating_add(2) > height).then(|| height.saturating_mul(2))
    }

    /// Search for `value`, returning `Ok` with its tower if present and
    /// otherwise `Err` with the tower after which it belongs at level 0.
    fn search<Q>(&self, value: &Q) -> Result<TowerId, TowerId>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let predecessor = self
            .towers
            .descend(self.active_level, |next| next.borrow() < value);
        match self.towers.next(predecessor, 0) {
            Some(id) if self.towers.value(id).borrow() == value => Ok(id),
            _ => Err(predecessor),
        }
    }
}

impl<T, G> SkipSet<T, G>
where
    G: LevelGenerator,
{
    /// Create a tower for `value` with a random height and link it after
    /// `predecessor`.
    fn link_new(&mut self, predecessor: TowerId, value: T) {
        let height = 1 + self.level_generator.level(self.towers.head_height());
        let id = self.towers.insert_after(predecessor, value, height);
        self.count_linked(id);
    }
}

impl<T, G> SkipSet<T, G> {
    /// Account for the newly linked tower `id`.
    fn count_linked(&mut self, id: TowerId) {
        self.active_level = cmp::max(self.active_level, self.towers.height(id) - 1);
        self.len += 1;
    }
}

impl<T, G> SkipSet<T, G>
where
    T: fmt::Display,
{
    /// Renders the elements present at each level, from the active level
    /// down to level 0, for debugging purposes.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipset::SkipSet;
    ///
    /// let set: SkipSet<u8> = SkipSet::new();
    /// assert_eq!(set.structure(), "0:");
    /// ```
    #[must_use]
    pub fn structure(&self) -> String {
        (0..=self.active_level)
            .rev()
            .map(|level| {
                let mut row = format!("{level}:");
                for id in self.towers.at_level(level) {
                    row.push(' ');
                    row.push_str(&self.towers.value(id).to_string());
                }
                row
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

// ////////////////////////////////////////////////////////////////////////////
// CursorMut
// ////////////////////////////////////////////////////////////////////////////

/// A cursor over a [`SkipSet`] which can remove elements as it goes.
///
/// The cursor starts before the smallest element. Removing the current
/// element moves the cursor back to the preceding one, so the next call to
/// [`move_next`][Self::move_next] yields the element that followed the
/// removed one.
pub struct CursorMut<'a, T, G = Geometric> {
    set: &'a mut SkipSet<T, G>,
    // `HEAD` while the cursor is before the first element.
    current: TowerId,
}

impl<T, G> CursorMut<'_, T, G> {
    /// The element under the cursor, or `None` before the first element.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipset::SkipSet;
    ///
    /// let mut set: SkipSet<_> = (1..4).collect();
    /// let mut cursor = set.cursor_mut();
    /// assert_eq!(cursor.current(), None);
    /// cursor.move_next();
    /// assert_eq!(cursor.current(), Some(&1));
    /// ```
    #[inline]
    #[must_use]
    pub fn current(&self) -> Option<&T> {
        (self.current != HEAD).then(|| self.set.towers.value(self.current))
    }

    /// The element after the cursor, without moving.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipset::SkipSet;
    ///
    /// let mut set: SkipSet<_> = (1..4).collect();
    /// let cursor = set.cursor_mut();
    /// assert_eq!(cursor.peek_next(), Some(&1));
    /// assert_eq!(cursor.current(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn peek_next(&self) -> Option<&T> {
        self.set
            .towers
            .next(self.current, 0)
            .map(|id| self.set.towers.value(id))
    }

    /// Advance to the next element and return it. At the end of the set the
    /// cursor stays on the last element and `None` is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipset::SkipSet;
    ///
    /// let mut set: SkipSet<_> = (1..3).collect();
    /// let mut cursor = set.cursor_mut();
    /// assert_eq!(cursor.move_next(), Some(&1));
    /// assert_eq!(cursor.move_next(), Some(&2));
    /// assert_eq!(cursor.move_next(), None);
    /// assert_eq!(cursor.current(), Some(&2));
    /// ```
    #[inline]
    pub fn move_next(&mut self) -> Option<&T> {
        let next = self.set.towers.next(self.current, 0)?;
        self.current = next;
        Some(self.set.towers.value(next))
    }

    /// Remove the element under the cursor from every level and return it.
    /// Returns `None` if the cursor is before the first element.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipset::SkipSet;
    ///
    /// let mut set: SkipSet<_> = (1..4).collect();
    /// let mut cursor = set.cursor_mut();
    /// assert_eq!(cursor.remove_current(), None);
    /// cursor.move_next();
    /// cursor.move_next();
    /// assert_eq!(cursor.remove_current(), Some(2));
    /// assert_eq!(cursor.move_next(), Some(&3));
    /// assert_eq!(set.to_vec(), vec![1, 3]);
    /// ```
    pub fn remove_current(&mut self) -> Option<T> {
        if self.current == HEAD {
            return None;
        }
        let removed = self.current;
        self.current = self.set.towers.prev(removed, 0).unwrap_or(HEAD);
        Some(self.set.unlink(removed))
    }
}

// ///////////////////////////////////////////////
// Trait implementation
// ///////////////////////////////////////////////

impl<T, G> Default for SkipSet<T, G>
where
    G: LevelGenerator + Default,
{
    #[inline]
    fn default() -> Self {
        Self::with_generator(G::default())
    }
}

/// Only the elements are compared; the tower heights and the level generators
/// are ignored.
impl<A, B, GA, GB> PartialEq<SkipSet<B, GB>> for SkipSet<A, GA>
where
    A: PartialEq<B>,
{
    #[inline]
    fn eq(&self, other: &SkipSet<B, GB>) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T, G> Eq for SkipSet<T, G> where T: Eq {}

impl<T, G> Hash for SkipSet<T, G>
where
    T: Hash,
{
    #[inline]
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.len.hash(state);
        for elt in self {
            elt.hash(state);
        }
    }
}

impl<T, G> Extend<T> for SkipSet<T, G>
where
    T: Ord,
    G: LevelGenerator,
{
    #[inline]
    fn extend<I: IntoIterator<Item = T>>(&mut self, iterable: I) {
        for element in iterable {
            self.insert(element);
        }
    }
}

impl<T> iter::FromIterator<T> for SkipSet<T>
where
    T: Ord,
{
    #[inline]
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut set = SkipSet::new();
        set.extend(iter);
        set
    }
}

impl<T, G> fmt::Debug for SkipSet<T, G>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T, G> fmt::Display for SkipSet<T, G>
where
    T: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;

        for (i, entry) in self.iter().enumerate() {
            if i != 0 {
                write!(f, ", ")?;
            }
            write!(f, "{entry}")?;
        }
        write!(f, "}}")
    }
}

impl<T, G> IntoIterator for SkipSet<T, G> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        let front = self.towers.next(HEAD, 0);
        let back = self.last_tower();
        IntoIter::new(self.towers, front, back, self.len)
    }
}

impl<'a, T, G> IntoIterator for &'a SkipSet<T, G> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

// ////////////////////////////////////////////////////////////////////////////
// Tests
// ////////////////////////////////////////////////////////////////////////////
