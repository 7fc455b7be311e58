//! Iterators over the elements of a [`SkipSet`][crate::SkipSet].
//!
//! Iterators only ever walk level 0, which links every element in ascending
//! order in both directions. Both ends are tracked along with the number of
//! remaining elements, so the front and back never cross.

use std::iter::FusedIterator;

use crate::tower::{TowerId, Towers};

/// Iterator by reference, created by [`SkipSet::iter`][crate::SkipSet::iter].
pub struct Iter<'a, T> {
    towers: &'a Towers<T>,
    front: Option<TowerId>,
    back: Option<TowerId>,
    size: usize,
}

impl<'a, T> Iter<'a, T> {
    /// Iterate over `size` elements from `front` to `back` inclusive.
    pub(crate) fn new(
        towers: &'a Towers<T>,
        front: Option<TowerId>,
        back: Option<TowerId>,
        size: usize,
    ) -> Self {
        Iter {
            towers,
            front,
            back,
            size,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.size == 0 {
            return None;
        }
        let current = self.front?;
        self.front = self.towers.next(current, 0);
        self.size -= 1;
        Some(self.towers.value(current))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.size, Some(self.size))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.size == 0 {
            return None;
        }
        let current = self.back?;
        self.back = self.towers.prev(current, 0);
        self.size -= 1;
        Some(self.towers.value(current))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Iter { ..*self }
    }
}

/// Consuming iterator, created by the [`IntoIterator`] implementation of
/// [`SkipSet`][crate::SkipSet].
pub struct IntoIter<T> {
    towers: Towers<T>,
    front: Option<TowerId>,
    back: Option<TowerId>,
    size: usize,
}

impl<T> IntoIter<T> {
    /// Drain `size` elements from `front` to `back` inclusive out of `towers`.
    pub(crate) fn new(
        towers: Towers<T>,
        front: Option<TowerId>,
        back: Option<TowerId>,
        size: usize,
    ) -> Self {
        IntoIter {
            towers,
            front,
            back,
            size,
        }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.size == 0 {
            return None;
        }
        let current = self.front?;
        // Links of taken towers are never repaired, so read ahead first.
        self.front = self.towers.next(current, 0);
        self.size -= 1;
        Some(self.towers.take(current))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.size, Some(self.size))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        if self.size == 0 {
            return None;
        }
        let current = self.back?;
        self.back = self.towers.prev(current, 0);
        self.size -= 1;
        Some(self.towers.take(current))
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}
impl<T> FusedIterator for IntoIter<T> {}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{IntoIter, Iter};
    use crate::tower::{HEAD, Towers};

    fn towers_for_test(n: usize) -> (Towers<usize>, Option<usize>, Option<usize>) {
        let mut towers = Towers::new(4);
        let mut last = HEAD;
        for i in 0..n {
            last = towers.insert_after(last, i, 1 + i % 3);
        }
        let front = towers.next(HEAD, 0);
        let back = (n > 0).then_some(last);
        (towers, front, back)
    }

    #[test]
    fn iter() {
        let (towers, front, back) = towers_for_test(50);
        let mut iter = Iter::new(&towers, front, back, 50);
        for i in 0..50 {
            assert_eq!(iter.size_hint(), (50 - i, Some(50 - i)));
            assert_eq!(iter.next(), Some(&i));
        }
        assert_eq!(iter.len(), 0);
        assert!(iter.next().is_none());
        assert!(iter.next_back().is_none());
    }

    #[test]
    fn iter_mixed() {
        let (towers, front, back) = towers_for_test(50);
        let mut iter = Iter::new(&towers, front, back, 50);
        for i in 0..25 {
            assert_eq!(iter.next(), Some(&i));
            assert_eq!(iter.next_back(), Some(&(49 - i)));
        }
        assert!(iter.next().is_none());
        assert!(iter.next_back().is_none());

        let iter = Iter::new(&towers, front, back, 50);
        let copy = iter.clone();
        assert_eq!(iter.rev().count(), copy.count());
    }

    #[test]
    fn empty() {
        let (towers, front, back) = towers_for_test(0);
        assert_eq!(Iter::new(&towers, front, back, 0).next(), None);
        assert_eq!(IntoIter::new(towers, front, back, 0).next_back(), None);
    }

    #[test]
    fn into_iter() {
        let (towers, front, back) = towers_for_test(50);
        let mut iter = IntoIter::new(towers, front, back, 50);
        for i in 0..10 {
            assert_eq!(iter.next(), Some(i));
            assert_eq!(iter.next_back(), Some(49 - i));
        }
        assert_eq!(iter.len(), 30);
        assert_eq!(iter.collect::<Vec<_>>(), (10..40).collect::<Vec<_>>());
    }
}
