//! Towers are the nodes of the skiplist.
//!
//! Each tower holds a single element and, for every level it participates in,
//! a link to the next and previous tower at that level. A tower of height `h`
//! participates in levels `0..h`.
//!
//! Rather than linking towers through raw pointers, all towers live in an
//! arena ([`Towers`]) and refer to each other by their index in it. The head
//! sentinel always lives at index [`HEAD`]; it holds no element and is at least
//! as tall as every other tower.
//!
//! ```text
//! <head> ----------> [2] --------------------------------------------------> [9] --> None
//! <head> ----------> [2] ----------------------------------> [7] ----------> [9] --> None
//! <head> --> [1] --> [2] --> [3] --> [4] --> [5] --> [6] --> [7] --> [8] --> [9] --> None
//! ```

use std::{collections::TryReserveError, iter};

/// Index of a tower in the arena.
pub(crate) type TowerId = usize;

/// The head sentinel always occupies the first slot of the arena.
pub(crate) const HEAD: TowerId = 0;

// ////////////////////////////////////////////////////////////////////////////
// Tower
// ////////////////////////////////////////////////////////////////////////////

/// Forward and backward links of a tower at a single level.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Link {
    /// The following tower at this level, if any.
    pub next: Option<TowerId>,
    /// The preceding tower at this level. Only the head has none.
    pub prev: Option<TowerId>,
}

/// A single node of the skiplist.
#[derive(Clone, Debug)]
pub(crate) struct Tower<T> {
    // The value is only ever `None` for the head.
    value: Option<T>,
    // One link per level; the tower's height is the length of this vector.
    links: Vec<Link>,
}

impl<T> Tower<T> {
    /// Create the head sentinel with `height` levels.
    fn sentinel(height: usize) -> Self {
        Tower {
            value: None,
            links: vec![Link::default(); height],
        }
    }

    /// Create an unlinked tower holding `value`.
    fn new(value: T, height: usize) -> Self {
        Tower {
            value: Some(value),
            links: vec![Link::default(); height.max(1)],
        }
    }

    /// Fallible version of [`new`][Self::new].
    pub(crate) fn try_new(value: T, height: usize) -> Result<Self, TryReserveError> {
        let height = height.max(1);
        let mut links = Vec::new();
        links.try_reserve_exact(height)?;
        links.resize(height, Link::default());
        Ok(Tower {
            value: Some(value),
            links,
        })
    }

    /// Number of levels this tower participates in.
    #[inline]
    pub(crate) fn height(&self) -> usize {
        self.links.len()
    }
}

// ////////////////////////////////////////////////////////////////////////////
// Towers
// ////////////////////////////////////////////////////////////////////////////

/// Arena owning every tower of a skiplist, including the head sentinel.
///
/// The arena only maintains the link structure; it has no notion of ordering.
/// Callers decide where towers go by choosing their predecessor.
#[derive(Clone, Debug)]
pub(crate) struct Towers<T> {
    // Freed slots are `None` and recorded in `free` for reuse.
    slots: Vec<Option<Tower<T>>>,
    free: Vec<TowerId>,
}

// ///////////////////////////////////////////////
// Inherent methods
// ///////////////////////////////////////////////

impl<T> Towers<T> {
    /// Create an arena containing only a head of the given height.
    pub(crate) fn new(head_height: usize) -> Self {
        Towers {
            slots: vec![Some(Tower::sentinel(head_height.max(1)))],
            free: Vec::new(),
        }
    }

    /// Drop every tower except the head, whose links are reset.
    pub(crate) fn clear(&mut self) {
        let height = self.head_height();
        self.slots.truncate(1);
        self.slots.shrink_to_fit();
        self.free.clear();
        self.slots[HEAD] = Some(Tower::sentinel(height));
    }

    /// The height of the head, which bounds the height of every other tower.
    #[inline]
    pub(crate) fn head_height(&self) -> usize {
        self.tower(HEAD).height()
    }

    // /////////////////////////////
    // Accessors
    // /////////////////////////////

    fn tower(&self, id: TowerId) -> &Tower<T> {
        match self.slots.get(id) {
            Some(Some(tower)) => tower,
            _ => unreachable!("tower {id} is not live"),
        }
    }

    fn tower_mut(&mut self, id: TowerId) -> &mut Tower<T> {
        match self.slots.get_mut(id) {
            Some(Some(tower)) => tower,
            _ => unreachable!("tower {id} is not live"),
        }
    }

    fn link_mut(&mut self, id: TowerId, level: usize) -> &mut Link {
        match self.tower_mut(id).links.get_mut(level) {
            Some(link) => link,
            None => unreachable!("tower {id} does not reach level {level}"),
        }
    }

    /// Height of the tower `id`.
    #[inline]
    pub(crate) fn height(&self, id: TowerId) -> usize {
        self.tower(id).height()
    }

    /// The tower following `id` at `level`, or `None` at the end of the level
    /// or if `id` does not reach that level.
    #[inline]
    pub(crate) fn next(&self, id: TowerId, level: usize) -> Option<TowerId> {
        self.tower(id).links.get(level).and_then(|link| link.next)
    }

    /// The tower preceding `id` at `level`, or `None` for the head or if `id`
    /// does not reach that level.
    #[inline]
    pub(crate) fn prev(&self, id: TowerId, level: usize) -> Option<TowerId> {
        self.tower(id).links.get(level).and_then(|link| link.prev)
    }

    /// The element held by `id`, which must not be the head.
    #[inline]
    pub(crate) fn value(&self, id: TowerId) -> &T {
        match self.tower(id).value.as_ref() {
            Some(value) => value,
            None => unreachable!("the head holds no value"),
        }
    }

    /// Iterate over the towers present at `level`, excluding the head.
    pub(crate) fn at_level(&self, level: usize) -> impl Iterator<Item = TowerId> + '_ {
        iter::successors(self.next(HEAD, level), move |&id| self.next(id, level))
    }

    // /////////////////////////////
    // Traversal
    // /////////////////////////////

    /// Keep moving right at `level`, starting from `from`, for as long as
    /// `pred` holds for the next tower's value. Returns the last tower reached.
    pub(crate) fn advance_while_at_level(
        &self,
        from: TowerId,
        level: usize,
        mut pred: impl FnMut(&T) -> bool,
    ) -> TowerId {
        let mut current = from;
        while let Some(next) = self.next(current, level) {
            if !pred(self.value(next)) {
                break;
            }
            current = next;
        }
        current
    }

    /// Descend from `top` down to level 0, moving right at every level while
    /// `pred` holds. Returns the last tower at level 0 for which `pred` held,
    /// or the head if there is none.
    pub(crate) fn descend(&self, top: usize, mut pred: impl FnMut(&T) -> bool) -> TowerId {
        (0..=top)
            .rev()
            .fold(HEAD, |node, level| self.advance_while_at_level(node, level, &mut pred))
    }

    /// Find the nearest tower at or before `from` which participates at
    /// `level`, walking backwards along the top level of each tower visited.
    ///
    /// The head reaches every level, so the walk always terminates there.
    fn ancestor(&self, from: TowerId, level: usize) -> TowerId {
        let mut current = from;
        loop {
            let height = self.height(current);
            if height > level {
                return current;
            }
            current = match self.prev(current, height.saturating_sub(1)) {
                Some(prev) => prev,
                None => unreachable!("level {level} is above the head"),
            };
        }
    }

    // /////////////////////////////
    // Link Manipulation
    // /////////////////////////////

    /// Link `id` into `level` directly after `pred`.
    fn splice(&mut self, id: TowerId, level: usize, pred: TowerId) {
        let next = self.next(pred, level);
        *self.link_mut(id, level) = Link {
            next,
            prev: Some(pred),
        };
        self.link_mut(pred, level).next = Some(id);
        if let Some(next) = next {
            self.link_mut(next, level).prev = Some(id);
        }
    }

    /// Join the neighbours of `id` at `level`, leaving `id`'s own link intact.
    fn detach(&mut self, id: TowerId, level: usize) {
        let Link { next, prev } = *self.link_mut(id, level);
        if let Some(prev) = prev {
            self.link_mut(prev, level).next = next;
        }
        if let Some(next) = next {
            self.link_mut(next, level).prev = prev;
        }
    }

    /// Make sure a new tower can be allocated without reallocating the arena.
    pub(crate) fn try_reserve(&mut self) -> Result<(), TryReserveError> {
        if self.free.is_empty() {
            self.slots.try_reserve(1)?;
        }
        Ok(())
    }

    /// Create a tower of `height` levels holding `value`, and link it at every
    /// level directly after the nearest tower at or before `predecessor` which
    /// participates at that level.
    ///
    /// `predecessor` is the tower after which the new one goes at level 0.
    pub(crate) fn insert_after(&mut self, predecessor: TowerId, value: T, height: usize) -> TowerId {
        let height = height.clamp(1, self.head_height());
        self.link_after(predecessor, Tower::new(value, height))
    }

    /// Place an unlinked `tower` in the arena and link it after `predecessor`
    /// as [`insert_after`][Self::insert_after] does. Levels above the head are
    /// dropped.
    pub(crate) fn link_after(&mut self, predecessor: TowerId, mut tower: Tower<T>) -> TowerId {
        tower.links.truncate(self.head_height());
        let height = tower.height();
        let tower = Some(tower);
        let id = match self.free.pop() {
            Some(id) => {
                self.slots[id] = tower;
                id
            }
            None => {
                self.slots.push(tower);
                self.slots.len() - 1
            }
        };

        let mut current = predecessor;
        for level in 0..height {
            current = self.ancestor(current, level);
            self.splice(id, level, current);
        }
        id
    }

    /// Remove `id` from every level it participates in, from the top down,
    /// free its slot and return its value.
    pub(crate) fn unlink(&mut self, id: TowerId) -> T {
        debug_assert_ne!(id, HEAD, "the head cannot be unlinked");
        for level in (0..self.height(id)).rev() {
            self.detach(id, level);
        }
        self.take(id)
    }

    /// Change the height of the element tower `id`, linking or unlinking it at
    /// the levels gained or lost. The new height is clamped to
    /// `1..=head_height`.
    pub(crate) fn change_height(&mut self, id: TowerId, new_height: usize) {
        debug_assert_ne!(id, HEAD, "use grow_head or shrink_head for the head");
        let old_height = self.height(id);
        let new_height = new_height.clamp(1, self.head_height());

        if new_height > old_height {
            let mut current = match self.prev(id, old_height - 1) {
                Some(prev) => prev,
                None => unreachable!("tower {id} is not linked"),
            };
            self.tower_mut(id)
                .links
                .resize(new_height, Link::default());
            for level in old_height..new_height {
                current = self.ancestor(current, level);
                self.splice(id, level, current);
            }
        } else if new_height < old_height {
            for level in (new_height..old_height).rev() {
                self.detach(id, level);
            }
            self.tower_mut(id).links.truncate(new_height);
        }
    }

    /// Grow the head to `new_height` levels. The new levels start out empty.
    pub(crate) fn grow_head(&mut self, new_height: usize) {
        self.tower_mut(HEAD)
            .links
            .resize(new_height.max(1), Link::default());
    }

    /// Make sure the head can grow to `new_height` levels without
    /// reallocating. The head's height is unchanged.
    pub(crate) fn try_reserve_head(&mut self, new_height: usize) -> Result<(), TryReserveError> {
        let links = &mut self.tower_mut(HEAD).links;
        let old_height = links.len();
        links.try_reserve_exact(new_height.saturating_sub(old_height))
    }

    /// Shrink the head to `new_height` levels, lowering every tower which is
    /// taller than that first.
    pub(crate) fn shrink_head(&mut self, new_height: usize) {
        let new_height = new_height.max(1);
        if new_height >= self.head_height() {
            return;
        }
        let tall: Vec<TowerId> = self.at_level(new_height).collect();
        for id in tall {
            self.change_height(id, new_height);
        }
        self.tower_mut(HEAD).links.truncate(new_height);
    }

    /// Move the value out of `id` and free its slot without repairing any
    /// links. Only for owners which are tearing the whole arena down.
    pub(crate) fn take(&mut self, id: TowerId) -> T {
        debug_assert_ne!(id, HEAD, "the head holds no value");
        let tower = self.slots.get_mut(id).and_then(Option::take);
        self.free.push(id);
        match tower.and_then(|tower| tower.value) {
            Some(value) => value,
            None => unreachable!("tower {id} held no value"),
        }
    }
}

impl<T> Towers<T>
where
    T: Ord,
{
    /// Check every structural invariant, panicking on the first violation.
    ///
    /// `len` is the number of elements the owner believes are stored.
    #[cfg(test)]
    pub(crate) fn check(&self, len: usize) {
        let head = self.tower(HEAD);
        assert!(head.value.is_none(), "head holds a value");
        assert!(head.links.iter().all(|link| link.prev.is_none()));

        let live = self.slots.iter().filter(|slot| slot.is_some()).count();
        assert_eq!(live, len + 1, "live towers do not match the length");
        assert_eq!(live + self.free.len(), self.slots.len());

        let base: Vec<TowerId> = self.at_level(0).collect();
        assert_eq!(base.len(), len, "level 0 does not hold every element");

        for level in 0..self.head_height() {
            let mut prev = HEAD;
            let mut count = 0;
            for id in self.at_level(level) {
                assert_ne!(id, HEAD);
                assert!(
                    self.height(id) > level,
                    "tower {id} is linked above its height"
                );
                assert!(self.height(id) <= self.head_height());
                assert_eq!(self.prev(id, level), Some(prev), "broken back link");
                if prev != HEAD {
                    assert!(
                        self.value(prev) < self.value(id),
                        "level {level} is not strictly ascending"
                    );
                }
                prev = id;
                count += 1;
            }
            // Every tower reaching this level must appear in it.
            let expected = base.iter().filter(|&&id| self.height(id) > level).count();
            assert_eq!(count, expected, "level {level} is missing towers");
        }
    }
}

// ////////////////////////////////////////////////////////////////////////////
// Tests
// ////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{HEAD, Tower, TowerId, Towers};

    /// Build an arena holding `0..n` where element `i` has height
    /// `1 + trailing_ones(i)`, clamped to the head.
    fn evenly_spread(n: usize, head_height: usize) -> (Towers<usize>, Vec<TowerId>) {
        let mut towers = Towers::new(head_height);
        let mut ids = Vec::with_capacity(n);
        let mut last = HEAD;
        for i in 0..n {
            last = towers.insert_after(last, i, 1 + i.trailing_ones() as usize);
            ids.push(last);
        }
        (towers, ids)
    }

    fn values_at(towers: &Towers<usize>, level: usize) -> Vec<usize> {
        towers.at_level(level).map(|id| *towers.value(id)).collect()
    }

    #[test]
    fn sentinel() {
        let towers: Towers<u8> = Towers::new(0);
        assert_eq!(towers.head_height(), 1);
        assert_eq!(towers.next(HEAD, 0), None);
        assert_eq!(towers.prev(HEAD, 0), None);
        towers.check(0);
    }

    #[test]
    fn insert_after_links_every_level() {
        let (towers, ids) = evenly_spread(8, 4);
        towers.check(8);
        assert_eq!(values_at(&towers, 0), vec![0, 1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(values_at(&towers, 1), vec![1, 3, 5, 7]);
        assert_eq!(values_at(&towers, 2), vec![3, 7]);
        assert_eq!(values_at(&towers, 3), vec![7]);
        assert_eq!(towers.prev(ids[7], 3), Some(HEAD));
        assert_eq!(towers.prev(ids[7], 2), Some(ids[3]));
    }

    #[test]
    fn insert_in_the_middle() {
        let (mut towers, ids) = evenly_spread(8, 4);
        // 10 is out of order, but the arena only cares about links.
        let id = towers.insert_after(ids[4], 10, 3);
        assert_eq!(values_at(&towers, 0), vec![0, 1, 2, 3, 4, 10, 5, 6, 7]);
        assert_eq!(values_at(&towers, 1), vec![1, 3, 10, 5, 7]);
        assert_eq!(values_at(&towers, 2), vec![3, 10, 7]);
        assert_eq!(towers.prev(id, 2), Some(ids[3]));
        assert_eq!(towers.next(id, 2), Some(ids[7]));
        assert_eq!(towers.prev(ids[7], 2), Some(id));
    }

    #[test]
    fn height_is_clamped() {
        let mut towers = Towers::new(2);
        let id = towers.insert_after(HEAD, 1, 10);
        assert_eq!(towers.height(id), 2);
        let id = towers.insert_after(id, 2, 0);
        assert_eq!(towers.height(id), 1);
        towers.check(2);
    }

    #[test]
    fn unlink() {
        let (mut towers, ids) = evenly_spread(8, 4);
        assert_eq!(towers.unlink(ids[3]), 3);
        towers.check(7);
        assert_eq!(values_at(&towers, 2), vec![7]);
        assert_eq!(towers.prev(ids[7], 2), Some(HEAD));

        // Freed slots are reused.
        let id = towers.insert_after(ids[2], 3, 1);
        assert_eq!(id, ids[3]);
        towers.check(8);

        for &id in ids.iter().filter(|&&id| id != ids[3]) {
            let _: usize = towers.unlink(id);
        }
        let _: usize = towers.unlink(ids[3]);
        towers.check(0);
    }

    #[test]
    fn change_height() {
        let (mut towers, ids) = evenly_spread(8, 4);

        towers.change_height(ids[4], 4);
        towers.check(8);
        assert_eq!(values_at(&towers, 3), vec![4, 7]);
        assert_eq!(values_at(&towers, 2), vec![3, 4, 7]);
        assert_eq!(values_at(&towers, 1), vec![1, 3, 4, 5, 7]);

        towers.change_height(ids[7], 1);
        towers.check(8);
        assert_eq!(values_at(&towers, 3), vec![4]);
        assert_eq!(values_at(&towers, 1), vec![1, 3, 4, 5]);

        // Unchanged and clamped heights.
        towers.change_height(ids[0], 1);
        towers.change_height(ids[0], 0);
        assert_eq!(towers.height(ids[0]), 1);
        towers.change_height(ids[0], 100);
        assert_eq!(towers.height(ids[0]), 4);
        towers.check(8);
    }

    #[test]
    fn grow_and_shrink_head() {
        let (mut towers, ids) = evenly_spread(16, 2);
        towers.grow_head(8);
        assert_eq!(towers.head_height(), 8);
        towers.check(16);

        towers.change_height(ids[9], 8);
        towers.check(16);
        assert_eq!(values_at(&towers, 7), vec![9]);

        towers.shrink_head(3);
        assert_eq!(towers.head_height(), 3);
        assert_eq!(towers.height(ids[9]), 3);
        towers.check(16);
        assert_eq!(values_at(&towers, 2), vec![9]);

        towers.try_reserve_head(5).unwrap();
        towers.grow_head(5);
        assert_eq!(towers.head_height(), 5);
        towers.check(16);
    }

    #[test]
    fn descend() {
        let (towers, _) = evenly_spread(100, 7);
        let top = towers.head_height() - 1;
        assert_eq!(towers.descend(top, |&v| v < 50), towers.at_level(0).nth(49).unwrap());
        assert_eq!(towers.descend(top, |_| false), HEAD);
        assert_eq!(*towers.value(towers.descend(top, |_| true)), 99);
    }

    #[test]
    fn take() {
        let (mut towers, ids) = evenly_spread(5, 3);
        let _: usize = towers.unlink(ids[2]);
        let order: Vec<TowerId> = towers.at_level(0).collect();
        let values: Vec<usize> = order.into_iter().map(|id| towers.take(id)).collect();
        assert_eq!(values, vec![0, 1, 3, 4]);
    }

    #[test]
    fn failed_reservations_change_nothing() {
        let (mut towers, _) = evenly_spread(10, 4);
        assert!(towers.try_reserve_head(usize::MAX).is_err());
        assert_eq!(towers.head_height(), 4);
        assert!(Tower::try_new(10, usize::MAX).is_err());
        towers.check(10);

        towers.try_reserve_head(8).unwrap();
        assert_eq!(towers.head_height(), 4);
        let tower = Tower::try_new(10, 6).unwrap();
        assert_eq!(tower.height(), 6);
        // Levels above the head are dropped when linking.
        let id = towers.link_after(towers.at_level(0).last().unwrap_or(HEAD), tower);
        assert_eq!(towers.height(id), 4);
        towers.check(11);
    }

    #[test]
    fn clear() {
        let (mut towers, _) = evenly_spread(20, 5);
        towers.clear();
        assert_eq!(towers.head_height(), 5);
        towers.check(0);
        let id = towers.insert_after(HEAD, 1, 5);
        assert_eq!(id, 1);
        towers.check(1);
    }
}
