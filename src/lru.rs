//! Fixed-capacity map with least-recently-updated eviction.
//!
//! [`LruMap`] extends the parallel-column layout of
//! [`FixedMap`](crate::map::FixedMap) with two more index columns,
//! `link_prev` and `link_next`, which thread an intrusive doubly linked list
//! through the occupied slots. The list orders slots from least- to
//! most-recently-updated; its ends are cached in `first` and `last`. No
//! pointers, no allocation: every link is a slot index into the same
//! caller-supplied storage.
//!
//! A slot is in one of two states:
//! - **orphan**: key element empty, both link elements empty — available
//!   for reuse;
//! - **linked**: key set, part of the chain.
//!
//! [`LruMap::update`] never fails for capacity reasons: when no orphan is
//! left it silently overwrites the least-recently-updated slot.

use core::mem;

use crate::array::{ArrayView, RESERVED};

/// A fixed-capacity map from `usize` keys to fixed-size value blobs, with
/// recency tracking and silent eviction of the least-recently-updated entry.
///
/// Capacity is the minimum length of the four backing columns. The key
/// `usize::MAX` is reserved as the empty marker; passing it as a real key is
/// a documented misuse (debug-asserted, not checked in release builds).
pub struct LruMap<'a> {
    link_prev: ArrayView<'a>,
    link_next: ArrayView<'a>,
    keys: ArrayView<'a>,
    vals: ArrayView<'a>,
    first: Option<usize>,
    last: Option<usize>,
}

impl<'a> LruMap<'a> {
    /// Build a map over four columns: previous-link, next-link, key, value.
    ///
    /// The three index columns are re-typed to the `usize` element width;
    /// returns `None` if any of their buffers cannot hold a single `usize`.
    /// All three are wiped to the empty pattern (value bytes are left
    /// untouched — they are unreachable until a slot is occupied).
    pub fn new(
        mut link_prev: ArrayView<'a>,
        mut link_next: ArrayView<'a>,
        mut keys: ArrayView<'a>,
        vals: ArrayView<'a>,
    ) -> Option<Self> {
        let idx = mem::size_of::<usize>();
        if !link_prev.set_item_size(idx) || !link_next.set_item_size(idx) || !keys.set_item_size(idx)
        {
            return None;
        }

        let mut map = Self {
            link_prev,
            link_next,
            keys,
            vals,
            first: None,
            last: None,
        };
        map.wipe();
        Some(map)
    }

    /// Maximum number of entries: the minimum length of the four columns.
    pub fn capacity(&self) -> usize {
        self.link_prev
            .len()
            .min(self.link_next.len())
            .min(self.keys.len())
            .min(self.vals.len())
    }

    /// Current number of entries, counted by walking the chain — O(len).
    ///
    /// The chain is the only source of truth for occupancy; no counter is
    /// maintained (contrast with
    /// [`FixedMap::len`](crate::map::FixedMap::len)).
    pub fn len(&self) -> usize {
        let mut count = 0;
        let mut slot = self.first;
        while let Some(s) = slot {
            count += 1;
            slot = self.next_of(s);
        }
        count
    }

    /// Whether the chain is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.first.is_none() && self.last.is_none()
    }

    /// Insert `key` or refresh it to most-recently-updated, in this priority
    /// order:
    ///
    /// 1. `key` already present: overwrite its value in place, move its slot
    ///    to the tail of the chain.
    /// 2. An orphan slot exists (slot 0 when the map is empty): write the
    ///    pair there and append it to the tail.
    /// 3. Otherwise evict: overwrite the head slot — the least-recently-
    ///    updated entry — with the new pair and move it to the tail.
    ///
    /// Never fails for capacity reasons; fails only if `value` is shorter
    /// than one value element.
    pub fn update(&mut self, key: usize, value: &[u8]) -> bool {
        debug_assert_ne!(key, RESERVED, "reserved key used as a real key");
        if value.len() < self.vals.item_size() {
            return false;
        }

        if let Some(slot) = self.slot_of_key(key) {
            self.set_slot(slot, key, value);
            self.refresh(slot);
            return true;
        }

        if let Some(slot) = self.orphan_slot() {
            self.set_slot(slot, key, value);
            self.append(slot);
            return true;
        }

        match self.first {
            Some(slot) => {
                self.set_slot(slot, key, value);
                self.refresh(slot);
                true
            }
            None => false,
        }
    }

    /// Borrow the value for `key`, or `None` if absent. Does not refresh
    /// recency.
    pub fn get(&self, key: usize) -> Option<&[u8]> {
        let slot = self.slot_of_key(key)?;
        self.vals.get(slot)
    }

    /// Borrow the least-recently-updated value.
    pub fn get_first(&self) -> Option<&[u8]> {
        self.vals.get(self.first?)
    }

    /// Borrow the most-recently-updated value.
    pub fn get_last(&self) -> Option<&[u8]> {
        self.vals.get(self.last?)
    }

    /// Borrow the entry `idx` hops from the head of the chain (0 is the
    /// least-recently-updated entry).
    ///
    /// `None` if `idx >= capacity()` or the chain is shorter.
    pub fn get_at(&self, idx: usize) -> Option<(usize, &[u8])> {
        if idx >= self.capacity() {
            return None;
        }
        let mut slot = self.first?;
        for _ in 0..idx {
            slot = self.next_of(slot)?;
        }
        Some((self.key_at(slot)?, self.vals.get(slot)?))
    }

    /// Remove `key`. Returns `false` if it was absent.
    pub fn remove(&mut self, key: usize) -> bool {
        match self.slot_of_key(key) {
            Some(slot) => {
                self.evict_slot(slot);
                true
            }
            None => false,
        }
    }

    /// Remove the least-recently-updated entry. Returns `false` if empty.
    pub fn remove_first(&mut self) -> bool {
        match self.first {
            Some(slot) => {
                self.evict_slot(slot);
                true
            }
            None => false,
        }
    }

    /// Remove the most-recently-updated entry. Returns `false` if empty.
    pub fn remove_last(&mut self) -> bool {
        match self.last {
            Some(slot) => {
                self.evict_slot(slot);
                true
            }
            None => false,
        }
    }

    /// Visit entries in chain order, least- to most-recently-updated.
    pub fn iter(&self) -> Iter<'_, 'a> {
        Iter {
            map: self,
            slot: self.first,
        }
    }

    /// Remove every entry: wipes the three index columns and resets the
    /// chain ends. Value bytes are not wiped.
    pub fn clear(&mut self) {
        self.wipe();
    }

    fn wipe(&mut self) {
        self.link_prev.fill(0xFF);
        self.link_next.fill(0xFF);
        self.keys.fill(0xFF);
        self.first = None;
        self.last = None;
    }

    #[inline]
    fn prev_of(&self, slot: usize) -> Option<usize> {
        self.link_prev.get_index(slot).flatten()
    }

    #[inline]
    fn next_of(&self, slot: usize) -> Option<usize> {
        self.link_next.get_index(slot).flatten()
    }

    #[inline]
    fn key_at(&self, slot: usize) -> Option<usize> {
        self.keys.get_index(slot).flatten()
    }

    fn slot_of_key(&self, key: usize) -> Option<usize> {
        (0..self.capacity()).find(|&slot| self.key_at(slot) == Some(key))
    }

    /// The slot to use for a new entry, if one is free.
    ///
    /// An empty map designates slot 0. Otherwise a true orphan is required:
    /// not the head, not the tail, both links empty. (A linked slot in a
    /// one-entry chain also has both links empty, hence the end checks.)
    fn orphan_slot(&self) -> Option<usize> {
        if self.is_empty() {
            return Some(0);
        }
        (0..self.capacity()).find(|&slot| {
            Some(slot) != self.first
                && Some(slot) != self.last
                && self.prev_of(slot).is_none()
                && self.next_of(slot).is_none()
        })
    }

    fn set_slot(&mut self, slot: usize, key: usize, value: &[u8]) {
        self.keys.set_index(slot, Some(key));
        self.vals.set(slot, value);
    }

    /// Unlink `slot` from the chain, reconnecting its neighbors and fixing
    /// the cached ends, and leave it a clean orphan (both links empty). Key
    /// and value elements are untouched.
    fn unlink(&mut self, slot: usize) {
        let prev = self.prev_of(slot);
        let next = self.next_of(slot);

        if let Some(p) = prev {
            self.link_next.set_index(p, next);
        }
        if let Some(n) = next {
            self.link_prev.set_index(n, prev);
        }

        if self.first == Some(slot) {
            self.first = next;
        }
        if self.last == Some(slot) {
            self.last = prev;
        }

        self.link_prev.set_index(slot, None);
        self.link_next.set_index(slot, None);
    }

    /// Append an orphan `slot` at the tail of the chain.
    fn append(&mut self, slot: usize) {
        if self.first.is_none() {
            self.first = Some(slot);
        }
        match self.last {
            None => self.last = Some(slot),
            Some(last) => {
                self.link_next.set_index(last, Some(slot));
                self.link_next.set_index(slot, None);
                self.link_prev.set_index(slot, Some(last));
                self.last = Some(slot);
            }
        }
    }

    /// Move `slot` to the tail, making it the most-recently-updated.
    fn refresh(&mut self, slot: usize) {
        self.unlink(slot);
        self.append(slot);
    }

    /// Unlink `slot` and mark its key element empty.
    fn evict_slot(&mut self, slot: usize) {
        self.unlink(slot);
        self.keys.set_index(slot, None);
    }

    /// Panic if the chain and the slot states disagree. Test-only.
    #[cfg(test)]
    pub(crate) fn check_invariants(&self) {
        let capacity = self.capacity();

        // Forward walk, bounded so a cycle panics instead of spinning.
        let mut forward = Vec::new();
        let mut slot = self.first;
        while let Some(s) = slot {
            forward.push(s);
            assert!(forward.len() <= capacity, "chain longer than capacity");
            slot = self.next_of(s);
        }

        // Backward walk must visit the same slots in reverse.
        let mut backward = Vec::new();
        let mut slot = self.last;
        while let Some(s) = slot {
            backward.push(s);
            assert!(backward.len() <= capacity, "chain longer than capacity");
            slot = self.prev_of(s);
        }
        backward.reverse();
        assert_eq!(forward, backward, "forward and backward walks disagree");

        // Linked slots are exactly the slots with a live key; orphans have
        // both links empty.
        for s in 0..capacity {
            let linked = forward.contains(&s);
            assert_eq!(
                self.key_at(s).is_some(),
                linked,
                "slot {s} key state disagrees with chain membership"
            );
            if !linked {
                assert!(
                    self.prev_of(s).is_none() && self.next_of(s).is_none(),
                    "orphan slot {s} still carries links"
                );
            }
        }

        assert_eq!(forward.len(), self.len());
    }
}

/// Iterator over an [`LruMap`] in chain order, least- to most-recently-
/// updated. Created by [`LruMap::iter`].
pub struct Iter<'m, 'a> {
    map: &'m LruMap<'a>,
    slot: Option<usize>,
}

impl<'m, 'a> Iterator for Iter<'m, 'a> {
    type Item = (usize, &'m [u8]);

    fn next(&mut self) -> Option<Self::Item> {
        let slot = self.slot?;
        self.slot = self.map.next_of(slot);
        Some((self.map.key_at(slot)?, self.map.vals.get(slot)?))
    }
}
