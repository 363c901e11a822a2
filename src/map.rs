//! Fixed-capacity integer-keyed map with no eviction policy.
//!
//! [`FixedMap`] stores entries in two parallel [`ArrayView`] columns: a key
//! column of `usize` elements and a value column of fixed-size blobs. A slot
//! is empty iff its key element holds the reserved all-ones pattern. Lookup
//! is a linear slot scan, O(capacity); there is no ordering of any kind.
//!
//! When the map is full, [`FixedMap::set`] with a new key fails. This is the
//! property distinguishing it from [`LruMap`](crate::lru::LruMap), which
//! evicts instead.

use core::mem;

use crate::array::{ArrayView, RESERVED};

/// A fixed-capacity map from `usize` keys to fixed-size value blobs.
///
/// Capacity is the minimum of the two backing columns' lengths, decided once
/// at construction. The key `usize::MAX` is reserved as the empty marker;
/// passing it as a real key is a documented misuse (debug-asserted, not
/// checked in release builds).
pub struct FixedMap<'a> {
    keys: ArrayView<'a>,
    vals: ArrayView<'a>,
    capacity: usize,
    len: usize,
}

impl<'a> FixedMap<'a> {
    /// Build a map over a key column and a value column.
    ///
    /// The key column is re-typed to the `usize` element width; returns
    /// `None` if its buffer cannot hold a single `usize`. Both columns are
    /// wiped to the empty pattern, so any previous contents are lost.
    pub fn new(mut keys: ArrayView<'a>, mut vals: ArrayView<'a>) -> Option<Self> {
        if !keys.set_item_size(mem::size_of::<usize>()) {
            return None;
        }
        keys.fill(0xFF);
        vals.fill(0xFF);

        let capacity = keys.len().min(vals.len());
        Some(Self {
            keys,
            vals,
            capacity,
            len: 0,
        })
    }

    /// Maximum number of entries the map can hold.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Current number of entries. O(1): maintained incrementally, unlike
    /// [`LruMap::len`](crate::lru::LruMap::len).
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the map holds no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Insert or overwrite the value for `key`.
    ///
    /// An existing key is overwritten in place. A new key takes the first
    /// empty slot; if the map is full the call fails and the map is left
    /// unchanged — there is no eviction. Also fails if `value` is shorter
    /// than one value element.
    pub fn set(&mut self, key: usize, value: &[u8]) -> bool {
        debug_assert_ne!(key, RESERVED, "reserved key used as a real key");
        if value.len() < self.vals.item_size() {
            return false;
        }

        if let Some(slot) = self.slot_of_key(key) {
            return self.vals.set(slot, value);
        }
        if self.len >= self.capacity {
            return false;
        }
        match self.empty_slot() {
            Some(slot) => {
                self.keys.set_index(slot, Some(key));
                self.vals.set(slot, value);
                self.len += 1;
                true
            }
            None => false,
        }
    }

    /// Borrow the value for `key`, or `None` if absent.
    pub fn get(&self, key: usize) -> Option<&[u8]> {
        let slot = self.slot_of_key(key)?;
        self.vals.get(slot)
    }

    /// Mutably borrow the value for `key`, or `None` if absent.
    pub fn get_mut(&mut self, key: usize) -> Option<&mut [u8]> {
        let slot = self.slot_of_key(key)?;
        self.vals.get_mut(slot)
    }

    /// Whether `key` is present.
    pub fn contains_key(&self, key: usize) -> bool {
        self.slot_of_key(key).is_some()
    }

    /// Remove `key`. Returns `false` if it was absent.
    ///
    /// The slot's value bytes are left stale; they become unreachable once
    /// the key element is marked empty.
    pub fn remove(&mut self, key: usize) -> bool {
        match self.slot_of_key(key) {
            Some(slot) => {
                self.keys.set_index(slot, None);
                self.len -= 1;
                true
            }
            None => false,
        }
    }

    /// Visit occupied slots in ascending slot order — not insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &[u8])> {
        (0..self.capacity).filter_map(move |slot| {
            let key = self.keys.get_index(slot)??;
            Some((key, self.vals.get(slot)?))
        })
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.keys.fill(0xFF);
        self.vals.fill(0xFF);
        self.len = 0;
    }

    fn slot_of_key(&self, key: usize) -> Option<usize> {
        (0..self.capacity).find(|&slot| self.keys.get_index(slot) == Some(Some(key)))
    }

    fn empty_slot(&self) -> Option<usize> {
        (0..self.capacity).find(|&slot| self.keys.get_index(slot) == Some(None))
    }
}
