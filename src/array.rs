//! Typed views over raw byte storage.
//!
//! [`ArrayView`] reinterprets a caller-supplied byte buffer as an array of
//! fixed-size elements. It is the storage abstraction for every container in
//! this crate:
//! - No ownership, no copies: the view borrows the buffer for its lifetime.
//! - Runtime granularity: the element size is a runtime value and can be
//!   changed after construction, so one buffer can be viewed as bytes, then
//!   re-typed as an index column.
//! - A trailing partial element (buffer length not a multiple of the element
//!   size) is simply inaccessible.

use core::mem;

/// Raw bit pattern marking an empty key or absent link in an index column.
///
/// Columns are wiped by filling with `0xFF`, which makes every `usize`
/// element read back as this pattern.
pub(crate) const RESERVED: usize = usize::MAX;

/// A non-owning mutable view over a byte buffer, seen as an array of
/// `item_size`-byte elements.
///
/// `len()` is `size_bytes() / item_size()` with integer division; bytes past
/// the last whole element exist in the buffer but cannot be addressed
/// through the view.
pub struct ArrayView<'a> {
    data: &'a mut [u8],
    item_size: usize,
}

impl<'a> ArrayView<'a> {
    /// Create a view over `data` with the given element size.
    ///
    /// Returns `None` if `data` is empty, `item_size` is zero, or a single
    /// element would not fit in the buffer.
    pub fn new(data: &'a mut [u8], item_size: usize) -> Option<Self> {
        if data.is_empty() || item_size == 0 || item_size > data.len() {
            return None;
        }
        Some(Self { data, item_size })
    }

    /// Number of whole elements addressable through the view.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len() / self.item_size
    }

    /// Whether the view holds no whole element.
    ///
    /// A constructed view always fits at least one element; provided for API
    /// completeness alongside [`len`](Self::len).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Size of the underlying buffer in bytes.
    #[inline]
    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }

    /// Current element size in bytes.
    #[inline]
    pub fn item_size(&self) -> usize {
        self.item_size
    }

    /// Borrow the element at `index`, or `None` if out of range.
    pub fn get(&self, index: usize) -> Option<&[u8]> {
        if index >= self.len() {
            return None;
        }
        let start = index * self.item_size;
        Some(&self.data[start..start + self.item_size])
    }

    /// Mutably borrow the element at `index`, or `None` if out of range.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut [u8]> {
        if index >= self.len() {
            return None;
        }
        let start = index * self.item_size;
        Some(&mut self.data[start..start + self.item_size])
    }

    /// Copy the first `item_size()` bytes of `value` into the element at
    /// `index`.
    ///
    /// Returns `false` without writing if the index is out of range or
    /// `value` is shorter than one element.
    pub fn set(&mut self, index: usize, value: &[u8]) -> bool {
        let item_size = self.item_size;
        if value.len() < item_size {
            return false;
        }
        match self.get_mut(index) {
            Some(dst) => {
                dst.copy_from_slice(&value[..item_size]);
                true
            }
            None => false,
        }
    }

    /// Reinterpret the same storage at a new element granularity.
    ///
    /// Returns `false` if `new_size` is zero or larger than the buffer.
    pub fn set_item_size(&mut self, new_size: usize) -> bool {
        if new_size == 0 || new_size > self.data.len() {
            return false;
        }
        self.item_size = new_size;
        true
    }

    /// Overwrite every byte of the underlying buffer with `pattern`.
    pub fn fill(&mut self, pattern: u8) {
        self.data.fill(pattern);
    }

    /// The raw bytes backing the view.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        self.data
    }

    /// Read the element at `index` as a native-endian `usize`, decoding the
    /// all-ones pattern as `None`.
    ///
    /// Outer `None`: index out of range or element not `usize`-wide.
    pub(crate) fn get_index(&self, index: usize) -> Option<Option<usize>> {
        let bytes = self.get(index)?;
        let raw = usize::from_ne_bytes(bytes.try_into().ok()?);
        Some(if raw == RESERVED { None } else { Some(raw) })
    }

    /// Write `value` (or the all-ones pattern for `None`) as a native-endian
    /// `usize` element at `index`.
    pub(crate) fn set_index(&mut self, index: usize, value: Option<usize>) -> bool {
        let raw = value.unwrap_or(RESERVED);
        self.item_size == mem::size_of::<usize>() && self.set(index, &raw.to_ne_bytes())
    }
}

/// Concatenate the raw bytes of each view into `out`, in order.
///
/// The total length is computed first: if it exceeds `out.len()`, nothing is
/// written and 0 is returned. Otherwise the number of bytes written is
/// returned, and `out[..n]` is the byte-for-byte concatenation of the
/// inputs.
pub fn pack(out: &mut [u8], views: &[&ArrayView<'_>]) -> usize {
    let total: usize = views.iter().map(|v| v.size_bytes()).sum();
    if total > out.len() {
        return 0;
    }

    let mut off = 0;
    for view in views {
        let bytes = view.as_bytes();
        out[off..off + bytes.len()].copy_from_slice(bytes);
        off += bytes.len();
    }
    off
}

/// Owned, zero-initialized backing storage.
///
/// The one allocating type in the crate, for callers without a convenient
/// static or stack buffer. Storage is released on drop; a use-after-free is
/// impossible because views borrow the buffer.
pub struct ArrayBuf {
    data: alloc::boxed::Box<[u8]>,
    item_size: usize,
}

impl ArrayBuf {
    /// Allocate zeroed storage for `item_count` elements of `item_size`
    /// bytes. Returns `None` if either count is zero.
    pub fn new(item_count: usize, item_size: usize) -> Option<Self> {
        if item_count == 0 || item_size == 0 {
            return None;
        }
        let data = alloc::vec![0u8; item_count * item_size].into_boxed_slice();
        Some(Self { data, item_size })
    }

    /// A fresh view over the owned storage.
    pub fn view_mut(&mut self) -> ArrayView<'_> {
        ArrayView {
            data: &mut self.data,
            item_size: self.item_size,
        }
    }
}
