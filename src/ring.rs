//! Fixed-capacity FIFO ring buffer of uniformly sized records.
//!
//! Records live contiguously in a caller-supplied byte region; two byte
//! cursors, `pos_front` and `pos_back`, wrap around it. One record slot is
//! always kept empty so that `pos_front == pos_back` unambiguously means
//! empty — a region of `n` slots holds at most `n - 1` records.
//!
//! [`RingBuffer::push`] never rejects for capacity: when the buffer is about
//! to overflow, the oldest record is silently dropped to make room.

/// A fixed-capacity FIFO over borrowed storage, overwriting the oldest
/// record when full.
///
/// Cursors are byte offsets and stay multiples of the record size; the
/// region length must be an exact multiple of it.
pub struct RingBuffer<'a> {
    data: &'a mut [u8],
    item_size: usize,
    pos_front: usize,
    pos_back: usize,
}

impl<'a> RingBuffer<'a> {
    /// Build a ring over `data` with the given record size.
    ///
    /// Returns `None` if `data` is empty, `item_size` is zero, or the region
    /// is not a whole number of records. A region of exactly one record
    /// yields a usable capacity of zero.
    pub fn new(data: &'a mut [u8], item_size: usize) -> Option<Self> {
        if data.is_empty() || item_size == 0 || data.len() % item_size != 0 {
            return None;
        }
        Some(Self {
            data,
            item_size,
            pos_front: 0,
            pos_back: 0,
        })
    }

    /// Record size in bytes.
    #[inline]
    pub fn item_size(&self) -> usize {
        self.item_size
    }

    /// Usable record capacity: one slot fewer than the region holds.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.data.len() / self.item_size - 1
    }

    /// Whether no record is stored.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pos_front == self.pos_back
    }

    /// Whether the next push would drop the oldest record.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.advance(self.pos_back) == self.pos_front
    }

    /// Number of stored records, by wraparound cursor subtraction.
    pub fn len(&self) -> usize {
        let bytes = if self.pos_back >= self.pos_front {
            self.pos_back - self.pos_front
        } else {
            self.pos_back + (self.data.len() - self.pos_front)
        };
        bytes / self.item_size
    }

    /// Append records from `items`, a concatenation of whole records.
    ///
    /// Each record is written at the back; when the advanced back cursor
    /// would land on the front cursor, the front record is dropped first.
    /// Returns the number of records written — the full count, since
    /// overflow evicts rather than rejects — or 0 if `items` is not a whole
    /// number of records.
    pub fn push(&mut self, items: &[u8]) -> usize {
        if items.len() % self.item_size != 0 {
            return 0;
        }

        let mut written = 0;
        for record in items.chunks_exact(self.item_size) {
            self.data[self.pos_back..self.pos_back + self.item_size].copy_from_slice(record);

            let pos_back_next = self.advance(self.pos_back);
            if pos_back_next == self.pos_front {
                // About to overflow: drop the oldest record.
                self.pos_front = self.advance(self.pos_front);
            }
            self.pos_back = pos_back_next;
            written += 1;
        }
        written
    }

    /// Dequeue up to `out.len() / item_size` records from the front into
    /// `out`, stopping early when the buffer empties. Returns the number of
    /// records popped. Trailing bytes of `out` beyond a whole record are
    /// ignored.
    pub fn pop(&mut self, out: &mut [u8]) -> usize {
        let count = out.len() / self.item_size;
        let mut popped = 0;
        while popped < count && !self.is_empty() {
            let dst = popped * self.item_size;
            out[dst..dst + self.item_size]
                .copy_from_slice(&self.data[self.pos_front..self.pos_front + self.item_size]);
            self.pos_front = self.advance(self.pos_front);
            popped += 1;
        }
        popped
    }

    /// Discard up to `count` records from the front without copying them
    /// out. Returns the number of records discarded.
    pub fn skip(&mut self, count: usize) -> usize {
        let mut skipped = 0;
        while skipped < count && !self.is_empty() {
            self.pos_front = self.advance(self.pos_front);
            skipped += 1;
        }
        skipped
    }

    /// Borrow the `index`-th record from the front without removing it, or
    /// `None` if `index >= len()`.
    pub fn get(&self, index: usize) -> Option<&[u8]> {
        if index >= self.len() {
            return None;
        }
        let pos = (self.pos_front + index * self.item_size) % self.data.len();
        Some(&self.data[pos..pos + self.item_size])
    }

    /// Scan from front to back for a record equal to `needle`, returning its
    /// 0-based offset from the front. `needle` must be exactly one record
    /// long.
    pub fn find(&self, needle: &[u8]) -> Option<usize> {
        if needle.len() != self.item_size {
            return None;
        }
        let mut pos = self.pos_front;
        let mut counter = 0;
        while pos != self.pos_back {
            if &self.data[pos..pos + self.item_size] == needle {
                return Some(counter);
            }
            pos = self.advance(pos);
            counter += 1;
        }
        None
    }

    /// Reset both cursors to the start. Data bytes are not wiped.
    pub fn clear(&mut self) {
        self.pos_front = 0;
        self.pos_back = 0;
    }

    #[inline]
    fn advance(&self, pos: usize) -> usize {
        (pos + self.item_size) % self.data.len()
    }
}
