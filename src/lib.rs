//! # slotkit
//!
//! Fixed-capacity, allocation-free containers over caller-supplied storage.
//!
//! Everything in this crate is built on one idea: replace pointers and heap
//! allocation with integer slot indices into pre-allocated buffers. Callers
//! bring their own storage (stack, static, or a one-shot [`ArrayBuf`]), wire
//! it into a container at construction time, and the container never grows,
//! never shrinks, and never allocates.
//!
//! ## Containers
//!
//! - [`ArrayView`]: a non-owning typed view over a raw byte buffer, the
//!   storage abstraction every other container is built on.
//! - [`FixedMap`]: a fixed-capacity integer-keyed map with linear slot
//!   scanning. Fails when full — no eviction.
//! - [`LruMap`]: a fixed-capacity map that additionally threads an intrusive
//!   doubly linked list through two index columns to track recency, and
//!   evicts the least-recently-updated entry when full.
//! - [`RingBuffer`]: a fixed-capacity FIFO of uniformly sized records with
//!   wraparound cursors, overwriting the oldest record when full.
//!
//! ## Example
//!
//! ```rust
//! use slotkit::{ArrayView, LruMap};
//!
//! const IDX: usize = core::mem::size_of::<usize>();
//!
//! let mut prev = [0u8; 4 * IDX];
//! let mut next = [0u8; 4 * IDX];
//! let mut keys = [0u8; 4 * IDX];
//! let mut vals = [0u8; 4 * 8];
//!
//! let mut lru = LruMap::new(
//!     ArrayView::new(&mut prev, IDX).unwrap(),
//!     ArrayView::new(&mut next, IDX).unwrap(),
//!     ArrayView::new(&mut keys, IDX).unwrap(),
//!     ArrayView::new(&mut vals, 8).unwrap(),
//! )
//! .unwrap();
//!
//! lru.update(1, b"record-1");
//! lru.update(2, b"record-2");
//! assert_eq!(lru.get(1), Some(&b"record-1"[..]));
//! ```
//!
//! ## Concurrency
//!
//! Single-owner by design: every mutation takes `&mut self`, so exclusive
//! access is enforced by the borrow checker rather than by locks. There are
//! no atomics and no blocking operations; every operation is a bounded,
//! synchronous computation (worst case O(capacity) for the map scans).

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(missing_docs)]
#![warn(clippy::all)]

extern crate alloc;

pub mod array;
pub mod bytes;
pub mod lru;
pub mod map;
pub mod ring;
pub mod tokenizer;

pub use array::{pack, ArrayBuf, ArrayView};
pub use lru::LruMap;
pub use map::FixedMap;
pub use ring::RingBuffer;
pub use tokenizer::Tokenizer;

#[cfg(test)]
mod proptests;
