//! Heap-backed circular window buffer.

use std::fmt;
use std::ops::{Index, IndexMut};

use joist_core::align::ceil_pow2;

use crate::iter::WindowIter;

/// A fixed-capacity circular buffer of the last `len()` values pushed.
///
/// Capacity is chosen at construction, rounded **up** to the next power
/// of two — the realized size may exceed the requested size. Every slot
/// always holds a value; the buffer is permanently "full" and
/// `push_front` replaces the oldest value in place. Index 0 is the most
/// recently pushed value.
///
/// The default-constructed buffer has zero capacity and supports no
/// pushes; it doubles as the moved-from sentinel for
/// [`std::mem::take`].
pub struct WindowBuffer<T> {
    buf: Box<[T]>,
    /// Physical slot of logical index 0. Invariant: `cursor < len()`
    /// whenever the buffer is non-empty.
    cursor: usize,
}

impl<T> WindowBuffer<T> {
    /// Creates a buffer of at least `requested` slots, each holding
    /// `T::default()`.
    ///
    /// `requested == 0` produces the empty buffer.
    pub fn new(requested: usize) -> Self
    where
        T: Default,
    {
        if requested == 0 {
            return Self::empty();
        }
        let size = ceil_pow2(requested);
        let buf: Box<[T]> = (0..size).map(|_| T::default()).collect();
        Self { buf, cursor: 0 }
    }

    /// Creates a buffer of at least `requested` slots, each holding a
    /// clone of `value`.
    pub fn with_value(requested: usize, value: T) -> Self
    where
        T: Clone,
    {
        if requested == 0 {
            return Self::empty();
        }
        let size = ceil_pow2(requested);
        Self {
            buf: vec![value; size].into_boxed_slice(),
            cursor: 0,
        }
    }

    fn empty() -> Self {
        Self {
            buf: Box::from([]),
            cursor: 0,
        }
    }

    /// Number of slots (always a power of two, or zero).
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// True for the zero-capacity buffer.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    fn mask(&self) -> usize {
        self.buf.len().wrapping_sub(1)
    }

    /// Most recently pushed value, or `None` on the empty buffer.
    pub fn front(&self) -> Option<&T> {
        self.buf.get(self.cursor)
    }

    /// Oldest value still held, or `None` on the empty buffer.
    pub fn back(&self) -> Option<&T> {
        if self.is_empty() {
            return None;
        }
        Some(&self[self.len() - 1])
    }

    /// Pushes `value` as the new most-recent element, dropping the
    /// oldest: the cursor rewinds one slot and the evicted value is
    /// replaced by assignment.
    ///
    /// # Panics
    ///
    /// Panics on the empty buffer.
    pub fn push_front(&mut self, value: T) {
        assert!(!self.is_empty(), "push_front on an empty window buffer");
        let cursor = self.cursor.wrapping_sub(1) & self.mask();
        self.buf[cursor] = value;
        self.cursor = cursor;
    }

    /// Iterator from most to least recent.
    pub fn iter(&self) -> WindowIter<'_, T> {
        WindowIter::new(&self.buf, self.cursor)
    }
}

impl<T> Index<usize> for WindowBuffer<T> {
    type Output = T;

    /// The `i`'th most recent value.
    ///
    /// # Panics
    ///
    /// Panics unless `i < self.len()`.
    fn index(&self, i: usize) -> &T {
        assert!(i < self.len(), "window index {i} out of range");
        &self.buf[(self.cursor + i) & self.mask()]
    }
}

impl<T> IndexMut<usize> for WindowBuffer<T> {
    fn index_mut(&mut self, i: usize) -> &mut T {
        assert!(i < self.len(), "window index {i} out of range");
        let mask = self.mask();
        &mut self.buf[(self.cursor + i) & mask]
    }
}

impl<T> Default for WindowBuffer<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: Clone> Clone for WindowBuffer<T> {
    fn clone(&self) -> Self {
        Self {
            buf: self.buf.clone(),
            cursor: self.cursor,
        }
    }
}

impl<'a, T> IntoIterator for &'a WindowBuffer<T> {
    type Item = &'a T;
    type IntoIter = WindowIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: fmt::Debug> fmt::Debug for WindowBuffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
