//! Inline-storage circular window buffer.

use std::fmt;
use std::ops::{Index, IndexMut};

use crate::iter::WindowIter;

/// A circular buffer of the last `N` values pushed, stored inline.
///
/// `N` must be a power of two; the check is a compile-time assertion, so
/// a bad capacity fails the build rather than a test. Unlike
/// [`WindowBuffer`](crate::WindowBuffer) there is no heap allocation and
/// no empty state — `N >= 1` always, so `front`/`back` return plain
/// references.
#[derive(Clone)]
pub struct StaticWindowBuffer<T, const N: usize> {
    buf: [T; N],
    cursor: usize,
}

impl<T, const N: usize> StaticWindowBuffer<T, N> {
    const MASK: usize = N - 1;

    /// Creates a buffer with every slot holding `T::default()`.
    pub fn new() -> Self
    where
        T: Default,
    {
        const {
            assert!(N.is_power_of_two(), "window capacity must be a power of two");
        }
        Self {
            buf: std::array::from_fn(|_| T::default()),
            cursor: 0,
        }
    }

    /// Creates a buffer with every slot holding a clone of `value`.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        const {
            assert!(N.is_power_of_two(), "window capacity must be a power of two");
        }
        Self {
            buf: std::array::from_fn(|_| value.clone()),
            cursor: 0,
        }
    }

    /// Number of slots, fixed at `N`.
    pub const fn len(&self) -> usize {
        N
    }

    /// Always false: a power-of-two capacity is at least one.
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Most recently pushed value.
    pub fn front(&self) -> &T {
        &self.buf[self.cursor]
    }

    /// Oldest value still held.
    pub fn back(&self) -> &T {
        &self.buf[self.cursor.wrapping_sub(1) & Self::MASK]
    }

    /// Pushes `value` as the new most-recent element; the oldest value
    /// is replaced in place.
    pub fn push_front(&mut self, value: T) {
        let cursor = self.cursor.wrapping_sub(1) & Self::MASK;
        self.buf[cursor] = value;
        self.cursor = cursor;
    }

    /// Iterator from most to least recent.
    pub fn iter(&self) -> WindowIter<'_, T> {
        WindowIter::new(&self.buf, self.cursor)
    }
}

impl<T: Default, const N: usize> Default for StaticWindowBuffer<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const N: usize> Index<usize> for StaticWindowBuffer<T, N> {
    type Output = T;

    /// The `i`'th most recent value.
    ///
    /// # Panics
    ///
    /// Panics unless `i < N`.
    fn index(&self, i: usize) -> &T {
        assert!(i < N, "window index {i} out of range");
        &self.buf[(self.cursor + i) & Self::MASK]
    }
}

impl<T, const N: usize> IndexMut<usize> for StaticWindowBuffer<T, N> {
    fn index_mut(&mut self, i: usize) -> &mut T {
        assert!(i < N, "window index {i} out of range");
        &mut self.buf[(self.cursor + i) & Self::MASK]
    }
}

impl<'a, T, const N: usize> IntoIterator for &'a StaticWindowBuffer<T, N> {
    type Item = &'a T;
    type IntoIter = WindowIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: fmt::Debug, const N: usize> fmt::Debug for StaticWindowBuffer<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
