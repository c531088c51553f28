//! Iterator over the logical order of a window buffer.
//!
//! The iterator state is `(storage, cursor, head, tail)` where `head`
//! and `tail` are *unwrapped logical* positions. All arithmetic and
//! comparison happen on those logical positions; the power-of-two mask
//! is applied only when an element is actually touched. That split is
//! what makes `len()` and reverse iteration exact even though the
//! physical storage wraps.

use std::fmt;
use std::iter::FusedIterator;

/// Iterator yielding a window buffer's elements from most to least
/// recent.
///
/// Random access: `nth` is O(1).
pub struct WindowIter<'a, T> {
    buf: &'a [T],
    cursor: usize,
    /// Next logical position to yield from the front.
    head: usize,
    /// One past the last logical position to yield from the back.
    tail: usize,
}

impl<'a, T> WindowIter<'a, T> {
    /// Iterator over all of `buf` in logical order, starting at
    /// `cursor`. `buf` must be empty or power-of-two sized.
    pub(crate) fn new(buf: &'a [T], cursor: usize) -> Self {
        debug_assert!(buf.is_empty() || buf.len().is_power_of_two());
        Self {
            buf,
            cursor,
            head: 0,
            tail: buf.len(),
        }
    }

    fn physical(&self, logical: usize) -> usize {
        // Wrapping sub keeps the empty-buffer mask harmless; head == tail
        // guarantees it is never used to index in that case.
        self.cursor.wrapping_add(logical) & self.buf.len().wrapping_sub(1)
    }
}

impl<'a, T> Iterator for WindowIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.head == self.tail {
            return None;
        }
        let item = &self.buf[self.physical(self.head)];
        self.head += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.tail - self.head;
        (len, Some(len))
    }

    fn nth(&mut self, n: usize) -> Option<&'a T> {
        let pos = match self.head.checked_add(n) {
            Some(pos) if pos < self.tail => pos,
            _ => {
                self.head = self.tail;
                return None;
            }
        };
        self.head = pos + 1;
        Some(&self.buf[self.physical(pos)])
    }

    fn count(self) -> usize {
        self.tail - self.head
    }

    fn last(mut self) -> Option<&'a T> {
        self.next_back()
    }
}

impl<'a, T> DoubleEndedIterator for WindowIter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        if self.head == self.tail {
            return None;
        }
        self.tail -= 1;
        Some(&self.buf[self.physical(self.tail)])
    }
}

impl<T> ExactSizeIterator for WindowIter<'_, T> {
    fn len(&self) -> usize {
        self.tail - self.head
    }
}

impl<T> FusedIterator for WindowIter<'_, T> {}

impl<T> Clone for WindowIter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            buf: self.buf,
            cursor: self.cursor,
            head: self.head,
            tail: self.tail,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for WindowIter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iter_at(buf: &[u32], cursor: usize) -> WindowIter<'_, u32> {
        WindowIter::new(buf, cursor)
    }

    #[test]
    fn yields_logical_order_from_any_cursor() {
        let buf = [10u32, 20, 30, 40];
        for cursor in 0..4 {
            let got: Vec<u32> = iter_at(&buf, cursor).copied().collect();
            let expect: Vec<u32> = (0..4).map(|i| buf[(cursor + i) % 4]).collect();
            assert_eq!(got, expect, "cursor {cursor}");
        }
    }

    #[test]
    fn len_is_exact_regardless_of_rotation() {
        let buf = [1u32, 2, 3, 4, 5, 6, 7, 8];
        for cursor in 0..8 {
            let mut it = iter_at(&buf, cursor);
            assert_eq!(it.len(), 8);
            it.next();
            it.next_back();
            assert_eq!(it.len(), 6);
        }
    }

    #[test]
    fn reverse_is_mirror_of_forward() {
        let buf = [1u32, 2, 3, 4];
        let fwd: Vec<u32> = iter_at(&buf, 3).copied().collect();
        let mut rev: Vec<u32> = iter_at(&buf, 3).rev().copied().collect();
        rev.reverse();
        assert_eq!(fwd, rev);
    }

    #[test]
    fn nth_is_random_access() {
        let buf = [0u32, 1, 2, 3, 4, 5, 6, 7];
        let mut it = iter_at(&buf, 5);
        assert_eq!(it.nth(3), Some(&buf[(5 + 3) % 8]));
        // nth consumed positions 0..=3; next is logical 4.
        assert_eq!(it.next(), Some(&buf[(5 + 4) % 8]));
        assert_eq!(it.len(), 3);
        assert_eq!(it.nth(10), None);
        assert_eq!(it.len(), 0);
    }

    #[test]
    fn empty_iterator_is_fused() {
        let buf: [u32; 0] = [];
        let mut it = iter_at(&buf, 0);
        assert_eq!(it.len(), 0);
        assert_eq!(it.next(), None);
        assert_eq!(it.next_back(), None);
        assert_eq!(it.next(), None);
    }

    #[test]
    fn meet_in_the_middle() {
        let buf = [1u32, 2, 3, 4];
        let mut it = iter_at(&buf, 2);
        assert_eq!(it.next(), Some(&3));
        assert_eq!(it.next_back(), Some(&2));
        assert_eq!(it.next_back(), Some(&1));
        assert_eq!(it.next(), Some(&4));
        assert_eq!(it.next(), None);
        assert_eq!(it.next_back(), None);
    }
}
