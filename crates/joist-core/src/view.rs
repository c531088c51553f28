//! Non-owning views over dynamic-length contiguous ranges.
//!
//! A [`View`] is a `(pointer, length)` pair described safely as a slice
//! reference. It is a copyable value type; the referenced memory is owned
//! elsewhere and must outlive the view.
//!
//! Equality and ordering are element-wise / lexicographic. The range
//! relations [`is_subset`], [`is_overlap`] and [`is_same`] are *pointer*
//! comparisons: they describe how two windows sit within the same
//! underlying allocation and say nothing about contents.

use std::fmt;
use std::ops::Index;

/// A view over a contiguous range of memory.
///
/// Preconditions on element access follow slice semantics: indexing out
/// of range panics. Shrinking operations come in two flavours — the plain
/// form panics when asked to drop more elements than the view holds, the
/// `_trunc` form clamps.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct View<'a, T> {
    items: &'a [T],
}

impl<'a, T> View<'a, T> {
    /// Creates a view over the given contiguous range.
    pub fn new(items: &'a [T]) -> Self {
        Self { items }
    }

    /// Creates an empty view.
    pub fn empty() -> Self {
        Self { items: &[] }
    }

    /// Number of elements spanned by the view.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True if the view spans no elements.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The underlying slice.
    pub fn as_slice(&self) -> &'a [T] {
        self.items
    }

    /// Pointer to the first element of the view.
    pub fn as_ptr(&self) -> *const T {
        self.items.as_ptr()
    }

    /// Returns the `i`'th element, or `None` when out of range.
    pub fn get(&self, i: usize) -> Option<&'a T> {
        self.items.get(i)
    }

    /// First element of the view, or `None` when empty.
    pub fn first(&self) -> Option<&'a T> {
        self.items.first()
    }

    /// Last element of the view, or `None` when empty.
    pub fn last(&self) -> Option<&'a T> {
        self.items.last()
    }

    /// Iterator over the viewed elements.
    pub fn iter(&self) -> std::slice::Iter<'a, T> {
        self.items.iter()
    }

    /// Shrinks the view in place by dropping the first `n` elements.
    ///
    /// # Panics
    ///
    /// Panics if `n > self.len()`.
    pub fn remove_prefix(&mut self, n: usize) {
        assert!(n <= self.items.len(), "remove_prefix past the end of the view");
        self.items = &self.items[n..];
    }

    /// Shrinks the view in place by dropping the last `n` elements.
    ///
    /// # Panics
    ///
    /// Panics if `n > self.len()`.
    pub fn remove_suffix(&mut self, n: usize) {
        assert!(n <= self.items.len(), "remove_suffix past the end of the view");
        self.items = &self.items[..self.items.len() - n];
    }

    /// Drops up to the first `n` elements, clamping at the view length.
    pub fn remove_prefix_trunc(&mut self, n: usize) {
        self.remove_prefix(n.min(self.items.len()));
    }

    /// Drops up to the last `n` elements, clamping at the view length.
    pub fn remove_suffix_trunc(&mut self, n: usize) {
        self.remove_suffix(n.min(self.items.len()));
    }
}

impl<T> Clone for View<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for View<'_, T> {}

impl<'a, T> From<&'a [T]> for View<'a, T> {
    fn from(items: &'a [T]) -> Self {
        Self::new(items)
    }
}

impl<T> Default for View<'_, T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> Index<usize> for View<'_, T> {
    type Output = T;

    fn index(&self, i: usize) -> &T {
        &self.items[i]
    }
}

impl<'a, T> IntoIterator for View<'a, T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<'a, T> IntoIterator for &View<'a, T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T: fmt::Debug> fmt::Debug for View<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.items).finish()
    }
}

/// Returns the sub-view of `v` starting at `pos` with length `count`.
///
/// # Panics
///
/// Panics unless `pos + count <= v.len()`.
pub fn slice<T>(v: View<'_, T>, pos: usize, count: usize) -> View<'_, T> {
    assert!(pos <= v.len(), "slice start past the end of the view");
    assert!(count <= v.len() - pos, "slice length past the end of the view");
    View::new(&v.as_slice()[pos..pos + count])
}

/// Returns the sub-view of `v` starting at `pos` with length up to `count`.
///
/// Both `pos` and `count` are clamped to stay within bounds; the result
/// may be shorter than requested or empty.
pub fn slice_trunc<T>(v: View<'_, T>, pos: usize, count: usize) -> View<'_, T> {
    let pos = pos.min(v.len());
    let count = count.min(v.len() - pos);
    View::new(&v.as_slice()[pos..pos + count])
}

/// True if `inner`'s pointer range lies entirely within `outer`'s.
///
/// This is a memory-range relation, not a content comparison. It is only
/// meaningful when both views alias the same underlying allocation.
pub fn is_subset<T>(outer: View<'_, T>, inner: View<'_, T>) -> bool {
    let o = outer.as_slice().as_ptr_range();
    let i = inner.as_slice().as_ptr_range();
    i.start >= o.start && i.end <= o.end
}

/// True if the two pointer ranges intersect in at least one element.
///
/// Empty views never overlap anything. Like [`is_subset`], this compares
/// pointers, not contents.
pub fn is_overlap<T>(l: View<'_, T>, r: View<'_, T>) -> bool {
    let l = l.as_slice().as_ptr_range();
    let r = r.as_slice().as_ptr_range();
    // max-of-starts < min-of-ends keeps empty ranges from "overlapping"
    // ranges that merely contain their base pointer.
    l.start.max(r.start) < l.end.min(r.end)
}

/// True if both views describe exactly the same pointer range.
pub fn is_same<T>(l: View<'_, T>, r: View<'_, T>) -> bool {
    let l = l.as_slice().as_ptr_range();
    let r = r.as_slice().as_ptr_range();
    l.start == r.start && l.end == r.end
}
