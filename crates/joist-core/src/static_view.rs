//! Non-owning views with a compile-time-fixed length.
//!
//! [`StaticView`] carries its length `N` in its type, so sub-view
//! operations ([`StaticView::prefix`], [`StaticView::suffix`],
//! [`StaticView::slice`]) are checked at compile time — a size mismatch
//! is a build failure, not a runtime panic. There is no default
//! constructor: a static view always references real memory.

use std::fmt;
use std::ops::Index;

use crate::view::View;

/// A view over a contiguous range whose length is a compile-time constant.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StaticView<'a, T, const N: usize> {
    items: &'a [T; N],
}

impl<'a, T, const N: usize> StaticView<'a, T, N> {
    /// Creates a view over the given array.
    pub fn new(items: &'a [T; N]) -> Self {
        Self { items }
    }

    /// Number of elements spanned by the view.
    pub const fn len(&self) -> usize {
        N
    }

    /// True if the view spans no elements.
    pub const fn is_empty(&self) -> bool {
        N == 0
    }

    /// The underlying array.
    pub fn as_array(&self) -> &'a [T; N] {
        self.items
    }

    /// The underlying slice.
    pub fn as_slice(&self) -> &'a [T] {
        self.items
    }

    /// Pointer to the first element of the view.
    pub fn as_ptr(&self) -> *const T {
        self.items.as_ptr()
    }

    /// Converts to a dynamic-length [`View`] over the same range.
    pub fn as_view(&self) -> View<'a, T> {
        View::new(self.items)
    }

    /// Returns the `i`'th element, or `None` when out of range.
    pub fn get(&self, i: usize) -> Option<&'a T> {
        self.items.get(i)
    }

    /// First element of the view, or `None` when `N == 0`.
    pub fn first(&self) -> Option<&'a T> {
        self.items.first()
    }

    /// Last element of the view, or `None` when `N == 0`.
    pub fn last(&self) -> Option<&'a T> {
        self.items.last()
    }

    /// Iterator over the viewed elements.
    pub fn iter(&self) -> std::slice::Iter<'a, T> {
        self.items.iter()
    }

    /// The first `M` elements as a static view.
    ///
    /// Fails to compile unless `M <= N`.
    pub fn prefix<const M: usize>(self) -> StaticView<'a, T, M> {
        const {
            assert!(M <= N, "prefix length exceeds view length");
        }
        let items: &[T; M] = self.items[..M]
            .try_into()
            .expect("length checked at compile time");
        StaticView { items }
    }

    /// The last `M` elements as a static view.
    ///
    /// Fails to compile unless `M <= N`.
    pub fn suffix<const M: usize>(self) -> StaticView<'a, T, M> {
        const {
            assert!(M <= N, "suffix length exceeds view length");
        }
        let items: &[T; M] = self.items[N - M..]
            .try_into()
            .expect("length checked at compile time");
        StaticView { items }
    }

    /// The `LEN` elements starting at `START` as a static view.
    ///
    /// Fails to compile unless `START + LEN <= N`.
    pub fn slice<const START: usize, const LEN: usize>(self) -> StaticView<'a, T, LEN> {
        const {
            assert!(START <= N, "slice start exceeds view length");
            assert!(LEN <= N - START, "slice end exceeds view length");
        }
        let items: &[T; LEN] = self.items[START..START + LEN]
            .try_into()
            .expect("length checked at compile time");
        StaticView { items }
    }
}

impl<T, const N: usize> Clone for StaticView<'_, T, N> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, const N: usize> Copy for StaticView<'_, T, N> {}

impl<'a, T, const N: usize> From<&'a [T; N]> for StaticView<'a, T, N> {
    fn from(items: &'a [T; N]) -> Self {
        Self::new(items)
    }
}

impl<T, const N: usize> Index<usize> for StaticView<'_, T, N> {
    type Output = T;

    fn index(&self, i: usize) -> &T {
        &self.items[i]
    }
}

impl<'a, T, const N: usize> IntoIterator for StaticView<'a, T, N> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T: fmt::Debug, const N: usize> fmt::Debug for StaticView<'_, T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.items).finish()
    }
}
