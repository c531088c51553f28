//! Paged pool allocator for fixed-size slots.
//!
//! A [`PagedPool`] stores objects of one type in pages of
//! `slots_per_page` slots. Slots are recycled through a free list that
//! threads `u32` slot indices through the vacant slots themselves — the
//! index-based rendition of an intrusive free list, with no aliasing
//! hazards. Pages are allocated lazily when the free list runs dry and
//! are never individually freed: the pool only shrinks by being dropped.

use std::fmt;

use smallvec::SmallVec;

/// One pool slot: either a live value or a link in the free list.
///
/// The storage for the free-list link is the slot itself, so a vacant
/// slot costs no memory beyond its place in the page.
enum Slot<T> {
    Occupied(T),
    Vacant { next_free: Option<u32> },
}

/// Key addressing a live object in a [`PagedPool`].
///
/// Keys are plain indices: copyable, order-free, and only meaningful for
/// the pool that issued them. Using a key after `remove` (or a key from
/// another pool) is a precondition violation; the pool panics when it
/// can detect it (the slot is vacant or out of range) rather than
/// corrupt the free list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[must_use]
pub struct PoolKey(u32);

impl PoolKey {
    /// The raw slot index.
    pub fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Display for PoolKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PoolKey({})", self.0)
    }
}

/// A pool allocator for same-sized slots, grown in pages on demand.
///
/// Move-only (no `Clone`): the pages have a single owner. All operations
/// are O(1) except page growth, which is O(`slots_per_page`).
pub struct PagedPool<T> {
    pages: SmallVec<[Box<[Slot<T>]>; 4]>,
    free_head: Option<u32>,
    slots_per_page: u32,
    live: usize,
}

impl<T> PagedPool<T> {
    /// Creates a pool that grows `slots_per_page` slots at a time.
    ///
    /// No page is allocated up front; the first page appears on the
    /// first insert.
    ///
    /// # Panics
    ///
    /// Panics if `slots_per_page` is zero or does not fit in `u32`.
    pub fn new(slots_per_page: usize) -> Self {
        assert!(slots_per_page > 0, "pool page must hold at least one slot");
        let slots_per_page =
            u32::try_from(slots_per_page).expect("slots_per_page must fit in u32");
        Self {
            pages: SmallVec::new(),
            free_head: None,
            slots_per_page,
            live: 0,
        }
    }

    /// Number of live objects in the pool.
    pub fn len(&self) -> usize {
        self.live
    }

    /// True if the pool holds no live objects.
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Total slot capacity across all pages.
    pub fn capacity(&self) -> usize {
        self.pages.len() * self.slots_per_page as usize
    }

    /// Number of pages allocated so far.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Slots per page, fixed at construction.
    pub fn slots_per_page(&self) -> usize {
        self.slots_per_page as usize
    }

    /// Stores `value` in a recycled slot, growing one page if the free
    /// list is empty.
    pub fn insert(&mut self, value: T) -> PoolKey {
        let index = match self.free_head {
            Some(index) => index,
            None => {
                self.grow();
                self.free_head.expect("grow threads a fresh free list")
            }
        };
        let next = match self.slot(index) {
            Slot::Vacant { next_free } => *next_free,
            Slot::Occupied(_) => unreachable!("free list points at a live slot"),
        };
        self.free_head = next;
        *self.slot_mut(index) = Slot::Occupied(value);
        self.live += 1;
        PoolKey(index)
    }

    /// Removes the object addressed by `key`, returning it and recycling
    /// the slot.
    ///
    /// # Panics
    ///
    /// Panics if the slot is not live — `key` is stale, foreign, or was
    /// already removed.
    pub fn remove(&mut self, key: PoolKey) -> T {
        assert!(
            matches!(self.try_slot(key.0), Some(Slot::Occupied(_))),
            "PagedPool::remove of a slot that is not live: {key}"
        );
        let head = self.free_head;
        let old = std::mem::replace(self.slot_mut(key.0), Slot::Vacant { next_free: head });
        self.free_head = Some(key.0);
        self.live -= 1;
        match old {
            Slot::Occupied(value) => value,
            Slot::Vacant { .. } => unreachable!("liveness checked above"),
        }
    }

    /// Shared access to the object addressed by `key`, or `None` if the
    /// slot is not live.
    pub fn get(&self, key: PoolKey) -> Option<&T> {
        match self.try_slot(key.0)? {
            Slot::Occupied(value) => Some(value),
            Slot::Vacant { .. } => None,
        }
    }

    /// Mutable access to the object addressed by `key`, or `None` if the
    /// slot is not live.
    pub fn get_mut(&mut self, key: PoolKey) -> Option<&mut T> {
        let per = self.slots_per_page as usize;
        let index = key.0 as usize;
        match self.pages.get_mut(index / per)?.get_mut(index % per)? {
            Slot::Occupied(value) => Some(value),
            Slot::Vacant { .. } => None,
        }
    }

    /// True if `key` addresses a live object.
    pub fn contains(&self, key: PoolKey) -> bool {
        self.get(key).is_some()
    }

    /// Allocates one page and threads its slots onto the free list.
    ///
    /// The new slots go in front; the last of them links to the previous
    /// head, so free slots surviving from older pages stay reachable.
    fn grow(&mut self) {
        let per = self.slots_per_page;
        let pages = u32::try_from(self.pages.len()).expect("pool slot index space exhausted");
        let base = pages
            .checked_mul(per)
            .filter(|base| base.checked_add(per).is_some())
            .expect("pool slot index space exhausted");

        let mut slots = Vec::with_capacity(per as usize);
        for i in 0..per {
            let next_free = if i + 1 < per {
                Some(base + i + 1)
            } else {
                self.free_head
            };
            slots.push(Slot::Vacant { next_free });
        }
        self.pages.push(slots.into_boxed_slice());
        self.free_head = Some(base);
    }

    fn slot(&self, index: u32) -> &Slot<T> {
        let per = self.slots_per_page as usize;
        let index = index as usize;
        &self.pages[index / per][index % per]
    }

    fn slot_mut(&mut self, index: u32) -> &mut Slot<T> {
        let per = self.slots_per_page as usize;
        let index = index as usize;
        &mut self.pages[index / per][index % per]
    }

    fn try_slot(&self, index: u32) -> Option<&Slot<T>> {
        let per = self.slots_per_page as usize;
        let index = index as usize;
        self.pages.get(index / per)?.get(index % per)
    }
}

impl<T> fmt::Debug for PagedPool<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PagedPool")
            .field("live", &self.live)
            .field("capacity", &self.capacity())
            .field("slots_per_page", &self.slots_per_page)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_no_pages() {
        let pool: PagedPool<u32> = PagedPool::new(8);
        assert_eq!(pool.len(), 0);
        assert!(pool.is_empty());
        assert_eq!(pool.page_count(), 0);
        assert_eq!(pool.capacity(), 0);
    }

    #[test]
    #[should_panic(expected = "at least one slot")]
    fn zero_slots_per_page_rejected() {
        let _ = PagedPool::<u32>::new(0);
    }

    #[test]
    fn insert_and_get() {
        let mut pool = PagedPool::new(4);
        let a = pool.insert("alpha");
        let b = pool.insert("beta");
        assert_eq!(pool.get(a), Some(&"alpha"));
        assert_eq!(pool.get(b), Some(&"beta"));
        assert_eq!(pool.len(), 2);
        assert_eq!(pool.page_count(), 1);
    }

    #[test]
    fn pages_grow_on_demand() {
        let mut pool = PagedPool::new(4);
        for i in 0..9u32 {
            pool.insert(i);
        }
        assert_eq!(pool.page_count(), 3);
        assert_eq!(pool.capacity(), 12);
        assert_eq!(pool.len(), 9);
    }

    #[test]
    fn remove_returns_value_and_recycles() {
        let mut pool = PagedPool::new(4);
        let k = pool.insert(7u32);
        assert_eq!(pool.remove(k), 7);
        assert!(pool.is_empty());
        assert!(!pool.contains(k));
        // The slot is reused for the next insert.
        let k2 = pool.insert(8);
        assert_eq!(k2.index(), k.index());
    }

    #[test]
    fn round_trip_reuses_pages() {
        const K: usize = 20;
        let mut pool = PagedPool::new(6);
        let keys: Vec<PoolKey> = (0..K).map(|i| pool.insert(i)).collect();
        let pages = pool.page_count();
        assert!(pages > 1);

        for k in keys {
            pool.remove(k);
        }
        assert!(pool.is_empty());
        assert_eq!(pool.page_count(), pages);

        for i in 0..K {
            pool.insert(i * 10);
        }
        // The free list was fully reused: no additional pages.
        assert_eq!(pool.page_count(), pages);
        assert_eq!(pool.len(), K);
    }

    #[test]
    fn old_free_slots_stay_reachable_after_growth() {
        let mut pool = PagedPool::new(2);
        let a = pool.insert(1u32);
        let _b = pool.insert(2u32);
        pool.remove(a);
        // Free list holds one slot from page 0; filling past it forces a
        // new page whose slots are threaded in front of it.
        let _c = pool.insert(3u32);
        let _d = pool.insert(4u32);
        let _e = pool.insert(5u32);
        assert_eq!(pool.page_count(), 2);
        assert_eq!(pool.len(), 4);
        assert_eq!(pool.capacity(), 4);
    }

    #[test]
    #[should_panic(expected = "not live")]
    fn double_remove_panics() {
        let mut pool = PagedPool::new(4);
        let k = pool.insert(1u32);
        pool.remove(k);
        pool.remove(k);
    }

    #[test]
    #[should_panic(expected = "not live")]
    fn foreign_key_panics() {
        let mut a = PagedPool::new(4);
        let mut b = PagedPool::new(4);
        let _ = a.insert(1u32);
        let k = a.insert(2u32);
        let _ = b.insert(1u32);
        // b has a live slot 0 but nothing at k's index.
        let _ = b.remove(k);
    }

    #[test]
    fn get_mut_mutates_in_place() {
        let mut pool = PagedPool::new(4);
        let k = pool.insert(vec![1, 2, 3]);
        pool.get_mut(k).unwrap().push(4);
        assert_eq!(pool.get(k), Some(&vec![1, 2, 3, 4]));
    }

    #[test]
    fn drop_drops_live_values() {
        use std::cell::Cell;
        use std::rc::Rc;

        struct Probe(Rc<Cell<u32>>);
        impl Drop for Probe {
            fn drop(&mut self) {
                self.0.set(self.0.get() + 1);
            }
        }

        let drops = Rc::new(Cell::new(0));
        let mut pool = PagedPool::new(4);
        for _ in 0..6 {
            pool.insert(Probe(Rc::clone(&drops)));
        }
        drop(pool);
        assert_eq!(drops.get(), 6);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn live_count_tracks_operations(
                ops in proptest::collection::vec(any::<bool>(), 1..200),
                per_page in 1usize..16,
            ) {
                let mut pool = PagedPool::new(per_page);
                let mut keys = Vec::new();
                for insert in ops {
                    if insert || keys.is_empty() {
                        keys.push(pool.insert(keys.len()));
                    } else {
                        let k = keys.pop().unwrap();
                        pool.remove(k);
                    }
                    prop_assert_eq!(pool.len(), keys.len());
                    prop_assert!(pool.capacity() >= pool.len());
                    prop_assert_eq!(
                        pool.capacity(),
                        pool.page_count() * per_page
                    );
                }
            }
        }
    }
}
