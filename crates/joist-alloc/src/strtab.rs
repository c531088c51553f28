//! Append-only string interning table.
//!
//! A [`StringTable`] copies strings into a list of pages and hands back
//! compact [`StrRef`] handles. Stored strings are NUL-terminated in
//! place (for C-style consumption) and live until [`StringTable::clear`]
//! or drop — there is no per-string deletion.
//!
//! Pages are appended to a stable list and never move; a separate rank
//! list keeps the page indices in **descending order of remaining
//! space**, so a single early-exit scan finds the best-fit page: the
//! last page that still has room is the one with the least excess room.
//! After each store the modified page's rank is bubbled forward — an
//! O(pages) step, acceptable while pages stay few relative to strings
//! (many small strings per page). Strings larger than the configured
//! page size get a dedicated page sized exactly for them.

use std::fmt;

use smallvec::SmallVec;

/// Storage shared by every empty [`StrRef`]: a lone NUL terminator.
const EMPTY: &[u8] = &[0];

/// One interning page: packed NUL-terminated string copies.
struct Page {
    buf: Box<[u8]>,
    used: usize,
}

impl Page {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: vec![0u8; capacity].into_boxed_slice(),
            used: 0,
        }
    }

    fn remain(&self) -> usize {
        self.buf.len() - self.used
    }
}

/// Handle to a string stored in a [`StringTable`].
///
/// A ref records `(page, offset, length, generation)`; resolution is a
/// bounds-checked lookup into the table's own pages, never a pointer
/// dereference. Generation-scoped: a ref minted before the last
/// `clear()` is stale, and resolving it panics instead of reading
/// recycled storage. The recorded length excludes the NUL terminator.
#[derive(Clone, Copy, Debug)]
#[must_use]
pub struct StrRef {
    page: u32,
    offset: usize,
    len: usize,
    generation: u32,
}

impl StrRef {
    /// Length of the referenced string in bytes, excluding the NUL.
    pub fn len(&self) -> usize {
        self.len
    }

    /// True if the referenced string is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The table generation this ref was minted in.
    pub fn generation(&self) -> u32 {
        self.generation
    }
}

/// Append-only interning arena for read-only strings.
///
/// Move-only (no `Clone`). All stored bytes are released at once by
/// [`StringTable::clear`] or drop; individual strings are never freed.
pub struct StringTable {
    /// Append-only page storage; indices here are what [`StrRef`]
    /// records, so pages must never move or shrink before `clear()`.
    pages: SmallVec<[Page; 4]>,
    /// Page indices in descending `remain()` order.
    order: SmallVec<[u32; 4]>,
    page_size: usize,
    generation: u32,
}

impl StringTable {
    /// Floor on the configured page size; smaller requests are clamped
    /// up so page bookkeeping stays amortized.
    pub const MIN_PAGE_SIZE: usize = 4096;

    /// Page size used by [`StringTable::new`].
    pub const DEFAULT_PAGE_SIZE: usize = 8192;

    /// Creates a table with the default page size.
    pub fn new() -> Self {
        Self::with_page_size(Self::DEFAULT_PAGE_SIZE)
    }

    /// Creates a table with the given page size, clamped up to
    /// [`StringTable::MIN_PAGE_SIZE`].
    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            pages: SmallVec::new(),
            order: SmallVec::new(),
            page_size: page_size.max(Self::MIN_PAGE_SIZE),
            generation: 0,
        }
    }

    /// The configured page size.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Number of pages currently allocated.
    pub fn pages(&self) -> usize {
        self.pages.len()
    }

    /// Total bytes consumed by stored strings, NUL terminators included.
    pub fn stored_bytes(&self) -> usize {
        self.pages.iter().map(|p| p.used).sum()
    }

    /// Copies `s` into the table and returns a handle to the copy.
    ///
    /// The copy is NUL-terminated in place; the handle stays valid until
    /// [`StringTable::clear`] or drop. Empty input allocates nothing.
    pub fn store(&mut self, s: &str) -> StrRef {
        if s.is_empty() {
            return StrRef {
                page: 0,
                offset: 0,
                len: 0,
                generation: self.generation,
            };
        }

        let len_z = s.len() + 1;

        // Ranks are sorted most-free-first; walk past every page that
        // still fits. The last one we passed is the best fit.
        let mut too_small = 0;
        while too_small < self.order.len() && self.page_at(too_small).remain() >= len_z {
            too_small += 1;
        }

        let rank = if too_small == 0 {
            // Nothing fits: fresh page, ranked at the head. Oversized
            // strings get a dedicated page sized exactly for them.
            let capacity = self.page_size.max(len_z);
            self.pages.push(Page::with_capacity(capacity));
            let id = u32::try_from(self.pages.len() - 1).expect("page count fits in u32");
            self.order.insert(0, id);
            0
        } else {
            too_small - 1
        };

        let id = self.order[rank];
        let page = &mut self.pages[id as usize];
        let offset = page.used;
        page.buf[offset..offset + s.len()].copy_from_slice(s.as_bytes());
        page.buf[offset + s.len()] = 0;
        page.used += len_z;

        // The page just lost `len_z` bytes of slack; bubble its rank
        // toward the tail until descending order is restored.
        let mut i = rank;
        while i + 1 < self.order.len() && self.page_at(i).remain() < self.page_at(i + 1).remain()
        {
            self.order.swap(i, i + 1);
            i += 1;
        }

        StrRef {
            page: id,
            offset,
            len: s.len(),
            generation: self.generation,
        }
    }

    /// Resolves a handle to the stored string.
    ///
    /// # Panics
    ///
    /// Panics if `r` is stale (minted before the last
    /// [`StringTable::clear`]) or addresses bytes this table never
    /// stored. Handles from a *different* table are a precondition
    /// violation; the page and offset checks catch most of them, but a
    /// foreign handle whose coordinates happen to exist in this table
    /// resolves to whatever this table stored there.
    pub fn resolve(&self, r: StrRef) -> &str {
        let z = self.stored_with_nul(r);
        std::str::from_utf8(&z[..r.len]).expect("interned bytes are valid UTF-8")
    }

    /// Resolves a handle to the stored bytes including the trailing NUL.
    ///
    /// # Panics
    ///
    /// Same checks as [`StringTable::resolve`].
    pub fn resolve_with_nul(&self, r: StrRef) -> &[u8] {
        self.stored_with_nul(r)
    }

    /// Frees every page and invalidates every outstanding [`StrRef`].
    pub fn clear(&mut self) {
        self.pages.clear();
        self.order.clear();
        self.generation = self.generation.wrapping_add(1);
    }

    fn page_at(&self, rank: usize) -> &Page {
        &self.pages[self.order[rank] as usize]
    }

    /// Bounds-checked lookup of a ref's bytes, NUL included.
    fn stored_with_nul(&self, r: StrRef) -> &[u8] {
        assert!(
            r.generation == self.generation,
            "stale StrRef: generation {} resolved against generation {}",
            r.generation,
            self.generation
        );
        if r.len == 0 {
            return EMPTY;
        }
        assert!(
            (r.page as usize) < self.pages.len(),
            "foreign StrRef: page {} not in this table",
            r.page
        );
        let page = &self.pages[r.page as usize];
        let end = r.offset + r.len + 1;
        assert!(
            end <= page.used,
            "foreign StrRef: bytes {}..{} were never stored",
            r.offset,
            end
        );
        &page.buf[r.offset..end]
    }
}

impl Default for StringTable {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for StringTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StringTable")
            .field("pages", &self.pages.len())
            .field("page_size", &self.page_size)
            .field("stored_bytes", &self.stored_bytes())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_copies_and_terminates() {
        let src = String::from("hello");
        let mut table = StringTable::new();
        let r = table.store(&src);
        assert_eq!(table.resolve(r), "hello");
        assert_eq!(r.len(), 5);
        assert_eq!(table.resolve_with_nul(r), b"hello\0");
        // The copy is distinct from the input.
        assert_ne!(table.resolve(r).as_ptr(), src.as_ptr());
    }

    #[test]
    fn empty_string_allocates_nothing() {
        let mut table = StringTable::new();
        let r = table.store("");
        assert!(r.is_empty());
        assert_eq!(table.resolve(r), "");
        assert_eq!(table.resolve_with_nul(r), b"\0");
        assert_eq!(table.pages(), 0);
    }

    #[test]
    fn page_size_clamped_to_minimum() {
        let table = StringTable::with_page_size(1);
        assert_eq!(table.page_size(), StringTable::MIN_PAGE_SIZE);
    }

    #[test]
    fn strings_pack_into_one_page() {
        let mut table = StringTable::new();
        let a = table.store("alpha");
        let b = table.store("beta");
        let c = table.store("gamma");
        assert_eq!(table.pages(), 1);
        assert_eq!(table.resolve(a), "alpha");
        assert_eq!(table.resolve(b), "beta");
        assert_eq!(table.resolve(c), "gamma");
        assert_eq!(table.stored_bytes(), 6 + 5 + 6);
    }

    #[test]
    fn oversized_string_gets_its_own_page() {
        let mut table = StringTable::new();
        let small = table.store("tiny");
        let big_src = "x".repeat(StringTable::DEFAULT_PAGE_SIZE * 2);
        let big = table.store(&big_src);
        assert_eq!(table.pages(), 2);
        assert_eq!(table.resolve(big), big_src);
        assert_eq!(table.resolve(small), "tiny");
    }

    #[test]
    fn best_fit_prefers_fuller_pages() {
        let mut table = StringTable::new();
        // Nearly fill the first page, leaving a small gap.
        let filler = "f".repeat(StringTable::DEFAULT_PAGE_SIZE - 16);
        table.store(&filler);
        // Force a second, much emptier page.
        let spill = "s".repeat(64);
        table.store(&spill);
        assert_eq!(table.pages(), 2);
        let bytes_before = table.stored_bytes();

        // A string that fits the small gap must land there (the fuller
        // page), not in the fresh page.
        let r = table.store("gapfit");
        assert_eq!(table.pages(), 2);
        assert_eq!(table.resolve(r), "gapfit");
        assert_eq!(table.stored_bytes(), bytes_before + 7);
    }

    #[test]
    fn earlier_refs_survive_later_stores() {
        let mut table = StringTable::new();
        let originals = ["first", "second", "third", "fourth"];
        let refs: Vec<StrRef> = originals.iter().map(|s| table.store(s)).collect();

        for _ in 0..5000 {
            table.store("churn-a");
            table.store("churn-b");
        }

        for (s, r) in originals.iter().zip(&refs) {
            assert_eq!(table.resolve(*r), *s);
        }
    }

    #[test]
    fn clear_frees_pages_and_bumps_generation() {
        let mut table = StringTable::new();
        let r = table.store("doomed");
        assert_eq!(table.pages(), 1);
        table.clear();
        assert_eq!(table.pages(), 0);
        assert_eq!(table.stored_bytes(), 0);
        assert_ne!(r.generation(), {
            let fresh = table.store("new");
            fresh.generation()
        });
    }

    #[test]
    #[should_panic(expected = "stale StrRef")]
    fn resolving_across_clear_panics() {
        let mut table = StringTable::new();
        let r = table.store("doomed");
        table.clear();
        let _ = table.resolve(r);
    }

    #[test]
    fn reuse_after_clear() {
        let mut table = StringTable::new();
        table.store("before");
        table.clear();
        let r = table.store("after");
        assert_eq!(table.resolve(r), "after");
        assert_eq!(table.pages(), 1);
    }

    #[test]
    #[should_panic(expected = "foreign StrRef")]
    fn ref_with_unknown_page_panics() {
        let mut a = StringTable::new();
        let filler = "f".repeat(StringTable::DEFAULT_PAGE_SIZE - 8);
        a.store(&filler);
        // Too big for the 7-byte gap, so this lands on a second page.
        let second_page = a.store(&"g".repeat(64));
        assert_eq!(a.pages(), 2);

        let mut b = StringTable::new();
        b.store("only");
        let _ = b.resolve(second_page);
    }

    #[test]
    #[should_panic(expected = "never stored")]
    fn ref_past_stored_bytes_panics() {
        let mut a = StringTable::new();
        let long = a.store("a considerably longer string");

        // Same generation, same page index, but b never stored that
        // many bytes: the lookup must refuse instead of reading slack.
        let mut b = StringTable::new();
        b.store("hi");
        let _ = b.resolve(long);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn every_stored_string_resolves_byte_for_byte(
                strings in proptest::collection::vec(".{0,64}", 1..64),
            ) {
                let mut table = StringTable::with_page_size(StringTable::MIN_PAGE_SIZE);
                let refs: Vec<StrRef> = strings.iter().map(|s| table.store(s)).collect();
                for (s, r) in strings.iter().zip(&refs) {
                    prop_assert_eq!(table.resolve(*r), s.as_str());
                    let z = table.resolve_with_nul(*r);
                    prop_assert_eq!(z[z.len() - 1], 0);
                }
            }

            #[test]
            fn pages_stay_sorted_by_remaining_space(
                lens in proptest::collection::vec(1usize..2048, 1..128),
            ) {
                let mut table = StringTable::with_page_size(StringTable::MIN_PAGE_SIZE);
                for len in lens {
                    table.store(&"x".repeat(len));
                    let remains: Vec<usize> = (0..table.order.len())
                        .map(|rank| table.page_at(rank).remain())
                        .collect();
                    prop_assert!(remains.windows(2).all(|w| w[0] >= w[1]));
                }
            }
        }
    }
}
