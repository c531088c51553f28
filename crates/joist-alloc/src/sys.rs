//! System-allocator boundary.
//!
//! A thin pass-through to the host allocator. Allocation failure is
//! reported as [`AllocError::OutOfMemory`] instead of aborting, so the
//! paged allocators can propagate exhaustion to their callers.
//!
//! Zero-size layouts are a caller error; every allocator in this crate
//! special-cases empty requests before reaching this boundary.

use std::alloc::Layout;
use std::ptr::NonNull;

use crate::error::AllocError;

/// Allocates a block for `layout` from the host allocator.
///
/// The returned pointer is aligned to at least `layout.align()`. The
/// block must later be released with [`deallocate`] using the same
/// layout.
///
/// # Panics
///
/// Panics in debug builds if `layout.size() == 0`.
pub fn allocate(layout: Layout) -> Result<NonNull<u8>, AllocError> {
    debug_assert!(layout.size() > 0, "zero-size allocation request");
    // SAFETY: layout has non-zero size.
    let ptr = unsafe { std::alloc::alloc(layout) };
    NonNull::new(ptr).ok_or(AllocError::OutOfMemory {
        size: layout.size(),
        align: layout.align(),
    })
}

/// Returns a block to the host allocator.
///
/// # Safety
///
/// `ptr` must have been returned by [`allocate`] with this exact
/// `layout`, and must not be used afterwards.
pub unsafe fn deallocate(ptr: NonNull<u8>, layout: Layout) {
    // SAFETY: forwarded preconditions.
    unsafe { std::alloc::dealloc(ptr.as_ptr(), layout) };
}
