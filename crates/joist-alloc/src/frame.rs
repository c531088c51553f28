//! Bump-pointer frame allocator.
//!
//! A [`FrameAllocator`] owns exactly one contiguous block, requested from
//! the system allocator at construction and released on drop. `alloc`
//! advances a cursor monotonically; individual allocations can never be
//! freed. The only ways to reclaim space are [`FrameAllocator::reset`]
//! (which requires exclusive access, so no handles can be outstanding)
//! and dropping the frame.
//!
//! [`FrameAllocator::try_make_with`] is the one place with a
//! partial-failure guarantee: if the initializer fails, the cursor is
//! rewound to its pre-call value before the error propagates, so the
//! otherwise-unreclaimable bytes become available for reuse.

use std::alloc::Layout;
use std::cell::Cell;
use std::fmt;
use std::marker::PhantomData;
use std::mem;
use std::ops::{Deref, DerefMut};
use std::ptr::NonNull;

use joist_core::align::align_up;

use crate::error::{AllocError, MakeError};
use crate::sys;

/// Alignment of the frame's block: large enough for any scalar type.
pub const FRAME_ALIGN: usize = 16;

/// A bump-pointer arena over one fixed-size block.
///
/// Move-only (no `Clone`); the block has a single owner. `alloc` and
/// `make` take `&self` so many live [`FrameBox`] handles can coexist;
/// the cursor lives in a `Cell`, which keeps the type `!Sync` — one
/// frame is never shared across threads without external ownership
/// transfer.
pub struct FrameAllocator {
    data: NonNull<u8>,
    capacity: usize,
    /// Byte offset of the allocated/free boundary. Invariant:
    /// `next <= capacity`.
    next: Cell<usize>,
}

// SAFETY: the frame exclusively owns its block; moving it to another
// thread moves the only handle to that block. `Cell` keeps it !Sync.
unsafe impl Send for FrameAllocator {}

impl FrameAllocator {
    /// Creates a frame of `frame_bytes` capacity.
    ///
    /// A zero-byte frame performs no system allocation and stays inert:
    /// every non-trivial `alloc` on it overflows.
    pub fn new(frame_bytes: usize) -> Result<Self, AllocError> {
        if frame_bytes == 0 {
            return Ok(Self {
                data: NonNull::dangling(),
                capacity: 0,
                next: Cell::new(0),
            });
        }
        let layout = Layout::from_size_align(frame_bytes, FRAME_ALIGN).map_err(|_| {
            AllocError::InvalidLayout {
                size: frame_bytes,
                align: FRAME_ALIGN,
            }
        })?;
        let data = sys::allocate(layout)?;
        Ok(Self {
            data,
            capacity: frame_bytes,
            next: Cell::new(0),
        })
    }

    /// Allocates `size` bytes aligned to `align` from the frame.
    ///
    /// Alignment padding is absorbed silently. On overflow the cursor is
    /// left untouched and the frame remains usable. `align` must be a
    /// power of two.
    pub fn alloc(&self, size: usize, align: usize) -> Result<NonNull<u8>, AllocError> {
        debug_assert!(align.is_power_of_two());
        let base = self.data.as_ptr() as usize;
        // Align the absolute address, not the offset, so alignments
        // larger than FRAME_ALIGN still come out right.
        let start = align_up(base + self.next.get(), align) - base;
        let end = match start.checked_add(size) {
            Some(end) if end <= self.capacity => end,
            _ => {
                return Err(AllocError::Overflow {
                    requested: size,
                    align,
                    free: self.bytes_free(),
                })
            }
        };
        self.next.set(end);
        // SAFETY: start + size <= capacity, and the block outlives &self.
        Ok(unsafe { NonNull::new_unchecked(self.data.as_ptr().add(start)) })
    }

    /// Allocates storage for a `T` and moves `value` into it.
    ///
    /// The returned [`FrameBox`] runs `T`'s destructor when dropped but
    /// never reclaims the frame bytes.
    pub fn make<T>(&self, value: T) -> Result<FrameBox<'_, T>, AllocError> {
        let ptr = self.alloc(mem::size_of::<T>(), mem::align_of::<T>())?.cast::<T>();
        // SAFETY: ptr is valid for writes of T and properly aligned.
        unsafe { ptr.as_ptr().write(value) };
        Ok(FrameBox {
            ptr,
            _marker: PhantomData,
        })
    }

    /// Allocates storage for a `T`, then runs the fallible initializer.
    ///
    /// If `init` returns an error (or panics), the cursor is rewound to
    /// its pre-call value before the failure propagates:
    /// `bytes_used`/`bytes_free` are exactly what they were before the
    /// call.
    pub fn try_make_with<T, E, F>(&self, init: F) -> Result<FrameBox<'_, T>, MakeError<E>>
    where
        F: FnOnce() -> Result<T, E>,
    {
        let saved = self.next.get();
        let ptr = self
            .alloc(mem::size_of::<T>(), mem::align_of::<T>())?
            .cast::<T>();

        let mut rewind = Rewind::new(&self.next, saved);
        let value = init().map_err(MakeError::Init)?;
        // SAFETY: ptr is valid for writes of T and properly aligned.
        unsafe { ptr.as_ptr().write(value) };
        rewind.dismiss();

        Ok(FrameBox {
            ptr,
            _marker: PhantomData,
        })
    }

    /// Total capacity of the frame in bytes.
    pub fn frame_bytes(&self) -> usize {
        self.capacity
    }

    /// Bytes consumed so far, alignment padding included.
    pub fn bytes_used(&self) -> usize {
        self.next.get()
    }

    /// Bytes still available.
    pub fn bytes_free(&self) -> usize {
        self.capacity - self.next.get()
    }

    /// Rewinds the cursor to the start of the block without freeing it.
    ///
    /// Requires `&mut self`, so no [`FrameBox`] into this frame can be
    /// outstanding.
    pub fn reset(&mut self) {
        self.next.set(0);
    }
}

impl Drop for FrameAllocator {
    fn drop(&mut self) {
        if self.capacity != 0 {
            let layout = Layout::from_size_align(self.capacity, FRAME_ALIGN)
                .expect("layout validated at construction");
            // SAFETY: data/layout are exactly what construction used.
            unsafe { sys::deallocate(self.data, layout) };
        }
    }
}

impl fmt::Debug for FrameAllocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameAllocator")
            .field("frame_bytes", &self.capacity)
            .field("bytes_used", &self.bytes_used())
            .finish()
    }
}

/// Rewinds the frame cursor on drop unless dismissed.
struct Rewind<'a> {
    next: &'a Cell<usize>,
    to: usize,
    armed: bool,
}

impl<'a> Rewind<'a> {
    fn new(next: &'a Cell<usize>, to: usize) -> Self {
        Self {
            next,
            to,
            armed: true,
        }
    }

    fn dismiss(&mut self) {
        self.armed = false;
    }
}

impl Drop for Rewind<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.next.set(self.to);
        }
    }
}

/// Single-owner handle to a `T` placed in a [`FrameAllocator`].
///
/// Dropping the box runs `T`'s destructor only — a frame has no per-object
/// free, so the bytes stay allocated until the frame is reset or dropped.
pub struct FrameBox<'f, T> {
    ptr: NonNull<T>,
    _marker: PhantomData<(&'f FrameAllocator, T)>,
}

impl<T> Deref for FrameBox<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        // SAFETY: ptr points to a live T for the life of this box.
        unsafe { self.ptr.as_ref() }
    }
}

impl<T> DerefMut for FrameBox<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        // SAFETY: ptr points to a live T, and this box is its only owner.
        unsafe { self.ptr.as_mut() }
    }
}

impl<T> Drop for FrameBox<'_, T> {
    fn drop(&mut self) {
        // SAFETY: ptr points to a live T this box owns. The storage
        // itself belongs to the frame and is not reclaimed here.
        unsafe { self.ptr.as_ptr().drop_in_place() };
    }
}

impl<T: fmt::Debug> fmt::Debug for FrameBox<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&**self, f)
    }
}
