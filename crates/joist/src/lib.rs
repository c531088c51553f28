//! Joist: low-level memory and data-layout primitives.
//!
//! This is the top-level facade crate that re-exports the public API
//! from the Joist sub-crates. For most users, adding `joist` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use joist::{FrameAllocator, StringTable, WindowBuffer};
//!
//! // Bump-allocate from a 4KB frame; no per-object free.
//! let frame = FrameAllocator::new(4096).unwrap();
//! let value = frame.make(42u64).unwrap();
//! assert_eq!(*value, 42);
//! assert_eq!(frame.bytes_used(), 8);
//!
//! // Intern strings; copies live until clear().
//! let mut names = StringTable::new();
//! let hello = names.store("hello");
//! assert_eq!(names.resolve(hello), "hello");
//!
//! // Keep the last 8 samples, most recent first.
//! let mut window: WindowBuffer<f32> = WindowBuffer::new(8);
//! window.push_front(1.5);
//! assert_eq!(window[0], 1.5);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for items not
//! re-exported at the root:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`base`] | `joist-core` | Views, alignment arithmetic |
//! | [`mem`] | `joist-alloc` | Frame, pool, and string allocators |
//! | [`window`] | `joist-window` | Circular window buffers |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub use joist_alloc as mem;
pub use joist_core as base;
pub use joist_window as window;

pub use joist_alloc::{
    AllocError, FrameAllocator, FrameBox, MakeError, PagedPool, PoolKey, StrRef, StringTable,
};
pub use joist_core::{is_overlap, is_same, is_subset, slice, slice_trunc, StaticView, View};
pub use joist_window::{StaticWindowBuffer, WindowBuffer, WindowIter};
