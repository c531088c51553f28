//! Allocators for the Joist memory primitives.
//!
//! Three single-owner, non-concurrent allocation strategies over one
//! thin system-allocator boundary:
//!
//! - [`FrameAllocator`] — bump-pointer arena over one fixed block; no
//!   per-object free, whole-frame reclaim only.
//! - [`PagedPool`] — fixed-size slots for one type, grown in pages on
//!   demand, recycled through an index-threaded free list.
//! - [`StringTable`] — append-only interning arena for read-only strings
//!   with best-fit page placement and bulk clear.
//!
//! This is the one crate in the workspace that may contain `unsafe`
//! code; it is confined to the frame allocator's block management.
//! Everything else in the workspace forbids `unsafe` outright.
//!
//! None of these types lock or use atomics. Sharing one instance across
//! threads without external synchronization is ruled out by the borrow
//! rules (`&mut` operations, non-`Sync` interior state).

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_op_in_unsafe_fn)]

pub mod error;
pub mod frame;
pub mod pool;
pub mod strtab;
pub mod sys;

pub use error::{AllocError, MakeError};
pub use frame::{FrameAllocator, FrameBox};
pub use pool::{PagedPool, PoolKey};
pub use strtab::{StrRef, StringTable};
