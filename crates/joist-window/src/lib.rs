//! Circular window buffers addressed by recency.
//!
//! A window buffer holds the last `N` values pushed, where `N` is always
//! a power of two. Index 0 is the most recently pushed value; pushing a
//! new value overwrites the oldest. The power-of-two capacity makes the
//! logical-to-physical mapping a single mask:
//! `physical(i) = (cursor + i) & (capacity - 1)`.
//!
//! - [`WindowBuffer`] — heap-backed, capacity chosen (and rounded up to
//!   a power of two) at construction.
//! - [`StaticWindowBuffer`] — inline storage, capacity a compile-time
//!   constant checked to be a power of two at build time.
//! - [`WindowIter`] — the shared iterator; all position arithmetic is on
//!   unwrapped logical indices, so lengths and reverse iteration behave
//!   as if the storage were flat.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod buffer;
pub mod iter;
pub mod static_buffer;

pub use buffer::WindowBuffer;
pub use iter::WindowIter;
pub use static_buffer::StaticWindowBuffer;
