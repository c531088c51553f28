//! Core data-layout primitives for the Joist memory library.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the non-owning view types used throughout the Joist workspace and
//! the alignment arithmetic the allocators are built on:
//!
//! - [`View`] — a copyable window over a dynamic-length contiguous range.
//! - [`StaticView`] — a window whose length is part of its type, with
//!   compile-time-checked sub-view operations.
//! - [`align`] — mask-based power-of-two alignment helpers.
//!
//! Views never own the memory they describe; lifetime management stays
//! with the referenced storage. All relation predicates on views
//! ([`is_subset`], [`is_overlap`], [`is_same`]) are pointer-range
//! comparisons, not content comparisons.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod align;
pub mod static_view;
pub mod view;

pub use static_view::StaticView;
pub use view::{is_overlap, is_same, is_subset, slice, slice_trunc, View};
