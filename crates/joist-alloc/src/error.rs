//! Allocator error types.

use std::error::Error;
use std::fmt;

/// Errors that can occur during allocation.
///
/// Precondition violations (bad indices, foreign pointers, misuse after
/// `clear`) are panics, not errors; this enum covers the two runtime
/// conditions a caller may want to recover from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AllocError {
    /// A frame allocation would run past the end of the frame's block.
    ///
    /// The failed attempt consumes no space; the frame stays valid.
    Overflow {
        /// Number of bytes requested.
        requested: usize,
        /// Requested alignment.
        align: usize,
        /// Bytes still free in the frame before alignment padding.
        free: usize,
    },
    /// The system allocator could not satisfy a request.
    OutOfMemory {
        /// Number of bytes requested.
        size: usize,
        /// Requested alignment.
        align: usize,
    },
    /// The requested size and alignment cannot form a valid layout
    /// (the rounded-up size would overflow `isize`).
    ///
    /// Unlike [`AllocError::OutOfMemory`] this is a bad request, not
    /// exhaustion; no allocation was attempted.
    InvalidLayout {
        /// Number of bytes requested.
        size: usize,
        /// Requested alignment.
        align: usize,
    },
}

impl fmt::Display for AllocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Overflow {
                requested,
                align,
                free,
            } => {
                write!(
                    f,
                    "frame overflow: requested {requested} bytes (align {align}), {free} bytes free"
                )
            }
            Self::OutOfMemory { size, align } => {
                write!(f, "out of memory: requested {size} bytes (align {align})")
            }
            Self::InvalidLayout { size, align } => {
                write!(
                    f,
                    "invalid layout: {size} bytes (align {align}) overflows the address space"
                )
            }
        }
    }
}

impl Error for AllocError {}

/// Failure of an allocate-then-initialize operation.
///
/// Either the allocation itself failed, or the caller-supplied
/// initializer did — in which case the allocator's bookkeeping has
/// already been rolled back to its pre-call state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MakeError<E> {
    /// The underlying allocation failed.
    Alloc(AllocError),
    /// The initializer returned an error; the allocation was rewound.
    Init(E),
}

impl<E: fmt::Display> fmt::Display for MakeError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Alloc(e) => write!(f, "allocation failed: {e}"),
            Self::Init(e) => write!(f, "initialization failed: {e}"),
        }
    }
}

impl<E: fmt::Debug + fmt::Display> Error for MakeError<E> {}

impl<E> From<AllocError> for MakeError<E> {
    fn from(e: AllocError) -> Self {
        Self::Alloc(e)
    }
}
