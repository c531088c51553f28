//! Power-of-two alignment arithmetic.
//!
//! All helpers operate on `usize` values (addresses or offsets) with mask
//! arithmetic, so they are branch-free and usable in `const` contexts.
//! Every function requires `align` to be a power of two; passing anything
//! else produces a meaningless result (debug builds assert).

/// Returns true if `value` is aligned to `align`.
///
/// `align` must be a power of two.
pub const fn is_aligned(value: usize, align: usize) -> bool {
    debug_assert!(align.is_power_of_two());
    value & (align - 1) == 0
}

/// Rounds `value` up to the next multiple of `align`.
///
/// Returns `value` unchanged when it is already aligned.
/// `align` must be a power of two, and `value + align - 1` must not
/// overflow `usize`.
pub const fn align_up(value: usize, align: usize) -> usize {
    debug_assert!(align.is_power_of_two());
    (value + align - 1) & !(align - 1)
}

/// Rounds `value` down to the previous multiple of `align`.
///
/// `align` must be a power of two.
pub const fn align_down(value: usize, align: usize) -> usize {
    debug_assert!(align.is_power_of_two());
    value & !(align - 1)
}

/// Rounds `value` up to the next power of two (`0` and `1` both map to `1`).
///
/// Panics on overflow in debug builds, like
/// [`usize::next_power_of_two`], which this delegates to.
pub const fn ceil_pow2(value: usize) -> usize {
    value.next_power_of_two()
}
