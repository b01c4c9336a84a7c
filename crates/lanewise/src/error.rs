//! Error taxonomy
//!
//! Index and alignment faults are programming errors and panic. The panic
//! message is always the `Display` of the matching [`Error`] variant, so a
//! `try_*` accessor that returns the error and its panicking sibling report
//! the same text.

use thiserror::Error;

/// Errors reported by vector, mask and memory operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// A scalar, lane or chunk index is past the end
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange {
        /// Requested index
        index: usize,
        /// Number of valid positions
        len: usize,
    },

    /// A shifted vector window leaves the padded allocation
    #[error("vector window starting at {start} with {lanes} lanes exceeds padded length {padded_len}")]
    WindowOutOfRange {
        /// First element of the window (may be negative)
        start: isize,
        /// Window width
        lanes: usize,
        /// Allocated element count
        padded_len: usize,
    },

    /// An aligned or streaming access got a misaligned address
    #[error("address {addr:#x} is not aligned to {required} bytes")]
    AlignmentViolation {
        /// Offending address
        addr: usize,
        /// Required alignment in bytes
        required: usize,
    },

    /// The padded allocation size does not fit in `isize`
    #[error("capacity overflow allocating {len} elements")]
    CapacityOverflow {
        /// Requested element count
        len: usize,
    },

    /// The running CPU lacks the instruction set the crate was built for
    #[error("the running CPU does not support the compiled {backend} backend")]
    UnsupportedCpu {
        /// Backend name (`Isa::NAME`)
        backend: &'static str,
    },
}

/// Result alias used by the fallible accessors
pub type Result<T> = core::result::Result<T, Error>;

#[cold]
#[inline(never)]
#[track_caller]
pub(crate) fn index_out_of_range(index: usize, len: usize) -> ! {
    panic!("{}", Error::IndexOutOfRange { index, len })
}

#[cfg(debug_assertions)]
#[cold]
#[inline(never)]
#[track_caller]
pub(crate) fn alignment_violation(addr: usize, required: usize) -> ! {
    panic!("{}", Error::AlignmentViolation { addr, required })
}

#[cold]
#[inline(never)]
#[track_caller]
pub(crate) fn raise(error: Error) -> ! {
    panic!("{}", error)
}

/// Panics unless `index < len`
#[inline(always)]
#[track_caller]
pub(crate) fn check_index(index: usize, len: usize) {
    if index >= len {
        index_out_of_range(index, len);
    }
}
