//! Load/store alignment tiers and the checks that guard them
//!
//! The tier is chosen with a zero-sized flag type so the dispatch in
//! [`SimdVector::load`](crate::SimdVector::load) folds away at compile time.

/// Alignment tier of a load or store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessMode {
    /// Address is a multiple of the vector width in bytes
    Aligned,
    /// Any address
    Unaligned,
    /// Aligned, and the data should bypass the cache where supported
    Streaming,
}

/// Flag type selecting an [`AccessMode`]
pub trait LoadStoreFlag: Copy {
    /// The tier this flag selects
    const MODE: AccessMode;
}

/// Aligned access
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Aligned;

/// Unaligned access
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Unaligned;

/// Non-temporal access (aligned)
///
/// Streaming stores are weakly ordered on x86; call
/// [`streaming_fence`](crate::hints::streaming_fence) before another thread
/// reads the data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Streaming;

impl LoadStoreFlag for Aligned {
    const MODE: AccessMode = AccessMode::Aligned;
}

impl LoadStoreFlag for Unaligned {
    const MODE: AccessMode = AccessMode::Unaligned;
}

impl LoadStoreFlag for Streaming {
    const MODE: AccessMode = AccessMode::Streaming;
}

/// Panics unless the slice holds at least `lanes` elements
///
/// Always on: a short slice would make the wide access read out of bounds.
#[inline(always)]
#[track_caller]
pub(crate) fn check_len(len: usize, lanes: usize) {
    if len < lanes {
        crate::error::index_out_of_range(lanes - 1, len);
    }
}

/// Panics with an alignment violation in debug builds; compiled out in release
#[inline(always)]
#[track_caller]
pub(crate) fn debug_check_alignment<T>(ptr: *const T, required: usize) {
    #[cfg(debug_assertions)]
    {
        let addr = ptr as usize;
        if addr % required != 0 {
            crate::error::alignment_violation(addr, required);
        }
    }

    #[cfg(not(debug_assertions))]
    {
        let _ = (ptr, required);
    }
}
