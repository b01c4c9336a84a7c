//! Cache hints for vector loops
//!
//! Prefetches tell the memory system which line a loop will touch next. They
//! never fault and never dereference the pointer, so it is fine to prefetch
//! past the end of a buffer:
//!
//! ```rust
//! use lanewise::hints;
//!
//! let data = [0.0f32; 64];
//! for i in (0..data.len()).step_by(16) {
//!     hints::prefetch_mid(data.as_ptr().wrapping_add(i + 32));
//!     // ... process data[i..i + 16]
//! }
//! ```
//!
//! On targets without a prefetch instruction every hint is a no-op.
//!
//! | hint                    | x86            | aarch64      |
//! |-------------------------|----------------|--------------|
//! | `prefetch_for_one_read` | `prefetchnta`  | `pldl1strm`  |
//! | `prefetch_for_modify`   | `prefetchw`    | `pstl1keep`  |
//! | `prefetch_close`        | `prefetcht0`   | `pldl1keep`  |
//! | `prefetch_mid`          | `prefetcht1`   | `pldl2keep`  |
//! | `prefetch_far`          | `prefetcht2`   | `pldl3keep`  |

#[cfg(target_arch = "x86")]
use core::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use core::arch::x86_64::*;

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
macro_rules! x86_prefetch {
    ($ptr:expr, $hint:ident) => {
        // SAFETY: prefetch never faults, whatever the address
        unsafe { _mm_prefetch::<$hint>($ptr.cast::<i8>()) }
    };
}

#[cfg(target_arch = "aarch64")]
macro_rules! arm_prefetch {
    ($ptr:expr, $op:literal) => {
        // SAFETY: prfm never faults and touches no architectural state
        unsafe {
            core::arch::asm!(
                concat!("prfm ", $op, ", [{p}]"),
                p = in(reg) $ptr,
                options(nostack, readonly, preserves_flags)
            )
        }
    };
}

/// The data at `ptr` will be read once and should not displace cached data
#[inline(always)]
pub fn prefetch_for_one_read<T>(ptr: *const T) {
    #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
    x86_prefetch!(ptr, _MM_HINT_NTA);
    #[cfg(target_arch = "aarch64")]
    arm_prefetch!(ptr, "pldl1strm");
    #[cfg(not(any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64")))]
    let _ = ptr;
}

/// The data at `ptr` will be written soon
#[inline(always)]
pub fn prefetch_for_modify<T>(ptr: *const T) {
    #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
    x86_prefetch!(ptr, _MM_HINT_ET0);
    #[cfg(target_arch = "aarch64")]
    arm_prefetch!(ptr, "pstl1keep");
    #[cfg(not(any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64")))]
    let _ = ptr;
}

/// Fetch into the innermost cache level; use for the next few iterations
#[inline(always)]
pub fn prefetch_close<T>(ptr: *const T) {
    #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
    x86_prefetch!(ptr, _MM_HINT_T0);
    #[cfg(target_arch = "aarch64")]
    arm_prefetch!(ptr, "pldl1keep");
    #[cfg(not(any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64")))]
    let _ = ptr;
}

/// Fetch into the second cache level
#[inline(always)]
pub fn prefetch_mid<T>(ptr: *const T) {
    #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
    x86_prefetch!(ptr, _MM_HINT_T1);
    #[cfg(target_arch = "aarch64")]
    arm_prefetch!(ptr, "pldl2keep");
    #[cfg(not(any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64")))]
    let _ = ptr;
}

/// Fetch into the outermost cache level
#[inline(always)]
pub fn prefetch_far<T>(ptr: *const T) {
    #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
    x86_prefetch!(ptr, _MM_HINT_T2);
    #[cfg(target_arch = "aarch64")]
    arm_prefetch!(ptr, "pldl3keep");
    #[cfg(not(any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64")))]
    let _ = ptr;
}

/// Order earlier streaming stores before any later store
///
/// Call once after a loop of [`SimdVector::store_streaming`] and before
/// another thread may read the data.
///
/// [`SimdVector::store_streaming`]: crate::SimdVector::store_streaming
#[inline(always)]
pub fn streaming_fence() {
    #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
    // SAFETY: sfence has no preconditions
    unsafe {
        _mm_sfence()
    };

    #[cfg(not(any(target_arch = "x86", target_arch = "x86_64")))]
    core::sync::atomic::fence(core::sync::atomic::Ordering::Release);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hints_accept_any_address() {
        let data = [1.0f64; 8];
        let ptr = data.as_ptr();

        prefetch_for_one_read(ptr);
        prefetch_for_modify(ptr);
        prefetch_close(ptr.wrapping_add(4));
        prefetch_mid(ptr.wrapping_add(1 << 20));
        prefetch_far(core::ptr::null::<u8>());
        streaming_fence();

        assert_eq!(data, [1.0; 8]);
    }
}
