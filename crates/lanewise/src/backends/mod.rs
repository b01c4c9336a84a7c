//! SIMD backend implementations
//!
//! This module contains the concrete vector and mask types. The portable
//! backends (`scalar`, `generic`) are always compiled so tests can compare
//! against them; the intrinsic backends are gated on their cargo feature and
//! target architecture. Only one backend is *active* per build, see
//! [`ActiveIsa`](crate::ActiveIsa).

/// Compound assignment in terms of the binary operators
macro_rules! impl_assign_ops {
    ([$($gen:tt)*] $t:ty) => {
        impl<$($gen)*> core::ops::AddAssign for $t {
            #[inline(always)]
            fn add_assign(&mut self, rhs: Self) {
                *self = *self + rhs;
            }
        }

        impl<$($gen)*> core::ops::SubAssign for $t {
            #[inline(always)]
            fn sub_assign(&mut self, rhs: Self) {
                *self = *self - rhs;
            }
        }

        impl<$($gen)*> core::ops::MulAssign for $t {
            #[inline(always)]
            fn mul_assign(&mut self, rhs: Self) {
                *self = *self * rhs;
            }
        }

        impl<$($gen)*> core::ops::DivAssign for $t {
            #[inline(always)]
            fn div_assign(&mut self, rhs: Self) {
                *self = *self / rhs;
            }
        }
    };
    ($t:ty) => {
        impl_assign_ops!([] $t);
    };
}

/// `Debug` that prints the lanes instead of the opaque register
#[allow(unused_macros)]
macro_rules! impl_lanes_debug {
    ($($t:ty),* $(,)?) => {
        $(
            impl core::fmt::Debug for $t {
                fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                    f.debug_tuple(stringify!($t)).field(&self.to_array()).finish()
                }
            }
        )*
    };
}

/// `IndexVector` for integer register types
#[allow(unused_macros)]
macro_rules! impl_index_vector {
    ($($t:ty),* $(,)?) => {
        $(
            impl crate::traits::IndexVector for $t {
                const COUNT: usize = <$t as crate::traits::SimdVector>::LANES;

                #[inline(always)]
                fn lane_index(&self, lane: usize) -> usize {
                    crate::element::IntElement::to_offset(
                        crate::traits::SimdVector::extract(*self, lane),
                    )
                }
            }
        )*
    };
}

/// Integer division has no vector instruction on any target; divide lane by
/// lane so a zero divisor panics like the scalar type does
#[allow(unused_macros)]
macro_rules! impl_lanewise_div {
    ($($t:ty),* $(,)?) => {
        $(
            impl core::ops::Div for $t {
                type Output = Self;

                #[inline(always)]
                fn div(self, rhs: Self) -> Self {
                    let (a, b) = (self.to_array(), rhs.to_array());
                    Self::from_array(core::array::from_fn(|i| {
                        crate::element::Element::lane_div(a[i], b[i])
                    }))
                }
            }
        )*
    };
}

// Portable backends (always available)
pub mod generic;
pub mod scalar;

// Platform-specific backends (feature-gated)
#[cfg(all(feature = "sse41", any(target_arch = "x86", target_arch = "x86_64")))]
pub mod sse;

#[cfg(all(feature = "avx2", any(target_arch = "x86", target_arch = "x86_64")))]
pub mod avx2;

#[cfg(all(feature = "neon", target_arch = "aarch64"))]
pub mod neon;
