//! Scalar element types that can populate vector lanes
//!
//! `Element` is sealed: the backends rely on every element being a plain
//! number whose all-zero bit pattern is a valid value, which is what lets
//! [`Memory`](crate::memory::Memory) hand out zero-initialised padding.
//!
//! Lane arithmetic on integers wraps, matching what every SIMD instruction
//! set does and what release-mode Rust does for the scalar type. Integer
//! division by zero panics on every backend, because all of them divide
//! lane by lane through [`Element::lane_div`].

use core::fmt::Debug;

mod private {
    pub trait Sealed {}

    impl Sealed for f32 {}
    impl Sealed for f64 {}
    impl Sealed for i32 {}
    impl Sealed for u32 {}
}

/// A scalar type that can be stored in a vector lane
pub trait Element:
    Copy + Default + Debug + PartialEq + PartialOrd + Send + Sync + 'static + private::Sealed
{
    /// Additive identity
    const ZERO: Self;

    /// Multiplicative identity
    const ONE: Self;

    /// Convert a lane number into an element (`indexes_from_zero`)
    fn from_lane_index(index: usize) -> Self;

    /// Lane-wise addition (wrapping for integers)
    fn lane_add(self, rhs: Self) -> Self;

    /// Lane-wise subtraction (wrapping for integers)
    fn lane_sub(self, rhs: Self) -> Self;

    /// Lane-wise multiplication (wrapping for integers)
    fn lane_mul(self, rhs: Self) -> Self;

    /// Lane-wise division
    ///
    /// # Panics
    ///
    /// Integer division by zero panics.
    fn lane_div(self, rhs: Self) -> Self;

    /// Lane-wise negation (wrapping for integers)
    fn lane_neg(self) -> Self;

    /// `if self < rhs { self } else { rhs }`
    ///
    /// This exact formula is the contract: it is what `minps` computes,
    /// including the NaN and signed-zero cases, so every backend agrees.
    #[inline(always)]
    fn lane_min(self, rhs: Self) -> Self {
        if self < rhs {
            self
        } else {
            rhs
        }
    }

    /// `if self > rhs { self } else { rhs }`
    #[inline(always)]
    fn lane_max(self, rhs: Self) -> Self {
        if self > rhs {
            self
        } else {
            rhs
        }
    }
}

/// Floating-point elements (`f32`, `f64`)
pub trait FloatElement: Element {
    /// Absolute value (clears the sign bit)
    fn lane_abs(self) -> Self;

    /// Correctly rounded square root
    fn lane_sqrt(self) -> Self;

    /// Round toward negative infinity
    fn lane_floor(self) -> Self;

    /// Round toward positive infinity
    fn lane_ceil(self) -> Self;

    /// Fused multiply-add `self * b + c` with a single rounding
    fn lane_mul_add(self, b: Self, c: Self) -> Self;
}

/// Integer elements (`i32`, `u32`)
pub trait IntElement: Element + Eq + Ord {
    /// Bitwise AND
    fn lane_and(self, rhs: Self) -> Self;

    /// Bitwise OR
    fn lane_or(self, rhs: Self) -> Self;

    /// Bitwise XOR
    fn lane_xor(self, rhs: Self) -> Self;

    /// Bitwise NOT
    fn lane_not(self) -> Self;

    /// Left shift, count taken modulo the bit width
    fn lane_shl(self, count: u32) -> Self;

    /// Right shift (arithmetic for signed, logical for unsigned), count
    /// taken modulo the bit width
    fn lane_shr(self, count: u32) -> Self;

    /// Convert an index lane into a memory offset
    ///
    /// Negative values map to `usize::MAX` so they fail the bounds check.
    fn to_offset(self) -> usize;
}

macro_rules! impl_float_element {
    ($t:ty, $abs:path, $sqrt:path, $floor:path, $ceil:path, $fma:path) => {
        impl Element for $t {
            const ZERO: Self = 0.0;
            const ONE: Self = 1.0;

            #[inline(always)]
            fn from_lane_index(index: usize) -> Self {
                index as $t
            }

            #[inline(always)]
            fn lane_add(self, rhs: Self) -> Self {
                self + rhs
            }

            #[inline(always)]
            fn lane_sub(self, rhs: Self) -> Self {
                self - rhs
            }

            #[inline(always)]
            fn lane_mul(self, rhs: Self) -> Self {
                self * rhs
            }

            #[inline(always)]
            fn lane_div(self, rhs: Self) -> Self {
                self / rhs
            }

            #[inline(always)]
            fn lane_neg(self) -> Self {
                -self
            }
        }

        impl FloatElement for $t {
            #[inline(always)]
            fn lane_abs(self) -> Self {
                $abs(self)
            }

            #[inline(always)]
            fn lane_sqrt(self) -> Self {
                $sqrt(self)
            }

            #[inline(always)]
            fn lane_floor(self) -> Self {
                $floor(self)
            }

            #[inline(always)]
            fn lane_ceil(self) -> Self {
                $ceil(self)
            }

            #[inline(always)]
            fn lane_mul_add(self, b: Self, c: Self) -> Self {
                $fma(self, b, c)
            }
        }
    };
}

impl_float_element!(f32, libm::fabsf, libm::sqrtf, libm::floorf, libm::ceilf, libm::fmaf);
impl_float_element!(f64, libm::fabs, libm::sqrt, libm::floor, libm::ceil, libm::fma);

macro_rules! impl_int_element {
    ($t:ty) => {
        impl Element for $t {
            const ZERO: Self = 0;
            const ONE: Self = 1;

            #[inline(always)]
            fn from_lane_index(index: usize) -> Self {
                index as $t
            }

            #[inline(always)]
            fn lane_add(self, rhs: Self) -> Self {
                self.wrapping_add(rhs)
            }

            #[inline(always)]
            fn lane_sub(self, rhs: Self) -> Self {
                self.wrapping_sub(rhs)
            }

            #[inline(always)]
            fn lane_mul(self, rhs: Self) -> Self {
                self.wrapping_mul(rhs)
            }

            #[inline(always)]
            fn lane_div(self, rhs: Self) -> Self {
                self.wrapping_div(rhs)
            }

            #[inline(always)]
            fn lane_neg(self) -> Self {
                self.wrapping_neg()
            }
        }

        impl IntElement for $t {
            #[inline(always)]
            fn lane_and(self, rhs: Self) -> Self {
                self & rhs
            }

            #[inline(always)]
            fn lane_or(self, rhs: Self) -> Self {
                self | rhs
            }

            #[inline(always)]
            fn lane_xor(self, rhs: Self) -> Self {
                self ^ rhs
            }

            #[inline(always)]
            fn lane_not(self) -> Self {
                !self
            }

            #[inline(always)]
            fn lane_shl(self, count: u32) -> Self {
                self.wrapping_shl(count)
            }

            #[inline(always)]
            fn lane_shr(self, count: u32) -> Self {
                self.wrapping_shr(count)
            }

            #[inline(always)]
            fn to_offset(self) -> usize {
                usize::try_from(self).unwrap_or(usize::MAX)
            }
        }
    };
}

impl_int_element!(i32);
impl_int_element!(u32);
