//! Scalar backend implementation
//!
//! This backend provides a scalar (non-SIMD) fallback that always works on any platform.
//! It serves as the reference implementation and is useful for testing backend consistency:
//! every lane operation of every other backend must agree with what this one does to a
//! single element.

use core::ops::{Add, BitAnd, BitOr, BitXor, Div, Mul, Neg, Not, Shl, Shr, Sub};

use crate::access::{check_len, debug_check_alignment};
use crate::element::{Element, FloatElement, IntElement};
use crate::error;
use crate::traits::{IndexVector, SimdFloat, SimdInt, SimdMask, SimdVector};

/// Scalar vector wrapper (single-lane SIMD)
///
/// This wraps a single scalar value to implement the SimdVector trait,
/// providing a fallback when SIMD is not available or desired.
#[derive(Debug, Copy, Clone, PartialEq)]
#[repr(transparent)]
pub struct ScalarVector<T>(pub T);

/// Scalar mask wrapper (single boolean)
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[repr(transparent)]
pub struct ScalarMask(pub bool);

impl SimdMask for ScalarMask {
    type Array = [bool; 1];

    const LANES: usize = 1;

    #[inline(always)]
    fn splat(value: bool) -> Self {
        ScalarMask(value)
    }

    #[inline(always)]
    fn from_array(lanes: [bool; 1]) -> Self {
        ScalarMask(lanes[0])
    }

    #[inline(always)]
    fn to_array(self) -> [bool; 1] {
        [self.0]
    }

    #[inline(always)]
    fn to_bitmask(self) -> u64 {
        u64::from(self.0)
    }

    #[inline(always)]
    fn all(self) -> bool {
        self.0
    }

    #[inline(always)]
    fn any(self) -> bool {
        self.0
    }

    #[inline(always)]
    fn none(self) -> bool {
        !self.0
    }

    #[inline(always)]
    fn not(self) -> Self {
        !self
    }
}

impl BitAnd for ScalarMask {
    type Output = Self;

    #[inline(always)]
    fn bitand(self, rhs: Self) -> Self {
        ScalarMask(self.0 & rhs.0)
    }
}

impl BitOr for ScalarMask {
    type Output = Self;

    #[inline(always)]
    fn bitor(self, rhs: Self) -> Self {
        ScalarMask(self.0 | rhs.0)
    }
}

impl BitXor for ScalarMask {
    type Output = Self;

    #[inline(always)]
    fn bitxor(self, rhs: Self) -> Self {
        ScalarMask(self.0 ^ rhs.0)
    }
}

impl Not for ScalarMask {
    type Output = Self;

    #[inline(always)]
    fn not(self) -> Self {
        ScalarMask(!self.0)
    }
}

impl<T: Element> SimdVector for ScalarVector<T> {
    type Scalar = T;
    type Mask = ScalarMask;
    type Array = [T; 1];

    const LANES: usize = 1;

    #[inline(always)]
    fn splat(value: T) -> Self {
        ScalarVector(value)
    }

    #[inline(always)]
    fn indexes_from_zero() -> Self {
        ScalarVector(T::ZERO)
    }

    #[inline(always)]
    fn from_array(lanes: [T; 1]) -> Self {
        ScalarVector(lanes[0])
    }

    #[inline(always)]
    fn to_array(self) -> [T; 1] {
        [self.0]
    }

    #[inline(always)]
    #[track_caller]
    fn load_unaligned(slice: &[T]) -> Self {
        check_len(slice.len(), Self::LANES);
        ScalarVector(slice[0])
    }

    #[inline(always)]
    #[track_caller]
    fn load_aligned(slice: &[T]) -> Self {
        check_len(slice.len(), Self::LANES);
        debug_check_alignment(slice.as_ptr(), Self::ALIGN);
        ScalarVector(slice[0])
    }

    #[inline(always)]
    #[track_caller]
    fn store_unaligned(self, slice: &mut [T]) {
        check_len(slice.len(), Self::LANES);
        slice[0] = self.0;
    }

    #[inline(always)]
    #[track_caller]
    fn store_aligned(self, slice: &mut [T]) {
        check_len(slice.len(), Self::LANES);
        debug_check_alignment(slice.as_ptr(), Self::ALIGN);
        slice[0] = self.0;
    }

    #[inline(always)]
    #[track_caller]
    fn store_masked(self, slice: &mut [T], mask: ScalarMask) {
        check_len(slice.len(), Self::LANES);
        if mask.0 {
            slice[0] = self.0;
        }
    }

    #[inline(always)]
    fn cmp_eq(self, rhs: Self) -> ScalarMask {
        ScalarMask(self.0 == rhs.0)
    }

    #[inline(always)]
    fn cmp_ne(self, rhs: Self) -> ScalarMask {
        ScalarMask(self.0 != rhs.0)
    }

    #[inline(always)]
    fn cmp_lt(self, rhs: Self) -> ScalarMask {
        ScalarMask(self.0 < rhs.0)
    }

    #[inline(always)]
    fn cmp_le(self, rhs: Self) -> ScalarMask {
        ScalarMask(self.0 <= rhs.0)
    }

    #[inline(always)]
    fn cmp_gt(self, rhs: Self) -> ScalarMask {
        ScalarMask(self.0 > rhs.0)
    }

    #[inline(always)]
    fn cmp_ge(self, rhs: Self) -> ScalarMask {
        ScalarMask(self.0 >= rhs.0)
    }

    #[inline(always)]
    fn min(self, rhs: Self) -> Self {
        ScalarVector(self.0.lane_min(rhs.0))
    }

    #[inline(always)]
    fn max(self, rhs: Self) -> Self {
        ScalarVector(self.0.lane_max(rhs.0))
    }

    #[inline(always)]
    fn select(mask: ScalarMask, true_val: Self, false_val: Self) -> Self {
        if mask.0 {
            true_val
        } else {
            false_val
        }
    }

    #[inline(always)]
    fn horizontal_sum(self) -> T {
        self.0
    }

    #[inline(always)]
    fn horizontal_product(self) -> T {
        self.0
    }

    #[inline(always)]
    fn horizontal_min(self) -> T {
        self.0
    }

    #[inline(always)]
    fn horizontal_max(self) -> T {
        self.0
    }

    #[inline(always)]
    fn reversed(self) -> Self {
        self
    }

    #[inline(always)]
    fn rotated(self, _amount: usize) -> Self {
        self
    }
}

impl<T: Element> Add for ScalarVector<T> {
    type Output = Self;

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        ScalarVector(self.0.lane_add(rhs.0))
    }
}

impl<T: Element> Sub for ScalarVector<T> {
    type Output = Self;

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        ScalarVector(self.0.lane_sub(rhs.0))
    }
}

impl<T: Element> Mul for ScalarVector<T> {
    type Output = Self;

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        ScalarVector(self.0.lane_mul(rhs.0))
    }
}

impl<T: Element> Div for ScalarVector<T> {
    type Output = Self;

    #[inline(always)]
    fn div(self, rhs: Self) -> Self {
        ScalarVector(self.0.lane_div(rhs.0))
    }
}

impl<T: Element> Neg for ScalarVector<T> {
    type Output = Self;

    #[inline(always)]
    fn neg(self) -> Self {
        ScalarVector(self.0.lane_neg())
    }
}

impl_assign_ops!([T: Element] ScalarVector<T>);

impl<T: FloatElement> SimdFloat for ScalarVector<T> {
    #[inline(always)]
    fn abs(self) -> Self {
        ScalarVector(self.0.lane_abs())
    }

    #[inline(always)]
    fn sqrt(self) -> Self {
        ScalarVector(self.0.lane_sqrt())
    }

    #[inline(always)]
    fn floor(self) -> Self {
        ScalarVector(self.0.lane_floor())
    }

    #[inline(always)]
    fn ceil(self) -> Self {
        ScalarVector(self.0.lane_ceil())
    }

    #[inline(always)]
    fn mul_add(self, b: Self, c: Self) -> Self {
        ScalarVector(self.0.lane_mul_add(b.0, c.0))
    }
}

impl<T: IntElement> BitAnd for ScalarVector<T> {
    type Output = Self;

    #[inline(always)]
    fn bitand(self, rhs: Self) -> Self {
        ScalarVector(self.0.lane_and(rhs.0))
    }
}

impl<T: IntElement> BitOr for ScalarVector<T> {
    type Output = Self;

    #[inline(always)]
    fn bitor(self, rhs: Self) -> Self {
        ScalarVector(self.0.lane_or(rhs.0))
    }
}

impl<T: IntElement> BitXor for ScalarVector<T> {
    type Output = Self;

    #[inline(always)]
    fn bitxor(self, rhs: Self) -> Self {
        ScalarVector(self.0.lane_xor(rhs.0))
    }
}

impl<T: IntElement> Not for ScalarVector<T> {
    type Output = Self;

    #[inline(always)]
    fn not(self) -> Self {
        ScalarVector(self.0.lane_not())
    }
}

impl<T: IntElement> Shl<u32> for ScalarVector<T> {
    type Output = Self;

    #[inline(always)]
    fn shl(self, count: u32) -> Self {
        ScalarVector(self.0.lane_shl(count))
    }
}

impl<T: IntElement> Shr<u32> for ScalarVector<T> {
    type Output = Self;

    #[inline(always)]
    fn shr(self, count: u32) -> Self {
        ScalarVector(self.0.lane_shr(count))
    }
}

impl<T: IntElement> SimdInt for ScalarVector<T> {}

impl<T: IntElement> IndexVector for ScalarVector<T> {
    const COUNT: usize = 1;

    #[inline(always)]
    fn lane_index(&self, lane: usize) -> usize {
        error::check_index(lane, 1);
        self.0.to_offset()
    }
}
