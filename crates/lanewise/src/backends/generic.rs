//! Portable array backend
//!
//! `ArrayVector<T, L>` holds `L` lanes in a plain array and performs every
//! operation lane by lane. It backs the `generic128` and `generic256`
//! builds, and because it compiles on any target it is also what the
//! equivalence tests compare the intrinsic backends against at matching
//! lane counts.
//!
//! `L` must be a power of two no larger than 64; using any other count is a
//! compile-time error as soon as `LANES` is evaluated.

use core::array;
use core::ops::{Add, BitAnd, BitOr, BitXor, Div, Mul, Neg, Not, Shl, Shr, Sub};

use crate::access::{check_len, debug_check_alignment};
use crate::element::{Element, FloatElement, IntElement};
use crate::traits::{IndexVector, SimdFloat, SimdInt, SimdMask, SimdVector};

/// `L` lanes of `T` in an array
#[derive(Debug, Copy, Clone, PartialEq)]
#[repr(transparent)]
pub struct ArrayVector<T, const L: usize>(pub [T; L]);

/// `L` boolean lanes
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[repr(transparent)]
pub struct ArrayMask<const L: usize>(pub [bool; L]);

const fn checked_lane_count(lanes: usize) -> usize {
    assert!(
        lanes.is_power_of_two() && lanes <= 64,
        "lane count must be a power of two no larger than 64"
    );
    lanes
}

impl<const L: usize> SimdMask for ArrayMask<L> {
    type Array = [bool; L];

    const LANES: usize = checked_lane_count(L);

    #[inline(always)]
    fn splat(value: bool) -> Self {
        ArrayMask([value; L])
    }

    #[inline(always)]
    fn from_array(lanes: [bool; L]) -> Self {
        ArrayMask(lanes)
    }

    #[inline(always)]
    fn to_array(self) -> [bool; L] {
        self.0
    }

    #[inline]
    fn all(self) -> bool {
        self.0.iter().all(|&set| set)
    }

    #[inline]
    fn any(self) -> bool {
        self.0.iter().any(|&set| set)
    }

    #[inline(always)]
    fn not(self) -> Self {
        !self
    }
}

impl<const L: usize> BitAnd for ArrayMask<L> {
    type Output = Self;

    #[inline(always)]
    fn bitand(self, rhs: Self) -> Self {
        ArrayMask(array::from_fn(|i| self.0[i] & rhs.0[i]))
    }
}

impl<const L: usize> BitOr for ArrayMask<L> {
    type Output = Self;

    #[inline(always)]
    fn bitor(self, rhs: Self) -> Self {
        ArrayMask(array::from_fn(|i| self.0[i] | rhs.0[i]))
    }
}

impl<const L: usize> BitXor for ArrayMask<L> {
    type Output = Self;

    #[inline(always)]
    fn bitxor(self, rhs: Self) -> Self {
        ArrayMask(array::from_fn(|i| self.0[i] ^ rhs.0[i]))
    }
}

impl<const L: usize> Not for ArrayMask<L> {
    type Output = Self;

    #[inline(always)]
    fn not(self) -> Self {
        ArrayMask(self.0.map(|set| !set))
    }
}

impl<T: Element, const L: usize> ArrayVector<T, L> {
    #[inline(always)]
    fn zip_map(self, rhs: Self, f: impl Fn(T, T) -> T) -> Self {
        ArrayVector(array::from_fn(|i| f(self.0[i], rhs.0[i])))
    }

    #[inline(always)]
    fn compare(self, rhs: Self, f: impl Fn(&T, &T) -> bool) -> ArrayMask<L> {
        ArrayMask(array::from_fn(|i| f(&self.0[i], &rhs.0[i])))
    }
}

impl<T: Element, const L: usize> SimdVector for ArrayVector<T, L> {
    type Scalar = T;
    type Mask = ArrayMask<L>;
    type Array = [T; L];

    const LANES: usize = checked_lane_count(L);

    #[inline(always)]
    fn splat(value: T) -> Self {
        ArrayVector([value; L])
    }

    #[inline(always)]
    fn indexes_from_zero() -> Self {
        ArrayVector(array::from_fn(T::from_lane_index))
    }

    #[inline(always)]
    fn from_array(lanes: [T; L]) -> Self {
        ArrayVector(lanes)
    }

    #[inline(always)]
    fn to_array(self) -> [T; L] {
        self.0
    }

    #[inline(always)]
    #[track_caller]
    fn load_unaligned(slice: &[T]) -> Self {
        check_len(slice.len(), Self::LANES);
        ArrayVector(array::from_fn(|i| slice[i]))
    }

    #[inline(always)]
    #[track_caller]
    fn load_aligned(slice: &[T]) -> Self {
        check_len(slice.len(), Self::LANES);
        debug_check_alignment(slice.as_ptr(), Self::ALIGN);
        ArrayVector(array::from_fn(|i| slice[i]))
    }

    #[inline(always)]
    #[track_caller]
    fn store_unaligned(self, slice: &mut [T]) {
        check_len(slice.len(), Self::LANES);
        slice[..L].copy_from_slice(&self.0);
    }

    #[inline(always)]
    #[track_caller]
    fn store_aligned(self, slice: &mut [T]) {
        check_len(slice.len(), Self::LANES);
        debug_check_alignment(slice.as_ptr(), Self::ALIGN);
        slice[..L].copy_from_slice(&self.0);
    }

    #[inline]
    #[track_caller]
    fn store_masked(self, slice: &mut [T], mask: ArrayMask<L>) {
        check_len(slice.len(), Self::LANES);
        for ((dst, &value), &set) in slice.iter_mut().zip(&self.0).zip(&mask.0) {
            if set {
                *dst = value;
            }
        }
    }

    #[inline(always)]
    fn cmp_eq(self, rhs: Self) -> ArrayMask<L> {
        self.compare(rhs, T::eq)
    }

    #[inline(always)]
    fn cmp_ne(self, rhs: Self) -> ArrayMask<L> {
        self.compare(rhs, T::ne)
    }

    #[inline(always)]
    fn cmp_lt(self, rhs: Self) -> ArrayMask<L> {
        self.compare(rhs, T::lt)
    }

    #[inline(always)]
    fn cmp_le(self, rhs: Self) -> ArrayMask<L> {
        self.compare(rhs, T::le)
    }

    #[inline(always)]
    fn cmp_gt(self, rhs: Self) -> ArrayMask<L> {
        self.compare(rhs, T::gt)
    }

    #[inline(always)]
    fn cmp_ge(self, rhs: Self) -> ArrayMask<L> {
        self.compare(rhs, T::ge)
    }

    #[inline(always)]
    fn min(self, rhs: Self) -> Self {
        self.zip_map(rhs, T::lane_min)
    }

    #[inline(always)]
    fn max(self, rhs: Self) -> Self {
        self.zip_map(rhs, T::lane_max)
    }

    #[inline(always)]
    fn select(mask: ArrayMask<L>, true_val: Self, false_val: Self) -> Self {
        ArrayVector(array::from_fn(|i| {
            if mask.0[i] {
                true_val.0[i]
            } else {
                false_val.0[i]
            }
        }))
    }

    #[inline(always)]
    fn map_lanes<F: FnMut(T) -> T>(self, f: F) -> Self {
        ArrayVector(self.0.map(f))
    }
}

impl<T: Element, const L: usize> Add for ArrayVector<T, L> {
    type Output = Self;

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        self.zip_map(rhs, T::lane_add)
    }
}

impl<T: Element, const L: usize> Sub for ArrayVector<T, L> {
    type Output = Self;

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        self.zip_map(rhs, T::lane_sub)
    }
}

impl<T: Element, const L: usize> Mul for ArrayVector<T, L> {
    type Output = Self;

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        self.zip_map(rhs, T::lane_mul)
    }
}

impl<T: Element, const L: usize> Div for ArrayVector<T, L> {
    type Output = Self;

    #[inline(always)]
    fn div(self, rhs: Self) -> Self {
        self.zip_map(rhs, T::lane_div)
    }
}

impl<T: Element, const L: usize> Neg for ArrayVector<T, L> {
    type Output = Self;

    #[inline(always)]
    fn neg(self) -> Self {
        ArrayVector(self.0.map(T::lane_neg))
    }
}

impl_assign_ops!([T: Element, const L: usize] ArrayVector<T, L>);

impl<T: FloatElement, const L: usize> SimdFloat for ArrayVector<T, L> {
    #[inline(always)]
    fn abs(self) -> Self {
        ArrayVector(self.0.map(T::lane_abs))
    }

    #[inline(always)]
    fn sqrt(self) -> Self {
        ArrayVector(self.0.map(T::lane_sqrt))
    }

    #[inline(always)]
    fn floor(self) -> Self {
        ArrayVector(self.0.map(T::lane_floor))
    }

    #[inline(always)]
    fn ceil(self) -> Self {
        ArrayVector(self.0.map(T::lane_ceil))
    }

    #[inline(always)]
    fn mul_add(self, b: Self, c: Self) -> Self {
        ArrayVector(array::from_fn(|i| self.0[i].lane_mul_add(b.0[i], c.0[i])))
    }
}

impl<T: IntElement, const L: usize> BitAnd for ArrayVector<T, L> {
    type Output = Self;

    #[inline(always)]
    fn bitand(self, rhs: Self) -> Self {
        self.zip_map(rhs, T::lane_and)
    }
}

impl<T: IntElement, const L: usize> BitOr for ArrayVector<T, L> {
    type Output = Self;

    #[inline(always)]
    fn bitor(self, rhs: Self) -> Self {
        self.zip_map(rhs, T::lane_or)
    }
}

impl<T: IntElement, const L: usize> BitXor for ArrayVector<T, L> {
    type Output = Self;

    #[inline(always)]
    fn bitxor(self, rhs: Self) -> Self {
        self.zip_map(rhs, T::lane_xor)
    }
}

impl<T: IntElement, const L: usize> Not for ArrayVector<T, L> {
    type Output = Self;

    #[inline(always)]
    fn not(self) -> Self {
        ArrayVector(self.0.map(T::lane_not))
    }
}

impl<T: IntElement, const L: usize> Shl<u32> for ArrayVector<T, L> {
    type Output = Self;

    #[inline(always)]
    fn shl(self, count: u32) -> Self {
        ArrayVector(self.0.map(|lane| lane.lane_shl(count)))
    }
}

impl<T: IntElement, const L: usize> Shr<u32> for ArrayVector<T, L> {
    type Output = Self;

    #[inline(always)]
    fn shr(self, count: u32) -> Self {
        ArrayVector(self.0.map(|lane| lane.lane_shr(count)))
    }
}

impl<T: IntElement, const L: usize> SimdInt for ArrayVector<T, L> {}

impl<T: IntElement, const L: usize> IndexVector for ArrayVector<T, L> {
    const COUNT: usize = L;

    #[inline(always)]
    fn lane_index(&self, lane: usize) -> usize {
        self.0[lane].to_offset()
    }
}
