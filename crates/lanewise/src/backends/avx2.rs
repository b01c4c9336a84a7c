//! AVX2 backend implementation (x86-64)
//!
//! This backend provides 256-bit SIMD operations using AVX2 and FMA instructions:
//! 8 lanes of f32/i32/u32 and 4 lanes of f64.
//! Requires x86-64 CPU with AVX2 support (Intel Haswell 2013+, AMD Excavator 2015+).
//!
//! **Note**: This implementation assumes AVX2 is available when the `avx2` feature is enabled.
//! Build with `-C target-feature=+avx2,+fma` so the intrinsics inline, and use
//! [`check_cpu_support`](crate::cpu::check_cpu_support) to verify the host at startup.

// This backend only compiles on x86/x86_64 targets
#![cfg(any(target_arch = "x86", target_arch = "x86_64"))]

#[cfg(target_arch = "x86_64")]
use core::arch::x86_64::*;

#[cfg(target_arch = "x86")]
use core::arch::x86::*;

use core::array;
use core::ops::{Add, BitAnd, BitOr, BitXor, Mul, Neg, Not, Shl, Shr, Sub};

use crate::access::{check_len, debug_check_alignment};
use crate::isa::Avx2;
use crate::lane_width::LaneWidth;
use crate::traits::{SimdFloat, SimdInt, SimdMask, SimdVector};

/// AVX2 vector wrapper (8 lanes of f32)
#[derive(Copy, Clone)]
#[repr(transparent)]
pub struct Avx2F32x8(__m256);

/// AVX2 vector wrapper (4 lanes of f64)
#[derive(Copy, Clone)]
#[repr(transparent)]
pub struct Avx2F64x4(__m256d);

/// AVX2 integer vector wrapper (8 lanes of i32)
#[derive(Copy, Clone)]
#[repr(transparent)]
pub struct Avx2I32x8(__m256i);

/// AVX2 integer vector wrapper (8 lanes of u32)
#[derive(Copy, Clone)]
#[repr(transparent)]
pub struct Avx2U32x8(__m256i);

/// 8-lane mask
///
/// Kept as an integer register because `_mm256_maskstore_*` takes one.
#[derive(Copy, Clone)]
#[repr(transparent)]
pub struct Avx2Mask32x8(__m256i);

/// 4-lane mask for f64 vectors
#[derive(Copy, Clone)]
#[repr(transparent)]
pub struct Avx2Mask64x4(__m256i);

impl LaneWidth<Avx2> for f32 {
    type Vector = Avx2F32x8;
}

impl LaneWidth<Avx2> for f64 {
    type Vector = Avx2F64x4;
}

impl LaneWidth<Avx2> for i32 {
    type Vector = Avx2I32x8;
}

impl LaneWidth<Avx2> for u32 {
    type Vector = Avx2U32x8;
}

// Masks

impl SimdMask for Avx2Mask32x8 {
    type Array = [bool; 8];

    const LANES: usize = 8;

    #[inline(always)]
    fn splat(value: bool) -> Self {
        unsafe { Avx2Mask32x8(_mm256_set1_epi32(-i32::from(value))) }
    }

    #[inline(always)]
    fn from_array(lanes: [bool; 8]) -> Self {
        let [a, b, c, d, e, f, g, h] = lanes.map(|set| -i32::from(set));
        unsafe { Avx2Mask32x8(_mm256_setr_epi32(a, b, c, d, e, f, g, h)) }
    }

    #[inline(always)]
    fn to_array(self) -> [bool; 8] {
        let bits = self.to_bitmask();
        array::from_fn(|lane| (bits >> lane) & 1 == 1)
    }

    #[inline(always)]
    fn to_bitmask(self) -> u64 {
        unsafe { _mm256_movemask_ps(_mm256_castsi256_ps(self.0)) as u64 }
    }

    #[inline(always)]
    fn all(self) -> bool {
        self.to_bitmask() == 0xff
    }

    #[inline(always)]
    fn not(self) -> Self {
        !self
    }
}

impl SimdMask for Avx2Mask64x4 {
    type Array = [bool; 4];

    const LANES: usize = 4;

    #[inline(always)]
    fn splat(value: bool) -> Self {
        unsafe { Avx2Mask64x4(_mm256_set1_epi64x(-i64::from(value))) }
    }

    #[inline(always)]
    fn from_array(lanes: [bool; 4]) -> Self {
        let [a, b, c, d] = lanes.map(|set| -i64::from(set));
        unsafe { Avx2Mask64x4(_mm256_setr_epi64x(a, b, c, d)) }
    }

    #[inline(always)]
    fn to_array(self) -> [bool; 4] {
        let bits = self.to_bitmask();
        array::from_fn(|lane| (bits >> lane) & 1 == 1)
    }

    #[inline(always)]
    fn to_bitmask(self) -> u64 {
        unsafe { _mm256_movemask_pd(_mm256_castsi256_pd(self.0)) as u64 }
    }

    #[inline(always)]
    fn not(self) -> Self {
        !self
    }
}

macro_rules! avx2_mask_bitops {
    ($($mask:ident),*) => {
        $(
            impl BitAnd for $mask {
                type Output = Self;

                #[inline(always)]
                fn bitand(self, rhs: Self) -> Self {
                    unsafe { $mask(_mm256_and_si256(self.0, rhs.0)) }
                }
            }

            impl BitOr for $mask {
                type Output = Self;

                #[inline(always)]
                fn bitor(self, rhs: Self) -> Self {
                    unsafe { $mask(_mm256_or_si256(self.0, rhs.0)) }
                }
            }

            impl BitXor for $mask {
                type Output = Self;

                #[inline(always)]
                fn bitxor(self, rhs: Self) -> Self {
                    unsafe { $mask(_mm256_xor_si256(self.0, rhs.0)) }
                }
            }

            impl Not for $mask {
                type Output = Self;

                #[inline(always)]
                fn not(self) -> Self {
                    unsafe { $mask(_mm256_xor_si256(self.0, _mm256_set1_epi32(-1))) }
                }
            }
        )*
    };
}

avx2_mask_bitops!(Avx2Mask32x8, Avx2Mask64x4);

// f32 x 8

/// Tree reduction of 8 f32 lanes: fold the high 128-bit half onto the low
/// half, then `op(op(v0, v2), op(v1, v3))`
macro_rules! reduce_ps256 {
    ($v:expr, $op:ident, $op_ss:ident) => {
        unsafe {
            let quad = $op(_mm256_castps256_ps128($v), _mm256_extractf128_ps::<1>($v));
            let pairs = $op(quad, _mm_movehl_ps(quad, quad));
            let odd = _mm_shuffle_ps::<0b01>(pairs, pairs);
            _mm_cvtss_f32($op_ss(pairs, odd))
        }
    };
}

impl SimdVector for Avx2F32x8 {
    type Scalar = f32;
    type Mask = Avx2Mask32x8;
    type Array = [f32; 8];

    const LANES: usize = 8;

    #[inline(always)]
    fn splat(value: f32) -> Self {
        unsafe { Avx2F32x8(_mm256_set1_ps(value)) }
    }

    #[inline(always)]
    fn zero() -> Self {
        unsafe { Avx2F32x8(_mm256_setzero_ps()) }
    }

    #[inline(always)]
    fn indexes_from_zero() -> Self {
        unsafe { Avx2F32x8(_mm256_setr_ps(0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0)) }
    }

    #[inline(always)]
    fn from_array(lanes: [f32; 8]) -> Self {
        unsafe { Avx2F32x8(_mm256_loadu_ps(lanes.as_ptr())) }
    }

    #[inline(always)]
    fn to_array(self) -> [f32; 8] {
        let mut out = [0.0f32; 8];
        unsafe { _mm256_storeu_ps(out.as_mut_ptr(), self.0) };
        out
    }

    #[inline(always)]
    #[track_caller]
    fn load_unaligned(slice: &[f32]) -> Self {
        check_len(slice.len(), Self::LANES);
        unsafe { Avx2F32x8(_mm256_loadu_ps(slice.as_ptr())) }
    }

    #[inline(always)]
    #[track_caller]
    fn load_aligned(slice: &[f32]) -> Self {
        check_len(slice.len(), Self::LANES);
        debug_check_alignment(slice.as_ptr(), Self::ALIGN);
        unsafe { Avx2F32x8(_mm256_load_ps(slice.as_ptr())) }
    }

    #[inline(always)]
    #[track_caller]
    fn store_unaligned(self, slice: &mut [f32]) {
        check_len(slice.len(), Self::LANES);
        unsafe { _mm256_storeu_ps(slice.as_mut_ptr(), self.0) }
    }

    #[inline(always)]
    #[track_caller]
    fn store_aligned(self, slice: &mut [f32]) {
        check_len(slice.len(), Self::LANES);
        debug_check_alignment(slice.as_ptr(), Self::ALIGN);
        unsafe { _mm256_store_ps(slice.as_mut_ptr(), self.0) }
    }

    #[inline(always)]
    #[track_caller]
    fn store_streaming(self, slice: &mut [f32]) {
        check_len(slice.len(), Self::LANES);
        debug_check_alignment(slice.as_ptr(), Self::ALIGN);
        unsafe { _mm256_stream_ps(slice.as_mut_ptr(), self.0) }
    }

    #[inline(always)]
    #[track_caller]
    fn store_masked(self, slice: &mut [f32], mask: Avx2Mask32x8) {
        check_len(slice.len(), Self::LANES);
        unsafe { _mm256_maskstore_ps(slice.as_mut_ptr(), mask.0, self.0) }
    }

    #[inline(always)]
    fn cmp_eq(self, rhs: Self) -> Avx2Mask32x8 {
        unsafe { Avx2Mask32x8(_mm256_castps_si256(_mm256_cmp_ps::<_CMP_EQ_OQ>(self.0, rhs.0))) }
    }

    #[inline(always)]
    fn cmp_ne(self, rhs: Self) -> Avx2Mask32x8 {
        unsafe { Avx2Mask32x8(_mm256_castps_si256(_mm256_cmp_ps::<_CMP_NEQ_UQ>(self.0, rhs.0))) }
    }

    #[inline(always)]
    fn cmp_lt(self, rhs: Self) -> Avx2Mask32x8 {
        unsafe { Avx2Mask32x8(_mm256_castps_si256(_mm256_cmp_ps::<_CMP_LT_OQ>(self.0, rhs.0))) }
    }

    #[inline(always)]
    fn cmp_le(self, rhs: Self) -> Avx2Mask32x8 {
        unsafe { Avx2Mask32x8(_mm256_castps_si256(_mm256_cmp_ps::<_CMP_LE_OQ>(self.0, rhs.0))) }
    }

    #[inline(always)]
    fn cmp_gt(self, rhs: Self) -> Avx2Mask32x8 {
        unsafe { Avx2Mask32x8(_mm256_castps_si256(_mm256_cmp_ps::<_CMP_GT_OQ>(self.0, rhs.0))) }
    }

    #[inline(always)]
    fn cmp_ge(self, rhs: Self) -> Avx2Mask32x8 {
        unsafe { Avx2Mask32x8(_mm256_castps_si256(_mm256_cmp_ps::<_CMP_GE_OQ>(self.0, rhs.0))) }
    }

    #[inline(always)]
    fn min(self, rhs: Self) -> Self {
        unsafe { Avx2F32x8(_mm256_min_ps(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn max(self, rhs: Self) -> Self {
        unsafe { Avx2F32x8(_mm256_max_ps(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn select(mask: Avx2Mask32x8, true_val: Self, false_val: Self) -> Self {
        unsafe {
            Avx2F32x8(_mm256_blendv_ps(
                false_val.0,
                true_val.0,
                _mm256_castsi256_ps(mask.0),
            ))
        }
    }

    #[inline(always)]
    fn horizontal_sum(self) -> f32 {
        reduce_ps256!(self.0, _mm_add_ps, _mm_add_ss)
    }

    #[inline(always)]
    fn horizontal_product(self) -> f32 {
        reduce_ps256!(self.0, _mm_mul_ps, _mm_mul_ss)
    }

    #[inline(always)]
    fn horizontal_min(self) -> f32 {
        reduce_ps256!(self.0, _mm_min_ps, _mm_min_ss)
    }

    #[inline(always)]
    fn horizontal_max(self) -> f32 {
        reduce_ps256!(self.0, _mm_max_ps, _mm_max_ss)
    }
}

impl Add for Avx2F32x8 {
    type Output = Self;

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        unsafe { Avx2F32x8(_mm256_add_ps(self.0, rhs.0)) }
    }
}

impl Sub for Avx2F32x8 {
    type Output = Self;

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        unsafe { Avx2F32x8(_mm256_sub_ps(self.0, rhs.0)) }
    }
}

impl Mul for Avx2F32x8 {
    type Output = Self;

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        unsafe { Avx2F32x8(_mm256_mul_ps(self.0, rhs.0)) }
    }
}

impl core::ops::Div for Avx2F32x8 {
    type Output = Self;

    #[inline(always)]
    fn div(self, rhs: Self) -> Self {
        unsafe { Avx2F32x8(_mm256_div_ps(self.0, rhs.0)) }
    }
}

impl Neg for Avx2F32x8 {
    type Output = Self;

    #[inline(always)]
    fn neg(self) -> Self {
        unsafe { Avx2F32x8(_mm256_xor_ps(self.0, _mm256_set1_ps(-0.0))) }
    }
}

impl_assign_ops!(Avx2F32x8);

impl SimdFloat for Avx2F32x8 {
    #[inline(always)]
    fn abs(self) -> Self {
        unsafe { Avx2F32x8(_mm256_andnot_ps(_mm256_set1_ps(-0.0), self.0)) }
    }

    #[inline(always)]
    fn sqrt(self) -> Self {
        unsafe { Avx2F32x8(_mm256_sqrt_ps(self.0)) }
    }

    #[inline(always)]
    fn floor(self) -> Self {
        unsafe { Avx2F32x8(_mm256_floor_ps(self.0)) }
    }

    #[inline(always)]
    fn ceil(self) -> Self {
        unsafe { Avx2F32x8(_mm256_ceil_ps(self.0)) }
    }

    #[inline(always)]
    fn mul_add(self, b: Self, c: Self) -> Self {
        unsafe { Avx2F32x8(_mm256_fmadd_ps(self.0, b.0, c.0)) }
    }
}

// f64 x 4

/// Tree reduction of 4 f64 lanes: lane i becomes `op(v[i], v[i + 2])`, then
/// lane 0 becomes `op(lane0, lane1)`
macro_rules! reduce_pd256 {
    ($v:expr, $op:ident, $op_sd:ident) => {
        unsafe {
            let pairs = $op(_mm256_castpd256_pd128($v), _mm256_extractf128_pd::<1>($v));
            _mm_cvtsd_f64($op_sd(pairs, _mm_unpackhi_pd(pairs, pairs)))
        }
    };
}

impl SimdVector for Avx2F64x4 {
    type Scalar = f64;
    type Mask = Avx2Mask64x4;
    type Array = [f64; 4];

    const LANES: usize = 4;

    #[inline(always)]
    fn splat(value: f64) -> Self {
        unsafe { Avx2F64x4(_mm256_set1_pd(value)) }
    }

    #[inline(always)]
    fn zero() -> Self {
        unsafe { Avx2F64x4(_mm256_setzero_pd()) }
    }

    #[inline(always)]
    fn from_array(lanes: [f64; 4]) -> Self {
        unsafe { Avx2F64x4(_mm256_loadu_pd(lanes.as_ptr())) }
    }

    #[inline(always)]
    fn to_array(self) -> [f64; 4] {
        let mut out = [0.0f64; 4];
        unsafe { _mm256_storeu_pd(out.as_mut_ptr(), self.0) };
        out
    }

    #[inline(always)]
    #[track_caller]
    fn load_unaligned(slice: &[f64]) -> Self {
        check_len(slice.len(), Self::LANES);
        unsafe { Avx2F64x4(_mm256_loadu_pd(slice.as_ptr())) }
    }

    #[inline(always)]
    #[track_caller]
    fn load_aligned(slice: &[f64]) -> Self {
        check_len(slice.len(), Self::LANES);
        debug_check_alignment(slice.as_ptr(), Self::ALIGN);
        unsafe { Avx2F64x4(_mm256_load_pd(slice.as_ptr())) }
    }

    #[inline(always)]
    #[track_caller]
    fn store_unaligned(self, slice: &mut [f64]) {
        check_len(slice.len(), Self::LANES);
        unsafe { _mm256_storeu_pd(slice.as_mut_ptr(), self.0) }
    }

    #[inline(always)]
    #[track_caller]
    fn store_aligned(self, slice: &mut [f64]) {
        check_len(slice.len(), Self::LANES);
        debug_check_alignment(slice.as_ptr(), Self::ALIGN);
        unsafe { _mm256_store_pd(slice.as_mut_ptr(), self.0) }
    }

    #[inline(always)]
    #[track_caller]
    fn store_streaming(self, slice: &mut [f64]) {
        check_len(slice.len(), Self::LANES);
        debug_check_alignment(slice.as_ptr(), Self::ALIGN);
        unsafe { _mm256_stream_pd(slice.as_mut_ptr(), self.0) }
    }

    #[inline(always)]
    #[track_caller]
    fn store_masked(self, slice: &mut [f64], mask: Avx2Mask64x4) {
        check_len(slice.len(), Self::LANES);
        unsafe { _mm256_maskstore_pd(slice.as_mut_ptr(), mask.0, self.0) }
    }

    #[inline(always)]
    fn cmp_eq(self, rhs: Self) -> Avx2Mask64x4 {
        unsafe { Avx2Mask64x4(_mm256_castpd_si256(_mm256_cmp_pd::<_CMP_EQ_OQ>(self.0, rhs.0))) }
    }

    #[inline(always)]
    fn cmp_ne(self, rhs: Self) -> Avx2Mask64x4 {
        unsafe { Avx2Mask64x4(_mm256_castpd_si256(_mm256_cmp_pd::<_CMP_NEQ_UQ>(self.0, rhs.0))) }
    }

    #[inline(always)]
    fn cmp_lt(self, rhs: Self) -> Avx2Mask64x4 {
        unsafe { Avx2Mask64x4(_mm256_castpd_si256(_mm256_cmp_pd::<_CMP_LT_OQ>(self.0, rhs.0))) }
    }

    #[inline(always)]
    fn cmp_le(self, rhs: Self) -> Avx2Mask64x4 {
        unsafe { Avx2Mask64x4(_mm256_castpd_si256(_mm256_cmp_pd::<_CMP_LE_OQ>(self.0, rhs.0))) }
    }

    #[inline(always)]
    fn cmp_gt(self, rhs: Self) -> Avx2Mask64x4 {
        unsafe { Avx2Mask64x4(_mm256_castpd_si256(_mm256_cmp_pd::<_CMP_GT_OQ>(self.0, rhs.0))) }
    }

    #[inline(always)]
    fn cmp_ge(self, rhs: Self) -> Avx2Mask64x4 {
        unsafe { Avx2Mask64x4(_mm256_castpd_si256(_mm256_cmp_pd::<_CMP_GE_OQ>(self.0, rhs.0))) }
    }

    #[inline(always)]
    fn min(self, rhs: Self) -> Self {
        unsafe { Avx2F64x4(_mm256_min_pd(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn max(self, rhs: Self) -> Self {
        unsafe { Avx2F64x4(_mm256_max_pd(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn select(mask: Avx2Mask64x4, true_val: Self, false_val: Self) -> Self {
        unsafe {
            Avx2F64x4(_mm256_blendv_pd(
                false_val.0,
                true_val.0,
                _mm256_castsi256_pd(mask.0),
            ))
        }
    }

    #[inline(always)]
    fn horizontal_sum(self) -> f64 {
        reduce_pd256!(self.0, _mm_add_pd, _mm_add_sd)
    }

    #[inline(always)]
    fn horizontal_product(self) -> f64 {
        reduce_pd256!(self.0, _mm_mul_pd, _mm_mul_sd)
    }

    #[inline(always)]
    fn horizontal_min(self) -> f64 {
        reduce_pd256!(self.0, _mm_min_pd, _mm_min_sd)
    }

    #[inline(always)]
    fn horizontal_max(self) -> f64 {
        reduce_pd256!(self.0, _mm_max_pd, _mm_max_sd)
    }
}

impl Add for Avx2F64x4 {
    type Output = Self;

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        unsafe { Avx2F64x4(_mm256_add_pd(self.0, rhs.0)) }
    }
}

impl Sub for Avx2F64x4 {
    type Output = Self;

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        unsafe { Avx2F64x4(_mm256_sub_pd(self.0, rhs.0)) }
    }
}

impl Mul for Avx2F64x4 {
    type Output = Self;

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        unsafe { Avx2F64x4(_mm256_mul_pd(self.0, rhs.0)) }
    }
}

impl core::ops::Div for Avx2F64x4 {
    type Output = Self;

    #[inline(always)]
    fn div(self, rhs: Self) -> Self {
        unsafe { Avx2F64x4(_mm256_div_pd(self.0, rhs.0)) }
    }
}

impl Neg for Avx2F64x4 {
    type Output = Self;

    #[inline(always)]
    fn neg(self) -> Self {
        unsafe { Avx2F64x4(_mm256_xor_pd(self.0, _mm256_set1_pd(-0.0))) }
    }
}

impl_assign_ops!(Avx2F64x4);

impl SimdFloat for Avx2F64x4 {
    #[inline(always)]
    fn abs(self) -> Self {
        unsafe { Avx2F64x4(_mm256_andnot_pd(_mm256_set1_pd(-0.0), self.0)) }
    }

    #[inline(always)]
    fn sqrt(self) -> Self {
        unsafe { Avx2F64x4(_mm256_sqrt_pd(self.0)) }
    }

    #[inline(always)]
    fn floor(self) -> Self {
        unsafe { Avx2F64x4(_mm256_floor_pd(self.0)) }
    }

    #[inline(always)]
    fn ceil(self) -> Self {
        unsafe { Avx2F64x4(_mm256_ceil_pd(self.0)) }
    }

    #[inline(always)]
    fn mul_add(self, b: Self, c: Self) -> Self {
        unsafe { Avx2F64x4(_mm256_fmadd_pd(self.0, b.0, c.0)) }
    }
}

// 32-bit integers

#[inline(always)]
fn signed_key(v: __m256i) -> __m256i {
    v
}

#[inline(always)]
fn unsigned_key(v: __m256i) -> __m256i {
    unsafe { _mm256_xor_si256(v, _mm256_set1_epi32(i32::MIN)) }
}

/// Tree reduction of 8 32-bit integer lanes
macro_rules! reduce_epi32_256 {
    ($v:expr, $op:ident) => {
        unsafe {
            let quad = $op(_mm256_castsi256_si128($v), _mm256_extracti128_si256::<1>($v));
            let pairs = $op(quad, _mm_unpackhi_epi64(quad, quad));
            let odd = _mm_shuffle_epi32::<0b01>(pairs);
            _mm_cvtsi128_si32($op(pairs, odd))
        }
    };
}

macro_rules! avx2_int_vector {
    ($name:ident, $t:ty, $key:ident, $min:ident, $max:ident, $min128:ident, $max128:ident, $shr:ident) => {
        impl SimdVector for $name {
            type Scalar = $t;
            type Mask = Avx2Mask32x8;
            type Array = [$t; 8];

            const LANES: usize = 8;

            #[inline(always)]
            fn splat(value: $t) -> Self {
                unsafe { $name(_mm256_set1_epi32(value as i32)) }
            }

            #[inline(always)]
            fn zero() -> Self {
                unsafe { $name(_mm256_setzero_si256()) }
            }

            #[inline(always)]
            fn indexes_from_zero() -> Self {
                unsafe { $name(_mm256_setr_epi32(0, 1, 2, 3, 4, 5, 6, 7)) }
            }

            #[inline(always)]
            fn from_array(lanes: [$t; 8]) -> Self {
                unsafe { $name(_mm256_loadu_si256(lanes.as_ptr().cast::<__m256i>())) }
            }

            #[inline(always)]
            fn to_array(self) -> [$t; 8] {
                let mut out = [0 as $t; 8];
                unsafe { _mm256_storeu_si256(out.as_mut_ptr().cast::<__m256i>(), self.0) };
                out
            }

            #[inline(always)]
            #[track_caller]
            fn load_unaligned(slice: &[$t]) -> Self {
                check_len(slice.len(), Self::LANES);
                unsafe { $name(_mm256_loadu_si256(slice.as_ptr().cast::<__m256i>())) }
            }

            #[inline(always)]
            #[track_caller]
            fn load_aligned(slice: &[$t]) -> Self {
                check_len(slice.len(), Self::LANES);
                debug_check_alignment(slice.as_ptr(), Self::ALIGN);
                unsafe { $name(_mm256_load_si256(slice.as_ptr().cast::<__m256i>())) }
            }

            #[inline(always)]
            #[track_caller]
            fn store_unaligned(self, slice: &mut [$t]) {
                check_len(slice.len(), Self::LANES);
                unsafe { _mm256_storeu_si256(slice.as_mut_ptr().cast::<__m256i>(), self.0) }
            }

            #[inline(always)]
            #[track_caller]
            fn store_aligned(self, slice: &mut [$t]) {
                check_len(slice.len(), Self::LANES);
                debug_check_alignment(slice.as_ptr(), Self::ALIGN);
                unsafe { _mm256_store_si256(slice.as_mut_ptr().cast::<__m256i>(), self.0) }
            }

            #[inline(always)]
            #[track_caller]
            fn store_streaming(self, slice: &mut [$t]) {
                check_len(slice.len(), Self::LANES);
                debug_check_alignment(slice.as_ptr(), Self::ALIGN);
                unsafe { _mm256_stream_si256(slice.as_mut_ptr().cast::<__m256i>(), self.0) }
            }

            #[inline(always)]
            #[track_caller]
            fn store_masked(self, slice: &mut [$t], mask: Avx2Mask32x8) {
                check_len(slice.len(), Self::LANES);
                unsafe { _mm256_maskstore_epi32(slice.as_mut_ptr().cast::<i32>(), mask.0, self.0) }
            }

            #[inline(always)]
            fn cmp_eq(self, rhs: Self) -> Avx2Mask32x8 {
                unsafe { Avx2Mask32x8(_mm256_cmpeq_epi32(self.0, rhs.0)) }
            }

            #[inline(always)]
            fn cmp_ne(self, rhs: Self) -> Avx2Mask32x8 {
                !self.cmp_eq(rhs)
            }

            #[inline(always)]
            fn cmp_lt(self, rhs: Self) -> Avx2Mask32x8 {
                unsafe { Avx2Mask32x8(_mm256_cmpgt_epi32($key(rhs.0), $key(self.0))) }
            }

            #[inline(always)]
            fn cmp_le(self, rhs: Self) -> Avx2Mask32x8 {
                !self.cmp_gt(rhs)
            }

            #[inline(always)]
            fn cmp_gt(self, rhs: Self) -> Avx2Mask32x8 {
                unsafe { Avx2Mask32x8(_mm256_cmpgt_epi32($key(self.0), $key(rhs.0))) }
            }

            #[inline(always)]
            fn cmp_ge(self, rhs: Self) -> Avx2Mask32x8 {
                !self.cmp_lt(rhs)
            }

            #[inline(always)]
            fn min(self, rhs: Self) -> Self {
                unsafe { $name($min(self.0, rhs.0)) }
            }

            #[inline(always)]
            fn max(self, rhs: Self) -> Self {
                unsafe { $name($max(self.0, rhs.0)) }
            }

            #[inline(always)]
            fn select(mask: Avx2Mask32x8, true_val: Self, false_val: Self) -> Self {
                unsafe { $name(_mm256_blendv_epi8(false_val.0, true_val.0, mask.0)) }
            }

            #[inline(always)]
            fn horizontal_sum(self) -> $t {
                reduce_epi32_256!(self.0, _mm_add_epi32) as $t
            }

            #[inline(always)]
            fn horizontal_product(self) -> $t {
                reduce_epi32_256!(self.0, _mm_mullo_epi32) as $t
            }

            #[inline(always)]
            fn horizontal_min(self) -> $t {
                reduce_epi32_256!(self.0, $min128) as $t
            }

            #[inline(always)]
            fn horizontal_max(self) -> $t {
                reduce_epi32_256!(self.0, $max128) as $t
            }
        }

        impl Add for $name {
            type Output = Self;

            #[inline(always)]
            fn add(self, rhs: Self) -> Self {
                unsafe { $name(_mm256_add_epi32(self.0, rhs.0)) }
            }
        }

        impl Sub for $name {
            type Output = Self;

            #[inline(always)]
            fn sub(self, rhs: Self) -> Self {
                unsafe { $name(_mm256_sub_epi32(self.0, rhs.0)) }
            }
        }

        impl Mul for $name {
            type Output = Self;

            #[inline(always)]
            fn mul(self, rhs: Self) -> Self {
                unsafe { $name(_mm256_mullo_epi32(self.0, rhs.0)) }
            }
        }

        impl Neg for $name {
            type Output = Self;

            #[inline(always)]
            fn neg(self) -> Self {
                unsafe { $name(_mm256_sub_epi32(_mm256_setzero_si256(), self.0)) }
            }
        }

        impl BitAnd for $name {
            type Output = Self;

            #[inline(always)]
            fn bitand(self, rhs: Self) -> Self {
                unsafe { $name(_mm256_and_si256(self.0, rhs.0)) }
            }
        }

        impl BitOr for $name {
            type Output = Self;

            #[inline(always)]
            fn bitor(self, rhs: Self) -> Self {
                unsafe { $name(_mm256_or_si256(self.0, rhs.0)) }
            }
        }

        impl BitXor for $name {
            type Output = Self;

            #[inline(always)]
            fn bitxor(self, rhs: Self) -> Self {
                unsafe { $name(_mm256_xor_si256(self.0, rhs.0)) }
            }
        }

        impl Not for $name {
            type Output = Self;

            #[inline(always)]
            fn not(self) -> Self {
                unsafe { $name(_mm256_xor_si256(self.0, _mm256_set1_epi32(-1))) }
            }
        }

        impl Shl<u32> for $name {
            type Output = Self;

            #[inline(always)]
            fn shl(self, count: u32) -> Self {
                unsafe {
                    // AVX2 shift requires a 128-bit count vector
                    let count = _mm_cvtsi32_si128((count & 31) as i32);
                    $name(_mm256_sll_epi32(self.0, count))
                }
            }
        }

        impl Shr<u32> for $name {
            type Output = Self;

            #[inline(always)]
            fn shr(self, count: u32) -> Self {
                unsafe {
                    let count = _mm_cvtsi32_si128((count & 31) as i32);
                    $name($shr(self.0, count))
                }
            }
        }

        impl_lanewise_div!($name);
        impl_assign_ops!($name);

        impl SimdInt for $name {}
    };
}

avx2_int_vector!(
    Avx2I32x8,
    i32,
    signed_key,
    _mm256_min_epi32,
    _mm256_max_epi32,
    _mm_min_epi32,
    _mm_max_epi32,
    _mm256_sra_epi32
);
avx2_int_vector!(
    Avx2U32x8,
    u32,
    unsigned_key,
    _mm256_min_epu32,
    _mm256_max_epu32,
    _mm_min_epu32,
    _mm_max_epu32,
    _mm256_srl_epi32
);

impl_index_vector!(Avx2I32x8, Avx2U32x8);
impl_lanes_debug!(Avx2F32x8, Avx2F64x4, Avx2I32x8, Avx2U32x8, Avx2Mask32x8, Avx2Mask64x4);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_f32_sum_folds_high_half_first() {
        let v = Avx2F32x8::from_array([1.0e8, 1.0, 0.0, 0.0, -1.0e8, 1.0, 0.0, 0.0]);
        assert_eq!(v.horizontal_sum(), 2.0);
    }

    #[test]
    fn test_masked_store_leaves_unset_lanes() {
        let mut out = [9.0f32; 8];
        let mask = Avx2Mask32x8::from_array([true, false, true, false, false, false, false, true]);
        Avx2F32x8::splat(1.0).store_masked(&mut out, mask);
        assert_eq!(out, [1.0, 9.0, 1.0, 9.0, 9.0, 9.0, 9.0, 1.0]);
    }

    #[test]
    fn test_unsigned_min_max() {
        let a = Avx2U32x8::splat(u32::MAX);
        let b = Avx2U32x8::indexes_from_zero();
        assert_eq!(a.min(b).to_array(), [0, 1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(b.horizontal_max(), 7);
        assert!(b.cmp_lt(a).all());
    }

    #[test]
    fn test_f64_reductions() {
        let v = Avx2F64x4::from_array([1.0, 2.0, 3.0, 4.0]);
        assert_eq!(v.horizontal_sum(), 10.0);
        assert_eq!(v.horizontal_product(), 24.0);
        assert_eq!(v.horizontal_min(), 1.0);
        assert_eq!(v.horizontal_max(), 4.0);
    }
}
