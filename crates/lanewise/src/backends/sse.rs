//! SSE4.1 backend implementation (x86/x86_64)
//!
//! 128-bit registers: 4 lanes of f32/i32/u32, 2 lanes of f64.
//!
//! **Note**: This implementation assumes SSE4.1 is available when the `sse41` feature is
//! enabled. Call [`check_cpu_support`](crate::cpu::check_cpu_support) at startup to turn a
//! mismatch into an error instead of an illegal-instruction fault.
//!
//! SSE has no unsigned 32-bit compare, so `u32` comparisons flip the sign bit of both
//! operands and compare as signed. There is no fused multiply-add either; `mul_add` goes
//! lane by lane through the correctly rounded software FMA so that results match the
//! other backends bit for bit.

// This backend only compiles on x86/x86_64 targets
#![cfg(any(target_arch = "x86", target_arch = "x86_64"))]

#[cfg(target_arch = "x86")]
use core::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use core::arch::x86_64::*;

use core::array;
use core::ops::{Add, BitAnd, BitOr, BitXor, Mul, Neg, Not, Shl, Shr, Sub};

use crate::access::{check_len, debug_check_alignment};
use crate::element::FloatElement;
use crate::isa::Sse41;
use crate::lane_width::LaneWidth;
use crate::traits::{SimdFloat, SimdInt, SimdMask, SimdVector};

/// 4 lanes of f32
#[derive(Copy, Clone)]
#[repr(transparent)]
pub struct SseF32x4(__m128);

/// 2 lanes of f64
#[derive(Copy, Clone)]
#[repr(transparent)]
pub struct SseF64x2(__m128d);

/// 4 lanes of i32
#[derive(Copy, Clone)]
#[repr(transparent)]
pub struct SseI32x4(__m128i);

/// 4 lanes of u32
#[derive(Copy, Clone)]
#[repr(transparent)]
pub struct SseU32x4(__m128i);

/// 4-lane mask (all bits of a lane set or clear)
#[derive(Copy, Clone)]
#[repr(transparent)]
pub struct SseMask32x4(__m128i);

/// 2-lane mask for f64 vectors
#[derive(Copy, Clone)]
#[repr(transparent)]
pub struct SseMask64x2(__m128i);

impl LaneWidth<Sse41> for f32 {
    type Vector = SseF32x4;
}

impl LaneWidth<Sse41> for f64 {
    type Vector = SseF64x2;
}

impl LaneWidth<Sse41> for i32 {
    type Vector = SseI32x4;
}

impl LaneWidth<Sse41> for u32 {
    type Vector = SseU32x4;
}

// Masks

impl SseMask32x4 {
    #[inline(always)]
    fn from_ps(mask: __m128) -> Self {
        unsafe { SseMask32x4(_mm_castps_si128(mask)) }
    }

    #[inline(always)]
    fn as_ps(self) -> __m128 {
        unsafe { _mm_castsi128_ps(self.0) }
    }
}

impl SimdMask for SseMask32x4 {
    type Array = [bool; 4];

    const LANES: usize = 4;

    #[inline(always)]
    fn splat(value: bool) -> Self {
        unsafe { SseMask32x4(_mm_set1_epi32(-i32::from(value))) }
    }

    #[inline(always)]
    fn from_array(lanes: [bool; 4]) -> Self {
        let [a, b, c, d] = lanes.map(|set| -i32::from(set));
        unsafe { SseMask32x4(_mm_setr_epi32(a, b, c, d)) }
    }

    #[inline(always)]
    fn to_array(self) -> [bool; 4] {
        let bits = self.to_bitmask();
        array::from_fn(|lane| (bits >> lane) & 1 == 1)
    }

    #[inline(always)]
    fn to_bitmask(self) -> u64 {
        unsafe { _mm_movemask_ps(self.as_ps()) as u64 }
    }

    #[inline(always)]
    fn not(self) -> Self {
        !self
    }
}

impl SseMask64x2 {
    #[inline(always)]
    fn from_pd(mask: __m128d) -> Self {
        unsafe { SseMask64x2(_mm_castpd_si128(mask)) }
    }

    #[inline(always)]
    fn as_pd(self) -> __m128d {
        unsafe { _mm_castsi128_pd(self.0) }
    }
}

impl SimdMask for SseMask64x2 {
    type Array = [bool; 2];

    const LANES: usize = 2;

    #[inline(always)]
    fn splat(value: bool) -> Self {
        unsafe { SseMask64x2(_mm_set1_epi64x(-i64::from(value))) }
    }

    #[inline(always)]
    fn from_array(lanes: [bool; 2]) -> Self {
        // _mm_set_epi64x takes the high lane first
        unsafe { SseMask64x2(_mm_set_epi64x(-i64::from(lanes[1]), -i64::from(lanes[0]))) }
    }

    #[inline(always)]
    fn to_array(self) -> [bool; 2] {
        let bits = self.to_bitmask();
        [bits & 1 == 1, bits & 2 == 2]
    }

    #[inline(always)]
    fn to_bitmask(self) -> u64 {
        unsafe { _mm_movemask_pd(self.as_pd()) as u64 }
    }

    #[inline(always)]
    fn not(self) -> Self {
        !self
    }
}

macro_rules! sse_mask_bitops {
    ($($mask:ident),*) => {
        $(
            impl BitAnd for $mask {
                type Output = Self;

                #[inline(always)]
                fn bitand(self, rhs: Self) -> Self {
                    unsafe { $mask(_mm_and_si128(self.0, rhs.0)) }
                }
            }

            impl BitOr for $mask {
                type Output = Self;

                #[inline(always)]
                fn bitor(self, rhs: Self) -> Self {
                    unsafe { $mask(_mm_or_si128(self.0, rhs.0)) }
                }
            }

            impl BitXor for $mask {
                type Output = Self;

                #[inline(always)]
                fn bitxor(self, rhs: Self) -> Self {
                    unsafe { $mask(_mm_xor_si128(self.0, rhs.0)) }
                }
            }

            impl Not for $mask {
                type Output = Self;

                #[inline(always)]
                fn not(self) -> Self {
                    unsafe { $mask(_mm_xor_si128(self.0, _mm_set1_epi32(-1))) }
                }
            }
        )*
    };
}

sse_mask_bitops!(SseMask32x4, SseMask64x2);

// f32 x 4

impl SimdVector for SseF32x4 {
    type Scalar = f32;
    type Mask = SseMask32x4;
    type Array = [f32; 4];

    const LANES: usize = 4;

    #[inline(always)]
    fn splat(value: f32) -> Self {
        unsafe { SseF32x4(_mm_set1_ps(value)) }
    }

    #[inline(always)]
    fn zero() -> Self {
        unsafe { SseF32x4(_mm_setzero_ps()) }
    }

    #[inline(always)]
    fn indexes_from_zero() -> Self {
        unsafe { SseF32x4(_mm_setr_ps(0.0, 1.0, 2.0, 3.0)) }
    }

    #[inline(always)]
    fn from_array(lanes: [f32; 4]) -> Self {
        unsafe { SseF32x4(_mm_loadu_ps(lanes.as_ptr())) }
    }

    #[inline(always)]
    fn to_array(self) -> [f32; 4] {
        let mut out = [0.0f32; 4];
        unsafe { _mm_storeu_ps(out.as_mut_ptr(), self.0) };
        out
    }

    #[inline(always)]
    #[track_caller]
    fn load_unaligned(slice: &[f32]) -> Self {
        check_len(slice.len(), Self::LANES);
        unsafe { SseF32x4(_mm_loadu_ps(slice.as_ptr())) }
    }

    #[inline(always)]
    #[track_caller]
    fn load_aligned(slice: &[f32]) -> Self {
        check_len(slice.len(), Self::LANES);
        debug_check_alignment(slice.as_ptr(), Self::ALIGN);
        unsafe { SseF32x4(_mm_load_ps(slice.as_ptr())) }
    }

    #[inline(always)]
    #[track_caller]
    fn store_unaligned(self, slice: &mut [f32]) {
        check_len(slice.len(), Self::LANES);
        unsafe { _mm_storeu_ps(slice.as_mut_ptr(), self.0) }
    }

    #[inline(always)]
    #[track_caller]
    fn store_aligned(self, slice: &mut [f32]) {
        check_len(slice.len(), Self::LANES);
        debug_check_alignment(slice.as_ptr(), Self::ALIGN);
        unsafe { _mm_store_ps(slice.as_mut_ptr(), self.0) }
    }

    #[inline(always)]
    #[track_caller]
    fn store_streaming(self, slice: &mut [f32]) {
        check_len(slice.len(), Self::LANES);
        debug_check_alignment(slice.as_ptr(), Self::ALIGN);
        unsafe { _mm_stream_ps(slice.as_mut_ptr(), self.0) }
    }

    #[inline(always)]
    fn cmp_eq(self, rhs: Self) -> SseMask32x4 {
        unsafe { SseMask32x4::from_ps(_mm_cmpeq_ps(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn cmp_ne(self, rhs: Self) -> SseMask32x4 {
        unsafe { SseMask32x4::from_ps(_mm_cmpneq_ps(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn cmp_lt(self, rhs: Self) -> SseMask32x4 {
        unsafe { SseMask32x4::from_ps(_mm_cmplt_ps(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn cmp_le(self, rhs: Self) -> SseMask32x4 {
        unsafe { SseMask32x4::from_ps(_mm_cmple_ps(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn cmp_gt(self, rhs: Self) -> SseMask32x4 {
        unsafe { SseMask32x4::from_ps(_mm_cmpgt_ps(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn cmp_ge(self, rhs: Self) -> SseMask32x4 {
        unsafe { SseMask32x4::from_ps(_mm_cmpge_ps(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn min(self, rhs: Self) -> Self {
        unsafe { SseF32x4(_mm_min_ps(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn max(self, rhs: Self) -> Self {
        unsafe { SseF32x4(_mm_max_ps(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn select(mask: SseMask32x4, true_val: Self, false_val: Self) -> Self {
        unsafe { SseF32x4(_mm_blendv_ps(false_val.0, true_val.0, mask.as_ps())) }
    }

    #[inline(always)]
    fn horizontal_sum(self) -> f32 {
        unsafe {
            // [v0+v2, v1+v3], then lane 0 + lane 1
            let pairs = _mm_add_ps(self.0, _mm_movehl_ps(self.0, self.0));
            let odd = _mm_shuffle_ps::<0b01>(pairs, pairs);
            _mm_cvtss_f32(_mm_add_ss(pairs, odd))
        }
    }

    #[inline(always)]
    fn horizontal_min(self) -> f32 {
        unsafe {
            let pairs = _mm_min_ps(self.0, _mm_movehl_ps(self.0, self.0));
            let odd = _mm_shuffle_ps::<0b01>(pairs, pairs);
            _mm_cvtss_f32(_mm_min_ss(pairs, odd))
        }
    }

    #[inline(always)]
    fn horizontal_max(self) -> f32 {
        unsafe {
            let pairs = _mm_max_ps(self.0, _mm_movehl_ps(self.0, self.0));
            let odd = _mm_shuffle_ps::<0b01>(pairs, pairs);
            _mm_cvtss_f32(_mm_max_ss(pairs, odd))
        }
    }
}

impl Add for SseF32x4 {
    type Output = Self;

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        unsafe { SseF32x4(_mm_add_ps(self.0, rhs.0)) }
    }
}

impl Sub for SseF32x4 {
    type Output = Self;

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        unsafe { SseF32x4(_mm_sub_ps(self.0, rhs.0)) }
    }
}

impl Mul for SseF32x4 {
    type Output = Self;

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        unsafe { SseF32x4(_mm_mul_ps(self.0, rhs.0)) }
    }
}

impl core::ops::Div for SseF32x4 {
    type Output = Self;

    #[inline(always)]
    fn div(self, rhs: Self) -> Self {
        unsafe { SseF32x4(_mm_div_ps(self.0, rhs.0)) }
    }
}

impl Neg for SseF32x4 {
    type Output = Self;

    #[inline(always)]
    fn neg(self) -> Self {
        unsafe { SseF32x4(_mm_xor_ps(self.0, _mm_set1_ps(-0.0))) }
    }
}

impl_assign_ops!(SseF32x4);

impl SimdFloat for SseF32x4 {
    #[inline(always)]
    fn abs(self) -> Self {
        unsafe { SseF32x4(_mm_andnot_ps(_mm_set1_ps(-0.0), self.0)) }
    }

    #[inline(always)]
    fn sqrt(self) -> Self {
        unsafe { SseF32x4(_mm_sqrt_ps(self.0)) }
    }

    #[inline(always)]
    fn floor(self) -> Self {
        unsafe { SseF32x4(_mm_floor_ps(self.0)) }
    }

    #[inline(always)]
    fn ceil(self) -> Self {
        unsafe { SseF32x4(_mm_ceil_ps(self.0)) }
    }

    #[inline(always)]
    fn mul_add(self, b: Self, c: Self) -> Self {
        let (a, b, c) = (self.to_array(), b.to_array(), c.to_array());
        Self::from_array(array::from_fn(|i| a[i].lane_mul_add(b[i], c[i])))
    }
}

// f64 x 2

impl SimdVector for SseF64x2 {
    type Scalar = f64;
    type Mask = SseMask64x2;
    type Array = [f64; 2];

    const LANES: usize = 2;

    #[inline(always)]
    fn splat(value: f64) -> Self {
        unsafe { SseF64x2(_mm_set1_pd(value)) }
    }

    #[inline(always)]
    fn zero() -> Self {
        unsafe { SseF64x2(_mm_setzero_pd()) }
    }

    #[inline(always)]
    fn from_array(lanes: [f64; 2]) -> Self {
        unsafe { SseF64x2(_mm_loadu_pd(lanes.as_ptr())) }
    }

    #[inline(always)]
    fn to_array(self) -> [f64; 2] {
        let mut out = [0.0f64; 2];
        unsafe { _mm_storeu_pd(out.as_mut_ptr(), self.0) };
        out
    }

    #[inline(always)]
    #[track_caller]
    fn load_unaligned(slice: &[f64]) -> Self {
        check_len(slice.len(), Self::LANES);
        unsafe { SseF64x2(_mm_loadu_pd(slice.as_ptr())) }
    }

    #[inline(always)]
    #[track_caller]
    fn load_aligned(slice: &[f64]) -> Self {
        check_len(slice.len(), Self::LANES);
        debug_check_alignment(slice.as_ptr(), Self::ALIGN);
        unsafe { SseF64x2(_mm_load_pd(slice.as_ptr())) }
    }

    #[inline(always)]
    #[track_caller]
    fn store_unaligned(self, slice: &mut [f64]) {
        check_len(slice.len(), Self::LANES);
        unsafe { _mm_storeu_pd(slice.as_mut_ptr(), self.0) }
    }

    #[inline(always)]
    #[track_caller]
    fn store_aligned(self, slice: &mut [f64]) {
        check_len(slice.len(), Self::LANES);
        debug_check_alignment(slice.as_ptr(), Self::ALIGN);
        unsafe { _mm_store_pd(slice.as_mut_ptr(), self.0) }
    }

    #[inline(always)]
    #[track_caller]
    fn store_streaming(self, slice: &mut [f64]) {
        check_len(slice.len(), Self::LANES);
        debug_check_alignment(slice.as_ptr(), Self::ALIGN);
        unsafe { _mm_stream_pd(slice.as_mut_ptr(), self.0) }
    }

    #[inline(always)]
    fn cmp_eq(self, rhs: Self) -> SseMask64x2 {
        unsafe { SseMask64x2::from_pd(_mm_cmpeq_pd(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn cmp_ne(self, rhs: Self) -> SseMask64x2 {
        unsafe { SseMask64x2::from_pd(_mm_cmpneq_pd(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn cmp_lt(self, rhs: Self) -> SseMask64x2 {
        unsafe { SseMask64x2::from_pd(_mm_cmplt_pd(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn cmp_le(self, rhs: Self) -> SseMask64x2 {
        unsafe { SseMask64x2::from_pd(_mm_cmple_pd(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn cmp_gt(self, rhs: Self) -> SseMask64x2 {
        unsafe { SseMask64x2::from_pd(_mm_cmpgt_pd(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn cmp_ge(self, rhs: Self) -> SseMask64x2 {
        unsafe { SseMask64x2::from_pd(_mm_cmpge_pd(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn min(self, rhs: Self) -> Self {
        unsafe { SseF64x2(_mm_min_pd(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn max(self, rhs: Self) -> Self {
        unsafe { SseF64x2(_mm_max_pd(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn select(mask: SseMask64x2, true_val: Self, false_val: Self) -> Self {
        unsafe { SseF64x2(_mm_blendv_pd(false_val.0, true_val.0, mask.as_pd())) }
    }

    #[inline(always)]
    fn horizontal_sum(self) -> f64 {
        unsafe { _mm_cvtsd_f64(_mm_add_sd(self.0, _mm_unpackhi_pd(self.0, self.0))) }
    }

    #[inline(always)]
    fn horizontal_min(self) -> f64 {
        unsafe { _mm_cvtsd_f64(_mm_min_sd(self.0, _mm_unpackhi_pd(self.0, self.0))) }
    }

    #[inline(always)]
    fn horizontal_max(self) -> f64 {
        unsafe { _mm_cvtsd_f64(_mm_max_sd(self.0, _mm_unpackhi_pd(self.0, self.0))) }
    }
}

impl Add for SseF64x2 {
    type Output = Self;

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        unsafe { SseF64x2(_mm_add_pd(self.0, rhs.0)) }
    }
}

impl Sub for SseF64x2 {
    type Output = Self;

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        unsafe { SseF64x2(_mm_sub_pd(self.0, rhs.0)) }
    }
}

impl Mul for SseF64x2 {
    type Output = Self;

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        unsafe { SseF64x2(_mm_mul_pd(self.0, rhs.0)) }
    }
}

impl core::ops::Div for SseF64x2 {
    type Output = Self;

    #[inline(always)]
    fn div(self, rhs: Self) -> Self {
        unsafe { SseF64x2(_mm_div_pd(self.0, rhs.0)) }
    }
}

impl Neg for SseF64x2 {
    type Output = Self;

    #[inline(always)]
    fn neg(self) -> Self {
        unsafe { SseF64x2(_mm_xor_pd(self.0, _mm_set1_pd(-0.0))) }
    }
}

impl_assign_ops!(SseF64x2);

impl SimdFloat for SseF64x2 {
    #[inline(always)]
    fn abs(self) -> Self {
        unsafe { SseF64x2(_mm_andnot_pd(_mm_set1_pd(-0.0), self.0)) }
    }

    #[inline(always)]
    fn sqrt(self) -> Self {
        unsafe { SseF64x2(_mm_sqrt_pd(self.0)) }
    }

    #[inline(always)]
    fn floor(self) -> Self {
        unsafe { SseF64x2(_mm_floor_pd(self.0)) }
    }

    #[inline(always)]
    fn ceil(self) -> Self {
        unsafe { SseF64x2(_mm_ceil_pd(self.0)) }
    }

    #[inline(always)]
    fn mul_add(self, b: Self, c: Self) -> Self {
        let (a, b, c) = (self.to_array(), b.to_array(), c.to_array());
        Self::from_array(array::from_fn(|i| a[i].lane_mul_add(b[i], c[i])))
    }
}

// 32-bit integers
//
// Signed and unsigned lanes share everything except the ordering
// (`$key` maps a lane to something `_mm_cmpgt_epi32` orders correctly),
// min/max and the right shift.

#[inline(always)]
fn signed_key(v: __m128i) -> __m128i {
    v
}

#[inline(always)]
fn unsigned_key(v: __m128i) -> __m128i {
    unsafe { _mm_xor_si128(v, _mm_set1_epi32(i32::MIN)) }
}

macro_rules! sse_int_vector {
    ($name:ident, $t:ty, $key:ident, $min:ident, $max:ident, $shr:ident) => {
        impl SimdVector for $name {
            type Scalar = $t;
            type Mask = SseMask32x4;
            type Array = [$t; 4];

            const LANES: usize = 4;

            #[inline(always)]
            fn splat(value: $t) -> Self {
                unsafe { $name(_mm_set1_epi32(value as i32)) }
            }

            #[inline(always)]
            fn zero() -> Self {
                unsafe { $name(_mm_setzero_si128()) }
            }

            #[inline(always)]
            fn indexes_from_zero() -> Self {
                unsafe { $name(_mm_setr_epi32(0, 1, 2, 3)) }
            }

            #[inline(always)]
            fn from_array(lanes: [$t; 4]) -> Self {
                unsafe { $name(_mm_loadu_si128(lanes.as_ptr().cast::<__m128i>())) }
            }

            #[inline(always)]
            fn to_array(self) -> [$t; 4] {
                let mut out = [0 as $t; 4];
                unsafe { _mm_storeu_si128(out.as_mut_ptr().cast::<__m128i>(), self.0) };
                out
            }

            #[inline(always)]
            #[track_caller]
            fn load_unaligned(slice: &[$t]) -> Self {
                check_len(slice.len(), Self::LANES);
                unsafe { $name(_mm_loadu_si128(slice.as_ptr().cast::<__m128i>())) }
            }

            #[inline(always)]
            #[track_caller]
            fn load_aligned(slice: &[$t]) -> Self {
                check_len(slice.len(), Self::LANES);
                debug_check_alignment(slice.as_ptr(), Self::ALIGN);
                unsafe { $name(_mm_load_si128(slice.as_ptr().cast::<__m128i>())) }
            }

            #[inline(always)]
            #[track_caller]
            fn store_unaligned(self, slice: &mut [$t]) {
                check_len(slice.len(), Self::LANES);
                unsafe { _mm_storeu_si128(slice.as_mut_ptr().cast::<__m128i>(), self.0) }
            }

            #[inline(always)]
            #[track_caller]
            fn store_aligned(self, slice: &mut [$t]) {
                check_len(slice.len(), Self::LANES);
                debug_check_alignment(slice.as_ptr(), Self::ALIGN);
                unsafe { _mm_store_si128(slice.as_mut_ptr().cast::<__m128i>(), self.0) }
            }

            #[inline(always)]
            #[track_caller]
            fn store_streaming(self, slice: &mut [$t]) {
                check_len(slice.len(), Self::LANES);
                debug_check_alignment(slice.as_ptr(), Self::ALIGN);
                unsafe { _mm_stream_si128(slice.as_mut_ptr().cast::<__m128i>(), self.0) }
            }

            #[inline(always)]
            fn cmp_eq(self, rhs: Self) -> SseMask32x4 {
                unsafe { SseMask32x4(_mm_cmpeq_epi32(self.0, rhs.0)) }
            }

            #[inline(always)]
            fn cmp_ne(self, rhs: Self) -> SseMask32x4 {
                !self.cmp_eq(rhs)
            }

            #[inline(always)]
            fn cmp_lt(self, rhs: Self) -> SseMask32x4 {
                unsafe { SseMask32x4(_mm_cmpgt_epi32($key(rhs.0), $key(self.0))) }
            }

            #[inline(always)]
            fn cmp_le(self, rhs: Self) -> SseMask32x4 {
                !self.cmp_gt(rhs)
            }

            #[inline(always)]
            fn cmp_gt(self, rhs: Self) -> SseMask32x4 {
                unsafe { SseMask32x4(_mm_cmpgt_epi32($key(self.0), $key(rhs.0))) }
            }

            #[inline(always)]
            fn cmp_ge(self, rhs: Self) -> SseMask32x4 {
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
            fn select(mask: SseMask32x4, true_val: Self, false_val: Self) -> Self {
                unsafe { $name(_mm_blendv_epi8(false_val.0, true_val.0, mask.0)) }
            }

            #[inline(always)]
            fn horizontal_sum(self) -> $t {
                unsafe {
                    let pairs = _mm_add_epi32(self.0, _mm_unpackhi_epi64(self.0, self.0));
                    let odd = _mm_shuffle_epi32::<0b01>(pairs);
                    _mm_cvtsi128_si32(_mm_add_epi32(pairs, odd)) as $t
                }
            }

            #[inline(always)]
            fn horizontal_product(self) -> $t {
                unsafe {
                    let pairs = _mm_mullo_epi32(self.0, _mm_unpackhi_epi64(self.0, self.0));
                    let odd = _mm_shuffle_epi32::<0b01>(pairs);
                    _mm_cvtsi128_si32(_mm_mullo_epi32(pairs, odd)) as $t
                }
            }

            #[inline(always)]
            fn horizontal_min(self) -> $t {
                unsafe {
                    let pairs = $min(self.0, _mm_unpackhi_epi64(self.0, self.0));
                    let odd = _mm_shuffle_epi32::<0b01>(pairs);
                    _mm_cvtsi128_si32($min(pairs, odd)) as $t
                }
            }

            #[inline(always)]
            fn horizontal_max(self) -> $t {
                unsafe {
                    let pairs = $max(self.0, _mm_unpackhi_epi64(self.0, self.0));
                    let odd = _mm_shuffle_epi32::<0b01>(pairs);
                    _mm_cvtsi128_si32($max(pairs, odd)) as $t
                }
            }
        }

        impl Add for $name {
            type Output = Self;

            #[inline(always)]
            fn add(self, rhs: Self) -> Self {
                unsafe { $name(_mm_add_epi32(self.0, rhs.0)) }
            }
        }

        impl Sub for $name {
            type Output = Self;

            #[inline(always)]
            fn sub(self, rhs: Self) -> Self {
                unsafe { $name(_mm_sub_epi32(self.0, rhs.0)) }
            }
        }

        impl Mul for $name {
            type Output = Self;

            #[inline(always)]
            fn mul(self, rhs: Self) -> Self {
                unsafe { $name(_mm_mullo_epi32(self.0, rhs.0)) }
            }
        }

        impl Neg for $name {
            type Output = Self;

            #[inline(always)]
            fn neg(self) -> Self {
                unsafe { $name(_mm_sub_epi32(_mm_setzero_si128(), self.0)) }
            }
        }

        impl BitAnd for $name {
            type Output = Self;

            #[inline(always)]
            fn bitand(self, rhs: Self) -> Self {
                unsafe { $name(_mm_and_si128(self.0, rhs.0)) }
            }
        }

        impl BitOr for $name {
            type Output = Self;

            #[inline(always)]
            fn bitor(self, rhs: Self) -> Self {
                unsafe { $name(_mm_or_si128(self.0, rhs.0)) }
            }
        }

        impl BitXor for $name {
            type Output = Self;

            #[inline(always)]
            fn bitxor(self, rhs: Self) -> Self {
                unsafe { $name(_mm_xor_si128(self.0, rhs.0)) }
            }
        }

        impl Not for $name {
            type Output = Self;

            #[inline(always)]
            fn not(self) -> Self {
                unsafe { $name(_mm_xor_si128(self.0, _mm_set1_epi32(-1))) }
            }
        }

        impl Shl<u32> for $name {
            type Output = Self;

            #[inline(always)]
            fn shl(self, count: u32) -> Self {
                unsafe { $name(_mm_sll_epi32(self.0, _mm_cvtsi32_si128((count & 31) as i32))) }
            }
        }

        impl Shr<u32> for $name {
            type Output = Self;

            #[inline(always)]
            fn shr(self, count: u32) -> Self {
                unsafe { $name($shr(self.0, _mm_cvtsi32_si128((count & 31) as i32))) }
            }
        }

        impl_lanewise_div!($name);
        impl_assign_ops!($name);

        impl SimdInt for $name {}
    };
}

sse_int_vector!(SseI32x4, i32, signed_key, _mm_min_epi32, _mm_max_epi32, _mm_sra_epi32);
sse_int_vector!(SseU32x4, u32, unsigned_key, _mm_min_epu32, _mm_max_epu32, _mm_srl_epi32);

impl_index_vector!(SseI32x4, SseU32x4);
impl_lanes_debug!(SseF32x4, SseF64x2, SseI32x4, SseU32x4, SseMask32x4, SseMask64x2);
