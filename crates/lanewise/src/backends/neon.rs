//! NEON backend implementation (ARM64)
//!
//! This backend provides 128-bit SIMD operations using ARM NEON instructions:
//! 4 lanes of f32/i32/u32 and 2 lanes of f64.
//! Available on all ARM64 CPUs (Apple Silicon, AWS Graviton, Raspberry Pi 4+, etc.).
//!
//! **Note**: NEON is mandatory for ARM64, so no runtime detection is needed.
//!
//! NEON has no non-temporal vector store; streaming stores are ordinary
//! stores here. `vminq`/`vmaxq` propagate NaN, which differs from the
//! `a < b ? a : b` contract, so float min/max are built from a compare and
//! a bit select instead.

// This backend only compiles on aarch64 targets
#![cfg(target_arch = "aarch64")]

use core::arch::aarch64::*;
use core::ops::{Add, BitAnd, BitOr, BitXor, Mul, Neg, Not, Shl, Shr, Sub};

use crate::access::{check_len, debug_check_alignment};
use crate::element::Element;
use crate::isa::Neon;
use crate::lane_width::LaneWidth;
use crate::traits::{SimdFloat, SimdInt, SimdMask, SimdVector};

/// NEON vector wrapper (4 lanes of f32)
#[derive(Copy, Clone)]
#[repr(transparent)]
pub struct NeonF32x4(float32x4_t);

/// NEON vector wrapper (2 lanes of f64)
#[derive(Copy, Clone)]
#[repr(transparent)]
pub struct NeonF64x2(float64x2_t);

/// NEON integer vector wrapper (4 lanes of i32)
#[derive(Copy, Clone)]
#[repr(transparent)]
pub struct NeonI32x4(int32x4_t);

/// NEON integer vector wrapper (4 lanes of u32)
#[derive(Copy, Clone)]
#[repr(transparent)]
pub struct NeonU32x4(uint32x4_t);

/// NEON mask wrapper (4-lane mask)
///
/// Uses uint32x4_t to represent per-lane boolean values.
#[derive(Copy, Clone)]
#[repr(transparent)]
pub struct NeonMask32x4(uint32x4_t);

/// NEON mask wrapper for f64 vectors (2-lane mask)
#[derive(Copy, Clone)]
#[repr(transparent)]
pub struct NeonMask64x2(uint64x2_t);

impl LaneWidth<Neon> for f32 {
    type Vector = NeonF32x4;
}

impl LaneWidth<Neon> for f64 {
    type Vector = NeonF64x2;
}

impl LaneWidth<Neon> for i32 {
    type Vector = NeonI32x4;
}

impl LaneWidth<Neon> for u32 {
    type Vector = NeonU32x4;
}

// Masks

impl SimdMask for NeonMask32x4 {
    type Array = [bool; 4];

    const LANES: usize = 4;

    #[inline(always)]
    fn splat(value: bool) -> Self {
        unsafe { NeonMask32x4(vdupq_n_u32(if value { u32::MAX } else { 0 })) }
    }

    #[inline(always)]
    fn from_array(lanes: [bool; 4]) -> Self {
        let raw = lanes.map(|set| if set { u32::MAX } else { 0 });
        unsafe { NeonMask32x4(vld1q_u32(raw.as_ptr())) }
    }

    #[inline(always)]
    fn to_array(self) -> [bool; 4] {
        let mut raw = [0u32; 4];
        unsafe { vst1q_u32(raw.as_mut_ptr(), self.0) };
        raw.map(|lane| lane != 0)
    }

    #[inline(always)]
    fn all(self) -> bool {
        unsafe { vminvq_u32(self.0) == u32::MAX }
    }

    #[inline(always)]
    fn any(self) -> bool {
        unsafe { vmaxvq_u32(self.0) != 0 }
    }

    #[inline(always)]
    fn none(self) -> bool {
        !self.any()
    }

    #[inline(always)]
    fn not(self) -> Self {
        !self
    }
}

impl BitAnd for NeonMask32x4 {
    type Output = Self;

    #[inline(always)]
    fn bitand(self, rhs: Self) -> Self {
        unsafe { NeonMask32x4(vandq_u32(self.0, rhs.0)) }
    }
}

impl BitOr for NeonMask32x4 {
    type Output = Self;

    #[inline(always)]
    fn bitor(self, rhs: Self) -> Self {
        unsafe { NeonMask32x4(vorrq_u32(self.0, rhs.0)) }
    }
}

impl BitXor for NeonMask32x4 {
    type Output = Self;

    #[inline(always)]
    fn bitxor(self, rhs: Self) -> Self {
        unsafe { NeonMask32x4(veorq_u32(self.0, rhs.0)) }
    }
}

impl Not for NeonMask32x4 {
    type Output = Self;

    #[inline(always)]
    fn not(self) -> Self {
        unsafe { NeonMask32x4(vmvnq_u32(self.0)) }
    }
}

impl SimdMask for NeonMask64x2 {
    type Array = [bool; 2];

    const LANES: usize = 2;

    #[inline(always)]
    fn splat(value: bool) -> Self {
        unsafe { NeonMask64x2(vdupq_n_u64(if value { u64::MAX } else { 0 })) }
    }

    #[inline(always)]
    fn from_array(lanes: [bool; 2]) -> Self {
        let raw = lanes.map(|set| if set { u64::MAX } else { 0 });
        unsafe { NeonMask64x2(vld1q_u64(raw.as_ptr())) }
    }

    #[inline(always)]
    fn to_array(self) -> [bool; 2] {
        let mut raw = [0u64; 2];
        unsafe { vst1q_u64(raw.as_mut_ptr(), self.0) };
        raw.map(|lane| lane != 0)
    }

    #[inline(always)]
    fn not(self) -> Self {
        !self
    }
}

impl BitAnd for NeonMask64x2 {
    type Output = Self;

    #[inline(always)]
    fn bitand(self, rhs: Self) -> Self {
        unsafe { NeonMask64x2(vandq_u64(self.0, rhs.0)) }
    }
}

impl BitOr for NeonMask64x2 {
    type Output = Self;

    #[inline(always)]
    fn bitor(self, rhs: Self) -> Self {
        unsafe { NeonMask64x2(vorrq_u64(self.0, rhs.0)) }
    }
}

impl BitXor for NeonMask64x2 {
    type Output = Self;

    #[inline(always)]
    fn bitxor(self, rhs: Self) -> Self {
        unsafe { NeonMask64x2(veorq_u64(self.0, rhs.0)) }
    }
}

impl Not for NeonMask64x2 {
    type Output = Self;

    #[inline(always)]
    fn not(self) -> Self {
        unsafe { NeonMask64x2(veorq_u64(self.0, vdupq_n_u64(u64::MAX))) }
    }
}

// f32 x 4

impl SimdVector for NeonF32x4 {
    type Scalar = f32;
    type Mask = NeonMask32x4;
    type Array = [f32; 4];

    const LANES: usize = 4;

    #[inline(always)]
    fn splat(value: f32) -> Self {
        unsafe { NeonF32x4(vdupq_n_f32(value)) }
    }

    #[inline(always)]
    fn from_array(lanes: [f32; 4]) -> Self {
        unsafe { NeonF32x4(vld1q_f32(lanes.as_ptr())) }
    }

    #[inline(always)]
    fn to_array(self) -> [f32; 4] {
        let mut out = [0.0f32; 4];
        unsafe { vst1q_f32(out.as_mut_ptr(), self.0) };
        out
    }

    #[inline(always)]
    #[track_caller]
    fn load_unaligned(slice: &[f32]) -> Self {
        check_len(slice.len(), Self::LANES);
        unsafe { NeonF32x4(vld1q_f32(slice.as_ptr())) }
    }

    #[inline(always)]
    #[track_caller]
    fn load_aligned(slice: &[f32]) -> Self {
        check_len(slice.len(), Self::LANES);
        debug_check_alignment(slice.as_ptr(), Self::ALIGN);
        unsafe { NeonF32x4(vld1q_f32(slice.as_ptr())) }
    }

    #[inline(always)]
    #[track_caller]
    fn store_unaligned(self, slice: &mut [f32]) {
        check_len(slice.len(), Self::LANES);
        unsafe { vst1q_f32(slice.as_mut_ptr(), self.0) }
    }

    #[inline(always)]
    #[track_caller]
    fn store_aligned(self, slice: &mut [f32]) {
        check_len(slice.len(), Self::LANES);
        debug_check_alignment(slice.as_ptr(), Self::ALIGN);
        unsafe { vst1q_f32(slice.as_mut_ptr(), self.0) }
    }

    #[inline(always)]
    fn cmp_eq(self, rhs: Self) -> NeonMask32x4 {
        unsafe { NeonMask32x4(vceqq_f32(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn cmp_ne(self, rhs: Self) -> NeonMask32x4 {
        unsafe { NeonMask32x4(vmvnq_u32(vceqq_f32(self.0, rhs.0))) }
    }

    #[inline(always)]
    fn cmp_lt(self, rhs: Self) -> NeonMask32x4 {
        unsafe { NeonMask32x4(vcltq_f32(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn cmp_le(self, rhs: Self) -> NeonMask32x4 {
        unsafe { NeonMask32x4(vcleq_f32(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn cmp_gt(self, rhs: Self) -> NeonMask32x4 {
        unsafe { NeonMask32x4(vcgtq_f32(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn cmp_ge(self, rhs: Self) -> NeonMask32x4 {
        unsafe { NeonMask32x4(vcgeq_f32(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn min(self, rhs: Self) -> Self {
        unsafe { NeonF32x4(vbslq_f32(vcltq_f32(self.0, rhs.0), self.0, rhs.0)) }
    }

    #[inline(always)]
    fn max(self, rhs: Self) -> Self {
        unsafe { NeonF32x4(vbslq_f32(vcgtq_f32(self.0, rhs.0), self.0, rhs.0)) }
    }

    #[inline(always)]
    fn select(mask: NeonMask32x4, true_val: Self, false_val: Self) -> Self {
        unsafe { NeonF32x4(vbslq_f32(mask.0, true_val.0, false_val.0)) }
    }

    #[inline(always)]
    fn horizontal_sum(self) -> f32 {
        unsafe {
            // [v0+v2, v1+v3]
            let pair = vadd_f32(vget_low_f32(self.0), vget_high_f32(self.0));
            vget_lane_f32::<0>(pair) + vget_lane_f32::<1>(pair)
        }
    }

    #[inline(always)]
    fn horizontal_product(self) -> f32 {
        unsafe {
            let pair = vmul_f32(vget_low_f32(self.0), vget_high_f32(self.0));
            vget_lane_f32::<0>(pair) * vget_lane_f32::<1>(pair)
        }
    }

    #[inline(always)]
    fn horizontal_min(self) -> f32 {
        unsafe {
            let (low, high) = (vget_low_f32(self.0), vget_high_f32(self.0));
            let pair = vbsl_f32(vclt_f32(low, high), low, high);
            vget_lane_f32::<0>(pair).lane_min(vget_lane_f32::<1>(pair))
        }
    }

    #[inline(always)]
    fn horizontal_max(self) -> f32 {
        unsafe {
            let (low, high) = (vget_low_f32(self.0), vget_high_f32(self.0));
            let pair = vbsl_f32(vcgt_f32(low, high), low, high);
            vget_lane_f32::<0>(pair).lane_max(vget_lane_f32::<1>(pair))
        }
    }
}

impl Add for NeonF32x4 {
    type Output = Self;

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        unsafe { NeonF32x4(vaddq_f32(self.0, rhs.0)) }
    }
}

impl Sub for NeonF32x4 {
    type Output = Self;

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        unsafe { NeonF32x4(vsubq_f32(self.0, rhs.0)) }
    }
}

impl Mul for NeonF32x4 {
    type Output = Self;

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        unsafe { NeonF32x4(vmulq_f32(self.0, rhs.0)) }
    }
}

impl core::ops::Div for NeonF32x4 {
    type Output = Self;

    #[inline(always)]
    fn div(self, rhs: Self) -> Self {
        unsafe { NeonF32x4(vdivq_f32(self.0, rhs.0)) }
    }
}

impl Neg for NeonF32x4 {
    type Output = Self;

    #[inline(always)]
    fn neg(self) -> Self {
        unsafe { NeonF32x4(vnegq_f32(self.0)) }
    }
}

impl_assign_ops!(NeonF32x4);

impl SimdFloat for NeonF32x4 {
    #[inline(always)]
    fn abs(self) -> Self {
        unsafe { NeonF32x4(vabsq_f32(self.0)) }
    }

    #[inline(always)]
    fn sqrt(self) -> Self {
        unsafe { NeonF32x4(vsqrtq_f32(self.0)) }
    }

    #[inline(always)]
    fn floor(self) -> Self {
        unsafe { NeonF32x4(vrndmq_f32(self.0)) }
    }

    #[inline(always)]
    fn ceil(self) -> Self {
        unsafe { NeonF32x4(vrndpq_f32(self.0)) }
    }

    #[inline(always)]
    fn mul_add(self, b: Self, c: Self) -> Self {
        // vfmaq computes c + self * b with a single rounding
        unsafe { NeonF32x4(vfmaq_f32(c.0, self.0, b.0)) }
    }
}

// f64 x 2

impl SimdVector for NeonF64x2 {
    type Scalar = f64;
    type Mask = NeonMask64x2;
    type Array = [f64; 2];

    const LANES: usize = 2;

    #[inline(always)]
    fn splat(value: f64) -> Self {
        unsafe { NeonF64x2(vdupq_n_f64(value)) }
    }

    #[inline(always)]
    fn from_array(lanes: [f64; 2]) -> Self {
        unsafe { NeonF64x2(vld1q_f64(lanes.as_ptr())) }
    }

    #[inline(always)]
    fn to_array(self) -> [f64; 2] {
        let mut out = [0.0f64; 2];
        unsafe { vst1q_f64(out.as_mut_ptr(), self.0) };
        out
    }

    #[inline(always)]
    #[track_caller]
    fn load_unaligned(slice: &[f64]) -> Self {
        check_len(slice.len(), Self::LANES);
        unsafe { NeonF64x2(vld1q_f64(slice.as_ptr())) }
    }

    #[inline(always)]
    #[track_caller]
    fn load_aligned(slice: &[f64]) -> Self {
        check_len(slice.len(), Self::LANES);
        debug_check_alignment(slice.as_ptr(), Self::ALIGN);
        unsafe { NeonF64x2(vld1q_f64(slice.as_ptr())) }
    }

    #[inline(always)]
    #[track_caller]
    fn store_unaligned(self, slice: &mut [f64]) {
        check_len(slice.len(), Self::LANES);
        unsafe { vst1q_f64(slice.as_mut_ptr(), self.0) }
    }

    #[inline(always)]
    #[track_caller]
    fn store_aligned(self, slice: &mut [f64]) {
        check_len(slice.len(), Self::LANES);
        debug_check_alignment(slice.as_ptr(), Self::ALIGN);
        unsafe { vst1q_f64(slice.as_mut_ptr(), self.0) }
    }

    #[inline(always)]
    fn cmp_eq(self, rhs: Self) -> NeonMask64x2 {
        unsafe { NeonMask64x2(vceqq_f64(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn cmp_ne(self, rhs: Self) -> NeonMask64x2 {
        !self.cmp_eq(rhs)
    }

    #[inline(always)]
    fn cmp_lt(self, rhs: Self) -> NeonMask64x2 {
        unsafe { NeonMask64x2(vcltq_f64(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn cmp_le(self, rhs: Self) -> NeonMask64x2 {
        unsafe { NeonMask64x2(vcleq_f64(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn cmp_gt(self, rhs: Self) -> NeonMask64x2 {
        unsafe { NeonMask64x2(vcgtq_f64(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn cmp_ge(self, rhs: Self) -> NeonMask64x2 {
        unsafe { NeonMask64x2(vcgeq_f64(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn min(self, rhs: Self) -> Self {
        unsafe { NeonF64x2(vbslq_f64(vcltq_f64(self.0, rhs.0), self.0, rhs.0)) }
    }

    #[inline(always)]
    fn max(self, rhs: Self) -> Self {
        unsafe { NeonF64x2(vbslq_f64(vcgtq_f64(self.0, rhs.0), self.0, rhs.0)) }
    }

    #[inline(always)]
    fn select(mask: NeonMask64x2, true_val: Self, false_val: Self) -> Self {
        unsafe { NeonF64x2(vbslq_f64(mask.0, true_val.0, false_val.0)) }
    }

    #[inline(always)]
    fn horizontal_sum(self) -> f64 {
        unsafe { vgetq_lane_f64::<0>(self.0) + vgetq_lane_f64::<1>(self.0) }
    }

    #[inline(always)]
    fn horizontal_product(self) -> f64 {
        unsafe { vgetq_lane_f64::<0>(self.0) * vgetq_lane_f64::<1>(self.0) }
    }

    #[inline(always)]
    fn horizontal_min(self) -> f64 {
        unsafe { vgetq_lane_f64::<0>(self.0).lane_min(vgetq_lane_f64::<1>(self.0)) }
    }

    #[inline(always)]
    fn horizontal_max(self) -> f64 {
        unsafe { vgetq_lane_f64::<0>(self.0).lane_max(vgetq_lane_f64::<1>(self.0)) }
    }
}

impl Add for NeonF64x2 {
    type Output = Self;

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        unsafe { NeonF64x2(vaddq_f64(self.0, rhs.0)) }
    }
}

impl Sub for NeonF64x2 {
    type Output = Self;

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        unsafe { NeonF64x2(vsubq_f64(self.0, rhs.0)) }
    }
}

impl Mul for NeonF64x2 {
    type Output = Self;

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        unsafe { NeonF64x2(vmulq_f64(self.0, rhs.0)) }
    }
}

impl core::ops::Div for NeonF64x2 {
    type Output = Self;

    #[inline(always)]
    fn div(self, rhs: Self) -> Self {
        unsafe { NeonF64x2(vdivq_f64(self.0, rhs.0)) }
    }
}

impl Neg for NeonF64x2 {
    type Output = Self;

    #[inline(always)]
    fn neg(self) -> Self {
        unsafe { NeonF64x2(vnegq_f64(self.0)) }
    }
}

impl_assign_ops!(NeonF64x2);

impl SimdFloat for NeonF64x2 {
    #[inline(always)]
    fn abs(self) -> Self {
        unsafe { NeonF64x2(vabsq_f64(self.0)) }
    }

    #[inline(always)]
    fn sqrt(self) -> Self {
        unsafe { NeonF64x2(vsqrtq_f64(self.0)) }
    }

    #[inline(always)]
    fn floor(self) -> Self {
        unsafe { NeonF64x2(vrndmq_f64(self.0)) }
    }

    #[inline(always)]
    fn ceil(self) -> Self {
        unsafe { NeonF64x2(vrndpq_f64(self.0)) }
    }

    #[inline(always)]
    fn mul_add(self, b: Self, c: Self) -> Self {
        unsafe { NeonF64x2(vfmaq_f64(c.0, self.0, b.0)) }
    }
}

// 32-bit integers

#[inline(always)]
fn neg_s32(v: int32x4_t) -> int32x4_t {
    unsafe { vnegq_s32(v) }
}

#[inline(always)]
fn neg_u32(v: uint32x4_t) -> uint32x4_t {
    unsafe { vreinterpretq_u32_s32(vnegq_s32(vreinterpretq_s32_u32(v))) }
}

macro_rules! neon_int_vector {
    (
        $name:ident, $t:ty,
        dup: $dup:ident, load: $ld:ident, store: $st:ident,
        add: $add:ident, sub: $sub:ident, mul: $mul:ident, neg: $neg:ident,
        eq: $eq:ident, lt: $lt:ident, le: $le:ident, gt: $gt:ident, ge: $ge:ident,
        min: $min:ident, max: $max:ident, minv: $minv:ident, maxv: $maxv:ident, addv: $addv:ident,
        bsl: $bsl:ident, and: $and:ident, or: $or:ident, xor: $xor:ident, not: $not:ident,
        shl: $shl:ident
    ) => {
        impl SimdVector for $name {
            type Scalar = $t;
            type Mask = NeonMask32x4;
            type Array = [$t; 4];

            const LANES: usize = 4;

            #[inline(always)]
            fn splat(value: $t) -> Self {
                unsafe { $name($dup(value)) }
            }

            #[inline(always)]
            fn from_array(lanes: [$t; 4]) -> Self {
                unsafe { $name($ld(lanes.as_ptr())) }
            }

            #[inline(always)]
            fn to_array(self) -> [$t; 4] {
                let mut out = [0 as $t; 4];
                unsafe { $st(out.as_mut_ptr(), self.0) };
                out
            }

            #[inline(always)]
            #[track_caller]
            fn load_unaligned(slice: &[$t]) -> Self {
                check_len(slice.len(), Self::LANES);
                unsafe { $name($ld(slice.as_ptr())) }
            }

            #[inline(always)]
            #[track_caller]
            fn load_aligned(slice: &[$t]) -> Self {
                check_len(slice.len(), Self::LANES);
                debug_check_alignment(slice.as_ptr(), Self::ALIGN);
                unsafe { $name($ld(slice.as_ptr())) }
            }

            #[inline(always)]
            #[track_caller]
            fn store_unaligned(self, slice: &mut [$t]) {
                check_len(slice.len(), Self::LANES);
                unsafe { $st(slice.as_mut_ptr(), self.0) }
            }

            #[inline(always)]
            #[track_caller]
            fn store_aligned(self, slice: &mut [$t]) {
                check_len(slice.len(), Self::LANES);
                debug_check_alignment(slice.as_ptr(), Self::ALIGN);
                unsafe { $st(slice.as_mut_ptr(), self.0) }
            }

            #[inline(always)]
            fn cmp_eq(self, rhs: Self) -> NeonMask32x4 {
                unsafe { NeonMask32x4($eq(self.0, rhs.0)) }
            }

            #[inline(always)]
            fn cmp_ne(self, rhs: Self) -> NeonMask32x4 {
                !self.cmp_eq(rhs)
            }

            #[inline(always)]
            fn cmp_lt(self, rhs: Self) -> NeonMask32x4 {
                unsafe { NeonMask32x4($lt(self.0, rhs.0)) }
            }

            #[inline(always)]
            fn cmp_le(self, rhs: Self) -> NeonMask32x4 {
                unsafe { NeonMask32x4($le(self.0, rhs.0)) }
            }

            #[inline(always)]
            fn cmp_gt(self, rhs: Self) -> NeonMask32x4 {
                unsafe { NeonMask32x4($gt(self.0, rhs.0)) }
            }

            #[inline(always)]
            fn cmp_ge(self, rhs: Self) -> NeonMask32x4 {
                unsafe { NeonMask32x4($ge(self.0, rhs.0)) }
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
            fn select(mask: NeonMask32x4, true_val: Self, false_val: Self) -> Self {
                unsafe { $name($bsl(mask.0, true_val.0, false_val.0)) }
            }

            // Integer reductions are order independent, so the across-vector
            // instructions give the same result as the halving tree
            #[inline(always)]
            fn horizontal_sum(self) -> $t {
                unsafe { $addv(self.0) }
            }

            #[inline(always)]
            fn horizontal_min(self) -> $t {
                unsafe { $minv(self.0) }
            }

            #[inline(always)]
            fn horizontal_max(self) -> $t {
                unsafe { $maxv(self.0) }
            }
        }

        impl Add for $name {
            type Output = Self;

            #[inline(always)]
            fn add(self, rhs: Self) -> Self {
                unsafe { $name($add(self.0, rhs.0)) }
            }
        }

        impl Sub for $name {
            type Output = Self;

            #[inline(always)]
            fn sub(self, rhs: Self) -> Self {
                unsafe { $name($sub(self.0, rhs.0)) }
            }
        }

        impl Mul for $name {
            type Output = Self;

            #[inline(always)]
            fn mul(self, rhs: Self) -> Self {
                unsafe { $name($mul(self.0, rhs.0)) }
            }
        }

        impl Neg for $name {
            type Output = Self;

            #[inline(always)]
            fn neg(self) -> Self {
                $name($neg(self.0))
            }
        }

        impl BitAnd for $name {
            type Output = Self;

            #[inline(always)]
            fn bitand(self, rhs: Self) -> Self {
                unsafe { $name($and(self.0, rhs.0)) }
            }
        }

        impl BitOr for $name {
            type Output = Self;

            #[inline(always)]
            fn bitor(self, rhs: Self) -> Self {
                unsafe { $name($or(self.0, rhs.0)) }
            }
        }

        impl BitXor for $name {
            type Output = Self;

            #[inline(always)]
            fn bitxor(self, rhs: Self) -> Self {
                unsafe { $name($xor(self.0, rhs.0)) }
            }
        }

        impl Not for $name {
            type Output = Self;

            #[inline(always)]
            fn not(self) -> Self {
                unsafe { $name($not(self.0)) }
            }
        }

        impl Shl<u32> for $name {
            type Output = Self;

            #[inline(always)]
            fn shl(self, count: u32) -> Self {
                // Positive shift counts shift left
                unsafe { $name($shl(self.0, vdupq_n_s32((count & 31) as i32))) }
            }
        }

        impl Shr<u32> for $name {
            type Output = Self;

            #[inline(always)]
            fn shr(self, count: u32) -> Self {
                // Negative shift counts shift right (arithmetic for s32, logical for u32)
                unsafe { $name($shl(self.0, vdupq_n_s32(-((count & 31) as i32)))) }
            }
        }

        impl_lanewise_div!($name);
        impl_assign_ops!($name);

        impl SimdInt for $name {}
    };
}

neon_int_vector!(
    NeonI32x4, i32,
    dup: vdupq_n_s32, load: vld1q_s32, store: vst1q_s32,
    add: vaddq_s32, sub: vsubq_s32, mul: vmulq_s32, neg: neg_s32,
    eq: vceqq_s32, lt: vcltq_s32, le: vcleq_s32, gt: vcgtq_s32, ge: vcgeq_s32,
    min: vminq_s32, max: vmaxq_s32, minv: vminvq_s32, maxv: vmaxvq_s32, addv: vaddvq_s32,
    bsl: vbslq_s32, and: vandq_s32, or: vorrq_s32, xor: veorq_s32, not: vmvnq_s32,
    shl: vshlq_s32
);

neon_int_vector!(
    NeonU32x4, u32,
    dup: vdupq_n_u32, load: vld1q_u32, store: vst1q_u32,
    add: vaddq_u32, sub: vsubq_u32, mul: vmulq_u32, neg: neg_u32,
    eq: vceqq_u32, lt: vcltq_u32, le: vcleq_u32, gt: vcgtq_u32, ge: vcgeq_u32,
    min: vminq_u32, max: vmaxq_u32, minv: vminvq_u32, maxv: vmaxvq_u32, addv: vaddvq_u32,
    bsl: vbslq_u32, and: vandq_u32, or: vorrq_u32, xor: veorq_u32, not: vmvnq_u32,
    shl: vshlq_u32
);

impl_index_vector!(NeonI32x4, NeonU32x4);
impl_lanes_debug!(NeonF32x4, NeonF64x2, NeonI32x4, NeonU32x4, NeonMask32x4, NeonMask64x2);
