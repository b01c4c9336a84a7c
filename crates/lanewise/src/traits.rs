//! Core SIMD abstraction traits
//!
//! This module defines the capability contract every backend implements.
//! Backends override the required methods with intrinsics; the provided
//! methods pin down the observable semantics (reduction tree shape, scatter
//! ordering, lane bounds checks) so that a backend which only supplies the
//! required set still behaves identically to the others.

use core::fmt::Debug;
use core::ops::{
    Add, AddAssign, BitAnd, BitOr, BitXor, Div, DivAssign, Mul, MulAssign, Neg, Not, Shl, Shr,
    Sub, SubAssign,
};

use crate::access::{self, AccessMode, LoadStoreFlag};
use crate::element::Element;
use crate::error;

/// Mask type for conditional SIMD operations
///
/// Masks represent per-lane boolean values, enabling branchless conditional logic.
///
/// # Example
///
/// ```rust
/// use lanewise::{Mask, SimdMask, SimdVector, Vector};
///
/// let a = Vector::<f32>::splat(1.0);
/// let b = Vector::<f32>::splat(2.0);
/// let mask: Mask<f32> = a.cmp_lt(b);
/// assert!(mask.all());
/// assert_eq!(mask.count(), Vector::<f32>::LANES);
/// ```
pub trait SimdMask:
    Copy
    + Debug
    + Send
    + Sync
    + 'static
    + BitAnd<Output = Self>
    + BitOr<Output = Self>
    + BitXor<Output = Self>
{
    /// `[bool; LANES]`
    type Array: Copy + Debug + AsRef<[bool]> + AsMut<[bool]>;

    /// Number of lanes
    const LANES: usize;

    /// Set every lane to `value`
    fn splat(value: bool) -> Self;

    /// Build a mask from one boolean per lane
    fn from_array(lanes: Self::Array) -> Self;

    /// One boolean per lane
    fn to_array(self) -> Self::Array;

    /// Bit `i` holds lane `i`
    #[inline]
    fn to_bitmask(self) -> u64 {
        self.to_array()
            .as_ref()
            .iter()
            .enumerate()
            .fold(0, |bits, (lane, &set)| bits | (u64::from(set) << lane))
    }

    /// Returns true if all lanes are set
    #[inline]
    fn all(self) -> bool {
        self.to_bitmask() == full_bitmask(Self::LANES)
    }

    /// Returns true if any lane is set
    #[inline]
    fn any(self) -> bool {
        self.to_bitmask() != 0
    }

    /// Returns true if no lanes are set
    #[inline]
    fn none(self) -> bool {
        self.to_bitmask() == 0
    }

    /// Number of set lanes
    #[inline]
    fn count(self) -> usize {
        self.to_bitmask().count_ones() as usize
    }

    /// Lane-wise AND
    #[inline(always)]
    fn and(self, rhs: Self) -> Self {
        self & rhs
    }

    /// Lane-wise OR
    #[inline(always)]
    fn or(self, rhs: Self) -> Self {
        self | rhs
    }

    /// Lane-wise XOR
    #[inline(always)]
    fn xor(self, rhs: Self) -> Self {
        self ^ rhs
    }

    /// Lane-wise NOT (also available as `!mask` on concrete types)
    fn not(self) -> Self;

    /// Read one lane
    ///
    /// # Panics
    ///
    /// Panics if `lane >= LANES`.
    #[inline]
    #[track_caller]
    fn test(self, lane: usize) -> bool {
        error::check_index(lane, Self::LANES);
        (self.to_bitmask() >> lane) & 1 == 1
    }

    /// Overwrite one lane
    ///
    /// # Panics
    ///
    /// Panics if `lane >= LANES`.
    #[inline]
    #[track_caller]
    fn set(&mut self, lane: usize, value: bool) {
        error::check_index(lane, Self::LANES);
        let mut lanes = self.to_array();
        lanes.as_mut()[lane] = value;
        *self = Self::from_array(lanes);
    }
}

#[inline(always)]
const fn full_bitmask(lanes: usize) -> u64 {
    if lanes >= 64 {
        u64::MAX
    } else {
        (1u64 << lanes) - 1
    }
}

/// A per-lane source of memory offsets for gather, scatter and permute
///
/// Implemented for `u32`/`i32` vectors of every backend and for
/// `[u32; L]` / `[usize; L]` arrays. Negative lanes never pass the bounds
/// check.
pub trait IndexVector: Copy {
    /// Number of index lanes
    const COUNT: usize;

    /// Offset held by `lane`
    fn lane_index(&self, lane: usize) -> usize;
}

impl<const L: usize> IndexVector for [u32; L] {
    const COUNT: usize = L;

    #[inline(always)]
    fn lane_index(&self, lane: usize) -> usize {
        self[lane] as usize
    }
}

impl<const L: usize> IndexVector for [usize; L] {
    const COUNT: usize = L;

    #[inline(always)]
    fn lane_index(&self, lane: usize) -> usize {
        self[lane]
    }
}

/// Core SIMD vector abstraction trait
///
/// All backends (scalar, generic, SSE4.1, AVX2, NEON) implement this trait,
/// so arithmetic written against it compiles unchanged for each of them.
///
/// Arithmetic uses the standard operators. They are lane-wise and follow the
/// element's native semantics: IEEE-754 for floats, two's-complement
/// wrapping for integers, and a panic for integer division by zero.
///
/// # Example
///
/// ```rust
/// use lanewise::{SimdVector, Vector};
///
/// let a = Vector::<f32>::splat(2.0);
/// let b = Vector::<f32>::splat(3.0);
/// let result = a + b;
/// assert_eq!(result.horizontal_sum(), 5.0 * Vector::<f32>::LANES as f32);
/// ```
pub trait SimdVector:
    Copy
    + Debug
    + Send
    + Sync
    + 'static
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + AddAssign
    + SubAssign
    + MulAssign
    + DivAssign
{
    /// The element type of one lane
    type Scalar: Element;

    /// Associated mask type for comparison operations
    type Mask: SimdMask;

    /// `[Scalar; LANES]`
    type Array: Copy + Debug + AsRef<[Self::Scalar]> + AsMut<[Self::Scalar]>;

    /// Number of lanes (1 for scalar, 4 for 128-bit f32, 8 for 256-bit f32)
    const LANES: usize;

    /// Alignment in bytes required by aligned and streaming accesses
    const ALIGN: usize = Self::LANES * core::mem::size_of::<Self::Scalar>();

    // Construction

    /// Broadcast a scalar value to all lanes
    fn splat(value: Self::Scalar) -> Self;

    /// All lanes zero
    #[inline(always)]
    fn zero() -> Self {
        Self::splat(<Self::Scalar as Element>::ZERO)
    }

    /// Lane `i` holds the value `i`
    ///
    /// # Example
    ///
    /// ```rust
    /// use lanewise::{backends::generic::ArrayVector, SimdVector};
    ///
    /// let idx = ArrayVector::<u32, 4>::indexes_from_zero();
    /// assert_eq!(idx.to_array(), [0, 1, 2, 3]);
    /// ```
    #[inline]
    fn indexes_from_zero() -> Self {
        let mut lanes = Self::zero().to_array();
        for (index, lane) in lanes.as_mut().iter_mut().enumerate() {
            *lane = <Self::Scalar as Element>::from_lane_index(index);
        }
        Self::from_array(lanes)
    }

    /// Build a vector from one value per lane
    fn from_array(lanes: Self::Array) -> Self;

    /// Copy the lanes out
    fn to_array(self) -> Self::Array;

    // Loads and stores

    /// Load the first `LANES` elements of `slice`
    ///
    /// # Panics
    ///
    /// Panics if the slice has fewer than `LANES` elements.
    fn load_unaligned(slice: &[Self::Scalar]) -> Self;

    /// Load from an address aligned to `ALIGN`
    ///
    /// # Panics
    ///
    /// Panics if the slice is too short. In debug builds, also panics with an
    /// alignment violation if the address is not a multiple of `ALIGN`.
    fn load_aligned(slice: &[Self::Scalar]) -> Self;

    /// Aligned load hinting that the data will not be reused soon
    #[inline(always)]
    #[track_caller]
    fn load_streaming(slice: &[Self::Scalar]) -> Self {
        Self::load_aligned(slice)
    }

    /// Store to the first `LANES` elements of `slice`
    fn store_unaligned(self, slice: &mut [Self::Scalar]);

    /// Store to an address aligned to `ALIGN`
    fn store_aligned(self, slice: &mut [Self::Scalar]);

    /// Aligned non-temporal store
    #[inline(always)]
    #[track_caller]
    fn store_streaming(self, slice: &mut [Self::Scalar]) {
        self.store_aligned(slice)
    }

    /// Load with the alignment tier picked by `flag`
    ///
    /// # Example
    ///
    /// ```rust
    /// use lanewise::{SimdVector, Unaligned, Vector};
    ///
    /// let data = [1.0f32; 16];
    /// let v = Vector::<f32>::load(&data[1..], Unaligned);
    /// assert_eq!(v.horizontal_sum(), Vector::<f32>::LANES as f32);
    /// ```
    #[inline(always)]
    #[track_caller]
    fn load<A: LoadStoreFlag>(slice: &[Self::Scalar], _flag: A) -> Self {
        match A::MODE {
            AccessMode::Aligned => Self::load_aligned(slice),
            AccessMode::Unaligned => Self::load_unaligned(slice),
            AccessMode::Streaming => Self::load_streaming(slice),
        }
    }

    /// Store with the alignment tier picked by `flag`
    #[inline(always)]
    #[track_caller]
    fn store<A: LoadStoreFlag>(self, slice: &mut [Self::Scalar], _flag: A) {
        match A::MODE {
            AccessMode::Aligned => self.store_aligned(slice),
            AccessMode::Unaligned => self.store_unaligned(slice),
            AccessMode::Streaming => self.store_streaming(slice),
        }
    }

    /// Store only the lanes whose mask bit is set
    ///
    /// Elements under unset lanes keep their previous value. No alignment is
    /// required, but the slice must still hold `LANES` elements.
    #[inline]
    #[track_caller]
    fn store_masked(self, slice: &mut [Self::Scalar], mask: Self::Mask) {
        access::check_len(slice.len(), Self::LANES);
        let lanes = self.to_array();
        let bits = mask.to_bitmask();
        for (lane, (dst, &value)) in slice.iter_mut().zip(lanes.as_ref()).enumerate() {
            if (bits >> lane) & 1 == 1 {
                *dst = value;
            }
        }
    }

    // Comparison operations (return masks)

    /// `self[i] == rhs[i]`
    fn cmp_eq(self, rhs: Self) -> Self::Mask;

    /// `self[i] != rhs[i]` (true for NaN lanes)
    fn cmp_ne(self, rhs: Self) -> Self::Mask;

    /// `self[i] < rhs[i]`
    fn cmp_lt(self, rhs: Self) -> Self::Mask;

    /// `self[i] <= rhs[i]`
    fn cmp_le(self, rhs: Self) -> Self::Mask;

    /// `self[i] > rhs[i]`
    fn cmp_gt(self, rhs: Self) -> Self::Mask;

    /// `self[i] >= rhs[i]`
    fn cmp_ge(self, rhs: Self) -> Self::Mask;

    // Min/Max operations

    /// Lane-wise `if a < b { a } else { b }`
    fn min(self, rhs: Self) -> Self;

    /// Lane-wise `if a > b { a } else { b }`
    fn max(self, rhs: Self) -> Self;

    // Blending

    /// Select values based on mask
    ///
    /// For each lane: `mask[i] ? true_val[i] : false_val[i]`
    fn select(mask: Self::Mask, true_val: Self, false_val: Self) -> Self;

    // Horizontal operations
    //
    // Every reduction folds with the same halving tree: at width `w`, lane
    // `i` is combined with lane `i + w / 2`, until one lane is left. The
    // intrinsic backends implement that exact shape, so integer results are
    // bit-identical everywhere and float results only depend on LANES.

    /// Sum all lanes into a scalar
    #[inline]
    fn horizontal_sum(self) -> Self::Scalar {
        reduce_halving(self.to_array(), Element::lane_add)
    }

    /// Multiply all lanes together
    #[inline]
    fn horizontal_product(self) -> Self::Scalar {
        reduce_halving(self.to_array(), Element::lane_mul)
    }

    /// Minimum value across all lanes
    #[inline]
    fn horizontal_min(self) -> Self::Scalar {
        reduce_halving(self.to_array(), Element::lane_min)
    }

    /// Maximum value across all lanes
    #[inline]
    fn horizontal_max(self) -> Self::Scalar {
        reduce_halving(self.to_array(), Element::lane_max)
    }

    // Lane access and shuffles

    /// Read one lane
    ///
    /// # Panics
    ///
    /// Panics if `lane >= LANES`.
    #[inline]
    #[track_caller]
    fn extract(self, lane: usize) -> Self::Scalar {
        error::check_index(lane, Self::LANES);
        self.to_array().as_ref()[lane]
    }

    /// Copy of `self` with one lane replaced
    ///
    /// # Panics
    ///
    /// Panics if `lane >= LANES`.
    #[inline]
    #[track_caller]
    fn replace(self, lane: usize, value: Self::Scalar) -> Self {
        error::check_index(lane, Self::LANES);
        let mut lanes = self.to_array();
        lanes.as_mut()[lane] = value;
        Self::from_array(lanes)
    }

    /// Lanes in reverse order
    #[inline]
    fn reversed(self) -> Self {
        let mut lanes = self.to_array();
        lanes.as_mut().reverse();
        Self::from_array(lanes)
    }

    /// Lane `i` takes lane `(i + amount) % LANES`
    #[inline]
    fn rotated(self, amount: usize) -> Self {
        let mut lanes = self.to_array();
        lanes.as_mut().rotate_left(amount % Self::LANES);
        Self::from_array(lanes)
    }

    /// Lane `i` takes lane `i + amount`; lanes shifted in from outside are zero
    #[inline]
    fn shifted(self, amount: isize) -> Self {
        let source = self.to_array();
        let mut lanes = Self::zero().to_array();
        for (index, lane) in lanes.as_mut().iter_mut().enumerate() {
            if let Some(&value) = index
                .checked_add_signed(amount)
                .and_then(|from| source.as_ref().get(from))
            {
                *lane = value;
            }
        }
        Self::from_array(lanes)
    }

    /// Lane `i` takes lane `indices[i]`
    ///
    /// # Panics
    ///
    /// Panics if an index is `>= LANES`.
    #[inline]
    #[track_caller]
    fn permute<I: IndexVector>(self, indices: I) -> Self {
        const { assert!(I::COUNT == Self::LANES, "index lane count must match vector lane count") }
        let source = self.to_array();
        let mut lanes = source;
        for (lane, value) in lanes.as_mut().iter_mut().enumerate() {
            let from = indices.lane_index(lane);
            error::check_index(from, Self::LANES);
            *value = source.as_ref()[from];
        }
        Self::from_array(lanes)
    }

    /// Apply a scalar function to every lane
    ///
    /// This is the hook for lane-wise math that has no vector kernel here,
    /// e.g. `v.map_lanes(libm::sinf)`.
    #[inline]
    fn map_lanes<F: FnMut(Self::Scalar) -> Self::Scalar>(self, mut f: F) -> Self {
        let mut lanes = self.to_array();
        for lane in lanes.as_mut() {
            *lane = f(*lane);
        }
        Self::from_array(lanes)
    }

    // Gather and scatter

    /// Lane `i` reads `base[indices[i]]`
    ///
    /// # Panics
    ///
    /// Panics if any address is out of bounds.
    #[inline]
    #[track_caller]
    fn gather<I: IndexVector>(base: &[Self::Scalar], indices: I) -> Self {
        Self::gather_strided(base, indices, 1)
    }

    /// Lane `i` reads `base[indices[i] * stride]`
    ///
    /// `stride` addresses one field of an array of structs laid out as
    /// consecutive scalars.
    #[inline]
    #[track_caller]
    fn gather_strided<I: IndexVector>(base: &[Self::Scalar], indices: I, stride: usize) -> Self {
        const { assert!(I::COUNT == Self::LANES, "index lane count must match vector lane count") }
        let mut lanes = Self::zero().to_array();
        for (lane, value) in lanes.as_mut().iter_mut().enumerate() {
            *value = base[element_offset(indices.lane_index(lane), stride, base.len())];
        }
        Self::from_array(lanes)
    }

    /// Gather under a mask; unset lanes take `fallback` and read nothing
    #[inline]
    #[track_caller]
    fn gather_masked<I: IndexVector>(
        base: &[Self::Scalar],
        indices: I,
        mask: Self::Mask,
        fallback: Self,
    ) -> Self {
        const { assert!(I::COUNT == Self::LANES, "index lane count must match vector lane count") }
        let bits = mask.to_bitmask();
        let mut lanes = fallback.to_array();
        for (lane, value) in lanes.as_mut().iter_mut().enumerate() {
            if (bits >> lane) & 1 == 1 {
                *value = base[element_offset(indices.lane_index(lane), 1, base.len())];
            }
        }
        Self::from_array(lanes)
    }

    /// `base[indices[i]] = self[i]`
    ///
    /// Lanes are written in ascending order, so when several lanes address
    /// the same element the highest lane wins.
    ///
    /// # Example
    ///
    /// ```rust
    /// use lanewise::{backends::generic::ArrayVector, SimdVector};
    ///
    /// let mut out = [0i32; 4];
    /// ArrayVector::<i32, 4>::from_array([10, 11, 12, 13]).scatter(&mut out, [0u32, 0, 2, 2]);
    /// assert_eq!(out, [11, 0, 13, 0]);
    /// ```
    #[inline]
    #[track_caller]
    fn scatter<I: IndexVector>(self, base: &mut [Self::Scalar], indices: I) {
        self.scatter_strided(base, indices, 1)
    }

    /// `base[indices[i] * stride] = self[i]`, highest lane wins on collisions
    #[inline]
    #[track_caller]
    fn scatter_strided<I: IndexVector>(self, base: &mut [Self::Scalar], indices: I, stride: usize) {
        const { assert!(I::COUNT == Self::LANES, "index lane count must match vector lane count") }
        let lanes = self.to_array();
        for (lane, &value) in lanes.as_ref().iter().enumerate() {
            let offset = element_offset(indices.lane_index(lane), stride, base.len());
            base[offset] = value;
        }
    }

    /// Scatter only the set lanes, highest lane wins on collisions
    #[inline]
    #[track_caller]
    fn scatter_masked<I: IndexVector>(self, base: &mut [Self::Scalar], indices: I, mask: Self::Mask) {
        const { assert!(I::COUNT == Self::LANES, "index lane count must match vector lane count") }
        let bits = mask.to_bitmask();
        let lanes = self.to_array();
        for (lane, &value) in lanes.as_ref().iter().enumerate() {
            if (bits >> lane) & 1 == 1 {
                let offset = element_offset(indices.lane_index(lane), 1, base.len());
                base[offset] = value;
            }
        }
    }
}

/// Floating-point vectors
///
/// `mul_add` is fused (single rounding) on every backend, so it is only a
/// single instruction where the hardware has FMA.
pub trait SimdFloat: SimdVector {
    /// Lane-wise absolute value
    fn abs(self) -> Self;

    /// Lane-wise square root
    fn sqrt(self) -> Self;

    /// Round toward negative infinity
    fn floor(self) -> Self;

    /// Round toward positive infinity
    fn ceil(self) -> Self;

    /// Fused `self * b + c`
    fn mul_add(self, b: Self, c: Self) -> Self;

    /// `1 / self`, correctly rounded (not the hardware estimate)
    #[inline(always)]
    fn recip(self) -> Self {
        Self::splat(<Self::Scalar as Element>::ONE) / self
    }

    /// Lanes holding NaN
    #[inline(always)]
    fn is_nan(self) -> Self::Mask {
        self.cmp_ne(self)
    }
}

/// Integer vectors
///
/// Shift counts are taken modulo the lane bit width, matching
/// `wrapping_shl`/`wrapping_shr` on the scalar type.
pub trait SimdInt:
    SimdVector
    + BitAnd<Output = Self>
    + BitOr<Output = Self>
    + BitXor<Output = Self>
    + Not<Output = Self>
    + Shl<u32, Output = Self>
    + Shr<u32, Output = Self>
{
}

/// Fold lanes with the pairwise halving tree shared by every backend
#[inline(always)]
pub(crate) fn reduce_halving<T: Copy, A: AsMut<[T]>>(mut lanes: A, op: impl Fn(T, T) -> T) -> T {
    let lanes = lanes.as_mut();
    debug_assert!(lanes.len().is_power_of_two());
    let mut width = lanes.len();
    while width > 1 {
        width /= 2;
        for lane in 0..width {
            lanes[lane] = op(lanes[lane], lanes[lane + width]);
        }
    }
    lanes[0]
}

/// `index * stride`, bounds-checked against `len`
#[inline(always)]
#[track_caller]
fn element_offset(index: usize, stride: usize, len: usize) -> usize {
    let offset = index.checked_mul(stride).unwrap_or(usize::MAX);
    error::check_index(offset, len);
    offset
}
