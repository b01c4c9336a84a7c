#![no_std]
#![doc = include_str!("../README.md")]
#![warn(missing_docs)]
#![warn(clippy::all)]

extern crate alloc;

// Scalar element types and their lane-wise semantics
pub mod element;

// Backend tags and the element -> vector mapping
pub mod isa;
pub mod lane_width;

// Core trait definitions
pub mod traits;

// Load/store flags
pub mod access;

// Backend implementations
pub mod backends;

// Aligned, padded storage
pub mod memory;

// Slice kernels
pub mod ops;

// Cache hints
pub mod hints;

// Run-time capability check
pub mod cpu;

pub mod error;

pub use access::{AccessMode, Aligned, LoadStoreFlag, Streaming, Unaligned};
pub use cpu::check_cpu_support;
pub use element::{Element, FloatElement, IntElement};
pub use error::{Error, Result};
pub use isa::Isa;
pub use lane_width::LaneWidth;
pub use memory::{DynMemory, ElementOf, Memory, VectorMemory, VectorMut};
pub use traits::{IndexVector, SimdFloat, SimdInt, SimdMask, SimdVector};

pub use backends::generic::{ArrayMask, ArrayVector};
pub use backends::scalar::{ScalarMask, ScalarVector};

#[cfg(all(feature = "sse41", any(target_arch = "x86", target_arch = "x86_64")))]
pub use backends::sse::{SseF32x4, SseF64x2, SseI32x4, SseMask32x4, SseMask64x2, SseU32x4};

#[cfg(all(feature = "avx2", any(target_arch = "x86", target_arch = "x86_64")))]
pub use backends::avx2::{
    Avx2F32x8, Avx2F64x4, Avx2I32x8, Avx2Mask32x8, Avx2Mask64x4, Avx2U32x8,
};

#[cfg(all(feature = "neon", target_arch = "aarch64"))]
pub use backends::neon::{NeonF32x4, NeonF64x2, NeonI32x4, NeonMask32x4, NeonMask64x2, NeonU32x4};

/// Backend selected by the enabled cargo feature
///
/// - no backend feature: [`isa::Scalar`] (1 lane)
/// - `generic128` / `generic256`: portable array backends
/// - `sse41` / `avx2`: x86 intrinsics
/// - `neon`: ARM64 intrinsics
#[cfg(not(any(
    feature = "generic128",
    feature = "generic256",
    feature = "sse41",
    feature = "avx2",
    feature = "neon"
)))]
pub type ActiveIsa = isa::Scalar;

/// Backend selected by the enabled cargo feature (portable 128-bit)
#[cfg(feature = "generic128")]
pub type ActiveIsa = isa::Generic128;

/// Backend selected by the enabled cargo feature (portable 256-bit)
#[cfg(feature = "generic256")]
pub type ActiveIsa = isa::Generic256;

/// Backend selected by the enabled cargo feature (SSE4.1)
#[cfg(all(feature = "sse41", any(target_arch = "x86", target_arch = "x86_64")))]
pub type ActiveIsa = isa::Sse41;

/// Backend selected by the enabled cargo feature (AVX2 + FMA)
#[cfg(all(feature = "avx2", any(target_arch = "x86", target_arch = "x86_64")))]
pub type ActiveIsa = isa::Avx2;

/// Backend selected by the enabled cargo feature (NEON)
#[cfg(all(feature = "neon", target_arch = "aarch64"))]
pub type ActiveIsa = isa::Neon;

/// Vector of `T` for the active backend
///
/// ```rust
/// use lanewise::{SimdVector, Vector};
///
/// let v = Vector::<f32>::indexes_from_zero();
/// assert_eq!(v.extract(0), 0.0);
/// assert!(Vector::<f32>::LANES.is_power_of_two());
/// ```
pub type Vector<T> = <T as LaneWidth<ActiveIsa>>::Vector;

/// Mask matching [`Vector<T>`]
pub type Mask<T> = <Vector<T> as SimdVector>::Mask;

/// Element types the active backend has a vector for
///
/// Shorthand for `LaneWidth<ActiveIsa>` in generic bounds.
pub trait VectorElement: LaneWidth<ActiveIsa> {}

impl<T: LaneWidth<ActiveIsa>> VectorElement for T {}

// At most one backend feature
#[cfg(any(
    all(feature = "generic128", feature = "generic256"),
    all(feature = "generic128", feature = "sse41"),
    all(feature = "generic128", feature = "avx2"),
    all(feature = "generic128", feature = "neon"),
    all(feature = "generic256", feature = "sse41"),
    all(feature = "generic256", feature = "avx2"),
    all(feature = "generic256", feature = "neon"),
    all(feature = "sse41", feature = "avx2"),
    all(feature = "sse41", feature = "neon"),
    all(feature = "avx2", feature = "neon"),
))]
compile_error!(
    "Enable at most one of the generic128, generic256, sse41, avx2 and neon features."
);

#[cfg(all(
    any(feature = "sse41", feature = "avx2"),
    not(any(target_arch = "x86", target_arch = "x86_64"))
))]
compile_error!("The sse41 and avx2 features require an x86 or x86_64 target.");

#[cfg(all(feature = "neon", not(target_arch = "aarch64")))]
compile_error!("The neon feature requires an aarch64 target.");
