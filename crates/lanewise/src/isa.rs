//! Instruction-set tags
//!
//! Each tag names one backend. Tags carry no runtime state; they only
//! parameterize [`LaneWidth`](crate::lane_width::LaneWidth), which maps an
//! element type to the concrete vector type of that backend.

use core::fmt::Debug;

mod private {
    pub trait Sealed {}
}

/// Marker trait for instruction-set tags
pub trait Isa: Copy + Default + Debug + Send + Sync + 'static + private::Sealed {
    /// Human-readable backend name
    const NAME: &'static str;

    /// Register width in bits, or `None` for the scalar backend whose
    /// "register" is one element wide
    const VECTOR_BITS: Option<usize>;
}

macro_rules! isa_tag {
    ($(#[$meta:meta])* $name:ident, $label:literal, $bits:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
        pub struct $name;

        impl private::Sealed for $name {}

        impl Isa for $name {
            const NAME: &'static str = $label;
            const VECTOR_BITS: Option<usize> = $bits;
        }
    };
}

isa_tag!(
    /// One lane per vector; the reference semantics every other backend matches
    Scalar,
    "scalar",
    None
);

isa_tag!(
    /// Portable 128-bit backend built on fixed-size arrays
    Generic128,
    "generic128",
    Some(128)
);

isa_tag!(
    /// Portable 256-bit backend built on fixed-size arrays
    Generic256,
    "generic256",
    Some(256)
);

isa_tag!(
    /// x86 SSE4.1, 128-bit registers
    Sse41,
    "sse4.1",
    Some(128)
);

isa_tag!(
    /// x86 AVX2 + FMA, 256-bit registers
    Avx2,
    "avx2",
    Some(256)
);

isa_tag!(
    /// ARM64 Advanced SIMD, 128-bit registers
    Neon,
    "neon",
    Some(128)
);
