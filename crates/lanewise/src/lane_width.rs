//! Element type to vector type mapping
//!
//! `LaneWidth<I>` answers "which register type holds `Self` under
//! instruction set `I`, and how many lanes does it have". The answer is a
//! compile-time constant per (ISA, element) pair:
//!
//! | ISA                    | f32 | f64 | i32 | u32 |
//! |------------------------|-----|-----|-----|-----|
//! | Scalar                 | 1   | 1   | 1   | 1   |
//! | Generic128, Sse41, Neon| 4   | 2   | 4   | 4   |
//! | Generic256, Avx2       | 8   | 4   | 8   | 8   |

use crate::backends::generic::ArrayVector;
use crate::backends::scalar::ScalarVector;
use crate::element::Element;
use crate::isa::{self, Isa};
use crate::traits::SimdVector;

/// Maps an element type to its vector type under instruction set `I`
///
/// # Example
///
/// ```rust
/// use lanewise::isa::{Generic128, Generic256, Scalar};
/// use lanewise::LaneWidth;
///
/// assert_eq!(<f32 as LaneWidth<Scalar>>::LANES, 1);
/// assert_eq!(<f32 as LaneWidth<Generic128>>::LANES, 4);
/// assert_eq!(<f64 as LaneWidth<Generic128>>::LANES, 2);
/// assert_eq!(<u32 as LaneWidth<Generic256>>::LANES, 8);
/// ```
pub trait LaneWidth<I: Isa>: Element {
    /// The vector type holding lanes of `Self`
    type Vector: SimdVector<Scalar = Self>;

    /// Lanes per vector
    const LANES: usize = <Self::Vector as SimdVector>::LANES;

    /// Bits occupied by one vector's lanes
    const REGISTER_BITS: usize = Self::LANES * core::mem::size_of::<Self>() * 8;
}

impl<T: Element> LaneWidth<isa::Scalar> for T {
    type Vector = ScalarVector<T>;
}

macro_rules! array_lane_width {
    ($isa:ty, $($t:ty => $lanes:literal),* $(,)?) => {
        $(
            impl LaneWidth<$isa> for $t {
                type Vector = ArrayVector<$t, $lanes>;
            }
        )*
    };
}

array_lane_width!(isa::Generic128, f32 => 4, f64 => 2, i32 => 4, u32 => 4);
array_lane_width!(isa::Generic256, f32 => 8, f64 => 4, i32 => 8, u32 => 8);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generic_widths_fill_the_register() {
        assert_eq!(<f32 as LaneWidth<isa::Generic128>>::REGISTER_BITS, 128);
        assert_eq!(<f64 as LaneWidth<isa::Generic128>>::REGISTER_BITS, 128);
        assert_eq!(<i32 as LaneWidth<isa::Generic256>>::REGISTER_BITS, 256);
        assert_eq!(<f64 as LaneWidth<isa::Generic256>>::LANES, 4);
    }

    #[test]
    fn test_scalar_is_one_lane() {
        assert_eq!(<f64 as LaneWidth<isa::Scalar>>::LANES, 1);
        assert_eq!(<u32 as LaneWidth<isa::Scalar>>::REGISTER_BITS, 32);
    }
}
