//! Slice kernels built on [`SimdVector`]
//!
//! Each kernel walks its input in `LANES`-wide steps with unaligned loads and
//! finishes the last partial vector through a zero-padded copy, so any slice
//! length works with any backend:
//!
//! ```rust
//! use lanewise::{ops, SimdVector, Vector};
//!
//! let xs = [1.0f32, 2.0, 3.0, 4.0, 5.0];
//! let mut ys = [0.0f32; 5];
//! ops::map_unary::<Vector<f32>>(&xs, &mut ys, |v| v * v);
//! assert_eq!(ys, [1.0, 4.0, 9.0, 16.0, 25.0]);
//! assert_eq!(ops::sum::<Vector<f32>>(&xs), 15.0);
//! ```

mod map;
mod reduce;

pub use map::{map_binary, map_unary};
pub use reduce::{dot, dot_fused, max_value, min_value, sum};

use crate::traits::SimdVector;

/// Load `tail.len() < LANES` elements, filling the remaining lanes with `pad`
#[inline(always)]
fn load_partial<V: SimdVector>(tail: &[V::Scalar], pad: V::Scalar) -> V {
    let mut lanes = V::splat(pad).to_array();
    lanes.as_mut()[..tail.len()].copy_from_slice(tail);
    V::from_array(lanes)
}

/// Store the first `tail.len() < LANES` lanes of `value`
#[inline(always)]
fn store_partial<V: SimdVector>(value: V, tail: &mut [V::Scalar]) {
    let lanes = value.to_array();
    let len = tail.len();
    tail.copy_from_slice(&lanes.as_ref()[..len]);
}
