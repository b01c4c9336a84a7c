use super::load_partial;
use crate::element::Element;
use crate::traits::{SimdFloat, SimdVector};

/// Sum of all elements
///
/// Lanes accumulate independently and are combined once at the end, so for
/// floats the rounding differs from a left-to-right scalar loop.
#[inline]
pub fn sum<V: SimdVector>(xs: &[V::Scalar]) -> V::Scalar {
    let mut chunks = xs.chunks_exact(V::LANES);
    let mut acc = V::zero();
    for chunk in &mut chunks {
        acc += V::load_unaligned(chunk);
    }
    let tail = chunks.remainder();
    if !tail.is_empty() {
        acc += load_partial::<V>(tail, <V::Scalar as Element>::ZERO);
    }
    acc.horizontal_sum()
}

/// `sum(a[i] * b[i])`
///
/// Each product is rounded before it is accumulated. Use [`dot_fused`] for
/// floats when the result should match a `mul_add` loop.
///
/// # Panics
///
/// Panics if `a` and `b` differ in length.
#[inline]
#[track_caller]
pub fn dot<V: SimdVector>(a: &[V::Scalar], b: &[V::Scalar]) -> V::Scalar {
    assert_eq!(a.len(), b.len(), "dot: length mismatch");

    let mut a_chunks = a.chunks_exact(V::LANES);
    let mut b_chunks = b.chunks_exact(V::LANES);
    let mut acc = V::zero();
    for (x, y) in (&mut a_chunks).zip(&mut b_chunks) {
        acc += V::load_unaligned(x) * V::load_unaligned(y);
    }
    let a_tail = a_chunks.remainder();
    if !a_tail.is_empty() {
        acc += load_partial::<V>(a_tail, <V::Scalar as Element>::ZERO)
            * load_partial::<V>(b_chunks.remainder(), <V::Scalar as Element>::ZERO);
    }
    acc.horizontal_sum()
}

/// `sum(a[i] * b[i])` with one rounding per lane step, through [`SimdFloat::mul_add`]
///
/// With `LANES == 1` this is bit-identical to
/// `a.iter().zip(b).fold(0.0, |acc, (x, y)| x.mul_add(*y, acc))`.
///
/// # Panics
///
/// Panics if `a` and `b` differ in length.
#[inline]
#[track_caller]
pub fn dot_fused<V: SimdFloat>(a: &[V::Scalar], b: &[V::Scalar]) -> V::Scalar {
    assert_eq!(a.len(), b.len(), "dot_fused: length mismatch");

    let mut a_chunks = a.chunks_exact(V::LANES);
    let mut b_chunks = b.chunks_exact(V::LANES);
    let mut acc = V::zero();
    for (x, y) in (&mut a_chunks).zip(&mut b_chunks) {
        acc = V::load_unaligned(x).mul_add(V::load_unaligned(y), acc);
    }
    let a_tail = a_chunks.remainder();
    if !a_tail.is_empty() {
        let zero = <V::Scalar as Element>::ZERO;
        acc = load_partial::<V>(a_tail, zero).mul_add(load_partial::<V>(b_chunks.remainder(), zero), acc);
    }
    acc.horizontal_sum()
}

/// Smallest element, or `None` for an empty slice
///
/// Follows [`SimdVector::min`], so a NaN element may or may not be returned
/// depending on its position.
#[inline]
pub fn min_value<V: SimdVector>(xs: &[V::Scalar]) -> Option<V::Scalar> {
    fold_extreme::<V>(xs, V::min).map(V::horizontal_min)
}

/// Largest element, or `None` for an empty slice
#[inline]
pub fn max_value<V: SimdVector>(xs: &[V::Scalar]) -> Option<V::Scalar> {
    fold_extreme::<V>(xs, V::max).map(V::horizontal_max)
}

/// Fold `xs` into one vector with an idempotent `op`, padding the tail with `xs[0]`
#[inline(always)]
fn fold_extreme<V: SimdVector>(xs: &[V::Scalar], op: impl Fn(V, V) -> V) -> Option<V> {
    let &first = xs.first()?;
    let mut chunks = xs.chunks_exact(V::LANES);
    let mut acc = V::splat(first);
    for chunk in &mut chunks {
        acc = op(acc, V::load_unaligned(chunk));
    }
    let tail = chunks.remainder();
    if !tail.is_empty() {
        acc = op(acc, load_partial::<V>(tail, first));
    }
    Some(acc)
}
