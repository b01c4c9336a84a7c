use super::{load_partial, store_partial};
use crate::element::Element;
use crate::traits::SimdVector;

/// `dst[i] = f(src[i])`, one vector at a time
///
/// The lanes of the last call past `src.len()` hold zero and are discarded.
///
/// # Panics
///
/// Panics if `src` and `dst` differ in length.
#[inline]
#[track_caller]
pub fn map_unary<V: SimdVector>(
    src: &[V::Scalar],
    dst: &mut [V::Scalar],
    f: impl Fn(V) -> V,
) {
    assert_eq!(src.len(), dst.len(), "map_unary: length mismatch");

    let mut src_chunks = src.chunks_exact(V::LANES);
    let mut dst_chunks = dst.chunks_exact_mut(V::LANES);
    for (s, d) in (&mut src_chunks).zip(&mut dst_chunks) {
        f(V::load_unaligned(s)).store_unaligned(d);
    }

    let tail = src_chunks.remainder();
    if !tail.is_empty() {
        let out = f(load_partial::<V>(tail, <V::Scalar as Element>::ZERO));
        store_partial(out, dst_chunks.into_remainder());
    }
}

/// `dst[i] = f(a[i], b[i])`, one vector at a time
///
/// # Panics
///
/// Panics if `a`, `b` and `dst` are not all the same length.
#[inline]
#[track_caller]
pub fn map_binary<V: SimdVector>(
    a: &[V::Scalar],
    b: &[V::Scalar],
    dst: &mut [V::Scalar],
    f: impl Fn(V, V) -> V,
) {
    assert_eq!(a.len(), dst.len(), "map_binary: length mismatch");
    assert_eq!(b.len(), dst.len(), "map_binary: length mismatch");

    let mut a_chunks = a.chunks_exact(V::LANES);
    let mut b_chunks = b.chunks_exact(V::LANES);
    let mut dst_chunks = dst.chunks_exact_mut(V::LANES);
    for ((x, y), d) in (&mut a_chunks).zip(&mut b_chunks).zip(&mut dst_chunks) {
        f(V::load_unaligned(x), V::load_unaligned(y)).store_unaligned(d);
    }

    let (a_tail, b_tail) = (a_chunks.remainder(), b_chunks.remainder());
    if !a_tail.is_empty() {
        let out = f(
            load_partial::<V>(a_tail, <V::Scalar as Element>::ZERO),
            load_partial::<V>(b_tail, <V::Scalar as Element>::ZERO),
        );
        store_partial(out, dst_chunks.into_remainder());
    }
}
