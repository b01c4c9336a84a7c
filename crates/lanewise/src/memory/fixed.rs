use core::fmt;
use core::ops::{Index, IndexMut};

use super::buffer::AlignedBuffer;
use super::VectorMemory;
use crate::error::{self, Result};
use crate::traits::SimdVector;

/// `N` elements laid out for vectors of type `V`
///
/// The allocation holds [`VECTORS`](Self::VECTORS) whole vectors, aligned to
/// `V::ALIGN`, with the elements past `N` zeroed.
///
/// ```rust
/// use lanewise::{Memory, SimdVector, Vector, VectorMemory};
///
/// let mut m = Memory::<Vector<f32>, 11>::new();
/// m[10] = 3.0;
/// assert_eq!(m.len(), 11);
/// assert_eq!(m.padded_len() % Vector::<f32>::LANES, 0);
/// assert_eq!(m.as_slice()[10], 3.0);
/// ```
pub struct Memory<V: SimdVector, const N: usize> {
    buffer: AlignedBuffer<V::Scalar>,
}

impl<V: SimdVector, const N: usize> Memory<V, N> {
    /// Number of vectors, `ceil(N / LANES)`
    pub const VECTORS: usize = N.div_ceil(V::LANES);

    /// Allocated elements, `VECTORS * LANES`
    pub const PADDED: usize = Self::VECTORS * V::LANES;

    /// A zero-filled container
    #[track_caller]
    pub fn new() -> Self {
        match Self::try_new() {
            Ok(memory) => memory,
            Err(err) => error::raise(err),
        }
    }

    /// A zero-filled container, failing if the padded size overflows
    pub fn try_new() -> Result<Self> {
        Ok(Self {
            buffer: AlignedBuffer::try_zeroed(Self::PADDED, V::ALIGN)?,
        })
    }

    /// A container holding a copy of `values`
    ///
    /// # Panics
    ///
    /// Panics if `values.len() != N`.
    #[track_caller]
    pub fn from_slice(values: &[V::Scalar]) -> Self {
        let mut memory = Self::new();
        memory.copy_from_slice(values);
        memory
    }
}

impl<V: SimdVector, const N: usize> VectorMemory for Memory<V, N> {
    type Vector = V;

    #[inline(always)]
    fn len(&self) -> usize {
        N
    }

    #[inline(always)]
    fn vectors_count(&self) -> usize {
        Self::VECTORS
    }

    #[inline(always)]
    fn padded(&self) -> &[V::Scalar] {
        self.buffer.as_slice()
    }

    #[inline(always)]
    fn padded_mut(&mut self) -> &mut [V::Scalar] {
        self.buffer.as_mut_slice()
    }
}

impl<V: SimdVector, const N: usize> Default for Memory<V, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: SimdVector, const N: usize> Clone for Memory<V, N> {
    fn clone(&self) -> Self {
        Self {
            buffer: self.buffer.clone(),
        }
    }
}

impl<V: SimdVector, const N: usize> Index<usize> for Memory<V, N> {
    type Output = V::Scalar;

    #[inline]
    #[track_caller]
    fn index(&self, index: usize) -> &V::Scalar {
        error::check_index(index, N);
        &self.buffer.as_slice()[index]
    }
}

impl<V: SimdVector, const N: usize> IndexMut<usize> for Memory<V, N> {
    #[inline]
    #[track_caller]
    fn index_mut(&mut self, index: usize) -> &mut V::Scalar {
        error::check_index(index, N);
        &mut self.buffer.as_mut_slice()[index]
    }
}

impl<V: SimdVector, const N: usize> PartialEq for Memory<V, N> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<V: SimdVector, const N: usize> fmt::Debug for Memory<V, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Memory")
            .field("len", &N)
            .field("lanes", &V::LANES)
            .field("data", &self.as_slice())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::generic::{ArrayMask, ArrayVector};
    use crate::traits::SimdMask;

    type V4 = ArrayVector<f32, 4>;

    #[test]
    fn test_padding_layout() {
        let m = Memory::<V4, 10>::new();
        assert_eq!(Memory::<V4, 10>::VECTORS, 3);
        assert_eq!(m.len(), 10);
        assert_eq!(m.vectors_count(), 3);
        assert_eq!(m.padded_len(), 12);
        assert_eq!(m.as_ptr() as usize % V4::ALIGN, 0);
        assert!(m.padded().iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_index_and_vectors_agree() {
        let mut m = Memory::<V4, 6>::new();
        for i in 0..6 {
            m[i] = i as f32;
        }
        assert_eq!(m.vector(0).to_array(), [0.0, 1.0, 2.0, 3.0]);
        assert_eq!(m.vector(1).to_array(), [4.0, 5.0, 0.0, 0.0]);

        m.set_vector(1, V4::splat(7.0));
        assert_eq!(m.as_slice(), &[0.0, 1.0, 2.0, 3.0, 7.0, 7.0]);
        assert_eq!(m.padded()[6..], [7.0, 7.0]);
    }

    #[test]
    fn test_window_reads_neighbours() {
        let m = Memory::<V4, 8>::from_slice(&[0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
        assert_eq!(m.vector_at(0, 1).to_array(), [1.0, 2.0, 3.0, 4.0]);
        assert_eq!(m.vector_at(1, -1).to_array(), [3.0, 4.0, 5.0, 6.0]);
        assert!(m.try_vector_at(1, 1).is_err());
        assert!(m.try_vector_at(0, -1).is_err());
    }

    #[test]
    fn test_vector_mut_proxy() {
        let mut m = Memory::<V4, 4>::from_slice(&[1.0, 2.0, 3.0, 4.0]);
        m.vector_mut(0).update(|v| v * V4::splat(2.0));
        assert_eq!(m.as_slice(), &[2.0, 4.0, 6.0, 8.0]);

        let mask = ArrayMask::from_array([true, false, true, false]);
        m.vector_mut(0).store_masked(V4::splat(0.0), mask);
        assert_eq!(m.as_slice(), &[0.0, 4.0, 0.0, 8.0]);
    }

    #[test]
    fn test_clone_and_eq() {
        let a = Memory::<V4, 5>::from_slice(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        let mut b = a.clone();
        assert_eq!(a, b);
        b[4] = 0.0;
        assert_ne!(a, b);
        assert_eq!(b.as_ptr() as usize % V4::ALIGN, 0);
    }

    #[test]
    fn test_zero_length() {
        let m = Memory::<V4, 0>::new();
        assert!(m.is_empty());
        assert_eq!(m.vectors_count(), 0);
        assert_eq!(m.chunks().count(), 0);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_index_past_len_panics() {
        let m = Memory::<V4, 3>::new();
        let _ = m[3];
    }

    #[test]
    #[should_panic]
    fn test_last_vector_of_empty_panics() {
        let m = Memory::<V4, 0>::new();
        let _ = m.last_vector();
    }
}
