use core::fmt;
use core::ops::{Index, IndexMut};

use super::buffer::AlignedBuffer;
use super::VectorMemory;
use crate::error::{self, Error, Result};
use crate::traits::SimdVector;

/// Run-time sized counterpart of [`Memory`](super::Memory)
///
/// ```rust
/// use lanewise::{DynMemory, SimdVector, Vector, VectorMemory};
///
/// let mut m = DynMemory::<Vector<i32>>::new(5);
/// m.as_mut_slice().copy_from_slice(&[1, 2, 3, 4, 5]);
/// m.resize(2);
/// assert_eq!(m.as_slice(), &[1, 2]);
/// m.resize(4);
/// assert_eq!(m.as_slice(), &[1, 2, 0, 0]);
/// ```
pub struct DynMemory<V: SimdVector> {
    buffer: AlignedBuffer<V::Scalar>,
    len: usize,
}

impl<V: SimdVector> DynMemory<V> {
    /// A zero-filled container of `len` elements
    ///
    /// # Panics
    ///
    /// Panics if the padded byte size overflows `isize`.
    #[track_caller]
    pub fn new(len: usize) -> Self {
        match Self::try_new(len) {
            Ok(memory) => memory,
            Err(err) => error::raise(err),
        }
    }

    /// A zero-filled container of `len` elements
    pub fn try_new(len: usize) -> Result<Self> {
        let padded = padded_len::<V>(len)?;
        Ok(Self {
            buffer: AlignedBuffer::try_zeroed(padded, V::ALIGN)?,
            len,
        })
    }

    /// A container holding a copy of `values`
    #[track_caller]
    pub fn from_slice(values: &[V::Scalar]) -> Self {
        let mut memory = Self::new(values.len());
        memory.copy_from_slice(values);
        memory
    }

    /// Change the length, keeping the first `min(len, new_len)` elements
    ///
    /// Everything past them, new elements and padding alike, reads as zero
    /// afterwards. The allocation is replaced, so pointers taken earlier are
    /// invalidated.
    ///
    /// # Panics
    ///
    /// Panics if the padded byte size overflows `isize`.
    #[track_caller]
    pub fn resize(&mut self, new_len: usize) {
        if let Err(err) = self.try_resize(new_len) {
            error::raise(err);
        }
    }

    /// Fallible [`resize`](Self::resize); `self` is untouched on error
    pub fn try_resize(&mut self, new_len: usize) -> Result<()> {
        let padded = padded_len::<V>(new_len)?;
        let mut buffer = AlignedBuffer::try_zeroed(padded, V::ALIGN)?;
        let kept = self.len.min(new_len);
        buffer.as_mut_slice()[..kept].copy_from_slice(&self.buffer.as_slice()[..kept]);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            from = self.len,
            to = new_len,
            padded,
            "resized vector memory"
        );

        self.buffer = buffer;
        self.len = new_len;
        Ok(())
    }
}

/// `ceil(len / LANES) * LANES`, or a capacity overflow
fn padded_len<V: SimdVector>(len: usize) -> Result<usize> {
    len.div_ceil(V::LANES)
        .checked_mul(V::LANES)
        .ok_or(Error::CapacityOverflow { len })
}

impl<V: SimdVector> VectorMemory for DynMemory<V> {
    type Vector = V;

    #[inline(always)]
    fn len(&self) -> usize {
        self.len
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

impl<V: SimdVector> Default for DynMemory<V> {
    fn default() -> Self {
        Self::new(0)
    }
}

impl<V: SimdVector> Clone for DynMemory<V> {
    fn clone(&self) -> Self {
        Self {
            buffer: self.buffer.clone(),
            len: self.len,
        }
    }
}

impl<V: SimdVector> Index<usize> for DynMemory<V> {
    type Output = V::Scalar;

    #[inline]
    #[track_caller]
    fn index(&self, index: usize) -> &V::Scalar {
        error::check_index(index, self.len);
        &self.buffer.as_slice()[index]
    }
}

impl<V: SimdVector> IndexMut<usize> for DynMemory<V> {
    #[inline]
    #[track_caller]
    fn index_mut(&mut self, index: usize) -> &mut V::Scalar {
        error::check_index(index, self.len);
        &mut self.buffer.as_mut_slice()[index]
    }
}

impl<V: SimdVector> PartialEq for DynMemory<V> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<V: SimdVector> fmt::Debug for DynMemory<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynMemory")
            .field("len", &self.len)
            .field("lanes", &V::LANES)
            .field("data", &self.as_slice())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::generic::ArrayVector;

    type V4 = ArrayVector<f64, 4>;

    #[test]
    fn test_new_is_padded_and_zeroed() {
        let m = DynMemory::<V4>::new(9);
        assert_eq!(m.len(), 9);
        assert_eq!(m.vectors_count(), 3);
        assert_eq!(m.padded_len(), 12);
        assert_eq!(m.as_ptr() as usize % V4::ALIGN, 0);
        assert!(m.padded().iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_resize_keeps_prefix_and_zeroes_rest() {
        let mut m = DynMemory::<V4>::from_slice(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        m.set_last_vector(V4::splat(9.0));
        assert_eq!(m.as_slice(), &[1.0, 2.0, 3.0, 4.0, 9.0, 9.0]);

        m.resize(3);
        assert_eq!(m.as_slice(), &[1.0, 2.0, 3.0]);
        assert_eq!(m.padded(), &[1.0, 2.0, 3.0, 0.0]);

        m.resize(7);
        assert_eq!(m.as_slice(), &[1.0, 2.0, 3.0, 0.0, 0.0, 0.0, 0.0]);
        assert_eq!(m.padded_len(), 8);
        assert_eq!(m.as_ptr() as usize % V4::ALIGN, 0);
    }

    #[test]
    fn test_resize_to_zero_and_back() {
        let mut m = DynMemory::<V4>::from_slice(&[1.0, 2.0]);
        m.resize(0);
        assert!(m.is_empty());
        assert_eq!(m.padded_len(), 0);
        m.resize(1);
        assert_eq!(m.as_slice(), &[0.0]);
    }

    #[test]
    fn test_try_new_overflow() {
        let err = DynMemory::<V4>::try_new(usize::MAX).err();
        assert!(matches!(err, Some(Error::CapacityOverflow { .. })));
    }

    #[test]
    fn test_failed_resize_leaves_memory_intact() {
        let mut m = DynMemory::<V4>::from_slice(&[1.0, 2.0, 3.0]);
        assert!(m.try_resize(usize::MAX).is_err());
        assert_eq!(m.as_slice(), &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_chunks_visit_every_vector() {
        let m = DynMemory::<V4>::from_slice(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        let sums: alloc::vec::Vec<f64> = m.chunks().map(|v| v.horizontal_sum()).collect();
        assert_eq!(sums, [10.0, 5.0]);
    }

    #[test]
    fn test_chunks_mut_updates_padding_too() {
        let mut m = DynMemory::<V4>::new(5);
        for mut chunk in m.chunks_mut() {
            chunk.store(V4::splat(1.0));
        }
        assert!(m.padded().iter().all(|&x| x == 1.0));
        assert_eq!(m.as_slice().len(), 5);
    }

    #[test]
    #[should_panic(expected = "index 5 out of range for length 5")]
    fn test_index_past_len_panics() {
        let m = DynMemory::<V4>::new(5);
        let _ = m[5];
    }
}
