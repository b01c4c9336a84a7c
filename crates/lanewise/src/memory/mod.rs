//! Aligned, padded element storage for vectorized loops
//!
//! A container of `len` elements is over-allocated to a whole number of
//! vectors and aligned to the vector width, so every `vector(i)` is a full,
//! aligned load even when `len` is not a multiple of `LANES`:
//!
//! ```text
//! len = 10, LANES = 4:
//! [0 1 2 3] [4 5 6 7] [8 9 p p]
//!  vector 0  vector 1  vector 2     p = zeroed padding
//! ```
//!
//! Padding starts out zero and is never visible through `as_slice` or
//! indexing, but vector stores may write to it.
//!
//! [`Memory`] fixes the length in the type; [`DynMemory`] picks it at run
//! time and can be resized. Both share their accessors through
//! [`VectorMemory`].

mod buffer;
mod dynamic;
mod fixed;

use core::iter::FusedIterator;
use core::marker::PhantomData;
use core::slice::{ChunksExact, ChunksExactMut};

use crate::error::{self, Error, Result};
use crate::traits::SimdVector;

pub use dynamic::DynMemory;
pub use fixed::Memory;

/// Element type of a memory container
pub type ElementOf<M> = <<M as VectorMemory>::Vector as SimdVector>::Scalar;

/// Vector-granular access to an aligned, padded buffer
///
/// Implementors supply the user length and the padded storage; everything
/// else is provided.
///
/// # Example
///
/// ```rust
/// use lanewise::{DynMemory, SimdVector, Vector, VectorMemory};
///
/// let mut data = DynMemory::<Vector<f32>>::new(10);
/// for i in 0..data.vectors_count() {
///     let v = data.vector(i) + Vector::<f32>::splat(1.0);
///     data.set_vector(i, v);
/// }
/// assert!(data.as_slice().iter().all(|&x| x == 1.0));
/// ```
pub trait VectorMemory {
    /// Vector type the storage is laid out for
    type Vector: SimdVector;

    /// Number of user elements
    fn len(&self) -> usize;

    /// The whole allocation: user elements followed by padding
    fn padded(&self) -> &[<Self::Vector as SimdVector>::Scalar];

    /// Mutable view of the whole allocation
    fn padded_mut(&mut self) -> &mut [<Self::Vector as SimdVector>::Scalar];

    /// Returns true if there are no user elements
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of user elements (same as [`len`](Self::len))
    #[inline]
    fn entries_count(&self) -> usize {
        self.len()
    }

    /// `ceil(len / LANES)`
    #[inline]
    fn vectors_count(&self) -> usize {
        self.len().div_ceil(<Self::Vector as SimdVector>::LANES)
    }

    /// `vectors_count() * LANES`
    #[inline]
    fn padded_len(&self) -> usize {
        self.padded().len()
    }

    /// The user elements
    #[inline]
    fn as_slice(&self) -> &[<Self::Vector as SimdVector>::Scalar] {
        let len = self.len();
        &self.padded()[..len]
    }

    /// The user elements, mutably
    #[inline]
    fn as_mut_slice(&mut self) -> &mut [<Self::Vector as SimdVector>::Scalar] {
        let len = self.len();
        &mut self.padded_mut()[..len]
    }

    /// Pointer to the first element, aligned to `Vector::ALIGN`
    #[inline]
    fn as_ptr(&self) -> *const <Self::Vector as SimdVector>::Scalar {
        self.padded().as_ptr()
    }

    /// Mutable pointer to the first element
    #[inline]
    fn as_mut_ptr(&mut self) -> *mut <Self::Vector as SimdVector>::Scalar {
        self.padded_mut().as_mut_ptr()
    }

    /// Aligned load of vector `i`
    ///
    /// # Panics
    ///
    /// Panics if `i >= vectors_count()`.
    #[inline]
    #[track_caller]
    fn vector(&self, i: usize) -> Self::Vector {
        error::check_index(i, self.vectors_count());
        <Self::Vector as SimdVector>::load_aligned(&self.padded()[i * <Self::Vector as SimdVector>::LANES..])
    }

    /// Aligned store of vector `i`
    ///
    /// # Panics
    ///
    /// Panics if `i >= vectors_count()`.
    #[inline]
    #[track_caller]
    fn set_vector(&mut self, i: usize, value: Self::Vector) {
        error::check_index(i, self.vectors_count());
        value.store_aligned(&mut self.padded_mut()[i * <Self::Vector as SimdVector>::LANES..]);
    }

    /// Read/write proxy for vector `i`
    ///
    /// # Panics
    ///
    /// Panics if `i >= vectors_count()`.
    #[inline]
    #[track_caller]
    fn vector_mut(&mut self, i: usize) -> VectorMut<'_, Self::Vector> {
        error::check_index(i, self.vectors_count());
        let lanes = <Self::Vector as SimdVector>::LANES;
        VectorMut::new(&mut self.padded_mut()[i * lanes..(i + 1) * lanes])
    }

    /// Unaligned window of `LANES` elements starting at `i * LANES + offset`
    ///
    /// Fails with [`Error::WindowOutOfRange`] unless the whole window lies
    /// inside the padded allocation.
    #[inline]
    fn try_vector_at(&self, i: usize, offset: isize) -> Result<Self::Vector> {
        let start = window_start::<Self::Vector>(i, offset, self.padded_len())?;
        Ok(<Self::Vector as SimdVector>::load_unaligned(&self.padded()[start..]))
    }

    /// Unaligned window of `LANES` elements starting at `i * LANES + offset`
    ///
    /// This is how stencils read neighbours: `vector_at(i, 1)` is vector `i`
    /// shifted one element to the right in memory.
    ///
    /// # Panics
    ///
    /// Panics with a window-out-of-range message unless the whole window
    /// lies inside the padded allocation.
    #[inline]
    #[track_caller]
    fn vector_at(&self, i: usize, offset: isize) -> Self::Vector {
        match self.try_vector_at(i, offset) {
            Ok(vector) => vector,
            Err(err) => error::raise(err),
        }
    }

    /// Unaligned store of `LANES` elements starting at `i * LANES + offset`
    ///
    /// # Panics
    ///
    /// Same bounds as [`vector_at`](Self::vector_at).
    #[inline]
    #[track_caller]
    fn set_vector_at(&mut self, i: usize, offset: isize, value: Self::Vector) {
        match window_start::<Self::Vector>(i, offset, self.padded_len()) {
            Ok(start) => value.store_unaligned(&mut self.padded_mut()[start..]),
            Err(err) => error::raise(err),
        }
    }

    /// The last vector of the allocation, `[padded_len - LANES, padded_len)`
    ///
    /// # Panics
    ///
    /// Panics if the container is empty.
    #[inline]
    #[track_caller]
    fn last_vector(&self) -> Self::Vector {
        let count = self.vectors_count();
        if count == 0 {
            error::index_out_of_range(0, 0);
        }
        self.vector(count - 1)
    }

    /// Store to the last vector of the allocation
    ///
    /// # Panics
    ///
    /// Panics if the container is empty.
    #[inline]
    #[track_caller]
    fn set_last_vector(&mut self, value: Self::Vector) {
        let count = self.vectors_count();
        if count == 0 {
            error::index_out_of_range(0, 0);
        }
        self.set_vector(count - 1, value);
    }

    /// Iterate the vectors by value
    #[inline]
    fn chunks(&self) -> Chunks<'_, Self::Vector> {
        Chunks {
            inner: self.padded().chunks_exact(<Self::Vector as SimdVector>::LANES),
            _vector: PhantomData,
        }
    }

    /// Iterate read/write proxies for the vectors
    #[inline]
    fn chunks_mut(&mut self) -> ChunksMut<'_, Self::Vector> {
        ChunksMut {
            inner: self.padded_mut().chunks_exact_mut(<Self::Vector as SimdVector>::LANES),
            _vector: PhantomData,
        }
    }

    /// Set every user element to `value` (padding is left alone)
    #[inline]
    fn fill(&mut self, value: <Self::Vector as SimdVector>::Scalar) {
        self.as_mut_slice().fill(value);
    }

    /// Copy `src` into the user elements
    ///
    /// # Panics
    ///
    /// Panics if `src.len() != len()`.
    #[inline]
    #[track_caller]
    fn copy_from_slice(&mut self, src: &[<Self::Vector as SimdVector>::Scalar]) {
        self.as_mut_slice().copy_from_slice(src);
    }
}

/// First element of the window `i * LANES + offset`, checked against the allocation
#[inline]
fn window_start<V: SimdVector>(i: usize, offset: isize, padded_len: usize) -> Result<usize> {
    let lanes = V::LANES;
    i.checked_mul(lanes)
        .and_then(|base| base.checked_add_signed(offset))
        .filter(|&start| start <= padded_len && padded_len - start >= lanes)
        .ok_or_else(|| Error::WindowOutOfRange {
            start: (i as isize).saturating_mul(lanes as isize).saturating_add(offset),
            lanes,
            padded_len,
        })
}

/// Read/write proxy for one aligned vector of a memory container
pub struct VectorMut<'a, V: SimdVector> {
    slice: &'a mut [V::Scalar],
    _vector: PhantomData<V>,
}

impl<'a, V: SimdVector> VectorMut<'a, V> {
    #[inline(always)]
    fn new(slice: &'a mut [V::Scalar]) -> Self {
        Self {
            slice,
            _vector: PhantomData,
        }
    }

    /// Load the vector
    #[inline(always)]
    pub fn load(&self) -> V {
        V::load_aligned(self.slice)
    }

    /// Store a vector
    #[inline(always)]
    pub fn store(&mut self, value: V) {
        value.store_aligned(self.slice)
    }

    /// Store only the lanes selected by `mask`
    #[inline(always)]
    pub fn store_masked(&mut self, value: V, mask: V::Mask) {
        value.store_masked(self.slice, mask)
    }

    /// Load, transform and store back
    #[inline(always)]
    pub fn update(&mut self, f: impl FnOnce(V) -> V) {
        let value = f(self.load());
        self.store(value);
    }
}

/// Iterator over the vectors of a memory container
pub struct Chunks<'a, V: SimdVector> {
    inner: ChunksExact<'a, V::Scalar>,
    _vector: PhantomData<V>,
}

impl<V: SimdVector> Iterator for Chunks<'_, V> {
    type Item = V;

    #[inline]
    fn next(&mut self) -> Option<V> {
        self.inner.next().map(V::load_aligned)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V: SimdVector> ExactSizeIterator for Chunks<'_, V> {}
impl<V: SimdVector> FusedIterator for Chunks<'_, V> {}

/// Iterator over read/write vector proxies
pub struct ChunksMut<'a, V: SimdVector> {
    inner: ChunksExactMut<'a, V::Scalar>,
    _vector: PhantomData<V>,
}

impl<'a, V: SimdVector> Iterator for ChunksMut<'a, V> {
    type Item = VectorMut<'a, V>;

    #[inline]
    fn next(&mut self) -> Option<VectorMut<'a, V>> {
        self.inner.next().map(VectorMut::new)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V: SimdVector> ExactSizeIterator for ChunksMut<'_, V> {}
impl<V: SimdVector> FusedIterator for ChunksMut<'_, V> {}
