//! Aligned, zero-initialised heap storage backing the memory containers

use alloc::alloc::{alloc_zeroed, dealloc, handle_alloc_error, Layout};
use core::marker::PhantomData;
use core::ptr::{self, NonNull};
use core::{mem, slice};

use crate::element::Element;
use crate::error::{self, Error, Result};

/// `cap` elements of `T` at an address aligned to `align` bytes
///
/// Every element starts out zero, which is a valid value for every
/// [`Element`].
pub(crate) struct AlignedBuffer<T: Element> {
    ptr: NonNull<T>,
    cap: usize,
    align: usize,
    _owns: PhantomData<T>,
}

// The buffer is a uniquely owned allocation, like `Box<[T]>`
unsafe impl<T: Element> Send for AlignedBuffer<T> {}
unsafe impl<T: Element> Sync for AlignedBuffer<T> {}

impl<T: Element> AlignedBuffer<T> {
    /// Allocate `cap` zeroed elements aligned to `align` bytes
    ///
    /// Fails with [`Error::CapacityOverflow`] when the byte size does not fit
    /// in `isize`. Allocator failure aborts through `handle_alloc_error`.
    pub(crate) fn try_zeroed(cap: usize, align: usize) -> Result<Self> {
        let align = align.max(mem::align_of::<T>());
        if cap == 0 {
            // Dangling, but still aligned so `as_ptr` keeps its alignment guarantee
            let dangling = ptr::null_mut::<u8>().wrapping_add(align).cast::<T>();
            return Ok(Self {
                ptr: NonNull::new(dangling).unwrap_or(NonNull::dangling()),
                cap: 0,
                align,
                _owns: PhantomData,
            });
        }

        let layout = Self::layout(cap, align)?;
        // SAFETY: layout has a non-zero size since cap > 0 and T is not a ZST
        let raw = unsafe { alloc_zeroed(layout) };
        let Some(ptr) = NonNull::new(raw.cast::<T>()) else {
            handle_alloc_error(layout)
        };

        #[cfg(feature = "tracing")]
        tracing::trace!(
            elements = cap,
            bytes = layout.size(),
            align = layout.align(),
            "allocated aligned vector memory"
        );

        Ok(Self {
            ptr,
            cap,
            align,
            _owns: PhantomData,
        })
    }

    /// Like [`try_zeroed`](Self::try_zeroed) but panics on overflow
    #[track_caller]
    pub(crate) fn zeroed(cap: usize, align: usize) -> Self {
        match Self::try_zeroed(cap, align) {
            Ok(buffer) => buffer,
            Err(err) => error::raise(err),
        }
    }

    fn layout(cap: usize, align: usize) -> Result<Layout> {
        let overflow = Error::CapacityOverflow { len: cap };
        let size = cap.checked_mul(mem::size_of::<T>()).ok_or(overflow)?;
        Layout::from_size_align(size, align).map_err(|_| overflow)
    }

    #[inline(always)]
    pub(crate) fn as_slice(&self) -> &[T] {
        // SAFETY: ptr is valid and initialised for cap elements (or dangling with cap 0)
        unsafe { slice::from_raw_parts(self.ptr.as_ptr(), self.cap) }
    }

    #[inline(always)]
    pub(crate) fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: as above, and &mut self guarantees unique access
        unsafe { slice::from_raw_parts_mut(self.ptr.as_ptr(), self.cap) }
    }
}

impl<T: Element> Clone for AlignedBuffer<T> {
    fn clone(&self) -> Self {
        let mut copy = Self::zeroed(self.cap, self.align);
        copy.as_mut_slice().copy_from_slice(self.as_slice());
        copy
    }
}

impl<T: Element> Drop for AlignedBuffer<T> {
    fn drop(&mut self) {
        if self.cap == 0 {
            return;
        }
        // SAFETY: the same size and align were validated when allocating
        unsafe {
            let layout =
                Layout::from_size_align_unchecked(self.cap * mem::size_of::<T>(), self.align);
            dealloc(self.ptr.as_ptr().cast::<u8>(), layout);
        }
    }
}
