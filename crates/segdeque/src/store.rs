//! Block table and contiguous backing storage.
//!
//! A [`BlockStore`] owns one contiguous region of `block_count *
//! block_capacity` uninitialised slots plus a block table whose entries
//! stride through that region. Slots are addressed by absolute index
//! (see [`crate::position`]); the store never knows which slots are live.
//!
//! The store does not hold an allocator. The owning container passes the
//! same allocator to [`BlockStore::allocate`] and [`BlockStore::release`].

use std::alloc::Layout;
use std::marker::PhantomData;
use std::ptr::NonNull;

use allocator_api2::alloc::Allocator;

use crate::error::DequeError;

/// One successful allocation: the slot region and its block table.
struct Allocation<T> {
    /// First entry of the block table (`block_count` entries).
    table: NonNull<NonNull<T>>,
    /// Start of the slot region.
    region: NonNull<T>,
    table_layout: Layout,
    region_layout: Layout,
}

/// Fixed-size blocks of raw element slots.
///
/// Two states: empty (no allocation, `block_count == 0`) and allocated
/// (at least one block). Capacity is always a whole number of blocks.
pub(crate) struct BlockStore<T> {
    allocation: Option<Allocation<T>>,
    block_count: usize,
    block_capacity: usize,
    _marker: PhantomData<T>,
}

// SAFETY: the store owns its slots exactly as a `Vec<T>` owns its buffer.
unsafe impl<T: Send> Send for BlockStore<T> {}
// SAFETY: shared access only hands out raw pointers; callers uphold aliasing.
unsafe impl<T: Sync> Sync for BlockStore<T> {}

impl<T> BlockStore<T> {
    /// A store with no allocation.
    pub(crate) const fn empty(block_capacity: usize) -> Self {
        Self {
            allocation: None,
            block_count: 0,
            block_capacity,
            _marker: PhantomData,
        }
    }

    /// Allocate blocks for at least `capacity` slots.
    ///
    /// `capacity == 0` yields an empty store without touching the allocator.
    /// On failure nothing stays allocated.
    pub(crate) fn allocate<A: Allocator>(
        alloc: &A,
        capacity: usize,
        block_capacity: usize,
    ) -> Result<Self, DequeError> {
        debug_assert!(block_capacity > 0);
        if capacity == 0 {
            return Ok(Self::empty(block_capacity));
        }

        let block_count = capacity.div_ceil(block_capacity);
        let slots = block_count
            .checked_mul(block_capacity)
            .ok_or(DequeError::CapacityOverflow)?;
        let region_layout =
            Layout::array::<T>(slots).map_err(|_| DequeError::CapacityOverflow)?;
        let table_layout =
            Layout::array::<NonNull<T>>(block_count).map_err(|_| DequeError::CapacityOverflow)?;

        let region = match alloc.allocate(region_layout) {
            Ok(ptr) => ptr.cast::<T>(),
            Err(_) => {
                tracing::debug!(bytes = region_layout.size(), "block region allocation failed");
                return Err(DequeError::AllocFailed {
                    layout: region_layout,
                });
            }
        };
        let table = match alloc.allocate(table_layout) {
            Ok(ptr) => ptr.cast::<NonNull<T>>(),
            Err(_) => {
                tracing::debug!(bytes = table_layout.size(), "block table allocation failed");
                // SAFETY: `region` was allocated just above with `region_layout`.
                unsafe { alloc.deallocate(region.cast(), region_layout) };
                return Err(DequeError::AllocFailed {
                    layout: table_layout,
                });
            }
        };

        for block in 0..block_count {
            // SAFETY: `block * block_capacity < slots`, inside the region;
            // `block < block_count`, inside the table.
            unsafe {
                let start = NonNull::new_unchecked(region.as_ptr().add(block * block_capacity));
                table.as_ptr().add(block).write(start);
            }
        }

        Ok(Self {
            allocation: Some(Allocation {
                table,
                region,
                table_layout,
                region_layout,
            }),
            block_count,
            block_capacity,
            _marker: PhantomData,
        })
    }

    /// Return the region and the block table to the allocator.
    ///
    /// The store is empty afterwards.
    ///
    /// # Safety
    ///
    /// `alloc` must be the allocator this store was allocated with, and no
    /// slot may still hold a live element that needs dropping.
    pub(crate) unsafe fn release<A: Allocator>(&mut self, alloc: &A) {
        if let Some(allocation) = self.allocation.take() {
            // SAFETY: both pointers came from `alloc` with these layouts.
            unsafe {
                alloc.deallocate(allocation.region.cast(), allocation.region_layout);
                alloc.deallocate(allocation.table.cast(), allocation.table_layout);
            }
        }
        self.block_count = 0;
    }

    /// Start of block `block`, read through the block table.
    ///
    /// # Safety
    ///
    /// The store must be allocated and `block < block_count`.
    #[inline]
    pub(crate) unsafe fn block(&self, block: usize) -> NonNull<T> {
        debug_assert!(self.is_allocated() && block < self.block_count);
        match &self.allocation {
            // SAFETY: caller guarantees `block` is a valid table index.
            Some(allocation) => unsafe { *allocation.table.as_ptr().add(block) },
            // SAFETY: caller guarantees the store is allocated.
            None => unsafe { std::hint::unreachable_unchecked() },
        }
    }

    /// Total slots across all blocks.
    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.block_count * self.block_capacity
    }

    #[inline]
    pub(crate) fn block_count(&self) -> usize {
        self.block_count
    }

    #[inline]
    pub(crate) fn block_capacity(&self) -> usize {
        self.block_capacity
    }

    /// Whether the store currently holds an allocation.
    pub(crate) fn is_allocated(&self) -> bool {
        self.allocation.is_some()
    }

    /// Bytes held from the allocator (region plus block table).
    pub(crate) fn memory_bytes(&self) -> usize {
        self.allocation
            .as_ref()
            .map_or(0, |a| a.region_layout.size() + a.table_layout.size())
    }
}
