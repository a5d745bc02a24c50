//! Logical index to slot address translation.
//!
//! Every element access goes through here:
//!
//! ```text
//! absolute = head + index
//! block    = absolute / block_capacity
//! offset   = absolute % block_capacity
//! address  = table[block] + offset
//! ```
//!
//! Because `head` can move backwards into front slack, `push_front` never
//! has to move existing elements while slack remains.

use crate::store::BlockStore;

/// A slot location inside a block store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotPosition {
    /// Index into the block table.
    pub block: usize,
    /// Slot offset within the block.
    pub offset: usize,
}

impl SlotPosition {
    /// Split an absolute slot index into block and offset.
    #[inline]
    pub fn from_absolute(absolute: usize, block_capacity: usize) -> Self {
        Self {
            block: absolute / block_capacity,
            offset: absolute % block_capacity,
        }
    }

    /// Locate logical `index` for a live range starting at slot `head`.
    #[inline]
    pub fn locate(head: usize, index: usize, block_capacity: usize) -> Self {
        Self::from_absolute(head + index, block_capacity)
    }

    /// The absolute slot index this position denotes.
    #[inline]
    pub fn absolute(self, block_capacity: usize) -> usize {
        self.block * block_capacity + self.offset
    }
}

impl<T> BlockStore<T> {
    /// Address of the slot at `pos`.
    ///
    /// # Safety
    ///
    /// `pos` must lie inside the allocated store.
    #[inline]
    pub(crate) unsafe fn resolve(&self, pos: SlotPosition) -> *mut T {
        debug_assert!(pos.offset < self.block_capacity());
        // SAFETY: caller guarantees `pos.block < block_count`; the offset
        // stays inside that block.
        unsafe { self.block(pos.block).as_ptr().add(pos.offset) }
    }

    /// Address of absolute slot `absolute`.
    ///
    /// # Safety
    ///
    /// `absolute < self.capacity()`.
    #[inline]
    pub(crate) unsafe fn slot(&self, absolute: usize) -> *mut T {
        debug_assert!(absolute < self.capacity());
        // SAFETY: forwarded from the caller.
        unsafe { self.resolve(SlotPosition::from_absolute(absolute, self.block_capacity())) }
    }
}
