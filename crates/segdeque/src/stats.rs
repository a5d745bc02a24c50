//! Storage statistics for a deque.
//!
//! [`DequeStats`] is a point-in-time view of how a [`Deque`](crate::Deque)
//! uses its blocks, for telemetry and for tests that check growth policy.

/// Occupancy and memory figures for one deque.
///
/// Always satisfies `front_slack + len + back_slack == capacity` and
/// `capacity == block_count * block_capacity`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DequeStats {
    /// Number of live elements.
    pub len: usize,
    /// Total slots across all blocks.
    pub capacity: usize,
    /// Slots per block.
    pub block_capacity: usize,
    /// Number of blocks in the block table.
    pub block_count: usize,
    /// Free slots before the first element.
    pub front_slack: usize,
    /// Free slots after the last element.
    pub back_slack: usize,
    /// Bytes held from the allocator, block table included.
    pub memory_bytes: usize,
}

impl DequeStats {
    /// Fraction of allocated slots holding live elements, in `[0, 1]`.
    ///
    /// An unallocated deque reports `0.0`.
    pub fn occupancy(&self) -> f64 {
        if self.capacity == 0 {
            0.0
        } else {
            self.len as f64 / self.capacity as f64
        }
    }
}
