//! Deque configuration parameters.

use crate::error::ConfigError;

/// Configuration for a [`Deque`](crate::Deque)'s block store.
///
/// Controls block sizing. Validated at construction; a container keeps its
/// configuration for its whole lifetime (it travels with the storage on
/// [`swap`](crate::Deque::swap)).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DequeConfig {
    /// Number of element slots in each inner block.
    ///
    /// Default: 10. Must be at least 1. Small blocks keep unused slack low;
    /// the block table grows by one entry per block.
    pub block_capacity: usize,

    /// Upper bound on the size of a single block in bytes.
    ///
    /// Default: 1 MiB. Checked against the element type by
    /// [`DequeConfig::validate_for`], so a large `T` cannot silently turn a
    /// block into a huge allocation.
    pub max_block_bytes: usize,
}

impl DequeConfig {
    /// Default number of slots per block.
    pub const DEFAULT_BLOCK_CAPACITY: usize = 10;

    /// Default per-block byte limit.
    pub const DEFAULT_MAX_BLOCK_BYTES: usize = 1 << 20;

    /// Create a config with default values.
    pub const fn new() -> Self {
        Self {
            block_capacity: Self::DEFAULT_BLOCK_CAPACITY,
            max_block_bytes: Self::DEFAULT_MAX_BLOCK_BYTES,
        }
    }

    /// Create a config with the given block capacity and default limits.
    pub const fn with_block_capacity(block_capacity: usize) -> Self {
        Self {
            block_capacity,
            max_block_bytes: Self::DEFAULT_MAX_BLOCK_BYTES,
        }
    }

    /// Check the element-type-independent constraints.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.block_capacity == 0 {
            return Err(ConfigError::ZeroBlockCapacity);
        }
        Ok(())
    }

    /// Check all constraints for element type `T`.
    ///
    /// In addition to [`validate`](Self::validate), rejects configurations
    /// where one block of `T` would exceed `max_block_bytes`.
    pub fn validate_for<T>(&self) -> Result<(), ConfigError> {
        self.validate()?;
        match self.block_bytes::<T>() {
            Some(bytes) if bytes <= self.max_block_bytes => Ok(()),
            bytes => Err(ConfigError::BlockTooLarge {
                block_bytes: bytes,
                limit: self.max_block_bytes,
            }),
        }
    }

    /// Size of one block of `T` in bytes, or `None` on overflow.
    pub fn block_bytes<T>(&self) -> Option<usize> {
        self.block_capacity.checked_mul(std::mem::size_of::<T>())
    }

    /// Number of blocks needed to hold `capacity` slots.
    pub fn blocks_for(&self, capacity: usize) -> usize {
        capacity.div_ceil(self.block_capacity)
    }
}

impl Default for DequeConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_block_capacity_is_ten() {
        let config = DequeConfig::default();
        assert_eq!(config.block_capacity, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_block_capacity_rejected() {
        let config = DequeConfig::with_block_capacity(0);
        assert_eq!(config.validate(), Err(ConfigError::ZeroBlockCapacity));
    }

    #[test]
    fn oversized_block_rejected_for_large_elements() {
        let config = DequeConfig {
            block_capacity: 4,
            max_block_bytes: 64,
        };
        assert!(config.validate_for::<u64>().is_ok());
        assert!(matches!(
            config.validate_for::<[u8; 32]>(),
            Err(ConfigError::BlockTooLarge {
                block_bytes: Some(128),
                limit: 64
            })
        ));
    }

    #[test]
    fn block_bytes_overflow_reported_as_none() {
        let config = DequeConfig::with_block_capacity(usize::MAX);
        assert_eq!(config.block_bytes::<u32>(), None);
        assert!(config.validate_for::<u32>().is_err());
    }

    #[test]
    fn blocks_for_rounds_up() {
        let config = DequeConfig::new();
        assert_eq!(config.blocks_for(0), 0);
        assert_eq!(config.blocks_for(1), 1);
        assert_eq!(config.blocks_for(10), 1);
        assert_eq!(config.blocks_for(11), 2);
    }

    #[test]
    fn zero_sized_elements_always_fit() {
        let config = DequeConfig::with_block_capacity(usize::MAX / 2);
        assert_eq!(config.block_bytes::<()>(), Some(0));
        assert!(config.validate_for::<()>().is_ok());
    }
}
