//! Benchmark workloads for segdeque.
//!
//! Provides pre-built operation streams for benchmarks:
//!
//! - [`fifo_profile`]: steady-state queue churn (push back, pop front)
//! - [`mixed_profile`]: seeded random mix of every mutation
//! - [`run_profile`]: replay a stream against a fresh deque

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use segdeque::{Deque, DequeConfig};
use segdeque_test_utils::{apply_deque, random_ops, Op};

/// Block sizes swept by the benchmarks.
pub const BLOCK_SIZES: [usize; 4] = [4, 16, 64, 512];

/// A queue that holds `depth` elements while `rounds` more pass through.
pub fn fifo_profile(depth: usize, rounds: usize) -> Vec<Op> {
    let mut ops = Vec::with_capacity(depth + 2 * rounds);
    ops.extend((0..depth).map(|i| Op::PushBack(i as i64)));
    for i in 0..rounds {
        ops.push(Op::PushBack((depth + i) as i64));
        ops.push(Op::PopFront);
    }
    ops
}

/// `count` random operations drawn from `seed`.
pub fn mixed_profile(seed: u64, count: usize) -> Vec<Op> {
    random_ops(seed, count)
}

/// Replay `ops` on a new deque with `config`. Returns the final deque.
pub fn run_profile(config: DequeConfig, ops: &[Op]) -> Deque<i64> {
    let mut deque = Deque::with_config(config);
    for op in ops {
        apply_deque(&mut deque, op);
    }
    deque
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fifo_profile_keeps_depth() {
        let ops = fifo_profile(100, 1000);
        let deque = run_profile(DequeConfig::default(), &ops);
        assert_eq!(deque.len(), 100);
        assert_eq!(deque.front(), Some(&1000));
        assert_eq!(deque.back(), Some(&1099));
    }

    #[test]
    fn fifo_churn_does_not_grow_without_bound() {
        let ops = fifo_profile(64, 100_000);
        let deque = run_profile(DequeConfig::with_block_capacity(16), &ops);
        assert!(deque.capacity() <= 4 * 64 + 16);
    }

    #[test]
    fn mixed_profile_is_deterministic() {
        let a = run_profile(DequeConfig::default(), &mixed_profile(3, 2000));
        let b = run_profile(DequeConfig::with_block_capacity(7), &mixed_profile(3, 2000));
        assert_eq!(a, b);
    }
}
