//! Seeded random operation sequences.
//!
//! [`random_ops`] draws a reproducible sequence from a ChaCha8 stream.
//! Indices are drawn unbounded and reduced against the current length when
//! applied, so the same sequence is valid for any starting state.
//! [`apply_deque`] and [`apply_reference`] normalise indices identically and
//! return whatever the operation yielded, so a caller can compare the two
//! step by step.

use std::collections::VecDeque;

use allocator_api2::alloc::Allocator;
use rand_chacha::rand_core::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use segdeque::Deque;

/// One mutation of a deque of `i64`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Op {
    PushBack(i64),
    PushFront(i64),
    PopBack,
    PopFront,
    Insert(usize, i64),
    Remove(usize),
    Set(usize, i64),
    Resize(usize, i64),
    Truncate(usize),
    Clear,
    ShrinkToFit,
}

/// Largest length a `Resize` op asks for.
const MAX_RESIZE: usize = 96;

/// Draw `count` operations from the stream seeded by `seed`.
///
/// Pushes dominate so sequences tend to grow.
pub fn random_ops(seed: u64, count: usize) -> Vec<Op> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let value = rng.next_u64() as i64;
            let index = rng.next_u32() as usize;
            match rng.next_u32() % 40 {
                0..=9 => Op::PushBack(value),
                10..=19 => Op::PushFront(value),
                20..=23 => Op::PopBack,
                24..=27 => Op::PopFront,
                28..=30 => Op::Insert(index, value),
                31..=33 => Op::Remove(index),
                34..=35 => Op::Set(index, value),
                36 => Op::Resize(index % (MAX_RESIZE + 1), value),
                37 => Op::Truncate(index % (MAX_RESIZE + 1)),
                38 => Op::Clear,
                _ => Op::ShrinkToFit,
            }
        })
        .collect()
}

/// Reduce a drawn index into `[0, len)`, or `[0, len]` for insertion.
fn reduce(index: usize, len: usize, inclusive: bool) -> usize {
    let bound = if inclusive { len + 1 } else { len };
    if bound == 0 {
        0
    } else {
        index % bound
    }
}

/// Apply `op` to a deque. Returns the removed or replaced value, if any.
pub fn apply_deque<A: Allocator>(deque: &mut Deque<i64, A>, op: &Op) -> Option<i64> {
    let len = deque.len();
    match *op {
        Op::PushBack(v) => {
            deque.push_back(v);
            None
        }
        Op::PushFront(v) => {
            deque.push_front(v);
            None
        }
        Op::PopBack => deque.pop_back(),
        Op::PopFront => deque.pop_front(),
        Op::Insert(i, v) => {
            deque.insert(reduce(i, len, true), v);
            None
        }
        Op::Remove(i) => deque.remove(reduce(i, len, false)),
        Op::Set(i, v) => deque
            .get_mut(reduce(i, len, false))
            .map(|slot| std::mem::replace(slot, v)),
        Op::Resize(n, v) => {
            deque.resize(n, v);
            None
        }
        Op::Truncate(n) => {
            deque.truncate(n);
            None
        }
        Op::Clear => {
            deque.clear();
            None
        }
        Op::ShrinkToFit => {
            deque.shrink_to_fit();
            None
        }
    }
}

/// Apply `op` to the `VecDeque` reference model.
pub fn apply_reference(model: &mut VecDeque<i64>, op: &Op) -> Option<i64> {
    let len = model.len();
    match *op {
        Op::PushBack(v) => {
            model.push_back(v);
            None
        }
        Op::PushFront(v) => {
            model.push_front(v);
            None
        }
        Op::PopBack => model.pop_back(),
        Op::PopFront => model.pop_front(),
        Op::Insert(i, v) => {
            model.insert(reduce(i, len, true), v);
            None
        }
        Op::Remove(i) => model.remove(reduce(i, len, false)),
        Op::Set(i, v) => model
            .get_mut(reduce(i, len, false))
            .map(|slot| std::mem::replace(slot, v)),
        Op::Resize(n, v) => {
            model.resize(n, v);
            None
        }
        Op::Truncate(n) => {
            model.truncate(n);
            None
        }
        Op::Clear => {
            model.clear();
            None
        }
        Op::ShrinkToFit => None,
    }
}
