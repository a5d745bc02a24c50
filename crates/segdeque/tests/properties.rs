//! Integration test: container laws checked over arbitrary contents.

use proptest::prelude::*;
use segdeque::{Deque, DequeConfig, DequeError};

fn deque_strategy() -> impl Strategy<Value = Deque<i32>> {
    (1usize..12, prop::collection::vec(any::<i32>(), 0..80), 0usize..40).prop_map(
        |(block, values, front)| {
            // Push some of the values at the front so head is not always 0.
            let mut d = Deque::with_config(DequeConfig::with_block_capacity(block));
            let split = front.min(values.len());
            for v in values[..split].iter().rev() {
                d.push_front(*v);
            }
            d.extend(&values[split..]);
            d
        },
    )
}

proptest! {
    #[test]
    fn from_elem_fills(n in 0usize..300, v in any::<i16>()) {
        let d = Deque::from_elem(v, n);
        prop_assert_eq!(d.len(), n);
        prop_assert!(d.iter().all(|x| *x == v));
    }

    #[test]
    fn resize_to_len_changes_nothing(mut d in deque_strategy(), v in any::<i32>()) {
        let before = d.clone();
        let stats = d.stats();
        let len = d.len();
        d.resize(len, v);
        prop_assert_eq!(&d, &before);
        prop_assert_eq!(d.stats(), stats);
    }

    #[test]
    fn clear_empties(mut d in deque_strategy()) {
        let capacity = d.capacity();
        d.clear();
        prop_assert!(d.is_empty());
        prop_assert_eq!(d.len(), 0);
        prop_assert_eq!(d.capacity(), capacity);
    }

    #[test]
    fn clone_is_independent(d in deque_strategy(), i in any::<prop::sample::Index>()) {
        prop_assume!(!d.is_empty());
        let i = i.index(d.len());
        let mut c = d.clone();
        c[i] = c[i].wrapping_add(1);
        prop_assert_ne!(c[i], d[i]);
        prop_assert_eq!(c.len(), d.len());
    }

    #[test]
    fn cursor_bounds(d in deque_strategy()) {
        prop_assert_eq!(d.end() - d.begin(), d.len() as isize);
        prop_assert_eq!((d.end() - 1).get(), d.back());
        prop_assert_eq!(d.begin().get(), d.front());
        let mut c = d.begin();
        for _ in 0..d.len() {
            c.move_next();
        }
        prop_assert_eq!(c, d.end());
    }

    #[test]
    fn at_is_checked(d in deque_strategy()) {
        let len = d.len();
        prop_assert_eq!(d.at(len), Err(DequeError::OutOfRange { index: len, len }));
        for i in 0..len {
            prop_assert_eq!(d.at(i), Ok(&d[i]));
        }
    }

    #[test]
    fn ordering_matches_slices(a in deque_strategy(), b in deque_strategy()) {
        let va: Vec<i32> = a.iter().copied().collect();
        let vb: Vec<i32> = b.iter().copied().collect();
        prop_assert_eq!(a.cmp(&b), va.cmp(&vb));
        prop_assert_eq!(a == b, va == vb);
    }

    #[test]
    fn shrink_to_fit_preserves_contents(mut d in deque_strategy()) {
        let before: Vec<i32> = d.iter().copied().collect();
        d.shrink_to_fit();
        prop_assert_eq!(&d, &before);
        let block = d.config().block_capacity;
        prop_assert!(d.capacity() < d.len() + block);
        prop_assert_eq!(d.capacity() == 0, d.is_empty());
    }
}
