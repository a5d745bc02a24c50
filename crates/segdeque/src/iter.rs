//! Borrowing and owning iterators over a [`Deque`].
//!
//! The borrowing iterators walk a half-open range of absolute slots, so
//! `nth` and `nth_back` are O(1) and both ends can be consumed
//! independently.

use std::fmt;
use std::iter::FusedIterator;
use std::marker::PhantomData;

use allocator_api2::alloc::{Allocator, Global};

use crate::deque::Deque;
use crate::store::BlockStore;

/// Immutable front-to-back iterator. Created by [`Deque::iter`].
pub struct Iter<'a, T> {
    store: &'a BlockStore<T>,
    start: usize,
    end: usize,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(store: &'a BlockStore<T>, start: usize, end: usize) -> Self {
        Self { store, start, end }
    }
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            store: self.store,
            start: self.start,
            end: self.end,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<&'a T> {
        if self.start == self.end {
            return None;
        }
        let slot = self.start;
        self.start += 1;
        // SAFETY: slots in `[start, end)` are live for `'a`.
        Some(unsafe { &*self.store.slot(slot) })
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.end - self.start;
        (n, Some(n))
    }

    fn nth(&mut self, n: usize) -> Option<&'a T> {
        if n >= self.end - self.start {
            self.start = self.end;
            return None;
        }
        self.start += n;
        self.next()
    }

    fn count(self) -> usize {
        self.end - self.start
    }

    fn last(mut self) -> Option<&'a T> {
        self.next_back()
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    #[inline]
    fn next_back(&mut self) -> Option<&'a T> {
        if self.start == self.end {
            return None;
        }
        self.end -= 1;
        // SAFETY: slots in `[start, end)` are live for `'a`.
        Some(unsafe { &*self.store.slot(self.end) })
    }

    fn nth_back(&mut self, n: usize) -> Option<&'a T> {
        if n >= self.end - self.start {
            self.end = self.start;
            return None;
        }
        self.end -= n;
        self.next_back()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

/// Mutable front-to-back iterator. Created by [`Deque::iter_mut`].
pub struct IterMut<'a, T> {
    store: &'a BlockStore<T>,
    start: usize,
    end: usize,
    _marker: PhantomData<&'a mut T>,
}

// SAFETY: yields disjoint `&mut T`, like `std::slice::IterMut`.
unsafe impl<T: Send> Send for IterMut<'_, T> {}
// SAFETY: `&IterMut` exposes nothing beyond `&T`.
unsafe impl<T: Sync> Sync for IterMut<'_, T> {}

impl<'a, T> IterMut<'a, T> {
    /// The store must be exclusively borrowed by the caller for `'a`.
    pub(crate) fn new(store: &'a BlockStore<T>, start: usize, end: usize) -> Self {
        Self {
            store,
            start,
            end,
            _marker: PhantomData,
        }
    }
}

impl<T> fmt::Debug for IterMut<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IterMut")
            .field("remaining", &(self.end - self.start))
            .finish()
    }
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    #[inline]
    fn next(&mut self) -> Option<&'a mut T> {
        if self.start == self.end {
            return None;
        }
        let slot = self.start;
        self.start += 1;
        // SAFETY: each live slot is yielded at most once.
        Some(unsafe { &mut *self.store.slot(slot) })
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.end - self.start;
        (n, Some(n))
    }

    fn nth(&mut self, n: usize) -> Option<&'a mut T> {
        if n >= self.end - self.start {
            self.start = self.end;
            return None;
        }
        self.start += n;
        self.next()
    }

    fn count(self) -> usize {
        self.end - self.start
    }

    fn last(mut self) -> Option<&'a mut T> {
        self.next_back()
    }
}

impl<'a, T> DoubleEndedIterator for IterMut<'a, T> {
    #[inline]
    fn next_back(&mut self) -> Option<&'a mut T> {
        if self.start == self.end {
            return None;
        }
        self.end -= 1;
        // SAFETY: each live slot is yielded at most once.
        Some(unsafe { &mut *self.store.slot(self.end) })
    }

    fn nth_back(&mut self, n: usize) -> Option<&'a mut T> {
        if n >= self.end - self.start {
            self.end = self.start;
            return None;
        }
        self.end -= n;
        self.next_back()
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}
impl<T> FusedIterator for IterMut<'_, T> {}

/// Owning iterator. Created by `Deque::into_iter`.
pub struct IntoIter<T, A: Allocator = Global> {
    deque: Deque<T, A>,
}

impl<T, A: Allocator> IntoIter<T, A> {
    pub(crate) fn new(deque: Deque<T, A>) -> Self {
        Self { deque }
    }
}

impl<T: fmt::Debug, A: Allocator> fmt::Debug for IntoIter<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.deque).finish()
    }
}

impl<T, A: Allocator> Iterator for IntoIter<T, A> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        self.deque.pop_front()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.deque.len();
        (n, Some(n))
    }

    fn count(self) -> usize {
        self.deque.len()
    }
}

impl<T, A: Allocator> DoubleEndedIterator for IntoIter<T, A> {
    #[inline]
    fn next_back(&mut self) -> Option<T> {
        self.deque.pop_back()
    }
}

impl<T, A: Allocator> ExactSizeIterator for IntoIter<T, A> {}
impl<T, A: Allocator> FusedIterator for IntoIter<T, A> {}

#[cfg(test)]
mod tests {
    use crate::config::DequeConfig;
    use crate::deque::Deque;

    fn sample() -> Deque<u32> {
        let mut d = Deque::with_config(DequeConfig::with_block_capacity(3));
        for i in 0..5 {
            d.push_back(i + 5);
            d.push_front(4 - i);
        }
        d
    }

    #[test]
    fn iterates_across_blocks_both_ways() {
        let d = sample();
        assert!(d.iter().copied().eq(0..10));
        assert!(d.iter().rev().copied().eq((0..10).rev()));
    }

    #[test]
    fn ends_meet_in_the_middle() {
        let d = sample();
        let mut it = d.iter();
        assert_eq!(it.next(), Some(&0));
        assert_eq!(it.next_back(), Some(&9));
        assert_eq!(it.len(), 8);
        assert_eq!(it.nth(6), Some(&7));
        assert_eq!(it.next_back(), Some(&8));
        assert_eq!(it.next(), None);
        assert_eq!(it.next_back(), None);
    }

    #[test]
    fn nth_past_end_exhausts() {
        let d = sample();
        let mut it = d.iter();
        assert_eq!(it.nth(10), None);
        assert_eq!(it.next(), None);
        let mut it = d.iter();
        assert_eq!(it.nth_back(2), Some(&7));
        assert_eq!(it.nth_back(20), None);
        assert_eq!(it.len(), 0);
    }

    #[test]
    fn iter_mut_writes_every_element() {
        let mut d = sample();
        for v in d.iter_mut() {
            *v *= 2;
        }
        for v in &mut d {
            *v += 1;
        }
        assert!(d.iter().copied().eq((0..10).map(|i| i * 2 + 1)));
        assert_eq!(d.iter_mut().rev().nth(1).map(|v| *v), Some(17));
    }

    #[test]
    fn into_iter_takes_from_both_ends() {
        let mut it = sample().into_iter();
        assert_eq!(it.next(), Some(0));
        assert_eq!(it.next_back(), Some(9));
        assert_eq!(it.len(), 8);
        let rest: Vec<u32> = it.collect();
        assert_eq!(rest, vec![1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn partially_consumed_into_iter_drops_rest() {
        use std::rc::Rc;

        let token = Rc::new(());
        let d: Deque<Rc<()>> = (0..12).map(|_| Rc::clone(&token)).collect();
        let mut it = d.into_iter();
        it.next();
        it.next_back();
        assert_eq!(Rc::strong_count(&token), 11);
        drop(it);
        assert_eq!(Rc::strong_count(&token), 1);
    }

    #[test]
    fn empty_deque_yields_nothing() {
        let d: Deque<u8> = Deque::new();
        assert_eq!(d.iter().next(), None);
        assert_eq!(d.iter().next_back(), None);
        assert_eq!(d.into_iter().next(), None);
    }
}
