//! Random-access positions into a [`Deque`].
//!
//! A [`Cursor`] is a logical index paired with the deque it refers to.
//! Arithmetic is plain index arithmetic, so moving a cursor never touches
//! memory; only [`Cursor::get`] does, and it is bounds checked. Moving past
//! either end is allowed and yields a cursor whose `get` returns `None`.
//!
//! [`CursorMut`] holds the deque exclusively and can insert or remove at its
//! position. It moves by offset the same way.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use std::ptr;

use allocator_api2::alloc::{Allocator, Global};

use crate::deque::Deque;
use crate::error::DequeError;

/// A read-only position in a deque. Created by [`Deque::begin`],
/// [`Deque::end`] and [`Deque::cursor`].
pub struct Cursor<'a, T, A: Allocator = Global> {
    deque: &'a Deque<T, A>,
    index: usize,
}

impl<'a, T, A: Allocator> Cursor<'a, T, A> {
    pub(crate) fn new(deque: &'a Deque<T, A>, index: usize) -> Self {
        Self { deque, index }
    }

    /// Logical index this cursor refers to.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The deque this cursor walks.
    pub fn deque(&self) -> &'a Deque<T, A> {
        self.deque
    }

    /// The element under the cursor, or `None` outside `[0, len)`.
    pub fn get(&self) -> Option<&'a T> {
        self.deque.get(self.index)
    }

    /// Step one element towards the back.
    pub fn move_next(&mut self) {
        self.index = self.index.wrapping_add(1);
    }

    /// Step one element towards the front.
    pub fn move_prev(&mut self) {
        self.index = self.index.wrapping_sub(1);
    }
}

impl<T, A: Allocator> Clone for Cursor<'_, T, A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, A: Allocator> Copy for Cursor<'_, T, A> {}

impl<T, A: Allocator> PartialEq for Cursor<'_, T, A> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.deque, other.deque) && self.index == other.index
    }
}

impl<T, A: Allocator> Eq for Cursor<'_, T, A> {}

/// Cursors into different deques are unordered.
impl<T, A: Allocator> PartialOrd for Cursor<'_, T, A> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        ptr::eq(self.deque, other.deque).then(|| self.index.cmp(&other.index))
    }
}

impl<T, A: Allocator> fmt::Debug for Cursor<'_, T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("index", &self.index)
            .field("len", &self.deque.len())
            .finish()
    }
}

impl<T, A: Allocator> Add<isize> for Cursor<'_, T, A> {
    type Output = Self;

    fn add(mut self, delta: isize) -> Self {
        self += delta;
        self
    }
}

impl<T, A: Allocator> Sub<isize> for Cursor<'_, T, A> {
    type Output = Self;

    fn sub(mut self, delta: isize) -> Self {
        self -= delta;
        self
    }
}

impl<T, A: Allocator> AddAssign<isize> for Cursor<'_, T, A> {
    fn add_assign(&mut self, delta: isize) {
        self.index = self.index.wrapping_add_signed(delta);
    }
}

impl<T, A: Allocator> SubAssign<isize> for Cursor<'_, T, A> {
    fn sub_assign(&mut self, delta: isize) {
        self.index = self.index.wrapping_add_signed(delta.wrapping_neg());
    }
}

/// Signed distance between two cursors into the same deque.
impl<'a, T, A: Allocator> Sub for Cursor<'a, T, A> {
    type Output = isize;

    fn sub(self, other: Self) -> isize {
        debug_assert!(ptr::eq(self.deque, other.deque));
        self.index.wrapping_sub(other.index) as isize
    }
}

/// A position that can edit the deque. Created by [`Deque::cursor_mut`].
pub struct CursorMut<'a, T, A: Allocator = Global> {
    deque: &'a mut Deque<T, A>,
    index: usize,
}

impl<'a, T, A: Allocator> CursorMut<'a, T, A> {
    pub(crate) fn new(deque: &'a mut Deque<T, A>, index: usize) -> Self {
        Self { deque, index }
    }

    /// Logical index this cursor refers to.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The element under the cursor.
    pub fn get(&self) -> Option<&T> {
        self.deque.get(self.index)
    }

    /// The element under the cursor, mutably.
    pub fn get_mut(&mut self) -> Option<&mut T> {
        self.deque.get_mut(self.index)
    }

    /// Step one element towards the back.
    pub fn move_next(&mut self) {
        self.index = self.index.wrapping_add(1);
    }

    /// Step one element towards the front.
    pub fn move_prev(&mut self) {
        self.index = self.index.wrapping_sub(1);
    }

    /// A read-only cursor at the same position.
    pub fn as_cursor(&self) -> Cursor<'_, T, A> {
        Cursor::new(self.deque, self.index)
    }

    /// Insert `value` before the current element.
    ///
    /// The cursor then refers to the inserted element.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is past the end, or if storage cannot be grown.
    pub fn insert_before(&mut self, value: T) {
        self.deque.insert(self.index, value);
    }

    /// Fallible form of [`insert_before`](Self::insert_before).
    pub fn try_insert_before(&mut self, value: T) -> Result<(), DequeError> {
        self.deque.try_insert(self.index, value)
    }

    /// Remove and return the current element.
    ///
    /// The cursor then refers to the element that followed it.
    pub fn remove_current(&mut self) -> Option<T> {
        self.deque.remove(self.index)
    }
}

impl<T, A: Allocator> Add<isize> for CursorMut<'_, T, A> {
    type Output = Self;

    fn add(mut self, delta: isize) -> Self {
        self += delta;
        self
    }
}

impl<T, A: Allocator> Sub<isize> for CursorMut<'_, T, A> {
    type Output = Self;

    fn sub(mut self, delta: isize) -> Self {
        self -= delta;
        self
    }
}

impl<T, A: Allocator> AddAssign<isize> for CursorMut<'_, T, A> {
    fn add_assign(&mut self, delta: isize) {
        self.index = self.index.wrapping_add_signed(delta);
    }
}

impl<T, A: Allocator> SubAssign<isize> for CursorMut<'_, T, A> {
    fn sub_assign(&mut self, delta: isize) {
        self.index = self.index.wrapping_add_signed(delta.wrapping_neg());
    }
}

impl<T, A: Allocator> fmt::Debug for CursorMut<'_, T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CursorMut")
            .field("index", &self.index)
            .field("len", &self.deque.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::deque::Deque;

    #[test]
    fn begin_and_end_bracket_the_elements() {
        let d: Deque<i32> = (10..15).collect();
        let begin = d.begin();
        let end = d.end();
        assert_eq!(end - begin, 5);
        assert_eq!(begin.get(), Some(&10));
        assert_eq!(end.get(), None);
        assert_eq!((end - 1).get(), Some(&14));
        assert!(begin < end);
    }

    #[test]
    fn empty_deque_begin_equals_end() {
        let d: Deque<i32> = Deque::new();
        assert_eq!(d.begin(), d.end());
    }

    #[test]
    fn stepping_walks_in_order() {
        let d: Deque<i32> = (0..25).collect();
        let mut c = d.begin();
        let mut seen = Vec::new();
        while c != d.end() {
            seen.push(*c.get().unwrap());
            c.move_next();
        }
        assert!(seen.into_iter().eq(0..25));
        c.move_prev();
        assert_eq!(c.get(), Some(&24));
    }

    #[test]
    fn cursors_of_different_deques_differ() {
        let a: Deque<i32> = (0..3).collect();
        let b: Deque<i32> = (0..3).collect();
        assert_ne!(a.begin(), b.begin());
        assert_eq!(a.begin().partial_cmp(&b.begin()), None);
    }

    #[test]
    fn moving_before_begin_reads_nothing() {
        let d: Deque<i32> = (0..3).collect();
        let before = d.begin() - 1;
        assert_eq!(before.get(), None);
        assert_eq!((before + 1).get(), Some(&0));
    }

    #[test]
    fn cursor_mut_edits_in_place() {
        let mut d: Deque<i32> = (0..6).collect();
        let mut c = d.cursor_mut(2);
        *c.get_mut().unwrap() = 20;
        c.insert_before(15);
        assert_eq!(c.get(), Some(&15));
        c.move_next();
        assert_eq!(c.remove_current(), Some(20));
        assert_eq!(c.get(), Some(&3));
        assert_eq!(c.as_cursor().index(), 3);
        assert_eq!(d, [0, 1, 15, 3, 4, 5]);
    }

    #[test]
    fn cursor_mut_jumps_by_offset() {
        let mut d: Deque<i32> = (0..40).collect();
        let mut c = d.cursor_mut(5);
        c += 20;
        assert_eq!(c.index(), 25);
        *c.get_mut().unwrap() = -25;
        c -= 30;
        assert_eq!(c.get(), None);
        let mut c = c + 12;
        assert_eq!(c.get(), Some(&7));
        c = c - 7;
        assert_eq!(c.remove_current(), Some(0));
        assert_eq!(d[24], -25);
        assert_eq!(d.len(), 39);
    }

    #[test]
    fn cursor_mut_past_end_cannot_insert() {
        let mut d: Deque<i32> = (0..2).collect();
        let mut c = d.cursor_mut(5);
        assert!(c.try_insert_before(1).is_err());
        assert_eq!(c.remove_current(), None);
    }

    #[cfg(not(miri))]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn offsets_compose(len in 0usize..100, a in -50isize..50, b in -50isize..50) {
                let d: Deque<usize> = (0..len).collect();
                let c = d.begin() + a;
                prop_assert_eq!((c + b) - c, b);
                prop_assert_eq!(c + b - b, c);
                prop_assert_eq!(d.end() - d.begin(), len as isize);
                if let Some(v) = c.get() {
                    prop_assert_eq!(*v as isize, a);
                }
            }
        }
    }
}
