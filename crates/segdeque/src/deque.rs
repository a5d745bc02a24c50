//! The segmented double-ended queue.
//!
//! [`Deque`] keeps its elements in a block store: fixed-size blocks
//! reached through a block table. The live range `[head, head + len)` of
//! absolute slots may start anywhere, so both ends have slack to grow into.
//! When one end runs out and the free slots at the other end are plentiful,
//! the live run slides back towards the middle of the same store. Otherwise
//! a larger store of at least twice the length is allocated and the
//! elements move across into it.
//! Allocation happens before anything is moved, so a failed allocation
//! leaves the container exactly as it was.

use std::cmp::Ordering;
use std::convert::Infallible;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::mem;
use std::ops::{Index, IndexMut};

use allocator_api2::alloc::{Allocator, Global};

use crate::config::DequeConfig;
use crate::cursor::{Cursor, CursorMut};
use crate::error::{ConfigError, ConstructError, DequeError};
use crate::iter::{IntoIter, Iter, IterMut};
use crate::position::SlotPosition;
use crate::raw;
use crate::stats::DequeStats;
use crate::store::BlockStore;

/// Which end growth is making room at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum GrowSide {
    Front,
    Back,
}

/// A double-ended queue stored in fixed-size blocks.
///
/// Amortized O(1) push and pop at both ends, O(1) indexed access, O(min(i,
/// len - i)) insertion and removal in the middle.
///
/// # Example
///
/// ```
/// use segdeque::Deque;
///
/// let mut d = Deque::from_elem(11, 3);
/// d.push_front(7);
/// assert_eq!(d.front(), Some(&7));
/// assert_eq!(d.len(), 4);
///
/// d.remove(0);
/// assert_eq!(d.front(), Some(&11));
/// assert_eq!(d.len(), 3);
/// ```
pub struct Deque<T, A: Allocator = Global> {
    store: BlockStore<T>,
    /// Absolute slot of the first live element (the front slack).
    head: usize,
    len: usize,
    config: DequeConfig,
    alloc: A,
}

impl<T> Deque<T> {
    /// Create an empty deque. Does not allocate.
    pub const fn new() -> Self {
        Self::new_in(Global)
    }

    /// Create an empty deque with the given block configuration.
    ///
    /// # Panics
    ///
    /// Panics if `config` is invalid for `T`.
    pub fn with_config(config: DequeConfig) -> Self {
        Self::with_config_in(config, Global)
    }

    /// Create an empty deque, rejecting an invalid configuration.
    pub fn try_with_config(config: DequeConfig) -> Result<Self, ConfigError> {
        Self::try_with_config_in(config, Global)
    }

    /// Create a deque holding `n` clones of `value`.
    pub fn from_elem(value: T, n: usize) -> Self
    where
        T: Clone,
    {
        Self::from_elem_in(value, n, Global)
    }

    /// Fallible form of [`from_elem`](Self::from_elem).
    pub fn try_from_elem(value: T, n: usize) -> Result<Self, DequeError>
    where
        T: Clone,
    {
        Self::try_from_elem_in(value, n, Global)
    }

    /// Create a deque of `n` elements, element `i` built by `f(i)`.
    ///
    /// If `f` fails, the elements built so far are dropped and nothing is
    /// left allocated.
    pub fn try_from_fn<E, F>(n: usize, f: F) -> Result<Self, ConstructError<E>>
    where
        F: FnMut(usize) -> Result<T, E>,
    {
        Self::try_from_fn_in(n, f, Global)
    }
}

impl<T, A: Allocator> Deque<T, A> {
    /// Create an empty deque using `alloc`. Does not allocate.
    ///
    /// Uses the default [`DequeConfig`].
    pub const fn new_in(alloc: A) -> Self {
        let config = DequeConfig::new();
        Self {
            store: BlockStore::empty(config.block_capacity),
            head: 0,
            len: 0,
            config,
            alloc,
        }
    }

    /// Create an empty deque with the given configuration and allocator.
    ///
    /// # Panics
    ///
    /// Panics if `config` is invalid for `T`.
    pub fn with_config_in(config: DequeConfig, alloc: A) -> Self {
        match Self::try_with_config_in(config, alloc) {
            Ok(deque) => deque,
            Err(err) => panic!("invalid deque config: {err}"),
        }
    }

    /// Create an empty deque, rejecting an invalid configuration.
    pub fn try_with_config_in(config: DequeConfig, alloc: A) -> Result<Self, ConfigError> {
        config.validate_for::<T>()?;
        Ok(Self {
            store: BlockStore::empty(config.block_capacity),
            head: 0,
            len: 0,
            config,
            alloc,
        })
    }

    /// Create a deque holding `n` clones of `value`, using `alloc`.
    pub fn from_elem_in(value: T, n: usize, alloc: A) -> Self
    where
        T: Clone,
    {
        match Self::try_from_elem_in(value, n, alloc) {
            Ok(deque) => deque,
            Err(err) => err.escalate(),
        }
    }

    /// Fallible form of [`from_elem_in`](Self::from_elem_in).
    pub fn try_from_elem_in(value: T, n: usize, alloc: A) -> Result<Self, DequeError>
    where
        T: Clone,
    {
        let mut deque = Self::new_in(alloc);
        deque.store = BlockStore::allocate(&deque.alloc, n, deque.config.block_capacity)?;
        // SAFETY: the fresh store holds at least `n` uninitialised slots.
        unsafe { raw::bulk_fill(&deque.store, 0, n, &value) };
        deque.len = n;
        Ok(deque)
    }

    /// Create a deque of `n` elements built by `f`, using `alloc`.
    pub fn try_from_fn_in<E, F>(n: usize, f: F, alloc: A) -> Result<Self, ConstructError<E>>
    where
        F: FnMut(usize) -> Result<T, E>,
    {
        let mut deque = Self::new_in(alloc);
        deque.store = BlockStore::allocate(&deque.alloc, n, deque.config.block_capacity)?;
        // SAFETY: the fresh store holds at least `n` uninitialised slots.
        unsafe { raw::bulk_construct(&deque.store, 0, n, f) }.map_err(|failure| {
            ConstructError::Element {
                index: failure.index,
                source: failure.source,
            }
        })?;
        deque.len = n;
        Ok(deque)
    }

    // ── Queries ─────────────────────────────────────────────────

    /// The allocator backing this deque.
    pub fn allocator(&self) -> &A {
        &self.alloc
    }

    /// The block configuration.
    pub fn config(&self) -> &DequeConfig {
        &self.config
    }

    /// Number of live elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the deque holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Total slots allocated, live or not.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.store.capacity()
    }

    /// Number of blocks in the block table.
    pub fn block_count(&self) -> usize {
        self.store.block_count()
    }

    /// Free slots before the first element.
    pub fn front_slack(&self) -> usize {
        self.head
    }

    /// Free slots after the last element.
    pub fn back_slack(&self) -> usize {
        self.store.capacity() - self.head - self.len
    }

    /// Point-in-time storage statistics.
    pub fn stats(&self) -> DequeStats {
        DequeStats {
            len: self.len,
            capacity: self.store.capacity(),
            block_capacity: self.store.block_capacity(),
            block_count: self.store.block_count(),
            front_slack: self.front_slack(),
            back_slack: self.back_slack(),
            memory_bytes: self.store.memory_bytes(),
        }
    }

    /// Where logical `index` currently lives, or `None` past the end.
    ///
    /// Positions are invalidated by any operation that reallocates.
    pub fn position_of(&self, index: usize) -> Option<SlotPosition> {
        (index < self.len)
            .then(|| SlotPosition::locate(self.head, index, self.store.block_capacity()))
    }

    // ── Element access ──────────────────────────────────────────

    /// Address of logical `index`.
    ///
    /// # Safety
    ///
    /// `head + index` must be inside the allocated store.
    #[inline]
    unsafe fn slot(&self, index: usize) -> *mut T {
        // SAFETY: forwarded from the caller.
        unsafe { self.store.slot(self.head + index) }
    }

    /// Reference to element `index`, or `None` if out of range.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        // SAFETY: `index < len`, so the slot is live.
        (index < self.len).then(|| unsafe { &*self.slot(index) })
    }

    /// Mutable reference to element `index`, or `None` if out of range.
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        // SAFETY: `index < len`, so the slot is live.
        (index < self.len).then(|| unsafe { &mut *self.slot(index) })
    }

    /// Reference to element `index` without a bounds check.
    ///
    /// # Safety
    ///
    /// `index < self.len()`.
    #[inline]
    pub unsafe fn get_unchecked(&self, index: usize) -> &T {
        debug_assert!(index < self.len);
        // SAFETY: forwarded from the caller.
        unsafe { &*self.slot(index) }
    }

    /// Mutable reference to element `index` without a bounds check.
    ///
    /// # Safety
    ///
    /// `index < self.len()`.
    #[inline]
    pub unsafe fn get_unchecked_mut(&mut self, index: usize) -> &mut T {
        debug_assert!(index < self.len);
        // SAFETY: forwarded from the caller.
        unsafe { &mut *self.slot(index) }
    }

    /// Checked access: [`DequeError::OutOfRange`] when `index >= len`.
    pub fn at(&self, index: usize) -> Result<&T, DequeError> {
        let len = self.len;
        self.get(index).ok_or(DequeError::OutOfRange { index, len })
    }

    /// Checked mutable access.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, DequeError> {
        let len = self.len;
        self.get_mut(index).ok_or(DequeError::OutOfRange { index, len })
    }

    /// The first element.
    pub fn front(&self) -> Option<&T> {
        self.get(0)
    }

    /// The first element, mutably.
    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.get_mut(0)
    }

    /// The last element.
    pub fn back(&self) -> Option<&T> {
        self.len.checked_sub(1).and_then(|i| self.get(i))
    }

    /// The last element, mutably.
    pub fn back_mut(&mut self) -> Option<&mut T> {
        match self.len.checked_sub(1) {
            Some(i) => self.get_mut(i),
            None => None,
        }
    }

    // ── End mutators ────────────────────────────────────────────

    /// Append an element.
    ///
    /// # Panics
    ///
    /// Panics (or aborts via [`std::alloc::handle_alloc_error`]) if storage
    /// cannot be grown.
    pub fn push_back(&mut self, value: T) {
        if let Err(err) = self.try_push_back(value) {
            err.escalate();
        }
    }

    /// Append an element, reporting allocation failure.
    ///
    /// On error the deque is unchanged and `value` is dropped.
    pub fn try_push_back(&mut self, value: T) -> Result<(), DequeError> {
        if self.back_slack() == 0 {
            self.grow(1, GrowSide::Back)?;
        }
        // SAFETY: back slack is at least one slot.
        unsafe { self.slot(self.len).write(value) };
        self.len += 1;
        Ok(())
    }

    /// Prepend an element.
    ///
    /// # Panics
    ///
    /// Panics (or aborts via [`std::alloc::handle_alloc_error`]) if storage
    /// cannot be grown.
    pub fn push_front(&mut self, value: T) {
        if let Err(err) = self.try_push_front(value) {
            err.escalate();
        }
    }

    /// Prepend an element, reporting allocation failure.
    ///
    /// On error the deque is unchanged and `value` is dropped.
    pub fn try_push_front(&mut self, value: T) -> Result<(), DequeError> {
        if self.head == 0 {
            self.grow(1, GrowSide::Front)?;
        }
        self.head -= 1;
        // SAFETY: `head` was free front slack.
        unsafe { self.store.slot(self.head).write(value) };
        self.len += 1;
        Ok(())
    }

    /// Remove and return the last element.
    pub fn pop_back(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        // SAFETY: the old last slot was live and is now outside the range.
        Some(unsafe { self.slot(self.len).read() })
    }

    /// Remove and return the first element.
    pub fn pop_front(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        // SAFETY: the first slot is live; it becomes front slack below.
        let value = unsafe { self.store.slot(self.head).read() };
        self.head += 1;
        self.len -= 1;
        Some(value)
    }

    // ── Middle mutators ─────────────────────────────────────────

    /// Insert `value` so that it ends up at `index`.
    ///
    /// Moves whichever side of `index` is shorter.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`, or if storage cannot be grown.
    pub fn insert(&mut self, index: usize, value: T) {
        if let Err(err) = self.try_insert(index, value) {
            err.escalate();
        }
    }

    /// Fallible form of [`insert`](Self::insert).
    ///
    /// Returns [`DequeError::OutOfRange`] if `index > len`.
    pub fn try_insert(&mut self, index: usize, value: T) -> Result<(), DequeError> {
        if index > self.len {
            return Err(DequeError::OutOfRange {
                index,
                len: self.len,
            });
        }
        if index == 0 {
            return self.try_push_front(value);
        }
        if index == self.len {
            return self.try_push_back(value);
        }

        let after = self.len - index;
        if index < after {
            if self.head == 0 {
                self.grow(1, GrowSide::Front)?;
            }
            // SAFETY: `head - 1` is free front slack.
            unsafe { raw::shift_down(&self.store, self.head, index) };
            self.head -= 1;
        } else {
            if self.back_slack() == 0 {
                self.grow(1, GrowSide::Back)?;
            }
            // SAFETY: the slot after the last element is free back slack.
            unsafe { raw::shift_up(&self.store, self.head + index, after) };
        }
        // SAFETY: the shift vacated logical `index`.
        unsafe { self.slot(index).write(value) };
        self.len += 1;
        Ok(())
    }

    /// Remove and return the element at `index`, or `None` if out of range.
    ///
    /// O(1) at either end; otherwise moves whichever side is shorter.
    pub fn remove(&mut self, index: usize) -> Option<T> {
        if index >= self.len {
            return None;
        }
        if index == 0 {
            return self.pop_front();
        }
        if index == self.len - 1 {
            return self.pop_back();
        }

        // SAFETY: `index < len`; the hole is closed below.
        let value = unsafe { self.slot(index).read() };
        let after = self.len - index - 1;
        if index < after {
            // SAFETY: the hole at `index` receives the element before it.
            unsafe { raw::shift_up(&self.store, self.head, index) };
            self.head += 1;
        } else {
            // SAFETY: the hole at `index` receives the element after it.
            unsafe { raw::shift_down(&self.store, self.head + index + 1, after) };
        }
        self.len -= 1;
        Some(value)
    }

    // ── Size and capacity ───────────────────────────────────────

    /// Resize to `new_len`, filling new slots with clones of `value`.
    ///
    /// # Panics
    ///
    /// Panics if storage cannot be grown.
    pub fn resize(&mut self, new_len: usize, value: T)
    where
        T: Clone,
    {
        if let Err(err) = self.try_resize(new_len, value) {
            err.escalate();
        }
    }

    /// Fallible form of [`resize`](Self::resize).
    pub fn try_resize(&mut self, new_len: usize, value: T) -> Result<(), DequeError>
    where
        T: Clone,
    {
        if new_len <= self.len {
            self.truncate(new_len);
            return Ok(());
        }
        let additional = new_len - self.len;
        if additional > self.back_slack() {
            self.grow(additional, GrowSide::Back)?;
        }
        // SAFETY: back slack covers `additional` slots.
        unsafe { raw::bulk_fill(&self.store, self.head + self.len, additional, &value) };
        self.len = new_len;
        Ok(())
    }

    /// Resize to `new_len`, filling new slots with values from `f`.
    ///
    /// # Panics
    ///
    /// Panics if storage cannot be grown.
    pub fn resize_with<F>(&mut self, new_len: usize, mut f: F)
    where
        F: FnMut() -> T,
    {
        if new_len <= self.len {
            self.truncate(new_len);
            return;
        }
        let additional = new_len - self.len;
        if additional > self.back_slack() {
            if let Err(err) = self.grow(additional, GrowSide::Back) {
                err.escalate();
            }
        }
        // SAFETY: back slack covers `additional` slots.
        let result = unsafe {
            raw::bulk_construct(&self.store, self.head + self.len, additional, |_| {
                Ok::<T, Infallible>(f())
            })
        };
        if let Err(failure) = result {
            match failure.source {}
        }
        self.len = new_len;
    }

    /// Drop elements from the back until `len` remain.
    pub fn truncate(&mut self, len: usize) {
        if len >= self.len {
            return;
        }
        let tail = self.len - len;
        self.len = len;
        // SAFETY: the tail was live and is now outside the range.
        unsafe { raw::bulk_destroy(&self.store, self.head + len, tail) };
    }

    /// Drop every element. Capacity is kept.
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Ensure at least `capacity` total slots.
    ///
    /// Unlike `VecDeque::reserve`, the argument is the total capacity, not
    /// an additional count. Front slack is preserved.
    ///
    /// # Panics
    ///
    /// Panics if storage cannot be grown.
    pub fn reserve(&mut self, capacity: usize) {
        if let Err(err) = self.try_reserve(capacity) {
            err.escalate();
        }
    }

    /// Fallible form of [`reserve`](Self::reserve).
    pub fn try_reserve(&mut self, capacity: usize) -> Result<(), DequeError> {
        if capacity <= self.store.capacity() {
            return Ok(());
        }
        self.relocate(capacity, self.head)
    }

    /// Rebuild storage to the fewest blocks that hold the elements.
    ///
    /// An empty deque releases its storage entirely.
    pub fn shrink_to_fit(&mut self) {
        if let Err(err) = self.try_shrink_to_fit() {
            err.escalate();
        }
    }

    /// Fallible form of [`shrink_to_fit`](Self::shrink_to_fit).
    pub fn try_shrink_to_fit(&mut self) -> Result<(), DequeError> {
        let needed = self.config.blocks_for(self.len) * self.store.block_capacity();
        if needed >= self.store.capacity() {
            return Ok(());
        }
        self.relocate(self.len, 0)
    }

    /// Exchange contents, storage, configuration and allocator with `other`.
    ///
    /// O(1); never allocates.
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(self, other);
    }

    // ── Growth ──────────────────────────────────────────────────

    /// Make room for `additional` more elements at `side`.
    ///
    /// If the free slots at both ends together cover the current length plus
    /// `additional`, the live run is recentred inside the current store.
    /// Otherwise storage is reallocated to a strictly larger store of at
    /// least twice the current length. Either way the growing side receives
    /// at least half of the slack; the other side keeps what it had, up to
    /// the remaining half.
    fn grow(&mut self, additional: usize, side: GrowSide) -> Result<(), DequeError> {
        let required = self
            .len
            .checked_add(additional)
            .ok_or(DequeError::CapacityOverflow)?;
        let current = self.store.capacity();
        if current - self.len >= required {
            let head = self.growth_head(current, additional, side);
            self.recenter(head);
            return Ok(());
        }
        let block_capacity = self.store.block_capacity();
        let target = required
            .max(self.len.saturating_mul(2))
            .max(block_capacity)
            .max(current.saturating_add(1));
        let capacity = self
            .config
            .blocks_for(target)
            .checked_mul(block_capacity)
            .ok_or(DequeError::CapacityOverflow)?;
        let head = self.growth_head(capacity, additional, side);
        self.relocate(capacity, head)
    }

    /// Front slack to leave when `capacity` slots hold the elements and
    /// `additional` more are due at `side`.
    fn growth_head(&self, capacity: usize, additional: usize, side: GrowSide) -> usize {
        let slack = capacity - self.len;
        match side {
            GrowSide::Back => self.head.min(slack / 2).min(slack - additional),
            GrowSide::Front => slack - self.back_slack().min(slack / 2).min(slack - additional),
        }
    }

    /// Slide the live run within the current store so it starts at `head`.
    fn recenter(&mut self, head: usize) {
        debug_assert!(head + self.len <= self.store.capacity());
        tracing::trace!(
            capacity = self.store.capacity(),
            len = self.len,
            old_head = self.head,
            head,
            "recentring live run"
        );
        // SAFETY: the live run is initialised and every other slot is free.
        unsafe { raw::move_run(&self.store, self.head, head, self.len) };
        self.head = head;
    }

    /// Move every element into a fresh store of `capacity` slots, starting
    /// at slot `head`, and swap it in.
    fn relocate(&mut self, capacity: usize, head: usize) -> Result<(), DequeError> {
        let mut fresh = BlockStore::allocate(&self.alloc, capacity, self.store.block_capacity())?;
        debug_assert!(head + self.len <= fresh.capacity());
        tracing::trace!(
            old_capacity = self.store.capacity(),
            new_capacity = fresh.capacity(),
            len = self.len,
            head,
            "relocating block store"
        );
        // SAFETY: the live range moves into uninitialised slots of a
        // distinct store that is large enough.
        unsafe { raw::relocate(&self.store, self.head, &fresh, head, self.len) };
        mem::swap(&mut self.store, &mut fresh);
        self.head = head;
        // SAFETY: the old store's elements were moved out; same allocator.
        unsafe { fresh.release(&self.alloc) };
        Ok(())
    }

    // ── Iteration ───────────────────────────────────────────────

    /// Front-to-back iterator.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(&self.store, self.head, self.head + self.len)
    }

    /// Front-to-back iterator yielding mutable references.
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut::new(&self.store, self.head, self.head + self.len)
    }

    /// Cursor at the first element.
    pub fn begin(&self) -> Cursor<'_, T, A> {
        Cursor::new(self, 0)
    }

    /// Cursor one past the last element.
    pub fn end(&self) -> Cursor<'_, T, A> {
        Cursor::new(self, self.len)
    }

    /// Cursor at logical `index`. Not bounds checked.
    pub fn cursor(&self, index: usize) -> Cursor<'_, T, A> {
        Cursor::new(self, index)
    }

    /// Mutable cursor at logical `index`. Not bounds checked.
    pub fn cursor_mut(&mut self, index: usize) -> CursorMut<'_, T, A> {
        CursorMut::new(self, index)
    }

    // ── Copying ─────────────────────────────────────────────────

    /// Build a copy of the live elements into a new deque sized to `len`.
    fn build_copy<B, E, F>(
        &self,
        config: DequeConfig,
        alloc: B,
        copy: F,
    ) -> Result<Deque<T, B>, ConstructError<E>>
    where
        B: Allocator,
        F: FnMut(&T) -> Result<T, E>,
    {
        let mut out = Deque {
            store: BlockStore::empty(config.block_capacity),
            head: 0,
            len: 0,
            config,
            alloc,
        };
        out.store = BlockStore::allocate(&out.alloc, self.len, config.block_capacity)?;
        // SAFETY: our live range is initialised; `out` has `len` free slots
        // in its own store.
        unsafe { raw::bulk_copy(&self.store, self.head, &out.store, 0, self.len, copy) }
            .map_err(|failure| ConstructError::Element {
                index: failure.index,
                source: failure.source,
            })?;
        out.len = self.len;
        Ok(out)
    }

    /// Copy with a fallible per-element constructor.
    ///
    /// The copy's capacity is sized to `len`, not to this deque's capacity.
    pub fn try_clone_with<E, F>(&self, copy: F) -> Result<Self, ConstructError<E>>
    where
        A: Clone,
        F: FnMut(&T) -> Result<T, E>,
    {
        self.build_copy(self.config, self.alloc.clone(), copy)
    }

    /// Replace the contents with a copy of `source`, atomically.
    ///
    /// The replacement is built in full before it is swapped in; on error
    /// `self` is untouched. Keeps this deque's configuration.
    pub fn try_clone_from_with<E, F>(&mut self, source: &Self, copy: F) -> Result<(), ConstructError<E>>
    where
        A: Clone,
        F: FnMut(&T) -> Result<T, E>,
    {
        let mut fresh = source.build_copy(self.config, self.alloc.clone(), copy)?;
        self.swap(&mut fresh);
        Ok(())
    }
}

impl<T> Default for Deque<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, A: Allocator> Drop for Deque<T, A> {
    fn drop(&mut self) {
        let len = mem::replace(&mut self.len, 0);
        // SAFETY: `[head, head + len)` is the live range; afterwards nothing
        // is live and the store goes back to the allocator it came from.
        unsafe {
            raw::bulk_destroy(&self.store, self.head, len);
            self.store.release(&self.alloc);
        }
    }
}

impl<T: Clone, A: Allocator + Clone> Clone for Deque<T, A> {
    fn clone(&self) -> Self {
        match self.try_clone_with(|value| Ok::<T, Infallible>(value.clone())) {
            Ok(deque) => deque,
            Err(ConstructError::Storage(err)) => err.escalate(),
            Err(ConstructError::Element { source, .. }) => match source {},
        }
    }

    /// Assign from `source`, reusing storage where it fits.
    ///
    /// Equal or shorter source: element-wise `clone_from`, then truncate.
    /// Longer source that fits in the back slack: element-wise copy of the
    /// shared prefix, then the remainder is cloned into place. Otherwise a
    /// full copy is built and swapped in.
    fn clone_from(&mut self, source: &Self) {
        if source.len > self.len && source.len - self.len > self.back_slack() {
            let fresh = source.build_copy(self.config, self.alloc.clone(), |value| {
                Ok::<T, Infallible>(value.clone())
            });
            match fresh {
                Ok(mut fresh) => self.swap(&mut fresh),
                Err(ConstructError::Storage(err)) => err.escalate(),
                Err(ConstructError::Element { source, .. }) => match source {},
            }
            return;
        }

        for (dst, src) in self.iter_mut().zip(source.iter()) {
            dst.clone_from(src);
        }
        if source.len <= self.len {
            self.truncate(source.len);
            return;
        }

        let extra = source.len - self.len;
        // SAFETY: source's tail is live; our back slack covers `extra`.
        let result = unsafe {
            raw::bulk_copy(
                &source.store,
                source.head + self.len,
                &self.store,
                self.head + self.len,
                extra,
                |value| Ok::<T, Infallible>(value.clone()),
            )
        };
        if let Err(failure) = result {
            match failure.source {}
        }
        self.len = source.len;
    }
}

impl<T: fmt::Debug, A: Allocator> fmt::Debug for Deque<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T, U, A1, A2> PartialEq<Deque<U, A2>> for Deque<T, A1>
where
    T: PartialEq<U>,
    A1: Allocator,
    A2: Allocator,
{
    fn eq(&self, other: &Deque<U, A2>) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq, A: Allocator> Eq for Deque<T, A> {}

impl<T, U, A: Allocator> PartialEq<[U]> for Deque<T, A>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &[U]) -> bool {
        self.len == other.len() && self.iter().eq(other.iter())
    }
}

impl<T, U, A: Allocator> PartialEq<&[U]> for Deque<T, A>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &&[U]) -> bool {
        *self == **other
    }
}

impl<T, U, A: Allocator> PartialEq<Vec<U>> for Deque<T, A>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &Vec<U>) -> bool {
        *self == **other
    }
}

impl<T, U, A: Allocator, const N: usize> PartialEq<[U; N]> for Deque<T, A>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &[U; N]) -> bool {
        *self == other[..]
    }
}

impl<T: PartialOrd, A: Allocator> PartialOrd for Deque<T, A> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<T: Ord, A: Allocator> Ord for Deque<T, A> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<T: Hash, A: Allocator> Hash for Deque<T, A> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len.hash(state);
        for value in self.iter() {
            value.hash(state);
        }
    }
}

impl<T, A: Allocator> Index<usize> for Deque<T, A> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        match self.get(index) {
            Some(value) => value,
            None => panic!(
                "index out of bounds: the len is {} but the index is {index}",
                self.len
            ),
        }
    }
}

impl<T, A: Allocator> IndexMut<usize> for Deque<T, A> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        let len = self.len;
        match self.get_mut(index) {
            Some(value) => value,
            None => panic!("index out of bounds: the len is {len} but the index is {index}"),
        }
    }
}

impl<T, A: Allocator> Extend<T> for Deque<T, A> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        let (lower, _) = iter.size_hint();
        if lower > self.back_slack() {
            if let Err(err) = self.grow(lower, GrowSide::Back) {
                err.escalate();
            }
        }
        for value in iter {
            self.push_back(value);
        }
    }
}

impl<'a, T: Copy + 'a, A: Allocator> Extend<&'a T> for Deque<T, A> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        Extend::<T>::extend(self, iter.into_iter().copied());
    }
}

impl<T> FromIterator<T> for Deque<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut deque = Deque::new();
        deque.extend(iter);
        deque
    }
}

impl<T> From<Vec<T>> for Deque<T> {
    fn from(vec: Vec<T>) -> Self {
        vec.into_iter().collect()
    }
}

impl<T, const N: usize> From<[T; N]> for Deque<T> {
    fn from(array: [T; N]) -> Self {
        array.into_iter().collect()
    }
}

impl<T, A: Allocator> IntoIterator for Deque<T, A> {
    type Item = T;
    type IntoIter = IntoIter<T, A>;

    fn into_iter(self) -> IntoIter<T, A> {
        IntoIter::new(self)
    }
}

impl<'a, T, A: Allocator> IntoIterator for &'a Deque<T, A> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T, A: Allocator> IntoIterator for &'a mut Deque<T, A> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> IterMut<'a, T> {
        self.iter_mut()
    }
}
