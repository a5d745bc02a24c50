//! Instrumented allocators.
//!
//! Both delegate to [`Global`] and share their counters through an `Arc`, so
//! a clone handed to a deque reports into the same numbers the test reads.

#![allow(unsafe_code)]

use std::alloc::Layout;
use std::ptr::NonNull;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use allocator_api2::alloc::{AllocError, Allocator, Global};

#[derive(Debug, Default)]
struct Counters {
    allocations: AtomicUsize,
    deallocations: AtomicUsize,
    live_bytes: AtomicUsize,
    peak_bytes: AtomicUsize,
}

/// Counts allocation calls and outstanding bytes.
#[derive(Clone, Debug, Default)]
pub struct CountingAllocator {
    counters: Arc<Counters>,
}

impl CountingAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Successful `allocate` calls so far.
    pub fn allocations(&self) -> usize {
        self.counters.allocations.load(Ordering::SeqCst)
    }

    /// `deallocate` calls so far.
    pub fn deallocations(&self) -> usize {
        self.counters.deallocations.load(Ordering::SeqCst)
    }

    /// Allocations not yet returned.
    pub fn outstanding(&self) -> usize {
        self.allocations() - self.deallocations()
    }

    /// Bytes currently held.
    pub fn live_bytes(&self) -> usize {
        self.counters.live_bytes.load(Ordering::SeqCst)
    }

    /// Highest `live_bytes` ever observed.
    pub fn peak_bytes(&self) -> usize {
        self.counters.peak_bytes.load(Ordering::SeqCst)
    }
}

unsafe impl Allocator for CountingAllocator {
    fn allocate(&self, layout: Layout) -> Result<NonNull<[u8]>, AllocError> {
        let ptr = Global.allocate(layout)?;
        self.counters.allocations.fetch_add(1, Ordering::SeqCst);
        let live = self
            .counters
            .live_bytes
            .fetch_add(layout.size(), Ordering::SeqCst)
            + layout.size();
        self.counters.peak_bytes.fetch_max(live, Ordering::SeqCst);
        Ok(ptr)
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        self.counters.deallocations.fetch_add(1, Ordering::SeqCst);
        self.counters
            .live_bytes
            .fetch_sub(layout.size(), Ordering::SeqCst);
        // SAFETY: `ptr` came from `Global` with this layout.
        unsafe { Global.deallocate(ptr, layout) }
    }
}

/// Succeeds for a fixed number of allocations, then refuses.
///
/// The budget can be topped up mid-test with [`set_budget`](Self::set_budget).
#[derive(Clone, Debug)]
pub struct FailingAllocator {
    budget: Arc<AtomicUsize>,
    refusals: Arc<AtomicUsize>,
    inner: CountingAllocator,
}

impl FailingAllocator {
    /// Allow `budget` successful allocations.
    pub fn new(budget: usize) -> Self {
        Self {
            budget: Arc::new(AtomicUsize::new(budget)),
            refusals: Arc::new(AtomicUsize::new(0)),
            inner: CountingAllocator::new(),
        }
    }

    /// Never fails until a budget is set.
    pub fn unlimited() -> Self {
        Self::new(usize::MAX)
    }

    pub fn set_budget(&self, budget: usize) {
        self.budget.store(budget, Ordering::SeqCst);
    }

    /// Allocations refused so far.
    pub fn refusals(&self) -> usize {
        self.refusals.load(Ordering::SeqCst)
    }

    /// Counters for the allocations that went through.
    pub fn counts(&self) -> &CountingAllocator {
        &self.inner
    }
}

unsafe impl Allocator for FailingAllocator {
    fn allocate(&self, layout: Layout) -> Result<NonNull<[u8]>, AllocError> {
        let granted = self
            .budget
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| left.checked_sub(1))
            .is_ok();
        if !granted {
            self.refusals.fetch_add(1, Ordering::SeqCst);
            return Err(AllocError);
        }
        self.inner.allocate(layout)
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        // SAFETY: every successful allocation went through `inner`.
        unsafe { self.inner.deallocate(ptr, layout) }
    }
}
