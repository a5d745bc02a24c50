//! Bulk construct, destroy and move primitives over raw slot ranges.
//!
//! Ranges are given as `(start, count)` in absolute slots of a
//! [`BlockStore`]. Construction is all-or-nothing: a failing (or panicking)
//! element constructor destroys exactly the prefix this call built, in
//! reverse order, before the failure reaches the caller.
//!
//! Every function here is `unsafe`: the caller vouches for which slots are
//! initialised. The container in [`crate::deque`] is the only caller.

use std::convert::Infallible;
use std::mem;
use std::ptr;

use crate::store::BlockStore;

/// Element construction failed partway through a bulk operation.
#[derive(Debug)]
pub(crate) struct BulkFailure<E> {
    /// Offset within the attempted range of the element that failed.
    pub(crate) index: usize,
    pub(crate) source: E,
}

/// Tracks the constructed prefix of a bulk construction.
///
/// Dropping the guard destroys that prefix. The error path drops it
/// explicitly; a panicking constructor drops it during unwinding.
struct InitGuard<'a, T> {
    store: &'a BlockStore<T>,
    start: usize,
    initialized: usize,
}

impl<T> Drop for InitGuard<'_, T> {
    fn drop(&mut self) {
        // SAFETY: exactly `initialized` slots from `start` were written.
        unsafe { bulk_destroy(self.store, self.start, self.initialized) }
    }
}

/// Construct `count` slots from `start`, slot `i` from `make(i)`, in order.
///
/// # Safety
///
/// `[start, start + count)` must lie inside the store and be uninitialised.
pub(crate) unsafe fn bulk_construct<T, E, F>(
    store: &BlockStore<T>,
    start: usize,
    count: usize,
    mut make: F,
) -> Result<(), BulkFailure<E>>
where
    F: FnMut(usize) -> Result<T, E>,
{
    let mut guard = InitGuard {
        store,
        start,
        initialized: 0,
    };
    for i in 0..count {
        match make(i) {
            Ok(value) => {
                // SAFETY: in range and uninitialised per the caller.
                unsafe { store.slot(start + i).write(value) };
                guard.initialized += 1;
            }
            Err(source) => {
                drop(guard);
                return Err(BulkFailure { index: i, source });
            }
        }
    }
    mem::forget(guard);
    Ok(())
}

/// Fill `count` slots from `start` with clones of `value`.
///
/// A panicking `clone` rolls back the slots filled so far.
///
/// # Safety
///
/// Same as [`bulk_construct`].
pub(crate) unsafe fn bulk_fill<T: Clone>(
    store: &BlockStore<T>,
    start: usize,
    count: usize,
    value: &T,
) {
    // SAFETY: forwarded from the caller.
    let result =
        unsafe { bulk_construct(store, start, count, |_| Ok::<T, Infallible>(value.clone())) };
    if let Err(failure) = result {
        match failure.source {}
    }
}

/// Construct `count` slots of `dst` from the live slots of `src`.
///
/// # Safety
///
/// `[src_start, src_start + count)` must be initialised in `src`;
/// `[dst_start, dst_start + count)` must be in range and uninitialised in
/// `dst`; the two stores must be distinct.
pub(crate) unsafe fn bulk_copy<T, E, F>(
    src: &BlockStore<T>,
    src_start: usize,
    dst: &BlockStore<T>,
    dst_start: usize,
    count: usize,
    mut copy: F,
) -> Result<(), BulkFailure<E>>
where
    F: FnMut(&T) -> Result<T, E>,
{
    // SAFETY: source slots are live for the whole call; destination
    // requirements are forwarded.
    unsafe {
        bulk_construct(dst, dst_start, count, |i| {
            copy(&*src.slot(src_start + i))
        })
    }
}

/// Drop `count` slots from `start`, last first.
///
/// # Safety
///
/// The range must be initialised; it is uninitialised afterwards.
pub(crate) unsafe fn bulk_destroy<T>(store: &BlockStore<T>, start: usize, count: usize) {
    if !mem::needs_drop::<T>() {
        return;
    }
    for i in (0..count).rev() {
        // SAFETY: initialised per the caller.
        unsafe { ptr::drop_in_place(store.slot(start + i)) };
    }
}

/// Move `count` live slots from one store into another.
///
/// Moves are bitwise and cannot fail; the source range is logically
/// uninitialised afterwards.
///
/// # Safety
///
/// Source range initialised, destination range in range and uninitialised,
/// stores distinct.
pub(crate) unsafe fn relocate<T>(
    src: &BlockStore<T>,
    src_start: usize,
    dst: &BlockStore<T>,
    dst_start: usize,
    count: usize,
) {
    for i in 0..count {
        // SAFETY: distinct allocations, so the single slots never overlap.
        unsafe { ptr::copy_nonoverlapping(src.slot(src_start + i), dst.slot(dst_start + i), 1) };
    }
}

/// Move the live run `[start, start + count)` one slot towards the front.
///
/// Slot `start - 1` must be free; slot `start + count - 1` is free after.
///
/// # Safety
///
/// `start >= 1`, the run is initialised, `start - 1` is uninitialised.
pub(crate) unsafe fn shift_down<T>(store: &BlockStore<T>, start: usize, count: usize) {
    for absolute in start..start + count {
        // SAFETY: ascending order always moves into the slot just vacated.
        unsafe { ptr::copy_nonoverlapping(store.slot(absolute), store.slot(absolute - 1), 1) };
    }
}

/// Move the live run `[start, start + count)` one slot towards the back.
///
/// Slot `start + count` must be free; slot `start` is free after.
///
/// # Safety
///
/// `start + count < capacity`, the run is initialised, `start + count` is
/// uninitialised.
pub(crate) unsafe fn shift_up<T>(store: &BlockStore<T>, start: usize, count: usize) {
    for absolute in (start..start + count).rev() {
        // SAFETY: descending order always moves into the slot just vacated.
        unsafe { ptr::copy_nonoverlapping(store.slot(absolute), store.slot(absolute + 1), 1) };
    }
}

/// Move the live run `[from, from + count)` to start at `to` in the same
/// store. The ranges may overlap.
///
/// # Safety
///
/// Source run initialised, `to + count <= capacity`, and every slot of the
/// destination outside the source run uninitialised.
pub(crate) unsafe fn move_run<T>(store: &BlockStore<T>, from: usize, to: usize, count: usize) {
    if to < from {
        for i in 0..count {
            // SAFETY: ascending order never overwrites a slot not yet moved.
            unsafe { ptr::copy_nonoverlapping(store.slot(from + i), store.slot(to + i), 1) };
        }
    } else if to > from {
        for i in (0..count).rev() {
            // SAFETY: descending order never overwrites a slot not yet moved.
            unsafe { ptr::copy_nonoverlapping(store.slot(from + i), store.slot(to + i), 1) };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use allocator_api2::alloc::Global;
    use std::cell::Cell;
    use std::panic::{catch_unwind, AssertUnwindSafe};
    use std::rc::Rc;

    /// Counts live instances through a shared cell.
    struct Live(Rc<Cell<usize>>);

    impl Live {
        fn new(count: &Rc<Cell<usize>>) -> Self {
            count.set(count.get() + 1);
            Self(Rc::clone(count))
        }
    }

    impl Drop for Live {
        fn drop(&mut self) {
            self.0.set(self.0.get() - 1);
        }
    }

    fn with_store<T>(capacity: usize, f: impl FnOnce(&BlockStore<T>)) {
        let mut store = BlockStore::allocate(&Global, capacity, 4).unwrap();
        f(&store);
        // SAFETY: every test leaves its slots destroyed or moved out.
        unsafe { store.release(&Global) };
    }

    #[test]
    fn construct_writes_in_order() {
        with_store::<usize>(12, |store| unsafe {
            bulk_construct(store, 2, 9, |i| Ok::<_, ()>(i * 10)).unwrap();
            for i in 0..9 {
                assert_eq!(*store.slot(2 + i), i * 10);
            }
        });
    }

    #[test]
    fn construct_failure_rolls_back_prefix() {
        let live = Rc::new(Cell::new(0));
        with_store::<Live>(8, |store| unsafe {
            let failure = bulk_construct(store, 0, 8, |i| {
                if i == 5 {
                    Err("boom")
                } else {
                    Ok(Live::new(&live))
                }
            })
            .unwrap_err();
            assert_eq!(failure.index, 5);
            assert_eq!(failure.source, "boom");
        });
        assert_eq!(live.get(), 0);
    }

    #[test]
    fn construct_panic_rolls_back_prefix() {
        let live = Rc::new(Cell::new(0));
        with_store::<Live>(8, |store| {
            let result = catch_unwind(AssertUnwindSafe(|| unsafe {
                let _ = bulk_construct(store, 1, 6, |i| {
                    if i == 3 {
                        panic!("constructor panicked");
                    }
                    Ok::<_, ()>(Live::new(&live))
                });
            }));
            assert!(result.is_err());
        });
        assert_eq!(live.get(), 0);
    }

    #[test]
    fn destroy_runs_in_reverse() {
        let order = Rc::new(std::cell::RefCell::new(Vec::new()));
        struct Noisy(usize, Rc<std::cell::RefCell<Vec<usize>>>);
        impl Drop for Noisy {
            fn drop(&mut self) {
                self.1.borrow_mut().push(self.0);
            }
        }
        with_store::<Noisy>(4, |store| unsafe {
            bulk_construct(store, 0, 4, |i| Ok::<_, ()>(Noisy(i, Rc::clone(&order)))).unwrap();
            bulk_destroy(store, 0, 4);
        });
        assert_eq!(*order.borrow(), vec![3, 2, 1, 0]);
    }

    #[test]
    fn fill_clones_value() {
        with_store::<String>(10, |store| unsafe {
            bulk_fill(store, 3, 5, &"x".to_string());
            for i in 3..8 {
                assert_eq!(*store.slot(i), "x");
            }
            bulk_destroy(store, 3, 5);
        });
    }

    #[test]
    fn copy_between_stores() {
        with_store::<u32>(8, |src| {
            with_store::<u32>(8, |dst| unsafe {
                bulk_construct(src, 0, 6, |i| Ok::<_, ()>(i as u32 + 1)).unwrap();
                bulk_copy(src, 1, dst, 4, 4, |v| Ok::<_, ()>(*v * 2)).unwrap();
                let copied: Vec<u32> = (4..8).map(|i| *dst.slot(i)).collect();
                assert_eq!(copied, vec![4, 6, 8, 10]);
            });
        });
    }

    #[test]
    fn shifts_move_runs_by_one_slot() {
        with_store::<u32>(8, |store| unsafe {
            bulk_construct(store, 2, 4, |i| Ok::<_, ()>(i as u32)).unwrap();
            shift_down(store, 2, 4);
            let down: Vec<u32> = (1..5).map(|i| *store.slot(i)).collect();
            assert_eq!(down, vec![0, 1, 2, 3]);
            shift_up(store, 1, 4);
            shift_up(store, 2, 4);
            let up: Vec<u32> = (3..7).map(|i| *store.slot(i)).collect();
            assert_eq!(up, vec![0, 1, 2, 3]);
        });
    }

    #[test]
    fn move_run_handles_overlap_both_ways() {
        with_store::<u32>(16, |store| unsafe {
            bulk_construct(store, 10, 5, |i| Ok::<_, ()>(i as u32)).unwrap();
            move_run(store, 10, 7, 5);
            let down: Vec<u32> = (7..12).map(|i| *store.slot(i)).collect();
            assert_eq!(down, vec![0, 1, 2, 3, 4]);
            move_run(store, 7, 9, 5);
            let up: Vec<u32> = (9..14).map(|i| *store.slot(i)).collect();
            assert_eq!(up, vec![0, 1, 2, 3, 4]);
            move_run(store, 9, 9, 5);
            assert_eq!(*store.slot(13), 4);
        });
    }

    #[test]
    fn relocate_moves_without_dropping() {
        let live = Rc::new(Cell::new(0));
        with_store::<Live>(4, |src| {
            with_store::<Live>(8, |dst| unsafe {
                bulk_construct(src, 0, 4, |_| Ok::<_, ()>(Live::new(&live))).unwrap();
                relocate(src, 0, dst, 3, 4);
                assert_eq!(live.get(), 4);
                bulk_destroy(dst, 3, 4);
            });
        });
        assert_eq!(live.get(), 0);
    }
}
