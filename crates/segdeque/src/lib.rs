//! Block-segmented double-ended queue.
//!
//! [`Deque`] stores elements in fixed-size blocks reached through a block
//! table, with free slots kept at both ends so that pushes and pops at
//! either end are amortized O(1) and indexed access is O(1). Storage comes
//! from an [`Allocator`](allocator_api2::alloc::Allocator), so the deque can
//! run on a custom or failing allocator in tests.
//!
//! # Architecture
//!
//! ```text
//! Deque<T, A> (container core: growth policy, end/middle mutators)
//! ├── BlockStore<T> (block table + one contiguous region of raw slots)
//! │   └── position (logical index → block, offset → slot address)
//! ├── raw (bulk construct/destroy/relocate/shift with rollback)
//! ├── Iter / IterMut / IntoIter (double-ended, exact size)
//! └── Cursor / CursorMut (random-access positions, insert/remove at cursor)
//! ```
//!
//! # Failure semantics
//!
//! Every growing operation allocates the new store before touching any
//! element, so allocation failure leaves the deque unchanged. Bulk
//! construction rolls back what it built if an element constructor fails
//! or panics. The `try_*` methods report failures as [`DequeError`] or
//! [`ConstructError`]; the plain methods escalate them, allocation failure
//! through [`std::alloc::handle_alloc_error`].
//!
//! # Example
//!
//! ```
//! use segdeque::{Deque, DequeConfig};
//!
//! let mut d = Deque::with_config(DequeConfig::with_block_capacity(4));
//! for i in 0..6 {
//!     d.push_back(i);
//! }
//! d.push_front(-1);
//! assert_eq!(d, [-1, 0, 1, 2, 3, 4, 5]);
//! assert_eq!(d.capacity() % 4, 0);
//!
//! let mut c = d.cursor_mut(3);
//! c.insert_before(100);
//! assert_eq!(d[3], 100);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_op_in_unsafe_fn)]

pub mod config;
pub mod cursor;
pub mod deque;
pub mod error;
pub mod iter;
pub mod position;
mod raw;
pub mod stats;
mod store;

// Public re-exports for the primary API surface.
pub use config::DequeConfig;
pub use cursor::{Cursor, CursorMut};
pub use deque::Deque;
pub use error::{ConfigError, ConstructError, DequeError};
pub use iter::{IntoIter, Iter, IterMut};
pub use position::SlotPosition;
pub use stats::DequeStats;
