//! Test utilities for segdeque development.
//!
//! - [`alloc`]: allocators that count calls or fail on demand, for checking
//!   amortized growth and failure atomicity.
//! - [`element`]: an element type that tracks live instances and can refuse
//!   to clone, for checking rollback and drop accounting.
//! - [`ops`]: seeded random operation sequences replayable against both a
//!   [`Deque`](segdeque::Deque) and a `VecDeque` reference model.

#![deny(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod alloc;
pub mod element;
pub mod ops;

pub use alloc::{CountingAllocator, FailingAllocator};
pub use element::{Census, CloneRefused, Tracked};
pub use ops::{apply_deque, apply_reference, random_ops, Op};
