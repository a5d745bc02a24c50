//! Deque error types.

use std::alloc::Layout;
use std::error::Error;
use std::fmt;

/// Errors that can occur during deque operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DequeError {
    /// Checked access past the end of the live range.
    OutOfRange {
        /// The requested logical index.
        index: usize,
        /// Number of live elements at the time of the request.
        len: usize,
    },
    /// The requested capacity does not fit in `usize` or in a valid layout.
    CapacityOverflow,
    /// The allocator could not supply the requested storage.
    AllocFailed {
        /// Layout of the failed request.
        layout: Layout,
    },
}

impl fmt::Display for DequeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange { index, len } => {
                write!(f, "index {index} out of range for deque of length {len}")
            }
            Self::CapacityOverflow => write!(f, "deque capacity overflow"),
            Self::AllocFailed { layout } => {
                write!(
                    f,
                    "allocation of {} bytes (align {}) failed",
                    layout.size(),
                    layout.align()
                )
            }
        }
    }
}

impl Error for DequeError {}

impl DequeError {
    /// Escalate an error from an infallible entry point.
    ///
    /// Allocation failures go through [`std::alloc::handle_alloc_error`],
    /// everything else panics with the error message.
    #[cold]
    #[track_caller]
    pub(crate) fn escalate(self) -> ! {
        match self {
            Self::AllocFailed { layout } => std::alloc::handle_alloc_error(layout),
            other => panic!("{other}"),
        }
    }
}

/// Invalid [`DequeConfig`](crate::DequeConfig) values.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// `block_capacity` was zero.
    ZeroBlockCapacity,
    /// One block of the element type exceeds `max_block_bytes`.
    BlockTooLarge {
        /// Size of one block in bytes, `None` if the computation overflowed.
        block_bytes: Option<usize>,
        /// The configured limit.
        limit: usize,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroBlockCapacity => write!(f, "block capacity must be at least 1"),
            Self::BlockTooLarge {
                block_bytes: Some(bytes),
                limit,
            } => write!(f, "block of {bytes} bytes exceeds limit of {limit} bytes"),
            Self::BlockTooLarge {
                block_bytes: None,
                limit,
            } => write!(f, "block size overflows usize (limit {limit} bytes)"),
        }
    }
}

impl Error for ConfigError {}

/// Failure while building elements into fresh storage.
///
/// Returned by the fallible construction paths (`try_from_fn`,
/// `try_clone_with`, `try_clone_from_with`). Everything constructed before
/// the failure has already been destroyed when this is returned.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConstructError<E> {
    /// Storage for the new elements could not be obtained.
    Storage(DequeError),
    /// The element constructor failed.
    Element {
        /// Logical index of the element whose construction failed.
        index: usize,
        /// The constructor's error.
        source: E,
    },
}

impl<E: fmt::Display> fmt::Display for ConstructError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Storage(err) => write!(f, "storage: {err}"),
            Self::Element { index, source } => {
                write!(f, "constructing element {index} failed: {source}")
            }
        }
    }
}

impl<E: Error + 'static> Error for ConstructError<E> {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            Self::Element { source, .. } => Some(source),
        }
    }
}

impl<E> From<DequeError> for ConstructError<E> {
    fn from(err: DequeError) -> Self {
        Self::Storage(err)
    }
}
