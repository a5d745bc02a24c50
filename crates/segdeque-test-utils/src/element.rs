//! Elements that report their own lifetimes.
//!
//! A [`Census`] hands out [`Tracked`] values and counts how many are alive.
//! It also carries a clone budget: once spent, `Clone::clone` panics and
//! [`Tracked::try_clone`] returns [`CloneRefused`]. Together these let a test
//! fail an element copy at an exact position and then check that nothing
//! leaked and nothing was dropped twice.

use std::error::Error;
use std::fmt;
use std::sync::atomic::{AtomicIsize, AtomicUsize, Ordering};
use std::sync::Arc;

/// Shared live count and clone budget for a family of [`Tracked`] values.
#[derive(Clone, Debug)]
pub struct Census {
    live: Arc<AtomicIsize>,
    clone_budget: Arc<AtomicUsize>,
}

impl Census {
    /// A census with an unlimited clone budget.
    pub fn new() -> Self {
        Self {
            live: Arc::new(AtomicIsize::new(0)),
            clone_budget: Arc::new(AtomicUsize::new(usize::MAX)),
        }
    }

    /// Create a tracked value.
    pub fn make(&self, value: i64) -> Tracked {
        self.live.fetch_add(1, Ordering::SeqCst);
        Tracked {
            value,
            census: self.clone(),
        }
    }

    /// Tracked values currently alive. Negative means a double drop.
    pub fn live(&self) -> isize {
        self.live.load(Ordering::SeqCst)
    }

    /// Allow exactly `n` more clones.
    pub fn set_clone_budget(&self, n: usize) {
        self.clone_budget.store(n, Ordering::SeqCst);
    }

    fn take_clone(&self) -> bool {
        self.clone_budget
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| left.checked_sub(1))
            .is_ok()
    }
}

impl Default for Census {
    fn default() -> Self {
        Self::new()
    }
}

/// The clone budget of a [`Census`] is spent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CloneRefused {
    /// Value of the element that refused to clone.
    pub value: i64,
}

impl fmt::Display for CloneRefused {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "clone budget exhausted at value {}", self.value)
    }
}

impl Error for CloneRefused {}

/// A value counted by its [`Census`].
pub struct Tracked {
    pub value: i64,
    census: Census,
}

impl Tracked {
    /// Clone, or report that the budget is spent.
    pub fn try_clone(&self) -> Result<Self, CloneRefused> {
        if self.census.take_clone() {
            Ok(self.census.make(self.value))
        } else {
            Err(CloneRefused { value: self.value })
        }
    }
}

impl Clone for Tracked {
    fn clone(&self) -> Self {
        match self.try_clone() {
            Ok(copy) => copy,
            Err(err) => panic!("{err}"),
        }
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        self.census.live.fetch_sub(1, Ordering::SeqCst);
    }
}

impl PartialEq for Tracked {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for Tracked {}

impl fmt::Debug for Tracked {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tracked({})", self.value)
    }
}
