//! Allocation error types.
//!
//! ## Design
//!
//! Every inserting operation in this crate returns a `Result`. Heap
//! exhaustion is an expected condition on bounded arenas, so it is reported
//! as a value and never as a panic.
//!
//! - [`HeapError`]: why the heap refused the request
//! - [`AllocError`]: the refusal plus the value that could not be stored,
//!   handed back to the caller so nothing is silently dropped
//!
//! Absent values (empty containers, missing keys) are `Option::None` and
//! are never confused with allocation failure.

use core::fmt;

/// Reason a heap refused an allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum HeapError {
    /// The bounded arena has no free slot left.
    #[error("bounded heap exhausted: all {capacity} slots in use")]
    Exhausted {
        /// Total number of slots in the arena
        capacity: usize,
    },

    /// The ambient (shared) heap budget cannot cover the request.
    #[error("ambient heap exhausted: {requested} bytes requested, {available} available")]
    AmbientExhausted {
        /// Bytes the allocation needed
        requested: usize,
        /// Bytes left in the shared budget
        available: usize,
    },
}

/// Allocation failure carrying the rejected value.
///
/// Returned by `push_*`, `emplace*` and `insert` when the backing heap is
/// full. The container is left exactly as it was before the call.
///
/// ## Example
///
/// ```
/// use nodeheap::{List, HeapError};
///
/// let mut list = List::with_capacity(1);
/// list.push_back(1).unwrap();
///
/// let err = list.push_back(2).unwrap_err();
/// assert_eq!(err.error(), HeapError::Exhausted { capacity: 1 });
/// assert_eq!(err.into_inner(), 2);
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct AllocError<T> {
    value: T,
    error: HeapError,
}

impl<T> AllocError<T> {
    pub(crate) fn new(value: T, error: HeapError) -> Self {
        Self { value, error }
    }

    /// Why the allocation failed
    #[inline]
    pub fn error(&self) -> HeapError {
        self.error
    }

    /// Borrow the value that could not be stored
    #[inline]
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Take back the value that could not be stored
    #[inline]
    pub fn into_inner(self) -> T {
        self.value
    }

    /// Replace the carried value, keeping the reason.
    pub(crate) fn map<U>(self, f: impl FnOnce(T) -> U) -> AllocError<U> {
        AllocError {
            value: f(self.value),
            error: self.error,
        }
    }
}

impl<T> fmt::Debug for AllocError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AllocError")
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

impl<T> fmt::Display for AllocError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "allocation failed: {}", self.error)
    }
}

impl<T> std::error::Error for AllocError<T> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

impl<T> From<AllocError<T>> for HeapError {
    fn from(err: AllocError<T>) -> Self {
        err.error
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
