//! Shared byte budget for heaps without a dedicated arena.
//!
//! ## Design
//!
//! A heap configured with capacity `0` does not own an arena. Its slots grow
//! through the global allocator instead, and every slot is charged against
//! an `AmbientHeap` budget so that exhaustion is still reported as a value.
//!
//! The budget is an explicit object passed in at construction. The
//! process-wide instance is [`AmbientHeap::global`]; independent pools can be
//! created with [`AmbientHeap::with_limit`] and shared between containers by
//! cloning the handle.
//!
//! Reservation is a single compare-and-swap loop on an atomic counter. This
//! is the only cross-thread coordination in the crate.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};

use crate::error::HeapError;

#[derive(Debug)]
struct Budget {
    limit: AtomicUsize,
    used: AtomicUsize,
}

/// Handle to a shared allocation budget, in bytes.
///
/// Cloning the handle shares the budget.
///
/// ## Example
///
/// ```
/// use nodeheap::AmbientHeap;
///
/// let pool = AmbientHeap::with_limit(64);
/// let other = pool.clone();
///
/// assert_eq!(pool.limit(), 64);
/// assert_eq!(other.available(), 64);
/// ```
#[derive(Debug, Clone)]
pub struct AmbientHeap {
    budget: Arc<Budget>,
}

static GLOBAL: OnceLock<AmbientHeap> = OnceLock::new();

impl AmbientHeap {
    /// The process-wide ambient heap.
    ///
    /// Unlimited until [`set_limit`](Self::set_limit) is called.
    pub fn global() -> AmbientHeap {
        GLOBAL.get_or_init(|| AmbientHeap::with_limit(usize::MAX)).clone()
    }

    /// Create an independent budget of `limit` bytes.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            budget: Arc::new(Budget {
                limit: AtomicUsize::new(limit),
                used: AtomicUsize::new(0),
            }),
        }
    }

    /// Total budget in bytes
    #[inline]
    pub fn limit(&self) -> usize {
        self.budget.limit.load(Ordering::Relaxed)
    }

    /// Change the budget.
    ///
    /// Lowering the limit below [`used`](Self::used) does not reclaim
    /// anything; further reservations simply fail until enough is released.
    pub fn set_limit(&self, limit: usize) {
        self.budget.limit.store(limit, Ordering::Relaxed);
    }

    /// Bytes currently charged
    #[inline]
    pub fn used(&self) -> usize {
        self.budget.used.load(Ordering::Acquire)
    }

    /// Bytes still available
    #[inline]
    pub fn available(&self) -> usize {
        self.limit().saturating_sub(self.used())
    }

    /// Whether two handles refer to the same budget
    pub fn same_budget(&self, other: &AmbientHeap) -> bool {
        Arc::ptr_eq(&self.budget, &other.budget)
    }

    /// Charge `bytes` against the budget, all or nothing.
    pub(crate) fn reserve(&self, bytes: usize) -> Result<(), HeapError> {
        let limit = self.limit();
        self.budget
            .used
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |used| {
                used.checked_add(bytes).filter(|&total| total <= limit)
            })
            .map(|_| ())
            .map_err(|used| HeapError::AmbientExhausted {
                requested: bytes,
                available: limit.saturating_sub(used),
            })
    }

    /// Refund `bytes` previously reserved.
    pub(crate) fn release(&self, bytes: usize) {
        let _ = self
            .budget
            .used
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |used| {
                Some(used.saturating_sub(bytes))
            });
    }
}

impl Default for AmbientHeap {
    fn default() -> Self {
        Self::global()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_reserve_within_limit() {
        let heap = AmbientHeap::with_limit(100);

        assert!(heap.reserve(60).is_ok());
        assert_eq!(heap.used(), 60);
        assert_eq!(heap.available(), 40);
    }

    #[test]
    fn test_reserve_is_all_or_nothing() {
        let heap = AmbientHeap::with_limit(100);
        heap.reserve(80).unwrap();

        let err = heap.reserve(30).unwrap_err();
        assert_eq!(err, HeapError::AmbientExhausted { requested: 30, available: 20 });
        assert_eq!(heap.used(), 80);
    }

    #[test]
    fn test_release_refunds() {
        let heap = AmbientHeap::with_limit(10);
        heap.reserve(10).unwrap();
        heap.release(4);

        assert_eq!(heap.used(), 6);
        assert!(heap.reserve(4).is_ok());

        // Over-release saturates at zero
        heap.release(100);
        assert_eq!(heap.used(), 0);
    }

    #[test]
    fn test_reserve_overflow_rejected() {
        let heap = AmbientHeap::with_limit(usize::MAX);
        heap.reserve(usize::MAX - 1).unwrap();

        assert!(heap.reserve(usize::MAX).is_err());
    }

    #[test]
    fn test_clones_share_budget() {
        let a = AmbientHeap::with_limit(16);
        let b = a.clone();
        let c = AmbientHeap::with_limit(16);

        a.reserve(10).unwrap();
        assert_eq!(b.used(), 10);
        assert!(a.same_budget(&b));
        assert!(!a.same_budget(&c));
    }

    #[test]
    fn test_global_is_shared() {
        assert!(AmbientHeap::global().same_budget(&AmbientHeap::default()));
    }

    #[test]
    fn test_set_limit() {
        let heap = AmbientHeap::with_limit(8);
        heap.reserve(8).unwrap();

        heap.set_limit(4);
        assert_eq!(heap.available(), 0);
        assert!(heap.reserve(1).is_err());

        heap.set_limit(16);
        assert!(heap.reserve(8).is_ok());
    }

    #[test]
    fn test_concurrent_reservations_never_exceed_limit() {
        let heap = AmbientHeap::with_limit(1000);

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let heap = heap.clone();
                thread::spawn(move || (0..500).filter(|_| heap.reserve(1).is_ok()).count())
            })
            .collect();

        let granted: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
        assert_eq!(granted, 1000);
        assert_eq!(heap.used(), 1000);
    }
}
