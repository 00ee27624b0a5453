//! Heap configuration chosen at container construction.
//!
//! A container's heap policy is fixed for its lifetime:
//!
//! | Config | Arena | Exhaustion |
//! |--------|-------|------------|
//! | `Nodes(n)` | `n` slots, preallocated once | after `n` live nodes |
//! | `Bytes(b)` | `b / size_of::<node>()` slots | same as `Nodes` |
//! | `Ambient(heap)` | grows via the global allocator | when `heap`'s budget runs out |
//!
//! A capacity of `0` always means "use the ambient heap".

use crate::heap::AmbientHeap;

/// Heap policy for a container.
#[derive(Debug, Clone)]
pub enum HeapConfig {
    /// No dedicated arena; charge every node to a shared budget
    Ambient(AmbientHeap),
    /// Dedicated arena holding this many nodes
    Nodes(usize),
    /// Dedicated arena of roughly this many bytes
    Bytes(usize),
}

impl Default for HeapConfig {
    fn default() -> Self {
        HeapConfig::Ambient(AmbientHeap::global())
    }
}

impl HeapConfig {
    /// Dedicated arena for `nodes` elements; `0` selects the global ambient heap.
    ///
    /// ```
    /// use nodeheap::HeapConfig;
    ///
    /// assert!(matches!(HeapConfig::with_capacity(8), HeapConfig::Nodes(8)));
    /// assert!(matches!(HeapConfig::with_capacity(0), HeapConfig::Ambient(_)));
    /// ```
    pub fn with_capacity(nodes: usize) -> Self {
        if nodes == 0 {
            Self::default()
        } else {
            HeapConfig::Nodes(nodes)
        }
    }

    /// Dedicated arena sized in bytes; `0` selects the global ambient heap.
    pub fn with_bytes(bytes: usize) -> Self {
        if bytes == 0 {
            Self::default()
        } else {
            HeapConfig::Bytes(bytes)
        }
    }

    /// Share an existing ambient budget
    pub fn shared(heap: AmbientHeap) -> Self {
        HeapConfig::Ambient(heap)
    }

    /// Number of slots this config yields for elements of `slot_size` bytes.
    ///
    /// `None` for the ambient policy, including a zero `Nodes` or `Bytes`.
    pub fn slots(&self, slot_size: usize) -> Option<usize> {
        match self {
            HeapConfig::Ambient(_) | HeapConfig::Nodes(0) | HeapConfig::Bytes(0) => None,
            HeapConfig::Nodes(n) => Some(*n),
            HeapConfig::Bytes(b) => Some(b / slot_size.max(1)),
        }
    }

    /// Whether this config owns a dedicated arena
    pub fn is_bounded(&self) -> bool {
        !matches!(
            self,
            HeapConfig::Ambient(_) | HeapConfig::Nodes(0) | HeapConfig::Bytes(0)
        )
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_global_ambient() {
        match HeapConfig::default() {
            HeapConfig::Ambient(heap) => assert!(heap.same_budget(&AmbientHeap::global())),
            other => panic!("unexpected config {:?}", other),
        }
    }

    #[test]
    fn test_zero_capacity_is_ambient() {
        assert!(!HeapConfig::with_capacity(0).is_bounded());
        assert!(!HeapConfig::with_bytes(0).is_bounded());
        assert!(HeapConfig::with_capacity(3).is_bounded());

        // Built directly, a zero size still means ambient
        assert!(!HeapConfig::Nodes(0).is_bounded());
        assert!(!HeapConfig::Bytes(0).is_bounded());
        assert_eq!(HeapConfig::Nodes(0).slots(24), None);
        assert_eq!(HeapConfig::Bytes(0).slots(24), None);
    }

    #[test]
    fn test_slots() {
        assert_eq!(HeapConfig::Nodes(5).slots(24), Some(5));
        assert_eq!(HeapConfig::Bytes(100).slots(24), Some(4));
        assert_eq!(HeapConfig::Bytes(10).slots(24), Some(0));
        assert_eq!(HeapConfig::Bytes(10).slots(0), Some(10));
        assert_eq!(HeapConfig::default().slots(24), None);
    }

    #[test]
    fn test_shared() {
        let pool = AmbientHeap::with_limit(128);
        match HeapConfig::shared(pool.clone()) {
            HeapConfig::Ambient(heap) => assert!(heap.same_budget(&pool)),
            other => panic!("unexpected config {:?}", other),
        }
    }
}
