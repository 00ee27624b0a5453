//! Typed slot allocator backing every node container.
//!
//! ## Design
//!
//! `BoundedHeap<E>` hands out slots for values of type `E` and addresses them
//! by [`NodeKey`]. Storage is a `slab::Slab`:
//!
//! - **Bounded**: the slab is preallocated with exactly `capacity` slots at
//!   construction. The occupancy check runs before every insert, so the
//!   arena never reallocates and its address never changes.
//! - **Ambient**: the slab grows through the global allocator, and each
//!   slot is charged to an [`AmbientHeap`] budget.
//!
//! In both cases exhaustion is reported as a value. Nothing on the
//! allocation path panics.
//!
//! ## Slab Integration
//!
//! Per slab docs (https://docs.rs/slab/0.4.11):
//! - `Slab::with_capacity(n)` pre-allocates n slots
//! - Keys are reused after removal
//! - O(1) insert, remove, and lookup

use std::fmt;
use std::mem;
use std::ops::{Index, IndexMut};

use slab::Slab;

use crate::config::HeapConfig;
use crate::error::{AllocError, HeapError};
use crate::heap::AmbientHeap;

/// Handle to an allocated slot (slab key).
pub type NodeKey = usize;

#[derive(Debug, Clone)]
enum Policy {
    Bounded { capacity: usize },
    Ambient(AmbientHeap),
}

/// Fixed-capacity (or ambient-budget) slot allocator.
///
/// ## Example
///
/// ```
/// use nodeheap::BoundedHeap;
///
/// let mut heap = BoundedHeap::bounded(2);
/// let a = heap.allocate(10u32).unwrap();
/// let _b = heap.allocate(20u32).unwrap();
///
/// // Arena is full
/// assert!(heap.allocate(30u32).is_err());
///
/// assert_eq!(heap.deallocate(a), 10);
/// assert!(heap.allocate(30u32).is_ok());
/// ```
pub struct BoundedHeap<E> {
    /// Occupied and vacant slots
    slots: Slab<E>,

    /// Where slots come from
    policy: Policy,
}

impl<E> BoundedHeap<E> {
    /// Bytes charged per slot
    pub const SLOT_BYTES: usize = mem::size_of::<E>();

    /// Create a heap; `capacity == 0` selects the global ambient heap.
    pub fn new(capacity: usize) -> Self {
        Self::from_config(HeapConfig::with_capacity(capacity))
    }

    /// Create a heap with a dedicated arena of `capacity` slots.
    ///
    /// Unlike [`new`](Self::new), a zero capacity here is a real,
    /// permanently full arena.
    ///
    /// # Panics
    ///
    /// The whole arena is reserved up front, so a capacity whose arena does
    /// not fit in memory panics (or aborts) here rather than on a later
    /// allocation.
    pub fn bounded(capacity: usize) -> Self {
        log::debug!(
            "bounded heap initialised: {} slots, {} bytes",
            capacity,
            capacity.saturating_mul(Self::SLOT_BYTES)
        );
        Self {
            slots: Slab::with_capacity(capacity),
            policy: Policy::Bounded { capacity },
        }
    }

    /// Create a heap charging its slots to `heap`.
    pub fn ambient(heap: AmbientHeap) -> Self {
        log::debug!(
            "ambient heap attached: {} of {} bytes available",
            heap.available(),
            heap.limit()
        );
        Self {
            slots: Slab::new(),
            policy: Policy::Ambient(heap),
        }
    }

    /// Create a heap from a [`HeapConfig`].
    ///
    /// `Nodes(0)` and `Bytes(0)` select the global ambient heap. A nonzero
    /// `Bytes(b)` smaller than one slot is a zero-slot arena.
    pub fn from_config(config: HeapConfig) -> Self {
        match config {
            HeapConfig::Ambient(heap) => Self::ambient(heap),
            HeapConfig::Nodes(0) | HeapConfig::Bytes(0) => Self::ambient(AmbientHeap::global()),
            bounded => Self::bounded(bounded.slots(Self::SLOT_BYTES).unwrap_or(0)),
        }
    }

    /// Create an empty heap with the same policy as this one.
    ///
    /// Bounded heaps get a fresh arena of the same capacity; ambient heaps
    /// share the same budget.
    pub fn fresh(&self) -> Self {
        match &self.policy {
            Policy::Bounded { capacity } => Self::bounded(*capacity),
            Policy::Ambient(heap) => Self::ambient(heap.clone()),
        }
    }

    // ========================================================================
    // Allocation
    // ========================================================================

    /// Store `value` in a free slot.
    ///
    /// # Returns
    ///
    /// The slot key, or the value back if the heap is exhausted
    pub fn allocate(&mut self, value: E) -> Result<NodeKey, AllocError<E>> {
        match self.reserve(1) {
            Ok(()) => Ok(self.insert(value)),
            Err(error) => Err(AllocError::new(value, error)),
        }
    }

    /// Reserve a slot, then construct its value in place.
    ///
    /// `init` is not called when the heap is exhausted.
    pub fn allocate_with(&mut self, init: impl FnOnce() -> E) -> Result<NodeKey, HeapError> {
        self.reserve(1)?;
        Ok(self.insert(init()))
    }

    /// Store every value of `values`, or none of them.
    ///
    /// Capacity for `values.len()` slots is checked before anything is
    /// stored; on failure the untouched iterator is handed back.
    pub fn allocate_batch<I>(&mut self, values: I) -> Result<Vec<NodeKey>, AllocError<I>>
    where
        I: ExactSizeIterator<Item = E>,
    {
        let count = values.len();
        if let Err(error) = self.reserve(count) {
            return Err(AllocError::new(values, error));
        }

        let mut keys = Vec::with_capacity(count);
        for value in values.take(count) {
            keys.push(self.insert(value));
        }

        // An iterator reporting more items than it yields
        if keys.len() < count {
            self.refund(count - keys.len());
        }

        Ok(keys)
    }

    /// Release a slot and return its value.
    ///
    /// # Panics
    ///
    /// Panics if `key` is not an occupied slot of this heap
    pub fn deallocate(&mut self, key: NodeKey) -> E {
        let value = self.slots.remove(key);
        self.refund(1);
        log::trace!("slot {} released", key);
        value
    }

    /// Release a slot if it is occupied.
    pub fn try_deallocate(&mut self, key: NodeKey) -> Option<E> {
        let value = self.slots.try_remove(key)?;
        self.refund(1);
        Some(value)
    }

    /// Release every slot.
    pub fn clear(&mut self) {
        self.refund(self.slots.len());
        self.slots.clear();
    }

    fn insert(&mut self, value: E) -> NodeKey {
        let key = self.slots.insert(value);
        log::trace!("slot {} allocated", key);
        key
    }

    /// Check (and for ambient heaps, charge) room for `count` more slots.
    fn reserve(&self, count: usize) -> Result<(), HeapError> {
        let result = match &self.policy {
            Policy::Bounded { capacity } => {
                if count <= capacity.saturating_sub(self.slots.len()) {
                    Ok(())
                } else {
                    Err(HeapError::Exhausted { capacity: *capacity })
                }
            }
            Policy::Ambient(heap) => match count.checked_mul(Self::SLOT_BYTES) {
                Some(bytes) => heap.reserve(bytes),
                None => Err(HeapError::AmbientExhausted {
                    requested: usize::MAX,
                    available: heap.available(),
                }),
            },
        };

        if let Err(ref error) = result {
            log::debug!("allocation of {} slot(s) refused: {}", count, error);
        }
        result
    }

    fn refund(&self, count: usize) {
        if let Policy::Ambient(heap) = &self.policy {
            heap.release(count.saturating_mul(Self::SLOT_BYTES));
        }
    }

    // ========================================================================
    // Access
    // ========================================================================

    /// Get a slot's value
    #[inline]
    pub fn get(&self, key: NodeKey) -> Option<&E> {
        self.slots.get(key)
    }

    /// Get a slot's value (mutable)
    #[inline]
    pub fn get_mut(&mut self, key: NodeKey) -> Option<&mut E> {
        self.slots.get_mut(key)
    }

    /// Check if a slot is occupied
    #[inline]
    pub fn contains(&self, key: NodeKey) -> bool {
        self.slots.contains(key)
    }

    // ========================================================================
    // Capacity and Size
    // ========================================================================

    /// Number of occupied slots
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Check if no slot is occupied
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Arena size in slots, `None` for the ambient policy
    #[inline]
    pub fn capacity(&self) -> Option<usize> {
        match &self.policy {
            Policy::Bounded { capacity } => Some(*capacity),
            Policy::Ambient(_) => None,
        }
    }

    /// Number of further slots that can currently be allocated
    pub fn available(&self) -> usize {
        match &self.policy {
            Policy::Bounded { capacity } => capacity.saturating_sub(self.slots.len()),
            Policy::Ambient(heap) => match Self::SLOT_BYTES {
                0 => usize::MAX,
                bytes => heap.available() / bytes,
            },
        }
    }

    /// Check if the next allocation would fail
    #[inline]
    pub fn is_full(&self) -> bool {
        self.available() == 0
    }

    /// Check if this heap owns a dedicated arena
    #[inline]
    pub fn is_bounded(&self) -> bool {
        matches!(self.policy, Policy::Bounded { .. })
    }

    /// Bytes held: the whole arena when bounded, live slots when ambient
    pub fn arena_bytes(&self) -> usize {
        let slots = self.capacity().unwrap_or(self.slots.len());
        slots.saturating_mul(Self::SLOT_BYTES)
    }

    /// The shared budget this heap charges, if any
    pub fn ambient_heap(&self) -> Option<&AmbientHeap> {
        match &self.policy {
            Policy::Bounded { .. } => None,
            Policy::Ambient(heap) => Some(heap),
        }
    }
}

impl<E> Default for BoundedHeap<E> {
    fn default() -> Self {
        Self::from_config(HeapConfig::default())
    }
}

impl<E> Drop for BoundedHeap<E> {
    fn drop(&mut self) {
        self.refund(self.slots.len());
    }
}

impl<E> Index<NodeKey> for BoundedHeap<E> {
    type Output = E;

    #[inline]
    fn index(&self, key: NodeKey) -> &E {
        &self.slots[key]
    }
}

impl<E> IndexMut<NodeKey> for BoundedHeap<E> {
    #[inline]
    fn index_mut(&mut self, key: NodeKey) -> &mut E {
        &mut self.slots[key]
    }
}

impl<E> fmt::Debug for BoundedHeap<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundedHeap")
            .field("policy", &self.policy)
            .field("len", &self.slots.len())
            .finish()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
