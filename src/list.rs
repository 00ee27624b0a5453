//! Circular doubly-linked list over a node heap.
//!
//! ## Design
//!
//! Every element lives in its own node in the list's [`BoundedHeap`]. Nodes
//! are linked by heap key into a ring:
//!
//! ```text
//! head <-> node2 <-> node3 <-> tail
//!  ^                            |
//!  +----------------------------+
//! ```
//!
//! - The list only stores `head`; the tail is `head.prev`
//! - Insert/remove at either end is O(1)
//! - `len()` and `at()` are O(n): no length counter is kept, trading O(1)
//!   size for one word less per list
//!
//! ## Allocation
//!
//! Inserting calls return `Result`. When the heap is exhausted the value is
//! handed back in an [`AllocError`] and the list is left untouched.
//!
//! ## Example
//!
//! ```
//! use nodeheap::List;
//!
//! let mut list = List::with_capacity(4);
//! list.push_back(1).unwrap();
//! list.push_back(2).unwrap();
//! list.push_back(3).unwrap();
//!
//! assert_eq!(list.pop_front(), Some(1));
//! assert_eq!(list.len(), 2);
//! assert_eq!(list.front(), Some(&2));
//! assert_eq!(list.back(), Some(&3));
//! ```

use std::fmt;
use std::iter::FusedIterator;

use crate::config::HeapConfig;
use crate::error::{AllocError, HeapError};
use crate::heap::{BoundedHeap, NodeKey};
use crate::node::{ListLinks, ListNode, Node};

/// Doubly-linked circular list with node storage from a bounded heap.
///
/// Not thread-safe: wrap in a mutex to share between threads.
pub struct List<T> {
    /// First node, `None` when empty
    head: Option<NodeKey>,

    /// Node storage
    heap: BoundedHeap<ListNode<T>>,
}

impl<T> Default for List<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> List<T> {
    /// Create an empty list on the global ambient heap
    pub fn new() -> Self {
        Self::with_config(HeapConfig::default())
    }

    /// Create an empty list with a dedicated arena of `capacity` nodes.
    ///
    /// A capacity of `0` uses the global ambient heap.
    ///
    /// # Example
    ///
    /// ```
    /// use nodeheap::List;
    ///
    /// let list: List<u32> = List::with_capacity(16);
    /// assert_eq!(list.capacity(), Some(16));
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_config(HeapConfig::with_capacity(capacity))
    }

    /// Create an empty list with the given heap policy
    pub fn with_config(config: HeapConfig) -> Self {
        Self {
            head: None,
            heap: BoundedHeap::from_config(config),
        }
    }

    // ========================================================================
    // Capacity and Size
    // ========================================================================

    /// Check if the list is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Count the elements. O(n).
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Arena size in nodes, `None` on the ambient heap
    #[inline]
    pub fn capacity(&self) -> Option<usize> {
        self.heap.capacity()
    }

    /// Number of further elements that can currently be inserted
    #[inline]
    pub fn available(&self) -> usize {
        self.heap.available()
    }

    // ========================================================================
    // Access
    // ========================================================================

    /// Get the first element
    #[inline]
    pub fn front(&self) -> Option<&T> {
        self.head.map(|key| &self.heap[key].value)
    }

    /// Get the first element (mutable)
    #[inline]
    pub fn front_mut(&mut self) -> Option<&mut T> {
        let key = self.head?;
        Some(&mut self.heap[key].value)
    }

    /// Get the last element
    #[inline]
    pub fn back(&self) -> Option<&T> {
        self.tail().map(|key| &self.heap[key].value)
    }

    /// Get the last element (mutable)
    #[inline]
    pub fn back_mut(&mut self) -> Option<&mut T> {
        let key = self.tail()?;
        Some(&mut self.heap[key].value)
    }

    /// Get the element at `index`, wrapping around the end of the list.
    ///
    /// For a list of length `n`, `at(i)` is `at(i % n)`. Returns `None`
    /// only when the list is empty.
    ///
    /// # Example
    ///
    /// ```
    /// use nodeheap::List;
    ///
    /// let mut list = List::with_capacity(3);
    /// list.try_extend_back([10, 20, 30]).unwrap();
    ///
    /// assert_eq!(list.at(1), Some(&20));
    /// assert_eq!(list.at(4), Some(&20));
    /// ```
    pub fn at(&self, index: usize) -> Option<&T> {
        self.key_at(index).map(|key| &self.heap[key].value)
    }

    /// Get the element at `index` (mutable), wrapping like [`at`](Self::at)
    pub fn at_mut(&mut self, index: usize) -> Option<&mut T> {
        let key = self.key_at(index)?;
        Some(&mut self.heap[key].value)
    }

    /// Position of the first element equal to `value`
    pub fn index_of(&self, value: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.iter().position(|v| v == value)
    }

    /// Check if any element equals `value`
    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.index_of(value).is_some()
    }

    // ========================================================================
    // Insertion
    // ========================================================================

    /// Append an element.
    ///
    /// # Returns
    ///
    /// `Err` with the value when the heap is exhausted
    pub fn push_back(&mut self, value: T) -> Result<(), AllocError<T>> {
        self.emplace_back(value).map(|_| ())
    }

    /// Prepend an element.
    pub fn push_front(&mut self, value: T) -> Result<(), AllocError<T>> {
        self.emplace_front(value).map(|_| ())
    }

    /// Append an element and return a reference to it.
    ///
    /// The reference is valid while the element stays in the list (the
    /// borrow checker enforces this).
    pub fn emplace_back(&mut self, value: T) -> Result<&mut T, AllocError<T>> {
        let key = self.allocate(value)?;
        self.link_back(key);
        Ok(&mut self.heap[key].value)
    }

    /// Prepend an element and return a reference to it.
    pub fn emplace_front(&mut self, value: T) -> Result<&mut T, AllocError<T>> {
        let key = self.allocate(value)?;
        self.link_front(key);
        Ok(&mut self.heap[key].value)
    }

    /// Construct an element in place at the back.
    ///
    /// `init` runs only after a node has been reserved, so nothing is
    /// constructed when the heap is exhausted.
    pub fn emplace_back_with(&mut self, init: impl FnOnce() -> T) -> Result<&mut T, HeapError> {
        let key = self.heap.allocate_with(|| Node::new(init()))?;
        self.link_back(key);
        Ok(&mut self.heap[key].value)
    }

    /// Construct an element in place at the front.
    pub fn emplace_front_with(&mut self, init: impl FnOnce() -> T) -> Result<&mut T, HeapError> {
        let key = self.heap.allocate_with(|| Node::new(init()))?;
        self.link_front(key);
        Ok(&mut self.heap[key].value)
    }

    /// Append every value, or none.
    ///
    /// Room for all values is checked up front. On failure the list is
    /// unchanged and the untouched iterator is handed back in the error.
    ///
    /// # Example
    ///
    /// ```
    /// use nodeheap::List;
    ///
    /// let mut list = List::with_capacity(1);
    /// let err = list.try_extend_back(vec![1, 2]).unwrap_err();
    ///
    /// assert!(list.is_empty());
    /// assert_eq!(err.into_inner().collect::<Vec<_>>(), vec![1, 2]);
    /// ```
    pub fn try_extend_back<I>(&mut self, values: I) -> Result<(), AllocError<I::IntoIter>>
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: ExactSizeIterator,
    {
        let keys = self
            .heap
            .allocate_batch(IntoNodes(values.into_iter()))
            .map_err(|err| err.map(|nodes| nodes.0))?;

        for key in keys {
            self.link_back(key);
        }
        Ok(())
    }

    /// Copy the list into a fresh heap with the same policy.
    pub fn try_clone(&self) -> Result<Self, HeapError>
    where
        T: Clone,
    {
        let mut copy = Self {
            head: None,
            heap: self.heap.fresh(),
        };
        for value in self.iter() {
            copy.push_back(value.clone())?;
        }
        Ok(copy)
    }

    // ========================================================================
    // Removal
    // ========================================================================

    /// Remove and return the first element
    pub fn pop_front(&mut self) -> Option<T> {
        let key = self.head?;
        Some(self.remove_node(key))
    }

    /// Remove and return the last element
    pub fn pop_back(&mut self) -> Option<T> {
        let key = self.tail()?;
        Some(self.remove_node(key))
    }

    /// Remove every element
    pub fn clear(&mut self) {
        while self.pop_front().is_some() {}
    }

    // ========================================================================
    // Iteration
    // ========================================================================

    /// Iterate front to back
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            heap: &self.heap,
            front: self.head,
            back: self.tail(),
        }
    }

    /// Cursor positioned on the first element
    pub fn cursor_front_mut(&mut self) -> CursorMut<'_, T> {
        let current = self.head;
        CursorMut { list: self, current }
    }

    /// Cursor positioned on the last element
    pub fn cursor_back_mut(&mut self) -> CursorMut<'_, T> {
        let current = self.tail();
        CursorMut { list: self, current }
    }

    // ========================================================================
    // Linkage
    // ========================================================================

    fn allocate(&mut self, value: T) -> Result<NodeKey, AllocError<T>> {
        self.heap
            .allocate(Node::new(value))
            .map_err(|err| err.map(Node::into_value))
    }

    #[inline]
    fn next_of(&self, key: NodeKey) -> NodeKey {
        self.heap[key].links.next.unwrap_or(key)
    }

    #[inline]
    fn prev_of(&self, key: NodeKey) -> NodeKey {
        self.heap[key].links.prev.unwrap_or(key)
    }

    #[inline]
    fn tail(&self) -> Option<NodeKey> {
        self.head.map(|head| self.prev_of(head))
    }

    /// Walk to `index % len`, taking the shorter direction.
    fn key_at(&self, index: usize) -> Option<NodeKey> {
        let head = self.head?;
        let len = self.len();
        let steps = index % len;

        let mut key = head;
        if steps <= len / 2 {
            for _ in 0..steps {
                key = self.next_of(key);
            }
        } else {
            for _ in steps..len {
                key = self.prev_of(key);
            }
        }
        Some(key)
    }

    /// Splice an unlinked node in front of `at`.
    fn splice_before(&mut self, at: NodeKey, key: NodeKey) {
        debug_assert!(self.heap[key].is_unlinked());
        let prev = self.prev_of(at);

        self.heap[key].links = ListLinks {
            next: Some(at),
            prev: Some(prev),
        };
        self.heap[prev].links.next = Some(key);
        self.heap[at].links.prev = Some(key);
    }

    fn link_back(&mut self, key: NodeKey) {
        match self.head {
            Some(head) => self.splice_before(head, key),
            None => {
                // A ring of one
                self.heap[key].links = ListLinks {
                    next: Some(key),
                    prev: Some(key),
                };
                self.head = Some(key);
            }
        }
    }

    fn link_front(&mut self, key: NodeKey) {
        self.link_back(key);
        self.head = Some(key);
    }

    fn unlink(&mut self, key: NodeKey) {
        let next = self.next_of(key);
        let prev = self.prev_of(key);

        if next == key {
            // Last element
            self.head = None;
        } else {
            self.heap[prev].links.next = Some(next);
            self.heap[next].links.prev = Some(prev);
            if self.head == Some(key) {
                self.head = Some(next);
            }
        }

        self.heap[key].links = ListLinks::default();
    }

    fn remove_node(&mut self, key: NodeKey) -> T {
        self.unlink(key);
        self.heap.deallocate(key).into_value()
    }
}

/// Wraps values into unlinked nodes; the source iterator stays recoverable.
struct IntoNodes<I>(I);

impl<T, I: Iterator<Item = T>> Iterator for IntoNodes<I> {
    type Item = ListNode<T>;

    fn next(&mut self) -> Option<ListNode<T>> {
        self.0.next().map(Node::new)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<T, I: ExactSizeIterator<Item = T>> ExactSizeIterator for IntoNodes<I> {}

impl<T: fmt::Debug> fmt::Debug for List<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for List<T> {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for List<T> {}

impl<'a, T> IntoIterator for &'a List<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<T> IntoIterator for List<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        IntoIter { list: self }
    }
}

// ============================================================================
// Iterators
// ============================================================================

/// Front-to-back iterator over a [`List`].
pub struct Iter<'a, T> {
    heap: &'a BoundedHeap<ListNode<T>>,
    front: Option<NodeKey>,
    back: Option<NodeKey>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let key = self.front?;
        let node = &self.heap[key];

        // Met the back cursor
        if self.front == self.back {
            self.front = None;
            self.back = None;
        } else {
            self.front = node.links.next;
        }

        Some(&node.value)
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        let key = self.back?;
        let node = &self.heap[key];

        if self.front == self.back {
            self.front = None;
            self.back = None;
        } else {
            self.back = node.links.prev;
        }

        Some(&node.value)
    }
}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            heap: self.heap,
            front: self.front,
            back: self.back,
        }
    }
}

/// Owning iterator, popping from the front.
pub struct IntoIter<T> {
    list: List<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.list.pop_front()
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        self.list.pop_back()
    }
}

impl<T> FusedIterator for IntoIter<T> {}

// ============================================================================
// Cursor
// ============================================================================

/// Mutable position in a [`List`].
///
/// Besides the elements there is one "end" position (`current() == None`).
/// Moving past the tail or before the head lands on the end position;
/// moving again from the end wraps to the head (forward) or the tail
/// (backward).
pub struct CursorMut<'a, T> {
    list: &'a mut List<T>,
    current: Option<NodeKey>,
}

impl<'a, T> CursorMut<'a, T> {
    /// Element under the cursor
    pub fn current(&self) -> Option<&T> {
        self.current.map(|key| &self.list.heap[key].value)
    }

    /// Element under the cursor (mutable)
    pub fn current_mut(&mut self) -> Option<&mut T> {
        let key = self.current?;
        Some(&mut self.list.heap[key].value)
    }

    /// Check if the cursor is on the end position
    pub fn is_end(&self) -> bool {
        self.current.is_none()
    }

    /// Step towards the back
    pub fn move_next(&mut self) {
        self.current = match self.current {
            None => self.list.head,
            Some(key) => {
                let next = self.list.next_of(key);
                if Some(next) == self.list.head {
                    None
                } else {
                    Some(next)
                }
            }
        };
    }

    /// Step towards the front
    pub fn move_prev(&mut self) {
        self.current = match self.current {
            None => self.list.tail(),
            Some(key) if Some(key) == self.list.head => None,
            Some(key) => Some(self.list.prev_of(key)),
        };
    }

    /// Remove the element under the cursor and move to the next one.
    pub fn remove_current(&mut self) -> Option<T> {
        let key = self.current?;
        let next = self.list.next_of(key);
        self.current = if Some(next) == self.list.head {
            // Removing the tail
            None
        } else {
            Some(next)
        };
        Some(self.list.remove_node(key))
    }

    /// Insert after the cursor; on the end position, insert at the front.
    ///
    /// The cursor does not move.
    pub fn insert_after(&mut self, value: T) -> Result<(), AllocError<T>> {
        let key = self.list.allocate(value)?;
        match self.current {
            Some(current) => {
                let next = self.list.next_of(current);
                self.list.splice_before(next, key);
            }
            None => self.list.link_front(key),
        }
        Ok(())
    }

    /// Insert before the cursor; on the end position, insert at the back.
    pub fn insert_before(&mut self, value: T) -> Result<(), AllocError<T>> {
        let key = self.list.allocate(value)?;
        match self.current {
            Some(current) => {
                self.list.splice_before(current, key);
                if self.list.head == Some(current) {
                    self.list.head = Some(key);
                }
            }
            None => self.list.link_back(key),
        }
        Ok(())
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
