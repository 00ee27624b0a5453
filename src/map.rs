//! Ordered map backed by a red-black tree of heap nodes.
//!
//! ## Design
//!
//! Each entry is one node in the map's [`BoundedHeap`], holding `(key, value)`
//! plus parent/child links and a color. The tree is ordered by a comparator
//! fixed at construction ([`Compare`]); the default is the key's `Ord`.
//!
//! ## Balancing
//!
//! After every insert and removal the red-black rules hold:
//!
//! 1. The root is black
//! 2. A red node has no red child
//! 3. Every root-to-leaf path crosses the same number of black nodes
//!
//! so lookups, inserts and removals are O(log n).
//!
//! ## Duplicate Keys
//!
//! | Operation | Key present |
//! |-----------|-------------|
//! | [`emplace`](OrderedMap::emplace) | rejected: map unchanged, flag `false` |
//! | [`insert`](OrderedMap::insert) | value overwritten, old value returned |
//!
//! ## Example
//!
//! ```
//! use nodeheap::OrderedMap;
//!
//! let mut map = OrderedMap::with_capacity(8);
//! map.emplace(3, "three").unwrap();
//! map.emplace(1, "one").unwrap();
//! map.emplace(2, "two").unwrap();
//!
//! let keys: Vec<_> = map.keys().copied().collect();
//! assert_eq!(keys, vec![1, 2, 3]);
//!
//! let (_, inserted) = map.emplace(2, "deux").unwrap();
//! assert!(!inserted);
//! assert_eq!(map.get(&2), Some(&"two"));
//! ```

use std::fmt;
use std::iter::FusedIterator;
use std::mem;

use crate::config::HeapConfig;
use crate::error::AllocError;
use crate::heap::{BoundedHeap, NodeKey};
use crate::node::{Color, Node, TreeNode};

// ============================================================================
// Comparators
// ============================================================================

/// Strict weak ordering over keys.
///
/// Two keys are equivalent when neither is less than the other.
pub trait Compare<K: ?Sized> {
    /// Check if `a` orders before `b`
    fn less(&self, a: &K, b: &K) -> bool;
}

/// Ordering by the key's `Ord` implementation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Natural;

impl<K: Ord + ?Sized> Compare<K> for Natural {
    #[inline]
    fn less(&self, a: &K, b: &K) -> bool {
        a < b
    }
}

impl<K: ?Sized, F> Compare<K> for F
where
    F: Fn(&K, &K) -> bool,
{
    #[inline]
    fn less(&self, a: &K, b: &K) -> bool {
        self(a, b)
    }
}

// ============================================================================
// OrderedMap
// ============================================================================

type MapHeap<K, V> = BoundedHeap<TreeNode<K, V>>;

/// Where a key is, or where it would go.
enum Probe {
    Found(NodeKey),
    Vacant { parent: Option<NodeKey>, left: bool },
}

/// Key-ordered map with node storage from a bounded heap.
///
/// Not thread-safe: wrap in a mutex to share between threads.
pub struct OrderedMap<K, V, C = Natural> {
    /// Tree root, `None` when empty
    root: Option<NodeKey>,

    /// Number of entries
    len: usize,

    /// Node storage
    heap: MapHeap<K, V>,

    /// Key ordering, fixed for the map's lifetime
    cmp: C,
}

impl<K: Ord, V> Default for OrderedMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord, V> OrderedMap<K, V> {
    /// Create an empty map on the global ambient heap
    pub fn new() -> Self {
        Self::with_config(HeapConfig::default())
    }

    /// Create an empty map with a dedicated arena of `capacity` entries.
    ///
    /// A capacity of `0` uses the global ambient heap.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_config(HeapConfig::with_capacity(capacity))
    }

    /// Create an empty map with the given heap policy
    pub fn with_config(config: HeapConfig) -> Self {
        Self::with_comparator(config, Natural)
    }
}

impl<K, V, C: Compare<K>> OrderedMap<K, V, C> {
    /// Create an empty map ordered by `cmp`.
    ///
    /// # Example
    ///
    /// ```
    /// use nodeheap::{HeapConfig, OrderedMap};
    ///
    /// // Descending order
    /// let mut map = OrderedMap::with_comparator(
    ///     HeapConfig::with_capacity(4),
    ///     |a: &u32, b: &u32| b < a,
    /// );
    /// map.insert(1, ()).unwrap();
    /// map.insert(5, ()).unwrap();
    ///
    /// assert_eq!(map.first_key_value(), Some((&5, &())));
    /// ```
    pub fn with_comparator(config: HeapConfig, cmp: C) -> Self {
        Self {
            root: None,
            len: 0,
            heap: BoundedHeap::from_config(config),
            cmp,
        }
    }

    // ========================================================================
    // Capacity and Size
    // ========================================================================

    /// Number of entries. O(1).
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the map is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Arena size in entries, `None` on the ambient heap
    #[inline]
    pub fn capacity(&self) -> Option<usize> {
        self.heap.capacity()
    }

    /// Number of further entries that can currently be inserted
    #[inline]
    pub fn available(&self) -> usize {
        self.heap.available()
    }

    /// The map's comparator
    #[inline]
    pub fn comparator(&self) -> &C {
        &self.cmp
    }

    // ========================================================================
    // Insertion
    // ========================================================================

    /// Insert an entry unless an equivalent key is present.
    ///
    /// # Returns
    ///
    /// A cursor on the entry for `key` and whether a new entry was created.
    /// When the key is already present the map is unchanged and the given
    /// key and value are dropped. `Err` hands both back when the heap is
    /// exhausted.
    pub fn emplace(
        &mut self,
        key: K,
        value: V,
    ) -> Result<(CursorMut<'_, K, V, C>, bool), AllocError<(K, V)>> {
        let (node, inserted) = match self.probe(&key) {
            Probe::Found(node) => (node, false),
            Probe::Vacant { parent, left } => (self.attach((key, value), parent, left)?, true),
        };

        let cursor = CursorMut {
            map: self,
            current: Some(node),
        };
        Ok((cursor, inserted))
    }

    /// Insert an entry, overwriting the value of an equivalent key.
    ///
    /// # Returns
    ///
    /// The previous value, if any. The stored key is kept on overwrite.
    pub fn insert(&mut self, key: K, value: V) -> Result<Option<V>, AllocError<(K, V)>> {
        match self.probe(&key) {
            Probe::Found(node) => Ok(Some(mem::replace(&mut self.heap[node].value.1, value))),
            Probe::Vacant { parent, left } => {
                self.attach((key, value), parent, left)?;
                Ok(None)
            }
        }
    }

    // ========================================================================
    // Lookup
    // ========================================================================

    /// Get the value for `key`
    pub fn get(&self, key: &K) -> Option<&V> {
        self.find(key).map(|node| &self.heap[node].value.1)
    }

    /// Get the value for `key` (mutable)
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let node = self.find(key)?;
        Some(&mut self.heap[node].value.1)
    }

    /// Get the stored key and value for `key`
    pub fn get_key_value(&self, key: &K) -> Option<(&K, &V)> {
        self.find(key).map(|node| self.entry(node))
    }

    /// Check if an equivalent key is present
    pub fn contains_key(&self, key: &K) -> bool {
        self.find(key).is_some()
    }

    /// Smallest entry
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        self.root.map(|root| self.entry(minimum(&self.heap, root)))
    }

    /// Largest entry
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        self.root.map(|root| self.entry(maximum(&self.heap, root)))
    }

    // ========================================================================
    // Removal
    // ========================================================================

    /// Remove `key`, returning its value
    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.remove_entry(key).map(|(_, value)| value)
    }

    /// Remove `key`, returning the stored key and value
    pub fn remove_entry(&mut self, key: &K) -> Option<(K, V)> {
        let node = self.find(key)?;
        Some(self.remove_node(node))
    }

    /// Remove and return the smallest entry
    pub fn pop_first(&mut self) -> Option<(K, V)> {
        let node = minimum(&self.heap, self.root?);
        Some(self.remove_node(node))
    }

    /// Remove and return the largest entry
    pub fn pop_last(&mut self) -> Option<(K, V)> {
        let node = maximum(&self.heap, self.root?);
        Some(self.remove_node(node))
    }

    /// Remove every entry
    pub fn clear(&mut self) {
        self.heap.clear();
        self.root = None;
        self.len = 0;
    }

    // ========================================================================
    // Iteration
    // ========================================================================

    /// Iterate in ascending order
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            heap: &self.heap,
            front: self.root.map(|root| minimum(&self.heap, root)),
            back: self.root.map(|root| maximum(&self.heap, root)),
        }
    }

    /// Iterate keys in ascending order
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// Iterate values in key order
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    /// Iterate from the first entry not less than `key`
    ///
    /// # Example
    ///
    /// ```
    /// use nodeheap::OrderedMap;
    ///
    /// let mut map = OrderedMap::with_capacity(4);
    /// for k in [10, 20, 30] {
    ///     map.insert(k, ()).unwrap();
    /// }
    ///
    /// let keys: Vec<_> = map.lower_bound(&15).map(|(k, _)| *k).collect();
    /// assert_eq!(keys, vec![20, 30]);
    /// ```
    pub fn lower_bound(&self, key: &K) -> Iter<'_, K, V> {
        let mut cursor = self.root;
        let mut found = None;
        while let Some(node) = cursor {
            if self.cmp.less(self.key_of(node), key) {
                cursor = self.right(node);
            } else {
                found = Some(node);
                cursor = self.left(node);
            }
        }

        Iter {
            heap: &self.heap,
            front: found,
            back: found.and(self.root.map(|root| maximum(&self.heap, root))),
        }
    }

    /// Cursor positioned on the smallest entry
    pub fn cursor_front_mut(&mut self) -> CursorMut<'_, K, V, C> {
        let current = self.root.map(|root| minimum(&self.heap, root));
        CursorMut { map: self, current }
    }

    // ========================================================================
    // Tree access
    // ========================================================================

    #[inline]
    fn key_of(&self, node: NodeKey) -> &K {
        &self.heap[node].value.0
    }

    #[inline]
    fn entry(&self, node: NodeKey) -> (&K, &V) {
        let (key, value) = &self.heap[node].value;
        (key, value)
    }

    #[inline]
    fn parent(&self, node: NodeKey) -> Option<NodeKey> {
        self.heap[node].links.parent
    }

    #[inline]
    fn left(&self, node: NodeKey) -> Option<NodeKey> {
        self.heap[node].links.left
    }

    #[inline]
    fn right(&self, node: NodeKey) -> Option<NodeKey> {
        self.heap[node].links.right
    }

    /// Leaves (`None`) are black
    #[inline]
    fn is_red(&self, node: Option<NodeKey>) -> bool {
        node.is_some_and(|node| self.heap[node].links.color == Color::Red)
    }

    #[inline]
    fn set_color(&mut self, node: Option<NodeKey>, color: Color) {
        if let Some(node) = node {
            self.heap[node].links.color = color;
        }
    }

    fn find(&self, key: &K) -> Option<NodeKey> {
        match self.probe(key) {
            Probe::Found(node) => Some(node),
            Probe::Vacant { .. } => None,
        }
    }

    fn probe(&self, key: &K) -> Probe {
        let mut parent = None;
        let mut left = false;
        let mut cursor = self.root;

        while let Some(node) = cursor {
            let node_key = self.key_of(node);
            parent = Some(node);
            if self.cmp.less(key, node_key) {
                left = true;
                cursor = self.left(node);
            } else if self.cmp.less(node_key, key) {
                left = false;
                cursor = self.right(node);
            } else {
                return Probe::Found(node);
            }
        }

        Probe::Vacant { parent, left }
    }

    // ========================================================================
    // Insertion and rebalancing
    // ========================================================================

    /// Allocate a node for `entry` and hang it under `parent`.
    fn attach(
        &mut self,
        entry: (K, V),
        parent: Option<NodeKey>,
        left: bool,
    ) -> Result<NodeKey, AllocError<(K, V)>> {
        let node = self
            .heap
            .allocate(Node::new(entry))
            .map_err(|err| err.map(Node::into_value))?;
        debug_assert!(self.heap[node].is_unlinked());

        self.heap[node].links.parent = parent;
        match parent {
            None => self.root = Some(node),
            Some(p) if left => self.heap[p].links.left = Some(node),
            Some(p) => self.heap[p].links.right = Some(node),
        }

        self.insert_fixup(node);
        self.len += 1;
        Ok(node)
    }

    /// Point `parent`'s link to `old` (or the root) at `new`.
    fn replace_child(&mut self, parent: Option<NodeKey>, old: NodeKey, new: Option<NodeKey>) {
        match parent {
            None => self.root = new,
            Some(p) if self.left(p) == Some(old) => self.heap[p].links.left = new,
            Some(p) => self.heap[p].links.right = new,
        }
    }

    fn rotate_left(&mut self, x: NodeKey) {
        let Some(y) = self.right(x) else {
            return;
        };
        let y_left = self.left(y);

        self.heap[x].links.right = y_left;
        if let Some(yl) = y_left {
            self.heap[yl].links.parent = Some(x);
        }

        let x_parent = self.parent(x);
        self.heap[y].links.parent = x_parent;
        self.replace_child(x_parent, x, Some(y));

        self.heap[y].links.left = Some(x);
        self.heap[x].links.parent = Some(y);
    }

    fn rotate_right(&mut self, x: NodeKey) {
        let Some(y) = self.left(x) else {
            return;
        };
        let y_right = self.right(y);

        self.heap[x].links.left = y_right;
        if let Some(yr) = y_right {
            self.heap[yr].links.parent = Some(x);
        }

        let x_parent = self.parent(x);
        self.heap[y].links.parent = x_parent;
        self.replace_child(x_parent, x, Some(y));

        self.heap[y].links.right = Some(x);
        self.heap[x].links.parent = Some(y);
    }

    fn insert_fixup(&mut self, mut z: NodeKey) {
        while let Some(mut p) = self.parent(z) {
            if !self.is_red(Some(p)) {
                break;
            }
            // A red parent is never the root
            let Some(g) = self.parent(p) else {
                break;
            };

            if self.left(g) == Some(p) {
                let uncle = self.right(g);
                if self.is_red(uncle) {
                    self.set_color(Some(p), Color::Black);
                    self.set_color(uncle, Color::Black);
                    self.set_color(Some(g), Color::Red);
                    z = g;
                    continue;
                }
                if self.right(p) == Some(z) {
                    self.rotate_left(p);
                    mem::swap(&mut z, &mut p);
                }
                self.set_color(Some(p), Color::Black);
                self.set_color(Some(g), Color::Red);
                self.rotate_right(g);
            } else {
                let uncle = self.left(g);
                if self.is_red(uncle) {
                    self.set_color(Some(p), Color::Black);
                    self.set_color(uncle, Color::Black);
                    self.set_color(Some(g), Color::Red);
                    z = g;
                    continue;
                }
                if self.left(p) == Some(z) {
                    self.rotate_right(p);
                    mem::swap(&mut z, &mut p);
                }
                self.set_color(Some(p), Color::Black);
                self.set_color(Some(g), Color::Red);
                self.rotate_left(g);
            }
        }

        let root = self.root;
        self.set_color(root, Color::Black);
    }

    // ========================================================================
    // Removal and rebalancing
    // ========================================================================

    /// Put subtree `v` where `u` hangs.
    fn transplant(&mut self, u: NodeKey, v: Option<NodeKey>) {
        let u_parent = self.parent(u);
        self.replace_child(u_parent, u, v);
        if let Some(v) = v {
            self.heap[v].links.parent = u_parent;
        }
    }

    fn remove_node(&mut self, z: NodeKey) -> (K, V) {
        let z_left = self.left(z);
        let z_right = self.right(z);
        let mut removed_color = self.heap[z].links.color;

        // `x` takes the removed position; it may be a leaf, so track its parent
        let (x, x_parent) = match (z_left, z_right) {
            (None, _) => {
                let x_parent = self.parent(z);
                self.transplant(z, z_right);
                (z_right, x_parent)
            }
            (_, None) => {
                let x_parent = self.parent(z);
                self.transplant(z, z_left);
                (z_left, x_parent)
            }
            (Some(zl), Some(zr)) => {
                // Successor takes z's place
                let y = minimum(&self.heap, zr);
                removed_color = self.heap[y].links.color;
                let x = self.right(y);

                let x_parent = if self.parent(y) == Some(z) {
                    Some(y)
                } else {
                    let y_parent = self.parent(y);
                    self.transplant(y, x);
                    self.heap[y].links.right = Some(zr);
                    self.heap[zr].links.parent = Some(y);
                    y_parent
                };

                self.transplant(z, Some(y));
                self.heap[y].links.left = Some(zl);
                self.heap[zl].links.parent = Some(y);
                let z_color = self.heap[z].links.color;
                self.heap[y].links.color = z_color;

                (x, x_parent)
            }
        };

        if removed_color == Color::Black {
            self.remove_fixup(x, x_parent);
        }

        self.len -= 1;
        self.heap.deallocate(z).into_value()
    }

    fn remove_fixup(&mut self, mut x: Option<NodeKey>, mut parent: Option<NodeKey>) {
        while x != self.root && !self.is_red(x) {
            let Some(p) = parent else {
                break;
            };

            if x == self.left(p) {
                let mut w = self.right(p);
                if self.is_red(w) {
                    self.set_color(w, Color::Black);
                    self.set_color(Some(p), Color::Red);
                    self.rotate_left(p);
                    w = self.right(p);
                }
                // A doubly-black position always has a sibling
                let Some(mut s) = w else {
                    x = Some(p);
                    parent = self.parent(p);
                    continue;
                };

                if !self.is_red(self.left(s)) && !self.is_red(self.right(s)) {
                    self.set_color(Some(s), Color::Red);
                    x = Some(p);
                    parent = self.parent(p);
                } else {
                    if !self.is_red(self.right(s)) {
                        let s_left = self.left(s);
                        self.set_color(s_left, Color::Black);
                        self.set_color(Some(s), Color::Red);
                        self.rotate_right(s);
                        match self.right(p) {
                            Some(sibling) => s = sibling,
                            None => break,
                        }
                    }
                    let p_color = self.heap[p].links.color;
                    self.heap[s].links.color = p_color;
                    self.set_color(Some(p), Color::Black);
                    let s_right = self.right(s);
                    self.set_color(s_right, Color::Black);
                    self.rotate_left(p);
                    x = self.root;
                    break;
                }
            } else {
                let mut w = self.left(p);
                if self.is_red(w) {
                    self.set_color(w, Color::Black);
                    self.set_color(Some(p), Color::Red);
                    self.rotate_right(p);
                    w = self.left(p);
                }
                let Some(mut s) = w else {
                    x = Some(p);
                    parent = self.parent(p);
                    continue;
                };

                if !self.is_red(self.left(s)) && !self.is_red(self.right(s)) {
                    self.set_color(Some(s), Color::Red);
                    x = Some(p);
                    parent = self.parent(p);
                } else {
                    if !self.is_red(self.left(s)) {
                        let s_right = self.right(s);
                        self.set_color(s_right, Color::Black);
                        self.set_color(Some(s), Color::Red);
                        self.rotate_left(s);
                        match self.left(p) {
                            Some(sibling) => s = sibling,
                            None => break,
                        }
                    }
                    let p_color = self.heap[p].links.color;
                    self.heap[s].links.color = p_color;
                    self.set_color(Some(p), Color::Black);
                    let s_left = self.left(s);
                    self.set_color(s_left, Color::Black);
                    self.rotate_right(p);
                    x = self.root;
                    break;
                }
            }
        }

        self.set_color(x, Color::Black);
    }
}

impl<K: fmt::Debug, V: fmt::Debug, C: Compare<K>> fmt::Debug for OrderedMap<K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<'a, K, V, C: Compare<K>> IntoIterator for &'a OrderedMap<K, V, C> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

// ============================================================================
// Tree navigation
// ============================================================================

fn minimum<K, V>(heap: &MapHeap<K, V>, mut node: NodeKey) -> NodeKey {
    while let Some(left) = heap[node].links.left {
        node = left;
    }
    node
}

fn maximum<K, V>(heap: &MapHeap<K, V>, mut node: NodeKey) -> NodeKey {
    while let Some(right) = heap[node].links.right {
        node = right;
    }
    node
}

fn successor<K, V>(heap: &MapHeap<K, V>, node: NodeKey) -> Option<NodeKey> {
    if let Some(right) = heap[node].links.right {
        return Some(minimum(heap, right));
    }
    let mut child = node;
    let mut parent = heap[node].links.parent;
    while let Some(p) = parent {
        if heap[p].links.left == Some(child) {
            return Some(p);
        }
        child = p;
        parent = heap[p].links.parent;
    }
    None
}

fn predecessor<K, V>(heap: &MapHeap<K, V>, node: NodeKey) -> Option<NodeKey> {
    if let Some(left) = heap[node].links.left {
        return Some(maximum(heap, left));
    }
    let mut child = node;
    let mut parent = heap[node].links.parent;
    while let Some(p) = parent {
        if heap[p].links.right == Some(child) {
            return Some(p);
        }
        child = p;
        parent = heap[p].links.parent;
    }
    None
}

// ============================================================================
// Iterators
// ============================================================================

/// In-order iterator over an [`OrderedMap`].
pub struct Iter<'a, K, V> {
    heap: &'a MapHeap<K, V>,
    front: Option<NodeKey>,
    back: Option<NodeKey>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.front?;

        if self.front == self.back {
            self.front = None;
            self.back = None;
        } else {
            self.front = successor(self.heap, node);
        }

        let (key, value) = &self.heap[node].value;
        Some((key, value))
    }
}

impl<'a, K, V> DoubleEndedIterator for Iter<'a, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let node = self.back?;

        if self.front == self.back {
            self.front = None;
            self.back = None;
        } else {
            self.back = predecessor(self.heap, node);
        }

        let (key, value) = &self.heap[node].value;
        Some((key, value))
    }
}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            heap: self.heap,
            front: self.front,
            back: self.back,
        }
    }
}

/// Keys of an [`OrderedMap`], ascending.
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        self.inner.next().map(|(key, _)| key)
    }
}

impl<'a, K, V> DoubleEndedIterator for Keys<'a, K, V> {
    fn next_back(&mut self) -> Option<&'a K> {
        self.inner.next_back().map(|(key, _)| key)
    }
}

/// Values of an [`OrderedMap`], in key order.
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<&'a V> {
        self.inner.next().map(|(_, value)| value)
    }
}

impl<'a, K, V> DoubleEndedIterator for Values<'a, K, V> {
    fn next_back(&mut self) -> Option<&'a V> {
        self.inner.next_back().map(|(_, value)| value)
    }
}

// ============================================================================
// Cursor
// ============================================================================

/// Mutable position in an [`OrderedMap`].
///
/// Moving past the largest or smallest entry lands on the end position
/// (`key() == None`); moving again wraps to the smallest (forward) or the
/// largest (backward) entry.
pub struct CursorMut<'a, K, V, C> {
    map: &'a mut OrderedMap<K, V, C>,
    current: Option<NodeKey>,
}

impl<K: fmt::Debug, V: fmt::Debug, C: Compare<K>> fmt::Debug for CursorMut<'_, K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CursorMut")
            .field("current", &self.key_value())
            .finish()
    }
}

impl<'a, K, V, C: Compare<K>> CursorMut<'a, K, V, C> {
    /// Key under the cursor
    pub fn key(&self) -> Option<&K> {
        self.current.map(|node| self.map.key_of(node))
    }

    /// Value under the cursor
    pub fn value(&self) -> Option<&V> {
        self.current.map(|node| &self.map.heap[node].value.1)
    }

    /// Key and value under the cursor
    pub fn key_value(&self) -> Option<(&K, &V)> {
        self.current.map(|node| self.map.entry(node))
    }

    /// Value under the cursor (mutable)
    pub fn value_mut(&mut self) -> Option<&mut V> {
        let node = self.current?;
        Some(&mut self.map.heap[node].value.1)
    }

    /// Turn the cursor into a reference to its value
    pub fn into_value_mut(self) -> Option<&'a mut V> {
        let node = self.current?;
        let map = self.map;
        Some(&mut map.heap[node].value.1)
    }

    /// Check if the cursor is on the end position
    pub fn is_end(&self) -> bool {
        self.current.is_none()
    }

    /// Step to the next larger entry
    pub fn move_next(&mut self) {
        self.current = match self.current {
            Some(node) => successor(&self.map.heap, node),
            None => self.map.root.map(|root| minimum(&self.map.heap, root)),
        };
    }

    /// Step to the next smaller entry
    pub fn move_prev(&mut self) {
        self.current = match self.current {
            Some(node) => predecessor(&self.map.heap, node),
            None => self.map.root.map(|root| maximum(&self.map.heap, root)),
        };
    }

    /// Remove the entry under the cursor and move to the next larger one.
    pub fn remove_current(&mut self) -> Option<(K, V)> {
        let node = self.current?;
        // Removal relinks nodes but never moves them between slots
        self.current = successor(&self.map.heap, node);
        Some(self.map.remove_node(node))
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
