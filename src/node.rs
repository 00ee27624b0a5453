//! Node records stored in a container's heap.
//!
//! ## Design
//!
//! A `Node` wraps a stored value with the link fields its container needs.
//! Links are heap keys (`NodeKey`), not pointers, so splicing is O(1) and
//! there is no address arithmetic back from a link to its node.
//!
//! | Topology | Links |
//! |----------|-------|
//! | List | `next`, `prev` |
//! | Tree | `parent`, `left`, `right`, `color` |
//!
//! A freshly allocated node has empty links. Links are only meaningful
//! while the node is spliced into its container. Nodes never leave their
//! container; callers only ever see references to the embedded value.

use crate::heap::NodeKey;

/// Link fields for a node topology.
pub(crate) trait Links: Default {
    /// Check if no link is set
    fn is_unlinked(&self) -> bool;
}

/// Value plus container links.
#[derive(Debug, Clone)]
pub(crate) struct Node<T, L> {
    /// The stored value
    pub value: T,

    /// Topology links (heap keys)
    pub links: L,
}

impl<T, L: Links> Node<T, L> {
    /// Create a new node (not yet linked)
    #[inline]
    pub fn new(value: T) -> Self {
        Self {
            value,
            links: L::default(),
        }
    }

    /// Check if this node is unlinked (not part of any container)
    #[inline]
    pub fn is_unlinked(&self) -> bool {
        self.links.is_unlinked()
    }

    /// Consume the node, returning its value
    #[inline]
    pub fn into_value(self) -> T {
        self.value
    }
}

// ============================================================================
// List links
// ============================================================================

/// Circular doubly-linked list links.
///
/// In a list of one, both links point at the node itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct ListLinks {
    /// Next node (wraps from the tail to the head)
    pub next: Option<NodeKey>,

    /// Previous node (wraps from the head to the tail)
    pub prev: Option<NodeKey>,
}

impl Links for ListLinks {
    #[inline]
    fn is_unlinked(&self) -> bool {
        self.next.is_none() && self.prev.is_none()
    }
}

pub(crate) type ListNode<T> = Node<T, ListLinks>;

// ============================================================================
// Tree links
// ============================================================================

/// Red-black node color.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) enum Color {
    /// New nodes are inserted red
    #[default]
    Red,
    Black,
}

/// Red-black tree links. `None` children are black leaves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct TreeLinks {
    pub parent: Option<NodeKey>,
    pub left: Option<NodeKey>,
    pub right: Option<NodeKey>,
    pub color: Color,
}

impl Links for TreeLinks {
    #[inline]
    fn is_unlinked(&self) -> bool {
        self.parent.is_none() && self.left.is_none() && self.right.is_none()
    }
}

pub(crate) type TreeNode<K, V> = Node<(K, V), TreeLinks>;

// ============================================================================
// Unit Tests
// ============================================================================
