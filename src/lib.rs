//! # nodeheap
//!
//! Node containers with bounded, preallocated storage.
//!
//! ## Architecture
//!
//! - **Heap**: typed slot allocator, either a fixed arena or a shared ambient budget
//! - **List**: circular doubly-linked list of heap nodes
//! - **OrderedMap**: red-black tree of heap nodes, ordered by a comparator
//! - **RingBuffer**: fixed-capacity FIFO with inline storage
//!
//! ## Design Principles
//!
//! 1. **Bounded**: a container configured with a capacity never grows past it
//! 2. **No Silent Failure**: every insert returns the value back when storage runs out
//! 3. **No Pointer Arithmetic**: nodes link by slot key, never by address
//! 4. **Single Owner**: containers are not synchronized; the ambient budget is
//!
//! ## Example
//!
//! ```
//! use nodeheap::List;
//!
//! let mut list = List::with_capacity(4);
//! for v in [1, 2, 3] {
//!     list.push_back(v).unwrap();
//! }
//!
//! assert_eq!(list.pop_front(), Some(1));
//! assert_eq!(list.len(), 2);
//! assert_eq!(list.front(), Some(&2));
//! assert_eq!(list.back(), Some(&3));
//! ```

// ============================================================================
// Module declarations
// ============================================================================

/// Allocation errors
pub mod error;

/// Heap policy selection
pub mod config;

/// Node heaps: bounded arena and ambient budget
pub mod heap;

/// Node records and link layouts
mod node;

/// Circular linked list
pub mod list;

/// Ordered map (red-black tree)
pub mod map;

/// Fixed-capacity ring buffer
pub mod ring;

// ============================================================================
// Re-exports for convenience
// ============================================================================

pub use config::HeapConfig;
pub use error::{AllocError, HeapError};
pub use heap::{AmbientHeap, BoundedHeap, NodeKey};
pub use list::List;
pub use map::{Compare, Natural, OrderedMap};
pub use ring::RingBuffer;
