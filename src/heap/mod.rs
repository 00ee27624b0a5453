//! Node heaps.
//!
//! ## Components
//!
//! - [`BoundedHeap`]: typed slot allocator, bounded arena or ambient budget
//! - [`AmbientHeap`]: shared byte budget used when no arena is configured
//!
//! ## Allocation Policies
//!
//! | Policy | Backing | Failure |
//! |--------|---------|---------|
//! | Bounded | `Slab` preallocated to `capacity` | `HeapError::Exhausted` |
//! | Ambient | `Slab` grown on demand | `HeapError::AmbientExhausted` |

pub mod ambient;
pub mod bounded;

pub use ambient::AmbientHeap;
pub use bounded::{BoundedHeap, NodeKey};
