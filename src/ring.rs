//! Fixed-capacity FIFO ring buffer.
//!
//! Storage is an inline array of `N` slots; pushing never allocates.
//! A full buffer refuses new entries instead of overwriting the oldest.

use std::fmt;

/// FIFO queue of at most `N` entries.
///
/// # Example
///
/// ```
/// use nodeheap::RingBuffer;
///
/// let mut ring: RingBuffer<u32, 2> = RingBuffer::new();
/// ring.push(1).unwrap();
/// ring.push(2).unwrap();
/// assert_eq!(ring.push(3), Err(3));
///
/// assert_eq!(ring.pop(), Some(1));
/// assert_eq!(ring.peek(), Some(&2));
/// ```
pub struct RingBuffer<T, const N: usize> {
    slots: [Option<T>; N],

    /// Index of the oldest entry
    read: usize,

    /// Number of filled slots
    len: usize,
}

impl<T, const N: usize> RingBuffer<T, N> {
    /// Create an empty buffer
    pub fn new() -> Self {
        Self {
            slots: std::array::from_fn(|_| None),
            read: 0,
            len: 0,
        }
    }

    /// Maximum number of entries
    #[inline]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Number of entries
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Number of free slots
    #[inline]
    pub fn free_space(&self) -> usize {
        N - self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.len == N
    }

    /// Append at the write end.
    ///
    /// Returns the value back if the buffer is full.
    pub fn push(&mut self, value: T) -> Result<(), T> {
        if self.is_full() {
            log::trace!("ring buffer full ({} slots)", N);
            return Err(value);
        }

        let write = (self.read + self.len) % N;
        self.slots[write] = Some(value);
        self.len += 1;
        Ok(())
    }

    /// Remove the entry at the read end
    pub fn pop(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }

        let value = self.slots[self.read].take();
        self.read = (self.read + 1) % N;
        self.len -= 1;
        value
    }

    /// Drop the entry at the read end. Returns `false` when empty.
    pub fn discard(&mut self) -> bool {
        self.pop().is_some()
    }

    /// Entry at the read end, without removal
    pub fn peek(&self) -> Option<&T> {
        if self.is_empty() {
            return None;
        }
        self.slots[self.read].as_ref()
    }

    /// Copy of the entry at the read end
    pub fn peek_cloned(&self) -> Option<T>
    where
        T: Clone,
    {
        self.peek().cloned()
    }

    /// Drop every entry and rewind the cursors
    pub fn reset(&mut self) {
        for slot in &mut self.slots {
            *slot = None;
        }
        self.read = 0;
        self.len = 0;
    }

    /// Iterate from the read end to the write end
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        (0..self.len).filter_map(move |i| self.slots[(self.read + i) % N].as_ref())
    }
}

impl<T, const N: usize> Default for RingBuffer<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug, const N: usize> fmt::Debug for RingBuffer<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ring_new() {
        let ring: RingBuffer<u8, 4> = RingBuffer::new();

        assert!(ring.is_empty());
        assert!(!ring.is_full());
        assert_eq!(ring.capacity(), 4);
        assert_eq!(ring.free_space(), 4);
        assert_eq!(ring.peek(), None);
    }

    #[test]
    fn test_ring_fifo_order() {
        let mut ring: RingBuffer<u32, 3> = RingBuffer::new();
        for v in 1..=3 {
            ring.push(v).unwrap();
        }

        assert!(ring.is_full());
        assert_eq!(ring.pop(), Some(1));
        assert_eq!(ring.pop(), Some(2));
        assert_eq!(ring.pop(), Some(3));
        assert_eq!(ring.pop(), None);
    }

    #[test]
    fn test_ring_full_returns_value() {
        let mut ring: RingBuffer<String, 1> = RingBuffer::new();
        ring.push("a".to_string()).unwrap();

        assert_eq!(ring.push("b".to_string()), Err("b".to_string()));
        assert_eq!(ring.len(), 1);
        assert_eq!(ring.peek().map(String::as_str), Some("a"));
    }

    #[test]
    fn test_ring_wraps_around() {
        let mut ring: RingBuffer<u32, 3> = RingBuffer::new();
        let mut next = 0;
        let mut expected = 0;

        for _ in 0..10 {
            while ring.push(next).is_ok() {
                next += 1;
            }
            assert_eq!(ring.pop(), Some(expected));
            assert_eq!(ring.pop(), Some(expected + 1));
            expected += 2;
        }

        let rest: Vec<_> = ring.iter().copied().collect();
        assert_eq!(rest, vec![expected]);
        assert_eq!(format!("{:?}", ring), format!("[{}]", expected));
    }

    #[test]
    fn test_ring_peek_and_discard() {
        let mut ring: RingBuffer<u32, 2> = RingBuffer::new();
        ring.push(7).unwrap();
        ring.push(8).unwrap();

        assert_eq!(ring.peek_cloned(), Some(7));
        assert_eq!(ring.len(), 2);

        assert!(ring.discard());
        assert_eq!(ring.peek(), Some(&8));
        assert!(ring.discard());
        assert!(!ring.discard());
    }

    #[test]
    fn test_ring_reset() {
        let mut ring: RingBuffer<u32, 2> = RingBuffer::new();
        ring.push(1).unwrap();
        ring.pop();
        ring.push(2).unwrap();
        ring.reset();

        assert!(ring.is_empty());
        assert_eq!(ring.free_space(), 2);
        ring.push(3).unwrap();
        assert_eq!(ring.pop(), Some(3));
    }
}
