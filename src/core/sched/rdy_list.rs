//! Ready queue - FIFO of slot indices waiting for the dispatcher
//!
//! Indices are handed in by the tick handler and by registration, and
//! drained one at a time by the worker context. The owner guarantees at
//! most one entry per slot, so a queue sized to the registry never fills.

/// Ready queue for up to `N` task slots
#[derive(Debug)]
pub struct ReadyQueue<const N: usize> {
    buf: [usize; N],
    head: usize,
    len: usize,
}

impl<const N: usize> ReadyQueue<N> {
    /// Create a new empty queue
    pub const fn new() -> Self {
        ReadyQueue {
            buf: [0; N],
            head: 0,
            len: 0,
        }
    }

    /// Append a slot index at the tail.
    ///
    /// Gives the index back if the queue is full.
    pub fn push(&mut self, idx: usize) -> Result<(), usize> {
        if self.len >= N {
            return Err(idx);
        }
        let tail = (self.head + self.len) % N;
        self.buf[tail] = idx;
        self.len += 1;
        Ok(())
    }

    /// Take the slot index at the head
    pub fn pop(&mut self) -> Option<usize> {
        if self.len == 0 {
            return None;
        }
        let idx = self.buf[self.head];
        self.head = (self.head + 1) % N;
        self.len -= 1;
        Some(idx)
    }

    /// Check if queue is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    pub const fn capacity(&self) -> usize {
        N
    }
}

impl<const N: usize> Default for ReadyQueue<N> {
    fn default() -> Self {
        Self::new()
    }
}
