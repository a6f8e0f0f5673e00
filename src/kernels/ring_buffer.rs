//! Fixed-capacity circular sample buffer.
//!
//! Several accumulators need the value of the sample leaving the window in
//! order to update their running state incrementally; this buffer keeps the
//! last `k` samples in insertion order and hands back the evicted sample on
//! overwrite.

use crate::error::Result;
use crate::kernels::try_zeroed_vec;
use crate::traits::SeriesElement;

/// A circular buffer holding the most recent `k` samples.
#[derive(Debug, Clone)]
pub struct RingBuffer<T> {
    buf: Vec<T>,
    /// Index of the oldest held sample.
    head: usize,
    count: usize,
}

impl<T: SeriesElement> RingBuffer<T> {
    /// Creates a buffer with capacity for `k` samples.
    ///
    /// # Errors
    ///
    /// Returns `Error::AllocationFailure` if storage cannot be reserved.
    pub fn new(k: usize) -> Result<Self> {
        Ok(Self {
            buf: try_zeroed_vec(k.max(1))?,
            head: 0,
            count: 0,
        })
    }

    /// Appends a sample, returning the evicted oldest sample when full.
    pub fn insert(&mut self, x: T) -> Option<T> {
        let k = self.buf.len();
        if self.count == k {
            let old = std::mem::replace(&mut self.buf[self.head], x);
            self.head = (self.head + 1) % k;
            Some(old)
        } else {
            let tail = (self.head + self.count) % k;
            self.buf[tail] = x;
            self.count += 1;
            None
        }
    }

    /// Removes and returns the oldest held sample.
    pub fn pop_oldest(&mut self) -> Option<T> {
        if self.count == 0 {
            return None;
        }
        let v = self.buf[self.head];
        self.head = (self.head + 1) % self.buf.len();
        self.count -= 1;
        Some(v)
    }

    /// Returns the oldest held sample without removing it.
    #[must_use]
    pub fn peek_oldest(&self) -> Option<T> {
        if self.count == 0 {
            None
        } else {
            Some(self.buf[self.head])
        }
    }

    /// Copies the held samples into `out`, oldest first, returning the count.
    ///
    /// `out` must have room for [`len`](Self::len) samples.
    pub fn copy_to(&self, out: &mut [T]) -> usize {
        let k = self.buf.len();
        for i in 0..self.count {
            out[i] = self.buf[(self.head + i) % k];
        }
        self.count
    }

    /// Number of samples currently held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.count
    }

    /// Whether the buffer holds no samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Whether the buffer holds a full window of samples.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.count == self.buf.len()
    }

    /// The fixed capacity `k`.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Forgets all held samples without deallocating.
    pub fn clear(&mut self) {
        self.head = 0;
        self.count = 0;
    }
}
