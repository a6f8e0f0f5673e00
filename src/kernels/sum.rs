//! Running sum accumulator.
//!
//! Keeps the sum of the last `k` samples incrementally: inserting into a
//! full window adds the new sample and subtracts the departing one, so each
//! update is O(1) regardless of window length.

use crate::error::{Error, Result};
use crate::kernels::ring_buffer::RingBuffer;
use crate::kernels::WindowAccumulator;
use crate::traits::SeriesElement;

/// Incremental sum over the last `k` samples, with left shrink.
#[derive(Debug, Clone)]
pub struct SumAccumulator<T> {
    ring: RingBuffer<T>,
    sum: T,
}

impl<T: SeriesElement> SumAccumulator<T> {
    /// Creates an accumulator for windows of `k` samples.
    ///
    /// # Errors
    ///
    /// Returns `Error::AllocationFailure` if storage cannot be reserved.
    pub fn new(k: usize) -> Result<Self> {
        Ok(Self {
            ring: RingBuffer::new(k)?,
            sum: T::zero(),
        })
    }

    /// The sum of the held samples.
    ///
    /// # Errors
    ///
    /// Returns `Error::EmptyAccumulator` if no samples are held.
    pub fn sum(&self) -> Result<T> {
        if self.ring.is_empty() {
            return Err(Error::EmptyAccumulator);
        }
        Ok(self.sum)
    }
}

impl<T: SeriesElement> WindowAccumulator<T> for SumAccumulator<T> {
    fn reset(&mut self) {
        self.ring.clear();
        self.sum = T::zero();
    }

    fn insert(&mut self, x: T) -> Result<()> {
        if let Some(old) = self.ring.insert(x) {
            self.sum = self.sum + x - old;
        } else {
            self.sum = self.sum + x;
        }
        Ok(())
    }

    fn delete(&mut self) -> Result<()> {
        if let Some(old) = self.ring.pop_oldest() {
            self.sum = self.sum - old;
        }
        Ok(())
    }

    fn supports_delete(&self) -> bool {
        true
    }

    fn query(&mut self) -> Result<T> {
        self.sum()
    }
}
