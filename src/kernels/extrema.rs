//! Running min/max accumulator.
//!
//! Tracks both extrema of the last `k` samples in amortized O(1) per insert
//! using a pair of monotonic deques of sample positions: the max-deque keeps
//! positions of strictly decreasing samples, the min-deque strictly
//! increasing ones, so the current extremum is always at the front. A sample
//! dominated by a newer one can never become an extremum again and is dropped
//! from the back as the newer sample arrives.
//!
//! Positions are logical (monotonically increasing insert counters); the
//! sample value for a position lives at `position % k` in the circular value
//! store. Unlike the median kernel this one can also shrink from the left,
//! which the driver uses for truncated right edges.

use std::collections::VecDeque;

use crate::error::{Error, Result};
use crate::kernels::{try_zeroed_vec, WindowAccumulator};
use crate::traits::SeriesElement;

/// Monotonic-deque min/max over the last `k` samples.
#[derive(Debug, Clone)]
pub struct MinMaxAccumulator<T> {
    k: usize,
    /// Logical position of the next inserted sample.
    head: usize,
    /// Number of live samples, at most `k`.
    count: usize,
    values: Vec<T>,
    /// Positions of strictly decreasing samples; front is the maximum.
    max_pos: VecDeque<usize>,
    /// Positions of strictly increasing samples; front is the minimum.
    min_pos: VecDeque<usize>,
}

impl<T: SeriesElement> MinMaxAccumulator<T> {
    /// Creates an accumulator for windows of `k` samples.
    ///
    /// # Errors
    ///
    /// Returns `Error::AllocationFailure` if storage cannot be reserved.
    pub fn new(k: usize) -> Result<Self> {
        let k = k.max(1);
        let mut max_pos = VecDeque::new();
        max_pos
            .try_reserve(k)
            .map_err(|_| Error::AllocationFailure)?;
        let mut min_pos = VecDeque::new();
        min_pos
            .try_reserve(k)
            .map_err(|_| Error::AllocationFailure)?;
        Ok(Self {
            k,
            head: 0,
            count: 0,
            values: try_zeroed_vec(k)?,
            max_pos,
            min_pos,
        })
    }

    #[inline]
    fn value_at(&self, pos: usize) -> T {
        self.values[pos % self.k]
    }

    /// Drops the oldest live sample from both deques.
    fn evict_oldest(&mut self) {
        let oldest = self.head - self.count;
        if self.max_pos.front() == Some(&oldest) {
            self.max_pos.pop_front();
        }
        if self.min_pos.front() == Some(&oldest) {
            self.min_pos.pop_front();
        }
        self.count -= 1;
    }

    /// The maximum of the held samples.
    ///
    /// # Errors
    ///
    /// Returns `Error::EmptyAccumulator` if no samples are held.
    pub fn max(&self) -> Result<T> {
        self.max_pos
            .front()
            .map(|&p| self.value_at(p))
            .ok_or(Error::EmptyAccumulator)
    }

    /// The minimum of the held samples.
    ///
    /// # Errors
    ///
    /// Returns `Error::EmptyAccumulator` if no samples are held.
    pub fn min(&self) -> Result<T> {
        self.min_pos
            .front()
            .map(|&p| self.value_at(p))
            .ok_or(Error::EmptyAccumulator)
    }

    /// Both extrema of the held samples, as `(min, max)`.
    ///
    /// # Errors
    ///
    /// Returns `Error::EmptyAccumulator` if no samples are held.
    pub fn minmax(&self) -> Result<(T, T)> {
        Ok((self.min()?, self.max()?))
    }
}

impl<T: SeriesElement> WindowAccumulator<T> for MinMaxAccumulator<T> {
    fn reset(&mut self) {
        self.head = 0;
        self.count = 0;
        self.max_pos.clear();
        self.min_pos.clear();
    }

    fn insert(&mut self, x: T) -> Result<()> {
        if self.count == self.k {
            self.evict_oldest();
        }

        while let Some(&p) = self.max_pos.back() {
            if self.value_at(p) <= x {
                self.max_pos.pop_back();
            } else {
                break;
            }
        }
        while let Some(&p) = self.min_pos.back() {
            if self.value_at(p) >= x {
                self.min_pos.pop_back();
            } else {
                break;
            }
        }

        self.values[self.head % self.k] = x;
        self.max_pos.push_back(self.head);
        self.min_pos.push_back(self.head);
        self.head += 1;
        self.count += 1;

        Ok(())
    }

    fn delete(&mut self) -> Result<()> {
        if self.count > 0 {
            self.evict_oldest();
        }
        Ok(())
    }

    fn supports_delete(&self) -> bool {
        true
    }

    /// Queries the maximum; the min/max entry points use
    /// [`min`](Self::min)/[`max`](Self::max) views instead.
    fn query(&mut self) -> Result<T> {
        self.max()
    }
}

/// View adapter exposing the minimum through [`WindowAccumulator::query`].
pub struct Min<'a, T>(pub &'a mut MinMaxAccumulator<T>);

impl<T: SeriesElement> WindowAccumulator<T> for Min<'_, T> {
    fn reset(&mut self) {
        self.0.reset();
    }

    fn insert(&mut self, x: T) -> Result<()> {
        self.0.insert(x)
    }

    fn delete(&mut self) -> Result<()> {
        self.0.delete()
    }

    fn supports_delete(&self) -> bool {
        true
    }

    fn query(&mut self) -> Result<T> {
        self.0.min()
    }
}

/// View adapter exposing the maximum through [`WindowAccumulator::query`].
pub struct Max<'a, T>(pub &'a mut MinMaxAccumulator<T>);

impl<T: SeriesElement> WindowAccumulator<T> for Max<'_, T> {
    fn reset(&mut self) {
        self.0.reset();
    }

    fn insert(&mut self, x: T) -> Result<()> {
        self.0.insert(x)
    }

    fn delete(&mut self) -> Result<()> {
        self.0.delete()
    }

    fn supports_delete(&self) -> bool {
        true
    }

    fn query(&mut self) -> Result<T> {
        self.0.max()
    }
}
