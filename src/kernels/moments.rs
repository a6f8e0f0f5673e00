//! Running mean and variance accumulator.
//!
//! Welford's recurrence maintained over a sliding window: the running mean
//! and the running sum of squared deviations (M2) are updated incrementally
//! as samples enter, are replaced, or leave. The ring buffer supplies the
//! value of the departing sample for the replace and delete corrections.
//!
//! Variance is the sample variance (`M2 / (count - 1)`) and is defined as
//! zero for windows holding fewer than two samples. Rounding can drive M2
//! slightly negative on near-constant data, so it is clamped at zero after
//! every update.

use crate::error::{Error, Result};
use crate::kernels::ring_buffer::RingBuffer;
use crate::kernels::WindowAccumulator;
use crate::traits::SeriesElement;

/// Welford mean/variance over the last `k` samples, with left shrink.
#[derive(Debug, Clone)]
pub struct MomentAccumulator<T> {
    ring: RingBuffer<T>,
    mean: T,
    m2: T,
}

impl<T: SeriesElement> MomentAccumulator<T> {
    /// Creates an accumulator for windows of `k` samples.
    ///
    /// # Errors
    ///
    /// Returns `Error::AllocationFailure` if storage cannot be reserved.
    pub fn new(k: usize) -> Result<Self> {
        Ok(Self {
            ring: RingBuffer::new(k)?,
            mean: T::zero(),
            m2: T::zero(),
        })
    }

    /// Number of samples currently held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ring.len()
    }

    /// Whether no samples are held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ring.is_empty()
    }

    /// The mean of the held samples.
    ///
    /// # Errors
    ///
    /// Returns `Error::EmptyAccumulator` if no samples are held.
    pub fn mean(&self) -> Result<T> {
        if self.ring.is_empty() {
            return Err(Error::EmptyAccumulator);
        }
        Ok(self.mean)
    }

    /// The sample variance of the held samples; zero for fewer than two.
    ///
    /// # Errors
    ///
    /// Returns `Error::EmptyAccumulator` if no samples are held.
    pub fn variance(&self) -> Result<T> {
        let n = self.ring.len();
        if n == 0 {
            return Err(Error::EmptyAccumulator);
        }
        if n < 2 {
            return Ok(T::zero());
        }
        Ok(self.m2 / T::from_usize(n - 1)?)
    }

    /// The sample standard deviation of the held samples.
    ///
    /// # Errors
    ///
    /// Returns `Error::EmptyAccumulator` if no samples are held.
    pub fn stddev(&self) -> Result<T> {
        Ok(self.variance()?.sqrt())
    }

    #[inline]
    fn clamp_m2(&mut self) {
        if self.m2 < T::zero() {
            self.m2 = T::zero();
        }
    }
}

impl<T: SeriesElement> WindowAccumulator<T> for MomentAccumulator<T> {
    fn reset(&mut self) {
        self.ring.clear();
        self.mean = T::zero();
        self.m2 = T::zero();
    }

    fn insert(&mut self, x: T) -> Result<()> {
        if let Some(old) = self.ring.insert(x) {
            // full window: replace the departing sample in one step
            let n = T::from_usize(self.ring.len())?;
            let prev_mean = self.mean;
            self.mean = self.mean + (x - old) / n;
            self.m2 = self.m2 + (x - old) * (x - self.mean + old - prev_mean);
        } else {
            let n = T::from_usize(self.ring.len())?;
            let delta = x - self.mean;
            self.mean = self.mean + delta / n;
            self.m2 = self.m2 + delta * (x - self.mean);
        }
        self.clamp_m2();
        Ok(())
    }

    fn delete(&mut self) -> Result<()> {
        let Some(old) = self.ring.pop_oldest() else {
            return Ok(());
        };
        let n = self.ring.len();
        if n == 0 {
            self.mean = T::zero();
            self.m2 = T::zero();
            return Ok(());
        }
        let prev_mean = self.mean;
        self.mean = self.mean + (self.mean - old) / T::from_usize(n)?;
        self.m2 = self.m2 - (old - prev_mean) * (old - self.mean);
        self.clamp_m2();
        Ok(())
    }

    fn supports_delete(&self) -> bool {
        true
    }

    /// Queries the mean; the variance and standard deviation entry points
    /// use [`Variance`] and [`StdDev`] views instead.
    fn query(&mut self) -> Result<T> {
        self.mean()
    }
}

/// View adapter exposing the mean through [`WindowAccumulator::query`].
pub struct Mean<'a, T>(pub &'a mut MomentAccumulator<T>);

impl<T: SeriesElement> WindowAccumulator<T> for Mean<'_, T> {
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
        self.0.mean()
    }
}

/// View adapter exposing the sample variance through
/// [`WindowAccumulator::query`].
pub struct Variance<'a, T>(pub &'a mut MomentAccumulator<T>);

impl<T: SeriesElement> WindowAccumulator<T> for Variance<'_, T> {
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
        self.0.variance()
    }
}

/// View adapter exposing the sample standard deviation through
/// [`WindowAccumulator::query`].
pub struct StdDev<'a, T>(pub &'a mut MomentAccumulator<T>);

impl<T: SeriesElement> WindowAccumulator<T> for StdDev<'_, T> {
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
        self.0.stddev()
    }
}
