//! Robust scale estimators.
//!
//! Order-statistic scale measures computed per window from a snapshot of the
//! ring-buffer contents:
//!
//! - `S_n`: `med_j { med_k |x_j - x_k| }`, the median over samples of each
//!   sample's median absolute difference to the rest of the window;
//! - quantile range: `Q(1 - q) - Q(q)` for a caller-chosen `q` in
//!   `[0, 0.5]`, with linearly interpolated quantiles (`q = 0.25` gives the
//!   interquartile range).
//!
//! Both estimators sort scratch copies at query time, so a query costs
//! O(k log k) (O(k^2 log k) for `S_n`); inserts and deletes are O(1) ring
//! operations. Because they shrink cheaply from the left, the driver can use
//! its incremental path for truncated right edges.

use crate::error::{Error, Result};
use crate::kernels::ring_buffer::RingBuffer;
use crate::kernels::{try_zeroed_vec, WindowAccumulator};
use crate::traits::SeriesElement;

/// Scale factor mapping a raw MAD to a consistent estimate of the standard
/// deviation of normally distributed data, `1 / Phi^{-1}(3/4)`.
pub const MAD_NORMAL_SCALE: f64 = 1.482_602_218_505_601_8;

/// Sorts samples by value, treating incomparable (NaN) pairs as equal.
pub(crate) fn sort_values<T: SeriesElement>(v: &mut [T]) {
    v.sort_unstable_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
}

/// The median of an already-sorted slice; the mean of the two middle samples
/// for an even length.
///
/// # Errors
///
/// Returns `Error::EmptyAccumulator` for an empty slice.
pub(crate) fn median_of_sorted<T: SeriesElement>(sorted: &[T]) -> Result<T> {
    let n = sorted.len();
    if n == 0 {
        return Err(Error::EmptyAccumulator);
    }
    if n % 2 == 1 {
        Ok(sorted[n / 2])
    } else {
        Ok((sorted[n / 2 - 1] + sorted[n / 2]) / T::two())
    }
}

/// The `q`-quantile of an already-sorted slice, linearly interpolated
/// between the neighboring order statistics.
///
/// # Errors
///
/// Returns `Error::EmptyAccumulator` for an empty slice.
pub(crate) fn quantile_of_sorted<T: SeriesElement>(sorted: &[T], q: f64) -> Result<T> {
    let n = sorted.len();
    if n == 0 {
        return Err(Error::EmptyAccumulator);
    }
    let pos = q * (n - 1) as f64;
    let lhs = pos.floor() as usize;
    if lhs >= n - 1 {
        return Ok(sorted[n - 1]);
    }
    let delta = T::from_f64(pos - lhs as f64)?;
    Ok((T::one() - delta) * sorted[lhs] + delta * sorted[lhs + 1])
}

/// `S_n` robust scale over the last `k` samples.
#[derive(Debug, Clone)]
pub struct SnAccumulator<T> {
    ring: RingBuffer<T>,
    window: Vec<T>,
    /// Absolute differences of one sample to the rest of the window.
    diffs: Vec<T>,
    /// Per-sample inner medians.
    inner: Vec<T>,
}

impl<T: SeriesElement> SnAccumulator<T> {
    /// Creates an accumulator for windows of `k` samples.
    ///
    /// # Errors
    ///
    /// Returns `Error::AllocationFailure` if storage cannot be reserved.
    pub fn new(k: usize) -> Result<Self> {
        let k = k.max(1);
        Ok(Self {
            ring: RingBuffer::new(k)?,
            window: try_zeroed_vec(k)?,
            diffs: try_zeroed_vec(k)?,
            inner: try_zeroed_vec(k)?,
        })
    }
}

impl<T: SeriesElement> WindowAccumulator<T> for SnAccumulator<T> {
    fn reset(&mut self) {
        self.ring.clear();
    }

    fn insert(&mut self, x: T) -> Result<()> {
        self.ring.insert(x);
        Ok(())
    }

    fn delete(&mut self) -> Result<()> {
        self.ring.pop_oldest();
        Ok(())
    }

    fn supports_delete(&self) -> bool {
        true
    }

    fn query(&mut self) -> Result<T> {
        let n = self.ring.copy_to(&mut self.window);
        if n == 0 {
            return Err(Error::EmptyAccumulator);
        }
        for j in 0..n {
            let xj = self.window[j];
            for k in 0..n {
                self.diffs[k] = (xj - self.window[k]).abs();
            }
            sort_values(&mut self.diffs[..n]);
            self.inner[j] = median_of_sorted(&self.diffs[..n])?;
        }
        sort_values(&mut self.inner[..n]);
        median_of_sorted(&self.inner[..n])
    }
}

/// Quantile-range robust scale over the last `k` samples.
///
/// The quantile parameter is set per pass with
/// [`set_quantile`](Self::set_quantile).
#[derive(Debug, Clone)]
pub struct QuantileRangeAccumulator<T> {
    ring: RingBuffer<T>,
    window: Vec<T>,
    q: f64,
}

impl<T: SeriesElement> QuantileRangeAccumulator<T> {
    /// Creates an accumulator for windows of `k` samples with `q = 0.25`.
    ///
    /// # Errors
    ///
    /// Returns `Error::AllocationFailure` if storage cannot be reserved.
    pub fn new(k: usize) -> Result<Self> {
        let k = k.max(1);
        Ok(Self {
            ring: RingBuffer::new(k)?,
            window: try_zeroed_vec(k)?,
            q: 0.25,
        })
    }

    /// Sets the lower quantile; the range reported is `Q(1-q) - Q(q)`.
    pub fn set_quantile(&mut self, q: f64) {
        self.q = q;
    }
}

impl<T: SeriesElement> WindowAccumulator<T> for QuantileRangeAccumulator<T> {
    fn reset(&mut self) {
        self.ring.clear();
    }

    fn insert(&mut self, x: T) -> Result<()> {
        self.ring.insert(x);
        Ok(())
    }

    fn delete(&mut self) -> Result<()> {
        self.ring.pop_oldest();
        Ok(())
    }

    fn supports_delete(&self) -> bool {
        true
    }

    fn query(&mut self) -> Result<T> {
        let n = self.ring.copy_to(&mut self.window);
        if n == 0 {
            return Err(Error::EmptyAccumulator);
        }
        sort_values(&mut self.window[..n]);
        let lo = quantile_of_sorted(&self.window[..n], self.q)?;
        let hi = quantile_of_sorted(&self.window[..n], 1.0 - self.q)?;
        Ok(hi - lo)
    }
}
