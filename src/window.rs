//! Window geometry, boundary policies, and the streaming driver.
//!
//! A moving window around sample `i` covers positions `i - H ..= i + J` for
//! a window of `K = H + J + 1` samples. Near the data edges part of that
//! range falls outside the input; the [`Boundary`] policy decides what
//! happens there.
//!
//! The driver streams the input through an accumulator exactly once: after
//! inserting sample `i` the accumulator holds the window centered on
//! `i - J`, so output `i - J` is written immediately. This single-pass
//! discipline is what makes in-place operation safe: position `i - J` has
//! already been consumed (and, for the truncated right edge, stashed in the
//! workspace scratch) by the time it is overwritten.

use crate::error::{Error, Result};
use crate::kernels::extrema::MinMaxAccumulator;
use crate::kernels::mediator::MedianAccumulator;
use crate::kernels::moments::MomentAccumulator;
use crate::kernels::scale::{QuantileRangeAccumulator, SnAccumulator};
use crate::kernels::sum::SumAccumulator;
use crate::kernels::{try_zeroed_vec, WindowAccumulator};
use crate::traits::SeriesElement;

/// How windows behave where they overhang the ends of the data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    /// Positions outside the data contribute zero-valued samples; every
    /// window holds exactly `K` samples.
    PadZero,
    /// Positions outside the data contribute the nearest edge sample
    /// (`x[0]` on the left, `x[n-1]` on the right); every window holds
    /// exactly `K` samples.
    PadEdgeValue,
    /// Windows shrink to the available samples; edge windows hold fewer
    /// than `K` samples.
    Truncate,
}

/// Reusable state for moving-window passes with a fixed geometry.
///
/// A workspace allocates all accumulator and scratch storage once for a
/// window shape `(H, J)` and is reused across passes; every entry point
/// resets the state it touches before streaming.
///
/// # Example
///
/// ```
/// use rollstat::{moving_median, Boundary, Workspace};
///
/// let x = [-1.0, 5.7, 3.4, 1.1, 9.5, -23.7, -5.6, 0.2];
/// let mut y = [0.0_f64; 8];
/// let mut w = Workspace::new(3).unwrap();
///
/// moving_median(Boundary::PadZero, &x, &mut y, &mut w).unwrap();
/// assert_eq!(y, [0.0, 3.4, 3.4, 3.4, 1.1, -5.6, -5.6, 0.0]);
/// ```
#[derive(Debug)]
pub struct Workspace<T: SeriesElement> {
    pub(crate) h: usize,
    pub(crate) j: usize,
    pub(crate) median: MedianAccumulator<T>,
    pub(crate) minmax: MinMaxAccumulator<T>,
    pub(crate) moments: MomentAccumulator<T>,
    pub(crate) sum: SumAccumulator<T>,
    pub(crate) sn: SnAccumulator<T>,
    pub(crate) qrange: QuantileRangeAccumulator<T>,
    /// Linear window scratch for per-window recomputation (MAD pass).
    pub(crate) window: Vec<T>,
    /// Right-edge sample stash for truncated in-place passes.
    pub(crate) work: Vec<T>,
}

impl<T: SeriesElement> Workspace<T> {
    /// Creates a workspace for symmetric windows of `k` samples.
    ///
    /// `H = J = k / 2`, so an even `k` is widened to the next odd length.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidWindow` for `k = 0` and
    /// `Error::AllocationFailure` if storage cannot be reserved.
    pub fn new(k: usize) -> Result<Self> {
        if k == 0 {
            return Err(Error::InvalidWindow {
                reason: "window length must be at least 1",
            });
        }
        Self::with_shape(k / 2, k / 2)
    }

    /// Creates a workspace for windows of `h` samples to the left and `j`
    /// samples to the right of each center sample.
    ///
    /// # Errors
    ///
    /// Returns `Error::AllocationFailure` if storage cannot be reserved.
    pub fn with_shape(h: usize, j: usize) -> Result<Self> {
        let k = h + j + 1;
        let mut work = try_zeroed_vec(k)?;
        work.clear();
        Ok(Self {
            h,
            j,
            median: MedianAccumulator::new(k)?,
            minmax: MinMaxAccumulator::new(k)?,
            moments: MomentAccumulator::new(k)?,
            sum: SumAccumulator::new(k)?,
            sn: SnAccumulator::new(k)?,
            qrange: QuantileRangeAccumulator::new(k)?,
            window: try_zeroed_vec(k)?,
            work,
        })
    }

    /// Samples to the left of the center sample.
    #[must_use]
    pub fn h(&self) -> usize {
        self.h
    }

    /// Samples to the right of the center sample.
    #[must_use]
    pub fn j(&self) -> usize {
        self.j
    }

    /// Total window length `H + J + 1`.
    #[must_use]
    pub fn k(&self) -> usize {
        self.h + self.j + 1
    }
}

/// Streams `data` through `acc` in place, writing each window statistic over
/// the sample it is centered on.
///
/// `work` is scratch for the truncated right edge when the accumulator
/// cannot shrink; its tail samples are stashed before any output is written,
/// which keeps the pass correct when input and output share storage.
pub(crate) fn apply<T, A>(
    boundary: Boundary,
    h: usize,
    j: usize,
    acc: &mut A,
    work: &mut Vec<T>,
    data: &mut [T],
) -> Result<()>
where
    T: SeriesElement,
    A: WindowAccumulator<T>,
{
    let n = data.len();
    if n == 0 {
        return Ok(());
    }

    acc.reset();

    let mut tail_pad = T::zero();
    match boundary {
        Boundary::PadZero | Boundary::PadEdgeValue => {
            let lead_pad = if boundary == Boundary::PadZero {
                T::zero()
            } else {
                data[0]
            };
            if boundary == Boundary::PadEdgeValue {
                tail_pad = data[n - 1];
            }
            for _ in 0..h {
                acc.insert(lead_pad)?;
            }
        }
        Boundary::Truncate => {
            if !acc.supports_delete() {
                // stash the samples the shrinking right-edge windows will
                // need, before the main loop overwrites them
                let start = n.saturating_sub(h + j);
                work.clear();
                work.extend_from_slice(&data[start..]);
            }
        }
    }

    // after inserting sample i the accumulator holds the window centered
    // on i - j
    for i in 0..n {
        let xi = data[i];
        acc.insert(xi)?;
        if i >= j {
            data[i - j] = acc.query()?;
        }
    }

    match boundary {
        Boundary::Truncate => {
            if acc.supports_delete() {
                for i in n.saturating_sub(j)..n {
                    if i > h {
                        acc.delete()?;
                    }
                    data[i] = acc.query()?;
                }
            } else {
                let wsize = work.len();
                for i in n.saturating_sub(j)..n {
                    let nsamp = n - i.saturating_sub(h);
                    acc.reset();
                    for idx in wsize - nsamp..wsize {
                        acc.insert(work[idx])?;
                    }
                    data[i] = acc.query()?;
                }
            }
        }
        Boundary::PadZero | Boundary::PadEdgeValue => {
            for t in 0..j {
                acc.insert(tail_pad)?;
                if n + t >= j {
                    data[n + t - j] = acc.query()?;
                }
            }
        }
    }

    Ok(())
}

/// Two-output variant of [`apply`] for the joint min/max pass.
///
/// The outputs are distinct from the input, so no stash is needed; the
/// extrema accumulator shrinks incrementally at a truncated right edge.
pub(crate) fn apply_minmax<T: SeriesElement>(
    boundary: Boundary,
    h: usize,
    j: usize,
    acc: &mut MinMaxAccumulator<T>,
    x: &[T],
    y_min: &mut [T],
    y_max: &mut [T],
) -> Result<()> {
    let n = x.len();
    if n == 0 {
        return Ok(());
    }

    acc.reset();

    let mut tail_pad = T::zero();
    if boundary != Boundary::Truncate {
        let lead_pad = if boundary == Boundary::PadZero {
            T::zero()
        } else {
            x[0]
        };
        if boundary == Boundary::PadEdgeValue {
            tail_pad = x[n - 1];
        }
        for _ in 0..h {
            acc.insert(lead_pad)?;
        }
    }

    for i in 0..n {
        acc.insert(x[i])?;
        if i >= j {
            let (mn, mx) = acc.minmax()?;
            y_min[i - j] = mn;
            y_max[i - j] = mx;
        }
    }

    if boundary == Boundary::Truncate {
        for i in n.saturating_sub(j)..n {
            if i > h {
                acc.delete()?;
            }
            let (mn, mx) = acc.minmax()?;
            y_min[i] = mn;
            y_max[i] = mx;
        }
    } else {
        for t in 0..j {
            acc.insert(tail_pad)?;
            if n + t >= j {
                let (mn, mx) = acc.minmax()?;
                y_min[n + t - j] = mn;
                y_max[n + t - j] = mx;
            }
        }
    }

    Ok(())
}

/// Materializes the window centered on sample `idx` into `window`, applying
/// the boundary policy, and returns the number of samples written.
///
/// Used by passes that recompute a statistic from the full window contents
/// rather than streaming through an accumulator.
pub(crate) fn fill_window<T: SeriesElement>(
    boundary: Boundary,
    idx: usize,
    h: usize,
    j: usize,
    x: &[T],
    window: &mut [T],
) -> usize {
    let n = x.len() as isize;
    let idx = idx as isize;
    let h = h as isize;
    let j = j as isize;

    let (lo, hi) = if boundary == Boundary::Truncate {
        ((idx - h).max(0), (idx + j).min(n - 1))
    } else {
        (idx - h, idx + j)
    };

    for pos in lo..=hi {
        let widx = (pos - lo) as usize;
        window[widx] = if pos < 0 {
            match boundary {
                Boundary::PadZero => T::zero(),
                _ => x[0],
            }
        } else if pos >= n {
            match boundary {
                Boundary::PadZero => T::zero(),
                _ => x[(n - 1) as usize],
            }
        } else {
            x[pos as usize]
        };
    }

    (hi - lo + 1) as usize
}
