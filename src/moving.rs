//! Moving-window statistic entry points.
//!
//! Every function here computes one statistic over a sliding window for each
//! sample of the input, honoring the [`Boundary`] policy at the data edges
//! and reusing the storage of a caller-provided [`Workspace`].
//!
//! Single-output statistics come in two flavors: an out-of-place form taking
//! separate input and output slices, and an `_inplace` form operating on one
//! mutable slice. The out-of-place form copies the input and runs the
//! in-place pass, so the two always agree exactly.
//!
//! # Example
//!
//! ```
//! use rollstat::{moving_mean, Boundary, Workspace};
//!
//! let x = [1.0, 2.0, 3.0, 4.0, 5.0];
//! let mut y = [0.0_f64; 5];
//! let mut w = Workspace::new(3).unwrap();
//!
//! moving_mean(Boundary::PadEdgeValue, &x, &mut y, &mut w).unwrap();
//! assert!((y[0] - 4.0 / 3.0).abs() < 1e-10);
//! assert!((y[2] - 3.0).abs() < 1e-10);
//! ```

use crate::error::{Error, Result};
use crate::kernels::extrema::{Max, Min};
use crate::kernels::moments::{Mean, StdDev, Variance};
use crate::kernels::scale::{median_of_sorted, sort_values, MAD_NORMAL_SCALE};
use crate::traits::SeriesElement;
use crate::window::{apply, apply_minmax, fill_window, Boundary, Workspace};

#[inline]
fn check_lengths(expected: usize, actual: usize) -> Result<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(Error::LengthMismatch { expected, actual })
    }
}

#[inline]
fn check_scale_window<T: SeriesElement>(w: &Workspace<T>) -> Result<()> {
    if w.k() < 2 {
        return Err(Error::InvalidWindow {
            reason: "robust scale estimators require a window of at least 2 samples",
        });
    }
    Ok(())
}

#[inline]
fn check_quantile(q: f64) -> Result<()> {
    if !(0.0..=0.5).contains(&q) {
        return Err(Error::InvalidWindow {
            reason: "quantile must lie in [0, 0.5]",
        });
    }
    Ok(())
}

/// Computes the moving mean of `x` into `y`.
///
/// # Errors
///
/// Returns `Error::LengthMismatch` if `x` and `y` differ in length.
///
/// # Example
///
/// ```
/// use rollstat::{moving_mean, Boundary, Workspace};
///
/// let x = [3.0, 6.0, 9.0];
/// let mut y = [0.0_f64; 3];
/// let mut w = Workspace::new(3).unwrap();
/// moving_mean(Boundary::Truncate, &x, &mut y, &mut w).unwrap();
/// assert_eq!(y, [4.5, 6.0, 7.5]);
/// ```
pub fn moving_mean<T: SeriesElement>(
    boundary: Boundary,
    x: &[T],
    y: &mut [T],
    w: &mut Workspace<T>,
) -> Result<()> {
    check_lengths(x.len(), y.len())?;
    y.copy_from_slice(x);
    moving_mean_inplace(boundary, y, w)
}

/// Computes the moving mean of `data` in place.
///
/// # Errors
///
/// Returns `Error::NumericConversion` if a window count cannot be
/// represented in `T`.
pub fn moving_mean_inplace<T: SeriesElement>(
    boundary: Boundary,
    data: &mut [T],
    w: &mut Workspace<T>,
) -> Result<()> {
    apply(
        boundary,
        w.h,
        w.j,
        &mut Mean(&mut w.moments),
        &mut w.work,
        data,
    )
}

/// Computes the moving sample variance of `x` into `y`.
///
/// Windows holding fewer than two samples (possible under
/// [`Boundary::Truncate`]) have variance zero.
///
/// # Errors
///
/// Returns `Error::LengthMismatch` if `x` and `y` differ in length.
pub fn moving_variance<T: SeriesElement>(
    boundary: Boundary,
    x: &[T],
    y: &mut [T],
    w: &mut Workspace<T>,
) -> Result<()> {
    check_lengths(x.len(), y.len())?;
    y.copy_from_slice(x);
    moving_variance_inplace(boundary, y, w)
}

/// Computes the moving sample variance of `data` in place.
///
/// # Errors
///
/// Returns `Error::NumericConversion` if a window count cannot be
/// represented in `T`.
pub fn moving_variance_inplace<T: SeriesElement>(
    boundary: Boundary,
    data: &mut [T],
    w: &mut Workspace<T>,
) -> Result<()> {
    apply(
        boundary,
        w.h,
        w.j,
        &mut Variance(&mut w.moments),
        &mut w.work,
        data,
    )
}

/// Computes the moving sample standard deviation of `x` into `y`.
///
/// # Errors
///
/// Returns `Error::LengthMismatch` if `x` and `y` differ in length.
pub fn moving_stddev<T: SeriesElement>(
    boundary: Boundary,
    x: &[T],
    y: &mut [T],
    w: &mut Workspace<T>,
) -> Result<()> {
    check_lengths(x.len(), y.len())?;
    y.copy_from_slice(x);
    moving_stddev_inplace(boundary, y, w)
}

/// Computes the moving sample standard deviation of `data` in place.
///
/// # Errors
///
/// Returns `Error::NumericConversion` if a window count cannot be
/// represented in `T`.
pub fn moving_stddev_inplace<T: SeriesElement>(
    boundary: Boundary,
    data: &mut [T],
    w: &mut Workspace<T>,
) -> Result<()> {
    apply(
        boundary,
        w.h,
        w.j,
        &mut StdDev(&mut w.moments),
        &mut w.work,
        data,
    )
}

/// Computes the moving median of `x` into `y`.
///
/// Windows with an even sample count report the mean of the two middle
/// samples.
///
/// # Errors
///
/// Returns `Error::LengthMismatch` if `x` and `y` differ in length.
///
/// # Example
///
/// ```
/// use rollstat::{moving_median, Boundary, Workspace};
///
/// let x = [-1.0, 5.7, 3.4, 1.1, 9.5, -23.7, -5.6, 0.2];
/// let mut y = [0.0_f64; 8];
/// let mut w = Workspace::new(3).unwrap();
/// moving_median(Boundary::PadZero, &x, &mut y, &mut w).unwrap();
/// assert_eq!(y, [0.0, 3.4, 3.4, 3.4, 1.1, -5.6, -5.6, 0.0]);
/// ```
pub fn moving_median<T: SeriesElement>(
    boundary: Boundary,
    x: &[T],
    y: &mut [T],
    w: &mut Workspace<T>,
) -> Result<()> {
    check_lengths(x.len(), y.len())?;
    y.copy_from_slice(x);
    moving_median_inplace(boundary, y, w)
}

/// Computes the moving median of `data` in place.
///
/// # Errors
///
/// Returns `Error::EmptyAccumulator` only on internal state misuse; normal
/// inputs cannot produce it.
pub fn moving_median_inplace<T: SeriesElement>(
    boundary: Boundary,
    data: &mut [T],
    w: &mut Workspace<T>,
) -> Result<()> {
    apply(boundary, w.h, w.j, &mut w.median, &mut w.work, data)
}

/// Computes the moving minimum of `x` into `y`.
///
/// # Errors
///
/// Returns `Error::LengthMismatch` if `x` and `y` differ in length.
pub fn moving_min<T: SeriesElement>(
    boundary: Boundary,
    x: &[T],
    y: &mut [T],
    w: &mut Workspace<T>,
) -> Result<()> {
    check_lengths(x.len(), y.len())?;
    y.copy_from_slice(x);
    moving_min_inplace(boundary, y, w)
}

/// Computes the moving minimum of `data` in place.
///
/// # Errors
///
/// Returns `Error::EmptyAccumulator` only on internal state misuse; normal
/// inputs cannot produce it.
pub fn moving_min_inplace<T: SeriesElement>(
    boundary: Boundary,
    data: &mut [T],
    w: &mut Workspace<T>,
) -> Result<()> {
    apply(
        boundary,
        w.h,
        w.j,
        &mut Min(&mut w.minmax),
        &mut w.work,
        data,
    )
}

/// Computes the moving maximum of `x` into `y`.
///
/// # Errors
///
/// Returns `Error::LengthMismatch` if `x` and `y` differ in length.
///
/// # Example
///
/// ```
/// use rollstat::{moving_max, Boundary, Workspace};
///
/// let x = [1.0, 3.0, 2.0, 5.0, 4.0];
/// let mut y = [0.0_f64; 5];
/// let mut w = Workspace::new(3).unwrap();
/// moving_max(Boundary::Truncate, &x, &mut y, &mut w).unwrap();
/// assert_eq!(y, [3.0, 3.0, 5.0, 5.0, 5.0]);
/// ```
pub fn moving_max<T: SeriesElement>(
    boundary: Boundary,
    x: &[T],
    y: &mut [T],
    w: &mut Workspace<T>,
) -> Result<()> {
    check_lengths(x.len(), y.len())?;
    y.copy_from_slice(x);
    moving_max_inplace(boundary, y, w)
}

/// Computes the moving maximum of `data` in place.
///
/// # Errors
///
/// Returns `Error::EmptyAccumulator` only on internal state misuse; normal
/// inputs cannot produce it.
pub fn moving_max_inplace<T: SeriesElement>(
    boundary: Boundary,
    data: &mut [T],
    w: &mut Workspace<T>,
) -> Result<()> {
    apply(
        boundary,
        w.h,
        w.j,
        &mut Max(&mut w.minmax),
        &mut w.work,
        data,
    )
}

/// Computes the moving minimum and maximum of `x` in one pass.
///
/// # Errors
///
/// Returns `Error::LengthMismatch` if `y_min` or `y_max` differ in length
/// from `x`.
pub fn moving_minmax<T: SeriesElement>(
    boundary: Boundary,
    x: &[T],
    y_min: &mut [T],
    y_max: &mut [T],
    w: &mut Workspace<T>,
) -> Result<()> {
    check_lengths(x.len(), y_min.len())?;
    check_lengths(x.len(), y_max.len())?;
    apply_minmax(boundary, w.h, w.j, &mut w.minmax, x, y_min, y_max)
}

/// Computes the moving sum of `x` into `y`.
///
/// # Errors
///
/// Returns `Error::LengthMismatch` if `x` and `y` differ in length.
pub fn moving_sum<T: SeriesElement>(
    boundary: Boundary,
    x: &[T],
    y: &mut [T],
    w: &mut Workspace<T>,
) -> Result<()> {
    check_lengths(x.len(), y.len())?;
    y.copy_from_slice(x);
    moving_sum_inplace(boundary, y, w)
}

/// Computes the moving sum of `data` in place.
///
/// # Errors
///
/// Returns `Error::EmptyAccumulator` only on internal state misuse; normal
/// inputs cannot produce it.
pub fn moving_sum_inplace<T: SeriesElement>(
    boundary: Boundary,
    data: &mut [T],
    w: &mut Workspace<T>,
) -> Result<()> {
    apply(boundary, w.h, w.j, &mut w.sum, &mut w.work, data)
}

fn mad_pass<T: SeriesElement>(
    boundary: Boundary,
    x: &[T],
    xmedian: &mut [T],
    xsigma: &mut [T],
    scale: T,
    w: &mut Workspace<T>,
) -> Result<()> {
    check_lengths(x.len(), xmedian.len())?;
    check_lengths(x.len(), xsigma.len())?;
    check_scale_window(w)?;

    moving_median(boundary, x, xmedian, w)?;

    for i in 0..x.len() {
        let wsize = fill_window(boundary, i, w.h, w.j, x, &mut w.window);
        let med = xmedian[i];
        for v in &mut w.window[..wsize] {
            *v = (*v - med).abs();
        }
        sort_values(&mut w.window[..wsize]);
        xsigma[i] = scale * median_of_sorted(&w.window[..wsize])?;
    }

    Ok(())
}

/// Computes the moving median absolute deviation of `x`, scaled to estimate
/// the standard deviation of normally distributed data.
///
/// Writes the moving median into `xmedian` and the scaled MAD into
/// `xsigma`. For the unscaled statistic see [`moving_mad0`].
///
/// # Errors
///
/// Returns `Error::LengthMismatch` if `xmedian` or `xsigma` differ in length
/// from `x`, and `Error::InvalidWindow` for windows shorter than 2 samples.
pub fn moving_mad<T: SeriesElement>(
    boundary: Boundary,
    x: &[T],
    xmedian: &mut [T],
    xsigma: &mut [T],
    w: &mut Workspace<T>,
) -> Result<()> {
    let scale = T::from_f64(MAD_NORMAL_SCALE)?;
    mad_pass(boundary, x, xmedian, xsigma, scale, w)
}

/// Computes the raw (unscaled) moving median absolute deviation of `x`.
///
/// Writes the moving median into `xmedian` and the MAD into `xsigma`.
///
/// # Errors
///
/// Returns `Error::LengthMismatch` if `xmedian` or `xsigma` differ in length
/// from `x`, and `Error::InvalidWindow` for windows shorter than 2 samples.
///
/// # Example
///
/// ```
/// use rollstat::{moving_mad0, Boundary, Workspace};
///
/// let x = [-1.0, 5.7, 3.4, 1.1, 9.5, -23.7, -5.6, 0.2];
/// let mut xmedian = [0.0_f64; 8];
/// let mut xmad = [0.0_f64; 8];
/// let mut w = Workspace::new(3).unwrap();
/// moving_mad0(Boundary::PadZero, &x, &mut xmedian, &mut xmad, &mut w).unwrap();
/// assert!((xmad[0] - 1.0).abs() < 1e-10);
/// assert!((xmad[5] - 15.1).abs() < 1e-10);
/// ```
pub fn moving_mad0<T: SeriesElement>(
    boundary: Boundary,
    x: &[T],
    xmedian: &mut [T],
    xsigma: &mut [T],
    w: &mut Workspace<T>,
) -> Result<()> {
    mad_pass(boundary, x, xmedian, xsigma, T::one(), w)
}

/// Computes the moving `S_n` robust scale statistic of `x` into `y`.
///
/// `S_n` is the median over window samples of each sample's median absolute
/// difference to the rest of the window.
///
/// # Errors
///
/// Returns `Error::LengthMismatch` if `x` and `y` differ in length, and
/// `Error::InvalidWindow` for windows shorter than 2 samples. On error `y`
/// is left untouched.
pub fn moving_scale_sn<T: SeriesElement>(
    boundary: Boundary,
    x: &[T],
    y: &mut [T],
    w: &mut Workspace<T>,
) -> Result<()> {
    check_lengths(x.len(), y.len())?;
    check_scale_window(w)?;
    y.copy_from_slice(x);
    moving_scale_sn_inplace(boundary, y, w)
}

/// Computes the moving `S_n` statistic of `data` in place.
///
/// # Errors
///
/// Returns `Error::InvalidWindow` for windows shorter than 2 samples.
pub fn moving_scale_sn_inplace<T: SeriesElement>(
    boundary: Boundary,
    data: &mut [T],
    w: &mut Workspace<T>,
) -> Result<()> {
    check_scale_window(w)?;
    apply(boundary, w.h, w.j, &mut w.sn, &mut w.work, data)
}

/// Computes the moving `q`-quantile range `Q(1-q) - Q(q)` of `x` into `y`.
///
/// `q = 0.25` yields the moving interquartile range; `q = 0` the moving
/// full range.
///
/// # Errors
///
/// Returns `Error::LengthMismatch` if `x` and `y` differ in length, and
/// `Error::InvalidWindow` for windows shorter than 2 samples or `q` outside
/// `[0, 0.5]`. On error `y` is left untouched.
///
/// # Example
///
/// ```
/// use rollstat::{moving_scale_qn, Boundary, Workspace};
///
/// let x = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
/// let mut y = [0.0_f64; 6];
/// let mut w = Workspace::new(5).unwrap();
/// moving_scale_qn(Boundary::PadEdgeValue, &x, 0.0, &mut y, &mut w).unwrap();
/// // full range of [1, 1, 1, 2, 3] is 2
/// assert!((y[0] - 2.0).abs() < 1e-10);
/// ```
pub fn moving_scale_qn<T: SeriesElement>(
    boundary: Boundary,
    x: &[T],
    q: f64,
    y: &mut [T],
    w: &mut Workspace<T>,
) -> Result<()> {
    check_lengths(x.len(), y.len())?;
    check_scale_window(w)?;
    check_quantile(q)?;
    y.copy_from_slice(x);
    moving_scale_qn_inplace(boundary, q, y, w)
}

/// Computes the moving `q`-quantile range of `data` in place.
///
/// # Errors
///
/// Returns `Error::InvalidWindow` for windows shorter than 2 samples or `q`
/// outside `[0, 0.5]`.
pub fn moving_scale_qn_inplace<T: SeriesElement>(
    boundary: Boundary,
    q: f64,
    data: &mut [T],
    w: &mut Workspace<T>,
) -> Result<()> {
    check_scale_window(w)?;
    check_quantile(q)?;
    w.qrange.set_quantile(q);
    apply(boundary, w.h, w.j, &mut w.qrange, &mut w.work, data)
}
