//! rollstat: moving-window statistics
//!
//! This crate computes per-sample aggregate statistics over a sliding window
//! of a fixed numeric sequence: median, minimum/maximum, mean, variance,
//! standard deviation, sum, and the robust scale estimators MAD, `S_n`, and
//! quantile range.
//!
//! # Features
//!
//! - **Performance**: amortized O(1) updates for extrema, moments, and sums;
//!   O(log k) for the running median; one streaming pass per statistic
//! - **Boundary policies**: zero padding, edge-value padding, or truncated
//!   (shrinking) windows at the data edges
//! - **In-place operation**: every single-output statistic has an `_inplace`
//!   variant that overwrites its input slice
//! - **Generics**: works with both `f32` and `f64` data types
//! - **Safety**: comprehensive error handling for edge cases
//!
//! # Quick Start
//!
//! ```
//! use rollstat::{moving_median, Boundary, Workspace};
//!
//! let x = [-1.0, 5.7, 3.4, 1.1, 9.5, -23.7, -5.6, 0.2];
//! let mut y = [0.0_f64; 8];
//!
//! // symmetric window of 3 samples, zeros past the edges
//! let mut w = Workspace::new(3).unwrap();
//! moving_median(Boundary::PadZero, &x, &mut y, &mut w).unwrap();
//!
//! assert_eq!(y, [0.0, 3.4, 3.4, 3.4, 1.1, -5.6, -5.6, 0.0]);
//! ```
//!
//! # Window Geometry
//!
//! The window around sample `i` spans `i - H ..= i + J`, for `K = H + J + 1`
//! samples. [`Workspace::new`] builds symmetric windows (`H = J`);
//! [`Workspace::with_shape`] gives full control, including fully one-sided
//! trailing (`J = 0`) or leading (`H = 0`) windows.
//!
//! A workspace allocates its state once and is reused across passes and
//! statistics; each entry point resets what it uses.
//!
//! # Available Statistics
//!
//! - [`moving_mean()`], [`moving_variance()`], [`moving_stddev()`]
//! - [`moving_median()`]
//! - [`moving_min()`], [`moving_max()`], [`moving_minmax()`]
//! - [`moving_sum()`]
//! - [`moving_mad()`] / [`moving_mad0()`]: scaled / raw median absolute
//!   deviation
//! - [`moving_scale_sn()`]: Croux-Rousseeuw `S_n`
//! - [`moving_scale_qn()`]: quantile range `Q(1-q) - Q(q)`
//!
//! # Error Handling
//!
//! All entry points return [`Result`] to surface mismatched slice lengths,
//! invalid window parameters, and allocation failures:
//!
//! ```
//! use rollstat::{moving_mean, Boundary, Error, Workspace};
//!
//! let x = [1.0_f64, 2.0];
//! let mut y = [0.0_f64; 3];
//! let mut w = Workspace::new(3).unwrap();
//!
//! let result = moving_mean(Boundary::PadZero, &x, &mut y, &mut w);
//! assert!(matches!(result, Err(Error::LengthMismatch { .. })));
//! ```

#![deny(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::perf)]
#![warn(clippy::nursery)]
#![warn(clippy::needless_collect)]
#![warn(clippy::or_fun_call)]
#![warn(clippy::inefficient_to_string)]
#![warn(clippy::useless_conversion)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod kernels;
pub mod moving;
pub mod prelude;
pub mod traits;
pub mod utils;
pub mod window;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use moving::{
    moving_mad, moving_mad0, moving_max, moving_max_inplace, moving_mean, moving_mean_inplace,
    moving_median, moving_median_inplace, moving_min, moving_min_inplace, moving_minmax,
    moving_scale_qn, moving_scale_qn_inplace, moving_scale_sn, moving_scale_sn_inplace,
    moving_stddev, moving_stddev_inplace, moving_sum, moving_sum_inplace, moving_variance,
    moving_variance_inplace,
};
pub use traits::SeriesElement;
pub use utils::{approx_eq, approx_eq_relative, EPSILON, LOOSE_EPSILON};
pub use window::{Boundary, Workspace};
