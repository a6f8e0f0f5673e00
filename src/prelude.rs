//! Commonly used types and traits for convenient importing.
//!
//! This prelude provides the most frequently used types, traits, and
//! functions from `rollstat` to simplify imports in typical usage scenarios.
//!
//! # Usage
//!
//! ```
//! use rollstat::prelude::*;
//!
//! let x = [1.0_f64, 2.0, 3.0, 4.0, 5.0];
//! let mut y = [0.0_f64; 5];
//! let mut w = Workspace::new(3).unwrap();
//!
//! moving_mean(Boundary::Truncate, &x, &mut y, &mut w).unwrap();
//! moving_max(Boundary::Truncate, &x, &mut y, &mut w).unwrap();
//! ```
//!
//! # Contents
//!
//! This prelude re-exports:
//!
//! ## Error Handling
//! - [`Error`]: The main error type for moving-statistic failures
//! - [`Result`]: Type alias for `std::result::Result<T, Error>`
//!
//! ## Core Types
//! - [`Boundary`]: Edge policy (zero padding, edge-value padding, truncation)
//! - [`Workspace`]: Reusable window state
//! - [`SeriesElement`]: Trait for numeric types usable as samples
//!
//! ## Statistic Functions
//! All moving statistics and their `_inplace` variants.

// Error types
pub use crate::error::{Error, Result};

// Core types
pub use crate::traits::SeriesElement;
pub use crate::window::{Boundary, Workspace};

// Statistic functions (out-of-place API)
pub use crate::moving::{
    moving_mad, moving_mad0, moving_max, moving_mean, moving_median, moving_min, moving_minmax,
    moving_scale_qn, moving_scale_sn, moving_stddev, moving_sum, moving_variance,
};

// Statistic functions (in-place API)
pub use crate::moving::{
    moving_max_inplace, moving_mean_inplace, moving_median_inplace, moving_min_inplace,
    moving_scale_qn_inplace, moving_scale_sn_inplace, moving_stddev_inplace, moving_sum_inplace,
    moving_variance_inplace,
};
