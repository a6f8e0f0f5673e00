//! Core traits for rollstat numeric operations.
//!
//! This module defines the [`SeriesElement`] trait used throughout the
//! library for generic numeric operations on sample sequences, abstracting
//! over `f32` and `f64` types.

use num_traits::{Float, NumCast};

use crate::error::{Error, Result};

/// A trait for types that can be used as samples in a data sequence.
///
/// This trait provides a common interface for numeric operations on window
/// data, abstracting over `f32` and `f64` types. It extends
/// `num_traits::Float` with fallible conversion constructors used when
/// turning sample counts and quantile positions into the element type.
///
/// # Type Bounds
///
/// The trait requires:
/// - `Float`: Standard floating-point operations (NaN handling, infinity, arithmetic)
/// - `NumCast`: Safe conversion between numeric types
/// - `Copy`: Values can be copied (required for efficient iteration)
/// - `Default`: A default value exists (typically zero)
///
/// # Example
///
/// ```
/// use rollstat::traits::SeriesElement;
///
/// fn window_mean<T: SeriesElement>(window: &[T]) -> rollstat::Result<T> {
///     let n = T::from_usize(window.len())?;
///     let sum = window.iter().fold(T::zero(), |acc, &x| acc + x);
///     Ok(sum / n)
/// }
///
/// let data = vec![1.0_f64, 2.0, 3.0];
/// assert!((window_mean(&data).unwrap() - 2.0).abs() < 1e-10);
/// ```
pub trait SeriesElement: Float + NumCast + Copy + Default + Send + Sync + 'static {
    /// Creates a series element from a `usize` value.
    ///
    /// This is commonly used for converting window sample counts to the
    /// series element type.
    ///
    /// # Errors
    ///
    /// Returns `Error::NumericConversion` if the value cannot be represented in this type.
    #[inline]
    fn from_usize(value: usize) -> Result<Self> {
        <Self as NumCast>::from(value).ok_or(Error::NumericConversion {
            context: "usize to series element",
        })
    }

    /// Creates a series element from an `f64` value.
    ///
    /// # Errors
    ///
    /// Returns `Error::NumericConversion` if the value cannot be represented in this type.
    #[inline]
    fn from_f64(value: f64) -> Result<Self> {
        <Self as NumCast>::from(value).ok_or(Error::NumericConversion {
            context: "f64 to series element",
        })
    }

    /// Returns the constant 2 as this type.
    ///
    /// This is used when averaging the two middle samples of an even-length
    /// window.
    #[inline]
    #[must_use]
    fn two() -> Self {
        // Safe unwrap: 2 is always representable in Float types
        <Self as NumCast>::from(2).unwrap()
    }
}

// Blanket implementation for all types that satisfy the bounds
impl<T: Float + NumCast + Copy + Default + Send + Sync + 'static> SeriesElement for T {}
