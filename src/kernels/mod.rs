//! Window accumulator kernels.
//!
//! Each kernel maintains the state of one moving-window statistic while the
//! driver streams samples through it. A kernel sees samples strictly in
//! sequence order: the driver inserts one sample at a time, queries the
//! current statistic after each insert, and (for kernels that support it)
//! deletes the oldest sample when the window shrinks at the right data edge.
//!
//! Kernels are deliberately unaware of boundary policies. Padding and
//! truncation are handled entirely by the driver in [`crate::window`]; a
//! kernel only ever answers "what is the statistic of the samples currently
//! held".

use crate::error::{Error, Result};
use crate::traits::SeriesElement;

pub mod extrema;
pub mod mediator;
pub mod moments;
pub mod ring_buffer;
pub mod scale;
pub mod sum;

/// A statistic accumulator over a bounded moving window.
///
/// The driver in [`crate::window`] is generic over this trait and dispatches
/// statically; there is no `dyn` use anywhere in the crate.
///
/// # Contract
///
/// - [`reset`](Self::reset) must restore the freshly-constructed state
///   without reallocating; the driver resets before every pass.
/// - [`insert`](Self::insert) adds one sample. Once the accumulator holds a
///   full window of samples, inserting evicts the oldest sample first.
/// - [`delete`](Self::delete) removes the oldest held sample. It is only
///   invoked by the driver when [`supports_delete`](Self::supports_delete)
///   returns `true`.
/// - [`query`](Self::query) returns the statistic of the currently held
///   samples, or [`Error::EmptyAccumulator`] when none are held.
pub trait WindowAccumulator<T: SeriesElement> {
    /// Restores the initial empty state without deallocating.
    fn reset(&mut self);

    /// Adds a single sample, evicting the oldest sample if the window is full.
    ///
    /// # Errors
    ///
    /// Returns `Error::NumericConversion` if an internal count cannot be
    /// represented in `T`.
    fn insert(&mut self, x: T) -> Result<()>;

    /// Removes the oldest held sample.
    ///
    /// The default implementation does nothing; accumulators that can shrink
    /// their window override this together with
    /// [`supports_delete`](Self::supports_delete).
    ///
    /// # Errors
    ///
    /// Returns `Error::NumericConversion` if an internal count cannot be
    /// represented in `T`.
    fn delete(&mut self) -> Result<()> {
        Ok(())
    }

    /// Whether [`delete`](Self::delete) actually removes samples.
    ///
    /// The driver uses this to choose between the incremental shrinking-window
    /// path and the save-and-rebuild path when truncating at the right edge.
    fn supports_delete(&self) -> bool {
        false
    }

    /// Returns the statistic of the currently held samples.
    ///
    /// # Errors
    ///
    /// Returns `Error::EmptyAccumulator` if no samples are held.
    fn query(&mut self) -> Result<T>;
}

/// Allocates a zero-filled `Vec`, reporting failure instead of aborting.
pub(crate) fn try_zeroed_vec<T: SeriesElement>(n: usize) -> Result<Vec<T>> {
    let mut v = Vec::new();
    v.try_reserve_exact(n).map_err(|_| Error::AllocationFailure)?;
    v.resize(n, T::zero());
    Ok(v)
}

/// Allocates a `Vec` filled with copies of `fill`, reporting failure instead
/// of aborting.
pub(crate) fn try_filled_vec<U: Clone>(n: usize, fill: U) -> Result<Vec<U>> {
    let mut v = Vec::new();
    v.try_reserve_exact(n).map_err(|_| Error::AllocationFailure)?;
    v.resize(n, fill);
    Ok(v)
}
