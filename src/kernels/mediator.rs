//! Running-median accumulator.
//!
//! Maintains the median of the last `k` inserted samples in O(log k) per
//! insert and O(1) per query using a double-heap arrangement: a max-heap of
//! the samples below the median and a min-heap of the samples above it, both
//! stored in one arena with the median element fixed at the center slot.
//!
//! Three arrays cooperate:
//!
//! - `data`: circular buffer of the raw samples, so the oldest sample can be
//!   located and overwritten in place when the window slides;
//! - `heap`: arena of `2k - 1` slots holding indices into `data`; the center
//!   slot is the median, slots toward index 0 form the max-heap and slots
//!   toward the end form the min-heap;
//! - `pos`: for each `data` slot, its current logical heap position, so an
//!   overwritten sample can be re-sifted from where it sits.
//!
//! Heap positions are logical signed offsets from the median: 0 is the
//! median, negative offsets walk into the max-heap, positive offsets into the
//! min-heap. Parent/child relations use the usual `i/2` and `2i` arithmetic
//! on the signed offset; [`slot`](MedianAccumulator::slot) maps an offset to
//! its arena index.

use crate::error::{Error, Result};
use crate::kernels::{try_filled_vec, try_zeroed_vec, WindowAccumulator};
use crate::traits::SeriesElement;

/// Double-heap running median over the last `k` samples.
#[derive(Debug, Clone)]
pub struct MedianAccumulator<T> {
    k: usize,
    /// Number of live samples, at most `k`.
    ct: usize,
    /// Circular write cursor into `data`.
    idx: usize,
    data: Vec<T>,
    /// Logical heap offset of each `data` slot.
    pos: Vec<isize>,
    /// Arena of `2k - 1` slots holding `data` indices; median at offset 0.
    heap: Vec<usize>,
}

impl<T: SeriesElement> MedianAccumulator<T> {
    /// Creates an accumulator for windows of `k` samples.
    ///
    /// # Errors
    ///
    /// Returns `Error::AllocationFailure` if storage cannot be reserved.
    pub fn new(k: usize) -> Result<Self> {
        let k = k.max(1);
        let mut acc = Self {
            k,
            ct: 0,
            idx: 0,
            data: try_zeroed_vec(k)?,
            pos: try_filled_vec(k, 0_isize)?,
            heap: try_filled_vec(2 * k - 1, 0_usize)?,
        };
        acc.reset();
        Ok(acc)
    }

    /// Arena index of logical heap offset `l`.
    #[inline]
    fn slot(&self, l: isize) -> usize {
        // l ranges over [-(k-1), k-1]
        (l + self.k as isize - 1) as usize
    }

    #[inline]
    fn heap_at(&self, l: isize) -> usize {
        self.heap[self.slot(l)]
    }

    /// Number of samples currently in the min-heap.
    #[inline]
    fn min_len(&self) -> isize {
        (self.ct.saturating_sub(1) / 2) as isize
    }

    /// Number of samples currently in the max-heap.
    #[inline]
    fn max_len(&self) -> isize {
        (self.ct / 2) as isize
    }

    #[inline]
    fn less(&self, i: isize, j: isize) -> bool {
        self.data[self.heap_at(i)] < self.data[self.heap_at(j)]
    }

    /// Swaps logical heap slots `i` and `j`, keeping `pos` consistent.
    fn exchange(&mut self, i: isize, j: isize) {
        let si = self.slot(i);
        let sj = self.slot(j);
        self.heap.swap(si, sj);
        self.pos[self.heap[si]] = i;
        self.pos[self.heap[sj]] = j;
    }

    /// Swaps slots `i` and `j` if the sample at `i` is smaller.
    fn cmp_exchange(&mut self, i: isize, j: isize) -> bool {
        if self.less(i, j) {
            self.exchange(i, j);
            true
        } else {
            false
        }
    }

    /// Restores the min-heap property for all slots below `i`'s parent.
    fn min_sift_down(&mut self, mut i: isize) {
        while i <= self.min_len() {
            if i > 1 && i < self.min_len() && self.less(i + 1, i) {
                i += 1;
            }
            if !self.cmp_exchange(i, i / 2) {
                break;
            }
            i *= 2;
        }
    }

    /// Restores the max-heap property for all slots below `i`'s parent
    /// (negative offsets).
    fn max_sift_down(&mut self, mut i: isize) {
        while i >= -self.max_len() {
            if i < -1 && i > -self.max_len() && self.less(i, i - 1) {
                i -= 1;
            }
            if !self.cmp_exchange(i / 2, i) {
                break;
            }
            i *= 2;
        }
    }

    /// Restores the min-heap property above `i`, including the median slot.
    /// Returns true if the median changed.
    fn min_sift_up(&mut self, mut i: isize) -> bool {
        while i > 0 && self.cmp_exchange(i, i / 2) {
            i /= 2;
        }
        i == 0
    }

    /// Restores the max-heap property above `i`, including the median slot.
    /// Returns true if the median changed.
    fn max_sift_up(&mut self, mut i: isize) -> bool {
        while i < 0 && self.cmp_exchange(i / 2, i) {
            i /= 2;
        }
        i == 0
    }

    /// The median of the held samples; for an even count, the mean of the
    /// two middle samples.
    ///
    /// # Errors
    ///
    /// Returns `Error::EmptyAccumulator` if no samples have been inserted.
    pub fn median(&self) -> Result<T> {
        if self.ct == 0 {
            return Err(Error::EmptyAccumulator);
        }
        let v = self.data[self.heap_at(0)];
        if self.ct % 2 == 0 {
            // max-heap root holds the lower of the two middle samples
            Ok((v + self.data[self.heap_at(-1)]) / T::two())
        } else {
            Ok(v)
        }
    }
}

impl<T: SeriesElement> WindowAccumulator<T> for MedianAccumulator<T> {
    fn reset(&mut self) {
        self.ct = 0;
        self.idx = 0;
        // Initial fill pattern alternates median, max-heap, min-heap so the
        // two heaps stay balanced as slots are claimed in insertion order.
        for kk in 0..self.k {
            let l = ((kk as isize + 1) / 2) * if kk % 2 == 1 { -1 } else { 1 };
            self.pos[kk] = l;
            let s = self.slot(l);
            self.heap[s] = kk;
        }
    }

    fn insert(&mut self, v: T) -> Result<()> {
        let is_new = self.ct < self.k;
        let p = self.pos[self.idx];
        let old = self.data[self.idx];

        self.data[self.idx] = v;
        self.idx = (self.idx + 1) % self.k;
        if is_new {
            self.ct += 1;
        }

        if p > 0 {
            // overwritten slot lives in the min-heap
            if !is_new && old < v {
                self.min_sift_down(p * 2);
            } else if self.min_sift_up(p) {
                self.max_sift_down(-1);
            }
        } else if p < 0 {
            // overwritten slot lives in the max-heap
            if !is_new && v < old {
                self.max_sift_down(p * 2);
            } else if self.max_sift_up(p) {
                self.min_sift_down(1);
            }
        } else {
            // overwrote the median slot itself
            if self.max_len() > 0 {
                self.max_sift_down(-1);
            }
            if self.min_len() > 0 {
                self.min_sift_down(1);
            }
        }

        Ok(())
    }

    fn query(&mut self) -> Result<T> {
        self.median()
    }
}
