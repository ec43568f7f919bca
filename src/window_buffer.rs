use alloc::boxed::Box;
use core::num::NonZeroUsize;

use log::trace;

use crate::{Kbn, Result, StatsError, error::ensure_finite};

/// A fixed-capacity FIFO of samples with running first and second power sums.
///
/// Once the buffer holds `capacity` samples, every push evicts the oldest one
/// and hands it back so the other trackers can retract it. The running sums
/// are maintained incrementally with Kahan-Babuska-Neumaier compensation, so
/// long-lived windows do not drift the way naive `+=`/`-=` bookkeeping does.
#[derive(Debug, Clone)]
pub struct WindowBuffer {
    /// Heap allocated ring storage, sized to the capacity
    data: Box<[f64]>,
    /// Index of the oldest sample
    index: usize,
    /// Number of live samples
    len: usize,
    /// Sum of the live samples
    sum: Kbn<f64>,
    /// Sum of squares of the live samples
    sum_sq: Kbn<f64>,
}

impl WindowBuffer {
    /// Creates a new `WindowBuffer` holding at most `capacity` samples.
    ///
    /// # Errors
    ///
    /// * [`StatsError::InvalidInput`] if `capacity` is zero
    pub fn new(capacity: usize) -> Result<Self> {
        NonZeroUsize::new(capacity)
            .map(Self::with_capacity)
            .ok_or(StatsError::zero_window())
    }

    /// Creates a new `WindowBuffer` from an already validated capacity
    pub fn with_capacity(capacity: NonZeroUsize) -> Self {
        Self {
            data: vec![0.0; capacity.get()].into_boxed_slice(),
            index: 0,
            len: 0,
            sum: Kbn::default(),
            sum_sq: Kbn::default(),
        }
    }

    /// Returns the maximum number of samples held
    #[inline]
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Returns the number of live samples
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no sample has been pushed since creation or reset
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns `true` once the buffer holds `capacity` samples
    #[inline]
    pub fn is_full(&self) -> bool {
        self.len == self.capacity()
    }

    /// Appends a sample, evicting the oldest one when the buffer is full.
    ///
    /// # Arguments
    ///
    /// * `value` - The sample to append
    ///
    /// # Returns
    ///
    /// * `Option<f64>` - The evicted sample, if any
    ///
    /// # Errors
    ///
    /// * [`StatsError::InvalidInput`] if `value` is NaN or infinite; the
    ///   buffer is left untouched
    pub fn push(&mut self, value: f64) -> Result<Option<f64>> {
        let value = ensure_finite(value)?;
        let cap = self.capacity();

        let evicted = if self.is_full() {
            let overwritten = core::mem::replace(&mut self.data[self.index], value);
            self.index = (self.index + 1) % cap;
            self.sum -= overwritten;
            self.sum_sq -= overwritten * overwritten;
            Some(overwritten)
        } else {
            let insert_at = (self.index + self.len) % cap;
            self.data[insert_at] = value;
            self.len += 1;
            None
        };

        self.sum += value;
        self.sum_sq += value * value;

        // A square past f64::MAX poisons the running sums, and retracting it
        // later turns them into NaN for good.
        if !(self.sum().is_finite() && self.sum_sq().is_finite()) {
            trace!("window buffer: running sums overflowed, recomputing");
            self.recompute();
        }
        Ok(evicted)
    }

    /// Returns the sum of the live samples
    #[inline]
    pub fn sum(&self) -> f64 {
        self.sum.total()
    }

    /// Returns the sum of squares of the live samples
    #[inline]
    pub fn sum_sq(&self) -> f64 {
        self.sum_sq.total()
    }

    /// Returns the arithmetic mean, or `None` if the buffer is empty
    #[inline]
    pub fn mean(&self) -> Option<f64> {
        (!self.is_empty()).then(|| self.sum() / self.len as f64)
    }

    /// Returns the population variance, or `None` if the buffer is empty
    ///
    /// Computed as `E[x²] - E[x]²` and clamped at zero, since cancellation can
    /// leave a tiny negative residue for near-constant windows.
    #[inline]
    pub fn variance(&self) -> Option<f64> {
        let mean = self.mean()?;
        let mean_sq = self.sum_sq() / self.len as f64;
        Some((mean_sq - mean * mean).max(0.0))
    }

    /// Rebuilds the running sums from the live samples
    ///
    /// Called by [`WindowBuffer::push`] whenever the sums stop being finite,
    /// so a huge sample stops affecting them once it is evicted.
    pub fn recompute(&mut self) {
        let mut sum = Kbn::default();
        let mut sum_sq = Kbn::default();
        for &v in self.iter() {
            sum += v;
            sum_sq += v * v;
        }
        self.sum = sum;
        self.sum_sq = sum_sq;
    }

    /// Clears the buffer, resetting its state
    pub fn reset(&mut self) {
        self.index = 0;
        self.len = 0;
        self.data.fill(0.0);
        self.sum = Kbn::default();
        self.sum_sq = Kbn::default();
    }

    /// Returns an iterator over the live samples, oldest first
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            buf: self,
            front: 0,
            back: self.len,
        }
    }
}

/// Oldest-first iterator over a [`WindowBuffer`]
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    buf: &'a WindowBuffer,
    front: usize,
    back: usize,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a f64;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }
        let slot = (self.buf.index + self.front) % self.buf.capacity();
        self.front += 1;
        Some(&self.buf.data[slot])
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}
