use crate::utils::{Max, Min, MonotonicQueue};

/// # Minimum and Maximum Tracking for Rolling Windows
///
/// Keeps one non-decreasing and one non-increasing monotonic queue over the
/// samples of a FIFO window, so the current extremes are read in O(1) and
/// each push costs O(1) amortized.
///
/// The tracker does not own the window. The caller reports the oldest sample
/// through [`MinMaxTracker::evict`] whenever the window drops it, before
/// pushing the new sample.
#[derive(Debug, Clone)]
pub struct MinMaxTracker {
    min: MonotonicQueue<f64, Min>,
    max: MonotonicQueue<f64, Max>,
}

impl MinMaxTracker {
    /// Creates a new tracker for a window of `window_size` samples
    pub fn new(window_size: usize) -> Self {
        Self {
            min: MonotonicQueue::new(window_size),
            max: MonotonicQueue::new(window_size),
        }
    }

    /// Pushes a new sample into both queues
    #[inline]
    pub fn push(&mut self, value: f64) {
        self.min.push(value);
        self.max.push(value);
    }

    /// Retracts the sample the window just evicted
    #[inline]
    pub fn evict(&mut self, value: f64) {
        self.min.evict(value);
        self.max.evict(value);
    }

    /// Returns the minimum of the live window, or `None` before the first push
    #[inline]
    pub fn min(&self) -> Option<f64> {
        self.min.front()
    }

    /// Returns the maximum of the live window, or `None` before the first push
    #[inline]
    pub fn max(&self) -> Option<f64> {
        self.max.front()
    }

    /// Resets the tracker
    pub fn reset(&mut self) {
        self.min.reset();
        self.max.reset();
    }
}
