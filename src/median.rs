use log::trace;

use crate::utils::{Heap, Max, Min};

/// A median calculator that maintains the median of a window using a two-heap approach.
///
/// The lower half of the values lives in a max-heap and the upper half in a
/// min-heap. Every element of `lower` is less than or equal to every element
/// of `upper`, and `lower` holds either as many elements as `upper` or one
/// more, so the median is read from the heap tops in O(1).
///
/// This implementation is designed to work with external window management:
/// the caller inserts each new sample and removes each evicted one. Removal is
/// by value, and since duplicates are interchangeable for the median, any
/// stored occurrence of the value may be taken out.
#[derive(Debug, Clone)]
pub struct MedianTracker {
    /// Max heap for the lower half of values
    lower: Heap<Max>,
    /// Min heap for the upper half of values
    upper: Heap<Min>,
}

impl MedianTracker {
    /// Creates a new `MedianTracker` with room for `window_size` values.
    ///
    /// # Arguments
    ///
    /// * `window_size` - The size of the sliding window
    #[inline]
    pub fn new(window_size: usize) -> Self {
        let half = window_size / 2 + 1;
        Self {
            lower: Heap::new(half),
            upper: Heap::new(half),
        }
    }

    /// Inserts a value.
    ///
    /// Values below the current lower top go to the lower half, everything
    /// else to the upper half; the heaps are rebalanced afterwards.
    ///
    /// # Arguments
    ///
    /// * `value` - The value to insert
    pub fn insert(&mut self, value: f64) {
        match self.lower.peek() {
            Some(top) if value >= top => self.upper.push(value),
            _ => self.lower.push(value),
        }
        self.rebalance();
    }

    /// Removes one occurrence of a value.
    ///
    /// The lower half is searched first, then the upper half.
    ///
    /// # Arguments
    ///
    /// * `value` - The value to remove
    ///
    /// # Returns
    ///
    /// `true` if the value was found and removed, `false` otherwise
    pub fn remove(&mut self, value: f64) -> bool {
        let removed = self.lower.remove(value) || self.upper.remove(value);
        if removed {
            self.rebalance();
        } else {
            trace!("median tracker: {value} not present, nothing removed");
        }
        removed
    }

    /// Restores `upper.len() <= lower.len() <= upper.len() + 1`
    fn rebalance(&mut self) {
        while self.lower.len() > self.upper.len() + 1 {
            if let Some(top) = self.lower.pop() {
                self.upper.push(top);
            }
        }
        while self.upper.len() > self.lower.len() {
            if let Some(top) = self.upper.pop() {
                self.lower.push(top);
            }
        }
    }

    /// Returns the current median.
    ///
    /// # Returns
    ///
    /// * `Some(median)` if there is at least one value
    /// * `None` if there are no values
    pub fn median(&self) -> Option<f64> {
        let lower = self.lower.peek()?;
        if self.lower.len() == self.upper.len() {
            self.upper.peek().map(|upper| (lower + upper) / 2.0)
        } else {
            Some(lower)
        }
    }

    /// Returns the number of values tracked
    #[inline]
    pub fn len(&self) -> usize {
        self.lower.len() + self.upper.len()
    }

    /// Returns `true` if no values are tracked
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lower.is_empty() && self.upper.is_empty()
    }

    /// Clears all values
    pub fn reset(&mut self) {
        self.lower.clear();
        self.upper.clear();
    }
}
