use alloc::collections::VecDeque;
use core::marker::PhantomData;

use super::OrderPolicy;

/// Monotonic queue over a FIFO window
///
/// Values are kept in insertion order and sorted toward the extreme at the
/// front, so the front is always the extreme of the live window. Expiry is
/// driven by the caller, who reports each value leaving the window.
///
/// # Type Parameters
///
/// * `T` - The type of the elements in the queue
/// * `O` - The order policy for the queue
#[derive(Debug, Clone)]
pub struct MonotonicQueue<T, O> {
    deque: VecDeque<T>,
    _order: PhantomData<O>,
}

impl<T, O> MonotonicQueue<T, O>
where
    T: PartialOrd + Copy,
    O: OrderPolicy<T>,
{
    /// Creates a new `MonotonicQueue` sized for the given window.
    ///
    /// # Arguments
    ///
    /// * `window_size` - The capacity of the window the queue follows
    ///
    /// # Returns
    ///
    /// * `Self` - The `MonotonicQueue` instance
    #[inline]
    pub fn new(window_size: usize) -> Self {
        Self {
            deque: VecDeque::with_capacity(window_size),
            _order: PhantomData,
        }
    }

    /// Drops values from the back that the new value dominates.
    ///
    /// Equal values are kept: eviction matches by value, so every live
    /// occurrence of the extreme must stay queued.
    #[inline]
    fn maintain_monotonic_property(&mut self, value: T) {
        while let Some(&existing) = self.deque.back() {
            if O::precedes(&value, &existing) {
                self.deque.pop_back();
            } else {
                break;
            }
        }
    }

    /// Pushes a new value into the queue
    ///
    /// # Arguments
    ///
    /// * `value` - The value to push into the queue
    #[inline]
    pub fn push(&mut self, value: T) {
        self.maintain_monotonic_property(value);
        self.deque.push_back(value);
    }

    /// Retracts the oldest window value
    ///
    /// The front is popped only when it equals `value`; otherwise the value
    /// was already dropped while compacting and nothing is left to do.
    ///
    /// # Arguments
    ///
    /// * `value` - The value that left the window
    ///
    /// # Returns
    ///
    /// * `bool` - True if the front was popped
    #[inline]
    pub fn evict(&mut self, value: T) -> bool {
        if self.deque.front() == Some(&value) {
            self.deque.pop_front();
            true
        } else {
            false
        }
    }

    /// Returns the front element of the queue
    ///
    /// # Returns
    ///
    /// * `Option<T>` - The front element of the queue, or `None` if the queue is empty
    #[inline]
    pub fn front(&self) -> Option<T> {
        self.deque.front().copied()
    }

    /// Returns the number of queued candidates
    #[inline]
    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.deque.len()
    }

    /// Resets the queue to its initial state
    ///
    /// # Returns
    ///
    /// * `&mut Self` - The queue object
    #[inline]
    pub fn reset(&mut self) -> &mut Self {
        self.deque.clear();
        self
    }

    /// Returns true if the queue is empty
    #[inline]
    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.deque.is_empty()
    }
}
