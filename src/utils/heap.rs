use ahash::RandomState;
use alloc::vec::Vec;
use core::marker::PhantomData;
use hashbrown::HashMap;
use ordered_float::OrderedFloat;

use super::OrderPolicy;

/// Moves the element at `index` toward the root until its parent precedes it.
///
/// # Returns
///
/// * `usize` - The final position of the element
pub fn sift_up<T, O>(heap: &mut [T], mut index: usize) -> usize
where
    T: PartialOrd + Copy,
    O: OrderPolicy<T>,
{
    let value = heap[index];
    while index > 0 {
        let parent = (index - 1) / 2;
        if !O::precedes(&value, &heap[parent]) {
            break;
        }
        heap[index] = heap[parent];
        index = parent;
    }
    heap[index] = value;
    index
}

/// Moves the element at `index` toward the leaves until no child precedes it.
///
/// # Returns
///
/// * `usize` - The final position of the element
pub fn sift_down<T, O>(heap: &mut [T], mut index: usize) -> usize
where
    T: PartialOrd + Copy,
    O: OrderPolicy<T>,
{
    let len = heap.len();
    let value = heap[index];
    loop {
        let left = 2 * index + 1;
        if left >= len {
            break;
        }
        let right = left + 1;
        let best = if right < len && O::precedes(&heap[right], &heap[left]) {
            right
        } else {
            left
        };
        if !O::precedes(&heap[best], &value) {
            break;
        }
        heap[index] = heap[best];
        index = best;
    }
    heap[index] = value;
    index
}

/// Array-backed binary heap of samples supporting removal by value
///
/// A multiplicity index answers membership in O(1); the slot holding a value
/// is then found by a scan of this heap only.
#[derive(Debug, Clone)]
pub struct Heap<O> {
    slots: Vec<f64>,
    counts: HashMap<OrderedFloat<f64>, usize, RandomState>,
    _order: PhantomData<O>,
}

impl<O: OrderPolicy<f64>> Heap<O> {
    /// Creates an empty heap with room for `capacity` samples
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            counts: HashMap::with_capacity_and_hasher(capacity, RandomState::default()),
            _order: PhantomData,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Returns the extreme element
    #[inline]
    pub fn peek(&self) -> Option<f64> {
        self.slots.first().copied()
    }

    /// Returns true if at least one occurrence of `value` is stored
    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        self.counts.contains_key(&OrderedFloat(value))
    }

    pub fn push(&mut self, value: f64) {
        *self.counts.entry(OrderedFloat(value)).or_insert(0) += 1;
        self.slots.push(value);
        let last = self.slots.len() - 1;
        sift_up::<f64, O>(&mut self.slots, last);
    }

    /// Removes and returns the extreme element
    pub fn pop(&mut self) -> Option<f64> {
        let top = self.peek()?;
        self.remove_at(0);
        Some(top)
    }

    /// Removes one occurrence of `value`
    ///
    /// # Returns
    ///
    /// * `bool` - True if an occurrence was found and removed
    pub fn remove(&mut self, value: f64) -> bool {
        if !self.contains(value) {
            return false;
        }
        match self.slots.iter().position(|&v| v == value) {
            Some(index) => {
                self.remove_at(index);
                true
            }
            None => false,
        }
    }

    /// Replaces the slot with the last element and restores heap order around it
    fn remove_at(&mut self, index: usize) {
        let removed = self.slots.swap_remove(index);
        self.forget(removed);
        if index < self.slots.len() {
            // The moved element may belong above or below its new slot
            if sift_down::<f64, O>(&mut self.slots, index) == index {
                sift_up::<f64, O>(&mut self.slots, index);
            }
        }
    }

    fn forget(&mut self, value: f64) {
        let key = OrderedFloat(value);
        if let Some(count) = self.counts.get_mut(&key) {
            *count -= 1;
            if *count == 0 {
                self.counts.remove(&key);
            }
        }
    }

    /// Returns the stored samples in heap order
    #[inline]
    #[allow(dead_code)]
    pub fn as_slice(&self) -> &[f64] {
        &self.slots
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.counts.clear();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::utils::{Max, Min};

    fn is_heap<O: OrderPolicy<f64>>(heap: &[f64]) -> bool {
        (1..heap.len()).all(|i| !O::precedes(&heap[i], &heap[(i - 1) / 2]))
    }

    #[test]
    fn test_push_pop_min_order() {
        let mut heap = Heap::<Min>::new(8);
        for v in [5.0, 1.0, 4.0, 2.0, 3.0] {
            heap.push(v);
        }
        let drained: Vec<f64> = core::iter::from_fn(|| heap.pop()).collect();
        assert_eq!(drained, vec![1.0, 2.0, 3.0, 4.0, 5.0]);
        assert!(heap.is_empty());
    }

    #[test]
    fn test_push_pop_max_order() {
        let mut heap = Heap::<Max>::new(8);
        for v in [5.0, 1.0, 4.0, 2.0, 3.0] {
            heap.push(v);
        }
        assert_eq!(heap.peek(), Some(5.0));
        assert_eq!(heap.pop(), Some(5.0));
        assert_eq!(heap.pop(), Some(4.0));
        assert_eq!(heap.len(), 3);
    }

    #[test]
    fn test_remove_interior_keeps_heap_order() {
        // Removing 11 pulls the last leaf (4) under 10, so it has to move up
        let mut heap = Heap::<Min>::new(8);
        for v in [1.0, 10.0, 2.0, 11.0, 12.0, 3.0, 4.0] {
            heap.push(v);
        }
        assert!(heap.remove(11.0));
        assert!(is_heap::<Min>(heap.as_slice()));
        assert_eq!(heap.as_slice(), &[1.0, 4.0, 2.0, 10.0, 12.0, 3.0]);
        assert!(!heap.contains(11.0));

        let drained: Vec<f64> = core::iter::from_fn(|| heap.pop()).collect();
        let mut sorted = drained.clone();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(drained, sorted);
        assert_eq!(drained.len(), 6);
    }

    #[test]
    fn test_remove_duplicates_one_at_a_time() {
        let mut heap = Heap::<Max>::new(4);
        heap.push(2.0);
        heap.push(2.0);
        heap.push(1.0);

        assert!(heap.remove(2.0));
        assert!(heap.contains(2.0));
        assert!(heap.remove(2.0));
        assert!(!heap.contains(2.0));
        assert!(!heap.remove(2.0));
        assert_eq!(heap.as_slice(), &[1.0]);
    }

    #[test]
    fn test_remove_missing_value() {
        let mut heap = Heap::<Min>::new(2);
        heap.push(1.0);
        assert!(!heap.remove(3.0));
        assert_eq!(heap.len(), 1);
    }

    #[test]
    fn test_signed_zero_is_one_value() {
        let mut heap = Heap::<Min>::new(2);
        heap.push(-0.0);
        assert!(heap.contains(0.0));
        assert!(heap.remove(0.0));
        assert!(heap.is_empty());
    }

    #[test]
    fn test_clear() {
        let mut heap = Heap::<Min>::new(2);
        heap.push(1.0);
        heap.push(2.0);
        heap.clear();
        assert!(heap.is_empty());
        assert!(!heap.contains(1.0));
        assert_eq!(heap.peek(), None);
    }
}
