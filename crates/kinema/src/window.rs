//! Fixed-capacity sample history with oldest-first eviction.

use std::collections::VecDeque;

/// Samples reserved up front; larger windows grow on demand.
const PREALLOCATE: usize = 1024;

/// An ordered history of at most `capacity` samples.
///
/// Appending to a full window drops the oldest sample. Clearing empties the
/// window completely; nothing from a previous run is kept.
///
/// # Example
///
/// ```rust
/// use kinema::SlidingWindow;
///
/// let mut w = SlidingWindow::new(3);
/// for v in 1..=4 {
///     w.push(v);
/// }
/// assert_eq!(w.to_vec(), vec![2, 3, 4]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlidingWindow<T> {
    samples: VecDeque<T>,
    capacity: usize,
    pushed: u64,
}

impl<T> SlidingWindow<T> {
    /// Creates an empty window. A capacity of zero is treated as one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity.min(PREALLOCATE)),
            capacity,
            pushed: 0,
        }
    }

    /// Appends a sample, evicting the oldest one if the window is full.
    pub fn push(&mut self, value: T) {
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(value);
        self.pushed += 1;
    }

    /// Removes every sample and resets the append counter.
    pub fn clear(&mut self) {
        self.samples.clear();
        self.pushed = 0;
    }

    /// Maximum number of samples held.
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of samples currently held.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns true if the window holds no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Returns true once the window has started evicting.
    pub fn is_full(&self) -> bool {
        self.samples.len() == self.capacity
    }

    /// Number of samples appended since creation or the last clear.
    pub const fn appended(&self) -> u64 {
        self.pushed
    }

    /// Iterates the samples from oldest to newest.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &T> + ExactSizeIterator {
        self.samples.iter()
    }

    /// The most recently appended sample.
    pub fn latest(&self) -> Option<&T> {
        self.samples.back()
    }

    /// The sample at `index`, counting from the oldest.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.samples.get(index)
    }
}

impl<T: Clone> SlidingWindow<T> {
    /// Copies the samples out in insertion order.
    pub fn to_vec(&self) -> Vec<T> {
        self.samples.iter().cloned().collect()
    }
}

impl<'a, T> IntoIterator for &'a SlidingWindow<T> {
    type Item = &'a T;
    type IntoIter = std::collections::vec_deque::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evicts_oldest_after_capacity() {
        let mut w = SlidingWindow::new(300);
        for i in 0..301 {
            w.push(i);
        }
        assert_eq!(w.len(), 300);
        assert_eq!(w.get(0), Some(&1));
        assert_eq!(w.latest(), Some(&300));
        assert_eq!(w.appended(), 301);
    }

    #[test]
    fn huge_capacity_allocates_lazily() {
        let mut w = SlidingWindow::new(usize::MAX);
        assert_eq!(w.capacity(), usize::MAX);
        for i in 0..2000 {
            w.push(i);
        }
        assert_eq!(w.len(), 2000);
        assert_eq!(w.get(0), Some(&0));
        assert!(!w.is_full());
    }

    #[test]
    fn does_not_evict_before_full() {
        let mut w = SlidingWindow::new(4);
        w.push('a');
        w.push('b');
        assert_eq!(w.to_vec(), vec!['a', 'b']);
        assert!(!w.is_full());
    }

    #[test]
    fn clear_empties_everything() {
        let mut w = SlidingWindow::new(2);
        w.push(1.0);
        w.push(2.0);
        w.push(3.0);
        w.clear();
        assert!(w.is_empty());
        assert_eq!(w.appended(), 0);
        assert!(w.latest().is_none());

        // A fresh run fills from empty again.
        w.push(4.0);
        assert_eq!(w.to_vec(), vec![4.0]);
    }

    #[test]
    fn zero_capacity_holds_one() {
        let mut w = SlidingWindow::new(0);
        w.push(1);
        w.push(2);
        assert_eq!(w.capacity(), 1);
        assert_eq!(w.to_vec(), vec![2]);
    }

    #[test]
    fn iterates_in_insertion_order() {
        let mut w = SlidingWindow::new(3);
        for v in [5, 6, 7, 8] {
            w.push(v);
        }
        let collected: Vec<i32> = (&w).into_iter().copied().collect();
        assert_eq!(collected, vec![6, 7, 8]);
        assert_eq!(w.iter().rev().next(), Some(&8));
    }
}
