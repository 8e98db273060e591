//! Binary min-heap priority queue.
//!
//! Ordering is supplied by the caller as a comparison function, so the
//! same queue can order values by any key (e.g. Huffman nodes by
//! frequency) without wrapper types. `insert` and `extract` are both
//! `O(log k)` for `k` queued items.

use std::cmp::Ordering;
use std::fmt;

/// A min-priority queue over a caller-supplied total order.
pub struct MinPq<T, F = fn(&T, &T) -> Ordering>
where
    F: Fn(&T, &T) -> Ordering,
{
    /// Heap-ordered storage: `items[k] <= items[2k + 1], items[2k + 2]`.
    items: Vec<T>,
    compare: F,
}

impl<T: Ord> MinPq<T> {
    /// Create an empty queue ordered by `T`'s natural order.
    pub fn new() -> Self {
        Self::with_comparator(T::cmp)
    }
}

impl<T: Ord> Default for MinPq<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, F> MinPq<T, F>
where
    F: Fn(&T, &T) -> Ordering,
{
    /// Create an empty queue ordered by `compare`.
    pub fn with_comparator(compare: F) -> Self {
        Self {
            items: Vec::new(),
            compare,
        }
    }

    /// Number of queued items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The smallest item, without removing it.
    pub fn peek(&self) -> Option<&T> {
        self.items.first()
    }

    /// Add an item.
    pub fn insert(&mut self, item: T) {
        self.items.push(item);
        self.swim(self.items.len() - 1);
    }

    /// Remove and return the smallest item, or `None` if the queue is empty.
    pub fn extract(&mut self) -> Option<T> {
        if self.items.is_empty() {
            return None;
        }
        let min = self.items.swap_remove(0);
        self.sink(0);
        Some(min)
    }

    #[inline]
    fn less(&self, a: usize, b: usize) -> bool {
        (self.compare)(&self.items[a], &self.items[b]) == Ordering::Less
    }

    fn swim(&mut self, mut k: usize) {
        while k > 0 {
            let parent = (k - 1) / 2;
            if !self.less(k, parent) {
                break;
            }
            self.items.swap(k, parent);
            k = parent;
        }
    }

    fn sink(&mut self, mut k: usize) {
        let len = self.items.len();
        loop {
            let left = 2 * k + 1;
            if left >= len {
                break;
            }
            let right = left + 1;
            let child = if right < len && self.less(right, left) {
                right
            } else {
                left
            };
            if !self.less(child, k) {
                break;
            }
            self.items.swap(k, child);
            k = child;
        }
    }
}

impl<T: fmt::Debug, F> fmt::Debug for MinPq<T, F>
where
    F: Fn(&T, &T) -> Ordering,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MinPq").field("items", &self.items).finish()
    }
}

impl<T, F> Extend<T> for MinPq<T, F>
where
    F: Fn(&T, &T) -> Ordering,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.insert(item);
        }
    }
}
