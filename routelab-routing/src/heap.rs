//! Array-backed binary min-heap used as the search frontier
//!
//! There is no decrease-key. Searches push a fresh entry whenever a node's cost
//! improves and discard the superseded entries when they surface (lazy deletion).
//! Entries with equal priority come out in no particular order.

/// Minimum-ordered binary heap of `(priority, payload)` entries
#[derive(Debug, Clone)]
pub struct MinHeap<P, T> {
    entries: Vec<(P, T)>,
}

impl<P, T> Default for MinHeap<P, T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<P: PartialOrd + Copy, T> MinHeap<P, T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Number of entries, stale ones included
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Smallest priority currently stored, O(1)
    pub fn peek_min_priority(&self) -> Option<P> {
        self.entries.first().map(|(priority, _)| *priority)
    }

    /// Add an entry, O(log n)
    pub fn insert(&mut self, priority: P, payload: T) {
        self.entries.push((priority, payload));
        self.sift_up(self.entries.len() - 1);
    }

    /// Remove and return the entry with the smallest priority, O(log n)
    pub fn extract_min(&mut self) -> Option<(P, T)> {
        let last = self.entries.len().checked_sub(1)?;
        self.entries.swap(0, last);
        let min = self.entries.pop();
        if !self.entries.is_empty() {
            self.sift_down(0);
        }
        min
    }

    fn sift_up(&mut self, mut pos: usize) {
        while pos > 0 {
            let parent = (pos - 1) / 2;
            if self.entries[pos].0 < self.entries[parent].0 {
                self.entries.swap(pos, parent);
                pos = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, mut pos: usize) {
        let len = self.entries.len();
        loop {
            let left = 2 * pos + 1;
            if left >= len {
                break;
            }
            let right = left + 1;
            let smaller = if right < len && self.entries[right].0 < self.entries[left].0 {
                right
            } else {
                left
            };

            if self.entries[smaller].0 < self.entries[pos].0 {
                self.entries.swap(pos, smaller);
                pos = smaller;
            } else {
                break;
            }
        }
    }
}
