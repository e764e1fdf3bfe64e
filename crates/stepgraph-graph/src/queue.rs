//! Min-priority queue with lazy invalidation.
//!
//! There is no decrease-key. A caller that improves a key pushes a second
//! entry and drops the outdated one when it surfaces, by checking its own
//! settled/visited set at pop time.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Binary min-heap of `(key, payload)` entries.
///
/// Equal keys pop in payload order, so the pop sequence is fully determined
/// by the pushed entries.
#[derive(Debug, Clone)]
pub struct MinQueue<K, P> {
    heap: BinaryHeap<Reverse<(K, P)>>,
}

impl<K: Ord, P: Ord> MinQueue<K, P> {
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
        }
    }

    /// Insert an entry. Duplicates of an existing payload are allowed.
    pub fn push(&mut self, key: K, payload: P) {
        self.heap.push(Reverse((key, payload)));
    }

    /// Remove and return the entry with the smallest key.
    pub fn pop(&mut self) -> Option<(K, P)> {
        self.heap.pop().map(|Reverse(entry)| entry)
    }

    /// The entry `pop` would return next.
    pub fn peek(&self) -> Option<(&K, &P)> {
        self.heap.peek().map(|Reverse((key, payload))| (key, payload))
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

impl<K: Ord, P: Ord> Default for MinQueue<K, P> {
    fn default() -> Self {
        Self::new()
    }
}
