//! Disjoint sets over arbitrary hashable elements.

use std::collections::HashMap;
use std::hash::Hash;

/// Union-find with path compression and no rank.
///
/// Elements are registered lazily: the first `find` of an unseen element makes
/// it a singleton. `union(x, y)` always hangs the root of `x` under the root of
/// `y`, so the resulting forest depends only on the call sequence.
#[derive(Debug, Clone)]
pub struct UnionFind<T> {
    parent: HashMap<T, T>,
}

impl<T: Eq + Hash + Clone> UnionFind<T> {
    /// Create an empty structure.
    pub fn new() -> Self {
        Self {
            parent: HashMap::new(),
        }
    }

    /// Representative of the set containing `x`.
    ///
    /// Every element on the walked path is re-pointed directly at the root.
    pub fn find(&mut self, x: &T) -> T {
        let mut root = x.clone();
        loop {
            match self.parent.get(&root) {
                Some(parent) if *parent != root => root = parent.clone(),
                Some(_) => break,
                None => {
                    self.parent.insert(root.clone(), root.clone());
                    break;
                }
            }
        }

        let mut node = x.clone();
        while node != root {
            match self.parent.insert(node, root.clone()) {
                Some(next) => node = next,
                None => break,
            }
        }
        root
    }

    /// Merge the sets of `x` and `y`.
    ///
    /// Returns `false` without changes when they already share a set (the edge
    /// would close a cycle).
    pub fn union(&mut self, x: &T, y: &T) -> bool {
        let root_x = self.find(x);
        let root_y = self.find(y);
        if root_x == root_y {
            return false;
        }
        self.parent.insert(root_x, root_y);
        true
    }

    /// Whether `x` and `y` are in the same set.
    pub fn connected(&mut self, x: &T, y: &T) -> bool {
        self.find(x) == self.find(y)
    }

    /// Number of registered elements.
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }
}

impl<T: Eq + Hash + Clone> Default for UnionFind<T> {
    fn default() -> Self {
        Self::new()
    }
}
