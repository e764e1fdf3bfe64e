//! Built-in teaching graphs.
//!
//! Loading these is the job of the editor/testcase layer; they live here so
//! that tests, benches and the demo server share one set of fixtures.

use crate::{Graph, Weight};

/// A named, static graph definition.
#[derive(Debug, Clone, Copy)]
pub struct Sample {
    /// Short lookup name.
    pub name: &'static str,
    /// Human-readable title.
    pub title: &'static str,
    /// Nodes in insertion order.
    pub nodes: &'static [&'static str],
    /// Edges in insertion order.
    pub edges: &'static [(&'static str, &'static str, Weight)],
}

impl Sample {
    /// Build the graph: nodes first, then edges, both in declared order.
    pub fn graph(&self) -> Graph {
        let mut graph = Graph::new();
        for &node in self.nodes {
            graph.add_node(node);
        }
        for &(u, v, weight) in self.edges {
            graph.add_edge(u, v, weight);
        }
        graph
    }
}

/// Hexagon with a hub, unit weights. Good for DFS/BFS.
pub const HEXAGON: Sample = Sample {
    name: "hexagon",
    title: "Hexagon/Grid (DFS/BFS)",
    nodes: &["a", "b", "c", "d", "e", "f", "g"],
    edges: &[
        ("a", "b", 1),
        ("a", "f", 1),
        ("b", "c", 1),
        ("b", "g", 1),
        ("c", "d", 1),
        ("c", "g", 1),
        ("d", "e", 1),
        ("e", "f", 1),
        ("e", "g", 1),
        ("f", "g", 1),
    ],
};

/// Complete graph on five nodes, unit weights.
pub const PENTAGON: Sample = Sample {
    name: "pentagon",
    title: "Pentagon (Complete Graph)",
    nodes: &["a", "b", "c", "d", "e"],
    edges: &[
        ("a", "b", 1),
        ("a", "c", 1),
        ("a", "d", 1),
        ("a", "e", 1),
        ("b", "c", 1),
        ("b", "d", 1),
        ("b", "e", 1),
        ("c", "d", 1),
        ("c", "e", 1),
        ("d", "e", 1),
    ],
};

/// A square and a rectangle joined through a triangle, unit weights.
pub const COMPOSITE: Sample = Sample {
    name: "composite",
    title: "Composite (Square + Rect)",
    nodes: &["a", "b", "c", "d", "e", "f", "g", "h", "i", "j", "k"],
    edges: &[
        ("a", "b", 1),
        ("b", "c", 1),
        ("c", "d", 1),
        ("d", "a", 1),
        ("b", "d", 1),
        ("c", "e", 1),
        ("c", "g", 1),
        ("e", "f", 1),
        ("f", "g", 1),
        ("e", "g", 1),
        ("g", "j", 1),
        ("j", "i", 1),
        ("i", "h", 1),
        ("h", "g", 1),
        ("g", "k", 1),
        ("j", "k", 1),
        ("i", "k", 1),
        ("h", "k", 1),
    ],
};

/// Weighted source/target graph for shortest paths.
pub const WEIGHTED: Sample = Sample {
    name: "weighted",
    title: "Weighted Shortest Path",
    nodes: &["S", "A", "B", "C", "D", "E", "F", "T"],
    edges: &[
        ("S", "A", 2),
        ("S", "B", 5),
        ("S", "C", 3),
        ("A", "B", 2),
        ("A", "D", 6),
        ("B", "D", 3),
        ("B", "E", 3),
        ("B", "C", 2),
        ("B", "F", 6),
        ("C", "F", 7),
        ("D", "E", 3),
        ("D", "T", 6),
        ("E", "F", 3),
        ("E", "T", 2),
        ("F", "T", 4),
    ],
};

/// Every built-in sample, in menu order.
pub static ALL: [Sample; 4] = [HEXAGON, PENTAGON, COMPOSITE, WEIGHTED];

/// Look a sample up by name, ignoring ASCII case.
pub fn find(name: &str) -> Option<&'static Sample> {
    ALL.iter().find(|sample| sample.name.eq_ignore_ascii_case(name))
}
