//! Per-engine results: the event log plus what the run computed.

use std::fmt;

use serde::{Deserialize, Serialize};
use stepgraph_graph::{EdgeKey, NodeId, Weight};

use crate::events::{Distance, EventLog};

/// Result of a DFS or BFS run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Traversal {
    pub log: EventLog,
    /// Nodes in the order the traversal reported them.
    pub order: Vec<NodeId>,
}

/// Result of a Dijkstra run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortestPath {
    pub log: EventLog,
    /// `Unreachable` when the target is not connected to the start.
    pub distance: Distance,
    /// Start to target inclusive; empty when unreachable.
    pub path: Vec<NodeId>,
}

/// Result of a Kruskal or Prim run.
///
/// For a disconnected graph this is a forest (Kruskal) or the tree of the
/// start component (Prim).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpanningTree {
    pub log: EventLog,
    pub total_weight: Weight,
    /// Selected edges in selection order.
    pub edges: Vec<SelectedEdge>,
}

/// An edge chosen for a spanning tree, in the orientation it was examined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedEdge {
    pub from: NodeId,
    pub to: NodeId,
    pub weight: Weight,
}

impl SelectedEdge {
    pub fn key(&self) -> EdgeKey {
        EdgeKey::new(self.from.clone(), self.to.clone())
    }
}

impl fmt::Display for SelectedEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.from, self.to)
    }
}
