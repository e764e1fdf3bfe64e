//! Weighted undirected graph with insertion-ordered adjacency.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;

use thiserror::Error;

/// Edge weight. Weights are non-negative integers so that every run is
/// exactly reproducible.
pub type Weight = u64;

/// Result type for graph lookups.
pub type Result<T> = std::result::Result<T, GraphError>;

/// Errors raised by graph lookups.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// The node is not part of the graph.
    #[error("node {0} is not in the graph")]
    UnknownNode(NodeId),

    /// Both nodes exist but are not adjacent.
    #[error("no edge between {from} and {to}")]
    NoEdge { from: NodeId, to: NodeId },

    /// A path or tree weight does not fit in a [`Weight`].
    #[error("total weight exceeds {}", Weight::MAX)]
    WeightOverflow,
}

/// An opaque node label.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct NodeId(String);

impl NodeId {
    /// Create a node id from a label.
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// The label as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the label is the empty string.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for NodeId {
    fn from(label: &str) -> Self {
        Self(label.to_owned())
    }
}

impl From<String> for NodeId {
    fn from(label: String) -> Self {
        Self(label)
    }
}

impl Borrow<str> for NodeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An unordered node pair.
///
/// `EdgeKey::new(u, v) == EdgeKey::new(v, u)`: the smaller label is always
/// stored first.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "[NodeId; 2]", into = "[NodeId; 2]")
)]
pub struct EdgeKey {
    low: NodeId,
    high: NodeId,
}

impl EdgeKey {
    /// Build the key for the pair `{u, v}`.
    pub fn new(u: impl Into<NodeId>, v: impl Into<NodeId>) -> Self {
        let (u, v) = (u.into(), v.into());
        if u <= v {
            Self { low: u, high: v }
        } else {
            Self { low: v, high: u }
        }
    }

    /// Both endpoints, smaller label first.
    pub fn endpoints(&self) -> (&NodeId, &NodeId) {
        (&self.low, &self.high)
    }

    /// Whether `node` is one of the endpoints.
    pub fn contains(&self, node: &NodeId) -> bool {
        &self.low == node || &self.high == node
    }

    /// Whether both endpoints are the same node.
    pub fn is_loop(&self) -> bool {
        self.low == self.high
    }
}

impl From<[NodeId; 2]> for EdgeKey {
    fn from([u, v]: [NodeId; 2]) -> Self {
        Self::new(u, v)
    }
}

impl From<EdgeKey> for [NodeId; 2] {
    fn from(key: EdgeKey) -> Self {
        [key.low, key.high]
    }
}

impl fmt::Display for EdgeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.low, self.high)
    }
}

/// A stored edge, in the orientation it was first added.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edge {
    pub from: NodeId,
    pub to: NodeId,
    pub weight: Weight,
}

impl Edge {
    /// The unordered key of this edge.
    pub fn key(&self) -> EdgeKey {
        EdgeKey::new(self.from.clone(), self.to.clone())
    }

    /// The endpoint opposite `node`. For a self-loop this is `node` itself.
    fn opposite(&self, node: &NodeId) -> &NodeId {
        if &self.from == node {
            &self.to
        } else {
            &self.from
        }
    }
}

/// Weighted undirected graph.
///
/// At most one edge per unordered pair. Node order and per-node adjacency
/// order are both insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Graph {
    nodes: Vec<NodeId>,
    index: HashMap<NodeId, usize>,
    edges: Vec<Edge>,
    edge_index: HashMap<EdgeKey, usize>,
    /// Edge positions incident to each node, in insertion order.
    adjacency: Vec<Vec<usize>>,
}

impl Graph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node. Does nothing if it is already present.
    pub fn add_node(&mut self, id: impl Into<NodeId>) {
        self.slot(id.into());
    }

    /// Add an undirected edge, creating missing endpoints.
    ///
    /// If `{u, v}` is already connected only the weight is replaced; the edge
    /// keeps its original position in every adjacency list. Returns `true`
    /// when a new edge was created.
    pub fn add_edge(&mut self, u: impl Into<NodeId>, v: impl Into<NodeId>, weight: Weight) -> bool {
        let (u, v) = (u.into(), v.into());
        let key = EdgeKey::new(u.clone(), v.clone());

        if let Some(&existing) = self.edge_index.get(&key) {
            self.edges[existing].weight = weight;
            return false;
        }

        let ui = self.slot(u.clone());
        let vi = self.slot(v.clone());
        let position = self.edges.len();
        self.edges.push(Edge { from: u, to: v, weight });
        self.edge_index.insert(key, position);

        self.adjacency[ui].push(position);
        if vi != ui {
            self.adjacency[vi].push(position);
        }
        true
    }

    /// Neighbours of `u` with the connecting weight, in edge insertion order.
    pub fn neighbors(&self, u: &NodeId) -> Result<Neighbors<'_>> {
        let position = self.position(u)?;
        Ok(Neighbors {
            graph: self,
            node: &self.nodes[position],
            incident: self.adjacency[position].iter(),
        })
    }

    /// Weight of the edge `{u, v}`.
    pub fn weight(&self, u: &NodeId, v: &NodeId) -> Result<Weight> {
        self.position(u)?;
        self.position(v)?;
        self.edge_index
            .get(&EdgeKey::new(u.clone(), v.clone()))
            .map(|&position| self.edges[position].weight)
            .ok_or_else(|| GraphError::NoEdge {
                from: u.clone(),
                to: v.clone(),
            })
    }

    /// Number of edges incident to `u`.
    pub fn degree(&self, u: &NodeId) -> Result<usize> {
        Ok(self.adjacency[self.position(u)?].len())
    }

    /// Whether `u` is a node of this graph.
    pub fn contains(&self, u: &NodeId) -> bool {
        self.index.contains_key(u)
    }

    /// All nodes in insertion order.
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    /// All edges in insertion order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// The first node ever added.
    pub fn first_node(&self) -> Option<&NodeId> {
        self.nodes.first()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn position(&self, u: &NodeId) -> Result<usize> {
        self.index
            .get(u)
            .copied()
            .ok_or_else(|| GraphError::UnknownNode(u.clone()))
    }

    fn slot(&mut self, id: NodeId) -> usize {
        if let Some(&position) = self.index.get(&id) {
            return position;
        }
        let position = self.nodes.len();
        self.index.insert(id.clone(), position);
        self.nodes.push(id);
        self.adjacency.push(Vec::new());
        position
    }
}

impl<S: Into<NodeId>> FromIterator<(S, S, Weight)> for Graph {
    fn from_iter<I: IntoIterator<Item = (S, S, Weight)>>(iter: I) -> Self {
        let mut graph = Graph::new();
        for (u, v, weight) in iter {
            graph.add_edge(u, v, weight);
        }
        graph
    }
}

/// Iterator over `(neighbour, weight)` pairs of one node.
#[derive(Debug, Clone)]
pub struct Neighbors<'a> {
    graph: &'a Graph,
    node: &'a NodeId,
    incident: std::slice::Iter<'a, usize>,
}

impl<'a> Iterator for Neighbors<'a> {
    type Item = (&'a NodeId, Weight);

    fn next(&mut self) -> Option<Self::Item> {
        let edge = &self.graph.edges[*self.incident.next()?];
        Some((edge.opposite(self.node), edge.weight))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.incident.size_hint()
    }
}

impl ExactSizeIterator for Neighbors<'_> {}
