//! Stepgraph Graph Model
//!
//! Small, static, weighted undirected graphs plus the two support structures
//! the step-recording engines are built on.
//!
//! # Graph
//!
//! Nodes are opaque labels kept in insertion order. Each unordered node pair
//! holds at most one edge: adding `(v, u)` after `(u, v)` overwrites the
//! weight instead of creating a parallel edge. Adjacency is kept in edge
//! insertion order, and that order decides every traversal tie-break.
//!
//! # Support structures
//!
//! - [`UnionFind`]: disjoint sets with path compression (Kruskal)
//! - [`MinQueue`]: binary min-heap without decrease-key; stale entries are
//!   pushed as duplicates and skipped by the caller at pop time (Dijkstra, Prim)
//!
//! # Samples
//!
//! [`samples`] holds the built-in teaching graphs.

mod graph;
mod queue;
mod union_find;
pub mod samples;

pub use graph::{Edge, EdgeKey, Graph, GraphError, Neighbors, NodeId, Result, Weight};
pub use queue::MinQueue;
pub use samples::Sample;
pub use union_find::UnionFind;
