//! Run requests: validation, dispatch and summaries.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use stepgraph_graph::{Graph, GraphError, NodeId, Weight};
use thiserror::Error;

use crate::events::{Distance, EventLog};
use crate::outcome::SelectedEdge;
use crate::{bfs, dfs, dijkstra, kruskal, prim};

/// Result type for run requests.
pub type Result<T> = std::result::Result<T, RunError>;

/// Why a run request was rejected.
///
/// Every variant except `Graph` is raised before any engine starts, so a
/// rejected request never produces a log.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RunError {
    /// No start node (or an empty label) for an algorithm that needs one.
    #[error("{0} needs a start node")]
    MissingStart(AlgorithmKind),

    /// Dijkstra without a target.
    #[error("{0} needs a target node")]
    MissingTarget(AlgorithmKind),

    /// A requested node is not in the graph.
    #[error("node {0} is not in the graph")]
    UnknownNode(NodeId),

    /// Dijkstra from a node to itself.
    #[error("start and target are both {0}")]
    SameStartAndTarget(NodeId),

    /// Spanning trees need something to span.
    #[error("{algorithm} needs at least 2 nodes, graph has {found}")]
    TooFewNodes { algorithm: AlgorithmKind, found: usize },

    /// Unrecognised algorithm name.
    #[error("unknown algorithm: {0}")]
    UnknownAlgorithm(String),

    /// An engine hit an internal inconsistency or a weight overflow and aborted.
    #[error("run aborted: {0}")]
    Graph(#[from] GraphError),
}

/// The algorithms a run can use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlgorithmKind {
    Dfs,
    Bfs,
    Dijkstra,
    Kruskal,
    Prim,
}

impl AlgorithmKind {
    /// Every algorithm, in menu order.
    pub const ALL: [AlgorithmKind; 5] = [
        AlgorithmKind::Dfs,
        AlgorithmKind::Bfs,
        AlgorithmKind::Dijkstra,
        AlgorithmKind::Kruskal,
        AlgorithmKind::Prim,
    ];

    /// Whether a start node must be supplied.
    pub fn needs_start(&self) -> bool {
        matches!(self, AlgorithmKind::Dfs | AlgorithmKind::Bfs | AlgorithmKind::Dijkstra)
    }

    /// Whether a target node must be supplied.
    pub fn needs_target(&self) -> bool {
        matches!(self, AlgorithmKind::Dijkstra)
    }

    fn builds_tree(&self) -> bool {
        matches!(self, AlgorithmKind::Kruskal | AlgorithmKind::Prim)
    }
}

impl fmt::Display for AlgorithmKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AlgorithmKind::Dfs => "DFS",
            AlgorithmKind::Bfs => "BFS",
            AlgorithmKind::Dijkstra => "Dijkstra",
            AlgorithmKind::Kruskal => "MST (Kruskal)",
            AlgorithmKind::Prim => "MST (Prim)",
        })
    }
}

impl FromStr for AlgorithmKind {
    type Err = RunError;

    fn from_str(name: &str) -> Result<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "dfs" => Ok(AlgorithmKind::Dfs),
            "bfs" => Ok(AlgorithmKind::Bfs),
            "dijkstra" => Ok(AlgorithmKind::Dijkstra),
            "kruskal" => Ok(AlgorithmKind::Kruskal),
            "prim" => Ok(AlgorithmKind::Prim),
            _ => Err(RunError::UnknownAlgorithm(name.to_owned())),
        }
    }
}

/// What the user asked to run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunRequest {
    pub algorithm: AlgorithmKind,
    #[serde(default)]
    pub start: Option<NodeId>,
    #[serde(default)]
    pub target: Option<NodeId>,
}

impl RunRequest {
    pub fn new(algorithm: AlgorithmKind) -> Self {
        Self {
            algorithm,
            start: None,
            target: None,
        }
    }

    pub fn with_start(mut self, start: impl Into<NodeId>) -> Self {
        self.start = Some(start.into());
        self
    }

    pub fn with_target(mut self, target: impl Into<NodeId>) -> Self {
        self.target = Some(target.into());
        self
    }

    fn start(&self) -> Option<&NodeId> {
        self.start.as_ref().filter(|node| !node.is_empty())
    }

    fn target(&self) -> Option<&NodeId> {
        self.target.as_ref().filter(|node| !node.is_empty())
    }
}

/// Algorithm-specific outcome, kept beside the log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RunSummary {
    /// DFS/BFS visiting order.
    Traversal { order: Vec<NodeId> },

    /// Dijkstra result. `distance` is `Unreachable` and `path` empty when
    /// there is no path.
    ShortestPath { distance: Distance, path: Vec<NodeId> },

    /// Kruskal/Prim result.
    SpanningTree {
        total_weight: Weight,
        edges: Vec<SelectedEdge>,
    },
}

impl RunSummary {
    /// True only for a shortest-path summary with no path.
    pub fn is_unreachable(&self) -> bool {
        matches!(
            self,
            RunSummary::ShortestPath {
                distance: Distance::Unreachable,
                ..
            }
        )
    }
}

/// One completed run: its log and its summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Run {
    pub algorithm: AlgorithmKind,
    pub log: EventLog,
    pub summary: RunSummary,
}

impl Run {
    /// Result lines for display next to the graph.
    pub fn report(&self) -> Vec<String> {
        match &self.summary {
            RunSummary::Traversal { order } => {
                vec![format!("{} traversal order: {}", self.algorithm, join(order))]
            }
            RunSummary::ShortestPath { distance, path } => match distance {
                Distance::Finite(total) => vec![
                    format!("Shortest path: {}", join(path)),
                    format!("Total distance: {total}"),
                ],
                Distance::Unreachable => vec!["No path found.".to_owned()],
            },
            RunSummary::SpanningTree {
                total_weight,
                edges,
            } => {
                let edges: Vec<_> = edges.iter().map(SelectedEdge::to_string).collect();
                vec![
                    format!("MST total weight: {total_weight}"),
                    format!("Edges in MST: {}", edges.join(", ")),
                ]
            }
        }
    }
}

impl fmt::Display for Run {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.report().join("\n"))
    }
}

fn join(nodes: &[NodeId]) -> String {
    nodes
        .iter()
        .map(NodeId::as_str)
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// Check a request against a graph without running anything.
pub fn validate(graph: &Graph, request: &RunRequest) -> Result<()> {
    let algorithm = request.algorithm;

    if algorithm.builds_tree() && graph.node_count() < 2 {
        return Err(RunError::TooFewNodes {
            algorithm,
            found: graph.node_count(),
        });
    }

    let start = request.start();
    if algorithm.needs_start() && start.is_none() {
        return Err(RunError::MissingStart(algorithm));
    }
    if let Some(start) = start {
        ensure_member(graph, start)?;
    }

    if algorithm.needs_target() {
        let target = request.target().ok_or(RunError::MissingTarget(algorithm))?;
        ensure_member(graph, target)?;
        if Some(target) == start {
            return Err(RunError::SameStartAndTarget(target.clone()));
        }
    }
    Ok(())
}

fn ensure_member(graph: &Graph, node: &NodeId) -> Result<()> {
    if graph.contains(node) {
        Ok(())
    } else {
        Err(RunError::UnknownNode(node.clone()))
    }
}

/// Validate `request` and, if it is sound, run it to completion.
pub fn run(graph: &Graph, request: &RunRequest) -> Result<Run> {
    validate(graph, request)?;

    let algorithm = request.algorithm;
    let start = request.start();
    let missing_start = || RunError::MissingStart(algorithm);

    let (log, summary) = match algorithm {
        AlgorithmKind::Dfs | AlgorithmKind::Bfs => {
            let start = start.ok_or_else(missing_start)?;
            let traversal = if algorithm == AlgorithmKind::Dfs {
                dfs::run(graph, start)?
            } else {
                bfs::run(graph, start)?
            };
            (
                traversal.log,
                RunSummary::Traversal {
                    order: traversal.order,
                },
            )
        }
        AlgorithmKind::Dijkstra => {
            let start = start.ok_or_else(missing_start)?;
            let target = request
                .target()
                .ok_or(RunError::MissingTarget(algorithm))?;
            let shortest = dijkstra::run(graph, start, target)?;
            (
                shortest.log,
                RunSummary::ShortestPath {
                    distance: shortest.distance,
                    path: shortest.path,
                },
            )
        }
        AlgorithmKind::Kruskal | AlgorithmKind::Prim => {
            let tree = if algorithm == AlgorithmKind::Kruskal {
                kruskal::run(graph)?
            } else {
                prim::run(graph, start)?
            };
            (
                tree.log,
                RunSummary::SpanningTree {
                    total_weight: tree.total_weight,
                    edges: tree.edges,
                },
            )
        }
    };

    tracing::debug!(%algorithm, events = log.len(), "run complete");
    Ok(Run {
        algorithm,
        log,
        summary,
    })
}
