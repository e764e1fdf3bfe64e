//! Conversions between core types and the editor / renderer wire shapes.
//!
//! The editor hands over a [`GraphSpec`]; the renderer receives a
//! [`RenderFrame`] with plain highlight flags and does its own layout and
//! colouring.

use serde::{Deserialize, Serialize};
use stepgraph_algo::{Distance, Run, RunSummary};
use stepgraph_graph::{Graph, NodeId, Weight};

use crate::error::{Error, Result};
use crate::playback::PlaybackStatus;
use crate::replay::VisualState;

/// Graph as sent by the editor or a testcase loader.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphSpec {
    #[serde(default)]
    pub nodes: Vec<NodeId>,
    #[serde(default)]
    pub edges: Vec<EdgeSpec>,
}

/// One edge of a [`GraphSpec`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeSpec {
    pub u: NodeId,
    pub v: NodeId,
    #[serde(default = "default_weight")]
    pub w: Weight,
}

fn default_weight() -> Weight {
    1
}

impl GraphSpec {
    /// Build the graph: listed nodes first, then edges in order.
    ///
    /// Repeated pairs overwrite earlier weights. Empty labels are rejected.
    pub fn to_graph(&self) -> Result<Graph> {
        let labels = self
            .nodes
            .iter()
            .chain(self.edges.iter().flat_map(|edge| [&edge.u, &edge.v]));
        for label in labels {
            if label.is_empty() {
                return Err(Error::EmptyLabel);
            }
        }

        let mut graph = Graph::new();
        for node in &self.nodes {
            graph.add_node(node.clone());
        }
        for edge in &self.edges {
            graph.add_edge(edge.u.clone(), edge.v.clone(), edge.w);
        }
        Ok(graph)
    }
}

impl From<&Graph> for GraphSpec {
    fn from(graph: &Graph) -> Self {
        Self {
            nodes: graph.nodes().to_vec(),
            edges: graph
                .edges()
                .iter()
                .map(|edge| EdgeSpec {
                    u: edge.from.clone(),
                    v: edge.to.clone(),
                    w: edge.weight,
                })
                .collect(),
        }
    }
}

/// A node as the renderer sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderNode {
    pub id: NodeId,
    pub highlighted: bool,
    pub current: bool,
    /// Distance label while a Dijkstra snapshot is shown.
    pub distance: Option<Distance>,
}

/// An edge as the renderer sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderEdge {
    pub from: NodeId,
    pub to: NodeId,
    pub weight: Weight,
    pub highlighted: bool,
    /// Under examination at this exact step.
    pub focused: bool,
}

/// Everything the renderer needs for one step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderFrame {
    pub nodes: Vec<RenderNode>,
    pub edges: Vec<RenderEdge>,
    pub message: String,
    pub status: PlaybackStatus,
    /// Shown regardless of the cursor position.
    pub summary: Option<RunSummary>,
    pub report: Vec<String>,
}

impl RenderFrame {
    /// Overlay `state` on every node and edge of `graph`, in graph order.
    pub fn new(graph: &Graph, state: &VisualState, status: PlaybackStatus) -> Self {
        let nodes = graph
            .nodes()
            .iter()
            .map(|id| RenderNode {
                id: id.clone(),
                highlighted: state.highlighted_nodes.contains(id),
                current: state.current_node.as_ref() == Some(id),
                distance: state
                    .distances
                    .as_ref()
                    .and_then(|table| table.get(id).copied()),
            })
            .collect();

        let edges = graph
            .edges()
            .iter()
            .map(|edge| {
                let key = edge.key();
                RenderEdge {
                    from: edge.from.clone(),
                    to: edge.to.clone(),
                    weight: edge.weight,
                    highlighted: state.highlighted_edges.contains(&key),
                    focused: state.focus_edge.as_ref() == Some(&key),
                }
            })
            .collect();

        Self {
            nodes,
            edges,
            message: state.message.clone(),
            status,
            summary: None,
            report: Vec::new(),
        }
    }

    /// Attach the summary of the loaded run.
    pub fn with_run(mut self, run: &Run) -> Self {
        self.summary = Some(run.summary.clone());
        self.report = run.report();
        self
    }
}
