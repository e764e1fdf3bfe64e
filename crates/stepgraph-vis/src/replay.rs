//! Replay: rebuild the highlight state at any cursor from the event log.

use std::collections::BTreeSet;

use serde::Serialize;
use stepgraph_algo::{DistanceTable, EventLog, StepEvent};
use stepgraph_graph::{EdgeKey, NodeId};

/// Message shown while the cursor is idle.
pub const IDLE_MESSAGE: &str = "Pick an algorithm and start a run.";

/// What the renderer should highlight at one cursor position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VisualState {
    pub highlighted_nodes: BTreeSet<NodeId>,
    /// Includes the focus edge, if any.
    pub highlighted_edges: BTreeSet<EdgeKey>,
    /// Edge examined by the event under the cursor (`CheckEdge`/`Skip`).
    /// Not sticky: it is only present while the cursor sits on that event.
    pub focus_edge: Option<EdgeKey>,
    /// Node most recently settled by Dijkstra.
    pub current_node: Option<NodeId>,
    /// Note of the event under the cursor.
    pub message: String,
    /// Last distance snapshot seen in the prefix.
    pub distances: Option<DistanceTable>,
}

impl VisualState {
    /// State for the idle cursor.
    pub fn idle() -> Self {
        Self {
            message: IDLE_MESSAGE.to_owned(),
            ..Self::default()
        }
    }

    /// Fold one event into the sticky part of the state.
    ///
    /// Transient highlights are not touched here; see [`derive`].
    pub fn apply(&mut self, event: &StepEvent) {
        match event {
            StepEvent::NodeVisited { node, .. }
            | StepEvent::Update { node, .. }
            | StepEvent::Finished { node, .. }
            | StepEvent::OnPath { node, .. } => {
                self.highlighted_nodes.insert(node.clone());
            }
            StepEvent::Processing { node, .. } => {
                self.highlighted_nodes.insert(node.clone());
                self.current_node = Some(node.clone());
            }
            StepEvent::EdgeExplored { edge, .. }
            | StepEvent::EdgeDiscovered { edge, .. }
            | StepEvent::AddEdge { edge, .. }
            | StepEvent::PathEdge { edge, .. } => {
                self.highlighted_edges.insert(edge.clone());
            }
            StepEvent::CheckEdge { .. } | StepEvent::Skip { .. } => {}
        }

        if let Some(snapshot) = event.snapshot() {
            self.distances = Some(snapshot.clone());
        }
        self.message = event.note().to_owned();
    }

    /// Add the transient highlight of the event under the cursor.
    fn focus(&mut self, event: &StepEvent) {
        if let StepEvent::CheckEdge { edge, .. } | StepEvent::Skip { edge, .. } = event {
            self.highlighted_edges.insert(edge.clone());
            self.focus_edge = Some(edge.clone());
        }
    }
}

/// State after folding `log[0..=cursor]` from scratch.
///
/// `None` is the idle cursor. A cursor beyond the log is clamped to its last
/// event; an empty log is always idle.
pub fn derive(log: &EventLog, cursor: Option<usize>) -> VisualState {
    let Some(cursor) = cursor.zip(log.last_index()).map(|(at, last)| at.min(last)) else {
        return VisualState::idle();
    };

    let mut state = VisualState::default();
    for event in log.prefix(cursor) {
        state.apply(event);
    }
    state.focus(&log[cursor]);
    state
}
