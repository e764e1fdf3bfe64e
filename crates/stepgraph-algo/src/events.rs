//! Step events and the immutable event log.

use std::collections::BTreeMap;
use std::fmt;
use std::ops::Index;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use stepgraph_graph::{EdgeKey, NodeId, Weight};

/// Tentative shortest distance to a node.
///
/// Orders every finite distance before `Unreachable`. On the wire a finite
/// distance is a plain number and `Unreachable` is the string `"inf"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Distance {
    Finite(Weight),
    Unreachable,
}

impl Distance {
    pub fn is_finite(&self) -> bool {
        matches!(self, Distance::Finite(_))
    }

    /// The finite value, if any.
    pub fn finite(&self) -> Option<Weight> {
        match self {
            Distance::Finite(value) => Some(*value),
            Distance::Unreachable => None,
        }
    }

    /// Extend by one edge, or `None` if the sum does not fit in a [`Weight`].
    pub fn checked_plus(&self, weight: Weight) -> Option<Distance> {
        match self {
            Distance::Finite(value) => value.checked_add(weight).map(Distance::Finite),
            Distance::Unreachable => Some(Distance::Unreachable),
        }
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Distance::Finite(value) => write!(f, "{value}"),
            Distance::Unreachable => f.write_str("∞"),
        }
    }
}

impl Serialize for Distance {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Distance::Finite(value) => serializer.serialize_u64(*value),
            Distance::Unreachable => serializer.serialize_str("inf"),
        }
    }
}

impl<'de> Deserialize<'de> for Distance {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Wire {
            Finite(Weight),
            Text(String),
        }

        match Wire::deserialize(deserializer)? {
            Wire::Finite(value) => Ok(Distance::Finite(value)),
            Wire::Text(text) if text == "inf" => Ok(Distance::Unreachable),
            Wire::Text(text) => Err(serde::de::Error::custom(format!(
                "expected a distance or \"inf\", got {text:?}"
            ))),
        }
    }
}

/// Distance of every node at one instant of a Dijkstra run.
pub type DistanceTable = BTreeMap<NodeId, Distance>;

/// Kind tag of a [`StepEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    NodeVisited,
    EdgeExplored,
    EdgeDiscovered,
    Processing,
    Update,
    CheckEdge,
    Skip,
    AddEdge,
    Finished,
    PathEdge,
    OnPath,
}

/// What an event is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subject<'a> {
    Node(&'a NodeId),
    Edge(&'a EdgeKey),
}

/// One fact emitted while an algorithm runs.
///
/// Only the Dijkstra kinds `Processing` and `Update` carry a distance
/// snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StepEvent {
    /// A node was reached for the first time.
    NodeVisited { node: NodeId, note: String },

    /// DFS followed a tree edge.
    EdgeExplored { edge: EdgeKey, note: String },

    /// BFS discovered a node through this edge.
    EdgeDiscovered { edge: EdgeKey, note: String },

    /// Dijkstra settled a node.
    Processing {
        node: NodeId,
        distances: DistanceTable,
        note: String,
    },

    /// Dijkstra lowered a tentative distance.
    Update {
        node: NodeId,
        distances: DistanceTable,
        note: String,
    },

    /// An edge is being examined.
    CheckEdge { edge: EdgeKey, note: String },

    /// An examined edge was rejected (it would close a cycle).
    Skip { edge: EdgeKey, note: String },

    /// An edge joined the spanning tree.
    AddEdge { edge: EdgeKey, note: String },

    /// Dijkstra settled the target and stopped.
    Finished { node: NodeId, note: String },

    /// An edge of the final shortest path.
    PathEdge { edge: EdgeKey, note: String },

    /// A node of the final shortest path.
    OnPath { node: NodeId, note: String },
}

impl StepEvent {
    /// Kind tag.
    pub fn kind(&self) -> EventKind {
        match self {
            StepEvent::NodeVisited { .. } => EventKind::NodeVisited,
            StepEvent::EdgeExplored { .. } => EventKind::EdgeExplored,
            StepEvent::EdgeDiscovered { .. } => EventKind::EdgeDiscovered,
            StepEvent::Processing { .. } => EventKind::Processing,
            StepEvent::Update { .. } => EventKind::Update,
            StepEvent::CheckEdge { .. } => EventKind::CheckEdge,
            StepEvent::Skip { .. } => EventKind::Skip,
            StepEvent::AddEdge { .. } => EventKind::AddEdge,
            StepEvent::Finished { .. } => EventKind::Finished,
            StepEvent::PathEdge { .. } => EventKind::PathEdge,
            StepEvent::OnPath { .. } => EventKind::OnPath,
        }
    }

    /// The node or edge this event is about.
    pub fn subject(&self) -> Subject<'_> {
        match self {
            StepEvent::NodeVisited { node, .. }
            | StepEvent::Processing { node, .. }
            | StepEvent::Update { node, .. }
            | StepEvent::Finished { node, .. }
            | StepEvent::OnPath { node, .. } => Subject::Node(node),
            StepEvent::EdgeExplored { edge, .. }
            | StepEvent::EdgeDiscovered { edge, .. }
            | StepEvent::CheckEdge { edge, .. }
            | StepEvent::Skip { edge, .. }
            | StepEvent::AddEdge { edge, .. }
            | StepEvent::PathEdge { edge, .. } => Subject::Edge(edge),
        }
    }

    /// Human-readable description.
    pub fn note(&self) -> &str {
        match self {
            StepEvent::NodeVisited { note, .. }
            | StepEvent::EdgeExplored { note, .. }
            | StepEvent::EdgeDiscovered { note, .. }
            | StepEvent::Processing { note, .. }
            | StepEvent::Update { note, .. }
            | StepEvent::CheckEdge { note, .. }
            | StepEvent::Skip { note, .. }
            | StepEvent::AddEdge { note, .. }
            | StepEvent::Finished { note, .. }
            | StepEvent::PathEdge { note, .. }
            | StepEvent::OnPath { note, .. } => note,
        }
    }

    /// Distance snapshot, for the kinds that carry one.
    pub fn snapshot(&self) -> Option<&DistanceTable> {
        match self {
            StepEvent::Processing { distances, .. } | StepEvent::Update { distances, .. } => {
                Some(distances)
            }
            _ => None,
        }
    }
}

/// The ordered events of one algorithm run.
///
/// Immutable once built; clones share the same storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventLog {
    events: Arc<[StepEvent]>,
}

impl EventLog {
    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&StepEvent> {
        self.events.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StepEvent> {
        self.events.iter()
    }

    pub fn as_slice(&self) -> &[StepEvent] {
        &self.events
    }

    /// Events `0..=cursor`, clamped to the log.
    pub fn prefix(&self, cursor: usize) -> &[StepEvent] {
        let end = cursor.saturating_add(1).min(self.events.len());
        &self.events[..end]
    }

    /// Index of the final event.
    pub fn last_index(&self) -> Option<usize> {
        self.events.len().checked_sub(1)
    }
}

impl Default for EventLog {
    fn default() -> Self {
        Self::from(Vec::new())
    }
}

impl From<Vec<StepEvent>> for EventLog {
    fn from(events: Vec<StepEvent>) -> Self {
        Self {
            events: events.into(),
        }
    }
}

impl FromIterator<StepEvent> for EventLog {
    fn from_iter<I: IntoIterator<Item = StepEvent>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<_>>())
    }
}

impl Index<usize> for EventLog {
    type Output = StepEvent;

    fn index(&self, index: usize) -> &StepEvent {
        &self.events[index]
    }
}

impl<'a> IntoIterator for &'a EventLog {
    type Item = &'a StepEvent;
    type IntoIter = std::slice::Iter<'a, StepEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}

impl Serialize for EventLog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.events.iter())
    }
}
