//! Depth-first traversal.
//!
//! Uses an explicit stack of `(node, neighbours still to try)` frames rather
//! than host recursion. Neighbours are tried in adjacency order, so the
//! preorder and the explored tree edges match the recursive formulation.

use std::collections::HashSet;

use stepgraph_graph::{EdgeKey, Graph, NodeId, Result};

use crate::events::{EventLog, StepEvent};
use crate::outcome::Traversal;

/// Walk the component of `start` depth-first.
///
/// Logs `NodeVisited` on first arrival and `EdgeExplored` for each tree edge,
/// right before descending into it. Back edges are never logged. An empty or
/// unknown `start` yields an empty log.
pub fn run(graph: &Graph, start: &NodeId) -> Result<Traversal> {
    let mut events = Vec::new();
    let mut order = Vec::new();

    if start.is_empty() || !graph.contains(start) {
        return Ok(Traversal {
            log: EventLog::default(),
            order,
        });
    }

    let mut visited = HashSet::new();
    visit(start, &mut visited, &mut events, &mut order);
    let mut stack = vec![(start.clone(), pending(graph, start)?)];

    while let Some((node, remaining)) = stack.last_mut() {
        let Some(next) = remaining.next() else {
            stack.pop();
            continue;
        };
        if visited.contains(&next) {
            continue;
        }

        events.push(StepEvent::EdgeExplored {
            edge: EdgeKey::new(node.clone(), next.clone()),
            note: format!("Explore edge ({node}, {next})"),
        });
        visit(&next, &mut visited, &mut events, &mut order);
        let frame = pending(graph, &next)?;
        stack.push((next, frame));
    }

    tracing::debug!(%start, visited = order.len(), events = events.len(), "dfs finished");
    Ok(Traversal {
        log: events.into(),
        order,
    })
}

fn visit(
    node: &NodeId,
    visited: &mut HashSet<NodeId>,
    events: &mut Vec<StepEvent>,
    order: &mut Vec<NodeId>,
) {
    visited.insert(node.clone());
    events.push(StepEvent::NodeVisited {
        node: node.clone(),
        note: format!("Visit {node}"),
    });
    order.push(node.clone());
}

fn pending(graph: &Graph, node: &NodeId) -> Result<std::vec::IntoIter<NodeId>> {
    Ok(graph
        .neighbors(node)?
        .map(|(next, _)| next.clone())
        .collect::<Vec<_>>()
        .into_iter())
}
