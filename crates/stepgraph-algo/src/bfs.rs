//! Breadth-first traversal.

use std::collections::{HashSet, VecDeque};

use stepgraph_graph::{EdgeKey, Graph, NodeId, Result};

use crate::events::{EventLog, StepEvent};
use crate::outcome::Traversal;

/// Walk the component of `start` in level order.
///
/// Nodes are marked visited when discovered, not when dequeued, so no node is
/// queued twice. `order` records dequeue order. An empty or unknown `start`
/// yields an empty log.
pub fn run(graph: &Graph, start: &NodeId) -> Result<Traversal> {
    let mut events = Vec::new();
    let mut order = Vec::new();

    if start.is_empty() || !graph.contains(start) {
        return Ok(Traversal {
            log: EventLog::default(),
            order,
        });
    }

    let mut visited = HashSet::from([start.clone()]);
    let mut queue = VecDeque::from([start.clone()]);
    events.push(StepEvent::NodeVisited {
        node: start.clone(),
        note: format!("Start at {start}"),
    });

    while let Some(node) = queue.pop_front() {
        for (next, _) in graph.neighbors(&node)? {
            if !visited.insert(next.clone()) {
                continue;
            }
            events.push(StepEvent::EdgeDiscovered {
                edge: EdgeKey::new(node.clone(), next.clone()),
                note: format!("Discover {next} from {node}"),
            });
            events.push(StepEvent::NodeVisited {
                node: next.clone(),
                note: format!("Visit {next}"),
            });
            queue.push_back(next.clone());
        }
        order.push(node);
    }

    tracing::debug!(%start, visited = order.len(), events = events.len(), "bfs finished");
    Ok(Traversal {
        log: events.into(),
        order,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventKind;
    use stepgraph_graph::samples;

    fn labels(order: &[NodeId]) -> Vec<&str> {
        order.iter().map(NodeId::as_str).collect()
    }

    #[test]
    fn hexagon_level_order() {
        let graph = samples::HEXAGON.graph();
        let result = run(&graph, &"a".into()).unwrap();

        assert_eq!(labels(&result.order), vec!["a", "b", "f", "c", "g", "e", "d"]);
        // start + (discover, visit) per other node
        assert_eq!(result.log.len(), 1 + 2 * 6);
    }

    #[test]
    fn discovery_precedes_visit() {
        let graph: Graph = [("a", "b", 1), ("a", "c", 1)].into_iter().collect();
        let result = run(&graph, &"a".into()).unwrap();

        let kinds: Vec<_> = result.log.iter().map(StepEvent::kind).collect();
        assert_eq!(
            kinds,
            vec![
                EventKind::NodeVisited,
                EventKind::EdgeDiscovered,
                EventKind::NodeVisited,
                EventKind::EdgeDiscovered,
                EventKind::NodeVisited,
            ]
        );
    }

    #[test]
    fn each_node_visited_once_on_dense_graph() {
        let graph = samples::PENTAGON.graph();
        let result = run(&graph, &"c".into()).unwrap();

        let visits = result
            .log
            .iter()
            .filter(|e| e.kind() == EventKind::NodeVisited)
            .count();
        assert_eq!(visits, 5);
        assert_eq!(result.order.len(), 5);
        assert_eq!(result.order[0], NodeId::from("c"));
    }

    #[test]
    fn unknown_start_logs_nothing() {
        let graph = samples::PENTAGON.graph();
        assert!(run(&graph, &"q".into()).unwrap().log.is_empty());
    }
}
