//! Single-pair shortest paths with step recording.
//!
//! Stale queue entries are kept and skipped when popped: a node is processed
//! only the first time it leaves the queue. The run stops as soon as the
//! target is settled; nodes not settled by then stay unexplored.
//!
//! A relaxation whose sum does not fit in a `Weight` is dropped. Every finite
//! distance is still exact, but if the target then ends up unreached the run
//! fails with `WeightOverflow` rather than calling it unreachable.

use std::collections::{HashMap, HashSet};

use stepgraph_graph::{EdgeKey, Graph, GraphError, MinQueue, NodeId, Result, Weight};

use crate::events::{Distance, DistanceTable, StepEvent};
use crate::outcome::ShortestPath;

/// Shortest path from `start` to `target`.
///
/// `Processing` and `Update` events carry the distance table as it was at
/// that moment. When the target is reachable the log ends with alternating
/// `OnPath`/`PathEdge` events walking the path from start to target; when it
/// is not, the distance is `Unreachable`, the path is empty and nothing is
/// appended.
pub fn run(graph: &Graph, start: &NodeId, target: &NodeId) -> Result<ShortestPath> {
    for node in [start, target] {
        if !graph.contains(node) {
            return Err(GraphError::UnknownNode(node.clone()));
        }
    }

    let mut events = Vec::new();
    let mut distances: DistanceTable = graph
        .nodes()
        .iter()
        .map(|node| (node.clone(), Distance::Unreachable))
        .collect();
    distances.insert(start.clone(), Distance::Finite(0));

    let mut settled = HashSet::new();
    let mut predecessor: HashMap<NodeId, NodeId> = HashMap::new();
    let mut queue: MinQueue<Weight, NodeId> = MinQueue::new();
    let mut overflowed = false;
    queue.push(0, start.clone());

    while let Some((_, node)) = queue.pop() {
        if !settled.insert(node.clone()) {
            continue;
        }

        let current = lookup(&distances, &node)?;
        events.push(StepEvent::Processing {
            node: node.clone(),
            distances: distances.clone(),
            note: format!("Processing {node} (distance {current})"),
        });

        if &node == target {
            events.push(StepEvent::Finished {
                node: node.clone(),
                note: format!("Reached target {node}"),
            });
            break;
        }

        for (next, weight) in graph.neighbors(&node)? {
            events.push(StepEvent::CheckEdge {
                edge: EdgeKey::new(node.clone(), next.clone()),
                note: format!("Check edge ({node}, {next}) w={weight}"),
            });

            let Some(candidate) = current.checked_plus(weight) else {
                overflowed = true;
                continue;
            };
            if candidate >= lookup(&distances, next)? {
                continue;
            }
            let Distance::Finite(reach) = candidate else {
                continue;
            };

            distances.insert(next.clone(), candidate);
            predecessor.insert(next.clone(), node.clone());
            queue.push(reach, next.clone());
            events.push(StepEvent::Update {
                node: next.clone(),
                distances: distances.clone(),
                note: format!("Update {next}: distance {reach} via {node}"),
            });
        }
    }

    let distance = lookup(&distances, target)?;
    if overflowed && !distance.is_finite() {
        return Err(GraphError::WeightOverflow);
    }
    let path = if distance.is_finite() {
        let path = walk_back(&predecessor, start, target)?;
        append_path(&mut events, &path);
        path
    } else {
        Vec::new()
    };

    tracing::debug!(%start, %target, %distance, events = events.len(), "dijkstra finished");
    Ok(ShortestPath {
        log: events.into(),
        distance,
        path,
    })
}

fn lookup(distances: &DistanceTable, node: &NodeId) -> Result<Distance> {
    distances
        .get(node)
        .copied()
        .ok_or_else(|| GraphError::UnknownNode(node.clone()))
}

/// Follow predecessors from `target` back to `start`, then reverse.
fn walk_back(
    predecessor: &HashMap<NodeId, NodeId>,
    start: &NodeId,
    target: &NodeId,
) -> Result<Vec<NodeId>> {
    let mut path = vec![target.clone()];
    let mut node = target;
    while node != start {
        node = predecessor
            .get(node)
            .ok_or_else(|| GraphError::UnknownNode(node.clone()))?;
        path.push(node.clone());
    }
    path.reverse();
    Ok(path)
}

fn append_path(events: &mut Vec<StepEvent>, path: &[NodeId]) {
    for (position, node) in path.iter().enumerate() {
        events.push(StepEvent::OnPath {
            node: node.clone(),
            note: format!("{node} is on the shortest path"),
        });
        if let Some(next) = path.get(position + 1) {
            events.push(StepEvent::PathEdge {
                edge: EdgeKey::new(node.clone(), next.clone()),
                note: format!("Path edge ({node}, {next})"),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventKind;
    use stepgraph_graph::samples;

    fn five_node() -> Graph {
        [
            ("a", "b", 4),
            ("a", "c", 2),
            ("b", "c", 1),
            ("b", "d", 5),
            ("c", "d", 8),
            ("c", "e", 10),
            ("d", "e", 2),
        ]
        .into_iter()
        .collect()
    }

    fn labels(path: &[NodeId]) -> Vec<&str> {
        path.iter().map(NodeId::as_str).collect()
    }

    #[test]
    fn five_node_example() {
        let result = run(&five_node(), &"a".into(), &"e".into()).unwrap();

        assert_eq!(result.distance, Distance::Finite(10));
        assert_eq!(labels(&result.path), vec!["a", "c", "b", "d", "e"]);
    }

    #[test]
    fn weighted_sample_s_to_t() {
        let graph = samples::WEIGHTED.graph();
        let result = run(&graph, &"S".into(), &"T".into()).unwrap();

        assert_eq!(result.distance, Distance::Finite(9));
        assert_eq!(labels(&result.path), vec!["S", "A", "B", "E", "T"]);
    }

    #[test]
    fn stops_once_target_is_settled() {
        // d would be settled after b, but b is the target.
        let graph: Graph = [("a", "b", 1), ("a", "d", 5)].into_iter().collect();
        let result = run(&graph, &"a".into(), &"b".into()).unwrap();

        let processed: Vec<_> = result
            .log
            .iter()
            .filter(|e| e.kind() == EventKind::Processing)
            .map(|e| e.note().to_owned())
            .collect();
        assert_eq!(processed, vec!["Processing a (distance 0)", "Processing b (distance 1)"]);

        let finished = result
            .log
            .iter()
            .position(|e| e.kind() == EventKind::Finished)
            .unwrap();
        let tail: Vec<_> = result.log.as_slice()[finished + 1..]
            .iter()
            .map(StepEvent::kind)
            .collect();
        assert_eq!(tail, vec![EventKind::OnPath, EventKind::PathEdge, EventKind::OnPath]);
    }

    #[test]
    fn ties_do_not_update() {
        // b reachable at 2 directly and at 2 through c: the first wins.
        let graph: Graph = [("a", "b", 2), ("a", "c", 1), ("c", "b", 1)]
            .into_iter()
            .collect();
        let result = run(&graph, &"a".into(), &"b".into()).unwrap();

        assert_eq!(labels(&result.path), vec!["a", "b"]);
        let updates = result
            .log
            .iter()
            .filter(|e| e.kind() == EventKind::Update)
            .count();
        assert_eq!(updates, 2);
    }

    #[test]
    fn snapshots_track_distances() {
        let result = run(&five_node(), &"a".into(), &"e".into()).unwrap();

        let first = result.log[0].snapshot().unwrap();
        assert_eq!(first[&NodeId::from("a")], Distance::Finite(0));
        assert_eq!(first[&NodeId::from("e")], Distance::Unreachable);

        let last = result.log.iter().filter_map(StepEvent::snapshot).last().unwrap();
        assert_eq!(last[&NodeId::from("e")], Distance::Finite(10));
    }

    #[test]
    fn unreachable_target_is_a_normal_result() {
        let graph: Graph = [("a", "b", 1), ("x", "y", 1)].into_iter().collect();
        let result = run(&graph, &"a".into(), &"y".into()).unwrap();

        assert_eq!(result.distance, Distance::Unreachable);
        assert!(result.path.is_empty());
        assert!(result
            .log
            .iter()
            .all(|e| !matches!(e.kind(), EventKind::OnPath | EventKind::PathEdge | EventKind::Finished)));
    }

    #[test]
    fn overflowing_path_is_an_error() {
        // a-b-c costs 2^64, which no finite distance can hold.
        let graph: Graph = [("a", "b", u64::MAX), ("b", "c", 1)].into_iter().collect();
        assert_eq!(
            run(&graph, &"a".into(), &"c".into()),
            Err(GraphError::WeightOverflow)
        );
    }

    #[test]
    fn overflow_off_the_shortest_path_is_ignored() {
        // Nothing past b fits except d, and d is the target.
        let graph: Graph = [("a", "b", u64::MAX), ("a", "c", 1), ("b", "e", 1), ("b", "d", 0)]
            .into_iter()
            .collect();

        let result = run(&graph, &"a".into(), &"d".into()).unwrap();
        assert_eq!(result.distance, Distance::Finite(u64::MAX));
        assert_eq!(labels(&result.path), vec!["a", "b", "d"]);
    }

    #[test]
    fn unknown_endpoint_aborts() {
        let graph = five_node();
        assert_eq!(
            run(&graph, &"a".into(), &"zz".into()),
            Err(GraphError::UnknownNode("zz".into()))
        );
    }
}
