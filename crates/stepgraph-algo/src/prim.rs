//! Prim's minimum spanning tree.

use std::collections::HashSet;

use stepgraph_graph::{EdgeKey, Graph, GraphError, MinQueue, NodeId, Result, Weight};

use crate::events::{EventLog, StepEvent};
use crate::outcome::{SelectedEdge, SpanningTree};

/// Grow a tree from `start` (default: the first node added to the graph).
///
/// Candidate edges wait in a min-queue keyed by weight; an entry whose far
/// end was reached in the meantime is discarded when popped. If the queue
/// runs dry early the result spans only the start's component. Fails with
/// `WeightOverflow` if the tree weighs more than a [`Weight`] can hold.
pub fn run(graph: &Graph, start: Option<&NodeId>) -> Result<SpanningTree> {
    let Some(start) = start.or_else(|| graph.first_node()) else {
        return Ok(SpanningTree {
            log: EventLog::default(),
            total_weight: 0,
            edges: Vec::new(),
        });
    };
    if !graph.contains(start) {
        return Err(GraphError::UnknownNode(start.clone()));
    }

    let mut events = Vec::new();
    let mut selected = Vec::new();
    let mut total_weight: Weight = 0;
    let mut visited = HashSet::new();
    let mut candidates: MinQueue<Weight, (NodeId, NodeId)> = MinQueue::new();

    events.push(StepEvent::NodeVisited {
        node: start.clone(),
        note: format!("Start at {start}"),
    });
    // Offered before `start` counts as visited so that every incident edge,
    // a self-loop included, becomes a candidate.
    offer(graph, start, &visited, &mut candidates, &mut events)?;
    visited.insert(start.clone());

    while visited.len() < graph.node_count() {
        let Some((weight, (from, to))) = candidates.pop() else {
            break;
        };
        if visited.contains(&to) {
            continue;
        }

        visited.insert(to.clone());
        total_weight = total_weight
            .checked_add(weight)
            .ok_or(GraphError::WeightOverflow)?;
        events.push(StepEvent::AddEdge {
            edge: EdgeKey::new(from.clone(), to.clone()),
            note: format!("Add edge ({from}, {to}) w={weight}"),
        });
        events.push(StepEvent::NodeVisited {
            node: to.clone(),
            note: format!("{to} joins the tree"),
        });
        offer(graph, &to, &visited, &mut candidates, &mut events)?;
        selected.push(SelectedEdge { from, to, weight });
    }

    tracing::debug!(%start, total_weight, selected = selected.len(), events = events.len(), "prim finished");
    Ok(SpanningTree {
        log: events.into(),
        total_weight,
        edges: selected,
    })
}

/// Queue every edge from `node` to a node outside the tree.
fn offer(
    graph: &Graph,
    node: &NodeId,
    visited: &HashSet<NodeId>,
    candidates: &mut MinQueue<Weight, (NodeId, NodeId)>,
    events: &mut Vec<StepEvent>,
) -> Result<()> {
    for (next, weight) in graph.neighbors(node)? {
        if visited.contains(next) {
            continue;
        }
        events.push(StepEvent::CheckEdge {
            edge: EdgeKey::new(node.clone(), next.clone()),
            note: format!("Check edge ({node}, {next}) w={weight}"),
        });
        candidates.push(weight, (node.clone(), next.clone()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventKind;
    use stepgraph_graph::samples;

    #[test]
    fn weighted_sample_matches_kruskal_weight() {
        let graph = samples::WEIGHTED.graph();
        let result = run(&graph, None).unwrap();

        assert_eq!(result.total_weight, 17);
        assert_eq!(result.edges.len(), 7);
        assert_eq!(result.log[0].note(), "Start at S");
    }

    #[test]
    fn grows_from_cheapest_frontier_edge() {
        let graph: Graph = [("a", "b", 5), ("a", "c", 1), ("c", "b", 2)]
            .into_iter()
            .collect();
        let result = run(&graph, Some(&"a".into())).unwrap();

        let picked: Vec<_> = result.edges.iter().map(SelectedEdge::to_string).collect();
        assert_eq!(picked, vec!["(a,c)", "(c,b)"]);
        assert_eq!(result.total_weight, 3);
    }

    #[test]
    fn seeds_every_start_edge() {
        let graph = samples::PENTAGON.graph();
        let result = run(&graph, Some(&"a".into())).unwrap();

        let seeded = result.log.as_slice()[1..5]
            .iter()
            .all(|e| e.kind() == EventKind::CheckEdge);
        assert!(seeded);
        assert_eq!(result.total_weight, 4);
    }

    #[test]
    fn disconnected_graph_gives_partial_tree() {
        let graph: Graph = [("a", "b", 4), ("x", "y", 6)].into_iter().collect();
        let result = run(&graph, Some(&"x".into())).unwrap();

        assert_eq!(result.total_weight, 6);
        assert_eq!(result.edges.len(), 1);
    }

    #[test]
    fn stale_candidates_are_discarded() {
        // b-c is offered twice (from b and from c); only one is taken.
        let graph: Graph = [("a", "b", 1), ("a", "c", 1), ("b", "c", 1)]
            .into_iter()
            .collect();
        let result = run(&graph, None).unwrap();

        assert_eq!(result.edges.len(), 2);
        let added = result
            .log
            .iter()
            .filter(|e| e.kind() == EventKind::AddEdge)
            .count();
        assert_eq!(added, 2);
    }

    #[test]
    fn unknown_start_aborts() {
        let graph = samples::PENTAGON.graph();
        assert!(matches!(
            run(&graph, Some(&"q".into())),
            Err(GraphError::UnknownNode(_))
        ));
    }

    #[test]
    fn empty_graph_gives_empty_tree() {
        let result = run(&Graph::new(), None).unwrap();
        assert!(result.log.is_empty());
        assert_eq!(result.total_weight, 0);
    }

    #[test]
    fn total_weight_overflow_is_an_error() {
        let graph: Graph = [("a", "b", u64::MAX), ("b", "c", 1)].into_iter().collect();
        assert_eq!(run(&graph, None), Err(GraphError::WeightOverflow));
    }
}
