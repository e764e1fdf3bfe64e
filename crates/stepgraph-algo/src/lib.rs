//! Stepgraph Algorithm Engines
//!
//! Each engine runs once, eagerly, and returns an immutable [`EventLog`]
//! together with what it computed. Nothing is streamed and nothing is
//! re-executed later: replaying a run only ever reads its log.
//!
//! # Engines
//!
//! - [`dfs`]: depth-first preorder, tree edges only
//! - [`bfs`]: level order, nodes marked at discovery
//! - [`dijkstra`]: single-pair shortest path with distance snapshots and
//!   early exit at the target
//! - [`kruskal`]: minimum spanning forest over a stable weight sort
//! - [`prim`]: minimum spanning tree of the start component
//!
//! # Requests
//!
//! [`run()`] validates a [`RunRequest`] against the graph before touching an
//! engine, so an invalid request never yields a partial log.
//!
//! ```
//! use stepgraph_algo::{run, AlgorithmKind, RunRequest};
//! use stepgraph_graph::samples;
//!
//! let graph = samples::WEIGHTED.graph();
//! let request = RunRequest::new(AlgorithmKind::Dijkstra)
//!     .with_start("S")
//!     .with_target("T");
//! let result = run(&graph, &request).unwrap();
//! assert_eq!(result.report()[1], "Total distance: 9");
//! ```

pub mod bfs;
pub mod dfs;
pub mod dijkstra;
pub mod kruskal;
pub mod prim;

mod events;
mod outcome;
mod run;

pub use events::{Distance, DistanceTable, EventKind, EventLog, StepEvent, Subject};
pub use outcome::{SelectedEdge, ShortestPath, SpanningTree, Traversal};
pub use run::{run, validate, AlgorithmKind, Run, RunError, RunRequest, RunSummary};

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;
    use stepgraph_graph::{EdgeKey, Graph, NodeId, UnionFind, Weight};

    fn label(i: usize) -> NodeId {
        NodeId::new(format!("n{i}"))
    }

    /// Up to 8 nodes with arbitrary (possibly disconnected) edges.
    fn any_graph() -> impl Strategy<Value = Graph> {
        (2usize..=8).prop_flat_map(|n| {
            prop::collection::vec((0..n, 0..n, 0u64..10), 0..16).prop_map(move |edges| {
                let mut graph = Graph::new();
                for i in 0..n {
                    graph.add_node(label(i));
                }
                for (u, v, w) in edges {
                    graph.add_edge(label(u), label(v), w);
                }
                graph
            })
        })
    }

    /// A random spanning tree plus extra edges: always connected.
    fn connected_graph() -> impl Strategy<Value = Graph> {
        (2usize..=8).prop_flat_map(|n| {
            (
                prop::collection::vec((any::<prop::sample::Index>(), 0u64..10), n - 1),
                prop::collection::vec((0..n, 0..n, 0u64..10), 0..12),
            )
                .prop_map(move |(tree, extra)| {
                    let mut graph = Graph::new();
                    for i in 0..n {
                        graph.add_node(label(i));
                    }
                    for (i, (parent, w)) in tree.into_iter().enumerate() {
                        let child = i + 1;
                        graph.add_edge(label(parent.index(child)), label(child), w);
                    }
                    for (u, v, w) in extra {
                        graph.add_edge(label(u), label(v), w);
                    }
                    graph
                })
        })
    }

    /// Cheapest simple path by exhaustive enumeration.
    fn brute_force(graph: &Graph, start: &NodeId, target: &NodeId) -> Distance {
        fn walk(
            graph: &Graph,
            node: &NodeId,
            target: &NodeId,
            cost: Weight,
            seen: &mut HashSet<NodeId>,
            best: &mut Distance,
        ) {
            if node == target {
                *best = (*best).min(Distance::Finite(cost));
                return;
            }
            for (next, weight) in graph.neighbors(node).unwrap() {
                if seen.insert(next.clone()) {
                    walk(graph, next, target, cost + weight, seen, best);
                    seen.remove(next);
                }
            }
        }

        let mut best = Distance::Unreachable;
        let mut seen = HashSet::from([start.clone()]);
        walk(graph, start, target, 0, &mut seen, &mut best);
        best
    }

    fn tree_edges(log: &EventLog, kind: EventKind) -> Vec<EdgeKey> {
        log.iter()
            .filter(|event| event.kind() == kind)
            .filter_map(|event| match event.subject() {
                Subject::Edge(edge) => Some(edge.clone()),
                Subject::Node(_) => None,
            })
            .collect()
    }

    fn assert_spanning_tree(graph: &Graph, order: &[NodeId], edges: &[EdgeKey]) {
        let unique: HashSet<_> = order.iter().collect();
        assert_eq!(order.len(), graph.node_count());
        assert_eq!(unique.len(), order.len());
        assert_eq!(edges.len(), graph.node_count() - 1);

        let mut components = UnionFind::new();
        for edge in edges {
            let (u, v) = edge.endpoints();
            assert!(graph.weight(u, v).is_ok(), "{edge} is not a graph edge");
            assert!(components.union(u, v), "{edge} closes a cycle");
        }
    }

    #[test]
    fn every_algorithm_runs_on_every_sample() {
        for sample in stepgraph_graph::samples::ALL {
            let graph = sample.graph();
            let first = sample.nodes[0];
            let last = sample.nodes[sample.nodes.len() - 1];

            for algorithm in AlgorithmKind::ALL {
                let mut request = RunRequest::new(algorithm);
                if algorithm.needs_start() {
                    request = request.with_start(first);
                }
                if algorithm.needs_target() {
                    request = request.with_target(last);
                }
                let result = run(&graph, &request).unwrap();
                assert!(!result.log.is_empty(), "{algorithm} on {}", sample.name);
            }
        }
    }

    proptest! {
        #[test]
        fn runs_are_deterministic(graph in any_graph()) {
            for algorithm in AlgorithmKind::ALL {
                let request = RunRequest::new(algorithm)
                    .with_start(label(0))
                    .with_target(label(1));
                let first = run(&graph, &request).unwrap();
                let second = run(&graph, &request).unwrap();

                prop_assert_eq!(&first, &second);
                prop_assert_eq!(
                    serde_json::to_string(&first).unwrap(),
                    serde_json::to_string(&second).unwrap()
                );
            }
        }

        #[test]
        fn dijkstra_matches_brute_force(graph in any_graph()) {
            let start = label(0);
            let target = label(graph.node_count() - 1);
            let result = dijkstra::run(&graph, &start, &target).unwrap();

            prop_assert_eq!(result.distance, brute_force(&graph, &start, &target));

            if let Distance::Finite(total) = result.distance {
                prop_assert_eq!(result.path.first(), Some(&start));
                prop_assert_eq!(result.path.last(), Some(&target));
                let walked: Weight = result
                    .path
                    .windows(2)
                    .map(|pair| graph.weight(&pair[0], &pair[1]).unwrap())
                    .sum();
                prop_assert_eq!(walked, total);
            } else {
                prop_assert!(result.path.is_empty());
            }
        }

        #[test]
        fn kruskal_and_prim_agree_on_weight(graph in connected_graph()) {
            let kruskal = kruskal::run(&graph).unwrap();
            prop_assert_eq!(kruskal.edges.len(), graph.node_count() - 1);

            for start in graph.nodes() {
                let prim = prim::run(&graph, Some(start)).unwrap();
                prop_assert_eq!(prim.total_weight, kruskal.total_weight);
                prop_assert_eq!(prim.edges.len(), graph.node_count() - 1);
            }
        }

        #[test]
        fn traversals_cover_connected_graphs(graph in connected_graph()) {
            let start = label(0);

            let depth = dfs::run(&graph, &start).unwrap();
            assert_spanning_tree(&graph, &depth.order, &tree_edges(&depth.log, EventKind::EdgeExplored));

            let breadth = bfs::run(&graph, &start).unwrap();
            assert_spanning_tree(&graph, &breadth.order, &tree_edges(&breadth.log, EventKind::EdgeDiscovered));
        }
    }
}
