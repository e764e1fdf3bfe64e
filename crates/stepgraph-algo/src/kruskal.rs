//! Kruskal's minimum spanning forest.

use stepgraph_graph::{Graph, GraphError, Result, UnionFind, Weight};

use crate::events::StepEvent;
use crate::outcome::{SelectedEdge, SpanningTree};

/// Examine every edge in ascending weight order and keep those that join two
/// components.
///
/// Equal weights keep graph insertion order (the sort is stable). A
/// disconnected graph yields a spanning forest. Fails with `WeightOverflow`
/// if the selected edges weigh more than a [`Weight`] can hold.
pub fn run(graph: &Graph) -> Result<SpanningTree> {
    let mut ordered: Vec<_> = graph.edges().iter().collect();
    ordered.sort_by_key(|edge| edge.weight);

    let mut components = UnionFind::new();
    let mut events = Vec::new();
    let mut selected = Vec::new();
    let mut total_weight: Weight = 0;

    for edge in ordered {
        let (from, to, weight) = (&edge.from, &edge.to, edge.weight);
        events.push(StepEvent::CheckEdge {
            edge: edge.key(),
            note: format!("Check edge ({from}, {to}) w={weight}"),
        });

        if !components.union(from, to) {
            events.push(StepEvent::Skip {
                edge: edge.key(),
                note: format!("Skip ({from}, {to}): cycle detected"),
            });
            continue;
        }

        total_weight = total_weight
            .checked_add(weight)
            .ok_or(GraphError::WeightOverflow)?;
        selected.push(SelectedEdge {
            from: from.clone(),
            to: to.clone(),
            weight,
        });
        events.push(StepEvent::AddEdge {
            edge: edge.key(),
            note: format!("Add edge ({from}, {to}) w={weight}"),
        });
        for node in [from, to] {
            events.push(StepEvent::NodeVisited {
                node: node.clone(),
                note: format!("{node} joins the tree"),
            });
        }
    }

    tracing::debug!(total_weight, selected = selected.len(), events = events.len(), "kruskal finished");
    Ok(SpanningTree {
        log: events.into(),
        total_weight,
        edges: selected,
    })
}
