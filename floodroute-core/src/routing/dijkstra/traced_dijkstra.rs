use std::collections::BinaryHeap;

use hashbrown::HashMap;
use hashbrown::hash_map::Entry;
use log::debug;
use petgraph::graph::{EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;

use super::state::State;
use crate::model::NodeId;
use crate::routing::Route;
use crate::{Error, RoadGraph};

/// Minimum-cost path between two nodes using risk-adjusted edge weights.
///
/// Equal-cost alternatives are resolved the same way on every call for a
/// given graph. `start == end` yields a single-node route with cost 0.
///
/// # Errors
///
/// - [`Error::InvalidNode`] if either id is not in the graph
/// - [`Error::NoPathExists`] if the nodes lie in disconnected components
pub fn shortest_path(graph: &RoadGraph, start: NodeId, end: NodeId) -> Result<Route, Error> {
    let source = graph.node_index(start).ok_or(Error::InvalidNode(start))?;
    let target = graph.node_index(end).ok_or(Error::InvalidNode(end))?;

    if source == target {
        return Ok(Route::single(graph.node_at(source)));
    }

    let estimated_nodes = graph.node_count().min(1000);
    let mut costs: HashMap<NodeIndex, f64> = HashMap::with_capacity(estimated_nodes);
    let mut predecessors: HashMap<NodeIndex, (NodeIndex, EdgeIndex)> =
        HashMap::with_capacity(estimated_nodes);
    let mut heap = BinaryHeap::with_capacity(estimated_nodes / 4);

    heap.push(State {
        cost: 0.0,
        node: source,
    });
    costs.insert(source, 0.0);

    while let Some(State { cost, node }) = heap.pop() {
        if node == target {
            break;
        }

        // Stale queue entry
        if costs.get(&node).is_some_and(|&best| cost > best) {
            continue;
        }

        for edge in graph.graph.edges(node) {
            let next = if edge.source() == node {
                edge.target()
            } else {
                edge.source()
            };
            let next_cost = cost + graph.graph[edge.id()].weight;

            let improved = match costs.entry(next) {
                Entry::Vacant(entry) => {
                    entry.insert(next_cost);
                    true
                }
                Entry::Occupied(mut entry) => {
                    if next_cost < *entry.get() {
                        *entry.get_mut() = next_cost;
                        true
                    } else {
                        false
                    }
                }
            };

            if improved {
                predecessors.insert(next, (node, edge.id()));
                heap.push(State {
                    cost: next_cost,
                    node: next,
                });
            }
        }
    }

    let Some(&total_cost) = costs.get(&target) else {
        debug!("Node {end} is unreachable from node {start}");
        return Err(Error::NoPathExists {
            from: start,
            to: end,
        });
    };

    // Follow predecessors backward from target to start
    let mut steps = Vec::new();
    let mut current = target;
    while current != source {
        let &(previous, edge) = predecessors
            .get(&current)
            .ok_or(Error::NoPathExists {
                from: start,
                to: end,
            })?;
        steps.push((current, edge));
        current = previous;
    }
    steps.reverse();

    let mut route = Route::single(graph.node_at(source));
    for (node, edge) in steps {
        route.push(graph.node_at(node), &graph.graph[edge]);
    }
    // Keep the exact cost the search settled on
    route.cost = total_cost;

    debug!(
        "Route {start} -> {end}: {} nodes, {:.1} m, cost {:.1}",
        route.len(),
        route.length_m,
        route.cost
    );
    Ok(route)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Coordinate;
    use crate::model::RoadEdge;

    fn weighted(weight: f64) -> RoadEdge {
        RoadEdge {
            length_m: 100.0,
            weight,
            risk: 0.0,
        }
    }

    fn square() -> RoadGraph {
        // 1 - 2
        // |   |
        // 4 - 3     5 (isolated)
        RoadGraph::from_parts(
            vec![
                (NodeId(1), Coordinate::new(13.001, 80.000)),
                (NodeId(2), Coordinate::new(13.001, 80.001)),
                (NodeId(3), Coordinate::new(13.000, 80.001)),
                (NodeId(4), Coordinate::new(13.000, 80.000)),
                (NodeId(5), Coordinate::new(13.100, 80.100)),
            ],
            vec![
                (NodeId(1), NodeId(2), weighted(100.0)),
                (NodeId(2), NodeId(3), weighted(100.0)),
                (NodeId(3), NodeId(4), weighted(100.0)),
                (NodeId(4), NodeId(1), weighted(100.0)),
            ],
        )
        .unwrap()
    }

    #[test]
    fn walks_edges_in_both_directions() {
        let graph = square();
        let route = shortest_path(&graph, NodeId(3), NodeId(2)).unwrap();
        assert_eq!(route.nodes, vec![NodeId(3), NodeId(2)]);
        assert_eq!(route.cost, 100.0);
    }

    #[test]
    fn equal_cost_paths_are_stable() {
        let graph = square();
        let first = shortest_path(&graph, NodeId(1), NodeId(3)).unwrap();
        assert_eq!(first.cost, 200.0);
        assert_eq!(first.len(), 3);
        for _ in 0..10 {
            assert_eq!(shortest_path(&graph, NodeId(1), NodeId(3)).unwrap(), first);
        }
    }

    #[test]
    fn unknown_nodes_are_invalid() {
        let graph = square();
        assert!(matches!(
            shortest_path(&graph, NodeId(99), NodeId(1)),
            Err(Error::InvalidNode(NodeId(99)))
        ));
        assert!(matches!(
            shortest_path(&graph, NodeId(1), NodeId(98)),
            Err(Error::InvalidNode(NodeId(98)))
        ));
    }

    #[test]
    fn isolated_node_has_no_path() {
        let graph = square();
        assert!(matches!(
            shortest_path(&graph, NodeId(1), NodeId(5)),
            Err(Error::NoPathExists {
                from: NodeId(1),
                to: NodeId(5)
            })
        ));
    }

    #[test]
    fn same_node_is_single_point_route() {
        let graph = square();
        let route = shortest_path(&graph, NodeId(5), NodeId(5)).unwrap();
        assert_eq!(route.nodes, vec![NodeId(5)]);
        assert_eq!(route.coordinates, vec![Coordinate::new(13.1, 80.1)]);
        assert_eq!(route.cost, 0.0);
        assert_eq!(route.length_m, 0.0);
    }
}
