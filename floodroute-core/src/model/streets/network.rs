//! Immutable road graph shared by the locator and the path finder

use hashbrown::HashMap;
use hashbrown::hash_map::Entry;
use log::{debug, warn};
use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use serde::Serialize;

use super::components::{NodeId, RoadEdge, RoadNode};
use crate::model::spatial::SpatialIndex;
use crate::{Coordinate, Error, Kilometers, Meters};

/// Undirected, risk-weighted road graph.
///
/// Built once and never mutated afterwards, so it can be shared between
/// any number of concurrent queries.
#[derive(Debug, Clone)]
pub struct RoadGraph {
    pub(crate) graph: UnGraph<RoadNode, RoadEdge>,
    node_lookup: HashMap<NodeId, NodeIndex>,
    index: SpatialIndex,
}

/// Summary of a built graph
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GraphStats {
    pub node_count: usize,
    pub edge_count: usize,
    pub total_length_m: Meters,
    pub total_weight: f64,
    /// Edges with non-zero flood risk
    pub hazardous_edges: usize,
    pub max_risk: f64,
    pub mean_risk: f64,
}

impl RoadGraph {
    /// Assembles a graph from nodes and already weighted edges.
    ///
    /// Nodes keep the order in which they are supplied; a repeated id keeps
    /// its first coordinate. Edges referencing unknown nodes and self-loops
    /// are dropped. When several edges join the same pair of nodes the one
    /// with the lowest weight is kept (the earliest on equal weight).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidData`] if a node lies outside valid
    /// latitude/longitude ranges, or if an edge has a negative or
    /// non-finite length or a weight below its length.
    pub fn from_parts(
        nodes: impl IntoIterator<Item = (NodeId, Coordinate)>,
        edges: impl IntoIterator<Item = (NodeId, NodeId, RoadEdge)>,
    ) -> Result<Self, Error> {
        let mut graph = UnGraph::<RoadNode, RoadEdge>::default();
        let mut node_lookup = HashMap::new();

        for (id, coordinate) in nodes {
            if !coordinate.is_valid() {
                return Err(Error::InvalidData(format!(
                    "Node {id} has invalid coordinate {coordinate}"
                )));
            }
            match node_lookup.entry(id) {
                Entry::Vacant(entry) => {
                    entry.insert(graph.add_node(RoadNode { id, coordinate }));
                }
                Entry::Occupied(_) => {
                    warn!("Duplicate node id {id} ignored, keeping the first coordinate");
                }
            }
        }

        let mut dropped = 0usize;
        let mut merged = 0usize;
        for (a, b, edge) in edges {
            validate_edge(a, b, &edge)?;

            let (Some(&source), Some(&target)) = (node_lookup.get(&a), node_lookup.get(&b)) else {
                dropped += 1;
                continue;
            };
            if source == target {
                dropped += 1;
                continue;
            }

            if let Some(existing) = graph.find_edge(source, target) {
                merged += 1;
                if edge.weight < graph[existing].weight {
                    graph[existing] = edge;
                }
            } else {
                graph.add_edge(source, target, edge);
            }
        }

        if dropped > 0 {
            debug!("Dropped {dropped} segments with unknown endpoints or self-loops");
        }
        if merged > 0 {
            debug!("Merged {merged} duplicate segments, keeping the cheapest");
        }

        let index = SpatialIndex::new(graph.node_weights().map(|node| node.coordinate));

        Ok(Self {
            graph,
            node_lookup,
            index,
        })
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.node_lookup.contains_key(&id)
    }

    pub fn node(&self, id: NodeId) -> Option<&RoadNode> {
        self.node_lookup.get(&id).map(|&idx| &self.graph[idx])
    }

    /// All nodes in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &RoadNode> {
        self.graph.node_weights()
    }

    /// All edges with their endpoints
    pub fn edges(&self) -> impl Iterator<Item = (&RoadNode, &RoadNode, &RoadEdge)> {
        self.graph.edge_references().map(|edge| {
            (
                &self.graph[edge.source()],
                &self.graph[edge.target()],
                &self.graph[edge.id()],
            )
        })
    }

    /// Edge joining two nodes, in either direction
    pub fn edge_between(&self, a: NodeId, b: NodeId) -> Option<&RoadEdge> {
        let source = *self.node_lookup.get(&a)?;
        let target = *self.node_lookup.get(&b)?;
        self.graph
            .find_edge(source, target)
            .map(|edge| &self.graph[edge])
    }

    pub fn stats(&self) -> GraphStats {
        let mut stats = GraphStats {
            node_count: self.node_count(),
            edge_count: self.edge_count(),
            total_length_m: 0.0,
            total_weight: 0.0,
            hazardous_edges: 0,
            max_risk: 0.0,
            mean_risk: 0.0,
        };
        let mut risk_sum = 0.0;
        for edge in self.graph.edge_weights() {
            stats.total_length_m += edge.length_m;
            stats.total_weight += edge.weight;
            risk_sum += edge.risk;
            stats.max_risk = stats.max_risk.max(edge.risk);
            if edge.risk > 0.0 {
                stats.hazardous_edges += 1;
            }
        }
        if stats.edge_count > 0 {
            #[allow(clippy::cast_precision_loss)]
            let count = stats.edge_count as f64;
            stats.mean_risk = risk_sum / count;
        }
        stats
    }

    pub(crate) fn node_index(&self, id: NodeId) -> Option<NodeIndex> {
        self.node_lookup.get(&id).copied()
    }

    pub(crate) fn node_at(&self, idx: NodeIndex) -> &RoadNode {
        &self.graph[idx]
    }

    /// Closest node by haversine distance, first inserted on ties
    pub(crate) fn nearest_index(&self, point: Coordinate) -> Option<(NodeIndex, Kilometers)> {
        self.index
            .nearest(point)
            .map(|(position, distance)| (NodeIndex::new(position), distance))
    }
}

fn validate_edge(a: NodeId, b: NodeId, edge: &RoadEdge) -> Result<(), Error> {
    if !edge.length_m.is_finite() || edge.length_m < 0.0 {
        return Err(Error::InvalidData(format!(
            "Edge {a}-{b} has invalid length {}",
            edge.length_m
        )));
    }
    if !edge.weight.is_finite() || edge.weight < edge.length_m {
        return Err(Error::InvalidData(format!(
            "Edge {a}-{b} has weight {} below its length {}",
            edge.weight, edge.length_m
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nodes() -> Vec<(NodeId, Coordinate)> {
        vec![
            (NodeId(1), Coordinate::new(13.00, 80.00)),
            (NodeId(2), Coordinate::new(13.01, 80.00)),
            (NodeId(3), Coordinate::new(13.02, 80.00)),
        ]
    }

    #[test]
    fn keeps_insertion_order_and_first_duplicate() {
        let mut input = nodes();
        input.push((NodeId(2), Coordinate::new(50.0, 50.0)));
        let graph = RoadGraph::from_parts(input, Vec::new()).unwrap();

        let ids: Vec<NodeId> = graph.nodes().map(|n| n.id).collect();
        assert_eq!(ids, vec![NodeId(1), NodeId(2), NodeId(3)]);
        assert_eq!(
            graph.node(NodeId(2)).unwrap().coordinate,
            Coordinate::new(13.01, 80.00)
        );
    }

    #[test]
    fn drops_unknown_endpoints_and_self_loops() {
        let graph = RoadGraph::from_parts(
            nodes(),
            vec![
                (NodeId(1), NodeId(2), RoadEdge::safe(10.0)),
                (NodeId(2), NodeId(99), RoadEdge::safe(10.0)),
                (NodeId(3), NodeId(3), RoadEdge::safe(0.0)),
            ],
        )
        .unwrap();
        assert_eq!(graph.edge_count(), 1);
        assert!(graph.edge_between(NodeId(2), NodeId(1)).is_some());
    }

    #[test]
    fn duplicate_segments_keep_cheapest() {
        let expensive = RoadEdge {
            length_m: 10.0,
            weight: 40.0,
            risk: 0.6,
        };
        let graph = RoadGraph::from_parts(
            nodes(),
            vec![
                (NodeId(1), NodeId(2), expensive),
                (NodeId(2), NodeId(1), RoadEdge::safe(12.0)),
                (NodeId(1), NodeId(2), RoadEdge::safe(30.0)),
            ],
        )
        .unwrap();
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(
            graph.edge_between(NodeId(1), NodeId(2)),
            Some(&RoadEdge::safe(12.0))
        );
    }

    #[test]
    fn rejects_invalid_node_coordinates() {
        for coordinate in [
            Coordinate::new(f64::NAN, 80.0),
            Coordinate::new(13.0, f64::NEG_INFINITY),
            Coordinate::new(13.0, 181.0),
        ] {
            let mut input = nodes();
            input.push((NodeId(4), coordinate));
            assert!(matches!(
                RoadGraph::from_parts(input, Vec::new()),
                Err(Error::InvalidData(_))
            ));
        }
    }

    #[test]
    fn rejects_weight_below_length() {
        let result = RoadGraph::from_parts(
            nodes(),
            vec![(
                NodeId(1),
                NodeId(2),
                RoadEdge {
                    length_m: 10.0,
                    weight: 5.0,
                    risk: 0.0,
                },
            )],
        );
        assert!(matches!(result, Err(Error::InvalidData(_))));
    }

    #[test]
    fn stats_summarise_edges() {
        let graph = RoadGraph::from_parts(
            nodes(),
            vec![
                (NodeId(1), NodeId(2), RoadEdge::safe(100.0)),
                (
                    NodeId(2),
                    NodeId(3),
                    RoadEdge {
                        length_m: 100.0,
                        weight: 300.0,
                        risk: 0.4,
                    },
                ),
            ],
        )
        .unwrap();
        let stats = graph.stats();
        assert_eq!(stats.node_count, 3);
        assert_eq!(stats.edge_count, 2);
        assert_eq!(stats.total_length_m, 200.0);
        assert_eq!(stats.total_weight, 400.0);
        assert_eq!(stats.hazardous_edges, 1);
        assert_eq!(stats.max_risk, 0.4);
        assert!((stats.mean_risk - 0.2).abs() < 1e-12);
    }
}
