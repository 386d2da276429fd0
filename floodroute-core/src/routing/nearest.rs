//! Snapping arbitrary coordinates to road graph nodes

use crate::algo::haversine_km;
use crate::model::RoadNode;
use crate::{Coordinate, Error, Kilometers, RoadGraph};

impl RoadGraph {
    /// Node closest to `point` by haversine distance.
    ///
    /// Among equally distant nodes the one inserted first wins, exactly as
    /// [`nearest_node_linear`] would pick it.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidData`] if `point` is not a valid coordinate
    /// - [`Error::EmptyGraph`] if the graph has no nodes
    pub fn nearest_node(&self, point: Coordinate) -> Result<(&RoadNode, Kilometers), Error> {
        if !point.is_valid() {
            return Err(Error::InvalidData(format!(
                "Query coordinate {point} is out of range"
            )));
        }
        self.nearest_index(point)
            .map(|(idx, distance)| (self.node_at(idx), distance))
            .ok_or(Error::EmptyGraph)
    }
}

/// Node closest to `point`
///
/// # Errors
///
/// Same as [`RoadGraph::nearest_node`].
pub fn nearest_node(graph: &RoadGraph, point: Coordinate) -> Result<&RoadNode, Error> {
    graph.nearest_node(point).map(|(node, _)| node)
}

/// Full scan over all nodes in insertion order.
///
/// Reference behaviour for [`RoadGraph::nearest_node`], linear in the
/// number of nodes.
///
/// # Errors
///
/// Same as [`RoadGraph::nearest_node`].
pub fn nearest_node_linear(
    graph: &RoadGraph,
    point: Coordinate,
) -> Result<(&RoadNode, Kilometers), Error> {
    if !point.is_valid() {
        return Err(Error::InvalidData(format!(
            "Query coordinate {point} is out of range"
        )));
    }
    let mut best: Option<(&RoadNode, Kilometers)> = None;
    for node in graph.nodes() {
        let distance = haversine_km(point, node.coordinate);
        if best.is_none_or(|(_, best_distance)| distance < best_distance) {
            best = Some((node, distance));
        }
    }
    best.ok_or(Error::EmptyGraph)
}
