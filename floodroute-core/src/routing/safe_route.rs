//! Coordinate-to-coordinate routing over a flood-weighted graph

use log::{debug, info};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::dijkstra::shortest_path;
use super::route::Route;
use crate::loading::{RoadGraphConfig, RoadNetwork, build_road_graph};
use crate::{Coordinate, Error, HazardSet, RoadGraph};

/// Request for a single route, including the weighting parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RouteRequest {
    pub start: Coordinate,
    pub end: Coordinate,
    #[serde(default)]
    pub config: RoadGraphConfig,
}

impl RouteRequest {
    pub fn new(start: Coordinate, end: Coordinate) -> Self {
        Self {
            start,
            end,
            config: RoadGraphConfig::default(),
        }
    }
}

/// Routes between the graph nodes nearest to `start` and `end`.
///
/// # Errors
///
/// - [`Error::InvalidData`] for out-of-range coordinates
/// - [`Error::EmptyGraph`] if the graph has no nodes
/// - [`Error::NoPathExists`] if the snapped nodes are not connected
pub fn safe_route(graph: &RoadGraph, start: Coordinate, end: Coordinate) -> Result<Route, Error> {
    validate_coordinate(start)?;
    validate_coordinate(end)?;

    let (from, from_distance) = graph.nearest_node(start)?;
    let (to, to_distance) = graph.nearest_node(end)?;
    debug!(
        "Snapped start {start} to node {} ({:.0} m) and destination {end} to node {} ({:.0} m)",
        from.id,
        from_distance * 1000.0,
        to.id,
        to_distance * 1000.0
    );

    shortest_path(graph, from.id, to.id)
}

/// Routes from one start to many destinations in parallel.
///
/// Queries share the graph read-only; results keep the order of `ends`.
pub fn safe_routes_one_to_many(
    graph: &RoadGraph,
    start: Coordinate,
    ends: &[Coordinate],
) -> Vec<Result<Route, Error>> {
    ends.par_iter()
        .map(|&end| safe_route(graph, start, end))
        .collect()
}

/// Builds a graph for this request and routes through it
pub fn plan_route(
    network: &RoadNetwork,
    hazards: &HazardSet,
    request: &RouteRequest,
) -> Result<Route, Error> {
    let graph = build_road_graph(network, hazards, &request.config)?;
    let route = safe_route(&graph, request.start, request.end)?;
    info!(
        "Planned route of {} nodes, {:.0} m, flood penalty {:.0}",
        route.len(),
        route.length_m,
        route.risk_penalty()
    );
    Ok(route)
}

fn validate_coordinate(coordinate: Coordinate) -> Result<(), Error> {
    if coordinate.is_valid() {
        Ok(())
    } else {
        Err(Error::InvalidData(format!(
            "Coordinate {coordinate} is outside the valid latitude/longitude range"
        )))
    }
}
