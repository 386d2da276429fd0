use hashbrown::HashMap;
use itertools::Itertools;
use log::{debug, info};

use super::config::RoadGraphConfig;
use super::osm::RoadNetwork;
use crate::algo::{edge_weight, haversine_km};
use crate::model::{NodeId, RoadEdge};
use crate::{Coordinate, Error, HazardSet, RoadGraph};

/// Builds the flood-weighted road graph.
///
/// Every consecutive pair of node ids in a way becomes an undirected edge
/// whose weight is its length inflated by the flood risk at its midpoint.
/// Pairs referencing nodes missing from `network.nodes` are skipped.
///
/// # Errors
///
/// - [`Error::InvalidData`] if `config` is invalid
/// - [`Error::EmptyHazardSet`] if `hazards` is empty, before any weight is computed
/// - [`Error::EmptyGraph`] if no edge could be built
pub fn build_road_graph(
    network: &RoadNetwork,
    hazards: &HazardSet,
    config: &RoadGraphConfig,
) -> Result<RoadGraph, Error> {
    config.validate()?;
    if hazards.is_empty() {
        return Err(Error::EmptyHazardSet);
    }

    info!(
        "Building road graph from {} nodes and {} ways against {} hazard points (alpha = {}, radius = {} km)",
        network.nodes.len(),
        network.ways.len(),
        hazards.len(),
        config.alpha,
        config.max_risk_dist_km
    );

    let mut coordinates: HashMap<NodeId, Coordinate> = HashMap::with_capacity(network.nodes.len());
    for node in &network.nodes {
        coordinates.entry(node.id).or_insert(node.coordinate);
    }

    let mut edges = Vec::new();
    let mut missing = 0usize;
    for way in &network.ways {
        for (&a, &b) in way.nodes.iter().tuple_windows() {
            let (Some(&from), Some(&to)) = (coordinates.get(&a), coordinates.get(&b)) else {
                missing += 1;
                continue;
            };
            if a == b {
                continue;
            }
            edges.push((a, b, weigh_segment(from, to, hazards, config)?));
        }
    }
    if missing > 0 {
        debug!("Skipped {missing} segments referencing nodes outside the network");
    }

    let graph = RoadGraph::from_parts(
        network.nodes.iter().map(|node| (node.id, node.coordinate)),
        edges,
    )?;
    if graph.edge_count() == 0 {
        return Err(Error::EmptyGraph);
    }

    let stats = graph.stats();
    info!(
        "Road graph ready: {} nodes, {} edges, {} within flood influence",
        stats.node_count, stats.edge_count, stats.hazardous_edges
    );
    Ok(graph)
}

/// Length, midpoint risk and weight of a single road segment
///
/// # Errors
///
/// Returns [`Error::EmptyHazardSet`] when `hazards` is empty.
pub fn weigh_segment(
    from: Coordinate,
    to: Coordinate,
    hazards: &HazardSet,
    config: &RoadGraphConfig,
) -> Result<RoadEdge, Error> {
    let length_m = haversine_km(from, to) * 1000.0;
    // Only the midpoint is checked, long segments can pass closer to a hazard
    let risk = hazards.risk_at(from.midpoint(&to), config.max_risk_dist_km)?;
    let weight = edge_weight(length_m, config.alpha, risk);
    log::trace!("Segment {from} -> {to}: {length_m:.1} m, risk {risk:.3}, weight {weight:.1}");

    Ok(RoadEdge {
        length_m,
        weight,
        risk,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loading::osm::{NetworkNode, Way};

    fn node(id: i64, lat: f64, lon: f64) -> NetworkNode {
        NetworkNode {
            id: NodeId(id),
            coordinate: Coordinate::new(lat, lon),
        }
    }

    fn way(id: i64, nodes: &[i64]) -> Way {
        Way {
            id,
            nodes: nodes.iter().copied().map(NodeId).collect(),
        }
    }

    fn hazards() -> HazardSet {
        HazardSet::new(vec![Coordinate::new(13.05, 80.20)])
    }

    #[test]
    fn skips_segments_with_unknown_nodes() {
        let network = RoadNetwork::new(
            vec![node(1, 13.00, 80.00), node(2, 13.001, 80.00), node(3, 13.002, 80.0)],
            vec![way(1, &[1, 2, 42, 3])],
        );
        let graph = build_road_graph(&network, &hazards(), &RoadGraphConfig::default()).unwrap();
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 1);
        assert!(graph.edge_between(NodeId(2), NodeId(3)).is_none());
    }

    #[test]
    fn length_is_haversine_in_meters() {
        let network = RoadNetwork::new(
            vec![node(1, 13.00, 80.00), node(2, 13.01, 80.00)],
            vec![way(1, &[1, 2])],
        );
        let graph = build_road_graph(&network, &hazards(), &RoadGraphConfig::default()).unwrap();
        let edge = graph.edge_between(NodeId(1), NodeId(2)).unwrap();
        let expected = haversine_km(Coordinate::new(13.00, 80.00), Coordinate::new(13.01, 80.00)) * 1000.0;
        assert_eq!(edge.length_m, expected);
        // Far from the hazard
        assert_eq!(edge.risk, 0.0);
        assert_eq!(edge.weight, edge.length_m);
    }

    #[test]
    fn empty_hazards_fail_first() {
        let network = RoadNetwork::new(
            vec![node(1, 13.00, 80.00), node(2, 13.01, 80.00)],
            vec![way(1, &[1, 2])],
        );
        let result = build_road_graph(&network, &HazardSet::new(Vec::new()), &RoadGraphConfig::default());
        assert!(matches!(result, Err(Error::EmptyHazardSet)));
    }

    #[test]
    fn network_without_edges_is_empty_graph() {
        let network = RoadNetwork::new(vec![node(1, 13.00, 80.00)], vec![way(1, &[1, 7, 8])]);
        let result = build_road_graph(&network, &hazards(), &RoadGraphConfig::default());
        assert!(matches!(result, Err(Error::EmptyGraph)));

        let result = build_road_graph(&RoadNetwork::default(), &hazards(), &RoadGraphConfig::default());
        assert!(matches!(result, Err(Error::EmptyGraph)));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let network = RoadNetwork::new(
            vec![node(1, 13.00, 80.00), node(2, 13.01, 80.00)],
            vec![way(1, &[1, 2])],
        );
        let config = RoadGraphConfig {
            alpha: -1.0,
            max_risk_dist_km: 0.5,
        };
        assert!(matches!(
            build_road_graph(&network, &hazards(), &config),
            Err(Error::InvalidData(_))
        ));
    }

    #[test]
    fn invalid_node_coordinates_are_rejected() {
        let on_way = RoadNetwork::new(
            vec![node(1, 13.00, 80.00), node(2, f64::NAN, 80.00)],
            vec![way(1, &[1, 2])],
        );
        assert!(matches!(
            build_road_graph(&on_way, &hazards(), &RoadGraphConfig::default()),
            Err(Error::InvalidData(_))
        ));

        let detached = RoadNetwork::new(
            vec![node(1, 13.00, 80.00), node(2, 13.01, 80.00), node(3, 13.0, f64::INFINITY)],
            vec![way(1, &[1, 2])],
        );
        assert!(matches!(
            build_road_graph(&detached, &hazards(), &RoadGraphConfig::default()),
            Err(Error::InvalidData(_))
        ));
    }
}
