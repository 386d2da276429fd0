//! Computed routes and their export formats

mod to_geojson;

use std::io::Write;

use serde::Serialize;

use crate::model::{NodeId, RoadEdge, RoadNode};
use crate::{Coordinate, Error, Meters};

/// Ordered path from start to destination through graph nodes
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    /// Traversed node ids, start and destination included
    pub nodes: Vec<NodeId>,
    /// Coordinates of `nodes`, in traversal order
    pub coordinates: Vec<Coordinate>,
    /// Sum of risk-adjusted edge weights
    pub cost: f64,
    /// Sum of physical edge lengths
    pub length_m: Meters,
}

impl Route {
    pub(crate) fn single(node: &RoadNode) -> Self {
        Self {
            nodes: vec![node.id],
            coordinates: vec![node.coordinate],
            cost: 0.0,
            length_m: 0.0,
        }
    }

    pub(crate) fn push(&mut self, node: &RoadNode, via: &RoadEdge) {
        self.nodes.push(node.id);
        self.coordinates.push(node.coordinate);
        self.cost += via.weight;
        self.length_m += via.length_m;
    }

    /// Number of nodes on the route, never zero
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn start(&self) -> Option<&Coordinate> {
        self.coordinates.first()
    }

    pub fn destination(&self) -> Option<&Coordinate> {
        self.coordinates.last()
    }

    /// Extra cost paid for flood exposure along the route
    pub fn risk_penalty(&self) -> f64 {
        self.cost - self.length_m
    }

    /// Writes one `lat,lon` line per route vertex
    pub fn write_coordinates<W: Write>(&self, mut writer: W) -> Result<(), Error> {
        for coordinate in &self.coordinates {
            writeln!(writer, "{},{}", coordinate.lat, coordinate.lon)?;
        }
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route() -> Route {
        let mut route = Route::single(&RoadNode {
            id: NodeId(1),
            coordinate: Coordinate::new(13.0, 80.0),
        });
        route.push(
            &RoadNode {
                id: NodeId(2),
                coordinate: Coordinate::new(13.01, 80.0),
            },
            &RoadEdge {
                length_m: 1100.0,
                weight: 1650.0,
                risk: 0.1,
            },
        );
        route
    }

    #[test]
    fn push_accumulates_cost_and_length() {
        let route = route();
        assert_eq!(route.len(), 2);
        assert_eq!(route.cost, 1650.0);
        assert_eq!(route.length_m, 1100.0);
        assert_eq!(route.risk_penalty(), 550.0);
        assert_eq!(route.start(), Some(&Coordinate::new(13.0, 80.0)));
        assert_eq!(route.destination(), Some(&Coordinate::new(13.01, 80.0)));
    }

    #[test]
    fn writes_lat_lon_lines() {
        let mut out = Vec::new();
        route().write_coordinates(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "13,80\n13.01,80\n");
    }
}
