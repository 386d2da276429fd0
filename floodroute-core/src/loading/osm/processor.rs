use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use super::elements::{OverpassResponse, RawElement, element_type};
use crate::model::NodeId;
use crate::{Coordinate, Error};

/// Network node with a known, valid position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NetworkNode {
    pub id: NodeId,
    pub coordinate: Coordinate,
}

/// Ordered sequence of node ids forming a traversable road
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Way {
    pub id: i64,
    pub nodes: Vec<NodeId>,
}

/// Parsed road network ready for graph construction
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoadNetwork {
    pub nodes: Vec<NetworkNode>,
    pub ways: Vec<Way>,
}

impl RoadNetwork {
    pub fn new(nodes: Vec<NetworkNode>, ways: Vec<Way>) -> Self {
        Self { nodes, ways }
    }

    /// Converts raw Overpass elements into the strict model.
    ///
    /// Nodes without coordinates or with out-of-range coordinates, ways
    /// with fewer than two references, and elements whose fields cannot be
    /// decoded are dropped.
    pub fn from_overpass(response: OverpassResponse) -> Self {
        let mut network = RoadNetwork::default();
        let mut dropped_nodes = 0usize;
        let mut dropped_ways = 0usize;
        let mut malformed = 0usize;

        for value in response.elements {
            let element = match RawElement::deserialize(&value) {
                Ok(element) => element,
                Err(e) => {
                    debug!("Malformed Overpass element {value}: {e}");
                    malformed += 1;
                    match element_type(&value) {
                        Some("node") => dropped_nodes += 1,
                        Some("way") => dropped_ways += 1,
                        _ => {}
                    }
                    continue;
                }
            };
            match element {
                RawElement::Node {
                    id,
                    lat: Some(lat),
                    lon: Some(lon),
                } => {
                    let coordinate = Coordinate::new(lat, lon);
                    if coordinate.is_valid() {
                        network.nodes.push(NetworkNode {
                            id: NodeId(id),
                            coordinate,
                        });
                    } else {
                        dropped_nodes += 1;
                    }
                }
                RawElement::Node { .. } => dropped_nodes += 1,
                RawElement::Way { id, nodes, .. } => {
                    if nodes.len() < 2 {
                        dropped_ways += 1;
                        continue;
                    }
                    network.ways.push(Way {
                        id,
                        nodes: nodes.into_iter().map(NodeId).collect(),
                    });
                }
                RawElement::Other => {}
            }
        }

        if malformed > 0 {
            warn!("Skipped {malformed} malformed Overpass elements");
        }
        if dropped_nodes > 0 {
            warn!("Dropped {dropped_nodes} nodes without a valid position");
        }
        if dropped_ways > 0 {
            warn!("Dropped {dropped_ways} ways without two usable node references");
        }
        info!(
            "Parsed road network with {} nodes and {} ways",
            network.nodes.len(),
            network.ways.len()
        );

        network
    }

    pub fn from_overpass_json(json: &str) -> Result<Self, Error> {
        let response: OverpassResponse = serde_json::from_str(json)?;
        Ok(Self::from_overpass(response))
    }

    pub fn from_overpass_reader<R: Read>(reader: R) -> Result<Self, Error> {
        let response: OverpassResponse = serde_json::from_reader(reader)?;
        Ok(Self::from_overpass(response))
    }

    /// Reads an Overpass JSON document from disk
    pub fn load(path: &Path) -> Result<Self, Error> {
        let file = File::open(path).map_err(|e| {
            std::io::Error::new(
                e.kind(),
                format!("Failed to open network file '{}': {}", path.display(), e),
            )
        })?;
        Self::from_overpass_reader(BufReader::new(file))
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.ways.is_empty()
    }
}
