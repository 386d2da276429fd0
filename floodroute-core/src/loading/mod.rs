//! This module is responsible for turning external inputs (road network,
//! hazard points) into a flood-weighted routing graph.

mod builder;
mod config;
pub mod hazards;
pub mod osm;

pub use builder::{build_road_graph, weigh_segment};
pub use config::RoadGraphConfig;
pub use hazards::{hazards_from_kml, load_kml_hazards, parse_kml_coordinates};
pub use osm::{NetworkNode, OverpassResponse, RawElement, RoadNetwork, Way, overpass_query};
