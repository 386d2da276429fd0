//! Flood-risk-weighted road routing.
//!
//! The engine turns a raw road network (nodes and ways) plus a set of known
//! flood hazard points into an undirected weighted graph, where every road
//! segment costs its physical length inflated by its proximity to the
//! nearest hazard. Routes are then computed as minimum-cost paths between
//! the graph nodes closest to two arbitrary coordinates.

pub mod algo;
pub mod error;
pub mod loading;
pub mod model;
pub mod prelude;
pub mod routing;

pub use error::Error;
pub use loading::{RoadGraphConfig, build_road_graph};
pub use model::{Coordinate, HazardSet, NodeId, RoadGraph};
pub use routing::{
    Route, RouteRequest, plan_route, safe_route, safe_routes_one_to_many, shortest_path,
};

/// Distance in kilometers
pub type Kilometers = f64;
/// Distance in meters
pub type Meters = f64;
