// Re-export key components
pub use crate::algo::{EARTH_RADIUS_KM, flood_risk, haversine_km};
pub use crate::loading::{
    RoadGraphConfig, RoadNetwork, build_road_graph, hazards_from_kml, load_kml_hazards,
    overpass_query,
};
pub use crate::model::{BoundingBox, Coordinate, GraphStats, HazardSet, RoadEdge, RoadGraph, RoadNode};
pub use crate::routing::{
    Route, RouteRequest, nearest_node, plan_route, safe_route, safe_routes_one_to_many,
    shortest_path,
};

// Core types
pub use crate::Error;
pub use crate::NodeId;
pub use crate::{Kilometers, Meters};
