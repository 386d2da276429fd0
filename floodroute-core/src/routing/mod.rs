//! Nearest-node snapping and minimum-cost path search

pub mod dijkstra;
pub mod nearest;
pub mod route;
pub mod safe_route;

pub use dijkstra::shortest_path;
pub use nearest::{nearest_node, nearest_node_linear};
pub use route::Route;
pub use safe_route::{RouteRequest, plan_route, safe_route, safe_routes_one_to_many};
