//! Road network model

pub mod components;
pub mod network;

pub use components::{NodeId, RoadEdge, RoadNode};
pub use network::{GraphStats, RoadGraph};
