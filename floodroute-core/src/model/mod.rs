//! Data model for flood-aware routing
//!
//! Contains coordinates, hazard sets and the road graph.

pub mod bbox;
pub mod coordinate;
pub mod hazard;
pub mod spatial;
pub mod streets;

pub use bbox::BoundingBox;
pub use coordinate::Coordinate;
pub use hazard::HazardSet;
pub use spatial::{IndexedPoint, SpatialIndex};
pub use streets::{GraphStats, NodeId, RoadEdge, RoadGraph, RoadNode};
