//! OpenStreetMap road network input
//!
//! Raw Overpass API payloads are mapped to a strict node/way model before
//! they reach the graph builder. Fetching the payload is left to the caller.

mod elements;
mod processor;
mod query;

pub use elements::{OverpassResponse, RawElement};
pub use processor::{NetworkNode, RoadNetwork, Way};
pub use query::overpass_query;
