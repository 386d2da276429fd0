//! Pure numeric building blocks shared by the graph builder and the locator

pub mod distance;
pub mod risk;

pub use distance::{EARTH_RADIUS_KM, haversine_km};
pub use risk::{edge_weight, flood_risk};
