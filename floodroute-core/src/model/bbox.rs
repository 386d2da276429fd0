use serde::{Deserialize, Serialize};

use crate::Coordinate;

/// Latitude/longitude aligned box in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl BoundingBox {
    pub fn contains(&self, c: &Coordinate) -> bool {
        (self.south..=self.north).contains(&c.lat) && (self.west..=self.east).contains(&c.lon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_is_inclusive() {
        let bbox = BoundingBox {
            south: 13.0,
            west: 80.0,
            north: 13.1,
            east: 80.1,
        };
        assert!(bbox.contains(&Coordinate::new(13.0, 80.0)));
        assert!(bbox.contains(&Coordinate::new(13.05, 80.05)));
        assert!(!bbox.contains(&Coordinate::new(13.2, 80.05)));
    }
}
