//! Geographic coordinates in decimal degrees

use std::fmt;

use geo::{Coord, Point};
use serde::{Deserialize, Serialize};

/// A (latitude, longitude) pair in decimal degrees.
///
/// Valid coordinates have latitude in `[-90, 90]` and longitude in
/// `[-180, 180]`. Construction does not enforce the range; use
/// [`Coordinate::is_valid`] at data boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lon)
    }

    /// Arithmetic mean of both latitudes and longitudes
    pub fn midpoint(&self, other: &Coordinate) -> Coordinate {
        Coordinate {
            lat: (self.lat + other.lat) / 2.0,
            lon: (self.lon + other.lon) / 2.0,
        }
    }

    /// Bit-exact key, used to collapse identical coordinate pairs
    pub(crate) fn bit_key(&self) -> (u64, u64) {
        (self.lat.to_bits(), self.lon.to_bits())
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.lat, self.lon)
    }
}

// geo types are (x = lon, y = lat)
impl From<Coordinate> for Coord<f64> {
    fn from(value: Coordinate) -> Self {
        Coord {
            x: value.lon,
            y: value.lat,
        }
    }
}

impl From<Coordinate> for Point<f64> {
    fn from(value: Coordinate) -> Self {
        Point::new(value.lon, value.lat)
    }
}

impl From<Point<f64>> for Coordinate {
    fn from(value: Point<f64>) -> Self {
        Coordinate::new(value.y(), value.x())
    }
}

impl From<(f64, f64)> for Coordinate {
    /// Interprets the tuple as `(lat, lon)`
    fn from((lat, lon): (f64, f64)) -> Self {
        Coordinate::new(lat, lon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validates_ranges() {
        assert!(Coordinate::new(13.05, 80.2).is_valid());
        assert!(Coordinate::new(-90.0, 180.0).is_valid());
        assert!(!Coordinate::new(90.5, 0.0).is_valid());
        assert!(!Coordinate::new(0.0, -180.1).is_valid());
        assert!(!Coordinate::new(f64::NAN, 0.0).is_valid());
    }

    #[test]
    fn midpoint_is_mean() {
        let mid = Coordinate::new(13.0, 80.0).midpoint(&Coordinate::new(14.0, 81.0));
        assert_eq!(mid, Coordinate::new(13.5, 80.5));
    }

    #[test]
    fn geo_conversion_swaps_axes() {
        let point: Point<f64> = Coordinate::new(13.0, 80.0).into();
        assert_eq!(point.x(), 80.0);
        assert_eq!(point.y(), 13.0);
        assert_eq!(Coordinate::from(point), Coordinate::new(13.0, 80.0));
    }
}
