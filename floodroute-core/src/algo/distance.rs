use crate::{Coordinate, Kilometers};

/// Earth radius used by every distance in the engine
pub const EARTH_RADIUS_KM: Kilometers = 6371.0;

/// Great-circle distance between two coordinates in kilometers (haversine).
///
/// Inputs are not validated. Out-of-range coordinates yield a finite,
/// mathematically defined value that has no geographic meaning.
pub fn haversine_km(a: Coordinate, b: Coordinate) -> Kilometers {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lon = (b.lon - a.lon).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    // Rounding can push `h` past 1 for near-antipodal pairs
    let h = h.clamp(0.0, 1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c
}

/// Position of a coordinate on the unit sphere.
///
/// Euclidean (chord) distance between these vectors grows monotonically
/// with great-circle distance, so a Cartesian index can answer
/// nearest-by-haversine queries.
pub(crate) fn unit_vector(c: Coordinate) -> [f64; 3] {
    let (lat, lon) = (c.lat.to_radians(), c.lon.to_radians());
    [lat.cos() * lon.cos(), lat.cos() * lon.sin(), lat.sin()]
}
