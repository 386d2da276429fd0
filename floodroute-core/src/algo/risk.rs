//! Flood risk as a function of distance to the nearest hazard

use crate::{Kilometers, Meters};

/// Dimensionless risk in `[0, 1]`.
///
/// Zero at or beyond `max_risk_dist_km`, growing linearly to 1 at zero
/// distance. `max_risk_dist_km` must be positive.
pub fn flood_risk(d_min: Kilometers, max_risk_dist_km: Kilometers) -> f64 {
    if d_min >= max_risk_dist_km {
        0.0
    } else {
        // d_min is a distance, never negative
        (1.0 - d_min.max(0.0) / max_risk_dist_km).clamp(0.0, 1.0)
    }
}

/// Risk-adjusted traversal cost: `length_m * (1 + alpha * risk)`
pub fn edge_weight(length_m: Meters, alpha: f64, risk: f64) -> f64 {
    length_m * (1.0 + alpha * risk)
}
