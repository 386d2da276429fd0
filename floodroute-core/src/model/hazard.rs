//! Known flood hazard locations and proximity queries against them

use itertools::Itertools;
use log::warn;
use serde::Serialize;

use super::bbox::BoundingBox;
use super::spatial::SpatialIndex;
use crate::algo::risk::flood_risk;
use crate::{Coordinate, Error, Kilometers};

/// Immutable, deduplicated set of hazard points.
///
/// Identical coordinate pairs are collapsed; the remaining points keep the
/// order in which they were first seen. Points outside valid latitude and
/// longitude ranges (NaN and infinities included) are discarded.
#[derive(Debug, Clone)]
pub struct HazardSet {
    points: Vec<Coordinate>,
    index: SpatialIndex,
}

impl HazardSet {
    pub fn new(points: impl IntoIterator<Item = Coordinate>) -> Self {
        let mut discarded = 0usize;
        let points: Vec<Coordinate> = points
            .into_iter()
            .filter(|point| {
                let valid = point.is_valid();
                if !valid {
                    discarded += 1;
                }
                valid
            })
            .unique_by(Coordinate::bit_key)
            .collect();
        if discarded > 0 {
            warn!("Discarded {discarded} hazard points with invalid coordinates");
        }
        let index = SpatialIndex::new(points.iter().copied());
        Self { points, index }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Hazard points in first-seen order
    pub fn points(&self) -> &[Coordinate] {
        &self.points
    }

    /// Minimum haversine distance from `point` to any hazard
    ///
    /// # Errors
    ///
    /// - [`Error::EmptyHazardSet`] when there are no hazards
    /// - [`Error::InvalidData`] when `point` is not a valid coordinate
    pub fn min_distance_km(&self, point: Coordinate) -> Result<Kilometers, Error> {
        if self.is_empty() {
            return Err(Error::EmptyHazardSet);
        }
        if !point.is_valid() {
            return Err(Error::InvalidData(format!(
                "Cannot measure hazard distance from {point}"
            )));
        }
        self.index
            .nearest(point)
            .map(|(_, distance)| distance)
            .ok_or(Error::EmptyHazardSet)
    }

    /// Flood risk at `point` given the hazard influence radius
    ///
    /// # Errors
    ///
    /// Same as [`HazardSet::min_distance_km`].
    pub fn risk_at(&self, point: Coordinate, max_risk_dist_km: Kilometers) -> Result<f64, Error> {
        Ok(flood_risk(self.min_distance_km(point)?, max_risk_dist_km))
    }

    /// Box around all hazards, widened by `margin_deg` on every side
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyHazardSet`] when there are no hazards.
    pub fn bounding_box(&self, margin_deg: f64) -> Result<BoundingBox, Error> {
        let (south, north) = self
            .points
            .iter()
            .map(|p| p.lat)
            .minmax_by(f64::total_cmp)
            .into_option()
            .ok_or(Error::EmptyHazardSet)?;
        let (west, east) = self
            .points
            .iter()
            .map(|p| p.lon)
            .minmax_by(f64::total_cmp)
            .into_option()
            .ok_or(Error::EmptyHazardSet)?;

        Ok(BoundingBox {
            south: south - margin_deg,
            west: west - margin_deg,
            north: north + margin_deg,
            east: east + margin_deg,
        })
    }
}

impl FromIterator<Coordinate> for HazardSet {
    fn from_iter<T: IntoIterator<Item = Coordinate>>(iter: T) -> Self {
        HazardSet::new(iter)
    }
}

impl Serialize for HazardSet {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.points.serialize(serializer)
    }
}
