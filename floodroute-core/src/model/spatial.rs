//! Nearest-neighbour index over coordinates on the sphere.
//!
//! Points are stored as unit vectors in an R*-tree. The tree narrows the
//! search by chord distance, then candidates are ranked by exact haversine
//! distance with ties resolved to the lowest position, so results match a
//! full linear scan over the points in insertion order.

use rstar::{AABB, PointDistance, RTree, RTreeObject};

use crate::algo::distance::{haversine_km, unit_vector};
use crate::{Coordinate, Kilometers};

// Squared chord distances within this band of the closest one are
// re-ranked by haversine to absorb rounding differences.
const CHORD_RELATIVE_SLACK: f64 = 1e-9;
const CHORD_ABSOLUTE_SLACK: f64 = 1e-18;

/// Point stored in the R*-tree, remembering its insertion position
#[derive(Debug, Clone, PartialEq)]
pub struct IndexedPoint {
    pub index: usize,
    pub coordinate: Coordinate,
    position: [f64; 3],
}

impl IndexedPoint {
    pub fn new(index: usize, coordinate: Coordinate) -> Self {
        Self {
            index,
            coordinate,
            position: unit_vector(coordinate),
        }
    }
}

impl RTreeObject for IndexedPoint {
    type Envelope = AABB<[f64; 3]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.position)
    }
}

impl PointDistance for IndexedPoint {
    fn distance_2(&self, point: &[f64; 3]) -> f64 {
        let dx = self.position[0] - point[0];
        let dy = self.position[1] - point[1];
        let dz = self.position[2] - point[2];
        dx * dx + dy * dy + dz * dz
    }
}

#[derive(Debug, Clone)]
pub struct SpatialIndex {
    rtree: RTree<IndexedPoint>,
}

impl SpatialIndex {
    /// Bulk-loads the index; positions follow iteration order
    pub fn new(coordinates: impl IntoIterator<Item = Coordinate>) -> Self {
        let points = coordinates
            .into_iter()
            .enumerate()
            .map(|(index, coordinate)| IndexedPoint::new(index, coordinate))
            .collect();
        Self {
            rtree: RTree::bulk_load(points),
        }
    }

    pub fn len(&self) -> usize {
        self.rtree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.rtree.size() == 0
    }

    /// Position of the point closest to `query` and its haversine distance.
    /// Returns `None` for an empty index.
    pub fn nearest(&self, query: Coordinate) -> Option<(usize, Kilometers)> {
        let target = unit_vector(query);
        let mut candidates = self.rtree.nearest_neighbor_iter_with_distance_2(&target);

        let (first, first_distance_2) = candidates.next()?;
        let cutoff = first_distance_2 * (1.0 + CHORD_RELATIVE_SLACK) + CHORD_ABSOLUTE_SLACK;

        let mut best = (first.index, haversine_km(query, first.coordinate));
        for (point, distance_2) in candidates {
            if distance_2 > cutoff {
                break;
            }
            let distance = haversine_km(query, point.coordinate);
            if distance < best.1 || (distance == best.1 && point.index < best.0) {
                best = (point.index, distance);
            }
        }
        Some(best)
    }
}
