//! Road graph components - node identifiers, nodes and edges

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Coordinate, Meters};

/// Identifier of a node as supplied by the upstream network source
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct NodeId(pub i64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for NodeId {
    fn from(value: i64) -> Self {
        NodeId(value)
    }
}

/// Road graph node
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoadNode {
    /// Upstream ID of the node
    pub id: NodeId,
    /// Node coordinates
    pub coordinate: Coordinate,
}

/// Road graph edge (road segment between two nodes)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RoadEdge {
    /// Physical length in meters
    pub length_m: Meters,
    /// Risk-adjusted traversal cost, never below `length_m`
    pub weight: f64,
    /// Flood risk at the segment midpoint
    pub risk: f64,
}

impl RoadEdge {
    /// Edge with no flood exposure
    pub fn safe(length_m: Meters) -> Self {
        Self {
            length_m,
            weight: length_m,
            risk: 0.0,
        }
    }

    /// Extra cost caused by flood exposure
    pub fn risk_penalty(&self) -> f64 {
        self.weight - self.length_m
    }
}
