use thiserror::Error;

use crate::NodeId;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Hazard set is empty, flood risk cannot be computed")]
    EmptyHazardSet,
    #[error("Road graph has no usable nodes or edges")]
    EmptyGraph,
    #[error("Node {0} is not part of the road graph")]
    InvalidNode(NodeId),
    #[error("No path exists between node {from} and node {to}")]
    NoPathExists { from: NodeId, to: NodeId },
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("GeoJSON error: {0}")]
    GeoJsonError(String),
}

impl Error {
    /// Stable machine-readable name of the failure kind
    pub fn kind(&self) -> &'static str {
        match self {
            Error::EmptyHazardSet => "EmptyHazardSet",
            Error::EmptyGraph => "EmptyGraph",
            Error::InvalidNode(_) => "InvalidNode",
            Error::NoPathExists { .. } => "NoPathExists",
            Error::InvalidData(_) => "InvalidData",
            Error::IoError(_) => "IoError",
            Error::JsonError(_) => "JsonError",
            Error::GeoJsonError(_) => "GeoJsonError",
        }
    }
}
