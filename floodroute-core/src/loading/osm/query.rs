use crate::model::BoundingBox;

/// Overpass QL query selecting every highway way inside `bbox` together
/// with the nodes it references.
pub fn overpass_query(bbox: &BoundingBox) -> String {
    format!(
        "[out:json][timeout:180];\n(\n  way[\"highway\"]({},{},{},{});\n  >;\n);\nout body;\n",
        bbox.south, bbox.west, bbox.north, bbox.east
    )
}
