use serde::Deserialize;
use serde_json::Value;

/// Top-level Overpass API JSON document (`[out:json]`).
///
/// Elements are kept as raw JSON so one malformed entry does not reject
/// the whole document.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct OverpassResponse {
    pub elements: Vec<Value>,
}

/// Single Overpass element, tagged by its `type` field
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum RawElement {
    Node {
        id: i64,
        lat: Option<f64>,
        lon: Option<f64>,
    },
    Way {
        id: i64,
        #[serde(default)]
        nodes: Vec<i64>,
    },
    /// Relations, areas and anything else not needed for routing
    #[serde(other)]
    Other,
}

/// Element kind named by the `type` field, read without decoding the rest
pub(crate) fn element_type(element: &Value) -> Option<&str> {
    element.get("type").and_then(Value::as_str)
}
