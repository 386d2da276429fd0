use geo::{LineString, Point};
use geojson::{Feature, FeatureCollection, Geometry, Value as GeoJsonValue};
use serde_json::json;

use super::Route;
use crate::{Coordinate, Error};

impl Route {
    /// Converts the route to a `GeoJSON` `FeatureCollection`: the path as a
    /// `LineString` followed by `start` and `destination` points.
    pub fn to_geojson(&self) -> Result<FeatureCollection, Error> {
        let line: LineString<f64> = self.coordinates.iter().map(|&c| geo::Coord::from(c)).collect();

        let path = json!({
            "type": "Feature",
            "geometry": Geometry::new(GeoJsonValue::from(&line)),
            "properties": {
                "kind": "route",
                "cost": self.cost,
                "length_m": self.length_m,
                "risk_penalty": self.risk_penalty(),
                "nodes": self.nodes,
            }
        });

        let mut features = vec![to_feature(path)?];
        if let (Some(start), Some(destination)) = (self.start(), self.destination()) {
            features.push(point_feature(*start, "start")?);
            features.push(point_feature(*destination, "destination")?);
        }

        Ok(FeatureCollection {
            features,
            bbox: None,
            foreign_members: None,
        })
    }

    pub fn to_geojson_string(&self) -> Result<String, Error> {
        serde_json::to_string(&self.to_geojson()?).map_err(|e| Error::GeoJsonError(e.to_string()))
    }
}

fn point_feature(coordinate: Coordinate, kind: &str) -> Result<Feature, Error> {
    let point: Point<f64> = coordinate.into();
    to_feature(json!({
        "type": "Feature",
        "geometry": Geometry::new(GeoJsonValue::from(&point)),
        "properties": {
            "kind": kind,
            "lat": coordinate.lat,
            "lon": coordinate.lon,
        }
    }))
}

fn to_feature(value: serde_json::Value) -> Result<Feature, Error> {
    serde_json::from_value::<Feature>(value).map_err(|e| Error::GeoJsonError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{NodeId, RoadEdge, RoadNode};

    #[test]
    fn exports_line_and_endpoints_in_lon_lat_order() {
        let mut route = Route::single(&RoadNode {
            id: NodeId(1),
            coordinate: Coordinate::new(13.0, 80.0),
        });
        route.push(
            &RoadNode {
                id: NodeId(2),
                coordinate: Coordinate::new(13.01, 80.02),
            },
            &RoadEdge::safe(2400.0),
        );

        let value: serde_json::Value =
            serde_json::from_str(&route.to_geojson_string().unwrap()).unwrap();
        let features = value["features"].as_array().unwrap();
        assert_eq!(features.len(), 3);

        assert_eq!(features[0]["geometry"]["type"], "LineString");
        assert_eq!(
            features[0]["geometry"]["coordinates"],
            json!([[80.0, 13.0], [80.02, 13.01]])
        );
        assert_eq!(features[0]["properties"]["nodes"], json!([1, 2]));
        assert_eq!(features[0]["properties"]["cost"], json!(2400.0));

        assert_eq!(features[1]["properties"]["kind"], "start");
        assert_eq!(features[1]["geometry"]["coordinates"], json!([80.0, 13.0]));
        assert_eq!(features[2]["properties"]["kind"], "destination");
    }
}
