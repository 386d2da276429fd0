//! Hazard points extracted from KML documents

use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use log::{info, warn};
use regex::Regex;

use crate::{Coordinate, Error, HazardSet};

// KML stores positions as `lon,lat[,alt]`
static KML_COORDINATE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(-?\d+\.\d+),(-?\d+\.\d+)").expect("KML coordinate pattern is valid")
});

/// Every decimal `lon,lat` pair found in `text`, as coordinates, in
/// document order. Out-of-range pairs are skipped.
pub fn parse_kml_coordinates(text: &str) -> Vec<Coordinate> {
    let mut skipped = 0usize;
    let coordinates = KML_COORDINATE_PATTERN
        .captures_iter(text)
        .filter_map(|caps| {
            let lon: f64 = caps[1].parse().ok()?;
            let lat: f64 = caps[2].parse().ok()?;
            let coordinate = Coordinate::new(lat, lon);
            if coordinate.is_valid() {
                Some(coordinate)
            } else {
                skipped += 1;
                None
            }
        })
        .collect();

    if skipped > 0 {
        warn!("Skipped {skipped} out-of-range KML coordinates");
    }
    coordinates
}

/// Builds a deduplicated hazard set from KML text
///
/// # Errors
///
/// Returns [`Error::EmptyHazardSet`] when the document holds no coordinates.
pub fn hazards_from_kml(text: &str) -> Result<HazardSet, Error> {
    let hazards = HazardSet::new(parse_kml_coordinates(text));
    if hazards.is_empty() {
        return Err(Error::EmptyHazardSet);
    }
    info!("Loaded {} flood hazard points", hazards.len());
    Ok(hazards)
}

/// Reads a KML file and builds its hazard set
pub fn load_kml_hazards(path: &Path) -> Result<HazardSet, Error> {
    let bytes = fs::read(path).map_err(|e| {
        std::io::Error::new(
            e.kind(),
            format!("Failed to open hazard file '{}': {}", path.display(), e),
        )
    })?;
    hazards_from_kml(&String::from_utf8_lossy(&bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    const KML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<kml xmlns="http://www.opengis.net/kml/2.2">
  <Document>
    <Placemark>
      <name>Inundation 12in</name>
      <Point><coordinates>80.2000,13.0500,0</coordinates></Point>
    </Placemark>
    <Placemark>
      <Polygon><outerBoundaryIs><LinearRing><coordinates>
        80.2100,13.0400,0 80.2200,13.0410,0 80.2000,13.0500,0
      </coordinates></LinearRing></outerBoundaryIs></Polygon>
    </Placemark>
    <Placemark>
      <Point><coordinates>250.0,13.0,0</coordinates></Point>
    </Placemark>
  </Document>
</kml>"#;

    #[test]
    fn extracts_lat_lon_pairs() {
        let coordinates = parse_kml_coordinates(KML);
        assert_eq!(coordinates[0], Coordinate::new(13.05, 80.2));
        assert_eq!(coordinates[1], Coordinate::new(13.04, 80.21));
        assert_eq!(coordinates.len(), 4);
    }

    #[test]
    fn text_without_pairs_yields_nothing() {
        assert!(parse_kml_coordinates("").is_empty());
        assert!(parse_kml_coordinates("<coordinates>80,13</coordinates>").is_empty());
        assert_eq!(parse_kml_coordinates(KML).len(), 4);
    }

    #[test]
    fn hazard_set_is_deduplicated() {
        let hazards = hazards_from_kml(KML).unwrap();
        assert_eq!(
            hazards.points(),
            &[
                Coordinate::new(13.05, 80.2),
                Coordinate::new(13.04, 80.21),
                Coordinate::new(13.041, 80.22),
            ]
        );
    }

    #[test]
    fn document_without_coordinates_is_rejected() {
        assert!(matches!(
            hazards_from_kml("<kml><Document/></kml>"),
            Err(Error::EmptyHazardSet)
        ));
    }
}
