//! GeoJSON wire shape for grid features.
//!
//! Matches the map widget's expected layout: a FeatureCollection of
//! LineString features with `{ type: "gridline", direction, value }`
//! properties and `[lon, lat]` positions.

use serde::Serialize;

use crate::feature::{GridFeatureCollection, GridLineFeature};

pub const GRIDLINE_PROPERTY_TYPE: &str = "gridline";

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GeoJsonFeatureCollection {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub features: Vec<GeoJsonFeature>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GeoJsonFeature {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub properties: GridLineProperties,
    pub geometry: GeoJsonLineString,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GridLineProperties {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub direction: &'static str,
    pub value: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GeoJsonLineString {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub coordinates: Vec<[f64; 2]>,
}

impl From<&GridLineFeature> for GeoJsonFeature {
    fn from(line: &GridLineFeature) -> Self {
        Self {
            kind: "Feature",
            properties: GridLineProperties {
                kind: GRIDLINE_PROPERTY_TYPE,
                direction: line.direction.as_str(),
                value: line.value,
            },
            geometry: GeoJsonLineString {
                kind: "LineString",
                coordinates: line.vertices.iter().map(|v| [v.lon, v.lat]).collect(),
            },
        }
    }
}

impl GridFeatureCollection {
    pub fn to_geojson(&self) -> GeoJsonFeatureCollection {
        GeoJsonFeatureCollection {
            kind: "FeatureCollection",
            features: self.features.iter().map(GeoJsonFeature::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use geodesy::GeodeticPoint;

    // Through the crate-root re-exports, as downstream users reach them.
    use crate::{Direction, GeoJsonFeatureCollection, GridFeatureCollection, GridLineFeature};

    #[test]
    fn serializes_expected_wire_shape() {
        let collection = GridFeatureCollection {
            features: vec![GridLineFeature {
                direction: Direction::Vertical,
                value: 500_000.0,
                vertices: vec![GeodeticPoint::new(9.0, 50.0), GeodeticPoint::new(9.0, 50.9)],
            }],
        };

        let geojson: GeoJsonFeatureCollection = collection.to_geojson();
        let value = serde_json::to_value(geojson).unwrap();
        assert_eq!(value["type"], "FeatureCollection");
        assert_eq!(value["features"][0]["type"], "Feature");
        assert_eq!(value["features"][0]["properties"]["type"], "gridline");
        assert_eq!(value["features"][0]["properties"]["direction"], "vertical");
        assert_eq!(value["features"][0]["properties"]["value"], 500_000.0);
        assert_eq!(value["features"][0]["geometry"]["type"], "LineString");
        assert_eq!(
            value["features"][0]["geometry"]["coordinates"][0][0],
            9.0
        );
    }
}
