//! GeoJSON feature model.
//!
//! WFS responses are parsed leniently: the collection envelope must be well
//! formed, but a malformed member feature is skipped with a warning so one
//! bad geometry cannot sink the remaining features.

use serde_json::Value;
use thiserror::Error;

use crate::Position;

#[derive(Debug, Error)]
pub enum GeoError {
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("expected a FeatureCollection, got type {0:?}")]
    NotAFeatureCollection(Option<String>),

    #[error("feature has no geometry")]
    MissingGeometry,

    #[error("unsupported geometry type: {0}")]
    UnsupportedGeometryType(String),

    #[error("malformed coordinates: {0}")]
    MalformedCoordinates(String),
}

/// Geometry of one feature, `(lon, lat)` axis order throughout.
///
/// Polygons hold their rings outer-first; holes are retained in the model but
/// ignored by the risk computations.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Point(Position),
    LineString(Vec<Position>),
    MultiLineString(Vec<Vec<Position>>),
    Polygon(Vec<Vec<Position>>),
    MultiPolygon(Vec<Vec<Vec<Position>>>),
}

impl Geometry {
    /// Parse a GeoJSON geometry object.
    ///
    /// # Errors
    ///
    /// Returns [`GeoError`] for missing/unsupported `type`, or coordinates
    /// that do not match the declared type's nesting.
    pub fn from_value(value: &Value) -> Result<Self, GeoError> {
        let geom_type = value
            .get("type")
            .and_then(Value::as_str)
            .ok_or(GeoError::MissingGeometry)?;
        let coordinates = value
            .get("coordinates")
            .ok_or_else(|| GeoError::MalformedCoordinates("missing coordinates".to_owned()))?;

        match geom_type {
            "Point" => Ok(Geometry::Point(parse_position(coordinates)?)),
            "LineString" => Ok(Geometry::LineString(parse_positions(coordinates)?)),
            "MultiLineString" => Ok(Geometry::MultiLineString(parse_rings(coordinates)?)),
            "Polygon" => {
                let rings = parse_rings(coordinates)?;
                if rings.is_empty() {
                    return Err(GeoError::MalformedCoordinates(
                        "polygon with no rings".to_owned(),
                    ));
                }
                Ok(Geometry::Polygon(rings))
            }
            "MultiPolygon" => {
                let polygons = as_array(coordinates)?
                    .iter()
                    .map(parse_rings)
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Geometry::MultiPolygon(polygons))
            }
            other => Err(GeoError::UnsupportedGeometryType(other.to_owned())),
        }
    }

    /// Outer rings of this geometry: one per polygon member, empty for
    /// points and lines.
    #[must_use]
    pub fn outer_rings(&self) -> Vec<&[Position]> {
        match self {
            Geometry::Polygon(rings) => rings.first().map(Vec::as_slice).into_iter().collect(),
            Geometry::MultiPolygon(polygons) => polygons
                .iter()
                .filter_map(|rings| rings.first().map(Vec::as_slice))
                .collect(),
            _ => Vec::new(),
        }
    }
}

/// One GeoJSON feature: geometry plus free-form properties.
#[derive(Debug, Clone)]
pub struct Feature {
    pub geometry: Geometry,
    pub properties: Value,
}

impl Feature {
    /// String property by name, `None` when absent or not a string.
    #[must_use]
    pub fn property_str(&self, name: &str) -> Option<&str> {
        self.properties.get(name).and_then(Value::as_str)
    }

    /// Numeric property by name; accepts JSON numbers and numeric strings.
    #[must_use]
    pub fn property_f64(&self, name: &str) -> Option<f64> {
        let value = self.properties.get(name)?;
        value
            .as_f64()
            .or_else(|| value.as_str().and_then(|s| s.trim().parse::<f64>().ok()))
    }
}

#[derive(Debug, Clone, Default)]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
}

/// Parse a GeoJSON `FeatureCollection` document.
///
/// The envelope is validated strictly; member features with missing or
/// malformed geometry are skipped with a warning.
///
/// # Errors
///
/// Returns [`GeoError`] if the body is not valid JSON or not a
/// `FeatureCollection`.
pub fn parse_feature_collection(body: &str) -> Result<FeatureCollection, GeoError> {
    let root: Value = serde_json::from_str(body)?;
    collection_from_value(&root)
}

/// [`parse_feature_collection`] over an already-parsed JSON document.
///
/// # Errors
///
/// Returns [`GeoError::NotAFeatureCollection`] if the root is not a
/// `FeatureCollection`.
pub fn collection_from_value(root: &Value) -> Result<FeatureCollection, GeoError> {
    let root_type = root.get("type").and_then(Value::as_str);
    if root_type != Some("FeatureCollection") {
        return Err(GeoError::NotAFeatureCollection(
            root_type.map(str::to_owned),
        ));
    }

    let members = root
        .get("features")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();

    let mut features = Vec::with_capacity(members.len());
    for (index, member) in members.iter().enumerate() {
        let Some(geometry_value) = member.get("geometry").filter(|g| !g.is_null()) else {
            tracing::warn!(index, "skipping feature without geometry");
            continue;
        };
        match Geometry::from_value(geometry_value) {
            Ok(geometry) => features.push(Feature {
                geometry,
                properties: member
                    .get("properties")
                    .cloned()
                    .unwrap_or(Value::Null),
            }),
            Err(e) => {
                tracing::warn!(index, error = %e, "skipping malformed feature");
            }
        }
    }

    Ok(FeatureCollection { features })
}

fn as_array(value: &Value) -> Result<&Vec<Value>, GeoError> {
    value
        .as_array()
        .ok_or_else(|| GeoError::MalformedCoordinates(format!("expected array, got {value}")))
}

fn parse_position(value: &Value) -> Result<Position, GeoError> {
    let pair = as_array(value)?;
    if pair.len() < 2 {
        return Err(GeoError::MalformedCoordinates(format!(
            "position needs lon and lat, got {value}"
        )));
    }
    let lon = pair[0].as_f64().ok_or_else(|| {
        GeoError::MalformedCoordinates(format!("non-numeric longitude: {}", pair[0]))
    })?;
    let lat = pair[1].as_f64().ok_or_else(|| {
        GeoError::MalformedCoordinates(format!("non-numeric latitude: {}", pair[1]))
    })?;
    Ok((lon, lat))
}

fn parse_positions(value: &Value) -> Result<Vec<Position>, GeoError> {
    as_array(value)?.iter().map(parse_position).collect()
}

fn parse_rings(value: &Value) -> Result<Vec<Vec<Position>>, GeoError> {
    as_array(value)?.iter().map(parse_positions).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_point() {
        let geom = Geometry::from_value(&json!({
            "type": "Point",
            "coordinates": [145.03, -37.80]
        }))
        .unwrap();
        assert_eq!(geom, Geometry::Point((145.03, -37.80)));
    }

    #[test]
    fn parses_polygon_with_hole() {
        let geom = Geometry::from_value(&json!({
            "type": "Polygon",
            "coordinates": [
                [[0.0, 0.0], [4.0, 0.0], [4.0, 4.0], [0.0, 4.0]],
                [[1.0, 1.0], [2.0, 1.0], [2.0, 2.0], [1.0, 2.0]]
            ]
        }))
        .unwrap();
        // Outer ring only; the hole stays in the model but not in outer_rings.
        assert_eq!(geom.outer_rings().len(), 1);
        assert_eq!(geom.outer_rings()[0].len(), 4);
    }

    #[test]
    fn parses_multipolygon_outer_rings() {
        let geom = Geometry::from_value(&json!({
            "type": "MultiPolygon",
            "coordinates": [
                [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0]]],
                [[[5.0, 5.0], [6.0, 5.0], [6.0, 6.0]]]
            ]
        }))
        .unwrap();
        assert_eq!(geom.outer_rings().len(), 2);
    }

    #[test]
    fn rejects_unsupported_type() {
        let result = Geometry::from_value(&json!({
            "type": "GeometryCollection",
            "coordinates": []
        }));
        assert!(matches!(result, Err(GeoError::UnsupportedGeometryType(_))));
    }

    #[test]
    fn rejects_non_numeric_coordinates() {
        let result = Geometry::from_value(&json!({
            "type": "Point",
            "coordinates": ["east", "south"]
        }));
        assert!(matches!(result, Err(GeoError::MalformedCoordinates(_))));
    }

    #[test]
    fn feature_collection_parses_features() {
        let body = json!({
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "geometry": {"type": "Point", "coordinates": [145.0, -37.8]},
                    "properties": {"name": "Substation A", "capacity_mw": 150}
                }
            ]
        })
        .to_string();

        let collection = parse_feature_collection(&body).unwrap();
        assert_eq!(collection.features.len(), 1);
        let feature = &collection.features[0];
        assert_eq!(feature.property_str("name"), Some("Substation A"));
        assert_eq!(feature.property_f64("capacity_mw"), Some(150.0));
    }

    #[test]
    fn numeric_string_property_coerces() {
        let body = json!({
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "geometry": {"type": "Point", "coordinates": [0.0, 0.0]},
                "properties": {"capacity_mw": "75.5"}
            }]
        })
        .to_string();
        let collection = parse_feature_collection(&body).unwrap();
        assert_eq!(collection.features[0].property_f64("capacity_mw"), Some(75.5));
    }

    #[test]
    fn malformed_member_is_skipped_not_fatal() {
        let body = json!({
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "geometry": {"type": "Blob", "coordinates": []},
                    "properties": {}
                },
                {
                    "type": "Feature",
                    "geometry": null,
                    "properties": {}
                },
                {
                    "type": "Feature",
                    "geometry": {"type": "Point", "coordinates": [1.0, 2.0]},
                    "properties": {}
                }
            ]
        })
        .to_string();

        let collection = parse_feature_collection(&body).unwrap();
        assert_eq!(collection.features.len(), 1);
    }

    #[test]
    fn non_feature_collection_is_an_error() {
        let body = json!({"type": "Feature"}).to_string();
        let result = parse_feature_collection(&body);
        assert!(matches!(result, Err(GeoError::NotAFeatureCollection(_))));
    }

    #[test]
    fn invalid_json_is_an_error() {
        assert!(matches!(
            parse_feature_collection("not json"),
            Err(GeoError::Json(_))
        ));
    }
}
