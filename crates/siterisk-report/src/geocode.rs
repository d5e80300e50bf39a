//! Coordinate extraction from geocoder JSON.
//!
//! Providers disagree on field names and envelope shape; probe the common
//! variants rather than binding a strict schema to one vendor.

use serde_json::Value;

use crate::error::ReportError;
use crate::types::Coordinates;

/// Pull `(lat, lon)` out of a geocoder response.
///
/// Accepts a bare object, the first element of a top-level array, or the
/// first element of a `results`/`features` array; coordinate keys may be
/// `lat`/`latitude` and `lon`/`lng`/`longitude`, as numbers or numeric
/// strings.
///
/// # Errors
///
/// Returns [`ReportError::Geocode`] when no coordinate pair can be found or
/// the pair is outside valid ranges.
pub fn coordinates_from_json(value: &Value) -> Result<Coordinates, ReportError> {
    let candidate = match value {
        Value::Array(items) => items.first(),
        Value::Object(_) => {
            let nested = ["results", "features"]
                .iter()
                .find_map(|key| value.get(key).and_then(Value::as_array))
                .and_then(|items| items.first());
            nested.or(Some(value))
        }
        _ => None,
    };

    let Some(candidate) = candidate else {
        return Err(ReportError::Geocode {
            reason: "empty geocoder response".to_owned(),
        });
    };

    let lat = number_field(candidate, &["lat", "latitude"]);
    let lon = number_field(candidate, &["lon", "lng", "longitude"]);

    match (lat, lon) {
        (Some(lat), Some(lon)) if (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lon) => {
            Ok(Coordinates { lat, lon })
        }
        (Some(lat), Some(lon)) => Err(ReportError::Geocode {
            reason: format!("coordinates out of range: ({lat}, {lon})"),
        }),
        _ => Err(ReportError::Geocode {
            reason: "no coordinate fields in geocoder response".to_owned(),
        }),
    }
}

fn number_field(value: &Value, keys: &[&str]) -> Option<f64> {
    keys.iter().find_map(|key| {
        let field = value.get(key)?;
        field
            .as_f64()
            .or_else(|| field.as_str().and_then(|s| s.trim().parse::<f64>().ok()))
    })
}
