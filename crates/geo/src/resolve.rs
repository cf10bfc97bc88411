//! Coordinate resolution from heterogeneous location values.
//!
//! The backend persists locations in a geography column whose wire shape
//! depends on the query path and client library version: WKT point text,
//! hex-encoded EWKB, a driver-deserialized object with direct fields, or a
//! GeoJSON-style object. This module is the single place that normalizes
//! all of them so distance logic never special-cases representation.

use crate::{ewkb, wkt, Coordinate};
use serde_json::Value;

/// Resolve a raw location value into a coordinate.
///
/// Tries, in order: WKT point text, hex EWKB, direct lng/lat fields, and a
/// GeoJSON `coordinates` array. Malformed, ambiguous, or out-of-range input
/// yields `None` — never a partial or zero-filled coordinate, and never a
/// panic. Callers must treat `None` as "coordinates unknown" and leave the
/// record out of distance ranking.
///
/// # Example
/// ```
/// use surplus_geo::resolve_coordinate;
/// use serde_json::json;
///
/// let wkt = json!("POINT(79.8612 6.9271)");
/// let coord = resolve_coordinate(&wkt).unwrap();
/// assert!((coord.latitude - 6.9271).abs() < 1e-9);
///
/// let geojson = json!({"type": "Point", "coordinates": [79.8612, 6.9271]});
/// assert!(resolve_coordinate(&geojson).is_some());
///
/// assert!(resolve_coordinate(&json!({"lat": 95.0, "lng": 10.0})).is_none());
/// ```
pub fn resolve_coordinate(value: &Value) -> Option<Coordinate> {
    let candidate = match value {
        Value::String(s) => wkt::parse_wkt_point(s)
            .ok()
            .or_else(|| ewkb::parse_ewkb_hex(s).ok()),
        Value::Object(_) => direct_fields(value).or_else(|| geojson_coordinates(value)),
        _ => None,
    }?;

    // Range validation applies uniformly, whichever path produced the pair
    candidate.is_valid().then_some(candidate)
}

/// Probe longitude/latitude under the field aliases the drivers emit.
///
/// An exact (0, 0) result is treated as "not found" so a missing field pair
/// deserialized as zeros does not place a record at the null island; the
/// GeoJSON fallback then gets a chance.
fn direct_fields(value: &Value) -> Option<Coordinate> {
    let lng = first_present(value, &["lng", "longitude", "x"])?;
    let lat = first_present(value, &["lat", "latitude", "y"])?;

    let lng = number_from(lng)?;
    let lat = number_from(lat)?;

    if lng == 0.0 && lat == 0.0 {
        return None;
    }

    Some(Coordinate::new(lat, lng))
}

/// GeoJSON-style nested form: `{"coordinates": [lng, lat, ...]}`.
fn geojson_coordinates(value: &Value) -> Option<Coordinate> {
    let coords = value.get("coordinates")?.as_array()?;
    if coords.len() < 2 {
        return None;
    }

    let lng = number_from(&coords[0])?;
    let lat = number_from(&coords[1])?;
    Some(Coordinate::new(lat, lng))
}

fn first_present<'a>(value: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|k| value.get(*k))
}

/// Accept a JSON number or a numeric string, requiring a finite result.
fn number_from(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|f| f.is_finite())
}
