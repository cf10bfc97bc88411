//! WKT point text parsing.
//!
//! The backend's geography column renders as `POINT(lng lat)` on some query
//! paths, optionally prefixed with a spatial reference id:
//! `SRID=4326;POINT(lng lat)`.

use crate::{Coordinate, GeoError, Result};

/// Parse a WKT POINT string.
///
/// Format: `POINT(longitude latitude)`, optionally prefixed `SRID=nnnn;`.
/// The keyword is case-sensitive; longitude comes first (X before Y).
pub(crate) fn parse_wkt_point(wkt: &str) -> Result<Coordinate> {
    let wkt = wkt.trim();

    // Strip an EWKT spatial-reference prefix; the id itself is unused
    let wkt = match wkt.strip_prefix("SRID=") {
        Some(rest) => rest
            .split_once(';')
            .ok_or_else(|| GeoError::InvalidWkt("SRID prefix without ';'".into()))?
            .1,
        None => wkt,
    };

    if !wkt.starts_with("POINT(") && !wkt.starts_with("POINT (") {
        return Err(GeoError::InvalidWkt(format!("Expected POINT, got: {}", wkt)));
    }

    let start = wkt.find('(').ok_or_else(|| GeoError::InvalidWkt("Missing '('".into()))?;
    let end = wkt.find(')').ok_or_else(|| GeoError::InvalidWkt("Missing ')'".into()))?;

    if start >= end {
        return Err(GeoError::InvalidWkt("Invalid parentheses".into()));
    }

    let coords_str = &wkt[start + 1..end];
    let parts: Vec<&str> = coords_str.split_whitespace().collect();

    if parts.len() != 2 {
        return Err(GeoError::InvalidWkt(format!(
            "Expected 2 coordinates, got {}",
            parts.len()
        )));
    }

    let lng: f64 = parts[0]
        .parse()
        .map_err(|_| GeoError::InvalidWkt(format!("Invalid longitude: {}", parts[0])))?;
    let lat: f64 = parts[1]
        .parse()
        .map_err(|_| GeoError::InvalidWkt(format!("Invalid latitude: {}", parts[1])))?;

    Ok(Coordinate::new(lat, lng))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_point() {
        let coord = parse_wkt_point("POINT(79.8612 6.9271)").unwrap();
        assert!((coord.latitude - 6.9271).abs() < 1e-9);
        assert!((coord.longitude - 79.8612).abs() < 1e-9);
    }

    #[test]
    fn test_parse_point_with_space() {
        let coord = parse_wkt_point("POINT (79.8612 6.9271)").unwrap();
        assert!((coord.latitude - 6.9271).abs() < 1e-9);
    }

    #[test]
    fn test_parse_point_with_srid_prefix() {
        let coord = parse_wkt_point("SRID=4326;POINT(79.8612 6.9271)").unwrap();
        assert!((coord.longitude - 79.8612).abs() < 1e-9);
    }

    #[test]
    fn test_parse_negative_coordinates() {
        let coord = parse_wkt_point("POINT(-74.0060 40.7128)").unwrap();
        assert!((coord.latitude - 40.7128).abs() < 1e-9);
        assert!((coord.longitude - (-74.0060)).abs() < 1e-9);
    }

    #[test]
    fn test_lowercase_keyword_rejected() {
        assert!(parse_wkt_point("point(79.8612 6.9271)").is_err());
    }

    #[test]
    fn test_non_point_geometry_rejected() {
        assert!(parse_wkt_point("POLYGON((0 0, 1 1, 1 0, 0 0))").is_err());
    }

    #[test]
    fn test_wrong_arity_rejected() {
        assert!(parse_wkt_point("POINT(79.8612)").is_err());
        assert!(parse_wkt_point("POINT(79.8612 6.9271 12.0)").is_err());
    }

    #[test]
    fn test_unparseable_token_rejected() {
        assert!(parse_wkt_point("POINT(east north)").is_err());
    }
}
