//! Geospatial utilities for Surplus bag discovery.
//!
//! This crate provides:
//! - Coordinate resolution from the location shapes the backend emits
//!   (WKT point text, hex-encoded extended WKB, plain objects, GeoJSON)
//! - Haversine distance calculations
//! - Batch distance ranking with optional parallelism
//!
//! # Example
//!
//! ```
//! use surplus_geo::{distance_km, Coordinate};
//!
//! let colombo = Coordinate::new(6.9271, 79.8612);
//! let kandy = Coordinate::new(7.2906, 80.6337);
//!
//! let km = distance_km(&colombo, &kandy);
//! assert!((km - 94.3).abs() < 1.0);
//! ```

mod error;
mod ewkb;
mod haversine;
mod resolve;
mod wkt;
pub mod batch;

pub use batch::{DistanceResult, LocationItem};
pub use error::{GeoError, Result};
pub use haversine::{
    approximate_distance, distance_km, haversine_distance, haversine_distance_meters,
    EARTH_RADIUS_KM, EARTH_RADIUS_M,
};
pub use resolve::resolve_coordinate;

/// A geographic coordinate with latitude and longitude.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees (-90 to 90)
    pub latitude: f64,
    /// Longitude in degrees (-180 to 180)
    pub longitude: f64,
}

impl Coordinate {
    /// Creates a new coordinate.
    ///
    /// # Arguments
    /// * `latitude` - Latitude in degrees (-90 to 90)
    /// * `longitude` - Longitude in degrees (-180 to 180)
    #[inline]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Returns true if both components are finite and within valid ranges.
    ///
    /// NaN fails every comparison, so non-finite values are rejected here
    /// without a separate check.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.latitude >= -90.0
            && self.latitude <= 90.0
            && self.longitude >= -180.0
            && self.longitude <= 180.0
    }

    /// Formats the coordinate as WKT point text, `POINT(lon lat)`.
    ///
    /// Rust's shortest-roundtrip float formatting means the output parses
    /// back to exactly this coordinate.
    pub fn to_wkt(&self) -> String {
        format!("POINT({} {})", self.longitude, self.latitude)
    }

    /// Converts degrees to radians for internal calculations.
    #[inline]
    pub(crate) fn to_radians(&self) -> (f64, f64) {
        (self.latitude.to_radians(), self.longitude.to_radians())
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self::new(lat, lng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_coordinate_creation() {
        let coord = Coordinate::new(6.9271, 79.8612);
        assert_eq!(coord.latitude, 6.9271);
        assert_eq!(coord.longitude, 79.8612);
    }

    #[test]
    fn test_coordinate_validation() {
        assert!(Coordinate::new(0.0, 0.0).is_valid());
        assert!(Coordinate::new(90.0, 180.0).is_valid());
        assert!(Coordinate::new(-90.0, -180.0).is_valid());
        assert!(!Coordinate::new(91.0, 0.0).is_valid());
        assert!(!Coordinate::new(0.0, 181.0).is_valid());
        assert!(!Coordinate::new(f64::NAN, 0.0).is_valid());
        assert!(!Coordinate::new(0.0, f64::INFINITY).is_valid());
    }

    #[test]
    fn test_coordinate_from_tuple() {
        let coord: Coordinate = (6.9271, 79.8612).into();
        assert_eq!(coord.latitude, 6.9271);
    }

    #[test]
    fn test_wkt_formatting() {
        let coord = Coordinate::new(6.9271, 79.8612);
        assert_eq!(coord.to_wkt(), "POINT(79.8612 6.9271)");
    }

    proptest! {
        #[test]
        fn prop_wkt_round_trip(lat in -90.0f64..90.0, lng in -180.0f64..180.0) {
            let coord = Coordinate::new(lat, lng);
            let value = serde_json::Value::String(coord.to_wkt());
            let parsed = resolve_coordinate(&value).expect("valid coordinate must resolve");
            prop_assert!((parsed.latitude - lat).abs() < 1e-9);
            prop_assert!((parsed.longitude - lng).abs() < 1e-9);
        }

        #[test]
        fn prop_distance_symmetric(
            lat1 in -90.0f64..90.0, lng1 in -180.0f64..180.0,
            lat2 in -90.0f64..90.0, lng2 in -180.0f64..180.0,
        ) {
            let a = Coordinate::new(lat1, lng1);
            let b = Coordinate::new(lat2, lng2);
            prop_assert!((distance_km(&a, &b) - distance_km(&b, &a)).abs() < 1e-9);
        }

        #[test]
        fn prop_distance_non_negative(
            lat1 in -90.0f64..90.0, lng1 in -180.0f64..180.0,
            lat2 in -90.0f64..90.0, lng2 in -180.0f64..180.0,
        ) {
            let a = Coordinate::new(lat1, lng1);
            let b = Coordinate::new(lat2, lng2);
            prop_assert!(distance_km(&a, &b) >= 0.0);
        }
    }
}
