//! Haversine distance calculation.
//!
//! The Haversine formula calculates the great-circle distance between two
//! points on a sphere given their longitudes and latitudes.

use crate::Coordinate;

/// Earth's mean radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Earth's mean radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Calculates the great-circle distance between two coordinates in kilometers.
///
/// # Example
/// ```
/// use surplus_geo::{haversine_distance, Coordinate};
///
/// let colombo = Coordinate::new(6.9271, 79.8612);
/// let galle = Coordinate::new(6.0535, 80.2210);
///
/// let distance = haversine_distance(&colombo, &galle);
/// assert!((distance - 105.0).abs() < 1.0);
/// ```
#[inline]
pub fn haversine_distance(from: &Coordinate, to: &Coordinate) -> f64 {
    haversine_distance_with_radius(from, to, EARTH_RADIUS_KM)
}

/// Calculates the great-circle distance between two coordinates in meters.
#[inline]
pub fn haversine_distance_meters(from: &Coordinate, to: &Coordinate) -> f64 {
    haversine_distance_with_radius(from, to, EARTH_RADIUS_M)
}

/// Distance in kilometers rounded to three decimal places.
///
/// Browse screens sort and display the same pair repeatedly; rounding keeps
/// those values stable across recomputation.
#[inline]
pub fn distance_km(from: &Coordinate, to: &Coordinate) -> f64 {
    (haversine_distance(from, to) * 1000.0).round() / 1000.0
}

/// Internal function that calculates distance with a custom radius.
#[inline]
fn haversine_distance_with_radius(from: &Coordinate, to: &Coordinate, radius: f64) -> f64 {
    let (lat1, lon1) = from.to_radians();
    let (lat2, lon2) = to.to_radians();

    let d_lat = lat2 - lat1;
    let d_lon = lon2 - lon1;

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);

    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    radius * c
}

/// Fast approximate distance for filtering (equirectangular projection).
///
/// Less accurate than Haversine over long distances; used to prefilter
/// radius queries before the exact formula runs.
#[inline]
pub fn approximate_distance(from: &Coordinate, to: &Coordinate) -> f64 {
    let (lat1, lon1) = from.to_radians();
    let (lat2, lon2) = to.to_radians();

    let x = (lon2 - lon1) * ((lat1 + lat2) / 2.0).cos();
    let y = lat2 - lat1;

    (x * x + y * y).sqrt() * EARTH_RADIUS_KM
}

#[cfg(test)]
mod tests {
    use super::*;

    // Test data: known distances between Sri Lankan cities
    const COLOMBO: Coordinate = Coordinate { latitude: 6.9271, longitude: 79.8612 };
    const KANDY: Coordinate = Coordinate { latitude: 7.2906, longitude: 80.6337 };
    const GALLE: Coordinate = Coordinate { latitude: 6.0535, longitude: 80.2210 };
    const NEGOMBO: Coordinate = Coordinate { latitude: 7.2008, longitude: 79.8737 };

    #[test]
    fn test_colombo_to_kandy() {
        let distance = haversine_distance(&COLOMBO, &KANDY);
        // Expected: ~94 km
        assert!((distance - 94.3).abs() < 1.0, "Colombo-Kandy: {}", distance);
    }

    #[test]
    fn test_colombo_to_galle() {
        let distance = haversine_distance(&COLOMBO, &GALLE);
        // Expected: ~105 km
        assert!((distance - 105.0).abs() < 1.0, "Colombo-Galle: {}", distance);
    }

    #[test]
    fn test_one_degree_of_longitude_at_equator() {
        let origin = Coordinate::new(0.0, 0.0);
        let east = Coordinate::new(0.0, 1.0);
        let distance = distance_km(&origin, &east);
        assert!((distance - 111.19).abs() < 0.5, "one degree: {}", distance);
    }

    #[test]
    fn test_same_point_zero_distance() {
        assert_eq!(distance_km(&COLOMBO, &COLOMBO), 0.0);
        assert!(haversine_distance(&COLOMBO, &COLOMBO).abs() < 1e-9);
    }

    #[test]
    fn test_symmetry() {
        let d1 = distance_km(&COLOMBO, &NEGOMBO);
        let d2 = distance_km(&NEGOMBO, &COLOMBO);
        assert!((d1 - d2).abs() < 1e-9);
    }

    #[test]
    fn test_rounding_to_three_decimals() {
        let d = distance_km(&COLOMBO, &KANDY);
        assert_eq!(d, (d * 1000.0).round() / 1000.0);
    }

    #[test]
    fn test_meters_conversion() {
        let km = haversine_distance(&COLOMBO, &KANDY);
        let meters = haversine_distance_meters(&COLOMBO, &KANDY);
        assert!((meters - km * 1000.0).abs() < 1.0);
    }

    #[test]
    fn test_approximate_distance_reasonable() {
        let exact = haversine_distance(&COLOMBO, &KANDY);
        let approx = approximate_distance(&COLOMBO, &KANDY);
        // Within 5% at this range
        let error = ((approx - exact) / exact).abs();
        assert!(error < 0.05, "Error: {}%", error * 100.0);
    }
}
