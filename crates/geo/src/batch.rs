//! Batch distance ranking with optional parallelism.
//!
//! Attaches a distance to every item in a browse result set relative to the
//! requester's location, for "nearby" sorting and radius filtering.

use crate::{approximate_distance, distance_km, resolve_coordinate, Coordinate};
use serde::{Deserialize, Serialize};

/// Headroom factor applied to the equirectangular prefilter so its error
/// margin never drops an item the exact formula would keep.
const PREFILTER_SLACK: f64 = 1.05;

/// Result of a distance calculation for a single item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistanceResult {
    /// The item ID
    pub id: i64,
    /// Distance in kilometers; `None` when the item's location could not be
    /// resolved (such items are excluded from ranking, never placed at 0,0)
    pub distance: Option<f64>,
}

/// Input item for batch distance calculation.
#[derive(Debug, Clone, Deserialize)]
pub struct LocationItem {
    /// Item ID
    pub id: i64,
    /// Raw location value in any of the backend's wire shapes
    pub location: serde_json::Value,
}

/// Calculate distances from an origin to every item.
///
/// # Example
/// ```
/// use surplus_geo::{batch::distances_from, batch::LocationItem, Coordinate};
/// use serde_json::json;
///
/// let items = vec![
///     LocationItem { id: 1, location: json!({"coordinates": [80.6337, 7.2906]}) },
///     LocationItem { id: 2, location: json!("POINT(80.2210 6.0535)") },
/// ];
///
/// let results = distances_from(&Coordinate::new(6.9271, 79.8612), &items);
/// assert_eq!(results.len(), 2);
/// ```
pub fn distances_from(origin: &Coordinate, items: &[LocationItem]) -> Vec<DistanceResult> {
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        items
            .par_iter()
            .map(|item| single_distance(origin, item))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        items.iter().map(|item| single_distance(origin, item)).collect()
    }
}

/// Calculate distances and return items sorted closest-first.
///
/// Items without a resolvable location sort last. `max_results` truncates
/// the sorted list when set.
pub fn nearest(
    origin: &Coordinate,
    items: &[LocationItem],
    max_results: Option<usize>,
) -> Vec<DistanceResult> {
    let mut results = distances_from(origin, items);
    sort_by_distance(&mut results);

    if let Some(max) = max_results {
        results.truncate(max);
    }

    results
}

/// Calculate distances for items within a radius, sorted closest-first.
///
/// Runs the cheap equirectangular approximation first and only computes the
/// exact distance for items that survive the prefilter. Items without a
/// resolvable location are dropped.
pub fn within_radius(
    origin: &Coordinate,
    items: &[LocationItem],
    radius_km: f64,
) -> Vec<DistanceResult> {
    let mut results: Vec<DistanceResult> = items
        .iter()
        .filter_map(|item| {
            let coord = resolve_coordinate(&item.location)?;
            if approximate_distance(origin, &coord) > radius_km * PREFILTER_SLACK {
                return None;
            }
            let exact = distance_km(origin, &coord);
            (exact <= radius_km).then_some(DistanceResult {
                id: item.id,
                distance: Some(exact),
            })
        })
        .collect();

    sort_by_distance(&mut results);
    results
}

/// Calculate distance for a single item.
#[inline]
fn single_distance(origin: &Coordinate, item: &LocationItem) -> DistanceResult {
    DistanceResult {
        id: item.id,
        distance: resolve_coordinate(&item.location).map(|coord| distance_km(origin, &coord)),
    }
}

fn sort_by_distance(results: &mut [DistanceResult]) {
    results.sort_by(|a, b| match (a.distance, b.distance) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(std::cmp::Ordering::Equal),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn create_test_items() -> Vec<LocationItem> {
        vec![
            // Kandy, ~94 km from Colombo
            LocationItem {
                id: 1,
                location: json!({"type": "Point", "coordinates": [80.6337, 7.2906]}),
            },
            // Galle, ~105 km
            LocationItem {
                id: 2,
                location: json!("POINT(80.2210 6.0535)"),
            },
            // Negombo, ~30 km
            LocationItem {
                id: 3,
                location: json!({"lng": 79.8737, "lat": 7.2008}),
            },
            // Unresolvable location
            LocationItem {
                id: 4,
                location: json!(null),
            },
        ]
    }

    const COLOMBO: Coordinate = Coordinate { latitude: 6.9271, longitude: 79.8612 };

    #[test]
    fn test_batch_distances() {
        let results = distances_from(&COLOMBO, &create_test_items());

        assert_eq!(results.len(), 4);

        let kandy = results.iter().find(|r| r.id == 1).unwrap();
        assert!((kandy.distance.unwrap() - 94.335).abs() < 0.5);

        let unresolvable = results.iter().find(|r| r.id == 4).unwrap();
        assert!(unresolvable.distance.is_none());
    }

    #[test]
    fn test_nearest_sorted_unknowns_last() {
        let results = nearest(&COLOMBO, &create_test_items(), None);

        assert_eq!(results.len(), 4);
        assert_eq!(results[0].id, 3); // Negombo closest
        assert_eq!(results[1].id, 1); // then Kandy
        assert_eq!(results[2].id, 2); // then Galle
        assert_eq!(results[3].id, 4); // unknown sorts last
        assert!(results[3].distance.is_none());
    }

    #[test]
    fn test_nearest_max_results() {
        let results = nearest(&COLOMBO, &create_test_items(), Some(2));
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].id, 3);
    }

    #[test]
    fn test_within_radius_filters_and_sorts() {
        // 100 km keeps Negombo and Kandy, drops Galle and the unresolvable
        let results = within_radius(&COLOMBO, &create_test_items(), 100.0);

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].id, 3);
        assert_eq!(results[1].id, 1);
        assert!(results.iter().all(|r| r.distance.unwrap() <= 100.0));
    }

    #[test]
    fn test_within_radius_excludes_unresolvable() {
        let results = within_radius(&COLOMBO, &create_test_items(), 10_000.0);
        assert!(results.iter().all(|r| r.id != 4));
    }
}
