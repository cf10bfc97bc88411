//! Surprise-bag row model.

use serde::{Deserialize, Serialize};
use surplus_geo::{distance_km, resolve_coordinate, Coordinate};

/// A surprise-bag listing as stored by the backend.
///
/// Field names mirror the backend rows (camelCase on the wire). Lifecycle
/// state is never stored on the row; it is computed on read from the
/// collection window and the two flags (see [`crate::lifecycle`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bag {
    /// Row id
    pub id: i64,
    /// Owning shop profile id
    #[serde(rename = "shopId")]
    pub shop_id: String,
    /// Listing title
    pub title: String,
    /// Optional listing description
    #[serde(default)]
    pub description: Option<String>,
    /// Raw location value; any of the shapes `surplus_geo::resolve_coordinate`
    /// understands (WKT text, hex EWKB, direct fields, GeoJSON)
    #[serde(default)]
    pub location: serde_json::Value,
    /// Pickup calendar date, YYYY-MM-DD
    #[serde(rename = "collectionDate")]
    pub collection_date: String,
    /// Pickup window start, HH:MM
    #[serde(rename = "collectionStart")]
    pub collection_start: String,
    /// Pickup window end, HH:MM; the bag expires at this time
    #[serde(rename = "collectionEnd")]
    pub collection_end: String,
    /// Shop intends to sell this bag
    #[serde(rename = "isActive")]
    pub is_active: bool,
    /// Bag is currently purchasable
    #[serde(rename = "isAvailable")]
    pub is_available: bool,
    /// Bags left; never exceeds `total_quantity` (backend-enforced)
    #[serde(rename = "remainingQuantity")]
    pub remaining_quantity: u32,
    /// Bags offered in total
    #[serde(rename = "totalQuantity")]
    pub total_quantity: u32,
    /// Display price
    #[serde(default)]
    pub price: Option<f64>,
    /// ISO 4217 currency code for the display price
    #[serde(default)]
    pub currency: Option<String>,
    /// Row creation timestamp, ISO-8601
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<String>,
    /// Last update timestamp, ISO-8601
    #[serde(rename = "updatedAt", default)]
    pub updated_at: Option<String>,
    /// Distance in km from the browsing customer, attached client-side;
    /// absent when the bag's location could not be resolved
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub distance: Option<f64>,
}

impl Bag {
    /// All bags claimed or collected.
    pub fn is_sold_out(&self) -> bool {
        self.remaining_quantity == 0
    }
}

/// Attach a distance to each bag relative to the requester's location.
///
/// Bags whose location cannot be resolved get `None` and are excluded from
/// distance ranking by callers; they are never placed at (0, 0).
pub fn attach_distances(bags: &mut [Bag], origin: &Coordinate) {
    for bag in bags.iter_mut() {
        bag.distance = resolve_coordinate(&bag.location).map(|coord| distance_km(origin, &coord));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn bakery_bag() -> Bag {
        Bag {
            id: 1,
            shop_id: "3f3ab4f6-6f3f-4a58-9f5e-8a4c41a3e0d1".to_string(),
            title: "Bakery surprise bag".to_string(),
            description: Some("Assorted pastries from today's bake".to_string()),
            location: json!("POINT(79.8612 6.9271)"),
            collection_date: "2026-08-07".to_string(),
            collection_start: "17:00".to_string(),
            collection_end: "20:00".to_string(),
            is_active: true,
            is_available: true,
            remaining_quantity: 3,
            total_quantity: 5,
            price: Some(4.5),
            currency: Some("LKR".to_string()),
            created_at: Some("2026-08-06T09:15:00Z".to_string()),
            updated_at: None,
            distance: None,
        }
    }

    #[test]
    fn test_deserialize_camel_case_row() {
        let json = r#"{
            "id": 42,
            "shopId": "3f3ab4f6-6f3f-4a58-9f5e-8a4c41a3e0d1",
            "title": "Grocer rescue box",
            "location": {"type": "Point", "coordinates": [79.8612, 6.9271]},
            "collectionDate": "2026-08-07",
            "collectionStart": "17:00",
            "collectionEnd": "20:00",
            "isActive": true,
            "isAvailable": false,
            "remainingQuantity": 0,
            "totalQuantity": 4
        }"#;

        let bag: Bag = serde_json::from_str(json).unwrap();
        assert_eq!(bag.id, 42);
        assert!(!bag.is_available);
        assert!(bag.is_sold_out());
        assert!(bag.distance.is_none());
    }

    #[test]
    fn test_serialize_skips_absent_distance() {
        let bag = bakery_bag();
        let json = serde_json::to_string(&bag).unwrap();
        assert!(!json.contains("\"distance\""));
        assert!(json.contains("\"collectionEnd\":\"20:00\""));
    }

    #[test]
    fn test_attach_distances() {
        let mut bags = vec![bakery_bag()];
        // Bag located in Colombo; browse from Negombo, ~30 km north
        attach_distances(&mut bags, &Coordinate::new(7.2008, 79.8737));

        let d = bags[0].distance.unwrap();
        assert!((d - 30.465).abs() < 0.5, "distance: {d}");
    }

    #[test]
    fn test_attach_distances_unresolvable_location() {
        let mut bag = bakery_bag();
        bag.location = json!(null);
        let mut bags = vec![bag];

        attach_distances(&mut bags, &Coordinate::new(7.2008, 79.8737));
        assert!(bags[0].distance.is_none());
    }
}
