//! Surprise-bag listing endpoints
//!
//! Maps to the `api-v1-bags` Edge Function which provides:
//! - List bags with filters and pagination
//! - Get a single bag by ID
//! - Create a new bag listing
//! - Update availability flags (used by the expiry sweep)
//! - Delete a bag

use crate::client::SurplusClient;
use crate::error::{ApiError, ApiResult};
use serde::{Deserialize, Serialize};
use surplus_bags::{Bag, BagFlagUpdate, BagStore};
use surplus_core::validation::{ValidationResult, Validator};

/// Bags API interface
///
/// This maps to the `api-v1-bags` Edge Function in the Surplus backend.
#[derive(Clone)]
pub struct BagsApi {
    client: SurplusClient,
}

impl BagsApi {
    /// Create a new bags API interface
    pub(crate) fn new(client: SurplusClient) -> Self {
        Self { client }
    }

    /// List bags with filters and pagination
    ///
    /// GET /api-v1-bags
    pub async fn list(&self, params: &ListBagsParams) -> ApiResult<ListBagsResponse> {
        let mut path = "api-v1-bags?".to_string();
        let mut query_parts = Vec::new();

        if let Some(ref shop_id) = params.shop_id {
            query_parts.push(format!("shopId={shop_id}"));
        }
        if let Some(lat) = params.lat {
            query_parts.push(format!("lat={lat}"));
        }
        if let Some(lng) = params.lng {
            query_parts.push(format!("lng={lng}"));
        }
        if let Some(radius) = params.radius {
            query_parts.push(format!("radius={radius}"));
        }
        if let Some(ref cursor) = params.cursor {
            query_parts.push(format!("cursor={cursor}"));
        }
        if let Some(limit) = params.limit {
            query_parts.push(format!("limit={limit}"));
        }

        path.push_str(&query_parts.join("&"));
        self.client.get(&path).await
    }

    /// Get a single bag by ID
    ///
    /// GET /api-v1-bags?id=<id>
    pub async fn get(&self, id: i64) -> ApiResult<GetBagResponse> {
        let path = format!("api-v1-bags?id={id}");
        self.client.get(&path).await
    }

    /// Create a new bag listing
    ///
    /// POST /api-v1-bags
    ///
    /// The payload is validated locally first; a validation failure is
    /// returned without hitting the backend.
    pub async fn create(&self, bag: &CreateBagRequest) -> ApiResult<CreateBagResponse> {
        let validation = bag.validate();
        if !validation.is_valid() {
            let messages: Vec<String> =
                validation.errors().iter().map(ToString::to_string).collect();
            return Err(ApiError::Validation(messages.join("; ")));
        }

        self.client.post("api-v1-bags", bag).await
    }

    /// Update a bag's availability flags
    ///
    /// PATCH /api-v1-bags?id=<id>
    pub async fn update_flags(&self, update: &BagFlagUpdate) -> ApiResult<UpdateBagResponse> {
        let path = format!("api-v1-bags?id={}", update.id);
        self.client.patch(&path, update).await
    }

    /// Delete a bag
    ///
    /// DELETE /api-v1-bags?id=<id>
    pub async fn delete(&self, id: i64) -> ApiResult<DeleteBagResponse> {
        let path = format!("api-v1-bags?id={id}");
        self.client
            .post(&path, &serde_json::json!({"_method": "DELETE"}))
            .await
    }
}

/// The expiry sweep drives this API directly through the store seam.
impl BagStore for BagsApi {
    type Error = ApiError;

    async fn list_shop_bags(&self, shop_id: &str) -> Result<Vec<Bag>, Self::Error> {
        let response = self.list(&ListBagsParams::new().with_shop(shop_id)).await?;
        match (response.success, response.data) {
            (true, Some(bags)) => Ok(bags),
            _ => Err(envelope_error(response.error)),
        }
    }

    async fn deactivate(&self, update: &BagFlagUpdate) -> Result<(), Self::Error> {
        let response = self.update_flags(update).await?;
        if response.success {
            Ok(())
        } else {
            Err(envelope_error(response.error))
        }
    }
}

/// Turn a `success: false` envelope into a typed error.
fn envelope_error(error: Option<ErrorInfo>) -> ApiError {
    match error {
        Some(e) => ApiError::backend(e.code, e.message),
        None => ApiError::backend("UNKNOWN", "Backend returned no data"),
    }
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Parameters for listing bags
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListBagsParams {
    /// Filter by owning shop
    pub shop_id: Option<String>,
    /// Latitude for geo-search
    pub lat: Option<f64>,
    /// Longitude for geo-search
    pub lng: Option<f64>,
    /// Radius in km for geo-search
    pub radius: Option<f64>,
    /// Cursor for pagination
    pub cursor: Option<String>,
    /// Page size limit (max 50)
    pub limit: Option<u32>,
}

impl ListBagsParams {
    /// Create new params with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter by shop
    pub fn with_shop(mut self, shop_id: impl Into<String>) -> Self {
        self.shop_id = Some(shop_id.into());
        self
    }

    /// Filter by location
    pub fn with_location(mut self, lat: f64, lng: f64, radius: f64) -> Self {
        self.lat = Some(lat);
        self.lng = Some(lng);
        self.radius = Some(radius);
        self
    }

    /// Set pagination cursor
    pub fn with_cursor(mut self, cursor: impl Into<String>) -> Self {
        self.cursor = Some(cursor.into());
        self
    }

    /// Set page size
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// List bags response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListBagsResponse {
    pub success: bool,
    pub data: Option<Vec<Bag>>,
    pub pagination: Option<PaginationInfo>,
    pub error: Option<ErrorInfo>,
}

/// Single bag response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetBagResponse {
    pub success: bool,
    pub data: Option<Bag>,
    pub error: Option<ErrorInfo>,
}

/// Create bag request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBagRequest {
    pub title: String,
    pub description: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(rename = "collectionDate")]
    pub collection_date: String,
    #[serde(rename = "collectionStart")]
    pub collection_start: String,
    #[serde(rename = "collectionEnd")]
    pub collection_end: String,
    #[serde(rename = "totalQuantity")]
    pub total_quantity: u32,
    pub price: Option<f64>,
    pub currency: Option<String>,
}

impl CreateBagRequest {
    /// Validate the payload before it is sent to the backend.
    pub fn validate(&self) -> ValidationResult {
        let mut validator = Validator::new()
            .required("title", &self.title)
            .max_length("title", &self.title, 120)
            .calendar_date("collectionDate", &self.collection_date)
            .time_of_day("collectionStart", &self.collection_start)
            .time_of_day("collectionEnd", &self.collection_end);

        if let Some(price) = self.price {
            validator = validator.non_negative("price", price);
        }

        validator.validate()
    }
}

/// Create bag response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBagResponse {
    pub success: bool,
    pub data: Option<Bag>,
    pub error: Option<ErrorInfo>,
}

/// Update bag response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateBagResponse {
    pub success: bool,
    pub data: Option<Bag>,
    pub error: Option<ErrorInfo>,
}

/// Delete bag response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteBagResponse {
    pub success: bool,
    pub error: Option<ErrorInfo>,
}

/// Pagination info
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationInfo {
    pub cursor: Option<String>,
    #[serde(rename = "hasMore")]
    pub has_more: bool,
    pub total: Option<i64>,
}

/// Error info
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorInfo {
    pub code: String,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_params_builder() {
        let params = ListBagsParams::new()
            .with_shop("3f3ab4f6-6f3f-4a58-9f5e-8a4c41a3e0d1")
            .with_location(6.9271, 79.8612, 10.0)
            .with_limit(20);

        assert_eq!(params.shop_id.as_deref(), Some("3f3ab4f6-6f3f-4a58-9f5e-8a4c41a3e0d1"));
        assert_eq!(params.lat, Some(6.9271));
        assert_eq!(params.lng, Some(79.8612));
        assert_eq!(params.radius, Some(10.0));
        assert_eq!(params.limit, Some(20));
    }

    #[test]
    fn test_list_response_deserialize() {
        let json = r#"{
            "success": true,
            "data": [{
                "id": 42,
                "shopId": "3f3ab4f6-6f3f-4a58-9f5e-8a4c41a3e0d1",
                "title": "Bakery surprise bag",
                "location": "POINT(79.8612 6.9271)",
                "collectionDate": "2026-08-07",
                "collectionStart": "17:00",
                "collectionEnd": "20:00",
                "isActive": true,
                "isAvailable": true,
                "remainingQuantity": 3,
                "totalQuantity": 5
            }],
            "pagination": {"cursor": null, "hasMore": false, "total": 1}
        }"#;

        let response: ListBagsResponse = serde_json::from_str(json).unwrap();
        assert!(response.success);
        let bags = response.data.unwrap();
        assert_eq!(bags.len(), 1);
        assert_eq!(bags[0].id, 42);
        assert_eq!(bags[0].collection_end, "20:00");
    }

    #[test]
    fn test_create_request_validation() {
        let valid = CreateBagRequest {
            title: "Bakery surprise bag".to_string(),
            description: None,
            latitude: 6.9271,
            longitude: 79.8612,
            collection_date: "2026-08-07".to_string(),
            collection_start: "17:00".to_string(),
            collection_end: "20:00".to_string(),
            total_quantity: 5,
            price: Some(4.5),
            currency: Some("LKR".to_string()),
        };
        assert!(valid.validate().is_valid());

        let invalid = CreateBagRequest {
            title: String::new(),
            collection_date: "07/08/2026".to_string(),
            collection_end: "late evening".to_string(),
            ..valid
        };
        let result = invalid.validate();
        assert!(!result.is_valid());
        assert_eq!(result.errors().len(), 3);
    }

    #[test]
    fn test_flag_update_wire_shape() {
        let update = BagFlagUpdate::deactivate(42);
        let json = serde_json::to_string(&update).unwrap();

        assert!(json.contains("\"id\":42"));
        assert!(json.contains("\"isActive\":false"));
        assert!(json.contains("\"isAvailable\":false"));
        assert!(json.contains("\"updatedAt\""));
    }

    #[test]
    fn test_envelope_error_mapping() {
        let err = envelope_error(Some(ErrorInfo {
            code: "LISTING_NOT_FOUND".to_string(),
            message: "No bag with that id".to_string(),
        }));
        assert!(matches!(err, ApiError::Backend { .. }));
        assert!(err.to_string().contains("LISTING_NOT_FOUND"));

        let unknown = envelope_error(None);
        assert!(unknown.to_string().contains("UNKNOWN"));
    }
}
