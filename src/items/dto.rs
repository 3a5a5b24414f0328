use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::items::repo::Item;

/// Request body for adding a single item to a list.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItemRequest {
    pub name: Option<String>,
    pub quantity: Option<i32>,
    pub product_id: Option<Uuid>,
}

/// Request body for the bulk add endpoint. A missing `items` field is the
/// same as an empty one and fails validation in the handler.
#[derive(Debug, Deserialize)]
pub struct BulkAddRequest {
    #[serde(default)]
    pub items: Vec<AddItemRequest>,
}

/// Request body for a partial item update.
#[derive(Debug, Deserialize)]
pub struct UpdateItemRequest {
    pub name: Option<String>,
    pub quantity: Option<i32>,
}

/// One failed unit of a bulk operation.
#[derive(Debug, Serialize)]
pub struct BulkFailure {
    pub name: String,
    pub error: String,
}

/// Aggregate outcome of a bulk insert: every unit ran independently, so both
/// sides can be non-empty.
#[derive(Debug, Serialize)]
pub struct BulkAddResponse {
    pub added: Vec<Item>,
    pub failed: Vec<BulkFailure>,
}
