use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::items::dto::BulkFailure;
use crate::items::repo::Item;

/// Request body for `POST /recipes`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRecipeRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub ingredients: Option<Vec<String>>,
    pub instructions: Option<String>,
    pub cooking_time: Option<i32>,
    pub servings: Option<i32>,
}

/// Request body for the recipe-to-list converter. With no `listId` a fresh
/// list named after the recipe is created.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToListRequest {
    pub list_id: Option<Uuid>,
}

/// Outcome of converting a recipe's ingredients into list items. Inserts run
/// independently, so both sides can be non-empty.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToListResponse {
    pub list_id: Uuid,
    pub added: Vec<Item>,
    pub failed: Vec<BulkFailure>,
}
