use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{patch, post, put},
    Json, Router,
};
use serde_json::json;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    auth::jwt::AuthUser,
    error::{ApiError, ApiResult},
    items::{
        dto::{AddItemRequest, BulkAddRequest, BulkAddResponse, BulkFailure, UpdateItemRequest},
        repo::{clamp_quantity, Item},
    },
    lists::access::{can_access, require_access},
    state::AppState,
};

pub fn item_routes() -> Router<AppState> {
    Router::new()
        .route("/shopping-lists/:id/items", post(add_item))
        .route("/shopping-lists/:id/items/bulk", post(add_items_bulk))
        .route("/items/:id", put(update_item).delete(delete_item))
        .route("/items/:id/toggle", patch(toggle_item))
}

/// Resolve an item and authorize through its list. An unknown item and an
/// item on an inaccessible list produce the same 404.
async fn find_accessible_item(
    state: &AppState,
    user_id: Uuid,
    item_id: Uuid,
) -> ApiResult<Item> {
    let item = Item::find(&state.db, item_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Item not found"))?;

    if !can_access(&state.db, user_id, item.list_id).await? {
        return Err(ApiError::not_found("Item not found"));
    }

    Ok(item)
}

/// POST /shopping-lists/:id/items
///
/// Duplicate names are not rejected here; the duplicate pre-check is a
/// caller-side UI concern and two same-named items is a valid storage state.
#[instrument(skip(state, payload))]
pub async fn add_item(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(list_id): Path<Uuid>,
    Json(payload): Json<AddItemRequest>,
) -> ApiResult<(StatusCode, Json<serde_json::Value>)> {
    let name = payload
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .ok_or_else(|| ApiError::validation("Item name is required"))?;

    require_access(&state.db, user_id, list_id).await?;

    let quantity = clamp_quantity(payload.quantity.unwrap_or(1));
    let item = Item::create(&state.db, list_id, name, quantity, payload.product_id).await?;

    info!(user_id = %user_id, list_id = %list_id, item_id = %item.id, "item added");
    Ok((StatusCode::CREATED, Json(json!({ "item": item }))))
}

/// POST /shopping-lists/:id/items/bulk
///
/// Each insert is independent; one failure never aborts its siblings, and
/// the response reports both sides.
#[instrument(skip(state, payload))]
pub async fn add_items_bulk(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(list_id): Path<Uuid>,
    Json(payload): Json<BulkAddRequest>,
) -> ApiResult<Json<BulkAddResponse>> {
    if payload.items.is_empty() {
        return Err(ApiError::validation("At least one item is required"));
    }

    require_access(&state.db, user_id, list_id).await?;

    let mut added = Vec::new();
    let mut failed = Vec::new();

    for entry in payload.items {
        let raw_name = entry.name.clone().unwrap_or_default();
        let name = raw_name.trim();
        if name.is_empty() {
            failed.push(BulkFailure {
                name: raw_name,
                error: "Item name is required".into(),
            });
            continue;
        }

        let quantity = clamp_quantity(entry.quantity.unwrap_or(1));
        match Item::create(&state.db, list_id, name, quantity, entry.product_id).await {
            Ok(item) => added.push(item),
            Err(e) => {
                warn!(error = %e, list_id = %list_id, item = name, "bulk item insert failed");
                failed.push(BulkFailure {
                    name: name.to_string(),
                    error: ApiError::from(e).client_message(),
                });
            }
        }
    }

    info!(
        user_id = %user_id,
        list_id = %list_id,
        added = added.len(),
        failed = failed.len(),
        "bulk add finished"
    );
    Ok(Json(BulkAddResponse { added, failed }))
}

/// PUT /items/:id — partial update; omitted fields are unchanged.
#[instrument(skip(state, payload))]
pub async fn update_item(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(item_id): Path<Uuid>,
    Json(payload): Json<UpdateItemRequest>,
) -> ApiResult<Json<serde_json::Value>> {
    let item = find_accessible_item(&state, user_id, item_id).await?;

    let name = payload
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty());
    let quantity = payload.quantity.map(clamp_quantity);

    let updated = Item::update(&state.db, item.id, name, quantity).await?;
    Ok(Json(json!({ "item": updated })))
}

/// PATCH /items/:id/toggle — flip `purchased` relative to the state just
/// read. This is a read-modify-write without an optimistic lock: concurrent
/// toggles on the same item can lose an update (last write wins).
#[instrument(skip(state))]
pub async fn toggle_item(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(item_id): Path<Uuid>,
) -> ApiResult<Json<serde_json::Value>> {
    let item = find_accessible_item(&state, user_id, item_id).await?;

    let updated = Item::set_purchased(&state.db, item.id, !item.purchased).await?;
    Ok(Json(json!({ "item": updated })))
}

/// DELETE /items/:id
#[instrument(skip(state))]
pub async fn delete_item(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(item_id): Path<Uuid>,
) -> ApiResult<Json<serde_json::Value>> {
    let item = find_accessible_item(&state, user_id, item_id).await?;

    Item::delete(&state.db, item.id).await?;
    info!(user_id = %user_id, item_id = %item_id, "item deleted");
    Ok(Json(json!({ "message": "Item deleted" })))
}
