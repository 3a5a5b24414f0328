use std::collections::HashMap;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, patch},
    Json, Router,
};
use serde_json::json;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    auth::jwt::AuthUser,
    error::{ApiError, ApiResult},
    items::repo::Item,
    lists::{
        access::{require_access, require_owner},
        dto::{ListNameRequest, ListResponse},
        repo::{ShoppingList, VisibleList},
    },
    state::AppState,
};

pub fn list_routes() -> Router<AppState> {
    Router::new()
        .route("/shopping-lists", get(list_lists).post(create_list))
        .route(
            "/shopping-lists/:id",
            get(get_list).put(rename_list).delete(delete_list),
        )
        .route("/shopping-lists/:id/deselect-all", patch(deselect_all))
}

fn require_name(payload: &ListNameRequest) -> ApiResult<&str> {
    payload
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .ok_or_else(|| ApiError::validation("List name is required"))
}

/// GET /shopping-lists — owned and shared lists with embedded items.
#[instrument(skip(state))]
pub async fn list_lists(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> ApiResult<Json<serde_json::Value>> {
    let lists = ShoppingList::find_visible(&state.db, user_id).await?;

    let ids: Vec<Uuid> = lists.iter().map(|l| l.id).collect();
    let mut items_by_list: HashMap<Uuid, Vec<Item>> = HashMap::new();
    for item in Item::list_for_lists(&state.db, &ids).await? {
        items_by_list.entry(item.list_id).or_default().push(item);
    }

    let lists: Vec<ListResponse> = lists
        .into_iter()
        .map(|l| {
            let items = items_by_list.remove(&l.id).unwrap_or_default();
            ListResponse::from_visible(l, items)
        })
        .collect();

    Ok(Json(json!({ "shoppingLists": lists })))
}

/// POST /shopping-lists — a new list always starts empty.
#[instrument(skip(state, payload))]
pub async fn create_list(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<ListNameRequest>,
) -> ApiResult<(StatusCode, Json<serde_json::Value>)> {
    let name = require_name(&payload)?;

    let list = ShoppingList::create(&state.db, user_id, name).await?;
    info!(user_id = %user_id, list_id = %list.id, "list created");

    let response = ListResponse::from_visible(
        VisibleList {
            id: list.id,
            name: list.name,
            user_id: list.user_id,
            is_owner: true,
            created_at: list.created_at,
            updated_at: list.updated_at,
        },
        Vec::new(),
    );
    Ok((StatusCode::CREATED, Json(json!({ "shoppingList": response }))))
}

/// GET /shopping-lists/:id — readable by owner or sharee, 404 otherwise.
#[instrument(skip(state))]
pub async fn get_list(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(list_id): Path<Uuid>,
) -> ApiResult<Json<serde_json::Value>> {
    require_access(&state.db, user_id, list_id).await?;

    let list = ShoppingList::find(&state.db, list_id)
        .await?
        .ok_or_else(|| ApiError::not_found("List not found"))?;
    let items = Item::list_for_list(&state.db, list_id).await?;

    let is_owner = list.user_id == user_id;
    let response = ListResponse::from_visible(
        VisibleList {
            id: list.id,
            name: list.name,
            user_id: list.user_id,
            is_owner,
            created_at: list.created_at,
            updated_at: list.updated_at,
        },
        items,
    );
    Ok(Json(json!({ "shoppingList": response })))
}

/// PUT /shopping-lists/:id — owner only.
#[instrument(skip(state, payload))]
pub async fn rename_list(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(list_id): Path<Uuid>,
    Json(payload): Json<ListNameRequest>,
) -> ApiResult<Json<serde_json::Value>> {
    let name = require_name(&payload)?;
    require_owner(&state.db, user_id, list_id).await?;

    let list = ShoppingList::rename(&state.db, list_id, name).await?;
    info!(user_id = %user_id, list_id = %list_id, "list renamed");
    Ok(Json(json!({ "shoppingList": list })))
}

/// DELETE /shopping-lists/:id — owner only; cascades to items and shares.
#[instrument(skip(state))]
pub async fn delete_list(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(list_id): Path<Uuid>,
) -> ApiResult<Json<serde_json::Value>> {
    require_owner(&state.db, user_id, list_id).await?;

    ShoppingList::delete(&state.db, list_id).await?;
    info!(user_id = %user_id, list_id = %list_id, "list deleted");
    Ok(Json(json!({ "message": "List deleted" })))
}

/// PATCH /shopping-lists/:id/deselect-all — clear every purchased mark and
/// return the refreshed item set.
#[instrument(skip(state))]
pub async fn deselect_all(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(list_id): Path<Uuid>,
) -> ApiResult<Json<serde_json::Value>> {
    require_access(&state.db, user_id, list_id).await?;

    Item::deselect_all(&state.db, list_id).await?;
    let items = Item::list_for_list(&state.db, list_id).await?;
    Ok(Json(json!({ "items": items })))
}
