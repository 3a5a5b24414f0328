use std::collections::HashMap;

use axum::{
    extract::{Path, State},
    routing::{delete, get},
    Json, Router,
};
use serde::Serialize;
use serde_json::json;
use time::OffsetDateTime;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    admin::repo::{list_all_lists_with_counts, list_users_with_counts, AdminListRow},
    auth::{
        jwt::AdminUser,
        repo::{User, UserRole},
    },
    error::{ApiError, ApiResult},
    lists::repo::ShoppingList,
    state::AppState,
};

pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/users", get(list_users))
        .route("/admin/users/:id", delete(delete_user))
        .route("/admin/shopping-lists/:id", delete(delete_list))
}

/// Admin overview entry: a user with counts and list summaries.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AdminUserResponse {
    id: Uuid,
    email: String,
    username: String,
    name: Option<String>,
    role: UserRole,
    #[serde(with = "time::serde::rfc3339")]
    created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    updated_at: OffsetDateTime,
    list_count: i64,
    recipe_count: i64,
    shopping_lists: Vec<AdminListRow>,
}

/// GET /admin/users — every user with their lists.
#[instrument(skip(state))]
pub async fn list_users(
    State(state): State<AppState>,
    AdminUser(_admin_id): AdminUser,
) -> ApiResult<Json<serde_json::Value>> {
    let users = list_users_with_counts(&state.db).await?;

    let mut lists_by_user: HashMap<Uuid, Vec<AdminListRow>> = HashMap::new();
    for list in list_all_lists_with_counts(&state.db).await? {
        lists_by_user.entry(list.user_id).or_default().push(list);
    }

    let users: Vec<AdminUserResponse> = users
        .into_iter()
        .map(|u| AdminUserResponse {
            shopping_lists: lists_by_user.remove(&u.id).unwrap_or_default(),
            id: u.id,
            email: u.email,
            username: u.username,
            name: u.name,
            role: u.role,
            created_at: u.created_at,
            updated_at: u.updated_at,
            list_count: u.list_count,
            recipe_count: u.recipe_count,
        })
        .collect();

    Ok(Json(json!({ "users": users })))
}

/// DELETE /admin/users/:id — removes the user and everything they own.
///
/// Self-deletion is a 400, not a 403: the admin is permitted to delete users
/// in general, just not themself.
#[instrument(skip(state))]
pub async fn delete_user(
    State(state): State<AppState>,
    AdminUser(admin_id): AdminUser,
    Path(user_id): Path<Uuid>,
) -> ApiResult<Json<serde_json::Value>> {
    if User::find_by_id(&state.db, user_id).await?.is_none() {
        return Err(ApiError::not_found("User not found"));
    }

    if user_id == admin_id {
        return Err(ApiError::validation("You cannot delete your own account"));
    }

    User::delete(&state.db, user_id).await?;
    info!(admin_id = %admin_id, user_id = %user_id, "user deleted by admin");
    Ok(Json(json!({ "message": "User deleted" })))
}

/// DELETE /admin/shopping-lists/:id — removes any list regardless of owner.
#[instrument(skip(state))]
pub async fn delete_list(
    State(state): State<AppState>,
    AdminUser(admin_id): AdminUser,
    Path(list_id): Path<Uuid>,
) -> ApiResult<Json<serde_json::Value>> {
    if ShoppingList::find(&state.db, list_id).await?.is_none() {
        return Err(ApiError::not_found("List not found"));
    }

    ShoppingList::delete(&state.db, list_id).await?;
    info!(admin_id = %admin_id, list_id = %list_id, "list deleted by admin");
    Ok(Json(json!({ "message": "List deleted" })))
}
