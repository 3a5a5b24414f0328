use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::json;
use sqlx::PgPool;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    auth::{jwt::AuthUser, repo::User},
    error::{ApiError, ApiResult},
    shares::{
        dto::{RevokeQuery, ShareRequest, ShareResponse},
        repo::ListShare,
    },
    state::AppState,
};

pub fn share_routes() -> Router<AppState> {
    Router::new().route(
        "/shopping-lists/:id/share",
        get(list_shares).post(share_list).delete(revoke_share),
    )
}

/// Share management is owner-only and deliberately distinguishable from the
/// item paths: the caller supplied the list id, so existence is already
/// implied and a non-owner gets an explicit 403 instead of a blanket 404.
async fn require_share_owner(db: &PgPool, user_id: Uuid, list_id: Uuid) -> ApiResult<Uuid> {
    let owner_id: Option<Uuid> =
        sqlx::query_scalar("SELECT user_id FROM shopping_lists WHERE id = $1")
            .bind(list_id)
            .fetch_optional(db)
            .await?;

    let owner_id = owner_id.ok_or_else(|| ApiError::not_found("List not found"))?;
    if owner_id != user_id {
        warn!(user_id = %user_id, list_id = %list_id, "share management denied");
        return Err(ApiError::forbidden("Only the list owner can manage shares"));
    }
    Ok(owner_id)
}

/// GET /shopping-lists/:id/share — everyone the list is shared with.
#[instrument(skip(state))]
pub async fn list_shares(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(list_id): Path<Uuid>,
) -> ApiResult<Json<serde_json::Value>> {
    require_share_owner(&state.db, user_id, list_id).await?;

    let shares: Vec<ShareResponse> = ListShare::list_for_list(&state.db, list_id)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(Json(json!({ "shares": shares })))
}

/// POST /shopping-lists/:id/share — grant a user access to the list.
#[instrument(skip(state, payload))]
pub async fn share_list(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(list_id): Path<Uuid>,
    Json(payload): Json<ShareRequest>,
) -> ApiResult<(StatusCode, Json<serde_json::Value>)> {
    let target_user_id = payload
        .target_user_id
        .ok_or_else(|| ApiError::validation("Target user id is required"))?;

    let owner_id = require_share_owner(&state.db, user_id, list_id).await?;

    // The owner already has access; a share row for them would be redundant.
    if target_user_id == owner_id {
        return Err(ApiError::conflict("The list owner already has access"));
    }

    if User::find_by_id(&state.db, target_user_id).await?.is_none() {
        return Err(ApiError::not_found("User not found"));
    }

    if ListShare::exists(&state.db, list_id, target_user_id).await? {
        return Err(ApiError::conflict(
            "The list is already shared with this user",
        ));
    }

    // The exists check above can race with a concurrent grant; the unique
    // (list_id, user_id) constraint then fails the insert and the sqlx
    // classification turns it into the same 409.
    let share = ListShare::create(&state.db, list_id, target_user_id).await?;

    info!(list_id = %list_id, target_user_id = %target_user_id, "list shared");
    Ok((
        StatusCode::CREATED,
        Json(json!({ "share": ShareResponse::from(share) })),
    ))
}

/// DELETE /shopping-lists/:id/share?userId= — revoke a grant.
///
/// Not idempotent: revoking a share that does not exist is reported as an
/// error rather than a no-op.
#[instrument(skip(state))]
pub async fn revoke_share(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(list_id): Path<Uuid>,
    Query(query): Query<RevokeQuery>,
) -> ApiResult<Json<serde_json::Value>> {
    let target_user_id = query
        .user_id
        .ok_or_else(|| ApiError::validation("User id is required"))?;

    require_share_owner(&state.db, user_id, list_id).await?;

    let removed = ListShare::delete(&state.db, list_id, target_user_id).await?;
    if !removed {
        return Err(ApiError::not_found("Share not found"));
    }

    info!(list_id = %list_id, target_user_id = %target_user_id, "share revoked");
    Ok(Json(json!({ "success": true })))
}
