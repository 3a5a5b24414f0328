use axum::{
    extract::{Path, Query, State},
    routing::{get, patch},
    Json, Router,
};
use serde_json::json;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    auth::{
        dto::PublicUser,
        handlers::is_valid_email,
        jwt::AuthUser,
        password::{hash_password, verify_password, MIN_PASSWORD_LEN},
        repo::{User, UserSummary},
    },
    error::{ApiError, ApiResult},
    state::AppState,
    users::dto::{ChangePasswordRequest, SearchQuery, UpdateProfileRequest},
};

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users/search", get(search_users))
        .route("/users/:id", get(get_user).patch(update_profile))
        .route("/users/:id/password", patch(change_password))
}

#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(target_id): Path<Uuid>,
) -> ApiResult<Json<serde_json::Value>> {
    // Profiles are private; only the owner may read their own.
    if user_id != target_id {
        return Err(ApiError::forbidden("Cannot view another user's profile"));
    }

    let user = User::find_by_id(&state.db, target_id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    Ok(Json(json!({ "user": PublicUser::from(user) })))
}

#[instrument(skip(state, payload))]
pub async fn update_profile(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(target_id): Path<Uuid>,
    Json(payload): Json<UpdateProfileRequest>,
) -> ApiResult<Json<serde_json::Value>> {
    if user_id != target_id {
        return Err(ApiError::forbidden("Cannot update another user's profile"));
    }

    let name = payload
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty());
    let email = payload
        .email
        .as_deref()
        .map(|e| e.trim().to_lowercase())
        .filter(|e| !e.is_empty());

    if name.is_none() && email.is_none() {
        return Err(ApiError::validation("Provide a name or email to update"));
    }

    if let Some(ref email) = email {
        if !is_valid_email(email) {
            return Err(ApiError::validation("Invalid email"));
        }
    }

    let user = User::update_profile(&state.db, target_id, name, email.as_deref()).await?;

    info!(user_id = %target_id, "profile updated");
    Ok(Json(json!({ "user": PublicUser::from(user) })))
}

#[instrument(skip(state, payload))]
pub async fn change_password(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(target_id): Path<Uuid>,
    Json(payload): Json<ChangePasswordRequest>,
) -> ApiResult<Json<serde_json::Value>> {
    if user_id != target_id {
        return Err(ApiError::forbidden(
            "Cannot change another user's password",
        ));
    }

    let (Some(current), Some(new)) = (
        payload.current_password.as_deref().filter(|p| !p.is_empty()),
        payload.new_password.as_deref().filter(|p| !p.is_empty()),
    ) else {
        return Err(ApiError::validation(
            "Current and new password are required",
        ));
    };

    if new.len() < MIN_PASSWORD_LEN {
        return Err(ApiError::validation(
            "New password must be at least 6 characters",
        ));
    }

    let user = User::find_by_id(&state.db, target_id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    // Changing the password requires proving knowledge of the current one.
    let ok = verify_password(current, &user.password_hash).map_err(ApiError::internal)?;
    if !ok {
        warn!(user_id = %target_id, "password change with wrong current password");
        return Err(ApiError::unauthorized("Current password is incorrect"));
    }

    let hash = hash_password(new).map_err(ApiError::internal)?;
    User::set_password_hash(&state.db, target_id, &hash).await?;

    info!(user_id = %target_id, "password changed");
    Ok(Json(json!({ "message": "Password changed" })))
}

#[instrument(skip(state))]
pub async fn search_users(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(query): Query<SearchQuery>,
) -> ApiResult<Json<serde_json::Value>> {
    let q = query.q.trim();
    if q.is_empty() {
        return Err(ApiError::validation("Search query is required"));
    }

    let users: Vec<UserSummary> = User::search(&state.db, q, user_id, 10).await?;
    Ok(Json(json!({ "users": users })))
}
