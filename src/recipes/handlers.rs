use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use sqlx::PgPool;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    auth::jwt::AuthUser,
    error::{ApiError, ApiResult},
    items::{dto::BulkFailure, repo::Item},
    lists::{access::require_access, repo::ShoppingList},
    recipes::{
        dto::{AddToListRequest, AddToListResponse, CreateRecipeRequest},
        repo::Recipe,
    },
    state::AppState,
};

pub fn recipe_routes() -> Router<AppState> {
    Router::new()
        .route("/recipes", get(list_recipes).post(create_recipe))
        .route("/recipes/:id", axum::routing::delete(delete_recipe))
        .route("/recipes/:id/add-to-list", post(add_to_list))
}

/// Recipes are private to their author. Deletion and conversion disclose
/// existence (the caller saw the recipe in their own listing), so a non-owner
/// gets 403 rather than 404.
async fn find_owned_recipe(db: &PgPool, user_id: Uuid, recipe_id: Uuid) -> ApiResult<Recipe> {
    let recipe = Recipe::find(db, recipe_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Recipe not found"))?;

    if recipe.user_id != user_id {
        warn!(user_id = %user_id, recipe_id = %recipe_id, "recipe access denied");
        return Err(ApiError::forbidden("Not allowed to use this recipe"));
    }
    Ok(recipe)
}

/// GET /recipes — the caller's recipes, newest first.
#[instrument(skip(state))]
pub async fn list_recipes(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> ApiResult<Json<serde_json::Value>> {
    let recipes = Recipe::list_for_user(&state.db, user_id).await?;
    Ok(Json(json!({ "recipes": recipes })))
}

/// POST /recipes
#[instrument(skip(state, payload))]
pub async fn create_recipe(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<CreateRecipeRequest>,
) -> ApiResult<(StatusCode, Json<serde_json::Value>)> {
    let title = payload
        .title
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::validation("Recipe title is required"))?;

    let ingredients: Vec<String> = payload
        .ingredients
        .unwrap_or_default()
        .into_iter()
        .map(|i| i.trim().to_string())
        .filter(|i| !i.is_empty())
        .collect();
    if ingredients.is_empty() {
        return Err(ApiError::validation("At least one ingredient is required"));
    }

    let instructions = payload
        .instructions
        .as_deref()
        .map(str::trim)
        .filter(|i| !i.is_empty())
        .ok_or_else(|| ApiError::validation("Cooking instructions are required"))?;

    let description = payload
        .description
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty());

    let recipe = Recipe::create(
        &state.db,
        user_id,
        title,
        description,
        &ingredients,
        instructions,
        payload.cooking_time,
        payload.servings,
    )
    .await?;

    info!(user_id = %user_id, recipe_id = %recipe.id, "recipe created");
    Ok((StatusCode::CREATED, Json(json!({ "recipe": recipe }))))
}

/// DELETE /recipes/:id — owner only.
#[instrument(skip(state))]
pub async fn delete_recipe(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(recipe_id): Path<Uuid>,
) -> ApiResult<Json<serde_json::Value>> {
    let recipe = find_owned_recipe(&state.db, user_id, recipe_id).await?;

    Recipe::delete(&state.db, recipe.id).await?;
    info!(user_id = %user_id, recipe_id = %recipe_id, "recipe deleted");
    Ok(Json(json!({ "message": "Recipe deleted" })))
}

/// POST /recipes/:id/add-to-list — convert the recipe's ingredients into
/// items on an accessible list, or on a fresh list named after the recipe.
///
/// Each ingredient is inserted independently with quantity 1; one failure
/// never rolls back its siblings, and the response reports both sides.
#[instrument(skip(state, payload))]
pub async fn add_to_list(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(recipe_id): Path<Uuid>,
    Json(payload): Json<AddToListRequest>,
) -> ApiResult<Json<AddToListResponse>> {
    let recipe = find_owned_recipe(&state.db, user_id, recipe_id).await?;

    let list_id = match payload.list_id {
        Some(list_id) => {
            require_access(&state.db, user_id, list_id).await?;
            list_id
        }
        None => {
            let list = ShoppingList::create(&state.db, user_id, &recipe.title).await?;
            info!(user_id = %user_id, list_id = %list.id, "list created for recipe");
            list.id
        }
    };

    let mut added = Vec::new();
    let mut failed = Vec::new();

    for ingredient in recipe.ingredients.0.iter() {
        let name = ingredient.trim();
        if name.is_empty() {
            continue;
        }

        match Item::create(&state.db, list_id, name, 1, None).await {
            Ok(item) => added.push(item),
            Err(e) => {
                warn!(error = %e, list_id = %list_id, ingredient = name, "ingredient insert failed");
                failed.push(BulkFailure {
                    name: name.to_string(),
                    error: ApiError::from(e).client_message(),
                });
            }
        }
    }

    info!(
        user_id = %user_id,
        recipe_id = %recipe_id,
        list_id = %list_id,
        added = added.len(),
        failed = failed.len(),
        "recipe converted to list items"
    );
    Ok(Json(AddToListResponse {
        list_id,
        added,
        failed,
    }))
}
