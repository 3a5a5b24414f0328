use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::json;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    auth::jwt::AuthUser,
    catalog::{
        dto::{
            CategoryRequest, CategoryWithProducts, ProductQuery, ProductRequest, ProductResponse,
        },
        repo::{next_sort_order, Category, Product},
    },
    error::{ApiError, ApiResult},
    items::repo::Item,
    state::AppState,
};

pub fn category_routes() -> Router<AppState> {
    Router::new()
        .route("/categories", get(list_categories))
        .route(
            "/categories/admin",
            get(list_categories_admin).post(create_category),
        )
        .route(
            "/categories/admin/:id",
            axum::routing::put(update_category).delete(delete_category),
        )
}

pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(list_products))
        .route("/products/admin", axum::routing::post(create_product))
        .route(
            "/products/admin/:id",
            axum::routing::put(update_product).delete(delete_product),
        )
}

fn require_trimmed<'a>(value: &'a Option<String>, message: &str) -> ApiResult<&'a str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ApiError::validation(message))
}

fn optional_trimmed(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

// --- categories ---

/// GET /categories — public read with product counts.
#[instrument(skip(state))]
pub async fn list_categories(
    State(state): State<AppState>,
) -> ApiResult<Json<serde_json::Value>> {
    let categories = Category::list_with_counts(&state.db).await?;
    Ok(Json(json!({ "categories": categories })))
}

/// GET /categories/admin — categories with full product lists.
#[instrument(skip(state))]
pub async fn list_categories_admin(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
) -> ApiResult<Json<serde_json::Value>> {
    let categories = Category::list(&state.db).await?;

    let mut out = Vec::with_capacity(categories.len());
    for category in categories {
        let products = Product::list_for_category(&state.db, category.id).await?;
        out.push(CategoryWithProducts { category, products });
    }
    Ok(Json(json!({ "categories": out })))
}

/// POST /categories/admin
#[instrument(skip(state, payload))]
pub async fn create_category(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<CategoryRequest>,
) -> ApiResult<(StatusCode, Json<serde_json::Value>)> {
    let name = require_trimmed(&payload.name, "Category name is required")?;

    if Category::name_taken(&state.db, name, None).await? {
        return Err(ApiError::conflict(
            "A category with this name already exists",
        ));
    }

    let sort_order = match payload.sort_order {
        Some(order) => order,
        None => next_sort_order(Category::max_sort_order(&state.db).await?),
    };

    let category =
        Category::create(&state.db, name, optional_trimmed(&payload.icon), sort_order).await?;

    info!(user_id = %user_id, category_id = %category.id, "category created");
    Ok((StatusCode::CREATED, Json(json!({ "category": category }))))
}

/// PUT /categories/admin/:id
#[instrument(skip(state, payload))]
pub async fn update_category(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<CategoryRequest>,
) -> ApiResult<Json<serde_json::Value>> {
    let name = require_trimmed(&payload.name, "Category name is required")?;

    let existing = Category::find(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Category not found"))?;

    // The name may stay the same; it only conflicts against other rows.
    if Category::name_taken(&state.db, name, Some(id)).await? {
        return Err(ApiError::conflict(
            "A category with this name already exists",
        ));
    }

    let sort_order = payload.sort_order.unwrap_or(existing.sort_order);
    let category = Category::update(
        &state.db,
        id,
        name,
        optional_trimmed(&payload.icon),
        sort_order,
    )
    .await?;

    info!(user_id = %user_id, category_id = %id, "category updated");
    Ok(Json(json!({ "category": category })))
}

/// DELETE /categories/admin/:id — blocked while any product references the
/// category; the conflict reports the exact blocking count.
#[instrument(skip(state))]
pub async fn delete_category(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<serde_json::Value>> {
    if Category::find(&state.db, id).await?.is_none() {
        return Err(ApiError::not_found("Category not found"));
    }

    let count = Category::count_products(&state.db, id).await?;
    if count > 0 {
        return Err(ApiError::conflict(format!(
            "Cannot delete a category with {count} products; delete or move them first"
        )));
    }

    Category::delete(&state.db, id).await?;
    info!(user_id = %user_id, category_id = %id, "category deleted");
    Ok(Json(json!({ "success": true })))
}

// --- products ---

/// GET /products — public read with optional category/search filters.
#[instrument(skip(state))]
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ProductQuery>,
) -> ApiResult<Json<serde_json::Value>> {
    let search = query
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());

    let products: Vec<ProductResponse> = Product::list(&state.db, query.category_id, search)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(Json(json!({ "products": products })))
}

/// POST /products/admin
#[instrument(skip(state, payload))]
pub async fn create_product(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<ProductRequest>,
) -> ApiResult<(StatusCode, Json<serde_json::Value>)> {
    let name = require_trimmed(&payload.name, "Product name is required")?;
    let category_id = payload
        .category_id
        .ok_or_else(|| ApiError::validation("Category is required"))?;

    if Category::find(&state.db, category_id).await?.is_none() {
        return Err(ApiError::not_found("Category not found"));
    }

    if Product::name_taken_in_category(&state.db, category_id, name, None).await? {
        return Err(ApiError::conflict(
            "This product already exists in the category",
        ));
    }

    let product = Product::create(
        &state.db,
        name,
        category_id,
        optional_trimmed(&payload.unit),
    )
    .await?;

    info!(user_id = %user_id, product_id = %product.id, "product created");
    Ok((StatusCode::CREATED, Json(json!({ "product": product }))))
}

/// PUT /products/admin/:id — same constraints, excluding the product's own
/// row.
#[instrument(skip(state, payload))]
pub async fn update_product(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<ProductRequest>,
) -> ApiResult<Json<serde_json::Value>> {
    let name = require_trimmed(&payload.name, "Product name is required")?;
    let category_id = payload
        .category_id
        .ok_or_else(|| ApiError::validation("Category is required"))?;

    if Product::find(&state.db, id).await?.is_none() {
        return Err(ApiError::not_found("Product not found"));
    }

    if Category::find(&state.db, category_id).await?.is_none() {
        return Err(ApiError::not_found("Category not found"));
    }

    if Product::name_taken_in_category(&state.db, category_id, name, Some(id)).await? {
        return Err(ApiError::conflict(
            "This product already exists in the category",
        ));
    }

    let product = Product::update(
        &state.db,
        id,
        name,
        category_id,
        optional_trimmed(&payload.unit),
    )
    .await?;

    info!(user_id = %user_id, product_id = %id, "product updated");
    Ok(Json(json!({ "product": product })))
}

/// DELETE /products/admin/:id — blocked while any list item references the
/// product; the conflict reports the exact blocking count.
#[instrument(skip(state))]
pub async fn delete_product(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<serde_json::Value>> {
    if Product::find(&state.db, id).await?.is_none() {
        return Err(ApiError::not_found("Product not found"));
    }

    let count = Item::count_for_product(&state.db, id).await?;
    if count > 0 {
        return Err(ApiError::conflict(format!(
            "The product is referenced by {count} list items and cannot be deleted"
        )));
    }

    Product::delete(&state.db, id).await?;
    info!(user_id = %user_id, product_id = %id, "product deleted");
    Ok(Json(json!({ "success": true })))
}
