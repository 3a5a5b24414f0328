use serde::Serialize;
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

/// Category record in the database.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub icon: Option<String>,
    pub sort_order: i32,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// Category joined with its product count, for the public catalog read.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CategoryWithCount {
    pub id: Uuid,
    pub name: String,
    pub icon: Option<String>,
    pub sort_order: i32,
    pub product_count: i64,
}

/// Product record in the database.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub unit: Option<String>,
    pub category_id: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// Product joined with its category summary, for the public product read.
#[derive(Debug, Clone, FromRow)]
pub struct ProductWithCategory {
    pub id: Uuid,
    pub name: String,
    pub unit: Option<String>,
    pub category_id: Uuid,
    pub category_name: String,
    pub category_icon: Option<String>,
}

const CATEGORY_COLUMNS: &str = "id, name, icon, sort_order, created_at, updated_at";
const PRODUCT_COLUMNS: &str = "id, name, unit, category_id, created_at, updated_at";

impl Category {
    pub async fn find(db: &PgPool, id: Uuid) -> Result<Option<Category>, sqlx::Error> {
        sqlx::query_as::<_, Category>(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM categories WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await
    }

    pub async fn list(db: &PgPool) -> Result<Vec<Category>, sqlx::Error> {
        sqlx::query_as::<_, Category>(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM categories ORDER BY sort_order ASC"
        ))
        .fetch_all(db)
        .await
    }

    pub async fn list_with_counts(db: &PgPool) -> Result<Vec<CategoryWithCount>, sqlx::Error> {
        sqlx::query_as::<_, CategoryWithCount>(
            "SELECT c.id, c.name, c.icon, c.sort_order, COUNT(p.id) AS product_count
             FROM categories c
             LEFT JOIN products p ON p.category_id = c.id
             GROUP BY c.id
             ORDER BY c.sort_order ASC",
        )
        .fetch_all(db)
        .await
    }

    /// Category name uniqueness is global; `exclude` skips the row being
    /// updated.
    pub async fn name_taken(
        db: &PgPool,
        name: &str,
        exclude: Option<Uuid>,
    ) -> Result<bool, sqlx::Error> {
        let taken: Option<bool> = sqlx::query_scalar(
            "SELECT EXISTS (
                 SELECT 1 FROM categories WHERE name = $1 AND ($2::uuid IS NULL OR id <> $2)
             )",
        )
        .bind(name)
        .bind(exclude)
        .fetch_optional(db)
        .await?;
        Ok(taken.unwrap_or(false))
    }

    pub async fn max_sort_order(db: &PgPool) -> Result<Option<i32>, sqlx::Error> {
        sqlx::query_scalar("SELECT MAX(sort_order) FROM categories")
            .fetch_one(db)
            .await
    }

    pub async fn create(
        db: &PgPool,
        name: &str,
        icon: Option<&str>,
        sort_order: i32,
    ) -> Result<Category, sqlx::Error> {
        sqlx::query_as::<_, Category>(&format!(
            "INSERT INTO categories (name, icon, sort_order)
             VALUES ($1, $2, $3)
             RETURNING {CATEGORY_COLUMNS}"
        ))
        .bind(name)
        .bind(icon)
        .bind(sort_order)
        .fetch_one(db)
        .await
    }

    pub async fn update(
        db: &PgPool,
        id: Uuid,
        name: &str,
        icon: Option<&str>,
        sort_order: i32,
    ) -> Result<Category, sqlx::Error> {
        sqlx::query_as::<_, Category>(&format!(
            "UPDATE categories SET name = $2, icon = $3, sort_order = $4, updated_at = now()
             WHERE id = $1
             RETURNING {CATEGORY_COLUMNS}"
        ))
        .bind(id)
        .bind(name)
        .bind(icon)
        .bind(sort_order)
        .fetch_one(db)
        .await
    }

    pub async fn delete(db: &PgPool, id: Uuid) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(())
    }

    /// Count of products referencing a category; drives the deletion guard.
    pub async fn count_products(db: &PgPool, id: Uuid) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM products WHERE category_id = $1")
            .bind(id)
            .fetch_one(db)
            .await
    }
}

impl Product {
    pub async fn find(db: &PgPool, id: Uuid) -> Result<Option<Product>, sqlx::Error> {
        sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await
    }

    /// Public product listing with optional category and substring filters.
    pub async fn list(
        db: &PgPool,
        category_id: Option<Uuid>,
        search: Option<&str>,
    ) -> Result<Vec<ProductWithCategory>, sqlx::Error> {
        sqlx::query_as::<_, ProductWithCategory>(
            "SELECT p.id, p.name, p.unit, p.category_id,
                    c.name AS category_name, c.icon AS category_icon
             FROM products p
             JOIN categories c ON c.id = p.category_id
             WHERE ($1::uuid IS NULL OR p.category_id = $1)
               AND ($2::text IS NULL OR p.name ILIKE '%' || $2 || '%')
             ORDER BY p.name ASC",
        )
        .bind(category_id)
        .bind(search)
        .fetch_all(db)
        .await
    }

    pub async fn list_for_category(
        db: &PgPool,
        category_id: Uuid,
    ) -> Result<Vec<Product>, sqlx::Error> {
        sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE category_id = $1 ORDER BY name ASC"
        ))
        .bind(category_id)
        .fetch_all(db)
        .await
    }

    /// Product name uniqueness is scoped to its category.
    pub async fn name_taken_in_category(
        db: &PgPool,
        category_id: Uuid,
        name: &str,
        exclude: Option<Uuid>,
    ) -> Result<bool, sqlx::Error> {
        let taken: Option<bool> = sqlx::query_scalar(
            "SELECT EXISTS (
                 SELECT 1 FROM products
                 WHERE category_id = $1 AND name = $2 AND ($3::uuid IS NULL OR id <> $3)
             )",
        )
        .bind(category_id)
        .bind(name)
        .bind(exclude)
        .fetch_optional(db)
        .await?;
        Ok(taken.unwrap_or(false))
    }

    pub async fn create(
        db: &PgPool,
        name: &str,
        category_id: Uuid,
        unit: Option<&str>,
    ) -> Result<Product, sqlx::Error> {
        sqlx::query_as::<_, Product>(&format!(
            "INSERT INTO products (name, category_id, unit)
             VALUES ($1, $2, $3)
             RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(name)
        .bind(category_id)
        .bind(unit)
        .fetch_one(db)
        .await
    }

    pub async fn update(
        db: &PgPool,
        id: Uuid,
        name: &str,
        category_id: Uuid,
        unit: Option<&str>,
    ) -> Result<Product, sqlx::Error> {
        sqlx::query_as::<_, Product>(&format!(
            "UPDATE products SET name = $2, category_id = $3, unit = $4, updated_at = now()
             WHERE id = $1
             RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(id)
        .bind(name)
        .bind(category_id)
        .bind(unit)
        .fetch_one(db)
        .await
    }

    pub async fn delete(db: &PgPool, id: Uuid) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(())
    }
}

/// Sort order assigned when a new category omits one: one past the current
/// maximum, starting at 1 for an empty catalog.
pub fn next_sort_order(current_max: Option<i32>) -> i32 {
    current_max.unwrap_or(0) + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_sort_order_starts_at_one() {
        assert_eq!(next_sort_order(None), 1);
    }

    #[test]
    fn next_sort_order_appends_after_max() {
        assert_eq!(next_sort_order(Some(4)), 5);
        assert_eq!(next_sort_order(Some(0)), 1);
    }
}
