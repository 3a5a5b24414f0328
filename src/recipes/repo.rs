use serde::Serialize;
use sqlx::{types::Json, FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

/// Recipe record in the database. Ingredients are an ordered JSON array of
/// free-form strings.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub ingredients: Json<Vec<String>>,
    pub instructions: String,
    pub cooking_time: Option<i32>,
    pub servings: Option<i32>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

const RECIPE_COLUMNS: &str = "id, user_id, title, description, ingredients, instructions,
                              cooking_time, servings, created_at, updated_at";

impl Recipe {
    pub async fn find(db: &PgPool, id: Uuid) -> Result<Option<Recipe>, sqlx::Error> {
        sqlx::query_as::<_, Recipe>(&format!(
            "SELECT {RECIPE_COLUMNS} FROM recipes WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await
    }

    pub async fn list_for_user(db: &PgPool, user_id: Uuid) -> Result<Vec<Recipe>, sqlx::Error> {
        sqlx::query_as::<_, Recipe>(&format!(
            "SELECT {RECIPE_COLUMNS} FROM recipes WHERE user_id = $1 ORDER BY created_at DESC"
        ))
        .bind(user_id)
        .fetch_all(db)
        .await
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        db: &PgPool,
        user_id: Uuid,
        title: &str,
        description: Option<&str>,
        ingredients: &[String],
        instructions: &str,
        cooking_time: Option<i32>,
        servings: Option<i32>,
    ) -> Result<Recipe, sqlx::Error> {
        sqlx::query_as::<_, Recipe>(&format!(
            "INSERT INTO recipes
                 (user_id, title, description, ingredients, instructions, cooking_time, servings)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {RECIPE_COLUMNS}"
        ))
        .bind(user_id)
        .bind(title)
        .bind(description)
        .bind(Json(ingredients))
        .bind(instructions)
        .bind(cooking_time)
        .bind(servings)
        .fetch_one(db)
        .await
    }

    pub async fn delete(db: &PgPool, id: Uuid) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM recipes WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(())
    }
}
