use serde::Serialize;
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

/// Shopping list record in the database.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingList {
    pub id: Uuid,
    pub name: String,
    pub user_id: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// A list row joined with the caller's relation to it.
#[derive(Debug, Clone, FromRow)]
pub struct VisibleList {
    pub id: Uuid,
    pub name: String,
    pub user_id: Uuid,
    pub is_owner: bool,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl ShoppingList {
    pub async fn find(db: &PgPool, id: Uuid) -> Result<Option<ShoppingList>, sqlx::Error> {
        sqlx::query_as::<_, ShoppingList>(
            "SELECT id, name, user_id, created_at, updated_at
             FROM shopping_lists WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(db)
        .await
    }

    /// Owned and shared lists in one pass, most recently updated first. A
    /// list can match at most once: the owner cannot hold a share for their
    /// own list (guarded at share creation) and shares are unique per
    /// (list, user).
    pub async fn find_visible(db: &PgPool, user_id: Uuid) -> Result<Vec<VisibleList>, sqlx::Error> {
        sqlx::query_as::<_, VisibleList>(
            "SELECT l.id, l.name, l.user_id, (l.user_id = $1) AS is_owner,
                    l.created_at, l.updated_at
             FROM shopping_lists l
             LEFT JOIN list_shares s ON s.list_id = l.id AND s.user_id = $1
             WHERE l.user_id = $1 OR s.id IS NOT NULL
             ORDER BY l.updated_at DESC",
        )
        .bind(user_id)
        .fetch_all(db)
        .await
    }

    pub async fn create(
        db: &PgPool,
        user_id: Uuid,
        name: &str,
    ) -> Result<ShoppingList, sqlx::Error> {
        sqlx::query_as::<_, ShoppingList>(
            "INSERT INTO shopping_lists (name, user_id)
             VALUES ($1, $2)
             RETURNING id, name, user_id, created_at, updated_at",
        )
        .bind(name)
        .bind(user_id)
        .fetch_one(db)
        .await
    }

    pub async fn rename(db: &PgPool, id: Uuid, name: &str) -> Result<ShoppingList, sqlx::Error> {
        sqlx::query_as::<_, ShoppingList>(
            "UPDATE shopping_lists SET name = $2, updated_at = now()
             WHERE id = $1
             RETURNING id, name, user_id, created_at, updated_at",
        )
        .bind(id)
        .bind(name)
        .fetch_one(db)
        .await
    }

    /// Items and shares go with the list via the schema's cascade rules.
    pub async fn delete(db: &PgPool, id: Uuid) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM shopping_lists WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(())
    }
}
