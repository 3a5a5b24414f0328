use serde::Serialize;
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::auth::repo::UserRole;

/// User row for the admin overview, with owned-entity counts.
#[derive(Debug, Clone, FromRow)]
pub struct AdminUserRow {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub name: Option<String>,
    pub role: UserRole,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
    pub list_count: i64,
    pub recipe_count: i64,
}

/// List summary for the admin overview, with its item count.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct AdminListRow {
    pub id: Uuid,
    pub name: String,
    pub user_id: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
    pub item_count: i64,
}

pub async fn list_users_with_counts(db: &PgPool) -> Result<Vec<AdminUserRow>, sqlx::Error> {
    sqlx::query_as::<_, AdminUserRow>(
        "SELECT u.id, u.email, u.username, u.name, u.role, u.created_at, u.updated_at,
                (SELECT COUNT(*) FROM shopping_lists l WHERE l.user_id = u.id) AS list_count,
                (SELECT COUNT(*) FROM recipes r WHERE r.user_id = u.id) AS recipe_count
         FROM users u
         ORDER BY u.created_at DESC",
    )
    .fetch_all(db)
    .await
}

pub async fn list_all_lists_with_counts(db: &PgPool) -> Result<Vec<AdminListRow>, sqlx::Error> {
    sqlx::query_as::<_, AdminListRow>(
        "SELECT l.id, l.name, l.user_id, l.created_at, l.updated_at,
                COUNT(i.id) AS item_count
         FROM shopping_lists l
         LEFT JOIN items i ON i.list_id = l.id
         GROUP BY l.id
         ORDER BY l.updated_at DESC",
    )
    .fetch_all(db)
    .await
}
