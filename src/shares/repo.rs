use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

/// A share grant row joined with the grantee's public fields.
#[derive(Debug, Clone, FromRow)]
pub struct ShareWithUser {
    pub id: Uuid,
    pub list_id: Uuid,
    pub user_id: Uuid,
    pub created_at: OffsetDateTime,
    pub username: String,
    pub name: Option<String>,
    pub email: String,
}

const SHARE_USER_COLUMNS: &str = "s.id, s.list_id, s.user_id, s.created_at,
                                  u.username, u.name, u.email";

pub struct ListShare;

impl ListShare {
    pub async fn list_for_list(
        db: &PgPool,
        list_id: Uuid,
    ) -> Result<Vec<ShareWithUser>, sqlx::Error> {
        sqlx::query_as::<_, ShareWithUser>(&format!(
            "SELECT {SHARE_USER_COLUMNS}
             FROM list_shares s
             JOIN users u ON u.id = s.user_id
             WHERE s.list_id = $1
             ORDER BY s.created_at DESC"
        ))
        .bind(list_id)
        .fetch_all(db)
        .await
    }

    pub async fn exists(db: &PgPool, list_id: Uuid, user_id: Uuid) -> Result<bool, sqlx::Error> {
        let found: Option<bool> = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM list_shares WHERE list_id = $1 AND user_id = $2)",
        )
        .bind(list_id)
        .bind(user_id)
        .fetch_optional(db)
        .await?;
        Ok(found.unwrap_or(false))
    }

    pub async fn create(
        db: &PgPool,
        list_id: Uuid,
        user_id: Uuid,
    ) -> Result<ShareWithUser, sqlx::Error> {
        sqlx::query_as::<_, ShareWithUser>(&format!(
            "WITH inserted AS (
                 INSERT INTO list_shares (list_id, user_id)
                 VALUES ($1, $2)
                 RETURNING id, list_id, user_id, created_at
             )
             SELECT {SHARE_USER_COLUMNS}
             FROM inserted s
             JOIN users u ON u.id = s.user_id"
        ))
        .bind(list_id)
        .bind(user_id)
        .fetch_one(db)
        .await
    }

    /// Delete the unique `(list, user)` grant; returns whether a row was
    /// actually removed.
    pub async fn delete(db: &PgPool, list_id: Uuid, user_id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM list_shares WHERE list_id = $1 AND user_id = $2")
            .bind(list_id)
            .bind(user_id)
            .execute(db)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
