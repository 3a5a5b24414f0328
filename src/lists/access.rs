//! The single authorization primitive for lists and their items.
//!
//! A user may access a list iff they own it or hold a share for it. Item and
//! list read/mutate paths report an inaccessible or nonexistent list as
//! "not found" so the API never confirms the existence of lists the caller
//! cannot see. Owner-only paths (rename, delete, share management) answer
//! with an explicit 403 once the caller has demonstrably seen the list.

use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};

/// How a user relates to an existing list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListAccess {
    Owner,
    Shared,
    None,
}

/// True iff `user_id` owns the list or holds a share for it.
pub async fn can_access(db: &PgPool, user_id: Uuid, list_id: Uuid) -> Result<bool, sqlx::Error> {
    let access: Option<bool> = sqlx::query_scalar(
        "SELECT EXISTS (
             SELECT 1 FROM shopping_lists WHERE id = $1 AND user_id = $2
             UNION ALL
             SELECT 1 FROM list_shares WHERE list_id = $1 AND user_id = $2
         )",
    )
    .bind(list_id)
    .bind(user_id)
    .fetch_optional(db)
    .await?;
    Ok(access.unwrap_or(false))
}

/// Resolve the caller's relation to a list, or `None` when the list itself
/// does not exist.
pub async fn classify(
    db: &PgPool,
    user_id: Uuid,
    list_id: Uuid,
) -> Result<Option<ListAccess>, sqlx::Error> {
    let owner_id: Option<Uuid> =
        sqlx::query_scalar("SELECT user_id FROM shopping_lists WHERE id = $1")
            .bind(list_id)
            .fetch_optional(db)
            .await?;

    let Some(owner_id) = owner_id else {
        return Ok(None);
    };

    if owner_id == user_id {
        return Ok(Some(ListAccess::Owner));
    }

    let shared: Option<bool> = sqlx::query_scalar(
        "SELECT EXISTS (SELECT 1 FROM list_shares WHERE list_id = $1 AND user_id = $2)",
    )
    .bind(list_id)
    .bind(user_id)
    .fetch_optional(db)
    .await?;

    if shared.unwrap_or(false) {
        Ok(Some(ListAccess::Shared))
    } else {
        Ok(Some(ListAccess::None))
    }
}

/// Guard for read/item paths: missing list and no-relation both collapse to
/// 404.
pub async fn require_access(db: &PgPool, user_id: Uuid, list_id: Uuid) -> ApiResult<()> {
    if can_access(db, user_id, list_id).await? {
        Ok(())
    } else {
        Err(ApiError::not_found("List not found"))
    }
}

/// Guard for owner-only list mutations (rename, delete). A sharee gets an
/// explicit 403 since the share already disclosed the list to them; a
/// stranger still gets 404.
pub async fn require_owner(db: &PgPool, user_id: Uuid, list_id: Uuid) -> ApiResult<()> {
    match classify(db, user_id, list_id).await? {
        Some(ListAccess::Owner) => Ok(()),
        Some(ListAccess::Shared) => Err(ApiError::forbidden(
            "Only the list owner can perform this action",
        )),
        Some(ListAccess::None) | None => Err(ApiError::not_found("List not found")),
    }
}
