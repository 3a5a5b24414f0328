use serde::Serialize;
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

/// Item record in the database. Serialized directly in responses.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: Uuid,
    pub name: String,
    pub quantity: i32,
    pub purchased: bool,
    pub list_id: Uuid,
    pub product_id: Option<Uuid>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

const ITEM_COLUMNS: &str =
    "id, name, quantity, purchased, list_id, product_id, created_at, updated_at";

impl Item {
    pub async fn find(db: &PgPool, id: Uuid) -> Result<Option<Item>, sqlx::Error> {
        sqlx::query_as::<_, Item>(&format!(
            "SELECT {ITEM_COLUMNS} FROM items WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await
    }

    pub async fn list_for_list(db: &PgPool, list_id: Uuid) -> Result<Vec<Item>, sqlx::Error> {
        sqlx::query_as::<_, Item>(&format!(
            "SELECT {ITEM_COLUMNS} FROM items WHERE list_id = $1 ORDER BY created_at ASC"
        ))
        .bind(list_id)
        .fetch_all(db)
        .await
    }

    /// Items for a set of lists in one query, insertion-ordered; used to
    /// embed items when listing visible lists.
    pub async fn list_for_lists(db: &PgPool, list_ids: &[Uuid]) -> Result<Vec<Item>, sqlx::Error> {
        sqlx::query_as::<_, Item>(&format!(
            "SELECT {ITEM_COLUMNS} FROM items WHERE list_id = ANY($1) ORDER BY created_at ASC"
        ))
        .bind(list_ids)
        .fetch_all(db)
        .await
    }

    pub async fn create(
        db: &PgPool,
        list_id: Uuid,
        name: &str,
        quantity: i32,
        product_id: Option<Uuid>,
    ) -> Result<Item, sqlx::Error> {
        sqlx::query_as::<_, Item>(&format!(
            "INSERT INTO items (name, quantity, list_id, product_id)
             VALUES ($1, $2, $3, $4)
             RETURNING {ITEM_COLUMNS}"
        ))
        .bind(name)
        .bind(quantity)
        .bind(list_id)
        .bind(product_id)
        .fetch_one(db)
        .await
    }

    /// Partial update; `None` fields are left unchanged.
    pub async fn update(
        db: &PgPool,
        id: Uuid,
        name: Option<&str>,
        quantity: Option<i32>,
    ) -> Result<Item, sqlx::Error> {
        sqlx::query_as::<_, Item>(&format!(
            "UPDATE items
             SET name = COALESCE($2, name),
                 quantity = COALESCE($3, quantity),
                 updated_at = now()
             WHERE id = $1
             RETURNING {ITEM_COLUMNS}"
        ))
        .bind(id)
        .bind(name)
        .bind(quantity)
        .fetch_one(db)
        .await
    }

    pub async fn set_purchased(
        db: &PgPool,
        id: Uuid,
        purchased: bool,
    ) -> Result<Item, sqlx::Error> {
        sqlx::query_as::<_, Item>(&format!(
            "UPDATE items SET purchased = $2, updated_at = now()
             WHERE id = $1
             RETURNING {ITEM_COLUMNS}"
        ))
        .bind(id)
        .bind(purchased)
        .fetch_one(db)
        .await
    }

    /// Clear `purchased` for every marked item in a list.
    pub async fn deselect_all(db: &PgPool, list_id: Uuid) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE items SET purchased = FALSE, updated_at = now()
             WHERE list_id = $1 AND purchased = TRUE",
        )
        .bind(list_id)
        .execute(db)
        .await?;
        Ok(())
    }

    pub async fn delete(db: &PgPool, id: Uuid) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM items WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(())
    }

    /// Count of items referencing a catalog product; drives the product
    /// deletion guard.
    pub async fn count_for_product(db: &PgPool, product_id: Uuid) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM items WHERE product_id = $1")
            .bind(product_id)
            .fetch_one(db)
            .await
    }
}

/// Clamp a requested quantity to the model's minimum of 1.
pub fn clamp_quantity(quantity: i32) -> i32 {
    quantity.max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_quantity_floors_at_one() {
        assert_eq!(clamp_quantity(-3), 1);
        assert_eq!(clamp_quantity(0), 1);
        assert_eq!(clamp_quantity(1), 1);
        assert_eq!(clamp_quantity(7), 7);
    }

    #[test]
    fn item_serializes_camel_case() {
        let item = Item {
            id: Uuid::new_v4(),
            name: "Milk".into(),
            quantity: 1,
            purchased: false,
            list_id: Uuid::new_v4(),
            product_id: None,
            created_at: OffsetDateTime::now_utc(),
            updated_at: OffsetDateTime::now_utc(),
        };
        let json = serde_json::to_string(&item).unwrap();
        assert!(json.contains("\"listId\""));
        assert!(json.contains("\"productId\""));
        assert!(json.contains("\"purchased\":false"));
    }
}
