use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::items::repo::Item;
use crate::lists::repo::VisibleList;

/// Request body for creating or renaming a list.
#[derive(Debug, Deserialize)]
pub struct ListNameRequest {
    pub name: Option<String>,
}

/// A list as returned to clients: tagged with the caller's relation and
/// carrying its items.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResponse {
    pub id: Uuid,
    pub name: String,
    pub user_id: Uuid,
    pub is_owner: bool,
    pub is_shared: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
    pub items: Vec<Item>,
}

impl ListResponse {
    pub fn from_visible(list: VisibleList, items: Vec<Item>) -> Self {
        Self {
            id: list.id,
            name: list.name,
            user_id: list.user_id,
            is_owner: list.is_owner,
            is_shared: !list.is_owner,
            created_at: list.created_at,
            updated_at: list.updated_at,
            items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn visible(is_owner: bool) -> VisibleList {
        VisibleList {
            id: Uuid::new_v4(),
            name: "Groceries".into(),
            user_id: Uuid::new_v4(),
            is_owner,
            created_at: OffsetDateTime::now_utc(),
            updated_at: OffsetDateTime::now_utc(),
        }
    }

    #[test]
    fn owner_and_shared_flags_are_mutually_exclusive() {
        let owned = ListResponse::from_visible(visible(true), vec![]);
        assert!(owned.is_owner && !owned.is_shared);

        let shared = ListResponse::from_visible(visible(false), vec![]);
        assert!(!shared.is_owner && shared.is_shared);
    }

    #[test]
    fn response_uses_camel_case_tags() {
        let json =
            serde_json::to_string(&ListResponse::from_visible(visible(true), vec![])).unwrap();
        assert!(json.contains("\"isOwner\":true"));
        assert!(json.contains("\"isShared\":false"));
        assert!(json.contains("\"items\":[]"));
    }
}
