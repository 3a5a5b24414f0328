use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::auth::repo::UserSummary;
use crate::shares::repo::ShareWithUser;

/// Request body for `POST /shopping-lists/:id/share`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareRequest {
    pub target_user_id: Option<Uuid>,
}

/// Query string for `DELETE /shopping-lists/:id/share`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevokeQuery {
    pub user_id: Option<Uuid>,
}

/// A share grant as returned to the owner, grantee embedded.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareResponse {
    pub id: Uuid,
    pub list_id: Uuid,
    pub user_id: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub user: UserSummary,
}

impl From<ShareWithUser> for ShareResponse {
    fn from(s: ShareWithUser) -> Self {
        Self {
            id: s.id,
            list_id: s.list_id,
            user_id: s.user_id,
            created_at: s.created_at,
            user: UserSummary {
                id: s.user_id,
                username: s.username,
                name: s.name,
                email: s.email,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn share_response_embeds_grantee() {
        let user_id = Uuid::new_v4();
        let share = ShareWithUser {
            id: Uuid::new_v4(),
            list_id: Uuid::new_v4(),
            user_id,
            created_at: OffsetDateTime::now_utc(),
            username: "bob".into(),
            name: None,
            email: "bob@x.com".into(),
        };
        let json = serde_json::to_string(&ShareResponse::from(share)).unwrap();
        assert!(json.contains("\"listId\""));
        assert!(json.contains("\"user\":{"));
        assert!(json.contains("\"username\":\"bob\""));
    }
}
