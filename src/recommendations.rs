use axum::{routing::get, Json, Router};
use serde::Serialize;
use serde_json::json;

use crate::auth::jwt::AuthUser;
use crate::state::AppState;

/// A suggested group of common purchases for the bulk-add panel.
#[derive(Debug, Clone, Serialize)]
pub struct RecommendationGroup {
    pub name: &'static str,
    pub icon: &'static str,
    pub items: &'static [&'static str],
}

/// Static recommendation data. Could later be personalized from purchase
/// history; for now every user sees the same groups.
pub const GROCERY_RECOMMENDATIONS: &[RecommendationGroup] = &[
    RecommendationGroup {
        name: "Breakfast",
        icon: "🍳",
        items: &["Eggs", "Milk", "Oatmeal", "Butter", "Bread", "Jam"],
    },
    RecommendationGroup {
        name: "Fruits & vegetables",
        icon: "🥬",
        items: &["Apples", "Bananas", "Tomatoes", "Cucumbers", "Onions", "Potatoes"],
    },
    RecommendationGroup {
        name: "Dairy",
        icon: "🥛",
        items: &["Milk", "Yogurt", "Cheese", "Sour cream", "Cottage cheese"],
    },
    RecommendationGroup {
        name: "Baking",
        icon: "🍞",
        items: &["Flour", "Sugar", "Baking powder", "Vanilla", "Eggs"],
    },
    RecommendationGroup {
        name: "Household",
        icon: "🧼",
        items: &["Dish soap", "Paper towels", "Trash bags", "Sponges"],
    },
];

pub fn router() -> Router<AppState> {
    Router::new().route("/recommendations", get(list_recommendations))
}

pub async fn list_recommendations(AuthUser(_user_id): AuthUser) -> Json<serde_json::Value> {
    Json(json!({ "recommendations": GROCERY_RECOMMENDATIONS }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_are_non_empty() {
        assert!(!GROCERY_RECOMMENDATIONS.is_empty());
        for group in GROCERY_RECOMMENDATIONS {
            assert!(!group.name.is_empty());
            assert!(!group.items.is_empty());
        }
    }

    #[test]
    fn groups_serialize_with_items() {
        let json = serde_json::to_string(GROCERY_RECOMMENDATIONS).unwrap();
        assert!(json.contains("\"name\":\"Breakfast\""));
        assert!(json.contains("\"items\""));
    }
}
