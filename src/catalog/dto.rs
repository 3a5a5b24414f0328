use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::repo::{Category, Product, ProductWithCategory};

/// Request body for creating or updating a category.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRequest {
    pub name: Option<String>,
    pub icon: Option<String>,
    pub sort_order: Option<i32>,
}

/// Request body for creating or updating a product.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRequest {
    pub name: Option<String>,
    pub category_id: Option<Uuid>,
    pub unit: Option<String>,
}

/// Query string for `GET /products`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductQuery {
    pub category_id: Option<Uuid>,
    pub search: Option<String>,
}

/// Category with its full product list, for the management view.
#[derive(Debug, Serialize)]
pub struct CategoryWithProducts {
    #[serde(flatten)]
    pub category: Category,
    pub products: Vec<Product>,
}

/// Embedded category summary on a product read.
#[derive(Debug, Serialize)]
pub struct CategorySummary {
    pub id: Uuid,
    pub name: String,
    pub icon: Option<String>,
}

/// Product with its category summary, for the public product read.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: Uuid,
    pub name: String,
    pub unit: Option<String>,
    pub category_id: Uuid,
    pub category: CategorySummary,
}

impl From<ProductWithCategory> for ProductResponse {
    fn from(p: ProductWithCategory) -> Self {
        Self {
            id: p.id,
            name: p.name,
            unit: p.unit,
            category_id: p.category_id,
            category: CategorySummary {
                id: p.category_id,
                name: p.category_name,
                icon: p.category_icon,
            },
        }
    }
}
