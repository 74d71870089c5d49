use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::Product;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateProductRequest {
    pub id: Option<Uuid>,
    pub category_id: Uuid,
    pub name: String,
    pub price: i64,
    pub image_url: Option<String>,
    pub size_ids: Option<Vec<Uuid>>,
    pub addon_ids: Option<Vec<Uuid>>,
}

/// Omitted `size_ids`/`addon_ids` leave the associations untouched;
/// an empty list clears them.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateProductRequest {
    pub category_id: Option<Uuid>,
    pub name: Option<String>,
    pub price: Option<i64>,
    pub image_url: Option<String>,
    pub size_ids: Option<Vec<Uuid>>,
    pub addon_ids: Option<Vec<Uuid>>,
}

#[derive(Serialize, ToSchema)]
pub struct ProductList {
    pub items: Vec<Product>,
}
