use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{Addon, Category, Size};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCategoryRequest {
    /// Offline-first clients may sync with a pre-generated id.
    pub id: Option<Uuid>,
    pub name: String,
    pub sequence: Option<i32>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateCategoryRequest {
    pub name: Option<String>,
    pub sequence: Option<i32>,
}

#[derive(Serialize, ToSchema)]
pub struct CategoryList {
    pub items: Vec<Category>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateSizeRequest {
    pub id: Option<Uuid>,
    pub name: String,
    pub price_modifier: Option<i64>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateSizeRequest {
    pub name: Option<String>,
    pub price_modifier: Option<i64>,
}

#[derive(Serialize, ToSchema)]
pub struct SizeList {
    pub items: Vec<Size>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateAddonRequest {
    pub id: Option<Uuid>,
    pub name: String,
    pub price_modifier: Option<i64>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateAddonRequest {
    pub name: Option<String>,
    pub price_modifier: Option<i64>,
}

#[derive(Serialize, ToSchema)]
pub struct AddonList {
    pub items: Vec<Addon>,
}
