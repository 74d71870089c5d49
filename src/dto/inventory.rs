use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{InventoryItem, InventoryRecord};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateInventoryItemRequest {
    pub id: Option<Uuid>,
    pub name: String,
    pub category: String,
    pub unit: String,
    pub min_stock: Option<i64>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateInventoryItemRequest {
    pub name: Option<String>,
    pub category: Option<String>,
    pub unit: Option<String>,
    pub min_stock: Option<i64>,
}

#[derive(Serialize, ToSchema)]
pub struct InventoryItemList {
    pub items: Vec<InventoryItem>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateInventoryRecordRequest {
    pub inventory_item_id: Uuid,
    pub quantity: i64,
    pub recorded_on: NaiveDate,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct BulkInventoryRecordsRequest {
    pub records: Vec<CreateInventoryRecordRequest>,
}

#[derive(Serialize, ToSchema)]
pub struct InventoryRecordList {
    pub items: Vec<InventoryRecord>,
}

/// One row of the latest-value view: the item plus its most recent
/// record on or before the query date, when one exists.
#[derive(Debug, Serialize, ToSchema)]
pub struct ItemLatest {
    pub item: InventoryItem,
    pub latest_quantity: Option<i64>,
    pub latest_recorded_on: Option<NaiveDate>,
}

#[derive(Serialize, ToSchema)]
pub struct InventoryLatestList {
    pub items: Vec<ItemLatest>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct InventoryStats {
    pub item_count: i64,
    pub record_count: i64,
    pub low_stock_count: i64,
    pub last_recorded_on: Option<NaiveDate>,
}
