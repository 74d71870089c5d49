use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Tenant {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub primary_color: String,
    pub secondary_color: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub username: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Category {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub name: String,
    pub sequence: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub category_id: Uuid,
    pub name: String,
    pub price: i64,
    pub image_url: Option<String>,
    pub size_ids: Vec<Uuid>,
    pub addon_ids: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Size {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub name: String,
    pub price_modifier: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Addon {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub name: String,
    pub price_modifier: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Transaction {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub user_id: Uuid,
    pub subtotal: i64,
    pub total: i64,
    pub payment_method: String,
    pub payment_status: String,
    pub cash_received: Option<i64>,
    pub change_due: Option<i64>,
    pub reference_number: Option<String>,
    pub void_status: String,
    pub created_at: DateTime<Utc>,
}

/// Addon applied to a sold line item, frozen at sale time.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AppliedAddon {
    pub addon_id: Uuid,
    pub name: String,
    pub price_modifier: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TransactionItem {
    pub id: Uuid,
    pub transaction_id: Uuid,
    pub product_id: Uuid,
    pub product_name: String,
    pub size_id: Option<Uuid>,
    pub size_name: Option<String>,
    pub unit_price: i64,
    pub quantity: i32,
    pub addons: Vec<AppliedAddon>,
    pub subtotal: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Expense {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub user_id: Uuid,
    pub description: String,
    pub amount: i64,
    pub category: String,
    pub expense_date: NaiveDate,
    pub receipt_url: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct InventoryItem {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub name: String,
    pub category: String,
    pub unit: String,
    pub min_stock: Option<i64>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct InventoryRecord {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub inventory_item_id: Uuid,
    pub user_id: Uuid,
    pub quantity: i64,
    pub recorded_on: NaiveDate,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SubmittedReport {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub user_id: Uuid,
    pub report_date: NaiveDate,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub sales_snapshot: serde_json::Value,
    pub expenses_snapshot: serde_json::Value,
    pub summary_snapshot: serde_json::Value,
    pub transaction_ids: Vec<Uuid>,
    pub expense_ids: Vec<Uuid>,
    pub notes: Option<String>,
    pub submitted_at: DateTime<Utc>,
}
