use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{Transaction, TransactionItem};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateTransactionItemRequest {
    pub product_id: Uuid,
    pub size_id: Option<Uuid>,
    pub addon_ids: Option<Vec<Uuid>>,
    pub quantity: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateTransactionRequest {
    pub items: Vec<CreateTransactionItemRequest>,
    pub payment_method: String,
    pub payment_status: Option<String>,
    pub cash_received: Option<i64>,
    pub reference_number: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateVoidStatusRequest {
    pub void_status: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TransactionWithItems {
    pub transaction: Transaction,
    pub items: Vec<TransactionItem>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TransactionList {
    pub items: Vec<Transaction>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TransactionStats {
    pub today_count: i64,
    pub today_sales: i64,
    pub total_count: i64,
    pub total_sales: i64,
}
