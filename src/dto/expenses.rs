use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::Expense;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateExpenseRequest {
    pub description: String,
    pub amount: i64,
    pub category: String,
    pub expense_date: NaiveDate,
    pub receipt_url: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateExpenseRequest {
    pub description: Option<String>,
    pub amount: Option<i64>,
    pub category: Option<String>,
    pub expense_date: Option<NaiveDate>,
    pub receipt_url: Option<String>,
    pub notes: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct ExpenseList {
    pub items: Vec<Expense>,
}
