use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PaymentMethodBreakdown {
    pub method: String,
    pub total: i64,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ExpenseCategoryBreakdown {
    pub category: String,
    pub total: i64,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SalesSummary {
    pub total_sales: i64,
    pub transaction_count: i64,
    pub average_order_value: i64,
    pub payment_methods: Vec<PaymentMethodBreakdown>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ExpenseSummary {
    pub total_expenses: i64,
    pub expense_count: i64,
    pub categories: Vec<ExpenseCategoryBreakdown>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AnalyticsReport {
    pub period: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub sales: SalesSummary,
    pub expenses: ExpenseSummary,
    pub gross_profit: i64,
    pub profit_margin: f64,
    pub weekly_growth: f64,
}
