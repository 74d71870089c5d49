use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct Pagination {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

impl Pagination {
    pub fn normalize(&self) -> (i64, i64, i64) {
        let page = self.page.unwrap_or(1).max(1);
        let per_page = self.per_page.unwrap_or(20).clamp(1, 100);
        let offset = (page - 1) * per_page;
        (page, per_page, offset)
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ListQuery {
    #[serde(flatten)]
    pub pagination: Pagination,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct TransactionListQuery {
    #[serde(flatten)]
    pub pagination: Pagination,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub payment_method: Option<String>,
    pub payment_status: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ExpenseListQuery {
    #[serde(flatten)]
    pub pagination: Pagination,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub category: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct InventoryRecordQuery {
    #[serde(flatten)]
    pub pagination: Pagination,
    pub inventory_item_id: Option<Uuid>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct InventoryLatestQuery {
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SubmittedReportQuery {
    #[serde(flatten)]
    pub pagination: Pagination,
    pub report_date: Option<NaiveDate>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub user_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ReportPeriod {
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Overall,
    Custom,
}

impl ReportPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportPeriod::Daily => "daily",
            ReportPeriod::Weekly => "weekly",
            ReportPeriod::Monthly => "monthly",
            ReportPeriod::Yearly => "yearly",
            ReportPeriod::Overall => "overall",
            ReportPeriod::Custom => "custom",
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AnalyticsQuery {
    pub period: ReportPeriod,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}
