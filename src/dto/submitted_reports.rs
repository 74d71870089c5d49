use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{Expense, SubmittedReport, Transaction};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateSubmittedReportRequest {
    pub report_date: NaiveDate,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub sales_snapshot: serde_json::Value,
    pub expenses_snapshot: serde_json::Value,
    pub summary_snapshot: serde_json::Value,
    pub transaction_ids: Vec<Uuid>,
    pub expense_ids: Vec<Uuid>,
    pub notes: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SubmittedReportList {
    pub items: Vec<SubmittedReport>,
}

/// Read-back view: the frozen snapshot plus live details for the rows it
/// references, reconciled against later void decisions.
#[derive(Debug, Serialize, ToSchema)]
pub struct SubmittedReportDetail {
    pub report: SubmittedReport,
    pub transactions: Vec<Transaction>,
    pub expenses: Vec<Expense>,
    pub has_voided_transactions: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SubmittedReportStats {
    pub total_reports: i64,
    pub reports_this_month: i64,
    pub last_report_date: Option<NaiveDate>,
    pub last_submitted_at: Option<DateTime<Utc>>,
}
