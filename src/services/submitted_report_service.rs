use chrono::{Datelike, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use sea_orm::ActiveValue::NotSet;
use uuid::Uuid;

use crate::{
    audit::log_audit,
    entity::{
        expenses::{Column as ExpenseCol, Entity as Expenses},
        submitted_reports::{
            ActiveModel, Column, Entity as SubmittedReports, Model as ReportModel,
        },
        transactions::{Column as TransactionCol, Entity as Transactions},
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::SubmittedReport,
    policy::{Action, Resource, ensure_allowed},
    response::{ApiResponse, Meta},
    routes::params::SubmittedReportQuery,
    services::{
        expense_service::expense_from_entity,
        transaction_service::{VOID_APPROVED, transaction_from_entity},
    },
    state::AppState,
};
use crate::dto::submitted_reports::{
    CreateSubmittedReportRequest, SubmittedReportDetail, SubmittedReportList,
    SubmittedReportStats,
};

/// The snapshots and id lists are stored verbatim; the server assigns the
/// submission timestamp and does not cross-check the snapshot values
/// against the referenced rows.
pub async fn create_report(
    state: &AppState,
    user: &AuthUser,
    payload: CreateSubmittedReportRequest,
) -> AppResult<ApiResponse<SubmittedReport>> {
    ensure_allowed(user, Resource::SubmittedReports, Action::Create)?;

    if payload.period_start > payload.period_end {
        return Err(AppError::BadRequest(
            "period_start must not be after period_end".into(),
        ));
    }

    let transaction_ids = serde_json::to_value(&payload.transaction_ids)
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e)))?;
    let expense_ids = serde_json::to_value(&payload.expense_ids)
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e)))?;

    let active = ActiveModel {
        id: Set(Uuid::new_v4()),
        tenant_id: Set(user.tenant_id),
        user_id: Set(user.user_id),
        report_date: Set(payload.report_date),
        period_start: Set(payload.period_start),
        period_end: Set(payload.period_end),
        sales_snapshot: Set(payload.sales_snapshot),
        expenses_snapshot: Set(payload.expenses_snapshot),
        summary_snapshot: Set(payload.summary_snapshot),
        transaction_ids: Set(transaction_ids),
        expense_ids: Set(expense_ids),
        notes: Set(payload.notes),
        submitted_at: NotSet,
    };
    let report = active.insert(&state.orm).await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.tenant_id),
        Some(user.user_id),
        "report_submit",
        Some("submitted_reports"),
        Some(serde_json::json!({ "report_id": report.id, "report_date": report.report_date })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Report submitted",
        report_from_entity(report)?,
        Some(Meta::empty()),
    ))
}

pub async fn list_reports(
    state: &AppState,
    user: &AuthUser,
    query: SubmittedReportQuery,
) -> AppResult<ApiResponse<SubmittedReportList>> {
    ensure_allowed(user, Resource::SubmittedReports, Action::Read)?;
    let (page, limit, offset) = query.pagination.normalize();

    let mut condition = Condition::all().add(Column::TenantId.eq(user.tenant_id));
    if let Some(report_date) = query.report_date {
        condition = condition.add(Column::ReportDate.eq(report_date));
    }
    if let Some(start) = query.start_date {
        condition = condition.add(Column::ReportDate.gte(start));
    }
    if let Some(end) = query.end_date {
        condition = condition.add(Column::ReportDate.lte(end));
    }
    if let Some(user_id) = query.user_id {
        condition = condition.add(Column::UserId.eq(user_id));
    }

    let finder = SubmittedReports::find()
        .filter(condition)
        .order_by_desc(Column::SubmittedAt);

    let total = finder.clone().count(&state.orm).await? as i64;

    let rows = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?;

    let mut items = Vec::with_capacity(rows.len());
    for row in rows {
        items.push(report_from_entity(row)?);
    }

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success(
        "Submitted reports",
        SubmittedReportList { items },
        Some(meta),
    ))
}

/// Read-back re-fetches the referenced rows as they are now; the stored
/// snapshot is returned untouched, with a flag for any transaction voided
/// after submission.
pub async fn get_report(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<SubmittedReportDetail>> {
    ensure_allowed(user, Resource::SubmittedReports, Action::Read)?;

    let row = SubmittedReports::find()
        .filter(Column::Id.eq(id))
        .filter(Column::TenantId.eq(user.tenant_id))
        .one(&state.orm)
        .await?;
    let row = match row {
        Some(r) => r,
        None => return Err(AppError::NotFound),
    };

    let report = report_from_entity(row)?;

    let transactions = if report.transaction_ids.is_empty() {
        Vec::new()
    } else {
        Transactions::find()
            .filter(TransactionCol::TenantId.eq(user.tenant_id))
            .filter(TransactionCol::Id.is_in(report.transaction_ids.clone()))
            .all(&state.orm)
            .await?
            .into_iter()
            .map(transaction_from_entity)
            .collect()
    };

    let expenses = if report.expense_ids.is_empty() {
        Vec::new()
    } else {
        Expenses::find()
            .filter(ExpenseCol::TenantId.eq(user.tenant_id))
            .filter(ExpenseCol::Id.is_in(report.expense_ids.clone()))
            .all(&state.orm)
            .await?
            .into_iter()
            .map(expense_from_entity)
            .collect()
    };

    let has_voided_transactions = transactions
        .iter()
        .any(|t: &crate::models::Transaction| t.void_status == VOID_APPROVED);

    Ok(ApiResponse::success(
        "Submitted report",
        SubmittedReportDetail {
            report,
            transactions,
            expenses,
            has_voided_transactions,
        },
        Some(Meta::empty()),
    ))
}

pub async fn report_stats(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<SubmittedReportStats>> {
    ensure_allowed(user, Resource::SubmittedReports, Action::Read)?;

    let total_reports = SubmittedReports::find()
        .filter(Column::TenantId.eq(user.tenant_id))
        .count(&state.orm)
        .await? as i64;

    let now = Utc::now();
    let month_start = now
        .date_naive()
        .with_day(1)
        .unwrap_or_else(|| now.date_naive());
    let reports_this_month = SubmittedReports::find()
        .filter(Column::TenantId.eq(user.tenant_id))
        .filter(Column::SubmittedAt.gte(month_start.and_time(chrono::NaiveTime::MIN).and_utc()))
        .count(&state.orm)
        .await? as i64;

    let last = SubmittedReports::find()
        .filter(Column::TenantId.eq(user.tenant_id))
        .order_by_desc(Column::SubmittedAt)
        .one(&state.orm)
        .await?;

    let (last_report_date, last_submitted_at) = match last {
        Some(row) => (
            Some(row.report_date),
            Some(row.submitted_at.with_timezone(&Utc)),
        ),
        None => (None, None),
    };

    Ok(ApiResponse::success(
        "Submitted report stats",
        SubmittedReportStats {
            total_reports,
            reports_this_month,
            last_report_date,
            last_submitted_at,
        },
        Some(Meta::empty()),
    ))
}

fn report_from_entity(model: ReportModel) -> AppResult<SubmittedReport> {
    let transaction_ids: Vec<Uuid> = serde_json::from_value(model.transaction_ids)
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e)))?;
    let expense_ids: Vec<Uuid> = serde_json::from_value(model.expense_ids)
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e)))?;

    Ok(SubmittedReport {
        id: model.id,
        tenant_id: model.tenant_id,
        user_id: model.user_id,
        report_date: model.report_date,
        period_start: model.period_start,
        period_end: model.period_end,
        sales_snapshot: model.sales_snapshot,
        expenses_snapshot: model.expenses_snapshot,
        summary_snapshot: model.summary_snapshot,
        transaction_ids,
        expense_ids,
        notes: model.notes,
        submitted_at: model.submitted_at.with_timezone(&Utc),
    })
}
