use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDate, NaiveTime, Utc};
use sea_orm::{ColumnTrait, Condition, EntityTrait, QueryFilter};

use crate::{
    entity::{
        expenses::{Column as ExpenseCol, Entity as Expenses},
        transactions::{Column as TransactionCol, Entity as Transactions},
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{Expense, Transaction},
    policy::{Action, Resource, ensure_allowed},
    response::{ApiResponse, Meta},
    routes::params::{AnalyticsQuery, ReportPeriod},
    services::{expense_service::expense_from_entity, transaction_service::transaction_from_entity},
    state::AppState,
};
use crate::dto::reports::{
    AnalyticsReport, ExpenseCategoryBreakdown, ExpenseSummary, PaymentMethodBreakdown,
    SalesSummary,
};

pub async fn analytics(
    state: &AppState,
    user: &AuthUser,
    query: AnalyticsQuery,
) -> AppResult<ApiResponse<AnalyticsReport>> {
    ensure_allowed(user, Resource::Reports, Action::Read)?;

    let today = Utc::now().date_naive();
    let (start, end) = resolve_range(&query, today)?;

    let transactions = fetch_transactions(state, user, start, end).await?;
    let expenses = fetch_expenses(state, user, start, end).await?;

    let sales = summarize_sales(&transactions);
    let expense_summary = summarize_expenses(&expenses);

    let gross_profit = sales.total_sales - expense_summary.total_expenses;
    let profit_margin = margin(gross_profit, sales.total_sales);

    // Growth is always week over week, independent of the requested period.
    let current_week_start = today - Duration::days(6);
    let previous_week_start = today - Duration::days(13);
    let previous_week_end = today - Duration::days(7);

    let current_week =
        fetch_transactions(state, user, Some(current_week_start), Some(today)).await?;
    let previous_week =
        fetch_transactions(state, user, Some(previous_week_start), Some(previous_week_end))
            .await?;

    let weekly_growth = growth_percent(
        summarize_sales(&current_week).total_sales,
        summarize_sales(&previous_week).total_sales,
    );

    Ok(ApiResponse::success(
        "Analytics",
        AnalyticsReport {
            period: query.period.as_str().to_string(),
            start_date: start,
            end_date: end,
            sales,
            expenses: expense_summary,
            gross_profit,
            profit_margin,
            weekly_growth,
        },
        Some(Meta::empty()),
    ))
}

/// Map a named period onto an inclusive date range; `None` bounds mean
/// unbounded (the `overall` period).
pub fn resolve_range(
    query: &AnalyticsQuery,
    today: NaiveDate,
) -> AppResult<(Option<NaiveDate>, Option<NaiveDate>)> {
    match query.period {
        ReportPeriod::Daily => Ok((Some(today), Some(today))),
        ReportPeriod::Weekly => Ok((Some(today - Duration::days(6)), Some(today))),
        ReportPeriod::Monthly => {
            let first = today.with_day(1).unwrap_or(today);
            Ok((Some(first), Some(today)))
        }
        ReportPeriod::Yearly => {
            let first = NaiveDate::from_ymd_opt(today.year(), 1, 1).unwrap_or(today);
            Ok((Some(first), Some(today)))
        }
        ReportPeriod::Overall => Ok((None, None)),
        ReportPeriod::Custom => {
            let (start, end) = match (query.start_date, query.end_date) {
                (Some(s), Some(e)) => (s, e),
                _ => {
                    return Err(AppError::BadRequest(
                        "Custom period requires start_date and end_date".into(),
                    ));
                }
            };
            if start > end {
                return Err(AppError::BadRequest(
                    "start_date must not be after end_date".into(),
                ));
            }
            Ok((Some(start), Some(end)))
        }
    }
}

/// A transaction counts toward sales when it completed and was not voided.
pub fn counts_as_sale(transaction: &Transaction) -> bool {
    transaction.payment_status == "completed" && transaction.void_status != "approved"
}

pub fn summarize_sales(transactions: &[Transaction]) -> SalesSummary {
    let mut total_sales: i64 = 0;
    let mut transaction_count: i64 = 0;
    let mut by_method: BTreeMap<String, (i64, i64)> = BTreeMap::new();

    for transaction in transactions.iter().filter(|t| counts_as_sale(t)) {
        total_sales += transaction.total;
        transaction_count += 1;
        let entry = by_method
            .entry(transaction.payment_method.clone())
            .or_insert((0, 0));
        entry.0 += transaction.total;
        entry.1 += 1;
    }

    let average_order_value = if transaction_count == 0 {
        0
    } else {
        total_sales / transaction_count
    };

    let payment_methods = by_method
        .into_iter()
        .map(|(method, (total, count))| PaymentMethodBreakdown { method, total, count })
        .collect();

    SalesSummary {
        total_sales,
        transaction_count,
        average_order_value,
        payment_methods,
    }
}

pub fn summarize_expenses(expenses: &[Expense]) -> ExpenseSummary {
    let mut total_expenses: i64 = 0;
    let mut expense_count: i64 = 0;
    let mut by_category: BTreeMap<String, (i64, i64)> = BTreeMap::new();

    for expense in expenses {
        total_expenses += expense.amount;
        expense_count += 1;
        let entry = by_category.entry(expense.category.clone()).or_insert((0, 0));
        entry.0 += expense.amount;
        entry.1 += 1;
    }

    let categories = by_category
        .into_iter()
        .map(|(category, (total, count))| ExpenseCategoryBreakdown { category, total, count })
        .collect();

    ExpenseSummary {
        total_expenses,
        expense_count,
        categories,
    }
}

/// Week-over-week growth in percent; 0 when there is no previous baseline.
pub fn growth_percent(current: i64, previous: i64) -> f64 {
    if previous == 0 {
        return 0.0;
    }
    (current - previous) as f64 / previous as f64 * 100.0
}

/// Gross profit over sales; 0 when there were no sales.
pub fn margin(gross_profit: i64, total_sales: i64) -> f64 {
    if total_sales == 0 {
        return 0.0;
    }
    gross_profit as f64 / total_sales as f64
}

async fn fetch_transactions(
    state: &AppState,
    user: &AuthUser,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> AppResult<Vec<Transaction>> {
    let mut condition = Condition::all().add(TransactionCol::TenantId.eq(user.tenant_id));
    if let Some(start) = start {
        condition =
            condition.add(TransactionCol::CreatedAt.gte(start.and_time(NaiveTime::MIN).and_utc()));
    }
    if let Some(end) = end {
        let exclusive = end.succ_opt().unwrap_or(end);
        condition = condition
            .add(TransactionCol::CreatedAt.lt(exclusive.and_time(NaiveTime::MIN).and_utc()));
    }

    let rows = Transactions::find().filter(condition).all(&state.orm).await?;
    Ok(rows.into_iter().map(transaction_from_entity).collect())
}

async fn fetch_expenses(
    state: &AppState,
    user: &AuthUser,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> AppResult<Vec<Expense>> {
    let mut condition = Condition::all().add(ExpenseCol::TenantId.eq(user.tenant_id));
    if let Some(start) = start {
        condition = condition.add(ExpenseCol::ExpenseDate.gte(start));
    }
    if let Some(end) = end {
        condition = condition.add(ExpenseCol::ExpenseDate.lte(end));
    }

    let rows = Expenses::find().filter(condition).all(&state.orm).await?;
    Ok(rows.into_iter().map(expense_from_entity).collect())
}
