use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use axum_pos_api::models::{Expense, Transaction};
use axum_pos_api::routes::params::{AnalyticsQuery, ReportPeriod};
use axum_pos_api::services::report_service::{
    growth_percent, margin, resolve_range, summarize_expenses, summarize_sales,
};

fn transaction(total: i64, payment_method: &str, payment_status: &str, void_status: &str) -> Transaction {
    Transaction {
        id: Uuid::new_v4(),
        tenant_id: Uuid::new_v4(),
        user_id: Uuid::new_v4(),
        subtotal: total,
        total,
        payment_method: payment_method.into(),
        payment_status: payment_status.into(),
        cash_received: None,
        change_due: None,
        reference_number: None,
        void_status: void_status.into(),
        created_at: Utc::now(),
    }
}

fn expense(amount: i64, category: &str) -> Expense {
    Expense {
        id: Uuid::new_v4(),
        tenant_id: Uuid::new_v4(),
        user_id: Uuid::new_v4(),
        description: "test".into(),
        amount,
        category: category.into(),
        expense_date: NaiveDate::from_ymd_opt(2024, 1, 15).expect("valid date"),
        receipt_url: None,
        notes: None,
        created_at: Utc::now(),
    }
}

#[test]
fn only_completed_transactions_count_as_sales() {
    let transactions = vec![
        transaction(100, "cash", "completed", "none"),
        transaction(50, "cash", "pending", "none"),
    ];

    let summary = summarize_sales(&transactions);
    assert_eq!(summary.total_sales, 100);
    assert_eq!(summary.transaction_count, 1);
    assert_eq!(summary.average_order_value, 100);
}

#[test]
fn voided_transactions_are_excluded() {
    let transactions = vec![
        transaction(100, "cash", "completed", "none"),
        transaction(200, "cash", "completed", "approved"),
        transaction(300, "card", "completed", "requested"),
    ];

    let summary = summarize_sales(&transactions);
    assert_eq!(summary.total_sales, 400);
    assert_eq!(summary.transaction_count, 2);
}

#[test]
fn empty_transactions_produce_zeros() {
    let summary = summarize_sales(&[]);
    assert_eq!(summary.total_sales, 0);
    assert_eq!(summary.transaction_count, 0);
    assert_eq!(summary.average_order_value, 0);
    assert!(summary.payment_methods.is_empty());
}

#[test]
fn payment_methods_break_down_by_method() {
    let transactions = vec![
        transaction(100, "cash", "completed", "none"),
        transaction(150, "cash", "completed", "none"),
        transaction(200, "card", "completed", "none"),
    ];

    let summary = summarize_sales(&transactions);
    assert_eq!(summary.payment_methods.len(), 2);

    let card = summary
        .payment_methods
        .iter()
        .find(|b| b.method == "card")
        .expect("card breakdown");
    assert_eq!(card.total, 200);
    assert_eq!(card.count, 1);

    let cash = summary
        .payment_methods
        .iter()
        .find(|b| b.method == "cash")
        .expect("cash breakdown");
    assert_eq!(cash.total, 250);
    assert_eq!(cash.count, 2);
}

#[test]
fn expense_categories_break_down() {
    let expenses = vec![
        expense(500, "ingredients"),
        expense(300, "ingredients"),
        expense(1000, "rent"),
    ];

    let summary = summarize_expenses(&expenses);
    assert_eq!(summary.total_expenses, 1800);
    assert_eq!(summary.expense_count, 3);

    let ingredients = summary
        .categories
        .iter()
        .find(|b| b.category == "ingredients")
        .expect("ingredients breakdown");
    assert_eq!(ingredients.total, 800);
    assert_eq!(ingredients.count, 2);
}

#[test]
fn growth_is_zero_without_previous_baseline() {
    assert_eq!(growth_percent(50, 0), 0.0);
    assert_eq!(growth_percent(0, 0), 0.0);
}

#[test]
fn growth_follows_week_over_week_change() {
    assert_eq!(growth_percent(150, 100), 50.0);
    assert_eq!(growth_percent(50, 100), -50.0);
}

#[test]
fn margin_is_zero_without_sales() {
    assert_eq!(margin(0, 0), 0.0);
    assert_eq!(margin(-500, 0), 0.0);
}

#[test]
fn margin_is_profit_over_sales() {
    assert_eq!(margin(25, 100), 0.25);
}

#[test]
fn custom_period_requires_both_bounds() {
    let today = NaiveDate::from_ymd_opt(2024, 6, 15).expect("valid date");
    let query = AnalyticsQuery {
        period: ReportPeriod::Custom,
        start_date: Some(today),
        end_date: None,
    };
    assert!(resolve_range(&query, today).is_err());
}

#[test]
fn custom_period_rejects_inverted_bounds() {
    let today = NaiveDate::from_ymd_opt(2024, 6, 15).expect("valid date");
    let query = AnalyticsQuery {
        period: ReportPeriod::Custom,
        start_date: Some(today),
        end_date: Some(today - chrono::Duration::days(1)),
    };
    assert!(resolve_range(&query, today).is_err());
}

#[test]
fn named_periods_resolve_to_expected_ranges() {
    let today = NaiveDate::from_ymd_opt(2024, 6, 15).expect("valid date");

    let daily = AnalyticsQuery {
        period: ReportPeriod::Daily,
        start_date: None,
        end_date: None,
    };
    assert_eq!(
        resolve_range(&daily, today).expect("daily"),
        (Some(today), Some(today))
    );

    let weekly = AnalyticsQuery {
        period: ReportPeriod::Weekly,
        start_date: None,
        end_date: None,
    };
    assert_eq!(
        resolve_range(&weekly, today).expect("weekly"),
        (
            Some(NaiveDate::from_ymd_opt(2024, 6, 9).expect("valid date")),
            Some(today)
        )
    );

    let monthly = AnalyticsQuery {
        period: ReportPeriod::Monthly,
        start_date: None,
        end_date: None,
    };
    assert_eq!(
        resolve_range(&monthly, today).expect("monthly"),
        (
            Some(NaiveDate::from_ymd_opt(2024, 6, 1).expect("valid date")),
            Some(today)
        )
    );

    let overall = AnalyticsQuery {
        period: ReportPeriod::Overall,
        start_date: None,
        end_date: None,
    };
    assert_eq!(resolve_range(&overall, today).expect("overall"), (None, None));
}
