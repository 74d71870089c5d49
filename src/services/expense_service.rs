use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use sea_orm::ActiveValue::NotSet;
use uuid::Uuid;

use crate::{
    audit::log_audit,
    entity::expenses::{ActiveModel, Column, Entity as Expenses, Model as ExpenseModel},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::Expense,
    policy::{Action, Resource, ensure_allowed},
    response::{ApiResponse, Meta},
    routes::params::ExpenseListQuery,
    state::AppState,
};
use crate::dto::expenses::{CreateExpenseRequest, ExpenseList, UpdateExpenseRequest};

pub const EXPENSE_CATEGORIES: [&str; 6] = [
    "ingredients",
    "utilities",
    "salaries",
    "rent",
    "equipment",
    "other",
];

pub async fn list_expenses(
    state: &AppState,
    user: &AuthUser,
    query: ExpenseListQuery,
) -> AppResult<ApiResponse<ExpenseList>> {
    ensure_allowed(user, Resource::Expenses, Action::Read)?;
    let (page, limit, offset) = query.pagination.normalize();

    let mut condition = Condition::all().add(Column::TenantId.eq(user.tenant_id));
    if let Some(start) = query.start_date {
        condition = condition.add(Column::ExpenseDate.gte(start));
    }
    if let Some(end) = query.end_date {
        condition = condition.add(Column::ExpenseDate.lte(end));
    }
    if let Some(category) = query.category.as_ref().filter(|c| !c.is_empty()) {
        condition = condition.add(Column::Category.eq(category.clone()));
    }

    let finder = Expenses::find()
        .filter(condition)
        .order_by_desc(Column::ExpenseDate)
        .order_by_desc(Column::CreatedAt);

    let total = finder.clone().count(&state.orm).await? as i64;

    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(expense_from_entity)
        .collect();

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success("Expenses", ExpenseList { items }, Some(meta)))
}

pub async fn get_expense(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<Expense>> {
    ensure_allowed(user, Resource::Expenses, Action::Read)?;
    let expense = find_scoped(state, user, id).await?;
    Ok(ApiResponse::success("Expense", expense_from_entity(expense), None))
}

pub async fn create_expense(
    state: &AppState,
    user: &AuthUser,
    payload: CreateExpenseRequest,
) -> AppResult<ApiResponse<Expense>> {
    ensure_allowed(user, Resource::Expenses, Action::Create)?;

    if payload.amount < 0 {
        return Err(AppError::BadRequest("Amount must not be negative".into()));
    }
    if !EXPENSE_CATEGORIES.contains(&payload.category.as_str()) {
        return Err(AppError::BadRequest("Invalid expense category".into()));
    }

    let active = ActiveModel {
        id: Set(Uuid::new_v4()),
        tenant_id: Set(user.tenant_id),
        user_id: Set(user.user_id),
        description: Set(payload.description),
        amount: Set(payload.amount),
        category: Set(payload.category),
        expense_date: Set(payload.expense_date),
        receipt_url: Set(payload.receipt_url),
        notes: Set(payload.notes),
        created_at: NotSet,
    };
    let expense = active.insert(&state.orm).await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.tenant_id),
        Some(user.user_id),
        "expense_create",
        Some("expenses"),
        Some(serde_json::json!({ "expense_id": expense.id, "amount": expense.amount })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Expense recorded",
        expense_from_entity(expense),
        Some(Meta::empty()),
    ))
}

pub async fn update_expense(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateExpenseRequest,
) -> AppResult<ApiResponse<Expense>> {
    ensure_allowed(user, Resource::Expenses, Action::Update)?;
    let existing = find_scoped(state, user, id).await?;

    if let Some(amount) = payload.amount {
        if amount < 0 {
            return Err(AppError::BadRequest("Amount must not be negative".into()));
        }
    }
    if let Some(category) = payload.category.as_ref() {
        if !EXPENSE_CATEGORIES.contains(&category.as_str()) {
            return Err(AppError::BadRequest("Invalid expense category".into()));
        }
    }

    let mut active: ActiveModel = existing.into();
    if let Some(description) = payload.description {
        active.description = Set(description);
    }
    if let Some(amount) = payload.amount {
        active.amount = Set(amount);
    }
    if let Some(category) = payload.category {
        active.category = Set(category);
    }
    if let Some(expense_date) = payload.expense_date {
        active.expense_date = Set(expense_date);
    }
    if let Some(receipt_url) = payload.receipt_url {
        active.receipt_url = Set(Some(receipt_url));
    }
    if let Some(notes) = payload.notes {
        active.notes = Set(Some(notes));
    }
    let expense = active.update(&state.orm).await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.tenant_id),
        Some(user.user_id),
        "expense_update",
        Some("expenses"),
        Some(serde_json::json!({ "expense_id": expense.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Updated",
        expense_from_entity(expense),
        Some(Meta::empty()),
    ))
}

pub async fn delete_expense(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_allowed(user, Resource::Expenses, Action::Delete)?;

    let result = Expenses::delete_many()
        .filter(Column::Id.eq(id))
        .filter(Column::TenantId.eq(user.tenant_id))
        .exec(&state.orm)
        .await?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.tenant_id),
        Some(user.user_id),
        "expense_delete",
        Some("expenses"),
        Some(serde_json::json!({ "expense_id": id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

async fn find_scoped(state: &AppState, user: &AuthUser, id: Uuid) -> AppResult<ExpenseModel> {
    let expense = Expenses::find()
        .filter(Column::Id.eq(id))
        .filter(Column::TenantId.eq(user.tenant_id))
        .one(&state.orm)
        .await?;
    match expense {
        Some(e) => Ok(e),
        None => Err(AppError::NotFound),
    }
}

pub(crate) fn expense_from_entity(model: ExpenseModel) -> Expense {
    Expense {
        id: model.id,
        tenant_id: model.tenant_id,
        user_id: model.user_id,
        description: model.description,
        amount: model.amount,
        category: model.category,
        expense_date: model.expense_date,
        receipt_url: model.receipt_url,
        notes: model.notes,
        created_at: model.created_at.with_timezone(&Utc),
    }
}
