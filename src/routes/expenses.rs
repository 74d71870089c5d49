use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use uuid::Uuid;

use crate::{
    dto::expenses::{CreateExpenseRequest, ExpenseList, UpdateExpenseRequest},
    error::AppResult,
    middleware::auth::AuthUser,
    models::Expense,
    response::ApiResponse,
    routes::params::ExpenseListQuery,
    services::expense_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_expenses).post(create_expense))
        .route(
            "/{id}",
            get(get_expense).patch(update_expense).delete(delete_expense),
        )
}

#[utoipa::path(
    get,
    path = "/api/expenses",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20"),
        ("start_date" = Option<String>, Query, description = "Inclusive lower bound (YYYY-MM-DD)"),
        ("end_date" = Option<String>, Query, description = "Inclusive upper bound (YYYY-MM-DD)"),
        ("category" = Option<String>, Query, description = "Filter by category"),
    ),
    responses(
        (status = 200, description = "List expenses", body = ApiResponse<ExpenseList>)
    ),
    security(("bearer_auth" = [])),
    tag = "Expenses"
)]
pub async fn list_expenses(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<ExpenseListQuery>,
) -> AppResult<Json<ApiResponse<ExpenseList>>> {
    let resp = expense_service::list_expenses(&state, &user, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/expenses/{id}",
    params(("id" = Uuid, Path, description = "Expense ID")),
    responses(
        (status = 200, description = "Get expense", body = ApiResponse<Expense>),
        (status = 404, description = "Expense not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Expenses"
)]
pub async fn get_expense(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<Expense>>> {
    let resp = expense_service::get_expense(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/expenses",
    request_body = CreateExpenseRequest,
    responses(
        (status = 201, description = "Record an expense", body = ApiResponse<Expense>),
        (status = 400, description = "Invalid payload"),
    ),
    security(("bearer_auth" = [])),
    tag = "Expenses"
)]
pub async fn create_expense(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateExpenseRequest>,
) -> AppResult<Json<ApiResponse<Expense>>> {
    let resp = expense_service::create_expense(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/expenses/{id}",
    params(("id" = Uuid, Path, description = "Expense ID")),
    request_body = UpdateExpenseRequest,
    responses(
        (status = 200, description = "Updated expense", body = ApiResponse<Expense>),
        (status = 404, description = "Expense not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Expenses"
)]
pub async fn update_expense(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateExpenseRequest>,
) -> AppResult<Json<ApiResponse<Expense>>> {
    let resp = expense_service::update_expense(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/expenses/{id}",
    params(("id" = Uuid, Path, description = "Expense ID")),
    responses(
        (status = 200, description = "Deleted expense"),
        (status = 404, description = "Expense not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Expenses"
)]
pub async fn delete_expense(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = expense_service::delete_expense(&state, &user, id).await?;
    Ok(Json(resp))
}
