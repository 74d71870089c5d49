use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, patch},
};
use uuid::Uuid;

use crate::{
    dto::transactions::{
        CreateTransactionRequest, TransactionList, TransactionStats, TransactionWithItems,
        UpdateVoidStatusRequest,
    },
    error::AppResult,
    middleware::auth::AuthUser,
    models::Transaction,
    response::ApiResponse,
    routes::params::TransactionListQuery,
    services::transaction_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_transactions).post(create_transaction))
        .route("/stats", get(transaction_stats))
        .route("/{id}", get(get_transaction))
        .route("/{id}/void-status", patch(update_void_status))
}

#[utoipa::path(
    get,
    path = "/api/transactions",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20"),
        ("start_date" = Option<String>, Query, description = "Inclusive lower bound (YYYY-MM-DD)"),
        ("end_date" = Option<String>, Query, description = "Inclusive upper bound (YYYY-MM-DD)"),
        ("payment_method" = Option<String>, Query, description = "Filter by payment method"),
        ("payment_status" = Option<String>, Query, description = "Filter by payment status"),
    ),
    responses(
        (status = 200, description = "List transactions", body = ApiResponse<TransactionList>)
    ),
    security(("bearer_auth" = [])),
    tag = "Transactions"
)]
pub async fn list_transactions(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<TransactionListQuery>,
) -> AppResult<Json<ApiResponse<TransactionList>>> {
    let resp = transaction_service::list_transactions(&state, &user, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/transactions/stats",
    responses(
        (status = 200, description = "Sales counters", body = ApiResponse<TransactionStats>)
    ),
    security(("bearer_auth" = [])),
    tag = "Transactions"
)]
pub async fn transaction_stats(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<TransactionStats>>> {
    let resp = transaction_service::transaction_stats(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/transactions/{id}",
    params(("id" = Uuid, Path, description = "Transaction ID")),
    responses(
        (status = 200, description = "Transaction with items", body = ApiResponse<TransactionWithItems>),
        (status = 404, description = "Transaction not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Transactions"
)]
pub async fn get_transaction(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<TransactionWithItems>>> {
    let resp = transaction_service::get_transaction(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/transactions",
    request_body = CreateTransactionRequest,
    responses(
        (status = 201, description = "Record a sale", body = ApiResponse<TransactionWithItems>),
        (status = 400, description = "Invalid payload"),
    ),
    security(("bearer_auth" = [])),
    tag = "Transactions"
)]
pub async fn create_transaction(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateTransactionRequest>,
) -> AppResult<Json<ApiResponse<TransactionWithItems>>> {
    let resp = transaction_service::create_transaction(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/transactions/{id}/void-status",
    params(("id" = Uuid, Path, description = "Transaction ID")),
    request_body = UpdateVoidStatusRequest,
    responses(
        (status = 200, description = "Void status updated", body = ApiResponse<Transaction>),
        (status = 400, description = "Invalid transition"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Transaction not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Transactions"
)]
pub async fn update_void_status(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateVoidStatusRequest>,
) -> AppResult<Json<ApiResponse<Transaction>>> {
    let resp = transaction_service::update_void_status(&state, &user, id, payload).await?;
    Ok(Json(resp))
}
