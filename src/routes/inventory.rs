use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, post},
};
use uuid::Uuid;

use crate::{
    dto::inventory::{
        BulkInventoryRecordsRequest, CreateInventoryItemRequest, CreateInventoryRecordRequest,
        InventoryItemList, InventoryLatestList, InventoryRecordList, InventoryStats,
        UpdateInventoryItemRequest,
    },
    error::AppResult,
    middleware::auth::AuthUser,
    models::{InventoryItem, InventoryRecord},
    response::ApiResponse,
    routes::params::{InventoryLatestQuery, InventoryRecordQuery, ListQuery},
    services::inventory_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/items", get(list_items).post(create_item))
        .route("/items/{id}", get(get_item).patch(update_item))
        .route("/records", get(list_records).post(create_record))
        .route("/records/bulk", post(create_records_bulk))
        .route("/latest", get(latest_view))
        .route("/stats", get(inventory_stats))
}

#[utoipa::path(
    get,
    path = "/api/inventory/items",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20"),
    ),
    responses(
        (status = 200, description = "List inventory items", body = ApiResponse<InventoryItemList>)
    ),
    security(("bearer_auth" = [])),
    tag = "Inventory"
)]
pub async fn list_items(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<ApiResponse<InventoryItemList>>> {
    let resp = inventory_service::list_items(&state, &user, query.pagination).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/inventory/items/{id}",
    params(("id" = Uuid, Path, description = "Inventory item ID")),
    responses(
        (status = 200, description = "Get inventory item", body = ApiResponse<InventoryItem>),
        (status = 404, description = "Item not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Inventory"
)]
pub async fn get_item(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<InventoryItem>>> {
    let resp = inventory_service::get_item(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/inventory/items",
    request_body = CreateInventoryItemRequest,
    responses(
        (status = 201, description = "Create inventory item", body = ApiResponse<InventoryItem>),
        (status = 409, description = "Item id already exists"),
    ),
    security(("bearer_auth" = [])),
    tag = "Inventory"
)]
pub async fn create_item(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateInventoryItemRequest>,
) -> AppResult<Json<ApiResponse<InventoryItem>>> {
    let resp = inventory_service::create_item(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/inventory/items/{id}",
    params(("id" = Uuid, Path, description = "Inventory item ID")),
    request_body = UpdateInventoryItemRequest,
    responses(
        (status = 200, description = "Updated inventory item", body = ApiResponse<InventoryItem>),
        (status = 404, description = "Item not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Inventory"
)]
pub async fn update_item(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateInventoryItemRequest>,
) -> AppResult<Json<ApiResponse<InventoryItem>>> {
    let resp = inventory_service::update_item(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/inventory/records",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20"),
        ("inventory_item_id" = Option<Uuid>, Query, description = "Filter by item"),
        ("start_date" = Option<String>, Query, description = "Inclusive lower bound (YYYY-MM-DD)"),
        ("end_date" = Option<String>, Query, description = "Inclusive upper bound (YYYY-MM-DD)"),
    ),
    responses(
        (status = 200, description = "List inventory records", body = ApiResponse<InventoryRecordList>)
    ),
    security(("bearer_auth" = [])),
    tag = "Inventory"
)]
pub async fn list_records(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<InventoryRecordQuery>,
) -> AppResult<Json<ApiResponse<InventoryRecordList>>> {
    let resp = inventory_service::list_records(&state, &user, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/inventory/records",
    request_body = CreateInventoryRecordRequest,
    responses(
        (status = 201, description = "Append an inventory record", body = ApiResponse<InventoryRecord>),
        (status = 400, description = "Invalid payload"),
    ),
    security(("bearer_auth" = [])),
    tag = "Inventory"
)]
pub async fn create_record(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateInventoryRecordRequest>,
) -> AppResult<Json<ApiResponse<InventoryRecord>>> {
    let resp = inventory_service::create_record(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/inventory/records/bulk",
    request_body = BulkInventoryRecordsRequest,
    responses(
        (status = 201, description = "Append a batch of records atomically", body = ApiResponse<InventoryRecordList>),
        (status = 400, description = "Invalid entry; nothing persisted"),
    ),
    security(("bearer_auth" = [])),
    tag = "Inventory"
)]
pub async fn create_records_bulk(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<BulkInventoryRecordsRequest>,
) -> AppResult<Json<ApiResponse<InventoryRecordList>>> {
    let resp = inventory_service::create_records_bulk(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/inventory/latest",
    params(
        ("date" = Option<String>, Query, description = "As-of date (YYYY-MM-DD), defaults to all records"),
    ),
    responses(
        (status = 200, description = "Latest quantity per item", body = ApiResponse<InventoryLatestList>)
    ),
    security(("bearer_auth" = [])),
    tag = "Inventory"
)]
pub async fn latest_view(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<InventoryLatestQuery>,
) -> AppResult<Json<ApiResponse<InventoryLatestList>>> {
    let resp = inventory_service::latest_view(&state, &user, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/inventory/stats",
    responses(
        (status = 200, description = "Inventory counters", body = ApiResponse<InventoryStats>)
    ),
    security(("bearer_auth" = [])),
    tag = "Inventory"
)]
pub async fn inventory_stats(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<InventoryStats>>> {
    let resp = inventory_service::inventory_stats(&state, &user).await?;
    Ok(Json(resp))
}
