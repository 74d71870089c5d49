use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use uuid::Uuid;

use crate::{
    dto::catalog::{CreateSizeRequest, SizeList, UpdateSizeRequest},
    error::AppResult,
    middleware::auth::AuthUser,
    models::Size,
    response::ApiResponse,
    routes::params::ListQuery,
    services::size_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_sizes).post(create_size))
        .route("/{id}", get(get_size).patch(update_size).delete(delete_size))
}

#[utoipa::path(
    get,
    path = "/api/sizes",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20"),
    ),
    responses(
        (status = 200, description = "List sizes", body = ApiResponse<SizeList>)
    ),
    security(("bearer_auth" = [])),
    tag = "Sizes"
)]
pub async fn list_sizes(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<ApiResponse<SizeList>>> {
    let resp = size_service::list_sizes(&state, &user, query.pagination).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/sizes/{id}",
    params(("id" = Uuid, Path, description = "Size ID")),
    responses(
        (status = 200, description = "Get size", body = ApiResponse<Size>),
        (status = 404, description = "Size not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Sizes"
)]
pub async fn get_size(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<Size>>> {
    let resp = size_service::get_size(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/sizes",
    request_body = CreateSizeRequest,
    responses(
        (status = 201, description = "Create size", body = ApiResponse<Size>),
        (status = 409, description = "Size id already exists"),
    ),
    security(("bearer_auth" = [])),
    tag = "Sizes"
)]
pub async fn create_size(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateSizeRequest>,
) -> AppResult<Json<ApiResponse<Size>>> {
    let resp = size_service::create_size(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/sizes/{id}",
    params(("id" = Uuid, Path, description = "Size ID")),
    request_body = UpdateSizeRequest,
    responses(
        (status = 200, description = "Updated size", body = ApiResponse<Size>),
        (status = 404, description = "Size not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Sizes"
)]
pub async fn update_size(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateSizeRequest>,
) -> AppResult<Json<ApiResponse<Size>>> {
    let resp = size_service::update_size(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/sizes/{id}",
    params(("id" = Uuid, Path, description = "Size ID")),
    responses(
        (status = 200, description = "Deleted size"),
        (status = 404, description = "Size not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Sizes"
)]
pub async fn delete_size(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = size_service::delete_size(&state, &user, id).await?;
    Ok(Json(resp))
}
