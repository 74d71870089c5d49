use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use uuid::Uuid;

use crate::{
    dto::catalog::{AddonList, CreateAddonRequest, UpdateAddonRequest},
    error::AppResult,
    middleware::auth::AuthUser,
    models::Addon,
    response::ApiResponse,
    routes::params::ListQuery,
    services::addon_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_addons).post(create_addon))
        .route(
            "/{id}",
            get(get_addon).patch(update_addon).delete(delete_addon),
        )
}

#[utoipa::path(
    get,
    path = "/api/addons",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20"),
    ),
    responses(
        (status = 200, description = "List addons", body = ApiResponse<AddonList>)
    ),
    security(("bearer_auth" = [])),
    tag = "Addons"
)]
pub async fn list_addons(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<ApiResponse<AddonList>>> {
    let resp = addon_service::list_addons(&state, &user, query.pagination).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/addons/{id}",
    params(("id" = Uuid, Path, description = "Addon ID")),
    responses(
        (status = 200, description = "Get addon", body = ApiResponse<Addon>),
        (status = 404, description = "Addon not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Addons"
)]
pub async fn get_addon(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<Addon>>> {
    let resp = addon_service::get_addon(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/addons",
    request_body = CreateAddonRequest,
    responses(
        (status = 201, description = "Create addon", body = ApiResponse<Addon>),
        (status = 409, description = "Addon id already exists"),
    ),
    security(("bearer_auth" = [])),
    tag = "Addons"
)]
pub async fn create_addon(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateAddonRequest>,
) -> AppResult<Json<ApiResponse<Addon>>> {
    let resp = addon_service::create_addon(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/addons/{id}",
    params(("id" = Uuid, Path, description = "Addon ID")),
    request_body = UpdateAddonRequest,
    responses(
        (status = 200, description = "Updated addon", body = ApiResponse<Addon>),
        (status = 404, description = "Addon not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Addons"
)]
pub async fn update_addon(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateAddonRequest>,
) -> AppResult<Json<ApiResponse<Addon>>> {
    let resp = addon_service::update_addon(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/addons/{id}",
    params(("id" = Uuid, Path, description = "Addon ID")),
    responses(
        (status = 200, description = "Deleted addon"),
        (status = 404, description = "Addon not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Addons"
)]
pub async fn delete_addon(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = addon_service::delete_addon(&state, &user, id).await?;
    Ok(Json(resp))
}
