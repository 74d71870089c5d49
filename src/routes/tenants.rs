use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};

use crate::{
    error::AppResult,
    middleware::auth::AuthUser,
    models::Tenant,
    response::ApiResponse,
    services::tenant_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/slug/{slug}", get(get_by_slug))
        .route("/me", get(get_me))
}

#[utoipa::path(
    get,
    path = "/api/tenants/slug/{slug}",
    params(
        ("slug" = String, Path, description = "Store slug")
    ),
    responses(
        (status = 200, description = "Resolve a store slug", body = ApiResponse<Tenant>),
        (status = 404, description = "Unknown or inactive store"),
    ),
    tag = "Tenants"
)]
pub async fn get_by_slug(
    Path(slug): Path<String>,
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Tenant>>> {
    let resp = tenant_service::get_by_slug(&state, &slug).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/tenants/me",
    responses(
        (status = 200, description = "The caller's tenant", body = ApiResponse<Tenant>),
    ),
    security(("bearer_auth" = [])),
    tag = "Tenants"
)]
pub async fn get_me(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<Tenant>>> {
    let resp = tenant_service::get_me(&state, &user).await?;
    Ok(Json(resp))
}
