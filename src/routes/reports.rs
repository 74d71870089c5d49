use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};

use crate::{
    dto::reports::AnalyticsReport,
    error::AppResult,
    middleware::auth::AuthUser,
    response::ApiResponse,
    routes::params::AnalyticsQuery,
    services::report_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/analytics", get(analytics))
}

#[utoipa::path(
    get,
    path = "/api/reports/analytics",
    params(
        ("period" = String, Query, description = "daily | weekly | monthly | yearly | overall | custom"),
        ("start_date" = Option<String>, Query, description = "Required for custom (YYYY-MM-DD)"),
        ("end_date" = Option<String>, Query, description = "Required for custom (YYYY-MM-DD)"),
    ),
    responses(
        (status = 200, description = "Aggregated sales and expense figures", body = ApiResponse<AnalyticsReport>),
        (status = 400, description = "Invalid period"),
    ),
    security(("bearer_auth" = [])),
    tag = "Reports"
)]
pub async fn analytics(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<AnalyticsQuery>,
) -> AppResult<Json<ApiResponse<AnalyticsReport>>> {
    let resp = report_service::analytics(&state, &user, query).await?;
    Ok(Json(resp))
}
