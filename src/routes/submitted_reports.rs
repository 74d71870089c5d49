use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use uuid::Uuid;

use crate::{
    dto::submitted_reports::{
        CreateSubmittedReportRequest, SubmittedReportDetail, SubmittedReportList,
        SubmittedReportStats,
    },
    error::AppResult,
    middleware::auth::AuthUser,
    models::SubmittedReport,
    response::ApiResponse,
    routes::params::SubmittedReportQuery,
    services::submitted_report_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_reports).post(create_report))
        .route("/stats", get(report_stats))
        .route("/{id}", get(get_report))
}

#[utoipa::path(
    get,
    path = "/api/submitted-reports",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20"),
        ("report_date" = Option<String>, Query, description = "Exact report date (YYYY-MM-DD)"),
        ("start_date" = Option<String>, Query, description = "Inclusive lower bound (YYYY-MM-DD)"),
        ("end_date" = Option<String>, Query, description = "Inclusive upper bound (YYYY-MM-DD)"),
        ("user_id" = Option<Uuid>, Query, description = "Filter by submitting user"),
    ),
    responses(
        (status = 200, description = "List submitted reports", body = ApiResponse<SubmittedReportList>)
    ),
    security(("bearer_auth" = [])),
    tag = "SubmittedReports"
)]
pub async fn list_reports(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<SubmittedReportQuery>,
) -> AppResult<Json<ApiResponse<SubmittedReportList>>> {
    let resp = submitted_report_service::list_reports(&state, &user, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/submitted-reports",
    request_body = CreateSubmittedReportRequest,
    responses(
        (status = 201, description = "Store a report snapshot", body = ApiResponse<SubmittedReport>),
        (status = 400, description = "Invalid payload"),
    ),
    security(("bearer_auth" = [])),
    tag = "SubmittedReports"
)]
pub async fn create_report(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateSubmittedReportRequest>,
) -> AppResult<Json<ApiResponse<SubmittedReport>>> {
    let resp = submitted_report_service::create_report(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/submitted-reports/stats",
    responses(
        (status = 200, description = "Report counters", body = ApiResponse<SubmittedReportStats>)
    ),
    security(("bearer_auth" = [])),
    tag = "SubmittedReports"
)]
pub async fn report_stats(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<SubmittedReportStats>>> {
    let resp = submitted_report_service::report_stats(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/submitted-reports/{id}",
    params(("id" = Uuid, Path, description = "Report ID")),
    responses(
        (status = 200, description = "Snapshot plus live referenced rows", body = ApiResponse<SubmittedReportDetail>),
        (status = 404, description = "Report not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "SubmittedReports"
)]
pub async fn get_report(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<SubmittedReportDetail>>> {
    let resp = submitted_report_service::get_report(&state, &user, id).await?;
    Ok(Json(resp))
}
