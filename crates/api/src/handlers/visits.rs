//! Page-visit recording and the admin traffic stats view.

use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use zemli_db::models::page_visit::{CreatePageVisit, VisitStatsParams};
use zemli_db::repositories::PageVisitRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /visits`.
#[derive(Debug, Deserialize)]
pub struct RecordVisitRequest {
    pub path: String,
    pub referer: Option<String>,
}

/// POST /api/v1/visits
///
/// Append a page visit. User agent and client IP are taken from request
/// headers, not the body. Rows are never updated or deleted.
pub async fn record(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(input): Json<RecordVisitRequest>,
) -> AppResult<impl IntoResponse> {
    if input.path.trim().is_empty() {
        return Err(AppError::BadRequest("path must not be empty".into()));
    }

    let user_agent = header_value(&headers, "user-agent");
    let ip = header_value(&headers, "x-forwarded-for")
        .map(|forwarded| forwarded.split(',').next().unwrap_or("").trim().to_string());

    let visit = CreatePageVisit {
        path: input.path,
        user_agent,
        ip,
        referer: input.referer,
    };
    PageVisitRepo::record(&state.pool, &visit).await?;

    Ok(StatusCode::CREATED)
}

/// GET /api/v1/admin/visits/stats
///
/// Total and per-path visit counts over an optional date range.
pub async fn stats(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<VisitStatsParams>,
) -> AppResult<impl IntoResponse> {
    let stats = PageVisitRepo::stats(&state.pool, params.from, params.to).await?;

    Ok(Json(DataResponse { data: stats }))
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}
