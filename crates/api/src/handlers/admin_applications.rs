//! Admin handlers for reviewing applications: the grid, detail view,
//! status transitions, and comment threads.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use zemli_core::error::CoreError;
use zemli_core::pagination::ADMIN_PAGE_SIZE;
use zemli_core::types::DbId;
use zemli_db::models::application::{ApplicationListParams, ApplicationStatus, ApplicationType};
use zemli_db::repositories::ApplicationRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `PUT /admin/applications/{id}/status`.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

/// Request body for `POST /admin/applications/{id}/comments`.
#[derive(Debug, Deserialize)]
pub struct AddCommentRequest {
    pub body: String,
}

/// GET /api/v1/admin/applications
///
/// Paged grid, newest first, filterable by type and status.
pub async fn list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<ApplicationListParams>,
) -> AppResult<impl IntoResponse> {
    if let Some(app_type) = params.app_type.as_deref() {
        if ApplicationType::parse(app_type).is_none() {
            return Err(AppError::BadRequest(format!(
                "Unknown app_type '{app_type}'. Must be one of: quiz, plot, contact"
            )));
        }
    }
    if let Some(status) = params.status.as_deref() {
        if ApplicationStatus::parse(status).is_none() {
            return Err(AppError::BadRequest(format!(
                "Unknown status '{status}'. Must be one of: new, in_progress, completed, rejected"
            )));
        }
    }

    let page = ApplicationRepo::list(&state.pool, &params, ADMIN_PAGE_SIZE)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Page",
            id: params.page.unwrap_or(1),
        }))?;

    Ok(Json(DataResponse { data: page }))
}

/// GET /api/v1/admin/applications/{id}
///
/// The application with its comment thread and originating plot/quiz titles.
pub async fn detail(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let detail = ApplicationRepo::detail(&state.pool, id).await?.ok_or(
        AppError::Core(CoreError::NotFound {
            entity: "Application",
            id,
        }),
    )?;

    Ok(Json(DataResponse { data: detail }))
}

/// PUT /api/v1/admin/applications/{id}/status
///
/// Overwrite the status. Any status is reachable from any other; there is
/// deliberately no transition guard.
pub async fn update_status(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateStatusRequest>,
) -> AppResult<impl IntoResponse> {
    let status = ApplicationStatus::parse(&input.status).ok_or_else(|| {
        AppError::Core(CoreError::Validation(format!(
            "Unknown status '{}'. Must be one of: new, in_progress, completed, rejected",
            input.status
        )))
    })?;

    let application = ApplicationRepo::update_status(&state.pool, id, status.as_str())
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Application",
            id,
        }))?;

    tracing::info!(
        application_id = id,
        status = %application.status,
        user_id = admin.user_id,
        "Application status updated",
    );

    Ok(Json(DataResponse { data: application }))
}

/// POST /api/v1/admin/applications/{id}/comments
///
/// Append a comment to the thread. Comments are never edited or deleted.
pub async fn add_comment(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<AddCommentRequest>,
) -> AppResult<impl IntoResponse> {
    if input.body.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Missing required field(s): body".into(),
        )));
    }

    let comment = ApplicationRepo::add_comment(&state.pool, id, admin.user_id, &input.body)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Application",
            id,
        }))?;

    tracing::info!(
        application_id = id,
        comment_id = comment.id,
        user_id = admin.user_id,
        "Comment added",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: comment })))
}
