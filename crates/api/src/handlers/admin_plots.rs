//! Admin handlers for plot management: grid, create/update with derived
//! slugs, visibility toggle, and delete.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use zemli_core::error::CoreError;
use zemli_core::pagination::ADMIN_PAGE_SIZE;
use zemli_core::slug::slugify;
use zemli_core::types::DbId;
use zemli_db::models::plot::{PlotInput, PlotListParams, PlotStatus};
use zemli_db::repositories::PlotRepo;

use super::plots::parse_sort;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Response body for the visibility toggle.
#[derive(Debug, Serialize)]
pub struct VisibilityResponse {
    pub id: DbId,
    pub is_visible: bool,
}

/// GET /api/v1/admin/plots
///
/// Paged grid over all plots regardless of visibility, with status usable
/// as a filter.
pub async fn list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<PlotListParams>,
) -> AppResult<impl IntoResponse> {
    let sort = parse_sort(params.sort.as_deref())?;
    if let Some(status) = params.status.as_deref() {
        if PlotStatus::parse(status).is_none() {
            return Err(AppError::BadRequest(format!(
                "Unknown status '{status}'. Must be one of: available, reserved, sold"
            )));
        }
    }

    let page = PlotRepo::list_admin(&state.pool, &params, sort, ADMIN_PAGE_SIZE)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Page",
            id: params.page.unwrap_or(1),
        }))?;

    Ok(Json(DataResponse { data: page }))
}

/// GET /api/v1/admin/plots/{id}
pub async fn detail(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let detail = PlotRepo::detail_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Plot", id }))?;

    Ok(Json(DataResponse { data: detail }))
}

/// POST /api/v1/admin/plots
///
/// Create a plot. The slug is derived from the title server-side and must
/// be unique across all plots.
pub async fn create(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<PlotInput>,
) -> AppResult<impl IntoResponse> {
    let slug = validated_slug(&state, &input, None).await?;

    let plot = PlotRepo::create(&state.pool, &slug, &input).await?;

    tracing::info!(plot_id = plot.id, slug = %plot.slug, user_id = admin.user_id, "Plot created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: plot })))
}

/// PUT /api/v1/admin/plots/{id}
///
/// Full update. Cadastral numbers, communications, and features are
/// replaced wholesale; media and documents are reconciled by id.
pub async fn update(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<PlotInput>,
) -> AppResult<impl IntoResponse> {
    let slug = validated_slug(&state, &input, Some(id)).await?;

    let plot = PlotRepo::update(&state.pool, id, &slug, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Plot", id }))?;

    tracing::info!(plot_id = plot.id, user_id = admin.user_id, "Plot updated");

    Ok(Json(DataResponse { data: plot }))
}

/// POST /api/v1/admin/plots/{id}/toggle-visibility
pub async fn toggle_visibility(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let is_visible = PlotRepo::toggle_visibility(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Plot", id }))?;

    tracing::info!(plot_id = id, is_visible, user_id = admin.user_id, "Plot visibility toggled");

    Ok(Json(DataResponse {
        data: VisibilityResponse { id, is_visible },
    }))
}

/// DELETE /api/v1/admin/plots/{id}
///
/// Delete a plot; its collections cascade away with it.
pub async fn delete(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = PlotRepo::delete(&state.pool, id).await?;

    if !deleted {
        return Err(AppError::Core(CoreError::NotFound { entity: "Plot", id }));
    }

    tracing::info!(plot_id = id, user_id = admin.user_id, "Plot deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// Validate the input and derive a unique slug from the title.
///
/// Numeric fields must be non-negative; the derived slug must be non-empty
/// and not owned by any other plot (`exclude_id` exempts the plot being
/// updated).
async fn validated_slug(
    state: &AppState,
    input: &PlotInput,
    exclude_id: Option<DbId>,
) -> Result<String, AppError> {
    for (field, value) in [
        ("area_m2", input.area_m2),
        ("price", input.price),
        ("price_per_m2", input.price_per_m2),
    ] {
        if value < 0.0 {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Field '{field}' must be non-negative"
            ))));
        }
    }

    if let Some(status) = input.status.as_deref() {
        if PlotStatus::parse(status).is_none() {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Unknown status '{status}'. Must be one of: available, reserved, sold"
            ))));
        }
    }

    let slug = slugify(&input.title);
    if slug.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Field 'title' must contain at least one letter or digit".into(),
        )));
    }

    if PlotRepo::slug_exists(&state.pool, &slug, exclude_id).await? {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "A plot with slug '{slug}' already exists"
        ))));
    }

    Ok(slug)
}
