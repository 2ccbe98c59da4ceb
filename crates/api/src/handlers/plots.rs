//! Handlers for the public plot catalog.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use zemli_core::error::CoreError;
use zemli_core::pagination::PUBLIC_PAGE_SIZE;
use zemli_db::models::plot::{PlotListParams, PlotSort};
use zemli_db::repositories::PlotRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Width of the price/area bands used for similar-plot recommendations,
/// as a fraction of the source plot's value.
const SIMILARITY_BAND: f64 = 0.25;

/// GET /api/v1/plots
///
/// Paged public listing: visible, available plots only. Requesting a page
/// past the end of a non-empty result set is a 404, not an empty page.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<PlotListParams>,
) -> AppResult<impl IntoResponse> {
    let sort = parse_sort(params.sort.as_deref())?;

    let page = PlotRepo::list_public(&state.pool, &params, sort, PUBLIC_PAGE_SIZE)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Page",
            id: params.page.unwrap_or(1),
        }))?;

    Ok(Json(DataResponse { data: page }))
}

/// GET /api/v1/plots/options
///
/// Distinct regions, land uses, and land categories across eligible plots,
/// for populating the filter UI. Recomputed on every call.
pub async fn options(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let options = PlotRepo::filter_options(&state.pool).await?;

    Ok(Json(DataResponse { data: options }))
}

/// GET /api/v1/plots/{slug}
///
/// Full plot detail with ordered media, documents, cadastral numbers,
/// communications, and features. 404 for unknown or ineligible plots.
pub async fn detail(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    let detail = PlotRepo::detail_by_slug(&state.pool, &slug)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFoundBySlug {
                entity: "Plot",
                slug: slug.clone(),
            })
        })?;

    Ok(Json(DataResponse { data: detail }))
}

/// GET /api/v1/plots/{slug}/similar
///
/// Up to 3 eligible plots in the same region with price and area within
/// ±25% of the source plot, newest first. An empty list is a normal result.
pub async fn similar(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    let source = PlotRepo::detail_by_slug(&state.pool, &slug)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFoundBySlug {
                entity: "Plot",
                slug: slug.clone(),
            })
        })?;

    let plot = &source.plot;
    let similar = PlotRepo::similar(
        &state.pool,
        plot.id,
        &plot.region,
        band(plot.price),
        band(plot.area_m2),
    )
    .await?;

    Ok(Json(DataResponse { data: similar }))
}

/// The inclusive ±[`SIMILARITY_BAND`] range around `value`.
fn band(value: f64) -> (f64, f64) {
    (value * (1.0 - SIMILARITY_BAND), value * (1.0 + SIMILARITY_BAND))
}

/// Parse the `sort` query parameter, defaulting to newest-first.
pub fn parse_sort(sort: Option<&str>) -> Result<PlotSort, AppError> {
    match sort {
        None => Ok(PlotSort::default()),
        Some(s) => PlotSort::parse(s).ok_or_else(|| {
            AppError::BadRequest(format!(
                "Unknown sort '{s}'. Must be one of: newest, price_asc, price_desc, \
                 area_asc, area_desc"
            ))
        }),
    }
}
