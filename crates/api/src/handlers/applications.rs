//! Handler for public application intake (contact and plot inquiries).
//!
//! Quiz-origin applications go through the quiz submission endpoint, which
//! owns dedup and promo codes; this generic path rejects them.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use zemli_core::error::CoreError;
use zemli_db::models::application::{ApplicationType, CreateApplication};
use zemli_db::repositories::{ApplicationRepo, PlotRepo};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/applications
///
/// Create a contact- or plot-origin lead. Status is always `new`; any
/// status a caller tries to pass is not even deserialized.
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateApplication>,
) -> AppResult<impl IntoResponse> {
    validate(&state, &input).await?;

    let application = ApplicationRepo::create(&state.pool, &input).await?;

    tracing::info!(
        application_id = application.id,
        app_type = %application.app_type,
        "Application created",
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse { data: application }),
    ))
}

/// Field validation per originating channel.
async fn validate(state: &AppState, input: &CreateApplication) -> Result<(), AppError> {
    let mut missing = Vec::new();
    if input.name.trim().is_empty() {
        missing.push("name");
    }
    if input.phone.trim().is_empty() {
        missing.push("phone");
    }
    if input.email.trim().is_empty() {
        missing.push("email");
    }
    if !missing.is_empty() {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Missing required field(s): {}",
            missing.join(", ")
        ))));
    }

    let app_type = ApplicationType::parse(&input.app_type).ok_or_else(|| {
        AppError::Core(CoreError::Validation(format!(
            "Unknown app_type '{}'. Must be one of: plot, contact",
            input.app_type
        )))
    })?;

    match app_type {
        ApplicationType::Quiz => Err(AppError::Core(CoreError::Validation(
            "Quiz applications must be submitted through the quiz endpoint".into(),
        ))),
        ApplicationType::Contact => {
            if input.message.as_deref().is_none_or(|m| m.trim().is_empty()) {
                return Err(AppError::Core(CoreError::Validation(
                    "Missing required field(s): message".into(),
                )));
            }
            Ok(())
        }
        ApplicationType::Plot => {
            let plot_id = input.plot_id.ok_or_else(|| {
                AppError::Core(CoreError::Validation(
                    "Missing required field(s): plot_id".into(),
                ))
            })?;
            if PlotRepo::find_by_id(&state.pool, plot_id).await?.is_none() {
                return Err(AppError::Core(CoreError::NotFound {
                    entity: "Plot",
                    id: plot_id,
                }));
            }
            Ok(())
        }
    }
}
