//! Handlers for the singleton contact record: public read, admin save.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use zemli_core::error::CoreError;
use zemli_db::models::contact::ContactInput;
use zemli_db::repositories::ContactRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/contact
///
/// The company contact record. `data` is null until an admin saves one.
pub async fn get(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let contact = ContactRepo::find(&state.pool).await?;

    Ok(Json(DataResponse { data: contact }))
}

/// PUT /api/v1/admin/contact
///
/// Save the singleton contact record. Working hours must cover all 7 days;
/// a social-media sub-record with only blank fields is removed entirely.
pub async fn upsert(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<ContactInput>,
) -> AppResult<impl IntoResponse> {
    validate_working_hours(&input)?;

    ContactRepo::upsert(&state.pool, &input).await?;

    tracing::info!(user_id = admin.user_id, "Contact record saved");

    let contact = ContactRepo::find(&state.pool).await?;
    Ok(Json(DataResponse { data: contact }))
}

/// Exactly one row per day of week, all 7 days covered.
fn validate_working_hours(input: &ContactInput) -> Result<(), AppError> {
    if input.working_hours.len() != 7 {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Field 'working_hours' must contain exactly 7 rows, got {}",
            input.working_hours.len()
        ))));
    }

    let mut seen = [false; 7];
    for hours in &input.working_hours {
        let day = hours.day_of_week;
        if !(0..7).contains(&day) {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Field 'working_hours' has out-of-range day_of_week {day}"
            ))));
        }
        if seen[day as usize] {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Field 'working_hours' repeats day_of_week {day}"
            ))));
        }
        seen[day as usize] = true;
    }

    Ok(())
}
