//! Admin handlers for quiz management. Question sets are replaced
//! wholesale on every save; activation swaps are transactional.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use zemli_core::error::CoreError;
use zemli_core::quiz::QuestionType;
use zemli_core::types::DbId;
use zemli_db::models::quiz::QuizInput;
use zemli_db::repositories::QuizRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/admin/quizzes
pub async fn list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let quizzes = QuizRepo::list(&state.pool).await?;

    Ok(Json(DataResponse { data: quizzes }))
}

/// GET /api/v1/admin/quizzes/{id}
pub async fn detail(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let detail = QuizRepo::detail_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Quiz", id }))?;

    Ok(Json(DataResponse { data: detail }))
}

/// POST /api/v1/admin/quizzes
///
/// Create a quiz with its question set. Saving with `is_active = true`
/// deactivates every other quiz in the same transaction.
pub async fn create(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<QuizInput>,
) -> AppResult<impl IntoResponse> {
    validate(&input)?;

    let detail = QuizRepo::create(&state.pool, &input).await?;

    tracing::info!(quiz_id = detail.quiz.id, user_id = admin.user_id, "Quiz created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: detail })))
}

/// PUT /api/v1/admin/quizzes/{id}
///
/// Full update; the question set is deleted and recreated, never diffed.
pub async fn update(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<QuizInput>,
) -> AppResult<impl IntoResponse> {
    validate(&input)?;

    let detail = QuizRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Quiz", id }))?;

    tracing::info!(quiz_id = id, user_id = admin.user_id, "Quiz updated");

    Ok(Json(DataResponse { data: detail }))
}

/// POST /api/v1/admin/quizzes/{id}/activate
///
/// Make this the single active quiz.
pub async fn activate(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let activated = QuizRepo::activate(&state.pool, id).await?;

    if !activated {
        return Err(AppError::Core(CoreError::NotFound { entity: "Quiz", id }));
    }

    tracing::info!(quiz_id = id, user_id = admin.user_id, "Quiz activated");

    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/admin/quizzes/{id}
///
/// Delete a quiz. Deleting the active quiz leaves no quiz active.
pub async fn delete(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = QuizRepo::delete(&state.pool, id).await?;

    if !deleted {
        return Err(AppError::Core(CoreError::NotFound { entity: "Quiz", id }));
    }

    tracing::info!(quiz_id = id, user_id = admin.user_id, "Quiz deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// Every question's declared type must be known; choice questions need at
/// least one answer option.
fn validate(input: &QuizInput) -> Result<(), AppError> {
    if input.title.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Missing required field(s): title".into(),
        )));
    }

    for (index, question) in input.questions.iter().enumerate() {
        let question_type = QuestionType::parse(&question.question_type).ok_or_else(|| {
            AppError::Core(CoreError::Validation(format!(
                "Question {index}: unknown type '{}'. Must be one of: single, multiple, \
                 text, phone, email",
                question.question_type
            )))
        })?;

        if matches!(question_type, QuestionType::Single | QuestionType::Multiple)
            && question.answers.is_empty()
        {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Question {index}: choice questions need at least one answer option"
            ))));
        }
    }

    Ok(())
}
