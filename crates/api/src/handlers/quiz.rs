//! Handlers for the public quiz funnel: serving the active quiz and
//! accepting deduplicated submissions.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use zemli_core::error::CoreError;
use zemli_core::promo::generate_promo_code;
use zemli_core::quiz::{validate_answers, QuestionSpec, QuestionType};
use zemli_db::models::quiz::{QuizDetail, SubmitQuiz};
use zemli_db::repositories::{ApplicationRepo, QuizRepo};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Response body for `POST /quiz/submissions`.
#[derive(Debug, Serialize)]
pub struct SubmissionResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub promo_code: Option<String>,
    pub already_exists: bool,
}

/// GET /api/v1/quiz/active
///
/// The active quiz with ordered questions and answers. `data` is null when
/// no quiz is active; clients hide the quiz widget in that case.
pub async fn get_active(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let quiz = QuizRepo::find_active(&state.pool).await?;

    Ok(Json(DataResponse { data: quiz }))
}

/// POST /api/v1/quiz/submissions
///
/// One quiz completion per phone number per quiz: a repeat submission
/// returns `already_exists` and writes nothing. First submissions create
/// the lead, append the audit row, and issue a promo code.
pub async fn submit(
    State(state): State<AppState>,
    Json(input): Json<SubmitQuiz>,
) -> AppResult<impl IntoResponse> {
    validate_contact_fields(&input)?;

    let quiz = QuizRepo::detail_by_id(&state.pool, input.quiz_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Quiz",
            id: input.quiz_id,
        }))?;

    let questions = question_specs(&quiz)?;
    validate_answers(&questions, &input.answers).map_err(AppError::Core)?;

    // Cheap sequential dedup; the unique index closes the concurrent race.
    if ApplicationRepo::find_quiz_duplicate(&state.pool, input.quiz_id, &input.phone)
        .await?
        .is_some()
    {
        return Ok(Json(SubmissionResponse {
            success: false,
            promo_code: None,
            already_exists: true,
        }));
    }

    let answers = serde_json::to_value(&input.answers)
        .map_err(|e| AppError::InternalError(format!("Answer serialization error: {e}")))?;
    let promo_code = generate_promo_code();

    let created = ApplicationRepo::submit_quiz(
        &state.pool,
        input.quiz_id,
        &input.name,
        &input.phone,
        &input.email,
        &answers,
        &promo_code,
    )
    .await?;

    if !created {
        return Ok(Json(SubmissionResponse {
            success: false,
            promo_code: None,
            already_exists: true,
        }));
    }

    tracing::info!(quiz_id = input.quiz_id, "Quiz submission accepted");

    Ok(Json(SubmissionResponse {
        success: true,
        promo_code: Some(promo_code),
        already_exists: false,
    }))
}

/// Name, phone, and email are mandatory for every submission.
fn validate_contact_fields(input: &SubmitQuiz) -> Result<(), AppError> {
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
    if missing.is_empty() {
        Ok(())
    } else {
        Err(AppError::Core(CoreError::Validation(format!(
            "Missing required field(s): {}",
            missing.join(", ")
        ))))
    }
}

/// Project the loaded quiz into the validator's question view.
fn question_specs(quiz: &QuizDetail) -> Result<Vec<QuestionSpec>, AppError> {
    quiz.questions
        .iter()
        .map(|detail| {
            let question_type = QuestionType::parse(&detail.question.question_type)
                .ok_or_else(|| {
                    AppError::InternalError(format!(
                        "Stored question {} has unknown type '{}'",
                        detail.question.id, detail.question.question_type
                    ))
                })?;
            Ok(QuestionSpec {
                id: detail.question.id,
                question_type,
                is_required: detail.question.is_required,
                answer_ids: detail.answers.iter().map(|a| a.id).collect(),
            })
        })
        .collect()
}
