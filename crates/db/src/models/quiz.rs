//! Quiz entity models and DTOs.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use zemli_core::quiz::AnswerValue;
use zemli_core::types::{DbId, Timestamp};

/// A row from the `quizzes` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Quiz {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `quiz_questions` table, ordered by `sort_order`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct QuizQuestion {
    pub id: DbId,
    pub quiz_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub question_type: String,
    pub is_required: bool,
    pub sort_order: i32,
}

/// A row from the `quiz_answers` table (an answer option, not a submission).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct QuizAnswer {
    pub id: DbId,
    pub question_id: DbId,
    pub label: String,
    pub image_url: Option<String>,
    pub sort_order: i32,
}

/// A question with its ordered answer options.
#[derive(Debug, Serialize)]
pub struct QuestionDetail {
    #[serde(flatten)]
    pub question: QuizQuestion,
    pub answers: Vec<QuizAnswer>,
}

/// A quiz with its ordered questions and their answer options.
#[derive(Debug, Serialize)]
pub struct QuizDetail {
    #[serde(flatten)]
    pub quiz: Quiz,
    pub questions: Vec<QuestionDetail>,
}

/// Incoming answer option for [`QuestionInput`].
#[derive(Debug, Deserialize)]
pub struct AnswerInput {
    pub label: String,
    pub image_url: Option<String>,
}

/// Incoming question. Position in the list becomes `sort_order`.
#[derive(Debug, Deserialize)]
pub struct QuestionInput {
    pub title: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub question_type: String,
    pub is_required: Option<bool>,
    #[serde(default)]
    pub answers: Vec<AnswerInput>,
}

/// DTO for creating or fully updating a quiz. The question set is always
/// replaced wholesale; there is no incremental question editing.
#[derive(Debug, Deserialize)]
pub struct QuizInput {
    pub title: String,
    pub description: Option<String>,
    pub is_active: Option<bool>,
    #[serde(default)]
    pub questions: Vec<QuestionInput>,
}

/// Public quiz submission body.
#[derive(Debug, Deserialize)]
pub struct SubmitQuiz {
    pub quiz_id: DbId,
    pub name: String,
    pub phone: String,
    pub email: String,
    #[serde(default)]
    pub answers: HashMap<DbId, AnswerValue>,
}
