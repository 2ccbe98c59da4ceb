//! Quiz question types and submission answer validation.
//!
//! A submission maps question ids to [`AnswerValue`]s. The value shape
//! depends on the question's declared type, so it is modeled as a tagged
//! union rather than an untyped map and checked against the question set
//! before anything is written.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

/// Question type, matching the CHECK constraint on
/// `quiz_questions.question_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionType {
    Single,
    Multiple,
    Text,
    Phone,
    Email,
}

impl QuestionType {
    pub fn as_str(self) -> &'static str {
        match self {
            QuestionType::Single => "single",
            QuestionType::Multiple => "multiple",
            QuestionType::Text => "text",
            QuestionType::Phone => "phone",
            QuestionType::Email => "email",
        }
    }

    /// Parse a stored type string. Returns `None` for unknown values.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "single" => Some(QuestionType::Single),
            "multiple" => Some(QuestionType::Multiple),
            "text" => Some(QuestionType::Text),
            "phone" => Some(QuestionType::Phone),
            "email" => Some(QuestionType::Email),
            _ => None,
        }
    }
}

/// One submitted answer, tagged by shape.
///
/// - `single_choice` carries the chosen answer id (SINGLE questions);
/// - `multiple_choice` carries the chosen answer ids (MULTIPLE questions);
/// - `free_text` carries raw text (TEXT / PHONE / EMAIL questions).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum AnswerValue {
    SingleChoice(DbId),
    MultipleChoice(Vec<DbId>),
    FreeText(String),
}

/// The view of a question the validator needs: its type, whether it is
/// required, and the set of answer-option ids it owns.
#[derive(Debug, Clone)]
pub struct QuestionSpec {
    pub id: DbId,
    pub question_type: QuestionType,
    pub is_required: bool,
    pub answer_ids: Vec<DbId>,
}

/// Validate a submission's answers against the quiz's question set.
///
/// Checks, in order: every referenced question id exists; every required
/// question is answered; every value has the shape its question type
/// declares; every referenced answer id belongs to its question. The first
/// violation is returned as a [`CoreError::Validation`] naming the question.
pub fn validate_answers(
    questions: &[QuestionSpec],
    answers: &HashMap<DbId, AnswerValue>,
) -> Result<(), CoreError> {
    for question_id in answers.keys() {
        if !questions.iter().any(|q| q.id == *question_id) {
            return Err(CoreError::Validation(format!(
                "Answer references unknown question id {question_id}"
            )));
        }
    }

    for question in questions {
        let answer = match answers.get(&question.id) {
            Some(answer) => answer,
            None => {
                if question.is_required {
                    return Err(CoreError::Validation(format!(
                        "Question {} requires an answer",
                        question.id
                    )));
                }
                continue;
            }
        };

        match (question.question_type, answer) {
            (QuestionType::Single, AnswerValue::SingleChoice(answer_id)) => {
                if !question.answer_ids.contains(answer_id) {
                    return Err(CoreError::Validation(format!(
                        "Answer id {answer_id} does not belong to question {}",
                        question.id
                    )));
                }
            }
            (QuestionType::Multiple, AnswerValue::MultipleChoice(answer_ids)) => {
                if question.is_required && answer_ids.is_empty() {
                    return Err(CoreError::Validation(format!(
                        "Question {} requires at least one choice",
                        question.id
                    )));
                }
                for answer_id in answer_ids {
                    if !question.answer_ids.contains(answer_id) {
                        return Err(CoreError::Validation(format!(
                            "Answer id {answer_id} does not belong to question {}",
                            question.id
                        )));
                    }
                }
            }
            (
                QuestionType::Text | QuestionType::Phone | QuestionType::Email,
                AnswerValue::FreeText(text),
            ) => {
                if question.is_required && text.trim().is_empty() {
                    return Err(CoreError::Validation(format!(
                        "Question {} requires a non-empty answer",
                        question.id
                    )));
                }
            }
            (expected, _) => {
                return Err(CoreError::Validation(format!(
                    "Question {} expects a {} answer",
                    question.id,
                    expected.as_str()
                )));
            }
        }
    }

    Ok(())
}
