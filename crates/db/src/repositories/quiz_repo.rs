//! Repository for quizzes, their questions, and answer options.
//!
//! The single-active-quiz invariant is enforced twice: every write that
//! activates a quiz first deactivates all others inside the same
//! transaction, and `uq_quizzes_single_active` backstops the swap at the
//! schema level.

use sqlx::{PgPool, Postgres, Transaction};
use zemli_core::types::DbId;

use crate::models::quiz::{QuestionDetail, Quiz, QuizAnswer, QuizDetail, QuizInput, QuizQuestion};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, description, is_active, created_at, updated_at";

const QUESTION_COLUMNS: &str =
    "id, quiz_id, title, description, image_url, question_type, is_required, sort_order";

const ANSWER_COLUMNS: &str = "id, question_id, label, image_url, sort_order";

/// Provides CRUD operations and the activation swap for quizzes.
pub struct QuizRepo;

impl QuizRepo {
    /// The quiz currently presented to visitors, with ordered questions and
    /// answers. `None` is a normal state, not an error.
    pub async fn find_active(pool: &PgPool) -> Result<Option<QuizDetail>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM quizzes WHERE is_active");
        let quiz = sqlx::query_as::<_, Quiz>(&query).fetch_optional(pool).await?;
        match quiz {
            Some(quiz) => Ok(Some(Self::load_detail(pool, quiz).await?)),
            None => Ok(None),
        }
    }

    /// List all quizzes, most recently updated first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Quiz>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM quizzes ORDER BY updated_at DESC");
        sqlx::query_as::<_, Quiz>(&query).fetch_all(pool).await
    }

    /// Find a quiz by internal ID with its full question set.
    pub async fn detail_by_id(pool: &PgPool, id: DbId) -> Result<Option<QuizDetail>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM quizzes WHERE id = $1");
        let quiz = sqlx::query_as::<_, Quiz>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        match quiz {
            Some(quiz) => Ok(Some(Self::load_detail(pool, quiz).await?)),
            None => Ok(None),
        }
    }

    /// Insert a quiz with its question set, returning the full detail.
    pub async fn create(pool: &PgPool, input: &QuizInput) -> Result<QuizDetail, sqlx::Error> {
        let mut tx = pool.begin().await?;

        // Deactivate the rest first so the partial unique index never sees
        // two active rows.
        if input.is_active == Some(true) {
            Self::deactivate_all(&mut tx, None).await?;
        }

        let insert_query = format!(
            "INSERT INTO quizzes (title, description, is_active) \
             VALUES ($1, $2, COALESCE($3, FALSE)) \
             RETURNING {COLUMNS}"
        );
        let quiz = sqlx::query_as::<_, Quiz>(&insert_query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.is_active)
            .fetch_one(&mut *tx)
            .await?;

        Self::insert_questions(&mut tx, quiz.id, input).await?;

        tx.commit().await?;

        match Self::detail_by_id(pool, quiz.id).await? {
            Some(detail) => Ok(detail),
            None => Err(sqlx::Error::RowNotFound),
        }
    }

    /// Full update: quiz fields plus wholesale replacement of the question
    /// set (no incremental question diffing).
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &QuizInput,
    ) -> Result<Option<QuizDetail>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        if input.is_active == Some(true) {
            Self::deactivate_all(&mut tx, Some(id)).await?;
        }

        let update_query = format!(
            "UPDATE quizzes SET \
                title = $2, description = $3, is_active = COALESCE($4, is_active) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let quiz = sqlx::query_as::<_, Quiz>(&update_query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.is_active)
            .fetch_optional(&mut *tx)
            .await?;

        let quiz = match quiz {
            Some(quiz) => quiz,
            None => return Ok(None),
        };

        // Questions cascade to their answers.
        sqlx::query("DELETE FROM quiz_questions WHERE quiz_id = $1")
            .bind(quiz.id)
            .execute(&mut *tx)
            .await?;
        Self::insert_questions(&mut tx, quiz.id, input).await?;

        tx.commit().await?;

        Self::detail_by_id(pool, quiz.id).await
    }

    /// Make `id` the single active quiz.
    ///
    /// Returns `false` if no row with the given `id` exists (in which case
    /// nothing was changed).
    pub async fn activate(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let exists: bool = sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM quizzes WHERE id = $1)")
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;
        if !exists {
            return Ok(false);
        }

        Self::deactivate_all(&mut tx, Some(id)).await?;
        sqlx::query("UPDATE quizzes SET is_active = TRUE WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(true)
    }

    /// Delete a quiz. Questions and answers cascade. Deleting the active
    /// quiz leaves no quiz active; that is a valid resting state.
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM quizzes WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    async fn deactivate_all(
        tx: &mut Transaction<'_, Postgres>,
        except: Option<DbId>,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE quizzes SET is_active = FALSE WHERE is_active AND ($1::BIGINT IS NULL OR id <> $1)")
            .bind(except)
            .execute(&mut **tx)
            .await?;
        Ok(())
    }

    async fn insert_questions(
        tx: &mut Transaction<'_, Postgres>,
        quiz_id: DbId,
        input: &QuizInput,
    ) -> Result<(), sqlx::Error> {
        for (index, question) in input.questions.iter().enumerate() {
            let question_id: DbId = sqlx::query_scalar(
                "INSERT INTO quiz_questions \
                    (quiz_id, title, description, image_url, question_type, is_required, sort_order) \
                 VALUES ($1, $2, $3, $4, $5, COALESCE($6, TRUE), $7) \
                 RETURNING id",
            )
            .bind(quiz_id)
            .bind(&question.title)
            .bind(&question.description)
            .bind(&question.image_url)
            .bind(&question.question_type)
            .bind(question.is_required)
            .bind(index as i32)
            .fetch_one(&mut **tx)
            .await?;

            for (answer_index, answer) in question.answers.iter().enumerate() {
                sqlx::query(
                    "INSERT INTO quiz_answers (question_id, label, image_url, sort_order) \
                     VALUES ($1, $2, $3, $4)",
                )
                .bind(question_id)
                .bind(&answer.label)
                .bind(&answer.image_url)
                .bind(answer_index as i32)
                .execute(&mut **tx)
                .await?;
            }
        }
        Ok(())
    }

    async fn load_detail(pool: &PgPool, quiz: Quiz) -> Result<QuizDetail, sqlx::Error> {
        let question_query = format!(
            "SELECT {QUESTION_COLUMNS} FROM quiz_questions \
             WHERE quiz_id = $1 ORDER BY sort_order ASC"
        );
        let question_rows = sqlx::query_as::<_, QuizQuestion>(&question_query)
            .bind(quiz.id)
            .fetch_all(pool)
            .await?;

        let mut questions = Vec::with_capacity(question_rows.len());
        for question in question_rows {
            let answer_query = format!(
                "SELECT {ANSWER_COLUMNS} FROM quiz_answers \
                 WHERE question_id = $1 ORDER BY sort_order ASC"
            );
            let answers = sqlx::query_as::<_, QuizAnswer>(&answer_query)
                .bind(question.id)
                .fetch_all(pool)
                .await?;
            questions.push(QuestionDetail { question, answers });
        }

        Ok(QuizDetail { quiz, questions })
    }
}
