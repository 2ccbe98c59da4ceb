//! Repository for applications (leads), their comment threads, and the
//! quiz submission write path.
//!
//! Quiz dedup is closed against concurrent double-submits: the insert runs
//! `ON CONFLICT DO NOTHING` against the partial unique index
//! `uq_applications_quiz_phone`, so the losing submission observes a clean
//! "already exists" instead of creating a second lead.

use sqlx::PgPool;
use zemli_core::pagination::{offset_for_page, total_pages};
use zemli_core::types::DbId;

use crate::models::application::{
    Application, ApplicationComment, ApplicationDetail, ApplicationListItem,
    ApplicationListParams, CommentWithAuthor, CreateApplication,
};
use crate::models::Paged;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, app_type, name, phone, email, message, status, \
                       plot_id, quiz_id, quiz_answers, created_at, updated_at";

/// Provides lead intake, admin review, and comment operations.
pub struct ApplicationRepo;

impl ApplicationRepo {
    // -----------------------------------------------------------------------
    // Intake
    // -----------------------------------------------------------------------

    /// Insert a contact- or plot-origin application. Status always starts
    /// `new`; the DTO carries no status field by design.
    pub async fn create(
        pool: &PgPool,
        input: &CreateApplication,
    ) -> Result<Application, sqlx::Error> {
        let query = format!(
            "INSERT INTO applications (app_type, name, phone, email, message, plot_id) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Application>(&query)
            .bind(&input.app_type)
            .bind(&input.name)
            .bind(&input.phone)
            .bind(&input.email)
            .bind(&input.message)
            .bind(input.plot_id)
            .fetch_one(pool)
            .await
    }

    /// Existing quiz application for this (quiz, phone) pair, if any.
    pub async fn find_quiz_duplicate(
        pool: &PgPool,
        quiz_id: DbId,
        phone: &str,
    ) -> Result<Option<Application>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM applications \
             WHERE app_type = 'quiz' AND quiz_id = $1 AND phone = $2"
        );
        sqlx::query_as::<_, Application>(&query)
            .bind(quiz_id)
            .bind(phone)
            .fetch_optional(pool)
            .await
    }

    /// First-submission write path: the application lead and the append-only
    /// `quiz_results` audit row, inserted in one transaction.
    ///
    /// Returns `false` when another submission with the same (quiz, phone)
    /// won the race; in that case nothing was written.
    pub async fn submit_quiz(
        pool: &PgPool,
        quiz_id: DbId,
        name: &str,
        phone: &str,
        email: &str,
        answers: &serde_json::Value,
        promo_code: &str,
    ) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let inserted: Option<DbId> = sqlx::query_scalar(
            "INSERT INTO applications (app_type, name, phone, email, quiz_id, quiz_answers) \
             VALUES ('quiz', $1, $2, $3, $4, $5) \
             ON CONFLICT (quiz_id, phone) WHERE app_type = 'quiz' DO NOTHING \
             RETURNING id",
        )
        .bind(name)
        .bind(phone)
        .bind(email)
        .bind(quiz_id)
        .bind(answers)
        .fetch_optional(&mut *tx)
        .await?;

        if inserted.is_none() {
            return Ok(false);
        }

        sqlx::query(
            "INSERT INTO quiz_results (quiz_id, name, phone, email, answers, promo_code) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(quiz_id)
        .bind(name)
        .bind(phone)
        .bind(email)
        .bind(answers)
        .bind(promo_code)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(true)
    }

    // -----------------------------------------------------------------------
    // Admin review
    // -----------------------------------------------------------------------

    /// Paged admin grid, newest first, optionally filtered by type and
    /// status. Returns `None` when the page lies beyond the last page of a
    /// non-empty result set.
    pub async fn list(
        pool: &PgPool,
        params: &ApplicationListParams,
        page_size: i64,
    ) -> Result<Option<Paged<ApplicationListItem>>, sqlx::Error> {
        const WHERE: &str = "($1::TEXT IS NULL OR a.app_type = $1) \
                             AND ($2::TEXT IS NULL OR a.status = $2)";

        let count_query = format!("SELECT COUNT(*) FROM applications a WHERE {WHERE}");
        let (total_items,): (i64,) = sqlx::query_as(&count_query)
            .bind(&params.app_type)
            .bind(&params.status)
            .fetch_one(pool)
            .await?;

        let current_page = params.page.unwrap_or(1).max(1);
        let offset = match offset_for_page(current_page, total_items, page_size) {
            Some(offset) => offset,
            None => return Ok(None),
        };

        let page_query = format!(
            "SELECT a.id, a.app_type, a.name, a.phone, a.email, a.status, \
                    a.plot_id, a.quiz_id, a.created_at, \
                    (SELECT COUNT(*) FROM application_comments c \
                     WHERE c.application_id = a.id) AS comment_count \
             FROM applications a \
             WHERE {WHERE} \
             ORDER BY a.created_at DESC, a.id DESC \
             LIMIT $3 OFFSET $4"
        );
        let items = sqlx::query_as::<_, ApplicationListItem>(&page_query)
            .bind(&params.app_type)
            .bind(&params.status)
            .bind(page_size)
            .bind(offset)
            .fetch_all(pool)
            .await?;

        Ok(Some(Paged {
            items,
            total_items,
            total_pages: total_pages(total_items, page_size),
            current_page,
        }))
    }

    /// Find an application by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Application>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM applications WHERE id = $1");
        sqlx::query_as::<_, Application>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Admin detail: the application, its comments (newest first) with
    /// author emails, and the titles of the originating plot/quiz.
    pub async fn detail(pool: &PgPool, id: DbId) -> Result<Option<ApplicationDetail>, sqlx::Error> {
        let application = match Self::find_by_id(pool, id).await? {
            Some(application) => application,
            None => return Ok(None),
        };

        let comments = Self::comments(pool, application.id).await?;

        let plot_title: Option<String> = match application.plot_id {
            Some(plot_id) => {
                sqlx::query_scalar("SELECT title FROM plots WHERE id = $1")
                    .bind(plot_id)
                    .fetch_optional(pool)
                    .await?
            }
            None => None,
        };
        let quiz_title: Option<String> = match application.quiz_id {
            Some(quiz_id) => {
                sqlx::query_scalar("SELECT title FROM quizzes WHERE id = $1")
                    .bind(quiz_id)
                    .fetch_optional(pool)
                    .await?
            }
            None => None,
        };

        Ok(Some(ApplicationDetail {
            application,
            comments,
            plot_title,
            quiz_title,
        }))
    }

    /// Overwrite the status unconditionally (any -> any, no transition
    /// guard). Returns `None` if no row with the given `id` exists.
    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        status: &str,
    ) -> Result<Option<Application>, sqlx::Error> {
        let query = format!(
            "UPDATE applications SET status = $2 WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Application>(&query)
            .bind(id)
            .bind(status)
            .fetch_optional(pool)
            .await
    }

    // -----------------------------------------------------------------------
    // Comments
    // -----------------------------------------------------------------------

    /// Append a comment. Returns `None` when the application does not exist.
    /// Comments are never edited or deleted.
    pub async fn add_comment(
        pool: &PgPool,
        application_id: DbId,
        author_id: DbId,
        body: &str,
    ) -> Result<Option<ApplicationComment>, sqlx::Error> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM applications WHERE id = $1)")
                .bind(application_id)
                .fetch_one(pool)
                .await?;
        if !exists {
            return Ok(None);
        }

        let comment = sqlx::query_as::<_, ApplicationComment>(
            "INSERT INTO application_comments (application_id, author_id, body) \
             VALUES ($1, $2, $3) \
             RETURNING id, application_id, author_id, body, created_at",
        )
        .bind(application_id)
        .bind(author_id)
        .bind(body)
        .fetch_one(pool)
        .await?;

        Ok(Some(comment))
    }

    /// The comment thread for an application, newest first.
    pub async fn comments(
        pool: &PgPool,
        application_id: DbId,
    ) -> Result<Vec<CommentWithAuthor>, sqlx::Error> {
        sqlx::query_as::<_, CommentWithAuthor>(
            "SELECT c.id, c.application_id, c.author_id, u.email AS author_email, \
                    c.body, c.created_at \
             FROM application_comments c \
             JOIN users u ON u.id = c.author_id \
             WHERE c.application_id = $1 \
             ORDER BY c.created_at DESC, c.id DESC",
        )
        .bind(application_id)
        .fetch_all(pool)
        .await
    }
}
