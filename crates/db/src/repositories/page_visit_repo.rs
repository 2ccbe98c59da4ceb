//! Repository for the append-only `page_visits` table.

use sqlx::PgPool;
use zemli_core::types::Timestamp;

use crate::models::page_visit::{CreatePageVisit, PathVisitCount, VisitStats};

/// Provides append and aggregation operations for page visits.
pub struct PageVisitRepo;

impl PageVisitRepo {
    /// Append a visit. Rows are never updated or deleted.
    pub async fn record(pool: &PgPool, input: &CreatePageVisit) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO page_visits (path, user_agent, ip, referer) VALUES ($1, $2, $3, $4)",
        )
        .bind(&input.path)
        .bind(&input.user_agent)
        .bind(&input.ip)
        .bind(&input.referer)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Per-path counts and a total over `[from, to)`. Either bound may be
    /// absent.
    pub async fn stats(
        pool: &PgPool,
        from: Option<Timestamp>,
        to: Option<Timestamp>,
    ) -> Result<VisitStats, sqlx::Error> {
        const RANGE: &str = "($1::TIMESTAMPTZ IS NULL OR created_at >= $1) \
                             AND ($2::TIMESTAMPTZ IS NULL OR created_at < $2)";

        let count_query = format!("SELECT COUNT(*) FROM page_visits WHERE {RANGE}");
        let (total,): (i64,) = sqlx::query_as(&count_query)
            .bind(from)
            .bind(to)
            .fetch_one(pool)
            .await?;

        let by_path_query = format!(
            "SELECT path, COUNT(*) AS visits FROM page_visits \
             WHERE {RANGE} \
             GROUP BY path \
             ORDER BY visits DESC, path ASC"
        );
        let by_path = sqlx::query_as::<_, PathVisitCount>(&by_path_query)
            .bind(from)
            .bind(to)
            .fetch_all(pool)
            .await?;

        Ok(VisitStats { total, by_path })
    }
}
