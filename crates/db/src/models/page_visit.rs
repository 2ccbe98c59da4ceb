//! Page visit models. The `page_visits` table is append-only.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use zemli_core::types::{DbId, Timestamp};

/// A row from the `page_visits` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PageVisit {
    pub id: DbId,
    pub path: String,
    pub user_agent: Option<String>,
    pub ip: Option<String>,
    pub referer: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for recording a visit. UA and IP come from request headers, not
/// the body.
#[derive(Debug)]
pub struct CreatePageVisit {
    pub path: String,
    pub user_agent: Option<String>,
    pub ip: Option<String>,
    pub referer: Option<String>,
}

/// Per-path visit count for the admin stats view.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PathVisitCount {
    pub path: String,
    pub visits: i64,
}

/// Aggregated visit stats over a date range.
#[derive(Debug, Serialize)]
pub struct VisitStats {
    pub total: i64,
    pub by_path: Vec<PathVisitCount>,
}

/// Query parameters for `GET /admin/visits/stats`.
#[derive(Debug, Default, Deserialize)]
pub struct VisitStatsParams {
    /// Inclusive lower bound (RFC 3339). Unbounded when absent.
    pub from: Option<Timestamp>,
    /// Exclusive upper bound (RFC 3339). Unbounded when absent.
    pub to: Option<Timestamp>,
}
