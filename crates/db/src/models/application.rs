//! Application (lead) entity models and DTOs.
//!
//! Every inbound lead, regardless of channel, lands in the `applications`
//! table. Quiz submissions also append a `quiz_results` audit row.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use zemli_core::types::{DbId, Timestamp};

/// A row from the `applications` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Application {
    pub id: DbId,
    pub app_type: String,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub message: Option<String>,
    pub status: String,
    pub plot_id: Option<DbId>,
    pub quiz_id: Option<DbId>,
    pub quiz_answers: Option<serde_json::Value>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Originating channel, matching the CHECK constraint on
/// `applications.app_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplicationType {
    Quiz,
    Plot,
    Contact,
}

impl ApplicationType {
    pub fn as_str(self) -> &'static str {
        match self {
            ApplicationType::Quiz => "quiz",
            ApplicationType::Plot => "plot",
            ApplicationType::Contact => "contact",
        }
    }

    /// Parse a stored type string. Returns `None` for unknown values.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "quiz" => Some(ApplicationType::Quiz),
            "plot" => Some(ApplicationType::Plot),
            "contact" => Some(ApplicationType::Contact),
            _ => None,
        }
    }
}

/// Processing status. Transitions are admin-only and unconstrained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplicationStatus {
    New,
    InProgress,
    Completed,
    Rejected,
}

impl ApplicationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ApplicationStatus::New => "new",
            ApplicationStatus::InProgress => "in_progress",
            ApplicationStatus::Completed => "completed",
            ApplicationStatus::Rejected => "rejected",
        }
    }

    /// Parse a stored status string. Returns `None` for unknown values.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "new" => Some(ApplicationStatus::New),
            "in_progress" => Some(ApplicationStatus::InProgress),
            "completed" => Some(ApplicationStatus::Completed),
            "rejected" => Some(ApplicationStatus::Rejected),
            _ => None,
        }
    }
}

/// A row from the `application_comments` table. Append-only.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ApplicationComment {
    pub id: DbId,
    pub application_id: DbId,
    pub author_id: DbId,
    pub body: String,
    pub created_at: Timestamp,
}

/// Comment joined with its author's email for the admin thread view.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CommentWithAuthor {
    pub id: DbId,
    pub application_id: DbId,
    pub author_id: DbId,
    pub author_email: String,
    pub body: String,
    pub created_at: Timestamp,
}

/// Public DTO for creating a contact- or plot-origin application.
///
/// There is deliberately no `status` field: every application starts `new`.
/// Quiz-origin applications do not pass through here (see the quiz
/// submission path).
#[derive(Debug, Deserialize)]
pub struct CreateApplication {
    pub app_type: String,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub message: Option<String>,
    pub plot_id: Option<DbId>,
}

/// Admin grid row: application columns plus the comment count.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ApplicationListItem {
    pub id: DbId,
    pub app_type: String,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub status: String,
    pub plot_id: Option<DbId>,
    pub quiz_id: Option<DbId>,
    pub created_at: Timestamp,
    pub comment_count: i64,
}

/// Admin detail: the application, its comment thread (newest first), and
/// the titles of the originating plot/quiz where present.
#[derive(Debug, Serialize)]
pub struct ApplicationDetail {
    #[serde(flatten)]
    pub application: Application,
    pub comments: Vec<CommentWithAuthor>,
    pub plot_title: Option<String>,
    pub quiz_title: Option<String>,
}

/// Query parameters for the admin applications grid.
#[derive(Debug, Default, Deserialize)]
pub struct ApplicationListParams {
    pub app_type: Option<String>,
    pub status: Option<String>,
    pub page: Option<i64>,
}
