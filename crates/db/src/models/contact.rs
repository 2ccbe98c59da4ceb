//! Contact (company details) models and DTOs.
//!
//! The contact record is an explicit singleton: the one row in `contacts`
//! always has id = 1, enforced by a CHECK constraint.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use zemli_core::types::DbId;

/// Well-known id of the singleton contact row.
pub const CONTACT_ID: i16 = 1;

/// The row from the `contacts` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Contact {
    pub id: i16,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}

/// A row from `contact_working_hours`. `opens_at`/`closes_at` are display
/// strings; both NULL means closed that day.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WorkingHours {
    pub id: DbId,
    pub day_of_week: i16,
    pub opens_at: Option<String>,
    pub closes_at: Option<String>,
}

/// The row from `contact_social_media`. Absent entirely (not blanked) when
/// all three handles are empty.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SocialMedia {
    pub id: DbId,
    pub whatsapp: Option<String>,
    pub telegram: Option<String>,
    pub instagram: Option<String>,
}

/// The contact record with its sub-records, as served to clients.
#[derive(Debug, Serialize)]
pub struct ContactDetail {
    #[serde(flatten)]
    pub contact: Contact,
    pub working_hours: Vec<WorkingHours>,
    pub social_media: Option<SocialMedia>,
}

/// Incoming working-hours row; one per day of week is required.
#[derive(Debug, Clone, Deserialize)]
pub struct WorkingHoursInput {
    pub day_of_week: i16,
    pub opens_at: Option<String>,
    pub closes_at: Option<String>,
}

/// Incoming social-media handles. When every field is empty the stored
/// sub-record is deleted rather than blanked.
#[derive(Debug, Clone, Deserialize)]
pub struct SocialMediaInput {
    pub whatsapp: Option<String>,
    pub telegram: Option<String>,
    pub instagram: Option<String>,
}

impl SocialMediaInput {
    /// True when no handle carries a non-blank value.
    pub fn is_empty(&self) -> bool {
        [&self.whatsapp, &self.telegram, &self.instagram]
            .iter()
            .all(|field| field.as_deref().is_none_or(|s| s.trim().is_empty()))
    }
}

/// DTO for saving the contact record. Working hours are always replaced
/// with exactly 7 rows, one per day 0..6.
#[derive(Debug, Deserialize)]
pub struct ContactInput {
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub working_hours: Vec<WorkingHoursInput>,
    pub social_media: Option<SocialMediaInput>,
}
