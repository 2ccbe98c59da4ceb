//! Repository for the singleton contact record and its sub-records.

use sqlx::PgPool;

use crate::models::contact::{
    Contact, ContactDetail, ContactInput, SocialMedia, WorkingHours, CONTACT_ID,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, phone, email, address";

/// Provides read and upsert operations for the contact record.
pub struct ContactRepo;

impl ContactRepo {
    /// The contact record with working hours and social media, or `None`
    /// when it has never been saved.
    pub async fn find(pool: &PgPool) -> Result<Option<ContactDetail>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM contacts WHERE id = $1");
        let contact = sqlx::query_as::<_, Contact>(&query)
            .bind(CONTACT_ID)
            .fetch_optional(pool)
            .await?;

        let contact = match contact {
            Some(contact) => contact,
            None => return Ok(None),
        };

        let working_hours = sqlx::query_as::<_, WorkingHours>(
            "SELECT id, day_of_week, opens_at, closes_at FROM contact_working_hours \
             WHERE contact_id = $1 ORDER BY day_of_week ASC",
        )
        .bind(CONTACT_ID)
        .fetch_all(pool)
        .await?;

        let social_media = sqlx::query_as::<_, SocialMedia>(
            "SELECT id, whatsapp, telegram, instagram FROM contact_social_media \
             WHERE contact_id = $1",
        )
        .bind(CONTACT_ID)
        .fetch_optional(pool)
        .await?;

        Ok(Some(ContactDetail {
            contact,
            working_hours,
            social_media,
        }))
    }

    /// Create or update the singleton row, replace all 7 working-hours
    /// rows, and write or delete the social-media sub-record depending on
    /// whether any handle is non-empty. One transaction.
    pub async fn upsert(pool: &PgPool, input: &ContactInput) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query(
            "INSERT INTO contacts (id, phone, email, address) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT (id) DO UPDATE \
             SET phone = EXCLUDED.phone, email = EXCLUDED.email, address = EXCLUDED.address",
        )
        .bind(CONTACT_ID)
        .bind(&input.phone)
        .bind(&input.email)
        .bind(&input.address)
        .execute(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM contact_working_hours WHERE contact_id = $1")
            .bind(CONTACT_ID)
            .execute(&mut *tx)
            .await?;
        for hours in &input.working_hours {
            sqlx::query(
                "INSERT INTO contact_working_hours (contact_id, day_of_week, opens_at, closes_at) \
                 VALUES ($1, $2, $3, $4)",
            )
            .bind(CONTACT_ID)
            .bind(hours.day_of_week)
            .bind(&hours.opens_at)
            .bind(&hours.closes_at)
            .execute(&mut *tx)
            .await?;
        }

        // A present-but-empty sub-record is deleted, not blanked.
        match &input.social_media {
            Some(social) if !social.is_empty() => {
                sqlx::query(
                    "INSERT INTO contact_social_media (contact_id, whatsapp, telegram, instagram) \
                     VALUES ($1, $2, $3, $4) \
                     ON CONFLICT (contact_id) DO UPDATE \
                     SET whatsapp = EXCLUDED.whatsapp, telegram = EXCLUDED.telegram, \
                         instagram = EXCLUDED.instagram",
                )
                .bind(CONTACT_ID)
                .bind(&social.whatsapp)
                .bind(&social.telegram)
                .bind(&social.instagram)
                .execute(&mut *tx)
                .await?;
            }
            _ => {
                sqlx::query("DELETE FROM contact_social_media WHERE contact_id = $1")
                    .bind(CONTACT_ID)
                    .execute(&mut *tx)
                    .await?;
            }
        }

        tx.commit().await?;
        Ok(())
    }
}
