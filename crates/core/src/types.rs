/// All database primary keys are PostgreSQL BIGSERIAL (the singleton
/// contacts table uses SMALLINT and is addressed by its well-known id).
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
