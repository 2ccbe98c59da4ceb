use crate::types::DbId;

/// Domain error taxonomy shared by the repository and API layers.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// Not-found variant for entities addressed by slug rather than id.
    #[error("Entity not found: {entity} with slug '{slug}'")]
    NotFoundBySlug { entity: &'static str, slug: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// Missing session or insufficient role. Both surface as 401; the
    /// client's remedy in either case is to re-authenticate.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
