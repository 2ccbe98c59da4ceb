use std::sync::Arc;

use crate::config::ServerConfig;
use crate::storage::MediaStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: zemli_db::DbPool,
    /// Server configuration (accessed by middleware and handlers).
    pub config: Arc<ServerConfig>,
    /// Filesystem-backed blob store for uploaded media and documents.
    pub media_store: Arc<MediaStore>,
}
