use axum::routing::{get, post};
use axum::Router;

use crate::handlers::quiz;
use crate::state::AppState;

/// Public quiz routes mounted at `/quiz`.
///
/// ```text
/// GET  /active       -> get_active
/// POST /submissions  -> submit
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/active", get(quiz::get_active))
        .route("/submissions", post(quiz::submit))
}
