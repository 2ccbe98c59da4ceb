use axum::routing::post;
use axum::Router;

use crate::handlers::visits;
use crate::state::AppState;

/// Public visit-recording routes mounted at `/visits`.
///
/// ```text
/// POST / -> record
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(visits::record))
}
