use axum::routing::get;
use axum::Router;

use crate::handlers::contact;
use crate::state::AppState;

/// Public contact routes mounted at `/contact`.
///
/// ```text
/// GET / -> get
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(contact::get))
}
