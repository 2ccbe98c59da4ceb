use axum::routing::post;
use axum::Router;

use crate::handlers::applications;
use crate::state::AppState;

/// Public lead-intake routes mounted at `/applications`.
///
/// ```text
/// POST / -> create (contact and plot inquiries)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(applications::create))
}
