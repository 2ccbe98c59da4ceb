use axum::routing::get;
use axum::Router;

use crate::handlers::plots;
use crate::state::AppState;

/// Public catalog routes mounted at `/plots`.
///
/// `/options` is registered before `/{slug}` so it is matched as a literal
/// segment, not swallowed as a slug.
///
/// ```text
/// GET /                 -> list
/// GET /options          -> options
/// GET /{slug}           -> detail
/// GET /{slug}/similar   -> similar
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(plots::list))
        .route("/options", get(plots::options))
        .route("/{slug}", get(plots::detail))
        .route("/{slug}/similar", get(plots::similar))
}
