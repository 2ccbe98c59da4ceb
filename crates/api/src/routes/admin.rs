use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{admin_applications, admin_plots, admin_quizzes, contact, uploads, visits};
use crate::state::AppState;

/// Admin routes mounted at `/admin`. Every handler here extracts
/// `RequireAdmin`, so an invalid or non-admin token is rejected with 401
/// before any work happens.
///
/// ```text
/// GET    /plots                        -> admin_plots::list
/// POST   /plots                        -> admin_plots::create
/// GET    /plots/{id}                   -> admin_plots::detail
/// PUT    /plots/{id}                   -> admin_plots::update
/// DELETE /plots/{id}                   -> admin_plots::delete
/// POST   /plots/{id}/toggle-visibility -> admin_plots::toggle_visibility
///
/// GET    /quizzes                      -> admin_quizzes::list
/// POST   /quizzes                      -> admin_quizzes::create
/// GET    /quizzes/{id}                 -> admin_quizzes::detail
/// PUT    /quizzes/{id}                 -> admin_quizzes::update
/// DELETE /quizzes/{id}                 -> admin_quizzes::delete
/// POST   /quizzes/{id}/activate        -> admin_quizzes::activate
///
/// GET    /applications                 -> admin_applications::list
/// GET    /applications/{id}            -> admin_applications::detail
/// PUT    /applications/{id}/status     -> admin_applications::update_status
/// POST   /applications/{id}/comments   -> admin_applications::add_comment
///
/// PUT    /contact                      -> contact::upsert
/// POST   /uploads                      -> uploads::upload
/// GET    /visits/stats                 -> visits::stats
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/plots", get(admin_plots::list).post(admin_plots::create))
        .route(
            "/plots/{id}",
            get(admin_plots::detail)
                .put(admin_plots::update)
                .delete(admin_plots::delete),
        )
        .route(
            "/plots/{id}/toggle-visibility",
            post(admin_plots::toggle_visibility),
        )
        .route(
            "/quizzes",
            get(admin_quizzes::list).post(admin_quizzes::create),
        )
        .route(
            "/quizzes/{id}",
            get(admin_quizzes::detail)
                .put(admin_quizzes::update)
                .delete(admin_quizzes::delete),
        )
        .route("/quizzes/{id}/activate", post(admin_quizzes::activate))
        .route("/applications", get(admin_applications::list))
        .route("/applications/{id}", get(admin_applications::detail))
        .route(
            "/applications/{id}/status",
            put(admin_applications::update_status),
        )
        .route(
            "/applications/{id}/comments",
            post(admin_applications::add_comment),
        )
        .route("/contact", put(contact::upsert))
        .route("/uploads", post(uploads::upload))
        .route("/visits/stats", get(visits::stats))
}
