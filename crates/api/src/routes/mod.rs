//! Route definitions, one module per resource.

pub mod admin;
pub mod applications;
pub mod auth;
pub mod contact;
pub mod health;
pub mod plots;
pub mod quiz;
pub mod visits;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                              login (public)
///
/// /quiz/active                             active quiz (public)
/// /quiz/submissions                        submit quiz (public)
///
/// /plots                                   public listing
/// /plots/options                           filter options
/// /plots/{slug}                            public detail
/// /plots/{slug}/similar                    recommendations
///
/// /applications                            create lead (public)
/// /contact                                 contact record (public)
/// /visits                                  record page visit (public)
///
/// /admin/plots                             grid, create (admin only)
/// /admin/plots/{id}                        get, update, delete
/// /admin/plots/{id}/toggle-visibility      flip visibility (POST)
/// /admin/quizzes                           list, create
/// /admin/quizzes/{id}                      get, update, delete
/// /admin/quizzes/{id}/activate             activation swap (POST)
/// /admin/applications                      grid
/// /admin/applications/{id}                 detail
/// /admin/applications/{id}/status          overwrite status (PUT)
/// /admin/applications/{id}/comments        append comment (POST)
/// /admin/contact                           save contact record (PUT)
/// /admin/uploads                           multipart upload (POST)
/// /admin/visits/stats                      traffic stats
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/quiz", quiz::router())
        .nest("/plots", plots::router())
        .nest("/applications", applications::router())
        .nest("/contact", contact::router())
        .nest("/visits", visits::router())
        .nest("/admin", admin::router())
}
