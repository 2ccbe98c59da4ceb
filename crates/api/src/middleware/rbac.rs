//! Role-based access control extractor.
//!
//! "role == admin" is the sole authorization predicate for every mutation
//! and admin-read endpoint. A valid session with the wrong role is rejected
//! with 401, same as no session: the remedy in both cases is to
//! authenticate as staff.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use zemli_core::error::CoreError;
use zemli_core::roles::ROLE_ADMIN;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the `admin` role.
///
/// ```ignore
/// async fn admin_only(RequireAdmin(user): RequireAdmin) -> AppResult<Json<()>> {
///     // user is guaranteed to be an admin here
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != ROLE_ADMIN {
            return Err(AppError::Core(CoreError::Unauthorized(
                "Admin role required".into(),
            )));
        }
        Ok(RequireAdmin(user))
    }
}
