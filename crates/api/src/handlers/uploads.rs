//! Admin handler for media/document uploads.

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Response body for `POST /admin/uploads`.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub url: String,
}

/// POST /api/v1/admin/uploads
///
/// Accept one multipart file field, write it to the upload directory under
/// a server-generated unique name, and return its public URL.
pub async fn upload(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Malformed multipart body: {e}")))?
    {
        let Some(file_name) = field.file_name().map(str::to_string) else {
            continue;
        };

        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("Failed to read upload: {e}")))?;
        if bytes.is_empty() {
            return Err(AppError::BadRequest("Uploaded file is empty".into()));
        }

        let url = state
            .media_store
            .put(&bytes, &file_name)
            .await
            .map_err(|e| AppError::InternalError(format!("Upload write failed: {e}")))?;

        tracing::info!(
            url = %url,
            size = bytes.len(),
            user_id = admin.user_id,
            "File uploaded",
        );

        return Ok((
            StatusCode::CREATED,
            Json(DataResponse {
                data: UploadResponse { url },
            }),
        ));
    }

    Err(AppError::BadRequest(
        "Multipart body must contain a file field".into(),
    ))
}
