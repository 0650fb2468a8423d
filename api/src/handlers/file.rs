use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        Multipart, State,
    },
    http::StatusCode,
    Json,
};

use crate::{
    auth::AuthUser,
    error::{AppError, AppResult},
    models::{file::UploadedFile, Envelope},
    services::file::UploadPolicy,
    AppState,
};

const FILE_FIELD: &str = "file";

pub async fn upload(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<(StatusCode, Json<Envelope<UploadedFile>>)> {
    let mut multipart = multipart.map_err(|e| AppError::Validation(e.body_text()))?;
    let policy = UploadPolicy::from_config(&state.config);

    while let Some(mut field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let mime_type = policy.check_mime(field.content_type())?;
        let original_name = field.file_name().unwrap_or("upload").to_string();
        let mut sink = policy.open(&original_name, mime_type).await?;

        loop {
            match field.chunk().await {
                Ok(Some(chunk)) => {
                    if let Err(e) = sink.write(&chunk).await {
                        sink.discard().await;
                        return Err(e);
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    sink.discard().await;
                    return Err(multipart_error(e));
                }
            }
        }

        let uploaded = sink.finish().await?;
        tracing::info!(path = %uploaded.path, size = uploaded.size, "File uploaded");
        return Ok((
            StatusCode::CREATED,
            Json(Envelope::new(uploaded, "Upload file successfully")),
        ));
    }

    Err(AppError::Validation("File is required".into()))
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(e.body_text())
    } else {
        AppError::Validation(e.body_text())
    }
}
