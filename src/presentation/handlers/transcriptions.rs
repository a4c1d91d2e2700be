use axum::Json;
use axum::extract::multipart::{Field, MultipartError, MultipartRejection};
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use serde::Serialize;

use crate::domain::UploadedAudio;
use crate::presentation::error::ApiError;
use crate::presentation::state::AppState;

const FILE_FIELD: &str = "file";

#[derive(Debug, Serialize)]
pub struct TranscriptionResponse {
    pub text: String,
}

#[tracing::instrument(skip(state, multipart))]
pub async fn transcription_handler(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<TranscriptionResponse>, ApiError> {
    let mut multipart = multipart.map_err(|e| ApiError::Multipart(e.body_text()))?;
    let upload = read_upload(&mut multipart, state.max_upload_bytes).await?;

    tracing::debug!(
        filename = %upload.filename(),
        content_type = %upload.content_type(),
        bytes = upload.size_bytes(),
        "Audio upload received"
    );

    let text = state.transcription_service.transcribe(upload).await?;

    Ok(Json(TranscriptionResponse { text }))
}

/// Reads the `file` part (or the first part carrying a filename), refusing
/// to buffer more than `max_bytes`.
async fn read_upload(
    multipart: &mut Multipart,
    max_bytes: usize,
) -> Result<UploadedAudio, ApiError> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() == Some(FILE_FIELD) || field.file_name().is_some() {
            return read_field(field, max_bytes).await;
        }
    }

    Err(ApiError::NoFile)
}

async fn read_field(mut field: Field<'_>, max_bytes: usize) -> Result<UploadedAudio, ApiError> {
    let filename = field.file_name().map(str::to_string);
    let content_type = field.content_type().map(str::to_string);

    let mut data = Vec::new();
    while let Some(chunk) = field.chunk().await.map_err(multipart_error)? {
        if data.len() + chunk.len() > max_bytes {
            tracing::warn!(
                limit = max_bytes,
                received = data.len() + chunk.len(),
                "Upload exceeds size limit"
            );
            return Err(ApiError::PayloadTooLarge);
        }
        data.extend_from_slice(&chunk);
    }

    Ok(UploadedAudio::new(
        data,
        filename.as_deref(),
        content_type.as_deref(),
    ))
}

fn multipart_error(error: MultipartError) -> ApiError {
    if error.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge
    } else {
        ApiError::Multipart(error.body_text())
    }
}
