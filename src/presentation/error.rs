use std::error::Error as StdError;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::application::ports::AudioDecoderError;
use crate::application::services::{TranscriptionError, WorkerPoolError};

const INTERNAL_ERROR_DETAIL: &str = "Internal Server Error";

#[derive(Serialize)]
pub struct ErrorResponse {
    pub detail: String,
}

/// Every failure a request can end with. This is the only place internal
/// errors become HTTP status codes.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("missing api key")]
    MissingApiKey,
    #[error("invalid api key")]
    InvalidApiKey,
    #[error("no file uploaded")]
    NoFile,
    #[error("malformed multipart body: {0}")]
    Multipart(String),
    #[error("upload exceeds the size limit")]
    PayloadTooLarge,
    #[error(transparent)]
    Transcription(#[from] TranscriptionError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingApiKey => StatusCode::UNAUTHORIZED,
            Self::InvalidApiKey => StatusCode::FORBIDDEN,
            Self::NoFile | Self::Multipart(_) => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Transcription(e) => transcription_status(e),
        }
    }

    pub fn detail(&self) -> String {
        match self {
            Self::MissingApiKey => "Missing API Key".to_string(),
            Self::InvalidApiKey => "Invalid API Key".to_string(),
            Self::NoFile => "No file uploaded".to_string(),
            Self::Multipart(reason) => format!("Failed to read upload: {}", reason),
            Self::PayloadTooLarge => "Uploaded file is too large".to_string(),
            Self::Transcription(e) => transcription_detail(e),
        }
    }
}

fn transcription_status(error: &TranscriptionError) -> StatusCode {
    match error {
        TranscriptionError::Decoding(e) => match e {
            AudioDecoderError::EmptyInput
            | AudioDecoderError::UnsupportedFormat { .. }
            | AudioDecoderError::DecodingFailed(_)
            | AudioDecoderError::EmptyDecodedAudio => StatusCode::BAD_REQUEST,
            AudioDecoderError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            AudioDecoderError::DecoderUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
        },
        TranscriptionError::Worker(WorkerPoolError::Timeout(_)) => StatusCode::GATEWAY_TIMEOUT,
        TranscriptionError::Worker(_) | TranscriptionError::Transcription(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

fn transcription_detail(error: &TranscriptionError) -> String {
    match error {
        TranscriptionError::Decoding(e) => match e {
            AudioDecoderError::EmptyInput => "Empty file".to_string(),
            AudioDecoderError::PayloadTooLarge { .. } => "Uploaded file is too large".to_string(),
            AudioDecoderError::UnsupportedFormat { .. } => {
                "Unsupported audio format; supported: wav, mp3, ogg, opus, webm".to_string()
            }
            AudioDecoderError::DecodingFailed(reason) => {
                format!("Audio decode failed: {}", reason)
            }
            AudioDecoderError::EmptyDecodedAudio => "Decoded audio is empty".to_string(),
            AudioDecoderError::DecoderUnavailable(_) => "ffmpeg not found on server".to_string(),
        },
        TranscriptionError::Worker(WorkerPoolError::Timeout(_)) => {
            "Transcription timed out".to_string()
        }
        TranscriptionError::Worker(_) | TranscriptionError::Transcription(_) => {
            INTERNAL_ERROR_DETAIL.to_string()
        }
    }
}

/// `error: cause: cause ...`
pub fn error_chain(error: &dyn StdError) -> String {
    let mut chain = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        chain.push_str(": ");
        chain.push_str(&cause.to_string());
        source = cause.source();
    }
    chain
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!(status = %status, error = %error_chain(&self), "Request failed");
        } else {
            tracing::warn!(status = %status, error = %self, "Request rejected");
        }

        (
            status,
            Json(ErrorResponse {
                detail: self.detail(),
            }),
        )
            .into_response()
    }
}
