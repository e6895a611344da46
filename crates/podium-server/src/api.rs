//! Error mapping and helpers shared by the chatbot and interview handlers.

use crate::AppState;
use axum::{
    body::{Body, Bytes},
    extract::{
        multipart::{MultipartError, MultipartRejection},
        Multipart,
    },
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use podium_voice::AudioStream;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use thiserror::Error;

/// Label returned when a request body cannot be decoded.
pub const INVALID_BODY: &str = "요청 본문이 올바르지 않습니다.";

/// Label returned when an STT request carries no `file` part.
pub const MISSING_FILE: &str = "file 필드가 필요합니다.";

/// API error type mapping to HTTP status codes.
///
/// Every variant renders as `{"error": ...}` plus a `detail` field when one
/// is available.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A required field is missing or blank (422).
    #[error("unprocessable request: {error}")]
    Unprocessable {
        error: String,
        detail: Option<String>,
    },
    /// The role is unknown or has no vendor configuration (400).
    #[error("bad request: {0}")]
    BadRequest(String),
    /// The uploaded audio exceeds the configured limit (413).
    #[error("{error}: {detail}")]
    PayloadTooLarge { error: &'static str, detail: String },
    /// The vendor call or local processing failed. `status` is 500 unless
    /// the route passes the vendor status through.
    #[error("{error}: {detail}")]
    Upstream {
        status: StatusCode,
        error: &'static str,
        detail: String,
    },
}

impl ApiError {
    pub fn unprocessable(error: impl Into<String>) -> Self {
        Self::Unprocessable {
            error: error.into(),
            detail: None,
        }
    }

    pub fn invalid_body(detail: impl Into<String>) -> Self {
        Self::Unprocessable {
            error: INVALID_BODY.to_string(),
            detail: Some(detail.into()),
        }
    }

    /// A 500 carrying `label` and the underlying cause.
    pub fn internal(label: &'static str, cause: impl Display) -> Self {
        Self::Upstream {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            error: label,
            detail: cause.to_string(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Unprocessable { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Upstream { status, .. } => *status,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(%status, "{}", self);
        }

        let body = match self {
            ApiError::Unprocessable {
                error,
                detail: Some(detail),
            } => serde_json::json!({ "error": error, "detail": detail }),
            ApiError::Unprocessable { error, detail: None } => {
                serde_json::json!({ "error": error })
            }
            ApiError::BadRequest(error) => serde_json::json!({ "error": error }),
            ApiError::PayloadTooLarge { error, detail }
            | ApiError::Upstream { error, detail, .. } => {
                serde_json::json!({ "error": error, "detail": detail })
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Response body for both STT routes.
#[derive(Debug, Serialize, Deserialize)]
pub struct TranscriptResponse {
    pub text: String,
}

/// Wraps a vendor audio stream as an inline MP3 response without buffering.
pub(crate) fn audio_response(stream: AudioStream) -> Response {
    (
        [
            (header::CONTENT_TYPE, "audio/mpeg"),
            (header::CONTENT_DISPOSITION, "inline; filename=speech.mp3"),
        ],
        Body::from_stream(stream),
    )
        .into_response()
}

struct AudioUpload {
    filename: String,
    data: Bytes,
}

fn upload_error(err: MultipartError, label: &'static str) -> ApiError {
    match err.status() {
        StatusCode::PAYLOAD_TOO_LARGE => ApiError::PayloadTooLarge {
            error: label,
            detail: err.body_text(),
        },
        StatusCode::BAD_REQUEST => ApiError::invalid_body(err.body_text()),
        _ => ApiError::internal(label, err.body_text()),
    }
}

/// Reads the `file` part of a multipart upload. Other parts are skipped.
async fn read_audio_upload(
    multipart: Result<Multipart, MultipartRejection>,
    label: &'static str,
) -> Result<AudioUpload, ApiError> {
    let mut multipart = multipart.map_err(|e| ApiError::invalid_body(e.body_text()))?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| upload_error(e, label))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field.file_name().unwrap_or("audio").to_string();
        let data = field.bytes().await.map_err(|e| upload_error(e, label))?;
        return Ok(AudioUpload { filename, data });
    }

    Err(ApiError::unprocessable(MISSING_FILE))
}

/// Shared body of the chatbot and interview STT handlers.
pub(crate) async fn transcribe_upload(
    state: &AppState,
    multipart: Result<Multipart, MultipartRejection>,
    label: &'static str,
) -> Result<TranscriptResponse, ApiError> {
    let upload = read_audio_upload(multipart, label).await?;
    tracing::info!(filename = %upload.filename, bytes = upload.data.len(), "transcribing upload");

    let text = state
        .speech
        .transcribe(upload.data.to_vec(), &upload.filename)
        .await
        .map_err(|e| ApiError::internal(label, e))?;

    Ok(TranscriptResponse { text })
}
