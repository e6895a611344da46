//! Handlers for the anonymous chatbot under `/chatbot`.

use crate::{
    api::{self, ApiError, TranscriptResponse},
    AppState,
};
use axum::{
    extract::{
        multipart::MultipartRejection, rejection::JsonRejection, Extension, Form, FromRequest,
        Json, Multipart, Request,
    },
    http::header,
    response::Response,
};
use podium_agents::ChatError;
use podium_types::VoiceRole;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

const STT_FAILED: &str = "STT 실패";
const TTS_FAILED: &str = "TTS 실패";
const CHAT_FAILED: &str = "챗봇 실패";
const DIFY_FAILED: &str = "Dify 실패";
const MISSING_TEXT: &str = "text 필드가 필요합니다.";

/// User id sent to the vendor when the caller does not supply one.
pub const GUEST_USER: &str = "guest";

/// Form body for `POST /chatbot/tts`.
#[derive(Debug, Deserialize)]
pub struct TtsForm {
    pub text: String,
}

/// The `text` field of `POST /chatbot/tts`, read from either a
/// url-encoded form or a `multipart/form-data` body.
#[derive(Debug)]
pub struct TtsText(pub String);

fn missing_text(detail: String) -> ApiError {
    ApiError::Unprocessable {
        error: MISSING_TEXT.to_string(),
        detail: Some(detail),
    }
}

fn is_multipart(req: &Request) -> bool {
    req.headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| {
            value
                .trim_start()
                .to_ascii_lowercase()
                .starts_with("multipart/form-data")
        })
}

impl<S> FromRequest<S> for TtsText
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !is_multipart(&req) {
            let Form(form) = Form::<TtsForm>::from_request(req, state)
                .await
                .map_err(|e| missing_text(e.body_text()))?;
            return Ok(Self(form.text));
        }

        let mut multipart = Multipart::from_request(req, state)
            .await
            .map_err(|e| missing_text(e.body_text()))?;

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| missing_text(e.body_text()))?
        {
            if field.name() == Some("text") {
                let text = field.text().await.map_err(|e| missing_text(e.body_text()))?;
                return Ok(Self(text));
            }
        }

        Err(ApiError::unprocessable(MISSING_TEXT))
    }
}

/// Request body for `POST /chatbot/chat`.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub user: Option<String>,
}

/// Response body for `POST /chatbot/chat`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub answer: Option<String>,
    pub id: Option<String>,
}

/// Handler for `POST /chatbot/stt`.
pub async fn stt_handler(
    Extension(state): Extension<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<TranscriptResponse>, ApiError> {
    api::transcribe_upload(&state, multipart, STT_FAILED)
        .await
        .map(Json)
}

/// Handler for `POST /chatbot/tts`. Always speaks with the default voice.
pub async fn tts_handler(
    Extension(state): Extension<Arc<AppState>>,
    TtsText(text): TtsText,
) -> Result<Response, ApiError> {
    let stream = state
        .speech
        .synthesize(&text, VoiceRole::Default.as_str())
        .await
        .map_err(|e| ApiError::internal(TTS_FAILED, e))?;

    Ok(api::audio_response(stream))
}

/// Handler for `POST /chatbot/chat`.
///
/// A non-success vendor status is passed through to the caller along with
/// the vendor's body text.
pub async fn chat_handler(
    Extension(state): Extension<Arc<AppState>>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let Json(payload) = payload.map_err(|e| ApiError::internal(CHAT_FAILED, e.body_text()))?;
    let user = payload.user.as_deref().unwrap_or(GUEST_USER);

    tracing::info!(user, "chatbot message");

    match state.chat.chat(&payload.query, user).await {
        Ok(reply) => Ok(Json(ChatResponse {
            answer: reply.answer,
            id: reply.id,
        })),
        Err(ChatError::Upstream { status, body }) => Err(ApiError::Upstream {
            status,
            error: DIFY_FAILED,
            detail: body,
        }),
        Err(e) => Err(ApiError::internal(CHAT_FAILED, e)),
    }
}
