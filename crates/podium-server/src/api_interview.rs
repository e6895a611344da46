//! Handlers for the multi-interviewer mock interview under `/interview`.
//!
//! Each interviewer (`A`, `B`, `C`) has its own voice and its own vendor-side
//! agent. Roles are resolved against the startup configuration before any
//! vendor call is made.

use crate::{
    api::{self, ApiError, TranscriptResponse},
    AppState,
};
use axum::{
    extract::{multipart::MultipartRejection, rejection::JsonRejection, Extension, Json, Multipart},
    response::Response,
};
use podium_agents::ChatError;
use podium_types::Interviewer;
use podium_voice::VoiceError;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

const EMPTY_TTS_FIELDS: &str = "text 또는 role이 비어 있습니다.";
const EMPTY_CHAT_FIELDS: &str = "message 또는 role이 비어 있습니다.";
const MISSING_AGENT: &str = "면접관 API 키 또는 Agent ID를 찾을 수 없습니다.";
const TTS_FAILED: &str = "TTS 처리 중 오류 발생";
const STT_FAILED: &str = "STT 처리 중 오류 발생";
const START_FAILED: &str = "Dify API 호출 실패";
const CHAT_FAILED: &str = "Dify API 오류";

/// Prompt sent to the selected interviewer to open the interview.
pub const OPENING_QUERY: &str = "자기소개 부탁드립니다.";
/// Candidate name used when `/start` is called without one.
pub const ANONYMOUS_NAME: &str = "익명";
/// Question returned when the agent reply has no `answer`.
pub const NO_QUESTION: &str = "질문 생성 실패";
/// Reply returned when the agent reply has no `answer`.
pub const NO_REPLY: &str = "면접관의 응답을 받아올 수 없습니다.";

/// Request body for `POST /interview/tts`.
#[derive(Debug, Deserialize)]
pub struct TtsRequest {
    pub text: String,
    pub role: String,
}

/// Request body for `POST /interview/start`.
#[derive(Debug, Deserialize)]
pub struct StartRequest {
    #[serde(default)]
    pub name: Option<String>,
}

/// Response body for `POST /interview/start`.
#[derive(Debug, Serialize, Deserialize)]
pub struct StartResponse {
    pub interviewer: Interviewer,
    pub question: String,
}

/// Request body for `POST /interview/chat`.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    pub role: String,
    /// Candidate name, forwarded as both the vendor user id and the `name`
    /// input variable.
    pub user: String,
}

/// Response body for `POST /interview/chat`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub reply: String,
}

fn missing_agent() -> ApiError {
    ApiError::BadRequest(MISSING_AGENT.to_string())
}

/// Picks one of the three interviewers uniformly at random.
fn pick_interviewer() -> Interviewer {
    Interviewer::ALL
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(Interviewer::A)
}

/// Handler for `POST /interview/tts`.
pub async fn tts_handler(
    Extension(state): Extension<Arc<AppState>>,
    payload: Result<Json<TtsRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(payload) = payload.map_err(|e| ApiError::invalid_body(e.body_text()))?;

    tracing::info!(
        role = %payload.role,
        chars = payload.text.chars().count(),
        "interview tts request"
    );

    if payload.text.trim().is_empty() || payload.role.trim().is_empty() {
        return Err(ApiError::unprocessable(EMPTY_TTS_FIELDS));
    }

    match state.speech.synthesize(&payload.text, &payload.role).await {
        Ok(stream) => Ok(api::audio_response(stream)),
        Err(e @ VoiceError::InvalidRole(_)) => Err(ApiError::BadRequest(e.to_string())),
        Err(e) => Err(ApiError::internal(TTS_FAILED, e)),
    }
}

/// Handler for `POST /interview/stt`.
pub async fn stt_handler(
    Extension(state): Extension<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<TranscriptResponse>, ApiError> {
    api::transcribe_upload(&state, multipart, STT_FAILED)
        .await
        .map(Json)
}

/// Handler for `POST /interview/start`.
///
/// Selects a random interviewer and asks its agent for the opening question.
pub async fn start_handler(
    Extension(state): Extension<Arc<AppState>>,
    payload: Result<Json<StartRequest>, JsonRejection>,
) -> Result<Json<StartResponse>, ApiError> {
    let Json(payload) = payload.map_err(|e| ApiError::internal(START_FAILED, e.body_text()))?;
    let name = payload
        .name
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| ANONYMOUS_NAME.to_string());

    let interviewer = pick_interviewer();
    tracing::info!(%interviewer, user = %name, "starting interview");

    let reply = match state
        .chat
        .agent_chat(interviewer, &name, OPENING_QUERY)
        .await
    {
        Ok(reply) => reply,
        Err(ChatError::MissingAgent(_)) => return Err(missing_agent()),
        Err(e) => return Err(ApiError::internal(START_FAILED, e)),
    };

    Ok(Json(StartResponse {
        interviewer,
        question: reply.answer.unwrap_or_else(|| NO_QUESTION.to_string()),
    }))
}

/// Handler for `POST /interview/chat`.
pub async fn chat_handler(
    Extension(state): Extension<Arc<AppState>>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let Json(payload) = payload.map_err(|e| ApiError::invalid_body(e.body_text()))?;

    tracing::info!(role = %payload.role, user = %payload.user, "interview chat request");

    if payload.message.trim().is_empty() || payload.role.trim().is_empty() {
        return Err(ApiError::unprocessable(EMPTY_CHAT_FIELDS));
    }

    let interviewer: Interviewer = payload.role.parse().map_err(|_| missing_agent())?;

    let reply = match state
        .chat
        .agent_chat(interviewer, &payload.user, &payload.message)
        .await
    {
        Ok(reply) => reply,
        Err(ChatError::MissingAgent(_)) => return Err(missing_agent()),
        Err(e) => return Err(ApiError::internal(CHAT_FAILED, e)),
    };

    Ok(Json(ChatResponse {
        reply: reply.answer.unwrap_or_else(|| NO_REPLY.to_string()),
    }))
}
