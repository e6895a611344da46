//! Podium relay server library logic.
//!
//! Mounts the `/chatbot` and `/interview` route groups over the speech and
//! conversational gateways. All state is read-only after startup.

pub mod api;
pub mod api_chatbot;
pub mod api_interview;
pub mod config;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Extension, Json, Router,
};
use podium_agents::ChatGateway;
use podium_voice::SpeechGateway;
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Speech vendor gateway (TTS and STT).
    pub speech: Arc<SpeechGateway>,
    /// Conversational vendor gateway (chatbot and interviewer agents).
    pub chat: Arc<ChatGateway>,
    /// Upper bound for uploaded audio on the STT routes.
    pub max_audio_bytes: usize,
}

impl AppState {
    pub fn new(speech: SpeechGateway, chat: ChatGateway, max_audio_bytes: usize) -> Self {
        Self {
            speech: Arc::new(speech),
            chat: Arc::new(chat),
            max_audio_bytes,
        }
    }

    /// Builds both gateways from loaded configuration, sharing one HTTP
    /// connection pool.
    pub fn from_config(config: &config::Config) -> Self {
        let http = reqwest::Client::new();
        Self::new(
            SpeechGateway::new(config.elevenlabs.clone(), http.clone()),
            ChatGateway::new(config.dify.clone(), http),
            config.uploads.max_audio_bytes,
        )
    }
}

/// Maximum request body size (2 MiB) outside the audio upload routes.
const MAX_REQUEST_BODY_BYTES: usize = 2 * 1024 * 1024;

async fn root() -> Json<Value> {
    Json(json!({ "message": "AI Interview & Chatbot API is running" }))
}

/// Health check handler.
async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Builds the application router with all routes.
pub fn app(state: AppState) -> Router {
    // Audio uploads get their own limit; the outer default applies elsewhere.
    let audio_limit = state.max_audio_bytes;

    let chatbot_routes = Router::new()
        .route("/tts", post(api_chatbot::tts_handler))
        .route("/chat", post(api_chatbot::chat_handler))
        .merge(
            Router::new()
                .route("/stt", post(api_chatbot::stt_handler))
                .layer(DefaultBodyLimit::max(audio_limit)),
        );

    let interview_routes = Router::new()
        .route("/tts", post(api_interview::tts_handler))
        .route("/start", post(api_interview::start_handler))
        .route("/chat", post(api_interview::chat_handler))
        .merge(
            Router::new()
                .route("/stt", post(api_interview::stt_handler))
                .layer(DefaultBodyLimit::max(audio_limit)),
        );

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .nest("/chatbot", chatbot_routes)
        .nest("/interview", interview_routes)
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(Extension(Arc::new(state)))
}
