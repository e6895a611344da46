use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum VoiceError {
    #[error("Invalid voice role: {0}")]
    InvalidRole(String),

    #[error("TTS request failed: {status} - {body}")]
    Tts { status: StatusCode, body: String },

    #[error("STT request failed: {status}: {body}")]
    Stt { status: StatusCode, body: String },

    #[error("speech vendor unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected speech vendor response: {0}")]
    Decode(String),
}
