//! Speech gateway for the Podium relay.
//!
//! Wraps the ElevenLabs HTTP API for two operations: rendering text to an
//! MPEG audio stream with a role-specific voice, and transcribing an uploaded
//! audio file back to text. Voice identities are resolved from an immutable
//! [`VoiceTable`] built once at startup.
//!
//! Synthesized audio is returned as a lazy [`AudioStream`] so callers can
//! forward the vendor body to their own client without buffering it.

pub mod config;
pub mod error;
pub mod gateway;
pub mod stt;
pub mod tts;

pub use config::{
    SpeechConfig, VoiceTable, DEFAULT_ELEVENLABS_BASE_URL, DEFAULT_TTS_MODEL_ID,
};
pub use error::VoiceError;
pub use gateway::SpeechGateway;
pub use tts::AudioStream;
