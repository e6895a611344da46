use crate::error::VoiceError;
use crate::gateway::SpeechGateway;
use bytes::Bytes;
use futures_util::stream::BoxStream;
use futures_util::{StreamExt, TryStreamExt};
use reqwest::StatusCode;
use serde::Serialize;

const VOICE_STABILITY: f64 = 0.5;
const VOICE_SIMILARITY_BOOST: f64 = 0.8;

/// Audio bytes as they arrive from the vendor.
pub type AudioStream = BoxStream<'static, Result<Bytes, VoiceError>>;

#[derive(Debug, Serialize)]
struct VoiceSettings {
    stability: f64,
    similarity_boost: f64,
}

#[derive(Debug, Serialize)]
struct SynthesisRequest<'a> {
    text: &'a str,
    model_id: &'a str,
    voice_settings: VoiceSettings,
}

impl SpeechGateway {
    /// Synthesizes `text` with the voice configured for `role`.
    ///
    /// The vendor status is checked before returning; the body itself is
    /// handed back unread so the caller can stream it onward.
    pub async fn synthesize(&self, text: &str, role: &str) -> Result<AudioStream, VoiceError> {
        let voice_id = self.resolve_voice(role)?;
        let url = self.endpoint(&format!("text-to-speech/{}/stream", voice_id));

        let request = SynthesisRequest {
            text,
            model_id: &self.config.model_id,
            voice_settings: VoiceSettings {
                stability: VOICE_STABILITY,
                similarity_boost: VOICE_SIMILARITY_BOOST,
            },
        };

        tracing::debug!(
            role,
            voice_id,
            chars = text.chars().count(),
            "requesting speech synthesis"
        );

        let response = self
            .http
            .post(url)
            .header("xi-api-key", &self.config.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(%status, role, "speech synthesis rejected by vendor");
            return Err(VoiceError::Tts { status, body });
        }

        Ok(response.bytes_stream().map_err(VoiceError::from).boxed())
    }
}
