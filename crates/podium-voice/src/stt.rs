use crate::error::VoiceError;
use crate::gateway::SpeechGateway;
use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct TranscriptionResponse {
    #[serde(default)]
    text: Option<String>,
}

impl SpeechGateway {
    /// Uploads `audio` for transcription and returns the recognized text.
    ///
    /// A response without a `text` field yields an empty string.
    pub async fn transcribe(&self, audio: Vec<u8>, filename: &str) -> Result<String, VoiceError> {
        let size = audio.len();
        let mut form = Form::new().part("file", Part::bytes(audio).file_name(filename.to_string()));
        if let Some(model_id) = self.config.stt_model_id.as_deref() {
            form = form.text("model_id", model_id.to_string());
        }

        tracing::debug!(filename, bytes = size, "requesting transcription");

        let response = self
            .http
            .post(self.endpoint("audio-to-text"))
            .header("xi-api-key", &self.config.api_key)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(%status, filename, "transcription rejected by vendor");
            return Err(VoiceError::Stt { status, body });
        }

        let body = response.bytes().await?;
        let parsed: TranscriptionResponse = serde_json::from_slice(&body)
            .map_err(|e| VoiceError::Decode(format!("transcription body: {}", e)))?;

        Ok(parsed.text.unwrap_or_default())
    }
}
