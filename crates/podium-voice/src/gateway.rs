use crate::config::SpeechConfig;
use crate::error::VoiceError;
use podium_types::VoiceRole;
use std::sync::Arc;

/// Client for the speech vendor.
///
/// Cheap to clone; the configuration is shared and never mutated after
/// construction.
#[derive(Debug, Clone)]
pub struct SpeechGateway {
    pub(crate) config: Arc<SpeechConfig>,
    pub(crate) http: reqwest::Client,
}

impl SpeechGateway {
    pub fn new(config: SpeechConfig, http: reqwest::Client) -> Self {
        Self {
            config: Arc::new(config),
            http,
        }
    }

    pub fn config(&self) -> &SpeechConfig {
        &self.config
    }

    /// Resolves a role code (case-insensitive) to its configured voice id.
    ///
    /// Unknown codes and roles without a voice both yield
    /// [`VoiceError::InvalidRole`], before any network I/O.
    pub fn resolve_voice(&self, role: &str) -> Result<&str, VoiceError> {
        role.parse::<VoiceRole>()
            .ok()
            .and_then(|parsed| self.config.voices.voice_id(parsed))
            .ok_or_else(|| VoiceError::InvalidRole(role.to_string()))
    }

    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }
}
