use podium_types::{Interviewer, VoiceRole};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Production ElevenLabs API root.
pub const DEFAULT_ELEVENLABS_BASE_URL: &str = "https://api.elevenlabs.io/v1";

/// Synthesis model sent with every text-to-speech request.
pub const DEFAULT_TTS_MODEL_ID: &str = "eleven_multilingual_v2";

fn default_base_url() -> String {
    DEFAULT_ELEVENLABS_BASE_URL.to_string()
}

fn default_model_id() -> String {
    DEFAULT_TTS_MODEL_ID.to_string()
}

#[derive(Clone, Serialize, Deserialize)]
pub struct SpeechConfig {
    /// Value of the `xi-api-key` header.
    #[serde(default, skip_serializing)]
    pub api_key: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_model_id")]
    pub model_id: String,
    /// Optional `model_id` form field for transcription. Omitted when unset.
    #[serde(default)]
    pub stt_model_id: Option<String>,
    #[serde(default)]
    pub voices: VoiceTable,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_base_url(),
            model_id: default_model_id(),
            stt_model_id: None,
            voices: VoiceTable::default(),
        }
    }
}

impl fmt::Debug for SpeechConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpeechConfig")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("model_id", &self.model_id)
            .field("stt_model_id", &self.stt_model_id)
            .field("voices", &self.voices)
            .finish()
    }
}

impl SpeechConfig {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Sets the voice for `role`, returning the updated config.
    pub fn with_voice(mut self, role: VoiceRole, voice_id: impl Into<String>) -> Self {
        self.voices.set(role, voice_id);
        self
    }
}

/// Voice identifiers for each role.
///
/// Blank entries are treated the same as missing ones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceTable {
    #[serde(default)]
    pub a: Option<String>,
    #[serde(default)]
    pub b: Option<String>,
    #[serde(default)]
    pub c: Option<String>,
    #[serde(default)]
    pub default: Option<String>,
}

impl VoiceTable {
    /// Returns the configured voice id for `role`, if any.
    pub fn voice_id(&self, role: VoiceRole) -> Option<&str> {
        let slot = match role {
            VoiceRole::Interviewer(Interviewer::A) => &self.a,
            VoiceRole::Interviewer(Interviewer::B) => &self.b,
            VoiceRole::Interviewer(Interviewer::C) => &self.c,
            VoiceRole::Default => &self.default,
        };
        slot.as_deref().map(str::trim).filter(|id| !id.is_empty())
    }

    pub fn set(&mut self, role: VoiceRole, voice_id: impl Into<String>) {
        let value = Some(voice_id.into().trim().to_string());
        match role {
            VoiceRole::Interviewer(Interviewer::A) => self.a = value,
            VoiceRole::Interviewer(Interviewer::B) => self.b = value,
            VoiceRole::Interviewer(Interviewer::C) => self.c = value,
            VoiceRole::Default => self.default = value,
        }
    }

    /// Roles without a usable voice id.
    pub fn missing_roles(&self) -> Vec<VoiceRole> {
        Interviewer::ALL
            .into_iter()
            .map(VoiceRole::from)
            .chain(std::iter::once(VoiceRole::Default))
            .filter(|role| self.voice_id(*role).is_none())
            .collect()
    }
}
