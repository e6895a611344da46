//! Server configuration loading from file and environment variables.

use podium_agents::DifyConfig;
use podium_types::{Interviewer, VoiceRole};
use podium_voice::SpeechConfig;
use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr};
use thiserror::Error;

/// Top-level server configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Server network settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Upload limits for the STT routes.
    #[serde(default)]
    pub uploads: UploadConfig,

    /// Speech vendor credentials and voice table.
    #[serde(default)]
    pub elevenlabs: SpeechConfig,

    /// Conversational vendor credentials and agent table.
    #[serde(default)]
    pub dify: DifyConfig,
}

/// Network configuration for the HTTP server.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to.
    #[serde(default = "default_host")]
    pub host: IpAddr,

    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "podium_server=debug,info").
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Whether to output logs in JSON format.
    #[serde(default)]
    pub json: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadConfig {
    /// Largest accepted audio upload, in bytes.
    #[serde(default = "default_max_audio_bytes")]
    pub max_audio_bytes: usize,
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1))
}

fn default_port() -> u16 {
    8000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_audio_bytes() -> usize {
    25 * 1024 * 1024
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_audio_bytes: default_max_audio_bytes(),
        }
    }
}

impl Config {
    /// Logs every role that cannot be served with the current configuration.
    ///
    /// Requests for those roles are rejected with 400 at runtime; the server
    /// still starts so the other routes remain usable.
    pub fn warn_unconfigured(&self) {
        if self.elevenlabs.api_key.is_empty() {
            tracing::warn!("ELEVEN_API_KEY is not set; speech requests will fail");
        }
        if self.dify.api_key.is_empty() {
            tracing::warn!("DIFY_API_KEY is not set; chatbot requests will fail");
        }
        for role in self.elevenlabs.voices.missing_roles() {
            tracing::warn!(%role, "no voice id configured");
        }
        for role in self.dify.agents.missing_roles() {
            tracing::warn!(%role, "no agent API key or agent id configured");
        }
    }
}

/// Config file used when neither the command line nor the environment names one.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Where the config file path was taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    CliArg,
    EnvVar,
    Default,
}

impl ConfigSource {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CliArg => "cli-arg",
            Self::EnvVar => "env-var",
            Self::Default => "default",
        }
    }
}

/// Picks the config file path: the first CLI argument, then
/// `PODIUM_CONFIG_PATH`, then [`DEFAULT_CONFIG_PATH`]. Blank values are skipped.
pub fn resolve_config_path(
    cli_arg: Option<String>,
    env_value: Option<String>,
) -> (String, ConfigSource) {
    let non_blank = |value: Option<String>| value.filter(|v| !v.trim().is_empty());

    if let Some(path) = non_blank(cli_arg) {
        (path, ConfigSource::CliArg)
    } else if let Some(path) = non_blank(env_value) {
        (path, ConfigSource::EnvVar)
    } else {
        (DEFAULT_CONFIG_PATH.to_string(), ConfigSource::Default)
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse the configuration file.
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Loads configuration from a TOML file, falling back to defaults, then
/// applies environment overrides (see [`apply_overrides`]).
///
/// # Errors
///
/// Returns `ConfigError` if the file exists but cannot be read or parsed.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let mut config = match path {
        Some(p) => match std::fs::read_to_string(p) {
            Ok(contents) => toml::from_str(&contents)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = p, "config file not found, using defaults");
                Config::default()
            }
            Err(e) => return Err(ConfigError::FileRead(e)),
        },
        None => Config::default(),
    };

    trim_credentials(&mut config);
    apply_overrides(&mut config, |key| std::env::var(key).ok());
    Ok(config)
}

/// Strips stray whitespace from file-provided keys and ids.
fn trim_credentials(config: &mut Config) {
    let trim = |value: &mut String| *value = value.trim().to_string();

    trim(&mut config.elevenlabs.api_key);
    for slot in [
        &mut config.elevenlabs.voices.a,
        &mut config.elevenlabs.voices.b,
        &mut config.elevenlabs.voices.c,
        &mut config.elevenlabs.voices.default,
    ] {
        if let Some(voice) = slot.as_mut() {
            trim(voice);
        }
    }

    trim(&mut config.dify.api_key);
    for role in Interviewer::ALL {
        let agent = config.dify.agents.get_mut(role);
        trim(&mut agent.api_key);
        trim(&mut agent.agent_id);
    }
}

/// Applies overrides from `lookup` on top of `config`.
///
/// Values are trimmed; blank values are ignored. Recognized keys:
/// - `PODIUM_HOST`, `PODIUM_PORT`, `PODIUM_LOG_LEVEL`, `PODIUM_LOG_JSON`
///   ("true" or "1" to enable), `PODIUM_MAX_AUDIO_BYTES`
/// - `ELEVEN_API_KEY`, `ELEVENLABS_BASE_URL`, `ELEVENLABS_MODEL_ID`,
///   `ELEVENLABS_STT_MODEL_ID`, `VOICE_ID_A`, `VOICE_ID_B`, `VOICE_ID_C`,
///   `VOICE_ID_DEFAULT`
/// - `DIFY_API_KEY`, `DIFY_BASE_URL`, `DIFY_AGENT_{A,B,C}_API_KEY`,
///   `DIFY_AGENT_{A,B,C}_ID`
pub fn apply_overrides<F>(config: &mut Config, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| {
        lookup(key)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    };

    if let Some(host) = get("PODIUM_HOST") {
        if let Ok(parsed) = host.parse() {
            config.server.host = parsed;
        }
    }
    if let Some(port) = get("PODIUM_PORT") {
        if let Ok(parsed) = port.parse() {
            config.server.port = parsed;
        }
    }
    if let Some(level) = get("PODIUM_LOG_LEVEL") {
        config.logging.level = level;
    }
    if let Some(json) = get("PODIUM_LOG_JSON") {
        config.logging.json = json == "true" || json == "1";
    }
    if let Some(limit) = get("PODIUM_MAX_AUDIO_BYTES") {
        if let Ok(parsed) = limit.parse() {
            config.uploads.max_audio_bytes = parsed;
        }
    }

    let speech = &mut config.elevenlabs;
    if let Some(key) = get("ELEVEN_API_KEY") {
        speech.api_key = key;
    }
    if let Some(url) = get("ELEVENLABS_BASE_URL") {
        speech.base_url = url;
    }
    if let Some(model) = get("ELEVENLABS_MODEL_ID") {
        speech.model_id = model;
    }
    if let Some(model) = get("ELEVENLABS_STT_MODEL_ID") {
        speech.stt_model_id = Some(model);
    }
    for role in Interviewer::ALL {
        if let Some(voice) = get(&format!("VOICE_ID_{}", role)) {
            speech.voices.set(role.into(), voice);
        }
    }
    if let Some(voice) = get("VOICE_ID_DEFAULT") {
        speech.voices.set(VoiceRole::Default, voice);
    }

    let dify = &mut config.dify;
    if let Some(key) = get("DIFY_API_KEY") {
        dify.api_key = key;
    }
    if let Some(url) = get("DIFY_BASE_URL") {
        dify.base_url = url;
    }
    for role in Interviewer::ALL {
        let agent = dify.agents.get_mut(role);
        if let Some(key) = get(&format!("DIFY_AGENT_{}_API_KEY", role)) {
            agent.api_key = key;
        }
        if let Some(id) = get(&format!("DIFY_AGENT_{}_ID", role)) {
            agent.agent_id = id;
        }
    }
}
