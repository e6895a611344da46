use podium_types::Interviewer;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Production Dify API root.
pub const DEFAULT_DIFY_BASE_URL: &str = "https://api.dify.ai/v1";

fn default_base_url() -> String {
    DEFAULT_DIFY_BASE_URL.to_string()
}

#[derive(Clone, Serialize, Deserialize)]
pub struct DifyConfig {
    /// Shared credential for single-agent (chatbot) mode.
    #[serde(default, skip_serializing)]
    pub api_key: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-interviewer credentials for multi-agent mode.
    #[serde(default)]
    pub agents: AgentTable,
}

impl Default for DifyConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_base_url(),
            agents: AgentTable::default(),
        }
    }
}

impl fmt::Debug for DifyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DifyConfig")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("agents", &self.agents)
            .finish()
    }
}

impl DifyConfig {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into(),
            agents: AgentTable::default(),
        }
    }

    /// Sets the credentials for `role`, returning the updated config.
    pub fn with_agent(
        mut self,
        role: Interviewer,
        api_key: impl Into<String>,
        agent_id: impl Into<String>,
    ) -> Self {
        *self.agents.get_mut(role) = AgentCredentials::new(api_key, agent_id);
        self
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AgentTable {
    #[serde(default)]
    pub a: AgentCredentials,
    #[serde(default)]
    pub b: AgentCredentials,
    #[serde(default)]
    pub c: AgentCredentials,
}

impl AgentTable {
    pub fn get(&self, role: Interviewer) -> &AgentCredentials {
        match role {
            Interviewer::A => &self.a,
            Interviewer::B => &self.b,
            Interviewer::C => &self.c,
        }
    }

    pub fn get_mut(&mut self, role: Interviewer) -> &mut AgentCredentials {
        match role {
            Interviewer::A => &mut self.a,
            Interviewer::B => &mut self.b,
            Interviewer::C => &mut self.c,
        }
    }

    /// Interviewers missing either an API key or an agent id.
    pub fn missing_roles(&self) -> Vec<Interviewer> {
        Interviewer::ALL
            .into_iter()
            .filter(|role| !self.get(*role).is_complete())
            .collect()
    }
}

/// API key and agent id addressing one vendor-side persona.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct AgentCredentials {
    #[serde(default, skip_serializing)]
    pub api_key: String,
    #[serde(default)]
    pub agent_id: String,
}

impl fmt::Debug for AgentCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AgentCredentials")
            .field("api_key", &"[REDACTED]")
            .field("agent_id", &self.agent_id)
            .finish()
    }
}

impl AgentCredentials {
    pub fn new(api_key: impl Into<String>, agent_id: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into().trim().to_string(),
            agent_id: agent_id.into().trim().to_string(),
        }
    }

    /// Both values are present and non-blank.
    pub fn is_complete(&self) -> bool {
        !self.api_key.trim().is_empty() && !self.agent_id.trim().is_empty()
    }
}
