use crate::config::{AgentCredentials, DifyConfig};
use crate::error::ChatError;
use crate::messages::{ChatInputs, ChatMessageRequest, ChatReply};
use podium_types::Interviewer;
use reqwest::StatusCode;
use std::sync::Arc;

/// Client for the conversational vendor.
#[derive(Debug, Clone)]
pub struct ChatGateway {
    config: Arc<DifyConfig>,
    http: reqwest::Client,
}

impl ChatGateway {
    pub fn new(config: DifyConfig, http: reqwest::Client) -> Self {
        Self {
            config: Arc::new(config),
            http,
        }
    }

    pub fn config(&self) -> &DifyConfig {
        &self.config
    }

    /// Returns the credentials for `role`, or [`ChatError::MissingAgent`] if
    /// either the API key or the agent id is blank.
    pub fn agent(&self, role: Interviewer) -> Result<&AgentCredentials, ChatError> {
        let creds = self.config.agents.get(role);
        if creds.is_complete() {
            Ok(creds)
        } else {
            Err(ChatError::MissingAgent(role))
        }
    }

    /// Single-agent chat with the shared credential and no input variables.
    pub async fn chat(&self, query: &str, user: &str) -> Result<ChatReply, ChatError> {
        let request = ChatMessageRequest {
            inputs: ChatInputs::default(),
            query,
            user,
        };
        self.send(self.endpoint("chat-messages"), &self.config.api_key, &request)
            .await
    }

    /// Sends `query` to the agent persona behind `role`, with `name` both as
    /// the `name` input variable and as the vendor-side user id.
    ///
    /// Unconfigured roles fail before any network I/O.
    pub async fn agent_chat(
        &self,
        role: Interviewer,
        name: &str,
        query: &str,
    ) -> Result<ChatReply, ChatError> {
        let creds = self.agent(role)?;
        let request = ChatMessageRequest {
            inputs: ChatInputs { name: Some(name) },
            query,
            user: name,
        };
        let url = self.endpoint(&format!("agents/{}/chat-messages", creds.agent_id));

        tracing::debug!(
            %role,
            agent_id = %creds.agent_id,
            user = name,
            "forwarding to interviewer agent"
        );

        self.send(url, &creds.api_key, &request).await
    }

    async fn send(
        &self,
        url: String,
        api_key: &str,
        request: &ChatMessageRequest<'_>,
    ) -> Result<ChatReply, ChatError> {
        let response = self
            .http
            .post(url)
            .bearer_auth(api_key)
            .json(request)
            .send()
            .await?;

        // Anything but 200, including other 2xx codes, is an upstream failure.
        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(%status, "chat request rejected by Dify");
            return Err(ChatError::Upstream { status, body });
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| ChatError::Decode(e.to_string()))
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }
}
