use serde::{Deserialize, Serialize};

/// Request body for both chat-messages endpoints.
#[derive(Debug, Serialize)]
pub(crate) struct ChatMessageRequest<'a> {
    pub inputs: ChatInputs<'a>,
    pub query: &'a str,
    pub user: &'a str,
}

/// Agent input variables. Serializes to `{}` in single-agent mode.
#[derive(Debug, Default, Serialize)]
pub(crate) struct ChatInputs<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<&'a str>,
}

/// Fields extracted from a chat-messages response; everything else is dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ChatReply {
    #[serde(default)]
    pub answer: Option<String>,
    /// Message id assigned by the vendor.
    #[serde(default)]
    pub id: Option<String>,
}
