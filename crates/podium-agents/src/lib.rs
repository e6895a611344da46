//! Conversational gateway for the Podium relay.
//!
//! Talks to the Dify chat API in two modes that share one request shape
//! (`{inputs, query, user}` with a bearer credential):
//!
//! - single-agent mode ([`ChatGateway::chat`]) uses one shared API key and
//!   the generic `/chat-messages` endpoint;
//! - multi-agent mode ([`ChatGateway::agent_chat`]) resolves a per-interviewer
//!   API key and agent id and calls `/agents/{agent_id}/chat-messages`.
//!
//! The vendor owns conversation state; nothing here is remembered between
//! calls.

pub mod client;
pub mod config;
pub mod error;
pub mod messages;

pub use client::ChatGateway;
pub use config::{AgentCredentials, AgentTable, DifyConfig, DEFAULT_DIFY_BASE_URL};
pub use error::ChatError;
pub use messages::ChatReply;
