use podium_types::Interviewer;
use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChatError {
    #[error("no API key or agent id configured for interviewer {0}")]
    MissingAgent(Interviewer),

    #[error("Dify returned {status}: {body}")]
    Upstream { status: StatusCode, body: String },

    #[error("Dify unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected Dify response: {0}")]
    Decode(String),
}
