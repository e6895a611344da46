//! Shared role codes for the Podium relay.
//!
//! A role code selects which persona handles a request: one of the three
//! interviewers (`A`, `B`, `C`) for agent chat and voice, or the `DEFAULT`
//! voice used by the chatbot. Both gateway crates and the server depend on
//! these types so the role vocabulary is defined exactly once.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error returned when a role code does not name a known role.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoleParseError {
    #[error("unknown role code: {0}")]
    Unknown(String),
}

/// One of the three interviewer personas.
///
/// Each interviewer has its own voice and its own vendor-side agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Interviewer {
    A,
    B,
    C,
}

impl Interviewer {
    /// All interviewers, in code order.
    pub const ALL: [Interviewer; 3] = [Interviewer::A, Interviewer::B, Interviewer::C];

    /// Returns the wire code for this interviewer.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
        }
    }
}

impl fmt::Display for Interviewer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Interviewer {
    type Err = RoleParseError;

    /// Parses a role code case-insensitively, ignoring surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A" => Ok(Self::A),
            "B" => Ok(Self::B),
            "C" => Ok(Self::C),
            _ => Err(RoleParseError::Unknown(s.to_string())),
        }
    }
}

/// A role that owns a synthesis voice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum VoiceRole {
    Interviewer(Interviewer),
    #[default]
    Default,
}

impl VoiceRole {
    /// Returns the wire code for this voice role.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Interviewer(interviewer) => interviewer.as_str(),
            Self::Default => "DEFAULT",
        }
    }
}

impl From<Interviewer> for VoiceRole {
    fn from(interviewer: Interviewer) -> Self {
        Self::Interviewer(interviewer)
    }
}

impl fmt::Display for VoiceRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VoiceRole {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("DEFAULT") {
            return Ok(Self::Default);
        }
        s.parse::<Interviewer>().map(Self::Interviewer)
    }
}
