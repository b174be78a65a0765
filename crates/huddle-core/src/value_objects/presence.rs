//! Presence status - the online/offline state attached to a user

use serde::{Deserialize, Serialize};
use std::fmt;

/// Presence status of a roster entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresenceStatus {
    Online,
    Offline,
}

impl PresenceStatus {
    /// Wire representation stored in documents
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Online => "online",
            Self::Offline => "offline",
        }
    }
}

/// Error when parsing a presence status from string
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown presence status: {0}")]
pub struct PresenceStatusParseError(pub String);

impl fmt::Display for PresenceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PresenceStatus {
    type Err = PresenceStatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "online" => Ok(Self::Online),
            "offline" => Ok(Self::Offline),
            other => Err(PresenceStatusParseError(other.to_string())),
        }
    }
}
