//! Common type definitions for the Sound SDK

use crate::error::SoundError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Deployment target of the Sound API
///
/// Each environment maps to a fixed GraphQL endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Production,
    Preview,
    Staging,
    Development,
}

impl Environment {
    /// Every environment, production first
    pub const ALL: [Environment; 4] = [
        Environment::Production,
        Environment::Preview,
        Environment::Staging,
        Environment::Development,
    ];

    /// GraphQL endpoint URL for this environment
    pub fn endpoint(self) -> &'static str {
        match self {
            Environment::Production => "https://api.sound.xyz/graphql",
            Environment::Preview => "https://preview.api.sound.xyz/graphql",
            Environment::Staging => "https://staging.api.sound.xyz/graphql",
            Environment::Development => "http://localhost:4000/graphql",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Environment::Production => "production",
            Environment::Preview => "preview",
            Environment::Staging => "staging",
            Environment::Development => "development",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = SoundError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Environment::ALL
            .into_iter()
            .find(|env| env.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| SoundError::configuration(format!("unknown environment: {s}")))
    }
}
