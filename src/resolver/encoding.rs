//! Output treatment of resolved values.

use crate::secrets::{SecretError, SecretResult};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::fmt;

/// How resolved values are emitted
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Mode {
    /// Values are emitted as resolved (ConfigMap data)
    Config,
    /// Values are base64-encoded after resolution (Secret data)
    Secret,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Config => write!(f, "config"),
            Mode::Secret => write!(f, "secret"),
        }
    }
}

impl Mode {
    /// Apply this mode to a fully resolved value.
    pub fn apply(&self, entry: &str, value: String) -> SecretResult<String> {
        match self {
            Mode::Config => Ok(value),
            Mode::Secret => encode(entry, &value),
        }
    }
}

/// Standard base64 of an ASCII value.
pub fn encode(entry: &str, value: &str) -> SecretResult<String> {
    if let Some(position) = value.find(|c: char| !c.is_ascii()) {
        return Err(SecretError::Encoding {
            entry: entry.to_string(),
            reason: format!("non-ASCII character at byte {}", position),
        });
    }

    Ok(STANDARD.encode(value))
}
