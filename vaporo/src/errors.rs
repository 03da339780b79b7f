//! Error type for the gateway.

use std::{fmt, io};

/// Everything that can stop the gateway from running.
///
/// Logon failures and bad stanzas are not here: the former reach the
/// authorized user as a chat message, the latter get a stanza error reply.
/// Steam transport failures only reset the session.
#[derive(Debug)]
pub enum GatewayError {
    /// A file could not be read.
    Io(io::Error),
    /// The configuration is malformed or incomplete.
    Config(String),
}

impl fmt::Display for GatewayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e)     => write!(f, "I/O error: {e}"),
            Self::Config(s) => write!(f, "configuration error: {s}"),
        }
    }
}

impl std::error::Error for GatewayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e)     => Some(e),
            Self::Config(_) => None,
        }
    }
}

impl From<io::Error> for GatewayError {
    fn from(e: io::Error) -> Self { Self::Io(e) }
}

impl From<toml::de::Error> for GatewayError {
    fn from(e: toml::de::Error) -> Self { Self::Config(e.to_string()) }
}
