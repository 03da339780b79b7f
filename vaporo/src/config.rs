//! Gateway configuration file.
//!
//! ```toml
//! hostname       = "steam.example.org"
//! secret         = "component-secret"
//! authorized_jid = "me@example.org"
//!
//! [steam]
//! login    = "account"
//! password = "password"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use vaporo_steam::{Credentials, FileSentry, auth::DEFAULT_ONE_TIME_CODE};

use crate::errors::GatewayError;

/// Steam connection manager used when none is configured.
pub const DEFAULT_STEAM_SERVER: &str = "146.66.152.12:27017";
/// Sentry file used when none is configured.
pub const DEFAULT_SENTRY_PATH: &str = "sentry.bin";

/// Everything the gateway needs to start.
#[derive(Clone, Deserialize)]
pub struct Config {
    /// Gateway domain; Steam contacts appear as `<steamid>@hostname`.
    pub hostname:       String,
    /// Component shared secret.
    pub secret:         String,
    /// The only address allowed to use this gateway.
    pub authorized_jid: String,
    /// Steam account settings.
    pub steam:          SteamConfig,
}

/// The `[steam]` section.
#[derive(Clone, Deserialize)]
pub struct SteamConfig {
    /// Account name.
    pub login:      String,
    /// Account password.
    pub password:   String,
    /// `host:port` of the connection manager.
    #[serde(default = "default_server")]
    pub server:     String,
    /// Where the sentry token is cached.
    #[serde(default = "default_sentry")]
    pub sentry:     PathBuf,
    /// One-time code sent when no sentry token is cached.
    #[serde(default = "default_guard_code")]
    pub guard_code: String,
}

fn default_server() -> String { DEFAULT_STEAM_SERVER.to_string() }
fn default_sentry() -> PathBuf { PathBuf::from(DEFAULT_SENTRY_PATH) }
fn default_guard_code() -> String { DEFAULT_ONE_TIME_CODE.to_string() }

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("hostname", &self.hostname)
            .field("authorized_jid", &self.authorized_jid)
            .field("steam_login", &self.steam.login)
            .field("steam_server", &self.steam.server)
            .field("sentry", &self.steam.sentry)
            .finish_non_exhaustive()
    }
}

impl Config {
    /// Read and validate a TOML file.
    pub fn load(path: &Path) -> Result<Self, GatewayError> {
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Parse and validate TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, GatewayError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject empty required values.
    pub fn validate(&self) -> Result<(), GatewayError> {
        let required = [
            ("hostname", &self.hostname),
            ("secret", &self.secret),
            ("authorized_jid", &self.authorized_jid),
            ("steam.login", &self.steam.login),
            ("steam.password", &self.steam.password),
            ("steam.server", &self.steam.server),
        ];
        for (key, value) in required {
            if value.trim().is_empty() {
                return Err(GatewayError::Config(format!("`{key}` must not be empty")));
            }
        }
        Ok(())
    }

    /// The sentry token file at `steam.sentry`.
    pub fn sentry_store(&self) -> FileSentry {
        FileSentry::new(self.steam.sentry.clone())
    }

    /// Steam credentials for the session.
    pub fn credentials(&self) -> Credentials {
        Credentials::new(&self.steam.login, &self.steam.password)
            .one_time_code(&self.steam.guard_code)
    }
}
