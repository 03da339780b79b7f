//! Authentication and session state machine.
//!
//! # Flow
//!
//! ```text
//! Disconnected ─connect─▶ Connecting ─tcp up─▶ HandshakeWait
//!     ─handshake─▶ LoggingOn ─logon ok─▶ Authenticated
//!                            └─logon failed─▶ Failed
//! ```
//!
//! There are no retries here: a failed logon ends the session and the caller
//! decides whether to connect again. Sentry tokens may arrive in any state
//! after the handshake and never change the state.

use std::fmt;

use crate::result::EResult;
use crate::sentry::{SentryHash, SentryStore};

/// One-time code sent on a first logon, when no sentry token is cached.
pub const DEFAULT_ONE_TIME_CODE: &str = "2BP2N";

// ─── SessionState ─────────────────────────────────────────────────────────────

/// Where the Steam session currently is.
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SessionState {
    Disconnected,
    Connecting,
    HandshakeWait,
    LoggingOn,
    Authenticated,
    Failed,
}

impl SessionState {
    /// `true` from the moment a connection is requested until it is closed.
    pub fn is_started(self) -> bool {
        !matches!(self, Self::Disconnected)
    }
}

// ─── Credentials ──────────────────────────────────────────────────────────────

/// Login name, password and the one-time code used without a sentry token.
#[derive(Clone)]
pub struct Credentials {
    /// Steam account name.
    pub login:         String,
    /// Steam password.
    pub password:      String,
    /// One-time code sent when no sentry token is available.
    pub one_time_code: String,
}

impl Credentials {
    /// Credentials with the default one-time code.
    pub fn new(login: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            login:         login.into(),
            password:      password.into(),
            one_time_code: DEFAULT_ONE_TIME_CODE.to_string(),
        }
    }

    /// Replace the one-time code.
    pub fn one_time_code(mut self, code: impl Into<String>) -> Self {
        self.one_time_code = code.into(); self
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Credentials {{ login: {:?}, password: <redacted> }}", self.login)
    }
}

// ─── LogOn ────────────────────────────────────────────────────────────────────

/// A logon request, built when the handshake completes.
///
/// Exactly one of `sentry` and `one_time_code` is set.
#[derive(Clone, PartialEq)]
pub struct LogOn<'a> {
    /// Account name.
    pub login:         &'a str,
    /// Password.
    pub password:      &'a str,
    /// Cached sentry token, if any.
    pub sentry:        Option<&'a SentryHash>,
    /// One-time code, sent only without a sentry token.
    pub one_time_code: Option<&'a str>,
}

impl fmt::Debug for LogOn<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "LogOn {{ login: {:?}, sentry: {}, one_time_code: {} }}",
            self.login,
            self.sentry.is_some(),
            self.one_time_code.is_some(),
        )
    }
}

// ─── LogonOutcome ─────────────────────────────────────────────────────────────

/// What a logon result meant for the state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogonOutcome {
    /// Now [`SessionState::Authenticated`].
    Authenticated,
    /// Now [`SessionState::Failed`].
    Failed(EResult),
    /// A logon result arrived while no logon was pending; ignored.
    Unexpected,
}

// ─── Authenticator ────────────────────────────────────────────────────────────

/// Sequences handshake → logon → authenticated, and owns the sentry token.
pub struct Authenticator<S: SentryStore> {
    state:       SessionState,
    credentials: Credentials,
    sentry:      Option<SentryHash>,
    store:       S,
}

impl<S: SentryStore> Authenticator<S> {
    /// Create a disconnected state machine and load the cached sentry token.
    ///
    /// An unreadable token is logged and treated as absent.
    pub fn new(credentials: Credentials, store: S) -> Self {
        let sentry = match store.load() {
            Ok(Some(s)) => {
                log::info!("[vaporo] Loaded sentry from {} store", store.name());
                Some(s)
            }
            Ok(None) => {
                log::debug!("[vaporo] No sentry found, not loading any sentry");
                None
            }
            Err(e) => {
                log::warn!("[vaporo] Failed to load sentry from {} store ({e}), ignoring it", store.name());
                None
            }
        };
        Self { state: SessionState::Disconnected, credentials, sentry, store }
    }

    /// Current state.
    pub fn state(&self) -> SessionState { self.state }

    /// The cached sentry token, if any.
    pub fn sentry(&self) -> Option<&SentryHash> { self.sentry.as_ref() }

    /// A connection attempt is starting.
    pub fn begin_connect(&mut self) {
        self.transition(SessionState::Connecting);
    }

    /// The transport connected.
    pub fn on_connected(&mut self) {
        self.transition(SessionState::HandshakeWait);
    }

    /// The handshake completed: build the logon request.
    ///
    /// Sends the cached sentry token if there is one, otherwise the
    /// configured one-time code.
    pub fn on_handshake(&mut self) -> LogOn<'_> {
        self.transition(SessionState::LoggingOn);
        let (sentry, one_time_code) = match &self.sentry {
            Some(s) => (Some(s), None),
            None    => (None, Some(self.credentials.one_time_code.as_str())),
        };
        LogOn {
            login:    &self.credentials.login,
            password: &self.credentials.password,
            sentry,
            one_time_code,
        }
    }

    /// A logon response arrived.
    pub fn on_logon_result(&mut self, result: EResult) -> LogonOutcome {
        if self.state != SessionState::LoggingOn {
            log::warn!("[vaporo] Logon result {result} while {:?}, ignoring", self.state);
            return LogonOutcome::Unexpected;
        }
        if result.is_ok() {
            self.transition(SessionState::Authenticated);
            LogonOutcome::Authenticated
        } else {
            self.transition(SessionState::Failed);
            LogonOutcome::Failed(result)
        }
    }

    /// Steam issued a fresh sentry token: persist it, then adopt it.
    ///
    /// If the write fails the previous token stays in use.
    pub fn on_sentry(&mut self, sentry: SentryHash) -> std::io::Result<()> {
        self.store.save(&sentry)?;
        self.sentry = Some(sentry);
        log::info!("[vaporo] Sentry saved to {} store", self.store.name());
        Ok(())
    }

    /// The transport closed or failed.
    pub fn on_disconnected(&mut self) {
        self.transition(SessionState::Disconnected);
    }

    fn transition(&mut self, next: SessionState) {
        log::debug!("[vaporo] steam session {:?} → {next:?}", self.state);
        self.state = next;
    }
}
