//! Sans-IO Steam session layer.
//!
//! This crate handles:
//! * The byte-accumulation cursor that feeds the Steam protocol engine
//! * The handshake → logon → authenticated state machine
//! * Sentry (device authorization) token persistence
//! * Steam identifiers, persona states and logon result codes
//!
//! The protocol engine itself (encryption handshake, message codec) is not
//! part of this crate. Plug one in through the [`SteamEngine`] trait; bring
//! your own TCP socket and feed received bytes to [`SteamSession::on_bytes`].

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod auth;
pub mod engine;
pub mod framing;
pub mod result;
pub mod sentry;
pub mod session;
mod types;

pub use auth::{Authenticator, Credentials, LogOn, LogonOutcome, SessionState};
pub use engine::{EngineIo, SteamEngine, SteamEvent};
pub use framing::Framer;
pub use result::EResult;
pub use sentry::{FileSentry, MemorySentry, SentryHash, SentryStore};
pub use session::{SessionEvent, SteamSession};
pub use types::{ClanRelationship, FriendRelationship, PersonaState, SteamId, UserInfo};
