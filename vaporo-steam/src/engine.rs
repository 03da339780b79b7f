//! The Steam protocol engine seam.
//!
//! An engine turns complete protocol units into typed [`SteamEvent`]s and
//! typed requests into raw bytes. It never touches a socket: every call gets
//! an [`EngineIo`] through which it queues outgoing bytes and emits events.
//! The session drains both after each call, so the engine is never re-entered
//! from inside one of its own callbacks.

use std::collections::{BTreeMap, VecDeque};
use std::time::Duration;

use crate::auth::LogOn;
use crate::result::EResult;
use crate::sentry::SentryHash;
use crate::types::{ClanRelationship, FriendRelationship, PersonaState, SteamId, UserInfo};

// ─── SteamEvent ───────────────────────────────────────────────────────────────

/// A typed callback emitted by the engine.
#[derive(Clone, Debug, PartialEq)]
pub enum SteamEvent {
    /// The encryption handshake completed; the session may log on.
    Handshake,
    /// Response to a logon request.
    LogOn {
        /// Result code; [`EResult::OK`] on success.
        result:   EResult,
        /// The account's own identifier.
        steam_id: SteamId,
    },
    /// Steam issued a fresh sentry token for this device.
    Sentry(SentryHash),
    /// Friend and group relationship snapshot.
    Relationships {
        /// `true` if this only lists changes since the previous snapshot.
        incremental: bool,
        /// Users and how we relate to them.
        friends:     BTreeMap<SteamId, FriendRelationship>,
        /// Groups and how we relate to them.
        groups:      BTreeMap<SteamId, ClanRelationship>,
    },
    /// Information about one user.
    UserInfo(UserInfo),
    /// A private chat message from another user.
    PrivateMessage {
        /// The sender.
        from: SteamId,
        /// Message text, verbatim.
        text: String,
    },
    /// The engine wants [`SteamEngine::keepalive`] called periodically.
    SetInterval(Duration),
}

// ─── EngineIo ─────────────────────────────────────────────────────────────────

/// Output channel handed to the engine on every call.
#[derive(Debug, Default)]
pub struct EngineIo {
    outgoing: VecDeque<Vec<u8>>,
    events:   VecDeque<SteamEvent>,
}

impl EngineIo {
    /// Create an empty channel.
    pub fn new() -> Self { Self::default() }

    /// Queue raw bytes for the network.
    pub fn send(&mut self, data: &[u8]) {
        log::debug!("[vaporo] steam engine wants to write {} bytes", data.len());
        self.outgoing.push_back(data.to_vec());
    }

    /// Emit a typed event.
    pub fn emit(&mut self, event: SteamEvent) {
        self.events.push_back(event);
    }

    /// Take the next queued outgoing buffer.
    pub fn pop_outgoing(&mut self) -> Option<Vec<u8>> {
        self.outgoing.pop_front()
    }

    /// Take the next emitted event.
    pub fn pop_event(&mut self) -> Option<SteamEvent> {
        self.events.pop_front()
    }

    /// Drop everything still queued.
    pub fn clear(&mut self) {
        self.outgoing.clear();
        self.events.clear();
    }
}

// ─── SteamEngine ──────────────────────────────────────────────────────────────

/// A Steam wire-protocol implementation.
///
/// The engine decides how many bytes it needs next; the session only calls
/// [`readable`](Self::readable) with exactly that many.
pub trait SteamEngine {
    /// The TCP connection is up. Returns the number of bytes wanted first.
    fn connected(&mut self, io: &mut EngineIo) -> usize;

    /// Consume exactly the previously requested number of bytes. Returns the
    /// number of bytes wanted next.
    fn readable(&mut self, data: &[u8], io: &mut EngineIo) -> usize;

    /// Send a logon request.
    fn log_on(&mut self, request: &LogOn<'_>, io: &mut EngineIo);

    /// Announce our own persona state.
    fn set_persona_state(&mut self, state: PersonaState, io: &mut EngineIo);

    /// Ask for [`SteamEvent::UserInfo`] about every listed user.
    fn request_user_info(&mut self, users: &[SteamId], io: &mut EngineIo);

    /// Send a private chat message.
    fn send_private_message(&mut self, to: SteamId, text: &str, io: &mut EngineIo);

    /// Periodic callback registered through [`SteamEvent::SetInterval`].
    fn keepalive(&mut self, io: &mut EngineIo);
}
