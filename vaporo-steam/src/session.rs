//! A Steam session: engine + framer + logon state machine.
//!
//! [`SteamSession`] is sans-IO. Feed it connection events and received
//! bytes; pull outgoing bytes with [`poll_transmit`](SteamSession::poll_transmit)
//! and higher-level events with [`poll_event`](SteamSession::poll_event).
//!
//! Handshake and sentry callbacks are consumed here. Everything the gateway
//! has to act on comes out as a [`SessionEvent`].

use std::collections::{BTreeMap, VecDeque};
use std::time::Duration;

use crate::auth::{Authenticator, Credentials, LogonOutcome, SessionState};
use crate::engine::{EngineIo, SteamEngine, SteamEvent};
use crate::framing::Framer;
use crate::result::EResult;
use crate::sentry::SentryStore;
use crate::types::{ClanRelationship, FriendRelationship, PersonaState, SteamId, UserInfo};

// ─── SessionEvent ─────────────────────────────────────────────────────────────

/// Something the gateway has to react to.
#[derive(Clone, Debug, PartialEq)]
pub enum SessionEvent {
    /// Logon succeeded; our persona is already announced as online.
    LoggedOn {
        /// Our own identifier.
        steam_id: SteamId,
    },
    /// Logon was rejected. The session is now [`SessionState::Failed`].
    LogOnFailed(EResult),
    /// Friend and group relationships.
    Relationships {
        /// `true` if this only lists changes.
        incremental: bool,
        /// Users and how we relate to them.
        friends:     BTreeMap<SteamId, FriendRelationship>,
        /// Groups and how we relate to them.
        groups:      BTreeMap<SteamId, ClanRelationship>,
    },
    /// Information about one user.
    UserInfo(UserInfo),
    /// A private message from another user.
    PrivateMessage {
        /// The sender.
        from: SteamId,
        /// Message text.
        text: String,
    },
    /// Call [`SteamSession::keepalive`] every `period`.
    KeepaliveRequested(Duration),
}

// ─── SteamSession ─────────────────────────────────────────────────────────────

/// Per-connection Steam state.
pub struct SteamSession<E: SteamEngine, S: SentryStore> {
    engine: E,
    io:     EngineIo,
    framer: Framer,
    auth:   Authenticator<S>,
    events: VecDeque<SessionEvent>,
}

impl<E: SteamEngine, S: SentryStore> SteamSession<E, S> {
    /// Wrap an engine. Loads the sentry token from `store`.
    pub fn new(engine: E, credentials: Credentials, store: S) -> Self {
        Self {
            engine,
            io:     EngineIo::new(),
            framer: Framer::new(),
            auth:   Authenticator::new(credentials, store),
            events: VecDeque::new(),
        }
    }

    /// Current logon state.
    pub fn state(&self) -> SessionState { self.auth.state() }

    /// The state machine (read-only).
    pub fn auth(&self) -> &Authenticator<S> { &self.auth }

    /// The wrapped engine.
    pub fn engine(&self) -> &E { &self.engine }

    /// The wrapped engine, mutably.
    pub fn engine_mut(&mut self) -> &mut E { &mut self.engine }

    /// A connection attempt is starting.
    pub fn begin_connect(&mut self) {
        self.auth.begin_connect();
    }

    /// The TCP connection is up.
    pub fn on_connected(&mut self) {
        log::debug!("[vaporo] connected, initialising steam engine");
        self.io.clear();
        self.auth.on_connected();
        let wanted = self.engine.connected(&mut self.io);
        self.framer.reset(wanted);
        log::debug!("[vaporo] steam wants {wanted} bytes first");
        self.process();
    }

    /// Bytes arrived from the network.
    ///
    /// Events raised by one unit are handled before the next unit is parsed.
    pub fn on_bytes(&mut self, chunk: &[u8]) {
        self.framer.push(chunk);
        while let Some(unit) = self.framer.next_unit() {
            let wanted = self.engine.readable(unit, &mut self.io);
            self.framer.set_wanted(wanted);
            self.process();
        }
    }

    /// The connection closed or failed. Buffered bytes and queued output are
    /// dropped.
    pub fn on_disconnected(&mut self) {
        self.auth.on_disconnected();
        self.framer.reset(0);
        self.io.clear();
    }

    /// Request user info for a batch of users.
    pub fn request_user_info(&mut self, users: &[SteamId]) {
        log::debug!("[vaporo] Requesting user info for {} users", users.len());
        self.engine.request_user_info(users, &mut self.io);
        self.process();
    }

    /// Send a private message.
    pub fn send_private_message(&mut self, to: SteamId, text: &str) {
        self.engine.send_private_message(to, text, &mut self.io);
        self.process();
    }

    /// Announce a persona state.
    pub fn set_persona_state(&mut self, state: PersonaState) {
        self.engine.set_persona_state(state, &mut self.io);
        self.process();
    }

    /// Run the engine's periodic callback.
    pub fn keepalive(&mut self) {
        log::debug!("[vaporo] calling the steam keepalive callback");
        self.engine.keepalive(&mut self.io);
        self.process();
    }

    /// Next buffer to write to the socket.
    pub fn poll_transmit(&mut self) -> Option<Vec<u8>> {
        self.io.pop_outgoing()
    }

    /// Next event for the gateway.
    pub fn poll_event(&mut self) -> Option<SessionEvent> {
        self.events.pop_front()
    }

    fn process(&mut self) {
        while let Some(event) = self.io.pop_event() {
            self.dispatch(event);
        }
    }

    fn dispatch(&mut self, event: SteamEvent) {
        match event {
            SteamEvent::Handshake => {
                log::debug!("[vaporo] steam handshake done");
                let request = self.auth.on_handshake();
                log::debug!("[vaporo] logging on: {request:?}");
                self.engine.log_on(&request, &mut self.io);
            }
            SteamEvent::LogOn { result, steam_id } => {
                match self.auth.on_logon_result(result) {
                    LogonOutcome::Authenticated => {
                        log::info!("[vaporo] Logged on to Steam ✓  ({steam_id})");
                        self.engine.set_persona_state(PersonaState::Online, &mut self.io);
                        self.events.push_back(SessionEvent::LoggedOn { steam_id });
                    }
                    LogonOutcome::Failed(result) => {
                        log::warn!("[vaporo] Steam logon failed: {result}");
                        self.events.push_back(SessionEvent::LogOnFailed(result));
                    }
                    LogonOutcome::Unexpected => {}
                }
            }
            SteamEvent::Sentry(sentry) => {
                if let Err(e) = self.auth.on_sentry(sentry) {
                    log::error!("[vaporo] Failed to save sentry: {e}");
                }
            }
            SteamEvent::Relationships { incremental, friends, groups } => {
                self.events.push_back(SessionEvent::Relationships { incremental, friends, groups });
            }
            SteamEvent::UserInfo(info) => {
                self.events.push_back(SessionEvent::UserInfo(info));
            }
            SteamEvent::PrivateMessage { from, text } => {
                self.events.push_back(SessionEvent::PrivateMessage { from, text });
            }
            SteamEvent::SetInterval(period) => {
                log::debug!("[vaporo] set_interval called, period = {period:?}");
                self.events.push_back(SessionEvent::KeepaliveRequested(period));
            }
        }
    }
}
