//! The gateway core: one Steam session bridged to one XMPP user.
//!
//! [`Gateway`] does no I/O of its own. The driver feeds it component events
//! and Steam socket events, writes out whatever
//! [`poll_transmit`](Gateway::poll_transmit) yields, and carries out
//! [`GatewayAction`]s. Outgoing stanzas go straight to the [`ComponentSink`].

use std::collections::VecDeque;
use std::time::Duration;

use vaporo_steam::{
    FileSentry, SentryStore, SessionEvent, SessionState, SteamEngine, SteamId, SteamSession,
    UserInfo,
};
use vaporo_xmpp::{
    ComponentSink, Condition, ErrorType, Iq, IqPayload, IqType, Jid, Message, Presence,
    PresenceType, RosterItem as QueryItem, RosterQuery, Stanza, Subscription,
};

use crate::bridge::{self, IqErrorGuard};
use crate::config::Config;
use crate::sync::{RosterPush, RosterSync, contact_jid};

/// Status text of the presences sent on shutdown.
const SHUTDOWN_STATUS: &str = "Gateway shutdown";

// ─── GatewayAction ────────────────────────────────────────────────────────────

/// Work the driver has to do on the gateway's behalf.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GatewayAction {
    /// Open a TCP connection to this Steam `host:port`.
    ConnectSteam(String),
    /// Call [`Gateway::keepalive`] every period, replacing any earlier timer.
    ScheduleKeepalive(Duration),
    /// Stop calling [`Gateway::keepalive`].
    CancelKeepalive,
}

// ─── Gateway ──────────────────────────────────────────────────────────────────

/// All state of one running gateway instance.
pub struct Gateway<E: SteamEngine, S: SentryStore, C: ComponentSink> {
    hostname:       String,
    authorized_jid: String,
    steam_server:   String,
    steam:          SteamSession<E, S>,
    component:      C,
    roster:         RosterSync,
    actions:        VecDeque<GatewayAction>,
    next_id:        u64,
}

impl<E: SteamEngine, C: ComponentSink> Gateway<E, FileSentry, C> {
    /// Build a gateway that keeps its sentry token in the configured file.
    pub fn from_config(config: &Config, engine: E, component: C) -> Self {
        Self::new(config, engine, config.sentry_store(), component)
    }
}

impl<E: SteamEngine, S: SentryStore, C: ComponentSink> Gateway<E, S, C> {
    /// Build a gateway from a validated configuration.
    pub fn new(config: &Config, engine: E, sentry: S, component: C) -> Self {
        Self {
            hostname:       config.hostname.clone(),
            authorized_jid: config.authorized_jid.clone(),
            steam_server:   config.steam.server.clone(),
            steam:          SteamSession::new(engine, config.credentials(), sentry),
            component,
            roster:         RosterSync::new(&config.hostname),
            actions:        VecDeque::new(),
            next_id:        0,
        }
    }

    /// Steam session state.
    pub fn state(&self) -> SessionState { self.steam.state() }

    /// The Steam session.
    pub fn steam(&self) -> &SteamSession<E, S> { &self.steam }

    /// Both rosters.
    pub fn roster(&self) -> &RosterSync { &self.roster }

    /// The outgoing stanza sink.
    pub fn component(&self) -> &C { &self.component }

    /// The outgoing stanza sink, mutably.
    pub fn component_mut(&mut self) -> &mut C { &mut self.component }

    /// Next action for the driver.
    pub fn poll_action(&mut self) -> Option<GatewayAction> {
        self.actions.pop_front()
    }

    /// Next buffer to write to the Steam socket.
    pub fn poll_transmit(&mut self) -> Option<Vec<u8>> {
        self.steam.poll_transmit()
    }

    // ── Component side ────────────────────────────────────────────────────────

    /// The component handshake succeeded: ask for the user's roster.
    pub fn after_handshake(&mut self) {
        self.roster.clear_xmpp();
        let id = next_id(&mut self.next_id);
        let iq = Iq::new(
            id,
            self.hostname.as_str(),
            self.authorized_jid.as_str(),
            IqType::Get,
            IqPayload::Roster(RosterQuery::default()),
        );
        self.component.send(iq.into());
    }

    /// Route one inbound stanza.
    pub fn handle_stanza(&mut self, stanza: Stanza) {
        match stanza {
            Stanza::Presence(p) => self.handle_presence(p),
            Stanza::Message(m)  => self.handle_message(m),
            Stanza::Iq(iq)      => self.handle_iq(iq),
        }
    }

    fn is_authorized(&self, from: &str) -> bool {
        Jid::same_bare(from, &self.authorized_jid)
    }

    fn handle_presence(&mut self, presence: Presence) {
        if presence.from.is_empty() {
            return;
        }
        let authorized = self.is_authorized(&presence.from);

        match presence.kind {
            Some(PresenceType::Subscribe) => {
                let reply_from = if presence.to.is_empty() { self.hostname.clone() } else { presence.to.clone() };
                if !authorized {
                    log::warn!("[vaporo] Refusing subscription from {}", presence.from);
                }
                for kind in bridge::subscription_replies(authorized) {
                    self.component.send_presence(&reply_from, &presence.from, Some(*kind), None, None);
                }
            }
            _ if !authorized => {
                log::debug!("[vaporo] Ignoring presence from unauthorized {}", presence.from);
            }
            Some(PresenceType::Unavailable) => {
                log::info!("[vaporo] {} went offline", presence.from);
            }
            _ => self.start_steam(),
        }
    }

    fn start_steam(&mut self) {
        if self.steam.state().is_started() {
            return;
        }
        log::info!("[vaporo] Connecting to Steam ({}) …", self.steam_server);
        self.steam.begin_connect();
        self.actions.push_back(GatewayAction::ConnectSteam(self.steam_server.clone()));
    }

    fn handle_message(&mut self, message: Message) {
        if message.from.is_empty() {
            return;
        }
        if !self.is_authorized(&message.from) {
            log::debug!("[vaporo] Ignoring message from unauthorized {}", message.from);
            return;
        }
        let Some(body) = message.body.filter(|b| !b.is_empty()) else {
            return;
        };
        let Some(to) = message.to.parse::<Jid>().ok().and_then(|j| j.local.parse::<SteamId>().ok()) else {
            log::warn!("[vaporo] Message to {} is not for a Steam contact", message.to);
            return;
        };
        if self.steam.state() != SessionState::Authenticated {
            log::warn!("[vaporo] Steam is offline, dropping message to {to}");
            return;
        }
        self.steam.send_private_message(to, &body);
        self.pump();
    }

    fn handle_iq(&mut self, iq: Iq) {
        if iq.from.is_empty() {
            return;
        }
        let Some(kind) = iq.kind.filter(|_| !iq.id.is_empty() && !iq.to.is_empty()) else {
            self.component.send_iq_error(
                &self.hostname, &iq.from, &iq.id, ErrorType::Modify, Condition::BadRequest,
            );
            return;
        };

        let authorized = Jid::same_bare(&iq.from, &self.authorized_jid);
        let mut guard  = IqErrorGuard::new(&mut self.component, &iq.to, &iq.from, &iq.id);

        match (kind, &iq.payload) {
            (IqType::Result, IqPayload::Roster(query)) if authorized => {
                for push in self.roster.on_roster_result(query) {
                    let id = next_id(&mut self.next_id);
                    guard.send(roster_push_iq(id, &self.hostname, &self.authorized_jid, &push).into());
                }
                guard.handled();
            }
            (IqType::Result, _) => guard.handled(),
            (IqType::Error, payload) => {
                log::warn!("[vaporo] iq {} from {} failed: {payload:?}", iq.id, iq.from);
                guard.handled();
            }
            // Nothing else is served; the guard replies on drop.
            (IqType::Get | IqType::Set, _) => {}
        }
    }

    // ── Steam side ────────────────────────────────────────────────────────────

    /// The Steam TCP connection is up.
    pub fn on_steam_connected(&mut self) {
        log::info!("[vaporo] Connected to Steam");
        self.steam.on_connected();
        self.pump();
    }

    /// Bytes arrived on the Steam connection.
    pub fn on_steam_bytes(&mut self, chunk: &[u8]) {
        self.steam.on_bytes(chunk);
        self.pump();
    }

    /// The Steam connection closed or could not be opened.
    pub fn on_steam_closed(&mut self, reason: &str) {
        log::error!("[vaporo] Steam connection closed: {reason}");
        self.steam.on_disconnected();
        self.actions.push_back(GatewayAction::CancelKeepalive);
    }

    /// The keepalive timer fired.
    pub fn keepalive(&mut self) {
        self.steam.keepalive();
        self.pump();
    }

    fn pump(&mut self) {
        while let Some(event) = self.steam.poll_event() {
            self.handle_session_event(event);
        }
    }

    fn handle_session_event(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::LoggedOn { .. } => {
                self.roster.reset_steam();
                self.component.send_presence(&self.hostname, &self.authorized_jid, None, None, None);
            }
            SessionEvent::LogOnFailed(result) => {
                self.component.send_presence(
                    &self.hostname, &self.authorized_jid, Some(PresenceType::Unavailable), None, None,
                );
                self.send_information_message(&bridge::logon_failure_text(result.description()));
            }
            SessionEvent::Relationships { incremental, friends, groups } => {
                let users = self.roster.on_relationships(incremental, &friends);
                for (id, relationship) in &groups {
                    log::debug!("[vaporo] group {id} with type {relationship:?}");
                }
                if !users.is_empty() {
                    self.steam.request_user_info(&users);
                }
            }
            SessionEvent::UserInfo(info) => self.on_user_info(info),
            SessionEvent::PrivateMessage { from, text } => {
                let from = contact_jid(&from.to_string(), &self.hostname);
                self.component.send_message(Message::chat(from, self.authorized_jid.as_str(), text));
            }
            SessionEvent::KeepaliveRequested(period) => {
                self.actions.push_back(GatewayAction::ScheduleKeepalive(period));
            }
        }
    }

    fn on_user_info(&mut self, info: UserInfo) {
        log::debug!("[vaporo] user info for {}: {:?}", info.user, info.name);
        if let Some(push) = self.roster.on_user_info(info.user, info.name.as_deref()) {
            let id = next_id(&mut self.next_id);
            let iq = roster_push_iq(id, &self.hostname, &self.authorized_jid, &push);
            self.component.send(iq.into());
        }

        let (kind, show) = bridge::persona_presence(info.state);
        let from = contact_jid(&info.user.to_string(), &self.hostname);
        let status = info.game_name.filter(|g| !g.is_empty());
        self.component.send_presence(&from, &self.authorized_jid, kind, show, status);
    }

    /// Send a chat message from the gateway itself to the authorized user.
    pub fn send_information_message(&mut self, text: &str) {
        let message = Message::chat(self.hostname.as_str(), self.authorized_jid.as_str(), text);
        self.component.send_message(message);
    }

    /// Mark every known contact and the gateway itself unavailable.
    pub fn shutdown(&mut self) {
        for local in self.roster.xmpp_locals() {
            let from = contact_jid(&local, &self.hostname);
            self.component.send_presence(
                &from, &self.authorized_jid, Some(PresenceType::Unavailable), None,
                Some(SHUTDOWN_STATUS.to_string()),
            );
        }
        self.component.send_presence(
            &self.hostname, &self.authorized_jid, Some(PresenceType::Unavailable), None,
            Some(SHUTDOWN_STATUS.to_string()),
        );
        self.actions.push_back(GatewayAction::CancelKeepalive);
    }
}

fn next_id(counter: &mut u64) -> String {
    *counter += 1;
    format!("vaporo-{counter}")
}

/// `<iq type="set"><query xmlns="jabber:iq:roster"><item …/></query></iq>`
fn roster_push_iq(id: String, from: &str, to: &str, push: &RosterPush) -> Iq {
    let item = QueryItem {
        jid:          push.jid.clone(),
        name:         push.name.clone(),
        subscription: Some(Subscription::Both),
        groups:       push.groups.clone(),
    };
    Iq::new(id, from, to, IqType::Set, IqPayload::Roster(RosterQuery { items: vec![item] }))
}
