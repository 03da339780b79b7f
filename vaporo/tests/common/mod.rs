//! A scripted Steam engine and gateway fixtures shared by the gateway tests.
#![allow(dead_code)]

use std::collections::{BTreeMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use vaporo::steam::{
    EResult, EngineIo, FriendRelationship, LogOn, MemorySentry, PersonaState, SteamEngine,
    SteamEvent, SteamId, UserInfo,
};
use vaporo::xmpp::{Presence, PresenceType, Stanza};
use vaporo::{Config, Gateway, GatewayAction};

pub const HOST:       &str = "gateway.example";
pub const AUTHORIZED: &str = "me@example.org";
pub const OWN_ID:     SteamId = SteamId(76561197960265728);
pub const ANA:        SteamId = SteamId(76561197960287930);
pub const ANA_JID:    &str = "76561197960287930@gateway.example";

pub const CONFIG: &str = r#"
hostname       = "gateway.example"
secret         = "s3cret"
authorized_jid = "me@example.org"

[steam]
login    = "gaben"
password = "hunter2"
server   = "127.0.0.1:1"
"#;

/// What the engine saw, plus the events it will emit next.
#[derive(Default)]
pub struct Script {
    pub pending:    VecDeque<SteamEvent>,
    pub logons:     usize,
    pub personas:   Vec<PersonaState>,
    pub user_info:  Vec<Vec<SteamId>>,
    pub messages:   Vec<(SteamId, String)>,
    pub keepalives: usize,
}

/// Every one-byte unit it reads releases all queued events at once.
#[derive(Clone, Default)]
pub struct ScriptedEngine(pub Arc<Mutex<Script>>);

impl ScriptedEngine {
    pub fn queue(&self, event: SteamEvent) {
        self.0.lock().unwrap().pending.push_back(event);
    }

    pub fn script(&self) -> std::sync::MutexGuard<'_, Script> {
        self.0.lock().unwrap()
    }
}

impl SteamEngine for ScriptedEngine {
    fn connected(&mut self, io: &mut EngineIo) -> usize {
        io.send(b"hello");
        1
    }

    fn readable(&mut self, _data: &[u8], io: &mut EngineIo) -> usize {
        let pending: Vec<SteamEvent> = self.script().pending.drain(..).collect();
        for event in pending {
            io.emit(event);
        }
        1
    }

    fn log_on(&mut self, _request: &LogOn<'_>, io: &mut EngineIo) {
        self.script().logons += 1;
        io.send(b"logon");
    }

    fn set_persona_state(&mut self, state: PersonaState, _io: &mut EngineIo) {
        self.script().personas.push(state);
    }

    fn request_user_info(&mut self, users: &[SteamId], _io: &mut EngineIo) {
        self.script().user_info.push(users.to_vec());
    }

    fn send_private_message(&mut self, to: SteamId, text: &str, io: &mut EngineIo) {
        self.script().messages.push((to, text.to_string()));
        io.send(text.as_bytes());
    }

    fn keepalive(&mut self, io: &mut EngineIo) {
        self.script().keepalives += 1;
        io.send(b"ping");
    }
}

pub type TestGateway = Gateway<ScriptedEngine, MemorySentry, Vec<Stanza>>;

pub fn config() -> Config {
    Config::from_toml_str(CONFIG).unwrap()
}

pub fn gateway() -> (TestGateway, ScriptedEngine) {
    let engine = ScriptedEngine::default();
    let gw = Gateway::new(&config(), engine.clone(), MemorySentry::new(), Vec::new());
    (gw, engine)
}

/// Take everything the gateway has sent so far.
pub fn sent(gw: &mut TestGateway) -> Vec<Stanza> {
    std::mem::take(gw.component_mut())
}

pub fn actions(gw: &mut TestGateway) -> Vec<GatewayAction> {
    std::iter::from_fn(|| gw.poll_action()).collect()
}

/// Feed the engine's queued events through one read.
pub fn deliver(gw: &mut TestGateway, engine: &ScriptedEngine, event: SteamEvent) {
    engine.queue(event);
    gw.on_steam_bytes(&[0]);
}

/// Drive the gateway from idle to a logged-on Steam session and discard
/// everything sent on the way.
pub fn logged_on() -> (TestGateway, ScriptedEngine) {
    let (mut gw, engine) = gateway();
    gw.handle_stanza(Presence::new(AUTHORIZED, HOST, None).into());
    gw.on_steam_connected();
    deliver(&mut gw, &engine, SteamEvent::Handshake);
    deliver(&mut gw, &engine, SteamEvent::LogOn { result: EResult::OK, steam_id: OWN_ID });
    sent(&mut gw);
    actions(&mut gw);
    while gw.poll_transmit().is_some() {}
    (gw, engine)
}

pub fn user(id: SteamId, name: &str, state: PersonaState) -> SteamEvent {
    SteamEvent::UserInfo(UserInfo {
        user:  id,
        name:  Some(name.to_string()),
        state: Some(state),
        ..Default::default()
    })
}

pub fn friends(ids: &[SteamId]) -> SteamEvent {
    SteamEvent::Relationships {
        incremental: false,
        friends:     ids.iter().map(|id| (*id, FriendRelationship::Friend)).collect(),
        groups:      BTreeMap::new(),
    }
}

pub fn presences(stanzas: &[Stanza]) -> Vec<&Presence> {
    stanzas
        .iter()
        .filter_map(|s| match s {
            Stanza::Presence(p) => Some(p),
            _ => None,
        })
        .collect()
}

pub fn is_unavailable(p: &Presence) -> bool {
    p.kind == Some(PresenceType::Unavailable)
}

pub const KEEPALIVE: Duration = Duration::from_secs(10);
