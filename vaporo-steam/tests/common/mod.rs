//! A one-byte-opcode fake engine shared by the session tests.

use std::time::Duration;

use vaporo_steam::{
    EResult, EngineIo, LogOn, PersonaState, SentryHash, SteamEngine, SteamEvent, SteamId,
};

pub const HANDSHAKE:  u8 = 1;
pub const LOGON_OK:   u8 = 2;
pub const LOGON_FAIL: u8 = 3;
pub const SENTRY:     u8 = 4;
pub const INTERVAL:   u8 = 5;

pub const OWN_ID: SteamId = SteamId(76561197960265728);

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedLogOn {
    pub login:         String,
    pub password:      String,
    pub sentry:        Option<SentryHash>,
    pub one_time_code: Option<String>,
}

#[derive(Default)]
pub struct FakeEngine {
    pub logons:     Vec<RecordedLogOn>,
    pub personas:   Vec<PersonaState>,
    pub user_info:  Vec<Vec<SteamId>>,
    pub messages:   Vec<(SteamId, String)>,
    pub keepalives: usize,
}

impl SteamEngine for FakeEngine {
    fn connected(&mut self, io: &mut EngineIo) -> usize {
        io.send(b"hello");
        1
    }

    fn readable(&mut self, data: &[u8], io: &mut EngineIo) -> usize {
        match data[0] {
            HANDSHAKE  => io.emit(SteamEvent::Handshake),
            LOGON_OK   => io.emit(SteamEvent::LogOn { result: EResult::OK, steam_id: OWN_ID }),
            LOGON_FAIL => io.emit(SteamEvent::LogOn { result: EResult::INVALID_PASSWORD, steam_id: OWN_ID }),
            SENTRY     => io.emit(SteamEvent::Sentry(SentryHash([0x42; 20]))),
            INTERVAL   => io.emit(SteamEvent::SetInterval(Duration::from_secs(10))),
            _ => {}
        }
        1
    }

    fn log_on(&mut self, request: &LogOn<'_>, io: &mut EngineIo) {
        self.logons.push(RecordedLogOn {
            login:         request.login.to_string(),
            password:      request.password.to_string(),
            sentry:        request.sentry.copied(),
            one_time_code: request.one_time_code.map(str::to_string),
        });
        io.send(b"logon");
    }

    fn set_persona_state(&mut self, state: PersonaState, io: &mut EngineIo) {
        self.personas.push(state);
        io.send(b"persona");
    }

    fn request_user_info(&mut self, users: &[SteamId], _io: &mut EngineIo) {
        self.user_info.push(users.to_vec());
    }

    fn send_private_message(&mut self, to: SteamId, text: &str, _io: &mut EngineIo) {
        self.messages.push((to, text.to_string()));
    }

    fn keepalive(&mut self, io: &mut EngineIo) {
        self.keepalives += 1;
        io.send(b"ping");
    }
}
