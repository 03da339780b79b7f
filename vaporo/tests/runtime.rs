mod common;

use std::time::Duration;

use common::*;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio::time::{Instant, timeout};
use tokio_util::sync::CancellationToken;
use vaporo::steam::{EResult, MemorySentry, SessionState, SteamEvent};
use vaporo::xmpp::{Message, Presence, PresenceType, Stanza};
use vaporo::{ComponentEvent, ComponentSender, Config, Gateway, Keepalive, Runtime};

const STEP: Duration = Duration::from_secs(5);

async fn next(rx: &mut mpsc::UnboundedReceiver<Stanza>) -> Stanza {
    timeout(STEP, rx.recv()).await.expect("stanza in time").expect("sink open")
}

#[tokio::test]
async fn bridges_a_steam_session_end_to_end() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let config = Config::from_toml_str(&CONFIG.replace("127.0.0.1:1", &addr.to_string())).unwrap();

    let engine = ScriptedEngine::default();
    let (out_tx, mut out_rx) = mpsc::unbounded_channel();
    let gateway = Gateway::new(&config, engine.clone(), MemorySentry::new(), ComponentSender(out_tx));
    let shutdown = CancellationToken::new();
    let (runtime, events) = Runtime::new(gateway, shutdown.clone());

    let peer = async {
        events.send(ComponentEvent::Connected).unwrap();
        assert!(matches!(next(&mut out_rx).await, Stanza::Iq(_)));

        events.send(ComponentEvent::Stanza(Presence::new(AUTHORIZED, HOST, None).into())).unwrap();
        let (mut steam, _) = timeout(STEP, listener.accept()).await.unwrap().unwrap();

        let mut buf = [0u8; 5];
        steam.read_exact(&mut buf).await.unwrap();
        assert_eq!(&buf, b"hello");

        engine.queue(SteamEvent::Handshake);
        steam.write_all(&[0]).await.unwrap();
        steam.read_exact(&mut buf).await.unwrap();
        assert_eq!(&buf, b"logon");

        engine.queue(SteamEvent::LogOn { result: EResult::OK, steam_id: OWN_ID });
        steam.write_all(&[0]).await.unwrap();
        assert_eq!(next(&mut out_rx).await, Stanza::Presence(Presence::new(HOST, AUTHORIZED, None)));

        engine.queue(SteamEvent::PrivateMessage { from: ANA, text: "gg".into() });
        steam.write_all(&[0]).await.unwrap();
        assert_eq!(next(&mut out_rx).await, Stanza::Message(Message::chat(ANA_JID, AUTHORIZED, "gg")));

        events.send(ComponentEvent::Stanza(Message::chat(AUTHORIZED, ANA_JID, "wp").into())).unwrap();
        let mut wp = [0u8; 2];
        steam.read_exact(&mut wp).await.unwrap();
        assert_eq!(&wp, b"wp");
        shutdown.cancel();

        match next(&mut out_rx).await {
            Stanza::Presence(p) => {
                assert_eq!(p.from, HOST);
                assert_eq!(p.kind, Some(PresenceType::Unavailable));
                assert_eq!(p.status.as_deref(), Some("Gateway shutdown"));
            }
            other => panic!("expected shutdown presence, got {other:?}"),
        }
        steam
    };

    let (gateway, _steam) = timeout(STEP * 4, async { tokio::join!(runtime.run(), peer) })
        .await
        .expect("runtime finished");
    assert_eq!(gateway.state(), SessionState::Authenticated);
    assert_eq!(engine.script().messages, vec![(ANA, "wp".to_string())]);
}

#[tokio::test]
async fn component_close_ends_the_run() {
    let engine = ScriptedEngine::default();
    let (out_tx, _out_rx) = mpsc::unbounded_channel::<Stanza>();
    let gateway = Gateway::new(&config(), engine, MemorySentry::new(), ComponentSender(out_tx));
    let (runtime, events) = Runtime::new(gateway, CancellationToken::new());

    events.send(ComponentEvent::Closed("stream error".into())).unwrap();
    let gateway = timeout(STEP, runtime.run()).await.unwrap();
    assert_eq!(gateway.state(), SessionState::Disconnected);
}

#[tokio::test]
async fn refused_connection_resets_the_session() {
    // Grab a free port, then close it so the connect is refused.
    let addr = TcpListener::bind("127.0.0.1:0").await.unwrap().local_addr().unwrap();
    let config = Config::from_toml_str(&CONFIG.replace("127.0.0.1:1", &addr.to_string())).unwrap();

    let (out_tx, _out_rx) = mpsc::unbounded_channel::<Stanza>();
    let gateway = Gateway::new(&config, ScriptedEngine::default(), MemorySentry::new(), ComponentSender(out_tx));
    let shutdown = CancellationToken::new();
    let (runtime, events) = Runtime::new(gateway, shutdown.clone());

    events.send(ComponentEvent::Stanza(Presence::new(AUTHORIZED, HOST, None).into())).unwrap();
    let stop = async {
        tokio::time::sleep(Duration::from_millis(200)).await;
        shutdown.cancel();
    };
    let (gateway, ()) = timeout(STEP, async { tokio::join!(runtime.run(), stop) }).await.unwrap();
    assert_eq!(gateway.state(), SessionState::Disconnected);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn runs_as_a_spawned_task() {
    let (out_tx, mut out_rx) = mpsc::unbounded_channel::<Stanza>();
    let gateway = Gateway::new(&config(), ScriptedEngine::default(), MemorySentry::new(), ComponentSender(out_tx));
    let shutdown = CancellationToken::new();
    let (runtime, events) = Runtime::new(gateway, shutdown.clone());

    let task = tokio::spawn(runtime.run());
    events.send(ComponentEvent::Connected).unwrap();
    assert!(matches!(next(&mut out_rx).await, Stanza::Iq(_)));

    shutdown.cancel();
    let gateway = timeout(STEP, task).await.unwrap().unwrap();
    assert_eq!(gateway.state(), SessionState::Disconnected);
    assert!(matches!(next(&mut out_rx).await, Stanza::Presence(p) if p.from == HOST));
}

#[tokio::test(start_paused = true)]
async fn keepalive_fires_every_period() {
    let mut keepalive = Keepalive::new();
    assert!(!keepalive.is_active());

    let start = Instant::now();
    keepalive.register_periodic(KEEPALIVE);
    keepalive.tick().await;
    keepalive.tick().await;
    assert!(start.elapsed() >= KEEPALIVE * 2);

    keepalive.cancel();
    assert!(!keepalive.is_active());
    assert!(timeout(KEEPALIVE * 3, keepalive.tick()).await.is_err());
}
