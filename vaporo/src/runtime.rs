//! Single-task driver.
//!
//! [`Runtime::run`] owns the gateway and every socket and timer it needs, and
//! waits on all of them in one `select!` loop. Nothing is spawned, so gateway
//! state is only ever touched from this one task, in event order.

use std::future::Future;
use std::io;
use std::pin::Pin;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use vaporo_steam::{SentryStore, SteamEngine};
use vaporo_xmpp::{ComponentSink, Stanza};

use crate::gateway::{Gateway, GatewayAction};
use crate::keepalive::Keepalive;
use crate::transport::SteamConnection;

type ConnectFuture = Pin<Box<dyn Future<Output = io::Result<SteamConnection>> + Send>>;

// ─── ComponentEvent ───────────────────────────────────────────────────────────

/// What the component connection reports to the gateway.
#[derive(Clone, Debug, PartialEq)]
pub enum ComponentEvent {
    /// The component handshake with the XMPP server succeeded.
    Connected,
    /// A parsed inbound stanza.
    Stanza(Stanza),
    /// The component connection is gone.
    Closed(String),
}

/// Outgoing stanzas handed to the component connection task over a channel.
#[derive(Clone, Debug)]
pub struct ComponentSender(pub mpsc::UnboundedSender<Stanza>);

impl ComponentSink for ComponentSender {
    fn send(&mut self, stanza: Stanza) {
        if self.0.send(stanza).is_err() {
            log::warn!("[vaporo] Component connection gone, dropping outgoing stanza");
        }
    }
}

// ─── Runtime ──────────────────────────────────────────────────────────────────

/// Drives a [`Gateway`] until the component closes or shutdown is requested.
pub struct Runtime<E: SteamEngine, S: SentryStore, C: ComponentSink> {
    gateway:  Gateway<E, S, C>,
    events:   mpsc::UnboundedReceiver<ComponentEvent>,
    shutdown: CancellationToken,
}

impl<E: SteamEngine, S: SentryStore, C: ComponentSink> Runtime<E, S, C> {
    /// Wrap a gateway. The returned sender is where the component connection
    /// delivers its events.
    pub fn new(
        gateway:  Gateway<E, S, C>,
        shutdown: CancellationToken,
    ) -> (Self, mpsc::UnboundedSender<ComponentEvent>) {
        let (tx, events) = mpsc::unbounded_channel();
        (Self { gateway, events, shutdown }, tx)
    }

    /// Run until the component connection closes or `shutdown` is cancelled.
    ///
    /// On cancellation the gateway's shutdown presences are sent first.
    /// Returns the gateway so its final state can be inspected.
    pub async fn run(self) -> Gateway<E, S, C> {
        let Self { mut gateway, mut events, shutdown } = self;
        let mut steam: Option<SteamConnection> = None;
        let mut connecting: Option<ConnectFuture> = None;
        let mut keepalive = Keepalive::new();

        loop {
            flush(&mut gateway, &mut steam, &mut connecting, &mut keepalive).await;

            tokio::select! {
                biased;

                _ = shutdown.cancelled() => {
                    log::info!("[vaporo] Shutting down …");
                    gateway.shutdown();
                    flush(&mut gateway, &mut steam, &mut connecting, &mut keepalive).await;
                    return gateway;
                }
                event = events.recv() => match event {
                    Some(ComponentEvent::Connected) => {
                        log::info!("[vaporo] Component handshake ✓");
                        gateway.after_handshake();
                    }
                    Some(ComponentEvent::Stanza(stanza)) => gateway.handle_stanza(stanza),
                    Some(ComponentEvent::Closed(reason)) => {
                        log::info!("[vaporo] Component connection closed: {reason}");
                        return gateway;
                    }
                    None => {
                        log::info!("[vaporo] Component event channel closed");
                        return gateway;
                    }
                },
                result = wait_connect(&mut connecting) => match result {
                    Ok(conn) => {
                        steam = Some(conn);
                        gateway.on_steam_connected();
                    }
                    Err(e) => gateway.on_steam_closed(&format!("connection failed: {e}")),
                },
                read = recv_steam(&mut steam) => match read {
                    Ok(chunk) if chunk.is_empty() => {
                        steam = None;
                        gateway.on_steam_closed("connection closed by peer");
                    }
                    Ok(chunk) => gateway.on_steam_bytes(&chunk),
                    Err(e) => {
                        steam = None;
                        gateway.on_steam_closed(&e.to_string());
                    }
                },
                _ = keepalive.tick() => gateway.keepalive(),
            }
        }
    }
}

/// Carry out pending actions and write pending Steam bytes.
async fn flush<E: SteamEngine, S: SentryStore, C: ComponentSink>(
    gateway:    &mut Gateway<E, S, C>,
    steam:      &mut Option<SteamConnection>,
    connecting: &mut Option<ConnectFuture>,
    keepalive:  &mut Keepalive,
) {
    loop {
        while let Some(action) = gateway.poll_action() {
            match action {
                GatewayAction::ConnectSteam(addr) => {
                    *connecting = Some(Box::pin(async move { SteamConnection::connect(&addr).await }));
                }
                GatewayAction::ScheduleKeepalive(period) => keepalive.register_periodic(period),
                GatewayAction::CancelKeepalive => keepalive.cancel(),
            }
        }

        let mut failure = None;
        while let Some(bytes) = gateway.poll_transmit() {
            let Some(conn) = steam.as_mut() else {
                log::debug!("[vaporo] No Steam connection, dropping {} bytes", bytes.len());
                continue;
            };
            if let Err(e) = conn.send(&bytes).await {
                failure = Some(e);
                break;
            }
        }

        match failure {
            Some(e) => {
                *steam = None;
                gateway.on_steam_closed(&format!("write failed: {e}"));
            }
            None => return,
        }
    }
}

async fn wait_connect(pending: &mut Option<ConnectFuture>) -> io::Result<SteamConnection> {
    let Some(fut) = pending.as_mut() else {
        return std::future::pending().await;
    };
    let result = fut.await;
    *pending = None;
    result
}

async fn recv_steam(steam: &mut Option<SteamConnection>) -> io::Result<Vec<u8>> {
    match steam.as_mut() {
        Some(conn) => conn.recv().await.map(<[u8]>::to_vec),
        None       => std::future::pending().await,
    }
}
