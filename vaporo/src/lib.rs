//! # vaporo
//!
//! An XMPP component that lets one XMPP account talk to its Steam friends.
//!
//! ## Features
//! - Steam logon with sentry-token caching (one-time code on first logon)
//! - Steam friends mirrored into the user's XMPP roster, pushing only new
//!   contacts and renamed ones
//! - Steam persona states mapped to XMPP presence
//! - Private messages relayed both ways
//! - Subscription requests auto-accepted for the authorized user only
//! - Engine-driven keepalive
//!
//! The Steam wire protocol and the XMPP XML stream are plugged in from
//! outside: implement [`vaporo_steam::SteamEngine`] for the former, and
//! feed [`ComponentEvent`]s / consume stanzas through a
//! [`vaporo_xmpp::ComponentSink`] for the latter.

#![deny(unsafe_code)]

mod errors;
pub mod bridge;
pub mod config;
pub mod gateway;
pub mod keepalive;
pub mod roster;
pub mod runtime;
pub mod sync;
pub mod transport;

pub use config::Config;
pub use errors::GatewayError;
pub use gateway::{Gateway, GatewayAction};
pub use keepalive::Keepalive;
pub use roster::{Roster, RosterItem};
pub use runtime::{ComponentEvent, ComponentSender, Runtime};
pub use sync::{RosterPush, RosterSync};

pub use vaporo_steam as steam;
pub use vaporo_xmpp as xmpp;
