//! Typed XMPP stanzas for an external component (XEP-0114).
//!
//! Only the stanza *model* lives here: presence, message, iq, roster queries
//! and stanza errors, plus [`Jid`] parsing. Turning XML into these types and
//! back is left to whatever component connection drives the gateway; that
//! connection is reached through the [`ComponentSink`] trait.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod component;
mod jid;
pub mod stanza;

pub use component::ComponentSink;
pub use jid::{Jid, JidError};
pub use stanza::{
    Condition, ErrorType, Iq, IqPayload, IqType, Message, MessageType, Presence, PresenceType,
    RosterItem, RosterQuery, Show, Stanza, StanzaError, Subscription,
};

/// Namespace of stanzas exchanged over a component connection.
pub const COMPONENT_NS: &str = "jabber:component:accept";
/// Roster management (RFC 6121).
pub const ROSTER_NS: &str = "jabber:iq:roster";
/// Stanza error conditions.
pub const STANZAS_NS: &str = "urn:ietf:params:xml:ns:xmpp-stanzas";
