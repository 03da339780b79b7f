//! Presence, message and iq stanzas.
//!
//! Addresses are kept as plain strings, exactly as they appeared on the wire;
//! an empty string means the attribute was absent.

use std::fmt;
use std::str::FromStr;

// ─── Stanza ───────────────────────────────────────────────────────────────────

/// Any top-level stanza.
#[derive(Clone, Debug, PartialEq)]
pub enum Stanza {
    /// `<presence/>`
    Presence(Presence),
    /// `<message/>`
    Message(Message),
    /// `<iq/>`
    Iq(Iq),
}

impl Stanza {
    /// The `from` attribute.
    pub fn from(&self) -> &str {
        match self {
            Self::Presence(p) => &p.from,
            Self::Message(m)  => &m.from,
            Self::Iq(i)       => &i.from,
        }
    }

    /// The `to` attribute.
    pub fn to(&self) -> &str {
        match self {
            Self::Presence(p) => &p.to,
            Self::Message(m)  => &m.to,
            Self::Iq(i)       => &i.to,
        }
    }
}

impl From<Presence> for Stanza {
    fn from(p: Presence) -> Self { Self::Presence(p) }
}
impl From<Message> for Stanza {
    fn from(m: Message) -> Self { Self::Message(m) }
}
impl From<Iq> for Stanza {
    fn from(i: Iq) -> Self { Self::Iq(i) }
}

/// Implements `as_str`, `Display` and `FromStr` for a keyword enum.
macro_rules! keyword_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        impl $name {
            /// The wire keyword.
            pub fn as_str(self) -> &'static str {
                match self { $(Self::$variant => $s),+ }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ();
            fn from_str(s: &str) -> Result<Self, ()> {
                match s { $($s => Ok(Self::$variant),)+ _ => Err(()) }
            }
        }
    };
}

// ─── Presence ─────────────────────────────────────────────────────────────────

/// The `type` attribute of a presence. Absent means "available".
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PresenceType {
    Unavailable,
    Subscribe,
    Subscribed,
    Unsubscribe,
    Unsubscribed,
    Probe,
    Error,
}

keyword_enum!(PresenceType {
    Unavailable  => "unavailable",
    Subscribe    => "subscribe",
    Subscribed   => "subscribed",
    Unsubscribe  => "unsubscribe",
    Unsubscribed => "unsubscribed",
    Probe        => "probe",
    Error        => "error",
});

/// The `<show/>` child of an available presence.
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Show {
    Away,
    Chat,
    Dnd,
    Xa,
}

keyword_enum!(Show {
    Away => "away",
    Chat => "chat",
    Dnd  => "dnd",
    Xa   => "xa",
});

/// A `<presence/>` stanza.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Presence {
    /// Sender.
    pub from:   String,
    /// Recipient.
    pub to:     String,
    /// `None` for an available presence.
    pub kind:   Option<PresenceType>,
    /// Availability detail.
    pub show:   Option<Show>,
    /// Free-form status text.
    pub status: Option<String>,
}

impl Presence {
    /// A presence from `from` to `to` with the given type.
    pub fn new(from: impl Into<String>, to: impl Into<String>, kind: Option<PresenceType>) -> Self {
        Self { from: from.into(), to: to.into(), kind, ..Default::default() }
    }

    /// Set the `<show/>` child.
    pub fn show(mut self, show: Option<Show>) -> Self {
        self.show = show; self
    }

    /// Set the `<status/>` child.
    pub fn status(mut self, status: Option<String>) -> Self {
        self.status = status; self
    }
}

// ─── Message ──────────────────────────────────────────────────────────────────

/// The `type` attribute of a message.
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MessageType {
    Chat,
    Error,
    Groupchat,
    Headline,
    #[default]
    Normal,
}

keyword_enum!(MessageType {
    Chat      => "chat",
    Error     => "error",
    Groupchat => "groupchat",
    Headline  => "headline",
    Normal    => "normal",
});

/// A `<message/>` stanza.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Message {
    /// Stanza id; empty if absent.
    pub id:   String,
    /// Sender.
    pub from: String,
    /// Recipient.
    pub to:   String,
    /// Defaults to `normal` when the attribute is absent.
    pub kind: MessageType,
    /// Text of the `<body/>` child, if any.
    pub body: Option<String>,
}

impl Message {
    /// A chat message with a body.
    pub fn chat(from: impl Into<String>, to: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id:   String::new(),
            from: from.into(),
            to:   to.into(),
            kind: MessageType::Chat,
            body: Some(body.into()),
        }
    }
}

// ─── Iq ───────────────────────────────────────────────────────────────────────

/// The `type` attribute of an iq.
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IqType {
    Get,
    Set,
    Result,
    Error,
}

keyword_enum!(IqType {
    Get    => "get",
    Set    => "set",
    Result => "result",
    Error  => "error",
});

/// Roster subscription state.
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Subscription {
    None,
    To,
    From,
    Both,
    Remove,
}

keyword_enum!(Subscription {
    None   => "none",
    To     => "to",
    From   => "from",
    Both   => "both",
    Remove => "remove",
});

/// One `<item/>` of a roster query.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RosterItem {
    /// Contact address.
    pub jid:          String,
    /// Display name; empty if absent.
    pub name:         String,
    /// Subscription state, if given.
    pub subscription: Option<Subscription>,
    /// `<group/>` children.
    pub groups:       Vec<String>,
}

/// `<query xmlns="jabber:iq:roster"/>`
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RosterQuery {
    /// The listed items, in document order.
    pub items: Vec<RosterItem>,
}

/// What an iq carries.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum IqPayload {
    /// No child element.
    #[default]
    Empty,
    /// A roster query.
    Roster(RosterQuery),
    /// An `<error/>` child.
    Error(StanzaError),
    /// Any other child element.
    Other {
        /// Element name.
        name:      String,
        /// Element namespace.
        namespace: String,
    },
}

/// An `<iq/>` stanza.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Iq {
    /// Stanza id; empty if absent.
    pub id:      String,
    /// Sender.
    pub from:    String,
    /// Recipient.
    pub to:      String,
    /// `None` if the attribute is absent or not a known type.
    pub kind:    Option<IqType>,
    /// The child element.
    pub payload: IqPayload,
}

impl Iq {
    /// An iq with every attribute set.
    pub fn new(
        id:      impl Into<String>,
        from:    impl Into<String>,
        to:      impl Into<String>,
        kind:    IqType,
        payload: IqPayload,
    ) -> Self {
        Self { id: id.into(), from: from.into(), to: to.into(), kind: Some(kind), payload }
    }
}

// ─── StanzaError ──────────────────────────────────────────────────────────────

/// The `type` attribute of a stanza error.
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorType {
    Auth,
    Cancel,
    Continue,
    Modify,
    Wait,
}

keyword_enum!(ErrorType {
    Auth     => "auth",
    Cancel   => "cancel",
    Continue => "continue",
    Modify   => "modify",
    Wait     => "wait",
});

/// Defined stanza error conditions this gateway produces or recognises.
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Condition {
    BadRequest,
    FeatureNotImplemented,
    Forbidden,
    InternalServerError,
    ItemNotFound,
    NotAllowed,
    RecipientUnavailable,
    ServiceUnavailable,
}

keyword_enum!(Condition {
    BadRequest            => "bad-request",
    FeatureNotImplemented => "feature-not-implemented",
    Forbidden             => "forbidden",
    InternalServerError   => "internal-server-error",
    ItemNotFound          => "item-not-found",
    NotAllowed            => "not-allowed",
    RecipientUnavailable  => "recipient-unavailable",
    ServiceUnavailable    => "service-unavailable",
});

/// An `<error/>` child.
#[derive(Clone, Debug, PartialEq)]
pub struct StanzaError {
    /// Error type.
    pub kind:      ErrorType,
    /// Defined condition.
    pub condition: Condition,
    /// Optional human-readable text.
    pub text:      Option<String>,
}

impl StanzaError {
    /// An error without text.
    pub fn new(kind: ErrorType, condition: Condition) -> Self {
        Self { kind, condition, text: None }
    }
}

impl fmt::Display for StanzaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.condition, self.kind)?;
        if let Some(t) = &self.text {
            write!(f, ": {t}")?;
        }
        Ok(())
    }
}
