//! Steam identifiers and the enumerations carried by engine events.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

// ─── SteamId ──────────────────────────────────────────────────────────────────

/// A 64-bit Steam account identifier.
///
/// The decimal form is what the gateway uses as the local part of a contact's
/// messaging address (`76561197960287930@gateway.example`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SteamId(pub u64);

impl SteamId {
    /// The raw 64-bit value.
    pub fn get(self) -> u64 { self.0 }
}

impl fmt::Display for SteamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SteamId {
    type Err = ParseIntError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u64>().map(Self)
    }
}

impl From<u64> for SteamId {
    fn from(v: u64) -> Self { Self(v) }
}

// ─── PersonaState ─────────────────────────────────────────────────────────────

/// Steam's online-status value for a user.
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum PersonaState {
    Offline        = 0,
    Online         = 1,
    Busy           = 2,
    Away           = 3,
    Snooze         = 4,
    LookingToTrade = 5,
    LookingToPlay  = 6,
}

impl PersonaState {
    /// Decode a raw wire value. Values outside `0..=6` are unknown.
    pub fn from_raw(v: u32) -> Option<Self> {
        Some(match v {
            0 => Self::Offline,
            1 => Self::Online,
            2 => Self::Busy,
            3 => Self::Away,
            4 => Self::Snooze,
            5 => Self::LookingToTrade,
            6 => Self::LookingToPlay,
            _ => return None,
        })
    }

    /// The raw wire value.
    pub fn raw(self) -> u32 { self as u32 }
}

// ─── Relationships ────────────────────────────────────────────────────────────

/// How the logged-in account relates to another user.
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FriendRelationship {
    None,
    Blocked,
    RequestRecipient,
    Friend,
    RequestInitiator,
    Ignored,
    IgnoredFriend,
    Unknown(u32),
}

impl FriendRelationship {
    /// Decode a raw wire value.
    pub fn from_raw(v: u32) -> Self {
        match v {
            0 => Self::None,
            1 => Self::Blocked,
            2 => Self::RequestRecipient,
            3 => Self::Friend,
            4 => Self::RequestInitiator,
            5 => Self::Ignored,
            6 => Self::IgnoredFriend,
            n => Self::Unknown(n),
        }
    }
}

/// How the logged-in account relates to a group (clan).
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ClanRelationship {
    None,
    Blocked,
    Invited,
    Member,
    Kicked,
    Unknown(u32),
}

impl ClanRelationship {
    /// Decode a raw wire value.
    pub fn from_raw(v: u32) -> Self {
        match v {
            0 => Self::None,
            1 => Self::Blocked,
            2 => Self::Invited,
            3 => Self::Member,
            4 => Self::Kicked,
            n => Self::Unknown(n),
        }
    }
}

// ─── UserInfo ─────────────────────────────────────────────────────────────────

/// Per-user information pushed by Steam after a user-info request, and again
/// whenever the user's persona changes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UserInfo {
    /// The user this information is about.
    pub user:        SteamId,
    /// The chat room / group the update originated from, if any.
    pub source:      Option<SteamId>,
    /// Display name. `None` when unchanged or unknown.
    pub name:        Option<String>,
    /// Persona state. `None` means offline.
    pub state:       Option<PersonaState>,
    /// SHA-1 of the avatar image.
    pub avatar_hash: Option<[u8; 20]>,
    /// The game currently being played.
    pub game_name:   Option<String>,
}
