//! Translation rules between Steam and XMPP.

use std::ops::{Deref, DerefMut};

use vaporo_steam::PersonaState;
use vaporo_xmpp::{ComponentSink, Condition, ErrorType, PresenceType, Show};

// ─── Persona → presence ───────────────────────────────────────────────────────

/// Presence type and `<show/>` for each persona state, indexed by raw value.
static PERSONA_PRESENCE: [(Option<PresenceType>, Option<Show>); 7] = [
    (Some(PresenceType::Unavailable), None), // offline
    (None, None),                            // online
    (None, Some(Show::Dnd)),                 // busy
    (None, Some(Show::Away)),                // away
    (None, Some(Show::Xa)),                  // snooze
    (None, Some(Show::Chat)),                // looking to trade
    (None, Some(Show::Chat)),                // looking to play
];

/// Map a persona state to presence type and show. `None` (unknown or
/// offline) gives an unavailable presence.
pub fn persona_presence(state: Option<PersonaState>) -> (Option<PresenceType>, Option<Show>) {
    match state {
        Some(s) => PERSONA_PRESENCE[s.raw() as usize],
        None    => PERSONA_PRESENCE[PersonaState::Offline.raw() as usize],
    }
}

// ─── Subscription policy ──────────────────────────────────────────────────────

/// Presences to send back for a subscription request: accept and ask back
/// for the authorized user, refuse anyone else.
pub fn subscription_replies(authorized: bool) -> &'static [PresenceType] {
    if authorized {
        &[PresenceType::Subscribed, PresenceType::Subscribe]
    } else {
        &[PresenceType::Unsubscribed]
    }
}

/// Text sent to the user when Steam rejects the logon.
pub fn logon_failure_text(description: &str) -> String {
    format!("Failed to log in to Steam: {description}")
}

// ─── IqErrorGuard ─────────────────────────────────────────────────────────────

/// Sends an error reply for an iq when dropped, unless
/// [`handled`](Self::handled) was called first.
///
/// Derefs to the wrapped sink so the handler can keep sending through it.
pub struct IqErrorGuard<'a, C: ComponentSink> {
    sink:      &'a mut C,
    from:      String,
    to:        String,
    id:        String,
    kind:      ErrorType,
    condition: Condition,
    armed:     bool,
}

impl<'a, C: ComponentSink> IqErrorGuard<'a, C> {
    /// Arm an internal-server-error/cancel reply from `from` to `to`.
    pub fn new(sink: &'a mut C, from: &str, to: &str, id: &str) -> Self {
        Self {
            sink,
            from:      from.to_string(),
            to:        to.to_string(),
            id:        id.to_string(),
            kind:      ErrorType::Cancel,
            condition: Condition::InternalServerError,
            armed:     true,
        }
    }

    /// The iq was dealt with; send nothing on drop.
    pub fn handled(&mut self) {
        self.armed = false;
    }
}

impl<C: ComponentSink> Deref for IqErrorGuard<'_, C> {
    type Target = C;
    fn deref(&self) -> &C { self.sink }
}

impl<C: ComponentSink> DerefMut for IqErrorGuard<'_, C> {
    fn deref_mut(&mut self) -> &mut C { self.sink }
}

impl<C: ComponentSink> Drop for IqErrorGuard<'_, C> {
    fn drop(&mut self) {
        if self.armed {
            log::debug!("[vaporo] iq {} not handled, replying {}/{}", self.id, self.condition, self.kind);
            self.sink.send_iq_error(&self.from, &self.to, &self.id, self.kind, self.condition);
        }
    }
}
