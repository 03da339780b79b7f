//! The outbound half of the component connection.

use crate::stanza::{
    Condition, ErrorType, Iq, IqPayload, IqType, Message, Presence, PresenceType, Show, Stanza,
    StanzaError,
};

/// Where the gateway's outgoing stanzas go.
///
/// Only [`send`](Self::send) is required; the other methods build common
/// stanzas on top of it.
pub trait ComponentSink {
    /// Serialize and send one stanza.
    fn send(&mut self, stanza: Stanza);

    /// Send a presence.
    fn send_presence(
        &mut self,
        from:   &str,
        to:     &str,
        kind:   Option<PresenceType>,
        show:   Option<Show>,
        status: Option<String>,
    ) {
        let presence = Presence::new(from, to, kind).show(show).status(status);
        self.send(presence.into());
    }

    /// Send a message with a body.
    fn send_message(&mut self, message: Message) {
        self.send(message.into());
    }

    /// Reply to an iq with an error.
    fn send_iq_error(
        &mut self,
        from:      &str,
        to:        &str,
        id:        &str,
        kind:      ErrorType,
        condition: Condition,
    ) {
        let error = StanzaError::new(kind, condition);
        self.send(Iq::new(id, from, to, IqType::Error, IqPayload::Error(error)).into());
    }
}

impl ComponentSink for Vec<Stanza> {
    fn send(&mut self, stanza: Stanza) {
        self.push(stanza);
    }
}

impl<C: ComponentSink + ?Sized> ComponentSink for &mut C {
    fn send(&mut self, stanza: Stanza) {
        (**self).send(stanza);
    }
}
