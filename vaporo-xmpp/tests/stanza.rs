use vaporo_xmpp::{
    ComponentSink, Condition, ErrorType, IqPayload, IqType, Jid, JidError, MessageType,
    PresenceType, Show, Stanza, Subscription,
};

// ── Jid ───────────────────────────────────────────────────────────────────────

#[test]
fn parse_full_jid() {
    let j: Jid = "76561197960287930@gateway.example/res".parse().unwrap();
    assert_eq!(j.local, "76561197960287930");
    assert_eq!(j.domain, "gateway.example");
    assert_eq!(j.resource, "res");
    assert_eq!(j.bare(), "76561197960287930@gateway.example");
    assert_eq!(j.to_string(), "76561197960287930@gateway.example/res");
}

#[test]
fn parse_domain_only() {
    let j: Jid = "gateway.example".parse().unwrap();
    assert!(j.local.is_empty());
    assert_eq!(j.bare(), "gateway.example");
}

#[test]
fn resource_may_contain_at_and_slash() {
    let j: Jid = "me@example.org/phone@home/2".parse().unwrap();
    assert_eq!(j.local, "me");
    assert_eq!(j.resource, "phone@home/2");
}

#[test]
fn malformed_jids_are_rejected() {
    assert_eq!("".parse::<Jid>(), Err(JidError::EmptyDomain));
    assert_eq!("me@".parse::<Jid>(), Err(JidError::EmptyDomain));
    assert_eq!("@example.org".parse::<Jid>(), Err(JidError::EmptyLocal));
}

#[test]
fn same_bare_ignores_resource() {
    assert!(Jid::same_bare("me@example.org/laptop", "me@example.org"));
    assert!(Jid::same_bare("me@Example.org", "me@example.org"));
    assert!(!Jid::same_bare("you@example.org", "me@example.org"));
    assert!(!Jid::same_bare("", "me@example.org"));
}

// ── Keywords ──────────────────────────────────────────────────────────────────

#[test]
fn keywords_parse_and_print() {
    assert_eq!("unavailable".parse::<PresenceType>(), Ok(PresenceType::Unavailable));
    assert_eq!(Show::Dnd.as_str(), "dnd");
    assert_eq!(Subscription::Both.to_string(), "both");
    assert_eq!("result".parse::<IqType>(), Ok(IqType::Result));
    assert!("bogus".parse::<IqType>().is_err());
    assert_eq!(MessageType::default(), MessageType::Normal);
    assert_eq!(Condition::InternalServerError.as_str(), "internal-server-error");
}

// ── ComponentSink ─────────────────────────────────────────────────────────────

#[test]
fn vec_sink_collects_built_stanzas() {
    let mut out: Vec<Stanza> = Vec::new();
    out.send_presence("gw.example", "me@example.org", Some(PresenceType::Unavailable), None, None);
    out.send_iq_error("gw.example", "me@example.org", "42", ErrorType::Modify, Condition::BadRequest);

    assert_eq!(out.len(), 2);
    match &out[0] {
        Stanza::Presence(p) => {
            assert_eq!(p.from, "gw.example");
            assert_eq!(p.to, "me@example.org");
            assert_eq!(p.kind, Some(PresenceType::Unavailable));
        }
        other => panic!("expected presence, got {other:?}"),
    }
    match &out[1] {
        Stanza::Iq(iq) => {
            assert_eq!(iq.id, "42");
            assert_eq!(iq.kind, Some(IqType::Error));
            match &iq.payload {
                IqPayload::Error(e) => {
                    assert_eq!(e.kind, ErrorType::Modify);
                    assert_eq!(e.condition, Condition::BadRequest);
                    assert_eq!(e.to_string(), "bad-request/modify");
                }
                other => panic!("expected error payload, got {other:?}"),
            }
        }
        other => panic!("expected iq, got {other:?}"),
    }
}
