//! Roster synchronization between Steam and the XMPP server.
//!
//! Two rosters are kept: what Steam reports (keyed by Steam id) and what the
//! user's XMPP server believes (keyed by full JID). A Steam contact is pushed
//! to the server only when the server does not know it yet or knows it under
//! another name.

use std::collections::BTreeMap;

use vaporo_steam::{FriendRelationship, SteamId};
use vaporo_xmpp::RosterQuery;

use crate::roster::{Roster, RosterItem};

/// `<steamid>@<domain>`
pub fn contact_jid(steam_key: &str, domain: &str) -> String {
    format!("{steam_key}@{domain}")
}

/// Does `item` (Steam side) have to be pushed to the server?
pub fn needs_push(item: &RosterItem, xmpp: &Roster, domain: &str) -> bool {
    match xmpp.get(&contact_jid(&item.key, domain)) {
        Some(known) => known.name != item.name,
        None        => true,
    }
}

/// Every Steam-side item that is missing from, or named differently in, the
/// XMPP-side roster. Arrival order is preserved.
pub fn diff<'a>(steam: &'a Roster, xmpp: &Roster, domain: &str) -> Vec<&'a RosterItem> {
    steam.iter().filter(|item| needs_push(item, xmpp, domain)).collect()
}

/// A roster push to send: `jid` gets `name` with subscription "both".
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RosterPush {
    /// Contact address under the gateway domain.
    pub jid:    String,
    /// Display name.
    pub name:   String,
    /// Group labels.
    pub groups: Vec<String>,
}

/// Owner and sole mutator of both rosters.
#[derive(Debug)]
pub struct RosterSync {
    domain: String,
    steam:  Roster,
    xmpp:   Roster,
}

impl RosterSync {
    /// Empty rosters for the given gateway domain.
    pub fn new(domain: impl Into<String>) -> Self {
        Self { domain: domain.into(), steam: Roster::new(), xmpp: Roster::new() }
    }

    /// What Steam reports.
    pub fn steam(&self) -> &Roster { &self.steam }

    /// What the XMPP server believes.
    pub fn xmpp(&self) -> &Roster { &self.xmpp }

    /// A new Steam session started.
    pub fn reset_steam(&mut self) {
        self.steam.clear();
    }

    /// The component connection (re)started; the server roster will be
    /// queried again.
    pub fn clear_xmpp(&mut self) {
        self.xmpp.clear();
    }

    /// Users to request info for, from a relationship snapshot.
    pub fn on_relationships(
        &self,
        incremental: bool,
        friends:     &BTreeMap<SteamId, FriendRelationship>,
    ) -> Vec<SteamId> {
        log::debug!("[vaporo] relationships (incremental: {incremental}): {} users", friends.len());
        for (id, relationship) in friends {
            log::debug!("[vaporo] SteamID: {id} with type {relationship:?}");
        }
        friends.keys().copied().collect()
    }

    /// Record user info; returns the push needed to bring the server roster
    /// in line, if any. The push is mirrored into the XMPP-side roster.
    pub fn on_user_info(&mut self, user: SteamId, name: Option<&str>) -> Option<RosterPush> {
        let key  = user.to_string();
        let name = name.filter(|n| !n.is_empty());

        match self.steam.get_mut(&key) {
            Some(item) => {
                if let Some(n) = name {
                    item.name = n.to_string();
                }
            }
            None => {
                self.steam.upsert(RosterItem::new(&key, name.unwrap_or_default()));
            }
        }

        let item = self.steam.get(&key)?;
        if !needs_push(item, &self.xmpp, &self.domain) {
            return None;
        }
        let push = Self::push_for(item, &self.domain);
        self.mirror(&push);
        Some(push)
    }

    /// Replace the XMPP-side roster with a roster query result, then return
    /// the pushes needed for Steam contacts the server got wrong.
    pub fn on_roster_result(&mut self, query: &RosterQuery) -> Vec<RosterPush> {
        self.xmpp.clear();
        for item in &query.items {
            let mut entry = RosterItem::new(&item.jid, &item.name);
            entry.groups = item.groups.iter().cloned().collect();
            self.xmpp.upsert(entry);
        }
        log::info!("[vaporo] Server roster refreshed ({} items)", self.xmpp.len());

        let pushes: Vec<RosterPush> = diff(&self.steam, &self.xmpp, &self.domain)
            .into_iter()
            .map(|item| Self::push_for(item, &self.domain))
            .collect();
        for push in &pushes {
            self.mirror(push);
        }
        pushes
    }

    /// Local parts of the XMPP-side contacts, for shutdown presences.
    /// Domain-only entries have none and are left out.
    pub fn xmpp_locals(&self) -> Vec<String> {
        self.xmpp
            .iter()
            .filter_map(|item| item.key.split_once('@'))
            .map(|(local, _)| local)
            .filter(|local| !local.is_empty())
            .map(str::to_string)
            .collect()
    }

    fn push_for(item: &RosterItem, domain: &str) -> RosterPush {
        RosterPush {
            jid:    contact_jid(&item.key, domain),
            name:   item.name.clone(),
            groups: item.groups.iter().cloned().collect(),
        }
    }

    fn mirror(&mut self, push: &RosterPush) {
        let mut entry = RosterItem::new(&push.jid, &push.name);
        entry.groups = push.groups.iter().cloned().collect();
        self.xmpp.upsert(entry);
    }
}
