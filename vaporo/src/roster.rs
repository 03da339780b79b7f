//! Ordered contact lists.

use std::collections::{BTreeSet, HashMap};

/// One contact.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RosterItem {
    /// Lookup key: a Steam id on the Steam side, a full JID on the XMPP side.
    pub key:    String,
    /// Display name; empty if unknown.
    pub name:   String,
    /// Group labels.
    pub groups: BTreeSet<String>,
}

impl RosterItem {
    /// An item with no groups.
    pub fn new(key: impl Into<String>, name: impl Into<String>) -> Self {
        Self { key: key.into(), name: name.into(), groups: BTreeSet::new() }
    }
}

/// Contacts keyed by string, iterated in arrival order.
///
/// A missing key means "unknown contact"; items are never removed one by one.
#[derive(Clone, Debug, Default)]
pub struct Roster {
    items: Vec<RosterItem>,
    index: HashMap<String, usize>,
}

impl Roster {
    /// An empty roster.
    pub fn new() -> Self { Self::default() }

    /// Forget every contact.
    pub fn clear(&mut self) {
        self.items.clear();
        self.index.clear();
    }

    /// Look up by exact key.
    pub fn get(&self, key: &str) -> Option<&RosterItem> {
        self.index.get(key).map(|&i| &self.items[i])
    }

    /// Look up by exact key, mutably.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut RosterItem> {
        match self.index.get(key) {
            Some(&i) => Some(&mut self.items[i]),
            None     => None,
        }
    }

    /// Insert, or replace the item with the same key in place.
    pub fn upsert(&mut self, item: RosterItem) -> &mut RosterItem {
        let i = match self.index.get(&item.key) {
            Some(&i) => {
                self.items[i] = item;
                i
            }
            None => {
                let i = self.items.len();
                self.index.insert(item.key.clone(), i);
                self.items.push(item);
                i
            }
        };
        &mut self.items[i]
    }

    /// All items, in arrival order.
    pub fn iter(&self) -> impl Iterator<Item = &RosterItem> {
        self.items.iter()
    }

    /// Number of contacts.
    pub fn len(&self) -> usize { self.items.len() }

    /// `true` if there are no contacts.
    pub fn is_empty(&self) -> bool { self.items.is_empty() }
}
