use std::fmt;
use std::str::FromStr;

/// An XMPP address: `[local@]domain[/resource]`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Jid {
    /// Part before `@`; empty for a bare domain.
    pub local:    String,
    /// The server or component domain.
    pub domain:   String,
    /// Part after `/`; empty when absent.
    pub resource: String,
}

/// Why a string is not a usable JID.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum JidError {
    /// Nothing between `@` and `/`.
    EmptyDomain,
    /// `@` with nothing in front of it.
    EmptyLocal,
}

impl fmt::Display for JidError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyDomain => write!(f, "JID has an empty domain"),
            Self::EmptyLocal  => write!(f, "JID has an empty local part before '@'"),
        }
    }
}

impl std::error::Error for JidError {}

impl Jid {
    /// `local@domain` (no resource).
    pub fn new(local: impl Into<String>, domain: impl Into<String>) -> Self {
        Self { local: local.into(), domain: domain.into(), resource: String::new() }
    }

    /// The address without its resource.
    pub fn bare(&self) -> String {
        if self.local.is_empty() {
            self.domain.clone()
        } else {
            format!("{}@{}", self.local, self.domain)
        }
    }

    /// Parse, and compare bare forms. `false` if either side is not a JID.
    pub fn same_bare(a: &str, b: &str) -> bool {
        match (a.parse::<Jid>(), b.parse::<Jid>()) {
            (Ok(a), Ok(b)) => a.local == b.local && a.domain.eq_ignore_ascii_case(&b.domain),
            _ => false,
        }
    }
}

impl FromStr for Jid {
    type Err = JidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (rest, resource) = match s.find('/') {
            Some(i) => (&s[..i], &s[i + 1..]),
            None    => (s, ""),
        };
        let (local, domain) = match rest.find('@') {
            Some(i) => (&rest[..i], &rest[i + 1..]),
            None    => ("", rest),
        };
        if rest.contains('@') && local.is_empty() {
            return Err(JidError::EmptyLocal);
        }
        if domain.is_empty() {
            return Err(JidError::EmptyDomain);
        }
        Ok(Self {
            local:    local.to_string(),
            domain:   domain.to_string(),
            resource: resource.to_string(),
        })
    }
}

impl fmt::Display for Jid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.bare())?;
        if !self.resource.is_empty() {
            write!(f, "/{}", self.resource)?;
        }
        Ok(())
    }
}
