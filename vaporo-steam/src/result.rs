//! Logon result codes and their human-readable descriptions.

use std::fmt;

/// Description used for codes with no defined meaning.
pub const UNKNOWN_ERROR: &str = "unknown error";

/// One description per protocol-defined result code, indexed by the code.
/// Code 0 is the "invalid" sentinel and code 4 is retired; both fall back to
/// [`UNKNOWN_ERROR`].
static DESCRIPTIONS: [&str; 53] = [
    UNKNOWN_ERROR,                                                              // 0
    "success",                                                                  // 1
    "generic failure",                                                          // 2
    "no/failed network connection",                                             // 3
    UNKNOWN_ERROR,                                                              // 4
    "password/ticket is invalid",                                               // 5
    "same user logged in elsewhere",                                            // 6
    "protocol version is incorrect",                                            // 7
    "a parameter is incorrect",                                                 // 8
    "file was not found",                                                       // 9
    "called method busy - action not taken",                                    // 10
    "called object was in an invalid state",                                    // 11
    "name is invalid",                                                          // 12
    "email is invalid",                                                         // 13
    "name is not unique",                                                       // 14
    "access is denied",                                                         // 15
    "operation timed out",                                                      // 16
    "VAC2 banned",                                                              // 17
    "account not found",                                                        // 18
    "steamID is invalid",                                                       // 19
    "the requested service is currently unavailable",                           // 20
    "the user is not logged on",                                                // 21
    "request is pending (may be in process, or waiting on third party)",        // 22
    "encryption or decryption failed",                                          // 23
    "insufficient privilege",                                                   // 24
    "too much of a good thing",                                                 // 25
    "access has been revoked (used for revoked guest passes)",                  // 26
    "license/guest pass the user is trying to access is expired",               // 27
    "guest pass has already been redeemed by account, cannot be acked again",   // 28
    "the request is a duplicate and the action has already occurred in the past, ignored this time", // 29
    "all the games in this guest pass redemption request are already owned by the user", // 30
    "IP address not found",                                                     // 31
    "failed to write change to the data store",                                 // 32
    "failed to acquire access lock for this operation",                         // 33
    "logon session replaced",                                                   // 34
    "connect failed",                                                           // 35
    "handshake failed",                                                         // 36
    "IO failure",                                                               // 37
    "remote disconnect",                                                        // 38
    "failed to find the shopping cart requested",                               // 39
    "a user didn't allow it",                                                   // 40
    "target is ignoring sender",                                                // 41
    "nothing matching the request found",                                       // 42
    "account disabled",                                                         // 43
    "this service is not accepting content changes right now",                  // 44
    "account doesn't have value, so this feature isn't available",              // 45
    "allowed to take this action, but only because requester is admin",        // 46
    "a version mismatch in content transmitted within the Steam protocol",      // 47
    "the current CM can't service the user making a request, user should try another", // 48
    "you are already logged in elsewhere, this cached credential login has failed", // 49
    "you are already logged in elsewhere, you must wait",                       // 50
    "long running operation (content download) suspended/paused",               // 51
    "operation canceled (typically by user: content download)",                 // 52
];

/// A Steam result code, as reported in a logon response.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EResult(pub u32);

impl EResult {
    /// The only code that means the logon went through.
    pub const OK: Self = Self(1);
    /// Password or ticket rejected.
    pub const INVALID_PASSWORD: Self = Self(5);

    /// `true` for [`EResult::OK`].
    pub fn is_ok(self) -> bool { self == Self::OK }

    /// Human-readable description; [`UNKNOWN_ERROR`] for undefined codes.
    pub fn description(self) -> &'static str {
        DESCRIPTIONS.get(self.0 as usize).copied().unwrap_or(UNKNOWN_ERROR)
    }
}

impl fmt::Display for EResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.description(), self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_covers_every_defined_code() {
        assert_eq!(DESCRIPTIONS.len(), 53);
        assert_eq!(EResult(52).description(), "operation canceled (typically by user: content download)");
    }

    #[test]
    fn reserved_and_out_of_range_codes_are_unknown() {
        assert_eq!(EResult(0).description(), UNKNOWN_ERROR);
        assert_eq!(EResult(4).description(), UNKNOWN_ERROR);
        assert_eq!(EResult(53).description(), UNKNOWN_ERROR);
        assert_eq!(EResult(u32::MAX).description(), UNKNOWN_ERROR);
    }

    #[test]
    fn invalid_password_text() {
        assert_eq!(EResult::INVALID_PASSWORD.description(), "password/ticket is invalid");
        assert!(!EResult::INVALID_PASSWORD.is_ok());
        assert!(EResult::OK.is_ok());
    }
}
