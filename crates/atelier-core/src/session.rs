//! # Session
//!
//! The boolean authentication state gating which screens are reachable.
//!
//! A single instance lives for the app process lifetime: created
//! unauthenticated at first access, flipped by login, reset by logout.
//! The flag is mirrored to the secure store as the string `"true"`
//! (absent when unauthenticated).

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Process-wide authentication state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Session {
    /// Whether the user is currently logged in.
    pub is_authenticated: bool,
}

impl Session {
    /// The initial, unauthenticated session.
    pub const fn unauthenticated() -> Self {
        Session {
            is_authenticated: false,
        }
    }

    /// An authenticated session.
    pub const fn authenticated() -> Self {
        Session {
            is_authenticated: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_unauthenticated() {
        assert!(!Session::default().is_authenticated);
        assert_eq!(Session::default(), Session::unauthenticated());
        assert!(Session::authenticated().is_authenticated);
    }
}
