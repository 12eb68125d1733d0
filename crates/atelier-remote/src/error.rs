//! # Remote Error Types
//!
//! Error types for shop backend requests.
//!
//! ## Classification
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                   Failure Classification                                │
//! │                                                                         │
//! │  Transport  - the request never completed (DNS, TLS, timeout).         │
//! │               The backend may or may not have seen it.                 │
//! │                                                                         │
//! │  Status     - the backend answered with a non-success status.          │
//! │               The status code is KEPT, so callers can distinguish      │
//! │               401 (re-authenticate) from 500 (try again later).        │
//! │                                                                         │
//! │  Decode     - the backend claimed success but the body didn't parse.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Shop backend request errors.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// The HTTP request failed in transit.
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend returned a non-success status.
    #[error("{operation} failed with status {status}")]
    Status {
        operation: &'static str,
        status: u16,
    },

    /// The response body could not be decoded.
    #[error("Failed to decode {operation} response: {reason}")]
    Decode {
        operation: &'static str,
        reason: String,
    },
}

impl RemoteError {
    /// The HTTP status code, if this is a status error.
    pub fn status(&self) -> Option<u16> {
        match self {
            RemoteError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Convenience type alias for Results with RemoteError.
pub type RemoteResult<T> = Result<T, RemoteError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_accessor() {
        let err = RemoteError::Status {
            operation: "profile",
            status: 401,
        };
        assert_eq!(err.status(), Some(401));
        assert_eq!(err.to_string(), "profile failed with status 401");

        let err = RemoteError::Decode {
            operation: "profile",
            reason: "missing field".to_string(),
        };
        assert_eq!(err.status(), None);
    }
}
