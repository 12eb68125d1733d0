//! # State Error Types
//!
//! The error type manager operations return to the UI layer.
//!
//! Every manager operation returns a typed result instead of swallowing
//! failures into logs, so the UI can distinguish "not logged in" from
//! "profile fetch failed" from "couldn't persist, try again".
//!
//! The one deliberate exception: `restore()` never fails. A missing or
//! corrupt persisted value is the designed cold-start fallback (empty
//! cart, no profile, unauthenticated), logged and defaulted.

use thiserror::Error;

use atelier_core::CoreError;
use atelier_remote::RemoteError;
use atelier_store::StoreError;

/// Errors surfaced by manager operations.
#[derive(Debug, Error)]
pub enum StateError {
    /// A business rule rejected the operation.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Persistence failed.
    ///
    /// ## When This Occurs
    /// - A write failed *after* the in-memory mutation succeeded. Memory
    ///   is ahead of storage; the operation can be retried.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A shop backend request failed.
    #[error(transparent)]
    Remote(#[from] RemoteError),

    /// Serializing state for persistence failed.
    ///
    /// Structurally unreachable for well-formed domain types; kept as a
    /// variant rather than a panic.
    #[error("Failed to encode state: {0}")]
    Encode(String),
}

impl StateError {
    /// Whether retrying the same operation could succeed.
    ///
    /// Write failures leave memory ahead of storage; retrying the
    /// operation re-persists the current in-memory state. Transport
    /// failures may succeed once the network is back.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            StateError::Store(StoreError::Write { .. })
                | StateError::Remote(RemoteError::Transport(_))
        )
    }
}

/// Convenience type alias for Results with StateError.
pub type StateResult<T> = Result<T, StateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_failures_are_retryable() {
        let err = StateError::Store(StoreError::Write {
            key: "cart".to_string(),
            reason: "disk full".to_string(),
        });
        assert!(err.is_retryable());

        let err = StateError::Core(CoreError::EmptyItemId);
        assert!(!err.is_retryable());
    }
}
