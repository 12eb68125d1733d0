//! # Store Error Types
//!
//! Error types for key-value store operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  SQLite Error (sqlx::Error)                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Classifies read vs write failures          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StateError (atelier-state) ← What manager callers see                 │
//! │       │                                                                 │
//! │       ├── Read failures: recovered by defaulting to empty/None state   │
//! │       └── Write failures: surfaced to the caller as retryable          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Key-value store operation errors.
///
/// The read/write split matters to callers: a failed read is recovered
/// locally (restore defaults to empty state), while a failed write leaves
/// memory ahead of storage and must be surfaced.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Store connection failed.
    ///
    /// ## When This Occurs
    /// - Database file doesn't exist and can't be created
    /// - File permissions issue
    /// - Disk full
    #[error("Store connection failed: {0}")]
    ConnectionFailed(String),

    /// Migration failed.
    #[error("Store migration failed: {0}")]
    MigrationFailed(String),

    /// Reading a key failed.
    ///
    /// Note: a *missing* key is not an error; `get` returns `Ok(None)`.
    #[error("Failed to read key '{key}': {reason}")]
    Read { key: String, reason: String },

    /// Writing or removing a key failed.
    ///
    /// The in-memory state may already have been mutated when this is
    /// returned; callers decide whether to retry.
    #[error("Failed to write key '{key}': {reason}")]
    Write { key: String, reason: String },
}

impl StoreError {
    /// Creates a Read error for a given key.
    pub fn read(key: impl Into<String>, source: &sqlx::Error) -> Self {
        StoreError::Read {
            key: key.into(),
            reason: source.to_string(),
        }
    }

    /// Creates a Write error for a given key.
    pub fn write(key: impl Into<String>, source: &sqlx::Error) -> Self {
        StoreError::Write {
            key: key.into(),
            reason: source.to_string(),
        }
    }
}

/// Convenience type alias for Results with StoreError.
pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = StoreError::Write {
            key: "cart".to_string(),
            reason: "disk full".to_string(),
        };
        assert_eq!(err.to_string(), "Failed to write key 'cart': disk full");
    }
}
