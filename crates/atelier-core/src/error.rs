//! # Error Types
//!
//! Domain-specific error types for atelier-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  atelier-core errors (this file)                                       │
//! │  └── CoreError    - Business rule violations                           │
//! │                                                                         │
//! │  atelier-store errors (separate crate)                                 │
//! │  └── StoreError   - Persistence failures                               │
//! │                                                                         │
//! │  atelier-remote errors (separate crate)                                │
//! │  └── RemoteError  - HTTP transport / status failures                   │
//! │                                                                         │
//! │  atelier-state errors (separate crate)                                 │
//! │  └── StateError   - What the UI sees (wraps all of the above)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (item id, cents, etc.)
//! 3. Errors are enum variants, never String

use thiserror::Error;

use crate::money::Money;

/// Core business logic errors.
///
/// These errors represent business rule violations. They should be caught
/// and translated to user-facing messages by the UI layer.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Cart item price would be negative.
    ///
    /// ## When This Occurs
    /// - The frontend hands over a malformed product
    /// - A persisted cart entry was tampered with
    #[error("Item {id} has negative price {price}")]
    NegativePrice { id: String, price: Money },

    /// Cart item id is empty.
    ///
    /// Deduplication is keyed on the id, so an empty id would silently
    /// collapse unrelated items into one.
    #[error("Cart item id must not be empty")]
    EmptyItemId,
}

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::NegativePrice {
            id: "shirt-01".to_string(),
            price: Money::from_cents(-500),
        };
        assert_eq!(err.to_string(), "Item shirt-01 has negative price -$5.00");

        assert_eq!(
            CoreError::EmptyItemId.to_string(),
            "Cart item id must not be empty"
        );
    }
}
