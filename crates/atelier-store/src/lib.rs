//! # atelier-store: On-Device Persistence for Atelier
//!
//! The two key-value stores backing the state managers, both on SQLite:
//!
//! - **Secure store** - sensitive flags (the `isAuthenticated` flag).
//!   Expected to live on an encrypted volume; the encryption scheme is a
//!   deployment concern, not designed here.
//! - **General store** - everything else (`user` profile JSON, `cart`
//!   JSON array).
//!
//! Both are instances of the same [`KvStore`] type over distinct database
//! files, so "secure" vs "general" is a wiring decision made once at app
//! startup:
//!
//! ```rust,ignore
//! let secure = KvStore::open(StoreConfig::new(data_dir.join("secure.db"))).await?;
//! let general = KvStore::open(StoreConfig::new(data_dir.join("general.db"))).await?;
//! ```
//!
//! The store holds opaque strings. Which keys exist and what their values
//! mean is owned by `atelier-state`; the durable copy is the source of
//! truth only at cold start, after which in-memory state always wins.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
mod kv;
mod migrations;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StoreError, StoreResult};
pub use kv::{KvStore, StoreConfig};
