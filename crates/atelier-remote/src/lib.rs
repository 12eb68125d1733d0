//! # atelier-remote: Shop Backend HTTP Client
//!
//! The JSON HTTP client for the shop backend. The backend is an opaque
//! boundary: this crate speaks its four endpoints (signup, forgot-password,
//! get-user-data, profile), classifies failures as transport vs status vs
//! decode, and leaves all caching/retry policy to `atelier-state`.
//!
//! ```rust,ignore
//! let client = RemoteClient::new(RemoteConfig::default())?;
//! let profile = client.profile(&token).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

mod client;
mod config;
pub mod error;

// =============================================================================
// Re-exports
// =============================================================================

pub use client::RemoteClient;
pub use config::{RemoteConfig, DEFAULT_BASE_URL};
pub use error::{RemoteError, RemoteResult};
