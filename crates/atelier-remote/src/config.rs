//! # Remote Configuration
//!
//! Configuration for the shop backend client.
//!
//! The base URL is fixed in production; it is configurable only so tests
//! can point the client at an in-process mock server.

use std::time::Duration;

/// The production shop backend.
pub const DEFAULT_BASE_URL: &str = "https://clothing-store-vbrf.onrender.com";

/// Shop backend client configuration.
///
/// ## Example
/// ```rust
/// use atelier_remote::RemoteConfig;
/// use std::time::Duration;
///
/// let config = RemoteConfig::default().request_timeout(Duration::from_secs(10));
/// ```
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    /// Base URL of the shop backend (no trailing slash).
    pub base_url: String,

    /// Per-request timeout.
    /// Default: 30 seconds
    pub request_timeout: Duration,
}

impl RemoteConfig {
    /// Creates a configuration for the given base URL.
    ///
    /// A trailing slash is stripped so paths can always be joined as
    /// `{base_url}/signup`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        RemoteConfig {
            base_url,
            request_timeout: Duration::from_secs(30),
        }
    }

    /// Sets the per-request timeout.
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

impl Default for RemoteConfig {
    /// Configuration pointing at the production backend.
    fn default() -> Self {
        RemoteConfig::new(DEFAULT_BASE_URL)
    }
}
