//! # Session Manager
//!
//! Owns the authentication flag, mirrors it to the secure store, and
//! orchestrates the login/logout lifecycle across all three managers.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Session Lifecycle                                   │
//! │                                                                         │
//! │  login(token)                                                          │
//! │    1. memory: authenticated ── snapshot published                      │
//! │       (the authenticated snapshot IS the "navigate home" signal)       │
//! │    2. secure["isAuthenticated"] = "true"                               │
//! │    3. profile.load_from_remote(token)   (failure logged, not fatal:    │
//! │       a logged-in user with no profile beats a failed login)           │
//! │                                                                         │
//! │  logout()  — the FULL LOCAL WIPE, not just a flag flip                 │
//! │    1. memory: unauthenticated ── snapshot published                    │
//! │    2. secure["isAuthenticated"] removed                                │
//! │    3. profile cleared   (memory + general["user"])                     │
//! │    4. cart cleared      (memory + general["cart"])                     │
//! │                                                                         │
//! │  signup / forgot_password: one-shot backend requests, no state         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use tokio::sync::{watch, Mutex};
use tracing::{debug, info, warn};

use atelier_core::Session;
use atelier_remote::RemoteClient;
use atelier_store::KvStore;

use crate::cart::CartStore;
use crate::error::StateResult;
use crate::profile::ProfileCache;
use crate::KEY_IS_AUTHENTICATED;

struct SessionInner {
    secure: KvStore,
    remote: RemoteClient,
    profile: ProfileCache,
    cart: CartStore,
    /// Authoritative in-memory session; the lock serializes login/logout.
    session: Mutex<Session>,
    tx: watch::Sender<Session>,
}

/// Manages the session slice of persisted state and drives the
/// cross-manager logout wipe.
///
/// Cheap to clone; all clones share the same state.
#[derive(Clone)]
pub struct SessionManager {
    inner: Arc<SessionInner>,
}

impl SessionManager {
    /// Creates a session manager.
    ///
    /// Holds handles to the profile cache and cart store because logout is
    /// defined as clearing all three slices together.
    pub fn new(
        secure: KvStore,
        remote: RemoteClient,
        profile: ProfileCache,
        cart: CartStore,
    ) -> Self {
        let (tx, _rx) = watch::channel(Session::unauthenticated());
        SessionManager {
            inner: Arc::new(SessionInner {
                secure,
                remote,
                profile,
                cart,
                session: Mutex::new(Session::unauthenticated()),
                tx,
            }),
        }
    }

    /// Restores the authentication flag from the secure store.
    ///
    /// Only the exact string `"true"` authenticates; anything else
    /// (absent, unreadable, other value) defaults to unauthenticated.
    /// Never fails.
    pub async fn restore(&self) {
        let mut session = self.inner.session.lock().await;

        let authenticated = match self.inner.secure.get(KEY_IS_AUTHENTICATED).await {
            Ok(Some(value)) => value == "true",
            Ok(None) => false,
            Err(e) => {
                warn!(error = %e, "Failed to read authentication flag, assuming logged out");
                false
            }
        };

        *session = Session {
            is_authenticated: authenticated,
        };
        debug!(authenticated, "Session restored");
        self.publish(*session);
    }

    /// Logs in with a bearer token issued by the backend.
    ///
    /// Flips the flag, persists it, then loads the profile for the new
    /// identity. A failed profile load does not fail the login (it is
    /// logged and the cache stays empty); a failed flag persist does —
    /// typed and retryable, with memory left authenticated.
    pub async fn login(&self, token: &str) -> StateResult<()> {
        let mut session = self.inner.session.lock().await;

        *session = Session::authenticated();
        self.publish(*session);
        self.inner.secure.put(KEY_IS_AUTHENTICATED, "true").await?;

        if let Err(e) = self.inner.profile.load_from_remote(token).await {
            warn!(error = %e, "Profile load after login failed");
        }

        info!("User logged in");
        Ok(())
    }

    /// Logs out: the full local data wipe.
    ///
    /// Clears the session flag, the cached profile, and the cart, both in
    /// memory and in storage. Runs under the session lock; the profile and
    /// cart clears go through those managers' own locks, so each is
    /// ordered against any in-flight mutation.
    pub async fn logout(&self) -> StateResult<()> {
        let mut session = self.inner.session.lock().await;

        *session = Session::unauthenticated();
        self.publish(*session);

        self.inner.secure.remove(KEY_IS_AUTHENTICATED).await?;
        self.inner.profile.clear().await?;
        self.inner.cart.clear().await?;

        info!("User logged out");
        Ok(())
    }

    /// Registers a new account. Fire-and-forget: no local state changes.
    ///
    /// Success is HTTP 201; everything else comes back as a typed error so
    /// the UI can tell a taken email (status) from a dead network
    /// (transport).
    pub async fn signup(&self, email: &str, password: &str) -> StateResult<()> {
        self.inner.remote.signup(email, password).await?;
        info!("Sign-up successful");
        Ok(())
    }

    /// Requests a password reset link. No local state changes.
    pub async fn forgot_password(&self, email: &str) -> StateResult<()> {
        self.inner.remote.forgot_password(email).await?;
        info!("Password reset link sent");
        Ok(())
    }

    /// Whether the user is currently logged in.
    pub fn is_authenticated(&self) -> bool {
        self.inner.tx.borrow().is_authenticated
    }

    /// Subscribes to session snapshots.
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.inner.tx.subscribe()
    }

    fn publish(&self, session: Session) {
        self.inner.tx.send_replace(session);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
