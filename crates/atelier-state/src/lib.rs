//! # atelier-state: State Managers for Atelier
//!
//! The local, persisted application state core of the Atelier shopping
//! client: three cooperating managers, each owning one slice of persisted
//! state.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      State Architecture                                 │
//! │                                                                         │
//! │  UI triggers an operation                                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌──────────────────┐ ┌──────────────────┐ ┌──────────────────┐        │
//! │  │  SessionManager  │ │   ProfileCache   │ │    CartStore     │        │
//! │  │                  │ │                  │ │                  │        │
//! │  │  Mutex<Session>  │ │ Mutex<Option<    │ │   Mutex<Cart>    │        │
//! │  │                  │ │   UserProfile>>  │ │                  │        │
//! │  └───────┬──────────┘ └───────┬──────────┘ └───────┬──────────┘        │
//! │          │ mutate in memory   │                    │                   │
//! │          │ publish snapshot (watch channel ──► UI) │                   │
//! │          │ persist            │                    │                   │
//! │          ▼                    ▼                    ▼                   │
//! │     secure store         general store        general store           │
//! │   "isAuthenticated"         "user"               "cart"               │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • Each manager's Mutex is held across the full read-modify-write      │
//! │    including the storage await: mutations on one manager queue up      │
//! │    (single-writer). Two rapid "add to cart" taps cannot clobber        │
//! │    each other.                                                         │
//! │  • Managers don't share a lock; cross-manager ordering exists only     │
//! │    where SessionManager::logout walks the others' locks in turn.       │
//! │                                                                         │
//! │  SOURCE OF TRUTH:                                                      │
//! │  • After a write, memory wins; storage is authoritative only at        │
//! │    cold start (restore()).                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust,ignore
//! let secure = KvStore::open(StoreConfig::new(dir.join("secure.db"))).await?;
//! let general = KvStore::open(StoreConfig::new(dir.join("general.db"))).await?;
//! let remote = RemoteClient::new(RemoteConfig::default())?;
//!
//! let app = AppState::new(secure, general, remote);
//! app.restore().await; // cold start: storage → memory
//!
//! app.session().login(&token).await?;
//! app.cart().add(item).await?;
//! let mut cart_updates = app.cart().subscribe();
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

mod cart;
mod error;
mod profile;
mod session;

// =============================================================================
// Re-exports
// =============================================================================

pub use cart::{CartSnapshot, CartStore};
pub use error::{StateError, StateResult};
pub use profile::ProfileCache;
pub use session::SessionManager;

use atelier_remote::RemoteClient;
use atelier_store::KvStore;

// =============================================================================
// Storage Keys
// =============================================================================

/// Secure store key for the authentication flag (string `"true"`/absent).
pub const KEY_IS_AUTHENTICATED: &str = "isAuthenticated";

/// General store key for the cached profile (JSON object).
pub const KEY_USER: &str = "user";

/// General store key for the cart (JSON array of items).
pub const KEY_CART: &str = "cart";

// =============================================================================
// App State
// =============================================================================

/// The wired-up state core: all three managers over their stores.
///
/// Managers are injected via explicit construction (no ambient globals),
/// so tests can wire them over in-memory stores and a mock backend.
#[derive(Clone)]
pub struct AppState {
    session: SessionManager,
    profile: ProfileCache,
    cart: CartStore,
}

impl AppState {
    /// Wires the three managers over the two stores and the backend client.
    pub fn new(secure: KvStore, general: KvStore, remote: RemoteClient) -> Self {
        let profile = ProfileCache::new(general.clone(), remote.clone());
        let cart = CartStore::new(general);
        let session = SessionManager::new(secure, remote, profile.clone(), cart.clone());

        AppState {
            session,
            profile,
            cart,
        }
    }

    /// Cold-start restore: loads every slice from storage.
    ///
    /// Missing or corrupt values fall back to their defaults
    /// (unauthenticated, no profile, empty cart); never fails.
    pub async fn restore(&self) {
        self.session.restore().await;
        self.profile.restore().await;
        self.cart.restore().await;
    }

    /// The session manager.
    pub fn session(&self) -> &SessionManager {
        &self.session
    }

    /// The profile cache.
    pub fn profile(&self) -> &ProfileCache {
        &self.profile
    }

    /// The cart store.
    pub fn cart(&self) -> &CartStore {
        &self.cart
    }
}
