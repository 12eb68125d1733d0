//! # Profile Cache Manager
//!
//! Owns the cached user profile, mirrors it to the general store under the
//! `user` key, and loads it from the shop backend.
//!
//! ## Cache Behavior
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Profile Cache Flow                                 │
//! │                                                                         │
//! │  Cold start:  restore() ── general["user"] ──► memory (None if bad)    │
//! │                                                                         │
//! │  Login:       load_from_remote(token)                                  │
//! │                 200 ──► memory + general["user"]                       │
//! │                 else ─► memory = None, persisted LEFT UNTOUCHED        │
//! │                         (stale persisted profile survives until the    │
//! │                          next successful fetch or logout)              │
//! │                                                                         │
//! │  Local edit:  set(profile) ──► memory + general["user"]                │
//! │                                                                         │
//! │  Logout:      clear() ──► memory = None, general["user"] removed       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use tokio::sync::{watch, Mutex};
use tracing::{debug, warn};

use atelier_core::UserProfile;
use atelier_remote::RemoteClient;
use atelier_store::KvStore;

use crate::error::{StateError, StateResult};
use crate::KEY_USER;

struct ProfileInner {
    general: KvStore,
    remote: RemoteClient,
    /// Authoritative in-memory copy; the lock serializes all operations
    /// on this manager, including the network await of a remote load.
    profile: Mutex<Option<UserProfile>>,
    tx: watch::Sender<Option<UserProfile>>,
}

/// Manages the cached-profile slice of persisted state.
///
/// Cheap to clone; all clones share the same state.
#[derive(Clone)]
pub struct ProfileCache {
    inner: Arc<ProfileInner>,
}

impl ProfileCache {
    /// Creates a profile cache over the general store and backend client.
    pub fn new(general: KvStore, remote: RemoteClient) -> Self {
        let (tx, _rx) = watch::channel(None);
        ProfileCache {
            inner: Arc::new(ProfileInner {
                general,
                remote,
                profile: Mutex::new(None),
                tx,
            }),
        }
    }

    /// Restores the cached profile from the general store.
    ///
    /// A missing or unparseable entry means "no cached profile"; never
    /// fails.
    pub async fn restore(&self) {
        let mut profile = self.inner.profile.lock().await;

        *profile = match self.inner.general.get(KEY_USER).await {
            Ok(Some(json)) => match serde_json::from_str(&json) {
                Ok(p) => Some(p),
                Err(e) => {
                    warn!(error = %e, "Persisted profile is corrupt, treating as absent");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                warn!(error = %e, "Failed to read persisted profile, treating as absent");
                None
            }
        };

        debug!(cached = profile.is_some(), "Profile restored");
        self.publish(&profile);
    }

    /// Loads the profile from the backend with a bearer token and mirrors
    /// it to memory and storage.
    ///
    /// ## Failure Behavior
    /// On any transport or status failure the in-memory profile is cleared
    /// but the persisted entry is DELIBERATELY left untouched: the next
    /// cold start may still serve the stale copy. The typed error tells
    /// the caller what happened (401 vs network vs bad body).
    pub async fn load_from_remote(&self, token: &str) -> StateResult<UserProfile> {
        let mut profile = self.inner.profile.lock().await;

        match self.inner.remote.profile(token).await {
            Ok(fetched) => {
                *profile = Some(fetched.clone());
                self.publish(&profile);
                self.persist(&fetched).await?;
                debug!(name = %fetched.name, "Profile loaded from backend");
                Ok(fetched)
            }
            Err(e) => {
                warn!(error = %e, "Profile load failed, clearing in-memory profile");
                *profile = None;
                self.publish(&profile);
                Err(e.into())
            }
        }
    }

    /// Loads the profile with email/password credentials.
    ///
    /// Same mirror-and-clear behavior as [`ProfileCache::load_from_remote`].
    pub async fn load_with_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> StateResult<UserProfile> {
        let mut profile = self.inner.profile.lock().await;

        match self.inner.remote.get_user_data(email, password).await {
            Ok(fetched) => {
                *profile = Some(fetched.clone());
                self.publish(&profile);
                self.persist(&fetched).await?;
                debug!(name = %fetched.name, "Profile loaded with credentials");
                Ok(fetched)
            }
            Err(e) => {
                warn!(error = %e, "Profile load failed, clearing in-memory profile");
                *profile = None;
                self.publish(&profile);
                Err(e.into())
            }
        }
    }

    /// Replaces the profile locally (no backend round trip) and persists.
    ///
    /// Used for local edits. Persisting here (rather than leaving it to
    /// the caller) means an edit can't silently evaporate on restart.
    pub async fn set(&self, new_profile: UserProfile) -> StateResult<()> {
        let mut profile = self.inner.profile.lock().await;

        *profile = Some(new_profile.clone());
        self.publish(&profile);
        self.persist(&new_profile).await?;
        debug!("Profile set locally");
        Ok(())
    }

    /// Clears the profile from memory and storage.
    ///
    /// The profile's part of the full local wipe on logout.
    pub async fn clear(&self) -> StateResult<()> {
        let mut profile = self.inner.profile.lock().await;

        *profile = None;
        self.publish(&profile);
        self.inner.general.remove(KEY_USER).await?;
        debug!("Profile cleared");
        Ok(())
    }

    /// The currently cached profile, if any.
    pub fn current(&self) -> Option<UserProfile> {
        self.inner.tx.borrow().clone()
    }

    /// Subscribes to profile snapshots.
    pub fn subscribe(&self) -> watch::Receiver<Option<UserProfile>> {
        self.inner.tx.subscribe()
    }

    fn publish(&self, profile: &Option<UserProfile>) {
        self.inner.tx.send_replace(profile.clone());
    }

    async fn persist(&self, profile: &UserProfile) -> StateResult<()> {
        let json = serde_json::to_string(profile)
            .map_err(|e| StateError::Encode(e.to_string()))?;
        self.inner.general.put(KEY_USER, &json).await?;
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use atelier_remote::RemoteConfig;
    use atelier_store::StoreConfig;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn cache_against(server: &MockServer) -> (ProfileCache, KvStore) {
        let general = KvStore::open(StoreConfig::in_memory()).await.unwrap();
        let remote = RemoteClient::new(RemoteConfig::new(server.uri())).unwrap();
        (ProfileCache::new(general.clone(), remote), general)
    }

    fn profile_body() -> serde_json::Value {
        json!({"token": "tok-1", "name": "X", "email": "x@example.com"})
    }

    #[tokio::test]
    async fn test_load_caches_in_memory_and_persisted() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/profile"))
            .and(header("Authorization", "Bearer tok-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(profile_body()))
            .mount(&server)
            .await;

        let (cache, general) = cache_against(&server).await;
        let profile = cache.load_from_remote("tok-1").await.unwrap();
        assert_eq!(profile.name, "X");
        assert_eq!(cache.current().unwrap().name, "X");

        // Subsequent restore without network still returns the profile
        let restarted = ProfileCache::new(
            general,
            RemoteClient::new(RemoteConfig::new(server.uri())).unwrap(),
        );
        restarted.restore().await;
        assert_eq!(restarted.current().unwrap().name, "X");
    }

    #[tokio::test]
    async fn test_load_failure_clears_memory_keeps_persisted() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/profile"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let (cache, general) = cache_against(&server).await;

        // Pre-existing persisted profile from an earlier session
        let stale = UserProfile::new("old-tok", "Stale", "stale@example.com");
        cache.set(stale).await.unwrap();

        let err = cache.load_from_remote("expired").await.unwrap_err();
        assert!(matches!(err, StateError::Remote(_)));

        // In-memory cleared...
        assert!(cache.current().is_none());
        // ...but the persisted entry is untouched (stale-read risk, by contract)
        let json = general.get(KEY_USER).await.unwrap().unwrap();
        assert!(json.contains("Stale"));
    }

    #[tokio::test]
    async fn test_restore_corrupt_entry_is_none() {
        let server = MockServer::start().await;
        let (cache, general) = cache_against(&server).await;

        general.put(KEY_USER, "{broken").await.unwrap();
        cache.restore().await;
        assert!(cache.current().is_none());
    }

    #[tokio::test]
    async fn test_set_persists_local_edit() {
        let server = MockServer::start().await;
        let (cache, general) = cache_against(&server).await;

        let mut edited = UserProfile::new("tok-1", "X", "x@example.com");
        edited.phone = Some("+1-555-0100".to_string());
        cache.set(edited).await.unwrap();

        // The edit survives a "restart"
        let restarted = ProfileCache::new(
            general,
            RemoteClient::new(RemoteConfig::new(server.uri())).unwrap(),
        );
        restarted.restore().await;
        assert_eq!(
            restarted.current().unwrap().phone.as_deref(),
            Some("+1-555-0100")
        );
    }

    #[tokio::test]
    async fn test_clear_removes_memory_and_persisted() {
        let server = MockServer::start().await;
        let (cache, general) = cache_against(&server).await;

        cache
            .set(UserProfile::new("tok-1", "X", "x@example.com"))
            .await
            .unwrap();
        cache.clear().await.unwrap();

        assert!(cache.current().is_none());
        assert_eq!(general.get(KEY_USER).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_load_with_credentials() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/get-user-data"))
            .respond_with(ResponseTemplate::new(200).set_body_json(profile_body()))
            .mount(&server)
            .await;

        let (cache, _general) = cache_against(&server).await;
        let profile = cache
            .load_with_credentials("x@example.com", "pw")
            .await
            .unwrap();
        assert_eq!(profile.email, "x@example.com");
        assert!(cache.current().is_some());
    }
}
