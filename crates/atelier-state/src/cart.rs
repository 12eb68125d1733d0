//! # Cart Store Manager
//!
//! Owns the in-memory cart, mirrors it to the general store under the
//! `cart` key, and broadcasts a snapshot after every mutation.
//!
//! ## Single-Writer Queue
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  Why the Mutex Spans the Whole Mutation                 │
//! │                                                                         │
//! │  Without it, a rapid double-tap "add" races:                           │
//! │                                                                         │
//! │    Task A: read list ──────────► write list+itemA                      │
//! │    Task B:      read list ─────────────► write list+itemB   ❌ LOST A  │
//! │                                                                         │
//! │  Here every mutation holds the cart lock across the read-modify-write  │
//! │  INCLUDING the storage await, so mutations queue up one at a time:     │
//! │                                                                         │
//! │    Task A: [lock ── mutate ── persist ── unlock]                       │
//! │    Task B:                                [lock ── mutate ── persist]  │
//! │                                                                         │
//! │  A logout's clear() goes through the same lock, so it is ordered       │
//! │  against any in-flight add.                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::{watch, Mutex};
use tracing::{debug, warn};

use atelier_core::{Cart, CartItem, Money};
use atelier_store::KvStore;

use crate::error::{StateError, StateResult};
use crate::KEY_CART;

// =============================================================================
// Snapshot
// =============================================================================

/// Immutable view of the cart, published after every mutation.
///
/// The total is computed from the item list at publish time, never cached
/// across mutations, so it can never go stale.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSnapshot {
    /// Items in insertion order.
    pub items: Vec<CartItem>,

    /// Derived total price.
    pub total_cents: Money,
}

impl From<&Cart> for CartSnapshot {
    fn from(cart: &Cart) -> Self {
        CartSnapshot {
            items: cart.items().to_vec(),
            total_cents: cart.total(),
        }
    }
}

impl CartSnapshot {
    /// Number of items in the cart.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// =============================================================================
// Manager
// =============================================================================

struct CartInner {
    general: KvStore,
    /// The authoritative in-memory cart. The lock is the single-writer
    /// queue: held across the full read-modify-write of every mutation.
    cart: Mutex<Cart>,
    tx: watch::Sender<CartSnapshot>,
}

/// Manages the shopping cart slice of persisted state.
///
/// Cheap to clone; all clones share the same state.
#[derive(Clone)]
pub struct CartStore {
    inner: Arc<CartInner>,
}

impl CartStore {
    /// Creates a cart store over the general key-value store.
    ///
    /// Starts empty; call [`CartStore::restore`] at cold start to load the
    /// persisted list.
    pub fn new(general: KvStore) -> Self {
        let (tx, _rx) = watch::channel(CartSnapshot::default());
        CartStore {
            inner: Arc::new(CartInner {
                general,
                cart: Mutex::new(Cart::new()),
                tx,
            }),
        }
    }

    /// Restores the cart from the general store.
    ///
    /// Missing or corrupt data is the designed fallback: an empty cart
    /// with total 0. Never fails.
    pub async fn restore(&self) {
        let mut cart = self.inner.cart.lock().await;

        let items: Vec<CartItem> = match self.inner.general.get(KEY_CART).await {
            Ok(Some(json)) => match serde_json::from_str(&json) {
                Ok(items) => items,
                Err(e) => {
                    warn!(error = %e, "Persisted cart is corrupt, starting empty");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(error = %e, "Failed to read persisted cart, starting empty");
                Vec::new()
            }
        };

        // from_items re-applies the uniqueness invariant on restore
        *cart = Cart::from_items(items);
        debug!(items = cart.item_count(), total = %cart.total(), "Cart restored");
        self.publish(&cart);
    }

    /// Adds an item to the cart.
    ///
    /// ## Behavior
    /// - Duplicate id: NO-OP, returns `Ok(false)`. First write wins; the
    ///   later add is dropped, not merged or price-updated.
    /// - Otherwise: appended, snapshot published, full list persisted.
    ///
    /// ## Errors
    /// [`StateError::Store`] if the persist fails. The in-memory add (and
    /// the published snapshot) stand; the error is retryable.
    pub async fn add(&self, item: CartItem) -> StateResult<bool> {
        let mut cart = self.inner.cart.lock().await;

        let id = item.id.clone();
        if !cart.add(item) {
            debug!(id = %id, "Duplicate cart item dropped");
            return Ok(false);
        }

        debug!(id = %id, total = %cart.total(), "Cart item added");
        self.publish(&cart);
        self.persist(&cart).await?;
        Ok(true)
    }

    /// Removes the item with the given id.
    ///
    /// Returns `Ok(false)` if no such item was in the cart.
    pub async fn remove(&self, id: &str) -> StateResult<bool> {
        let mut cart = self.inner.cart.lock().await;

        if !cart.remove(id) {
            debug!(id = %id, "Remove of absent cart item ignored");
            return Ok(false);
        }

        debug!(id = %id, total = %cart.total(), "Cart item removed");
        self.publish(&cart);
        self.persist(&cart).await?;
        Ok(true)
    }

    /// Empties the cart and removes the persisted entry.
    ///
    /// Invoked directly by the UI and by session logout (the cart's part
    /// of the full local wipe).
    pub async fn clear(&self) -> StateResult<()> {
        let mut cart = self.inner.cart.lock().await;

        cart.clear();
        self.publish(&cart);
        self.inner.general.remove(KEY_CART).await?;
        debug!("Cart cleared");
        Ok(())
    }

    /// The current snapshot (items + derived total).
    pub fn snapshot(&self) -> CartSnapshot {
        self.inner.tx.borrow().clone()
    }

    /// The current derived total.
    pub fn total(&self) -> Money {
        self.inner.tx.borrow().total_cents
    }

    /// Subscribes to cart snapshots.
    ///
    /// The receiver immediately holds the current snapshot and is marked
    /// changed on every mutation.
    pub fn subscribe(&self) -> watch::Receiver<CartSnapshot> {
        self.inner.tx.subscribe()
    }

    fn publish(&self, cart: &Cart) {
        self.inner.tx.send_replace(CartSnapshot::from(cart));
    }

    /// Persists the full item list as a JSON array under `cart`.
    async fn persist(&self, cart: &Cart) -> StateResult<()> {
        let json = serde_json::to_string(cart.items())
            .map_err(|e| StateError::Encode(e.to_string()))?;
        self.inner.general.put(KEY_CART, &json).await?;
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
