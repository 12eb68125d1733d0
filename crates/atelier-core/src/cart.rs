//! # Cart Module
//!
//! The shopping cart: an ordered, deduplicated collection of purchasable
//! items with a derived total.
//!
//! ## Invariants
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Cart Invariants                                   │
//! │                                                                         │
//! │  1. At most one CartItem per id at any time.                           │
//! │     add() with an id already present is a NO-OP (first-write-wins;     │
//! │     the later add is dropped, never merged or price-updated).          │
//! │                                                                         │
//! │  2. Items keep insertion order.                                        │
//! │                                                                         │
//! │  3. total() is always derived from the current item list.              │
//! │     It is never stored, so it can never go stale.                      │
//! │                                                                         │
//! │  Per-item state machine:  absent ──add──► present ──remove──► absent   │
//! │  (no intermediate states; an item is never "pending")                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;

// =============================================================================
// Cart Item
// =============================================================================

/// An item in the shopping cart.
///
/// ## Design Notes
/// - `id`: the product identifier; uniqueness key within the cart
/// - `price_cents`: frozen at the time of adding. If the shop changes the
///   price afterwards, the cart keeps what the customer saw.
/// - Display fields (`name`, `image`) are frozen snapshots for the same
///   reason.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartItem {
    /// Product identifier (uniqueness key)
    pub id: String,

    /// Product name at time of adding (frozen)
    pub name: String,

    /// Price in cents at time of adding (frozen)
    pub price_cents: Money,

    /// Product image URL, if any
    pub image: Option<String>,

    /// When this item was added to the cart
    #[ts(as = "String")]
    pub added_at: DateTime<Utc>,
}

impl CartItem {
    /// Creates a new cart item, validating business rules.
    ///
    /// ## Errors
    /// - [`CoreError::EmptyItemId`] if `id` is empty
    /// - [`CoreError::NegativePrice`] if `price` is below zero
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        price: Money,
    ) -> CoreResult<Self> {
        let id = id.into();
        if id.is_empty() {
            return Err(CoreError::EmptyItemId);
        }
        if price.is_negative() {
            return Err(CoreError::NegativePrice { id, price });
        }

        Ok(CartItem {
            id,
            name: name.into(),
            price_cents: price,
            image: None,
            added_at: Utc::now(),
        })
    }

    /// Sets the product image URL (builder style).
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart.
///
/// Pure in-memory value type: persistence and change notification live in
/// `atelier-state`, which serializes `items()` as a JSON array.
#[derive(Debug, Clone, Default)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { items: Vec::new() }
    }

    /// Rebuilds a cart from a persisted item list.
    ///
    /// Re-applies the uniqueness invariant: if the persisted data somehow
    /// holds duplicate ids, the first occurrence wins and the rest are
    /// dropped. Insertion order is preserved.
    pub fn from_items(items: Vec<CartItem>) -> Self {
        let mut cart = Cart::new();
        for item in items {
            cart.add(item);
        }
        cart
    }

    /// Adds an item to the cart.
    ///
    /// ## Behavior
    /// - If an item with the same id is already present: NO-OP, returns
    ///   `false`. The existing item is untouched (first-write-wins).
    /// - Otherwise the item is appended and `true` is returned.
    pub fn add(&mut self, item: CartItem) -> bool {
        if self.contains(&item.id) {
            return false;
        }
        self.items.push(item);
        true
    }

    /// Removes the item with the given id.
    ///
    /// Removes all matching items (at most one by invariant). Returns
    /// `true` if anything was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let initial_len = self.items.len();
        self.items.retain(|i| i.id != id);
        self.items.len() != initial_len
    }

    /// Clears all items from the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Checks whether an item with the given id is in the cart.
    pub fn contains(&self, id: &str) -> bool {
        self.items.iter().any(|i| i.id == id)
    }

    /// The items in insertion order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Calculates the total price of all items.
    ///
    /// Always recomputed from the current item list; never cached.
    pub fn total(&self) -> Money {
        self.items.iter().map(|i| i.price_cents).sum()
    }

    /// Returns the number of items in the cart.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, cents: i64) -> CartItem {
        CartItem::new(id, format!("Item {}", id), Money::from_cents(cents)).unwrap()
    }

    #[test]
    fn test_add_and_total() {
        let mut cart = Cart::new();
        assert!(cart.add(item("a", 1999)));
        assert!(cart.add(item("b", 500)));

        assert_eq!(cart.item_count(), 2);
        assert_eq!(cart.total(), Money::from_cents(2499));
    }

    #[test]
    fn test_duplicate_add_is_noop() {
        let mut cart = Cart::new();
        assert!(cart.add(item("a", 1999)));
        assert!(cart.add(item("b", 500)));

        // Same id with a different price: dropped, not merged or updated
        assert!(!cart.add(item("a", 9900)));

        assert_eq!(cart.item_count(), 2);
        assert_eq!(cart.total(), Money::from_cents(2499));
        assert_eq!(cart.items()[0].price_cents, Money::from_cents(1999));
    }

    #[test]
    fn test_remove() {
        let mut cart = Cart::new();
        cart.add(item("a", 1999));
        cart.add(item("b", 500));

        assert!(cart.remove("b"));
        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.total(), Money::from_cents(1999));
        assert_eq!(cart.items()[0].id, "a");

        // Removing an absent id is a no-op
        assert!(!cart.remove("b"));
        assert_eq!(cart.total(), Money::from_cents(1999));
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut cart = Cart::new();
        for id in ["c", "a", "b"] {
            cart.add(item(id, 100));
        }
        let order: Vec<&str> = cart.items().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(order, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        cart.add(item("a", 1999));
        cart.clear();

        assert!(cart.is_empty());
        assert!(cart.total().is_zero());
    }

    #[test]
    fn test_from_items_reapplies_dedup() {
        // Simulates a tampered/buggy persisted list with a duplicate id
        let items = vec![item("a", 1999), item("b", 500), item("a", 9900)];
        let cart = Cart::from_items(items);

        assert_eq!(cart.item_count(), 2);
        assert_eq!(cart.total(), Money::from_cents(2499));
    }

    #[test]
    fn test_item_validation() {
        assert!(matches!(
            CartItem::new("", "Nameless", Money::zero()),
            Err(CoreError::EmptyItemId)
        ));
        assert!(matches!(
            CartItem::new("a", "Refund?", Money::from_cents(-1)),
            Err(CoreError::NegativePrice { .. })
        ));
        // Zero price is allowed (free item / promotion)
        assert!(CartItem::new("a", "Freebie", Money::zero()).is_ok());
    }

    #[test]
    fn test_item_serde_round_trip() {
        let item = item("shirt-01", 1999).with_image("https://cdn.example/s1.png");
        let json = serde_json::to_string(&item).unwrap();
        assert!(json.contains("\"priceCents\":1999"));

        let back: CartItem = serde_json::from_str(&json).unwrap();
        assert_eq!(back, item);
    }
}
