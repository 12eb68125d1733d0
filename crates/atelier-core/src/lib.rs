//! # atelier-core: Pure Business Logic for Atelier
//!
//! This crate is the **heart** of the Atelier shopping client's state core.
//! It contains all business logic as pure functions with zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Atelier Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Mobile UI (JS frontend)                      │   │
//! │  │    Auth screens ──► Home ──► Cart ──► Account                  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ snapshots / operations                 │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    atelier-state (managers)                     │   │
//! │  │    SessionManager, ProfileCache, CartStore                     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ atelier-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   money   │  │   cart    │  │  profile  │  │  session  │  │   │
//! │  │   │   Money   │  │   Cart    │  │UserProfile│  │  Session  │  │   │
//! │  │   │           │  │ CartItem  │  │           │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO NETWORK • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`cart`] - Cart and CartItem with the dedup/total invariants
//! - [`profile`] - Cached user profile type
//! - [`session`] - Authentication flag
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Storage, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use atelier_core::cart::{Cart, CartItem};
//! use atelier_core::money::Money;
//!
//! let mut cart = Cart::new();
//! cart.add(CartItem::new("a", "Linen shirt", Money::from_cents(1999)).unwrap());
//! cart.add(CartItem::new("b", "Socks", Money::from_cents(500)).unwrap());
//!
//! // Duplicate id: silently dropped, first write wins
//! assert!(!cart.add(CartItem::new("a", "Linen shirt", Money::from_cents(9900)).unwrap()));
//!
//! assert_eq!(cart.total(), Money::from_cents(2499));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod profile;
pub mod session;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use atelier_core::Money` instead of
// `use atelier_core::money::Money`

pub use cart::{Cart, CartItem};
pub use error::{CoreError, CoreResult};
pub use money::Money;
pub use profile::UserProfile;
pub use session::Session;
