//! # User Profile
//!
//! The cached representation of the authenticated user's account data.
//!
//! The profile is fetched from the shop backend (`GET /profile` or
//! `POST /get-user-data`), mirrored to the general store as JSON under the
//! `user` key, and cleared on logout. This type is both the wire shape and
//! the persisted shape.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// The authenticated user's account data.
///
/// ## Identity
/// Identity is the authenticated user; the value is destroyed (cleared)
/// on logout. `token` is the bearer token the backend issued at login.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct UserProfile {
    /// Bearer token for authenticated requests
    pub token: String,

    /// Display name
    pub name: String,

    /// Account email address
    pub email: String,

    /// Phone number, if the user provided one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// Shipping address, if the user provided one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    /// When the account was created
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(as = "Option<String>")]
    pub joined_date: Option<DateTime<Utc>>,

    /// Profile image URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
}

impl UserProfile {
    /// Creates a profile with the mandatory fields set.
    ///
    /// Optional fields default to `None`; use the struct update syntax or
    /// direct field assignment for the rest.
    pub fn new(
        token: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        UserProfile {
            token: token.into(),
            name: name.into(),
            email: email.into(),
            phone: None,
            address: None,
            joined_date: None,
            profile_image: None,
        }
    }
}
