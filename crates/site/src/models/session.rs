//! Session-related types.
//!
//! Types stored in the session for authentication state and per-screen
//! UI state.

use chrono::{DateTime, Utc};
use hunger_box_core::{ContactNumber, Counter, UserId};
use serde::{Deserialize, Serialize};

/// Session-stored user identity.
///
/// Written once on successful login; the username copy is refreshed when
/// the profile screen renames the account. Presence in the session is
/// what "logged in" means.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    /// Id the order subsystem knows the user by.
    pub user_id: UserId,
    /// Cleaned display name (no greeting prefix).
    pub username: String,
    /// The account key.
    pub contact_number: ContactNumber,
    /// When this session was established.
    pub logged_in_at: DateTime<Utc>,
}

impl CurrentUser {
    /// Name shown in headers and avatars; falls back to the contact
    /// number when the username is blank.
    #[must_use]
    pub fn display_name(&self) -> &str {
        let name = self.username.trim();
        if name.is_empty() {
            self.contact_number.as_str()
        } else {
            name
        }
    }

}

/// Session keys.
pub mod keys {
    use super::Counter;

    /// Key for the current logged-in user.
    pub const CURRENT_USER: &str = "current_user";

    /// Key for the dark-mode flag.
    pub const DARK_MODE: &str = "dark_mode";

    /// Key for a counter's cart.
    #[must_use]
    pub fn cart(counter: Counter) -> String {
        format!("cart:{}", counter.slug())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(clippy::unwrap_used)]
    fn user(username: &str) -> CurrentUser {
        CurrentUser {
            user_id: UserId::new(2),
            username: username.to_string(),
            contact_number: ContactNumber::parse("9876543210").unwrap(),
            logged_in_at: Utc::now(),
        }
    }

    #[test]
    fn test_display_name_falls_back_to_contact() {
        assert_eq!(user("Ankur").display_name(), "Ankur");
        assert_eq!(user("   ").display_name(), "9876543210");
    }

    #[test]
    fn test_cart_keys_are_distinct_per_counter() {
        assert_eq!(keys::cart(Counter::TimeOut), "cart:time-out");
        assert_ne!(keys::cart(Counter::TimeOut), keys::cart(Counter::MainCafe));
    }
}
