//! # User model and session types
//!
//! [`UserProfile`] is the row the backend keeps in its `users` table. The
//! client only ever reads it and patches `avatar_url`. Row creation at
//! sign-up, role assignment, and ban flags all belong to the backend.
//!
//! `role` stays a raw string on the profile so that a row with a role this
//! client doesn't know about still deserializes and falls through to the
//! generic redirect. [`UserProfile::role`] parses it into [`Role`] on demand.

use serde::{Deserialize, Serialize};

/// Dashboard role. Determines which pages a user may access.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Buyer,
    Seller,
    Delivery,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Buyer => "buyer",
            Role::Seller => "seller",
            Role::Delivery => "delivery",
            Role::Admin => "admin",
        }
    }

    pub fn parse(raw: &str) -> Option<Role> {
        match raw {
            "buyer" => Some(Role::Buyer),
            "seller" => Some(Role::Seller),
            "delivery" => Some(Role::Delivery),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }

    /// Landing page for this role's dashboard, relative to a sibling
    /// dashboard page.
    pub fn landing_path(&self) -> &'static str {
        match self {
            Role::Buyer => "../buyer/",
            Role::Seller => "../seller/",
            Role::Delivery => "../delivery/",
            Role::Admin => "../admin/",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user's row in the `users` table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub name: Option<String>,
    pub role: String,
    #[serde(default)]
    pub is_banned: bool,
    pub avatar_url: Option<String>,
}

impl UserProfile {
    /// Parsed role, or `None` for values this client doesn't recognize.
    pub fn role(&self) -> Option<Role> {
        Role::parse(&self.role)
    }

    /// Display name with a generic fallback.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("User")
    }
}

/// Proof of authentication issued by the backend.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: String,
    pub access_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse_roundtrip() {
        for role in [Role::Buyer, Role::Seller, Role::Delivery, Role::Admin] {
            assert_eq!(Role::parse(role.as_str()), Some(role));
        }
        assert_eq!(Role::parse("superuser"), None);
        assert_eq!(Role::parse("Buyer"), None);
    }

    #[test]
    fn test_landing_paths() {
        assert_eq!(Role::Buyer.landing_path(), "../buyer/");
        assert_eq!(Role::Seller.landing_path(), "../seller/");
        assert_eq!(Role::Delivery.landing_path(), "../delivery/");
        assert_eq!(Role::Admin.landing_path(), "../admin/");
    }

    #[test]
    fn test_profile_deserializes_unknown_role() {
        let raw = r#"{"id":"u1","name":"Asha","role":"auditor","avatar_url":null}"#;
        let profile: UserProfile = serde_json::from_str(raw).unwrap();
        assert_eq!(profile.role(), None);
        assert!(!profile.is_banned);
        assert_eq!(profile.display_name(), "Asha");
    }

    #[test]
    fn test_display_name_fallback() {
        let profile = UserProfile {
            id: "u1".into(),
            name: None,
            role: "buyer".into(),
            is_banned: false,
            avatar_url: None,
        };
        assert_eq!(profile.display_name(), "User");
    }
}
