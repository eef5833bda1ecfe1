//! Status, payment, and role badges.
//!
//! Each state family is an exhaustive enum with a total `badge()` mapping, so
//! adding a state is a compile-time-checked change. Parsing a raw key returns
//! `Option`; rendering an unknown key falls back to the dim badge.

use backend::Role;
use dioxus::prelude::*;

/// Everything a badge needs to render.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BadgeView {
    pub class: &'static str,
    pub icon: &'static str,
    pub label: &'static str,
}

/// Neutral badge for unknown or absent states.
pub const DIM_BADGE: BadgeView = BadgeView {
    class: "badge-dim",
    icon: "—",
    label: "—",
};

/// Order lifecycle states.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OrderStatus {
    Placed,
    Assigned,
    Picked,
    Delivered,
    Returned,
    Cancelled,
}

impl OrderStatus {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "placed" => Some(Self::Placed),
            "assigned" => Some(Self::Assigned),
            "picked" => Some(Self::Picked),
            "delivered" => Some(Self::Delivered),
            "returned" => Some(Self::Returned),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }

    pub fn badge(self) -> BadgeView {
        match self {
            Self::Placed => BadgeView { class: "badge-gold", icon: "🕐", label: "placed" },
            Self::Assigned => BadgeView { class: "badge-gold", icon: "📋", label: "assigned" },
            Self::Picked => BadgeView { class: "badge-gold", icon: "📦", label: "picked" },
            Self::Delivered => BadgeView { class: "badge-green", icon: "✅", label: "delivered" },
            Self::Returned => BadgeView { class: "badge-rose", icon: "↩️", label: "returned" },
            Self::Cancelled => BadgeView { class: "badge-rose", icon: "✕", label: "cancelled" },
        }
    }
}

/// Payout/settlement states.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PayoutStatus {
    Pending,
    Released,
    AdminWallet,
    Held,
    CodCollected,
}

impl PayoutStatus {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "pending" => Some(Self::Pending),
            "released" => Some(Self::Released),
            "admin_wallet" => Some(Self::AdminWallet),
            "held" => Some(Self::Held),
            "cod_collected" => Some(Self::CodCollected),
            _ => None,
        }
    }

    pub fn badge(self) -> BadgeView {
        match self {
            Self::Pending => BadgeView { class: "badge-dim", icon: "⏳", label: "pending" },
            Self::Released => BadgeView { class: "badge-green", icon: "💚", label: "released" },
            Self::AdminWallet => BadgeView { class: "badge-gold", icon: "🏦", label: "admin_wallet" },
            Self::Held => BadgeView { class: "badge-rose", icon: "⏸", label: "held" },
            Self::CodCollected => BadgeView { class: "badge-green", icon: "💵", label: "cod_collected" },
        }
    }
}

/// Account/verification states.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccountStatus {
    Active,
    Inactive,
    Verified,
    Banned,
    Unverified,
}

impl AccountStatus {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "active" => Some(Self::Active),
            "inactive" => Some(Self::Inactive),
            "verified" => Some(Self::Verified),
            "banned" => Some(Self::Banned),
            "unverified" => Some(Self::Unverified),
            _ => None,
        }
    }

    pub fn badge(self) -> BadgeView {
        match self {
            Self::Active => BadgeView { class: "badge-green", icon: "●", label: "active" },
            Self::Inactive => BadgeView { class: "badge-dim", icon: "○", label: "inactive" },
            Self::Verified => BadgeView { class: "badge-green", icon: "✓", label: "verified" },
            Self::Banned => BadgeView { class: "badge-rose", icon: "🚫", label: "banned" },
            Self::Unverified => BadgeView { class: "badge-dim", icon: "—", label: "unverified" },
        }
    }
}

/// Payment methods.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaymentMethod {
    Cod,
    Online,
}

impl PaymentMethod {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "cod" => Some(Self::Cod),
            "online" => Some(Self::Online),
            _ => None,
        }
    }

    pub fn badge(self) -> BadgeView {
        match self {
            Self::Cod => BadgeView { class: "badge-gold", icon: "💵", label: "COD" },
            Self::Online => BadgeView { class: "badge-green", icon: "💳", label: "Online" },
        }
    }
}

/// Badge for a parsed role, or the dim badge for roles this client doesn't
/// know.
pub fn role_badge(role: Option<Role>) -> BadgeView {
    match role {
        Some(Role::Buyer) => BadgeView { class: "badge-dim", icon: "🛍️", label: "buyer" },
        Some(Role::Seller) => BadgeView { class: "badge-gold", icon: "🏪", label: "seller" },
        Some(Role::Delivery) => BadgeView { class: "badge-green", icon: "🚚", label: "delivery" },
        Some(Role::Admin) => BadgeView { class: "badge-rose", icon: "🛠️", label: "admin" },
        None => DIM_BADGE,
    }
}

/// Resolve a raw status key across all state families, dim on miss.
pub fn status_badge(raw: &str) -> BadgeView {
    OrderStatus::parse(raw)
        .map(OrderStatus::badge)
        .or_else(|| PayoutStatus::parse(raw).map(PayoutStatus::badge))
        .or_else(|| AccountStatus::parse(raw).map(AccountStatus::badge))
        .unwrap_or(DIM_BADGE)
}

#[component]
pub fn Badge(view: BadgeView) -> Element {
    rsx! {
        span {
            class: "badge {view.class}",
            "{view.icon} {view.label}"
        }
    }
}

#[component]
pub fn RoleBadge(role: Option<Role>) -> Element {
    rsx! {
        Badge { view: role_badge(role) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_keys_fall_back_to_dim() {
        assert_eq!(status_badge("shipped_to_mars"), DIM_BADGE);
        assert_eq!(status_badge(""), DIM_BADGE);
        assert_eq!(role_badge(None), DIM_BADGE);
        assert_eq!(PaymentMethod::parse("crypto"), None);
    }

    #[test]
    fn test_status_badge_resolves_each_family() {
        assert_eq!(status_badge("delivered").class, "badge-green");
        assert_eq!(status_badge("cancelled").class, "badge-rose");
        assert_eq!(status_badge("held").icon, "⏸");
        assert_eq!(status_badge("verified").icon, "✓");
    }

    #[test]
    fn test_badge_labels_match_keys() {
        for key in [
            "placed",
            "assigned",
            "picked",
            "delivered",
            "returned",
            "cancelled",
            "pending",
            "released",
            "admin_wallet",
            "held",
            "cod_collected",
            "active",
            "inactive",
            "verified",
            "banned",
            "unverified",
        ] {
            assert_eq!(status_badge(key).label, key, "label mismatch for {key}");
        }
    }

    #[test]
    fn test_payment_badges() {
        assert_eq!(PaymentMethod::parse("cod").unwrap().badge().label, "COD");
        assert_eq!(
            PaymentMethod::parse("online").unwrap().badge().class,
            "badge-green"
        );
    }

    #[test]
    fn test_role_badges_cover_all_roles() {
        assert_eq!(role_badge(Some(Role::Buyer)).icon, "🛍️");
        assert_eq!(role_badge(Some(Role::Seller)).class, "badge-gold");
        assert_eq!(role_badge(Some(Role::Delivery)).label, "delivery");
        assert_eq!(role_badge(Some(Role::Admin)).class, "badge-rose");
    }
}
