//! This crate contains all shared UI for the Petal Rush dashboards.

mod client;
pub use client::{clear_backend, init_backend, make_backend, shared_store};

mod auth;
pub use auth::{
    current_user, evaluate_guard, login_path, logout, redirect, redirect_to_login, require_role,
    AuthProvider, AuthState, GuardOutcome, LogoutButton, RequireRole, use_auth,
};

mod toast;
pub use toast::{push_toast, use_toast, Toast, ToastLevel, ToastProvider, Toasts};

mod badge;
pub use badge::{
    role_badge, status_badge, AccountStatus, Badge, BadgeView, OrderStatus, PaymentMethod,
    PayoutStatus, RoleBadge, DIM_BADGE,
};

pub mod format;

mod theme;
pub use theme::{apply_theme, init_theme, load_theme, toggle_theme, Theme, ThemeToggle};

mod sidebar;
pub use sidebar::{use_sidebar, NavItem, Sidebar, SidebarOverlay, SidebarProvider};

mod panels;
pub use panels::{use_panels, Panel, PanelHost};

mod modal_overlay;
pub use modal_overlay::{use_document_escape, ModalOverlay};

mod avatar;
pub use avatar::{data_url, Avatar, UploadableAvatar};

pub mod geo;
pub use geo::{DetectLocationButton, GeoError};
