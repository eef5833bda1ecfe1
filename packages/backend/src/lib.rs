//! # Typed client for the Petal Rush backend service
//!
//! Everything that talks to the hosted backend lives here: connection
//! credentials in browser local storage, the authenticated REST client, and
//! the avatar upload flow against the storage bucket.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`store`] | Key-value seam over browser local storage, with an in-memory fake for tests |
//! | [`credentials`] | Connection URL + anon key persisted under fixed keys |
//! | [`models`] | [`Role`], [`UserProfile`], [`Session`] |
//! | [`client`] | The [`Backend`] trait and the reqwest-based [`HttpBackend`] |
//! | [`avatar`] | Validation, deterministic paths, cache-busting, and the upload sequence |
//!
//! The [`Backend`] trait is the seam between the UI and the network: pages
//! receive a constructed client instead of reaching for a global handle, and
//! tests substitute [`MemoryBackend`].

pub mod avatar;
pub mod client;
pub mod credentials;
pub mod error;
pub mod models;
pub mod store;

mod memory;
pub use memory::{Calls, MemoryBackend};

pub use client::{Backend, HttpBackend};
pub use credentials::Credentials;
pub use error::BackendError;
pub use models::{Role, Session, UserProfile};
#[cfg(target_arch = "wasm32")]
pub use store::BrowserStore;
pub use store::{KeyValueStore, MemoryStore, SharedStore};
