//! Error type for backend calls.
//!
//! Provider-supplied messages are carried through unchanged so the UI can
//! show them verbatim in toasts.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BackendError {
    /// No stored credentials, so no client could be constructed.
    #[error("No database configured.")]
    NotConfigured,

    /// Auth provider rejected the request.
    #[error("{0}")]
    Auth(String),

    /// Table read or update failed.
    #[error("{0}")]
    Table(String),

    /// Object storage operation failed.
    #[error("{0}")]
    Storage(String),

    /// Transport-level failure (DNS, connection, serialization).
    #[error("network error: {0}")]
    Network(String),
}

impl BackendError {
    pub(crate) fn network(err: reqwest::Error) -> Self {
        BackendError::Network(err.to_string())
    }
}
