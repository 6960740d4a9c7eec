//! Client-wide error types.

use reqwest::StatusCode;
use thiserror::Error;

/// Client-wide result type.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors surfaced by the client core.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport-level failure (DNS, connect, timeout, body read).
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The login/register endpoint rejected the supplied credentials.
    ///
    /// This is a user-facing failure, not a session expiry: the session
    /// stays anonymous and nothing is cleared.
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    /// A previously valid token was rejected by the backend.
    ///
    /// The session has already been force-signed-out by the time this
    /// error reaches the caller.
    #[error("Session expired - sign in again")]
    SessionExpired,

    /// Non-success response outside the authorization-failure paths.
    #[error("API error ({status}): {message}")]
    Api { status: StatusCode, message: String },

    /// Credential or cache storage I/O failure.
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// JSON encode/decode failure.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The configured backend base address is not a valid URL.
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),

    /// The operation was cancelled before completion.
    #[error("Operation cancelled")]
    Cancelled,
}

impl ClientError {
    /// Check whether an HTTP status represents an authorization rejection.
    #[inline]
    pub fn is_auth_rejection(status: StatusCode) -> bool {
        status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN
    }

    /// Check if this error is transient and a retry may succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Network(e) => e.is_timeout() || e.is_connect(),
            Self::Api { status, .. } => status.is_server_error(),
            _ => false,
        }
    }

    /// Check if this error ended the session.
    #[inline]
    pub fn is_session_expiry(&self) -> bool {
        matches!(self, Self::SessionExpired)
    }
}
