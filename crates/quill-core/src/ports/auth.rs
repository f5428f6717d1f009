//! Session identification port.
//!
//! Login and registration live in the external auth system; this side only
//! issues and verifies the session tokens that identify a caller.

use crate::domain::User;

/// Claims carried by a verified session token.
#[derive(Debug, Clone)]
pub struct SessionClaims {
    pub user_id: i64,
    pub username: String,
    pub exp: i64,
}

/// Session token service.
pub trait SessionService: Send + Sync {
    /// Issue a session token for a user.
    fn issue(&self, user: &User) -> Result<String, AuthError>;

    /// Verify and decode a session token.
    fn verify(&self, token: &str) -> Result<SessionClaims, AuthError>;
}

/// Session verification errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Session expired")]
    SessionExpired,

    #[error("Invalid session token: {0}")]
    InvalidToken(String),

    #[error("No session presented")]
    MissingSession,
}
