//! Optional identity extraction.
//!
//! Every page is reachable anonymously; views decide what a login gate
//! means for them. The extractor therefore never rejects a request: it
//! yields the caller's identity when a valid session token is present
//! and `None` otherwise.

use std::future::{Ready, ready};

use actix_web::{FromRequest, HttpRequest, dev::Payload, web};

use quill_core::domain::{Caller, User};
use crate::state::AppState;

/// Name of the session cookie set by the auth service.
pub const SESSION_COOKIE: &str = "session";

/// The caller's identity, if the request carried a valid session.
///
/// Accepts the session token from the `session` cookie or from an
/// `Authorization: Bearer` header. Expired or malformed tokens are
/// treated as anonymous, not as errors.
pub struct OptionalIdentity(pub Option<User>);

impl OptionalIdentity {
    pub fn caller(self) -> Caller {
        match self.0 {
            Some(user) => Caller::Authenticated(user),
            None => Caller::Anonymous,
        }
    }
}

impl FromRequest for OptionalIdentity {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(OptionalIdentity(identify(req))))
    }
}

fn identify(req: &HttpRequest) -> Option<User> {
    let state = req.app_data::<web::Data<AppState>>()?;
    let token = session_token(req)?;

    match state.sessions.verify(&token) {
        Ok(claims) => Some(User {
            id: claims.user_id,
            username: claims.username,
        }),
        Err(e) => {
            tracing::debug!("Session token rejected: {}", e);
            None
        }
    }
}

fn session_token(req: &HttpRequest) -> Option<String> {
    if let Some(cookie) = req.cookie(SESSION_COOKIE) {
        return Some(cookie.value().to_string());
    }

    req.headers()
        .get("Authorization")?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::to_string)
}
