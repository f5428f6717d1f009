use serde::{Deserialize, Serialize};
use serde_json::json;

/// User entity - the minimal projection of an account this system needs.
///
/// Accounts are managed by the external authentication collaborator;
/// `username` is the stable key used in profile and post URLs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
}

/// The caller attached to a request: anonymous, or a specific user.
///
/// Views receive this as an explicit parameter rather than reading it from
/// ambient request state.
#[derive(Debug, Clone)]
pub enum Caller {
    Anonymous,
    Authenticated(User),
}

impl Caller {
    pub fn user(&self) -> Option<&User> {
        match self {
            Caller::Anonymous => None,
            Caller::Authenticated(user) => Some(user),
        }
    }

    pub fn is_anonymous(&self) -> bool {
        matches!(self, Caller::Anonymous)
    }

    /// Context mapping handed to templates as the `user` key.
    pub fn context(&self) -> serde_json::Value {
        match self {
            Caller::Anonymous => json!({ "is_authenticated": false }),
            Caller::Authenticated(user) => json!({
                "is_authenticated": true,
                "id": user.id,
                "username": user.username,
            }),
        }
    }
}
