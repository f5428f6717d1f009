use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Group, User};

/// Post entity - a single authored text entry, optionally tagged with a group.
///
/// Author and group come back pre-resolved from the repository so listing
/// templates can read `post.group.title` without a follow-up query.
/// `author` and `pub_date` are fixed at creation; edits touch `text` and
/// `group` only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub text: String,
    pub pub_date: DateTime<Utc>,
    pub author: User,
    pub group: Option<Group>,
}

impl Post {
    pub fn is_authored_by(&self, user: &User) -> bool {
        self.author.id == user.id
    }
}
