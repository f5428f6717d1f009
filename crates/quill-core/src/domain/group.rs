use serde::{Deserialize, Serialize};

/// Group entity - a named topical collection of posts.
///
/// Groups are reference data: they are created out of band and looked up
/// externally by `slug`, never by numeric id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub description: String,
}
