use async_trait::async_trait;

use crate::domain::{Group, Post, User};
use crate::error::RepoError;
use crate::pagination::{Page, PageRequest};

/// User lookups. Accounts themselves are owned by the external
/// authentication system; this side only resolves usernames.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError>;
}

/// Group lookups. Groups are reference data, addressed by slug.
#[async_trait]
pub trait GroupRepository: Send + Sync {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Group>, RepoError>;

    /// All groups, for constraining form selection to real groups.
    async fn list(&self) -> Result<Vec<Group>, RepoError>;
}

/// Scope of a post listing query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostFilter {
    All,
    Group(i64),
    Author(i64),
}

/// Fields for creating a post. The author id always comes from the
/// authenticated caller; `pub_date` is assigned by the store.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub author_id: i64,
    pub text: String,
    pub group_id: Option<i64>,
}

/// Post repository. Every returned [`Post`] carries its author and group
/// pre-resolved; listings are ordered newest first.
#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, RepoError>;

    /// Resolve a post by id only when its author has the given username.
    async fn find_by_id_and_author(
        &self,
        id: i64,
        username: &str,
    ) -> Result<Option<Post>, RepoError>;

    async fn count_by_author(&self, author_id: i64) -> Result<u64, RepoError>;

    /// One page of posts under `filter`, newest first, with the lenient
    /// page-number policy of [`crate::pagination`] applied.
    async fn page(&self, filter: PostFilter, page: PageRequest) -> Result<Page<Post>, RepoError>;

    async fn create(&self, new_post: NewPost) -> Result<Post, RepoError>;

    /// Update `text` and `group` together in a single statement. Author and
    /// publication date are never touched.
    async fn update_content(
        &self,
        id: i64,
        text: String,
        group_id: Option<i64>,
    ) -> Result<Post, RepoError>;
}
