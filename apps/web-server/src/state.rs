//! Application state - shared across all handlers.
//!
//! Postgres-backed when `DATABASE_URL` is configured; otherwise the
//! repositories fall back to a fully functional in-memory store so the
//! binary (and the handler tests) run without a database.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use quill_core::domain::{Group, Post, User};
use quill_core::error::RepoError;
use quill_core::pagination::{Page, PageRequest};
use quill_core::ports::{
    GroupRepository, NewPost, PostFilter, PostRepository, Renderer, SessionService,
    UserRepository,
};
use quill_infra::{
    DatabaseConnections, JsonRenderer, JwtSessionService, PostgresGroupRepository,
    PostgresPostRepository, PostgresUserRepository,
};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub groups: Arc<dyn GroupRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub sessions: Arc<dyn SessionService>,
    pub renderer: Arc<dyn Renderer>,
    pub page_size: u64,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Self {
        let sessions: Arc<dyn SessionService> = Arc::new(JwtSessionService::from_env());

        match &config.database {
            Some(db_config) => match DatabaseConnections::init(db_config).await {
                Ok(connections) => {
                    tracing::info!("Application state initialized (postgres)");
                    let db = Arc::new(connections.main);
                    Self {
                        users: Arc::new(PostgresUserRepository::new(db.clone())),
                        groups: Arc::new(PostgresGroupRepository::new(db.clone())),
                        posts: Arc::new(PostgresPostRepository::new(db)),
                        sessions,
                        renderer: Arc::new(JsonRenderer),
                        page_size: config.page_size,
                    }
                }
                Err(e) => {
                    tracing::error!(
                        "Failed to connect to database: {}. Using in-memory fallback.",
                        e
                    );
                    Self::with_store(MemoryStore::new(), sessions, config.page_size)
                }
            },
            None => {
                tracing::warn!("DATABASE_URL not set. Running with in-memory stores.");
                Self::with_store(MemoryStore::new(), sessions, config.page_size)
            }
        }
    }

    /// State over a shared in-memory store.
    pub fn with_store(
        store: Arc<MemoryStore>,
        sessions: Arc<dyn SessionService>,
        page_size: u64,
    ) -> Self {
        Self {
            users: store.clone(),
            groups: store.clone(),
            posts: store,
            sessions,
            renderer: Arc::new(JsonRenderer),
            page_size,
        }
    }
}

/// In-memory backing store for when no database is configured.
#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<Vec<User>>,
    groups: RwLock<Vec<Group>>,
    posts: RwLock<Vec<Post>>,
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub async fn add_user(&self, username: &str) -> User {
        let mut users = self.users.write().await;
        let user = User {
            id: users.len() as i64 + 1,
            username: username.to_string(),
        };
        users.push(user.clone());
        user
    }

    pub async fn add_group(&self, title: &str, slug: &str, description: &str) -> Group {
        let mut groups = self.groups.write().await;
        let group = Group {
            id: groups.len() as i64 + 1,
            title: title.to_string(),
            slug: slug.to_string(),
            description: description.to_string(),
        };
        groups.push(group.clone());
        group
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.username == username).cloned())
    }
}

#[async_trait]
impl GroupRepository for MemoryStore {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Group>, RepoError> {
        let groups = self.groups.read().await;
        Ok(groups.iter().find(|g| g.slug == slug).cloned())
    }

    async fn list(&self) -> Result<Vec<Group>, RepoError> {
        let mut groups = self.groups.read().await.clone();
        groups.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(groups)
    }
}

#[async_trait]
impl PostRepository for MemoryStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, RepoError> {
        let posts = self.posts.read().await;
        Ok(posts.iter().find(|p| p.id == id).cloned())
    }

    async fn find_by_id_and_author(
        &self,
        id: i64,
        username: &str,
    ) -> Result<Option<Post>, RepoError> {
        let posts = self.posts.read().await;
        Ok(posts
            .iter()
            .find(|p| p.id == id && p.author.username == username)
            .cloned())
    }

    async fn count_by_author(&self, author_id: i64) -> Result<u64, RepoError> {
        let posts = self.posts.read().await;
        Ok(posts.iter().filter(|p| p.author.id == author_id).count() as u64)
    }

    async fn page(&self, filter: PostFilter, page: PageRequest) -> Result<Page<Post>, RepoError> {
        let posts = self.posts.read().await;

        let mut selected: Vec<Post> = posts
            .iter()
            .filter(|p| match filter {
                PostFilter::All => true,
                PostFilter::Group(id) => p.group.as_ref().is_some_and(|g| g.id == id),
                PostFilter::Author(id) => p.author.id == id,
            })
            .cloned()
            .collect();

        // Newest first, id as the tie-breaker for equal timestamps.
        selected.sort_by(|a, b| (b.pub_date, b.id).cmp(&(a.pub_date, a.id)));

        Ok(Page::from_vec(selected, page))
    }

    async fn create(&self, new_post: NewPost) -> Result<Post, RepoError> {
        let author = {
            let users = self.users.read().await;
            users
                .iter()
                .find(|u| u.id == new_post.author_id)
                .cloned()
                .ok_or_else(|| RepoError::Constraint("unknown author".to_string()))?
        };

        let group = match new_post.group_id {
            None => None,
            Some(group_id) => {
                let groups = self.groups.read().await;
                Some(
                    groups
                        .iter()
                        .find(|g| g.id == group_id)
                        .cloned()
                        .ok_or_else(|| RepoError::Constraint("unknown group".to_string()))?,
                )
            }
        };

        let mut posts = self.posts.write().await;
        let post = Post {
            id: posts.iter().map(|p| p.id).max().unwrap_or(0) + 1,
            text: new_post.text,
            pub_date: Utc::now(),
            author,
            group,
        };
        posts.push(post.clone());

        Ok(post)
    }

    async fn update_content(
        &self,
        id: i64,
        text: String,
        group_id: Option<i64>,
    ) -> Result<Post, RepoError> {
        let group = match group_id {
            None => None,
            Some(group_id) => {
                let groups = self.groups.read().await;
                Some(
                    groups
                        .iter()
                        .find(|g| g.id == group_id)
                        .cloned()
                        .ok_or_else(|| RepoError::Constraint("unknown group".to_string()))?,
                )
            }
        };

        // Both fields change under one write lock; author and pub_date stay.
        let mut posts = self.posts.write().await;
        let post = posts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(RepoError::NotFound)?;

        post.text = text;
        post.group = group;

        Ok(post.clone())
    }
}
