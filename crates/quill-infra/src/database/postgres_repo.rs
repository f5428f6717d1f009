//! PostgreSQL repository implementations.
//!
//! Post queries join the author and group rows so every domain `Post`
//! comes back with both references pre-resolved.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DbConn, EntityTrait, FromQueryResult, JoinType,
    Order, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Select, Set,
};

use quill_core::domain::{Group, Post, User};
use quill_core::error::RepoError;
use quill_core::pagination::{Page, PageRequest};
use quill_core::ports::{
    GroupRepository, NewPost, PostFilter, PostRepository, UserRepository,
};

use super::entity::{group, post, user};

/// PostgreSQL user repository.
pub struct PostgresUserRepository {
    db: Arc<DbConn>,
}

impl PostgresUserRepository {
    pub fn new(db: Arc<DbConn>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        let result = user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .one(self.db.as_ref())
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.map(Into::into))
    }
}

/// PostgreSQL group repository.
pub struct PostgresGroupRepository {
    db: Arc<DbConn>,
}

impl PostgresGroupRepository {
    pub fn new(db: Arc<DbConn>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl GroupRepository for PostgresGroupRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Group>, RepoError> {
        let result = group::Entity::find()
            .filter(group::Column::Slug.eq(slug))
            .one(self.db.as_ref())
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.map(Into::into))
    }

    async fn list(&self) -> Result<Vec<Group>, RepoError> {
        let result = group::Entity::find()
            .order_by(group::Column::Title, Order::Asc)
            .all(self.db.as_ref())
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

/// Flat row shape for the joined post query.
#[derive(Debug, FromQueryResult)]
struct PostRow {
    id: i64,
    text: String,
    pub_date: sea_orm::prelude::DateTimeWithTimeZone,
    author_id: i64,
    author_username: String,
    group_id: Option<i64>,
    group_title: Option<String>,
    group_slug: Option<String>,
    group_description: Option<String>,
}

impl From<PostRow> for Post {
    fn from(row: PostRow) -> Self {
        let group = match (
            row.group_id,
            row.group_title,
            row.group_slug,
            row.group_description,
        ) {
            (Some(id), Some(title), Some(slug), Some(description)) => Some(Group {
                id,
                title,
                slug,
                description,
            }),
            _ => None,
        };

        Post {
            id: row.id,
            text: row.text,
            pub_date: row.pub_date.into(),
            author: User {
                id: row.author_id,
                username: row.author_username,
            },
            group,
        }
    }
}

/// PostgreSQL post repository.
pub struct PostgresPostRepository {
    db: Arc<DbConn>,
}

impl PostgresPostRepository {
    pub fn new(db: Arc<DbConn>) -> Self {
        Self { db }
    }

    /// Posts joined with their author and (optional) group, newest first.
    fn joined_select() -> Select<post::Entity> {
        post::Entity::find()
            .join(JoinType::InnerJoin, post::Relation::User.def())
            .join(JoinType::LeftJoin, post::Relation::Group.def())
            .column_as(user::Column::Username, "author_username")
            .column_as(group::Column::Title, "group_title")
            .column_as(group::Column::Slug, "group_slug")
            .column_as(group::Column::Description, "group_description")
            .order_by(post::Column::PubDate, Order::Desc)
            // Id as a tie-breaker so paging is stable when timestamps collide.
            .order_by(post::Column::Id, Order::Desc)
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, RepoError> {
        let row = Self::joined_select()
            .filter(post::Column::Id.eq(id))
            .into_model::<PostRow>()
            .one(self.db.as_ref())
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(row.map(Into::into))
    }

    async fn find_by_id_and_author(
        &self,
        id: i64,
        username: &str,
    ) -> Result<Option<Post>, RepoError> {
        let row = Self::joined_select()
            .filter(post::Column::Id.eq(id))
            .filter(user::Column::Username.eq(username))
            .into_model::<PostRow>()
            .one(self.db.as_ref())
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(row.map(Into::into))
    }

    async fn count_by_author(&self, author_id: i64) -> Result<u64, RepoError> {
        post::Entity::find()
            .filter(post::Column::AuthorId.eq(author_id))
            .count(self.db.as_ref())
            .await
            .map_err(|e| RepoError::Query(e.to_string()))
    }

    async fn page(&self, filter: PostFilter, page: PageRequest) -> Result<Page<Post>, RepoError> {
        let mut select = Self::joined_select();
        match filter {
            PostFilter::All => {}
            PostFilter::Group(id) => select = select.filter(post::Column::GroupId.eq(id)),
            PostFilter::Author(id) => select = select.filter(post::Column::AuthorId.eq(id)),
        }

        let paginator = select.into_model::<PostRow>().paginate(self.db.as_ref(), page.size);
        let totals = paginator
            .num_items_and_pages()
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        let number = page.resolve(totals.number_of_pages);
        let rows = paginator
            .fetch_page(number - 1)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(Page::assemble(
            rows.into_iter().map(Into::into).collect(),
            number,
            totals.number_of_items,
            page.size,
        ))
    }

    async fn create(&self, new_post: NewPost) -> Result<Post, RepoError> {
        let model = post::ActiveModel {
            text: Set(new_post.text),
            pub_date: Set(Utc::now().into()),
            author_id: Set(new_post.author_id),
            group_id: Set(new_post.group_id),
            ..Default::default()
        };

        let inserted = model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        self.find_by_id(inserted.id).await?.ok_or(RepoError::NotFound)
    }

    async fn update_content(
        &self,
        id: i64,
        text: String,
        group_id: Option<i64>,
    ) -> Result<Post, RepoError> {
        // One UPDATE touching both columns; text and group change together
        // or not at all.
        let model = post::ActiveModel {
            id: ActiveValue::Unchanged(id),
            text: Set(text),
            group_id: Set(group_id),
            ..Default::default()
        };

        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        self.find_by_id(id).await?.ok_or(RepoError::NotFound)
    }
}
