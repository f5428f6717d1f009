#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::database::entity::{group, user};
    use crate::database::postgres_repo::{PostgresGroupRepository, PostgresUserRepository};
    use quill_core::ports::{GroupRepository, UserRepository};
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_find_group_by_slug() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![group::Model {
                id: 1,
                title: "News".to_owned(),
                slug: "news".to_owned(),
                description: "All the news".to_owned(),
            }]])
            .into_connection();

        let repo = PostgresGroupRepository::new(Arc::new(db));

        let result = repo.find_by_slug("news").await.unwrap();

        assert!(result.is_some());
        let found = result.unwrap();
        assert_eq!(found.id, 1);
        assert_eq!(found.slug, "news");
        assert_eq!(found.title, "News");
    }

    #[tokio::test]
    async fn test_find_group_by_slug_misses() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<group::Model>::new()])
            .into_connection();

        let repo = PostgresGroupRepository::new(Arc::new(db));

        let result = repo.find_by_slug("unknown").await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_find_user_by_username() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![user::Model {
                id: 5,
                username: "alice".to_owned(),
            }]])
            .into_connection();

        let repo = PostgresUserRepository::new(Arc::new(db));

        let result = repo.find_by_username("alice").await.unwrap();

        assert!(result.is_some());
        let found = result.unwrap();
        assert_eq!(found.id, 5);
        assert_eq!(found.username, "alice");
    }

    #[tokio::test]
    async fn test_repositories_share_one_connection() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results(vec![vec![group::Model {
                    id: 1,
                    title: "News".to_owned(),
                    slug: "news".to_owned(),
                    description: "All the news".to_owned(),
                }]])
                .append_query_results(vec![vec![user::Model {
                    id: 5,
                    username: "alice".to_owned(),
                }]])
                .into_connection(),
        );

        let groups = PostgresGroupRepository::new(db.clone());
        let users = PostgresUserRepository::new(db);

        assert!(groups.find_by_slug("news").await.unwrap().is_some());
        assert!(users.find_by_username("alice").await.unwrap().is_some());
    }
}
