#[cfg(test)]
mod tests {
    use crate::database::entity::article;
    use crate::database::postgres_repo::PostgresArticleRepository;
    use gazette_core::domain::Article;
    use gazette_core::error::RepoError;
    use gazette_core::ports::{ArticleRepository, BaseRepository};
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn article_row(title: &str, views: i64) -> article::Model {
        let now = chrono::Utc::now();
        article::Model {
            id: uuid::Uuid::new_v4(),
            title: title.to_owned(),
            content: "Content".to_owned(),
            photo: None,
            created_at: now.into(),
            updated_at: now.into(),
            publish: true,
            views,
            category_id: uuid::Uuid::new_v4(),
        }
    }

    #[tokio::test]
    async fn test_find_article_by_id() {
        let row = article_row("Test Article", 0);
        let article_id = row.id;

        // Mock the query expectation
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![row]])
            .into_connection();

        let repo = PostgresArticleRepository::new(db);

        let result: Option<Article> = repo.find_by_id(article_id).await.unwrap();

        assert!(result.is_some());
        let article = result.unwrap();
        assert_eq!(article.title, "Test Article");
        assert_eq!(article.id, article_id);
    }

    #[tokio::test]
    async fn test_record_view_hits_one_row() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(vec![MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();

        let repo = PostgresArticleRepository::new(db);

        assert!(repo.record_view(uuid::Uuid::new_v4()).await.is_ok());
    }

    #[tokio::test]
    async fn test_record_view_missing_article_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(vec![MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();

        let repo = PostgresArticleRepository::new(db);

        let result = repo.record_view(uuid::Uuid::new_v4()).await;
        assert!(matches!(result, Err(RepoError::NotFound)));
    }

    #[tokio::test]
    async fn test_blank_search_skips_the_database() {
        // No expectations appended: touching the connection would panic.
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

        let repo = PostgresArticleRepository::new(db);

        assert!(repo.search("  ").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_most_viewed_maps_rows() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![
                article_row("First", 10),
                article_row("Second", 7),
            ]])
            .into_connection();

        let repo = PostgresArticleRepository::new(db);

        let top = repo.most_viewed(None, 4).await.unwrap();
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].title, "First");
        assert_eq!(top[0].views, 10);
    }
}
