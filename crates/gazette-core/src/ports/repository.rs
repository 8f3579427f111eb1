use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Article, ArticleOrder, Category, User};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Save an entity (create or update).
    async fn save(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// Category repository with domain-specific methods.
#[async_trait]
pub trait CategoryRepository: BaseRepository<Category, Uuid> {
    /// All categories, ordered by title.
    async fn list(&self) -> Result<Vec<Category>, RepoError>;

    /// Find a category by its unique title.
    async fn find_by_title(&self, title: &str) -> Result<Option<Category>, RepoError>;
}

/// Article repository - the query/listing surface of the blog.
///
/// Listing methods return published articles only; `find_by_id` does not
/// filter, so a draft is still reachable through its direct link.
#[async_trait]
pub trait ArticleRepository: BaseRepository<Article, Uuid> {
    /// All published articles. `None` orders by creation time, newest first.
    async fn list(&self, order: Option<ArticleOrder>) -> Result<Vec<Article>, RepoError>;

    /// Published articles in one category.
    async fn list_by_category(
        &self,
        category_id: Uuid,
        order: Option<ArticleOrder>,
    ) -> Result<Vec<Article>, RepoError>;

    /// Published articles whose title or content contains `term`,
    /// case-insensitively.
    async fn search(&self, term: &str) -> Result<Vec<Article>, RepoError>;

    /// Up to `limit` published articles by view count, descending,
    /// optionally excluding one article (the one currently being read).
    async fn most_viewed(
        &self,
        exclude: Option<Uuid>,
        limit: u64,
    ) -> Result<Vec<Article>, RepoError>;

    /// Atomically bump the view counter of an article by one.
    /// Fails with [`RepoError::NotFound`] when the id does not exist.
    async fn record_view(&self, id: Uuid) -> Result<(), RepoError>;

    /// Find an article by its unique title.
    async fn find_by_title(&self, title: &str) -> Result<Option<Article>, RepoError>;
}

/// User repository with domain-specific methods.
#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {
    /// Find a user by their email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;
}
