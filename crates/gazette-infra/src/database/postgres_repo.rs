//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, Condition, EntityTrait, Order, QueryFilter, QueryOrder, QuerySelect, Select,
};
use uuid::Uuid;

use gazette_core::domain::{Article, ArticleOrder, Category, SortKey, User};
use gazette_core::error::RepoError;
use gazette_core::ports::{ArticleRepository, CategoryRepository, UserRepository};

use super::entity::article::{self, Entity as ArticleEntity};
use super::entity::category::{self, Entity as CategoryEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::postgres_base::PostgresBaseRepository;

/// PostgreSQL category repository.
pub type PostgresCategoryRepository = PostgresBaseRepository<CategoryEntity>;

/// PostgreSQL article repository.
pub type PostgresArticleRepository = PostgresBaseRepository<ArticleEntity>;

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

/// Published articles only - every public listing goes through this.
fn published(query: Select<ArticleEntity>) -> Select<ArticleEntity> {
    query.filter(article::Column::Publish.eq(true))
}

/// Apply a validated ordering; listings default to newest first.
fn ordered(query: Select<ArticleEntity>, order: Option<ArticleOrder>) -> Select<ArticleEntity> {
    let order = order.unwrap_or(ArticleOrder::descending(SortKey::CreatedAt));
    let column = match order.key {
        SortKey::Title => article::Column::Title,
        SortKey::CreatedAt => article::Column::CreatedAt,
        SortKey::Views => article::Column::Views,
    };
    let direction = if order.descending {
        Order::Desc
    } else {
        Order::Asc
    };
    query.order_by(column, direction)
}

#[async_trait]
impl CategoryRepository for PostgresCategoryRepository {
    async fn list(&self) -> Result<Vec<Category>, RepoError> {
        let result = CategoryEntity::find()
            .order_by_asc(category::Column::Title)
            .all(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn find_by_title(&self, title: &str) -> Result<Option<Category>, RepoError> {
        let result = CategoryEntity::find()
            .filter(category::Column::Title.eq(title))
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.map(Into::into))
    }
}

#[async_trait]
impl ArticleRepository for PostgresArticleRepository {
    async fn list(&self, order: Option<ArticleOrder>) -> Result<Vec<Article>, RepoError> {
        let result = ordered(published(ArticleEntity::find()), order)
            .all(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn list_by_category(
        &self,
        category_id: Uuid,
        order: Option<ArticleOrder>,
    ) -> Result<Vec<Article>, RepoError> {
        let query = published(ArticleEntity::find())
            .filter(article::Column::CategoryId.eq(category_id));

        let result = ordered(query, order)
            .all(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn search(&self, term: &str) -> Result<Vec<Article>, RepoError> {
        // A blank query matches nothing, not everything.
        if term.trim().is_empty() {
            return Ok(Vec::new());
        }

        let pattern = format!("%{term}%");
        let result = published(ArticleEntity::find())
            .filter(
                Condition::any()
                    .add(Expr::col(article::Column::Title).ilike(pattern.clone()))
                    .add(Expr::col(article::Column::Content).ilike(pattern)),
            )
            .order_by_desc(article::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn most_viewed(
        &self,
        exclude: Option<Uuid>,
        limit: u64,
    ) -> Result<Vec<Article>, RepoError> {
        let mut query = published(ArticleEntity::find());
        if let Some(id) = exclude {
            query = query.filter(article::Column::Id.ne(id));
        }

        let result = query
            .order_by_desc(article::Column::Views)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn record_view(&self, id: Uuid) -> Result<(), RepoError> {
        // Single atomic UPDATE - concurrent detail fetches must not lose
        // increments, so the read-modify-write happens inside the store.
        let result = ArticleEntity::update_many()
            .col_expr(
                article::Column::Views,
                Expr::col(article::Column::Views).add(1),
            )
            .filter(article::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }

    async fn find_by_title(&self, title: &str) -> Result<Option<Article>, RepoError> {
        let result = ArticleEntity::find()
            .filter(article::Column::Title.eq(title))
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.map(Into::into))
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        // Mask email for logging to avoid PII in logs
        let masked = if let Some(at_pos) = email.find('@') {
            let (local, domain) = email.split_at(at_pos);
            let masked_local = if local.len() > 1 {
                format!("{}***", &local[..1])
            } else {
                "***".to_string()
            };
            format!("{}{}", masked_local, domain)
        } else {
            "***".to_string()
        };
        tracing::debug!(user_email = %masked, "Finding user by email");

        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.map(Into::into))
    }
}
