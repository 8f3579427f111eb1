//! In-memory repositories - used as fallback when PostgreSQL is unavailable
//! and as the store double in handler tests. Note: data is lost on restart.

use std::cmp::Reverse;
use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use gazette_core::domain::{Article, ArticleOrder, Category, SortKey, User};
use gazette_core::error::RepoError;
use gazette_core::ports::{
    ArticleRepository, BaseRepository, CategoryRepository, UserRepository,
};

/// Shared backing store. Categories and articles live together so that
/// deleting a category can cascade to its articles, the way the relational
/// store does through its foreign key.
#[derive(Default)]
pub struct InMemoryStore {
    categories: RwLock<HashMap<Uuid, Category>>,
    articles: RwLock<HashMap<Uuid, Article>>,
    users: RwLock<HashMap<Uuid, User>>,
}

impl InMemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }
}

/// In-memory category repository.
pub struct InMemoryCategoryRepository {
    store: Arc<InMemoryStore>,
}

impl InMemoryCategoryRepository {
    pub fn new(store: Arc<InMemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl BaseRepository<Category, Uuid> for InMemoryCategoryRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>, RepoError> {
        Ok(self.store.categories.read().await.get(&id).cloned())
    }

    async fn save(&self, category: Category) -> Result<Category, RepoError> {
        let mut categories = self.store.categories.write().await;

        let duplicate = categories
            .values()
            .any(|c| c.id != category.id && c.title == category.title);
        if duplicate {
            return Err(RepoError::Constraint("Entity already exists".to_string()));
        }

        categories.insert(category.id, category.clone());
        Ok(category)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut categories = self.store.categories.write().await;
        if categories.remove(&id).is_none() {
            return Err(RepoError::NotFound);
        }
        drop(categories);

        // Cascade, like the foreign key would.
        let mut articles = self.store.articles.write().await;
        articles.retain(|_, a| a.category_id != id);

        Ok(())
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCategoryRepository {
    async fn list(&self) -> Result<Vec<Category>, RepoError> {
        let mut all: Vec<Category> = self.store.categories.read().await.values().cloned().collect();
        all.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(all)
    }

    async fn find_by_title(&self, title: &str) -> Result<Option<Category>, RepoError> {
        Ok(self
            .store
            .categories
            .read()
            .await
            .values()
            .find(|c| c.title == title)
            .cloned())
    }
}

/// In-memory article repository.
pub struct InMemoryArticleRepository {
    store: Arc<InMemoryStore>,
}

impl InMemoryArticleRepository {
    pub fn new(store: Arc<InMemoryStore>) -> Self {
        Self { store }
    }

    fn sort(articles: &mut [Article], order: Option<ArticleOrder>) {
        let order = order.unwrap_or(ArticleOrder::descending(SortKey::CreatedAt));
        articles.sort_by(|a, b| {
            let ordering = match order.key {
                SortKey::Title => a.title.cmp(&b.title),
                SortKey::CreatedAt => a.created_at.cmp(&b.created_at),
                SortKey::Views => a.views.cmp(&b.views),
            };
            if order.descending {
                ordering.reverse()
            } else {
                ordering
            }
        });
    }
}

#[async_trait]
impl BaseRepository<Article, Uuid> for InMemoryArticleRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Article>, RepoError> {
        Ok(self.store.articles.read().await.get(&id).cloned())
    }

    async fn save(&self, article: Article) -> Result<Article, RepoError> {
        if !self
            .store
            .categories
            .read()
            .await
            .contains_key(&article.category_id)
        {
            return Err(RepoError::Constraint(
                "Referenced entity does not exist".to_string(),
            ));
        }

        let mut articles = self.store.articles.write().await;

        let duplicate = articles
            .values()
            .any(|a| a.id != article.id && a.title == article.title);
        if duplicate {
            return Err(RepoError::Constraint("Entity already exists".to_string()));
        }

        articles.insert(article.id, article.clone());
        Ok(article)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut articles = self.store.articles.write().await;
        if articles.remove(&id).is_none() {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl ArticleRepository for InMemoryArticleRepository {
    async fn list(&self, order: Option<ArticleOrder>) -> Result<Vec<Article>, RepoError> {
        let mut all: Vec<Article> = self
            .store
            .articles
            .read()
            .await
            .values()
            .filter(|a| a.publish)
            .cloned()
            .collect();
        Self::sort(&mut all, order);
        Ok(all)
    }

    async fn list_by_category(
        &self,
        category_id: Uuid,
        order: Option<ArticleOrder>,
    ) -> Result<Vec<Article>, RepoError> {
        let mut matching: Vec<Article> = self
            .store
            .articles
            .read()
            .await
            .values()
            .filter(|a| a.publish && a.category_id == category_id)
            .cloned()
            .collect();
        Self::sort(&mut matching, order);
        Ok(matching)
    }

    async fn search(&self, term: &str) -> Result<Vec<Article>, RepoError> {
        // A blank query matches nothing, not everything.
        if term.trim().is_empty() {
            return Ok(Vec::new());
        }

        let needle = term.to_lowercase();
        let mut matching: Vec<Article> = self
            .store
            .articles
            .read()
            .await
            .values()
            .filter(|a| {
                a.publish
                    && (a.title.to_lowercase().contains(&needle)
                        || a.content.to_lowercase().contains(&needle))
            })
            .cloned()
            .collect();
        Self::sort(&mut matching, Some(ArticleOrder::descending(SortKey::CreatedAt)));
        Ok(matching)
    }

    async fn most_viewed(
        &self,
        exclude: Option<Uuid>,
        limit: u64,
    ) -> Result<Vec<Article>, RepoError> {
        let mut ranked: Vec<Article> = self
            .store
            .articles
            .read()
            .await
            .values()
            .filter(|a| a.publish && Some(a.id) != exclude)
            .cloned()
            .collect();
        ranked.sort_by_key(|a| Reverse(a.views));
        ranked.truncate(limit as usize);
        Ok(ranked)
    }

    async fn record_view(&self, id: Uuid) -> Result<(), RepoError> {
        // The write lock serializes concurrent increments.
        let mut articles = self.store.articles.write().await;
        let article = articles.get_mut(&id).ok_or(RepoError::NotFound)?;
        article.views += 1;
        Ok(())
    }

    async fn find_by_title(&self, title: &str) -> Result<Option<Article>, RepoError> {
        Ok(self
            .store
            .articles
            .read()
            .await
            .values()
            .find(|a| a.title == title)
            .cloned())
    }
}

/// In-memory user repository.
pub struct InMemoryUserRepository {
    store: Arc<InMemoryStore>,
}

impl InMemoryUserRepository {
    pub fn new(store: Arc<InMemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl BaseRepository<User, Uuid> for InMemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        Ok(self.store.users.read().await.get(&id).cloned())
    }

    async fn save(&self, user: User) -> Result<User, RepoError> {
        let mut users = self.store.users.write().await;

        let duplicate = users
            .values()
            .any(|u| u.id != user.id && u.email == user.email);
        if duplicate {
            return Err(RepoError::Constraint("Entity already exists".to_string()));
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut users = self.store.users.write().await;
        if users.remove(&id).is_none() {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        Ok(self
            .store
            .users
            .read()
            .await
            .values()
            .find(|u| u.email == email)
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repos() -> (Arc<InMemoryStore>, InMemoryCategoryRepository, InMemoryArticleRepository) {
        let store = InMemoryStore::new();
        (
            store.clone(),
            InMemoryCategoryRepository::new(store.clone()),
            InMemoryArticleRepository::new(store),
        )
    }

    async fn seed_category(categories: &InMemoryCategoryRepository, title: &str) -> Category {
        categories
            .save(Category::new(title.to_string()))
            .await
            .unwrap()
    }

    async fn seed_article(
        articles: &InMemoryArticleRepository,
        title: &str,
        content: &str,
        category_id: Uuid,
    ) -> Article {
        articles
            .save(Article::new(
                title.to_string(),
                content.to_string(),
                None,
                category_id,
            ))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn record_view_increments_by_one() {
        let (_, categories, articles) = repos();
        let tech = seed_category(&categories, "Tech").await;
        let article = seed_article(&articles, "A1", "body", tech.id).await;

        articles.record_view(article.id).await.unwrap();

        let fetched = articles.find_by_id(article.id).await.unwrap().unwrap();
        assert_eq!(fetched.views, 1);
    }

    #[tokio::test]
    async fn concurrent_views_are_not_lost() {
        let store = InMemoryStore::new();
        let categories = InMemoryCategoryRepository::new(store.clone());
        let articles = Arc::new(InMemoryArticleRepository::new(store));

        let tech = seed_category(&categories, "Tech").await;
        let article = seed_article(&articles, "A1", "body", tech.id).await;

        let mut handles = Vec::new();
        for _ in 0..50 {
            let repo = articles.clone();
            let id = article.id;
            handles.push(tokio::spawn(async move { repo.record_view(id).await }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let fetched = articles.find_by_id(article.id).await.unwrap().unwrap();
        assert_eq!(fetched.views, 50);
    }

    #[tokio::test]
    async fn record_view_on_missing_article_is_not_found() {
        let (_, _categories, articles) = repos();
        let result = articles.record_view(Uuid::new_v4()).await;
        assert!(matches!(result, Err(RepoError::NotFound)));
    }

    #[tokio::test]
    async fn search_is_case_insensitive_over_title_and_content() {
        let (_, categories, articles) = repos();
        let tech = seed_category(&categories, "Tech").await;
        seed_article(&articles, "Rust Patterns", "ownership and borrowing", tech.id).await;
        seed_article(&articles, "Cooking", "how to braise RUST-colored beets", tech.id).await;
        seed_article(&articles, "Gardening", "tomatoes", tech.id).await;

        let hits = articles.search("rust").await.unwrap();
        let titles: Vec<&str> = hits.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(hits.len(), 2);
        assert!(titles.contains(&"Rust Patterns"));
        assert!(titles.contains(&"Cooking"));
    }

    #[tokio::test]
    async fn blank_search_returns_nothing() {
        let (_, categories, articles) = repos();
        let tech = seed_category(&categories, "Tech").await;
        seed_article(&articles, "A1", "body", tech.id).await;

        assert!(articles.search("").await.unwrap().is_empty());
        assert!(articles.search("   ").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn category_listings_partition_the_full_listing() {
        let (_, categories, articles) = repos();
        let tech = seed_category(&categories, "Tech").await;
        let food = seed_category(&categories, "Food").await;
        seed_article(&articles, "A1", "body", tech.id).await;
        seed_article(&articles, "A2", "body", tech.id).await;
        seed_article(&articles, "B1", "body", food.id).await;

        let all = articles.list(None).await.unwrap();
        let tech_articles = articles.list_by_category(tech.id, None).await.unwrap();
        let food_articles = articles.list_by_category(food.id, None).await.unwrap();

        assert_eq!(tech_articles.len(), 2);
        assert_eq!(food_articles.len(), 1);
        assert_eq!(all.len(), tech_articles.len() + food_articles.len());
        for article in tech_articles {
            assert!(all.iter().any(|a| a.id == article.id));
        }
    }

    #[tokio::test]
    async fn deleting_a_category_cascades_to_its_articles() {
        let (_, categories, articles) = repos();
        let tech = seed_category(&categories, "Tech").await;
        let food = seed_category(&categories, "Food").await;
        let doomed = seed_article(&articles, "A1", "body", tech.id).await;
        let kept = seed_article(&articles, "B1", "body", food.id).await;

        categories.delete(tech.id).await.unwrap();

        assert!(articles.find_by_id(doomed.id).await.unwrap().is_none());
        assert!(articles.find_by_id(kept.id).await.unwrap().is_some());
        assert!(articles.list_by_category(tech.id, None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn duplicate_titles_are_rejected() {
        let (_, categories, articles) = repos();
        let tech = seed_category(&categories, "Tech").await;
        seed_article(&articles, "A1", "body", tech.id).await;

        let result = articles
            .save(Article::new("A1".to_string(), "other".to_string(), None, tech.id))
            .await;
        assert!(matches!(result, Err(RepoError::Constraint(_))));

        let result = categories.save(Category::new("Tech".to_string())).await;
        assert!(matches!(result, Err(RepoError::Constraint(_))));
    }

    #[tokio::test]
    async fn saving_an_article_requires_an_existing_category() {
        let (_, _categories, articles) = repos();
        let result = articles
            .save(Article::new(
                "A1".to_string(),
                "body".to_string(),
                None,
                Uuid::new_v4(),
            ))
            .await;
        assert!(matches!(result, Err(RepoError::Constraint(_))));
    }

    #[tokio::test]
    async fn most_viewed_ranks_and_limits() {
        let (_, categories, articles) = repos();
        let tech = seed_category(&categories, "Tech").await;

        for (title, views) in [("A", 5), ("B", 3), ("C", 8), ("D", 1), ("E", 0)] {
            let article = seed_article(&articles, title, "body", tech.id).await;
            for _ in 0..views {
                articles.record_view(article.id).await.unwrap();
            }
        }

        let top = articles.most_viewed(None, 4).await.unwrap();
        let titles: Vec<&str> = top.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["C", "A", "B", "D"]);

        let c = articles.find_by_title("C").await.unwrap().unwrap();
        let top_without_c = articles.most_viewed(Some(c.id), 4).await.unwrap();
        assert!(top_without_c.iter().all(|a| a.id != c.id));
        assert_eq!(top_without_c.first().unwrap().title, "A");
    }

    #[tokio::test]
    async fn unpublished_articles_are_hidden_from_listings_but_not_detail() {
        let (_, categories, articles) = repos();
        let tech = seed_category(&categories, "Tech").await;
        let mut draft = seed_article(&articles, "Draft", "secret plans", tech.id).await;
        draft.publish = false;
        let draft = articles.save(draft).await.unwrap();
        seed_article(&articles, "Live", "public", tech.id).await;

        assert_eq!(articles.list(None).await.unwrap().len(), 1);
        assert_eq!(
            articles.list_by_category(tech.id, None).await.unwrap().len(),
            1
        );
        assert!(articles.search("secret").await.unwrap().is_empty());
        assert_eq!(articles.most_viewed(None, 4).await.unwrap().len(), 1);

        // A direct link still resolves.
        assert!(articles.find_by_id(draft.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn listings_honor_the_sort_order() {
        let (_, categories, articles) = repos();
        let tech = seed_category(&categories, "Tech").await;
        seed_article(&articles, "Banana", "b", tech.id).await;
        seed_article(&articles, "Apple", "a", tech.id).await;
        seed_article(&articles, "Cherry", "c", tech.id).await;

        let by_title = articles
            .list(Some(ArticleOrder::ascending(SortKey::Title)))
            .await
            .unwrap();
        let titles: Vec<&str> = by_title.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["Apple", "Banana", "Cherry"]);

        let by_title_desc = articles
            .list(Some(ArticleOrder::descending(SortKey::Title)))
            .await
            .unwrap();
        let titles: Vec<&str> = by_title_desc.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["Cherry", "Banana", "Apple"]);
    }
}
