//! Application state - shared across all handlers.

use std::sync::Arc;

use gazette_core::ports::{ArticleRepository, CategoryRepository, UserRepository};
use gazette_infra::database::{
    DatabaseConfig, InMemoryArticleRepository, InMemoryCategoryRepository, InMemoryStore,
    InMemoryUserRepository,
};

#[cfg(feature = "postgres")]
use gazette_infra::database::{
    DatabaseConnections, PostgresArticleRepository, PostgresCategoryRepository,
    PostgresUserRepository,
};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub categories: Arc<dyn CategoryRepository>,
    pub articles: Arc<dyn ArticleRepository>,
    pub users: Arc<dyn UserRepository>,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(db_config: Option<&DatabaseConfig>) -> Self {
        #[cfg(feature = "postgres")]
        if let Some(config) = db_config {
            match DatabaseConnections::init(config).await {
                Ok(connections) => {
                    let db = connections.main;
                    tracing::info!("Application state initialized (postgres)");
                    return Self {
                        categories: Arc::new(PostgresCategoryRepository::new(db.clone())),
                        articles: Arc::new(PostgresArticleRepository::new(db.clone())),
                        users: Arc::new(PostgresUserRepository::new(db)),
                    };
                }
                Err(e) => {
                    tracing::error!(
                        "Failed to connect to database: {}. Using in-memory fallback.",
                        e
                    );
                }
            }
        } else {
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
        }

        #[cfg(not(feature = "postgres"))]
        {
            let _ = db_config;
            tracing::info!("Running without postgres feature - using in-memory repositories");
        }

        Self::in_memory()
    }

    /// In-memory repositories over a shared store. Also used by handler tests.
    pub fn in_memory() -> Self {
        let store = InMemoryStore::new();
        Self {
            categories: Arc::new(InMemoryCategoryRepository::new(store.clone())),
            articles: Arc::new(InMemoryArticleRepository::new(store.clone())),
            users: Arc::new(InMemoryUserRepository::new(store)),
        }
    }
}
