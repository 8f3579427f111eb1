use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Served when an article has no photo of its own.
pub const DEFAULT_PHOTO_URL: &str = "https://placehold.co/1280x720?text=Gazette";

/// Article entity - a blog post belonging to exactly one category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    /// Path of an uploaded photo, if any. Use [`Article::photo_url`] for display.
    pub photo: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Whether the article appears in public listings.
    pub publish: bool,
    pub views: i64,
    pub category_id: Uuid,
}

impl Article {
    /// Create a new article with generated ID, zero views and fresh timestamps.
    pub fn new(title: String, content: String, photo: Option<String>, category_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title,
            content,
            photo,
            created_at: now,
            updated_at: now,
            publish: true,
            views: 0,
            category_id,
        }
    }

    /// The photo to display, falling back to the placeholder when none was uploaded.
    pub fn photo_url(&self) -> &str {
        self.photo.as_deref().unwrap_or(DEFAULT_PHOTO_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_article_starts_unviewed_and_published() {
        let article = Article::new(
            "Hello".to_string(),
            "World".to_string(),
            None,
            Uuid::new_v4(),
        );

        assert_eq!(article.views, 0);
        assert!(article.publish);
        assert_eq!(article.created_at, article.updated_at);
    }

    #[test]
    fn photo_url_falls_back_to_placeholder() {
        let mut article = Article::new("T".to_string(), "C".to_string(), None, Uuid::new_v4());
        assert_eq!(article.photo_url(), DEFAULT_PHOTO_URL);

        article.photo = Some("photos/cover.jpg".to_string());
        assert_eq!(article.photo_url(), "photos/cover.jpg");
    }
}
