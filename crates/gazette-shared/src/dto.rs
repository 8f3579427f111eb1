//! Data Transfer Objects - request/response types for the API.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request to register a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterUserRequest {
    pub email: String,
    pub password: String,
}

/// Request to login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response containing a user's public information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub created_at: String,
}

/// Response containing authentication tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}

/// Request to create a category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCategoryRequest {
    pub title: String,
}

/// Response containing a category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryResponse {
    pub id: Uuid,
    pub title: String,
}

/// Request to create an article.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateArticleRequest {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub photo: Option<String>,
    pub category_id: Uuid,
    /// Defaults to published when omitted.
    #[serde(default)]
    pub publish: Option<bool>,
}

/// Request to update an article. All content fields are replaced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateArticleRequest {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub photo: Option<String>,
    pub category_id: Uuid,
    pub publish: bool,
}

/// Response containing an article.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleResponse {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    /// Always resolvable - falls back to the placeholder photo.
    pub photo_url: String,
    pub created_at: String,
    pub updated_at: String,
    pub publish: bool,
    pub views: i64,
    pub category_id: Uuid,
}

/// Article detail page payload: the article plus its "most read" sidebar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleDetailResponse {
    pub article: ArticleResponse,
    pub related: Vec<ArticleResponse>,
}

/// Listing page payload: a page title plus the articles to render.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleListResponse {
    pub title: String,
    pub articles: Vec<ArticleResponse>,
}
