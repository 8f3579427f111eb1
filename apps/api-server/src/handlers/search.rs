//! Search handler - case-insensitive contains over title and content.

use actix_web::{HttpResponse, web};
use serde::Deserialize;

use gazette_shared::dto::ArticleListResponse;
use gazette_shared::response::ApiResponse;

use super::articles::article_response;
use crate::middleware::error::AppResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

/// GET /api/search?q=term
///
/// A missing or blank `q` yields an empty listing rather than every article.
pub async fn search(
    state: web::Data<AppState>,
    query: web::Query<SearchQuery>,
) -> AppResult<HttpResponse> {
    let term = query.q.as_deref().unwrap_or_default();
    let articles = state.articles.search(term).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(ArticleListResponse {
        title: format!("Search: {term}"),
        articles: articles.iter().map(article_response).collect(),
    })))
}
