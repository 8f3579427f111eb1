//! Article handlers: listings, detail with view tracking, and the
//! authenticated create/update/delete workflow.

use actix_web::{HttpResponse, web};
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use gazette_core::domain::{Article, ArticleOrder};
use gazette_shared::dto::{
    ArticleDetailResponse, ArticleListResponse, ArticleResponse, CreateArticleRequest,
    UpdateArticleRequest,
};
use gazette_shared::response::ApiResponse;

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// How many related articles the detail page shows.
const RELATED_LIMIT: u64 = 4;

#[derive(Debug, Deserialize)]
pub struct SortQuery {
    pub sort: Option<String>,
}

pub(crate) fn article_response(article: &Article) -> ArticleResponse {
    ArticleResponse {
        id: article.id,
        title: article.title.clone(),
        content: article.content.clone(),
        photo_url: article.photo_url().to_string(),
        created_at: article.created_at.to_rfc3339(),
        updated_at: article.updated_at.to_rfc3339(),
        publish: article.publish,
        views: article.views,
        category_id: article.category_id,
    }
}

/// Only the sort keys of [`ArticleOrder`] are accepted; anything else is a
/// client error, never a raw column handed to the store.
pub(crate) fn parse_order(sort: &Option<String>) -> AppResult<Option<ArticleOrder>> {
    match sort.as_deref() {
        None | Some("") => Ok(None),
        Some(s) => Ok(Some(s.parse().map_err(AppError::from)?)),
    }
}

/// GET /api/articles
pub async fn list(
    state: web::Data<AppState>,
    query: web::Query<SortQuery>,
) -> AppResult<HttpResponse> {
    let order = parse_order(&query.sort)?;
    let articles = state.articles.list(order).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(ArticleListResponse {
        title: "Latest articles".to_string(),
        articles: articles.iter().map(article_response).collect(),
    })))
}

/// GET /api/articles/{id}
///
/// Every fetch counts as a view; the increment happens in the store before
/// the article is read back, so the response already reflects it.
pub async fn detail(state: web::Data<AppState>, path: web::Path<Uuid>) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    state.articles.record_view(id).await.map_err(|e| match e {
        gazette_core::error::RepoError::NotFound => {
            AppError::NotFound(format!("article {id} not found"))
        }
        other => other.into(),
    })?;

    let article = state
        .articles
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("article {id} not found")))?;

    let related = state.articles.most_viewed(Some(id), RELATED_LIMIT).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(ArticleDetailResponse {
        article: article_response(&article),
        related: related.iter().map(article_response).collect(),
    })))
}

async fn validate_content_fields(
    state: &AppState,
    title: &str,
    content: &str,
    category_id: Uuid,
) -> AppResult<()> {
    let mut errors = Vec::new();
    if title.trim().is_empty() {
        errors.push("title must not be empty".to_string());
    }
    if content.trim().is_empty() {
        errors.push("content must not be empty".to_string());
    }
    if state.categories.find_by_id(category_id).await?.is_none() {
        errors.push("category does not exist".to_string());
    }
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }
    Ok(())
}

/// POST /api/articles - auth required.
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<CreateArticleRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    validate_content_fields(&state, &req.title, &req.content, req.category_id).await?;

    if state.articles.find_by_title(&req.title).await?.is_some() {
        return Err(AppError::Conflict("Article title already taken".to_string()));
    }

    let mut article = Article::new(req.title, req.content, req.photo, req.category_id);
    if let Some(publish) = req.publish {
        article.publish = publish;
    }

    let saved = state.articles.save(article).await?;
    tracing::info!(article_id = %saved.id, user_id = %identity.user_id, "Article created");

    Ok(HttpResponse::Created().json(ApiResponse::ok(article_response(&saved))))
}

/// PUT /api/articles/{id} - auth required.
///
/// Responds with the updated article itself (the representation the edit
/// form redisplays), not a pointer to the detail view.
pub async fn update(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<UpdateArticleRequest>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let req = body.into_inner();

    let mut article = state
        .articles
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("article {id} not found")))?;

    validate_content_fields(&state, &req.title, &req.content, req.category_id).await?;

    if let Some(existing) = state.articles.find_by_title(&req.title).await? {
        if existing.id != id {
            return Err(AppError::Conflict("Article title already taken".to_string()));
        }
    }

    // created_at stays untouched; updated_at refreshes on every mutation.
    article.title = req.title;
    article.content = req.content;
    article.photo = req.photo;
    article.category_id = req.category_id;
    article.publish = req.publish;
    article.updated_at = Utc::now();

    let saved = state.articles.save(article).await?;
    tracing::info!(article_id = %saved.id, user_id = %identity.user_id, "Article updated");

    Ok(HttpResponse::Ok().json(ApiResponse::ok(article_response(&saved))))
}

/// GET /api/articles/{id}/delete - auth required.
///
/// First step of the two-step deletion: returns the article so the client
/// can ask for confirmation before POSTing back.
pub async fn confirm_delete(
    state: web::Data<AppState>,
    _identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let article = state
        .articles
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("article {id} not found")))?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        article_response(&article),
        "POST to this URL to delete the article",
    )))
}

/// POST /api/articles/{id}/delete - auth required.
pub async fn delete(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    state.articles.delete(id).await.map_err(|e| match e {
        gazette_core::error::RepoError::NotFound => {
            AppError::NotFound(format!("article {id} not found"))
        }
        other => other.into(),
    })?;
    tracing::info!(article_id = %id, user_id = %identity.user_id, "Article deleted");

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message((), "Article deleted")))
}
