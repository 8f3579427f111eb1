//! Category handlers: public listings plus authenticated administration.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use gazette_core::domain::Category;
use gazette_shared::dto::{ArticleListResponse, CategoryResponse, CreateCategoryRequest};
use gazette_shared::response::ApiResponse;

use super::articles::{SortQuery, article_response, parse_order};
use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn category_response(category: &Category) -> CategoryResponse {
    CategoryResponse {
        id: category.id,
        title: category.title.clone(),
    }
}

/// GET /api/categories
pub async fn list(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let categories = state.categories.list().await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(
        categories
            .iter()
            .map(category_response)
            .collect::<Vec<_>>(),
    )))
}

/// GET /api/categories/{id}/articles
///
/// The category itself must exist - its title is part of the page context.
pub async fn articles(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    query: web::Query<SortQuery>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let order = parse_order(&query.sort)?;

    let category = state
        .categories
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("category {id} not found")))?;

    let articles = state.articles.list_by_category(id, order).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(ArticleListResponse {
        title: format!("Category: {}", category.title),
        articles: articles.iter().map(article_response).collect(),
    })))
}

/// POST /api/categories - auth required.
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<CreateCategoryRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    if req.title.trim().is_empty() {
        return Err(AppError::Validation(vec![
            "title must not be empty".to_string(),
        ]));
    }

    if state.categories.find_by_title(&req.title).await?.is_some() {
        return Err(AppError::Conflict("Category title already taken".to_string()));
    }

    let saved = state.categories.save(Category::new(req.title)).await?;
    tracing::info!(category_id = %saved.id, user_id = %identity.user_id, "Category created");

    Ok(HttpResponse::Created().json(ApiResponse::ok(category_response(&saved))))
}

/// DELETE /api/categories/{id} - auth required. Cascades to the
/// category's articles.
pub async fn delete(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    state.categories.delete(id).await.map_err(|e| match e {
        gazette_core::error::RepoError::NotFound => {
            AppError::NotFound(format!("category {id} not found"))
        }
        other => other.into(),
    })?;
    tracing::info!(category_id = %id, user_id = %identity.user_id, "Category deleted");

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        (),
        "Category and its articles deleted",
    )))
}
