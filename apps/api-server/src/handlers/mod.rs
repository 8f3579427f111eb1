//! HTTP handlers and route configuration.

mod articles;
mod auth;
mod categories;
mod health;
mod search;

use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            .route("/about", web::get().to(health::about))
            .route("/search", web::get().to(search::search))
            // Auth routes
            .service(
                web::scope("/auth")
                    .route("/register", web::post().to(auth::register))
                    .route("/login", web::post().to(auth::login))
                    .route("/logout", web::post().to(auth::logout))
                    .route("/me", web::get().to(auth::me)),
            )
            // Article routes - mutations require authentication
            .service(
                web::scope("/articles")
                    .route("", web::get().to(articles::list))
                    .route("", web::post().to(articles::create))
                    .route("/{id}", web::get().to(articles::detail))
                    .route("/{id}", web::put().to(articles::update))
                    .route("/{id}/delete", web::get().to(articles::confirm_delete))
                    .route("/{id}/delete", web::post().to(articles::delete)),
            )
            // Category routes
            .service(
                web::scope("/categories")
                    .route("", web::get().to(categories::list))
                    .route("", web::post().to(categories::create))
                    .route("/{id}", web::delete().to(categories::delete))
                    .route("/{id}/articles", web::get().to(categories::articles)),
            ),
    );
}
