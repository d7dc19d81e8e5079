//! HTTP handlers and route configuration.

mod articles;
mod auth;
mod garden;
mod health;
mod listing;
mod pages;
mod plants;

use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/api").route("/health", web::get().to(health::health_check)))
        // Content
        .route("/articles", web::get().to(articles::list))
        .route("/articles/{slug}", web::get().to(articles::detail))
        .route("/plant-bible", web::get().to(plants::list))
        .route("/plant-bible/{slug}", web::get().to(plants::detail))
        // Auth forms
        .service(
            web::resource("/login")
                .route(web::get().to(pages::login))
                .route(web::post().to(auth::login)),
        )
        .service(
            web::resource("/register")
                .route(web::get().to(pages::register))
                .route(web::post().to(auth::register)),
        )
        .service(
            web::resource("/forgot-password")
                .route(web::get().to(pages::forgot_password))
                .route(web::post().to(auth::forgot_password)),
        )
        .service(
            web::resource("/reset-password")
                .route(web::get().to(pages::reset_password))
                .route(web::post().to(auth::reset_password)),
        )
        .route("/logout", web::post().to(auth::logout))
        // Gated pages
        .route("/dashboard", web::get().to(pages::dashboard))
        .route("/admin", web::get().to(pages::admin))
        .route("/account", web::get().to(pages::account))
        .route("/account/garden", web::get().to(garden::overview));
}
