//! HTTP handlers and route configuration.

mod auth;
mod health;
mod posts;
mod profile;

use actix_web::web;

/// Configure all application routes.
///
/// The mutating post routes are registered before the `/post/{slug}` detail
/// route so the literal segments win the match.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/healthz", web::get().to(health::health_check))
        .route("/", web::get().to(posts::list))
        .route("/post/create", web::post().to(posts::create))
        .route("/post/edit/{id}", web::post().to(posts::edit))
        .route("/post/delete/{id}", web::post().to(posts::delete))
        .route("/post/{slug}", web::get().to(posts::detail))
        .route("/profile", web::get().to(profile::my_posts))
        .service(
            web::scope("/auth")
                .route("", web::get().to(auth::landing))
                .route("/register", web::post().to(auth::register))
                .route("/login", web::post().to(auth::login))
                .route("/logout", web::post().to(auth::logout))
                .route("/me", web::get().to(auth::me)),
        );
}
