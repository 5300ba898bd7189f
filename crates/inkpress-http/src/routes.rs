//! Router assembly.

use axum::routing::{get, post, put};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{admin, auth, comments, pages, posts, profile, reactions};
use crate::state::AppState;

/// Build the full application router over the given state.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/posts", get(posts::list).post(posts::create))
        .route(
            "/posts/:slug",
            get(posts::detail).put(posts::update).delete(posts::remove),
        )
        .route("/posts/:slug/comments", post(comments::create))
        .route(
            "/posts/:slug/comments/:comment_id",
            put(comments::update).delete(comments::remove),
        )
        .route(
            "/posts/:slug/comments/:comment_id/approve",
            post(comments::approve),
        )
        .route("/likes/:post_id", post(reactions::like))
        .route("/favorites", get(reactions::favorites))
        .route("/favorites/:post_id", post(reactions::favorite))
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/profile", get(profile::show).put(profile::update))
        .route("/about", get(pages::about))
        .route("/collaborate", post(pages::collaborate))
        .route("/admin/collaborate", get(admin::collaborate_list))
        .route("/admin/collaborate/read", post(admin::collaborate_mark_read))
        .route("/admin/about", put(admin::about_upsert))
        .route("/admin/categories", post(admin::category_create))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
