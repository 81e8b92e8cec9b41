//! Route definitions
//!
//! All API routes organized by domain and mounted under /api/v1.

use axum::{
    routing::{delete, get, patch, post},
    Router,
};

use crate::handlers::{auth, comments, health, likes, subscriptions, users, videos};
use crate::state::AppState;

/// Create the main API router with all routes (excluding health for separate middleware handling)
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api/v1", api_v1_routes())
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// API v1 routes
fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(video_routes())
        .merge(comment_routes())
        .merge(channel_routes())
}

/// Authentication routes
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/refresh", post(auth::refresh_token))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/change-password", post(auth::change_password))
}

/// User routes
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users/me", get(users::get_current_user))
        .route("/users/me", patch(users::update_account))
        .route("/users/me/avatar", patch(users::update_avatar))
        .route("/users/me/cover-image", patch(users::update_cover_image))
        .route("/users/channel/:username", get(users::channel_profile))
        .route("/users/:user_id/liked-videos", get(likes::liked_videos))
        .route(
            "/users/:subscriber_id/subscriptions",
            get(subscriptions::subscribed_channels),
        )
}

/// Video routes
fn video_routes() -> Router<AppState> {
    Router::new()
        .route("/videos", get(videos::list_videos))
        .route("/videos", post(videos::publish_video))
        .route("/videos/:video_id", get(videos::get_video))
        .route("/videos/:video_id", patch(videos::update_video))
        .route("/videos/:video_id", delete(videos::delete_video))
        .route("/videos/:video_id/publish-toggle", post(videos::toggle_publish))
        .route("/videos/:video_id/like", post(likes::toggle_video_like))
        .route("/videos/:video_id/comments", get(comments::get_video_comments))
        .route("/videos/:video_id/comments", post(comments::add_comment))
}

/// Comment routes
fn comment_routes() -> Router<AppState> {
    Router::new()
        .route("/comments/:comment_id", patch(comments::update_comment))
        .route("/comments/:comment_id", delete(comments::delete_comment))
        .route("/comments/:comment_id/like", post(likes::toggle_comment_like))
}

/// Channel (subscription) routes
fn channel_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/channels/:channel_id/subscribe",
            post(subscriptions::toggle_subscription),
        )
        .route(
            "/channels/:channel_id/subscribers",
            get(subscriptions::channel_subscribers),
        )
}
