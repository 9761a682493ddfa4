//! Route definitions
//!
//! All API routes organized by domain and mounted under /api/v1.

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::handlers::{auth, groups, health, share, subscriptions, users};
use crate::state::AppState;

/// Create the main API router (health routes are mounted separately)
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api/v1", api_v1_routes())
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/api/health-check", get(health::health_check))
        .route("/api/health-check/ready", get(health::readiness_check))
}

/// API v1 routes
fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .nest("/user", user_routes())
        .nest("/subscribe", subscribe_routes())
}

/// Authentication, account and profile routes
fn user_routes() -> Router<AppState> {
    Router::new()
        // Auth
        .route("/auth/login/google", post(auth::login_google))
        .route("/auth/token", get(auth::refresh_token).delete(auth::logout))
        .route("/auth/google/token", get(auth::google_token))
        // Account
        .route("/info", get(users::get_info))
        .route("/profile", get(users::get_profile).patch(users::update_profile))
        .route("/profile/:username", get(users::public_profile))
        .route(
            "/custom-links",
            get(users::list_custom_urls).post(users::create_custom_url),
        )
        .route("/custom-links/:link_id", delete(users::delete_custom_url))
        // Creator directory
        .route("/list", get(users::list_creators))
}

/// Subscription, group and share routes
fn subscribe_routes() -> Router<AppState> {
    Router::new()
        // Subscriptions
        .route("/info", get(subscriptions::sync_subscriptions))
        .route("/list", get(subscriptions::list_subscriptions))
        .route("/enrich", get(subscriptions::enrich_subscriptions))
        // Groups
        .route("/groups", get(groups::list_groups).post(groups::create_group))
        .route(
            "/groups/:group_id",
            get(groups::get_group)
                .patch(groups::update_group)
                .delete(groups::delete_group),
        )
        .route("/groups/:group_id/add-subscription", post(groups::add_subscription))
        .route(
            "/groups/remove-subscription/:subscription_id",
            delete(groups::remove_subscription),
        )
        // Share links
        .route("/share/group-link", get(share::group_link))
        .route("/share/subscriptions", get(share::shared_subscriptions))
        .route("/share/group-info", get(share::shared_group_info))
        // Public
        .route("/public/:username/groups", get(groups::public_groups))
}
