//! Ports to external systems: Google APIs and the session store

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::RepoResult;
use crate::entities::ChannelSnapshot;
use crate::error::UpstreamError;
use crate::value_objects::Snowflake;

/// Result type for calls to Google
pub type UpstreamResult<T> = Result<T, UpstreamError>;

/// Details of a channel's most recent video
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LatestVideo {
    pub video_id: String,
    pub title: String,
    pub thumbnail_url: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
}

/// YouTube Data API v3, called with the user's Google access token
#[async_trait]
pub trait YouTubeApi: Send + Sync {
    /// Every channel the token owner subscribes to, following page tokens
    async fn list_subscriptions(&self, access_token: &str) -> UpstreamResult<Vec<ChannelSnapshot>>;

    /// Uploads playlist id keyed by channel id
    async fn uploads_playlists(
        &self,
        access_token: &str,
        channel_ids: &[String],
    ) -> UpstreamResult<HashMap<String, String>>;

    /// Id of the newest video in a playlist
    async fn latest_playlist_video(
        &self,
        access_token: &str,
        playlist_id: &str,
    ) -> UpstreamResult<Option<String>>;

    async fn videos(&self, access_token: &str, video_ids: &[String])
        -> UpstreamResult<Vec<LatestVideo>>;
}

/// Tokens returned by Google's token endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoogleTokens {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_in: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoogleUserInfo {
    pub email: String,
    pub given_name: Option<String>,
    pub family_name: Option<String>,
    pub picture: Option<String>,
}

/// Google OAuth2 endpoints
#[async_trait]
pub trait GoogleOAuthApi: Send + Sync {
    async fn exchange_code(&self, code: &str, redirect_uri: &str) -> UpstreamResult<GoogleTokens>;

    async fn user_info(&self, access_token: &str) -> UpstreamResult<GoogleUserInfo>;

    async fn refresh_access_token(&self, refresh_token: &str) -> UpstreamResult<GoogleTokens>;
}

/// Server-side registry of issued refresh tokens
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn store(&self, token_id: &str, user_id: Snowflake, session_id: &str) -> RepoResult<()>;

    /// Owner of a live token, `None` once revoked or expired
    async fn validate(&self, token_id: &str) -> RepoResult<Option<Snowflake>>;

    async fn revoke(&self, token_id: &str) -> RepoResult<bool>;
}
