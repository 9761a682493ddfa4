//! # subhub-youtube
//!
//! HTTP clients for the Google services the hub depends on:
//!
//! - [`YouTubeClient`]: subscriptions, channels, playlist items and videos
//!   from the YouTube Data API v3
//! - [`GoogleOAuthClient`]: authorization code exchange, access token refresh
//!   and user info
//!
//! Both implement the ports declared in `subhub-core` and report failures as
//! [`subhub_core::UpstreamError`].

mod http;
pub mod models;
mod oauth;
mod youtube;

pub use oauth::GoogleOAuthClient;
pub use youtube::YouTubeClient;

/// Build both clients from application config
pub fn from_config(
    config: &subhub_common::GoogleConfig,
) -> Result<(YouTubeClient, GoogleOAuthClient), subhub_core::UpstreamError> {
    let client = http::build_client()?;
    Ok((
        YouTubeClient::with_client(client.clone(), &config.youtube_api_base_url, &config.api_key),
        GoogleOAuthClient::with_client(
            client,
            &config.token_url,
            &config.userinfo_url,
            &config.client_id,
            &config.client_secret,
        ),
    ))
}
