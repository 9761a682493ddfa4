//! Wire models for the Google responses the hub reads, and their transforms
//! into domain types. Every field is optional upstream, so missing values
//! default instead of failing the whole page.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use subhub_core::entities::ChannelSnapshot;
use subhub_core::traits::{GoogleTokens, GoogleUserInfo, LatestVideo};

/// One page of any YouTube list endpoint
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResponse<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Thumbnail {
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct Thumbnails {
    #[serde(default)]
    pub medium: Option<Thumbnail>,
}

impl Thumbnails {
    fn medium_url(&self) -> Option<String> {
        self.medium
            .as_ref()
            .map(|t| t.url.clone())
            .filter(|url| !url.is_empty())
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceId {
    #[serde(default)]
    pub channel_id: String,
    #[serde(default)]
    pub video_id: String,
}

// ----------------------------------------------------------------------------
// subscriptions
// ----------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct SubscriptionItem {
    #[serde(default)]
    pub snippet: SubscriptionSnippet,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionSnippet {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub resource_id: ResourceId,
    #[serde(default)]
    pub thumbnails: Thumbnails,
}

impl From<SubscriptionItem> for ChannelSnapshot {
    fn from(item: SubscriptionItem) -> Self {
        let image_url = item.snippet.thumbnails.medium_url();
        let snippet = item.snippet;
        Self {
            channel_id: snippet.resource_id.channel_id,
            title: snippet.title,
            description: snippet.description,
            image_url,
        }
    }
}

// ----------------------------------------------------------------------------
// channels (contentDetails)
// ----------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelItem {
    pub id: String,
    #[serde(default)]
    pub content_details: Option<ChannelContentDetails>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelContentDetails {
    #[serde(default)]
    pub related_playlists: RelatedPlaylists,
}

#[derive(Debug, Default, Deserialize)]
pub struct RelatedPlaylists {
    #[serde(default)]
    pub uploads: Option<String>,
}

impl ChannelItem {
    /// `(channel_id, uploads_playlist_id)` when the channel exposes one
    pub fn uploads_playlist(self) -> Option<(String, String)> {
        let uploads = self.content_details?.related_playlists.uploads?;
        (!uploads.is_empty()).then_some((self.id, uploads))
    }
}

// ----------------------------------------------------------------------------
// playlistItems
// ----------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct PlaylistItem {
    #[serde(default)]
    pub snippet: PlaylistSnippet,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistSnippet {
    #[serde(default)]
    pub resource_id: ResourceId,
}

// ----------------------------------------------------------------------------
// videos
// ----------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct VideoItem {
    pub id: String,
    #[serde(default)]
    pub snippet: VideoSnippet,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoSnippet {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub thumbnails: Thumbnails,
}

impl From<VideoItem> for LatestVideo {
    fn from(item: VideoItem) -> Self {
        let thumbnail_url = item.snippet.thumbnails.medium_url();
        Self {
            video_id: item.id,
            title: item.snippet.title,
            thumbnail_url,
            published_at: item.snippet.published_at,
        }
    }
}

// ----------------------------------------------------------------------------
// OAuth2
// ----------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<i64>,
}

impl From<TokenResponse> for GoogleTokens {
    fn from(response: TokenResponse) -> Self {
        Self {
            access_token: response.access_token,
            refresh_token: response.refresh_token,
            expires_in: response.expires_in,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UserInfoResponse {
    pub email: String,
    #[serde(default)]
    pub given_name: Option<String>,
    #[serde(default)]
    pub family_name: Option<String>,
    #[serde(default)]
    pub picture: Option<String>,
}

impl From<UserInfoResponse> for GoogleUserInfo {
    fn from(response: UserInfoResponse) -> Self {
        Self {
            email: response.email,
            given_name: response.given_name,
            family_name: response.family_name,
            picture: response.picture,
        }
    }
}
