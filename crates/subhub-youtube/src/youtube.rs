//! YouTube Data API v3 client

use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, instrument};

use subhub_core::entities::ChannelSnapshot;
use subhub_core::traits::{LatestVideo, UpstreamResult, YouTubeApi};

use crate::http::{build_client, endpoint, read_json, transport_error};
use crate::models::{ChannelItem, ListResponse, PlaylistItem, SubscriptionItem, VideoItem};

/// Largest `maxResults` and id list the API accepts per call
const MAX_BATCH: usize = 50;

#[derive(Clone)]
pub struct YouTubeClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl std::fmt::Debug for YouTubeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YouTubeClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl YouTubeClient {
    pub fn new(base_url: &str, api_key: &str) -> UpstreamResult<Self> {
        Ok(Self::with_client(build_client()?, base_url, api_key))
    }

    pub fn with_client(client: Client, base_url: &str, api_key: &str) -> Self {
        Self {
            client,
            base_url: base_url.to_string(),
            api_key: api_key.to_string(),
        }
    }

    async fn list<T: serde::de::DeserializeOwned>(
        &self,
        resource: &str,
        access_token: &str,
        params: &[(&str, &str)],
    ) -> UpstreamResult<ListResponse<T>> {
        let response = self
            .client
            .get(endpoint(&self.base_url, resource))
            .bearer_auth(access_token)
            .query(&[("key", self.api_key.as_str())])
            .query(params)
            .send()
            .await
            .map_err(transport_error)?;

        read_json(response, resource).await
    }
}

#[async_trait]
impl YouTubeApi for YouTubeClient {
    #[instrument(skip(self, access_token))]
    async fn list_subscriptions(&self, access_token: &str) -> UpstreamResult<Vec<ChannelSnapshot>> {
        let max_results = MAX_BATCH.to_string();
        let mut channels = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut params = vec![
                ("part", "snippet,contentDetails"),
                ("mine", "true"),
                ("maxResults", max_results.as_str()),
            ];
            if let Some(token) = page_token.as_deref() {
                params.push(("pageToken", token));
            }

            let page: ListResponse<SubscriptionItem> =
                self.list("subscriptions", access_token, &params).await?;
            channels.extend(page.items.into_iter().map(ChannelSnapshot::from));

            match page.next_page_token.filter(|t| !t.is_empty()) {
                Some(next) => page_token = Some(next),
                None => break,
            }
        }

        debug!(count = channels.len(), "Fetched YouTube subscriptions");
        Ok(channels)
    }

    #[instrument(skip(self, access_token, channel_ids), fields(channels = channel_ids.len()))]
    async fn uploads_playlists(
        &self,
        access_token: &str,
        channel_ids: &[String],
    ) -> UpstreamResult<HashMap<String, String>> {
        let mut playlists = HashMap::with_capacity(channel_ids.len());

        for chunk in channel_ids.chunks(MAX_BATCH) {
            let ids = chunk.join(",");
            let page: ListResponse<ChannelItem> = self
                .list("channels", access_token, &[("part", "contentDetails"), ("id", ids.as_str())])
                .await?;
            playlists.extend(page.items.into_iter().filter_map(ChannelItem::uploads_playlist));
        }

        Ok(playlists)
    }

    #[instrument(skip(self, access_token))]
    async fn latest_playlist_video(
        &self,
        access_token: &str,
        playlist_id: &str,
    ) -> UpstreamResult<Option<String>> {
        let page: ListResponse<PlaylistItem> = self
            .list(
                "playlistItems",
                access_token,
                &[("part", "snippet"), ("maxResults", "1"), ("playlistId", playlist_id)],
            )
            .await?;

        Ok(page
            .items
            .into_iter()
            .next()
            .map(|item| item.snippet.resource_id.video_id)
            .filter(|id| !id.is_empty()))
    }

    #[instrument(skip(self, access_token, video_ids), fields(videos = video_ids.len()))]
    async fn videos(&self, access_token: &str, video_ids: &[String]) -> UpstreamResult<Vec<LatestVideo>> {
        let mut videos = Vec::with_capacity(video_ids.len());

        for chunk in video_ids.chunks(MAX_BATCH) {
            let ids = chunk.join(",");
            let page: ListResponse<VideoItem> = self
                .list("videos", access_token, &[("part", "snippet"), ("id", ids.as_str())])
                .await?;
            videos.extend(page.items.into_iter().map(LatestVideo::from));
        }

        Ok(videos)
    }
}
