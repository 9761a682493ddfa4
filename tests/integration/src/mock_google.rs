//! Local stand-in for Google OAuth2 and the YouTube Data API
//!
//! Serves canned responses for one Google account subscribed to two
//! channels, and counts subscription fetches so tests can observe the sync
//! throttle.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use anyhow::Result;
use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Channels the mock account is subscribed to
pub const MOCK_CHANNELS: [(&str, &str); 2] = [("UC-alpha", "Alpha Channel"), ("UC-beta", "Beta Channel")];

pub const MOCK_GOOGLE_ACCESS_TOKEN: &str = "ya29.mock-access";
pub const MOCK_GOOGLE_REFRESH_TOKEN: &str = "1//mock-refresh";

#[derive(Clone)]
struct MockState {
    email: Arc<String>,
    subscription_calls: Arc<AtomicUsize>,
}

/// Running mock server
pub struct MockGoogle {
    pub addr: SocketAddr,
    pub email: String,
    subscription_calls: Arc<AtomicUsize>,
    _handle: JoinHandle<()>,
}

impl MockGoogle {
    /// Start a mock whose userinfo endpoint answers with `email`
    pub async fn start(email: &str) -> Result<Self> {
        let state = MockState {
            email: Arc::new(email.to_string()),
            subscription_calls: Arc::new(AtomicUsize::new(0)),
        };
        let subscription_calls = Arc::clone(&state.subscription_calls);

        let app = Router::new()
            .route("/token", post(token))
            .route("/userinfo", get(userinfo))
            .route("/youtube/v3/subscriptions", get(subscriptions))
            .route("/youtube/v3/channels", get(channels))
            .route("/youtube/v3/playlistItems", get(playlist_items))
            .route("/youtube/v3/videos", get(videos))
            .with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Ok(Self {
            addr,
            email: email.to_string(),
            subscription_calls,
            _handle: handle,
        })
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Number of `subscriptions` list calls served so far
    pub fn subscription_calls(&self) -> usize {
        self.subscription_calls.load(Ordering::SeqCst)
    }
}

async fn token() -> Json<Value> {
    Json(json!({
        "access_token": MOCK_GOOGLE_ACCESS_TOKEN,
        "refresh_token": MOCK_GOOGLE_REFRESH_TOKEN,
        "expires_in": 3599,
        "token_type": "Bearer",
    }))
}

async fn userinfo(State(state): State<MockState>) -> Json<Value> {
    Json(json!({
        "email": state.email.as_str(),
        "given_name": "Test",
        "family_name": "Viewer",
        "picture": "https://lh3.googleusercontent.com/a/mock",
    }))
}

async fn subscriptions(State(state): State<MockState>) -> Json<Value> {
    state.subscription_calls.fetch_add(1, Ordering::SeqCst);

    let items: Vec<Value> = MOCK_CHANNELS
        .iter()
        .map(|(channel_id, title)| {
            json!({
                "snippet": {
                    "title": title,
                    "description": format!("{title} description"),
                    "resourceId": { "kind": "youtube#channel", "channelId": channel_id },
                    "thumbnails": { "medium": { "url": format!("https://yt3.ggpht.com/{channel_id}") } },
                }
            })
        })
        .collect();

    Json(json!({ "items": items }))
}

fn ids(params: &HashMap<String, String>) -> Vec<String> {
    params
        .get("id")
        .map(|ids| ids.split(',').map(str::to_string).collect())
        .unwrap_or_default()
}

async fn channels(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    let items: Vec<Value> = ids(&params)
        .into_iter()
        .map(|id| {
            json!({
                "id": id,
                "contentDetails": { "relatedPlaylists": { "uploads": format!("UU-{id}") } },
            })
        })
        .collect();

    Json(json!({ "items": items }))
}

async fn playlist_items(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    let playlist = params.get("playlistId").cloned().unwrap_or_default();
    Json(json!({
        "items": [{ "snippet": { "resourceId": { "videoId": format!("vid-{playlist}") } } }]
    }))
}

async fn videos(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    let items: Vec<Value> = ids(&params)
        .into_iter()
        .map(|id| {
            json!({
                "id": id,
                "snippet": {
                    "title": format!("Latest upload {id}"),
                    "publishedAt": "2024-05-01T12:00:00Z",
                    "thumbnails": { "medium": { "url": format!("https://i.ytimg.com/vi/{id}/mqdefault.jpg") } },
                }
            })
        })
        .collect();

    Json(json!({ "items": items }))
}
