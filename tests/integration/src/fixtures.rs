//! Test fixtures and response shapes
//!
//! Provides reusable request bodies and typed views of the responses the
//! tests inspect.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// Create group request
#[derive(Debug, Serialize)]
pub struct CreateGroupRequest {
    pub title: String,
    pub description: Option<String>,
    pub emoji: Option<String>,
    pub is_public: bool,
}

impl CreateGroupRequest {
    pub fn titled(title: &str) -> Self {
        Self {
            title: title.to_string(),
            description: Some("Test group".to_string()),
            emoji: Some("🎵".to_string()),
            is_public: false,
        }
    }
}

/// Add subscription request
#[derive(Debug, Serialize)]
pub struct AddSubscriptionRequest {
    pub subscription_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub user: UserResponse,
    pub access_token: String,
    pub google_access_token: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub image_url: Option<String>,
    pub role: String,
}

#[derive(Debug, Deserialize)]
pub struct ProfileResponse {
    pub id: String,
    pub username: String,
    pub is_public: bool,
}

#[derive(Debug, Deserialize)]
pub struct SyncResponse {
    pub subscriptions_count: i64,
    pub last_sync_date: Option<String>,
    pub is_data_synced: bool,
}

#[derive(Debug, Deserialize)]
pub struct PageResponse<T> {
    pub count: i64,
    pub next: Option<i64>,
    pub previous: Option<i64>,
    pub results: Vec<T>,
}

#[derive(Debug, Deserialize)]
pub struct GroupRef {
    pub id: String,
    pub title: String,
}

#[derive(Debug, Deserialize)]
pub struct UploadResponse {
    pub title: String,
    pub video_url: String,
}

#[derive(Debug, Deserialize)]
pub struct SubscriptionItem {
    pub id: String,
    pub title: String,
    pub channel_id: String,
    pub group: Option<GroupRef>,
    pub upload: Option<UploadResponse>,
}

#[derive(Debug, Deserialize)]
pub struct GroupResponse {
    pub id: String,
    pub title: String,
    pub is_public: bool,
    pub subscription_count: i64,
}

#[derive(Debug, Deserialize)]
pub struct ShareLinkResponse {
    pub link: String,
}

impl ShareLinkResponse {
    /// The `token` query parameter of the link
    pub fn token(&self) -> Option<&str> {
        self.link.split_once("token=").map(|(_, token)| token)
    }
}

#[derive(Debug, Deserialize)]
pub struct SharedGroupInfoResponse {
    pub group: GroupRef,
    pub owner: SharedOwner,
    pub expiration_date: i64,
}

#[derive(Debug, Deserialize)]
pub struct SharedOwner {
    pub username: String,
    pub first_name: String,
}
