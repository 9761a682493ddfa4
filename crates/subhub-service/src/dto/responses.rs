//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.
//! Snowflake IDs are serialized as strings for JavaScript compatibility.

use chrono::{DateTime, Utc};
use serde::Serialize;

use subhub_core::traits::{Page, PageRequest};

// ============================================================================
// Common Response Types
// ============================================================================

/// Page-number pagination envelope
#[derive(Debug, Serialize)]
pub struct PageResponse<T> {
    pub count: i64,
    /// Next page number, `null` on the last page
    pub next: Option<i64>,
    /// Previous page number, `null` on the first page
    pub previous: Option<i64>,
    pub results: Vec<T>,
}

impl<T> PageResponse<T> {
    pub fn new(page: Page<T>, request: PageRequest) -> Self {
        let has_next = request.offset().saturating_add(request.limit()) < page.total;
        Self {
            count: page.total,
            next: has_next.then_some(request.page + 1),
            previous: (request.page > 1).then_some(request.page - 1),
            results: page.items,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Liveness response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Readiness response with per-dependency status
#[derive(Debug, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub checks: HealthChecks,
}

#[derive(Debug, Serialize)]
pub struct HealthChecks {
    pub database: bool,
    pub redis: bool,
}

impl ReadinessResponse {
    pub fn new(database: bool, redis: bool) -> Self {
        let status = if database && redis { "ready" } else { "not_ready" };
        Self {
            status: status.to_string(),
            checks: HealthChecks { database, redis },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.checks.database && self.checks.redis
    }
}

// ============================================================================
// Auth Responses
// ============================================================================

/// Body of a successful login or refresh
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user: UserResponse,
    pub access_token: String,
    /// Google access token for the YouTube endpoints; only set on login
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_access_token: Option<String>,
}

/// Body answered when the login has to bounce back to the frontend
#[derive(Debug, Serialize)]
pub struct RedirectResponse {
    pub redirect: String,
}

#[derive(Debug, Serialize)]
pub struct GoogleTokenResponse {
    pub access_token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<i64>,
}

// ============================================================================
// User / Profile Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub image_url: Option<String>,
    pub role: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CustomUrlResponse {
    pub id: String,
    pub name: String,
    pub url: String,
}

/// Profile as its owner sees it
#[derive(Debug, Clone, Serialize)]
pub struct ProfileResponse {
    pub id: String,
    pub username: String,
    pub image_url: Option<String>,
    pub description: Option<String>,
    pub is_public: bool,
    pub youtube_url: Option<String>,
    pub twitter_url: Option<String>,
    pub instagram_url: Option<String>,
    pub tiktok_url: Option<String>,
    pub custom_urls: Vec<CustomUrlResponse>,
}

/// Profile as anonymous visitors see it
#[derive(Debug, Clone, Serialize)]
pub struct PublicProfileResponse {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub image_url: Option<String>,
    pub description: Option<String>,
    pub youtube_url: Option<String>,
    pub twitter_url: Option<String>,
    pub instagram_url: Option<String>,
    pub tiktok_url: Option<String>,
    pub custom_urls: Vec<CustomUrlResponse>,
}

/// Entry of the creator directory
#[derive(Debug, Clone, Serialize)]
pub struct CreatorResponse {
    pub username: String,
    pub image_url: Option<String>,
    pub description: Option<String>,
}

// ============================================================================
// Subscription Responses
// ============================================================================

#[derive(Debug, Serialize)]
pub struct SyncResponse {
    pub subscriptions_count: i64,
    pub last_sync_date: Option<DateTime<Utc>>,
    pub is_data_synced: bool,
}

#[derive(Debug, Serialize)]
pub struct EnrichResponse {
    pub is_data_synced: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubscriptionResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    pub channel_id: String,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GroupRefResponse {
    pub id: String,
    pub title: String,
    pub emoji: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UploadResponse {
    pub title: String,
    pub video_url: String,
    pub video_image_url: Option<String>,
    pub upload_time: Option<DateTime<Utc>>,
}

/// Row of the subscription list
#[derive(Debug, Clone, Serialize)]
pub struct SubscriptionListItemResponse {
    #[serde(flatten)]
    pub subscription: SubscriptionResponse,
    pub group: Option<GroupRefResponse>,
    pub upload: Option<UploadResponse>,
}

// ============================================================================
// Group Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct GroupResponse {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub emoji: Option<String>,
    pub is_public: bool,
    pub subscription_count: i64,
}

/// Public group with a preview of its subscriptions
#[derive(Debug, Clone, Serialize)]
pub struct PublicGroupResponse {
    pub id: String,
    pub title: String,
    pub emoji: Option<String>,
    pub subscriptions: Vec<SubscriptionResponse>,
    pub subscriptions_count: i64,
}

// ============================================================================
// Share Responses
// ============================================================================

#[derive(Debug, Serialize)]
pub struct ShareLinkResponse {
    pub link: String,
}

#[derive(Debug, Serialize)]
pub struct SharedGroupResponse {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub emoji: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SharedOwnerResponse {
    pub username: String,
    pub image_url: Option<String>,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Serialize)]
pub struct SharedGroupInfoResponse {
    pub group: SharedGroupResponse,
    pub owner: SharedOwnerResponse,
    /// Unix seconds
    pub expiration_date: i64,
}
