//! Subscription and upload database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for subscriptions table
#[derive(Debug, Clone, FromRow)]
pub struct SubscriptionModel {
    pub id: i64,
    pub channel_id: String,
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database model for uploads table
#[derive(Debug, Clone, FromRow)]
pub struct UploadModel {
    pub subscription_id: i64,
    pub title: String,
    pub video_url: String,
    pub video_image_url: Option<String>,
    pub upload_time: Option<DateTime<Utc>>,
    pub last_sync: DateTime<Utc>,
}

/// Subscription list row: the subscription, its group within the listed
/// collection, and its upload (both outer-joined)
#[derive(Debug, Clone, FromRow)]
pub struct SubscriptionListRowModel {
    #[sqlx(flatten)]
    pub subscription: SubscriptionModel,
    pub group_id: Option<i64>,
    pub group_title: Option<String>,
    pub group_emoji: Option<String>,
    pub upload_title: Option<String>,
    pub upload_video_url: Option<String>,
    pub upload_video_image_url: Option<String>,
    pub upload_time: Option<DateTime<Utc>>,
    pub upload_last_sync: Option<DateTime<Utc>>,
}
