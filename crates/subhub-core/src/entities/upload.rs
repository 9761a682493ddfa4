//! Latest upload of a channel

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// Most recent video of a subscription, refreshed at most weekly
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    pub subscription_id: Snowflake,
    pub title: String,
    pub video_url: String,
    pub video_image_url: Option<String>,
    pub upload_time: Option<DateTime<Utc>>,
    pub last_sync: DateTime<Utc>,
}

impl Upload {
    /// Public watch page for a video id
    pub fn watch_url(video_id: &str) -> String {
        format!("https://www.youtube.com/watch?v={video_id}")
    }
}
