//! Subscription entity - a YouTube channel shared by every user following it

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// Stored channel. `channel_id` is globally unique; rows are never deleted
/// when a user unsubscribes, only detached from that user's collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subscription {
    pub id: Snowflake,
    pub channel_id: String,
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Subscription {
    pub const MAX_TITLE_LEN: usize = 100;
    pub const MAX_DESCRIPTION_LEN: usize = 500;

    /// Build a row for a channel seen in the live feed
    pub fn from_snapshot(id: Snowflake, snapshot: &ChannelSnapshot) -> Self {
        let now = Utc::now();
        Self {
            id,
            channel_id: snapshot.channel_id.clone(),
            title: truncate(&snapshot.title, Self::MAX_TITLE_LEN),
            description: truncate(&snapshot.description, Self::MAX_DESCRIPTION_LEN),
            image_url: snapshot.image_url.clone(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// A channel as reported by the YouTube subscriptions feed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelSnapshot {
    pub channel_id: String,
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
}

fn truncate(value: &str, max: usize) -> String {
    value.chars().take(max).collect()
}
