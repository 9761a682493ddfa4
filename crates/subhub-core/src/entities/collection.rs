//! Subscription collection - the set of channels a profile follows

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// One per profile. Owns the user's groups and links to shared subscriptions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionCollection {
    pub id: Snowflake,
    pub profile_id: Snowflake,
    /// When the collection last mirrored the live YouTube feed
    pub last_data_sync: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl SubscriptionCollection {
    pub fn new(id: Snowflake, profile_id: Snowflake) -> Self {
        Self {
            id,
            profile_id,
            last_data_sync: None,
            created_at: Utc::now(),
        }
    }

    #[inline]
    pub fn has_synced(&self) -> bool {
        self.last_data_sync.is_some()
    }

    pub fn mark_synced(&mut self, at: DateTime<Utc>) {
        self.last_data_sync = Some(at);
    }
}
