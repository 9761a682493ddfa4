//! Synchronization and grouping rules
//!
//! Pure decisions used by the service layer: whether a collection is due for
//! a re-sync, how the live YouTube feed maps onto stored rows, which uploads
//! need refreshing, and the per-collection group cap.

use std::collections::HashSet;

use chrono::{DateTime, Duration, Utc};

use crate::entities::{ChannelSnapshot, SubscriptionCollection};
use crate::error::DomainError;

/// Re-sync throttle for a collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncPolicy {
    pub interval: Duration,
}

impl SyncPolicy {
    pub fn every_days(days: i64) -> Self {
        Self {
            interval: Duration::days(days),
        }
    }

    /// A freshly created or never-synced collection always syncs; otherwise
    /// only once the last sync is older than the interval.
    pub fn should_sync(
        &self,
        collection: &SubscriptionCollection,
        just_created: bool,
        now: DateTime<Utc>,
    ) -> bool {
        if just_created {
            return true;
        }
        match collection.last_data_sync {
            None => true,
            Some(last) => now - last >= self.interval,
        }
    }
}

impl Default for SyncPolicy {
    fn default() -> Self {
        Self::every_days(7)
    }
}

/// Reconciliation of the live feed against the stored channel ids
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncPlan {
    /// Every live channel, deduplicated; upserted and attached
    pub upsert: Vec<ChannelSnapshot>,
    /// Stored channel ids missing from the live feed; detached
    pub detach: Vec<String>,
}

impl SyncPlan {
    pub fn compute<I>(stored_channel_ids: I, live: Vec<ChannelSnapshot>) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut seen = HashSet::new();
        let upsert: Vec<ChannelSnapshot> = live
            .into_iter()
            .filter(|c| !c.channel_id.trim().is_empty())
            .filter(|c| seen.insert(c.channel_id.clone()))
            .collect();

        let mut detach: Vec<String> = stored_channel_ids
            .into_iter()
            .filter(|id| !seen.contains(id))
            .collect();
        detach.sort();
        detach.dedup();

        Self { upsert, detach }
    }

    pub fn is_empty(&self) -> bool {
        self.upsert.is_empty() && self.detach.is_empty()
    }
}

/// Which uploads are stale and how many to refresh per request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadRefreshPolicy {
    pub interval: Duration,
    pub batch_size: i64,
}

impl UploadRefreshPolicy {
    /// Uploads synced before this instant are refreshed
    pub fn stale_before(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now - self.interval
    }
}

impl Default for UploadRefreshPolicy {
    fn default() -> Self {
        Self {
            interval: Duration::weeks(1),
            batch_size: 30,
        }
    }
}

/// Fail when a collection already holds `max` groups
pub fn ensure_group_capacity(current: i64, max: i64) -> Result<(), DomainError> {
    if current >= max {
        return Err(DomainError::GroupLimitReached { max });
    }
    Ok(())
}
