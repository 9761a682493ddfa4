//! Subscription service
//!
//! Pulls the caller's YouTube subscriptions into their collection, lists
//! them, and refreshes each channel's latest upload.

use std::collections::HashMap;

use chrono::Utc;
use subhub_core::entities::{Subscription, SubscriptionCollection, Upload};
use subhub_core::sync::SyncPlan;
use subhub_core::traits::{PageRequest, SubscriptionQuery};
use subhub_core::Snowflake;
use tracing::{debug, info, instrument};

use crate::dto::{EnrichResponse, PageResponse, SubscriptionFilterParams, SubscriptionListItemResponse, SyncResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::user::UserService;

/// Subscription service
pub struct SubscriptionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> SubscriptionService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// The user's collection, created on first need. The flag is true when
    /// this call created it.
    pub async fn collection_for(&self, user_id: Snowflake) -> ServiceResult<(SubscriptionCollection, bool)> {
        let profile = UserService::new(self.ctx).load_profile(user_id).await?;
        let candidate = SubscriptionCollection::new(self.ctx.generate_id(), profile.id);
        Ok(self.ctx.collection_repo().get_or_create(&candidate).await?)
    }

    /// Reconcile the collection with the live YouTube subscription list
    ///
    /// Throttled: inside the sync window the cached count is returned and
    /// YouTube is not called. The database write only starts once the whole
    /// list has been fetched.
    #[instrument(skip(self, google_token))]
    pub async fn sync(&self, user_id: Snowflake, google_token: &str) -> ServiceResult<SyncResponse> {
        let (collection, created) = self.collection_for(user_id).await?;
        let now = Utc::now();

        if !self.ctx.settings().sync_policy.should_sync(&collection, created, now) {
            let count = self.ctx.collection_repo().subscription_count(collection.id).await?;
            debug!(collection_id = %collection.id, "Sync skipped inside throttle window");
            return Ok(SyncResponse {
                subscriptions_count: count,
                last_sync_date: collection.last_data_sync,
                is_data_synced: false,
            });
        }

        let live = self.ctx.youtube().list_subscriptions(google_token).await?;
        let stored = self
            .ctx
            .collection_repo()
            .subscription_channel_ids(collection.id)
            .await?;

        let plan = SyncPlan::compute(stored, live);
        let subscriptions: Vec<Subscription> = plan
            .upsert
            .iter()
            .map(|snapshot| Subscription::from_snapshot(self.ctx.generate_id(), snapshot))
            .collect();

        let count = self
            .ctx
            .collection_repo()
            .apply_sync(collection.id, &subscriptions, &plan.detach, now)
            .await?;

        info!(
            collection_id = %collection.id,
            upserted = subscriptions.len(),
            detached = plan.detach.len(),
            count,
            "Subscriptions synced"
        );

        Ok(SyncResponse {
            subscriptions_count: count,
            last_sync_date: Some(now),
            is_data_synced: true,
        })
    }

    /// Filtered page of the caller's subscriptions
    #[instrument(skip(self, filters))]
    pub async fn list(
        &self,
        user_id: Snowflake,
        filters: &SubscriptionFilterParams,
        page: PageRequest,
    ) -> ServiceResult<PageResponse<SubscriptionListItemResponse>> {
        let query = SubscriptionQuery {
            search: filters.search(),
            group: filters.group_filter()?,
            ordering: filters.ordering()?,
            page,
        };

        let (collection, _) = self.collection_for(user_id).await?;
        let items = self
            .ctx
            .subscription_repo()
            .list_for_collection(collection.id, &query)
            .await?;

        Ok(PageResponse::new(items.map(SubscriptionListItemResponse::from), page))
    }

    /// Refresh the latest upload of the stalest subscriptions
    #[instrument(skip(self, google_token))]
    pub async fn enrich(&self, user_id: Snowflake, google_token: &str) -> ServiceResult<EnrichResponse> {
        let (collection, _) = self.collection_for(user_id).await?;
        let policy = self.ctx.settings().upload_refresh;
        let now = Utc::now();

        let stale = self
            .ctx
            .subscription_repo()
            .find_stale_for_enrichment(collection.id, policy.stale_before(now), policy.batch_size)
            .await?;

        if stale.is_empty() {
            return Ok(EnrichResponse { is_data_synced: true });
        }

        let youtube = self.ctx.youtube();
        let channel_ids: Vec<String> = stale.iter().map(|s| s.channel_id.clone()).collect();
        let playlists = youtube.uploads_playlists(google_token, &channel_ids).await?;

        let mut subscription_by_video: HashMap<String, Snowflake> = HashMap::new();
        for subscription in &stale {
            let Some(playlist_id) = playlists.get(&subscription.channel_id) else {
                continue;
            };
            if let Some(video_id) = youtube.latest_playlist_video(google_token, playlist_id).await? {
                subscription_by_video.insert(video_id, subscription.id);
            }
        }

        if subscription_by_video.is_empty() {
            return Ok(EnrichResponse { is_data_synced: true });
        }

        let video_ids: Vec<String> = subscription_by_video.keys().cloned().collect();
        let videos = youtube.videos(google_token, &video_ids).await?;

        let mut refreshed = 0usize;
        for video in videos {
            let Some(&subscription_id) = subscription_by_video.get(&video.video_id) else {
                continue;
            };
            let upload = Upload {
                subscription_id,
                title: video.title,
                video_url: Upload::watch_url(&video.video_id),
                video_image_url: video.thumbnail_url,
                upload_time: video.published_at,
                last_sync: now,
            };
            self.ctx.subscription_repo().upsert_upload(&upload).await?;
            refreshed += 1;
        }

        info!(collection_id = %collection.id, refreshed, "Uploads refreshed");

        Ok(EnrichResponse { is_data_synced: true })
    }
}
