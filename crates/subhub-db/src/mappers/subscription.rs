//! Subscription, upload and list row models -> entities

use subhub_core::entities::{Subscription, Upload};
use subhub_core::traits::{GroupRef, SubscriptionListItem};
use subhub_core::value_objects::Snowflake;

use crate::models::{SubscriptionListRowModel, SubscriptionModel, UploadModel};

impl From<SubscriptionModel> for Subscription {
    fn from(model: SubscriptionModel) -> Self {
        Subscription {
            id: Snowflake::new(model.id),
            channel_id: model.channel_id,
            title: model.title,
            description: model.description,
            image_url: model.image_url,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<UploadModel> for Upload {
    fn from(model: UploadModel) -> Self {
        Upload {
            subscription_id: Snowflake::new(model.subscription_id),
            title: model.title,
            video_url: model.video_url,
            video_image_url: model.video_image_url,
            upload_time: model.upload_time,
            last_sync: model.last_sync,
        }
    }
}

impl From<SubscriptionListRowModel> for SubscriptionListItem {
    fn from(row: SubscriptionListRowModel) -> Self {
        let subscription_id = Snowflake::new(row.subscription.id);

        let group = match (row.group_id, row.group_title) {
            (Some(id), Some(title)) => Some(GroupRef {
                id: Snowflake::new(id),
                title,
                emoji: row.group_emoji,
            }),
            _ => None,
        };

        let upload = match (row.upload_title, row.upload_video_url, row.upload_last_sync) {
            (Some(title), Some(video_url), Some(last_sync)) => Some(Upload {
                subscription_id,
                title,
                video_url,
                video_image_url: row.upload_video_image_url,
                upload_time: row.upload_time,
                last_sync,
            }),
            _ => None,
        };

        SubscriptionListItem {
            subscription: Subscription::from(row.subscription),
            group,
            upload,
        }
    }
}
