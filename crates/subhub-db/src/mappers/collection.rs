//! Collection model -> entity

use subhub_core::entities::SubscriptionCollection;
use subhub_core::value_objects::Snowflake;

use crate::models::CollectionModel;

impl From<CollectionModel> for SubscriptionCollection {
    fn from(model: CollectionModel) -> Self {
        SubscriptionCollection {
            id: Snowflake::new(model.id),
            profile_id: Snowflake::new(model.profile_id),
            last_data_sync: model.last_data_sync,
            created_at: model.created_at,
        }
    }
}
