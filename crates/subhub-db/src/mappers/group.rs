//! Group model -> entity

use subhub_core::entities::Group;
use subhub_core::traits::GroupWithCount;
use subhub_core::value_objects::Snowflake;

use crate::models::{GroupModel, GroupWithCountModel};

impl From<GroupModel> for Group {
    fn from(model: GroupModel) -> Self {
        Group {
            id: Snowflake::new(model.id),
            collection_id: Snowflake::new(model.collection_id),
            title: model.title,
            description: model.description,
            emoji: model.emoji,
            is_public: model.is_public,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<GroupWithCountModel> for GroupWithCount {
    fn from(model: GroupWithCountModel) -> Self {
        GroupWithCount {
            group: Group::from(model.group),
            subscription_count: model.subscription_count,
        }
    }
}
