//! Profile model -> entity

use subhub_core::entities::{Profile, SocialLinks};
use subhub_core::value_objects::Snowflake;

use crate::models::ProfileModel;

impl From<ProfileModel> for Profile {
    fn from(model: ProfileModel) -> Self {
        Profile {
            id: Snowflake::new(model.id),
            user_id: Snowflake::new(model.user_id),
            username: model.username,
            image_url: model.image_url,
            description: model.description,
            is_public: model.is_public,
            social: SocialLinks {
                youtube_url: model.youtube_url,
                twitter_url: model.twitter_url,
                instagram_url: model.instagram_url,
                tiktok_url: model.tiktok_url,
            },
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
