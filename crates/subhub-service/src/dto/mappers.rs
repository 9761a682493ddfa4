//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use subhub_core::entities::{CustomUrl, Group, Profile, Subscription, Upload, User};
use subhub_core::traits::{GroupRef, GroupWithCount, SubscriptionListItem};

use super::responses::{
    CreatorResponse, CustomUrlResponse, GroupRefResponse, GroupResponse, ProfileResponse,
    PublicProfileResponse, SharedGroupResponse, SharedOwnerResponse, SubscriptionListItemResponse,
    SubscriptionResponse, UploadResponse, UserResponse,
};

// ============================================================================
// User / Profile Mappers
// ============================================================================

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            image_url: user.image_url.clone(),
            role: user.role.to_string(),
        }
    }
}

impl From<&CustomUrl> for CustomUrlResponse {
    fn from(link: &CustomUrl) -> Self {
        Self {
            id: link.id.to_string(),
            name: link.name.clone(),
            url: link.url.clone(),
        }
    }
}

impl ProfileResponse {
    pub fn new(profile: &Profile, links: &[CustomUrl]) -> Self {
        Self {
            id: profile.id.to_string(),
            username: profile.username.clone(),
            image_url: profile.image_url.clone(),
            description: profile.description.clone(),
            is_public: profile.is_public,
            youtube_url: profile.social.youtube_url.clone(),
            twitter_url: profile.social.twitter_url.clone(),
            instagram_url: profile.social.instagram_url.clone(),
            tiktok_url: profile.social.tiktok_url.clone(),
            custom_urls: links.iter().map(CustomUrlResponse::from).collect(),
        }
    }
}

impl PublicProfileResponse {
    pub fn new(user: &User, profile: &Profile, links: &[CustomUrl]) -> Self {
        Self {
            username: profile.username.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            image_url: profile.image_url.clone(),
            description: profile.description.clone(),
            youtube_url: profile.social.youtube_url.clone(),
            twitter_url: profile.social.twitter_url.clone(),
            instagram_url: profile.social.instagram_url.clone(),
            tiktok_url: profile.social.tiktok_url.clone(),
            custom_urls: links.iter().map(CustomUrlResponse::from).collect(),
        }
    }
}

impl From<&Profile> for CreatorResponse {
    fn from(profile: &Profile) -> Self {
        Self {
            username: profile.username.clone(),
            image_url: profile.image_url.clone(),
            description: profile.description.clone(),
        }
    }
}

impl SharedOwnerResponse {
    /// Owner block of a shared group; the profile picture wins over Google's
    pub fn new(user: &User, profile: &Profile) -> Self {
        Self {
            username: profile.username.clone(),
            image_url: profile.image_url.clone().or_else(|| user.image_url.clone()),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
        }
    }
}

// ============================================================================
// Subscription Mappers
// ============================================================================

impl From<&Subscription> for SubscriptionResponse {
    fn from(subscription: &Subscription) -> Self {
        Self {
            id: subscription.id.to_string(),
            title: subscription.title.clone(),
            description: subscription.description.clone(),
            channel_id: subscription.channel_id.clone(),
            image_url: subscription.image_url.clone(),
        }
    }
}

impl From<Subscription> for SubscriptionResponse {
    fn from(subscription: Subscription) -> Self {
        Self::from(&subscription)
    }
}

impl From<&GroupRef> for GroupRefResponse {
    fn from(group: &GroupRef) -> Self {
        Self {
            id: group.id.to_string(),
            title: group.title.clone(),
            emoji: group.emoji.clone(),
        }
    }
}

impl From<&Upload> for UploadResponse {
    fn from(upload: &Upload) -> Self {
        Self {
            title: upload.title.clone(),
            video_url: upload.video_url.clone(),
            video_image_url: upload.video_image_url.clone(),
            upload_time: upload.upload_time,
        }
    }
}

impl From<SubscriptionListItem> for SubscriptionListItemResponse {
    fn from(item: SubscriptionListItem) -> Self {
        Self {
            subscription: SubscriptionResponse::from(&item.subscription),
            group: item.group.as_ref().map(GroupRefResponse::from),
            upload: item.upload.as_ref().map(UploadResponse::from),
        }
    }
}

// ============================================================================
// Group Mappers
// ============================================================================

impl GroupResponse {
    pub fn new(group: &Group, subscription_count: i64) -> Self {
        Self {
            id: group.id.to_string(),
            title: group.title.clone(),
            description: group.description.clone(),
            emoji: group.emoji.clone(),
            is_public: group.is_public,
            subscription_count,
        }
    }
}

impl From<&GroupWithCount> for GroupResponse {
    fn from(entry: &GroupWithCount) -> Self {
        Self::new(&entry.group, entry.subscription_count)
    }
}

impl From<&Group> for SharedGroupResponse {
    fn from(group: &Group) -> Self {
        Self {
            id: group.id.to_string(),
            title: group.title.clone(),
            description: group.description.clone(),
            emoji: group.emoji.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use subhub_core::{Role, Snowflake};

    fn user() -> User {
        let mut user = User::from_google(
            Snowflake::new(1),
            "ann@example.com",
            Some("Ann".to_string()),
            Some("Lee".to_string()),
            Some("https://img/google".to_string()),
        );
        user.role = Role::Creator;
        user
    }

    #[test]
    fn test_user_response() {
        let response = UserResponse::from(&user());
        assert_eq!(response.id, "1");
        assert_eq!(response.email, "ann@example.com");
        assert_eq!(response.role, "creator");
    }

    #[test]
    fn test_shared_owner_prefers_profile_image() {
        let user = user();
        let mut profile = Profile::new(Snowflake::new(2), user.id, "ann".to_string(), None);
        assert_eq!(
            SharedOwnerResponse::new(&user, &profile).image_url.as_deref(),
            Some("https://img/google")
        );

        profile.image_url = Some("https://img/profile".to_string());
        assert_eq!(
            SharedOwnerResponse::new(&user, &profile).image_url.as_deref(),
            Some("https://img/profile")
        );
    }

    #[test]
    fn test_list_item_carries_group_and_upload() {
        let now = Utc::now();
        let item = SubscriptionListItem {
            subscription: Subscription {
                id: Snowflake::new(5),
                channel_id: "UC5".to_string(),
                title: "Five".to_string(),
                description: String::new(),
                image_url: None,
                created_at: now,
                updated_at: now,
            },
            group: Some(GroupRef {
                id: Snowflake::new(9),
                title: "Music".to_string(),
                emoji: Some("🎵".to_string()),
            }),
            upload: Some(Upload {
                subscription_id: Snowflake::new(5),
                title: "Latest".to_string(),
                video_url: Upload::watch_url("v1"),
                video_image_url: None,
                upload_time: Some(now),
                last_sync: now,
            }),
        };

        let response = SubscriptionListItemResponse::from(item);
        assert_eq!(response.subscription.channel_id, "UC5");
        assert_eq!(response.group.map(|g| g.id), Some("9".to_string()));
        assert_eq!(
            response.upload.map(|u| u.video_url),
            Some("https://www.youtube.com/watch?v=v1".to_string())
        );
    }

    #[test]
    fn test_profile_response_includes_links() {
        let profile = Profile::new(Snowflake::new(2), Snowflake::new(1), "ann".to_string(), None);
        let link = CustomUrl::new(Snowflake::new(3), profile.id, "Blog", "https://blog.example").unwrap();

        let response = ProfileResponse::new(&profile, &[link]);
        assert_eq!(response.custom_urls.len(), 1);
        assert_eq!(response.custom_urls[0].name, "Blog");
        assert!(!response.is_public);
    }
}
