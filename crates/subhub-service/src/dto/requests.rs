//! Request DTOs for API endpoints
//!
//! Bodies implement `Deserialize` and `Validate`; query parameter structs
//! only `Deserialize` and are interpreted by the services.

use serde::Deserialize;
use validator::Validate;

use subhub_core::traits::{GroupFilter, SubscriptionOrdering};
use subhub_core::Snowflake;

use crate::services::{ServiceError, ServiceResult};

// ============================================================================
// Auth Requests
// ============================================================================

/// Google OAuth callback payload
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GoogleLoginRequest {
    pub code: Option<String>,
    pub error: Option<String>,
}

// ============================================================================
// Profile Requests
// ============================================================================

/// Partial update of the caller's profile
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 3, max = 100, message = "Username must be 3-100 characters"))]
    pub username: Option<String>,

    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub description: Option<String>,

    #[validate(url(message = "Invalid image URL"))]
    pub image_url: Option<String>,

    pub is_public: Option<bool>,

    #[validate(url(message = "Invalid YouTube URL"))]
    pub youtube_url: Option<String>,

    #[validate(url(message = "Invalid Twitter URL"))]
    pub twitter_url: Option<String>,

    #[validate(url(message = "Invalid Instagram URL"))]
    pub instagram_url: Option<String>,

    #[validate(url(message = "Invalid TikTok URL"))]
    pub tiktok_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCustomUrlRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    #[validate(url(message = "Invalid URL"), length(max = 255, message = "URL must be at most 255 characters"))]
    pub url: String,
}

/// `search` filter of the creator directory
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreatorSearchParams {
    pub search: Option<String>,
}

// ============================================================================
// Subscription Requests
// ============================================================================

/// Filters of the subscription list (`search`, `group`, `ordering`)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubscriptionFilterParams {
    pub search: Option<String>,
    /// `ungroup`, `all` or a group id
    pub group: Option<String>,
    /// `title`, `-title` or `id`
    pub ordering: Option<String>,
}

impl SubscriptionFilterParams {
    pub fn group_filter(&self) -> ServiceResult<GroupFilter> {
        match self.group.as_deref().map(str::trim) {
            None | Some("" | "all") => Ok(GroupFilter::All),
            Some("ungroup") => Ok(GroupFilter::Ungrouped),
            Some(id) => Snowflake::parse(id)
                .map(GroupFilter::Group)
                .map_err(|_| ServiceError::bad_request(format!("Invalid group filter: {id}"))),
        }
    }

    pub fn ordering(&self) -> ServiceResult<SubscriptionOrdering> {
        match self.ordering.as_deref().map(str::trim) {
            None | Some("" | "id") => Ok(SubscriptionOrdering::Id),
            Some("title") => Ok(SubscriptionOrdering::TitleAsc),
            Some("-title") => Ok(SubscriptionOrdering::TitleDesc),
            Some(other) => Err(ServiceError::bad_request(format!("Invalid ordering: {other}"))),
        }
    }

    pub fn search(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    }
}

// ============================================================================
// Group Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateGroupRequest {
    #[validate(length(min = 1, max = 100, message = "Title must be 1-100 characters"))]
    pub title: String,

    #[validate(length(max = 255, message = "Description must be at most 255 characters"))]
    pub description: Option<String>,

    #[validate(length(max = 16, message = "Emoji must be at most 16 characters"))]
    pub emoji: Option<String>,

    #[serde(default)]
    pub is_public: bool,
}

/// Partial group update; an empty description or emoji clears it
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateGroupRequest {
    #[validate(length(min = 1, max = 100, message = "Title must be 1-100 characters"))]
    pub title: Option<String>,

    #[validate(length(max = 255, message = "Description must be at most 255 characters"))]
    pub description: Option<String>,

    #[validate(length(max = 16, message = "Emoji must be at most 16 characters"))]
    pub emoji: Option<String>,

    pub is_public: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AddSubscriptionRequest {
    pub subscription_id: Snowflake,
}

// ============================================================================
// Share Requests
// ============================================================================

/// `group_id` and `path` of a share-link request
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShareLinkParams {
    pub group_id: Option<String>,
    pub path: Option<String>,
}

/// `token` query parameter of the anonymous share endpoints
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShareTokenParams {
    pub token: Option<String>,
}
