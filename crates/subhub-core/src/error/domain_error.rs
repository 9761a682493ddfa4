//! Domain errors - error types for the domain layer

use thiserror::Error;

use super::UpstreamError;
use crate::value_objects::Snowflake;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(Snowflake),

    #[error("Profile not found: {0}")]
    ProfileNotFound(String),

    #[error("Subscription collection not found")]
    CollectionNotFound,

    #[error("Group not found")]
    GroupNotFound(Snowflake),

    #[error("Subscription not found")]
    SubscriptionNotFound(Snowflake),

    #[error("Link not found: {0}")]
    CustomUrlNotFound(Snowflake),

    // =========================================================================
    // Validation / Business Rule Errors (surface as 400)
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid username: {0}")]
    InvalidUsername(String),

    #[error("A profile with this username already exists.")]
    UsernameTaken,

    #[error("A group with this combination of fields already exists.")]
    GroupTitleExists,

    #[error("You can create up to {max} groups.")]
    GroupLimitReached { max: i64 },

    #[error("You can add up to {max} links.")]
    CustomUrlLimitReached { max: i64 },

    #[error("Failed to add subscription to a group.")]
    AlreadyInGroup,

    #[error("Subscription does not belong to any group associated with the user.")]
    NotInAnyGroup,

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Only creators can do this")]
    CreatorRequired,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Email already in use")]
    EmailAlreadyExists,

    // =========================================================================
    // Upstream (Google) Errors
    // =========================================================================
    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Cache error: {0}")]
    CacheError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::ProfileNotFound(_) => "UNKNOWN_PROFILE",
            Self::CollectionNotFound => "UNKNOWN_COLLECTION",
            Self::GroupNotFound(_) => "UNKNOWN_GROUP",
            Self::SubscriptionNotFound(_) => "UNKNOWN_SUBSCRIPTION",
            Self::CustomUrlNotFound(_) => "UNKNOWN_LINK",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidUsername(_) => "INVALID_USERNAME",
            Self::UsernameTaken => "USERNAME_TAKEN",
            Self::GroupTitleExists => "GROUP_TITLE_EXISTS",
            Self::GroupLimitReached { .. } => "GROUP_LIMIT_REACHED",
            Self::CustomUrlLimitReached { .. } => "LINK_LIMIT_REACHED",
            Self::AlreadyInGroup => "ALREADY_IN_GROUP",
            Self::NotInAnyGroup => "NOT_IN_ANY_GROUP",

            // Authorization
            Self::CreatorRequired => "CREATOR_REQUIRED",

            // Conflict
            Self::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",

            // Upstream
            Self::Upstream(e) => e.code(),

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::CacheError(_) => "CACHE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_)
                | Self::ProfileNotFound(_)
                | Self::CollectionNotFound
                | Self::GroupNotFound(_)
                | Self::SubscriptionNotFound(_)
                | Self::CustomUrlNotFound(_)
        )
    }

    /// Check if this is a validation or business rule error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::InvalidUsername(_)
                | Self::UsernameTaken
                | Self::GroupTitleExists
                | Self::GroupLimitReached { .. }
                | Self::CustomUrlLimitReached { .. }
                | Self::AlreadyInGroup
                | Self::NotInAnyGroup
        )
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::CreatorRequired)
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::EmailAlreadyExists)
    }

    /// Check if this came from a Google endpoint
    pub fn is_upstream(&self) -> bool {
        matches!(self, Self::Upstream(_))
    }

    /// HTTP status the API answers with
    pub fn status_code(&self) -> u16 {
        if self.is_not_found() {
            404
        } else if self.is_authorization() {
            403
        } else if self.is_validation() || self.is_upstream() {
            400
        } else if self.is_conflict() {
            409
        } else {
            500
        }
    }
}
