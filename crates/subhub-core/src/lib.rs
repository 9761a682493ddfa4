//! # subhub-core
//!
//! Domain layer for the subscription hub: entities, value objects, the
//! synchronization and grouping rules, repository traits, and the ports
//! through which the service talks to Google.
//! This crate has zero dependencies on infrastructure (database, web framework, HTTP client).

pub mod entities;
pub mod error;
pub mod sync;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    derive_profile_username, normalize_email, validate_username, ChannelSnapshot, CustomUrl,
    Group, Profile, SocialLinks, Subscription, SubscriptionCollection, Upload, User,
};
pub use error::{DomainError, UpstreamError};
pub use sync::{ensure_group_capacity, SyncPlan, SyncPolicy, UploadRefreshPolicy};
pub use traits::{
    CollectionRepository, CustomUrlRepository, GoogleOAuthApi, GoogleTokens, GoogleUserInfo,
    GroupFilter, GroupRef, GroupRepository, GroupWithCount, LatestVideo, Page, PageRequest,
    ProfileRepository, RepoResult, SessionStore, SubscriptionListItem, SubscriptionOrdering,
    SubscriptionQuery, SubscriptionRepository, UpstreamResult, UserRepository, YouTubeApi,
};
pub use value_objects::{RegistrationMethod, Role, Snowflake, SnowflakeGenerator, SnowflakeParseError};
