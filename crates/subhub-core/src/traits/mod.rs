//! Traits (ports) implemented by the infrastructure crates

mod ports;
mod repositories;

pub use ports::{
    GoogleOAuthApi, GoogleTokens, GoogleUserInfo, LatestVideo, SessionStore, UpstreamResult,
    YouTubeApi,
};
pub use repositories::{
    CollectionRepository, CustomUrlRepository, GroupFilter, GroupRef, GroupRepository,
    GroupWithCount, Page, PageRequest, ProfileRepository, RepoResult, SubscriptionListItem,
    SubscriptionOrdering, SubscriptionQuery, SubscriptionRepository, UserRepository,
};
