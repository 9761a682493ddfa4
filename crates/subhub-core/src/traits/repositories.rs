//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::{
    CustomUrl, Group, Profile, Subscription, SubscriptionCollection, Upload, User,
};
use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Pagination
// ============================================================================

/// Page-number pagination (1-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub page_size: i64,
}

impl PageRequest {
    pub fn new(page: i64, page_size: i64) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.max(1),
        }
    }

    /// Rows to skip; saturates instead of overflowing on huge page numbers
    #[inline]
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.page_size)
    }

    #[inline]
    pub fn limit(&self) -> i64 {
        self.page_size
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(1, 10)
    }
}

/// One page of results plus the total row count
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: i64) -> Self {
        Self { items, total }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
        }
    }
}

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>>;

    /// Find user by (normalized) email
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;

    /// Create a user together with its profile and empty collection
    async fn create_with_profile(
        &self,
        user: &User,
        profile: &Profile,
        collection: &SubscriptionCollection,
    ) -> RepoResult<()>;

    /// Update an existing user
    async fn update(&self, user: &User) -> RepoResult<()>;
}

// ============================================================================
// Profile Repository
// ============================================================================

#[async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Profile>>;

    /// Find the profile owned by a user
    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Option<Profile>>;

    /// Case-insensitive username lookup
    async fn find_by_username(&self, username: &str) -> RepoResult<Option<Profile>>;

    /// Check whether a username is taken (ignoring case), optionally
    /// excluding one profile
    async fn username_exists(&self, username: &str, exclude: Option<Snowflake>)
        -> RepoResult<bool>;

    async fn update(&self, profile: &Profile) -> RepoResult<()>;

    /// Public profiles of creators, ordered by username
    async fn list_public_creators(
        &self,
        search: Option<&str>,
        page: PageRequest,
    ) -> RepoResult<Page<Profile>>;
}

// ============================================================================
// Custom URL Repository
// ============================================================================

#[async_trait]
pub trait CustomUrlRepository: Send + Sync {
    async fn find_by_profile(&self, profile_id: Snowflake) -> RepoResult<Vec<CustomUrl>>;

    async fn count_by_profile(&self, profile_id: Snowflake) -> RepoResult<i64>;

    async fn create(&self, link: &CustomUrl) -> RepoResult<()>;

    /// Delete a link owned by the profile; false if nothing matched
    async fn delete(&self, id: Snowflake, profile_id: Snowflake) -> RepoResult<bool>;
}

// ============================================================================
// Collection Repository
// ============================================================================

#[async_trait]
pub trait CollectionRepository: Send + Sync {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<SubscriptionCollection>>;

    async fn find_by_profile(
        &self,
        profile_id: Snowflake,
    ) -> RepoResult<Option<SubscriptionCollection>>;

    /// Return the profile's collection, inserting `candidate` when none
    /// exists. The flag is true when the row was created by this call.
    async fn get_or_create(
        &self,
        candidate: &SubscriptionCollection,
    ) -> RepoResult<(SubscriptionCollection, bool)>;

    /// Channel ids currently attached to the collection
    async fn subscription_channel_ids(&self, collection_id: Snowflake) -> RepoResult<Vec<String>>;

    async fn subscription_count(&self, collection_id: Snowflake) -> RepoResult<i64>;

    /// Apply a sync in one transaction: upsert `subscriptions` by channel id
    /// and attach them, detach `detach` (and drop them from this
    /// collection's groups), stamp `last_data_sync`. Returns the attached
    /// subscription count afterwards.
    async fn apply_sync(
        &self,
        collection_id: Snowflake,
        subscriptions: &[Subscription],
        detach: &[String],
        synced_at: DateTime<Utc>,
    ) -> RepoResult<i64>;
}

// ============================================================================
// Subscription Repository
// ============================================================================

/// Group filter for the subscription list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GroupFilter {
    #[default]
    All,
    /// Not in any of the collection's groups
    Ungrouped,
    Group(Snowflake),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubscriptionOrdering {
    #[default]
    Id,
    TitleAsc,
    TitleDesc,
}

#[derive(Debug, Clone, Default)]
pub struct SubscriptionQuery {
    /// Case-insensitive substring match on title
    pub search: Option<String>,
    pub group: GroupFilter,
    pub ordering: SubscriptionOrdering,
    pub page: PageRequest,
}

/// Group summary attached to a listed subscription
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupRef {
    pub id: Snowflake,
    pub title: String,
    pub emoji: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionListItem {
    pub subscription: Subscription,
    pub group: Option<GroupRef>,
    pub upload: Option<Upload>,
}

#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    /// Find a subscription only if it is attached to the collection
    async fn find_in_collection(
        &self,
        collection_id: Snowflake,
        subscription_id: Snowflake,
    ) -> RepoResult<Option<Subscription>>;

    /// Filtered, ordered page of the collection's subscriptions with their
    /// group (within this collection) and latest upload
    async fn list_for_collection(
        &self,
        collection_id: Snowflake,
        query: &SubscriptionQuery,
    ) -> RepoResult<Page<SubscriptionListItem>>;

    /// All subscriptions of a group in a collection, ordered by id
    async fn list_in_group(
        &self,
        group_id: Snowflake,
        collection_id: Snowflake,
    ) -> RepoResult<Vec<Subscription>>;

    /// First `limit` subscriptions of a group, ordered by id
    async fn first_in_group(&self, group_id: Snowflake, limit: i64)
        -> RepoResult<Vec<Subscription>>;

    /// Subscriptions of the collection whose upload is missing or was last
    /// synced before `older_than`
    async fn find_stale_for_enrichment(
        &self,
        collection_id: Snowflake,
        older_than: DateTime<Utc>,
        limit: i64,
    ) -> RepoResult<Vec<Subscription>>;

    /// Insert or replace the upload of a subscription
    async fn upsert_upload(&self, upload: &Upload) -> RepoResult<()>;
}

// ============================================================================
// Group Repository
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupWithCount {
    pub group: Group,
    pub subscription_count: i64,
}

#[async_trait]
pub trait GroupRepository: Send + Sync {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Group>>;

    /// Find a group only if it belongs to the collection
    async fn find_in_collection(
        &self,
        collection_id: Snowflake,
        group_id: Snowflake,
    ) -> RepoResult<Option<Group>>;

    /// Groups of a collection ordered by title, with member counts
    async fn list_with_counts(&self, collection_id: Snowflake) -> RepoResult<Vec<GroupWithCount>>;

    async fn count_by_collection(&self, collection_id: Snowflake) -> RepoResult<i64>;

    /// Number of subscriptions in a group of the collection
    async fn count_subscriptions(&self, group_id: Snowflake, collection_id: Snowflake) -> RepoResult<i64>;

    /// Insert a group; a duplicate title in the collection fails with
    /// `GroupTitleExists`
    async fn create(&self, group: &Group) -> RepoResult<()>;

    async fn update(&self, group: &Group) -> RepoResult<()>;

    /// Delete an owned group (memberships go with it); false if nothing matched
    async fn delete(&self, id: Snowflake, collection_id: Snowflake) -> RepoResult<bool>;

    /// The group holding a subscription within a collection, if any
    async fn group_of_subscription(
        &self,
        collection_id: Snowflake,
        subscription_id: Snowflake,
    ) -> RepoResult<Option<Group>>;

    /// Move a subscription into a group, removing it from any other group of
    /// the same collection in the same transaction
    async fn assign_subscription(
        &self,
        group_id: Snowflake,
        collection_id: Snowflake,
        subscription_id: Snowflake,
    ) -> RepoResult<()>;

    /// Remove a subscription from the collection's group; false if ungrouped
    async fn remove_subscription(
        &self,
        collection_id: Snowflake,
        subscription_id: Snowflake,
    ) -> RepoResult<bool>;

    /// Public groups of a collection ordered by id
    async fn list_public(
        &self,
        collection_id: Snowflake,
        page: PageRequest,
    ) -> RepoResult<Page<GroupWithCount>>;
}
