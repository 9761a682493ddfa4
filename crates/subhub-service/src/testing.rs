//! In-memory doubles of the repository and Google ports for service tests

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use subhub_common::auth::{JwtService, ShareLinkService};
use subhub_core::entities::{
    ChannelSnapshot, CustomUrl, Group, Profile, Subscription, SubscriptionCollection, Upload, User,
};
use subhub_core::traits::{
    CollectionRepository, CustomUrlRepository, GoogleOAuthApi, GoogleTokens, GoogleUserInfo,
    GroupFilter, GroupRef, GroupRepository, GroupWithCount, LatestVideo, Page, PageRequest,
    ProfileRepository, RepoResult, SessionStore, SubscriptionListItem, SubscriptionOrdering,
    SubscriptionQuery, SubscriptionRepository, UpstreamResult, UserRepository, YouTubeApi,
};
use subhub_core::{DomainError, Role, Snowflake, SnowflakeGenerator, UpstreamError};

use crate::dto::CreateGroupRequest;
use crate::services::{GroupService, ServiceContext, ServiceContextBuilder, ServiceSettings};

pub fn channel(id: &str) -> ChannelSnapshot {
    ChannelSnapshot {
        channel_id: id.to_string(),
        title: format!("Channel {id}"),
        description: String::new(),
        image_url: Some(format!("https://i.ytimg.com/{id}.jpg")),
    }
}

fn paginate<T>(items: Vec<T>, page: PageRequest) -> Page<T> {
    let total = items.len() as i64;
    let items = items
        .into_iter()
        .skip(page.offset() as usize)
        .take(page.limit() as usize)
        .collect();
    Page::new(items, total)
}

// ============================================================================
// Storage
// ============================================================================

#[derive(Default)]
struct State {
    users: Vec<User>,
    profiles: Vec<Profile>,
    links: Vec<CustomUrl>,
    collections: Vec<SubscriptionCollection>,
    subscriptions: Vec<Subscription>,
    /// (collection_id, subscription_id)
    attached: Vec<(Snowflake, Snowflake)>,
    groups: Vec<Group>,
    /// (group_id, subscription_id, collection_id)
    memberships: Vec<(Snowflake, Snowflake, Snowflake)>,
    uploads: HashMap<Snowflake, Upload>,
    sessions: HashMap<String, Snowflake>,
}

impl State {
    fn attached_to(&self, collection_id: Snowflake) -> Vec<Subscription> {
        let mut subs: Vec<Subscription> = self
            .subscriptions
            .iter()
            .filter(|s| self.attached.contains(&(collection_id, s.id)))
            .cloned()
            .collect();
        subs.sort_by_key(|s| s.id);
        subs
    }

    fn group_of(&self, collection_id: Snowflake, subscription_id: Snowflake) -> Option<&Group> {
        let (group_id, _, _) = self
            .memberships
            .iter()
            .find(|(_, s, c)| *s == subscription_id && *c == collection_id)?;
        self.groups.iter().find(|g| g.id == *group_id)
    }

    fn member_count(&self, group_id: Snowflake) -> i64 {
        self.memberships.iter().filter(|(g, _, _)| *g == group_id).count() as i64
    }

    fn title_taken(&self, group: &Group) -> bool {
        self.groups.iter().any(|g| {
            g.collection_id == group.collection_id && g.id != group.id && g.title == group.title
        })
    }
}

/// Every repository and the session store over one shared state
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }

    pub fn user_count(&self) -> usize {
        self.lock().users.len()
    }

    pub fn profile_count(&self) -> usize {
        self.lock().profiles.len()
    }

    pub fn collection_count(&self) -> usize {
        self.lock().collections.len()
    }

    pub fn profile_of(&self, user_id: Snowflake) -> Option<Profile> {
        self.lock().profiles.iter().find(|p| p.user_id == user_id).cloned()
    }

    fn collection_of(&self, user_id: Snowflake) -> Option<SubscriptionCollection> {
        let state = self.lock();
        let profile = state.profiles.iter().find(|p| p.user_id == user_id)?;
        state.collections.iter().find(|c| c.profile_id == profile.id).cloned()
    }

    /// Channel ids attached to the user's collection, sorted
    pub fn channel_ids_of(&self, user_id: Snowflake) -> Vec<String> {
        let Some(collection) = self.collection_of(user_id) else {
            return Vec::new();
        };
        let mut ids: Vec<String> = self
            .lock()
            .attached_to(collection.id)
            .into_iter()
            .map(|s| s.channel_id)
            .collect();
        ids.sort();
        ids
    }

    pub fn upload_of(&self, subscription_id: Snowflake) -> Option<Upload> {
        self.lock().uploads.get(&subscription_id).cloned()
    }

    pub fn groups_holding(&self, subscription_id: Snowflake) -> usize {
        self.lock()
            .memberships
            .iter()
            .filter(|(_, s, _)| *s == subscription_id)
            .count()
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>> {
        Ok(self.lock().users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let email = email.to_lowercase();
        Ok(self.lock().users.iter().find(|u| u.email == email).cloned())
    }

    async fn create_with_profile(
        &self,
        user: &User,
        profile: &Profile,
        collection: &SubscriptionCollection,
    ) -> RepoResult<()> {
        let mut state = self.lock();
        if state.users.iter().any(|u| u.email == user.email) {
            return Err(DomainError::EmailAlreadyExists);
        }
        state.users.push(user.clone());
        state.profiles.push(profile.clone());
        state.collections.push(collection.clone());
        Ok(())
    }

    async fn update(&self, user: &User) -> RepoResult<()> {
        let mut state = self.lock();
        let slot = state
            .users
            .iter_mut()
            .find(|u| u.id == user.id)
            .ok_or(DomainError::UserNotFound(user.id))?;
        *slot = user.clone();
        Ok(())
    }
}

#[async_trait]
impl ProfileRepository for MemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Profile>> {
        Ok(self.lock().profiles.iter().find(|p| p.id == id).cloned())
    }

    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Option<Profile>> {
        Ok(self.profile_of(user_id))
    }

    async fn find_by_username(&self, username: &str) -> RepoResult<Option<Profile>> {
        let username = username.to_lowercase();
        Ok(self
            .lock()
            .profiles
            .iter()
            .find(|p| p.username.to_lowercase() == username)
            .cloned())
    }

    async fn username_exists(&self, username: &str, exclude: Option<Snowflake>) -> RepoResult<bool> {
        let username = username.to_lowercase();
        Ok(self
            .lock()
            .profiles
            .iter()
            .any(|p| p.username.to_lowercase() == username && Some(p.id) != exclude))
    }

    async fn update(&self, profile: &Profile) -> RepoResult<()> {
        let mut state = self.lock();
        let slot = state
            .profiles
            .iter_mut()
            .find(|p| p.id == profile.id)
            .ok_or_else(|| DomainError::ProfileNotFound(profile.id.to_string()))?;
        *slot = profile.clone();
        Ok(())
    }

    async fn list_public_creators(&self, search: Option<&str>, page: PageRequest) -> RepoResult<Page<Profile>> {
        let state = self.lock();
        let search = search.map(str::to_lowercase);
        let mut profiles: Vec<Profile> = state
            .profiles
            .iter()
            .filter(|p| p.is_public)
            .filter(|p| state.users.iter().any(|u| u.id == p.user_id && u.is_creator()))
            .filter(|p| {
                search
                    .as_deref()
                    .map_or(true, |s| p.username.to_lowercase().contains(s))
            })
            .cloned()
            .collect();
        profiles.sort_by_key(|p| p.username.to_lowercase());
        Ok(paginate(profiles, page))
    }
}

#[async_trait]
impl CustomUrlRepository for MemoryStore {
    async fn find_by_profile(&self, profile_id: Snowflake) -> RepoResult<Vec<CustomUrl>> {
        let mut links: Vec<CustomUrl> = self
            .lock()
            .links
            .iter()
            .filter(|l| l.profile_id == profile_id)
            .cloned()
            .collect();
        links.sort_by_key(|l| l.id);
        Ok(links)
    }

    async fn count_by_profile(&self, profile_id: Snowflake) -> RepoResult<i64> {
        Ok(self.lock().links.iter().filter(|l| l.profile_id == profile_id).count() as i64)
    }

    async fn create(&self, link: &CustomUrl) -> RepoResult<()> {
        self.lock().links.push(link.clone());
        Ok(())
    }

    async fn delete(&self, id: Snowflake, profile_id: Snowflake) -> RepoResult<bool> {
        let mut state = self.lock();
        let before = state.links.len();
        state.links.retain(|l| !(l.id == id && l.profile_id == profile_id));
        Ok(state.links.len() < before)
    }
}

#[async_trait]
impl CollectionRepository for MemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<SubscriptionCollection>> {
        Ok(self.lock().collections.iter().find(|c| c.id == id).cloned())
    }

    async fn find_by_profile(&self, profile_id: Snowflake) -> RepoResult<Option<SubscriptionCollection>> {
        Ok(self
            .lock()
            .collections
            .iter()
            .find(|c| c.profile_id == profile_id)
            .cloned())
    }

    async fn get_or_create(
        &self,
        candidate: &SubscriptionCollection,
    ) -> RepoResult<(SubscriptionCollection, bool)> {
        let mut state = self.lock();
        if let Some(existing) = state.collections.iter().find(|c| c.profile_id == candidate.profile_id) {
            return Ok((existing.clone(), false));
        }
        state.collections.push(candidate.clone());
        Ok((candidate.clone(), true))
    }

    async fn subscription_channel_ids(&self, collection_id: Snowflake) -> RepoResult<Vec<String>> {
        Ok(self
            .lock()
            .attached_to(collection_id)
            .into_iter()
            .map(|s| s.channel_id)
            .collect())
    }

    async fn subscription_count(&self, collection_id: Snowflake) -> RepoResult<i64> {
        Ok(self.lock().attached.iter().filter(|(c, _)| *c == collection_id).count() as i64)
    }

    async fn apply_sync(
        &self,
        collection_id: Snowflake,
        subscriptions: &[Subscription],
        detach: &[String],
        synced_at: DateTime<Utc>,
    ) -> RepoResult<i64> {
        let mut state = self.lock();

        for incoming in subscriptions {
            let position = state
                .subscriptions
                .iter()
                .position(|s| s.channel_id == incoming.channel_id);
            let id = match position {
                Some(index) => {
                    let existing = &mut state.subscriptions[index];
                    existing.title = incoming.title.clone();
                    existing.description = incoming.description.clone();
                    existing.image_url = incoming.image_url.clone();
                    existing.id
                }
                None => {
                    state.subscriptions.push(incoming.clone());
                    incoming.id
                }
            };
            if !state.attached.contains(&(collection_id, id)) {
                state.attached.push((collection_id, id));
            }
        }

        let detached: Vec<Snowflake> = state
            .subscriptions
            .iter()
            .filter(|s| detach.contains(&s.channel_id))
            .map(|s| s.id)
            .collect();
        state
            .attached
            .retain(|(c, s)| !(*c == collection_id && detached.contains(s)));
        state
            .memberships
            .retain(|(_, s, c)| !(*c == collection_id && detached.contains(s)));

        let collection = state
            .collections
            .iter_mut()
            .find(|c| c.id == collection_id)
            .ok_or(DomainError::CollectionNotFound)?;
        collection.mark_synced(synced_at);

        Ok(state.attached.iter().filter(|(c, _)| *c == collection_id).count() as i64)
    }
}

#[async_trait]
impl SubscriptionRepository for MemoryStore {
    async fn find_in_collection(
        &self,
        collection_id: Snowflake,
        subscription_id: Snowflake,
    ) -> RepoResult<Option<Subscription>> {
        Ok(self
            .lock()
            .attached_to(collection_id)
            .into_iter()
            .find(|s| s.id == subscription_id))
    }

    async fn list_for_collection(
        &self,
        collection_id: Snowflake,
        query: &SubscriptionQuery,
    ) -> RepoResult<Page<SubscriptionListItem>> {
        let state = self.lock();
        let search = query.search.as_deref().map(str::to_lowercase);

        let mut items: Vec<SubscriptionListItem> = state
            .attached_to(collection_id)
            .into_iter()
            .filter(|s| {
                search
                    .as_deref()
                    .map_or(true, |q| s.title.to_lowercase().contains(q))
            })
            .map(|s| {
                let group = state.group_of(collection_id, s.id).map(|g| GroupRef {
                    id: g.id,
                    title: g.title.clone(),
                    emoji: g.emoji.clone(),
                });
                let upload = state.uploads.get(&s.id).cloned();
                SubscriptionListItem {
                    subscription: s,
                    group,
                    upload,
                }
            })
            .filter(|item| match query.group {
                GroupFilter::All => true,
                GroupFilter::Ungrouped => item.group.is_none(),
                GroupFilter::Group(id) => item.group.as_ref().is_some_and(|g| g.id == id),
            })
            .collect();

        match query.ordering {
            SubscriptionOrdering::Id => {}
            SubscriptionOrdering::TitleAsc => items.sort_by(|a, b| a.subscription.title.cmp(&b.subscription.title)),
            SubscriptionOrdering::TitleDesc => items.sort_by(|a, b| b.subscription.title.cmp(&a.subscription.title)),
        }

        Ok(paginate(items, query.page))
    }

    async fn list_in_group(&self, group_id: Snowflake, collection_id: Snowflake) -> RepoResult<Vec<Subscription>> {
        let state = self.lock();
        Ok(state
            .attached_to(collection_id)
            .into_iter()
            .filter(|s| state.memberships.contains(&(group_id, s.id, collection_id)))
            .collect())
    }

    async fn first_in_group(&self, group_id: Snowflake, limit: i64) -> RepoResult<Vec<Subscription>> {
        let state = self.lock();
        let mut subs: Vec<Subscription> = state
            .subscriptions
            .iter()
            .filter(|s| state.memberships.iter().any(|(g, m, _)| *g == group_id && *m == s.id))
            .cloned()
            .collect();
        subs.sort_by_key(|s| s.id);
        subs.truncate(limit as usize);
        Ok(subs)
    }

    async fn find_stale_for_enrichment(
        &self,
        collection_id: Snowflake,
        older_than: DateTime<Utc>,
        limit: i64,
    ) -> RepoResult<Vec<Subscription>> {
        let state = self.lock();
        Ok(state
            .attached_to(collection_id)
            .into_iter()
            .filter(|s| state.uploads.get(&s.id).map_or(true, |u| u.last_sync < older_than))
            .take(limit as usize)
            .collect())
    }

    async fn upsert_upload(&self, upload: &Upload) -> RepoResult<()> {
        self.lock().uploads.insert(upload.subscription_id, upload.clone());
        Ok(())
    }
}

#[async_trait]
impl GroupRepository for MemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Group>> {
        Ok(self.lock().groups.iter().find(|g| g.id == id).cloned())
    }

    async fn find_in_collection(&self, collection_id: Snowflake, group_id: Snowflake) -> RepoResult<Option<Group>> {
        Ok(self
            .lock()
            .groups
            .iter()
            .find(|g| g.id == group_id && g.belongs_to(collection_id))
            .cloned())
    }

    async fn list_with_counts(&self, collection_id: Snowflake) -> RepoResult<Vec<GroupWithCount>> {
        let state = self.lock();
        let mut groups: Vec<GroupWithCount> = state
            .groups
            .iter()
            .filter(|g| g.belongs_to(collection_id))
            .map(|g| GroupWithCount {
                group: g.clone(),
                subscription_count: state.member_count(g.id),
            })
            .collect();
        groups.sort_by(|a, b| a.group.title.cmp(&b.group.title));
        Ok(groups)
    }

    async fn count_by_collection(&self, collection_id: Snowflake) -> RepoResult<i64> {
        Ok(self.lock().groups.iter().filter(|g| g.belongs_to(collection_id)).count() as i64)
    }

    async fn count_subscriptions(&self, group_id: Snowflake, collection_id: Snowflake) -> RepoResult<i64> {
        Ok(self
            .lock()
            .memberships
            .iter()
            .filter(|(g, _, c)| *g == group_id && *c == collection_id)
            .count() as i64)
    }

    async fn create(&self, group: &Group) -> RepoResult<()> {
        let mut state = self.lock();
        if state.title_taken(group) {
            return Err(DomainError::GroupTitleExists);
        }
        state.groups.push(group.clone());
        Ok(())
    }

    async fn update(&self, group: &Group) -> RepoResult<()> {
        let mut state = self.lock();
        if state.title_taken(group) {
            return Err(DomainError::GroupTitleExists);
        }
        let slot = state
            .groups
            .iter_mut()
            .find(|g| g.id == group.id)
            .ok_or(DomainError::GroupNotFound(group.id))?;
        *slot = group.clone();
        Ok(())
    }

    async fn delete(&self, id: Snowflake, collection_id: Snowflake) -> RepoResult<bool> {
        let mut state = self.lock();
        let before = state.groups.len();
        state.groups.retain(|g| !(g.id == id && g.belongs_to(collection_id)));
        let deleted = state.groups.len() < before;
        if deleted {
            state.memberships.retain(|(g, _, _)| *g != id);
        }
        Ok(deleted)
    }

    async fn group_of_subscription(
        &self,
        collection_id: Snowflake,
        subscription_id: Snowflake,
    ) -> RepoResult<Option<Group>> {
        Ok(self.lock().group_of(collection_id, subscription_id).cloned())
    }

    async fn assign_subscription(
        &self,
        group_id: Snowflake,
        collection_id: Snowflake,
        subscription_id: Snowflake,
    ) -> RepoResult<()> {
        let mut state = self.lock();
        state
            .memberships
            .retain(|(_, s, c)| !(*s == subscription_id && *c == collection_id));
        state.memberships.push((group_id, subscription_id, collection_id));
        Ok(())
    }

    async fn remove_subscription(&self, collection_id: Snowflake, subscription_id: Snowflake) -> RepoResult<bool> {
        let mut state = self.lock();
        let before = state.memberships.len();
        state
            .memberships
            .retain(|(_, s, c)| !(*s == subscription_id && *c == collection_id));
        Ok(state.memberships.len() < before)
    }

    async fn list_public(&self, collection_id: Snowflake, page: PageRequest) -> RepoResult<Page<GroupWithCount>> {
        let state = self.lock();
        let mut groups: Vec<GroupWithCount> = state
            .groups
            .iter()
            .filter(|g| g.belongs_to(collection_id) && g.is_public)
            .map(|g| GroupWithCount {
                group: g.clone(),
                subscription_count: state.member_count(g.id),
            })
            .collect();
        groups.sort_by_key(|g| g.group.id);
        Ok(paginate(groups, page))
    }
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn store(&self, token_id: &str, user_id: Snowflake, _session_id: &str) -> RepoResult<()> {
        self.lock().sessions.insert(token_id.to_string(), user_id);
        Ok(())
    }

    async fn validate(&self, token_id: &str) -> RepoResult<Option<Snowflake>> {
        Ok(self.lock().sessions.get(token_id).copied())
    }

    async fn revoke(&self, token_id: &str) -> RepoResult<bool> {
        Ok(self.lock().sessions.remove(token_id).is_some())
    }
}

// ============================================================================
// Google
// ============================================================================

#[derive(Default)]
struct YouTubeState {
    subscriptions: Vec<ChannelSnapshot>,
    failure: Option<UpstreamError>,
    /// channel id -> (video id, title)
    latest: HashMap<String, (String, String)>,
    subscription_calls: usize,
}

/// YouTube double; uploads playlists are named `PL-<channel id>`
#[derive(Default)]
pub struct FakeYouTube {
    state: Mutex<YouTubeState>,
}

impl FakeYouTube {
    fn lock(&self) -> MutexGuard<'_, YouTubeState> {
        self.state.lock().unwrap()
    }

    pub fn set_subscriptions(&self, channels: Vec<ChannelSnapshot>) {
        self.lock().subscriptions = channels;
    }

    pub fn fail_with(&self, error: UpstreamError) {
        self.lock().failure = Some(error);
    }

    pub fn set_latest_video(&self, channel_id: &str, video_id: &str, title: &str) {
        self.lock()
            .latest
            .insert(channel_id.to_string(), (video_id.to_string(), title.to_string()));
    }

    pub fn subscription_calls(&self) -> usize {
        self.lock().subscription_calls
    }
}

#[async_trait]
impl YouTubeApi for FakeYouTube {
    async fn list_subscriptions(&self, _access_token: &str) -> UpstreamResult<Vec<ChannelSnapshot>> {
        let mut state = self.lock();
        state.subscription_calls += 1;
        match &state.failure {
            Some(error) => Err(error.clone()),
            None => Ok(state.subscriptions.clone()),
        }
    }

    async fn uploads_playlists(
        &self,
        _access_token: &str,
        channel_ids: &[String],
    ) -> UpstreamResult<HashMap<String, String>> {
        Ok(channel_ids
            .iter()
            .map(|id| (id.clone(), format!("PL-{id}")))
            .collect())
    }

    async fn latest_playlist_video(&self, _access_token: &str, playlist_id: &str) -> UpstreamResult<Option<String>> {
        let channel_id = playlist_id.trim_start_matches("PL-");
        Ok(self.lock().latest.get(channel_id).map(|(video_id, _)| video_id.clone()))
    }

    async fn videos(&self, _access_token: &str, video_ids: &[String]) -> UpstreamResult<Vec<LatestVideo>> {
        Ok(self
            .lock()
            .latest
            .values()
            .filter(|(video_id, _)| video_ids.contains(video_id))
            .map(|(video_id, title)| LatestVideo {
                video_id: video_id.clone(),
                title: title.clone(),
                thumbnail_url: None,
                published_at: Some(Utc::now()),
            })
            .collect())
    }
}

#[derive(Default)]
struct OAuthState {
    last_redirect_uri: Option<String>,
    refreshed: Option<GoogleTokens>,
}

/// Google OAuth double that always signs in `viewer@example.com`
#[derive(Default)]
pub struct FakeOAuth {
    state: Mutex<OAuthState>,
}

impl FakeOAuth {
    pub fn last_redirect_uri(&self) -> Option<String> {
        self.state.lock().unwrap().last_redirect_uri.clone()
    }

    pub fn set_refreshed(&self, tokens: GoogleTokens) {
        self.state.lock().unwrap().refreshed = Some(tokens);
    }
}

#[async_trait]
impl GoogleOAuthApi for FakeOAuth {
    async fn exchange_code(&self, _code: &str, redirect_uri: &str) -> UpstreamResult<GoogleTokens> {
        self.state.lock().unwrap().last_redirect_uri = Some(redirect_uri.to_string());
        Ok(GoogleTokens {
            access_token: "google-access".to_string(),
            refresh_token: Some("google-refresh".to_string()),
            expires_in: Some(3599),
        })
    }

    async fn user_info(&self, _access_token: &str) -> UpstreamResult<GoogleUserInfo> {
        Ok(GoogleUserInfo {
            email: "Viewer@Example.com".to_string(),
            given_name: Some("View".to_string()),
            family_name: Some("Er".to_string()),
            picture: None,
        })
    }

    async fn refresh_access_token(&self, _refresh_token: &str) -> UpstreamResult<GoogleTokens> {
        self.state
            .lock()
            .unwrap()
            .refreshed
            .clone()
            .ok_or_else(|| UpstreamError::Unauthorized("refresh token revoked".to_string()))
    }
}

// ============================================================================
// Harness
// ============================================================================

pub struct TestHarness {
    pub ctx: ServiceContext,
    pub store: Arc<MemoryStore>,
    pub youtube: Arc<FakeYouTube>,
    pub oauth: Arc<FakeOAuth>,
    ids: Arc<SnowflakeGenerator>,
}

impl TestHarness {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::default());
        let youtube = Arc::new(FakeYouTube::default());
        let oauth = Arc::new(FakeOAuth::default());
        let ids = Arc::new(SnowflakeGenerator::new(1));

        let ctx = ServiceContextBuilder::new()
            .user_repo(store.clone())
            .profile_repo(store.clone())
            .custom_url_repo(store.clone())
            .collection_repo(store.clone())
            .subscription_repo(store.clone())
            .group_repo(store.clone())
            .session_store(store.clone())
            .youtube(youtube.clone())
            .google_oauth(oauth.clone())
            .jwt_service(Arc::new(JwtService::new("service-test-secret-long-enough", 1800, 2_592_000)))
            .share_link_service(Arc::new(ShareLinkService::new("service-share-secret", 1)))
            .snowflake_generator(ids.clone())
            .settings(ServiceSettings::default())
            .build()
            .unwrap();

        Self {
            ctx,
            store,
            youtube,
            oauth,
            ids,
        }
    }

    /// Register a user with the given profile username
    pub async fn seed_user(&self, email: &str, username: &str) -> User {
        let user = User::from_google(
            self.ids.generate(),
            email,
            Some("Test".to_string()),
            Some("User".to_string()),
            None,
        );
        let profile = Profile::new(self.ids.generate(), user.id, username.to_string(), None);
        let collection = SubscriptionCollection::new(self.ids.generate(), profile.id);
        UserRepository::create_with_profile(self.store.as_ref(), &user, &profile, &collection)
            .await
            .unwrap();
        user
    }

    pub fn make_creator(&self, user_id: Snowflake) {
        let mut state = self.store.lock();
        if let Some(user) = state.users.iter_mut().find(|u| u.id == user_id) {
            user.role = Role::Creator;
        }
    }

    pub fn publish_profile(&self, user_id: Snowflake) {
        let mut state = self.store.lock();
        if let Some(profile) = state.profiles.iter_mut().find(|p| p.user_id == user_id) {
            profile.is_public = true;
        }
    }

    /// Pretend the last sync happened `ago` in the past
    pub fn age_last_sync(&self, user_id: Snowflake, ago: Duration) {
        let collection = self.store.collection_of(user_id).unwrap();
        let mut state = self.store.lock();
        if let Some(stored) = state.collections.iter_mut().find(|c| c.id == collection.id) {
            stored.last_data_sync = Some(Utc::now() - ago);
        }
    }

    pub fn last_sync_of(&self, user_id: Snowflake) -> Option<DateTime<Utc>> {
        self.store.collection_of(user_id).and_then(|c| c.last_data_sync)
    }

    pub fn subscription_id(&self, channel_id: &str) -> Snowflake {
        self.store
            .lock()
            .subscriptions
            .iter()
            .find(|s| s.channel_id == channel_id)
            .map(|s| s.id)
            .unwrap()
    }

    pub async fn seed_group(&self, user_id: Snowflake, title: &str) -> Snowflake {
        let request = CreateGroupRequest {
            title: title.to_string(),
            description: None,
            emoji: None,
            is_public: false,
        };
        let group = GroupService::new(&self.ctx).create(user_id, request).await.unwrap();
        Snowflake::parse(&group.id).unwrap()
    }

    pub async fn assign(&self, user_id: Snowflake, group_id: Snowflake, subscription_id: Snowflake) {
        GroupService::new(&self.ctx)
            .add_subscription(user_id, group_id, subscription_id)
            .await
            .unwrap();
    }
}
