//! Service context - dependency container for services
//!
//! Holds the repositories, the session store, the Google ports and the token
//! services. Everything is behind a trait object so services run unchanged
//! against PostgreSQL/Redis/Google or in-memory doubles.

use std::sync::Arc;

use subhub_common::auth::{JwtService, ShareLinkService};
use subhub_common::{AppConfig, FrontendConfig};
use subhub_core::sync::{SyncPolicy, UploadRefreshPolicy};
use subhub_core::traits::{
    CollectionRepository, CustomUrlRepository, GoogleOAuthApi, GroupRepository, ProfileRepository,
    SessionStore, SubscriptionRepository, UserRepository, YouTubeApi,
};
use subhub_core::entities::Group;
use subhub_core::{Snowflake, SnowflakeGenerator};

use super::error::{ServiceError, ServiceResult};

/// Tunables the use cases read
#[derive(Debug, Clone)]
pub struct ServiceSettings {
    pub sync_policy: SyncPolicy,
    pub upload_refresh: UploadRefreshPolicy,
    pub max_groups_per_collection: i64,
    /// Frontend the Google login redirects back to
    pub frontend: FrontendConfig,
}

impl ServiceSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            sync_policy: SyncPolicy::every_days(config.sync.interval_days),
            upload_refresh: UploadRefreshPolicy::default(),
            max_groups_per_collection: config.sync.max_groups_per_collection,
            frontend: config.frontend.clone(),
        }
    }
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            sync_policy: SyncPolicy::default(),
            upload_refresh: UploadRefreshPolicy::default(),
            max_groups_per_collection: Group::MAX_PER_COLLECTION,
            frontend: FrontendConfig {
                base_url: "http://localhost:3000".to_string(),
            },
        }
    }
}

/// Service context containing all dependencies
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    user_repo: Arc<dyn UserRepository>,
    profile_repo: Arc<dyn ProfileRepository>,
    custom_url_repo: Arc<dyn CustomUrlRepository>,
    collection_repo: Arc<dyn CollectionRepository>,
    subscription_repo: Arc<dyn SubscriptionRepository>,
    group_repo: Arc<dyn GroupRepository>,

    // Sessions
    session_store: Arc<dyn SessionStore>,

    // Google
    youtube: Arc<dyn YouTubeApi>,
    google_oauth: Arc<dyn GoogleOAuthApi>,

    // Services
    jwt_service: Arc<JwtService>,
    share_link_service: Arc<ShareLinkService>,
    snowflake_generator: Arc<SnowflakeGenerator>,

    settings: ServiceSettings,
}

impl ServiceContext {
    // === Repositories ===

    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    pub fn profile_repo(&self) -> &dyn ProfileRepository {
        self.profile_repo.as_ref()
    }

    pub fn custom_url_repo(&self) -> &dyn CustomUrlRepository {
        self.custom_url_repo.as_ref()
    }

    pub fn collection_repo(&self) -> &dyn CollectionRepository {
        self.collection_repo.as_ref()
    }

    pub fn subscription_repo(&self) -> &dyn SubscriptionRepository {
        self.subscription_repo.as_ref()
    }

    pub fn group_repo(&self) -> &dyn GroupRepository {
        self.group_repo.as_ref()
    }

    // === Sessions ===

    /// Get the refresh token session store
    pub fn session_store(&self) -> &dyn SessionStore {
        self.session_store.as_ref()
    }

    // === Google ===

    pub fn youtube(&self) -> &dyn YouTubeApi {
        self.youtube.as_ref()
    }

    pub fn google_oauth(&self) -> &dyn GoogleOAuthApi {
        self.google_oauth.as_ref()
    }

    // === Services ===

    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    pub fn share_link_service(&self) -> &ShareLinkService {
        self.share_link_service.as_ref()
    }

    pub fn settings(&self) -> &ServiceSettings {
        &self.settings
    }

    /// Generate a new Snowflake ID
    pub fn generate_id(&self) -> Snowflake {
        self.snowflake_generator.generate()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("google", &"...")
            .field("settings", &self.settings)
            .finish()
    }
}

/// Builder for creating ServiceContext
#[derive(Default)]
pub struct ServiceContextBuilder {
    user_repo: Option<Arc<dyn UserRepository>>,
    profile_repo: Option<Arc<dyn ProfileRepository>>,
    custom_url_repo: Option<Arc<dyn CustomUrlRepository>>,
    collection_repo: Option<Arc<dyn CollectionRepository>>,
    subscription_repo: Option<Arc<dyn SubscriptionRepository>>,
    group_repo: Option<Arc<dyn GroupRepository>>,
    session_store: Option<Arc<dyn SessionStore>>,
    youtube: Option<Arc<dyn YouTubeApi>>,
    google_oauth: Option<Arc<dyn GoogleOAuthApi>>,
    jwt_service: Option<Arc<JwtService>>,
    share_link_service: Option<Arc<ShareLinkService>>,
    snowflake_generator: Option<Arc<SnowflakeGenerator>>,
    settings: Option<ServiceSettings>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn profile_repo(mut self, repo: Arc<dyn ProfileRepository>) -> Self {
        self.profile_repo = Some(repo);
        self
    }

    pub fn custom_url_repo(mut self, repo: Arc<dyn CustomUrlRepository>) -> Self {
        self.custom_url_repo = Some(repo);
        self
    }

    pub fn collection_repo(mut self, repo: Arc<dyn CollectionRepository>) -> Self {
        self.collection_repo = Some(repo);
        self
    }

    pub fn subscription_repo(mut self, repo: Arc<dyn SubscriptionRepository>) -> Self {
        self.subscription_repo = Some(repo);
        self
    }

    pub fn group_repo(mut self, repo: Arc<dyn GroupRepository>) -> Self {
        self.group_repo = Some(repo);
        self
    }

    pub fn session_store(mut self, store: Arc<dyn SessionStore>) -> Self {
        self.session_store = Some(store);
        self
    }

    pub fn youtube(mut self, api: Arc<dyn YouTubeApi>) -> Self {
        self.youtube = Some(api);
        self
    }

    pub fn google_oauth(mut self, api: Arc<dyn GoogleOAuthApi>) -> Self {
        self.google_oauth = Some(api);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    pub fn share_link_service(mut self, service: Arc<ShareLinkService>) -> Self {
        self.share_link_service = Some(service);
        self
    }

    pub fn snowflake_generator(mut self, generator: Arc<SnowflakeGenerator>) -> Self {
        self.snowflake_generator = Some(generator);
        self
    }

    pub fn settings(mut self, settings: ServiceSettings) -> Self {
        self.settings = Some(settings);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext {
            user_repo: self.user_repo.ok_or_else(|| ServiceError::validation("user_repo is required"))?,
            profile_repo: self
                .profile_repo
                .ok_or_else(|| ServiceError::validation("profile_repo is required"))?,
            custom_url_repo: self
                .custom_url_repo
                .ok_or_else(|| ServiceError::validation("custom_url_repo is required"))?,
            collection_repo: self
                .collection_repo
                .ok_or_else(|| ServiceError::validation("collection_repo is required"))?,
            subscription_repo: self
                .subscription_repo
                .ok_or_else(|| ServiceError::validation("subscription_repo is required"))?,
            group_repo: self.group_repo.ok_or_else(|| ServiceError::validation("group_repo is required"))?,
            session_store: self
                .session_store
                .ok_or_else(|| ServiceError::validation("session_store is required"))?,
            youtube: self.youtube.ok_or_else(|| ServiceError::validation("youtube is required"))?,
            google_oauth: self
                .google_oauth
                .ok_or_else(|| ServiceError::validation("google_oauth is required"))?,
            jwt_service: self
                .jwt_service
                .ok_or_else(|| ServiceError::validation("jwt_service is required"))?,
            share_link_service: self
                .share_link_service
                .ok_or_else(|| ServiceError::validation("share_link_service is required"))?,
            snowflake_generator: self
                .snowflake_generator
                .ok_or_else(|| ServiceError::validation("snowflake_generator is required"))?,
            settings: self.settings.unwrap_or_default(),
        })
    }
}
