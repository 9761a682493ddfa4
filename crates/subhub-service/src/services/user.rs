//! User and profile service
//!
//! Account info, profile editing, custom links and the public creator pages.

use subhub_core::entities::{CustomUrl, Profile, User};
use subhub_core::traits::PageRequest;
use subhub_core::{DomainError, Snowflake};
use tracing::{info, instrument};

use crate::dto::{
    CreateCustomUrlRequest, CreatorResponse, CustomUrlResponse, PageResponse, ProfileResponse,
    PublicProfileResponse, UpdateProfileRequest, UserResponse,
};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// User service
pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    pub(crate) async fn load_user(&self, user_id: Snowflake) -> ServiceResult<User> {
        Ok(self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::UserNotFound(user_id))?)
    }

    /// Profile owned by the user
    pub(crate) async fn load_profile(&self, user_id: Snowflake) -> ServiceResult<Profile> {
        Ok(self
            .ctx
            .profile_repo()
            .find_by_user(user_id)
            .await?
            .ok_or_else(|| DomainError::ProfileNotFound(user_id.to_string()))?)
    }

    /// Get the current user
    #[instrument(skip(self))]
    pub async fn get_info(&self, user_id: Snowflake) -> ServiceResult<UserResponse> {
        let user = self.load_user(user_id).await?;
        Ok(UserResponse::from(&user))
    }

    #[instrument(skip(self))]
    pub async fn get_profile(&self, user_id: Snowflake) -> ServiceResult<ProfileResponse> {
        let profile = self.load_profile(user_id).await?;
        let links = self.ctx.custom_url_repo().find_by_profile(profile.id).await?;
        Ok(ProfileResponse::new(&profile, &links))
    }

    /// Apply a partial profile update
    ///
    /// Empty strings clear optional fields. Going public needs the creator role.
    #[instrument(skip(self, request))]
    pub async fn update_profile(
        &self,
        user_id: Snowflake,
        request: UpdateProfileRequest,
    ) -> ServiceResult<ProfileResponse> {
        let user = self.load_user(user_id).await?;
        let mut profile = self.load_profile(user_id).await?;

        if let Some(username) = request.username.as_deref().map(str::trim) {
            if username != profile.username {
                profile.rename(username)?;
                if self
                    .ctx
                    .profile_repo()
                    .username_exists(username, Some(profile.id))
                    .await?
                {
                    return Err(DomainError::UsernameTaken.into());
                }
            }
        }

        if let Some(is_public) = request.is_public {
            if is_public && !user.is_creator() {
                return Err(DomainError::CreatorRequired.into());
            }
            profile.is_public = is_public;
        }

        if let Some(description) = request.description {
            profile.description = non_empty(description);
        }
        if let Some(image_url) = request.image_url {
            profile.image_url = non_empty(image_url);
        }
        if let Some(url) = request.youtube_url {
            profile.social.youtube_url = non_empty(url);
        }
        if let Some(url) = request.twitter_url {
            profile.social.twitter_url = non_empty(url);
        }
        if let Some(url) = request.instagram_url {
            profile.social.instagram_url = non_empty(url);
        }
        if let Some(url) = request.tiktok_url {
            profile.social.tiktok_url = non_empty(url);
        }

        profile.touch();
        self.ctx.profile_repo().update(&profile).await?;

        info!(profile_id = %profile.id, "Profile updated");

        let links = self.ctx.custom_url_repo().find_by_profile(profile.id).await?;
        Ok(ProfileResponse::new(&profile, &links))
    }

    #[instrument(skip(self))]
    pub async fn list_custom_urls(&self, user_id: Snowflake) -> ServiceResult<Vec<CustomUrlResponse>> {
        let profile = self.load_profile(user_id).await?;
        let links = self.ctx.custom_url_repo().find_by_profile(profile.id).await?;
        Ok(links.iter().map(CustomUrlResponse::from).collect())
    }

    #[instrument(skip(self, request))]
    pub async fn create_custom_url(
        &self,
        user_id: Snowflake,
        request: CreateCustomUrlRequest,
    ) -> ServiceResult<CustomUrlResponse> {
        let profile = self.load_profile(user_id).await?;

        let count = self.ctx.custom_url_repo().count_by_profile(profile.id).await?;
        if count >= CustomUrl::MAX_PER_PROFILE {
            return Err(DomainError::CustomUrlLimitReached {
                max: CustomUrl::MAX_PER_PROFILE,
            }
            .into());
        }

        let link = CustomUrl::new(self.ctx.generate_id(), profile.id, &request.name, &request.url)?;
        self.ctx.custom_url_repo().create(&link).await?;

        info!(link_id = %link.id, profile_id = %profile.id, "Custom link added");

        Ok(CustomUrlResponse::from(&link))
    }

    #[instrument(skip(self))]
    pub async fn delete_custom_url(&self, user_id: Snowflake, link_id: Snowflake) -> ServiceResult<()> {
        let profile = self.load_profile(user_id).await?;
        if !self.ctx.custom_url_repo().delete(link_id, profile.id).await? {
            return Err(DomainError::CustomUrlNotFound(link_id).into());
        }
        info!(link_id = %link_id, "Custom link removed");
        Ok(())
    }

    /// Public profile page; private profiles read as missing
    #[instrument(skip(self))]
    pub async fn public_profile(&self, username: &str) -> ServiceResult<PublicProfileResponse> {
        let profile = self.find_public_profile(username).await?;
        let user = self.load_user(profile.user_id).await?;
        let links = self.ctx.custom_url_repo().find_by_profile(profile.id).await?;
        Ok(PublicProfileResponse::new(&user, &profile, &links))
    }

    pub(crate) async fn find_public_profile(&self, username: &str) -> ServiceResult<Profile> {
        self.ctx
            .profile_repo()
            .find_by_username(username)
            .await?
            .filter(|p| p.is_public)
            .ok_or_else(|| DomainError::ProfileNotFound(username.to_string()).into())
    }

    /// Directory of public creator profiles
    #[instrument(skip(self))]
    pub async fn list_creators(
        &self,
        search: Option<&str>,
        page: PageRequest,
    ) -> ServiceResult<PageResponse<CreatorResponse>> {
        let search = search.map(str::trim).filter(|s| !s.is_empty());
        let profiles = self.ctx.profile_repo().list_public_creators(search, page).await?;
        Ok(PageResponse::new(profiles.map(|p| CreatorResponse::from(&p)), page))
    }
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
