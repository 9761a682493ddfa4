//! Share service
//!
//! Signed, time-boxed links that give anonymous read access to one group.

use subhub_common::ShareClaims;
use subhub_core::{DomainError, Snowflake};
use tracing::{info, instrument};

use crate::dto::{
    ShareLinkParams, ShareLinkResponse, SharedGroupInfoResponse, SharedGroupResponse,
    SharedOwnerResponse, SubscriptionResponse,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::subscription::SubscriptionService;

pub struct ShareService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ShareService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Issue a share link for an owned group, appended to the frontend path
    #[instrument(skip(self, params))]
    pub async fn group_link(&self, user_id: Snowflake, params: ShareLinkParams) -> ServiceResult<ShareLinkResponse> {
        let (Some(group_id), Some(path)) = (
            params.group_id.filter(|g| !g.trim().is_empty()),
            params.path.filter(|p| !p.trim().is_empty()),
        ) else {
            return Err(ServiceError::bad_request("Group ID and path are required."));
        };

        let group_id = Snowflake::parse(&group_id)
            .map_err(|_| ServiceError::bad_request(format!("Invalid group id: {group_id}")))?;

        let (collection, _) = SubscriptionService::new(self.ctx).collection_for(user_id).await?;
        let group = self
            .ctx
            .group_repo()
            .find_in_collection(collection.id, group_id)
            .await?
            .ok_or(DomainError::GroupNotFound(group_id))?;

        let link = self.ctx.share_link_service().issue(group.id, collection.id)?;

        info!(group_id = %group.id, expires_at = %link.expires_at, "Share link issued");

        let separator = if path.contains('?') { '&' } else { '?' };
        Ok(ShareLinkResponse {
            link: format!("{path}{separator}token={}", link.token),
        })
    }

    fn decode(&self, token: Option<&str>) -> ServiceResult<ShareClaims> {
        let token = token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ServiceError::bad_request("Token is required."))?;
        Ok(self.ctx.share_link_service().validate(token)?)
    }

    /// Subscriptions of the shared group, ordered by id
    #[instrument(skip(self, token))]
    pub async fn shared_subscriptions(&self, token: Option<&str>) -> ServiceResult<Vec<SubscriptionResponse>> {
        let claims = self.decode(token)?;

        let subscriptions = self
            .ctx
            .subscription_repo()
            .list_in_group(claims.group_id, claims.collection_id)
            .await?;

        if subscriptions.is_empty() {
            return Err(ServiceError::bad_request(
                "Failed to fetch group or no subscriptions found.",
            ));
        }

        Ok(subscriptions.iter().map(SubscriptionResponse::from).collect())
    }

    /// Shared group with its owner and the link expiry
    #[instrument(skip(self, token))]
    pub async fn shared_group_info(&self, token: Option<&str>) -> ServiceResult<SharedGroupInfoResponse> {
        let claims = self.decode(token)?;

        let group = self
            .ctx
            .group_repo()
            .find_in_collection(claims.collection_id, claims.group_id)
            .await?
            .ok_or(DomainError::GroupNotFound(claims.group_id))?;

        let collection = self
            .ctx
            .collection_repo()
            .find_by_id(claims.collection_id)
            .await?
            .ok_or(DomainError::CollectionNotFound)?;

        let profile = self
            .ctx
            .profile_repo()
            .find_by_id(collection.profile_id)
            .await?
            .ok_or_else(|| DomainError::ProfileNotFound(collection.profile_id.to_string()))?;

        let owner = self
            .ctx
            .user_repo()
            .find_by_id(profile.user_id)
            .await?
            .ok_or(DomainError::UserNotFound(profile.user_id))?;

        Ok(SharedGroupInfoResponse {
            group: SharedGroupResponse::from(&group),
            owner: SharedOwnerResponse::new(&owner, &profile),
            expiration_date: claims.exp,
        })
    }
}
