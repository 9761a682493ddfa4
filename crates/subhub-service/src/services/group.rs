//! Group service
//!
//! User-defined groups inside a collection. A subscription sits in at most
//! one group of a collection; adding it elsewhere moves it.

use subhub_core::entities::Group;
use subhub_core::sync::ensure_group_capacity;
use subhub_core::traits::{Page, PageRequest};
use subhub_core::{DomainError, Snowflake};
use tracing::{info, instrument};

use crate::dto::{
    CreateGroupRequest, GroupResponse, PageResponse, PublicGroupResponse, SubscriptionResponse,
    UpdateGroupRequest,
};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::subscription::SubscriptionService;
use super::user::UserService;

/// Subscriptions previewed per public group
const PUBLIC_PREVIEW_LEN: i64 = 5;

pub struct GroupService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> GroupService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    async fn collection_id(&self, user_id: Snowflake) -> ServiceResult<Snowflake> {
        let (collection, _) = SubscriptionService::new(self.ctx).collection_for(user_id).await?;
        Ok(collection.id)
    }

    async fn owned_group(&self, collection_id: Snowflake, group_id: Snowflake) -> ServiceResult<Group> {
        Ok(self
            .ctx
            .group_repo()
            .find_in_collection(collection_id, group_id)
            .await?
            .ok_or(DomainError::GroupNotFound(group_id))?)
    }

    async fn member_count(&self, group: &Group) -> ServiceResult<i64> {
        Ok(self
            .ctx
            .group_repo()
            .count_subscriptions(group.id, group.collection_id)
            .await?)
    }

    /// Caller's groups ordered by title
    #[instrument(skip(self))]
    pub async fn list(&self, user_id: Snowflake) -> ServiceResult<Vec<GroupResponse>> {
        let collection_id = self.collection_id(user_id).await?;
        let groups = self.ctx.group_repo().list_with_counts(collection_id).await?;
        Ok(groups.iter().map(GroupResponse::from).collect())
    }

    #[instrument(skip(self, request), fields(title = %request.title))]
    pub async fn create(&self, user_id: Snowflake, request: CreateGroupRequest) -> ServiceResult<GroupResponse> {
        let collection_id = self.collection_id(user_id).await?;

        let count = self.ctx.group_repo().count_by_collection(collection_id).await?;
        ensure_group_capacity(count, self.ctx.settings().max_groups_per_collection)?;

        let mut group = Group::new(self.ctx.generate_id(), collection_id, &request.title)?;
        group.set_description(request.description)?;
        group.set_emoji(request.emoji);
        group.set_public(request.is_public);

        self.ctx.group_repo().create(&group).await?;

        info!(group_id = %group.id, collection_id = %collection_id, "Group created");

        Ok(GroupResponse::new(&group, 0))
    }

    #[instrument(skip(self))]
    pub async fn get(&self, user_id: Snowflake, group_id: Snowflake) -> ServiceResult<GroupResponse> {
        let collection_id = self.collection_id(user_id).await?;
        let group = self.owned_group(collection_id, group_id).await?;
        let count = self.member_count(&group).await?;
        Ok(GroupResponse::new(&group, count))
    }

    /// Partial update; an empty description or emoji clears the field
    #[instrument(skip(self, request))]
    pub async fn update(
        &self,
        user_id: Snowflake,
        group_id: Snowflake,
        request: UpdateGroupRequest,
    ) -> ServiceResult<GroupResponse> {
        let collection_id = self.collection_id(user_id).await?;
        let mut group = self.owned_group(collection_id, group_id).await?;

        if let Some(title) = request.title {
            group.set_title(&title)?;
        }
        if let Some(description) = request.description {
            group.set_description(Some(description))?;
        }
        if let Some(emoji) = request.emoji {
            group.set_emoji(Some(emoji));
        }
        if let Some(is_public) = request.is_public {
            group.set_public(is_public);
        }

        self.ctx.group_repo().update(&group).await?;

        info!(group_id = %group.id, "Group updated");

        let count = self.member_count(&group).await?;
        Ok(GroupResponse::new(&group, count))
    }

    /// Delete a group; its subscriptions become ungrouped
    #[instrument(skip(self))]
    pub async fn delete(&self, user_id: Snowflake, group_id: Snowflake) -> ServiceResult<()> {
        let collection_id = self.collection_id(user_id).await?;
        if !self.ctx.group_repo().delete(group_id, collection_id).await? {
            return Err(DomainError::GroupNotFound(group_id).into());
        }
        info!(group_id = %group_id, "Group deleted");
        Ok(())
    }

    /// Put a subscription into a group, moving it out of its current group
    #[instrument(skip(self))]
    pub async fn add_subscription(
        &self,
        user_id: Snowflake,
        group_id: Snowflake,
        subscription_id: Snowflake,
    ) -> ServiceResult<SubscriptionResponse> {
        let collection_id = self.collection_id(user_id).await?;
        let group = self.owned_group(collection_id, group_id).await?;

        let subscription = self
            .ctx
            .subscription_repo()
            .find_in_collection(collection_id, subscription_id)
            .await?
            .ok_or(DomainError::SubscriptionNotFound(subscription_id))?;

        let current = self
            .ctx
            .group_repo()
            .group_of_subscription(collection_id, subscription.id)
            .await?;
        if current.as_ref().is_some_and(|g| g.id == group.id) {
            return Err(DomainError::AlreadyInGroup.into());
        }

        self.ctx
            .group_repo()
            .assign_subscription(group.id, collection_id, subscription.id)
            .await?;

        info!(
            group_id = %group.id,
            subscription_id = %subscription.id,
            moved_from = ?current.map(|g| g.id),
            "Subscription added to group"
        );

        Ok(SubscriptionResponse::from(&subscription))
    }

    /// Take a subscription out of whichever group of the caller holds it
    #[instrument(skip(self))]
    pub async fn remove_subscription(&self, user_id: Snowflake, subscription_id: Snowflake) -> ServiceResult<()> {
        let collection_id = self.collection_id(user_id).await?;
        if !self
            .ctx
            .group_repo()
            .remove_subscription(collection_id, subscription_id)
            .await?
        {
            return Err(DomainError::NotInAnyGroup.into());
        }
        info!(subscription_id = %subscription_id, "Subscription removed from group");
        Ok(())
    }

    /// Public groups of a public profile, each with a short preview
    #[instrument(skip(self))]
    pub async fn public_groups(
        &self,
        username: &str,
        page: PageRequest,
    ) -> ServiceResult<PageResponse<PublicGroupResponse>> {
        let profile = UserService::new(self.ctx).find_public_profile(username).await?;

        let Some(collection) = self.ctx.collection_repo().find_by_profile(profile.id).await? else {
            return Ok(PageResponse::new(Page::new(Vec::new(), 0), page));
        };

        let groups = self.ctx.group_repo().list_public(collection.id, page).await?;

        let mut results = Vec::with_capacity(groups.items.len());
        for entry in &groups.items {
            let preview = self
                .ctx
                .subscription_repo()
                .first_in_group(entry.group.id, PUBLIC_PREVIEW_LEN)
                .await?;
            results.push(PublicGroupResponse {
                id: entry.group.id.to_string(),
                title: entry.group.title.clone(),
                emoji: entry.group.emoji.clone(),
                subscriptions: preview.iter().map(SubscriptionResponse::from).collect(),
                subscriptions_count: entry.subscription_count,
            });
        }

        Ok(PageResponse::new(Page::new(results, groups.total), page))
    }
}
