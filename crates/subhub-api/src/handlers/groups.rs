//! Group handlers
//!
//! Endpoints for the caller's groups, moving subscriptions between them,
//! and the public groups of a creator.

use axum::{
    extract::{Path, State},
    Json,
};
use subhub_service::dto::{
    AddSubscriptionRequest, CreateGroupRequest, GroupResponse, MessageResponse, PageResponse,
    PublicGroupResponse, SubscriptionResponse, UpdateGroupRequest,
};
use subhub_service::GroupService;

use crate::extractors::{AuthUser, GroupIdPath, PageQuery, SubscriptionIdPath, UsernamePath, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// Public groups are listed five per page
const PUBLIC_GROUPS_PAGE_SIZE: i64 = 5;

/// List the caller's groups
///
/// GET /subscribe/groups
pub async fn list_groups(State(state): State<AppState>, auth: AuthUser) -> ApiResult<Json<Vec<GroupResponse>>> {
    let service = GroupService::new(state.service_context());
    let response = service.list(auth.user_id).await?;
    Ok(Json(response))
}

/// Create a group
///
/// POST /subscribe/groups
pub async fn create_group(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateGroupRequest>,
) -> ApiResult<Created<Json<GroupResponse>>> {
    let service = GroupService::new(state.service_context());
    let response = service.create(auth.user_id, request).await?;
    Ok(Created(Json(response)))
}

/// Get one of the caller's groups
///
/// GET /subscribe/groups/{group_id}
pub async fn get_group(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<GroupIdPath>,
) -> ApiResult<Json<GroupResponse>> {
    let group_id = path.group_id()?;
    let service = GroupService::new(state.service_context());
    let response = service.get(auth.user_id, group_id).await?;
    Ok(Json(response))
}

/// Update one of the caller's groups
///
/// PATCH /subscribe/groups/{group_id}
pub async fn update_group(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<GroupIdPath>,
    ValidatedJson(request): ValidatedJson<UpdateGroupRequest>,
) -> ApiResult<Json<GroupResponse>> {
    let group_id = path.group_id()?;
    let service = GroupService::new(state.service_context());
    let response = service.update(auth.user_id, group_id, request).await?;
    Ok(Json(response))
}

/// Delete one of the caller's groups; its subscriptions become ungrouped
///
/// DELETE /subscribe/groups/{group_id}
pub async fn delete_group(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<GroupIdPath>,
) -> ApiResult<NoContent> {
    let group_id = path.group_id()?;
    let service = GroupService::new(state.service_context());
    service.delete(auth.user_id, group_id).await?;
    Ok(NoContent)
}

/// Move a subscription into a group
///
/// POST /subscribe/groups/{group_id}/add-subscription
pub async fn add_subscription(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<GroupIdPath>,
    ValidatedJson(request): ValidatedJson<AddSubscriptionRequest>,
) -> ApiResult<Json<SubscriptionResponse>> {
    let group_id = path.group_id()?;
    let service = GroupService::new(state.service_context());
    let response = service
        .add_subscription(auth.user_id, group_id, request.subscription_id)
        .await?;
    Ok(Json(response))
}

/// Take a subscription out of the caller's group
///
/// DELETE /subscribe/groups/remove-subscription/{subscription_id}
pub async fn remove_subscription(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<SubscriptionIdPath>,
) -> ApiResult<Json<MessageResponse>> {
    let subscription_id = path.subscription_id()?;
    let service = GroupService::new(state.service_context());
    service.remove_subscription(auth.user_id, subscription_id).await?;
    Ok(Json(MessageResponse::new("Subscription removed from the group.")))
}

/// Public groups of a public profile
///
/// GET /subscribe/public/{username}/groups
pub async fn public_groups(
    State(state): State<AppState>,
    Path(path): Path<UsernamePath>,
    page: PageQuery,
) -> ApiResult<Json<PageResponse<PublicGroupResponse>>> {
    let service = GroupService::new(state.service_context());
    let response = service
        .public_groups(path.username(), page.with_page_size(PUBLIC_GROUPS_PAGE_SIZE))
        .await?;
    Ok(Json(response))
}
