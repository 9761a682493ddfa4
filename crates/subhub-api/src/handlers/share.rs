//! Share link handlers
//!
//! Issuing a link requires authentication; reading a shared group only
//! needs the `token` query parameter.

use axum::{
    extract::{Query, State},
    Json,
};
use subhub_service::dto::{
    ShareLinkParams, ShareLinkResponse, ShareTokenParams, SharedGroupInfoResponse,
    SubscriptionResponse,
};
use subhub_service::ShareService;

use crate::extractors::AuthUser;
use crate::response::ApiResult;
use crate::state::AppState;

/// Issue a share link for one of the caller's groups
///
/// GET /subscribe/share/group-link?group_id=&path=
pub async fn group_link(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<ShareLinkParams>,
) -> ApiResult<Json<ShareLinkResponse>> {
    let service = ShareService::new(state.service_context());
    let response = service.group_link(auth.user_id, params).await?;
    Ok(Json(response))
}

/// Subscriptions of a shared group
///
/// GET /subscribe/share/subscriptions?token=
pub async fn shared_subscriptions(
    State(state): State<AppState>,
    Query(params): Query<ShareTokenParams>,
) -> ApiResult<Json<Vec<SubscriptionResponse>>> {
    let service = ShareService::new(state.service_context());
    let response = service.shared_subscriptions(params.token.as_deref()).await?;
    Ok(Json(response))
}

/// Group, owner and expiry behind a share token
///
/// GET /subscribe/share/group-info?token=
pub async fn shared_group_info(
    State(state): State<AppState>,
    Query(params): Query<ShareTokenParams>,
) -> ApiResult<Json<SharedGroupInfoResponse>> {
    let service = ShareService::new(state.service_context());
    let response = service.shared_group_info(params.token.as_deref()).await?;
    Ok(Json(response))
}
