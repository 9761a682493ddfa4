//! Subscription handlers
//!
//! Sync from YouTube, the paginated listing, and upload enrichment.

use axum::{
    extract::{Query, State},
    Json,
};
use subhub_service::dto::{
    EnrichResponse, PageResponse, SubscriptionFilterParams, SubscriptionListItemResponse,
    SyncResponse,
};
use subhub_service::SubscriptionService;

use crate::extractors::{AuthUser, GoogleToken, PageQuery};
use crate::response::ApiResult;
use crate::state::AppState;

/// Sync the caller's subscriptions from YouTube (throttled)
///
/// GET /subscribe/info
pub async fn sync_subscriptions(
    State(state): State<AppState>,
    auth: AuthUser,
    google_token: GoogleToken,
) -> ApiResult<Json<SyncResponse>> {
    let service = SubscriptionService::new(state.service_context());
    let response = service.sync(auth.user_id, google_token.as_str()).await?;
    Ok(Json(response))
}

/// List the caller's subscriptions
///
/// GET /subscribe/list?search=&group=&ordering=&page=&page_size=
pub async fn list_subscriptions(
    State(state): State<AppState>,
    auth: AuthUser,
    PageQuery(page): PageQuery,
    Query(filters): Query<SubscriptionFilterParams>,
) -> ApiResult<Json<PageResponse<SubscriptionListItemResponse>>> {
    let service = SubscriptionService::new(state.service_context());
    let response = service.list(auth.user_id, &filters, page).await?;
    Ok(Json(response))
}

/// Refresh the latest uploads of the stalest subscriptions
///
/// GET /subscribe/enrich
pub async fn enrich_subscriptions(
    State(state): State<AppState>,
    auth: AuthUser,
    google_token: GoogleToken,
) -> ApiResult<Json<EnrichResponse>> {
    let service = SubscriptionService::new(state.service_context());
    let response = service.enrich(auth.user_id, google_token.as_str()).await?;
    Ok(Json(response))
}
