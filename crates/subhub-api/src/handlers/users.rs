//! User handlers
//!
//! Endpoints for the caller's account and profile, custom links, and the
//! public creator directory.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use subhub_service::dto::{
    CreateCustomUrlRequest, CreatorResponse, CreatorSearchParams, CustomUrlResponse, PageResponse,
    ProfileResponse, PublicProfileResponse, UpdateProfileRequest, UserResponse,
};
use subhub_service::UserService;

use crate::extractors::{AuthUser, CreatorUser, LinkIdPath, PageQuery, UsernamePath, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// Get the current user
///
/// GET /user/info
pub async fn get_info(State(state): State<AppState>, auth: AuthUser) -> ApiResult<Json<UserResponse>> {
    let service = UserService::new(state.service_context());
    let response = service.get_info(auth.user_id).await?;
    Ok(Json(response))
}

/// Get the caller's profile
///
/// GET /user/profile
pub async fn get_profile(State(state): State<AppState>, auth: AuthUser) -> ApiResult<Json<ProfileResponse>> {
    let service = UserService::new(state.service_context());
    let response = service.get_profile(auth.user_id).await?;
    Ok(Json(response))
}

/// Update the caller's profile
///
/// PATCH /user/profile
pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<UpdateProfileRequest>,
) -> ApiResult<Json<ProfileResponse>> {
    let service = UserService::new(state.service_context());
    let response = service.update_profile(auth.user_id, request).await?;
    Ok(Json(response))
}

/// List the caller's custom links
///
/// GET /user/custom-links
pub async fn list_custom_urls(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<CustomUrlResponse>>> {
    let service = UserService::new(state.service_context());
    let response = service.list_custom_urls(auth.user_id).await?;
    Ok(Json(response))
}

/// Add a custom link to the caller's profile (creators only)
///
/// POST /user/custom-links
pub async fn create_custom_url(
    State(state): State<AppState>,
    creator: CreatorUser,
    ValidatedJson(request): ValidatedJson<CreateCustomUrlRequest>,
) -> ApiResult<Created<Json<CustomUrlResponse>>> {
    let service = UserService::new(state.service_context());
    let response = service.create_custom_url(creator.user_id(), request).await?;
    Ok(Created(Json(response)))
}

/// Delete one of the caller's custom links
///
/// DELETE /user/custom-links/{link_id}
pub async fn delete_custom_url(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<LinkIdPath>,
) -> ApiResult<NoContent> {
    let link_id = path.link_id()?;
    let service = UserService::new(state.service_context());
    service.delete_custom_url(auth.user_id, link_id).await?;
    Ok(NoContent)
}

/// Public profile by username
///
/// GET /user/profile/{username}
pub async fn public_profile(
    State(state): State<AppState>,
    Path(path): Path<UsernamePath>,
) -> ApiResult<Json<PublicProfileResponse>> {
    let service = UserService::new(state.service_context());
    let response = service.public_profile(path.username()).await?;
    Ok(Json(response))
}

/// Public creator directory
///
/// GET /user/list
pub async fn list_creators(
    State(state): State<AppState>,
    PageQuery(page): PageQuery,
    Query(params): Query<CreatorSearchParams>,
) -> ApiResult<Json<PageResponse<CreatorResponse>>> {
    let service = UserService::new(state.service_context());
    let search = params.search.as_deref().map(str::trim).filter(|s| !s.is_empty());
    let response = service.list_creators(search, page).await?;
    Ok(Json(response))
}
