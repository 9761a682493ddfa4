//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{
    AddSubscriptionRequest, CreateCustomUrlRequest, CreateGroupRequest, CreatorSearchParams,
    GoogleLoginRequest, ShareLinkParams, ShareTokenParams, SubscriptionFilterParams,
    UpdateGroupRequest, UpdateProfileRequest,
};

pub use responses::{
    AuthResponse, CreatorResponse, CustomUrlResponse, EnrichResponse, GoogleTokenResponse,
    GroupRefResponse, GroupResponse, HealthChecks, HealthResponse, MessageResponse, PageResponse,
    ProfileResponse, PublicGroupResponse, PublicProfileResponse, ReadinessResponse,
    RedirectResponse, ShareLinkResponse, SharedGroupInfoResponse, SharedGroupResponse,
    SharedOwnerResponse, SubscriptionListItemResponse, SubscriptionResponse, SyncResponse,
    UploadResponse, UserResponse,
};
