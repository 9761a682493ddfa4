//! Authentication extractors
//!
//! Extracts and validates JWT access tokens from the Authorization header.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use subhub_core::entities::User;
use subhub_core::{DomainError, Snowflake};

use crate::response::ApiError;
use crate::state::AppState;

/// Authenticated user extracted from JWT token
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// User ID from the JWT token
    pub user_id: Snowflake,
}

impl AuthUser {
    pub fn new(user_id: Snowflake) -> Self {
        Self { user_id }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::MissingAuth)?;

        let app_state = AppState::from_ref(state);

        // Keeps the expired / invalid distinction of the JWT layer
        let claims = app_state
            .jwt_service()
            .validate_access_token(bearer.token())
            .map_err(|e| {
                tracing::warn!(error = %e, "Invalid access token");
                ApiError::App(e)
            })?;

        let user_id = claims.user_id().map_err(|e| {
            tracing::warn!(error = %e, "Invalid user ID in token");
            ApiError::App(e)
        })?;

        Ok(AuthUser::new(user_id))
    }
}

/// Authenticated user holding the `creator` role
///
/// Rejects with 403 for everyone else.
#[derive(Debug, Clone)]
pub struct CreatorUser {
    pub user: User,
}

impl CreatorUser {
    pub fn user_id(&self) -> Snowflake {
        self.user.id
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for CreatorUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth = AuthUser::from_request_parts(parts, state).await?;
        let app_state = AppState::from_ref(state);

        let user = app_state
            .service_context()
            .user_repo()
            .find_by_id(auth.user_id)
            .await?
            .ok_or(DomainError::UserNotFound(auth.user_id))?;

        if !user.is_creator() {
            tracing::warn!(user_id = %user.id, "Creator role required");
            return Err(DomainError::CreatorRequired.into());
        }

        Ok(CreatorUser { user })
    }
}
