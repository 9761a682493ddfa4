//! Authentication service
//!
//! Handles Google sign-in, token refresh with rotation, and logout.

use subhub_common::AppError;
use subhub_core::entities::{
    derive_profile_username, normalize_email, Profile, SubscriptionCollection, User, USERNAME_MAX_LEN,
};
use subhub_core::traits::GoogleUserInfo;
use subhub_core::{DomainError, Snowflake};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::dto::{AuthResponse, GoogleLoginRequest, GoogleTokenResponse, UserResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Tokens handed to the client after a successful sign-in or refresh
#[derive(Debug)]
pub struct AuthSession {
    /// JSON body
    pub response: AuthResponse,
    /// Goes into the `refresh` cookie
    pub refresh_token: String,
    /// Goes into the `google_token` cookie when Google issued one
    pub google_refresh_token: Option<String>,
}

/// Result of the Google callback
#[derive(Debug)]
pub enum LoginOutcome {
    /// Google reported an error or no code came back
    Redirect { url: String },
    Authenticated(AuthSession),
}

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Complete the Google OAuth flow
    #[instrument(skip(self, request))]
    pub async fn login_with_google(&self, request: GoogleLoginRequest) -> ServiceResult<LoginOutcome> {
        let code = match (request.error, request.code) {
            (None, Some(code)) if !code.trim().is_empty() => code,
            (error, _) => {
                let error = error.unwrap_or_default();
                warn!(error = %error, "Google login aborted");
                let url = format!("{}?error={}", self.ctx.settings().frontend.base_url, error);
                return Ok(LoginOutcome::Redirect { url });
            }
        };

        let redirect_uri = self.ctx.settings().frontend.google_redirect_uri();
        let google = self.ctx.google_oauth().exchange_code(&code, &redirect_uri).await?;
        let info = self.ctx.google_oauth().user_info(&google.access_token).await?;

        let user = self.find_or_create_user(info).await?;
        let (access_token, refresh_token) = self.open_session(user.id).await?;

        info!(user_id = %user.id, "User signed in with Google");

        Ok(LoginOutcome::Authenticated(AuthSession {
            response: AuthResponse {
                user: UserResponse::from(&user),
                access_token,
                google_access_token: Some(google.access_token),
            },
            refresh_token,
            google_refresh_token: google.refresh_token,
        }))
    }

    /// Look the user up by email, creating user, profile and collection on
    /// first sign-in
    async fn find_or_create_user(&self, info: GoogleUserInfo) -> ServiceResult<User> {
        let email = normalize_email(&info.email);
        if email.is_empty() {
            return Err(ServiceError::bad_request("Google account has no email"));
        }

        if let Some(user) = self.ctx.user_repo().find_by_email(&email).await? {
            return Ok(user);
        }

        let user = User::from_google(
            self.ctx.generate_id(),
            &email,
            info.given_name,
            info.family_name,
            info.picture,
        );

        let mut username = derive_profile_username(&email);
        if self.ctx.profile_repo().username_exists(&username, None).await? {
            username = unique_username(&username, user.id);
        }

        let profile = Profile::new(self.ctx.generate_id(), user.id, username, user.image_url.clone());
        let collection = SubscriptionCollection::new(self.ctx.generate_id(), profile.id);

        match self
            .ctx
            .user_repo()
            .create_with_profile(&user, &profile, &collection)
            .await
        {
            Ok(()) => {
                info!(user_id = %user.id, profile_id = %profile.id, "User registered");
                Ok(user)
            }
            // Lost a race with a concurrent first sign-in for the same email
            Err(DomainError::EmailAlreadyExists) => self
                .ctx
                .user_repo()
                .find_by_email(&email)
                .await?
                .ok_or_else(|| ServiceError::internal("user vanished after email conflict")),
            Err(e) => Err(e.into()),
        }
    }

    /// Refresh the access token, rotating the refresh token
    #[instrument(skip(self, refresh_token))]
    pub async fn refresh(&self, refresh_token: Option<&str>) -> ServiceResult<AuthSession> {
        let refresh_token = refresh_token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ServiceError::bad_request("Refresh token is missing"))?;

        let claims = self.ctx.jwt_service().validate_refresh_token(refresh_token)?;

        let user_id = self
            .ctx
            .session_store()
            .validate(refresh_token)
            .await?
            .ok_or_else(|| {
                warn!(session_id = %claims.session_id, "Refresh token not in session store");
                ServiceError::App(AppError::InvalidToken)
            })?;

        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))?;

        self.ctx.session_store().revoke(refresh_token).await?;
        let (access_token, refresh_token) = self.open_session(user.id).await?;

        info!(user_id = %user.id, "Tokens refreshed");

        Ok(AuthSession {
            response: AuthResponse {
                user: UserResponse::from(&user),
                access_token,
                google_access_token: None,
            },
            refresh_token,
            google_refresh_token: None,
        })
    }

    /// Revoke the refresh token, if one was presented
    #[instrument(skip(self, refresh_token))]
    pub async fn logout(&self, refresh_token: Option<&str>) -> ServiceResult<()> {
        if let Some(token) = refresh_token.filter(|t| !t.is_empty()) {
            let revoked = self.ctx.session_store().revoke(token).await?;
            info!(revoked, "User logged out");
        }
        Ok(())
    }

    /// Trade the Google refresh token for a new Google access token
    #[instrument(skip(self, google_refresh_token))]
    pub async fn refresh_google_token(
        &self,
        google_refresh_token: Option<&str>,
    ) -> ServiceResult<GoogleTokenResponse> {
        let token = google_refresh_token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ServiceError::bad_request("Google refresh token is missing"))?;

        let tokens = self.ctx.google_oauth().refresh_access_token(token).await?;

        Ok(GoogleTokenResponse {
            access_token: tokens.access_token,
            expires_in: tokens.expires_in,
        })
    }

    async fn open_session(&self, user_id: Snowflake) -> ServiceResult<(String, String)> {
        let session_id = Uuid::new_v4().to_string();
        let pair = self.ctx.jwt_service().generate_token_pair(user_id, &session_id)?;
        self.ctx
            .session_store()
            .store(&pair.refresh_token, user_id, &session_id)
            .await?;
        Ok((pair.access_token, pair.refresh_token))
    }
}

/// Suffix a taken username with the user id, keeping it within bounds
fn unique_username(base: &str, user_id: Snowflake) -> String {
    let suffix = format!("-{user_id}");
    let keep = USERNAME_MAX_LEN.saturating_sub(suffix.len());
    let mut username: String = base.chars().take(keep).collect();
    username.push_str(&suffix);
    username
}
