//! Authentication handlers
//!
//! Google sign-in, access token refresh, logout and Google token refresh.
//! Refresh tokens travel in cookies, see [`crate::cookies`].

use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::extract::cookie::CookieJar;
use subhub_service::dto::{
    AuthResponse, GoogleLoginRequest, GoogleTokenResponse, MessageResponse, RedirectResponse,
};
use subhub_service::{AuthService, LoginOutcome};

use crate::cookies::{self, GOOGLE_TOKEN_COOKIE, REFRESH_COOKIE};
use crate::response::ApiResult;
use crate::state::AppState;

/// Complete the Google OAuth flow
///
/// POST /user/auth/login/google
pub async fn login_google(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(request): Json<GoogleLoginRequest>,
) -> ApiResult<Response> {
    let service = AuthService::new(state.service_context());

    let response = match service.login_with_google(request).await? {
        LoginOutcome::Redirect { url } => Json(RedirectResponse { redirect: url }).into_response(),
        LoginOutcome::Authenticated(session) => {
            let jar = cookies::store_session(jar, session.refresh_token, session.google_refresh_token);
            (jar, Json(session.response)).into_response()
        }
    };

    Ok(response)
}

/// Refresh the access token from the `refresh` cookie, rotating the cookie
///
/// GET /user/auth/token
pub async fn refresh_token(
    State(state): State<AppState>,
    jar: CookieJar,
) -> ApiResult<(CookieJar, Json<AuthResponse>)> {
    let service = AuthService::new(state.service_context());
    let presented = cookies::read(&jar, REFRESH_COOKIE);
    let session = service.refresh(presented.as_deref()).await?;

    let jar = cookies::store_session(jar, session.refresh_token, None);
    Ok((jar, Json(session.response)))
}

/// Revoke the refresh token and clear the session cookies
///
/// DELETE /user/auth/token
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> ApiResult<(CookieJar, Json<MessageResponse>)> {
    let service = AuthService::new(state.service_context());
    let presented = cookies::read(&jar, REFRESH_COOKIE);
    service.logout(presented.as_deref()).await?;

    Ok((cookies::clear_session(jar), Json(MessageResponse::new("Logout successful"))))
}

/// Trade the `google_token` cookie for a fresh Google access token
///
/// GET /user/auth/google/token
pub async fn google_token(
    State(state): State<AppState>,
    jar: CookieJar,
) -> ApiResult<Json<GoogleTokenResponse>> {
    let service = AuthService::new(state.service_context());
    let presented = cookies::read(&jar, GOOGLE_TOKEN_COOKIE);
    let response = service.refresh_google_token(presented.as_deref()).await?;
    Ok(Json(response))
}
