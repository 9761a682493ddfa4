//! Google OAuth2 client

use async_trait::async_trait;
use reqwest::Client;
use tracing::instrument;

use subhub_core::traits::{GoogleOAuthApi, GoogleTokens, GoogleUserInfo, UpstreamResult};

use crate::http::{build_client, read_json, transport_error};
use crate::models::{TokenResponse, UserInfoResponse};

#[derive(Clone)]
pub struct GoogleOAuthClient {
    client: Client,
    token_url: String,
    userinfo_url: String,
    client_id: String,
    client_secret: String,
}

impl std::fmt::Debug for GoogleOAuthClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleOAuthClient")
            .field("token_url", &self.token_url)
            .field("userinfo_url", &self.userinfo_url)
            .field("client_id", &self.client_id)
            .finish_non_exhaustive()
    }
}

impl GoogleOAuthClient {
    pub fn new(token_url: &str, userinfo_url: &str, client_id: &str, client_secret: &str) -> UpstreamResult<Self> {
        Ok(Self::with_client(build_client()?, token_url, userinfo_url, client_id, client_secret))
    }

    pub fn with_client(
        client: Client,
        token_url: &str,
        userinfo_url: &str,
        client_id: &str,
        client_secret: &str,
    ) -> Self {
        Self {
            client,
            token_url: token_url.to_string(),
            userinfo_url: userinfo_url.to_string(),
            client_id: client_id.to_string(),
            client_secret: client_secret.to_string(),
        }
    }

    async fn request_token(&self, form: &[(&str, &str)]) -> UpstreamResult<GoogleTokens> {
        let response = self
            .client
            .post(&self.token_url)
            .form(form)
            .send()
            .await
            .map_err(transport_error)?;

        let tokens: TokenResponse = read_json(response, "token").await?;
        Ok(tokens.into())
    }
}

#[async_trait]
impl GoogleOAuthApi for GoogleOAuthClient {
    #[instrument(skip(self, code))]
    async fn exchange_code(&self, code: &str, redirect_uri: &str) -> UpstreamResult<GoogleTokens> {
        self.request_token(&[
            ("code", code),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("redirect_uri", redirect_uri),
            ("access_type", "offline"),
            ("grant_type", "authorization_code"),
        ])
        .await
    }

    #[instrument(skip(self, access_token))]
    async fn user_info(&self, access_token: &str) -> UpstreamResult<GoogleUserInfo> {
        let response = self
            .client
            .get(&self.userinfo_url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(transport_error)?;

        let info: UserInfoResponse = read_json(response, "userinfo").await?;
        Ok(info.into())
    }

    #[instrument(skip(self, refresh_token))]
    async fn refresh_access_token(&self, refresh_token: &str) -> UpstreamResult<GoogleTokens> {
        self.request_token(&[
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("refresh_token", refresh_token),
            ("grant_type", "refresh_token"),
        ])
        .await
    }
}
