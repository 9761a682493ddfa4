//! Test helpers for integration tests
//!
//! Provides utilities for spawning test servers, making HTTP requests and
//! carrying the session cookies between them.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Result;
use reqwest::{header, Client, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use subhub_api::{create_app, create_app_state};
use subhub_common::{
    AppConfig, AppSettings, CorsConfig, DatabaseConfig, Environment, FrontendConfig, GoogleConfig,
    JwtConfig, RateLimitConfig, RedisConfig, ServerConfig, ShareLinkConfig, SnowflakeConfig,
    SyncConfig,
};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::fixtures::{unique_suffix, AuthResponse};
use crate::mock_google::{MockGoogle, MOCK_GOOGLE_ACCESS_TOKEN};

pub const FRONTEND_URL: &str = "http://localhost:3000";

/// A signed-in user: access token plus the cookies the server set
#[derive(Debug, Clone)]
pub struct Session {
    pub auth: AuthResponse,
    pub refresh_cookie: String,
    pub google_cookie: Option<String>,
}

impl Session {
    pub fn access_token(&self) -> &str {
        &self.auth.access_token
    }
}

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    pub google: MockGoogle,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a server backed by a mock Google account with a fresh email
    pub async fn start() -> Result<Self> {
        let suffix = unique_suffix();
        let google = MockGoogle::start(&format!("viewer{suffix}.{}@example.com", std::process::id())).await?;
        let config = test_config(&google, suffix)?;
        Self::start_with_config(config, google).await
    }

    pub async fn start_with_config(config: AppConfig, google: MockGoogle) -> Result<Self> {
        let state = create_app_state(config).await?;
        let app = create_app(state);

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        // Wait for server to be ready
        tokio::time::sleep(Duration::from_millis(100)).await;

        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;

        Ok(Self {
            addr,
            client,
            google,
            _handle: handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url(), path)
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> Result<Response> {
        Ok(self.client.get(self.url(path)).send().await?)
    }

    /// Make a GET request with auth token
    pub async fn get_auth(&self, path: &str, token: &str) -> Result<Response> {
        Ok(self.client.get(self.url(path)).bearer_auth(token).send().await?)
    }

    /// Make a GET request with auth token and the mock Google access token
    pub async fn get_youtube(&self, path: &str, token: &str) -> Result<Response> {
        Ok(self
            .client
            .get(self.url(path))
            .bearer_auth(token)
            .header("X-Google-Token", MOCK_GOOGLE_ACCESS_TOKEN)
            .send()
            .await?)
    }

    /// Make a POST request with JSON body
    pub async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        Ok(self.client.post(self.url(path)).json(body).send().await?)
    }

    /// Make a POST request with auth token
    pub async fn post_auth<T: Serialize>(&self, path: &str, token: &str, body: &T) -> Result<Response> {
        Ok(self.client.post(self.url(path)).bearer_auth(token).json(body).send().await?)
    }

    /// Make a PATCH request with auth token
    pub async fn patch_auth<T: Serialize>(&self, path: &str, token: &str, body: &T) -> Result<Response> {
        Ok(self.client.patch(self.url(path)).bearer_auth(token).json(body).send().await?)
    }

    /// Make a DELETE request with auth token
    pub async fn delete_auth(&self, path: &str, token: &str) -> Result<Response> {
        Ok(self.client.delete(self.url(path)).bearer_auth(token).send().await?)
    }

    /// Send `request` with a `Cookie` header
    pub async fn with_cookie(&self, request: RequestBuilder, name: &str, value: &str) -> Result<Response> {
        Ok(request.header(header::COOKIE, format!("{name}={value}")).send().await?)
    }

    pub fn get_builder(&self, path: &str) -> RequestBuilder {
        self.client.get(self.url(path))
    }

    pub fn delete_builder(&self, path: &str) -> RequestBuilder {
        self.client.delete(self.url(path))
    }

    /// Sign in through the Google callback against the mock
    pub async fn login(&self) -> Result<Session> {
        let response = self
            .post(
                "/api/v1/user/auth/login/google",
                &serde_json::json!({ "code": "mock-authorization-code" }),
            )
            .await?;

        let refresh_cookie = cookie_value(&response, "refresh")
            .ok_or_else(|| anyhow::anyhow!("refresh cookie missing"))?;
        let google_cookie = cookie_value(&response, "google_token");
        let auth: AuthResponse = assert_json(response, StatusCode::OK).await?;

        Ok(Session {
            auth,
            refresh_cookie,
            google_cookie,
        })
    }
}

/// Value of a cookie set by `response`; removal cookies yield an empty string
pub fn cookie_value(response: &Response, name: &str) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .filter_map(|cookie| cookie.split(';').next())
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| key.trim() == name)
        .map(|(_, value)| value.trim().to_string())
}

/// Configuration pointing at the test databases and the mock Google server
pub fn test_config(google: &MockGoogle, suffix: u64) -> Result<AppConfig> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("DATABASE_URL")?;
    let redis_url = std::env::var("REDIS_URL")?;
    let worker_id = u16::try_from(suffix % 1024)?;

    Ok(AppConfig {
        app: AppSettings {
            name: "subhub-test".to_string(),
            env: Environment::Development,
        },
        api: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        database: DatabaseConfig {
            url: database_url,
            max_connections: 5,
            min_connections: 1,
        },
        redis: RedisConfig {
            url: redis_url,
            max_connections: 5,
        },
        jwt: JwtConfig {
            secret: "integration-test-jwt-secret".to_string(),
            access_token_expiry: 1800,
            refresh_token_expiry: 2_592_000,
        },
        google: GoogleConfig {
            client_id: "mock-client-id".to_string(),
            client_secret: "mock-client-secret".to_string(),
            api_key: "mock-api-key".to_string(),
            youtube_api_base_url: format!("{}/youtube/v3", google.base_url()),
            token_url: format!("{}/token", google.base_url()),
            userinfo_url: format!("{}/userinfo", google.base_url()),
        },
        share_link: ShareLinkConfig {
            secret: "integration-test-share-secret".to_string(),
            expiry_days: 1,
        },
        frontend: FrontendConfig {
            base_url: FRONTEND_URL.to_string(),
        },
        sync: SyncConfig {
            interval_days: 7,
            max_groups_per_collection: 15,
        },
        rate_limit: RateLimitConfig {
            requests_per_second: 1000,
            burst: 1000,
        },
        cors: CorsConfig {
            allowed_origins: vec![FRONTEND_URL.to_string()],
        },
        snowflake: SnowflakeConfig { worker_id },
    })
}

/// Helper to check if test environment is available
pub async fn check_test_env() -> bool {
    dotenvy::dotenv().ok();

    if std::env::var("DATABASE_URL").is_err() {
        eprintln!("Skipping test: DATABASE_URL not set");
        return false;
    }

    if std::env::var("REDIS_URL").is_err() {
        eprintln!("Skipping test: REDIS_URL not set");
        return false;
    }

    true
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(response: Response, expected_status: StatusCode) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {}, got {}. Body: {}", expected_status, status, body);
    }
    Ok(response.json().await?)
}

/// Assert response status without parsing body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {}, got {}. Body: {}", expected_status, status, body);
    }
    Ok(())
}

/// Assert an error response and return its message
pub async fn assert_error(response: Response, expected_status: StatusCode) -> Result<String> {
    let body: serde_json::Value = assert_json(response, expected_status).await?;
    body["error"]["message"]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| anyhow::anyhow!("error body without message: {body}"))
}
