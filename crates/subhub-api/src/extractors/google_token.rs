//! Google access token extractor
//!
//! The YouTube endpoints act on behalf of the caller with the Google access
//! token the frontend holds, sent in the `X-Google-Token` header.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use crate::response::ApiError;

pub const GOOGLE_TOKEN_HEADER: &str = "x-google-token";

/// Google access token taken from the `X-Google-Token` header
#[derive(Debug, Clone)]
pub struct GoogleToken(pub String);

impl GoogleToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for GoogleToken
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get(GOOGLE_TOKEN_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(|token| GoogleToken(token.to_string()))
            .ok_or_else(|| ApiError::bad_request("X-Google-Token header is missing"))
    }
}
