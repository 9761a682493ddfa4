//! Share link tokens
//!
//! A share token is an HS256 JWT signed with its own secret that grants
//! anonymous read access to one group of one collection until it expires.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use subhub_core::Snowflake;

use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareClaims {
    pub group_id: Snowflake,
    pub collection_id: Snowflake,
    pub exp: i64,
}

impl ShareClaims {
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or_default()
    }
}

/// An issued token and when it stops working
#[derive(Debug, Clone)]
pub struct ShareLink {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct ShareLinkService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    lifetime: Duration,
}

impl ShareLinkService {
    #[must_use]
    pub fn new(secret: &str, expiry_days: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            lifetime: Duration::days(expiry_days),
        }
    }

    pub fn issue(&self, group_id: Snowflake, collection_id: Snowflake) -> Result<ShareLink, AppError> {
        self.issue_with_lifetime(group_id, collection_id, self.lifetime)
    }

    pub fn issue_with_lifetime(
        &self,
        group_id: Snowflake,
        collection_id: Snowflake,
        lifetime: Duration,
    ) -> Result<ShareLink, AppError> {
        let expires_at = Utc::now() + lifetime;
        let claims = ShareClaims {
            group_id,
            collection_id,
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|_| AppError::Internal(anyhow::anyhow!("Failed to encode share token")))?;

        Ok(ShareLink { token, expires_at })
    }

    /// Decode a share token; expired or tampered tokens are rejected
    pub fn validate(&self, token: &str) -> Result<ShareClaims, AppError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        decode::<ShareClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AppError::TokenExpired,
                _ => AppError::InvalidToken,
            })
    }
}

impl std::fmt::Debug for ShareLinkService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShareLinkService")
            .field("lifetime", &self.lifetime)
            .finish_non_exhaustive()
    }
}
