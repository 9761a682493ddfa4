//! Path parameter extractors
//!
//! Type-safe extraction of Snowflake IDs and usernames from path parameters.

use serde::Deserialize;
use subhub_core::Snowflake;

use crate::response::ApiError;

/// Path parameters with group_id
#[derive(Debug, Deserialize)]
pub struct GroupIdPath {
    pub group_id: String,
}

impl GroupIdPath {
    /// Parse group_id as Snowflake
    pub fn group_id(&self) -> Result<Snowflake, ApiError> {
        Snowflake::parse(&self.group_id).map_err(|_| ApiError::invalid_path("Invalid group_id format"))
    }
}

/// Path parameters with subscription_id
#[derive(Debug, Deserialize)]
pub struct SubscriptionIdPath {
    pub subscription_id: String,
}

impl SubscriptionIdPath {
    /// Parse subscription_id as Snowflake
    pub fn subscription_id(&self) -> Result<Snowflake, ApiError> {
        Snowflake::parse(&self.subscription_id)
            .map_err(|_| ApiError::invalid_path("Invalid subscription_id format"))
    }
}

/// Path parameters with link_id
#[derive(Debug, Deserialize)]
pub struct LinkIdPath {
    pub link_id: String,
}

impl LinkIdPath {
    /// Parse link_id as Snowflake
    pub fn link_id(&self) -> Result<Snowflake, ApiError> {
        Snowflake::parse(&self.link_id).map_err(|_| ApiError::invalid_path("Invalid link_id format"))
    }
}

/// Path parameters with a profile username
#[derive(Debug, Deserialize)]
pub struct UsernamePath {
    pub username: String,
}

impl UsernamePath {
    pub fn username(&self) -> &str {
        self.username.trim()
    }
}
