//! Custom link shown on a profile

use chrono::{DateTime, Utc};

use crate::error::DomainError;
use crate::value_objects::Snowflake;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomUrl {
    pub id: Snowflake,
    pub profile_id: Snowflake,
    pub name: String,
    pub url: String,
    pub created_at: DateTime<Utc>,
}

impl CustomUrl {
    pub const MAX_NAME_LEN: usize = 100;
    pub const MAX_URL_LEN: usize = 255;
    pub const MAX_PER_PROFILE: i64 = 10;

    pub fn new(id: Snowflake, profile_id: Snowflake, name: &str, url: &str) -> Result<Self, DomainError> {
        let name = name.trim();
        let url = url.trim();

        if name.is_empty() || name.chars().count() > Self::MAX_NAME_LEN {
            return Err(DomainError::ValidationError(format!(
                "link name must be 1-{} characters",
                Self::MAX_NAME_LEN
            )));
        }
        if url.len() > Self::MAX_URL_LEN || !(url.starts_with("https://") || url.starts_with("http://")) {
            return Err(DomainError::ValidationError(
                "link url must be an http(s) URL of at most 255 characters".to_string(),
            ));
        }

        Ok(Self {
            id,
            profile_id,
            name: name.to_string(),
            url: url.to_string(),
            created_at: Utc::now(),
        })
    }
}
