//! Profile entity - the public face of a user

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Minimum and maximum profile username length
pub const USERNAME_MIN_LEN: usize = 3;
pub const USERNAME_MAX_LEN: usize = 100;

/// Fixed social network links shown on a public profile
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLinks {
    pub youtube_url: Option<String>,
    pub twitter_url: Option<String>,
    pub instagram_url: Option<String>,
    pub tiktok_url: Option<String>,
}

/// Profile owned 1:1 by a user; its username is unique ignoring case
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub id: Snowflake,
    pub user_id: Snowflake,
    pub username: String,
    pub image_url: Option<String>,
    pub description: Option<String>,
    pub is_public: bool,
    pub social: SocialLinks,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    pub fn new(id: Snowflake, user_id: Snowflake, username: String, image_url: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id,
            user_id,
            username,
            image_url,
            description: None,
            is_public: false,
            social: SocialLinks::default(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Change the username after validating its shape
    pub fn rename(&mut self, username: &str) -> Result<(), DomainError> {
        validate_username(username)?;
        self.username = username.to_string();
        self.updated_at = Utc::now();
        Ok(())
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Validate a profile username: 3-100 chars of `[A-Za-z0-9_.-]`
pub fn validate_username(username: &str) -> Result<(), DomainError> {
    let len = username.chars().count();
    if !(USERNAME_MIN_LEN..=USERNAME_MAX_LEN).contains(&len) {
        return Err(DomainError::InvalidUsername(format!(
            "must be {USERNAME_MIN_LEN}-{USERNAME_MAX_LEN} characters"
        )));
    }
    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
    {
        return Err(DomainError::InvalidUsername(
            "only letters, digits, '_', '.' and '-' are allowed".to_string(),
        ));
    }
    Ok(())
}

/// Derive the initial profile username from an email address
///
/// Uses the lower-cased local part with unsupported characters stripped,
/// padded to the minimum length.
pub fn derive_profile_username(email: &str) -> String {
    let local = email.split('@').next().unwrap_or_default();
    let mut username: String = local
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        .take(USERNAME_MAX_LEN)
        .collect();
    while username.chars().count() < USERNAME_MIN_LEN {
        username.push('_');
    }
    username
}
