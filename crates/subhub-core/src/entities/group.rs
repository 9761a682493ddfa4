//! Group entity - a named bucket of subscriptions inside one collection

use chrono::{DateTime, Utc};

use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// User-defined group. `(title, collection_id)` is unique.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub id: Snowflake,
    pub collection_id: Snowflake,
    pub title: String,
    pub description: Option<String>,
    pub emoji: Option<String>,
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Group {
    /// Default upper bound on groups per collection
    pub const MAX_PER_COLLECTION: i64 = 15;
    pub const MAX_TITLE_LEN: usize = 100;
    pub const MAX_DESCRIPTION_LEN: usize = 255;

    pub fn new(id: Snowflake, collection_id: Snowflake, title: &str) -> Result<Self, DomainError> {
        let title = Self::validate_title(title)?;
        let now = Utc::now();
        Ok(Self {
            id,
            collection_id,
            title,
            description: None,
            emoji: None,
            is_public: false,
            created_at: now,
            updated_at: now,
        })
    }

    #[inline]
    pub fn belongs_to(&self, collection_id: Snowflake) -> bool {
        self.collection_id == collection_id
    }

    pub fn set_title(&mut self, title: &str) -> Result<(), DomainError> {
        self.title = Self::validate_title(title)?;
        self.updated_at = Utc::now();
        Ok(())
    }

    pub fn set_description(&mut self, description: Option<String>) -> Result<(), DomainError> {
        if let Some(text) = &description {
            if text.chars().count() > Self::MAX_DESCRIPTION_LEN {
                return Err(DomainError::ValidationError(format!(
                    "description must be at most {} characters",
                    Self::MAX_DESCRIPTION_LEN
                )));
            }
        }
        self.description = description.filter(|d| !d.trim().is_empty());
        self.updated_at = Utc::now();
        Ok(())
    }

    pub fn set_emoji(&mut self, emoji: Option<String>) {
        self.emoji = emoji.filter(|e| !e.trim().is_empty());
        self.updated_at = Utc::now();
    }

    pub fn set_public(&mut self, is_public: bool) {
        self.is_public = is_public;
        self.updated_at = Utc::now();
    }

    fn validate_title(title: &str) -> Result<String, DomainError> {
        let title = title.trim();
        if title.is_empty() || title.chars().count() > Self::MAX_TITLE_LEN {
            return Err(DomainError::ValidationError(format!(
                "title must be 1-{} characters",
                Self::MAX_TITLE_LEN
            )));
        }
        Ok(title.to_string())
    }
}
