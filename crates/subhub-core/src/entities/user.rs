//! User entity - an authenticated account

use chrono::{DateTime, Utc};

use crate::value_objects::{RegistrationMethod, Role, Snowflake};

/// Account owning exactly one profile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Snowflake,
    /// Lower-cased, unique
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub image_url: Option<String>,
    pub registration_method: RegistrationMethod,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create an account from a Google identity
    pub fn from_google(
        id: Snowflake,
        email: &str,
        first_name: Option<String>,
        last_name: Option<String>,
        image_url: Option<String>,
    ) -> Self {
        let now = Utc::now();
        let email = normalize_email(email);
        Self {
            id,
            username: email.clone(),
            email,
            first_name: first_name.unwrap_or_default(),
            last_name: last_name.unwrap_or_default(),
            image_url,
            registration_method: RegistrationMethod::Google,
            role: Role::User,
            created_at: now,
            updated_at: now,
        }
    }

    #[inline]
    pub fn is_creator(&self) -> bool {
        self.role == Role::Creator
    }

    /// "First Last", falling back to the username when both are empty
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name, self.last_name);
        let full = full.trim();
        if full.is_empty() {
            self.username.clone()
        } else {
            full.to_string()
        }
    }

    pub fn set_image_url(&mut self, image_url: Option<String>) {
        self.image_url = image_url;
        self.updated_at = Utc::now();
    }
}

/// Canonical form used for the unique email column
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
