//! Account role and registration origin

use serde::{Deserialize, Serialize};
use std::fmt;

/// Account role. Creators may publish their profile and groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Creator,
}

impl Role {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Creator => "creator",
        }
    }

    /// Parse the stored column value; unknown values fall back to `User`
    pub fn from_db(value: &str) -> Self {
        match value {
            "creator" => Self::Creator,
            _ => Self::User,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the account was first created
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistrationMethod {
    #[default]
    Email,
    Google,
}

impl RegistrationMethod {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Google => "google",
        }
    }

    pub fn from_db(value: &str) -> Self {
        match value {
            "google" => Self::Google,
            _ => Self::Email,
        }
    }
}
