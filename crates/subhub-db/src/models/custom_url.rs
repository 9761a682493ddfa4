//! Custom URL database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct CustomUrlModel {
    pub id: i64,
    pub profile_id: i64,
    pub name: String,
    pub url: String,
    pub created_at: DateTime<Utc>,
}
