//! Group database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for subscription_groups table
#[derive(Debug, Clone, FromRow)]
pub struct GroupModel {
    pub id: i64,
    pub collection_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub emoji: Option<String>,
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Group row joined with its membership count
#[derive(Debug, Clone, FromRow)]
pub struct GroupWithCountModel {
    #[sqlx(flatten)]
    pub group: GroupModel,
    pub subscription_count: i64,
}
