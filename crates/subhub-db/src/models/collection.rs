//! Subscription collection database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for subscription_collections table
#[derive(Debug, Clone, FromRow)]
pub struct CollectionModel {
    pub id: i64,
    pub profile_id: i64,
    pub last_data_sync: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}
