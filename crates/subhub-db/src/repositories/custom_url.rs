//! PostgreSQL implementation of CustomUrlRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use subhub_core::entities::CustomUrl;
use subhub_core::traits::{CustomUrlRepository, RepoResult};
use subhub_core::value_objects::Snowflake;

use crate::models::CustomUrlModel;

use super::error::map_db_error;

#[derive(Clone)]
pub struct PgCustomUrlRepository {
    pool: PgPool,
}

impl PgCustomUrlRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CustomUrlRepository for PgCustomUrlRepository {
    #[instrument(skip(self))]
    async fn find_by_profile(&self, profile_id: Snowflake) -> RepoResult<Vec<CustomUrl>> {
        let rows = sqlx::query_as::<_, CustomUrlModel>(
            r"
            SELECT id, profile_id, name, url, created_at
            FROM custom_urls
            WHERE profile_id = $1
            ORDER BY id
            ",
        )
        .bind(profile_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(CustomUrl::from).collect())
    }

    #[instrument(skip(self))]
    async fn count_by_profile(&self, profile_id: Snowflake) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM custom_urls WHERE profile_id = $1")
            .bind(profile_id.into_inner())
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip(self, link), fields(link_id = %link.id))]
    async fn create(&self, link: &CustomUrl) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO custom_urls (id, profile_id, name, url, created_at)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(link.id.into_inner())
        .bind(link.profile_id.into_inner())
        .bind(&link.name)
        .bind(&link.url)
        .bind(link.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake, profile_id: Snowflake) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM custom_urls WHERE id = $1 AND profile_id = $2")
            .bind(id.into_inner())
            .bind(profile_id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }
}
