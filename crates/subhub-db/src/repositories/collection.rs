//! PostgreSQL implementation of CollectionRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::{debug, instrument};

use subhub_core::entities::{Subscription, SubscriptionCollection};
use subhub_core::error::DomainError;
use subhub_core::traits::{CollectionRepository, RepoResult};
use subhub_core::value_objects::Snowflake;

use crate::models::CollectionModel;

use super::error::map_db_error;

/// PostgreSQL implementation of CollectionRepository
#[derive(Clone)]
pub struct PgCollectionRepository {
    pool: PgPool,
}

impl PgCollectionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CollectionRepository for PgCollectionRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<SubscriptionCollection>> {
        let result = sqlx::query_as::<_, CollectionModel>(
            r"
            SELECT id, profile_id, last_data_sync, created_at
            FROM subscription_collections
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(SubscriptionCollection::from))
    }

    #[instrument(skip(self))]
    async fn find_by_profile(&self, profile_id: Snowflake) -> RepoResult<Option<SubscriptionCollection>> {
        let result = sqlx::query_as::<_, CollectionModel>(
            r"
            SELECT id, profile_id, last_data_sync, created_at
            FROM subscription_collections
            WHERE profile_id = $1
            ",
        )
        .bind(profile_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(SubscriptionCollection::from))
    }

    #[instrument(skip(self, candidate), fields(profile_id = %candidate.profile_id))]
    async fn get_or_create(
        &self,
        candidate: &SubscriptionCollection,
    ) -> RepoResult<(SubscriptionCollection, bool)> {
        let inserted = sqlx::query_as::<_, CollectionModel>(
            r"
            INSERT INTO subscription_collections (id, profile_id, last_data_sync, created_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (profile_id) DO NOTHING
            RETURNING id, profile_id, last_data_sync, created_at
            ",
        )
        .bind(candidate.id.into_inner())
        .bind(candidate.profile_id.into_inner())
        .bind(candidate.last_data_sync)
        .bind(candidate.created_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        if let Some(model) = inserted {
            debug!(collection_id = model.id, "Created subscription collection");
            return Ok((SubscriptionCollection::from(model), true));
        }

        let existing = self
            .find_by_profile(candidate.profile_id)
            .await?
            .ok_or(DomainError::CollectionNotFound)?;

        Ok((existing, false))
    }

    #[instrument(skip(self))]
    async fn subscription_channel_ids(&self, collection_id: Snowflake) -> RepoResult<Vec<String>> {
        sqlx::query_scalar::<_, String>(
            r"
            SELECT s.channel_id
            FROM collection_subscriptions cs
            JOIN subscriptions s ON s.id = cs.subscription_id
            WHERE cs.collection_id = $1
            ",
        )
        .bind(collection_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn subscription_count(&self, collection_id: Snowflake) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM collection_subscriptions WHERE collection_id = $1",
        )
        .bind(collection_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self, subscriptions, detach), fields(upserts = subscriptions.len(), detaches = detach.len()))]
    async fn apply_sync(
        &self,
        collection_id: Snowflake,
        subscriptions: &[Subscription],
        detach: &[String],
        synced_at: DateTime<Utc>,
    ) -> RepoResult<i64> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        if !subscriptions.is_empty() {
            let ids: Vec<i64> = subscriptions.iter().map(|s| s.id.into_inner()).collect();
            let channel_ids: Vec<&str> = subscriptions.iter().map(|s| s.channel_id.as_str()).collect();
            let titles: Vec<&str> = subscriptions.iter().map(|s| s.title.as_str()).collect();
            let descriptions: Vec<&str> = subscriptions.iter().map(|s| s.description.as_str()).collect();
            let images: Vec<Option<&str>> = subscriptions.iter().map(|s| s.image_url.as_deref()).collect();

            // Existing channels keep their id; the returned ids are what gets attached
            let attached: Vec<i64> = sqlx::query_scalar(
                r"
                INSERT INTO subscriptions (id, channel_id, title, description, image_url, created_at, updated_at)
                SELECT id, channel_id, title, description, image_url, $6, $6
                FROM UNNEST($1::BIGINT[], $2::TEXT[], $3::TEXT[], $4::TEXT[], $5::TEXT[])
                    AS t(id, channel_id, title, description, image_url)
                ON CONFLICT (channel_id) DO UPDATE
                SET title = EXCLUDED.title,
                    description = EXCLUDED.description,
                    image_url = EXCLUDED.image_url,
                    updated_at = EXCLUDED.updated_at
                RETURNING id
                ",
            )
            .bind(&ids)
            .bind(&channel_ids)
            .bind(&titles)
            .bind(&descriptions)
            .bind(&images)
            .bind(synced_at)
            .fetch_all(&mut *tx)
            .await
            .map_err(map_db_error)?;

            sqlx::query(
                r"
                INSERT INTO collection_subscriptions (collection_id, subscription_id)
                SELECT $1, UNNEST($2::BIGINT[])
                ON CONFLICT DO NOTHING
                ",
            )
            .bind(collection_id.into_inner())
            .bind(&attached)
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;
        }

        if !detach.is_empty() {
            // Group membership rows cascade from collection_subscriptions
            sqlx::query(
                r"
                DELETE FROM collection_subscriptions cs
                USING subscriptions s
                WHERE cs.subscription_id = s.id
                  AND cs.collection_id = $1
                  AND s.channel_id = ANY($2)
                ",
            )
            .bind(collection_id.into_inner())
            .bind(detach)
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;
        }

        let updated = sqlx::query("UPDATE subscription_collections SET last_data_sync = $2 WHERE id = $1")
            .bind(collection_id.into_inner())
            .bind(synced_at)
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        if updated.rows_affected() == 0 {
            return Err(DomainError::CollectionNotFound);
        }

        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM collection_subscriptions WHERE collection_id = $1",
        )
        .bind(collection_id.into_inner())
        .fetch_one(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(count)
    }
}
