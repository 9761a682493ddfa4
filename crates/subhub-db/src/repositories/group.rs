//! PostgreSQL implementation of GroupRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, instrument};

use subhub_core::entities::Group;
use subhub_core::error::DomainError;
use subhub_core::traits::{GroupRepository, GroupWithCount, Page, PageRequest, RepoResult};
use subhub_core::value_objects::Snowflake;

use crate::models::{GroupModel, GroupWithCountModel};

use super::error::{map_db_error, map_foreign_key_violation, map_unique_violation};

/// PostgreSQL implementation of GroupRepository
#[derive(Clone)]
pub struct PgGroupRepository {
    pool: PgPool,
}

impl PgGroupRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GroupRepository for PgGroupRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Group>> {
        let result = sqlx::query_as::<_, GroupModel>(
            r"
            SELECT id, collection_id, title, description, emoji, is_public, created_at, updated_at
            FROM subscription_groups
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Group::from))
    }

    #[instrument(skip(self))]
    async fn find_in_collection(&self, collection_id: Snowflake, group_id: Snowflake) -> RepoResult<Option<Group>> {
        let result = sqlx::query_as::<_, GroupModel>(
            r"
            SELECT id, collection_id, title, description, emoji, is_public, created_at, updated_at
            FROM subscription_groups
            WHERE id = $1 AND collection_id = $2
            ",
        )
        .bind(group_id.into_inner())
        .bind(collection_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Group::from))
    }

    #[instrument(skip(self))]
    async fn list_with_counts(&self, collection_id: Snowflake) -> RepoResult<Vec<GroupWithCount>> {
        let rows = sqlx::query_as::<_, GroupWithCountModel>(
            r"
            SELECT g.id, g.collection_id, g.title, g.description, g.emoji, g.is_public,
                   g.created_at, g.updated_at, COUNT(gs.subscription_id) AS subscription_count
            FROM subscription_groups g
            LEFT JOIN group_subscriptions gs ON gs.group_id = g.id
            WHERE g.collection_id = $1
            GROUP BY g.id
            ORDER BY g.title
            ",
        )
        .bind(collection_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(GroupWithCount::from).collect())
    }

    #[instrument(skip(self))]
    async fn count_by_collection(&self, collection_id: Snowflake) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM subscription_groups WHERE collection_id = $1")
            .bind(collection_id.into_inner())
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn count_subscriptions(&self, group_id: Snowflake, collection_id: Snowflake) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM group_subscriptions WHERE group_id = $1 AND collection_id = $2",
        )
        .bind(group_id.into_inner())
        .bind(collection_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self, group), fields(group_id = %group.id))]
    async fn create(&self, group: &Group) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO subscription_groups (id, collection_id, title, description, emoji, is_public,
                                             created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ",
        )
        .bind(group.id.into_inner())
        .bind(group.collection_id.into_inner())
        .bind(&group.title)
        .bind(&group.description)
        .bind(&group.emoji)
        .bind(group.is_public)
        .bind(group.created_at)
        .bind(group.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::GroupTitleExists))?;

        Ok(())
    }

    #[instrument(skip(self, group), fields(group_id = %group.id))]
    async fn update(&self, group: &Group) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE subscription_groups
            SET title = $3, description = $4, emoji = $5, is_public = $6, updated_at = NOW()
            WHERE id = $1 AND collection_id = $2
            ",
        )
        .bind(group.id.into_inner())
        .bind(group.collection_id.into_inner())
        .bind(&group.title)
        .bind(&group.description)
        .bind(&group.emoji)
        .bind(group.is_public)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::GroupTitleExists))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::GroupNotFound(group.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake, collection_id: Snowflake) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM subscription_groups WHERE id = $1 AND collection_id = $2")
            .bind(id.into_inner())
            .bind(collection_id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn group_of_subscription(
        &self,
        collection_id: Snowflake,
        subscription_id: Snowflake,
    ) -> RepoResult<Option<Group>> {
        let result = sqlx::query_as::<_, GroupModel>(
            r"
            SELECT g.id, g.collection_id, g.title, g.description, g.emoji, g.is_public,
                   g.created_at, g.updated_at
            FROM group_subscriptions gs
            JOIN subscription_groups g ON g.id = gs.group_id
            WHERE gs.collection_id = $1 AND gs.subscription_id = $2
            ",
        )
        .bind(collection_id.into_inner())
        .bind(subscription_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Group::from))
    }

    #[instrument(skip(self))]
    async fn assign_subscription(
        &self,
        group_id: Snowflake,
        collection_id: Snowflake,
        subscription_id: Snowflake,
    ) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let moved = sqlx::query(
            "DELETE FROM group_subscriptions WHERE collection_id = $1 AND subscription_id = $2",
        )
        .bind(collection_id.into_inner())
        .bind(subscription_id.into_inner())
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        sqlx::query(
            r"
            INSERT INTO group_subscriptions (group_id, subscription_id, collection_id)
            VALUES ($1, $2, $3)
            ",
        )
        .bind(group_id.into_inner())
        .bind(subscription_id.into_inner())
        .bind(collection_id.into_inner())
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            let unique = e.as_database_error().is_some_and(|db| db.is_unique_violation());
            if unique {
                DomainError::AlreadyInGroup
            } else {
                map_foreign_key_violation(e, || DomainError::SubscriptionNotFound(subscription_id))
            }
        })?;

        tx.commit().await.map_err(map_db_error)?;

        debug!(
            group_id = %group_id,
            subscription_id = %subscription_id,
            moved = moved.rows_affected() > 0,
            "Assigned subscription to group"
        );

        Ok(())
    }

    #[instrument(skip(self))]
    async fn remove_subscription(&self, collection_id: Snowflake, subscription_id: Snowflake) -> RepoResult<bool> {
        let result = sqlx::query(
            "DELETE FROM group_subscriptions WHERE collection_id = $1 AND subscription_id = $2",
        )
        .bind(collection_id.into_inner())
        .bind(subscription_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn list_public(&self, collection_id: Snowflake, page: PageRequest) -> RepoResult<Page<GroupWithCount>> {
        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM subscription_groups WHERE collection_id = $1 AND is_public",
        )
        .bind(collection_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        let rows = sqlx::query_as::<_, GroupWithCountModel>(
            r"
            SELECT g.id, g.collection_id, g.title, g.description, g.emoji, g.is_public,
                   g.created_at, g.updated_at, COUNT(gs.subscription_id) AS subscription_count
            FROM subscription_groups g
            LEFT JOIN group_subscriptions gs ON gs.group_id = g.id
            WHERE g.collection_id = $1 AND g.is_public
            GROUP BY g.id
            ORDER BY g.id
            LIMIT $2 OFFSET $3
            ",
        )
        .bind(collection_id.into_inner())
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(Page::new(rows.into_iter().map(GroupWithCount::from).collect(), total))
    }
}
