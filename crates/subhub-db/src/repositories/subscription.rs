//! PostgreSQL implementation of SubscriptionRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::instrument;

use subhub_core::entities::{Subscription, Upload};
use subhub_core::traits::{
    GroupFilter, Page, RepoResult, SubscriptionListItem, SubscriptionOrdering, SubscriptionQuery,
    SubscriptionRepository,
};
use subhub_core::value_objects::Snowflake;

use crate::models::{SubscriptionListRowModel, SubscriptionModel};

use super::error::{contains_pattern, map_db_error};

/// Joins shared by the list and count queries. `gs` is restricted to the
/// listed collection so other users' groups never leak in.
const LIST_FROM: &str = r"
    FROM collection_subscriptions cs
    JOIN subscriptions s ON s.id = cs.subscription_id
    LEFT JOIN group_subscriptions gs
        ON gs.subscription_id = s.id AND gs.collection_id = cs.collection_id
    LEFT JOIN subscription_groups g ON g.id = gs.group_id
    LEFT JOIN uploads u ON u.subscription_id = s.id
";

/// PostgreSQL implementation of SubscriptionRepository
#[derive(Clone)]
pub struct PgSubscriptionRepository {
    pool: PgPool,
}

impl PgSubscriptionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Append the WHERE clause for a list query
fn push_filters(builder: &mut QueryBuilder<'_, Postgres>, collection_id: Snowflake, query: &SubscriptionQuery) {
    builder.push(" WHERE cs.collection_id = ");
    builder.push_bind(collection_id.into_inner());

    if let Some(search) = query.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        builder.push(" AND s.title ILIKE ");
        builder.push_bind(contains_pattern(search));
        builder.push(r" ESCAPE '\'");
    }

    match query.group {
        GroupFilter::All => {}
        GroupFilter::Ungrouped => {
            builder.push(" AND gs.group_id IS NULL");
        }
        GroupFilter::Group(group_id) => {
            builder.push(" AND gs.group_id = ");
            builder.push_bind(group_id.into_inner());
        }
    }
}

fn order_clause(ordering: SubscriptionOrdering) -> &'static str {
    match ordering {
        SubscriptionOrdering::Id => " ORDER BY s.id",
        SubscriptionOrdering::TitleAsc => " ORDER BY s.title ASC, s.id",
        SubscriptionOrdering::TitleDesc => " ORDER BY s.title DESC, s.id",
    }
}

#[async_trait]
impl SubscriptionRepository for PgSubscriptionRepository {
    #[instrument(skip(self))]
    async fn find_in_collection(
        &self,
        collection_id: Snowflake,
        subscription_id: Snowflake,
    ) -> RepoResult<Option<Subscription>> {
        let result = sqlx::query_as::<_, SubscriptionModel>(
            r"
            SELECT s.id, s.channel_id, s.title, s.description, s.image_url, s.created_at, s.updated_at
            FROM collection_subscriptions cs
            JOIN subscriptions s ON s.id = cs.subscription_id
            WHERE cs.collection_id = $1 AND cs.subscription_id = $2
            ",
        )
        .bind(collection_id.into_inner())
        .bind(subscription_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Subscription::from))
    }

    #[instrument(skip(self))]
    async fn list_for_collection(
        &self,
        collection_id: Snowflake,
        query: &SubscriptionQuery,
    ) -> RepoResult<Page<SubscriptionListItem>> {
        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*)");
        count.push(LIST_FROM);
        push_filters(&mut count, collection_id, query);

        let total = count
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)?;

        let mut select = QueryBuilder::<Postgres>::new(
            r"
            SELECT s.id, s.channel_id, s.title, s.description, s.image_url, s.created_at, s.updated_at,
                   g.id AS group_id, g.title AS group_title, g.emoji AS group_emoji,
                   u.title AS upload_title, u.video_url AS upload_video_url,
                   u.video_image_url AS upload_video_image_url, u.upload_time,
                   u.last_sync AS upload_last_sync
            ",
        );
        select.push(LIST_FROM);
        push_filters(&mut select, collection_id, query);
        select.push(order_clause(query.ordering));
        select.push(" LIMIT ");
        select.push_bind(query.page.limit());
        select.push(" OFFSET ");
        select.push_bind(query.page.offset());

        let rows = select
            .build_query_as::<SubscriptionListRowModel>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(Page::new(rows.into_iter().map(SubscriptionListItem::from).collect(), total))
    }

    #[instrument(skip(self))]
    async fn list_in_group(&self, group_id: Snowflake, collection_id: Snowflake) -> RepoResult<Vec<Subscription>> {
        let rows = sqlx::query_as::<_, SubscriptionModel>(
            r"
            SELECT s.id, s.channel_id, s.title, s.description, s.image_url, s.created_at, s.updated_at
            FROM group_subscriptions gs
            JOIN subscriptions s ON s.id = gs.subscription_id
            WHERE gs.group_id = $1 AND gs.collection_id = $2
            ORDER BY s.id
            ",
        )
        .bind(group_id.into_inner())
        .bind(collection_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(Subscription::from).collect())
    }

    #[instrument(skip(self))]
    async fn first_in_group(&self, group_id: Snowflake, limit: i64) -> RepoResult<Vec<Subscription>> {
        let rows = sqlx::query_as::<_, SubscriptionModel>(
            r"
            SELECT s.id, s.channel_id, s.title, s.description, s.image_url, s.created_at, s.updated_at
            FROM group_subscriptions gs
            JOIN subscriptions s ON s.id = gs.subscription_id
            WHERE gs.group_id = $1
            ORDER BY s.id
            LIMIT $2
            ",
        )
        .bind(group_id.into_inner())
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(Subscription::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_stale_for_enrichment(
        &self,
        collection_id: Snowflake,
        older_than: DateTime<Utc>,
        limit: i64,
    ) -> RepoResult<Vec<Subscription>> {
        let rows = sqlx::query_as::<_, SubscriptionModel>(
            r"
            SELECT s.id, s.channel_id, s.title, s.description, s.image_url, s.created_at, s.updated_at
            FROM collection_subscriptions cs
            JOIN subscriptions s ON s.id = cs.subscription_id
            LEFT JOIN uploads u ON u.subscription_id = s.id
            WHERE cs.collection_id = $1
              AND (u.subscription_id IS NULL OR u.last_sync < $2)
            ORDER BY u.last_sync NULLS FIRST, s.id
            LIMIT $3
            ",
        )
        .bind(collection_id.into_inner())
        .bind(older_than)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(Subscription::from).collect())
    }

    #[instrument(skip(self, upload), fields(subscription_id = %upload.subscription_id))]
    async fn upsert_upload(&self, upload: &Upload) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO uploads (subscription_id, title, video_url, video_image_url, upload_time, last_sync)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (subscription_id) DO UPDATE
            SET title = EXCLUDED.title,
                video_url = EXCLUDED.video_url,
                video_image_url = EXCLUDED.video_image_url,
                upload_time = EXCLUDED.upload_time,
                last_sync = EXCLUDED.last_sync
            ",
        )
        .bind(upload.subscription_id.into_inner())
        .bind(&upload.title)
        .bind(&upload.video_url)
        .bind(&upload.video_image_url)
        .bind(upload.upload_time)
        .bind(upload.last_sync)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }
}
