//! PostgreSQL implementation of ProfileRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use subhub_core::entities::Profile;
use subhub_core::error::DomainError;
use subhub_core::traits::{Page, PageRequest, ProfileRepository, RepoResult};
use subhub_core::value_objects::Snowflake;

use crate::models::ProfileModel;

use super::error::{contains_pattern, map_db_error, map_unique_violation};

/// PostgreSQL implementation of ProfileRepository
#[derive(Clone)]
pub struct PgProfileRepository {
    pool: PgPool,
}

impl PgProfileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileRepository for PgProfileRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Profile>> {
        let result = sqlx::query_as::<_, ProfileModel>(
            r"
            SELECT id, user_id, username, image_url, description, is_public,
                   youtube_url, twitter_url, instagram_url, tiktok_url, created_at, updated_at
            FROM profiles
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Profile::from))
    }

    #[instrument(skip(self))]
    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Option<Profile>> {
        let result = sqlx::query_as::<_, ProfileModel>(
            r"
            SELECT id, user_id, username, image_url, description, is_public,
                   youtube_url, twitter_url, instagram_url, tiktok_url, created_at, updated_at
            FROM profiles
            WHERE user_id = $1
            ",
        )
        .bind(user_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Profile::from))
    }

    #[instrument(skip(self))]
    async fn find_by_username(&self, username: &str) -> RepoResult<Option<Profile>> {
        let result = sqlx::query_as::<_, ProfileModel>(
            r"
            SELECT id, user_id, username, image_url, description, is_public,
                   youtube_url, twitter_url, instagram_url, tiktok_url, created_at, updated_at
            FROM profiles
            WHERE LOWER(username) = LOWER($1)
            ",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Profile::from))
    }

    #[instrument(skip(self))]
    async fn username_exists(&self, username: &str, exclude: Option<Snowflake>) -> RepoResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS(
                SELECT 1 FROM profiles
                WHERE LOWER(username) = LOWER($1) AND ($2::BIGINT IS NULL OR id <> $2)
            )
            ",
        )
        .bind(username)
        .bind(exclude.map(Snowflake::into_inner))
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(exists)
    }

    #[instrument(skip(self, profile), fields(profile_id = %profile.id))]
    async fn update(&self, profile: &Profile) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE profiles
            SET username = $2, image_url = $3, description = $4, is_public = $5,
                youtube_url = $6, twitter_url = $7, instagram_url = $8, tiktok_url = $9,
                updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(profile.id.into_inner())
        .bind(&profile.username)
        .bind(&profile.image_url)
        .bind(&profile.description)
        .bind(profile.is_public)
        .bind(&profile.social.youtube_url)
        .bind(&profile.social.twitter_url)
        .bind(&profile.social.instagram_url)
        .bind(&profile.social.tiktok_url)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::UsernameTaken))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::ProfileNotFound(profile.username.clone()));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_public_creators(
        &self,
        search: Option<&str>,
        page: PageRequest,
    ) -> RepoResult<Page<Profile>> {
        let pattern = search.map(contains_pattern);

        let total = sqlx::query_scalar::<_, i64>(
            r"
            SELECT COUNT(*)
            FROM profiles p
            JOIN users u ON u.id = p.user_id
            WHERE p.is_public AND u.role = 'creator'
              AND ($1::TEXT IS NULL OR p.username ILIKE $1 ESCAPE '\')
            ",
        )
        .bind(&pattern)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        let rows = sqlx::query_as::<_, ProfileModel>(
            r"
            SELECT p.id, p.user_id, p.username, p.image_url, p.description, p.is_public,
                   p.youtube_url, p.twitter_url, p.instagram_url, p.tiktok_url,
                   p.created_at, p.updated_at
            FROM profiles p
            JOIN users u ON u.id = p.user_id
            WHERE p.is_public AND u.role = 'creator'
              AND ($1::TEXT IS NULL OR p.username ILIKE $1 ESCAPE '\')
            ORDER BY LOWER(p.username), p.id
            LIMIT $2 OFFSET $3
            ",
        )
        .bind(&pattern)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(Page::new(rows.into_iter().map(Profile::from).collect(), total))
    }
}
