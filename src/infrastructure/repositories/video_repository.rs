use crate::infrastructure::db::DbPool;
use crate::{
    domain::video::{Video, VideoStatus},
    error::AppResult,
};
use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;
use std::sync::Arc;
use uuid::Uuid;

/// Fields for a freshly admitted video row
#[derive(Debug, Clone)]
pub struct NewVideo {
    pub title: String,
    pub description: Option<String>,
    pub prompt: String,
    pub style: String,
    pub duration: i32,
    pub metadata: JsonValue,
}

pub struct VideoRepository {
    pool: Arc<DbPool>,
}

impl VideoRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }

    /// Create a video row with status PROCESSING
    pub async fn create(&self, user_id: Uuid, video: NewVideo) -> AppResult<Video> {
        let pool = self.pool.as_ref();
        let id = Uuid::new_v4();
        let now = Utc::now();

        let video = sqlx::query_as::<_, Video>(
            r#"
            INSERT INTO videos (
                id, user_id, title, description, prompt, style, duration,
                status, video_url, thumbnail_url, metadata, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, 'PROCESSING', NULL, NULL, $8, $9, $9)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(&video.title)
        .bind(&video.description)
        .bind(&video.prompt)
        .bind(&video.style)
        .bind(video.duration)
        .bind(&video.metadata)
        .bind(now)
        .fetch_one(pool)
        .await?;

        Ok(video)
    }

    /// Record the provider's response on the row
    pub async fn set_provider_result(
        &self,
        video_id: Uuid,
        status: VideoStatus,
        video_url: Option<&str>,
        thumbnail_url: Option<&str>,
    ) -> AppResult<()> {
        let pool = self.pool.as_ref();
        let now = Utc::now();

        sqlx::query(
            r#"
            UPDATE videos
            SET status = $1, video_url = $2, thumbnail_url = $3, updated_at = $4
            WHERE id = $5
            "#,
        )
        .bind(status)
        .bind(video_url)
        .bind(thumbnail_url)
        .bind(now)
        .bind(video_id)
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Mark a row FAILED after a provider error
    pub async fn mark_failed(&self, video_id: Uuid) -> AppResult<()> {
        let pool = self.pool.as_ref();
        let now = Utc::now();

        sqlx::query("UPDATE videos SET status = 'FAILED', updated_at = $1 WHERE id = $2")
            .bind(now)
            .bind(video_id)
            .execute(pool)
            .await?;

        Ok(())
    }

    /// Count a user's videos created since the given instant, excluding
    /// FAILED rows. Failed attempts are never billed, so they must not
    /// consume quota either.
    pub async fn count_billable_since(
        &self,
        user_id: Uuid,
        since: DateTime<Utc>,
    ) -> AppResult<i64> {
        let pool = self.pool.as_ref();
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM videos
            WHERE user_id = $1 AND created_at >= $2 AND status != 'FAILED'
            "#,
        )
        .bind(user_id)
        .bind(since)
        .fetch_one(pool)
        .await?;

        Ok(count)
    }

    /// One page of a user's videos, newest first, optionally filtered by status
    pub async fn find_page(
        &self,
        user_id: Uuid,
        status: Option<VideoStatus>,
        limit: i64,
        offset: i64,
    ) -> AppResult<Vec<Video>> {
        let pool = self.pool.as_ref();
        let status = status.map(|s| s.to_string());

        let videos = sqlx::query_as::<_, Video>(
            r#"
            SELECT *
            FROM videos
            WHERE user_id = $1 AND ($2::text IS NULL OR status = $2)
            ORDER BY created_at DESC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(user_id)
        .bind(status)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;

        Ok(videos)
    }

    /// Total matching rows for the same filter as `find_page`
    pub async fn count_by_user(
        &self,
        user_id: Uuid,
        status: Option<VideoStatus>,
    ) -> AppResult<i64> {
        let pool = self.pool.as_ref();
        let status = status.map(|s| s.to_string());

        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM videos
            WHERE user_id = $1 AND ($2::text IS NULL OR status = $2)
            "#,
        )
        .bind(user_id)
        .bind(status)
        .fetch_one(pool)
        .await?;

        Ok(count)
    }
}
