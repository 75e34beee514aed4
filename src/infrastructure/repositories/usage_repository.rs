use crate::error::AppResult;
use crate::infrastructure::db::DbPool;
use chrono::{NaiveDate, Utc};
use sqlx::FromRow;
use std::sync::Arc;
use uuid::Uuid;

/// One row per (user, calendar day)
#[derive(Debug, FromRow)]
pub struct UsageRecord {
    pub user_id: Uuid,
    pub date: NaiveDate,
    pub videos_generated: i32,
    pub total_duration: i32,
    pub api_calls: i32,
}

pub struct UsageRepository {
    pool: Arc<DbPool>,
}

impl UsageRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }

    /// Get today's usage for a user
    pub async fn get_today_usage(&self, user_id: Uuid) -> AppResult<Option<UsageRecord>> {
        let pool = self.pool.as_ref();
        let today = Utc::now().date_naive();

        let usage = sqlx::query_as::<_, UsageRecord>(
            r#"
            SELECT user_id, date, videos_generated, total_duration, api_calls
            FROM usage_stats
            WHERE user_id = $1 AND date = $2
            "#,
        )
        .bind(user_id)
        .bind(today)
        .fetch_optional(pool)
        .await?;

        Ok(usage)
    }

    /// Commit one successful generation to today's counters.
    ///
    /// A single upsert so concurrent commits for the same (user, day)
    /// cannot lose an increment.
    pub async fn increment_usage(&self, user_id: Uuid, duration_seconds: i32) -> AppResult<()> {
        let pool = self.pool.as_ref();
        let now = Utc::now();
        let today = now.date_naive();
        let id = Uuid::new_v4();

        sqlx::query(
            r#"
            INSERT INTO usage_stats (id, user_id, date, videos_generated, total_duration, api_calls, created_at, updated_at)
            VALUES ($1, $2, $3, 1, $4, 1, $5, $5)
            ON CONFLICT (user_id, date)
            DO UPDATE SET
                videos_generated = usage_stats.videos_generated + 1,
                total_duration = usage_stats.total_duration + $4,
                api_calls = usage_stats.api_calls + 1,
                updated_at = $5
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(today)
        .bind(duration_seconds)
        .bind(now)
        .execute(pool)
        .await?;

        Ok(())
    }
}
