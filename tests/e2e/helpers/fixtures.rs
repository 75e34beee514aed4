use anyhow::Result;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;
use vidgen_backend::domain::user::{SubscriptionStatus, SubscriptionTier, User};
use vidgen_backend::domain::video::VideoStatus;

pub struct TestFixtures {
    pool: PgPool,
}

impl TestFixtures {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create_user(&self, email: &str) -> Result<User> {
        let user = User {
            id: Uuid::new_v4(),
            name: Some("Test User".to_string()),
            email: email.to_string(),
            image: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        sqlx::query(
            r#"
            INSERT INTO users (id, name, email, image, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.image)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(user)
    }

    /// Create a user with a subscription on the given tier
    pub async fn create_user_on_tier(&self, email: &str, tier: SubscriptionTier) -> Result<User> {
        let user = self.create_user(email).await?;
        self.create_subscription(user.id, tier, SubscriptionStatus::Active)
            .await?;
        Ok(user)
    }

    pub async fn create_subscription(
        &self,
        user_id: Uuid,
        tier: SubscriptionTier,
        status: SubscriptionStatus,
    ) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO subscriptions (
                id, user_id, plan_type, status,
                billing_customer_id, billing_subscription_id, billing_price_id,
                current_period_end, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $9)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(tier.to_string())
        .bind(status.to_string())
        .bind(format!("cus_{}", Uuid::new_v4().simple()))
        .bind(format!("sub_{}", Uuid::new_v4().simple()))
        .bind("price_test")
        .bind(Utc::now() + chrono::Duration::days(30))
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn create_video(&self, user_id: Uuid, status: VideoStatus) -> Result<Uuid> {
        self.create_video_at(user_id, status, Utc::now()).await
    }

    /// Backdate a video row, e.g. into the previous month
    pub async fn create_video_at(
        &self,
        user_id: Uuid,
        status: VideoStatus,
        created_at: DateTime<Utc>,
    ) -> Result<Uuid> {
        let id = Uuid::new_v4();

        sqlx::query(
            r#"
            INSERT INTO videos (
                id, user_id, title, description, prompt, style, duration,
                status, video_url, thumbnail_url, metadata, created_at, updated_at
            )
            VALUES ($1, $2, $3, NULL, $4, $5, $6, $7, NULL, NULL, $8, $9, $9)
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind("Fixture video")
        .bind("gentle rain on leaves")
        .bind("rain")
        .bind(20)
        .bind(status.to_string())
        .bind(json!({"audio_type": "rain", "quality": "medium", "resolution": "1080p"}))
        .bind(created_at)
        .execute(&self.pool)
        .await?;

        Ok(id)
    }

    pub async fn create_videos(
        &self,
        user_id: Uuid,
        count: usize,
        status: VideoStatus,
    ) -> Result<Vec<Uuid>> {
        let mut ids = Vec::new();
        for _ in 0..count {
            ids.push(self.create_video(user_id, status).await?);
        }
        Ok(ids)
    }

    pub async fn count_videos(&self, user_id: Uuid) -> Result<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM videos WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(count.0)
    }

    pub async fn get_video_state(
        &self,
        video_id: Uuid,
    ) -> Result<(String, Option<String>, Option<String>)> {
        let row: (String, Option<String>, Option<String>) = sqlx::query_as(
            "SELECT status, video_url, thumbnail_url FROM videos WHERE id = $1",
        )
        .bind(video_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Today's usage counters: (videos_generated, total_duration, api_calls)
    pub async fn get_today_usage(&self, user_id: Uuid) -> Result<Option<(i32, i32, i32)>> {
        let row: Option<(i32, i32, i32)> = sqlx::query_as(
            r#"
            SELECT videos_generated, total_duration, api_calls
            FROM usage_stats
            WHERE user_id = $1 AND date = $2
            "#,
        )
        .bind(user_id)
        .bind(Utc::now().date_naive())
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }
}
