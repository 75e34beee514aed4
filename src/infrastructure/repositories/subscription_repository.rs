use crate::infrastructure::db::DbPool;
use crate::{domain::user::Subscription, error::AppResult};
use std::sync::Arc;
use uuid::Uuid;

pub struct SubscriptionRepository {
    pool: Arc<DbPool>,
}

impl SubscriptionRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }

    /// Find the subscription attached to a user, if any.
    /// At most one row exists per user (unique constraint).
    pub async fn find_by_user(&self, user_id: Uuid) -> AppResult<Option<Subscription>> {
        let pool = self.pool.as_ref();
        let subscription = sqlx::query_as::<_, Subscription>(
            "SELECT * FROM subscriptions WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(subscription)
    }
}
