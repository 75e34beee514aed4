use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: Option<String>,
    pub email: String,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Billing state attached to a user. At most one row per user; a user
/// without one behaves as FREE tier with no billing references.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Subscription {
    pub id: Uuid,
    pub user_id: Uuid,
    pub plan_type: SubscriptionTier,
    pub status: SubscriptionStatus,
    pub billing_customer_id: Option<String>,
    pub billing_subscription_id: Option<String>,
    pub billing_price_id: Option<String>,
    pub current_period_end: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "text")]
#[sqlx(rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum SubscriptionTier {
    Free,
    Basic,
    Pro,
    Enterprise,
}

impl SubscriptionTier {
    /// Videos a tier may generate per calendar month. `None` means
    /// unlimited and is never compared numerically.
    pub fn monthly_quota(&self) -> Option<i64> {
        match self {
            SubscriptionTier::Free => Some(3),
            SubscriptionTier::Basic => Some(20),
            SubscriptionTier::Pro => Some(100),
            SubscriptionTier::Enterprise => None,
        }
    }

    /// Longest single video a tier may request, in seconds
    pub fn max_duration_secs(&self) -> i32 {
        match self {
            SubscriptionTier::Free => 30,
            SubscriptionTier::Basic => 120,
            SubscriptionTier::Pro => 300,
            SubscriptionTier::Enterprise => 600,
        }
    }
}

impl std::fmt::Display for SubscriptionTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubscriptionTier::Free => write!(f, "FREE"),
            SubscriptionTier::Basic => write!(f, "BASIC"),
            SubscriptionTier::Pro => write!(f, "PRO"),
            SubscriptionTier::Enterprise => write!(f, "ENTERPRISE"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "text")]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubscriptionStatus {
    Active,
    Canceled,
    PastDue,
    Unpaid,
    Trial,
}

impl std::fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubscriptionStatus::Active => write!(f, "ACTIVE"),
            SubscriptionStatus::Canceled => write!(f, "CANCELED"),
            SubscriptionStatus::PastDue => write!(f, "PAST_DUE"),
            SubscriptionStatus::Unpaid => write!(f, "UNPAID"),
            SubscriptionStatus::Trial => write!(f, "TRIAL"),
        }
    }
}
