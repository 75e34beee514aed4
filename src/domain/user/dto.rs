use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Response for GET /api/me
#[derive(Debug, Serialize, Deserialize)]
pub struct MeResponse {
    pub id: Uuid,
    pub name: Option<String>,
    pub email: String,
    pub image: Option<String>,
    pub subscription: SubscriptionDto,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SubscriptionDto {
    pub tier: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_period_end: Option<DateTime<Utc>>,
    pub usage: UsageDto,
    pub limits: LimitsDto,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UsageDto {
    pub videos_generated_today: i32,
    pub duration_generated_today: i32,
    pub api_calls_today: i32,
    pub videos_this_month: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LimitsDto {
    /// None means unlimited
    #[serde(skip_serializing_if = "Option::is_none")]
    pub videos_per_month: Option<i64>,
    pub max_duration_seconds: i32,
}

/// Request for PUT /api/me
#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub email: Option<String>,
}
