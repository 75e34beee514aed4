use crate::{
    error::{AppError, AppResult},
    infrastructure::repositories::{
        SubscriptionRepository, UsageRepository, UserRepository, VideoRepository,
    },
};
use super::{dto::*, SubscriptionStatus, SubscriptionTier, User};
use crate::domain::video::start_of_current_month;
use std::sync::Arc;
use uuid::Uuid;

pub struct UserService {
    user_repo: Arc<UserRepository>,
    subscription_repo: Arc<SubscriptionRepository>,
    usage_repo: Arc<UsageRepository>,
    video_repo: Arc<VideoRepository>,
}

impl UserService {
    pub fn new(
        user_repo: Arc<UserRepository>,
        subscription_repo: Arc<SubscriptionRepository>,
        usage_repo: Arc<UsageRepository>,
        video_repo: Arc<VideoRepository>,
    ) -> Self {
        Self {
            user_repo,
            subscription_repo,
            usage_repo,
            video_repo,
        }
    }

    /// Get user profile with subscription and usage info
    pub async fn get_user_profile(&self, user_id: Uuid) -> AppResult<MeResponse> {
        let user = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        self.build_me_response(&user).await
    }

    /// Update user name/email
    pub async fn update_profile(
        &self,
        user_id: Uuid,
        updates: UpdateProfileRequest,
    ) -> AppResult<MeResponse> {
        if let Some(email) = &updates.email {
            if !email.contains('@') {
                return Err(AppError::BadRequest(format!("Invalid email: {}", email)));
            }
        }
        if let Some(name) = &updates.name {
            if name.trim().is_empty() {
                return Err(AppError::BadRequest("Name cannot be empty".to_string()));
            }
        }

        let user = self
            .user_repo
            .update_profile(user_id, updates.name.as_deref(), updates.email.as_deref())
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        self.build_me_response(&user).await
    }

    async fn build_me_response(&self, user: &User) -> AppResult<MeResponse> {
        let subscription = self.subscription_repo.find_by_user(user.id).await?;

        // A user without a subscription row is a free user
        let (tier, status, current_period_end) = match &subscription {
            Some(sub) => (sub.plan_type, sub.status, sub.current_period_end),
            None => (SubscriptionTier::Free, SubscriptionStatus::Active, None),
        };

        let today_usage = self.usage_repo.get_today_usage(user.id).await?;
        let (videos_today, duration_today, api_calls_today) = match &today_usage {
            Some(u) => (u.videos_generated, u.total_duration, u.api_calls),
            None => (0, 0, 0),
        };

        let videos_this_month = self
            .video_repo
            .count_billable_since(user.id, start_of_current_month())
            .await?;

        Ok(MeResponse {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            image: user.image.clone(),
            subscription: SubscriptionDto {
                tier: tier.to_string(),
                status: status.to_string(),
                current_period_end,
                usage: UsageDto {
                    videos_generated_today: videos_today,
                    duration_generated_today: duration_today,
                    api_calls_today,
                    videos_this_month,
                },
                limits: LimitsDto {
                    videos_per_month: tier.monthly_quota(),
                    max_duration_seconds: tier.max_duration_secs(),
                },
            },
        })
    }
}
