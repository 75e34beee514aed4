use super::dto::{
    GenerateVideoRequest, GenerateVideoResponse, ListVideosQuery, ListVideosResponse,
    PaginationDto, VideoResponse,
};
use super::error::VideoServiceError;
use super::model::{VideoMetadata, VideoStatus};
use crate::domain::user::SubscriptionTier;
use crate::infrastructure::repositories::{
    GenerationRepository, GenerationRequest, NewVideo, ProviderJobStatus, SubscriptionRepository,
    UsageRepository, UserRepository, VideoRepository,
};
use chrono::{DateTime, Datelike, Utc};
use std::sync::Arc;
use uuid::Uuid;

const DEFAULT_QUALITY: &str = "medium";
const DEFAULT_RESOLUTION: &str = "1080p";
const DEFAULT_PAGE_SIZE: i64 = 10;
const MAX_PAGE_SIZE: i64 = 100;

pub struct VideoService {
    user_repo: Arc<UserRepository>,
    subscription_repo: Arc<SubscriptionRepository>,
    video_repo: Arc<VideoRepository>,
    usage_repo: Arc<UsageRepository>,
    generation_repo: Arc<dyn GenerationRepository>,
}

impl VideoService {
    pub fn new(
        user_repo: Arc<UserRepository>,
        subscription_repo: Arc<SubscriptionRepository>,
        video_repo: Arc<VideoRepository>,
        usage_repo: Arc<UsageRepository>,
        generation_repo: Arc<dyn GenerationRepository>,
    ) -> Self {
        Self {
            user_repo,
            subscription_repo,
            video_repo,
            usage_repo,
            generation_repo,
        }
    }

    /// Submit a generation request for a user.
    ///
    /// Admission (validation, tier resolution, quota and duration checks)
    /// happens before any write. Once admitted, the video row is created
    /// with status PROCESSING *before* the provider call, so an accepted
    /// request always has a row regardless of the provider outcome. Usage
    /// counters are committed only after a successful provider response;
    /// a provider failure marks the row FAILED and bills nothing.
    pub async fn generate(
        &self,
        user_id: Uuid,
        request: GenerateVideoRequest,
    ) -> Result<GenerateVideoResponse, VideoServiceError> {
        validate_request(&request)?;

        let user = self
            .user_repo
            .find_by_id(user_id)
            .await
            .map_err(|e| VideoServiceError::Dependency(e.to_string()))?
            .ok_or_else(|| VideoServiceError::NotFound("User not found".to_string()))?;

        let tier = self.resolve_tier(user.id).await?;

        let videos_this_month = self
            .video_repo
            .count_billable_since(user.id, start_of_current_month())
            .await
            .map_err(|e| VideoServiceError::Dependency(e.to_string()))?;

        check_quota(tier, videos_this_month)?;
        check_duration(tier, request.duration)?;

        tracing::info!(
            user_id = %user.id,
            tier = %tier,
            videos_this_month,
            duration = request.duration,
            style = %request.style,
            "Video generation request admitted"
        );

        let quality = request
            .quality
            .clone()
            .unwrap_or_else(|| DEFAULT_QUALITY.to_string());
        let resolution = request
            .resolution
            .clone()
            .unwrap_or_else(|| DEFAULT_RESOLUTION.to_string());

        let metadata = VideoMetadata {
            audio_type: request.audio_type.clone(),
            quality: quality.clone(),
            resolution: resolution.clone(),
        };

        // The row must exist before the provider is called
        let video = self
            .video_repo
            .create(
                user.id,
                NewVideo {
                    title: request.prompt.clone(),
                    description: Some(format!("Generated video - {} style", request.style)),
                    prompt: request.prompt.clone(),
                    style: request.style.clone(),
                    duration: request.duration,
                    metadata: serde_json::to_value(&metadata)
                        .map_err(|e| VideoServiceError::Dependency(e.to_string()))?,
                },
            )
            .await
            .map_err(|e| VideoServiceError::Dependency(e.to_string()))?;

        let provider_request = GenerationRequest {
            prompt: request.prompt,
            duration: request.duration,
            style: request.style,
            audio_type: request.audio_type,
            quality,
            resolution,
        };

        match self.generation_repo.generate(&provider_request).await {
            Ok(response) => {
                let status = match response.status {
                    ProviderJobStatus::Completed => VideoStatus::Completed,
                    _ => VideoStatus::Processing,
                };

                self.video_repo
                    .set_provider_result(
                        video.id,
                        status,
                        response.video_url.as_deref(),
                        response.thumbnail_url.as_deref(),
                    )
                    .await
                    .map_err(|e| VideoServiceError::Dependency(e.to_string()))?;

                // Usage is billed only on confirmed provider success
                self.usage_repo
                    .increment_usage(user.id, provider_request.duration)
                    .await
                    .map_err(|e| VideoServiceError::Dependency(e.to_string()))?;

                tracing::info!(
                    user_id = %user.id,
                    video_id = %video.id,
                    provider_status = %response.status,
                    "Video generation submitted"
                );

                Ok(GenerateVideoResponse {
                    id: video.id,
                    status: response.status,
                    estimated_time: response.estimated_time,
                })
            }
            Err(provider_error) => {
                // The row must not stay PROCESSING because of this path
                if let Err(db_error) = self.video_repo.mark_failed(video.id).await {
                    tracing::error!(
                        video_id = %video.id,
                        error = %db_error,
                        "Failed to mark video as FAILED after provider error"
                    );
                }

                tracing::error!(
                    user_id = %user.id,
                    video_id = %video.id,
                    error = %provider_error,
                    "Generation provider call failed"
                );

                Err(VideoServiceError::Provider(provider_error))
            }
        }
    }

    /// List the caller's videos, newest first, optionally filtered by status
    pub async fn list_videos(
        &self,
        user_id: Uuid,
        query: ListVideosQuery,
    ) -> Result<ListVideosResponse, VideoServiceError> {
        let page = query.page.unwrap_or(1).max(1);
        let limit = query.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
        let offset = (page - 1) * limit;

        let videos = self
            .video_repo
            .find_page(user_id, query.status, limit, offset)
            .await
            .map_err(|e| VideoServiceError::Dependency(e.to_string()))?;

        let total = self
            .video_repo
            .count_by_user(user_id, query.status)
            .await
            .map_err(|e| VideoServiceError::Dependency(e.to_string()))?;

        Ok(ListVideosResponse {
            data: videos.into_iter().map(VideoResponse::from).collect(),
            pagination: PaginationDto {
                page,
                limit,
                total,
                total_pages: total_pages(total, limit),
            },
        })
    }

    /// Resolve the user's plan tier; a missing subscription row means FREE
    async fn resolve_tier(&self, user_id: Uuid) -> Result<SubscriptionTier, VideoServiceError> {
        let subscription = self
            .subscription_repo
            .find_by_user(user_id)
            .await
            .map_err(|e| VideoServiceError::Dependency(e.to_string()))?;

        Ok(subscription
            .map(|s| s.plan_type)
            .unwrap_or(SubscriptionTier::Free))
    }
}

/// Reject requests with missing or empty required fields before touching
/// any state
fn validate_request(request: &GenerateVideoRequest) -> Result<(), VideoServiceError> {
    if request.prompt.trim().is_empty() {
        return Err(VideoServiceError::Invalid(
            "Prompt is required".to_string(),
        ));
    }
    if request.duration <= 0 {
        return Err(VideoServiceError::Invalid(
            "Duration must be a positive number of seconds".to_string(),
        ));
    }
    if request.style.trim().is_empty() {
        return Err(VideoServiceError::Invalid("Style is required".to_string()));
    }
    if request.audio_type.trim().is_empty() {
        return Err(VideoServiceError::Invalid(
            "Audio type is required".to_string(),
        ));
    }
    Ok(())
}

fn check_quota(tier: SubscriptionTier, videos_this_month: i64) -> Result<(), VideoServiceError> {
    match tier.monthly_quota() {
        Some(quota) if videos_this_month >= quota => Err(VideoServiceError::QuotaExceeded(
            format!(
                "You have used all {} videos included in the {} plan this month. Upgrade your plan or wait for the next billing month.",
                quota, tier
            ),
        )),
        _ => Ok(()),
    }
}

fn check_duration(tier: SubscriptionTier, duration: i32) -> Result<(), VideoServiceError> {
    let max = tier.max_duration_secs();
    if duration > max {
        return Err(VideoServiceError::DurationExceeded(format!(
            "The {} plan supports videos up to {} seconds",
            tier, max
        )));
    }
    Ok(())
}

/// First instant of the current calendar month (UTC); videos created at
/// or after this point count toward the monthly quota
pub fn start_of_current_month() -> DateTime<Utc> {
    start_of_month(Utc::now())
}

fn start_of_month(now: DateTime<Utc>) -> DateTime<Utc> {
    now.date_naive()
        .with_day(1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
        .and_utc()
}

fn total_pages(total: i64, limit: i64) -> i64 {
    if total == 0 {
        0
    } else {
        (total + limit - 1) / limit
    }
}
