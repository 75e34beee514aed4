use super::model::{Video, VideoStatus};
use crate::infrastructure::repositories::ProviderJobStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request body for POST /api/generate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateVideoRequest {
    #[serde(default)]
    pub prompt: String,
    #[serde(default)]
    pub duration: i32,
    #[serde(default)]
    pub style: String,
    #[serde(default)]
    pub audio_type: String,
    pub quality: Option<String>,
    pub resolution: Option<String>,
}

/// Response for POST /api/generate
#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateVideoResponse {
    pub id: Uuid,
    pub status: ProviderJobStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_time: Option<i64>,
}

/// Query parameters for GET /api/generate
#[derive(Debug, Deserialize)]
pub struct ListVideosQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub status: Option<VideoStatus>,
}

/// Response for GET /api/generate
#[derive(Debug, Serialize, Deserialize)]
pub struct ListVideosResponse {
    pub data: Vec<VideoResponse>,
    pub pagination: PaginationDto,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PaginationDto {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub total_pages: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VideoResponse {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub prompt: String,
    pub style: String,
    pub duration: i32,
    pub status: VideoStatus,
    pub video_url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Video> for VideoResponse {
    fn from(video: Video) -> Self {
        Self {
            id: video.id,
            title: video.title,
            description: video.description,
            prompt: video.prompt,
            style: video.style,
            duration: video.duration,
            status: video.status,
            video_url: video.video_url,
            thumbnail_url: video.thumbnail_url,
            created_at: video.created_at,
        }
    }
}
