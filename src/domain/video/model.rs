use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use sqlx::FromRow;
use uuid::Uuid;

/// One generation request and its persisted lifecycle record.
///
/// The row is created with status PROCESSING before the provider is
/// called, so an accepted request always leaves an audit trail even if
/// the provider never responds. It is mutated at most once afterwards
/// (provider result or failure) and never deleted.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Video {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub prompt: String,
    pub style: String,
    pub duration: i32,
    pub status: VideoStatus,
    pub video_url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub metadata: JsonValue,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "text")]
#[sqlx(rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum VideoStatus {
    Processing,
    Completed,
    Failed,
    // Never entered by the generation flow, reachable only via an
    // operator action outside this service.
    Cancelled,
}

impl std::fmt::Display for VideoStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VideoStatus::Processing => write!(f, "PROCESSING"),
            VideoStatus::Completed => write!(f, "COMPLETED"),
            VideoStatus::Failed => write!(f, "FAILED"),
            VideoStatus::Cancelled => write!(f, "CANCELLED"),
        }
    }
}

impl std::str::FromStr for VideoStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PROCESSING" => Ok(VideoStatus::Processing),
            "COMPLETED" => Ok(VideoStatus::Completed),
            "FAILED" => Ok(VideoStatus::Failed),
            "CANCELLED" => Ok(VideoStatus::Cancelled),
            other => Err(format!("Unknown video status: {}", other)),
        }
    }
}

/// Request metadata stored verbatim on the video row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoMetadata {
    pub audio_type: String,
    pub quality: String,
    pub resolution: String,
}
