use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Normalized request sent to the generation provider
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    pub prompt: String,
    pub duration: i32,
    pub style: String,
    pub audio_type: String,
    pub quality: String,
    pub resolution: String,
}

/// Provider's view of a generation job
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResponse {
    pub id: String,
    pub status: ProviderJobStatus,
    pub video_url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub estimated_time: Option<i64>,
}

/// Job status as reported by the provider. PENDING exists on the wire
/// but the persisted record never starts there.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProviderJobStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

impl std::fmt::Display for ProviderJobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderJobStatus::Pending => write!(f, "pending"),
            ProviderJobStatus::Processing => write!(f, "processing"),
            ProviderJobStatus::Completed => write!(f, "completed"),
            ProviderJobStatus::Failed => write!(f, "failed"),
        }
    }
}

/// Repository for video generation job submission.
/// Abstracts the underlying provider so the service can be exercised
/// against a fake in tests.
#[async_trait]
pub trait GenerationRepository: Send + Sync {
    /// Submit one generation job to the provider.
    ///
    /// # Errors
    /// Returns error if the provider is unreachable or rejects the job.
    /// The error string is internal detail for logging, never shown to
    /// the caller.
    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResponse, String>;
}
