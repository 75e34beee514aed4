use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum VideoServiceError {
    #[error("invalid input: {0}")]
    Invalid(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("quota exceeded: {0}")]
    QuotaExceeded(String),
    #[error("duration exceeded: {0}")]
    DurationExceeded(String),
    #[error("provider error: {0}")]
    Provider(String),
    #[error("dependency error: {0}")]
    Dependency(String),
}

impl From<AppError> for VideoServiceError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::BadRequest(msg) => VideoServiceError::Invalid(msg),
            AppError::NotFound(msg) => VideoServiceError::NotFound(msg),
            AppError::QuotaExceeded(msg) => VideoServiceError::QuotaExceeded(msg),
            _ => VideoServiceError::Dependency(err.to_string()),
        }
    }
}

impl From<VideoServiceError> for AppError {
    fn from(err: VideoServiceError) -> Self {
        match err {
            VideoServiceError::Invalid(msg) => AppError::BadRequest(msg),
            VideoServiceError::NotFound(msg) => AppError::NotFound(msg),
            VideoServiceError::QuotaExceeded(msg) => AppError::QuotaExceeded(msg),
            // Duration limits map to 400: the single request is malformed
            // for this tier, the monthly allotment is untouched
            VideoServiceError::DurationExceeded(msg) => AppError::BadRequest(msg),
            VideoServiceError::Provider(msg) => AppError::ExternalService(msg),
            VideoServiceError::Dependency(msg) => AppError::Internal(msg),
        }
    }
}
