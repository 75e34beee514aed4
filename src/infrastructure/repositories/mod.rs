pub mod generation_repository;
pub mod subscription_repository;
pub mod usage_repository;
pub mod user_repository;
pub mod veo_generation_repository;
pub mod video_repository;

pub use generation_repository::{
    GenerationRepository, GenerationRequest, GenerationResponse, ProviderJobStatus,
};
pub use subscription_repository::SubscriptionRepository;
pub use usage_repository::{UsageRecord, UsageRepository};
pub use user_repository::UserRepository;
pub use veo_generation_repository::VeoGenerationRepository;
pub use video_repository::{NewVideo, VideoRepository};
