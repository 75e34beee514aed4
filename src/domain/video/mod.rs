pub mod dto;
pub mod error;
pub mod model;
pub mod service;

pub use error::VideoServiceError;
pub use model::{Video, VideoMetadata, VideoStatus};
pub use service::{start_of_current_month, VideoService};
