pub mod dto;
pub mod model;
pub mod service;

pub use model::{Subscription, SubscriptionStatus, SubscriptionTier, User};
pub use service::UserService;
