pub mod health;
pub mod user;
pub mod video;
