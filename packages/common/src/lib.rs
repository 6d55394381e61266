pub mod accounts;
pub mod catalog;
pub mod config;
pub mod cooking_time;
pub mod database;
pub mod entity;
pub mod lifecycle;
pub mod media;
pub mod storage;

pub use cooking_time::CookingTime;
pub use lifecycle::{MediaOutcome, MediaWarning};
