// src/services/mod.rs

pub mod cache;
pub mod public_service;

pub use cache::{start_cleanup_task, CacheStats, ResponseCache};
pub use public_service::PublicService;
