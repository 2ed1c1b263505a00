// src/handlers/mod.rs
// DOCUMENTATION: HTTP handlers module organization
// PURPOSE: Re-export handler configuration functions

pub mod admin;
pub mod catalog;
pub mod content;
pub mod geo;
pub mod health;
pub mod hotels;
pub mod public;
pub mod rooms_media;
pub mod users;

pub use admin::config as admin_config;
pub use catalog::config as catalog_config;
pub use content::config as content_config;
pub use geo::config as geo_config;
pub use health::config as health_config;
pub use hotels::config as hotels_config;
pub use public::config as public_config;
pub use rooms_media::config as rooms_media_config;
pub use users::config as users_config;
