// src/models/mod.rs
// DOCUMENTATION: Models module organization
// PURPOSE: Re-export model components

pub mod catalog;
pub mod content;
pub mod geo;
pub mod hotel;
pub mod public;
pub mod room_media;
pub mod user;
pub mod validation;

pub use catalog::*;
pub use content::*;
pub use geo::*;
pub use hotel::*;
pub use public::*;
pub use room_media::*;
pub use user::*;

use serde::Deserialize;

/// Shared ?include=true query parameter for relation expansion
#[derive(Debug, Deserialize)]
pub struct IncludeQuery {
    pub include: Option<bool>,
}

impl IncludeQuery {
    pub fn expand(&self) -> bool {
        self.include.unwrap_or(false)
    }
}

/// Shared ?name= substring filter for listing endpoints
#[derive(Debug, Deserialize)]
pub struct NameFilterQuery {
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::web::Query;

    #[test]
    fn test_name_filter_query_parses() {
        let query = Query::<NameFilterQuery>::from_query("name=bali").unwrap();
        assert_eq!(query.name.as_deref(), Some("bali"));

        let query = Query::<NameFilterQuery>::from_query("").unwrap();
        assert!(query.name.is_none());
    }
}
