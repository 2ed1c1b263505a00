// src/models/public.rs
// DOCUMENTATION: Public-site aggregate response for a hotel
// PURPOSE: One payload the browsing site renders a detail page from

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ApiError;
use crate::models::{
    Address, HotelCard, HotelDetails, HotelFaq, HotelHighlight, HotelImage, HotelPolicy,
    HotelRoom, LinkedAmenity, LinkedLabel,
};

/// Relation depth for GET /api/public/hotels/{id}
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublicInclude {
    /// Card + details + address + primary image
    Basic,
    /// Everything the detail page renders
    All,
}

impl PublicInclude {
    /// Parse the ?include= query value; absent means basic
    pub fn parse(value: Option<&str>) -> Result<Self, ApiError> {
        match value {
            None | Some("basic") => Ok(PublicInclude::Basic),
            Some("all") => Ok(PublicInclude::All),
            Some(other) => Err(ApiError::Validation(format!(
                "include must be 'basic' or 'all', got '{}'",
                other
            ))),
        }
    }

    pub fn cache_key(&self, hotel_id: Uuid) -> String {
        let depth = match self {
            PublicInclude::Basic => "basic",
            PublicInclude::All => "all",
        };
        format!("public:hotel:{}:{}", hotel_id, depth)
    }
}

#[derive(Debug, Deserialize)]
pub struct PublicHotelQuery {
    pub include: Option<String>,
}

/// Aggregate hotel payload for the public site
/// Deep collections are present only with include=all; each comes back
/// sorted by its ordering field
#[derive(Debug, Serialize)]
pub struct PublicHotelResponse {
    #[serde(flatten)]
    pub card: HotelCard,
    pub details: Option<HotelDetails>,
    pub address: Option<Address>,
    pub primary_image: Option<HotelImage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<HotelImage>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rooms: Option<Vec<HotelRoom>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amenities: Option<Vec<LinkedAmenity>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<LinkedLabel>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlights: Option<Vec<HotelHighlight>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub faqs: Option<Vec<HotelFaq>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub policy: Option<HotelPolicy>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_include_parse() {
        assert_eq!(PublicInclude::parse(None).unwrap(), PublicInclude::Basic);
        assert_eq!(
            PublicInclude::parse(Some("basic")).unwrap(),
            PublicInclude::Basic
        );
        assert_eq!(
            PublicInclude::parse(Some("all")).unwrap(),
            PublicInclude::All
        );
        assert!(PublicInclude::parse(Some("deep")).is_err());
    }

    #[test]
    fn test_cache_key_distinguishes_depth() {
        let id = Uuid::new_v4();
        assert_ne!(
            PublicInclude::Basic.cache_key(id),
            PublicInclude::All.cache_key(id)
        );
    }
}
