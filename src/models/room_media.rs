// src/models/room_media.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::errors::ApiError;
use crate::models::validation::*;

/// Room type offered by a hotel card
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct HotelRoom {
    pub id: Uuid,
    pub hotel_card_id: Uuid,
    pub name: String,

    /// Guests the room sleeps, 1-20
    pub capacity: i32,

    pub price_per_night: f64,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateRoomRequest {
    pub hotel_card_id: Uuid,
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    pub capacity: i32,
    pub price_per_night: f64,
    #[serde(default)]
    pub sort_order: Option<i32>,
}

impl CreateRoomRequest {
    pub fn validate_fields(&self) -> Result<(), ApiError> {
        self.validate()
            .map_err(|e| ApiError::Validation(e.to_string()))?;
        validate_capacity(self.capacity)?;
        validate_price(self.price_per_night)
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateRoomRequest {
    pub name: Option<String>,
    pub capacity: Option<i32>,
    pub price_per_night: Option<f64>,
    pub sort_order: Option<i32>,
}

impl UpdateRoomRequest {
    pub fn validate_fields(&self) -> Result<(), ApiError> {
        if let Some(capacity) = self.capacity {
            validate_capacity(capacity)?;
        }
        if let Some(price) = self.price_per_night {
            validate_price(price)?;
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct RoomListQuery {
    pub hotel_card_id: Option<Uuid>,
    pub min_capacity: Option<i32>,
    pub max_price: Option<f64>,
}

impl RoomListQuery {
    /// f64 query params accept "NaN"/"inf"; those never belong in a filter
    pub fn validate_fields(&self) -> Result<(), ApiError> {
        if let Some(max_price) = self.max_price {
            if !max_price.is_finite() {
                return Err(ApiError::Validation(
                    "max_price must be a finite number".to_string(),
                ));
            }
        }
        Ok(())
    }
}

/// Gallery image for a hotel card
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct HotelImage {
    pub id: Uuid,
    pub hotel_card_id: Uuid,
    pub url: String,
    pub alt_text: Option<String>,
    pub is_primary: bool,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateImageRequest {
    pub hotel_card_id: Uuid,
    #[validate(url)]
    pub url: String,
    #[serde(default)]
    pub alt_text: Option<String>,
    #[serde(default)]
    pub is_primary: Option<bool>,
    #[serde(default)]
    pub sort_order: Option<i32>,
}

impl CreateImageRequest {
    pub fn validate_fields(&self) -> Result<(), ApiError> {
        self.validate()
            .map_err(|e| ApiError::Validation(e.to_string()))
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateImageRequest {
    pub url: Option<String>,
    pub alt_text: Option<String>,
    pub is_primary: Option<bool>,
    pub sort_order: Option<i32>,
}

impl UpdateImageRequest {
    pub fn validate_fields(&self) -> Result<(), ApiError> {
        if let Some(url) = &self.url {
            if !validator::validate_url(url) {
                return Err(ApiError::Validation("Url must be a valid URL".to_string()));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct ImageListQuery {
    pub hotel_card_id: Option<Uuid>,
    pub is_primary: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_image_url_checked_like_create() {
        let req = UpdateImageRequest {
            url: Some("not a url".to_string()),
            alt_text: None,
            is_primary: None,
            sort_order: None,
        };
        assert!(req.validate_fields().is_err());

        let req = UpdateImageRequest {
            url: Some("https://images.example.com/facade.jpg".to_string()),
            alt_text: Some("Facade".to_string()),
            is_primary: Some(true),
            sort_order: None,
        };
        assert!(req.validate_fields().is_ok());
    }

    #[test]
    fn test_room_list_query_rejects_non_finite_price() {
        let query = RoomListQuery {
            hotel_card_id: None,
            min_capacity: None,
            max_price: Some(f64::NAN),
        };
        assert!(query.validate_fields().is_err());

        let query = RoomListQuery {
            hotel_card_id: None,
            min_capacity: None,
            max_price: Some(f64::INFINITY),
        };
        assert!(query.validate_fields().is_err());

        let query = RoomListQuery {
            hotel_card_id: None,
            min_capacity: Some(2),
            max_price: Some(150.0),
        };
        assert!(query.validate_fields().is_ok());
    }
}
