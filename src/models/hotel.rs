// src/models/hotel.rs
// DOCUMENTATION: Core listing entities: accommodation types, hotel groups,
// addresses, hotel cards and their 1:1 details
// PURPOSE: Database models plus request/response DTOs for the hotel endpoints

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::errors::ApiError;
use crate::models::validation::*;

/// Accommodation type (hotel, apartment, hostel...); code is a natural key
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AccommodationType {
    pub id: Uuid,
    pub name: String,
    pub code: String,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateAccommodationTypeRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    pub code: String,
    #[serde(default)]
    pub sort_order: Option<i32>,
}

impl CreateAccommodationTypeRequest {
    pub fn validate_fields(&self) -> Result<(), ApiError> {
        self.validate()
            .map_err(|e| ApiError::Validation(e.to_string()))?;
        validate_key_code(&self.code)
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateAccommodationTypeRequest {
    pub name: Option<String>,
    pub code: Option<String>,
    pub sort_order: Option<i32>,
}

impl UpdateAccommodationTypeRequest {
    pub fn validate_fields(&self) -> Result<(), ApiError> {
        if let Some(code) = &self.code {
            validate_key_code(code)?;
        }
        Ok(())
    }
}

/// Hotel group (chain/brand), optional parent of hotel cards
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct HotelGroup {
    pub id: Uuid,
    pub name: String,
    pub website: Option<String>,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateHotelGroupRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(url)]
    pub website: Option<String>,
    #[serde(default)]
    pub sort_order: Option<i32>,
}

impl CreateHotelGroupRequest {
    pub fn validate_fields(&self) -> Result<(), ApiError> {
        self.validate()
            .map_err(|e| ApiError::Validation(e.to_string()))
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateHotelGroupRequest {
    pub name: Option<String>,
    pub website: Option<String>,
    pub sort_order: Option<i32>,
}

impl UpdateHotelGroupRequest {
    pub fn validate_fields(&self) -> Result<(), ApiError> {
        if let Some(name) = &self.name {
            if name.is_empty() {
                return Err(ApiError::Validation("Name must not be empty".to_string()));
            }
        }
        if let Some(website) = &self.website {
            if !validator::validate_url(website) {
                return Err(ApiError::Validation(
                    "Website must be a valid URL".to_string(),
                ));
            }
        }
        Ok(())
    }
}

/// Address record
/// DOCUMENTATION: The neighborhood, when present, must belong to the same
/// city the address references; the cross-check runs before every write
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Address {
    pub id: Uuid,
    pub city_id: Uuid,
    pub neighborhood_id: Option<Uuid>,
    pub street: String,

    /// Exactly 5 digits
    pub postal_code: String,

    pub latitude: f64,
    pub longitude: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateAddressRequest {
    pub city_id: Uuid,
    #[serde(default)]
    pub neighborhood_id: Option<Uuid>,
    #[validate(length(min = 1, max = 512))]
    pub street: String,
    pub postal_code: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl CreateAddressRequest {
    pub fn validate_fields(&self) -> Result<(), ApiError> {
        self.validate()
            .map_err(|e| ApiError::Validation(e.to_string()))?;
        validate_postal_code(&self.postal_code)?;
        validate_latitude(self.latitude)?;
        validate_longitude(self.longitude)
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateAddressRequest {
    pub city_id: Option<Uuid>,
    pub neighborhood_id: Option<Uuid>,
    pub street: Option<String>,
    pub postal_code: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl UpdateAddressRequest {
    pub fn validate_fields(&self) -> Result<(), ApiError> {
        if let Some(postal_code) = &self.postal_code {
            validate_postal_code(postal_code)?;
        }
        if let Some(latitude) = self.latitude {
            validate_latitude(latitude)?;
        }
        if let Some(longitude) = self.longitude {
            validate_longitude(longitude)?;
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct AddressListQuery {
    pub city_id: Option<Uuid>,
    pub neighborhood_id: Option<Uuid>,
    pub postal_code: Option<String>,
}

/// The canonical hotel listing record shown in search results and detail
/// pages
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct HotelCard {
    pub id: Uuid,
    pub name: String,
    pub accommodation_type_id: Uuid,
    pub destination_id: Uuid,
    pub hotel_group_id: Option<Uuid>,

    /// 1-5 stars
    pub star_rating: i32,

    /// Popularity score 0-100, secondary ordering in listings
    pub popularity: i32,

    /// Editorial priority 0-10
    pub priority: i32,

    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateHotelCardRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    pub accommodation_type_id: Uuid,
    pub destination_id: Uuid,
    #[serde(default)]
    pub hotel_group_id: Option<Uuid>,
    pub star_rating: i32,
    #[serde(default)]
    pub popularity: Option<i32>,
    #[serde(default)]
    pub priority: Option<i32>,
    #[serde(default)]
    pub sort_order: Option<i32>,
}

impl CreateHotelCardRequest {
    pub fn validate_fields(&self) -> Result<(), ApiError> {
        self.validate()
            .map_err(|e| ApiError::Validation(e.to_string()))?;
        validate_star_rating(self.star_rating)?;
        if let Some(popularity) = self.popularity {
            validate_popularity(popularity)?;
        }
        if let Some(priority) = self.priority {
            validate_priority(priority)?;
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateHotelCardRequest {
    pub name: Option<String>,
    pub accommodation_type_id: Option<Uuid>,
    pub destination_id: Option<Uuid>,
    pub hotel_group_id: Option<Uuid>,
    pub star_rating: Option<i32>,
    pub popularity: Option<i32>,
    pub priority: Option<i32>,
    pub sort_order: Option<i32>,
}

impl UpdateHotelCardRequest {
    pub fn validate_fields(&self) -> Result<(), ApiError> {
        if let Some(star_rating) = self.star_rating {
            validate_star_rating(star_rating)?;
        }
        if let Some(popularity) = self.popularity {
            validate_popularity(popularity)?;
        }
        if let Some(priority) = self.priority {
            validate_priority(priority)?;
        }
        Ok(())
    }
}

/// Query parameters for GET /api/hotel-card
#[derive(Debug, Deserialize)]
pub struct HotelCardListQuery {
    pub destination_id: Option<Uuid>,
    pub accommodation_type_id: Option<Uuid>,
    pub hotel_group_id: Option<Uuid>,
    pub min_star_rating: Option<i32>,
    /// Substring match on name
    pub name: Option<String>,
    pub include: Option<bool>,
}

/// 1:1 extension of HotelCard holding description and address linkage
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct HotelDetails {
    pub id: Uuid,
    pub hotel_card_id: Uuid,
    pub address_id: Uuid,
    pub description: String,
    pub check_in_time: String,
    pub check_out_time: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateHotelDetailsRequest {
    pub hotel_card_id: Uuid,
    pub address_id: Uuid,
    #[validate(length(min = 1))]
    pub description: String,
    pub check_in_time: String,
    pub check_out_time: String,
}

impl CreateHotelDetailsRequest {
    pub fn validate_fields(&self) -> Result<(), ApiError> {
        self.validate()
            .map_err(|e| ApiError::Validation(e.to_string()))?;
        validate_time_of_day(&self.check_in_time)?;
        validate_time_of_day(&self.check_out_time)
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateHotelDetailsRequest {
    pub address_id: Option<Uuid>,
    pub description: Option<String>,
    pub check_in_time: Option<String>,
    pub check_out_time: Option<String>,
}

impl UpdateHotelDetailsRequest {
    pub fn validate_fields(&self) -> Result<(), ApiError> {
        if let Some(check_in_time) = &self.check_in_time {
            validate_time_of_day(check_in_time)?;
        }
        if let Some(check_out_time) = &self.check_out_time {
            validate_time_of_day(check_out_time)?;
        }
        Ok(())
    }
}

/// Derived aggregates attached to the hotel card detail response
/// Computed by secondary queries, not stored
#[derive(Debug, Serialize, Default)]
pub struct HotelCardAggregates {
    pub image_count: i64,
    pub room_count: i64,
    pub min_room_price: Option<f64>,
    pub avg_room_capacity: Option<f64>,
}

/// Hotel card detail with optional relation expansion (?include=true)
#[derive(Debug, Serialize)]
pub struct HotelCardDetailResponse {
    #[serde(flatten)]
    pub card: HotelCard,
    pub aggregates: HotelCardAggregates,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HotelDetails>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<crate::models::HotelImage>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rooms: Option<Vec<crate::models::HotelRoom>>,
}

/// Body for POST /api/hotel-card/full
/// DOCUMENTATION: Creates address + card + details in a single transaction,
/// closing the orphaned-row gap of the step-by-step admin flow
#[derive(Debug, Deserialize)]
pub struct CreateHotelCardFullRequest {
    pub address: CreateAddressRequest,
    pub card: CreateHotelCardRequest,
    pub details: CreateHotelCardFullDetails,
}

/// Details portion of the composite create (ids come from the transaction)
#[derive(Debug, Deserialize, Validate)]
pub struct CreateHotelCardFullDetails {
    #[validate(length(min = 1))]
    pub description: String,
    pub check_in_time: String,
    pub check_out_time: String,
}

impl CreateHotelCardFullRequest {
    pub fn validate_fields(&self) -> Result<(), ApiError> {
        self.address.validate_fields()?;
        self.card.validate_fields()?;
        self.details
            .validate()
            .map_err(|e| ApiError::Validation(e.to_string()))?;
        validate_time_of_day(&self.details.check_in_time)?;
        validate_time_of_day(&self.details.check_out_time)
    }
}

/// Response for the composite create
#[derive(Debug, Serialize)]
pub struct HotelCardFullResponse {
    pub card: HotelCard,
    pub details: HotelDetails,
    pub address: Address,
}

/// Body for POST /api/hotel-card/{id}/amenity and .../label
#[derive(Debug, Deserialize)]
pub struct LinkRequest {
    pub target_id: Uuid,
    #[serde(default)]
    pub sort_order: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_hotel_group_website_checked_like_create() {
        let req = UpdateHotelGroupRequest {
            name: None,
            website: Some("not a url".to_string()),
            sort_order: None,
        };
        assert!(req.validate_fields().is_err());

        let req = UpdateHotelGroupRequest {
            name: Some("Costa Collection".to_string()),
            website: Some("https://example.com".to_string()),
            sort_order: None,
        };
        assert!(req.validate_fields().is_ok());
    }

    #[test]
    fn test_update_hotel_group_rejects_empty_name() {
        let req = UpdateHotelGroupRequest {
            name: Some(String::new()),
            website: None,
            sort_order: None,
        };
        assert!(req.validate_fields().is_err());
    }
}
