// src/models/geo.rs
// DOCUMENTATION: Geography entities: countries, cities, neighborhoods,
// landmarks and destinations
// PURPOSE: Database models plus request/response DTOs for the geo endpoints

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::errors::ApiError;
use crate::models::validation::*;

/// Country record
/// DOCUMENTATION: Root of the geography tree; code is a unique natural key
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Country {
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// ISO-style 2-letter code, unique
    pub code: String,

    /// Display ordering, ascending
    pub sort_order: i32,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateCountryRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    pub code: String,
    #[serde(default)]
    pub sort_order: Option<i32>,
}

impl CreateCountryRequest {
    pub fn validate_fields(&self) -> Result<(), ApiError> {
        self.validate()
            .map_err(|e| ApiError::Validation(e.to_string()))?;
        validate_country_code(&self.code)
    }
}

/// Sparse patch: only provided fields are validated and written
#[derive(Debug, Deserialize)]
pub struct UpdateCountryRequest {
    pub name: Option<String>,
    pub code: Option<String>,
    pub sort_order: Option<i32>,
}

impl UpdateCountryRequest {
    pub fn validate_fields(&self) -> Result<(), ApiError> {
        if let Some(name) = &self.name {
            if name.is_empty() {
                return Err(ApiError::Validation("Name must not be empty".to_string()));
            }
        }
        if let Some(code) = &self.code {
            validate_country_code(code)?;
        }
        Ok(())
    }
}

/// Country detail with optional relation expansion (?include=true)
#[derive(Debug, Serialize)]
pub struct CountryDetailResponse {
    #[serde(flatten)]
    pub country: Country,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cities: Option<Vec<City>>,
}

/// City record; name is unique within its country
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct City {
    pub id: Uuid,
    pub country_id: Uuid,
    pub name: String,

    /// Popularity score 0-100, used as secondary ordering
    pub popularity: i32,

    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateCityRequest {
    pub country_id: Uuid,
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[serde(default)]
    pub popularity: Option<i32>,
    #[serde(default)]
    pub sort_order: Option<i32>,
}

impl CreateCityRequest {
    pub fn validate_fields(&self) -> Result<(), ApiError> {
        self.validate()
            .map_err(|e| ApiError::Validation(e.to_string()))?;
        if let Some(popularity) = self.popularity {
            validate_popularity(popularity)?;
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateCityRequest {
    pub country_id: Option<Uuid>,
    pub name: Option<String>,
    pub popularity: Option<i32>,
    pub sort_order: Option<i32>,
}

impl UpdateCityRequest {
    pub fn validate_fields(&self) -> Result<(), ApiError> {
        if let Some(name) = &self.name {
            if name.is_empty() {
                return Err(ApiError::Validation("Name must not be empty".to_string()));
            }
        }
        if let Some(popularity) = self.popularity {
            validate_popularity(popularity)?;
        }
        Ok(())
    }
}

/// Query parameters for GET /api/city
#[derive(Debug, Deserialize)]
pub struct CityListQuery {
    pub country_id: Option<Uuid>,
    /// Substring match on name
    pub name: Option<String>,
    pub min_popularity: Option<i32>,
    pub include: Option<bool>,
}

/// City detail with optional relation expansion (?include=true)
/// Neighborhoods and landmarks come back sorted ascending by sort_order
#[derive(Debug, Serialize)]
pub struct CityDetailResponse {
    #[serde(flatten)]
    pub city: City,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<Country>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub neighborhoods: Option<Vec<Neighborhood>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub landmarks: Option<Vec<Landmark>>,
}

/// Neighborhood record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Neighborhood {
    pub id: Uuid,
    pub city_id: Uuid,
    pub name: String,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateNeighborhoodRequest {
    pub city_id: Uuid,
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[serde(default)]
    pub sort_order: Option<i32>,
}

impl CreateNeighborhoodRequest {
    pub fn validate_fields(&self) -> Result<(), ApiError> {
        self.validate()
            .map_err(|e| ApiError::Validation(e.to_string()))
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateNeighborhoodRequest {
    pub city_id: Option<Uuid>,
    pub name: Option<String>,
    pub sort_order: Option<i32>,
}

impl UpdateNeighborhoodRequest {
    pub fn validate_fields(&self) -> Result<(), ApiError> {
        if let Some(name) = &self.name {
            if name.is_empty() {
                return Err(ApiError::Validation("Name must not be empty".to_string()));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct NeighborhoodListQuery {
    pub city_id: Option<Uuid>,
    pub name: Option<String>,
}

/// Landmark record with point coordinates
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Landmark {
    pub id: Uuid,
    pub city_id: Uuid,
    pub name: String,

    /// One of LANDMARK_CATEGORIES
    pub category: String,

    pub latitude: f64,
    pub longitude: f64,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateLandmarkRequest {
    pub city_id: Uuid,
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    pub category: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub sort_order: Option<i32>,
}

impl CreateLandmarkRequest {
    pub fn validate_fields(&self) -> Result<(), ApiError> {
        self.validate()
            .map_err(|e| ApiError::Validation(e.to_string()))?;
        validate_landmark_category(&self.category)?;
        validate_latitude(self.latitude)?;
        validate_longitude(self.longitude)
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateLandmarkRequest {
    pub city_id: Option<Uuid>,
    pub name: Option<String>,
    pub category: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub sort_order: Option<i32>,
}

impl UpdateLandmarkRequest {
    pub fn validate_fields(&self) -> Result<(), ApiError> {
        if let Some(category) = &self.category {
            validate_landmark_category(category)?;
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
pub struct LandmarkListQuery {
    pub city_id: Option<Uuid>,
    pub category: Option<String>,
    pub name: Option<String>,
}

/// Destination record: a curated marketing grouping of cities
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Destination {
    pub id: Uuid,
    pub name: String,

    /// URL slug, unique
    pub slug: String,

    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateDestinationRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(length(min = 1, max = 255))]
    pub slug: String,
    #[serde(default)]
    pub sort_order: Option<i32>,
}

impl CreateDestinationRequest {
    pub fn validate_fields(&self) -> Result<(), ApiError> {
        self.validate()
            .map_err(|e| ApiError::Validation(e.to_string()))?;
        validate_slug(&self.slug)
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateDestinationRequest {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub sort_order: Option<i32>,
}

impl UpdateDestinationRequest {
    pub fn validate_fields(&self) -> Result<(), ApiError> {
        if let Some(name) = &self.name {
            if name.is_empty() {
                return Err(ApiError::Validation("Name must not be empty".to_string()));
            }
        }
        if let Some(slug) = &self.slug {
            validate_slug(slug)?;
        }
        Ok(())
    }
}

/// City attached to a destination, carrying the join table ordering
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct DestinationCity {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub city: City,

    /// Ordering within the destination (from the join table)
    pub display_order: i32,
}

/// Destination detail with optional relation expansion (?include=true)
#[derive(Debug, Serialize)]
pub struct DestinationDetailResponse {
    #[serde(flatten)]
    pub destination: Destination,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cities: Option<Vec<DestinationCity>>,
}

/// Body for POST /api/destination/{id}/city
#[derive(Debug, Deserialize)]
pub struct LinkCityRequest {
    pub city_id: Uuid,
    #[serde(default)]
    pub display_order: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_destination_slug_checked_like_create() {
        let req = UpdateDestinationRequest {
            name: None,
            slug: Some("Not A Slug!!".to_string()),
            sort_order: None,
        };
        assert!(req.validate_fields().is_err());

        let req = UpdateDestinationRequest {
            name: None,
            slug: Some("costa-brava".to_string()),
            sort_order: None,
        };
        assert!(req.validate_fields().is_ok());
    }

    #[test]
    fn test_update_neighborhood_rejects_empty_name() {
        let req = UpdateNeighborhoodRequest {
            city_id: None,
            name: Some(String::new()),
            sort_order: None,
        };
        assert!(req.validate_fields().is_err());
    }

    #[test]
    fn test_sparse_update_with_no_fields_is_valid() {
        let req = UpdateDestinationRequest {
            name: None,
            slug: None,
            sort_order: None,
        };
        assert!(req.validate_fields().is_ok());

        let req = UpdateNeighborhoodRequest {
            city_id: None,
            name: None,
            sort_order: Some(3),
        };
        assert!(req.validate_fields().is_ok());
    }
}
