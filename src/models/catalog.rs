// src/models/catalog.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::errors::ApiError;
use crate::models::validation::*;

/// Hotel amenity; name is unique. Accessibility options live here with
/// category "accessibility"
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct HotelAmenity {
    pub id: Uuid,
    pub name: String,
    pub icon: Option<String>,
    pub category: String,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateAmenityRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[serde(default)]
    pub icon: Option<String>,
    pub category: String,
    #[serde(default)]
    pub sort_order: Option<i32>,
}

impl CreateAmenityRequest {
    pub fn validate_fields(&self) -> Result<(), ApiError> {
        self.validate()
            .map_err(|e| ApiError::Validation(e.to_string()))?;
        validate_amenity_category(&self.category)
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateAmenityRequest {
    pub name: Option<String>,
    pub icon: Option<String>,
    pub category: Option<String>,
    pub sort_order: Option<i32>,
}

impl UpdateAmenityRequest {
    pub fn validate_fields(&self) -> Result<(), ApiError> {
        if let Some(category) = &self.category {
            validate_amenity_category(category)?;
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct AmenityListQuery {
    pub category: Option<String>,
    pub name: Option<String>,
}

/// Amenity attached to a hotel card, carrying the join table ordering
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct LinkedAmenity {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub amenity: HotelAmenity,

    /// Ordering within the hotel card (from the join table)
    pub link_order: i32,
}

/// Display label (e.g. "Eco-friendly", "Family favorite"); code is unique
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Label {
    pub id: Uuid,
    pub name: String,
    pub code: String,

    /// #RRGGBB display color
    pub color: String,

    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateLabelRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    pub code: String,
    pub color: String,
    #[serde(default)]
    pub sort_order: Option<i32>,
}

impl CreateLabelRequest {
    pub fn validate_fields(&self) -> Result<(), ApiError> {
        self.validate()
            .map_err(|e| ApiError::Validation(e.to_string()))?;
        validate_key_code(&self.code)?;
        validate_hex_color(&self.color)
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateLabelRequest {
    pub name: Option<String>,
    pub code: Option<String>,
    pub color: Option<String>,
    pub sort_order: Option<i32>,
}

impl UpdateLabelRequest {
    pub fn validate_fields(&self) -> Result<(), ApiError> {
        if let Some(code) = &self.code {
            validate_key_code(code)?;
        }
        if let Some(color) = &self.color {
            validate_hex_color(color)?;
        }
        Ok(())
    }
}

/// Label attached to a hotel card, carrying the join table ordering
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct LinkedLabel {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub label: Label,
    pub link_order: i32,
}

/// Editorial highlight shown on the hotel detail page
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct HotelHighlight {
    pub id: Uuid,
    pub hotel_card_id: Uuid,
    pub title: String,
    pub icon: Option<String>,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateHighlightRequest {
    pub hotel_card_id: Uuid,
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub sort_order: Option<i32>,
}

impl CreateHighlightRequest {
    pub fn validate_fields(&self) -> Result<(), ApiError> {
        self.validate()
            .map_err(|e| ApiError::Validation(e.to_string()))
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateHighlightRequest {
    pub title: Option<String>,
    pub icon: Option<String>,
    pub sort_order: Option<i32>,
}

impl UpdateHighlightRequest {
    pub fn validate_fields(&self) -> Result<(), ApiError> {
        if let Some(title) = &self.title {
            if title.is_empty() || title.len() > 255 {
                return Err(ApiError::Validation(
                    "Title must be between 1 and 255 characters".to_string(),
                ));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct HighlightListQuery {
    pub hotel_card_id: Option<Uuid>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_highlight_title_checked_like_create() {
        let req = UpdateHighlightRequest {
            title: Some(String::new()),
            icon: None,
            sort_order: None,
        };
        assert!(req.validate_fields().is_err());

        let req = UpdateHighlightRequest {
            title: Some("Rooftop views".to_string()),
            icon: None,
            sort_order: Some(1),
        };
        assert!(req.validate_fields().is_ok());
    }
}
