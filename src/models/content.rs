// src/models/content.rs
// DOCUMENTATION: Editorial content attached to hotel cards: FAQs and policies
// PURPOSE: Models and DTOs, including the paginated FAQ admin listing

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::errors::ApiError;
use crate::models::validation::validate_time_of_day;

/// FAQ entry for a hotel card
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct HotelFaq {
    pub id: Uuid,
    pub hotel_card_id: Uuid,
    pub question: String,
    pub answer: String,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateFaqRequest {
    pub hotel_card_id: Uuid,
    #[validate(length(min = 1, max = 1024))]
    pub question: String,
    #[validate(length(min = 1))]
    pub answer: String,
    #[serde(default)]
    pub sort_order: Option<i32>,
}

impl CreateFaqRequest {
    pub fn validate_fields(&self) -> Result<(), ApiError> {
        self.validate()
            .map_err(|e| ApiError::Validation(e.to_string()))
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateFaqRequest {
    pub question: Option<String>,
    pub answer: Option<String>,
    pub sort_order: Option<i32>,
}

impl UpdateFaqRequest {
    pub fn validate_fields(&self) -> Result<(), ApiError> {
        if let Some(question) = &self.question {
            if question.is_empty() || question.len() > 1024 {
                return Err(ApiError::Validation(
                    "Question must be between 1 and 1024 characters".to_string(),
                ));
            }
        }
        if let Some(answer) = &self.answer {
            if answer.is_empty() {
                return Err(ApiError::Validation(
                    "Answer must not be empty".to_string(),
                ));
            }
        }
        Ok(())
    }
}

/// Query parameters for GET /api/hotel-faq
/// The only list endpoint with offset pagination (admin FAQ table)
#[derive(Debug, Deserialize)]
pub struct FaqListQuery {
    pub hotel_card_id: Option<Uuid>,
    /// Page number (1-based)
    pub page: Option<i64>,
    /// Results per page (max 100)
    pub limit: Option<i64>,
}

/// Paginated FAQ listing with derived page metadata
#[derive(Debug, Serialize)]
pub struct FaqListResponse {
    pub data: Vec<HotelFaq>,
    pub total_count: i64,
    pub page: i64,
    pub limit: i64,
    pub total_pages: i64,
    pub has_next_page: bool,
}

impl FaqListResponse {
    /// Build page metadata from a result set and total count
    pub fn new(data: Vec<HotelFaq>, total_count: i64, page: i64, limit: i64) -> Self {
        let total_pages = if total_count == 0 {
            0
        } else {
            (total_count + limit - 1) / limit
        };

        FaqListResponse {
            data,
            total_count,
            page,
            limit,
            total_pages,
            has_next_page: page < total_pages,
        }
    }
}

/// Booking policy, 1:1 with a hotel card
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct HotelPolicy {
    pub id: Uuid,
    pub hotel_card_id: Uuid,
    pub check_in_time: String,
    pub check_out_time: String,
    pub cancellation_policy: String,
    pub pets_allowed: bool,
    pub smoking_allowed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreatePolicyRequest {
    pub hotel_card_id: Uuid,
    pub check_in_time: String,
    pub check_out_time: String,
    #[validate(length(min = 1))]
    pub cancellation_policy: String,
    #[serde(default)]
    pub pets_allowed: Option<bool>,
    #[serde(default)]
    pub smoking_allowed: Option<bool>,
}

impl CreatePolicyRequest {
    pub fn validate_fields(&self) -> Result<(), ApiError> {
        self.validate()
            .map_err(|e| ApiError::Validation(e.to_string()))?;
        validate_time_of_day(&self.check_in_time)?;
        validate_time_of_day(&self.check_out_time)
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdatePolicyRequest {
    pub check_in_time: Option<String>,
    pub check_out_time: Option<String>,
    pub cancellation_policy: Option<String>,
    pub pets_allowed: Option<bool>,
    pub smoking_allowed: Option<bool>,
}

impl UpdatePolicyRequest {
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

#[derive(Debug, Deserialize)]
pub struct PolicyListQuery {
    pub hotel_card_id: Option<Uuid>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_metadata() {
        let resp = FaqListResponse::new(vec![], 45, 1, 20);
        assert_eq!(resp.total_pages, 3);
        assert!(resp.has_next_page);

        let resp = FaqListResponse::new(vec![], 45, 3, 20);
        assert_eq!(resp.total_pages, 3);
        assert!(!resp.has_next_page);

        let resp = FaqListResponse::new(vec![], 40, 2, 20);
        assert_eq!(resp.total_pages, 2);
        assert!(!resp.has_next_page);
    }

    #[test]
    fn test_pagination_empty() {
        let resp = FaqListResponse::new(vec![], 0, 1, 20);
        assert_eq!(resp.total_pages, 0);
        assert!(!resp.has_next_page);
    }

    #[test]
    fn test_update_faq_fields_checked_like_create() {
        let req = UpdateFaqRequest {
            question: Some(String::new()),
            answer: None,
            sort_order: None,
        };
        assert!(req.validate_fields().is_err());

        let req = UpdateFaqRequest {
            question: None,
            answer: Some(String::new()),
            sort_order: None,
        };
        assert!(req.validate_fields().is_err());

        let req = UpdateFaqRequest {
            question: Some("Is breakfast included?".to_string()),
            answer: Some("Yes, with direct bookings.".to_string()),
            sort_order: Some(1),
        };
        assert!(req.validate_fields().is_ok());
    }
}
